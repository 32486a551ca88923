//! Client operations against a fake backend.

mod common;

use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use common::FakeBackend;
use common::TOKEN;
use serde_json::json;
use siteadmin_lib::Record;
use siteadmin_lib::Resource;
use siteadmin_lib::RetryConfig;
use siteadmin_lib::api::MultipartForm;
use siteadmin_lib::api::Payload;
use siteadmin_lib::error::ApiError;
use siteadmin_lib::error::AuthError;
use siteadmin_lib::error::Error;
use siteadmin_lib::form::FormState;
use siteadmin_lib::form::schema_for;

fn ok(body: serde_json::Value) -> (u16, String) {
    (200, body.to_string())
}

#[tokio::test]
async fn test_list_sends_bearer_and_drops_version_key() {
    let backend = FakeBackend::start(|_| {
        ok(json!([
            {"_id": "a1", "altText": "Best Developer 2023", "isActive": true, "__v": 0},
            {"_id": "a2", "altText": "Green Building", "isActive": false, "__v": 0}
        ]))
    })
    .await;

    let awards = backend.client().list(Resource::Awards).await.unwrap();
    assert_eq!(awards.len(), 2);
    assert_eq!(awards[0].id(), Some("a1"));
    assert!(!awards[0].contains("__v"));
    assert!(awards[0].flag("isActive"));

    let request = backend.last();
    assert_eq!(request.method, "GET");
    assert_eq!(request.path, "/awards");
    assert_eq!(request.authorization, Some(format!("Bearer {}", TOKEN)));
}

#[tokio::test]
async fn test_career_queries_drop_incomplete_entries() {
    let backend = FakeBackend::start(|_| {
        ok(json!([
            {"_id": "q1", "car_name": "Asha", "car_email": "a@x.com", "car_resume": "cv.pdf"},
            {"_id": "q2", "car_name": "Ravi", "car_email": "", "car_resume": "cv.pdf"},
            {"_id": "q3", "car_name": "Meera", "car_email": "m@x.com"}
        ]))
    })
    .await;

    let queries = backend.client().list(Resource::CareerQueries).await.unwrap();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].id(), Some("q1"));
    assert_eq!(backend.last().path, "/career-queries");
}

#[tokio::test]
async fn test_gallery_images_are_listed_under_a_gallery() {
    let backend = FakeBackend::start(|_| ok(json!([{"_id": "i1", "isThumbnail": true}]))).await;
    let client = backend.client();

    let images = client.list_under(Resource::GalleryImages, "g1").await.unwrap();
    assert_eq!(images.len(), 1);
    assert_eq!(backend.last().path, "/gallery-image/g1");

    let result = client.list(Resource::GalleryImages).await;
    assert!(matches!(result, Err(Error::InvalidOperation(_))));
    assert_eq!(backend.requests().len(), 1);
}

#[tokio::test]
async fn test_gallery_images_have_no_record_endpoint() {
    let backend = FakeBackend::start(|_| ok(json!([{"_id": "i1"}]))).await;
    let client = backend.client();

    let result = client.retrieve(Resource::GalleryImages, "g1").await;
    assert!(matches!(result, Err(Error::InvalidOperation(_))));

    let result = client
        .update(Resource::GalleryImages, "i1", Record::new().set("caption", "Lobby"))
        .await;
    assert!(matches!(result, Err(Error::InvalidOperation(_))));
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_retrieve_unwraps_data_envelope() {
    let backend = FakeBackend::start(|_| {
        ok(json!({"data": {"_id": "g1", "projectName": "Skyline", "priority": 2}}))
    })
    .await;

    let gallery = backend.client().retrieve(Resource::Gallery, "g1").await.unwrap();
    assert_eq!(gallery.id(), Some("g1"));
    assert_eq!(gallery.get_int("priority").unwrap(), Some(2));
    assert_eq!(backend.last().path, "/gallery/g1");
}

#[tokio::test]
async fn test_create_json_resource() {
    let backend = FakeBackend::start(|req| {
        let mut body = req.json();
        body["_id"] = json!("c9");
        (201, body.to_string())
    })
    .await;

    let mut form = FormState::create(schema_for(Resource::Careers).unwrap());
    for (field, value) in [
        ("role", "Site Engineer"),
        ("position", "Senior"),
        ("experience", "5+ years"),
        ("location", "Pune"),
        ("description", "<p>Own site execution</p>"),
    ] {
        form.set(field, value).unwrap();
    }

    let created = backend
        .client()
        .create(Resource::Careers, form.into_payload().unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(created.id(), Some("c9"));
    assert_eq!(created.get_string("role").unwrap(), Some("Site Engineer"));

    let request = backend.last();
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/careers");
    assert_eq!(request.content_type.as_deref(), Some("application/json"));
    assert_eq!(request.json()["location"], "Pune");
}

#[tokio::test]
async fn test_create_multipart_with_file() {
    let dir = tempfile::tempdir().unwrap();
    let logo = dir.path().join("acme.png");
    std::fs::write(&logo, b"\x89PNG fake").unwrap();

    let backend = FakeBackend::start(|_| (201, json!({"message": "Client added"}).to_string())).await;

    let mut form = FormState::create(schema_for(Resource::Clients).unwrap());
    form.set("altText", "Acme Corp").unwrap();
    form.attach("image", &logo).unwrap();

    let created = backend
        .client()
        .create(Resource::Clients, form.into_payload().unwrap())
        .await
        .unwrap();
    assert!(created.is_none());

    let request = backend.last();
    assert_eq!(request.path, "/clients");
    assert!(
        request
            .content_type
            .as_deref()
            .unwrap()
            .starts_with("multipart/form-data")
    );
    let body = request.body_text();
    assert!(body.contains("name=\"altText\""));
    assert!(body.contains("Acme Corp"));
    assert!(body.contains("filename=\"acme.png\""));
    assert!(body.contains("image/png"));
    assert!(body.contains("PNG fake"));
}

#[tokio::test]
async fn test_create_under_gallery() {
    let backend = FakeBackend::start(|_| (201, "[]".to_string())).await;
    let form = MultipartForm::new()
        .text("projectId", "g1")
        .file_bytes("images", "a.jpg", b"one".to_vec())
        .file_bytes("images", "b.jpg", b"two".to_vec());

    backend
        .client()
        .create_under(Resource::GalleryImages, "g1", form)
        .await
        .unwrap();

    let request = backend.last();
    assert_eq!(request.path, "/gallery-image/g1");
    let body = request.body_text();
    assert_eq!(body.matches("name=\"images\"").count(), 2);
}

#[tokio::test]
async fn test_create_path_overrides() {
    let backend = FakeBackend::start(|_| (201, String::new())).await;
    let client = backend.client();

    client
        .create(Resource::Projects, MultipartForm::new().text("projectName", "Tower"))
        .await
        .unwrap();
    assert_eq!(backend.last().path, "/projects/add");

    client
        .create(Resource::BannerImages, MultipartForm::new().text("altText", "Hero"))
        .await
        .unwrap();
    assert_eq!(backend.last().path, "/banner-images/upload");
}

#[tokio::test]
async fn test_update_is_full_put() {
    let backend = FakeBackend::start(|_| ok(json!({"_id": "o1", "area": "14M"}))).await;
    let record = Record::new()
        .set("area", "14M")
        .set("deliveredProjects", "130")
        .set("happyCustomers", "6000")
        .set("content", "About");

    let updated = backend
        .client()
        .update(Resource::Overview, "o1", Payload::Json(record))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.get_string("area").unwrap(), Some("14M"));

    let request = backend.last();
    assert_eq!(request.method, "PUT");
    assert_eq!(request.path, "/overview/o1");
    assert_eq!(request.json()["happyCustomers"], "6000");
}

#[tokio::test]
async fn test_delete() {
    let backend = FakeBackend::start(|_| ok(json!({"message": "deleted"}))).await;
    backend.client().delete(Resource::Spotlights, "s1").await.unwrap();
    let request = backend.last();
    assert_eq!(request.method, "DELETE");
    assert_eq!(request.path, "/spotlights/s1");
}

#[tokio::test]
async fn test_inboxes_are_read_only() {
    let backend = FakeBackend::start(|_| ok(json!({}))).await;
    let client = backend.client();

    let result = client.delete(Resource::ContactQueries, "q1").await;
    assert!(matches!(result, Err(Error::InvalidOperation(_))));
    let result = client
        .create(Resource::CareerQueries, Record::new().set("car_name", "x"))
        .await;
    assert!(matches!(result, Err(Error::InvalidOperation(_))));
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_toggle_award_uses_dedicated_endpoint() {
    let backend = FakeBackend::start(|_| ok(json!({"message": "Status toggled"}))).await;
    let award = Record::with_id("a1").set("isActive", true);

    backend
        .client()
        .toggle(Resource::Awards, &award, "isActive")
        .await
        .unwrap();

    let request = backend.last();
    assert_eq!(request.method, "PATCH");
    assert_eq!(request.path, "/awards/a1/toggle-status");
    assert!(request.body.is_empty());
}

#[tokio::test]
async fn test_toggle_thumbnail_returns_image() {
    let backend = FakeBackend::start(|_| {
        ok(json!({"image": {"_id": "i2", "isThumbnail": true}}))
    })
    .await;
    let image = Record::with_id("i2").set("isThumbnail", false);

    let updated = backend
        .client()
        .toggle(Resource::GalleryImages, &image, "isThumbnail")
        .await
        .unwrap()
        .unwrap();
    assert!(updated.flag("isThumbnail"));

    let request = backend.last();
    assert_eq!(request.method, "PUT");
    assert_eq!(request.path, "/gallery-image/i2/toggle-thumbnail");
}

#[tokio::test]
async fn test_toggle_testimonial_sends_flag_only() {
    let backend = FakeBackend::start(|_| ok(json!({}))).await;
    let testimonial = Record::with_id("t1")
        .set("content", "Great team")
        .set("isActive", true);

    backend
        .client()
        .toggle(Resource::Testimonials, &testimonial, "isActive")
        .await
        .unwrap();

    let request = backend.last();
    assert_eq!(request.method, "PUT");
    assert_eq!(request.path, "/testimonials/t1");
    assert_eq!(request.json(), json!({"isActive": false}));
}

#[tokio::test]
async fn test_toggle_project_resubmits_record() {
    let backend = FakeBackend::start(|_| ok(json!({}))).await;
    let project = Record::with_id("p1")
        .set("projectName", "Skyline")
        .set("isActive", true)
        .set("showOnHomePage", false)
        .set("areas", vec![1200, 900]);

    backend
        .client()
        .toggle(Resource::Projects, &project, "showOnHomePage")
        .await
        .unwrap();

    let body = backend.last().json();
    assert_eq!(body["_id"], "p1");
    assert_eq!(body["projectName"], "Skyline");
    assert_eq!(body["isActive"], true);
    assert_eq!(body["showOnHomePage"], true);
    assert_eq!(body["areas"], json!([1200, 900]));
}

#[tokio::test]
async fn test_toggle_client_active() {
    let backend = FakeBackend::start(|_| ok(json!({}))).await;
    let client_record = Record::with_id("c1").set("altText", "Acme").set("active", false);

    backend
        .client()
        .toggle(Resource::Clients, &client_record, "active")
        .await
        .unwrap();

    let request = backend.last();
    assert_eq!(request.path, "/clients/c1");
    assert_eq!(request.json()["active"], true);
    assert_eq!(request.json()["altText"], "Acme");
}

#[tokio::test]
async fn test_toggle_unsupported_makes_no_request() {
    let backend = FakeBackend::start(|_| ok(json!({}))).await;
    let career = Record::with_id("c1").set("isActive", true);

    let result = backend
        .client()
        .toggle(Resource::Careers, &career, "isActive")
        .await;
    assert!(matches!(result, Err(Error::InvalidOperation(_))));

    let result = backend
        .client()
        .toggle(Resource::Awards, &Record::new(), "isActive")
        .await;
    assert!(matches!(result, Err(Error::InvalidOperation(_))));
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_priority_and_caption() {
    let backend = FakeBackend::start(|_| ok(json!({}))).await;
    let client = backend.client();

    client.set_priority("i1", 4).await.unwrap();
    let request = backend.last();
    assert_eq!(request.method, "PUT");
    assert_eq!(request.path, "/gallery-image/i1/priority");
    assert_eq!(request.json(), json!({"priority": 4}));

    client.set_caption("i1", "Lobby at dusk").await.unwrap();
    let request = backend.last();
    assert_eq!(request.path, "/gallery-image/i1");
    assert_eq!(request.json(), json!({"caption": "Lobby at dusk"}));
}

#[tokio::test]
async fn test_dashboard_counts() {
    let backend = FakeBackend::start(|req| match req.path.as_str() {
        "/career-queries/count" => ok(json!({"count": 7})),
        "/contact-us/count" => ok(json!({"count": 42})),
        _ => (404, String::new()),
    })
    .await;

    let stats = backend.client().dashboard().await.unwrap();
    assert_eq!(stats.career_queries, 7);
    assert_eq!(stats.contact_queries, 42);
}

#[tokio::test]
async fn test_backend_error_message_is_surfaced() {
    let backend =
        FakeBackend::start(|_| (404, json!({"message": "Award not found"}).to_string())).await;

    let err = backend
        .client()
        .retrieve(Resource::Awards, "missing")
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(404));
    match err {
        Error::Api(ApiError::Http { message, .. }) => assert_eq!(message, "Award not found"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_unauthorized_is_token_rejected() {
    let backend = FakeBackend::start(|_| (401, json!({"error": "jwt expired"}).to_string())).await;
    let err = backend.client().list(Resource::Careers).await.unwrap_err();
    match err {
        Error::Auth(AuthError::TokenRejected { message }) => assert_eq!(message, "jwt expired"),
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(backend.requests().len(), 1);
}

#[tokio::test]
async fn test_server_errors_are_retried() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let backend = FakeBackend::start(move |_| {
        if counter.fetch_add(1, Ordering::SeqCst) < 2 {
            (503, String::new())
        } else {
            ok(json!([]))
        }
    })
    .await;

    let records = backend.client().list(Resource::Clients).await.unwrap();
    assert!(records.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_toggle_endpoint_is_not_replayed_after_server_error() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let backend = FakeBackend::start(move |_| {
        if counter.fetch_add(1, Ordering::SeqCst) == 0 {
            (502, String::new())
        } else {
            ok(json!({"message": "Status toggled"}))
        }
    })
    .await;
    let award = Record::with_id("a1").set("isActive", false);

    let err = backend
        .client()
        .toggle(Resource::Awards, &award, "isActive")
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(502));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_create_is_not_replayed_after_server_error() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let backend = FakeBackend::start(move |_| {
        if counter.fetch_add(1, Ordering::SeqCst) == 0 {
            (503, String::new())
        } else {
            (201, json!({"_id": "c1"}).to_string())
        }
    })
    .await;

    let career = Record::new()
        .set("role", "Engineer")
        .set("position", "Senior")
        .set("location", "Pune")
        .set("description", "Site work");
    let err = backend.client().create(Resource::Careers, career).await.unwrap_err();
    assert_eq!(err.status_code(), Some(503));
    assert_eq!(backend.requests().len(), 1);
}

#[tokio::test]
async fn test_rate_limited_create_is_retried() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let backend = FakeBackend::start(move |_| {
        if counter.fetch_add(1, Ordering::SeqCst) == 0 {
            (429, String::new())
        } else {
            (201, json!({"_id": "c1", "role": "Engineer"}).to_string())
        }
    })
    .await;

    let created = backend
        .client()
        .create(Resource::Careers, Record::new().set("role", "Engineer"))
        .await
        .unwrap();
    assert_eq!(created.and_then(|r| r.id().map(String::from)), Some("c1".to_string()));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_no_retry_fails_fast() {
    let backend = FakeBackend::start(|_| (500, json!({"error": "db down"}).to_string())).await;
    let err = backend
        .client_with_retry(RetryConfig::no_retry())
        .list(Resource::Clients)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(500));
    assert_eq!(backend.requests().len(), 1);
}

#[tokio::test]
async fn test_client_errors_are_not_retried() {
    let backend = FakeBackend::start(|_| (400, json!({"error": "bad input"}).to_string())).await;
    let result = backend
        .client()
        .create(Resource::Careers, Record::new().set("role", ""))
        .await;
    assert_eq!(result.unwrap_err().status_code(), Some(400));
    assert_eq!(backend.requests().len(), 1);
}
