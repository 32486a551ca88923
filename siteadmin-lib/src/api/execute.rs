//! Operation execution logic
//!
//! HTTP execution for every [`Operation`], plus the request loop with retry.

use reqwest::Method;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::crud::Op;
use super::crud::Operation;
use super::crud::OperationResult;
use super::crud::Payload;
use super::multipart::MultipartForm;
use super::toggle::ToggleStrategy;
use super::toggle::toggle_body;
use super::toggle::toggle_strategy;
use crate::AdminClient;
use crate::Idempotency;
use crate::error::ApiError;
use crate::error::AuthError;
use crate::error::Error;
use crate::model::Record;
use crate::model::Resource;

/// Fields a career query must carry to be shown in the inbox.
const CAREER_QUERY_REQUIRED: [&str; 3] = ["car_name", "car_email", "car_resume"];

/// A request body ready to be (re)sent.
#[derive(Debug, Clone)]
pub(crate) enum RequestBody {
    Empty,
    Json(String),
    Multipart(MultipartForm),
}

impl RequestBody {
    async fn from_payload(payload: Payload) -> Result<Self, Error> {
        Ok(match payload {
            Payload::Json(record) => Self::Json(serde_json::to_string(&record)?),
            Payload::Multipart(form) => Self::Multipart(form.load().await?),
        })
    }

    fn json<T: Serialize>(value: &T) -> Result<Self, Error> {
        Ok(Self::Json(serde_json::to_string(value)?))
    }
}

impl AdminClient {
    /// Executes any operation.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use siteadmin_lib::api::Op;
    ///
    /// let op = Op::delete(Resource::Awards, "65f0c2");
    /// client.execute(op).await?;
    /// ```
    pub async fn execute(&self, operation: impl Into<Operation>) -> Result<OperationResult, Error> {
        let operation = operation.into();
        if operation.is_write() && operation.resource().is_read_only() {
            return Err(Error::InvalidOperation(format!(
                "{} is read-only",
                operation.resource().label()
            )));
        }

        match operation {
            Operation::List { resource, parent } => {
                let records = self.execute_list(resource, parent.as_deref()).await?;
                Ok(OperationResult::List(records))
            }
            Operation::Retrieve { resource, id } => {
                let record = self.execute_retrieve(resource, &id).await?;
                Ok(OperationResult::Retrieve(record))
            }
            Operation::Create {
                resource,
                parent,
                payload,
            } => {
                let record = self.execute_create(resource, parent.as_deref(), payload).await?;
                Ok(OperationResult::Create(record))
            }
            Operation::Update {
                resource,
                id,
                payload,
            } => {
                let record = self.execute_update(resource, &id, payload).await?;
                Ok(OperationResult::Update(record))
            }
            Operation::Delete { resource, id } => {
                self.request(Method::DELETE, &resource.item_path(&id), RequestBody::Empty)
                    .await?;
                Ok(OperationResult::Delete)
            }
            Operation::Toggle {
                resource,
                record,
                flag,
            } => {
                let record = self.execute_toggle(resource, &record, &flag).await?;
                Ok(OperationResult::Toggle(record))
            }
            Operation::SetPriority { id, priority } => {
                #[derive(Serialize)]
                struct Body {
                    priority: i64,
                }
                let path = format!("{}/priority", Resource::GalleryImages.item_path(&id));
                self.request(Method::PUT, &path, RequestBody::json(&Body { priority })?)
                    .await?;
                Ok(OperationResult::SetPriority)
            }
            Operation::SetCaption { id, caption } => {
                #[derive(Serialize)]
                struct Body {
                    caption: String,
                }
                let path = Resource::GalleryImages.item_path(&id);
                self.request(Method::PUT, &path, RequestBody::json(&Body { caption })?)
                    .await?;
                Ok(OperationResult::SetCaption)
            }
            Operation::Count { resource } => {
                let count = self.execute_count(resource).await?;
                Ok(OperationResult::Count(count))
            }
        }
    }

    // =========================================================================
    // Convenience methods
    // =========================================================================

    /// Fetches every record of a resource.
    pub async fn list(&self, resource: Resource) -> Result<Vec<Record>, Error> {
        self.execute_list(resource, None).await
    }

    /// Fetches the records of a nested resource under `parent`.
    pub async fn list_under(&self, resource: Resource, parent: &str) -> Result<Vec<Record>, Error> {
        self.execute_list(resource, Some(parent)).await
    }

    /// Fetches one record.
    pub async fn retrieve(&self, resource: Resource, id: &str) -> Result<Record, Error> {
        self.execute_retrieve(resource, id).await
    }

    /// Creates a record, returning it if the backend echoes it back.
    pub async fn create(
        &self,
        resource: Resource,
        payload: impl Into<Payload>,
    ) -> Result<Option<Record>, Error> {
        let result = self.execute(Op::create(resource, payload)).await?;
        Ok(result.into_record())
    }

    /// Creates a record under `parent`.
    pub async fn create_under(
        &self,
        resource: Resource,
        parent: &str,
        payload: impl Into<Payload>,
    ) -> Result<Option<Record>, Error> {
        let result = self
            .execute(Op::create(resource, payload).under(parent))
            .await?;
        Ok(result.into_record())
    }

    /// Replaces a record with `payload` (full `PUT`).
    pub async fn update(
        &self,
        resource: Resource,
        id: &str,
        payload: impl Into<Payload>,
    ) -> Result<Option<Record>, Error> {
        let result = self.execute(Op::update(resource, id, payload)).await?;
        Ok(result.into_record())
    }

    /// Deletes a record.
    pub async fn delete(&self, resource: Resource, id: &str) -> Result<(), Error> {
        self.execute(Op::delete(resource, id)).await?;
        Ok(())
    }

    /// Flips a boolean flag on a record.
    ///
    /// Awards and gallery images use dedicated endpoints, testimonials
    /// take the flag alone, projects and clients are re-submitted whole.
    pub async fn toggle(
        &self,
        resource: Resource,
        record: &Record,
        flag: &str,
    ) -> Result<Option<Record>, Error> {
        let result = self
            .execute(Op::toggle(resource, record.clone(), flag))
            .await?;
        Ok(result.into_record())
    }

    /// Sets the display priority of a gallery image.
    pub async fn set_priority(&self, image_id: &str, priority: i64) -> Result<(), Error> {
        self.execute(Op::set_priority(image_id, priority)).await?;
        Ok(())
    }

    /// Sets the caption of a gallery image.
    pub async fn set_caption(&self, image_id: &str, caption: &str) -> Result<(), Error> {
        self.execute(Op::set_caption(image_id, caption)).await?;
        Ok(())
    }

    // =========================================================================
    // Individual operation execution
    // =========================================================================

    async fn execute_list(
        &self,
        resource: Resource,
        parent: Option<&str>,
    ) -> Result<Vec<Record>, Error> {
        if resource.requires_parent() && parent.is_none() {
            return Err(Error::InvalidOperation(format!(
                "{} must be listed under a parent record",
                resource.label()
            )));
        }

        let response = self
            .request(Method::GET, &resource.list_path(parent), RequestBody::Empty)
            .await?;
        let mut records = records_from(read_json(response).await?)?;

        if resource == Resource::CareerQueries {
            let before = records.len();
            records.retain(|r| CAREER_QUERY_REQUIRED.iter().all(|f| !r.display(f).is_empty()));
            if records.len() < before {
                log::debug!("Dropped {} incomplete career queries", before - records.len());
            }
        }

        Ok(records)
    }

    async fn execute_retrieve(&self, resource: Resource, id: &str) -> Result<Record, Error> {
        ensure_record_endpoint(resource, "fetched")?;
        let response = self
            .request(Method::GET, &resource.item_path(id), RequestBody::Empty)
            .await?;
        let json = unwrap_envelope(read_json(response).await?);
        if !json.is_object() {
            return Err(ApiError::parse_with_body("Expected a record object", json.to_string()).into());
        }
        Ok(serde_json::from_value(json)?)
    }

    async fn execute_create(
        &self,
        resource: Resource,
        parent: Option<&str>,
        payload: Payload,
    ) -> Result<Option<Record>, Error> {
        let path = resource.create_path(parent).ok_or_else(|| {
            Error::InvalidOperation(format!(
                "{} needs a parent record to create into",
                resource.label()
            ))
        })?;

        let body = RequestBody::from_payload(payload).await?;
        let response = self.request(Method::POST, &path, body).await?;
        Ok(echoed_record(read_json(response).await?))
    }

    async fn execute_update(
        &self,
        resource: Resource,
        id: &str,
        payload: Payload,
    ) -> Result<Option<Record>, Error> {
        ensure_record_endpoint(resource, "replaced")?;
        let body = RequestBody::from_payload(payload).await?;
        let response = self
            .request(Method::PUT, &resource.item_path(id), body)
            .await?;
        Ok(echoed_record(read_json(response).await?))
    }

    async fn execute_toggle(
        &self,
        resource: Resource,
        record: &Record,
        flag: &str,
    ) -> Result<Option<Record>, Error> {
        let id = record.id().ok_or_else(|| {
            Error::InvalidOperation(format!("cannot toggle '{}' on a record without an id", flag))
        })?;

        let strategy = toggle_strategy(resource, id, flag)?;
        let body = match toggle_body(&strategy, record, flag) {
            Some(body) => RequestBody::json(&body)?,
            None => RequestBody::Empty,
        };
        // Dedicated endpoints flip server-side and are never replayed
        let (method, path, idempotency) = match strategy {
            ToggleStrategy::Endpoint { method, path } => {
                (method, path, Idempotency::NonIdempotent)
            }
            ToggleStrategy::Partial { path } | ToggleStrategy::FullRecord { path } => {
                (Method::PUT, path, Idempotency::Idempotent)
            }
        };

        let response = self.request_with(method, &path, body, idempotency).await?;
        Ok(echoed_record(read_json(response).await?))
    }

    async fn execute_count(&self, resource: Resource) -> Result<u64, Error> {
        #[derive(Deserialize)]
        struct CountResponse {
            count: u64,
        }

        let path = resource.count_path().ok_or_else(|| {
            Error::InvalidOperation(format!("{} has no counter", resource.label()))
        })?;
        let response = self.request(Method::GET, &path, RequestBody::Empty).await?;
        let json = read_json(response).await?;
        let body: CountResponse = serde_json::from_value(json.clone())
            .map_err(|e| ApiError::parse_with_body(e.to_string(), json.to_string()))?;
        Ok(body.count)
    }

    // =========================================================================
    // Helper methods
    // =========================================================================

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.inner.base_url, path)
    }

    /// Makes an authenticated HTTP request with retry.
    ///
    /// Whether a failed request is replayed follows from its method, see [`Idempotency::of`].
    pub(crate) async fn request(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> Result<reqwest::Response, Error> {
        let idempotency = Idempotency::of(&method);
        self.request_with(method, path, body, idempotency).await
    }

    /// This is the low-level request method used by all operations.
    pub(crate) async fn request_with(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
        idempotency: Idempotency,
    ) -> Result<reqwest::Response, Error> {
        let url = self.build_url(path);
        let token = self.inner.token_provider.get_token().await?;

        let retry_config = &self.inner.retry_config;
        let mut attempts = 0;
        let mut delay = retry_config.initial_delay;

        loop {
            log::debug!("{} {}", method, url);
            let result = self.send_once(method.clone(), &url, &token.as_bearer(), &body).await;

            let error = match result {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    }
                    let text = response.text().await.unwrap_or_default();
                    let error = ApiError::from_body(status.as_u16(), text);
                    if status == StatusCode::UNAUTHORIZED {
                        let message = error.message().unwrap_or_default().to_string();
                        return Err(AuthError::TokenRejected { message }.into());
                    }
                    error
                }
                Err(e) => e,
            };

            if !retry_config.should_retry(&error, attempts, idempotency) {
                return Err(error.into());
            }

            log::warn!(
                "{} {} failed ({}), retrying in {:?} ({}/{})",
                method,
                url,
                error,
                delay,
                attempts + 1,
                retry_config.max_retries
            );
            tokio::time::sleep(delay).await;
            delay = retry_config.next_delay(delay);
            attempts += 1;
        }
    }

    async fn send_once(
        &self,
        method: Method,
        url: &str,
        authorization: &str,
        body: &RequestBody,
    ) -> Result<reqwest::Response, ApiError> {
        let mut request = self
            .inner
            .http_client
            .request(method, url)
            .header(reqwest::header::AUTHORIZATION, authorization)
            .header(reqwest::header::ACCEPT, "application/json");

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        request = match body {
            RequestBody::Empty => request,
            RequestBody::Json(json) => request
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(json.clone()),
            RequestBody::Multipart(form) => request.multipart(form.to_form().map_err(|e| {
                ApiError::parse(format!("could not build multipart body: {}", e))
            })?),
        };

        request.send().await.map_err(|e| match self.inner.timeout {
            Some(timeout) if e.is_timeout() => ApiError::Timeout(timeout),
            _ => ApiError::Network(e),
        })
    }
}

// =============================================================================
// Response parsing
// =============================================================================

/// Reads a response body as JSON. An empty body reads as `null`.
fn ensure_record_endpoint(resource: Resource, action: &str) -> Result<(), Error> {
    if resource.has_record_endpoint() {
        return Ok(());
    }
    Err(Error::InvalidOperation(format!(
        "{} cannot be {} one at a time",
        resource.label(),
        action
    )))
}

async fn read_json(response: reqwest::Response) -> Result<serde_json::Value, Error> {
    let text = response.text().await.map_err(ApiError::from)?;
    if text.trim().is_empty() {
        return Ok(serde_json::Value::Null);
    }
    serde_json::from_str(&text)
        .map_err(|e| ApiError::parse_with_body(e.to_string(), text).into())
}

/// Strips `{ "data": {...} }` / `{ "image": {...} }` wrappers some endpoints use.
fn unwrap_envelope(json: serde_json::Value) -> serde_json::Value {
    match json {
        serde_json::Value::Object(mut map) if !map.contains_key("_id") => {
            for key in ["data", "image"] {
                if map.get(key).is_some_and(|v| v.is_object() || v.is_array()) {
                    return map.remove(key).unwrap_or_default();
                }
            }
            serde_json::Value::Object(map)
        }
        other => other,
    }
}

fn records_from(json: serde_json::Value) -> Result<Vec<Record>, Error> {
    match unwrap_envelope(json) {
        json @ serde_json::Value::Array(_) => Ok(serde_json::from_value(json)?),
        serde_json::Value::Null => Ok(Vec::new()),
        other => Err(ApiError::parse_with_body("Expected a list of records", other.to_string()).into()),
    }
}

/// The record a write echoes back, if the body looks like one.
fn echoed_record(json: serde_json::Value) -> Option<Record> {
    match unwrap_envelope(json) {
        json @ serde_json::Value::Object(_) if json.get("_id").is_some() => {
            serde_json::from_value(json).ok()
        }
        _ => None,
    }
}
