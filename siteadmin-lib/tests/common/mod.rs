//! In-process fake of the content backend.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use http_body_util::BodyExt;
use http_body_util::Full;
use hyper::Request;
use hyper::Response;
use hyper::body::Bytes;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use siteadmin_lib::AdminClient;
use siteadmin_lib::RetryConfig;
use siteadmin_lib::auth::StaticTokenProvider;
use tokio::net::TcpListener;

pub const TOKEN: &str = "test-token";

/// A request as the backend saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl Recorded {
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

type Handler = Arc<dyn Fn(&Recorded) -> (u16, String) + Send + Sync>;

pub struct FakeBackend {
    pub url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeBackend {
    /// Starts a backend that answers every request with `handler`.
    pub async fn start(handler: impl Fn(&Recorded) -> (u16, String) + Send + Sync + 'static) -> Self {
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let handler: Handler = Arc::new(handler);

        let log = requests.clone();
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let handler = handler.clone();
                let log = log.clone();
                tokio::spawn(async move {
                    let service = service_fn(move |req: Request<Incoming>| {
                        let handler = handler.clone();
                        let log = log.clone();
                        async move {
                            let recorded = record(req).await;
                            let (status, body) = handler(&recorded);
                            log.lock().unwrap().push(recorded);
                            Ok::<_, hyper::Error>(
                                Response::builder()
                                    .status(status)
                                    .header("content-type", "application/json")
                                    .body(Full::new(Bytes::from(body)))
                                    .unwrap(),
                            )
                        }
                    });
                    let _ = http1::Builder::new()
                        .serve_connection(TokioIo::new(stream), service)
                        .await;
                });
            }
        });

        Self {
            url: format!("http://{}", addr),
            requests,
        }
    }

    /// A client pointed at this backend with fast retries.
    pub fn client(&self) -> AdminClient {
        self.client_with_retry(
            RetryConfig::default()
                .initial_delay(Duration::from_millis(5))
                .max_delay(Duration::from_millis(20)),
        )
    }

    pub fn client_with_retry(&self, retry: RetryConfig) -> AdminClient {
        AdminClient::builder()
            .url(self.url.clone())
            .token_provider(StaticTokenProvider::new(TOKEN))
            .retry(retry)
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap()
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> Recorded {
        self.requests().pop().expect("no request was made")
    }
}

async fn record(req: Request<Incoming>) -> Recorded {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let method = req.method().to_string();
    let path = req
        .uri()
        .path_and_query()
        .map(|p| p.as_str().to_string())
        .unwrap_or_default();
    let authorization = header("authorization");
    let content_type = header("content-type");
    let body = req.into_body().collect().await.unwrap().to_bytes().to_vec();
    Recorded {
        method,
        path,
        authorization,
        content_type,
        body,
    }
}
