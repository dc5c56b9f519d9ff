//! In-memory transport for unit tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use http::{Request, Response, StatusCode};
use parking_lot::Mutex;
use ups_http::{HttpError, HttpTransport};

#[derive(Default)]
pub struct FakeTransport {
    token: Mutex<Option<(u16, String)>>,
    api: Mutex<Option<(u16, String)>>,
    token_delay: Mutex<Duration>,
    timeout: AtomicBool,
    requests: Mutex<Vec<Request<Bytes>>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond_token(&self, status: u16, body: &str) {
        *self.token.lock() = Some((status, body.to_owned()));
    }

    pub fn respond_api(&self, status: u16, body: &str) {
        *self.api.lock() = Some((status, body.to_owned()));
    }

    pub fn delay_token(&self, delay: Duration) {
        *self.token_delay.lock() = delay;
    }

    pub fn fail_with_timeout(&self) {
        self.timeout.store(true, Ordering::SeqCst);
    }

    pub fn requests(&self) -> Vec<Request<Bytes>> {
        self.requests.lock().iter().map(copy).collect()
    }

    pub fn token_calls(&self) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|r| is_token_request(r))
            .count()
    }

    pub fn api_requests(&self) -> Vec<Request<Bytes>> {
        self.requests
            .lock()
            .iter()
            .filter(|r| !is_token_request(r))
            .map(copy)
            .collect()
    }
}

fn is_token_request(request: &Request<Bytes>) -> bool {
    request.uri().path().ends_with("/security/v1/oauth/token")
}

fn copy(request: &Request<Bytes>) -> Request<Bytes> {
    let mut out = Request::new(request.body().clone());
    *out.method_mut() = request.method().clone();
    *out.uri_mut() = request.uri().clone();
    *out.headers_mut() = request.headers().clone();
    out
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn send(&self, request: Request<Bytes>) -> Result<Response<Bytes>, HttpError> {
        let token = is_token_request(&request);
        self.requests.lock().push(request);

        if self.timeout.load(Ordering::SeqCst) {
            return Err(HttpError::Timeout(Duration::from_secs(30)));
        }

        let canned = if token {
            let delay = *self.token_delay.lock();
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            self.token.lock().clone()
        } else {
            self.api.lock().clone()
        };
        let (status, body) = canned.unwrap_or((404, String::new()));

        let mut response = Response::new(Bytes::from(body));
        *response.status_mut() = StatusCode::from_u16(status).unwrap();
        Ok(response)
    }
}
