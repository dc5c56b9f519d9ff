use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::HttpError;

/// One HTTP exchange with fully buffered bodies.
///
/// `send` returns `Ok` for every HTTP status, including 4xx and 5xx; `Err`
/// is reserved for failures where no response was received (connect, TLS,
/// timeout, body read). Callers decide what a status means.
///
/// Implementations must be safe to call concurrently from many tasks.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Perform the request and return the buffered response.
    ///
    /// # Errors
    /// Returns [`HttpError`] when the exchange could not be completed.
    async fn send(&self, request: http::Request<Bytes>) -> Result<http::Response<Bytes>, HttpError>;
}

#[async_trait]
impl<T> HttpTransport for Arc<T>
where
    T: HttpTransport + ?Sized,
{
    async fn send(&self, request: http::Request<Bytes>) -> Result<http::Response<Bytes>, HttpError> {
        (**self).send(request).await
    }
}
