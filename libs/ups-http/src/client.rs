use async_trait::async_trait;
use bytes::Bytes;
use http::{Request, Response, Uri};
use http_body_util::Full;
use tower::ServiceExt;
use tower::util::BoxCloneSyncService;

use crate::builder::HttpClientBuilder;
use crate::config::TransportSecurity;
use crate::error::{HttpError, InvalidUriKind};
use crate::response::{ResponseBody, read_body_limited};
use crate::transport::HttpTransport;

pub type InnerService =
    BoxCloneSyncService<Request<Full<Bytes>>, Response<ResponseBody>, HttpError>;

/// Production [`HttpTransport`] on top of hyper, rustls and tower.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct HttpClient {
    pub(crate) service: InnerService,
    pub(crate) max_body_size: usize,
    pub(crate) transport_security: TransportSecurity,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("max_body_size", &self.max_body_size)
            .field("transport_security", &self.transport_security)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    #[must_use]
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::new()
    }

    fn validate_uri(&self, uri: &Uri) -> Result<(), HttpError> {
        if uri.authority().is_none() {
            return Err(HttpError::InvalidUri {
                url: uri.to_string(),
                kind: InvalidUriKind::MissingAuthority,
                reason: "missing host/authority".to_owned(),
            });
        }

        match uri.scheme_str() {
            Some("https") => Ok(()),
            Some("http") => match self.transport_security {
                TransportSecurity::AllowInsecureHttp => Ok(()),
                TransportSecurity::TlsOnly => Err(HttpError::InvalidScheme {
                    scheme: "http".to_owned(),
                    reason: "HTTPS required (transport security is TlsOnly)".to_owned(),
                }),
            },
            Some(other) => Err(HttpError::InvalidScheme {
                scheme: other.to_owned(),
                reason: "only http:// and https:// are supported".to_owned(),
            }),
            None => Err(HttpError::InvalidUri {
                url: uri.to_string(),
                kind: InvalidUriKind::MissingScheme,
                reason: "missing scheme".to_owned(),
            }),
        }
    }
}

#[async_trait]
impl HttpTransport for HttpClient {
    async fn send(&self, request: Request<Bytes>) -> Result<Response<Bytes>, HttpError> {
        self.validate_uri(request.uri())?;

        tracing::trace!(method = %request.method(), uri = %request.uri(), "sending request");

        let response = self
            .service
            .clone()
            .oneshot(request.map(Full::new))
            .await?;

        read_body_limited(response, self.max_body_size).await
    }
}
