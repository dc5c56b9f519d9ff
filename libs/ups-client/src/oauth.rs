use std::sync::Arc;
use std::time::Duration;

use base64::{Engine as _, engine::general_purpose};
use bytes::Bytes;
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderValue, Method, Request, StatusCode};
use serde::Deserialize;
use ups_http::{HttpError, HttpTransport};
use ups_utils::SecretString;
use url::Url;
use zeroize::Zeroizing;

use crate::config::endpoint;
use crate::error::Error;
use crate::token::IssuedToken;

const TOKEN_PATH: [&str; 4] = ["security", "v1", "oauth", "token"];
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const GRANT_BODY: &str = "grant_type=client_credentials";

/// Token endpoint payload.
///
/// Decoded strictly: a field UPS did not document is treated as a sign the
/// response is not what we think it is. `Serialize` is not derived so the
/// access token cannot end up in a log line by accident.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TokenResponse {
    token_type: String,
    access_token: SecretString,
    /// Seconds, sent as a decimal string.
    expires_in: String,
    #[serde(default)]
    issued_at: String,
    #[serde(default)]
    client_id: String,
    #[serde(default)]
    status: String,
}

/// Exchanges client credentials for an access token at
/// `{base}/security/v1/oauth/token`.
pub struct TokenIssuer {
    transport: Arc<dyn HttpTransport>,
    token_endpoint: Url,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("token_endpoint", &self.token_endpoint.as_str())
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    /// # Errors
    /// Returns [`Error::Config`] if `base_url` cannot carry a path.
    pub fn new(transport: Arc<dyn HttpTransport>, base_url: &Url) -> Result<Self, Error> {
        Ok(Self {
            transport,
            token_endpoint: endpoint(base_url, &TOKEN_PATH)?,
        })
    }

    #[must_use]
    pub fn token_endpoint(&self) -> &Url {
        &self.token_endpoint
    }

    /// Run the client-credentials grant once.
    ///
    /// No retries, and the token is not cached here.
    ///
    /// # Errors
    /// - [`Error::Transport`] when the exchange fails
    /// - [`Error::AuthenticationFailed`] for any status other than 200
    /// - [`Error::MalformedResponse`] when the body does not match the token
    ///   schema or `expires_in` is not a non-negative integer
    pub async fn acquire_token(
        &self,
        client_id: &str,
        client_secret: &SecretString,
    ) -> Result<IssuedToken, Error> {
        let request = self.token_request(client_id, client_secret)?;

        tracing::debug!(endpoint = %self.token_endpoint, "requesting UPS access token");
        let response = self.transport.send(request).await?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(%status, "UPS token endpoint rejected client credentials");
            return Err(Error::AuthenticationFailed { status });
        }

        let payload: TokenResponse = serde_json::from_slice(response.body())
            .map_err(|e| Error::malformed("token response", e))?;
        let lifetime: u64 = payload
            .expires_in
            .parse()
            .map_err(|e| Error::malformed("token expires_in", e))?;

        tracing::info!(
            client_id = %payload.client_id,
            status = %payload.status,
            issued_at = %payload.issued_at,
            expires_in_secs = lifetime,
            "obtained UPS access token"
        );

        let token = IssuedToken {
            token_type: payload.token_type,
            access_token: payload.access_token,
            expires_in: Duration::from_secs(lifetime),
        };
        // A token that cannot be sent back in a header is useless.
        token.authorization()?;
        Ok(token)
    }

    fn token_request(
        &self,
        client_id: &str,
        client_secret: &SecretString,
    ) -> Result<Request<Bytes>, Error> {
        // Intermediates hold the plaintext secret; scrub them on drop.
        let credentials = Zeroizing::new(format!("{client_id}:{}", client_secret.expose()));
        let encoded = Zeroizing::new(general_purpose::STANDARD.encode(credentials.as_bytes()));
        let header = Zeroizing::new(format!("Basic {}", encoded.as_str()));
        let mut authorization = HeaderValue::from_str(&header).map_err(HttpError::from)?;
        authorization.set_sensitive(true);

        Request::builder()
            .method(Method::POST)
            .uri(self.token_endpoint.as_str())
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, authorization)
            .body(Bytes::from_static(GRANT_BODY.as_bytes()))
            .map_err(|e| HttpError::from(e).into())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::testing::FakeTransport;

    fn issuer(transport: &Arc<FakeTransport>) -> TokenIssuer {
        let base = Url::parse("https://wwwcie.ups.com").unwrap();
        TokenIssuer::new(transport.clone(), &base).unwrap()
    }

    fn secret() -> SecretString {
        SecretString::new("secret")
    }

    #[tokio::test]
    async fn sends_client_credentials_grant() {
        let transport = FakeTransport::new();
        transport.respond_token(
            200,
            r#"{"token_type":"Bearer","access_token":"abc","expires_in":"14399"}"#,
        );

        let token = issuer(&transport)
            .acquire_token("client", &secret())
            .await
            .unwrap();

        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.access_token.expose(), "abc");
        assert_eq!(token.expires_in, Duration::from_secs(14_399));

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.method(), &Method::POST);
        assert_eq!(
            request.uri(),
            "https://wwwcie.ups.com/security/v1/oauth/token"
        );
        assert_eq!(request.headers()[CONTENT_TYPE], FORM_CONTENT_TYPE);
        // base64("client:secret")
        assert_eq!(
            request.headers()[AUTHORIZATION],
            "Basic Y2xpZW50OnNlY3JldA=="
        );
        assert!(request.headers()[AUTHORIZATION].is_sensitive());
        assert_eq!(request.body().as_ref(), b"grant_type=client_credentials");
    }

    #[tokio::test]
    async fn optional_fields_are_accepted() {
        let transport = FakeTransport::new();
        transport.respond_token(
            200,
            r#"{"token_type":"Bearer","issued_at":"1700000000000","client_id":"client",
                "access_token":"abc","expires_in":"60","status":"approved"}"#,
        );
        let token = issuer(&transport)
            .acquire_token("client", &secret())
            .await
            .unwrap();
        assert_eq!(token.expires_in, Duration::from_secs(60));
    }

    #[tokio::test]
    async fn non_200_is_authentication_failure() {
        for status in [201, 400, 401, 500] {
            let transport = FakeTransport::new();
            transport.respond_token(status, r#"{"response":{"errors":[]}}"#);

            let err = issuer(&transport)
                .acquire_token("client", &secret())
                .await
                .unwrap_err();
            match err {
                Error::AuthenticationFailed { status: got } => assert_eq!(got.as_u16(), status),
                other => panic!("expected AuthenticationFailed for {status}, got {other}"),
            }
        }
    }

    #[tokio::test]
    async fn strict_schema_violations_are_malformed() {
        let bodies = [
            r#"{"token_type":"Bearer","access_token":"abc"}"#,
            r#"{"token_type":"Bearer","access_token":"abc","expires_in":"60","refresh_token":"x"}"#,
            r#"{"token_type":"Bearer","access_token":"abc","expires_in":60}"#,
            r#"{"token_type":"Bearer","access_token":"abc","expires_in":"soon"}"#,
            r#"{"token_type":"Bearer","access_token":"abc","expires_in":"-5"}"#,
            "<html>maintenance</html>",
        ];
        for body in bodies {
            let transport = FakeTransport::new();
            transport.respond_token(200, body);
            let err = issuer(&transport)
                .acquire_token("client", &secret())
                .await
                .unwrap_err();
            assert!(
                matches!(err, Error::MalformedResponse(_)),
                "expected MalformedResponse for {body}, got {err}"
            );
        }
    }

    #[tokio::test]
    async fn malformed_error_does_not_echo_token() {
        let transport = FakeTransport::new();
        transport.respond_token(
            200,
            r#"{"token_type":"Bearer","access_token":"very-secret-token","expires_in":"x"}"#,
        );
        let err = issuer(&transport)
            .acquire_token("client", &secret())
            .await
            .unwrap_err();
        assert!(!err.to_string().contains("very-secret-token"));
    }

    #[tokio::test]
    async fn transport_failure_is_propagated() {
        let transport = FakeTransport::new();
        transport.fail_with_timeout();
        let err = issuer(&transport)
            .acquire_token("client", &secret())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport(HttpError::Timeout(_))));
    }

    #[test]
    fn token_endpoint_keeps_base_prefix() {
        let transport = FakeTransport::new();
        let base = Url::parse("https://proxy.example.com/ups").unwrap();
        let issuer = TokenIssuer::new(transport, &base).unwrap();
        assert_eq!(
            issuer.token_endpoint().as_str(),
            "https://proxy.example.com/ups/security/v1/oauth/token"
        );
    }
}
