use http::header::AUTHORIZATION;
use http::{HeaderMap, HeaderName, HeaderValue};
use tokio::time::Instant;

use crate::config::OAuthCredentials;
use crate::credentials::Credentials;
use crate::error::Error;
use crate::oauth::TokenIssuer;
use crate::token::Token;

const ACCESS_LICENSE_NUMBER: &str = "accesslicensenumber";
const USERNAME: &str = "username";
const PASSWORD: &str = "password";

/// Attaches configured credentials to outgoing shipment requests and keeps
/// the bearer token fresh.
#[derive(Debug)]
pub struct Authenticator {
    credentials: Credentials,
    issuer: TokenIssuer,
}

impl Authenticator {
    #[must_use]
    pub fn new(credentials: Credentials, issuer: TokenIssuer) -> Self {
        Self {
            credentials,
            issuer,
        }
    }

    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Add the credential headers to `headers`.
    ///
    /// In order: `AccessLicenseNumber`, a token refresh if OAuth is
    /// configured and the cached token is missing or expired,
    /// `Username`/`Password`, then `Authorization`. Kinds that are not
    /// configured are skipped.
    ///
    /// # Errors
    /// Propagates the token request's error when a refresh fails. Nothing
    /// is cached in that case.
    pub async fn prepare(&self, headers: &mut HeaderMap) -> Result<(), Error> {
        let credentials = &self.credentials;

        if let Some(license) = &credentials.access_license_number {
            headers.insert(
                HeaderName::from_static(ACCESS_LICENSE_NUMBER),
                sensitive(license.expose())?,
            );
        }

        let authorization = match &credentials.oauth {
            Some(oauth) => Some(self.authorization(oauth).await?),
            None => None,
        };

        if let Some(basic) = &credentials.basic {
            headers.insert(HeaderName::from_static(USERNAME), plain(&basic.username)?);
            headers.insert(
                HeaderName::from_static(PASSWORD),
                sensitive(basic.password.expose())?,
            );
        }

        if let Some(value) = authorization {
            headers.insert(AUTHORIZATION, value);
        }
        Ok(())
    }

    async fn authorization(&self, oauth: &OAuthCredentials) -> Result<HeaderValue, Error> {
        // Held across the token request: callers arriving mid-refresh wait
        // here and then find the new token.
        let mut cached = self.credentials.token.lock().await;

        if let Some(token) = cached.as_ref().filter(|t| t.is_valid_at(Instant::now())) {
            return token.authorization();
        }

        tracing::debug!(
            expired = cached.is_some(),
            "UPS access token unavailable, requesting a new one"
        );
        let issued = self
            .issuer
            .acquire_token(&oauth.client_id, &oauth.client_secret)
            .await?;
        let token = Token::issued(issued, Instant::now())?;
        let value = token.authorization()?;
        *cached = Some(token);
        Ok(value)
    }
}

fn plain(value: &str) -> Result<HeaderValue, Error> {
    HeaderValue::from_str(value)
        .map_err(|_| Error::Config("credential is not a valid header value".to_owned()))
}

fn sensitive(value: &str) -> Result<HeaderValue, Error> {
    let mut header = plain(value)?;
    header.set_sensitive(true);
    Ok(header)
}
