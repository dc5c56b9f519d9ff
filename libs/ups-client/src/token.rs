use std::time::Duration;

use http::HeaderValue;
use tokio::time::Instant;
use ups_utils::SecretString;
use zeroize::Zeroizing;

use crate::error::Error;

/// Access token as returned by the token endpoint, before it is cached.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Authorization scheme, normally `Bearer`.
    pub token_type: String,
    pub access_token: SecretString,
    /// Validity window reported by UPS.
    pub expires_in: Duration,
}

impl IssuedToken {
    /// `Authorization` value for this token, marked sensitive.
    ///
    /// # Errors
    /// Returns [`Error::MalformedResponse`] if the scheme or token contain
    /// bytes that are not allowed in a header value.
    pub fn authorization(&self) -> Result<HeaderValue, Error> {
        authorization(&self.token_type, &self.access_token)
    }
}

/// A cached token and the instant after which it must not be used.
#[derive(Debug, Clone)]
pub struct Token {
    scheme: String,
    value: SecretString,
    valid_until: Instant,
}

impl Token {
    /// Pin an issued token to the clock: it stays valid for `expires_in`
    /// starting at `received_at`.
    ///
    /// # Errors
    /// Returns [`Error::MalformedResponse`] if the lifetime overflows the
    /// clock.
    pub fn issued(token: IssuedToken, received_at: Instant) -> Result<Self, Error> {
        let valid_until = received_at
            .checked_add(token.expires_in)
            .ok_or_else(|| Error::MalformedResponse("token lifetime out of range".to_owned()))?;
        Ok(Self {
            scheme: token.token_type,
            value: token.access_token,
            valid_until,
        })
    }

    /// A token is usable strictly before its expiry instant.
    #[must_use]
    pub fn is_valid_at(&self, now: Instant) -> bool {
        now < self.valid_until
    }

    #[must_use]
    pub fn valid_until(&self) -> Instant {
        self.valid_until
    }

    /// `Authorization` value for this token, marked sensitive.
    ///
    /// # Errors
    /// Returns [`Error::MalformedResponse`] if the token cannot be carried in
    /// a header.
    pub fn authorization(&self) -> Result<HeaderValue, Error> {
        authorization(&self.scheme, &self.value)
    }
}

fn authorization(scheme: &str, value: &SecretString) -> Result<HeaderValue, Error> {
    let credential = Zeroizing::new(format!("{scheme} {}", value.expose()));
    let mut header = HeaderValue::from_str(&credential)
        .map_err(|e| Error::malformed("access token is not a valid header value", e))?;
    header.set_sensitive(true);
    Ok(header)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn issued(expires_in: Duration) -> IssuedToken {
        IssuedToken {
            token_type: "Bearer".to_owned(),
            access_token: SecretString::new("abc"),
            expires_in,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn valid_strictly_before_expiry() {
        let now = Instant::now();
        let token = Token::issued(issued(Duration::from_secs(60)), now).unwrap();

        assert!(token.is_valid_at(now));
        assert!(token.is_valid_at(now + Duration::from_millis(59_999)));
        assert!(!token.is_valid_at(now + Duration::from_secs(60)));
        assert!(!token.is_valid_at(now + Duration::from_secs(61)));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_lifetime_is_never_valid() {
        let now = Instant::now();
        let token = Token::issued(issued(Duration::ZERO), now).unwrap();
        assert!(!token.is_valid_at(now));
    }

    #[tokio::test(start_paused = true)]
    async fn overflowing_lifetime_is_rejected() {
        let err = Token::issued(issued(Duration::MAX), Instant::now()).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn authorization_joins_scheme_and_value() {
        let token = Token::issued(issued(Duration::from_secs(1)), Instant::now()).unwrap();
        let header = token.authorization().unwrap();
        assert_eq!(header, "Bearer abc");
        assert!(header.is_sensitive());
    }

    #[test]
    fn control_characters_in_token_are_malformed() {
        let mut token = issued(Duration::from_secs(1));
        token.access_token = SecretString::new("abc\r\nX-Injected: 1");
        assert!(matches!(
            token.authorization(),
            Err(Error::MalformedResponse(_))
        ));
    }

    #[test]
    fn debug_hides_access_token() {
        let rendered = format!("{:?}", issued(Duration::from_secs(1)));
        assert!(!rendered.contains("abc"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
