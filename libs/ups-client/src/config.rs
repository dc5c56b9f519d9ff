use std::fmt;

use http::HeaderValue;
use serde::Deserialize;
use ups_http::{HttpClientConfig, TransportSecurity};
use ups_utils::SecretString;
use url::Url;

use crate::error::Error;

/// UPS deployment the client talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// Customer integration environment (`wwwcie.ups.com`)
    #[default]
    Testing,
    /// Live environment, creates billable shipments
    Production,
}

impl Environment {
    #[must_use]
    pub fn base_url(self) -> &'static str {
        match self {
            Environment::Testing => "https://wwwcie.ups.com",
            Environment::Production => "https://onlinetools.ups.com",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Environment::Testing => "testing",
            Environment::Production => "production",
        })
    }
}

/// Legacy `Username` / `Password` header pair.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BasicCredentials {
    pub username: String,
    pub password: SecretString,
}

/// Client-credentials pair exchanged for a bearer token.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OAuthCredentials {
    pub client_id: String,
    pub client_secret: SecretString,
}

/// Client configuration.
///
/// Every credential kind is optional and independent; whatever is set is
/// attached to each shipment call.
///
/// ```yaml
/// environment: production
/// access_license_number: 1CD2AB3E4F5G6H7I
/// oauth:
///   client_id: my-app
///   client_secret: s3cr3t
/// http:
///   request_timeout: 20s
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpsClientConfig {
    pub environment: Environment,

    /// Overrides the environment's base URL (mock servers, proxies)
    pub base_url: Option<String>,

    pub access_license_number: Option<SecretString>,

    pub basic: Option<BasicCredentials>,

    pub oauth: Option<OAuthCredentials>,

    pub http: HttpClientConfig,
}

impl UpsClientConfig {
    #[must_use]
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            ..Self::default()
        }
    }

    /// Check the configuration and return the base URL all endpoints are
    /// resolved against.
    ///
    /// # Errors
    /// Returns [`Error::Config`] for an unusable base URL, blank credential
    /// fields, or credentials that cannot travel in a header.
    pub fn validate(&self) -> Result<Url, Error> {
        let base_url = self.resolved_base_url()?;

        if let Some(license) = &self.access_license_number {
            check_secret("access_license_number", license)?;
        }
        if let Some(basic) = &self.basic {
            check_plain("basic.username", &basic.username)?;
            check_secret("basic.password", &basic.password)?;
        }
        if let Some(oauth) = &self.oauth {
            check_plain("oauth.client_id", &oauth.client_id)?;
            if oauth.client_id.contains(':') {
                return Err(Error::Config(
                    "oauth.client_id must not contain ':'".to_owned(),
                ));
            }
            if oauth.client_secret.is_blank() {
                return Err(Error::Config("oauth.client_secret is blank".to_owned()));
            }
        }

        Ok(base_url)
    }

    fn resolved_base_url(&self) -> Result<Url, Error> {
        let raw = self
            .base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url());
        let mut url = Url::parse(raw)
            .map_err(|e| Error::Config(format!("invalid base_url '{raw}': {e}")))?;

        match url.scheme() {
            "https" => {}
            "http" => {
                if self.http.transport != TransportSecurity::AllowInsecureHttp {
                    return Err(Error::Config(format!(
                        "base_url '{raw}' uses plain HTTP; set http.transport to allow_insecure_http"
                    )));
                }
            }
            other => {
                return Err(Error::Config(format!(
                    "base_url '{raw}' has unsupported scheme '{other}'"
                )));
            }
        }
        if url.host_str().is_none() || url.cannot_be_a_base() {
            return Err(Error::Config(format!("base_url '{raw}' has no host")));
        }

        url.set_query(None);
        url.set_fragment(None);
        Ok(url)
    }
}

/// `base` with `segments` appended as individual, percent-encoded path
/// segments. A path prefix on `base` is kept.
///
/// # Errors
/// Returns [`Error::Config`] if `base` cannot carry a path.
pub fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, Error> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| Error::Config(format!("base_url '{base}' cannot carry a path")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn check_plain(field: &str, value: &str) -> Result<(), Error> {
    if value.trim().is_empty() {
        return Err(Error::Config(format!("{field} is blank")));
    }
    HeaderValue::from_str(value)
        .map(drop)
        .map_err(|_| Error::Config(format!("{field} contains characters not allowed in a header")))
}

fn check_secret(field: &str, value: &SecretString) -> Result<(), Error> {
    if value.is_blank() {
        return Err(Error::Config(format!("{field} is blank")));
    }
    HeaderValue::from_str(value.expose())
        .map(drop)
        .map_err(|_| Error::Config(format!("{field} contains characters not allowed in a header")))
}
