use tokio::sync::Mutex;
use ups_utils::SecretString;

use crate::config::{BasicCredentials, OAuthCredentials, UpsClientConfig};
use crate::token::Token;

/// Every credential a client may attach, plus the cached bearer token.
///
/// The cache sits behind an async mutex that is held while a refresh is in
/// flight, so concurrent callers wait for one token request instead of each
/// issuing their own.
#[derive(Debug)]
pub struct Credentials {
    pub(crate) access_license_number: Option<SecretString>,
    pub(crate) basic: Option<BasicCredentials>,
    pub(crate) oauth: Option<OAuthCredentials>,
    pub(crate) token: Mutex<Option<Token>>,
}

impl Credentials {
    #[must_use]
    pub fn from_config(config: &UpsClientConfig) -> Self {
        Self {
            access_license_number: config.access_license_number.clone(),
            basic: config.basic.clone(),
            oauth: config.oauth.clone(),
            token: Mutex::new(None),
        }
    }

    /// Snapshot of the cached token, if one was issued.
    pub async fn cached_token(&self) -> Option<Token> {
        self.token.lock().await.clone()
    }

    /// Drop the cached token so the next call requests a fresh one.
    pub async fn clear_token(&self) {
        *self.token.lock().await = None;
    }
}
