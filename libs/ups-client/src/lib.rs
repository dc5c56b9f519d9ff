#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![warn(warnings)]

//! Typed client for the UPS Shipping API.
//!
//! Covers the calls a shipping integration needs on a daily basis:
//! - `OAuth` client-credentials tokens, cached and refreshed on expiry
//! - create shipment (`POST /api/shipments/v2403/ship`)
//! - void shipment (`DELETE /api/shipments/v2403/ship/cancel/{id}`)
//!
//! Each call is exactly one HTTP attempt. UPS reports business failures in
//! the response body, so bodies are decoded whatever the status code and a
//! structured error comes back as [`Error::Api`].
//!
//! # Example
//!
//! ```ignore
//! use ups_client::{Environment, OAuthCredentials, UpsClient, UpsClientConfig};
//!
//! let client = UpsClient::new(UpsClientConfig {
//!     oauth: Some(OAuthCredentials {
//!         client_id: "my-app".to_owned(),
//!         client_secret: "s3cr3t".into(),
//!     }),
//!     ..UpsClientConfig::new(Environment::Testing)
//! })?;
//!
//! let response = client.create_shipment(&request).await?;
//! for tracking_number in response.tracking_numbers() {
//!     println!("{tracking_number}");
//! }
//! ```

mod auth;
mod client;
mod config;
mod credentials;
pub mod envelope;
mod error;
pub mod model;
mod oauth;
mod one_or_many;
mod sink;
mod token;
mod validate;

#[cfg(test)]
mod testing;

pub use auth::Authenticator;
pub use client::{UpsClient, UpsClientBuilder};
pub use config::{BasicCredentials, Environment, OAuthCredentials, UpsClientConfig};
pub use credentials::Credentials;
pub use error::{ApiError, ApiErrorEntry, Error};
pub use oauth::TokenIssuer;
pub use sink::{EXCHANGE_TARGET, ExchangeSink, TracingExchangeSink, WriterExchangeSink};
pub use token::{IssuedToken, Token};
pub use validate::{Path, Validate, ValidationError};

pub use ups_http::{HttpClientConfig, HttpError, HttpTransport};
pub use ups_utils::SecretString;
