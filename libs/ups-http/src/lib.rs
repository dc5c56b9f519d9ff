#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![warn(warnings)]

//! HTTP transport for the UPS client.
//!
//! The client core never opens sockets itself. It talks to an
//! [`HttpTransport`]: one buffered request in, one buffered response out.
//! [`HttpClient`] is the production implementation:
//! - hyper client with HTTP/1.1 and HTTP/2 (ALPN)
//! - TLS via rustls, HTTPS only unless explicitly relaxed for tests
//! - per-request timeout
//! - `User-Agent` injection
//! - transparent response decompression (gzip, brotli, deflate)
//! - response body size limit, applied to decompressed bytes
//!
//! The stack has no retry, redirect following or concurrency limiting:
//! every call is exactly one attempt.
//!
//! # Example
//!
//! ```ignore
//! use bytes::Bytes;
//! use ups_http::{HttpClient, HttpTransport};
//!
//! let client = HttpClient::builder()
//!     .timeout(std::time::Duration::from_secs(10))
//!     .build()?;
//!
//! let request = http::Request::get("https://wwwcie.ups.com/")
//!     .body(Bytes::new())?;
//! let response = client.send(request).await?;
//! println!("{} ({} bytes)", response.status(), response.body().len());
//! ```

mod builder;
mod client;
mod config;
mod error;
mod layers;
mod response;
mod tls;
mod transport;

pub use builder::HttpClientBuilder;
pub use client::HttpClient;
pub use config::{DEFAULT_USER_AGENT, HttpClientConfig, TlsRootConfig, TransportSecurity};
pub use error::{HttpError, InvalidUriKind};
pub use layers::{UserAgentLayer, UserAgentService};
pub use transport::HttpTransport;
