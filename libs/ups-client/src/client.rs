use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use http::header::{ACCEPT, CONTENT_TYPE};
use http::{Method, Request, Response};
use ups_http::{HttpClientBuilder, HttpError, HttpTransport};
use url::Url;

use crate::auth::Authenticator;
use crate::config::{Environment, UpsClientConfig, endpoint};
use crate::credentials::Credentials;
use crate::envelope;
use crate::error::Error;
use crate::model::{ShipmentRequest, ShipmentResponse, VoidShipmentResponse};
use crate::oauth::TokenIssuer;
use crate::sink::ExchangeSink;
use crate::validate::{Validate, ValidationError};

const SHIP_PATH: [&str; 4] = ["api", "shipments", "v2403", "ship"];
const JSON: &str = "application/json";

/// Client for the UPS Shipping API.
///
/// Safe to share between tasks (`Arc<UpsClient>`); concurrent calls reuse
/// one cached bearer token.
pub struct UpsClient {
    transport: Arc<dyn HttpTransport>,
    authenticator: Authenticator,
    sink: Option<Arc<dyn ExchangeSink>>,
    environment: Environment,
    base_url: Url,
    ship_url: Url,
}

impl fmt::Debug for UpsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpsClient")
            .field("environment", &self.environment)
            .field("base_url", &self.base_url.as_str())
            .field("authenticator", &self.authenticator)
            .field("sink", &self.sink.is_some())
            .finish_non_exhaustive()
    }
}

impl UpsClient {
    /// Build a client on the default TLS transport.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the configuration is invalid or the
    /// HTTP client cannot be built.
    pub fn new(config: UpsClientConfig) -> Result<Self, Error> {
        UpsClientBuilder::new(config).build()
    }

    #[must_use]
    pub fn builder(config: UpsClientConfig) -> UpsClientBuilder {
        UpsClientBuilder::new(config)
    }

    #[must_use]
    pub fn environment(&self) -> Environment {
        self.environment
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    /// Create a shipment and get back tracking numbers and labels.
    ///
    /// The request is validated locally first. The response body is decoded
    /// whatever the HTTP status: UPS reports business errors in the body.
    ///
    /// # Errors
    /// - [`Error::InvalidRequest`] if the request breaks a field limit
    /// - [`Error::Transport`], [`Error::AuthenticationFailed`] or
    ///   [`Error::MalformedResponse`] from the token refresh
    /// - [`Error::Transport`] if the shipment call fails
    /// - [`Error::Api`] if UPS returned an error envelope
    /// - [`Error::MalformedResponse`] if the body is not a known envelope
    #[tracing::instrument(name = "ups.create_shipment", skip_all, fields(environment = %self.environment))]
    pub async fn create_shipment(
        &self,
        request: &ShipmentRequest,
    ) -> Result<ShipmentResponse, Error> {
        request.validate()?;
        let body = envelope::encode(request)?;

        let response = self
            .exchange(Method::POST, self.ship_url.clone(), body)
            .await?;
        let shipment: ShipmentResponse =
            decode_logged(&response, "UPS rejected shipment request")?;

        tracing::info!(
            shipment_id = %shipment.shipment_results.shipment_identification_number,
            packages = shipment.shipment_results.package_results.len(),
            "shipment created"
        );
        Ok(shipment)
    }

    /// Void a previously created shipment by its identification number.
    ///
    /// The id travels as one path segment; characters outside the URL path
    /// segment set are percent-encoded.
    ///
    /// # Errors
    /// - [`Error::InvalidRequest`] if `shipment_identification_number` is
    ///   blank or a dot segment (`.` or `..`)
    /// - otherwise as [`create_shipment`](Self::create_shipment)
    #[tracing::instrument(
        name = "ups.void_shipment",
        skip_all,
        fields(environment = %self.environment, shipment_id = %shipment_identification_number)
    )]
    pub async fn void_shipment(
        &self,
        shipment_identification_number: &str,
    ) -> Result<VoidShipmentResponse, Error> {
        if shipment_identification_number.trim().is_empty() {
            return Err(ValidationError::new("ShipmentIdentificationNumber", "is required").into());
        }
        // URL normalization would drop a dot segment and target `.../cancel`.
        if matches!(shipment_identification_number, "." | "..") {
            return Err(ValidationError::new(
                "ShipmentIdentificationNumber",
                "must not be a dot segment",
            )
            .into());
        }
        let mut segments = SHIP_PATH.to_vec();
        segments.extend(["cancel", shipment_identification_number]);
        let url = endpoint(&self.base_url, &segments)?;

        let response = self.exchange(Method::DELETE, url, Bytes::new()).await?;
        let void: VoidShipmentResponse = decode_logged(&response, "UPS rejected void request")?;

        tracing::info!(
            status = %void.summary_result.status.code,
            voided = void.is_voided(),
            "void request answered"
        );
        Ok(void)
    }

    /// Authenticate, send, and hand both sides to the sink.
    async fn exchange(
        &self,
        method: Method,
        url: Url,
        body: Bytes,
    ) -> Result<Response<Bytes>, Error> {
        let mut request = Request::builder()
            .method(method)
            .uri(url.as_str())
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, JSON)
            .body(body)
            .map_err(HttpError::from)?;

        self.authenticator.prepare(request.headers_mut()).await?;

        if let Some(sink) = &self.sink {
            sink.on_request(&request);
        }
        let response = self.transport.send(request).await?;
        tracing::debug!(status = %response.status(), bytes = response.body().len(), "UPS responded");
        if let Some(sink) = &self.sink {
            sink.on_response(&response);
        }
        Ok(response)
    }
}

fn decode_logged<T: envelope::EnvelopePayload>(
    response: &Response<Bytes>,
    rejected: &str,
) -> Result<T, Error> {
    envelope::decode(response.body()).inspect_err(|e| {
        tracing::warn!(
            status = %response.status(),
            api_error = e.is_api_error(),
            error = %e,
            "{rejected}"
        );
    })
}

/// Assembles a [`UpsClient`] with an optional custom transport and exchange
/// sink.
pub struct UpsClientBuilder {
    config: UpsClientConfig,
    transport: Option<Arc<dyn HttpTransport>>,
    sink: Option<Arc<dyn ExchangeSink>>,
}

impl fmt::Debug for UpsClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpsClientBuilder")
            .field("config", &self.config)
            .field("custom_transport", &self.transport.is_some())
            .field("sink", &self.sink.is_some())
            .finish()
    }
}

impl UpsClientBuilder {
    #[must_use]
    pub fn new(config: UpsClientConfig) -> Self {
        Self {
            config,
            transport: None,
            sink: None,
        }
    }

    /// Send through `transport` instead of building an HTTP client from
    /// `config.http`.
    #[must_use]
    pub fn transport(mut self, transport: impl HttpTransport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Record every shipment exchange. Token requests are not recorded.
    #[must_use]
    pub fn exchange_sink(mut self, sink: impl ExchangeSink + 'static) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    /// # Errors
    /// Returns [`Error::Config`] if the configuration is invalid or the
    /// HTTP client cannot be built.
    pub fn build(self) -> Result<UpsClient, Error> {
        let base_url = self.config.validate()?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => {
                let client = HttpClientBuilder::with_config(self.config.http.clone())
                    .build()
                    .map_err(|e| Error::Config(format!("cannot build HTTP client: {e}")))?;
                Arc::new(client)
            }
        };

        let issuer = TokenIssuer::new(transport.clone(), &base_url)?;
        let authenticator = Authenticator::new(Credentials::from_config(&self.config), issuer);
        let ship_url = endpoint(&base_url, &SHIP_PATH)?;

        tracing::debug!(
            environment = %self.config.environment,
            base_url = %base_url,
            "UPS client ready"
        );

        Ok(UpsClient {
            transport,
            authenticator,
            sink: self.sink,
            environment: self.config.environment,
            base_url,
            ship_url,
        })
    }
}
