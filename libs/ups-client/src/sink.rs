//! Diagnostic hook that sees every shipment exchange as it goes over the
//! wire, after credentials are attached.

use std::fmt;
use std::io::Write;
use std::sync::Arc;

use bytes::Bytes;
use http::header::CONTENT_LENGTH;
use http::uri::Authority;
use http::{HeaderMap, Method, Request, Response, StatusCode};
use parking_lot::{Mutex, MutexGuard};

/// `tracing` target used by [`TracingExchangeSink`].
pub const EXCHANGE_TARGET: &str = "ups_client::exchange";

/// Receives each outgoing request and the response it produced.
///
/// Implementations must not fail the call; a sink that cannot record an
/// exchange drops it.
pub trait ExchangeSink: Send + Sync {
    fn on_request(&self, request: &Request<Bytes>);
    fn on_response(&self, response: &Response<Bytes>);
}

impl<T: ExchangeSink + ?Sized> ExchangeSink for Arc<T> {
    fn on_request(&self, request: &Request<Bytes>) {
        (**self).on_request(request);
    }

    fn on_response(&self, response: &Response<Bytes>) {
        (**self).on_response(response);
    }
}

/// Emits exchanges as `debug` events under [`EXCHANGE_TARGET`]. Sensitive
/// header values are redacted.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingExchangeSink;

impl ExchangeSink for TracingExchangeSink {
    fn on_request(&self, request: &Request<Bytes>) {
        let dump = Dump::request(request, true);
        tracing::debug!(target: EXCHANGE_TARGET, "UPS request\n{dump}");
    }

    fn on_response(&self, response: &Response<Bytes>) {
        let dump = Dump::response(response, true);
        tracing::debug!(target: EXCHANGE_TARGET, "UPS response\n{dump}");
    }
}

/// Writes exchanges as HTTP/1.1 text to any [`Write`].
///
/// [`new`](Self::new) redacts sensitive header values (credentials, the
/// bearer token); [`verbatim`](Self::verbatim) writes them as sent.
pub struct WriterExchangeSink<W> {
    writer: Mutex<W>,
    redact: bool,
}

impl<W> fmt::Debug for WriterExchangeSink<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterExchangeSink")
            .field("redact", &self.redact)
            .finish_non_exhaustive()
    }
}

impl<W: Write + Send> WriterExchangeSink<W> {
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            redact: true,
        }
    }

    #[must_use]
    pub fn verbatim(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            redact: false,
        }
    }

    /// Lock the underlying writer, e.g. to inspect a `Vec<u8>` buffer.
    pub fn writer(&self) -> MutexGuard<'_, W> {
        self.writer.lock()
    }

    fn write(&self, dump: &Dump<'_>) {
        let mut writer = self.writer.lock();
        let result = write!(writer, "{dump}\r\n").and_then(|()| writer.flush());
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to write UPS exchange dump");
        }
    }
}

impl<W: Write + Send> ExchangeSink for WriterExchangeSink<W> {
    fn on_request(&self, request: &Request<Bytes>) {
        self.write(&Dump::request(request, self.redact));
    }

    fn on_response(&self, response: &Response<Bytes>) {
        self.write(&Dump::response(response, self.redact));
    }
}

enum StartLine<'a> {
    Request(&'a Method, &'a str),
    Response(StatusCode),
}

/// One side of an exchange rendered as HTTP/1.1 text.
struct Dump<'a> {
    start: StartLine<'a>,
    host: Option<&'a str>,
    headers: &'a HeaderMap,
    body: &'a [u8],
    redact: bool,
}

impl<'a> Dump<'a> {
    fn request(request: &'a Request<Bytes>, redact: bool) -> Self {
        let target = request
            .uri()
            .path_and_query()
            .map_or("/", http::uri::PathAndQuery::as_str);
        Self {
            start: StartLine::Request(request.method(), target),
            host: request.uri().authority().map(Authority::as_str),
            headers: request.headers(),
            body: request.body(),
            redact,
        }
    }

    fn response(response: &'a Response<Bytes>, redact: bool) -> Self {
        Self {
            start: StartLine::Response(response.status()),
            host: None,
            headers: response.headers(),
            body: response.body(),
            redact,
        }
    }
}

impl fmt::Display for Dump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.start {
            StartLine::Request(method, target) => write!(f, "{method} {target} HTTP/1.1\r\n")?,
            StartLine::Response(status) => write!(f, "HTTP/1.1 {status}\r\n")?,
        }
        if let Some(host) = self.host {
            write!(f, "Host: {host}\r\n")?;
        }
        for (name, value) in self.headers {
            if self.redact && value.is_sensitive() {
                write!(f, "{name}: [REDACTED]\r\n")?;
            } else {
                write!(f, "{name}: {}\r\n", String::from_utf8_lossy(value.as_bytes()))?;
            }
        }
        if !self.headers.contains_key(CONTENT_LENGTH) {
            write!(f, "content-length: {}\r\n", self.body.len())?;
        }
        write!(f, "\r\n{}", String::from_utf8_lossy(self.body))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use http::HeaderValue;
    use http::header::{AUTHORIZATION, CONTENT_TYPE};

    fn request() -> Request<Bytes> {
        let mut token = HeaderValue::from_static("Bearer abc");
        token.set_sensitive(true);
        Request::builder()
            .method(Method::POST)
            .uri("https://wwwcie.ups.com/api/shipments/v2403/ship")
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, token)
            .body(Bytes::from_static(b"{\"ShipmentRequest\":{}}"))
            .unwrap()
    }

    fn written(sink: &WriterExchangeSink<Vec<u8>>) -> String {
        String::from_utf8(sink.writer().clone()).unwrap()
    }

    #[test]
    fn request_dump_is_http_text() {
        let sink = WriterExchangeSink::new(Vec::new());
        sink.on_request(&request());

        let text = written(&sink);
        assert!(text.starts_with("POST /api/shipments/v2403/ship HTTP/1.1\r\nHost: wwwcie.ups.com\r\n"));
        assert!(text.contains("content-type: application/json\r\n"));
        assert!(text.contains("content-length: 22\r\n"));
        assert!(text.contains("\r\n\r\n{\"ShipmentRequest\":{}}"));
    }

    #[test]
    fn sensitive_headers_are_redacted_unless_verbatim() {
        let redacting = WriterExchangeSink::new(Vec::new());
        redacting.on_request(&request());
        let text = written(&redacting);
        assert!(text.contains("authorization: [REDACTED]\r\n"));
        assert!(!text.contains("Bearer abc"));

        let verbatim = WriterExchangeSink::verbatim(Vec::new());
        verbatim.on_request(&request());
        assert!(written(&verbatim).contains("authorization: Bearer abc\r\n"));
    }

    #[test]
    fn response_dump_has_status_line() {
        let sink = WriterExchangeSink::new(Vec::new());
        let response = Response::builder()
            .status(StatusCode::BAD_REQUEST)
            .header(CONTENT_LENGTH, "2")
            .body(Bytes::from_static(b"{}"))
            .unwrap();
        sink.on_response(&response);

        let text = written(&sink);
        assert!(text.starts_with("HTTP/1.1 400 Bad Request\r\n"));
        assert_eq!(text.matches("content-length").count(), 1);
        assert!(text.ends_with("\r\n\r\n{}\r\n"));
    }

    struct BrokenWriter;

    impl Write for BrokenWriter {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failures_are_swallowed() {
        let sink = WriterExchangeSink::new(BrokenWriter);
        sink.on_request(&request());
    }

    #[test]
    #[tracing_test::traced_test]
    fn tracing_sink_redacts() {
        TracingExchangeSink.on_request(&request());
        assert!(logs_contain("POST /api/shipments/v2403/ship HTTP/1.1"));
        assert!(!logs_contain("Bearer abc"));
    }
}
