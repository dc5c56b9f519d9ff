//! rustls setup shared by every client built in this process.

use rustls_pki_types::CertificateDer;
use std::sync::{Arc, OnceLock};

/// Native roots, loaded once. Empty means none were found (logged, not an error here).
static NATIVE_ROOTS_CACHE: OnceLock<Vec<CertificateDer<'static>>> = OnceLock::new();

#[cfg(test)]
static LOAD_COUNT: std::sync::atomic::AtomicUsize = std::sync::atomic::AtomicUsize::new(0);

fn load_native_certs_inner() -> Vec<CertificateDer<'static>> {
    #[cfg(test)]
    LOAD_COUNT.fetch_add(1, std::sync::atomic::Ordering::SeqCst);

    let result = rustls_native_certs::load_native_certs();
    for err in &result.errors {
        tracing::warn!(error = %err, "error loading native root certificate");
    }

    if result.certs.is_empty() {
        tracing::warn!("no native root CA certificates found");
    } else {
        tracing::debug!(count = result.certs.len(), "loaded native root certificates");
    }

    result.certs
}

#[must_use]
pub fn native_root_certs() -> &'static [CertificateDer<'static>] {
    NATIVE_ROOTS_CACHE
        .get_or_init(load_native_certs_inner)
        .as_slice()
}

/// Use the process-wide default provider when one is installed, otherwise
/// aws-lc-rs without installing it globally.
#[must_use]
pub fn get_crypto_provider() -> Arc<rustls::crypto::CryptoProvider> {
    rustls::crypto::CryptoProvider::get_default()
        .cloned()
        .unwrap_or_else(|| Arc::new(rustls::crypto::aws_lc_rs::default_provider()))
}

/// Client config over the OS trust store.
///
/// Fails when the store is empty or nothing in it parses, so a broken
/// trust store is reported when the client is built rather than at the
/// first handshake.
///
/// # Errors
/// Returns a description of why no usable root store could be built.
pub fn native_roots_client_config() -> Result<rustls::ClientConfig, String> {
    let certs = native_root_certs();
    if certs.is_empty() {
        return Err("no native root CA certificates found in OS certificate store".to_owned());
    }

    let mut root_store = rustls::RootCertStore::empty();
    let (added, ignored) = root_store.add_parsable_certificates(certs.iter().cloned());

    if ignored > 0 {
        tracing::warn!(added, ignored, "some native root certificates could not be parsed");
    }
    if added == 0 {
        return Err(format!(
            "no valid native root CA certificates parsed (found {}, all failed to parse)",
            certs.len()
        ));
    }

    rustls::ClientConfig::builder_with_provider(get_crypto_provider())
        .with_safe_default_protocol_versions()
        .map_err(|e| format!("failed to set TLS protocol versions: {e}"))
        .map(|builder| {
            builder
                .with_root_certificates(root_store)
                .with_no_client_auth()
        })
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;

    // LOAD_COUNT is global, so another test may have primed the cache already.
    #[test]
    fn native_roots_load_at_most_once() {
        let before = LOAD_COUNT.load(Ordering::SeqCst);

        let first = native_root_certs();
        let second = native_root_certs();

        let after = LOAD_COUNT.load(Ordering::SeqCst);
        assert!(after <= before + 1, "loader ran {} times", after - before);
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn native_client_config_does_not_panic() {
        // Minimal containers have no OS trust store; either outcome is fine.
        let _ = native_roots_client_config();
    }
}
