//! Wire envelope shared by all Shipping API calls.
//!
//! Requests wrap the payload in a single-key object (`{"ShipmentRequest":
//! {...}}`). Responses carry the success payload under an operation key and
//! errors under a lowercase `"response"` key:
//!
//! ```json
//! {"ShipmentResponse": {...}}
//! {"response": {"errors": [{"code": "120100", "message": "..."}]}}
//! ```
//!
//! An error envelope always wins: when `"response"` is present and not
//! `null`, the success slot is not looked at.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

use crate::error::{ApiError, Error};
use crate::validate::ValidationError;

/// Key under which UPS puts structured errors.
pub const ERROR_KEY: &str = "response";

/// A payload that travels inside an envelope under a fixed key.
pub trait EnvelopePayload: DeserializeOwned {
    const ENVELOPE_KEY: &'static str;
}

struct Wrapped<'a, T>(&'a T);

impl<T> Serialize for Wrapped<'_, T>
where
    T: EnvelopePayload + Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(T::ENVELOPE_KEY, self.0)?;
        map.end()
    }
}

/// Wrap `payload` under its envelope key, pretty-printed with two-space
/// indentation.
///
/// # Errors
/// Returns [`Error::InvalidRequest`] if the payload cannot be serialized.
pub fn encode<T>(payload: &T) -> Result<Bytes, Error>
where
    T: EnvelopePayload + Serialize,
{
    serde_json::to_vec_pretty(&Wrapped(payload))
        .map(Bytes::from)
        .map_err(|e| ValidationError::new(T::ENVELOPE_KEY, format!("cannot be encoded: {e}")).into())
}

/// Decode a response body into `T` or the structured error it carries.
///
/// # Errors
/// - [`Error::Api`] when the body holds a non-null `"response"` error envelope
/// - [`Error::MalformedResponse`] when the body is not a JSON object, either
///   slot does not match its schema, or neither slot is populated
pub fn decode<T: EnvelopePayload>(body: &[u8]) -> Result<T, Error> {
    let mut envelope: Map<String, Value> = serde_json::from_slice(body)
        .map_err(|e| Error::malformed("response body is not a JSON object", e))?;

    if let Some(error) = envelope.remove(ERROR_KEY).filter(|v| !v.is_null()) {
        let api: ApiError =
            serde_json::from_value(error).map_err(|e| Error::malformed("error envelope", e))?;
        return Err(Error::Api(api));
    }

    match envelope.remove(T::ENVELOPE_KEY) {
        Some(payload) if !payload.is_null() => {
            serde_json::from_value(payload).map_err(|e| Error::malformed(T::ENVELOPE_KEY, e))
        }
        _ => Err(Error::MalformedResponse(format!(
            "neither {} nor an error envelope in response",
            T::ENVELOPE_KEY
        ))),
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::model::fixtures::ground_shipment;
    use crate::model::{ShipmentRequest, ShipmentResponse, VoidShipmentResponse};

    #[test]
    fn encode_nests_payload_with_two_space_indent() {
        let body = encode(&ground_shipment()).unwrap();
        let text = std::str::from_utf8(&body).unwrap();

        assert!(text.starts_with("{\n  \"ShipmentRequest\": {\n    \"Shipment\": {"));
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 1);
        assert_eq!(
            value["ShipmentRequest"]["Shipment"]["Shipper"]["Name"],
            "ACME Parts"
        );
    }

    #[test]
    fn encode_preserves_field_order() {
        let body = encode(&ground_shipment()).unwrap();
        let text = std::str::from_utf8(&body).unwrap();
        let description = text.find("\"Description\"").unwrap();
        let shipper = text.find("\"Shipper\"").unwrap();
        let packages = text.find("\"Packages\"").unwrap();
        assert!(description < shipper && shipper < packages);
    }

    #[test]
    fn echoed_request_round_trips() {
        let request = ground_shipment();
        let body = encode(&request).unwrap();
        let echoed: ShipmentRequest = decode(&body).unwrap();
        assert_eq!(echoed, request);
    }

    #[test]
    fn error_envelope_yields_every_entry() {
        let body = br#"{"response":{"errors":[
            {"code":"E1","message":"bad address"},
            {"code":"E2","message":"bad weight"}
        ]}}"#;
        let err = decode::<ShipmentResponse>(body).unwrap_err();
        let api = err.api_error().unwrap();
        assert_eq!(api.errors.len(), 2);
        assert_eq!(api.errors[0].code, "E1");
        assert_eq!(api.errors[1].message, "bad weight");
    }

    #[test]
    fn error_envelope_wins_over_success_slot() {
        let body = br#"{
            "ShipmentResponse": {"ShipmentResults": {"ShipmentIdentificationNumber": "1Z"}},
            "response": {"errors": [{"code": "E1", "message": "bad address"}]}
        }"#;
        assert!(decode::<ShipmentResponse>(body).unwrap_err().is_api_error());
    }

    #[test]
    fn garbage_in_success_slot_is_ignored_when_error_present() {
        let body = br#"{"ShipmentResponse": 42, "response": {"errors": []}}"#;
        assert!(decode::<ShipmentResponse>(body).unwrap_err().is_api_error());
    }

    #[test]
    fn null_error_slot_falls_through_to_success() {
        let body = br#"{
            "VoidShipmentResponse": {"SummaryResult": {"Status": {"Code": "1", "Description": "Voided"}}},
            "response": null
        }"#;
        let response: VoidShipmentResponse = decode(body).unwrap();
        assert!(response.is_voided());
    }

    #[test]
    fn success_ignores_garbage_outside_its_slot() {
        let body = br#"{"ShipmentResponse": {}, "Unrelated": [1, 2, 3]}"#;
        assert!(decode::<ShipmentResponse>(body).is_ok());
    }

    #[test]
    fn malformed_bodies_are_not_api_errors() {
        let cases: [&[u8]; 5] = [
            b"not json",
            b"[]",
            br#"{"response": "oops"}"#,
            br#"{"ShipmentResponse": {"ShipmentResults": {"PackageResults": "oops"}}}"#,
            br#"{"other": {}}"#,
        ];
        for body in cases {
            let err = decode::<ShipmentResponse>(body).unwrap_err();
            assert!(
                matches!(err, Error::MalformedResponse(_)),
                "expected MalformedResponse for {}, got {err}",
                String::from_utf8_lossy(body)
            );
        }
    }
}
