//! Success payloads. Unknown keys are ignored and missing ones default, since
//! UPS adds fields between API versions.

use serde::{Deserialize, Serialize};

use crate::envelope::EnvelopePayload;
use crate::one_or_many;

/// Body of a successful create-shipment call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ShipmentResponse {
    pub response: Response,
    pub shipment_results: ShipmentResults,
}

impl EnvelopePayload for ShipmentResponse {
    const ENVELOPE_KEY: &'static str = "ShipmentResponse";
}

impl ShipmentResponse {
    /// Tracking numbers of all packages, in request order.
    pub fn tracking_numbers(&self) -> impl Iterator<Item = &str> {
        self.shipment_results
            .package_results
            .iter()
            .map(|p| p.tracking_number.as_str())
    }
}

/// Transaction status shared by every UPS response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Response {
    pub response_status: ResponseStatus,
    /// Zero or more warnings; UPS sends a bare object when there is one.
    #[serde(rename = "Alert", deserialize_with = "one_or_many::deserialize")]
    pub alerts: Vec<Alert>,
}

/// `Code` `1` means success.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ResponseStatus {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Alert {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ShipmentResults {
    /// 1Z number of the first package.
    pub shipment_identification_number: String,
    #[serde(deserialize_with = "one_or_many::deserialize")]
    pub package_results: Vec<PackageResults>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PackageResults {
    pub tracking_number: String,
    pub shipping_label: Option<ShippingLabel>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ShippingLabel {
    pub image_format: ImageFormat,
    /// Base64 label image.
    pub graphic_image: String,
    /// Continuation of `graphic_image` for oversized CN22 forms.
    pub graphic_image_part: String,
}

/// `GIF`, `PNG`, `ZPL`, `EPL` or `SPL`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ImageFormat {
    pub code: String,
    pub description: String,
}

/// Body of a successful void-shipment call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct VoidShipmentResponse {
    pub response: Response,
    pub summary_result: SummaryResult,
    /// Per-package outcome, present when individual packages were voided.
    #[serde(rename = "PackageLevelResult", deserialize_with = "one_or_many::deserialize")]
    pub package_level_results: Vec<PackageLevelResult>,
}

impl EnvelopePayload for VoidShipmentResponse {
    const ENVELOPE_KEY: &'static str = "VoidShipmentResponse";
}

impl VoidShipmentResponse {
    /// UPS reports a voided shipment with summary status code `1`.
    #[must_use]
    pub fn is_voided(&self) -> bool {
        self.summary_result.status.code == "1"
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SummaryResult {
    pub status: Status,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Status {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PackageLevelResult {
    pub status: Status,
    pub tracking_number: String,
}
