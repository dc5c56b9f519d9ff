//! Shipment request payload, sent as `{"ShipmentRequest": ...}`.
//!
//! UPS expects PascalCase keys and string-typed values throughout, including
//! numbers and `""`/`"Y"` style indicators. Optional fields are left out of
//! the JSON while empty.

use serde::{Deserialize, Serialize};

use crate::envelope::EnvelopePayload;
use crate::validate::{Path, Validate, ValidationError, between, exact, max, max_items};

/// Top-level body of a create-shipment call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ShipmentRequest {
    pub shipment: Shipment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_specification: Option<LabelSpecification>,
}

impl EnvelopePayload for ShipmentRequest {
    const ENVELOPE_KEY: &'static str = "ShipmentRequest";
}

impl Validate for ShipmentRequest {
    fn validate_at(&self, path: &Path) -> Result<(), ValidationError> {
        self.shipment.validate_at(&path.join("Shipment"))?;
        self.label_specification
            .validate_at(&path.join("LabelSpecification"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Shipment {
    /// Merchandise description, 1 to 50 characters.
    pub description: String,
    pub shipper: Shipper,
    pub ship_to: ShipTo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ship_from: Option<ShipFrom>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_information: Option<PaymentInformation>,
    #[serde(
        rename = "FRSPaymentInformation",
        skip_serializing_if = "Option::is_none"
    )]
    pub frs_payment_information: Option<FrsPaymentInformation>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub goods_not_in_free_circulation_indicator: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub movement_reference_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<ReferenceNumber>,
    pub service: Service,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub num_of_pieces_in_shipment: String,
    #[serde(rename = "USPSEndorsement", skip_serializing_if = "String::is_empty")]
    pub usps_endorsement: String,
    #[serde(rename = "MILabelCN22Indicator", skip_serializing_if = "String::is_empty")]
    pub mi_label_cn22_indicator: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub sub_classification: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cost_center: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cost_center_barcode_indicator: String,
    #[serde(rename = "PackageID", skip_serializing_if = "String::is_empty")]
    pub package_id: String,
    #[serde(rename = "PackageIDBarcodeIndicator", skip_serializing_if = "String::is_empty")]
    pub package_id_barcode_indicator: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub irregular_indicator: String,
    #[serde(rename = "MIDualReturnShipmentKey", skip_serializing_if = "String::is_empty")]
    pub mi_dual_return_shipment_key: String,
    #[serde(
        rename = "MIDualReturnShipmentIndicator",
        skip_serializing_if = "String::is_empty"
    )]
    pub mi_dual_return_shipment_indicator: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub rating_method_requested_indicator: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tax_information_indicator: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipment_service_options: Option<ShipmentServiceOptions>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub locale: String,
    #[serde(rename = "MasterCartonID", skip_serializing_if = "String::is_empty")]
    pub master_carton_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub master_carton_indicator: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub shipment_value_threshold_code: String,
    pub packages: Vec<Package>,
    /// `YYYYMMDD`; UPS uses the current date when omitted.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub shipment_date: String,
}

impl Validate for Shipment {
    fn validate_at(&self, path: &Path) -> Result<(), ValidationError> {
        between(path, "Description", &self.description, 1, 50)?;
        self.shipper.validate_at(&path.join("Shipper"))?;
        self.ship_to.validate_at(&path.join("ShipTo"))?;
        self.ship_from.validate_at(&path.join("ShipFrom"))?;
        self.payment_information
            .validate_at(&path.join("PaymentInformation"))?;
        self.frs_payment_information
            .validate_at(&path.join("FRSPaymentInformation"))?;
        self.reference_number
            .validate_at(&path.join("ReferenceNumber"))?;
        self.service.validate_at(&path.join("Service"))?;
        max(path, "NumOfPiecesInShipment", &self.num_of_pieces_in_shipment, 5)?;
        max(path, "USPSEndorsement", &self.usps_endorsement, 1)?;
        max(path, "PackageID", &self.package_id, 30)?;
        max(
            path,
            "PackageIDBarcodeIndicator",
            &self.package_id_barcode_indicator,
            30,
        )?;
        max(path, "IrregularIndicator", &self.irregular_indicator, 30)?;
        max(
            path,
            "MIDualReturnShipmentKey",
            &self.mi_dual_return_shipment_key,
            50,
        )?;
        self.shipment_service_options
            .validate_at(&path.join("ShipmentServiceOptions"))?;
        max(path, "Locale", &self.locale, 5)?;
        max(path, "MasterCartonID", &self.master_carton_id, 24)?;
        max(
            path,
            "ShipmentValueThresholdCode",
            &self.shipment_value_threshold_code,
            2,
        )?;
        self.packages.validate_at(&path.join("Packages"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Shipper {
    pub name: String,
    pub attention_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub company_displayable_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tax_identification_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<Phone>,
    /// Six-character UPS account number.
    pub shipper_number: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub fax_number: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub e_mail_address: String,
    pub address: ShipperAddress,
}

impl Validate for Shipper {
    fn validate_at(&self, path: &Path) -> Result<(), ValidationError> {
        between(path, "Name", &self.name, 1, 35)?;
        max(path, "AttentionName", &self.attention_name, 35)?;
        max(path, "CompanyDisplayableName", &self.company_displayable_name, 35)?;
        max(
            path,
            "TaxIdentificationNumber",
            &self.tax_identification_number,
            15,
        )?;
        self.phone.validate_at(&path.join("Phone"))?;
        exact(path, "ShipperNumber", &self.shipper_number, 6)?;
        max(path, "FaxNumber", &self.fax_number, 14)?;
        max(path, "EMailAddress", &self.e_mail_address, 50)?;
        self.address.validate_at(&path.join("Address"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Phone {
    pub number: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub extension: String,
}

impl Validate for Phone {
    fn validate_at(&self, path: &Path) -> Result<(), ValidationError> {
        between(path, "Number", &self.number, 1, 15)?;
        max(path, "Extension", &self.extension, 4)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ShipperAddress {
    /// One to three lines of street address.
    #[serde(rename = "AddressLine")]
    pub address_lines: Vec<String>,
    pub city: String,
    pub state_province_code: String,
    pub postal_code: String,
    pub country_code: String,
}

impl Validate for ShipperAddress {
    fn validate_at(&self, path: &Path) -> Result<(), ValidationError> {
        address_lines(path, &self.address_lines)?;
        between(path, "City", &self.city, 1, 30)?;
        max(path, "StateProvinceCode", &self.state_province_code, 5)?;
        max(path, "PostalCode", &self.postal_code, 9)?;
        exact(path, "CountryCode", &self.country_code, 2)
    }
}

fn address_lines(path: &Path, lines: &[String]) -> Result<(), ValidationError> {
    if lines.is_empty() {
        return Err(ValidationError::new(
            path.join("AddressLine").as_str(),
            "is required",
        ));
    }
    max_items(path, "AddressLine", lines, 3)?;
    for (i, line) in lines.iter().enumerate() {
        let n = line.chars().count();
        if n == 0 || n > 35 {
            return Err(ValidationError::new(
                path.join("AddressLine").index(i).as_str(),
                format!("must be 1 to 35 characters, got {n}"),
            ));
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ShipTo {
    pub name: String,
    pub attention_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub company_displayable_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tax_identification_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<Phone>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub shipper_number: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub fax_number: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub e_mail_address: String,
    pub address: ShipToAddress,
    #[serde(rename = "LocationID", skip_serializing_if = "String::is_empty")]
    pub location_id: String,
}

impl Validate for ShipTo {
    fn validate_at(&self, path: &Path) -> Result<(), ValidationError> {
        between(path, "Name", &self.name, 1, 35)?;
        max(path, "AttentionName", &self.attention_name, 35)?;
        max(path, "CompanyDisplayableName", &self.company_displayable_name, 35)?;
        max(
            path,
            "TaxIdentificationNumber",
            &self.tax_identification_number,
            15,
        )?;
        self.phone.validate_at(&path.join("Phone"))?;
        exact(path, "ShipperNumber", &self.shipper_number, 6)?;
        max(path, "FaxNumber", &self.fax_number, 15)?;
        max(path, "EMailAddress", &self.e_mail_address, 50)?;
        self.address.validate_at(&path.join("Address"))?;
        max(path, "LocationID", &self.location_id, 10)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ShipToAddress {
    #[serde(rename = "AddressLine")]
    pub address_lines: Vec<String>,
    pub city: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub state_province_code: String,
    pub postal_code: String,
    pub country_code: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub residential_address_indicator: String,
}

impl Validate for ShipToAddress {
    fn validate_at(&self, path: &Path) -> Result<(), ValidationError> {
        address_lines(path, &self.address_lines)?;
        between(path, "City", &self.city, 1, 30)?;
        max(path, "StateProvinceCode", &self.state_province_code, 5)?;
        max(path, "PostalCode", &self.postal_code, 9)?;
        exact(path, "CountryCode", &self.country_code, 2)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ShipFrom {
    pub name: String,
    pub attention_name: String,
    pub company_displayable_name: String,
    pub tax_identification_number: String,
    #[serde(rename = "TaxIDType", skip_serializing_if = "Option::is_none")]
    pub tax_id_type: Option<TaxIdType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<Phone>,
    pub shipper_number: String,
    pub fax_number: String,
    pub address: ShipToAddress,
    #[serde(rename = "LocationID")]
    pub location_id: String,
}

impl Validate for ShipFrom {
    fn validate_at(&self, path: &Path) -> Result<(), ValidationError> {
        between(path, "Name", &self.name, 1, 35)?;
        max(path, "AttentionName", &self.attention_name, 35)?;
        max(path, "CompanyDisplayableName", &self.company_displayable_name, 35)?;
        max(
            path,
            "TaxIdentificationNumber",
            &self.tax_identification_number,
            15,
        )?;
        self.phone.validate_at(&path.join("Phone"))?;
        exact(path, "ShipperNumber", &self.shipper_number, 6)?;
        max(path, "FaxNumber", &self.fax_number, 15)?;
        self.address.validate_at(&path.join("Address"))?;
        max(path, "LocationID", &self.location_id, 10)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TaxIdType {
    pub code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PaymentInformation {
    pub shipment_charge: ShipmentCharge,
}

impl Validate for PaymentInformation {
    fn validate_at(&self, path: &Path) -> Result<(), ValidationError> {
        self.shipment_charge
            .validate_at(&path.join("ShipmentCharge"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ShipmentCharge {
    /// `01` transportation, `02` duties and taxes, `03` broker of choice.
    #[serde(rename = "Type")]
    pub charge_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_shipper: Option<BillShipper>,
}

impl Validate for ShipmentCharge {
    fn validate_at(&self, path: &Path) -> Result<(), ValidationError> {
        exact(path, "Type", &self.charge_type, 2)?;
        self.bill_shipper.validate_at(&path.join("BillShipper"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BillShipper {
    pub account_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_card: Option<CreditCard>,
}

impl Validate for BillShipper {
    fn validate_at(&self, path: &Path) -> Result<(), ValidationError> {
        exact(path, "AccountNumber", &self.account_number, 6)?;
        self.credit_card.validate_at(&path.join("CreditCard"))
    }
}

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CreditCard {
    #[serde(rename = "Type")]
    pub card_type: String,
    pub number: String,
    /// `MMYYYY`
    pub expiration_date: String,
    pub security_code: String,
}

impl std::fmt::Debug for CreditCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreditCard")
            .field("card_type", &self.card_type)
            .field("number", &"[REDACTED]")
            .field("expiration_date", &"[REDACTED]")
            .field("security_code", &"[REDACTED]")
            .finish()
    }
}

impl Validate for CreditCard {
    fn validate_at(&self, path: &Path) -> Result<(), ValidationError> {
        exact(path, "Type", &self.card_type, 2)?;
        between(path, "Number", &self.number, 9, 16)?;
        exact(path, "ExpirationDate", &self.expiration_date, 6)?;
        between(path, "SecurityCode", &self.security_code, 3, 4)
    }
}

/// Freight collect / third party payment for Ground Freight Pricing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FrsPaymentInformation {
    #[serde(rename = "Type")]
    pub payment_type: CodeDescription,
    pub account_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<FrsPaymentAddress>,
}

impl Validate for FrsPaymentInformation {
    fn validate_at(&self, path: &Path) -> Result<(), ValidationError> {
        let at = path.join("Type");
        exact(&at, "Code", &self.payment_type.code, 2)?;
        max(&at, "Description", &self.payment_type.description, 50)?;
        exact(path, "AccountNumber", &self.account_number, 6)?;
        self.address.validate_at(&path.join("Address"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FrsPaymentAddress {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub postal_code: String,
    pub country_code: String,
}

impl Validate for FrsPaymentAddress {
    fn validate_at(&self, path: &Path) -> Result<(), ValidationError> {
        max(path, "PostalCode", &self.postal_code, 9)?;
        exact(path, "CountryCode", &self.country_code, 2)
    }
}

/// `Code` plus optional human-readable `Description`; the shape UPS uses for
/// most enumerations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CodeDescription {
    pub code: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl CodeDescription {
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: String::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Exact-length code with a description of at most 35 characters.
    fn validate_fixed(&self, path: &Path, code_len: usize) -> Result<(), ValidationError> {
        exact(path, "Code", &self.code, code_len)?;
        max(path, "Description", &self.description, 35)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ReferenceNumber {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub bar_code_indicator: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub code: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value: String,
}

impl Validate for ReferenceNumber {
    fn validate_at(&self, path: &Path) -> Result<(), ValidationError> {
        max(path, "Code", &self.code, 2)?;
        max(path, "Value", &self.value, 35)
    }
}

/// UPS service level, e.g. `03` Ground or `01` Next Day Air.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Service {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub code: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl Validate for Service {
    fn validate_at(&self, path: &Path) -> Result<(), ValidationError> {
        exact(path, "Code", &self.code, 2)?;
        max(path, "Description", &self.description, 35)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ShipmentServiceOptions {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub saturday_delivery_indicator: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub saturday_pickup_indicator: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub deliver_to_addressee_only_indicator: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub direct_delivery_only_indicator: String,
    /// Up to three e-mail notifications.
    #[serde(rename = "Notification", skip_serializing_if = "Vec::is_empty")]
    pub notifications: Vec<Notification>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub return_of_document_indicator: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub import_control_indicator: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub commercial_invoice_removal_indicator: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub exchange_forward_indicator: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub hold_for_pickup_indicator: String,
    #[serde(
        rename = "DropoffAtUPSFacilityIndicator",
        skip_serializing_if = "String::is_empty"
    )]
    pub dropoff_at_ups_facility_indicator: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub lift_gate_for_pick_up_indicator: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub lift_gate_for_delivery_indicator: String,
    #[serde(rename = "SDLShipmentIndicator", skip_serializing_if = "String::is_empty")]
    pub sdl_shipment_indicator: String,
    #[serde(rename = "EPRAReleaseCode", skip_serializing_if = "String::is_empty")]
    pub epra_release_code: String,
}

impl Validate for ShipmentServiceOptions {
    fn validate_at(&self, path: &Path) -> Result<(), ValidationError> {
        max_items(path, "Notification", &self.notifications, 3)?;
        self.notifications
            .validate_at(&path.join("Notification"))?;
        max(path, "EPRAReleaseCode", &self.epra_release_code, 6)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Notification {
    pub notification_code: String,
    pub e_mail: EMail,
}

impl Validate for Notification {
    fn validate_at(&self, path: &Path) -> Result<(), ValidationError> {
        between(path, "NotificationCode", &self.notification_code, 1, 3)?;
        self.e_mail.validate_at(&path.join("EMail"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct EMail {
    pub e_mail_address: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub undeliverable_e_mail_address: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub from_e_mail_address: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub from_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub memo: String,
}

impl Validate for EMail {
    fn validate_at(&self, path: &Path) -> Result<(), ValidationError> {
        between(path, "EMailAddress", &self.e_mail_address, 1, 50)?;
        max(
            path,
            "UndeliverableEMailAddress",
            &self.undeliverable_e_mail_address,
            50,
        )?;
        max(path, "FromEMailAddress", &self.from_e_mail_address, 50)?;
        max(path, "FromName", &self.from_name, 35)?;
        max(path, "Memo", &self.memo, 150)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Package {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub pallet_description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub num_of_pieces: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub unit_price: String,
    /// Packaging type, e.g. `02` customer supplied package.
    pub packaging: CodeDescription,
    pub dimensions: Dimensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dim_weight: Option<Weight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_weight: Option<Weight>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub large_package_indicator: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub additional_handling_indicator: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub oversize_indicator: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub minimum_billable_weight_indicator: String,
}

impl Validate for Package {
    fn validate_at(&self, path: &Path) -> Result<(), ValidationError> {
        max(path, "Description", &self.description, 35)?;
        max(path, "PalletDescription", &self.pallet_description, 150)?;
        max(path, "NumOfPieces", &self.num_of_pieces, 5)?;
        max(path, "UnitPrice", &self.unit_price, 12)?;
        self.packaging.validate_fixed(&path.join("Packaging"), 2)?;
        self.dimensions.validate_at(&path.join("Dimensions"))?;
        if let Some(dim) = &self.dim_weight {
            let at = path.join("DimWeight");
            dim.unit_of_measurement
                .validate_fixed(&at.join("UnitOfMeasurement"), 3)?;
            exact(&at, "Weight", &dim.weight, 6)?;
        }
        if let Some(weight) = &self.package_weight {
            let at = path.join("PackageWeight");
            weight
                .unit_of_measurement
                .validate_fixed(&at.join("UnitOfMeasurement"), 3)?;
            max(&at, "Weight", &weight.weight, 5)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Dimensions {
    /// `IN` or `CM`.
    pub unit_of_measurement: CodeDescription,
    pub length: String,
    pub width: String,
    pub height: String,
}

impl Validate for Dimensions {
    fn validate_at(&self, path: &Path) -> Result<(), ValidationError> {
        self.unit_of_measurement
            .validate_fixed(&path.join("UnitOfMeasurement"), 2)?;
        between(path, "Length", &self.length, 1, 3)?;
        between(path, "Width", &self.width, 1, 3)?;
        between(path, "Height", &self.height, 1, 3)
    }
}

/// Weight with its unit (`LBS`/`KGS`); used for both billed and dimensional
/// weight, which differ only in their limits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Weight {
    pub unit_of_measurement: CodeDescription,
    pub weight: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LabelSpecification {
    /// `GIF`, `ZPL`, `EPL` or `SPL`.
    pub label_image_format: CodeDescription,
    #[serde(rename = "HTTPUserAgent", skip_serializing_if = "String::is_empty")]
    pub http_user_agent: String,
    pub label_stock_size: LabelStockSize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruction: Option<CodeDescription>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub character_set: String,
}

impl Validate for LabelSpecification {
    fn validate_at(&self, path: &Path) -> Result<(), ValidationError> {
        let at = path.join("LabelImageFormat");
        between(&at, "Code", &self.label_image_format.code, 1, 4)?;
        max(&at, "Description", &self.label_image_format.description, 35)?;
        max(path, "HTTPUserAgent", &self.http_user_agent, 64)?;
        let at = path.join("LabelStockSize");
        between(&at, "Height", &self.label_stock_size.height, 1, 3)?;
        between(&at, "Width", &self.label_stock_size.width, 1, 3)?;
        if let Some(instruction) = &self.instruction {
            instruction.validate_fixed(&path.join("Instruction"), 2)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LabelStockSize {
    pub height: String,
    pub width: String,
}
