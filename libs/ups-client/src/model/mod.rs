//! Wire types for the Shipping API.

mod request;
mod response;

pub use request::{
    BillShipper, CodeDescription, CreditCard, Dimensions, EMail, FrsPaymentAddress,
    FrsPaymentInformation, LabelSpecification, LabelStockSize, Notification, Package,
    PaymentInformation, Phone, ReferenceNumber, Service, ShipFrom, ShipTo, ShipToAddress,
    Shipment, ShipmentCharge, ShipmentRequest, ShipmentServiceOptions, Shipper, ShipperAddress,
    TaxIdType, Weight,
};
pub use response::{
    Alert, ImageFormat, PackageLevelResult, PackageResults, Response, ResponseStatus,
    ShipmentResponse, ShipmentResults, ShippingLabel, Status, SummaryResult,
    VoidShipmentResponse,
};

#[cfg(test)]
pub(crate) mod fixtures {
    use super::{
        BillShipper, CodeDescription, Dimensions, LabelSpecification, LabelStockSize, Package,
        PaymentInformation, Service, ShipTo, ShipToAddress, Shipment, ShipmentCharge,
        ShipmentRequest, Shipper, ShipperAddress, Weight,
    };

    /// A one-package Ground shipment that passes validation.
    pub fn ground_shipment() -> ShipmentRequest {
        ShipmentRequest {
            shipment: Shipment {
                description: "Replacement parts".to_owned(),
                shipper: Shipper {
                    name: "ACME Parts".to_owned(),
                    shipper_number: "A1B2C3".to_owned(),
                    address: ShipperAddress {
                        address_lines: vec!["12380 Morris Road".to_owned()],
                        city: "Alpharetta".to_owned(),
                        state_province_code: "GA".to_owned(),
                        postal_code: "30005".to_owned(),
                        country_code: "US".to_owned(),
                    },
                    ..Shipper::default()
                },
                ship_to: ShipTo {
                    name: "Jane Doe".to_owned(),
                    address: ShipToAddress {
                        address_lines: vec!["55 Glenlake Pkwy NE".to_owned()],
                        city: "Atlanta".to_owned(),
                        state_province_code: "GA".to_owned(),
                        postal_code: "30328".to_owned(),
                        country_code: "US".to_owned(),
                        residential_address_indicator: "Y".to_owned(),
                    },
                    ..ShipTo::default()
                },
                payment_information: Some(PaymentInformation {
                    shipment_charge: ShipmentCharge {
                        charge_type: "01".to_owned(),
                        bill_shipper: Some(BillShipper {
                            account_number: "A1B2C3".to_owned(),
                            credit_card: None,
                        }),
                    },
                }),
                service: Service {
                    code: "03".to_owned(),
                    description: "Ground".to_owned(),
                },
                packages: vec![Package {
                    packaging: CodeDescription::new("02").with_description("Customer Supplied"),
                    dimensions: Dimensions {
                        unit_of_measurement: CodeDescription::new("IN"),
                        length: "10".to_owned(),
                        width: "8".to_owned(),
                        height: "4".to_owned(),
                    },
                    package_weight: Some(Weight {
                        unit_of_measurement: CodeDescription::new("LBS"),
                        weight: "5".to_owned(),
                    }),
                    ..Package::default()
                }],
                ..Shipment::default()
            },
            label_specification: Some(LabelSpecification {
                label_image_format: CodeDescription::new("GIF"),
                label_stock_size: LabelStockSize {
                    height: "6".to_owned(),
                    width: "4".to_owned(),
                },
                ..LabelSpecification::default()
            }),
        }
    }
}
