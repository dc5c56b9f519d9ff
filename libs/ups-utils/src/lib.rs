#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![warn(warnings)]

//! Small helpers shared by the UPS client crates.

#[cfg(feature = "humantime-serde")]
pub mod humantime_serde;
mod secret_string;

pub use secret_string::SecretString;
