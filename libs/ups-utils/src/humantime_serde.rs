//! Human-readable `Duration` fields for configuration structs.
//!
//! ```
//! use serde::Deserialize;
//! use std::time::Duration;
//!
//! #[derive(Deserialize)]
//! struct Timeouts {
//!     #[serde(with = "ups_utils::humantime_serde")]
//!     request: Duration,
//! }
//! ```

use std::fmt;
use std::time::Duration;

use serde::{Deserializer, Serializer, de};

/// Deserialize a `Duration` from strings like `"30s"` or `"1m 30s"`.
///
/// # Errors
/// Returns a deserializer error when the input is not a string or is not a
/// valid humantime duration.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_str(DurationVisitor)
}

/// Serialize a `Duration` in humantime format (`"1m 30s"`).
///
/// # Errors
/// Propagates serializer errors.
pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&humantime::format_duration(*duration))
}

struct DurationVisitor;

impl de::Visitor<'_> for DurationVisitor {
    type Value = Duration;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a duration such as \"30s\" or \"5m\"")
    }

    fn visit_str<E>(self, v: &str) -> Result<Duration, E>
    where
        E: de::Error,
    {
        humantime::parse_duration(v).map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}

pub mod option {
    //! `Option<Duration>` variant; use together with `#[serde(default)]`.

    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    /// Deserialize an optional humantime duration; `null` maps to `None`.
    ///
    /// # Errors
    /// Returns a deserializer error for non-string, non-null input.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Wrapper(#[serde(with = "super")] Duration);

        Option::<Wrapper>::deserialize(deserializer).map(|w| w.map(|Wrapper(d)| d))
    }

    /// Serialize an optional duration; `None` becomes `null`.
    ///
    /// # Errors
    /// Propagates serializer errors.
    #[allow(clippy::ref_option)] // signature dictated by `#[serde(with)]`
    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match duration {
            Some(d) => super::serialize(d, serializer),
            None => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use serde::{Deserialize, Serialize};
    use std::time::Duration;

    #[derive(Serialize, Deserialize)]
    struct Plain {
        #[serde(with = "super")]
        timeout: Duration,
    }

    #[derive(Serialize, Deserialize)]
    struct Optional {
        #[serde(with = "super::option", default)]
        idle: Option<Duration>,
    }

    #[test]
    fn parses_and_formats_duration() {
        let plain: Plain = serde_json::from_str(r#"{"timeout":"1m 30s"}"#).unwrap();
        assert_eq!(plain.timeout, Duration::from_secs(90));
        assert_eq!(
            serde_json::to_string(&plain).unwrap(),
            r#"{"timeout":"1m 30s"}"#
        );
    }

    #[test]
    fn rejects_garbage() {
        let err = serde_json::from_str::<Plain>(r#"{"timeout":"soon"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn optional_handles_null_and_missing() {
        let o: Optional = serde_json::from_str(r#"{"idle":"15s"}"#).unwrap();
        assert_eq!(o.idle, Some(Duration::from_secs(15)));

        let o: Optional = serde_json::from_str(r#"{"idle":null}"#).unwrap();
        assert_eq!(o.idle, None);

        let o: Optional = serde_json::from_str("{}").unwrap();
        assert_eq!(o.idle, None);
    }
}
