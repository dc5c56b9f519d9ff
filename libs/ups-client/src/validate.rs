//! Local checks of request payloads against the field limits UPS documents.
//!
//! Lengths are counted in characters. A field with a minimum length is
//! required; fields with only a maximum or an exact length are checked when
//! they are non-empty.

use thiserror::Error;

/// A request field that violates a documented limit.
///
/// `field` is the dotted wire path, e.g. `Shipment.Shipper.Address.City`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub(crate) fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Implemented by every node of the request tree.
pub trait Validate {
    /// Check `self`, reporting the first violation found.
    ///
    /// # Errors
    /// Returns the offending field's path and the limit it breaks.
    fn validate(&self) -> Result<(), ValidationError> {
        self.validate_at(&Path::root())
    }

    /// Check `self` located at `path` within the request.
    ///
    /// # Errors
    /// Returns the offending field's path and the limit it breaks.
    fn validate_at(&self, path: &Path) -> Result<(), ValidationError>;
}

/// Dotted location inside the request tree.
#[derive(Debug, Clone, Default)]
pub struct Path(String);

impl Path {
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn join(&self, name: &str) -> Self {
        if self.0.is_empty() {
            Self(name.to_owned())
        } else {
            Self(format!("{}.{name}", self.0))
        }
    }

    #[must_use]
    pub fn index(&self, i: usize) -> Self {
        Self(format!("{}[{i}]", self.0))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<T: Validate> Validate for Option<T> {
    fn validate_at(&self, path: &Path) -> Result<(), ValidationError> {
        self.as_ref().map_or(Ok(()), |v| v.validate_at(path))
    }
}

impl<T: Validate> Validate for [T] {
    fn validate_at(&self, path: &Path) -> Result<(), ValidationError> {
        self.iter()
            .enumerate()
            .try_for_each(|(i, item)| item.validate_at(&path.index(i)))
    }
}

fn chars(value: &str) -> usize {
    value.chars().count()
}

/// Required field: `min..=max` characters.
pub fn between(
    path: &Path,
    name: &str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    let n = chars(value);
    if n < min || n > max {
        let reason = if n == 0 {
            "is required".to_owned()
        } else {
            format!("must be {min} to {max} characters, got {n}")
        };
        return Err(ValidationError::new(path.join(name).as_str(), reason));
    }
    Ok(())
}

/// At most `max` characters.
pub fn max(path: &Path, name: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    let n = chars(value);
    if n > max {
        return Err(ValidationError::new(
            path.join(name).as_str(),
            format!("must be at most {max} characters, got {n}"),
        ));
    }
    Ok(())
}

/// Exactly `len` characters when present.
pub fn exact(path: &Path, name: &str, value: &str, len: usize) -> Result<(), ValidationError> {
    let n = chars(value);
    if n != 0 && n != len {
        return Err(ValidationError::new(
            path.join(name).as_str(),
            format!("must be exactly {len} characters, got {n}"),
        ));
    }
    Ok(())
}

/// At most `max` elements.
pub fn max_items<T>(
    path: &Path,
    name: &str,
    items: &[T],
    max: usize,
) -> Result<(), ValidationError> {
    if items.len() > max {
        return Err(ValidationError::new(
            path.join(name).as_str(),
            format!("must have at most {max} entries, got {}", items.len()),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn path_joins_and_indexes() {
        let p = Path::root().join("Shipment").join("Package").index(2).join("Packaging");
        assert_eq!(p.as_str(), "Shipment.Package[2].Packaging");
    }

    #[test]
    fn between_reports_missing_and_long_values() {
        let p = Path::root().join("Shipper");
        assert_eq!(
            between(&p, "Name", "", 1, 35).unwrap_err(),
            ValidationError::new("Shipper.Name", "is required")
        );
        let long = "x".repeat(36);
        let err = between(&p, "Name", &long, 1, 35).unwrap_err();
        assert_eq!(err.reason, "must be 1 to 35 characters, got 36");
        assert!(between(&p, "Name", "ACME", 1, 35).is_ok());
    }

    #[test]
    fn exact_skips_empty_values() {
        let p = Path::root();
        assert!(exact(&p, "CountryCode", "", 2).is_ok());
        assert!(exact(&p, "CountryCode", "US", 2).is_ok());
        assert!(exact(&p, "CountryCode", "USA", 2).is_err());
    }

    #[test]
    fn lengths_count_characters_not_bytes() {
        assert!(max(&Path::root(), "City", "Z\u{fc}rich", 6).is_ok());
    }

    #[test]
    fn max_items_limits_lists() {
        let p = Path::root().join("Address");
        assert!(max_items(&p, "AddressLine", &["a", "b", "c"], 3).is_ok());
        let err = max_items(&p, "AddressLine", &["a", "b", "c", "d"], 3).unwrap_err();
        assert_eq!(err.field, "Address.AddressLine");
    }
}
