//! Fields UPS sends as a bare object when there is exactly one element and
//! as an array otherwise.
//!
//! ```ignore
//! #[derive(Deserialize)]
//! struct Results {
//!     #[serde(default, deserialize_with = "one_or_many::deserialize")]
//!     package_results: Vec<PackageResults>,
//! }
//! ```
//!
//! `{..}` becomes a one-element vector, `[..]` is taken as is, `null` (and,
//! with `#[serde(default)]`, a missing key) becomes an empty vector.

use std::fmt;
use std::marker::PhantomData;

use serde::de::value::{MapAccessDeserializer, SeqAccessDeserializer};
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};

/// # Errors
/// Returns the deserializer's error when the value is neither an object, an
/// array nor null, or when an element does not decode as `T`.
pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    deserializer.deserialize_any(OneOrMany(PhantomData))
}

struct OneOrMany<T>(PhantomData<fn() -> T>);

impl<'de, T> Visitor<'de> for OneOrMany<T>
where
    T: Deserialize<'de>,
{
    type Value = Vec<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object, an array of objects, or null")
    }

    fn visit_map<A>(self, map: A) -> Result<Vec<T>, A::Error>
    where
        A: MapAccess<'de>,
    {
        T::deserialize(MapAccessDeserializer::new(map)).map(|one| vec![one])
    }

    fn visit_seq<A>(self, seq: A) -> Result<Vec<T>, A::Error>
    where
        A: SeqAccess<'de>,
    {
        Vec::<T>::deserialize(SeqAccessDeserializer::new(seq))
    }

    fn visit_unit<E>(self) -> Result<Vec<T>, E>
    where
        E: de::Error,
    {
        Ok(Vec::new())
    }

    fn visit_none<E>(self) -> Result<Vec<T>, E>
    where
        E: de::Error,
    {
        Ok(Vec::new())
    }
}
