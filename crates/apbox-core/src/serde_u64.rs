//! Serde helpers for Aptos `u64` values.
//!
//! The Aptos REST API and wallet adapters encode `u64` as decimal strings.
//! Deserialization accepts either a string or a plain JSON number.

use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};
use std::fmt;

/// Serialize a `u64` as a decimal string.
pub fn serialize<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(value)
}

/// Deserialize a `u64` from a decimal string or a JSON number.
pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(U64Visitor)
}

struct U64Visitor;

impl Visitor<'_> for U64Visitor {
    type Value = u64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a u64 as a decimal string or number")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<u64, E> {
        Ok(value)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<u64, E> {
        u64::try_from(value).map_err(|_| E::custom(format!("negative value: {value}")))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<u64, E> {
        value
            .parse()
            .map_err(|_| E::custom(format!("invalid u64 string: {value:?}")))
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Wrapper {
        #[serde(with = "super")]
        value: u64,
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&Wrapper { value: 1000 }).unwrap();
        assert_eq!(json, r#"{"value":"1000"}"#);
    }

    #[test]
    fn test_accepts_string_and_number() {
        let from_str: Wrapper = serde_json::from_str(r#"{"value":"18446744073709551615"}"#).unwrap();
        assert_eq!(from_str.value, u64::MAX);

        let from_num: Wrapper = serde_json::from_str(r#"{"value":25}"#).unwrap();
        assert_eq!(from_num.value, 25);
    }

    #[test]
    fn test_rejects_negative_and_garbage() {
        assert!(serde_json::from_str::<Wrapper>(r#"{"value":-1}"#).is_err());
        assert!(serde_json::from_str::<Wrapper>(r#"{"value":"12abc"}"#).is_err());
    }
}
