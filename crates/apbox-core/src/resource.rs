//! On-chain records as returned by the Aptos fullnode REST API.

use serde::{Deserialize, Serialize};

/// A typed resource stored under an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveResource {
    /// Fully-qualified Move struct tag, e.g. `0x1::coin::CoinStore<0x1::aptos_coin::AptosCoin>`.
    #[serde(rename = "type")]
    pub resource_type: String,
    /// Resource contents, left opaque.
    pub data: serde_json::Value,
}

impl MoveResource {
    /// Create a resource with the given type tag and data.
    #[must_use]
    pub fn new(resource_type: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            resource_type: resource_type.into(),
            data,
        }
    }
}

/// An event read from an event handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveEvent {
    /// Ledger version that emitted the event.
    #[serde(with = "crate::serde_u64", default)]
    pub version: u64,
    /// Position within the event handle.
    #[serde(with = "crate::serde_u64")]
    pub sequence_number: u64,
    /// Move type of the event payload.
    #[serde(rename = "type")]
    pub event_type: String,
    /// Event payload.
    pub data: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resource_type_field_name() {
        let resource: MoveResource = serde_json::from_value(json!({
            "type": "0x1::account::Account",
            "data": { "sequence_number": "3" }
        }))
        .unwrap();

        assert_eq!(resource.resource_type, "0x1::account::Account");
        assert_eq!(resource.data["sequence_number"], "3");
    }

    #[test]
    fn test_event_decodes_string_numbers() {
        let event: MoveEvent = serde_json::from_value(json!({
            "version": "123456",
            "guid": { "creation_number": "4", "account_address": "0x2c7b" },
            "sequence_number": "17",
            "type": "0x2c7b::events::BuyEvent",
            "data": {}
        }))
        .unwrap();

        assert_eq!(event.version, 123_456);
        assert_eq!(event.sequence_number, 17);
        assert_eq!(event.event_type, "0x2c7b::events::BuyEvent");
    }
}
