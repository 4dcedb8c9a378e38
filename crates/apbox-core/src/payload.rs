//! Transaction payloads handed to a wallet adapter for signing.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::coin::CoinCreationRequest;

/// Entry function that creates a `CoinStore` for the signer.
pub const REGISTER_FUNCTION: &str = "0x1::managed_coin::register";

/// Entry function that initializes a new managed coin type.
pub const INITIALIZE_FUNCTION: &str = "0x1::managed_coin::initialize";

/// A call to a Move entry function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryFunctionPayload {
    /// Fully-qualified function id (`address::module::function`).
    pub function: String,
    /// Generic type arguments.
    pub type_arguments: Vec<String>,
    /// Call arguments, JSON-encoded as the wallet expects them.
    pub arguments: Vec<serde_json::Value>,
}

/// Payload submitted through a wallet adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransactionPayload {
    /// `entry_function_payload`.
    EntryFunctionPayload(EntryFunctionPayload),
}

impl TransactionPayload {
    /// The function id this payload calls.
    #[must_use]
    pub fn function(&self) -> &str {
        match self {
            Self::EntryFunctionPayload(p) => &p.function,
        }
    }

    /// Type arguments of the call.
    #[must_use]
    pub fn type_arguments(&self) -> &[String] {
        match self {
            Self::EntryFunctionPayload(p) => &p.type_arguments,
        }
    }
}

/// Gas settings passed alongside a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOptions {
    /// Maximum gas units the transaction may consume.
    #[serde(with = "crate::serde_u64")]
    pub max_gas_amount: u64,
    /// Price per gas unit in octas.
    #[serde(with = "crate::serde_u64")]
    pub gas_unit_price: u64,
}

impl TransactionOptions {
    /// Fixed gas settings used for `CoinStore` registration.
    pub const REGISTER: Self = Self {
        max_gas_amount: 1000,
        gas_unit_price: 100,
    };
}

/// A transaction accepted by the wallet for submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTransaction {
    /// Transaction hash.
    pub hash: String,
}

/// Build the `managed_coin::register<coin_type>()` payload.
#[must_use]
pub fn register_payload(coin_type: &str) -> TransactionPayload {
    TransactionPayload::EntryFunctionPayload(EntryFunctionPayload {
        function: REGISTER_FUNCTION.to_string(),
        type_arguments: vec![coin_type.to_string()],
        arguments: Vec::new(),
    })
}

/// Build the `managed_coin::initialize<coin_type>(name, symbol, decimals, monitor)` payload.
#[must_use]
pub fn initialize_payload(request: &CoinCreationRequest, coin_type: &str) -> TransactionPayload {
    TransactionPayload::EntryFunctionPayload(EntryFunctionPayload {
        function: INITIALIZE_FUNCTION.to_string(),
        type_arguments: vec![coin_type.to_string()],
        arguments: vec![
            json!(request.name),
            json!(request.symbol),
            json!(request.decimals),
            json!(request.monitor_supply),
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_payload_wire_shape() {
        let payload = register_payload("0xA::m::Coin");
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(
            json,
            json!({
                "type": "entry_function_payload",
                "function": "0x1::managed_coin::register",
                "type_arguments": ["0xA::m::Coin"],
                "arguments": []
            })
        );
    }

    #[test]
    fn test_initialize_payload_arguments() {
        let request = CoinCreationRequest {
            symbol: "BTC".to_string(),
            name: "Bitcoin".to_string(),
            decimals: 8,
            monitor_supply: true,
        };
        let payload = initialize_payload(&request, "0xB::btc::BTC");

        assert_eq!(payload.function(), INITIALIZE_FUNCTION);
        assert_eq!(payload.type_arguments(), ["0xB::btc::BTC".to_string()]);

        let TransactionPayload::EntryFunctionPayload(inner) = payload;
        assert_eq!(inner.arguments, vec![json!("Bitcoin"), json!("BTC"), json!(8), json!(true)]);
    }

    #[test]
    fn test_register_options_as_strings() {
        let json = serde_json::to_value(TransactionOptions::REGISTER).unwrap();
        assert_eq!(json, json!({ "max_gas_amount": "1000", "gas_unit_price": "100" }));
    }
}
