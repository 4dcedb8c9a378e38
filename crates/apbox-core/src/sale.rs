//! Marketplace sale events and their display fields.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{CoreError, Result};
use crate::resource::MoveEvent;
use crate::OCTAS_PER_APT;

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;
const SECS_PER_WEEK: u64 = 7 * SECS_PER_DAY;

/// A completed NFT sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleEvent {
    /// Collection the token belongs to.
    pub collection_name: String,
    /// Token name within the collection.
    pub token_name: String,
    /// Sale price in octas.
    pub price_octas: u64,
    /// Sale time in microseconds since the Unix epoch (0 when not reported).
    pub timestamp_micros: u64,
    /// Position in the event stream.
    pub sequence_number: u64,
}

impl SaleEvent {
    /// Decode a marketplace buy event.
    ///
    /// Reads `data.token_id.token_data_id.{collection,name}`, `data.price`
    /// and the optional `data.timestamp`.
    ///
    /// # Errors
    ///
    /// Returns error if the token id or price is missing.
    pub fn from_event(event: &MoveEvent) -> Result<Self> {
        let seq = event.sequence_number;
        let token_data_id = &event.data["token_id"]["token_data_id"];

        let collection_name = token_data_id["collection"]
            .as_str()
            .ok_or_else(|| CoreError::malformed_event(seq, "missing collection"))?
            .to_string();
        let token_name = token_data_id["name"]
            .as_str()
            .ok_or_else(|| CoreError::malformed_event(seq, "missing token name"))?
            .to_string();
        let price_octas = json_u64(&event.data["price"])
            .ok_or_else(|| CoreError::malformed_event(seq, "missing or invalid price"))?;
        let timestamp_micros = json_u64(&event.data["timestamp"]).unwrap_or(0);

        Ok(Self {
            collection_name,
            token_name,
            price_octas,
            timestamp_micros,
            sequence_number: seq,
        })
    }

    /// Time elapsed between the sale and `now_micros`.
    #[must_use]
    pub fn age(&self, now_micros: u64) -> Duration {
        Duration::from_micros(now_micros.saturating_sub(self.timestamp_micros))
    }

    /// Display row for this sale as of `now_micros`.
    #[must_use]
    pub fn to_row(&self, now_micros: u64) -> SaleRow {
        SaleRow {
            collection: self.collection_name.clone(),
            token: self.token_name.clone(),
            price: format_price(self.price_octas),
            age: format_age(self.age(now_micros)),
            sequence_number: self.sequence_number,
        }
    }
}

/// Display-ready sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRow {
    /// Collection name.
    pub collection: String,
    /// Token name.
    pub token: String,
    /// Price, e.g. `12.35 $APT`.
    pub price: String,
    /// Relative age, e.g. `2w 3d`.
    pub age: String,
    /// Position in the event stream.
    pub sequence_number: u64,
}

/// Format a relative age using the two largest units starting at the
/// first non-zero one (`3w 2d`, `5h 0m`, `42s`).
#[must_use]
pub fn format_age(age: Duration) -> String {
    let mut rest = age.as_secs();
    let mut parts = [(0u64, "w"), (0, "d"), (0, "h"), (0, "m"), (0, "s")];
    for (part, unit_secs) in parts
        .iter_mut()
        .zip([SECS_PER_WEEK, SECS_PER_DAY, SECS_PER_HOUR, SECS_PER_MINUTE, 1])
    {
        part.0 = rest / unit_secs;
        rest %= unit_secs;
    }

    match parts.iter().position(|(value, _)| *value > 0) {
        Some(i) if i + 1 < parts.len() => {
            let (major, major_unit) = parts[i];
            let (minor, minor_unit) = parts[i + 1];
            format!("{major}{major_unit} {minor}{minor_unit}")
        }
        Some(i) => format!("{}{}", parts[i].0, parts[i].1),
        None => "0s".to_string(),
    }
}

/// Format an octa amount as APT with two decimals, rounding half up.
#[must_use]
pub fn format_price(octas: u64) -> String {
    let hundredths_unit = u128::from(OCTAS_PER_APT / 100);
    let hundredths = (u128::from(octas) + hundredths_unit / 2) / hundredths_unit;
    format!("{}.{:02} $APT", hundredths / 100, hundredths % 100)
}

fn json_u64(value: &serde_json::Value) -> Option<u64> {
    match value {
        serde_json::Value::String(s) => s.parse().ok(),
        serde_json::Value::Number(n) => n.as_u64(),
        _ => None,
    }
}
