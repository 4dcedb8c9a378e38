//! Coin creation requests and decimal validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{CoreError, Result};

/// Largest accepted decimal count.
pub const MAX_DECIMALS: u8 = 63;

/// Decimal count suggested to users (the Aptos convention).
pub const DEFAULT_DECIMALS: u8 = 6;

/// Why a decimals input was rejected. The display text is shown inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecimalError {
    /// Input is not an integer.
    #[error("Must be a number!")]
    NotANumber,
    /// Input exceeds [`MAX_DECIMALS`].
    #[error("Must be below 63.")]
    TooLarge,
    /// Input is below zero.
    #[error("Must not be negative.")]
    Negative,
}

/// Parse a decimals text input.
///
/// Accepts an optionally signed run of ASCII digits surrounded by whitespace.
/// Fractions, exponents and empty input are not numbers.
///
/// # Errors
///
/// Returns the [`DecimalError`] to display next to the input.
pub fn parse_decimals(input: &str) -> std::result::Result<u8, DecimalError> {
    let trimmed = input.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DecimalError::NotANumber);
    }
    if negative && digits.bytes().any(|b| b != b'0') {
        return Err(DecimalError::Negative);
    }

    // Digits only at this point, so a failed parse means overflow.
    match digits.parse::<u8>() {
        Ok(value) if value <= MAX_DECIMALS => Ok(value),
        _ => Err(DecimalError::TooLarge),
    }
}

/// Request to compile and publish a new managed coin type.
///
/// Wire shape: `{symbol, name, decimal, monitor}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinCreationRequest {
    /// Ticker symbol.
    pub symbol: String,
    /// Display name.
    pub name: String,
    /// Decimal places.
    #[serde(rename = "decimal")]
    pub decimals: u8,
    /// Whether the chain tracks total supply.
    #[serde(rename = "monitor")]
    pub monitor_supply: bool,
}

impl CoinCreationRequest {
    /// Check the request before it is sent anywhere.
    ///
    /// # Errors
    ///
    /// Returns error if symbol or name is empty or decimals exceed [`MAX_DECIMALS`].
    pub fn validate(&self) -> Result<()> {
        if self.symbol.is_empty() {
            return Err(CoreError::invalid_request("symbol must not be empty"));
        }
        if self.name.is_empty() {
            return Err(CoreError::invalid_request("name must not be empty"));
        }
        if self.decimals > MAX_DECIMALS {
            return Err(CoreError::invalid_request(DecimalError::TooLarge.to_string()));
        }
        Ok(())
    }
}
