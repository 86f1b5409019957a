use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::short_address;

/// A single executed DEX swap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub hash: String,
    pub from: String,
    pub token_in: String,
    pub token_out: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_in_symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_out_symbol: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount_in: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount_out: Decimal,
    pub dex: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub profit: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Trade: hash={} from={} {} {} -> {} {} on {}",
            short_address(&self.hash),
            short_address(&self.from),
            self.amount_in,
            self.token_in_symbol.as_deref().unwrap_or(&self.token_in),
            self.amount_out,
            self.token_out_symbol.as_deref().unwrap_or(&self.token_out),
            self.dex,
        )
    }
}
