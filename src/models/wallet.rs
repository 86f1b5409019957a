use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::short_address;

/// A tracked smart-money wallet and its rolling performance figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub address: String,
    pub label: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub realized_profit: Decimal,
    /// Percentage in `0..=100`.
    #[serde(with = "rust_decimal::serde::float")]
    pub win_rate: Decimal,
    pub trades30d: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_gains: Decimal,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_seconds_option"
    )]
    pub first_seen: Option<DateTime<Utc>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_seconds_option"
    )]
    pub last_active: Option<DateTime<Utc>>,
}

impl Wallet {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

impl fmt::Display for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wallet: {} ({}) pnl={} win_rate={}% trades30d={}",
            self.label,
            short_address(&self.address),
            self.realized_profit,
            self.win_rate,
            self.trades30d,
        )
    }
}
