use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::short_address;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowDirection {
    In,
    Out,
}

impl FlowDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowDirection::In => "in",
            FlowDirection::Out => "out",
        }
    }
}

impl fmt::Display for FlowDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One movement of value by a tracked wallet into or out of a token.
///
/// `amount` is always non-negative; `direction` carries the sign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flow {
    pub wallet: String,
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_symbol: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub direction: FlowDirection,
    /// Event time on chain, not ingestion time.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    /// Quote-currency value of the movement.
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
}

impl Flow {
    /// Amount with the direction applied: positive for inflows, negative for outflows.
    pub fn signed_amount(&self) -> Decimal {
        match self.direction {
            FlowDirection::In => self.amount,
            FlowDirection::Out => -self.amount,
        }
    }

    pub fn signed_value(&self) -> Decimal {
        match self.direction {
            FlowDirection::In => self.value,
            FlowDirection::Out => -self.value,
        }
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Flow: wallet={} token={} direction={} amount={} value={}",
            short_address(&self.wallet),
            self.token_symbol.as_deref().unwrap_or(&self.token),
            self.direction,
            self.amount,
            self.value,
        )
    }
}
