use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::models::pagination::has_more;
use crate::models::{Flow, Pagination, PaginationParams, Trade, User, Wallet};

/// Maximum number of hex digits in an EVM address.
const ADDRESS_HEX_DIGITS: usize = 40;
/// Maximum number of hex digits in a transaction hash.
const HASH_HEX_DIGITS: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field}: malformed address '{value}'")]
    MalformedAddress { field: &'static str, value: String },

    #[error("{field}: malformed hash '{value}'")]
    MalformedHash { field: &'static str, value: String },

    #[error("{field}: must not be empty")]
    Empty { field: &'static str },

    #[error("{field}: {value} must be non-negative")]
    Negative { field: &'static str, value: Decimal },

    #[error("{field}: {value} is outside 0..=100")]
    PercentOutOfRange { field: &'static str, value: Decimal },

    #[error("{field}: timestamp {value} is before the unix epoch")]
    NegativeTimestamp { field: &'static str, value: i64 },

    #[error("lastActive ({last_active}) is earlier than firstSeen ({first_seen})")]
    ActivityOrder {
        first_seen: DateTime<Utc>,
        last_active: DateTime<Utc>,
    },

    #[error("tags: duplicate tag '{0}'")]
    DuplicateTag(String),

    #[error("user has neither fid nor address")]
    MissingIdentity,

    #[error("page must be >= 1")]
    PageOutOfRange,

    #[error("limit must be > 0")]
    LimitOutOfRange,

    #[error("hasMore={has_more} contradicts page={page} limit={limit} total={total}")]
    HasMoreMismatch {
        has_more: bool,
        page: u32,
        limit: u32,
        total: u64,
    },
}

/// Runtime check of the invariants a record must satisfy before the dashboard sees it.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// `0x`-prefixed hex string of 1 to 40 digits.
///
/// Short forms such as `0x1` are accepted because indexers emit them for
/// precompiles and test fixtures.
pub fn is_hex_address(s: &str) -> bool {
    is_prefixed_hex(s, ADDRESS_HEX_DIGITS)
}

/// `0x`-prefixed hex string of 1 to 64 digits.
pub fn is_hex_hash(s: &str) -> bool {
    is_prefixed_hex(s, HASH_HEX_DIGITS)
}

fn is_prefixed_hex(s: &str, max_digits: usize) -> bool {
    let Some(digits) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) else {
        return false;
    };
    !digits.is_empty()
        && digits.len() <= max_digits
        && digits.bytes().all(|b| b.is_ascii_hexdigit())
}

fn check_address(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if is_hex_address(value) {
        Ok(())
    } else {
        Err(ValidationError::MalformedAddress {
            field,
            value: value.to_string(),
        })
    }
}

fn check_hash(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if is_hex_hash(value) {
        Ok(())
    } else {
        Err(ValidationError::MalformedHash {
            field,
            value: value.to_string(),
        })
    }
}

fn check_non_negative(field: &'static str, value: Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::Negative { field, value });
    }
    Ok(())
}

fn check_timestamp(field: &'static str, ts: DateTime<Utc>) -> Result<(), ValidationError> {
    if ts.timestamp() < 0 {
        return Err(ValidationError::NegativeTimestamp {
            field,
            value: ts.timestamp(),
        });
    }
    Ok(())
}

fn check_not_blank(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(())
}

impl Validate for Wallet {
    fn validate(&self) -> Result<(), ValidationError> {
        check_address("address", &self.address)?;

        if self.win_rate < Decimal::ZERO || self.win_rate > Decimal::ONE_HUNDRED {
            return Err(ValidationError::PercentOutOfRange {
                field: "winRate",
                value: self.win_rate,
            });
        }

        let mut seen = HashSet::with_capacity(self.tags.len());
        for tag in &self.tags {
            check_not_blank("tags", tag)?;
            if !seen.insert(tag.to_lowercase()) {
                return Err(ValidationError::DuplicateTag(tag.clone()));
            }
        }

        if let Some(first_seen) = self.first_seen {
            check_timestamp("firstSeen", first_seen)?;
        }
        if let Some(last_active) = self.last_active {
            check_timestamp("lastActive", last_active)?;
        }
        if let (Some(first_seen), Some(last_active)) = (self.first_seen, self.last_active) {
            if last_active < first_seen {
                return Err(ValidationError::ActivityOrder {
                    first_seen,
                    last_active,
                });
            }
        }

        Ok(())
    }
}

impl Validate for Flow {
    fn validate(&self) -> Result<(), ValidationError> {
        check_address("wallet", &self.wallet)?;
        check_address("token", &self.token)?;
        check_non_negative("amount", self.amount)?;
        check_non_negative("value", self.value)?;
        check_timestamp("timestamp", self.timestamp)?;
        if let Some(tx_hash) = &self.tx_hash {
            check_hash("txHash", tx_hash)?;
        }
        Ok(())
    }
}

impl Validate for Trade {
    fn validate(&self) -> Result<(), ValidationError> {
        check_hash("hash", &self.hash)?;
        check_address("from", &self.from)?;
        check_address("tokenIn", &self.token_in)?;
        check_address("tokenOut", &self.token_out)?;
        check_non_negative("amountIn", self.amount_in)?;
        check_non_negative("amountOut", self.amount_out)?;
        check_not_blank("dex", &self.dex)?;
        check_timestamp("timestamp", self.timestamp)?;
        Ok(())
    }
}

impl Validate for User {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.fid.is_none() && self.address.is_none() {
            return Err(ValidationError::MissingIdentity);
        }
        if let Some(address) = &self.address {
            check_address("address", address)?;
        }
        Ok(())
    }
}

impl Validate for PaginationParams {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.page < 1 {
            return Err(ValidationError::PageOutOfRange);
        }
        if self.limit == 0 {
            return Err(ValidationError::LimitOutOfRange);
        }
        Ok(())
    }
}

impl Validate for Pagination {
    fn validate(&self) -> Result<(), ValidationError> {
        PaginationParams::new(self.page, self.limit).validate()?;
        if self.has_more != has_more(self.page, self.limit, self.total) {
            return Err(ValidationError::HasMoreMismatch {
                has_more: self.has_more,
                page: self.page,
                limit: self.limit,
                total: self.total,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FlowDirection;
    use chrono::TimeZone;

    const ADDR: &str = "0x28c6c06298d514db089934071355e5743bf21d60";
    const TOKEN: &str = "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48";

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn make_wallet() -> Wallet {
        Wallet {
            address: ADDR.into(),
            label: "Whale1".into(),
            realized_profit: Decimal::from(-4_200),
            win_rate: Decimal::from(72),
            trades30d: 14,
            total_gains: Decimal::from(300_000),
            tags: vec!["whale".into(), "early-adopter".into()],
            first_seen: Some(ts(1_690_000_000)),
            last_active: Some(ts(1_700_000_000)),
        }
    }

    fn make_flow(direction: FlowDirection, amount: i64) -> Flow {
        Flow {
            wallet: ADDR.into(),
            token: TOKEN.into(),
            token_symbol: Some("USDC".into()),
            amount: Decimal::from(amount),
            direction,
            timestamp: ts(1_700_000_000),
            value: Decimal::from(amount),
            tx_hash: None,
        }
    }

    #[test]
    fn test_hex_predicates() {
        assert!(is_hex_address("0x1"));
        assert!(is_hex_address("0xABC"));
        assert!(is_hex_address(ADDR));
        assert!(!is_hex_address("0x"));
        assert!(!is_hex_address("28c6c06298d514db089934071355e5743bf21d60"));
        assert!(!is_hex_address("0xZZ"));
        assert!(!is_hex_address(&format!("{ADDR}00")));

        assert!(is_hex_hash("0xdeadbeef"));
        assert!(is_hex_hash(&format!("0x{}", "f".repeat(64))));
        assert!(!is_hex_hash(&format!("0x{}", "f".repeat(65))));
    }

    #[test]
    fn test_valid_wallet() {
        assert_eq!(make_wallet().validate(), Ok(()));
    }

    #[test]
    fn test_wallet_negative_profit_is_allowed() {
        let wallet = make_wallet();
        assert!(wallet.realized_profit < Decimal::ZERO);
        assert!(wallet.validate().is_ok());
    }

    #[test]
    fn test_wallet_win_rate_bounds() {
        let mut wallet = make_wallet();
        wallet.win_rate = Decimal::ONE_HUNDRED;
        assert!(wallet.validate().is_ok());

        wallet.win_rate = Decimal::new(1005, 1);
        assert!(matches!(
            wallet.validate(),
            Err(ValidationError::PercentOutOfRange { field: "winRate", .. })
        ));

        wallet.win_rate = Decimal::from(-1);
        assert!(wallet.validate().is_err());
    }

    #[test]
    fn test_wallet_activity_order() {
        let mut wallet = make_wallet();
        wallet.last_active = Some(ts(1_600_000_000));
        assert!(matches!(
            wallet.validate(),
            Err(ValidationError::ActivityOrder { .. })
        ));

        // either bound alone is fine
        wallet.first_seen = None;
        assert!(wallet.validate().is_ok());

        wallet.first_seen = Some(ts(1_600_000_000));
        assert!(wallet.validate().is_ok());
    }

    #[test]
    fn test_wallet_negative_timestamp() {
        let mut wallet = make_wallet();
        wallet.first_seen = Some(ts(-10));
        assert_eq!(
            wallet.validate(),
            Err(ValidationError::NegativeTimestamp {
                field: "firstSeen",
                value: -10
            })
        );
    }

    #[test]
    fn test_wallet_tags() {
        let mut wallet = make_wallet();
        wallet.tags.push("Whale".into());
        assert_eq!(
            wallet.validate(),
            Err(ValidationError::DuplicateTag("Whale".into()))
        );

        wallet.tags = vec![" ".into()];
        assert_eq!(wallet.validate(), Err(ValidationError::Empty { field: "tags" }));
    }

    #[test]
    fn test_wallet_malformed_address() {
        let mut wallet = make_wallet();
        wallet.address = "vitalik.eth".into();
        assert!(matches!(
            wallet.validate(),
            Err(ValidationError::MalformedAddress { field: "address", .. })
        ));
    }

    #[test]
    fn test_flow_amount_non_negative_in_both_directions() {
        assert!(make_flow(FlowDirection::In, 500).validate().is_ok());
        assert!(make_flow(FlowDirection::Out, 500).validate().is_ok());
        assert!(make_flow(FlowDirection::Out, 0).validate().is_ok());

        let err = make_flow(FlowDirection::Out, -500).validate().unwrap_err();
        assert!(matches!(err, ValidationError::Negative { field: "amount", .. }));
    }

    #[test]
    fn test_flow_signed_amount() {
        assert_eq!(make_flow(FlowDirection::In, 5).signed_amount(), Decimal::from(5));
        assert_eq!(make_flow(FlowDirection::Out, 5).signed_amount(), Decimal::from(-5));
        assert_eq!(make_flow(FlowDirection::Out, 5).signed_value(), Decimal::from(-5));
    }

    #[test]
    fn test_flow_tx_hash_checked_when_present() {
        let mut flow = make_flow(FlowDirection::In, 1);
        flow.tx_hash = Some("not-a-hash".into());
        assert!(matches!(
            flow.validate(),
            Err(ValidationError::MalformedHash { field: "txHash", .. })
        ));
    }

    #[test]
    fn test_trade_validation() {
        let mut trade = Trade {
            hash: "0xdeadbeef".into(),
            from: "0x1".into(),
            token_in: "0xA".into(),
            token_out: "0xB".into(),
            token_in_symbol: None,
            token_out_symbol: None,
            amount_in: Decimal::from(100),
            amount_out: Decimal::from(95),
            dex: "UniswapV3".into(),
            timestamp: ts(1_700_000_000),
            profit: None,
            block_number: None,
        };
        assert!(trade.validate().is_ok());

        trade.profit = Some(Decimal::from(-20));
        assert!(trade.validate().is_ok());

        trade.amount_out = Decimal::from(-1);
        assert!(matches!(
            trade.validate(),
            Err(ValidationError::Negative { field: "amountOut", .. })
        ));

        trade.amount_out = Decimal::from(95);
        trade.dex = String::new();
        assert_eq!(trade.validate(), Err(ValidationError::Empty { field: "dex" }));
    }

    #[test]
    fn test_user_identity() {
        assert_eq!(User::default().validate(), Err(ValidationError::MissingIdentity));

        let by_fid = User {
            fid: Some(1),
            ..Default::default()
        };
        assert!(by_fid.validate().is_ok());

        let by_address = User {
            address: Some(ADDR.into()),
            ..Default::default()
        };
        assert!(by_address.validate().is_ok());

        let bad_address = User {
            address: Some("nope".into()),
            ..Default::default()
        };
        assert!(bad_address.validate().is_err());
    }

    #[test]
    fn test_pagination_params() {
        assert!(PaginationParams::new(1, 20).validate().is_ok());
        assert_eq!(
            PaginationParams::new(0, 20).validate(),
            Err(ValidationError::PageOutOfRange)
        );
        assert_eq!(
            PaginationParams::new(1, 0).validate(),
            Err(ValidationError::LimitOutOfRange)
        );
    }

    #[test]
    fn test_pagination_summary_has_more() {
        let ok = Pagination {
            total: 45,
            page: 2,
            limit: 20,
            has_more: true,
        };
        assert!(ok.validate().is_ok());

        let lying = Pagination {
            has_more: false,
            ..ok
        };
        assert!(matches!(
            lying.validate(),
            Err(ValidationError::HasMoreMismatch { .. })
        ));

        let last_page = Pagination {
            total: 45,
            page: 3,
            limit: 20,
            has_more: false,
        };
        assert!(last_page.validate().is_ok());
    }
}
