pub mod flow;
pub mod pagination;
pub mod trade;
pub mod user;
pub mod wallet;

pub use flow::{Flow, FlowDirection};
pub use pagination::{ApiResponse, EnvelopeError, Pagination, PaginationParams};
pub use trade::Trade;
pub use user::User;
pub use wallet::Wallet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// TimeRange
// ---------------------------------------------------------------------------

/// Aggregation / query window requested by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "1h")]
    OneHour,
    #[default]
    #[serde(rename = "24h")]
    OneDay,
    #[serde(rename = "7d")]
    SevenDays,
    #[serde(rename = "30d")]
    ThirtyDays,
}

impl TimeRange {
    pub const ALL: [TimeRange; 4] = [
        TimeRange::OneHour,
        TimeRange::OneDay,
        TimeRange::SevenDays,
        TimeRange::ThirtyDays,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::OneHour => "1h",
            TimeRange::OneDay => "24h",
            TimeRange::SevenDays => "7d",
            TimeRange::ThirtyDays => "30d",
        }
    }

    pub fn duration(&self) -> Duration {
        match self {
            TimeRange::OneHour => Duration::hours(1),
            TimeRange::OneDay => Duration::hours(24),
            TimeRange::SevenDays => Duration::days(7),
            TimeRange::ThirtyDays => Duration::days(30),
        }
    }

    /// Earliest timestamp (inclusive) that falls inside this window ending at `now`.
    pub fn window_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - self.duration()
    }

    pub fn contains(&self, ts: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        ts >= self.window_start(now) && ts <= now
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeRange::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown time range '{s}' (expected 1h, 24h, 7d or 30d)"))
    }
}

// ---------------------------------------------------------------------------
// SortDirection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// Orient an ascending comparison result.
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(format!("unknown sort direction '{s}' (expected asc or desc)")),
        }
    }
}

/// Shorten an address or hash for log lines: `0x1234ab…cdef`.
pub fn short_address(address: &str) -> String {
    if address.len() <= 12 || !address.is_ascii() {
        return address.to_string();
    }
    format!("{}…{}", &address[..8], &address[address.len() - 4..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_time_range_wire_values() {
        assert_eq!(serde_json::to_string(&TimeRange::OneHour).unwrap(), "\"1h\"");
        assert_eq!(serde_json::to_string(&TimeRange::ThirtyDays).unwrap(), "\"30d\"");

        let parsed: TimeRange = serde_json::from_str("\"7d\"").unwrap();
        assert_eq!(parsed, TimeRange::SevenDays);
        assert!(serde_json::from_str::<TimeRange>("\"90d\"").is_err());
    }

    #[test]
    fn test_time_range_from_str_and_default() {
        assert_eq!("24H".parse::<TimeRange>().unwrap(), TimeRange::OneDay);
        assert!("week".parse::<TimeRange>().is_err());
        assert_eq!(TimeRange::default(), TimeRange::OneDay);
    }

    #[test]
    fn test_time_range_window() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let range = TimeRange::OneHour;

        assert_eq!(range.window_start(now), now - Duration::hours(1));
        assert!(range.contains(now - Duration::minutes(59), now));
        assert!(range.contains(now - Duration::hours(1), now));
        assert!(!range.contains(now - Duration::minutes(61), now));
        assert!(!range.contains(now + Duration::seconds(1), now));
    }

    #[test]
    fn test_sort_direction() {
        assert_eq!(SortDirection::default(), SortDirection::Desc);
        assert_eq!(SortDirection::Asc.apply(1.cmp(&2)), Ordering::Less);
        assert_eq!(SortDirection::Desc.apply(1.cmp(&2)), Ordering::Greater);
        assert_eq!("ASC".parse::<SortDirection>().unwrap(), SortDirection::Asc);
        assert!("up".parse::<SortDirection>().is_err());
        assert_eq!(serde_json::to_string(&SortDirection::Desc).unwrap(), "\"desc\"");
    }

    #[test]
    fn test_short_address() {
        assert_eq!(short_address("0xABC"), "0xABC");
        assert_eq!(
            short_address("0x1234567890abcdef1234567890abcdef12345678"),
            "0x123456…5678"
        );
    }
}
