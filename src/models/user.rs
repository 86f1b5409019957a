use serde::{Deserialize, Serialize};

use super::short_address;

/// The person viewing the dashboard, from a social-identity login or a wallet connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fid: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pfp_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pfp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl User {
    pub fn display_name_or_fallback(&self) -> String {
        let non_blank = |s: &Option<String>| {
            s.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        non_blank(&self.display_name)
            .or_else(|| non_blank(&self.username))
            .or_else(|| self.address.as_deref().map(short_address))
            .or_else(|| self.fid.map(|fid| format!("fid:{fid}")))
            .unwrap_or_else(|| "anonymous".to_string())
    }
}
