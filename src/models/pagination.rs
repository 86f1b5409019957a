use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 20;

/// Requested page; `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationParams {
    pub page: u32,
    pub limit: u32,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PaginationParams {
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    /// Index of the first item on this page. Saturates instead of overflowing.
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize).saturating_mul(self.limit as usize)
    }
}

/// Pagination summary returned alongside a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub has_more: bool,
}

impl Pagination {
    pub fn new(params: PaginationParams, total: u64) -> Self {
        Self {
            total,
            page: params.page,
            limit: params.limit,
            has_more: has_more(params.page, params.limit, total),
        }
    }
}

/// `true` iff items remain after `page` pages of `limit` items.
pub fn has_more(page: u32, limit: u32, total: u64) -> bool {
    u64::from(page) * u64::from(limit) < total
}

/// Envelope every feed endpoint responds with.
///
/// When `success` is false the payload is a placeholder and `error` explains why;
/// use [`ApiResponse::into_result`] rather than reading `data` directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data,
            success: true,
            error: None,
            pagination: None,
        }
    }

    pub fn paginated(data: T, pagination: Pagination) -> Self {
        Self {
            data,
            success: true,
            error: None,
            pagination: Some(pagination),
        }
    }

    /// Unwrap the payload, refusing failed or self-contradictory envelopes.
    pub fn into_result(self) -> Result<(T, Option<Pagination>), EnvelopeError> {
        match (self.success, self.error) {
            (true, None) => Ok((self.data, self.pagination)),
            (true, Some(error)) => Err(EnvelopeError::Inconsistent(error)),
            (false, error) => Err(EnvelopeError::Failed(
                error.unwrap_or_else(|| "unknown upstream error".to_string()),
            )),
        }
    }
}

impl<T: Default> ApiResponse<T> {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            data: T::default(),
            success: false,
            error: Some(error.into()),
            pagination: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvelopeError {
    #[error("upstream reported failure: {0}")]
    Failed(String),

    #[error("envelope marked successful but carries an error: {0}")]
    Inconsistent(String),
}
