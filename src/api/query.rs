use serde::Deserialize;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::{PaginationParams, SortDirection, TimeRange};
use crate::store::ListQuery;
use crate::validation::Validate;

/// Raw listing query string. Enumerations arrive as plain strings so that bad
/// values are reported in the standard error envelope.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub range: Option<String>,
    pub sort: Option<String>,
    pub direction: Option<String>,
    pub tag: Option<String>,
}

impl ListParams {
    /// Apply defaults, cap `limit` at the configured maximum and validate.
    pub fn into_query(self, config: &AppConfig) -> Result<ListQuery, AppError> {
        let pagination = PaginationParams::new(
            self.page.unwrap_or(1),
            self.limit
                .unwrap_or(config.default_page_limit)
                .min(config.max_page_limit),
        );
        pagination.validate()?;

        let range = self
            .range
            .as_deref()
            .map(str::parse::<TimeRange>)
            .transpose()
            .map_err(AppError::BadRequest)?;

        let direction = self
            .direction
            .as_deref()
            .map(str::parse::<SortDirection>)
            .transpose()
            .map_err(AppError::BadRequest)?
            .unwrap_or_default();

        Ok(ListQuery {
            pagination,
            range,
            sort: self.sort.filter(|s| !s.trim().is_empty()),
            direction,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let query = ListParams::default().into_query(&AppConfig::default()).unwrap();
        assert_eq!(query.pagination, PaginationParams::new(1, 20));
        assert_eq!(query.range, None);
        assert_eq!(query.direction, SortDirection::Desc);
        assert_eq!(query.sort, None);
    }

    #[test]
    fn test_limit_is_capped() {
        let params = ListParams {
            limit: Some(10_000),
            ..Default::default()
        };
        let query = params.into_query(&AppConfig::default()).unwrap();
        assert_eq!(query.pagination.limit, 100);
    }

    #[test]
    fn test_zero_page_or_limit_rejected() {
        let zero_page = ListParams {
            page: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            zero_page.into_query(&AppConfig::default()),
            Err(AppError::BadRequest(_))
        ));

        let zero_limit = ListParams {
            limit: Some(0),
            ..Default::default()
        };
        assert!(zero_limit.into_query(&AppConfig::default()).is_err());
    }

    #[test]
    fn test_enumerations_parsed() {
        let params = ListParams {
            range: Some("7d".into()),
            direction: Some("asc".into()),
            sort: Some("value".into()),
            ..Default::default()
        };
        let query = params.into_query(&AppConfig::default()).unwrap();
        assert_eq!(query.range, Some(TimeRange::SevenDays));
        assert_eq!(query.direction, SortDirection::Asc);
        assert_eq!(query.sort.as_deref(), Some("value"));

        let bad = ListParams {
            range: Some("1y".into()),
            ..Default::default()
        };
        assert!(bad.into_query(&AppConfig::default()).is_err());
    }
}
