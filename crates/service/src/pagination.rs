//! Pagination utilities for service layer
//!
//! Provides a simple `Pagination` struct and helpers to parse and apply
//! the `per_page`/`page` query parameters.

use crate::errors::ServiceError;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index
    pub page: i64,
    /// items per page; `<= 0` disables pagination
    pub per_page: i64,
}

impl Pagination {
    /// Parse raw query values. Absent or empty values fall back to the
    /// defaults; anything that is not an integer is rejected.
    pub fn parse(per_page: Option<&str>, page: Option<&str>) -> Result<Self, ServiceError> {
        let per_page = parse_param("per_page", per_page)?.unwrap_or(0);
        let page = parse_param("page", page)?.unwrap_or(1);
        Ok(Self { page, per_page })
    }

    pub fn is_paged(&self) -> bool {
        self.per_page > 0
    }

    /// Zero-based offset and limit, or `None` when pagination is off.
    /// A page below 1 is treated as the first page.
    pub fn normalize(self) -> Option<(usize, usize)> {
        if !self.is_paged() {
            return None;
        }
        let page = self.page.max(1);
        let offset = (page - 1).saturating_mul(self.per_page);
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(self.per_page).unwrap_or(usize::MAX);
        Some((offset, limit))
    }

    /// Cut the requested page out of `items`. Pages past the end are empty.
    pub fn apply<T>(self, items: Vec<T>) -> Vec<T> {
        match self.normalize() {
            None => items,
            Some((offset, limit)) => items.into_iter().skip(offset).take(limit).collect(),
        }
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, per_page: 0 } }
}

fn parse_param(name: &str, raw: Option<&str>) -> Result<Option<i64>, ServiceError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => v
            .parse::<i64>()
            .map(Some)
            .map_err(|_| ServiceError::InvalidQuery(format!("{name} must be an integer, got '{v}'"))),
    }
}
