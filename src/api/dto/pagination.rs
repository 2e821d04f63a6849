//! Pagination query parameters.

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};

use crate::domain::repositories::PageRequest;

/// Fixed number of items per page on public listings.
pub const PAGE_SIZE: u32 = 10;

/// Pagination query parameters.
///
/// Uses `serde_with` to parse page numbers from query strings as integers.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,
}

impl PaginationParams {
    /// Validates the page number and converts it to a skip/limit window.
    ///
    /// # Defaults
    ///
    /// - `page`: 1
    ///
    /// # Returns
    ///
    /// The resolved page number and its window.
    pub fn validate_and_get_window(&self) -> Result<(u32, PageRequest), String> {
        let page = self.page.unwrap_or(1);

        if page == 0 {
            return Err("Page must be greater than 0".to_string());
        }

        let window = PageRequest {
            skip: i64::from(page - 1) * i64::from(PAGE_SIZE),
            limit: i64::from(PAGE_SIZE),
        };

        Ok((page, window))
    }
}

/// Next page number, or `None` when the current page reaches the end.
pub fn next_page(page: u32, window: PageRequest, returned: usize, total: i64) -> Option<u32> {
    if window.skip + (returned as i64) < total {
        Some(page + 1)
    } else {
        None
    }
}
