/// The stable pagination contract
///
/// Listings take `page` (1-based) and `page_size` query parameters and
/// respond with `{ items, total, page, page_size }`. The total is always
/// the full matching row count, computed independently of the page window:
/// page 4 of 120 rows at 50 per page has no items but still reports 120.

use serde::{Deserialize, Serialize};

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    50
}

/// Pagination query parameters
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageParams {
    /// 1-based page number
    #[serde(default = "default_page")]
    pub page: u32,

    /// Rows per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl PageParams {
    /// The LIMIT for the page query
    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }

    /// The OFFSET for the page query: `(page - 1) * page_size`
    ///
    /// A page below 1 is treated as page 1.
    pub fn offset(&self) -> i64 {
        i64::from(self.page.max(1) - 1) * i64::from(self.page_size)
    }
}

/// One page of results plus the window-independent total
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    /// Rows in this page
    pub items: Vec<T>,

    /// Total matching rows, regardless of the page window
    pub total: i64,

    /// Echoed page number
    pub page: u32,

    /// Echoed page size
    pub page_size: u32,
}

impl<T> Paginated<T> {
    /// Wraps a page slice with its independent total
    pub fn new(items: Vec<T>, total: i64, params: &PageParams) -> Self {
        Self {
            items,
            total,
            page: params.page,
            page_size: params.page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = PageParams::default();
        assert_eq!(params.page, 1);
        assert_eq!(params.page_size, 50);
    }

    #[test]
    fn test_offset_math() {
        let params = PageParams { page: 1, page_size: 50 };
        assert_eq!(params.offset(), 0);
        assert_eq!(params.limit(), 50);

        let params = PageParams { page: 3, page_size: 50 };
        assert_eq!(params.offset(), 100);

        let params = PageParams { page: 4, page_size: 50 };
        assert_eq!(params.offset(), 150);
    }

    #[test]
    fn test_page_zero_is_page_one() {
        let params = PageParams { page: 0, page_size: 25 };
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_total_is_independent_of_window() {
        let params = PageParams { page: 4, page_size: 50 };
        let page: Paginated<u32> = Paginated::new(vec![], 120, &params);
        assert_eq!(page.total, 120);
        assert!(page.items.is_empty());
        assert_eq!(page.page, 4);
    }
}
