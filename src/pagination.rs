//! Pagination metadata for list responses.

use serde::{Deserialize, Serialize};

/// The raw paging fields of a list payload (`count` and `pageSize`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSeed {
    /// Total number of items across all pages.
    pub count: u64,
    /// Number of items per page.
    pub page_size: u32,
}

impl PageSeed {
    /// Builds a seed only when both fields are present.
    pub fn from_parts(count: Option<u64>, page_size: Option<u32>) -> Option<Self> {
        Some(Self {
            count: count?,
            page_size: page_size?,
        })
    }
}

/// Paging information attached to a list response.
///
/// `page` is always the page the caller asked for (1 when unspecified), never
/// a value taken from the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    /// The requested page, 1-based.
    pub page: u32,
    /// Number of items per page.
    pub page_size: u32,
    /// Total number of items.
    pub total_items: u64,
    /// Total number of pages.
    pub total_pages: u64,
}

impl Meta {
    /// Computes the metadata for a seed and the caller's requested page.
    ///
    /// # Examples
    ///
    /// ```
    /// use issuu_client::pagination::{Meta, PageSeed};
    ///
    /// let meta = Meta::resolve(PageSeed { count: 57, page_size: 20 }, None);
    /// assert_eq!(meta.page, 1);
    /// assert_eq!(meta.total_pages, 3);
    /// ```
    pub fn resolve(seed: PageSeed, requested_page: Option<u32>) -> Self {
        let total_pages = match seed.page_size {
            0 => 0,
            size => seed.count.div_ceil(u64::from(size)),
        };

        Self {
            page: requested_page.unwrap_or(1),
            page_size: seed.page_size,
            total_items: seed.count,
            total_pages,
        }
    }

    /// Returns `true` if pages follow the current one.
    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        let meta = Meta::resolve(PageSeed { count: 57, page_size: 20 }, Some(1));
        assert_eq!(meta.total_pages, 3);
    }

    #[test]
    fn test_exact_multiple_adds_no_page() {
        let meta = Meta::resolve(PageSeed { count: 40, page_size: 20 }, Some(1));
        assert_eq!(meta.total_pages, 2);
    }

    #[test]
    fn test_empty_list() {
        let meta = Meta::resolve(PageSeed { count: 0, page_size: 20 }, None);
        assert_eq!(meta.total_pages, 0);
        assert_eq!(meta.total_items, 0);
        assert!(!meta.has_next());
    }

    #[test]
    fn test_zero_page_size_does_not_divide() {
        let meta = Meta::resolve(PageSeed { count: 10, page_size: 0 }, None);
        assert_eq!(meta.total_pages, 0);
    }

    #[test]
    fn test_page_is_requested_page() {
        let meta = Meta::resolve(PageSeed { count: 100, page_size: 10 }, Some(4));
        assert_eq!(meta.page, 4);
        assert!(meta.has_next());

        let meta = Meta::resolve(PageSeed { count: 100, page_size: 10 }, None);
        assert_eq!(meta.page, 1);
    }

    #[test]
    fn test_seed_requires_both_fields() {
        assert_eq!(PageSeed::from_parts(Some(3), None), None);
        assert_eq!(PageSeed::from_parts(None, Some(10)), None);
        assert_eq!(
            PageSeed::from_parts(Some(3), Some(10)),
            Some(PageSeed { count: 3, page_size: 10 })
        );
    }
}
