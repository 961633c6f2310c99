//! Pagination payloads.

use serde::{Deserialize, Serialize};

/// Pagination cursor state for a fetched list.
///
/// Always replaced wholesale when a list fetch completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Total number of records the server holds for the query.
    pub total: u64,
    /// Last page fetched.
    pub page: u32,
    /// Whether more pages are available.
    pub has_next: bool,
}

impl PageInfo {
    /// Creates page info.
    #[must_use]
    pub const fn new(total: u64, page: u32, has_next: bool) -> Self {
        Self {
            total,
            page,
            has_next,
        }
    }

    /// Returns a copy with `page` replaced.
    #[must_use]
    pub const fn with_page(self, page: u32) -> Self {
        Self { page, ..self }
    }

    /// Returns the page to request next, if any.
    #[must_use]
    pub const fn next_page(&self) -> Option<u32> {
        if self.has_next {
            Some(self.page.saturating_add(1))
        } else {
            None
        }
    }
}

impl Default for PageInfo {
    /// Nothing fetched yet; more may be available.
    fn default() -> Self {
        Self::new(0, 0, true)
    }
}

/// One page of records returned by a list fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<R> {
    /// Records on this page.
    pub items: Vec<R>,
    /// Cursor state after this page.
    pub page_info: PageInfo,
}

impl<R> Page<R> {
    /// Creates a page.
    #[must_use]
    pub const fn new(items: Vec<R>, page_info: PageInfo) -> Self {
        Self { items, page_info }
    }

    /// Returns the number of records on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the page holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_page_info_expects_more() {
        let info = PageInfo::default();
        assert_eq!(info.total, 0);
        assert_eq!(info.page, 0);
        assert!(info.has_next);
        assert_eq!(info.next_page(), Some(1));
    }

    #[test]
    fn test_next_page_none_when_exhausted() {
        assert_eq!(PageInfo::new(40, 2, false).next_page(), None);
    }

    #[test]
    fn test_with_page_keeps_other_fields() {
        let info = PageInfo::new(7, 0, false).with_page(1);
        assert_eq!(info, PageInfo::new(7, 1, false));
    }

    #[test]
    fn test_page_deserializes_camel_case() {
        let json = r#"{"items": [1, 2], "pageInfo": {"total": 2, "page": 0, "hasNext": true}}"#;
        let page: Page<u32> = serde_json::from_str(json).expect("parse page");
        assert_eq!(page.len(), 2);
        assert_eq!(page.page_info, PageInfo::new(2, 0, true));
    }
}
