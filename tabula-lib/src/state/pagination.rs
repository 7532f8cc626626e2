//! Pagination window of a table view.

use serde::Serialize;

use crate::error::QueryError;

/// Zero-based page index plus page size.
///
/// The page size is always at least 1. The page index is not bounded by the
/// data: a window past the last page is valid and resolves to an empty page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationState {
    page_index: usize,
    page_size: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: 10,
        }
    }
}

impl PaginationState {
    /// Creates a window. Fails when `page_size` is 0.
    pub fn new(page_index: usize, page_size: usize) -> Result<Self, QueryError> {
        if page_size < 1 {
            return Err(QueryError::InvalidLimit(page_size as i64));
        }
        Ok(Self {
            page_index,
            page_size,
        })
    }

    /// First page with the given size.
    pub fn first(page_size: usize) -> Result<Self, QueryError> {
        Self::new(0, page_size)
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// One-based page number, as used by [`Query`](crate::query::Query).
    pub fn page_number(&self) -> usize {
        self.page_index.saturating_add(1)
    }

    /// The following window.
    pub fn next(&self) -> Self {
        Self {
            page_index: self.page_index.saturating_add(1),
            ..*self
        }
    }

    /// The preceding window, stopping at the first page.
    pub fn previous(&self) -> Self {
        Self {
            page_index: self.page_index.saturating_sub(1),
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_page_size() {
        assert_eq!(PaginationState::new(0, 0), Err(QueryError::InvalidLimit(0)));
    }

    #[test]
    fn test_navigation() {
        let window = PaginationState::new(1, 20).unwrap();
        assert_eq!(window.page_number(), 2);
        assert_eq!(window.next().page_index(), 2);
        assert_eq!(window.previous().previous().page_index(), 0);
        assert_eq!(window.page_index(), 1);
    }

    #[test]
    fn test_last_index_does_not_overflow() {
        let window = PaginationState::new(usize::MAX, 10).unwrap();
        assert_eq!(window.next(), window);
        assert_eq!(window.page_number(), usize::MAX);
    }
}
