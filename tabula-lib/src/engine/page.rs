//! Page type for paginated results.

use log::debug;
use serde::Serialize;

/// A page of rows with pagination information.
///
/// `total` counts the rows that passed filtering, before pagination. A page
/// past the end is valid: it has no rows but still reports `total` and
/// `total_pages`.
///
/// Serializes with camelCase keys (`data`, `total`, `page`, `limit`,
/// `totalPages`, `hasNextPage`, `hasPreviousPage`).
///
/// # Example
///
/// ```
/// use tabula_lib::engine::paginate;
///
/// let rows: Vec<u32> = (1..=25).collect();
/// let page = paginate(rows, 3, 10);
///
/// assert_eq!(page.data(), &[21, 22, 23, 24, 25]);
/// assert_eq!(page.total_pages(), 3);
/// assert!(!page.has_next_page());
/// assert!(page.has_previous_page());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    data: Vec<T>,
    total: usize,
    page: usize,
    limit: usize,
    total_pages: usize,
    has_next_page: bool,
    has_previous_page: bool,
}

impl<T> Page<T> {
    /// Returns the rows in this page.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Consumes the page and returns the rows.
    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// Number of rows that matched, across all pages.
    pub fn total(&self) -> usize {
        self.total
    }

    /// One-based page number.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// `ceil(total / limit)`; 0 when nothing matched.
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn has_next_page(&self) -> bool {
        self.has_next_page
    }

    pub fn has_previous_page(&self) -> bool {
        self.has_previous_page
    }

    /// Returns `true` if this page has no rows.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of rows in this page.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Maps every row, keeping the pagination information.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
            has_next_page: self.has_next_page,
            has_previous_page: self.has_previous_page,
        }
    }
}

impl<T: Clone> Page<&T> {
    /// Clones the borrowed rows into an owned page.
    pub fn cloned(self) -> Page<T> {
        self.map(T::clone)
    }
}

/// Number of pages needed for `total` rows at `limit` rows per page.
pub fn total_pages(total: usize, limit: usize) -> usize {
    if limit == 0 { 0 } else { total.div_ceil(limit) }
}

/// Slices an already filtered and sorted collection into one page.
///
/// `page` is one-based. Pages past the end yield no rows without error.
/// `page` and `limit` are expected to be at least 1; a [`Query`](crate::query::Query)
/// guarantees this.
pub fn paginate<T>(rows: Vec<T>, page: usize, limit: usize) -> Page<T> {
    let total = rows.len();
    let total_pages = total_pages(total, limit);
    let start = page.saturating_sub(1).saturating_mul(limit);

    let data: Vec<T> = if start >= total {
        if total > 0 {
            debug!("Page {} is past the last page ({}), returning no rows", page, total_pages);
        }
        Vec::new()
    } else {
        rows.into_iter().skip(start).take(limit).collect()
    };

    Page {
        data,
        total,
        page,
        limit,
        total_pages,
        has_next_page: page < total_pages,
        has_previous_page: page > 1,
    }
}
