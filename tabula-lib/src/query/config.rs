//! Query-string configuration

/// Defaults and limits applied when parsing raw query strings.
///
/// Only the string boundary ([`QueryParams`](super::QueryParams)) consults
/// this config. Queries built directly through
/// [`QueryBuilder`](super::QueryBuilder) take their page and limit as given.
///
/// # Example
///
/// ```
/// use tabula_lib::query::QueryConfig;
///
/// let config = QueryConfig::default()
///     .with_default_limit(25)
///     .with_max_limit(200);
/// ```
#[derive(Debug, Clone)]
pub struct QueryConfig {
    /// Page used when the request does not name one.
    ///
    /// Default: 1
    pub default_page: i64,

    /// Page size used when the request does not name one.
    ///
    /// Default: 10
    pub default_limit: i64,

    /// Upper bound for requested page sizes. Larger requests are clamped.
    ///
    /// Default: 100
    pub max_limit: i64,

    /// Number of placeholder rows rendered while data is loading.
    ///
    /// Default: 10
    pub placeholder_count: usize,

    /// Separator between a sort field and its direction (`name:desc`).
    ///
    /// Default: ':'
    pub sort_separator: char,

    /// Separator between list items (`sort`, `fields`, `in` values).
    ///
    /// Default: ','
    pub list_separator: char,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_limit: 10,
            max_limit: 100,
            placeholder_count: 10,
            sort_separator: ':',
            list_separator: ',',
        }
    }
}

impl QueryConfig {
    /// Creates a new query config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default page.
    pub fn with_default_page(mut self, page: i64) -> Self {
        self.default_page = page;
        self
    }

    /// Sets the default page size.
    pub fn with_default_limit(mut self, limit: i64) -> Self {
        self.default_limit = limit;
        self
    }

    /// Sets the maximum page size.
    pub fn with_max_limit(mut self, limit: i64) -> Self {
        self.max_limit = limit;
        self
    }

    /// Sets the placeholder row count.
    pub fn with_placeholder_count(mut self, count: usize) -> Self {
        self.placeholder_count = count;
        self
    }

    /// Sets the sort separator.
    pub fn with_sort_separator(mut self, separator: char) -> Self {
        self.sort_separator = separator;
        self
    }

    /// Sets the list separator.
    pub fn with_list_separator(mut self, separator: char) -> Self {
        self.list_separator = separator;
        self
    }
}
