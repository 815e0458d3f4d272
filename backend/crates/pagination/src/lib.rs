//! Page-number pagination primitives shared by store adapters and the HTTP
//! layer.
//!
//! A [`PageQuery`] is either *windowed* (`page >= 1` and `per_page >= 1`) or
//! *unbounded* (any non-positive component). Unbounded queries return every
//! matching record. In both modes [`Page::total_count`] reports the full match
//! count, never the size of the returned slice.
//!
//! Adapters must sort records by a deterministic key before calling
//! [`Window::apply`]; windowed pages are only consistent slices of the
//! unbounded ordering when that ordering is total.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Page number used when a request omits `page`.
pub const DEFAULT_PAGE: i64 = 1;
/// Page size used when a request omits `per_page`.
pub const DEFAULT_PER_PAGE: i64 = 10;

const PAGE_PARAM: &str = "page";
const PER_PAGE_PARAM: &str = "per_page";
const PER_PAGE_ALIAS: &str = "perPage";

/// Errors raised while decoding a [`PageQuery`] from a URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageQueryError {
    /// A pagination parameter was present but not an integer.
    #[error("query parameter `{name}` must be an integer, got `{value}`")]
    InvalidNumber {
        /// Parameter name as it appeared in the URL.
        name: String,
        /// Raw parameter value.
        value: String,
    },
}

/// Requested page of a listing.
///
/// # Examples
/// ```
/// use pagination::{PageQuery, Window};
///
/// assert_eq!(PageQuery::new(2, 2).window(), Window::Range { skip: 2, limit: 2 });
/// assert_eq!(PageQuery::new(0, 10).window(), Window::Unbounded);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    /// One-based page number.
    #[serde(default = "default_page")]
    pub page: i64,
    /// Number of records per page.
    #[serde(default = "default_per_page", alias = "perPage")]
    pub per_page: i64,
}

const fn default_page() -> i64 {
    DEFAULT_PAGE
}

const fn default_per_page() -> i64 {
    DEFAULT_PER_PAGE
}

impl Default for PageQuery {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_PER_PAGE)
    }
}

impl PageQuery {
    /// Build a query from raw page and page-size values.
    #[must_use]
    pub const fn new(page: i64, per_page: i64) -> Self {
        Self { page, per_page }
    }

    /// Query requesting every record.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self::new(-1, -1)
    }

    /// Whether this query requests every record.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.page < 1 || self.per_page < 1
    }

    /// Resolve the skip/limit window this query selects.
    #[must_use]
    pub fn window(&self) -> Window {
        if self.is_unbounded() {
            return Window::Unbounded;
        }
        let limit = usize::try_from(self.per_page).unwrap_or(usize::MAX);
        let preceding = usize::try_from(self.page.saturating_sub(1)).unwrap_or(usize::MAX);
        Window::Range {
            skip: preceding.saturating_mul(limit),
            limit,
        }
    }

    /// Number of pages needed to cover `total` records.
    ///
    /// Unbounded queries always span a single page.
    #[must_use]
    pub fn page_count(&self, total: usize) -> usize {
        match self.window() {
            Window::Unbounded => 1,
            Window::Range { limit, .. } => total.div_ceil(limit),
        }
    }

    /// Decode `page` and `per_page` (or `perPage`) from a URL query string.
    ///
    /// Missing parameters fall back to [`DEFAULT_PAGE`] and
    /// [`DEFAULT_PER_PAGE`].
    ///
    /// # Examples
    /// ```
    /// use pagination::PageQuery;
    /// use url::Url;
    ///
    /// let url = Url::parse("https://example.test/rules?page=3&perPage=25").expect("url");
    /// let query = PageQuery::from_url(&url).expect("query");
    /// assert_eq!(query, PageQuery::new(3, 25));
    /// ```
    pub fn from_url(url: &Url) -> Result<Self, PageQueryError> {
        let mut query = Self::default();
        for (name, value) in url.query_pairs() {
            let target = match name.as_ref() {
                PAGE_PARAM => &mut query.page,
                PER_PAGE_PARAM | PER_PAGE_ALIAS => &mut query.per_page,
                _ => continue,
            };
            *target = value
                .trim()
                .parse()
                .map_err(|_| PageQueryError::InvalidNumber {
                    name: name.clone().into_owned(),
                    value: value.clone().into_owned(),
                })?;
        }
        Ok(query)
    }

    /// Replace any pagination parameters on `url` with this query.
    pub fn write_to(&self, url: &mut Url) {
        let retained: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(name, _)| !matches!(name.as_ref(), PAGE_PARAM | PER_PAGE_PARAM | PER_PAGE_ALIAS))
            .map(|(name, value)| (name.into_owned(), value.into_owned()))
            .collect();
        url.query_pairs_mut()
            .clear()
            .extend_pairs(retained)
            .append_pair(PAGE_PARAM, &self.page.to_string())
            .append_pair(PER_PAGE_PARAM, &self.per_page.to_string());
    }
}

/// Skip/limit selection derived from a [`PageQuery`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// Every record, no skip or limit.
    Unbounded,
    /// A contiguous slice of the full ordering.
    Range {
        /// Records to skip from the start of the ordering.
        skip: usize,
        /// Maximum number of records to return.
        limit: usize,
    },
}

impl Window {
    /// Select this window from an already ordered sequence.
    #[must_use]
    pub fn apply<T>(self, ordered: impl IntoIterator<Item = T>) -> Vec<T> {
        match self {
            Self::Unbounded => ordered.into_iter().collect(),
            Self::Range { skip, limit } => ordered.into_iter().skip(skip).take(limit).collect(),
        }
    }
}

/// One page of results together with the full match count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Records inside the requested window.
    pub items: Vec<T>,
    /// Number of records matching the listing, ignoring the window.
    pub total_count: usize,
}

impl<T> Page<T> {
    /// Paginate an ordered, complete result set.
    ///
    /// # Examples
    /// ```
    /// use pagination::{Page, PageQuery};
    ///
    /// let page = Page::from_ordered(vec![1, 2, 3, 4], PageQuery::new(2, 3));
    /// assert_eq!(page.items, vec![4]);
    /// assert_eq!(page.total_count, 4);
    /// ```
    #[must_use]
    pub fn from_ordered(ordered: Vec<T>, query: PageQuery) -> Self {
        let total_count = ordered.len();
        Self {
            items: query.window().apply(ordered),
            total_count,
        }
    }

    /// Page with no records.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
        }
    }

    /// Transform every record while keeping the total count.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
        }
    }
}
