//! Fixed-size pagination primitives shared by listing endpoints.
//!
//! Every listing operation in the backend pages through results in fixed
//! windows of [`PAGE_SIZE`] items. Pages are 1-based; the envelope reports
//! `total_pages = ceil(total_results / PAGE_SIZE)` so clients can render
//! pagers without a second round trip.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of items returned per page by every listing operation.
pub const PAGE_SIZE: u32 = 25;

/// Validation errors raised when constructing a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageError {
    /// Pages are 1-based; page zero is not addressable.
    #[error("page numbers start at 1")]
    ZeroPage,
}

/// A validated, 1-based page number.
///
/// # Examples
/// ```
/// use pagination::PageRequest;
///
/// let page = PageRequest::new(2).expect("valid page");
/// assert_eq!(page.offset(), 25);
/// assert_eq!(page.limit(), 25);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageRequest(u32);

impl PageRequest {
    /// Construct a page request, rejecting page zero.
    pub const fn new(page: u32) -> Result<Self, PageError> {
        if page == 0 {
            return Err(PageError::ZeroPage);
        }
        Ok(Self(page))
    }

    /// The first page.
    #[must_use]
    pub const fn first() -> Self {
        Self(1)
    }

    /// 1-based page number.
    #[must_use]
    pub const fn number(self) -> u32 {
        self.0
    }

    /// Number of rows to skip for this page.
    #[must_use]
    pub const fn offset(self) -> i64 {
        ((self.0 - 1) as i64) * (PAGE_SIZE as i64)
    }

    /// Number of rows to fetch for this page.
    #[must_use]
    pub const fn limit(self) -> i64 {
        PAGE_SIZE as i64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// Compute the total page count for a result set.
///
/// # Examples
/// ```
/// use pagination::total_pages;
///
/// assert_eq!(total_pages(0), 0);
/// assert_eq!(total_pages(26), 2);
/// ```
#[must_use]
pub const fn total_pages(total_results: u64) -> u32 {
    (total_results.div_ceil(PAGE_SIZE as u64)) as u32
}

/// One page of results plus the totals clients need to paginate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub results: Vec<T>,
    pub total_results: u64,
    pub total_pages: u32,
}

impl<T> Paginated<T> {
    /// Build a page envelope from one window of results and the total count.
    #[must_use]
    pub fn new(results: Vec<T>, total_results: u64) -> Self {
        Self {
            results,
            total_results,
            total_pages: total_pages(total_results),
        }
    }

    /// Map the page contents while keeping the totals.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            results: self.results.into_iter().map(f).collect(),
            total_results: self.total_results,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn page_zero_is_rejected() {
        assert_eq!(PageRequest::new(0), Err(PageError::ZeroPage));
    }

    #[rstest]
    #[case(1, 0)]
    #[case(2, 25)]
    #[case(5, 100)]
    fn offsets_follow_fixed_page_size(#[case] page: u32, #[case] offset: i64) {
        let request = PageRequest::new(page).expect("valid page");
        assert_eq!(request.offset(), offset);
        assert_eq!(request.limit(), i64::from(PAGE_SIZE));
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(25, 1)]
    #[case(26, 2)]
    #[case(50, 2)]
    fn total_pages_is_ceiling_division(#[case] total: u64, #[case] pages: u32) {
        assert_eq!(total_pages(total), pages);
    }

    #[rstest]
    fn paginated_envelope_carries_totals() {
        let page = Paginated::new(vec![1, 2, 3], 51);
        assert_eq!(page.total_pages, 3);
        let mapped = page.map(|n| n * 10);
        assert_eq!(mapped.results, vec![10, 20, 30]);
        assert_eq!(mapped.total_results, 51);
    }
}
