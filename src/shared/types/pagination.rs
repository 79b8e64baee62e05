//! Offset pagination arithmetic

/// Page size used when the request does not specify one.
pub const DEFAULT_PER_PAGE: u64 = 10;

/// First page, used when the request does not specify one.
pub const DEFAULT_PAGE: u64 = 1;

/// Largest `LIMIT`/`OFFSET` a SQL backend accepts; both bind as signed 64-bit.
pub const MAX_WINDOW: u64 = i64::MAX as u64;

/// Requested page window, as validated from the query string.
///
/// Both values are `>= 1` when present; zero and negative values are
/// rejected by query validation before they get here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

impl PageRequest {
    pub fn new(page: Option<u64>, per_page: Option<u64>) -> Self {
        Self { page, per_page }
    }
}

/// Resolved `LIMIT` / `OFFSET` pair handed to the persistence layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: u64,
    pub offset: u64,
}

impl Pagination {
    /// Resolve a page request against a default page size.
    ///
    /// `offset = (page - 1) * limit`. No page size cap is applied here, but
    /// both values are clamped to [`MAX_WINDOW`]; an offset past it lands
    /// beyond every row and yields an empty page.
    pub fn resolve(request: PageRequest, default_per_page: u64) -> Self {
        let limit = request.per_page.unwrap_or(default_per_page).min(MAX_WINDOW);
        let page = request.page.unwrap_or(DEFAULT_PAGE);
        let offset = page
            .saturating_sub(1)
            .checked_mul(limit)
            .map_or(MAX_WINDOW, |offset| offset.min(MAX_WINDOW));
        Self { limit, offset }
    }
}

impl From<PageRequest> for Pagination {
    fn from(request: PageRequest) -> Self {
        Self::resolve(request, DEFAULT_PER_PAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page_of_ten() {
        let p = Pagination::from(PageRequest::default());
        assert_eq!(p, Pagination { limit: 10, offset: 0 });
    }

    #[test]
    fn third_page_skips_two_pages() {
        let p = Pagination::from(PageRequest::new(Some(3), Some(10)));
        assert_eq!(p.offset, 20);
        assert_eq!(p.limit, 10);
    }

    #[test]
    fn page_without_size_uses_default_size() {
        let p = Pagination::resolve(PageRequest::new(Some(2), None), 25);
        assert_eq!(p, Pagination { limit: 25, offset: 25 });
    }

    #[test]
    fn large_page_size_is_not_capped() {
        let p = Pagination::from(PageRequest::new(None, Some(5_000)));
        assert_eq!(p, Pagination { limit: 5_000, offset: 0 });
    }

    #[test]
    fn window_never_exceeds_signed_range() {
        let p = Pagination::from(PageRequest::new(Some(10_000_000_000_000_000_000), Some(10)));
        assert_eq!(p, Pagination { limit: 10, offset: MAX_WINDOW });

        let p = Pagination::from(PageRequest::new(Some(2), Some(u64::MAX)));
        assert_eq!(p, Pagination { limit: MAX_WINDOW, offset: MAX_WINDOW });

        let p = Pagination::from(PageRequest::new(Some(4), Some(MAX_WINDOW / 2)));
        assert_eq!(p.offset, MAX_WINDOW);
    }
}
