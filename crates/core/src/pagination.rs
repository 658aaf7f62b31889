//! Page/per-page clamping and page math for member-paginated reports.

// ---------------------------------------------------------------------------
// Defaults and limits
// ---------------------------------------------------------------------------

/// Page used when the caller passes none (or a non-positive one).
pub const DEFAULT_PAGE: i64 = 1;
/// Page size used when the caller passes none.
pub const DEFAULT_PER_PAGE: i64 = 10;
/// Smallest accepted page size.
pub const MIN_PER_PAGE: i64 = 1;
/// Largest accepted page size.
pub const MAX_PER_PAGE: i64 = 100;

/// Clamped pagination bounds for a report request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBounds {
    pub page: i64,
    pub per_page: i64,
}

impl PageBounds {
    /// Clamp raw query values: `page` to >= 1, `per_page` to `[1, 100]`.
    pub fn clamp(page: Option<i64>, per_page: Option<i64>) -> Self {
        let page = page.unwrap_or(DEFAULT_PAGE).max(DEFAULT_PAGE);
        let per_page = per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(MIN_PER_PAGE, MAX_PER_PAGE);
        Self { page, per_page }
    }

    /// Row offset of the first item on this page.
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.per_page
    }

    /// Number of pages needed for `total` rows (0 when there are none).
    pub fn total_pages(&self, total: i64) -> i64 {
        if total <= 0 {
            return 0;
        }
        (total + self.per_page - 1) / self.per_page
    }
}
