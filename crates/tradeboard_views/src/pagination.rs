//! Page arithmetic shared by every list.

/// Page sizes offered to the user.
pub const PAGE_SIZE_OPTIONS: [u32; 4] = [5, 10, 20, 50];

/// Default page size.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Current page of a list of `total` rows split into pages of `limit`.
///
/// Pages are 1-based. Navigation is clamped to `[1, total_pages]`; the page
/// number never leaves that range through this API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    limit: u32,
    total: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    /// First page of an empty list. A zero `limit` is treated as 1.
    #[must_use]
    pub fn new(limit: u32) -> Self {
        Self {
            page: 1,
            limit: limit.max(1),
            total: 0,
        }
    }

    /// Current page, 1-based.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Rows per page.
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Rows across all pages.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Records the row count reported by the last fetch, pulling the current
    /// page back onto the last one when the list shrank.
    pub fn set_total(&mut self, total: u64) {
        self.total = total;
        self.page = self.page.min(self.total_pages());
    }

    /// `max(1, ceil(total / limit))`.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        let pages = self.total.div_ceil(u64::from(self.limit)).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// 1-based index of the first row shown, `0` for an empty list.
    #[must_use]
    pub fn from(&self) -> u64 {
        if self.total == 0 {
            0
        } else {
            self.offset() + 1
        }
    }

    /// 1-based index of the last row shown.
    #[must_use]
    pub fn to(&self) -> u64 {
        (u64::from(self.page) * u64::from(self.limit)).min(self.total)
    }

    /// Rows skipped before the current page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }

    /// Whether a previous page exists.
    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Whether a next page exists.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Moves to `page`, clamped to the valid range.
    pub fn go_to(&mut self, page: u32) {
        self.page = page.clamp(1, self.total_pages());
    }

    /// Moves to the first page.
    pub fn first(&mut self) {
        self.page = 1;
    }

    /// Moves one page back, staying on the first.
    pub fn prev(&mut self) {
        self.go_to(self.page.saturating_sub(1));
    }

    /// Moves one page forward, staying on the last.
    pub fn next(&mut self) {
        self.go_to(self.page.saturating_add(1));
    }

    /// Moves to the last page.
    pub fn last(&mut self) {
        self.page = self.total_pages();
    }

    /// Changes the page size and returns to the first page.
    pub fn set_limit(&mut self, limit: u32) {
        self.limit = limit.max(1);
        self.page = 1;
    }

    /// Returns to the first page; used whenever a filter changes.
    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// The current page's rows of a list paginated client-side.
    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let len = items.len();
        let start = usize::try_from(self.offset()).unwrap_or(len).min(len);
        let end = start.saturating_add(self.limit as usize).min(len);
        &items[start..end]
    }
}
