//! Fixed-size page arithmetic over an ordered list.

use std::ops::Range;

/// Page position over a list of known length.
///
/// The page index is never clamped: turning past the last page is allowed
/// and simply yields an empty window. Callers gate navigation with
/// [`has_previous`](Paginator::has_previous) and
/// [`has_next`](Paginator::has_next).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page: usize,
    per_page: usize,
}

impl Paginator {
    /// Create a paginator on the first page. `per_page` is at least 1.
    pub fn new(per_page: usize) -> Self {
        Self {
            page: 0,
            per_page: per_page.max(1),
        }
    }

    /// Current page (zero-indexed).
    pub fn page(&self) -> usize {
        self.page
    }

    /// Number of items per page.
    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Jump to a page. Out-of-range pages are kept as-is.
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Move by a signed number of pages. Moving before the first page stops at 0.
    pub fn turn(&mut self, offset: isize) {
        self.page = self.page.saturating_add_signed(offset);
    }

    /// Whether a previous page exists.
    pub fn has_previous(&self) -> bool {
        self.page >= 1
    }

    /// Whether items exist beyond the current page.
    pub fn has_next(&self, total: usize) -> bool {
        (self.page + 1).saturating_mul(self.per_page) < total
    }

    /// Index range of the current page, clipped to `total`.
    pub fn bounds(&self, total: usize) -> Range<usize> {
        let start = self.page.saturating_mul(self.per_page).min(total);
        let end = start.saturating_add(self.per_page).min(total);
        start..end
    }

    /// The slice of `items` that belongs to the current page.
    pub fn window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.bounds(items.len())]
    }

    /// 1-based inclusive range label such as `"(16-20)"`.
    ///
    /// `window_len` is the number of items actually shown; it may exceed
    /// `per_page` when an extra item is pinned, in which case the label still
    /// ends at the page boundary. An empty window yields a reversed range
    /// such as `"(1-0)"`.
    pub fn range_label(&self, window_len: usize) -> String {
        let start = self.page.saturating_mul(self.per_page) + 1;
        let end = (self.page + 1)
            .saturating_mul(self.per_page)
            .min((start + window_len).saturating_sub(1));
        format!("({start}-{end})")
    }
}
