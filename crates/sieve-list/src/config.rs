//! Host-facing tuning constants for the list controller.

use std::time::Duration;

/// Default number of items per page.
pub const PAGE_SIZE: usize = 15;
/// Default delay before a filter term is applied.
pub const FILTER_DELAY: Duration = Duration::from_millis(800);
/// Default cooldown before a page turn is applied.
pub const PAGE_DELAY: Duration = Duration::from_millis(200);

/// Configuration for a [`ListController`](crate::ListController).
///
/// Use [`Default`] and override what you need with the builder methods:
///
/// ```ignore
/// let config = ListConfig::default()
///     .with_page_size(25)
///     .with_filter_delay(Duration::from_millis(300));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListConfig {
    /// Items per page (minimum 1).
    pub page_size: usize,
    /// Debounce applied to filter terms; a newer term restarts it.
    pub filter_delay: Duration,
    /// Cooldown applied to page turns; turns requested meanwhile are dropped.
    pub page_delay: Duration,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
            filter_delay: FILTER_DELAY,
            page_delay: PAGE_DELAY,
        }
    }
}

impl ListConfig {
    /// Set the number of items per page.
    pub fn with_page_size(mut self, n: usize) -> Self {
        self.page_size = n.max(1);
        self
    }

    /// Set the filter debounce delay.
    pub fn with_filter_delay(mut self, delay: Duration) -> Self {
        self.filter_delay = delay;
        self
    }

    /// Set the page-turn cooldown.
    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }
}
