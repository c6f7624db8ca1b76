//! The list controller: sorted source, debounced fuzzy filter, pinned
//! current item and a paginated visible window.

use crate::config::ListConfig;
use crate::fuzzy::fuzzy_filter;
use crate::item::Item;
use crate::order;
use crate::paginator::Paginator;
use crate::pin::{pin, pinned};
use crate::task::{DebouncedTask, Ticket};
use sieve_core::{Command, Component};
use std::sync::Arc;
use tracing::{debug, trace};

/// Messages handled by [`ListController`].
///
/// The first four are sent by the host. The `*Elapsed` variants are produced
/// by the controller's own debounce timers and carry an opaque [`Ticket`], so
/// they cannot be forged from outside.
#[derive(Debug)]
pub enum Message<I: Item> {
    /// The source collection changed; carries the full new collection.
    SourceChanged(Vec<Arc<I>>),
    /// The externally selected item changed.
    CurrentChanged(Option<Arc<I>>),
    /// Filter by a new term after the filter delay.
    SetFilter(String),
    /// Move by a signed number of pages after the page delay.
    TurnPage(isize),
    /// A filter delay elapsed.
    FilterElapsed { ticket: Ticket, term: String },
    /// A page-turn delay elapsed.
    PageElapsed { ticket: Ticket, offset: isize },
}

/// Derives a sorted, filtered and paginated view of a source collection.
///
/// The controller is the only writer of its derived lists. Every list is
/// rebuilt from the source on recomputation; only the current item is ever
/// appended in place (see [`on_current_item_changed`]).
///
/// | List | Contents |
/// |------|----------|
/// | [`sorted`] | the source, ordered by identifier |
/// | [`filtered`] | `sorted` items matching the committed term |
/// | [`active_items`] | `filtered` with the current item pinned |
/// | [`visible`] | the current page of `active_items`, with the current item pinned |
///
/// [`on_current_item_changed`]: ListController::on_current_item_changed
/// [`sorted`]: ListController::sorted
/// [`filtered`]: ListController::filtered
/// [`active_items`]: ListController::active_items
/// [`visible`]: ListController::visible
pub struct ListController<I: Item> {
    config: ListConfig,
    source: Vec<Arc<I>>,
    sorted: Vec<Arc<I>>,
    filtered: Vec<Arc<I>>,
    active: Vec<Arc<I>>,
    visible: Vec<Arc<I>>,
    current: Option<Arc<I>>,
    filter_term: String,
    pending_term: String,
    paginator: Paginator,
    filter_task: DebouncedTask,
    page_task: DebouncedTask,
}

impl<I: Item> ListController<I> {
    /// Create an empty controller.
    pub fn new(config: ListConfig) -> Self {
        Self {
            config,
            source: Vec::new(),
            sorted: Vec::new(),
            filtered: Vec::new(),
            active: Vec::new(),
            visible: Vec::new(),
            current: None,
            filter_term: String::new(),
            pending_term: String::new(),
            paginator: Paginator::new(config.page_size),
            filter_task: DebouncedTask::restartable(config.filter_delay),
            page_task: DebouncedTask::exclusive(config.page_delay),
        }
    }

    /// Create a controller over an initial collection.
    pub fn with_items(config: ListConfig, items: Vec<Arc<I>>) -> Self {
        let mut list = Self::new(config);
        list.on_source_changed(items);
        list
    }

    // --- Host operations ---

    /// Replace the source collection and rebuild every derived list.
    ///
    /// The committed filter term is re-applied immediately and the page index
    /// is kept, even if it now lies past the end.
    pub fn on_source_changed(&mut self, items: Vec<Arc<I>>) {
        self.source = items;
        self.sorted = order::sorted(&self.source);
        self.rebuild();
        debug!(
            items = self.source.len(),
            matches = self.filtered.len(),
            page = self.paginator.page(),
            "source changed"
        );
    }

    /// Set the current item and pin it into the active list and the visible
    /// window.
    ///
    /// Pinning is additive: a previously pinned item stays until the next
    /// full rebuild.
    pub fn on_current_item_changed(&mut self, current: Option<Arc<I>>) {
        self.current = current;
        pin(&mut self.active, self.current.as_ref());
        pin(&mut self.visible, self.current.as_ref());
        trace!(
            current = self.current.as_deref().map(|item| item.id()),
            "current item changed"
        );
    }

    /// Request filtering by `term`.
    ///
    /// The filter applies after the filter delay. A newer term requested
    /// meanwhile supersedes this one, which then never applies.
    pub fn set_filter_term(&mut self, term: impl Into<String>) -> Command<Message<I>> {
        let term = term.into();
        self.pending_term.clone_from(&term);
        self.filter_task
            .schedule(move |ticket| Message::FilterElapsed { ticket, term })
    }

    /// Request a page turn by `offset` pages.
    ///
    /// The turn applies after the page delay. Turns requested while one is
    /// pending are dropped.
    pub fn turn_page(&mut self, offset: isize) -> Command<Message<I>> {
        self.page_task
            .schedule(move |ticket| Message::PageElapsed { ticket, offset })
    }

    // --- Queries ---

    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    /// Number of items in the source collection.
    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Whether the source holds more than one page of items.
    pub fn is_large(&self) -> bool {
        self.source.len() > self.paginator.per_page()
    }

    pub fn current(&self) -> Option<&Arc<I>> {
        self.current.as_ref()
    }

    pub fn has_current(&self) -> bool {
        self.current.is_some()
    }

    /// The term the filtered list currently reflects.
    pub fn filter_term(&self) -> &str {
        &self.filter_term
    }

    /// The most recently requested term, applied or not.
    pub fn pending_term(&self) -> &str {
        &self.pending_term
    }

    pub fn sorted(&self) -> &[Arc<I>] {
        &self.sorted
    }

    /// Items matching the committed term, without pinning.
    pub fn filtered(&self) -> &[Arc<I>] {
        &self.filtered
    }

    /// Items matching the committed term, with the current item pinned.
    pub fn active_items(&self) -> &[Arc<I>] {
        &self.active
    }

    /// The current page, with the current item pinned.
    pub fn visible(&self) -> &[Arc<I>] {
        &self.visible
    }

    /// Zero-based page index.
    pub fn page(&self) -> usize {
        self.paginator.page()
    }

    pub fn has_previous(&self) -> bool {
        self.paginator.has_previous()
    }

    pub fn has_next(&self) -> bool {
        self.paginator.has_next(self.active.len())
    }

    /// Label such as `"(16-20)"`; empty while a current item is set.
    pub fn range_label(&self) -> String {
        if self.current.is_some() {
            return String::new();
        }
        self.paginator.range_label(self.visible.len())
    }

    /// Whether a filter or a page turn is pending.
    pub fn is_filtering(&self) -> bool {
        self.filter_task.is_busy() || self.page_task.is_busy()
    }

    // --- Internals ---

    fn apply_filter(&mut self, ticket: Ticket, term: String) {
        if !self.filter_task.resume(ticket) {
            return;
        }
        // A page turn requested against the old results no longer applies.
        self.page_task.cancel();
        self.filter_term = term;
        self.paginator.set_page(0);
        self.rebuild();
        self.filter_task.finish(ticket);
        debug!(
            term = %self.filter_term,
            matches = self.filtered.len(),
            "filter applied"
        );
    }

    fn apply_page_turn(&mut self, ticket: Ticket, offset: isize) {
        if !self.page_task.resume(ticket) {
            return;
        }
        self.paginator.turn(offset);
        self.refresh_window();
        self.page_task.finish(ticket);
        debug!(
            offset,
            page = self.paginator.page(),
            visible = self.visible.len(),
            "page turned"
        );
    }

    fn rebuild(&mut self) {
        self.filtered = fuzzy_filter(&self.sorted, &self.filter_term);
        self.active = pinned(self.filtered.clone(), self.current.as_ref());
        self.refresh_window();
    }

    fn refresh_window(&mut self) {
        let window = self.paginator.window(&self.active).to_vec();
        self.visible = pinned(window, self.current.as_ref());
    }
}

impl<I: Item> Default for ListController<I> {
    fn default() -> Self {
        Self::new(ListConfig::default())
    }
}

impl<I: Item> std::fmt::Debug for ListController<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListController")
            .field("items", &self.source.len())
            .field("filter_term", &self.filter_term)
            .field("page", &self.paginator.page())
            .field("visible", &self.visible.len())
            .field("filtering", &self.is_filtering())
            .finish()
    }
}

impl<I: Item> Component for ListController<I> {
    type Message = Message<I>;

    fn update(&mut self, msg: Message<I>) -> Command<Message<I>> {
        match msg {
            Message::SourceChanged(items) => self.on_source_changed(items),
            Message::CurrentChanged(current) => self.on_current_item_changed(current),
            Message::SetFilter(term) => return self.set_filter_term(term),
            Message::TurnPage(offset) => return self.turn_page(offset),
            Message::FilterElapsed { ticket, term } => self.apply_filter(ticket, term),
            Message::PageElapsed { ticket, offset } => self.apply_page_turn(ticket, offset),
        }
        Command::none()
    }

    fn busy(&self) -> bool {
        self.is_filtering()
    }
}
