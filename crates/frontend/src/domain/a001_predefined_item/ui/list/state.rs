use leptos::prelude::*;

/// Render phase of the listing area. A failed load collapses to `Empty`
/// like a zero-row result; the failure itself is surfaced as a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPhase {
    Idle,
    Loading,
    Populated,
    Empty,
}

/// View state of the items page. Owned by the list component inside an
/// `RwSignal`; all mutations go through these methods.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemListState {
    pub phase: ListPhase,

    // pagination
    pub page: u32,
    pub total_pages: u32,
    pub total_count: u64,

    // filters
    pub search: String,
    pub category: String,
    /// Distinct categories feeding the filter dropdown.
    pub categories: Vec<String>,

    // newest issued load ticket; stale responses must not write state
    request_seq: u64,
}

impl Default for ItemListState {
    fn default() -> Self {
        Self {
            phase: ListPhase::Idle,
            page: 0,
            total_pages: 0,
            total_count: 0,
            search: String::new(),
            category: String::new(),
            categories: Vec::new(),
            request_seq: 0,
        }
    }
}

impl ItemListState {
    /// Issue a ticket for a new list request and enter `Loading`. The
    /// response must present the same ticket to be allowed to write results.
    pub fn begin_load(&mut self) -> u64 {
        self.request_seq += 1;
        self.phase = ListPhase::Loading;
        self.request_seq
    }

    /// True while `ticket` identifies the newest issued request.
    pub fn is_current(&self, ticket: u64) -> bool {
        self.request_seq == ticket
    }

    /// Apply a successful page response. Returns false (and changes nothing)
    /// when a newer request has been issued since `ticket`.
    pub fn apply_page(
        &mut self,
        ticket: u64,
        current_page: u32,
        total_pages: u32,
        total_count: u64,
        has_rows: bool,
    ) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.page = current_page;
        self.total_pages = total_pages;
        self.total_count = total_count;
        self.phase = if has_rows {
            ListPhase::Populated
        } else {
            ListPhase::Empty
        };
        true
    }

    /// Record a failed load. Returns false when `ticket` is stale.
    pub fn fail_load(&mut self, ticket: u64) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.phase = ListPhase::Empty;
        true
    }

    /// Search changes always restart from the first page.
    pub fn set_search(&mut self, search: String) {
        self.search = search;
        self.page = 0;
    }

    /// Category changes always restart from the first page.
    pub fn set_category(&mut self, category: String) {
        self.category = category;
        self.page = 0;
    }

    pub fn clear_filters(&mut self) {
        self.search.clear();
        self.category.clear();
        self.page = 0;
    }

    /// Clamp a requested page to the range reachable through the controls.
    pub fn goto_page(&mut self, page: u32) {
        self.page = page.min(self.total_pages.saturating_sub(1));
    }
}

pub fn create_state() -> RwSignal<ItemListState> {
    RwSignal::new(ItemListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_change_resets_page() {
        let mut state = ItemListState {
            page: 4,
            ..Default::default()
        };
        state.set_search("nails".to_string());
        assert_eq!(state.page, 0);
        assert_eq!(state.search, "nails");
    }

    #[test]
    fn category_change_resets_page() {
        let mut state = ItemListState {
            page: 2,
            ..Default::default()
        };
        state.set_category("Hardware".to_string());
        assert_eq!(state.page, 0);
        assert_eq!(state.category, "Hardware");
    }

    #[test]
    fn clear_filters_resets_everything_but_categories() {
        let mut state = ItemListState {
            page: 3,
            search: "x".to_string(),
            category: "y".to_string(),
            categories: vec!["y".to_string()],
            ..Default::default()
        };
        state.clear_filters();
        assert_eq!(state.page, 0);
        assert!(state.search.is_empty() && state.category.is_empty());
        assert_eq!(state.categories, vec!["y".to_string()]);
    }

    #[test]
    fn goto_page_clamps_to_last_page() {
        let mut state = ItemListState {
            total_pages: 3,
            ..Default::default()
        };
        state.goto_page(7);
        assert_eq!(state.page, 2);
        state.goto_page(0);
        assert_eq!(state.page, 0);

        // no pages at all: stay on page 0
        let mut empty = ItemListState::default();
        empty.goto_page(5);
        assert_eq!(empty.page, 0);
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut state = ItemListState::default();
        let first = state.begin_load();
        let second = state.begin_load();

        // slow first response arrives after the second request was issued
        assert!(!state.apply_page(first, 0, 9, 180, true));
        assert_eq!(state.phase, ListPhase::Loading);

        assert!(state.apply_page(second, 1, 2, 25, true));
        assert_eq!(state.phase, ListPhase::Populated);
        assert_eq!((state.page, state.total_pages), (1, 2));
    }

    #[test]
    fn stale_failure_is_discarded_too() {
        let mut state = ItemListState::default();
        let first = state.begin_load();
        let second = state.begin_load();
        assert!(!state.fail_load(first));
        assert!(state.apply_page(second, 0, 1, 3, true));
        assert_eq!(state.phase, ListPhase::Populated);
    }

    #[test]
    fn empty_result_lands_in_empty_phase() {
        let mut state = ItemListState::default();
        let ticket = state.begin_load();
        assert!(state.apply_page(ticket, 0, 0, 0, false));
        assert_eq!(state.phase, ListPhase::Empty);
    }
}
