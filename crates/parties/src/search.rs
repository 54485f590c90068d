//! Customer autocomplete state machine.
//!
//! `CustomerSearch` knows nothing about clocks or sockets. The driver feeds it
//! events (keystrokes, debounce expiry, search results, selection, focus) and
//! performs the effects it asks for: arm a debounce timer for a
//! [`DebounceTicket`], issue the network call described by a
//! [`SearchRequest`].
//!
//! Ordering guarantees do not rely on timing. Every issued request carries a
//! sequence number and only the latest one may touch the suggestion list.

use crate::customer::Customer;

/// Queries shorter than this (after trimming) never hit the backend.
pub const DEFAULT_MIN_QUERY_CHARS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// Nothing typed yet.
    Idle,
    /// A keystroke armed the debounce timer.
    Debouncing,
    /// A search request is in flight.
    Searching,
    /// The dropdown is open (possibly with zero rows).
    ShowingSuggestions,
    /// The dropdown is hidden; suggestions may be retained.
    Closed,
}

/// Identifies one arming of the debounce timer. Only the newest ticket fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket(u64);

/// A search the driver should send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub seq: u64,
    pub query: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// Arm (or re-arm) the debounce timer with this ticket.
    Debounce(DebounceTicket),
    /// Input was emptied; suggestions are already cleared, nothing to schedule.
    Cleared,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKey {
    Enter,
    Escape,
}

#[derive(Debug, Clone)]
pub struct CustomerSearch {
    min_chars: usize,
    query: String,
    suggestions: Vec<Customer>,
    state: SearchState,
    loading: bool,
    error: Option<String>,
    debounce_generation: u64,
    issued: u64,
    latest: Option<u64>,
}

impl Default for CustomerSearch {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_QUERY_CHARS)
    }
}

impl CustomerSearch {
    pub fn new(min_chars: usize) -> Self {
        Self {
            min_chars,
            query: String::new(),
            suggestions: Vec::new(),
            state: SearchState::Idle,
            loading: false,
            error: None,
            debounce_generation: 0,
            issued: 0,
            latest: None,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == SearchState::ShowingSuggestions
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message from the last failed search, cleared when a new one starts.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Everything held, including suggestions hidden by Escape.
    pub fn suggestions(&self) -> &[Customer] {
        &self.suggestions
    }

    /// What the dropdown should render right now.
    pub fn visible_suggestions(&self) -> &[Customer] {
        if self.is_open() {
            &self.suggestions
        } else {
            &[]
        }
    }

    fn query_is_searchable(&self) -> bool {
        self.query.trim().chars().count() >= self.min_chars
    }

    /// Drop any pending debounce and any in-flight request.
    fn invalidate_pending(&mut self) {
        self.debounce_generation += 1;
        self.latest = None;
        self.loading = false;
    }

    /// A keystroke changed the text.
    pub fn input(&mut self, text: impl Into<String>) -> InputOutcome {
        self.query = text.into();

        if self.query.is_empty() {
            self.invalidate_pending();
            self.suggestions.clear();
            self.state = SearchState::Closed;
            return InputOutcome::Cleared;
        }

        self.debounce_generation += 1;
        self.state = SearchState::Debouncing;
        InputOutcome::Debounce(DebounceTicket(self.debounce_generation))
    }

    /// The debounce timer for `ticket` expired.
    ///
    /// Returns the request to send, or `None` if the ticket was superseded or
    /// the query is too short (in which case suggestions are cleared and any
    /// in-flight request for a longer query is abandoned).
    pub fn debounce_elapsed(&mut self, ticket: DebounceTicket) -> Option<SearchRequest> {
        if ticket.0 != self.debounce_generation {
            tracing::trace!(ticket = ticket.0, "superseded debounce ignored");
            return None;
        }

        if !self.query_is_searchable() {
            self.invalidate_pending();
            self.suggestions.clear();
            self.state = SearchState::Closed;
            return None;
        }

        self.issued += 1;
        self.latest = Some(self.issued);
        self.state = SearchState::Searching;
        self.loading = true;
        self.error = None;

        Some(SearchRequest {
            seq: self.issued,
            query: self.query.clone(),
        })
    }

    /// A search response arrived. Returns `false` if it was stale and dropped.
    pub fn search_resolved(&mut self, seq: u64, result: Result<Vec<Customer>, String>) -> bool {
        if self.latest != Some(seq) {
            tracing::debug!(seq, latest = ?self.latest, "stale customer search result discarded");
            return false;
        }

        self.loading = false;
        match result {
            Ok(customers) => {
                self.suggestions = customers;
                self.state = SearchState::ShowingSuggestions;
            }
            Err(message) => {
                self.error = Some(message);
                self.suggestions.clear();
                self.state = SearchState::Closed;
            }
        }
        true
    }

    /// Pick the suggestion at `index` (a click).
    ///
    /// The text becomes the customer's name and the list is cleared. Anything
    /// still pending is invalidated so a late response cannot reopen the list.
    pub fn select(&mut self, index: usize) -> Option<Customer> {
        let customer = self.suggestions.get(index).cloned()?;
        self.query = customer.name.clone();
        self.suggestions.clear();
        self.invalidate_pending();
        self.state = SearchState::Closed;
        Some(customer)
    }

    /// Keyboard handling. Enter picks the first visible suggestion.
    pub fn key(&mut self, key: SearchKey) -> Option<Customer> {
        match key {
            SearchKey::Enter if self.is_open() && !self.suggestions.is_empty() => self.select(0),
            SearchKey::Enter => None,
            SearchKey::Escape => {
                self.close();
                None
            }
        }
    }

    /// The input regained focus. Reopens retained suggestions without searching.
    pub fn focus(&mut self) -> bool {
        if self.state == SearchState::Closed
            && self.query_is_searchable()
            && !self.suggestions.is_empty()
        {
            self.state = SearchState::ShowingSuggestions;
            true
        } else {
            false
        }
    }

    /// A pointer interaction happened outside the widget.
    pub fn pointer_outside(&mut self) {
        self.close();
    }

    fn close(&mut self) {
        if self.state != SearchState::Idle {
            self.state = SearchState::Closed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use billbook_core::CustomerId;

    fn customer(id: i64, name: &str) -> Customer {
        Customer::new(CustomerId::new(id), name)
    }

    fn ticket(outcome: InputOutcome) -> DebounceTicket {
        match outcome {
            InputOutcome::Debounce(t) => t,
            InputOutcome::Cleared => panic!("expected a debounce ticket"),
        }
    }

    fn open_with(search: &mut CustomerSearch, query: &str, results: Vec<Customer>) {
        let t = ticket(search.input(query));
        let req = search.debounce_elapsed(t).unwrap();
        assert!(search.search_resolved(req.seq, Ok(results)));
    }

    #[test]
    fn keystroke_debounces_then_searches() {
        let mut search = CustomerSearch::default();
        assert_eq!(search.state(), SearchState::Idle);

        let t = ticket(search.input("Al"));
        assert_eq!(search.state(), SearchState::Debouncing);

        let req = search.debounce_elapsed(t).unwrap();
        assert_eq!(req.query, "Al");
        assert_eq!(search.state(), SearchState::Searching);
        assert!(search.is_loading());

        assert!(search.search_resolved(req.seq, Ok(vec![customer(1, "Alex")])));
        assert_eq!(search.state(), SearchState::ShowingSuggestions);
        assert_eq!(search.visible_suggestions().len(), 1);
        assert!(!search.is_loading());
    }

    #[test]
    fn newer_keystroke_supersedes_pending_debounce() {
        let mut search = CustomerSearch::default();
        let first = ticket(search.input("Al"));
        let second = ticket(search.input("Ale"));

        assert!(search.debounce_elapsed(first).is_none());
        assert_eq!(search.debounce_elapsed(second).unwrap().query, "Ale");
    }

    #[test]
    fn short_query_clears_and_closes_without_request() {
        let mut search = CustomerSearch::default();
        open_with(&mut search, "Al", vec![customer(1, "Alex")]);

        let t = ticket(search.input("A"));
        assert!(search.debounce_elapsed(t).is_none());
        assert!(search.suggestions().is_empty());
        assert_eq!(search.state(), SearchState::Closed);
    }

    #[test]
    fn shortening_below_minimum_abandons_the_in_flight_search() {
        let mut search = CustomerSearch::default();
        let t = ticket(search.input("Al"));
        let req_al = search.debounce_elapsed(t).unwrap();

        let t = ticket(search.input("A"));
        assert!(search.debounce_elapsed(t).is_none());
        assert!(!search.is_loading());

        assert!(!search.search_resolved(req_al.seq, Ok(vec![customer(1, "Alex")])));
        assert_eq!(search.state(), SearchState::Closed);
        assert_eq!(search.query(), "A");
        assert!(search.visible_suggestions().is_empty());
    }

    #[test]
    fn whitespace_does_not_count_towards_min_length() {
        let mut search = CustomerSearch::default();
        let t = ticket(search.input(" A "));
        assert!(search.debounce_elapsed(t).is_none());
    }

    #[test]
    fn emptying_the_input_clears_immediately() {
        let mut search = CustomerSearch::default();
        open_with(&mut search, "Al", vec![customer(1, "Alex")]);

        assert_eq!(search.input(""), InputOutcome::Cleared);
        assert!(search.suggestions().is_empty());
        assert_eq!(search.state(), SearchState::Closed);
    }

    #[test]
    fn empty_result_still_counts_as_showing() {
        let mut search = CustomerSearch::default();
        open_with(&mut search, "Zz", vec![]);
        assert_eq!(search.state(), SearchState::ShowingSuggestions);
        assert!(search.visible_suggestions().is_empty());
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut search = CustomerSearch::default();

        let t1 = ticket(search.input("Al"));
        let req_al = search.debounce_elapsed(t1).unwrap();
        let t2 = ticket(search.input("Alex"));
        let req_alex = search.debounce_elapsed(t2).unwrap();

        assert!(search.search_resolved(req_alex.seq, Ok(vec![customer(2, "Alex Silva")])));
        assert!(!search.search_resolved(req_al.seq, Ok(vec![customer(1, "Alan"), customer(3, "Alma")])));

        let names: Vec<_> = search.visible_suggestions().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Alex Silva"]);
    }

    #[test]
    fn failure_surfaces_error_and_clears() {
        let mut search = CustomerSearch::default();
        open_with(&mut search, "Al", vec![customer(1, "Alex")]);

        let t = ticket(search.input("Alx"));
        let req = search.debounce_elapsed(t).unwrap();
        assert!(search.search_resolved(req.seq, Err("Failed to search customers".into())));

        assert_eq!(search.error(), Some("Failed to search customers"));
        assert!(search.suggestions().is_empty());
        assert!(!search.is_open());

        let t = ticket(search.input("Alxe"));
        search.debounce_elapsed(t).unwrap();
        assert!(search.error().is_none());
    }

    #[test]
    fn selection_sets_text_and_blocks_late_results() {
        let mut search = CustomerSearch::default();
        open_with(&mut search, "Al", vec![customer(1, "Alex"), customer(2, "Alan")]);

        let t = ticket(search.input("Ala"));
        let late = search.debounce_elapsed(t).unwrap();

        let picked = search.select(1).unwrap();
        assert_eq!(picked.name, "Alan");
        assert_eq!(search.query(), "Alan");
        assert!(search.suggestions().is_empty());
        assert_eq!(search.state(), SearchState::Closed);

        assert!(!search.search_resolved(late.seq, Ok(vec![customer(3, "Alana")])));
        assert!(search.suggestions().is_empty());
        assert!(!search.is_loading());
    }

    #[test]
    fn selecting_out_of_range_is_a_no_op() {
        let mut search = CustomerSearch::default();
        open_with(&mut search, "Al", vec![customer(1, "Alex")]);
        assert!(search.select(5).is_none());
        assert!(search.is_open());
    }

    #[test]
    fn enter_picks_first_suggestion_only_when_open() {
        let mut search = CustomerSearch::default();
        open_with(&mut search, "Al", vec![customer(1, "Alex"), customer(2, "Alan")]);

        assert_eq!(search.key(SearchKey::Enter).unwrap().name, "Alex");
        assert_eq!(search.query(), "Alex");

        let mut search = CustomerSearch::default();
        open_with(&mut search, "Al", vec![customer(1, "Alex")]);
        search.key(SearchKey::Escape);
        assert!(search.key(SearchKey::Enter).is_none());
    }

    #[test]
    fn escape_hides_but_focus_reopens_without_search() {
        let mut search = CustomerSearch::default();
        open_with(&mut search, "Al", vec![customer(1, "Alex")]);

        search.key(SearchKey::Escape);
        assert_eq!(search.state(), SearchState::Closed);
        assert!(search.visible_suggestions().is_empty());
        assert_eq!(search.suggestions().len(), 1);

        assert!(search.focus());
        assert_eq!(search.state(), SearchState::ShowingSuggestions);
        assert!(!search.is_loading());
    }

    #[test]
    fn focus_does_nothing_without_retained_suggestions() {
        let mut search = CustomerSearch::default();
        open_with(&mut search, "Zz", vec![]);
        search.pointer_outside();
        assert!(!search.focus());
        assert_eq!(search.state(), SearchState::Closed);
    }

    #[test]
    fn outside_pointer_closes() {
        let mut search = CustomerSearch::default();
        open_with(&mut search, "Al", vec![customer(1, "Alex")]);
        search.pointer_outside();
        assert_eq!(search.state(), SearchState::Closed);
        assert_eq!(search.suggestions().len(), 1);
    }
}
