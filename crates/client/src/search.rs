//! Async driver for the customer autocomplete.
//!
//! [`CustomerSearch`] decides *what* should happen; this module makes it
//! happen on a tokio runtime. Each keystroke aborts the pending debounce task
//! and arms a new one. When the timer fires the search call runs in its own
//! task, so later keystrokes never cancel an in-flight request. Its response
//! is matched against the state machine's sequence number instead.
//!
//! The state lives behind a `std::sync::Mutex` that is never held across an
//! `.await`. Every change is published on a `watch` channel.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use billbook_parties::{
    Customer, CustomerSearch, DebounceTicket, InputOutcome, SearchKey, SearchRequest,
};

use crate::api::CustomerApi;
use crate::config::ClientConfig;

struct Shared {
    api: Arc<dyn CustomerApi>,
    debounce: Duration,
    search: Mutex<CustomerSearch>,
    timer: Mutex<Option<JoinHandle<()>>>,
    view: watch::Sender<CustomerSearch>,
}

impl Shared {
    fn update<R>(&self, f: impl FnOnce(&mut CustomerSearch) -> R) -> R {
        let mut search = self.search.lock().unwrap_or_else(PoisonError::into_inner);
        let out = f(&mut search);
        self.view.send_replace(search.clone());
        out
    }

    fn replace_timer(&self, next: Option<JoinHandle<()>>) {
        let mut slot = self.timer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = std::mem::replace(&mut *slot, next) {
            previous.abort();
        }
    }
}

/// Cheap to clone; clones drive the same widget.
#[derive(Clone)]
pub struct SearchController {
    shared: Arc<Shared>,
}

impl std::fmt::Debug for SearchController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchController")
            .field("debounce", &self.shared.debounce)
            .finish_non_exhaustive()
    }
}

impl SearchController {
    pub fn new(api: Arc<dyn CustomerApi>, config: &ClientConfig) -> Self {
        Self::with_settings(api, config.search_debounce, config.search_min_chars)
    }

    pub fn with_settings(api: Arc<dyn CustomerApi>, debounce: Duration, min_chars: usize) -> Self {
        let search = CustomerSearch::new(min_chars);
        let (view, _) = watch::channel(search.clone());
        Self {
            shared: Arc::new(Shared {
                api,
                debounce,
                search: Mutex::new(search),
                timer: Mutex::new(None),
                view,
            }),
        }
    }

    /// Receive a fresh copy of the widget state after every change.
    pub fn subscribe(&self) -> watch::Receiver<CustomerSearch> {
        self.shared.view.subscribe()
    }

    pub fn snapshot(&self) -> CustomerSearch {
        self.shared
            .search
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The input text changed.
    pub fn input(&self, text: impl Into<String>) {
        match self.shared.update(|search| search.input(text)) {
            InputOutcome::Cleared => self.shared.replace_timer(None),
            InputOutcome::Debounce(ticket) => self.arm(ticket),
        }
    }

    /// A suggestion was clicked.
    pub fn select(&self, index: usize) -> Option<Customer> {
        let picked = self.shared.update(|search| search.select(index));
        if picked.is_some() {
            self.shared.replace_timer(None);
        }
        picked
    }

    pub fn key(&self, key: SearchKey) -> Option<Customer> {
        let picked = self.shared.update(|search| search.key(key));
        if picked.is_some() {
            self.shared.replace_timer(None);
        }
        picked
    }

    pub fn focus(&self) -> bool {
        self.shared.update(CustomerSearch::focus)
    }

    pub fn pointer_outside(&self) {
        self.shared.update(CustomerSearch::pointer_outside);
    }

    fn arm(&self, ticket: DebounceTicket) {
        let shared = Arc::clone(&self.shared);
        let timer = tokio::spawn(async move {
            tokio::time::sleep(shared.debounce).await;
            if let Some(request) = shared.update(|search| search.debounce_elapsed(ticket)) {
                tokio::spawn(run_search(Arc::clone(&shared), request));
            }
        });
        self.shared.replace_timer(Some(timer));
    }
}

async fn run_search(shared: Arc<Shared>, request: SearchRequest) {
    tracing::debug!(seq = request.seq, query = %request.query, "customer search issued");

    let result = shared.api.search(request.query.trim()).await.map_err(|e| {
        tracing::warn!(seq = request.seq, error = %e, "customer search failed");
        e.to_string()
    });

    shared.update(|search| search.search_resolved(request.seq, result));
}
