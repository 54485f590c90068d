//! Customers and the customer-picking interaction.
//!
//! This crate holds the customer record, the rules that decide whether an
//! invoice refers to an existing customer or asks the backend to create one,
//! and the search-as-you-type state machine behind the customer autocomplete.
//! Everything here is deterministic; timers and network calls live in the client.

pub mod customer;
pub mod resolution;
pub mod search;

pub use customer::{Customer, NewCustomer};
pub use resolution::{CustomerRef, CustomerSelection, UnresolvedCustomer};
pub use search::{
    CustomerSearch, DebounceTicket, InputOutcome, SearchKey, SearchRequest, SearchState,
    DEFAULT_MIN_QUERY_CHARS,
};
