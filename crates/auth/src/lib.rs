//! `billbook-auth`: client-side authentication state.
//!
//! Holds the bearer token and signed-in user, persisted in a keyed store so a
//! restart does not sign the user out. This crate does not talk to the
//! network; the client performs login/logout calls and hands the results here.

pub mod session;
pub mod store;
pub mod user;

pub use session::{AuthError, Session, TOKEN_KEY, USER_KEY};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use user::User;
