//! Signed-in session state.
//!
//! A `Session` is an explicit value owned by the application context. It is
//! restored from storage at startup and wiped on logout.

use thiserror::Error;

use crate::store::{KeyValueStore, StoreError};
use crate::user::User;

pub const TOKEN_KEY: &str = "auth_token";
pub const USER_KEY: &str = "auth_user";

#[derive(Debug, Error)]
pub enum AuthError {
    /// The login endpoint answered 401.
    #[error("Invalid credentials. Please check your email and password.")]
    InvalidCredentials,

    #[error("not signed in")]
    NotAuthenticated,

    #[error("session storage failed: {0}")]
    Storage(#[from] StoreError),
}

#[derive(Debug)]
pub struct Session<S> {
    store: S,
    token: Option<String>,
    user: Option<User>,
}

impl<S: KeyValueStore> Session<S> {
    /// Read any persisted token and user from `store`.
    ///
    /// A token without a readable user profile still counts as signed in;
    /// the profile is simply unknown until the next login.
    pub fn restore(store: S) -> Result<Self, AuthError> {
        let token = store.get(TOKEN_KEY)?;
        let user = match token {
            Some(_) => store.get(USER_KEY)?.and_then(|raw| {
                serde_json::from_str::<User>(&raw)
                    .map_err(|e| tracing::warn!(error = %e, "ignoring unreadable stored user profile"))
                    .ok()
            }),
            None => None,
        };

        tracing::debug!(authenticated = token.is_some(), "session restored");
        Ok(Self { store, token, user })
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn require_token(&self) -> Result<&str, AuthError> {
        self.token().ok_or(AuthError::NotAuthenticated)
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Persist and adopt a freshly issued token.
    ///
    /// The profile is written before the token, since a stored token is what
    /// makes a session count as signed in. If the token cannot be written the
    /// previous profile is put back and the session is left as it was.
    pub fn login(&mut self, token: impl Into<String>, user: User) -> Result<(), AuthError> {
        let token = token.into();
        let profile = serde_json::to_string(&user).map_err(StoreError::from)?;
        let previous_profile = self.store.get(USER_KEY)?;

        self.store.set(USER_KEY, &profile)?;
        if let Err(e) = self.store.set(TOKEN_KEY, &token) {
            let rollback = match &previous_profile {
                Some(previous) => self.store.set(USER_KEY, previous),
                None => self.store.remove(USER_KEY),
            };
            if let Err(rollback_err) = rollback {
                tracing::warn!(error = %rollback_err, "could not restore stored user profile");
            }
            return Err(e.into());
        }

        tracing::info!(user_id = %user.id, "signed in");
        self.token = Some(token);
        self.user = Some(user);
        Ok(())
    }

    /// Forget the session. In-memory state is cleared even if storage fails,
    /// and both keys are removed even if the first removal fails; the first
    /// storage error is returned.
    pub fn logout(&mut self) -> Result<(), AuthError> {
        self.token = None;
        self.user = None;
        let token_removed = self.store.remove(TOKEN_KEY);
        let user_removed = self.store.remove(USER_KEY);
        token_removed.and(user_removed)?;
        tracing::info!("signed out");
        Ok(())
    }
}
