//! Login / logout flows on top of [`Session`].

use billbook_auth::{KeyValueStore, Session, User};

use crate::api::AuthApi;
use crate::error::ClientResult;

/// Authenticate and persist the new session. On failure the session is left
/// as it was.
pub async fn login<S: KeyValueStore>(
    api: &dyn AuthApi,
    session: &mut Session<S>,
    email: &str,
    password: &str,
) -> ClientResult<User> {
    let response = api.login(email.trim(), password).await?;
    session.login(response.access_token, response.user.clone())?;
    Ok(response.user)
}

/// Sign out. Local state is always cleared; a failed server call is logged
/// and otherwise ignored.
pub async fn logout<S: KeyValueStore>(api: &dyn AuthApi, session: &mut Session<S>) -> ClientResult<()> {
    if let Some(token) = session.token().map(str::to_string) {
        if let Err(e) = api.logout(&token).await {
            tracing::warn!(error = %e, "server logout failed, clearing local session anyway");
        }
    }
    session.logout()?;
    Ok(())
}
