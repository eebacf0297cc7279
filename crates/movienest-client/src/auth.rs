//! Sign-up, sign-in and sign-out flows.

use movienest_api_models::{LoginResponse, User};
use tracing::info;

use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::session::SessionStore;
use crate::storage::KeyValueStorage;
use crate::validate;

/// Create an account. The session is left untouched.
///
/// # Errors
///
/// Validation failures are returned before any request is issued; otherwise
/// transport, server and decode failures.
pub async fn register(
    api: &ApiClient,
    username: &str,
    password: &str,
    email: &str,
    birth_date: &str,
) -> ClientResult<User> {
    let body = validate::registration(username, password, email, birth_date)?;
    let user = api.register(&body).await?;
    info!(username = %user.username, "registration successful");
    Ok(user.without_password())
}

/// Log in and persist the returned token and user.
///
/// The session is written only after the server accepts the credentials, so a
/// failed login leaves any previous session in place.
///
/// # Errors
///
/// Validation, transport, server, decode and storage failures.
pub async fn sign_in<S: KeyValueStorage>(
    api: &ApiClient,
    session: &mut SessionStore<S>,
    username: &str,
    password: &str,
) -> ClientResult<User> {
    let credentials = validate::credentials(username, password)?;
    let LoginResponse { user, token } = api.login(&credentials).await?;
    session.save(&token, &user)?;
    info!(username = %user.username, "login successful");
    Ok(user.without_password())
}

/// Forget the persisted session.
///
/// # Errors
///
/// Storage failures.
pub fn sign_out<S: KeyValueStorage>(session: &mut SessionStore<S>) -> ClientResult<()> {
    session.clear()?;
    info!("logged out");
    Ok(())
}
