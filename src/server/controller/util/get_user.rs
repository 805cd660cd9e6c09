use tower_sessions::Session;

use crate::server::{
    error::{auth::AuthError, Error},
    model::{app::AppState, session::SessionToken},
    service::auth::{AuthService, AuthenticatedUser},
};

/// Resolves the user behind the session cookie
///
/// # Arguments
/// - `state`: Application state with the database connection
/// - `session`: The requester's cookie session
///
/// # Returns
/// - `Ok(AuthenticatedUser)`: valid session, with its user and device
/// - `Err(AuthError::NotAuthenticated)`: no token in the cookie session
/// - `Err(AuthError::SessionNotFound | AuthError::SessionExpired)`: token no longer valid;
///   the cookie session is flushed
/// - `Err(Error)`: database or session store failure
pub async fn get_user_from_session(
    state: &AppState,
    session: &Session,
) -> Result<AuthenticatedUser, Error> {
    let Some(token) = SessionToken::get(session).await? else {
        return Err(AuthError::NotAuthenticated.into());
    };

    match AuthService::new(&state.db).resolve(&token).await {
        Ok(user) => Ok(user),
        Err(Error::AuthError(err)) => {
            session.flush().await?;

            tracing::debug!("Flushed cookie session holding an invalid token: {}", err);

            Err(err.into())
        }
        Err(err) => Err(err),
    }
}
