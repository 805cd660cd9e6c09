//! Typed access to the cookie session.
//!
//! The cookie session only carries the token of the database session row; who is logged in
//! and until when is decided by the `session` table.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::server::error::Error;

pub const SESSION_TOKEN_KEY: &str = "larder:session:token";

#[derive(Default, Deserialize, Serialize, Debug)]
pub struct SessionToken(pub String);

impl SessionToken {
    /// Insert session token into the cookie session
    pub async fn insert(session: &Session, token: &str) -> Result<(), Error> {
        session
            .insert(SESSION_TOKEN_KEY, SessionToken(token.to_string()))
            .await?;

        Ok(())
    }

    /// Get session token from the cookie session
    pub async fn get(session: &Session) -> Result<Option<String>, Error> {
        Ok(session
            .get::<SessionToken>(SESSION_TOKEN_KEY)
            .await?
            .map(|SessionToken(token)| token))
    }
}
