//! Password login bound to devices, and the database sessions behind the session cookie.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};
use sha2::{Digest, Sha256};

use crate::{
    model::auth::{ChangePasswordDto, DeviceDto, LoginDto, UserDto},
    server::{
        data::auth::{device::DeviceRepository, session::SessionRepository, user::UserRepository},
        error::{auth::AuthError, Error},
    },
};

/// Six months
pub const SESSION_LIFETIME_DAYS: i64 = 182;
pub const MIN_PASSWORD_LENGTH: usize = 6;
const UNKNOWN_USER_AGENT: &str = "unknown";

/// User, device and database session behind a valid session token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user: entity::user::Model,
    pub device: entity::device::Model,
    pub session: entity::session::Model,
}

impl AuthenticatedUser {
    pub fn to_dto(&self) -> UserDto {
        UserDto {
            id: self.user.id,
            username: self.user.username.clone(),
            device: device_dto(self.device.clone()),
        }
    }
}

/// Result of a successful login
pub struct LoginOutcome {
    /// Token to store in the cookie session
    pub token: String,
    pub user: UserDto,
}

/// SHA-256 hex digest of the user agent, `"unknown"` standing in for a missing one
pub fn fingerprint(user_agent: Option<&str>) -> String {
    let user_agent = user_agent.unwrap_or(UNKNOWN_USER_AGENT);

    hex::encode(Sha256::digest(user_agent.as_bytes()))
}

/// Argon2id PHC string for `password`
pub fn hash_password(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| Error::InternalError(format!("Failed to hash password: {}", e)))
}

/// Checks `password` against a PHC string, using the parameters it encodes
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, Error> {
    let parsed = PasswordHash::new(password_hash)
        .map_err(|e| Error::InternalError(format!("Stored password hash is invalid: {}", e)))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(Error::InternalError(format!(
            "Failed to verify password: {}",
            e
        ))),
    }
}

/// 32 random bytes, hex encoded
fn generate_token() -> String {
    let bytes: [u8; 32] = rand::random();

    hex::encode(bytes)
}

fn device_dto(device: entity::device::Model) -> DeviceDto {
    DeviceDto {
        id: device.id,
        device_name: device.device_name,
        created_at: device.created_at,
        last_seen_at: device.last_seen_at,
    }
}

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuthService<'a> {
    /// Creates a new instance of [`AuthService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Verifies credentials and opens a session for the requesting device
    ///
    /// The device is identified by the fingerprint of its user agent. A device seen for the
    /// first time must be named; a known device is reassigned to the user logging in and its
    /// `last_seen_at` refreshed.
    ///
    /// # Returns
    /// - `Ok(LoginOutcome)`: session token and user
    /// - `Err(AuthError::MissingCredentials)`: empty username or password
    /// - `Err(AuthError::InvalidCredentials)`: unknown user or wrong password
    /// - `Err(AuthError::DeviceNameRequired)`: new device without a name
    pub async fn login(
        &self,
        credentials: LoginDto,
        user_agent: Option<&str>,
    ) -> Result<LoginOutcome, Error> {
        let username = credentials.username.trim();
        if username.is_empty() || credentials.password.is_empty() {
            return Err(AuthError::MissingCredentials.into());
        }

        let Some(user) = UserRepository::new(self.db)
            .find_by_username(username)
            .await?
        else {
            return Err(AuthError::InvalidCredentials.into());
        };
        if !verify_password(&credentials.password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        let fingerprint = fingerprint(user_agent);

        let txn = self.db.begin().await?;

        let device_repository = DeviceRepository::new(&txn);
        let device = match device_repository.find_by_fingerprint(&fingerprint).await? {
            Some(device) => device_repository.touch(device, user.id).await?,
            None => {
                let Some(device_name) = credentials
                    .device_name
                    .as_deref()
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                else {
                    return Err(AuthError::DeviceNameRequired.into());
                };

                device_repository
                    .create(user.id, fingerprint, device_name.to_string())
                    .await?
            }
        };

        let token = generate_token();
        let expires_at = Utc::now().naive_utc() + Duration::days(SESSION_LIFETIME_DAYS);
        SessionRepository::new(&txn)
            .create(user.id, device.id, token.clone(), expires_at)
            .await?;

        txn.commit().await?;

        tracing::info!(
            "User {} logged in from device {} ({})",
            user.username,
            device.id,
            device.device_name
        );

        Ok(LoginOutcome {
            token,
            user: UserDto {
                id: user.id,
                username: user.username,
                device: device_dto(device),
            },
        })
    }

    /// Resolves a session token to its user and device
    ///
    /// Expired sessions are deleted.
    ///
    /// # Returns
    /// - `Ok(AuthenticatedUser)`: valid session
    /// - `Err(AuthError::SessionNotFound)`: unknown token, or its user or device is gone
    /// - `Err(AuthError::SessionExpired)`: the session expired and was deleted
    pub async fn resolve(&self, token: &str) -> Result<AuthenticatedUser, Error> {
        let session_repository = SessionRepository::new(self.db);

        let Some(session) = session_repository.find_by_token(token).await? else {
            return Err(AuthError::SessionNotFound.into());
        };

        if session.expires_at <= Utc::now().naive_utc() {
            session_repository.delete(session.id).await?;

            return Err(AuthError::SessionExpired(session.id).into());
        }

        let Some(user) = UserRepository::new(self.db)
            .get_by_id(session.user_id)
            .await?
        else {
            return Err(AuthError::SessionNotFound.into());
        };
        let Some(device) = DeviceRepository::new(self.db)
            .get_by_id(session.device_id)
            .await?
        else {
            return Err(AuthError::SessionNotFound.into());
        };

        Ok(AuthenticatedUser {
            user,
            device,
            session,
        })
    }

    /// Deletes the database session behind `token`
    pub async fn logout(&self, token: &str) -> Result<(), Error> {
        SessionRepository::new(self.db)
            .delete_by_token(token)
            .await?;

        Ok(())
    }

    pub async fn change_password(
        &self,
        user_id: i32,
        change: ChangePasswordDto,
    ) -> Result<(), Error> {
        if change.current_password.is_empty()
            || change.new_password.is_empty()
            || change.confirm_password.is_empty()
        {
            return Err(AuthError::MissingPasswordFields.into());
        }
        if change.new_password != change.confirm_password {
            return Err(AuthError::PasswordMismatch.into());
        }
        if change.new_password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::PasswordTooShort(MIN_PASSWORD_LENGTH).into());
        }

        let user_repository = UserRepository::new(self.db);
        let Some(user) = user_repository.get_by_id(user_id).await? else {
            return Err(AuthError::SessionNotFound.into());
        };
        if !verify_password(&change.current_password, &user.password_hash)? {
            return Err(AuthError::WrongPassword.into());
        }

        let password_hash = hash_password(&change.new_password)?;
        user_repository
            .update_password_hash(user, password_hash)
            .await?;

        Ok(())
    }

    /// Devices of a user, most recently seen first
    pub async fn devices(&self, user_id: i32) -> Result<Vec<DeviceDto>, Error> {
        let devices = DeviceRepository::new(self.db).get_by_user(user_id).await?;

        Ok(devices.into_iter().map(device_dto).collect())
    }

    /// Deletes one of the user's devices along with its sessions
    pub async fn revoke_device(&self, user_id: i32, device_id: i32) -> Result<(), Error> {
        let txn = self.db.begin().await?;

        let device_repository = DeviceRepository::new(&txn);
        match device_repository.get_by_id(device_id).await? {
            Some(device) if device.user_id == user_id => (),
            _ => return Err(AuthError::DeviceNotFound(device_id).into()),
        }

        SessionRepository::new(&txn)
            .delete_by_device(device_id)
            .await?;
        device_repository.delete(device_id).await?;

        txn.commit().await?;

        Ok(())
    }

    /// Creates the first account when no user exists yet
    ///
    /// Returns whether a user was created.
    pub async fn bootstrap_admin(&self, username: &str, password: &str) -> Result<bool, Error> {
        let user_repository = UserRepository::new(self.db);

        if user_repository.count().await? > 0 {
            return Ok(false);
        }

        let password_hash = hash_password(password)?;
        user_repository
            .create(username.to_string(), password_hash)
            .await?;

        tracing::info!("Created initial user {}", username);

        Ok(true)
    }
}
