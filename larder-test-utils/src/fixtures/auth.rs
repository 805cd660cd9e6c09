use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Algorithm, Argon2, Params, Version,
};
use chrono::{Duration, Utc};
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestContext};

pub struct AuthFixtures<'a> {
    pub(crate) test: &'a TestContext,
}

impl<'a> AuthFixtures<'a> {
    /// Insert a user with an argon2id hash of `password`.
    ///
    /// Uses minimal cost parameters; the parameters are encoded in the PHC string so
    /// verification in the server works unchanged.
    pub async fn insert_user(
        &self,
        username: &str,
        password: &str,
    ) -> Result<entity::user::Model, TestError> {
        let params =
            Params::new(1024, 1, 1, None).map_err(|e| TestError::PasswordHash(e.to_string()))?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| TestError::PasswordHash(e.to_string()))?
            .to_string();

        Ok(entity::prelude::User::insert(entity::user::ActiveModel {
            username: ActiveValue::Set(username.to_string()),
            password_hash: ActiveValue::Set(password_hash),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        })
        .exec_with_returning(&self.test.db)
        .await?)
    }

    pub async fn insert_device(
        &self,
        user_id: i32,
        fingerprint: &str,
        device_name: &str,
    ) -> Result<entity::device::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(entity::prelude::Device::insert(entity::device::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            fingerprint: ActiveValue::Set(fingerprint.to_string()),
            device_name: ActiveValue::Set(device_name.to_string()),
            created_at: ActiveValue::Set(now),
            last_seen_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(&self.test.db)
        .await?)
    }

    /// Insert a session expiring `valid_for` from now; pass a negative duration for an
    /// already expired session.
    pub async fn insert_session(
        &self,
        user_id: i32,
        device_id: i32,
        token: &str,
        valid_for: Duration,
    ) -> Result<entity::session::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(entity::prelude::Session::insert(entity::session::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            device_id: ActiveValue::Set(device_id),
            token: ActiveValue::Set(token.to_string()),
            expires_at: ActiveValue::Set(now + valid_for),
            created_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(&self.test.db)
        .await?)
    }
}
