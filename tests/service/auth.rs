use chrono::Duration;
use larder::{
    model::auth::{ChangePasswordDto, LoginDto},
    server::{
        error::{auth::AuthError, Error},
        service::auth::{fingerprint, AuthService},
    },
};
use larder_test_utils::prelude::*;
use sea_orm::{EntityTrait, PaginatorTrait};

use crate::util::{TestResult, TEST_USER_AGENT};

fn credentials(password: &str, device_name: Option<&str>) -> LoginDto {
    LoginDto {
        username: "alice".to_string(),
        password: password.to_string(),
        device_name: device_name.map(str::to_string),
    }
}

mod login {
    use super::*;

    /// Expect a session and a new device named after the request
    #[tokio::test]
    async fn registers_new_device() -> TestResult {
        let test = TestBuilder::new()
            .with_auth_tables()
            .with_user("alice", "correct horse")
            .build()
            .await?;
        let service = AuthService::new(&test.db);

        let outcome = service
            .login(credentials("correct horse", Some("Cuisine")), Some(TEST_USER_AGENT))
            .await?;

        assert_eq!(outcome.user.username, "alice");
        assert_eq!(outcome.user.device.device_name, "Cuisine");
        let resolved = service.resolve(&outcome.token).await?;
        assert_eq!(resolved.device.fingerprint, fingerprint(Some(TEST_USER_AGENT)));

        Ok(())
    }

    /// Expect DeviceNameRequired for an unknown device without a name
    #[tokio::test]
    async fn requires_name_for_new_device() -> TestResult {
        let test = TestBuilder::new()
            .with_auth_tables()
            .with_user("alice", "correct horse")
            .build()
            .await?;

        let result = AuthService::new(&test.db)
            .login(credentials("correct horse", None), Some(TEST_USER_AGENT))
            .await;

        assert!(matches!(
            result,
            Err(Error::AuthError(AuthError::DeviceNameRequired))
        ));

        Ok(())
    }

    /// Expect the known device reused without a name, and no second device row
    #[tokio::test]
    async fn reuses_known_device() -> TestResult {
        let test = TestBuilder::new()
            .with_auth_tables()
            .with_user("alice", "correct horse")
            .build()
            .await?;
        let service = AuthService::new(&test.db);
        let first = service
            .login(credentials("correct horse", Some("Salon")), Some(TEST_USER_AGENT))
            .await?;

        let second = service
            .login(credentials("correct horse", None), Some(TEST_USER_AGENT))
            .await?;

        assert_eq!(second.user.device.id, first.user.device.id);
        assert_ne!(second.token, first.token);
        assert_eq!(entity::prelude::Device::find().count(&test.db).await?, 1);

        Ok(())
    }

    /// Expect InvalidCredentials for a wrong password
    #[tokio::test]
    async fn rejects_wrong_password() -> TestResult {
        let test = TestBuilder::new()
            .with_auth_tables()
            .with_user("alice", "correct horse")
            .build()
            .await?;

        let result = AuthService::new(&test.db)
            .login(credentials("battery staple", Some("Salon")), Some(TEST_USER_AGENT))
            .await;

        assert!(matches!(
            result,
            Err(Error::AuthError(AuthError::InvalidCredentials))
        ));

        Ok(())
    }
}

mod resolve {
    use super::*;

    /// Expect SessionExpired and the session row deleted
    #[tokio::test]
    async fn deletes_expired_session() -> TestResult {
        let test = TestBuilder::new().with_auth_tables().build().await?;
        let user = test.auth().insert_user("alice", "correct horse").await?;
        let device = test.auth().insert_device(user.id, "fp", "Salon").await?;
        test.auth()
            .insert_session(user.id, device.id, "stale", Duration::hours(-1))
            .await?;

        let result = AuthService::new(&test.db).resolve("stale").await;

        assert!(matches!(
            result,
            Err(Error::AuthError(AuthError::SessionExpired(_)))
        ));
        assert_eq!(entity::prelude::Session::find().count(&test.db).await?, 0);

        Ok(())
    }

    /// Expect SessionNotFound for an unknown token
    #[tokio::test]
    async fn fails_for_unknown_token() -> TestResult {
        let test = TestBuilder::new().with_auth_tables().build().await?;

        let result = AuthService::new(&test.db).resolve("nope").await;

        assert!(matches!(
            result,
            Err(Error::AuthError(AuthError::SessionNotFound))
        ));

        Ok(())
    }
}

mod revoke_device {
    use super::*;

    /// Expect the device and its sessions gone
    #[tokio::test]
    async fn removes_device_sessions() -> TestResult {
        let test = TestBuilder::new().with_auth_tables().build().await?;
        let user = test.auth().insert_user("alice", "correct horse").await?;
        let device = test.auth().insert_device(user.id, "fp", "Salon").await?;
        test.auth()
            .insert_session(user.id, device.id, "token", Duration::days(1))
            .await?;
        let service = AuthService::new(&test.db);

        service.revoke_device(user.id, device.id).await?;

        assert!(matches!(
            service.resolve("token").await,
            Err(Error::AuthError(AuthError::SessionNotFound))
        ));
        assert!(service.devices(user.id).await?.is_empty());

        Ok(())
    }

    /// Expect DeviceNotFound for another user's device
    #[tokio::test]
    async fn ignores_other_users_device() -> TestResult {
        let test = TestBuilder::new().with_auth_tables().build().await?;
        let alice = test.auth().insert_user("alice", "correct horse").await?;
        let bob = test.auth().insert_user("bob", "battery staple").await?;
        let device = test.auth().insert_device(bob.id, "fp", "Salon").await?;

        let result = AuthService::new(&test.db)
            .revoke_device(alice.id, device.id)
            .await;

        assert!(matches!(
            result,
            Err(Error::AuthError(AuthError::DeviceNotFound(_)))
        ));

        Ok(())
    }
}

mod change_password {
    use super::*;

    fn change(current: &str, new: &str, confirm: &str) -> ChangePasswordDto {
        ChangePasswordDto {
            current_password: current.to_string(),
            new_password: new.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    /// Expect login to work with the new password only
    #[tokio::test]
    async fn replaces_password() -> TestResult {
        let test = TestBuilder::new()
            .with_auth_tables()
            .with_user("alice", "correct horse")
            .build()
            .await?;
        let service = AuthService::new(&test.db);

        service
            .change_password(1, change("correct horse", "battery staple", "battery staple"))
            .await?;

        assert!(service
            .login(credentials("battery staple", Some("Salon")), Some(TEST_USER_AGENT))
            .await
            .is_ok());
        assert!(matches!(
            service
                .login(credentials("correct horse", Some("Salon")), Some(TEST_USER_AGENT))
                .await,
            Err(Error::AuthError(AuthError::InvalidCredentials))
        ));

        Ok(())
    }

    /// Expect the confirmation, length and current password checks to reject the change
    #[tokio::test]
    async fn validates_input() -> TestResult {
        let test = TestBuilder::new()
            .with_auth_tables()
            .with_user("alice", "correct horse")
            .build()
            .await?;
        let service = AuthService::new(&test.db);

        let mismatch = service
            .change_password(1, change("correct horse", "battery", "batterie"))
            .await;
        let too_short = service
            .change_password(1, change("correct horse", "abc", "abc"))
            .await;
        let wrong = service
            .change_password(1, change("wrong horse", "battery", "battery"))
            .await;

        assert!(matches!(
            mismatch,
            Err(Error::AuthError(AuthError::PasswordMismatch))
        ));
        assert!(matches!(
            too_short,
            Err(Error::AuthError(AuthError::PasswordTooShort(_)))
        ));
        assert!(matches!(
            wrong,
            Err(Error::AuthError(AuthError::WrongPassword))
        ));

        Ok(())
    }
}

mod bootstrap_admin {
    use super::*;

    /// Expect a user created on an empty table and nothing on the second call
    #[tokio::test]
    async fn creates_first_user_once() -> TestResult {
        let test = TestBuilder::new().with_auth_tables().build().await?;
        let service = AuthService::new(&test.db);

        let created = service.bootstrap_admin("admin", "secret123").await?;
        let again = service.bootstrap_admin("other", "secret123").await?;

        assert!(created);
        assert!(!again);
        assert_eq!(entity::prelude::User::find().count(&test.db).await?, 1);

        Ok(())
    }
}
