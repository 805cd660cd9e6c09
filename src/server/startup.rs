use sea_orm::DatabaseConnection;
use tower_sessions::SessionManagerLayer;
use tower_sessions_redis_store::{fred::prelude::Pool, RedisStore};

use crate::server::{config::Config, error::Error, service::auth::AuthService};

/// Idle time after which the session cookie expires, about six months
const SESSION_INACTIVITY_DAYS: i64 = 182;

/// Install the global tracing subscriber
///
/// Filtering follows `RUST_LOG` (default `info`); `LOG_FORMAT=json` switches to JSON lines.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let log_json = std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json");

    if log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Connect to Valkey/Redis and configure session management
pub async fn connect_to_session(
    config: &Config,
) -> Result<SessionManagerLayer<RedisStore<Pool>>, Error> {
    use time::Duration;
    use tower_sessions::{cookie::SameSite, Expiry};
    use tower_sessions_redis_store::fred::prelude::{ClientLike, Config as RedisConfig};

    let redis_config = RedisConfig::from_url(&config.valkey_url)?;
    let pool = Pool::new(redis_config, None, None, None, 6)?;

    pool.connect();
    pool.wait_for_connect().await?;

    let session_store = RedisStore::new(pool);

    // Set secure based on build mode: in development (debug) use false, otherwise true.
    let secure_cookies = !cfg!(debug_assertions);

    let session = SessionManagerLayer::new(session_store)
        .with_secure(secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::days(SESSION_INACTIVITY_DAYS)));

    Ok(session)
}

/// Create the configured admin account if the database has no user yet
pub async fn bootstrap_admin(config: &Config, db: &DatabaseConnection) -> Result<(), Error> {
    let (Some(username), Some(password)) = (&config.admin_username, &config.admin_password)
    else {
        return Ok(());
    };

    if !AuthService::new(db)
        .bootstrap_admin(username, password)
        .await?
    {
        tracing::debug!("Users already exist, skipping admin bootstrap");
    }

    Ok(())
}
