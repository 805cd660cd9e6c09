use sea_orm::DatabaseConnection;

use crate::server::config::{
    Config, DEFAULT_FREEZER_EXPIRY_WINDOW_DAYS, DEFAULT_SHOPPING_LIST_RETENTION_DAYS,
};

/// Tunables handlers pass down to services.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    pub shopping_list_retention_days: i64,
    pub freezer_expiry_window_days: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            shopping_list_retention_days: DEFAULT_SHOPPING_LIST_RETENTION_DAYS,
            freezer_expiry_window_days: DEFAULT_FREEZER_EXPIRY_WINDOW_DAYS,
        }
    }
}

impl From<&Config> for Settings {
    fn from(config: &Config) -> Self {
        Self {
            shopping_list_retention_days: config.shopping_list_retention_days,
            freezer_expiry_window_days: config.freezer_expiry_window_days,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub settings: Settings,
}

impl From<DatabaseConnection> for AppState {
    fn from(db: DatabaseConnection) -> Self {
        Self {
            db,
            settings: Settings::default(),
        }
    }
}
