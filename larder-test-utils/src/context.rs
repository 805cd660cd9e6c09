//! Test context returned by [`TestBuilder::build`](crate::TestBuilder::build).

use std::sync::Arc;

use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};
use tower_sessions::{MemoryStore, Session};

use crate::error::TestError;

/// In-memory database and session for a single test.
///
/// ```ignore
/// let test = TestBuilder::new().with_recipe_tables().with_units().build().await?;
///
/// let flour = test.recipe().insert_ingredient("farine", "g").await?;
/// let state: AppState = test.to_app_state();
/// ```
pub struct TestContext {
    /// Connection to the in-memory SQLite database
    pub db: DatabaseConnection,
    /// Session backed by an in-memory store
    pub session: Session,
}

impl TestContext {
    /// Convert the database connection into any state type constructible from it.
    ///
    /// Lets integration tests build the server's `AppState` without this crate depending
    /// on the server crate.
    pub fn to_app_state<T>(&self) -> T
    where
        T: From<DatabaseConnection>,
    {
        T::from(self.db.clone())
    }

    /// Same as [`Self::to_app_state`] but consumes the context.
    pub fn into_app_state<T>(self) -> T
    where
        T: From<DatabaseConnection>,
    {
        T::from(self.db)
    }

    pub(crate) async fn new() -> Result<Self, TestError> {
        let store = Arc::new(MemoryStore::default());
        let session = Session::new(None, store, None);

        let db = Database::connect("sqlite::memory:").await?;

        Ok(TestContext { db, session })
    }

    pub(crate) async fn with_tables(
        &self,
        stmts: Vec<TableCreateStatement>,
    ) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }
}
