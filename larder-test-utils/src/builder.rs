//! Declarative test setup.
//!
//! Methods on [`TestBuilder`] only queue work; tables are created and seed rows inserted
//! when [`TestBuilder::build`] runs.

use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{error::TestError, TestContext};

/// Builder for declarative test initialization.
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    units: bool,
    stores: bool,
    users: Vec<(String, String)>,
}

impl TestBuilder {
    /// Create an empty builder: no tables, no seed data.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            units: false,
            stores: false,
            users: Vec::new(),
        }
    }

    /// Add a single entity table to the test database.
    ///
    /// Tables are created with `IF NOT EXISTS`, so overlapping table groups can be chained.
    ///
    /// ```no_run
    /// use larder_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), larder_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(Freezer)
    ///     .with_table(Drawer)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(
            schema
                .create_table_from_entity(entity)
                .if_not_exists()
                .to_owned(),
        );
        self
    }

    /// Unit, ingredient and store tables.
    pub fn with_catalog_tables(self) -> Self {
        self.with_table(Unit).with_table(Ingredient).with_table(Store)
    }

    /// Catalog tables plus recipes, steps and ingredient lines.
    pub fn with_recipe_tables(self) -> Self {
        self.with_catalog_tables()
            .with_table(Recipe)
            .with_table(RecipeStep)
            .with_table(RecipeIngredient)
    }

    /// Recipe tables plus meal plan entries and their recipe associations.
    pub fn with_planning_tables(self) -> Self {
        self.with_recipe_tables()
            .with_table(MealPlan)
            .with_table(MealPlanItem)
    }

    /// Planning tables plus persisted shopping lists.
    pub fn with_shopping_tables(self) -> Self {
        self.with_planning_tables()
            .with_table(ShoppingList)
            .with_table(ShoppingListItem)
    }

    /// Freezer, drawer and freezer item tables.
    pub fn with_freezer_tables(self) -> Self {
        self.with_table(Freezer)
            .with_table(Drawer)
            .with_table(FreezerItem)
    }

    /// User, device and session tables.
    pub fn with_auth_tables(self) -> Self {
        self.with_table(User).with_table(Device).with_table(Session)
    }

    /// Every table in the schema.
    pub fn with_all_tables(self) -> Self {
        self.with_shopping_tables()
            .with_freezer_tables()
            .with_auth_tables()
    }

    /// Seed the standard units (`g`, `kg`, `mL`, `L`, `cac`, `cas`, `piece`).
    ///
    /// Requires the unit table, see [`Self::with_catalog_tables`].
    pub fn with_units(mut self) -> Self {
        self.units = true;
        self
    }

    /// Seed two stores, `Placard` and `Auchan`.
    pub fn with_stores(mut self) -> Self {
        self.stores = true;
        self
    }

    /// Insert a user with the given plaintext password.
    ///
    /// Requires the auth tables, see [`Self::with_auth_tables`].
    pub fn with_user(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.users.push((username.into(), password.into()));
        self
    }

    /// Create all queued tables, then insert seed data.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Ready-to-use test environment
    /// - `Err(TestError::DbErr)` - Table creation or seed insertion failed
    /// - `Err(TestError::PasswordHash)` - Hashing a seeded user's password failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let test = TestContext::new().await?;

        test.with_tables(self.tables).await?;

        if self.units {
            test.units().insert_standard_units().await?;
        }

        if self.stores {
            test.units().insert_store("Placard", 0).await?;
            test.units().insert_store("Auchan", 1).await?;
        }

        for (username, password) in self.users {
            test.auth().insert_user(&username, &password).await?;
        }

        Ok(test)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
