//! Row-level fixtures, grouped by domain.
//!
//! - `units` - measurement units and stores
//! - `recipe` - ingredients, recipes, steps and ingredient lines
//! - `planning` - meal plan entries
//! - `freezer` - freezers, drawers and items
//! - `auth` - users, devices and sessions

pub mod auth;
pub mod freezer;
pub mod planning;
pub mod recipe;
pub mod units;

use crate::TestContext;

impl TestContext {
    pub fn units(&self) -> units::UnitFixtures<'_> {
        units::UnitFixtures { test: self }
    }

    pub fn recipe(&self) -> recipe::RecipeFixtures<'_> {
        recipe::RecipeFixtures { test: self }
    }

    pub fn planning(&self) -> planning::PlanningFixtures<'_> {
        planning::PlanningFixtures { test: self }
    }

    pub fn freezer(&self) -> freezer::FreezerFixtures<'_> {
        freezer::FreezerFixtures { test: self }
    }

    pub fn auth(&self) -> auth::AuthFixtures<'_> {
        auth::AuthFixtures { test: self }
    }
}
