//! Shared test harness for the larder workspace.
//!
//! Tests declare the tables and seed data they need through [`TestBuilder`], then work
//! against the resulting [`TestContext`]: an in-memory SQLite database plus an in-memory
//! tower-sessions `Session`. Fixture helpers hang off the context (`test.recipe()`,
//! `test.planning()`, ...) and insert rows directly through the entity crate.

pub mod builder;
pub mod context;
pub mod error;
pub mod fixtures;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{TestBuilder, TestContext, TestError};
}
