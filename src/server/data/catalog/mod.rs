//! Units, ingredients and stores: the reference data recipes and shopping lists build on.

pub mod ingredient;
pub mod store;
pub mod unit;
