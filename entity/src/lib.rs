//! SeaORM entities for the larder database schema.

pub mod prelude;

pub mod device;
pub mod drawer;
pub mod freezer;
pub mod freezer_item;
pub mod ingredient;
pub mod meal_plan;
pub mod meal_plan_item;
pub mod recipe;
pub mod recipe_ingredient;
pub mod recipe_step;
pub mod session;
pub mod shopping_list;
pub mod shopping_list_item;
pub mod store;
pub mod string_list;
pub mod unit;
pub mod user;
