pub mod ingredient_line;
pub mod recipe;
pub mod step;
