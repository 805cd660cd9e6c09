pub mod drawer;
pub mod freezer;
pub mod freezer_item;
