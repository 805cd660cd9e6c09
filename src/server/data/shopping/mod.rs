pub mod shopping_list;
pub mod shopping_list_item;
