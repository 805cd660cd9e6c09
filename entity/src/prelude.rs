pub use super::device::Entity as Device;
pub use super::drawer::Entity as Drawer;
pub use super::freezer::Entity as Freezer;
pub use super::freezer_item::Entity as FreezerItem;
pub use super::ingredient::Entity as Ingredient;
pub use super::meal_plan::Entity as MealPlan;
pub use super::meal_plan_item::Entity as MealPlanItem;
pub use super::recipe::Entity as Recipe;
pub use super::recipe_ingredient::Entity as RecipeIngredient;
pub use super::recipe_step::Entity as RecipeStep;
pub use super::session::Entity as Session;
pub use super::shopping_list::Entity as ShoppingList;
pub use super::shopping_list_item::Entity as ShoppingListItem;
pub use super::store::Entity as Store;
pub use super::unit::Entity as Unit;
pub use super::user::Entity as User;
