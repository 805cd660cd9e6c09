use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "shopping_list_item")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub shopping_list_id: i32,
    pub meal_plan_id: i32,
    pub recipe_id: i32,
    pub ingredient_id: i32,
    #[sea_orm(column_type = "Double")]
    pub quantity: f64,
    pub unit_code: String,
    pub purchased: bool,
    pub purchased_at: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::shopping_list::Entity",
        from = "Column::ShoppingListId",
        to = "super::shopping_list::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    ShoppingList,
    #[sea_orm(
        belongs_to = "super::meal_plan::Entity",
        from = "Column::MealPlanId",
        to = "super::meal_plan::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    MealPlan,
    #[sea_orm(
        belongs_to = "super::recipe::Entity",
        from = "Column::RecipeId",
        to = "super::recipe::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Recipe,
    #[sea_orm(
        belongs_to = "super::ingredient::Entity",
        from = "Column::IngredientId",
        to = "super::ingredient::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Ingredient,
}

impl Related<super::shopping_list::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShoppingList.def()
    }
}

impl Related<super::meal_plan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MealPlan.def()
    }
}

impl Related<super::recipe::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Recipe.def()
    }
}

impl Related<super::ingredient::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ingredient.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
