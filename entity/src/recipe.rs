use sea_orm::entity::prelude::*;

use crate::string_list::StringList;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "recipe")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub servings_default: i32,
    pub prep_min: Option<i32>,
    pub cook_min: Option<i32>,
    #[sea_orm(column_type = "Json")]
    pub tags: StringList,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::recipe_step::Entity")]
    RecipeStep,
    #[sea_orm(has_many = "super::recipe_ingredient::Entity")]
    RecipeIngredient,
    #[sea_orm(has_many = "super::meal_plan_item::Entity")]
    MealPlanItem,
    #[sea_orm(has_many = "super::shopping_list_item::Entity")]
    ShoppingListItem,
}

impl Related<super::recipe_step::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RecipeStep.def()
    }
}

impl Related<super::recipe_ingredient::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RecipeIngredient.def()
    }
}

impl Related<super::meal_plan_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MealPlanItem.def()
    }
}

impl Related<super::shopping_list_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShoppingListItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
