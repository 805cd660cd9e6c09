use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "meal_plan")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub date: Date,
    pub slot: String,
    pub diner_count: i32,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::meal_plan_item::Entity")]
    MealPlanItem,
    #[sea_orm(has_many = "super::shopping_list_item::Entity")]
    ShoppingListItem,
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
