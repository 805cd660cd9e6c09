use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "shopping_list")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub start_date: Date,
    pub end_date: Date,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::shopping_list_item::Entity")]
    ShoppingListItem,
}

impl Related<super::shopping_list_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShoppingListItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
