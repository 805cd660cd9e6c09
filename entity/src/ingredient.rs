use sea_orm::entity::prelude::*;

use crate::string_list::StringList;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "ingredient")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name_normalized: String,
    pub canonical_unit: String,
    pub store_section: String,
    pub store_name: Option<String>,
    #[sea_orm(column_type = "Json")]
    pub synonyms: StringList,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::recipe_ingredient::Entity")]
    RecipeIngredient,
    #[sea_orm(has_many = "super::shopping_list_item::Entity")]
    ShoppingListItem,
}

impl Related<super::recipe_ingredient::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RecipeIngredient.def()
    }
}

impl Related<super::shopping_list_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShoppingListItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
