use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "freezer")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub order: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::drawer::Entity")]
    Drawer,
}

impl Related<super::drawer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Drawer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
