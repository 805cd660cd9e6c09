use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "drawer")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub freezer_id: i32,
    pub name: String,
    pub order: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::freezer::Entity",
        from = "Column::FreezerId",
        to = "super::freezer::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Freezer,
    #[sea_orm(has_many = "super::freezer_item::Entity")]
    FreezerItem,
}

impl Related<super::freezer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Freezer.def()
    }
}

impl Related<super::freezer_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FreezerItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
