use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "freezer_item")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub drawer_id: i32,
    pub title: String,
    pub item_type: String,
    pub quantity: i32,
    pub expiration_date: Date,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::drawer::Entity",
        from = "Column::DrawerId",
        to = "super::drawer::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Drawer,
}

impl Related<super::drawer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Drawer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
