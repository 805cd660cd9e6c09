use sea_orm_migration::{prelude::*, schema::*};

use crate::m20261017_000011_freezer::Freezer;

static IDX_DRAWER_FREEZER_ID: &str = "idx-drawer-freezer_id";
static FK_DRAWER_FREEZER_ID: &str = "fk-drawer-freezer_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Drawer::Table)
                    .if_not_exists()
                    .col(pk_auto(Drawer::Id))
                    .col(integer(Drawer::FreezerId))
                    .col(string(Drawer::Name))
                    .col(integer(Drawer::Order))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_DRAWER_FREEZER_ID)
                            .from(Drawer::Table, Drawer::FreezerId)
                            .to(Freezer::Table, Freezer::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_DRAWER_FREEZER_ID)
                    .table(Drawer::Table)
                    .col(Drawer::FreezerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_DRAWER_FREEZER_ID)
                    .table(Drawer::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Drawer::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Drawer {
    Table,
    Id,
    FreezerId,
    Name,
    Order,
}
