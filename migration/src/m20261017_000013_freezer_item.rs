use sea_orm_migration::{prelude::*, schema::*};

use crate::m20261017_000012_drawer::Drawer;

static IDX_FREEZER_ITEM_DRAWER_ID: &str = "idx-freezer_item-drawer_id";
static IDX_FREEZER_ITEM_EXPIRATION_DATE: &str = "idx-freezer_item-expiration_date";
static FK_FREEZER_ITEM_DRAWER_ID: &str = "fk-freezer_item-drawer_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FreezerItem::Table)
                    .if_not_exists()
                    .col(pk_auto(FreezerItem::Id))
                    .col(integer(FreezerItem::DrawerId))
                    .col(string(FreezerItem::Title))
                    .col(string(FreezerItem::ItemType))
                    .col(integer(FreezerItem::Quantity).default(1))
                    .col(date(FreezerItem::ExpirationDate))
                    .col(timestamp(FreezerItem::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_FREEZER_ITEM_DRAWER_ID)
                            .from(FreezerItem::Table, FreezerItem::DrawerId)
                            .to(Drawer::Table, Drawer::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_FREEZER_ITEM_DRAWER_ID)
                    .table(FreezerItem::Table)
                    .col(FreezerItem::DrawerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_FREEZER_ITEM_EXPIRATION_DATE)
                    .table(FreezerItem::Table)
                    .col(FreezerItem::ExpirationDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_FREEZER_ITEM_EXPIRATION_DATE)
                    .table(FreezerItem::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_FREEZER_ITEM_DRAWER_ID)
                    .table(FreezerItem::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(FreezerItem::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum FreezerItem {
    Table,
    Id,
    DrawerId,
    Title,
    ItemType,
    Quantity,
    ExpirationDate,
    CreatedAt,
}
