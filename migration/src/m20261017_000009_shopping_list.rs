use sea_orm_migration::{prelude::*, schema::*};

static IDX_SHOPPING_LIST_CREATED_AT: &str = "idx-shopping_list-created_at";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ShoppingList::Table)
                    .if_not_exists()
                    .col(pk_auto(ShoppingList::Id))
                    .col(date(ShoppingList::StartDate))
                    .col(date(ShoppingList::EndDate))
                    .col(timestamp(ShoppingList::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_SHOPPING_LIST_CREATED_AT)
                    .table(ShoppingList::Table)
                    .col(ShoppingList::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_SHOPPING_LIST_CREATED_AT)
                    .table(ShoppingList::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ShoppingList::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum ShoppingList {
    Table,
    Id,
    StartDate,
    EndDate,
    CreatedAt,
}
