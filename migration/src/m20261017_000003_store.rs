use sea_orm_migration::{prelude::*, schema::*};

const SEED_STORES: &[&str] = &[
    "Placard",
    "Auchan",
    "Carrefour",
    "Leclerc",
    "Intermarché",
    "Super U",
    "Lidl",
    "Aldi",
    "Autre",
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Store::Table)
                    .if_not_exists()
                    .col(pk_auto(Store::Id))
                    .col(string_uniq(Store::Name))
                    .col(integer(Store::Order))
                    .to_owned(),
            )
            .await?;

        let mut insert = Query::insert();
        insert.into_table(Store::Table).columns([Store::Name, Store::Order]);
        for (order, name) in SEED_STORES.iter().enumerate() {
            insert
                .values([(*name).into(), (order as i32).into()])
                .map_err(|e| DbErr::Migration(e.to_string()))?;
        }
        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Store::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Store {
    Table,
    Id,
    Name,
    Order,
}
