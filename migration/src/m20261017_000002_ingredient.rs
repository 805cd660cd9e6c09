use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ingredient::Table)
                    .if_not_exists()
                    .col(pk_auto(Ingredient::Id))
                    .col(string_uniq(Ingredient::NameNormalized))
                    .col(string(Ingredient::CanonicalUnit))
                    .col(string(Ingredient::StoreSection))
                    .col(string_null(Ingredient::StoreName))
                    .col(json(Ingredient::Synonyms))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Ingredient::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Ingredient {
    Table,
    Id,
    NameNormalized,
    CanonicalUnit,
    StoreSection,
    StoreName,
    Synonyms,
}
