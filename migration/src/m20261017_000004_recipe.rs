use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Recipe::Table)
                    .if_not_exists()
                    .col(pk_auto(Recipe::Id))
                    .col(string(Recipe::Title))
                    .col(string_uniq(Recipe::Slug))
                    .col(text_null(Recipe::Description))
                    .col(integer(Recipe::ServingsDefault))
                    .col(integer_null(Recipe::PrepMin))
                    .col(integer_null(Recipe::CookMin))
                    .col(json(Recipe::Tags))
                    .col(timestamp(Recipe::CreatedAt))
                    .col(timestamp(Recipe::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Recipe::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Recipe {
    Table,
    Id,
    Title,
    Slug,
    Description,
    ServingsDefault,
    PrepMin,
    CookMin,
    Tags,
    CreatedAt,
    UpdatedAt,
}
