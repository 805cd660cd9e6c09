use sea_orm_migration::{prelude::*, schema::*};

use crate::m20261017_000004_recipe::Recipe;

static IDX_RECIPE_STEP_RECIPE_ID: &str = "idx-recipe_step-recipe_id";
static FK_RECIPE_STEP_RECIPE_ID: &str = "fk-recipe_step-recipe_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RecipeStep::Table)
                    .if_not_exists()
                    .col(pk_auto(RecipeStep::Id))
                    .col(integer(RecipeStep::RecipeId))
                    .col(integer(RecipeStep::Order))
                    .col(text(RecipeStep::Text))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_RECIPE_STEP_RECIPE_ID)
                            .from(RecipeStep::Table, RecipeStep::RecipeId)
                            .to(Recipe::Table, Recipe::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_RECIPE_STEP_RECIPE_ID)
                    .table(RecipeStep::Table)
                    .col(RecipeStep::RecipeId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_RECIPE_STEP_RECIPE_ID)
                    .table(RecipeStep::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(RecipeStep::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum RecipeStep {
    Table,
    Id,
    RecipeId,
    Order,
    Text,
}
