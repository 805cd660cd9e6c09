use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20261017_000004_recipe::Recipe, m20261017_000007_meal_plan::MealPlan};

static IDX_MEAL_PLAN_ITEM_MEAL_PLAN_ID: &str = "idx-meal_plan_item-meal_plan_id";
static IDX_MEAL_PLAN_ITEM_RECIPE_ID: &str = "idx-meal_plan_item-recipe_id";
static FK_MEAL_PLAN_ITEM_MEAL_PLAN_ID: &str = "fk-meal_plan_item-meal_plan_id";
static FK_MEAL_PLAN_ITEM_RECIPE_ID: &str = "fk-meal_plan_item-recipe_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MealPlanItem::Table)
                    .if_not_exists()
                    .col(pk_auto(MealPlanItem::Id))
                    .col(integer(MealPlanItem::MealPlanId))
                    .col(integer(MealPlanItem::RecipeId))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_MEAL_PLAN_ITEM_MEAL_PLAN_ID)
                            .from(MealPlanItem::Table, MealPlanItem::MealPlanId)
                            .to(MealPlan::Table, MealPlan::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_MEAL_PLAN_ITEM_RECIPE_ID)
                            .from(MealPlanItem::Table, MealPlanItem::RecipeId)
                            .to(Recipe::Table, Recipe::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_MEAL_PLAN_ITEM_MEAL_PLAN_ID)
                    .table(MealPlanItem::Table)
                    .col(MealPlanItem::MealPlanId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_MEAL_PLAN_ITEM_RECIPE_ID)
                    .table(MealPlanItem::Table)
                    .col(MealPlanItem::RecipeId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_MEAL_PLAN_ITEM_RECIPE_ID)
                    .table(MealPlanItem::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_MEAL_PLAN_ITEM_MEAL_PLAN_ID)
                    .table(MealPlanItem::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(MealPlanItem::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum MealPlanItem {
    Table,
    Id,
    MealPlanId,
    RecipeId,
}
