use sea_orm_migration::{prelude::*, schema::*};

static IDX_MEAL_PLAN_DATE_SLOT: &str = "idx-meal_plan-date-slot";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MealPlan::Table)
                    .if_not_exists()
                    .col(pk_auto(MealPlan::Id))
                    .col(date(MealPlan::Date))
                    .col(string(MealPlan::Slot))
                    .col(integer(MealPlan::DinerCount))
                    .col(timestamp(MealPlan::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_MEAL_PLAN_DATE_SLOT)
                    .table(MealPlan::Table)
                    .col(MealPlan::Date)
                    .col(MealPlan::Slot)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_MEAL_PLAN_DATE_SLOT)
                    .table(MealPlan::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(MealPlan::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum MealPlan {
    Table,
    Id,
    Date,
    Slot,
    DinerCount,
    CreatedAt,
}
