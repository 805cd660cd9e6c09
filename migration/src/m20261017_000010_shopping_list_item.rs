use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20261017_000002_ingredient::Ingredient, m20261017_000004_recipe::Recipe,
    m20261017_000007_meal_plan::MealPlan, m20261017_000009_shopping_list::ShoppingList,
};

static IDX_SHOPPING_LIST_ITEM_SHOPPING_LIST_ID: &str = "idx-shopping_list_item-shopping_list_id";
static FK_SHOPPING_LIST_ITEM_SHOPPING_LIST_ID: &str = "fk-shopping_list_item-shopping_list_id";
static FK_SHOPPING_LIST_ITEM_MEAL_PLAN_ID: &str = "fk-shopping_list_item-meal_plan_id";
static FK_SHOPPING_LIST_ITEM_RECIPE_ID: &str = "fk-shopping_list_item-recipe_id";
static FK_SHOPPING_LIST_ITEM_INGREDIENT_ID: &str = "fk-shopping_list_item-ingredient_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ShoppingListItem::Table)
                    .if_not_exists()
                    .col(pk_auto(ShoppingListItem::Id))
                    .col(integer(ShoppingListItem::ShoppingListId))
                    .col(integer(ShoppingListItem::MealPlanId))
                    .col(integer(ShoppingListItem::RecipeId))
                    .col(integer(ShoppingListItem::IngredientId))
                    .col(double(ShoppingListItem::Quantity))
                    .col(string(ShoppingListItem::UnitCode))
                    .col(boolean(ShoppingListItem::Purchased).default(false))
                    .col(timestamp_null(ShoppingListItem::PurchasedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_SHOPPING_LIST_ITEM_SHOPPING_LIST_ID)
                            .from(ShoppingListItem::Table, ShoppingListItem::ShoppingListId)
                            .to(ShoppingList::Table, ShoppingList::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_SHOPPING_LIST_ITEM_MEAL_PLAN_ID)
                            .from(ShoppingListItem::Table, ShoppingListItem::MealPlanId)
                            .to(MealPlan::Table, MealPlan::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_SHOPPING_LIST_ITEM_RECIPE_ID)
                            .from(ShoppingListItem::Table, ShoppingListItem::RecipeId)
                            .to(Recipe::Table, Recipe::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_SHOPPING_LIST_ITEM_INGREDIENT_ID)
                            .from(ShoppingListItem::Table, ShoppingListItem::IngredientId)
                            .to(Ingredient::Table, Ingredient::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_SHOPPING_LIST_ITEM_SHOPPING_LIST_ID)
                    .table(ShoppingListItem::Table)
                    .col(ShoppingListItem::ShoppingListId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_SHOPPING_LIST_ITEM_SHOPPING_LIST_ID)
                    .table(ShoppingListItem::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ShoppingListItem::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum ShoppingListItem {
    Table,
    Id,
    ShoppingListId,
    MealPlanId,
    RecipeId,
    IngredientId,
    Quantity,
    UnitCode,
    Purchased,
    PurchasedAt,
}
