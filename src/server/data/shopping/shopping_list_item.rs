use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

/// One (meal plan entry, ingredient line) contribution to a persisted list
///
/// `recipe_id` is the recipe planned when the list was generated, kept even if the slot is
/// later reassigned.
pub struct NewShoppingListItem {
    pub meal_plan_id: i32,
    pub recipe_id: i32,
    pub ingredient_id: i32,
    pub quantity: f64,
    pub unit_code: String,
}

pub struct ShoppingListItemRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ShoppingListItemRepository<'a, C> {
    /// Creates a new instance of [`ShoppingListItemRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create_many(
        &self,
        shopping_list_id: i32,
        items: Vec<NewShoppingListItem>,
    ) -> Result<Vec<entity::shopping_list_item::Model>, DbErr> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let items = items
            .into_iter()
            .map(|item| entity::shopping_list_item::ActiveModel {
                shopping_list_id: ActiveValue::Set(shopping_list_id),
                meal_plan_id: ActiveValue::Set(item.meal_plan_id),
                recipe_id: ActiveValue::Set(item.recipe_id),
                ingredient_id: ActiveValue::Set(item.ingredient_id),
                quantity: ActiveValue::Set(item.quantity),
                unit_code: ActiveValue::Set(item.unit_code),
                purchased: ActiveValue::Set(false),
                purchased_at: ActiveValue::Set(None),
                ..Default::default()
            });

        entity::prelude::ShoppingListItem::insert_many(items)
            .exec_with_returning(self.db)
            .await
    }

    pub async fn get_by_id(
        &self,
        item_id: i32,
    ) -> Result<Option<entity::shopping_list_item::Model>, DbErr> {
        entity::prelude::ShoppingListItem::find_by_id(item_id)
            .one(self.db)
            .await
    }

    pub async fn get_by_list(
        &self,
        shopping_list_id: i32,
    ) -> Result<Vec<entity::shopping_list_item::Model>, DbErr> {
        entity::prelude::ShoppingListItem::find()
            .filter(entity::shopping_list_item::Column::ShoppingListId.eq(shopping_list_id))
            .order_by_asc(entity::shopping_list_item::Column::Id)
            .all(self.db)
            .await
    }

    /// Sets the purchased state of an item
    ///
    /// Leaves the row untouched when it already has the requested state, so `purchased_at`
    /// keeps the time of the first purchase.
    pub async fn set_purchased(
        &self,
        item: entity::shopping_list_item::Model,
        purchased: bool,
    ) -> Result<entity::shopping_list_item::Model, DbErr> {
        if item.purchased == purchased {
            return Ok(item);
        }

        let mut item_am = item.into_active_model();
        item_am.purchased = ActiveValue::Set(purchased);
        item_am.purchased_at = ActiveValue::Set(purchased.then(|| Utc::now().naive_utc()));

        item_am.update(self.db).await
    }

    /// Deletes the purchased items of a list whose ingredient is in `ingredient_ids`
    pub async fn delete_purchased(
        &self,
        shopping_list_id: i32,
        ingredient_ids: Vec<i32>,
    ) -> Result<DeleteResult, DbErr> {
        entity::prelude::ShoppingListItem::delete_many()
            .filter(entity::shopping_list_item::Column::ShoppingListId.eq(shopping_list_id))
            .filter(entity::shopping_list_item::Column::Purchased.eq(true))
            .filter(entity::shopping_list_item::Column::IngredientId.is_in(ingredient_ids))
            .exec(self.db)
            .await
    }
}
