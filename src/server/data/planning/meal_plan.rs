use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};

pub struct MealPlanRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> MealPlanRepository<'a, C> {
    /// Creates a new instance of [`MealPlanRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_slot(
        &self,
        date: NaiveDate,
        slot: &str,
    ) -> Result<Option<entity::meal_plan::Model>, DbErr> {
        entity::prelude::MealPlan::find()
            .filter(entity::meal_plan::Column::Date.eq(date))
            .filter(entity::meal_plan::Column::Slot.eq(slot))
            .one(self.db)
            .await
    }

    pub async fn create(
        &self,
        date: NaiveDate,
        slot: String,
        diner_count: i32,
    ) -> Result<entity::meal_plan::Model, DbErr> {
        entity::meal_plan::ActiveModel {
            date: ActiveValue::Set(date),
            slot: ActiveValue::Set(slot),
            diner_count: ActiveValue::Set(diner_count),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn update_diner_count(
        &self,
        entry: entity::meal_plan::Model,
        diner_count: i32,
    ) -> Result<entity::meal_plan::Model, DbErr> {
        let mut entry_am = entry.into_active_model();
        entry_am.diner_count = ActiveValue::Set(diner_count);

        entry_am.update(self.db).await
    }

    /// Entries dated within `start..=end`, ordered by date then slot
    pub async fn get_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<entity::meal_plan::Model>, DbErr> {
        entity::prelude::MealPlan::find()
            .filter(entity::meal_plan::Column::Date.between(start, end))
            .order_by_asc(entity::meal_plan::Column::Date)
            .order_by_asc(entity::meal_plan::Column::Slot)
            .all(self.db)
            .await
    }

    pub async fn get_by_ids(&self, ids: Vec<i32>) -> Result<Vec<entity::meal_plan::Model>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::MealPlan::find()
            .filter(entity::meal_plan::Column::Id.is_in(ids))
            .all(self.db)
            .await
    }

    /// Entries with `recipe_id` assigned, ordered by date
    pub async fn find_referencing_recipe(
        &self,
        recipe_id: i32,
    ) -> Result<Vec<entity::meal_plan::Model>, DbErr> {
        entity::prelude::MealPlan::find()
            .join(
                JoinType::InnerJoin,
                entity::meal_plan::Relation::MealPlanItem.def(),
            )
            .filter(entity::meal_plan_item::Column::RecipeId.eq(recipe_id))
            .order_by_asc(entity::meal_plan::Column::Date)
            .distinct()
            .all(self.db)
            .await
    }

    /// Deletes an entry, its recipe association goes with it
    pub async fn delete(&self, entry_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::MealPlan::delete_by_id(entry_id)
            .exec(self.db)
            .await
    }

    pub async fn delete_many(&self, ids: Vec<i32>) -> Result<DeleteResult, DbErr> {
        entity::prelude::MealPlan::delete_many()
            .filter(entity::meal_plan::Column::Id.is_in(ids))
            .exec(self.db)
            .await
    }
}
