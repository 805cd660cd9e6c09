use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    QueryFilter,
};

pub struct MealPlanItemRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> MealPlanItemRepository<'a, C> {
    /// Creates a new instance of [`MealPlanItemRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        meal_plan_id: i32,
        recipe_id: i32,
    ) -> Result<entity::meal_plan_item::Model, DbErr> {
        entity::meal_plan_item::ActiveModel {
            meal_plan_id: ActiveValue::Set(meal_plan_id),
            recipe_id: ActiveValue::Set(recipe_id),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn delete_by_meal_plan(&self, meal_plan_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::MealPlanItem::delete_many()
            .filter(entity::meal_plan_item::Column::MealPlanId.eq(meal_plan_id))
            .exec(self.db)
            .await
    }

    pub async fn get_by_meal_plans(
        &self,
        meal_plan_ids: Vec<i32>,
    ) -> Result<Vec<entity::meal_plan_item::Model>, DbErr> {
        if meal_plan_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::MealPlanItem::find()
            .filter(entity::meal_plan_item::Column::MealPlanId.is_in(meal_plan_ids))
            .all(self.db)
            .await
    }
}
