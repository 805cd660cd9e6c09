use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestContext};

pub struct PlanningFixtures<'a> {
    pub(crate) test: &'a TestContext,
}

impl<'a> PlanningFixtures<'a> {
    /// Insert a meal plan entry, associated with `recipe_id` when given.
    ///
    /// `slot` is the stored value, `"midday"` or `"evening"`.
    pub async fn insert_entry(
        &self,
        date: NaiveDate,
        slot: &str,
        diner_count: i32,
        recipe_id: Option<i32>,
    ) -> Result<entity::meal_plan::Model, TestError> {
        let entry = entity::prelude::MealPlan::insert(entity::meal_plan::ActiveModel {
            date: ActiveValue::Set(date),
            slot: ActiveValue::Set(slot.to_string()),
            diner_count: ActiveValue::Set(diner_count),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        })
        .exec_with_returning(&self.test.db)
        .await?;

        if let Some(recipe_id) = recipe_id {
            entity::prelude::MealPlanItem::insert(entity::meal_plan_item::ActiveModel {
                meal_plan_id: ActiveValue::Set(entry.id),
                recipe_id: ActiveValue::Set(recipe_id),
                ..Default::default()
            })
            .exec_with_returning(&self.test.db)
            .await?;
        }

        Ok(entry)
    }
}
