use std::collections::HashMap;

use chrono::NaiveDate;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::planning::{AssignSlotDto, MealPlanEntryDto, MealSlot, PlannedRecipeDto},
    server::{
        data::{
            planning::{meal_plan::MealPlanRepository, meal_plan_item::MealPlanItemRepository},
            recipe::recipe::RecipeRepository,
        },
        error::Error,
    },
};

pub struct PlanningService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PlanningService<'a> {
    /// Creates a new instance of [`PlanningService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Meal plan entries dated within `start..=end`, midday before evening on each day
    pub async fn list(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<MealPlanEntryDto>, Error> {
        if start > end {
            return Err(Error::ValidationError(
                "Start date must not be after end date".to_string(),
            ));
        }

        let entries = MealPlanRepository::new(self.db)
            .get_in_range(start, end)
            .await?;

        let items = MealPlanItemRepository::new(self.db)
            .get_by_meal_plans(entries.iter().map(|entry| entry.id).collect())
            .await?;
        let recipe_by_entry: HashMap<i32, i32> = items
            .iter()
            .map(|item| (item.meal_plan_id, item.recipe_id))
            .collect();

        let recipes: HashMap<i32, entity::recipe::Model> = RecipeRepository::new(self.db)
            .get_by_ids(items.iter().map(|item| item.recipe_id).collect())
            .await?
            .into_iter()
            .map(|recipe| (recipe.id, recipe))
            .collect();

        let mut dtos = entries
            .into_iter()
            .map(|entry| -> Result<MealPlanEntryDto, Error> {
                let recipe = recipe_by_entry
                    .get(&entry.id)
                    .and_then(|recipe_id| recipes.get(recipe_id))
                    .map(|recipe| PlannedRecipeDto {
                        id: recipe.id,
                        title: recipe.title.clone(),
                        slug: recipe.slug.clone(),
                    });

                Ok(MealPlanEntryDto {
                    id: entry.id,
                    date: entry.date,
                    slot: entry.slot.parse().map_err(Error::ParseError)?,
                    diner_count: entry.diner_count,
                    recipe,
                })
            })
            .collect::<Result<Vec<_>, Error>>()?;
        dtos.sort_by_key(|entry| (entry.date, entry.slot));

        Ok(dtos)
    }

    /// Puts a recipe in a slot, replacing whatever was planned there
    ///
    /// # Returns
    /// - `Ok(MealPlanEntryDto)`: the entry now occupying the slot
    /// - `Err(Error::ValidationError)`: negative diner count
    /// - `Err(Error::NotFound)`: no recipe with this ID
    /// - `Err(Error::DbErr)`: database failure, the slot is left untouched
    pub async fn assign(&self, assignment: AssignSlotDto) -> Result<MealPlanEntryDto, Error> {
        if assignment.diner_count < 0 {
            return Err(Error::ValidationError(
                "Diner count must not be negative".to_string(),
            ));
        }

        let txn = self.db.begin().await?;

        let Some(recipe) = RecipeRepository::new(&txn)
            .get_by_id(assignment.recipe_id)
            .await?
        else {
            return Err(Error::NotFound(format!(
                "Recipe {} not found",
                assignment.recipe_id
            )));
        };

        let meal_plan_repository = MealPlanRepository::new(&txn);
        let meal_plan_item_repository = MealPlanItemRepository::new(&txn);

        let entry = match meal_plan_repository
            .find_by_slot(assignment.date, assignment.slot.as_str())
            .await?
        {
            Some(entry) => {
                meal_plan_item_repository
                    .delete_by_meal_plan(entry.id)
                    .await?;
                meal_plan_repository
                    .update_diner_count(entry, assignment.diner_count)
                    .await?
            }
            None => {
                meal_plan_repository
                    .create(
                        assignment.date,
                        assignment.slot.to_string(),
                        assignment.diner_count,
                    )
                    .await?
            }
        };
        meal_plan_item_repository
            .create(entry.id, recipe.id)
            .await?;

        txn.commit().await?;

        Ok(MealPlanEntryDto {
            id: entry.id,
            date: entry.date,
            slot: assignment.slot,
            diner_count: entry.diner_count,
            recipe: Some(PlannedRecipeDto {
                id: recipe.id,
                title: recipe.title,
                slug: recipe.slug,
            }),
        })
    }

    /// Empties a slot, returns whether there was anything to remove
    pub async fn clear(&self, date: NaiveDate, slot: MealSlot) -> Result<bool, Error> {
        let txn = self.db.begin().await?;

        let meal_plan_repository = MealPlanRepository::new(&txn);
        let Some(entry) = meal_plan_repository
            .find_by_slot(date, slot.as_str())
            .await?
        else {
            return Ok(false);
        };

        MealPlanItemRepository::new(&txn)
            .delete_by_meal_plan(entry.id)
            .await?;
        meal_plan_repository.delete(entry.id).await?;

        txn.commit().await?;

        Ok(true)
    }

    /// Changes the diner count of a planned slot, returns whether the slot was planned
    pub async fn update_diner_count(
        &self,
        date: NaiveDate,
        slot: MealSlot,
        diner_count: i32,
    ) -> Result<bool, Error> {
        if diner_count < 0 {
            return Err(Error::ValidationError(
                "Diner count must not be negative".to_string(),
            ));
        }

        let meal_plan_repository = MealPlanRepository::new(self.db);
        let Some(entry) = meal_plan_repository
            .find_by_slot(date, slot.as_str())
            .await?
        else {
            return Ok(false);
        };

        meal_plan_repository
            .update_diner_count(entry, diner_count)
            .await?;

        Ok(true)
    }
}
