//! Shopping lists built from the meal plan.
//!
//! Every planned recipe line contributes `qty_per_serving × diner_count` of an ingredient,
//! converted to the ingredient's canonical unit. Contributions are summed per ingredient and
//! unit, then grouped by store and store section.

use std::collections::{BTreeSet, HashMap};

use chrono::{Duration, NaiveDate, Utc};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::{
    model::{
        planning::MealSlot,
        shopping::{
            MealContributionDto, ShoppingItemDto, ShoppingLineDto, ShoppingListDto,
            ShoppingSectionDto, ShoppingStoreDto,
        },
    },
    server::{
        data::{
            catalog::{ingredient::IngredientRepository, store::StoreRepository},
            planning::{meal_plan::MealPlanRepository, meal_plan_item::MealPlanItemRepository},
            recipe::{ingredient_line::RecipeIngredientRepository, recipe::RecipeRepository},
            shopping::{
                shopping_list::ShoppingListRepository,
                shopping_list_item::{NewShoppingListItem, ShoppingListItemRepository},
            },
        },
        error::Error,
        service::conversion::UnitConverter,
    },
};

/// Store shown for ingredients without a preferred store
pub const DEFAULT_STORE_NAME: &str = "Supermarché";
/// Section shown for ingredients without a store section
pub const DEFAULT_SECTION: &str = "autre";

/// One planned ingredient quantity, already in the ingredient's canonical unit
struct Contribution {
    item_id: Option<i32>,
    meal_plan_id: i32,
    recipe_id: i32,
    ingredient: entity::ingredient::Model,
    quantity: f64,
    unit_code: String,
    purchased: bool,
    meal: MealContributionDto,
}

/// Running total for one (ingredient, unit) pair
struct Accumulated {
    ingredient: entity::ingredient::Model,
    quantity: f64,
    unit_code: String,
    purchased: bool,
    item_ids: Vec<i32>,
    meals: BTreeSet<(NaiveDate, MealSlot, String)>,
}

pub struct ShoppingService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ShoppingService<'a> {
    /// Creates a new instance of [`ShoppingService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Aggregated shopping list for `start..=end` without persisting anything
    pub async fn preview(&self, start: NaiveDate, end: NaiveDate) -> Result<ShoppingListDto, Error> {
        validate_range(start, end)?;

        let converter = UnitConverter::load(self.db).await?;
        let contributions = planned_contributions(self.db, &converter, start, end).await?;
        let stores = group(self.db, &converter, contributions).await?;

        Ok(ShoppingListDto {
            id: None,
            start_date: start,
            end_date: end,
            created_at: None,
            total_items: count_lines(&stores),
            stores,
        })
    }

    /// Persists a shopping list for `start..=end`, one item per planned ingredient line
    ///
    /// Lists created more than `retention_days` ago are deleted first.
    ///
    /// # Returns
    /// - `Ok(ShoppingListDto)`: the new list, aggregated
    /// - `Err(Error::ValidationError)`: start after end, or a retention window reaching
    ///   outside the representable dates
    /// - `Err(Error::DbErr)`: database failure, nothing is written
    pub async fn generate(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        retention_days: i64,
    ) -> Result<ShoppingListDto, Error> {
        validate_range(start, end)?;

        let Some(cutoff) = Duration::try_days(retention_days)
            .and_then(|retention| Utc::now().naive_utc().checked_sub_signed(retention))
        else {
            return Err(Error::ValidationError(format!(
                "Retention of {} days is out of range",
                retention_days
            )));
        };

        let txn = self.db.begin().await?;

        let shopping_list_repository = ShoppingListRepository::new(&txn);
        let purged = shopping_list_repository.delete_older_than(cutoff).await?;
        if purged > 0 {
            tracing::info!("Deleted {} shopping lists older than {}", purged, cutoff);
        }

        let converter = UnitConverter::load(&txn).await?;
        let contributions = planned_contributions(&txn, &converter, start, end).await?;

        let list = shopping_list_repository.create(start, end).await?;
        let items = contributions
            .into_iter()
            .map(|contribution| NewShoppingListItem {
                meal_plan_id: contribution.meal_plan_id,
                recipe_id: contribution.recipe_id,
                ingredient_id: contribution.ingredient.id,
                quantity: contribution.quantity,
                unit_code: contribution.unit_code,
            })
            .collect();
        ShoppingListItemRepository::new(&txn)
            .create_many(list.id, items)
            .await?;

        txn.commit().await?;

        self.get(list.id).await
    }

    /// Persisted list re-aggregated per (ingredient, unit)
    ///
    /// Each item is credited to the recipe planned when the list was generated.
    pub async fn get(&self, list_id: i32) -> Result<ShoppingListDto, Error> {
        let Some(list) = ShoppingListRepository::new(self.db)
            .get_by_id(list_id)
            .await?
        else {
            return Err(Error::NotFound(format!(
                "Shopping list {} not found",
                list_id
            )));
        };

        self.aggregate_list(list).await
    }

    /// Most recently generated list, `None` when no list exists
    pub async fn latest(&self) -> Result<Option<ShoppingListDto>, Error> {
        match ShoppingListRepository::new(self.db).get_latest().await? {
            Some(list) => Ok(Some(self.aggregate_list(list).await?)),
            None => Ok(None),
        }
    }

    /// Sets the purchased state of one item
    ///
    /// Setting the state an item already has changes nothing.
    pub async fn set_purchased(&self, item_id: i32, purchased: bool) -> Result<ShoppingItemDto, Error> {
        let repository = ShoppingListItemRepository::new(self.db);
        let Some(item) = repository.get_by_id(item_id).await? else {
            return Err(Error::NotFound(format!(
                "Shopping list item {} not found",
                item_id
            )));
        };

        let item = repository.set_purchased(item, purchased).await?;

        Ok(ShoppingItemDto {
            id: item.id,
            ingredient_id: item.ingredient_id,
            quantity: item.quantity,
            unit_code: item.unit_code,
            purchased: item.purchased,
            purchased_at: item.purchased_at,
        })
    }

    /// Deletes the purchased items of a list that are bought at `store_name`
    ///
    /// Returns the number of deleted items.
    pub async fn delete_purchased(&self, list_id: i32, store_name: &str) -> Result<u64, Error> {
        if ShoppingListRepository::new(self.db)
            .get_by_id(list_id)
            .await?
            .is_none()
        {
            return Err(Error::NotFound(format!(
                "Shopping list {} not found",
                list_id
            )));
        }

        let item_repository = ShoppingListItemRepository::new(self.db);
        let ingredient_ids = item_repository
            .get_by_list(list_id)
            .await?
            .into_iter()
            .map(|item| item.ingredient_id)
            .collect::<BTreeSet<_>>();

        let ingredient_ids = IngredientRepository::new(self.db)
            .get_by_ids(ingredient_ids.into_iter().collect())
            .await?
            .into_iter()
            .filter(|ingredient| store_label(ingredient) == store_name)
            .map(|ingredient| ingredient.id)
            .collect();

        let result = item_repository
            .delete_purchased(list_id, ingredient_ids)
            .await?;

        Ok(result.rows_affected)
    }

    async fn aggregate_list(
        &self,
        list: entity::shopping_list::Model,
    ) -> Result<ShoppingListDto, Error> {
        let items = ShoppingListItemRepository::new(self.db)
            .get_by_list(list.id)
            .await?;

        let ingredients: HashMap<i32, entity::ingredient::Model> =
            IngredientRepository::new(self.db)
                .get_by_ids(unique(items.iter().map(|item| item.ingredient_id)))
                .await?
                .into_iter()
                .map(|ingredient| (ingredient.id, ingredient))
                .collect();

        let entries: HashMap<i32, entity::meal_plan::Model> = MealPlanRepository::new(self.db)
            .get_by_ids(unique(items.iter().map(|item| item.meal_plan_id)))
            .await?
            .into_iter()
            .map(|entry| (entry.id, entry))
            .collect();
        let recipes: HashMap<i32, entity::recipe::Model> = RecipeRepository::new(self.db)
            .get_by_ids(unique(items.iter().map(|item| item.recipe_id)))
            .await?
            .into_iter()
            .map(|recipe| (recipe.id, recipe))
            .collect();

        let mut contributions = Vec::with_capacity(items.len());
        for item in items {
            let Some(ingredient) = ingredients.get(&item.ingredient_id) else {
                return Err(Error::InternalError(format!(
                    "Ingredient {} of shopping list item {} is missing",
                    item.ingredient_id, item.id
                )));
            };
            let (Some(entry), Some(recipe)) = (
                entries.get(&item.meal_plan_id),
                recipes.get(&item.recipe_id),
            ) else {
                continue;
            };

            contributions.push(Contribution {
                item_id: Some(item.id),
                meal_plan_id: item.meal_plan_id,
                recipe_id: item.recipe_id,
                ingredient: ingredient.clone(),
                quantity: item.quantity,
                unit_code: item.unit_code,
                purchased: item.purchased,
                meal: MealContributionDto {
                    date: entry.date,
                    slot: entry.slot.parse().map_err(Error::ParseError)?,
                    recipe_title: recipe.title.clone(),
                },
            });
        }

        let converter = UnitConverter::load(self.db).await?;
        let stores = group(self.db, &converter, contributions).await?;

        Ok(ShoppingListDto {
            id: Some(list.id),
            start_date: list.start_date,
            end_date: list.end_date,
            created_at: Some(list.created_at),
            total_items: count_lines(&stores),
            stores,
        })
    }
}

fn validate_range(start: NaiveDate, end: NaiveDate) -> Result<(), Error> {
    if start > end {
        return Err(Error::ValidationError(
            "Start date must not be after end date".to_string(),
        ));
    }

    Ok(())
}

fn unique(ids: impl Iterator<Item = i32>) -> Vec<i32> {
    ids.collect::<BTreeSet<_>>().into_iter().collect()
}

fn store_label(ingredient: &entity::ingredient::Model) -> &str {
    ingredient
        .store_name
        .as_deref()
        .filter(|store| !store.is_empty())
        .unwrap_or(DEFAULT_STORE_NAME)
}

fn section_label(ingredient: &entity::ingredient::Model) -> &str {
    match ingredient.store_section.trim() {
        "" => DEFAULT_SECTION,
        section => section,
    }
}

fn count_lines(stores: &[ShoppingStoreDto]) -> usize {
    stores
        .iter()
        .flat_map(|store| &store.sections)
        .map(|section| section.lines.len())
        .sum()
}

/// (date, slot, recipe title) and recipe ID of each meal plan entry that has a recipe
async fn meal_descriptions<C: ConnectionTrait>(
    db: &C,
    meal_plan_ids: Vec<i32>,
) -> Result<HashMap<i32, (MealContributionDto, i32)>, Error> {
    let entries = MealPlanRepository::new(db).get_by_ids(meal_plan_ids).await?;
    let items = MealPlanItemRepository::new(db)
        .get_by_meal_plans(entries.iter().map(|entry| entry.id).collect())
        .await?;
    let recipes: HashMap<i32, entity::recipe::Model> = RecipeRepository::new(db)
        .get_by_ids(unique(items.iter().map(|item| item.recipe_id)))
        .await?
        .into_iter()
        .map(|recipe| (recipe.id, recipe))
        .collect();
    let recipe_by_entry: HashMap<i32, i32> = items
        .iter()
        .map(|item| (item.meal_plan_id, item.recipe_id))
        .collect();

    let mut meals = HashMap::new();
    for entry in entries {
        let Some(recipe) = recipe_by_entry
            .get(&entry.id)
            .and_then(|recipe_id| recipes.get(recipe_id))
        else {
            continue;
        };

        meals.insert(
            entry.id,
            (
                MealContributionDto {
                    date: entry.date,
                    slot: entry.slot.parse().map_err(Error::ParseError)?,
                    recipe_title: recipe.title.clone(),
                },
                recipe.id,
            ),
        );
    }

    Ok(meals)
}

/// One contribution per (meal plan entry in range, ingredient line of its recipe)
async fn planned_contributions<C: ConnectionTrait>(
    db: &C,
    converter: &UnitConverter,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<Contribution>, Error> {
    let entries = MealPlanRepository::new(db).get_in_range(start, end).await?;
    let diner_counts: HashMap<i32, i32> = entries
        .iter()
        .map(|entry| (entry.id, entry.diner_count))
        .collect();

    let meals = meal_descriptions(db, entries.iter().map(|entry| entry.id).collect()).await?;
    let recipe_ids = unique(meals.values().map(|(_, recipe_id)| *recipe_id));

    let mut lines_by_recipe: HashMap<i32, Vec<_>> = HashMap::new();
    for (line, ingredient) in RecipeIngredientRepository::new(db)
        .get_by_recipes(recipe_ids)
        .await?
    {
        let Some(ingredient) = ingredient else {
            return Err(Error::InternalError(format!(
                "Ingredient {} of recipe {} is missing",
                line.ingredient_id, line.recipe_id
            )));
        };
        lines_by_recipe
            .entry(line.recipe_id)
            .or_default()
            .push((line, ingredient));
    }

    let mut contributions = Vec::new();
    for entry in &entries {
        let Some((meal, recipe_id)) = meals.get(&entry.id) else {
            continue;
        };
        let diner_count = diner_counts.get(&entry.id).copied().unwrap_or_default();

        for (line, ingredient) in lines_by_recipe.get(recipe_id).into_iter().flatten() {
            let quantity = line.qty_per_serving * f64::from(diner_count);

            contributions.push(Contribution {
                item_id: None,
                meal_plan_id: entry.id,
                recipe_id: *recipe_id,
                quantity: converter.convert(
                    quantity,
                    &line.unit_code,
                    &ingredient.canonical_unit,
                ),
                unit_code: ingredient.canonical_unit.clone(),
                ingredient: ingredient.clone(),
                purchased: false,
                meal: meal.clone(),
            });
        }
    }

    Ok(contributions)
}

/// Sums contributions per (ingredient, unit) and groups the totals by store then section
///
/// Stores follow their configured order with unknown stores last; sections and lines are
/// sorted by name.
async fn group<C: ConnectionTrait>(
    db: &C,
    converter: &UnitConverter,
    contributions: Vec<Contribution>,
) -> Result<Vec<ShoppingStoreDto>, Error> {
    let mut totals: HashMap<(i32, String), Accumulated> = HashMap::new();

    for contribution in contributions {
        let total = totals
            .entry((contribution.ingredient.id, contribution.unit_code.clone()))
            .or_insert_with(|| Accumulated {
                ingredient: contribution.ingredient.clone(),
                quantity: 0.0,
                unit_code: contribution.unit_code.clone(),
                purchased: true,
                item_ids: Vec::new(),
                meals: BTreeSet::new(),
            });

        total.quantity += contribution.quantity;
        total.purchased &= contribution.purchased;
        total.item_ids.extend(contribution.item_id);
        total.meals.insert((
            contribution.meal.date,
            contribution.meal.slot,
            contribution.meal.recipe_title,
        ));
    }

    let mut stores: HashMap<String, HashMap<String, Vec<ShoppingLineDto>>> = HashMap::new();
    for total in totals.into_values() {
        let line = ShoppingLineDto {
            ingredient_id: total.ingredient.id,
            name: total.ingredient.name_normalized.clone(),
            quantity: total.quantity,
            display: converter.display(total.quantity, &total.unit_code),
            unit_code: total.unit_code,
            purchased: total.purchased,
            item_ids: total.item_ids,
            meals: total
                .meals
                .into_iter()
                .map(|(date, slot, recipe_title)| MealContributionDto {
                    date,
                    slot,
                    recipe_title,
                })
                .collect(),
        };

        stores
            .entry(store_label(&total.ingredient).to_string())
            .or_default()
            .entry(section_label(&total.ingredient).to_string())
            .or_default()
            .push(line);
    }

    let store_order: HashMap<String, i32> = StoreRepository::new(db)
        .get_all()
        .await?
        .into_iter()
        .map(|store| (store.name, store.order))
        .collect();

    let mut stores: Vec<ShoppingStoreDto> = stores
        .into_iter()
        .map(|(store_name, sections)| {
            let mut sections: Vec<ShoppingSectionDto> = sections
                .into_iter()
                .map(|(section, mut lines)| {
                    lines.sort_by(|a, b| a.name.cmp(&b.name).then(a.unit_code.cmp(&b.unit_code)));
                    ShoppingSectionDto { section, lines }
                })
                .collect();
            sections.sort_by(|a, b| a.section.cmp(&b.section));

            ShoppingStoreDto {
                store_name,
                sections,
            }
        })
        .collect();
    stores.sort_by_key(|store| {
        (
            store_order.get(&store.store_name).copied().unwrap_or(i32::MAX),
            store.store_name.clone(),
        )
    });

    Ok(stores)
}
