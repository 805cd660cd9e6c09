use std::collections::HashMap;

use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::{
    model::{
        planning::MealSlot,
        recipe::{
            AffectedSlotDto, IngredientLineInputDto, RecipeDto, RecipeIngredientDto,
            RecipeInputDto, RecipeStepDto, RecipeSummaryDto,
        },
    },
    server::{
        data::{
            catalog::ingredient::IngredientRepository,
            planning::meal_plan::MealPlanRepository,
            recipe::{
                ingredient_line::{NewIngredientLine, RecipeIngredientRepository},
                recipe::{RecipeFields, RecipeRepository},
                step::RecipeStepRepository,
            },
        },
        error::Error,
        service::conversion::UnitConverter,
        util::normalize::{normalize_name, normalize_tags, slugify},
    },
};

pub const DEFAULT_SERVINGS: i32 = 2;
pub const DEFAULT_STORE_SECTION: &str = "épicerie salée";
const FALLBACK_SLUG: &str = "recette";

/// Outcome of a non-forced recipe deletion
#[derive(Debug, PartialEq)]
pub enum RecipeDeletion {
    Deleted,
    /// The recipe is still planned; nothing was deleted
    Blocked(Vec<AffectedSlotDto>),
}

/// Ingredient line that passed validation, ready to be stored
struct ValidatedLine {
    name: String,
    qty_per_serving: f64,
    unit_code: String,
    store_section: Option<String>,
    store_name: Option<String>,
}

pub struct RecipeService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RecipeService<'a> {
    /// Creates a new instance of [`RecipeService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists recipes, optionally filtered by a title substring and a tag
    pub async fn list(
        &self,
        query: Option<&str>,
        tag: Option<&str>,
    ) -> Result<Vec<RecipeSummaryDto>, Error> {
        let recipes = RecipeRepository::new(self.db).search(query).await?;
        let tag = tag.map(normalize_name).filter(|tag| !tag.is_empty());

        Ok(recipes
            .into_iter()
            .filter(|recipe| match &tag {
                Some(tag) => recipe.tags.0.contains(tag),
                None => true,
            })
            .map(|recipe| RecipeSummaryDto {
                id: recipe.id,
                title: recipe.title,
                slug: recipe.slug,
                servings_default: recipe.servings_default,
                prep_min: recipe.prep_min,
                cook_min: recipe.cook_min,
                tags: recipe.tags.0,
            })
            .collect())
    }

    /// Recipe with its steps and ingredient lines scaled to `servings`
    ///
    /// Falls back to the recipe's default servings when `servings` is missing or not
    /// positive.
    ///
    /// # Returns
    /// - `Ok(RecipeDto)`: the recipe
    /// - `Err(Error::NotFound)`: no recipe with this ID
    /// - `Err(Error::DbErr)`: database failure
    pub async fn get(&self, recipe_id: i32, servings: Option<i32>) -> Result<RecipeDto, Error> {
        let Some(recipe) = RecipeRepository::new(self.db).get_by_id(recipe_id).await? else {
            return Err(Error::NotFound(format!("Recipe {} not found", recipe_id)));
        };

        let servings = servings
            .filter(|servings| *servings > 0)
            .unwrap_or(recipe.servings_default);

        let steps = RecipeStepRepository::new(self.db)
            .get_by_recipe(recipe.id)
            .await?
            .into_iter()
            .map(|step| RecipeStepDto {
                order: step.order,
                text: step.text,
            })
            .collect();

        let converter = UnitConverter::load(self.db).await?;
        let mut ingredients = Vec::new();
        for (line, ingredient) in RecipeIngredientRepository::new(self.db)
            .get_by_recipe(recipe.id)
            .await?
        {
            let Some(ingredient) = ingredient else {
                return Err(Error::InternalError(format!(
                    "Ingredient {} of recipe {} is missing",
                    line.ingredient_id, recipe.id
                )));
            };

            let quantity = line.qty_per_serving * f64::from(servings);
            ingredients.push(RecipeIngredientDto {
                ingredient_id: ingredient.id,
                name: ingredient.name_normalized,
                qty_per_serving: line.qty_per_serving,
                quantity,
                display: converter.display(quantity, &line.unit_code),
                unit_code: line.unit_code,
                store_section: ingredient.store_section,
                store_name: ingredient.store_name,
            });
        }

        Ok(RecipeDto {
            id: recipe.id,
            title: recipe.title,
            slug: recipe.slug,
            description: recipe.description,
            servings_default: recipe.servings_default,
            servings,
            prep_min: recipe.prep_min,
            cook_min: recipe.cook_min,
            tags: recipe.tags.0,
            steps,
            ingredients,
            created_at: recipe.created_at,
            updated_at: recipe.updated_at,
        })
    }

    /// Creates a recipe with its steps and ingredient lines
    ///
    /// Unknown ingredients are created on the fly; known ones get their store section and
    /// store updated when the line provides them.
    ///
    /// # Returns
    /// - `Ok(RecipeDto)`: the created recipe
    /// - `Err(Error::ValidationError)`: missing title, unknown unit, or a unit that cannot
    ///   measure the ingredient
    /// - `Err(Error::DbErr)`: database failure, nothing is written
    pub async fn create(&self, input: RecipeInputDto) -> Result<RecipeDto, Error> {
        let recipe_id = self.save(None, input).await?;

        self.get(recipe_id, None).await
    }

    /// Replaces the content of a recipe, including its steps and ingredient lines
    ///
    /// # Returns
    /// - `Ok(RecipeDto)`: the updated recipe
    /// - `Err(Error::NotFound)`: no recipe with this ID
    /// - `Err(Error::ValidationError)`: same rules as [`Self::create`]
    /// - `Err(Error::DbErr)`: database failure, nothing is written
    pub async fn update(&self, recipe_id: i32, input: RecipeInputDto) -> Result<RecipeDto, Error> {
        if RecipeRepository::new(self.db)
            .get_by_id(recipe_id)
            .await?
            .is_none()
        {
            return Err(Error::NotFound(format!("Recipe {} not found", recipe_id)));
        }

        self.save(Some(recipe_id), input).await?;

        self.get(recipe_id, None).await
    }

    /// Deletes a recipe unless a meal plan entry still uses it
    ///
    /// # Returns
    /// - `Ok(RecipeDeletion::Deleted)`: the recipe, its steps and lines are gone
    /// - `Ok(RecipeDeletion::Blocked(_))`: every (date, slot) still using the recipe
    /// - `Err(Error::NotFound)`: no recipe with this ID
    pub async fn delete(&self, recipe_id: i32) -> Result<RecipeDeletion, Error> {
        let txn = self.db.begin().await?;

        let recipe_repository = RecipeRepository::new(&txn);
        if recipe_repository.get_by_id(recipe_id).await?.is_none() {
            return Err(Error::NotFound(format!("Recipe {} not found", recipe_id)));
        }

        let entries = MealPlanRepository::new(&txn)
            .find_referencing_recipe(recipe_id)
            .await?;

        if !entries.is_empty() {
            let mut affected = entries
                .into_iter()
                .map(|entry| -> Result<AffectedSlotDto, Error> {
                    Ok(AffectedSlotDto {
                        date: entry.date,
                        slot: entry.slot.parse::<MealSlot>().map_err(Error::ParseError)?,
                    })
                })
                .collect::<Result<Vec<_>, Error>>()?;
            affected.sort_by_key(|slot| (slot.date, slot.slot));

            tracing::debug!(
                "Refused to delete recipe {}: planned in {} slot(s)",
                recipe_id,
                affected.len()
            );

            return Ok(RecipeDeletion::Blocked(affected));
        }

        recipe_repository.delete(recipe_id).await?;

        txn.commit().await?;

        Ok(RecipeDeletion::Deleted)
    }

    /// Deletes a recipe along with every meal plan entry using it
    ///
    /// Returns the number of removed meal plan entries.
    pub async fn force_delete(&self, recipe_id: i32) -> Result<u64, Error> {
        let txn = self.db.begin().await?;

        let recipe_repository = RecipeRepository::new(&txn);
        if recipe_repository.get_by_id(recipe_id).await?.is_none() {
            return Err(Error::NotFound(format!("Recipe {} not found", recipe_id)));
        }

        let meal_plan_repository = MealPlanRepository::new(&txn);
        let entry_ids = meal_plan_repository
            .find_referencing_recipe(recipe_id)
            .await?
            .into_iter()
            .map(|entry| entry.id)
            .collect();
        let removed = meal_plan_repository.delete_many(entry_ids).await?;

        RecipeStepRepository::new(&txn)
            .delete_by_recipe(recipe_id)
            .await?;
        RecipeIngredientRepository::new(&txn)
            .delete_by_recipe(recipe_id)
            .await?;
        recipe_repository.delete(recipe_id).await?;

        txn.commit().await?;

        tracing::info!(
            "Force deleted recipe {} and {} meal plan entries",
            recipe_id,
            removed.rows_affected
        );

        Ok(removed.rows_affected)
    }

    /// Validates the input then writes the recipe, its steps and lines in one transaction
    async fn save(&self, recipe_id: Option<i32>, input: RecipeInputDto) -> Result<i32, Error> {
        let title = input.title.trim().to_string();
        if title.is_empty() {
            return Err(Error::ValidationError("Title is required".to_string()));
        }

        let servings_default = match input.servings_default {
            None | Some(0) => DEFAULT_SERVINGS,
            Some(servings) if servings < 0 => {
                return Err(Error::ValidationError(
                    "Servings must not be negative".to_string(),
                ))
            }
            Some(servings) => servings,
        };
        if input.prep_min.is_some_and(|min| min < 0) || input.cook_min.is_some_and(|min| min < 0) {
            return Err(Error::ValidationError(
                "Durations must not be negative".to_string(),
            ));
        }

        let steps: Vec<String> = input
            .steps
            .iter()
            .flat_map(|step| step.lines())
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        let txn = self.db.begin().await?;

        let converter = UnitConverter::load(&txn).await?;
        let lines = validate_lines(&txn, &converter, input.ingredients).await?;

        let recipe_repository = RecipeRepository::new(&txn);
        let slug = unique_slug(&recipe_repository, &title, recipe_id).await?;
        let fields = RecipeFields {
            title,
            slug,
            description: input
                .description
                .map(|description| description.trim().to_string())
                .filter(|description| !description.is_empty()),
            servings_default,
            prep_min: input.prep_min,
            cook_min: input.cook_min,
            tags: normalize_tags(&input.tags),
        };

        let recipe = match recipe_id {
            Some(recipe_id) => recipe_repository
                .update(recipe_id, fields)
                .await?
                .ok_or_else(|| Error::NotFound(format!("Recipe {} not found", recipe_id)))?,
            None => recipe_repository.create(fields).await?,
        };

        RecipeStepRepository::new(&txn)
            .replace_for_recipe(recipe.id, steps)
            .await?;

        let ingredient_repository = IngredientRepository::new(&txn);
        let mut new_lines = Vec::with_capacity(lines.len());
        for line in lines {
            let ingredient = match ingredient_repository.find_by_name(&line.name).await? {
                Some(ingredient) => {
                    ingredient_repository
                        .update_classification(ingredient, line.store_section, line.store_name)
                        .await?
                }
                None => {
                    let canonical_unit = converter
                        .kind(&line.unit_code)
                        .map(|kind| kind.base_unit().to_string())
                        .unwrap_or_else(|| line.unit_code.clone());

                    ingredient_repository
                        .create(
                            line.name,
                            canonical_unit,
                            line.store_section
                                .unwrap_or_else(|| DEFAULT_STORE_SECTION.to_string()),
                            line.store_name,
                        )
                        .await?
                }
            };

            new_lines.push(NewIngredientLine {
                ingredient_id: ingredient.id,
                qty_per_serving: line.qty_per_serving,
                unit_code: line.unit_code,
            });
        }

        RecipeIngredientRepository::new(&txn)
            .replace_for_recipe(recipe.id, new_lines)
            .await?;

        txn.commit().await?;

        Ok(recipe.id)
    }
}

/// Checks every ingredient line before anything is written
///
/// Lines whose name normalizes to nothing are dropped.
async fn validate_lines<C: ConnectionTrait>(
    db: &C,
    converter: &UnitConverter,
    lines: Vec<IngredientLineInputDto>,
) -> Result<Vec<ValidatedLine>, Error> {
    let ingredient_repository = IngredientRepository::new(db);
    let mut known_units: HashMap<String, String> = HashMap::new();
    let mut validated = Vec::with_capacity(lines.len());

    for line in lines {
        let name = normalize_name(&line.name);
        if name.is_empty() {
            continue;
        }

        let Some(kind) = converter.kind(&line.unit_code) else {
            return Err(Error::ValidationError(format!(
                "Unknown unit {:?} for {}",
                line.unit_code, name
            )));
        };
        if !line.qty_per_serving.is_finite() || line.qty_per_serving < 0.0 {
            return Err(Error::ValidationError(format!(
                "Invalid quantity for {}",
                name
            )));
        }

        let canonical_unit = match known_units.get(&name) {
            Some(unit) => Some(unit.clone()),
            None => ingredient_repository
                .find_by_name(&name)
                .await?
                .map(|ingredient| ingredient.canonical_unit),
        };
        let canonical_unit = canonical_unit.unwrap_or_else(|| kind.base_unit().to_string());
        if converter.kind(&canonical_unit).is_some_and(|canonical| canonical != kind) {
            return Err(Error::ValidationError(format!(
                "{} is measured in {}, it cannot use {}",
                name, canonical_unit, line.unit_code
            )));
        }
        known_units.insert(name.clone(), canonical_unit);

        validated.push(ValidatedLine {
            name,
            qty_per_serving: line.qty_per_serving,
            unit_code: line.unit_code,
            store_section: line
                .store_section
                .map(|section| section.trim().to_string())
                .filter(|section| !section.is_empty()),
            store_name: line
                .store_name
                .map(|store| store.trim().to_string())
                .filter(|store| !store.is_empty()),
        });
    }

    Ok(validated)
}

/// Slug derived from the title, suffixed `-2`, `-3`... until no other recipe uses it
async fn unique_slug<C: ConnectionTrait>(
    recipe_repository: &RecipeRepository<'_, C>,
    title: &str,
    exclude_id: Option<i32>,
) -> Result<String, Error> {
    let base = match slugify(title) {
        slug if slug.is_empty() => FALLBACK_SLUG.to_string(),
        slug => slug,
    };

    let mut candidate = base.clone();
    let mut suffix = 2;
    while recipe_repository.slug_exists(&candidate, exclude_id).await? {
        candidate = format!("{}-{}", base, suffix);
        suffix += 1;
    }

    Ok(candidate)
}
