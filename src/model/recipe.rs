use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::planning::MealSlot;

/// Recipe as shown in listings
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct RecipeSummaryDto {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub servings_default: i32,
    pub prep_min: Option<i32>,
    pub cook_min: Option<i32>,
    pub tags: Vec<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct RecipeStepDto {
    /// 1-based position
    pub order: i32,
    pub text: String,
}

/// One ingredient line, scaled to the servings the recipe is viewed for
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct RecipeIngredientDto {
    pub ingredient_id: i32,
    pub name: String,
    pub qty_per_serving: f64,
    /// `qty_per_serving` times the viewed servings
    pub quantity: f64,
    pub unit_code: String,
    /// Rounded quantity followed by the unit's display form, e.g. `"1.5 kg"`
    pub display: String,
    pub store_section: String,
    pub store_name: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct RecipeDto {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub servings_default: i32,
    /// Servings the ingredient quantities are scaled to
    pub servings: i32,
    pub prep_min: Option<i32>,
    pub cook_min: Option<i32>,
    pub tags: Vec<String>,
    pub steps: Vec<RecipeStepDto>,
    pub ingredients: Vec<RecipeIngredientDto>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct IngredientLineInputDto {
    pub name: String,
    pub qty_per_serving: f64,
    pub unit_code: String,
    /// Updates the ingredient's aisle when given
    pub store_section: Option<String>,
    /// Updates the ingredient's store when given
    pub store_name: Option<String>,
}

/// Body of recipe creation and replacement
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, Default)]
pub struct RecipeInputDto {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    /// Defaults to 2 when missing or zero
    pub servings_default: Option<i32>,
    pub prep_min: Option<i32>,
    pub cook_min: Option<i32>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Step texts; entries may contain several lines, each non-empty line becomes a step
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<IngredientLineInputDto>,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct AffectedSlotDto {
    pub date: NaiveDate,
    pub slot: MealSlot,
}

/// Deletion refused because meal plan entries still use the recipe
#[derive(Serialize, Deserialize, ToSchema)]
pub struct RecipeInUseDto {
    pub error: String,
    pub affected_plans: Vec<AffectedSlotDto>,
}
