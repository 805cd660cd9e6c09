use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::planning::MealSlot;

/// A meal that contributed to a shopping line
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct MealContributionDto {
    pub date: NaiveDate,
    pub slot: MealSlot,
    pub recipe_title: String,
}

/// One ingredient to buy, summed over every meal in the range
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct ShoppingLineDto {
    pub ingredient_id: i32,
    pub name: String,
    /// Total in `unit_code`, unrounded
    pub quantity: f64,
    pub unit_code: String,
    /// Rounded quantity followed by the unit's display form
    pub display: String,
    /// `false` as soon as one contributing item is not purchased
    pub purchased: bool,
    /// Persisted items behind this line; empty for previews
    pub item_ids: Vec<i32>,
    pub meals: Vec<MealContributionDto>,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct ShoppingSectionDto {
    pub section: String,
    pub lines: Vec<ShoppingLineDto>,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct ShoppingStoreDto {
    pub store_name: String,
    pub sections: Vec<ShoppingSectionDto>,
}

/// A shopping list grouped by store, then by aisle
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct ShoppingListDto {
    /// `None` for a preview that was not persisted
    pub id: Option<i32>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: Option<NaiveDateTime>,
    pub stores: Vec<ShoppingStoreDto>,
    pub total_items: usize,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct GenerateShoppingListDto {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct SetPurchasedDto {
    pub purchased: bool,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct ShoppingItemDto {
    pub id: i32,
    pub ingredient_id: i32,
    pub quantity: f64,
    pub unit_code: String,
    pub purchased: bool,
    pub purchased_at: Option<NaiveDateTime>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct DeletedCountDto {
    pub deleted: u64,
}
