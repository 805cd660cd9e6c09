use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Midday,
    Evening,
}

impl MealSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Midday => "midday",
            Self::Evening => "evening",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "midday" => Ok(Self::Midday),
            "evening" => Ok(Self::Evening),
            other => Err(format!("unknown meal slot {:?}", other)),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct PlannedRecipeDto {
    pub id: i32,
    pub title: String,
    pub slug: String,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct MealPlanEntryDto {
    pub id: i32,
    pub date: NaiveDate,
    pub slot: MealSlot,
    pub diner_count: i32,
    pub recipe: Option<PlannedRecipeDto>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct AssignSlotDto {
    pub date: NaiveDate,
    pub slot: MealSlot,
    pub recipe_id: i32,
    pub diner_count: i32,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ClearSlotDto {
    pub date: NaiveDate,
    pub slot: MealSlot,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct UpdateDinersDto {
    pub date: NaiveDate,
    pub slot: MealSlot,
    pub diner_count: i32,
}
