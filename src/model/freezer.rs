use std::{fmt, str::FromStr};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FreezerItemType {
    Entree,
    Plat,
    Dessert,
    AlimentBrut,
    PlatPrepare,
}

impl FreezerItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entree => "entree",
            Self::Plat => "plat",
            Self::Dessert => "dessert",
            Self::AlimentBrut => "aliment_brut",
            Self::PlatPrepare => "plat_prepare",
        }
    }
}

impl fmt::Display for FreezerItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FreezerItemType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "entree" => Ok(Self::Entree),
            "plat" => Ok(Self::Plat),
            "dessert" => Ok(Self::Dessert),
            "aliment_brut" => Ok(Self::AlimentBrut),
            "plat_prepare" => Ok(Self::PlatPrepare),
            other => Err(format!("unknown freezer item type {:?}", other)),
        }
    }
}

/// Sort order of the freezer item listing
#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FreezerItemSort {
    #[default]
    Expiration,
    Type,
    Name,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct FreezerItemDto {
    pub id: i32,
    pub drawer_id: i32,
    pub title: String,
    pub item_type: FreezerItemType,
    pub quantity: i32,
    pub expiration_date: NaiveDate,
    pub created_at: NaiveDateTime,
}

/// Item with the names of the drawer and freezer holding it
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct LocatedFreezerItemDto {
    #[serde(flatten)]
    pub item: FreezerItemDto,
    pub drawer_name: String,
    pub freezer_id: i32,
    pub freezer_name: String,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct DrawerDto {
    pub id: i32,
    pub freezer_id: i32,
    pub name: String,
    pub order: i32,
    pub items: Vec<FreezerItemDto>,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct FreezerDto {
    pub id: i32,
    pub name: String,
    pub order: i32,
    pub drawers: Vec<DrawerDto>,
}

/// Body for creating a freezer or a drawer
#[derive(Serialize, Deserialize, ToSchema)]
pub struct CreateContainerDto {
    #[serde(default)]
    pub name: String,
}

/// Body for renaming or reordering a freezer or a drawer
#[derive(Serialize, Deserialize, ToSchema, Default)]
pub struct UpdateContainerDto {
    pub name: Option<String>,
    pub order: Option<i32>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct CreateFreezerItemDto {
    #[serde(default)]
    pub title: String,
    pub item_type: FreezerItemType,
    /// Defaults to 1
    pub quantity: Option<i32>,
    pub expiration_date: NaiveDate,
    pub drawer_id: i32,
}

#[derive(Serialize, Deserialize, ToSchema, Default)]
pub struct UpdateFreezerItemDto {
    pub title: Option<String>,
    pub item_type: Option<FreezerItemType>,
    pub quantity: Option<i32>,
    pub expiration_date: Option<NaiveDate>,
    pub drawer_id: Option<i32>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct MoveFreezerItemDto {
    pub drawer_id: i32,
}

/// Items past their expiration date and items expiring within the alert window
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct ExpiringItemsDto {
    pub expiring: Vec<LocatedFreezerItemDto>,
    pub expired: Vec<LocatedFreezerItemDto>,
    pub total_urgent: usize,
}
