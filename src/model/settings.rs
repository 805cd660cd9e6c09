use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::{auth::DeviceDto, unit::UnitDto};

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct StoreDto {
    pub id: i32,
    pub name: String,
    pub order: i32,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct CreateStoreDto {
    #[serde(default)]
    pub name: String,
}

/// Everything the settings page shows at once
#[derive(Serialize, Deserialize, ToSchema)]
pub struct SettingsDto {
    pub units: Vec<UnitDto>,
    pub stores: Vec<StoreDto>,
    /// Devices of the logged in user
    pub devices: Vec<DeviceDto>,
    /// Store aisles offered when classifying an ingredient
    pub store_sections: Vec<String>,
}
