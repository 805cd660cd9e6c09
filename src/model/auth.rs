use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct LoginDto {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Required the first time a browser logs in
    pub device_name: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ChangePasswordDto {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
    #[serde(default)]
    pub confirm_password: String,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct DeviceDto {
    pub id: i32,
    pub device_name: String,
    pub created_at: NaiveDateTime,
    pub last_seen_at: NaiveDateTime,
}

/// The logged in user and the device of the current session
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub device: DeviceDto,
}
