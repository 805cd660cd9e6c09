use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The response when an error occurs with an API request
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    /// The error message
    pub error: String,
}

/// Login refused because the device is unknown and no device name was given
#[derive(Serialize, Deserialize, ToSchema)]
pub struct DeviceNameRequiredDto {
    pub error: String,
    /// Always `true`; the client should prompt for a device name and retry
    pub needs_device_name: bool,
}
