use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// What a unit measures. Quantities only convert between units of the same kind.
#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementKind {
    Mass,
    Volume,
    Count,
}

impl MeasurementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mass => "mass",
            Self::Volume => "volume",
            Self::Count => "count",
        }
    }

    /// Code of the unit every other unit of this kind is expressed against.
    pub fn base_unit(&self) -> &'static str {
        match self {
            Self::Mass => "g",
            Self::Volume => "mL",
            Self::Count => "piece",
        }
    }
}

impl fmt::Display for MeasurementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeasurementKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mass" => Ok(Self::Mass),
            "volume" => Ok(Self::Volume),
            "count" => Ok(Self::Count),
            other => Err(format!("unknown measurement kind {:?}", other)),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct UnitDto {
    pub code: String,
    pub kind: MeasurementKind,
    pub ratio_to_base: f64,
    pub singular_form: String,
    pub plural_form: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct UpdateUnitDto {
    pub singular_form: String,
    pub plural_form: String,
}
