//! Quantity conversion between units of the same measurement kind.

use std::collections::HashMap;

use sea_orm::{ConnectionTrait, DbErr};

use crate::{
    model::unit::MeasurementKind,
    server::{data::catalog::unit::UnitRepository, util::quantity::format_with_unit},
};

/// Unit table held in memory for the duration of one operation.
pub struct UnitConverter {
    units: HashMap<String, entity::unit::Model>,
}

impl UnitConverter {
    pub fn new(units: Vec<entity::unit::Model>) -> Self {
        Self {
            units: units
                .into_iter()
                .map(|unit| (unit.code.clone(), unit))
                .collect(),
        }
    }

    /// Loads every unit from the database
    pub async fn load<C: ConnectionTrait>(db: &C) -> Result<Self, DbErr> {
        Ok(Self::new(UnitRepository::new(db).get_all().await?))
    }

    pub fn get(&self, code: &str) -> Option<&entity::unit::Model> {
        self.units.get(code)
    }

    /// Measurement kind of a unit, `None` for unknown codes
    pub fn kind(&self, code: &str) -> Option<MeasurementKind> {
        self.get(code).and_then(|unit| unit.kind.parse().ok())
    }

    /// Converts `quantity` expressed in `from` into `to`
    ///
    /// Quantities pass through unchanged when either unit is unknown or the units measure
    /// different kinds. No rounding is applied.
    pub fn convert(&self, quantity: f64, from: &str, to: &str) -> f64 {
        if from == to {
            return quantity;
        }

        let (Some(source), Some(target)) = (self.get(from), self.get(to)) else {
            tracing::warn!(
                "Cannot convert {} from {} to {}: unknown unit, keeping quantity as is",
                quantity,
                from,
                to
            );
            return quantity;
        };

        if source.kind != target.kind {
            tracing::warn!(
                "Cannot convert {} from {} ({}) to {} ({}): kinds differ, keeping quantity as is",
                quantity,
                from,
                source.kind,
                to,
                target.kind
            );
            return quantity;
        }

        quantity * (source.ratio_to_base / target.ratio_to_base)
    }

    /// Renders a quantity with the display form of its unit, e.g. `1.5 kg` or `2 pièces`
    pub fn display(&self, quantity: f64, code: &str) -> String {
        match self.get(code) {
            Some(unit) => format_with_unit(quantity, &unit.singular_form, &unit.plural_form),
            None => format_with_unit(quantity, code, code),
        }
    }
}
