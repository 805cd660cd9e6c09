use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestContext};

/// (code, kind, ratio to base)
pub const STANDARD_UNITS: &[(&str, &str, f64)] = &[
    ("g", "mass", 1.0),
    ("kg", "mass", 1000.0),
    ("mL", "volume", 1.0),
    ("L", "volume", 1000.0),
    ("cac", "volume", 5.0),
    ("cas", "volume", 15.0),
    ("piece", "count", 1.0),
];

pub struct UnitFixtures<'a> {
    pub(crate) test: &'a TestContext,
}

impl<'a> UnitFixtures<'a> {
    /// Insert a unit whose display forms are both its code.
    pub async fn insert_unit(
        &self,
        code: &str,
        kind: &str,
        ratio_to_base: f64,
    ) -> Result<entity::unit::Model, TestError> {
        Ok(entity::prelude::Unit::insert(entity::unit::ActiveModel {
            code: ActiveValue::Set(code.to_string()),
            kind: ActiveValue::Set(kind.to_string()),
            ratio_to_base: ActiveValue::Set(ratio_to_base),
            singular_form: ActiveValue::Set(code.to_string()),
            plural_form: ActiveValue::Set(code.to_string()),
        })
        .exec_with_returning(&self.test.db)
        .await?)
    }

    pub async fn insert_standard_units(&self) -> Result<(), TestError> {
        for (code, kind, ratio) in STANDARD_UNITS {
            self.insert_unit(code, kind, *ratio).await?;
        }

        Ok(())
    }

    pub async fn insert_store(
        &self,
        name: &str,
        order: i32,
    ) -> Result<entity::store::Model, TestError> {
        Ok(entity::prelude::Store::insert(entity::store::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            order: ActiveValue::Set(order),
            ..Default::default()
        })
        .exec_with_returning(&self.test.db)
        .await?)
    }
}
