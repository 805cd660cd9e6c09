use sea_orm::{
    ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr, EntityTrait, IntoActiveModel,
    QueryOrder,
};

pub struct UnitRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UnitRepository<'a, C> {
    /// Creates a new instance of [`UnitRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// All units, grouped by kind and smallest first
    pub async fn get_all(&self) -> Result<Vec<entity::unit::Model>, DbErr> {
        entity::prelude::Unit::find()
            .order_by_asc(entity::unit::Column::Kind)
            .order_by_asc(entity::unit::Column::RatioToBase)
            .all(self.db)
            .await
    }

    pub async fn get_by_code(&self, code: &str) -> Result<Option<entity::unit::Model>, DbErr> {
        entity::prelude::Unit::find_by_id(code.to_string())
            .one(self.db)
            .await
    }

    /// Updates the display forms of a unit
    ///
    /// Returns `Ok(None)` if no unit has the given code.
    pub async fn update_forms(
        &self,
        code: &str,
        singular_form: String,
        plural_form: String,
    ) -> Result<Option<entity::unit::Model>, DbErr> {
        let unit = match self.get_by_code(code).await? {
            Some(unit) => unit,
            None => return Ok(None),
        };

        let mut unit_am = unit.into_active_model();
        unit_am.singular_form = ActiveValue::Set(singular_form);
        unit_am.plural_form = ActiveValue::Set(plural_form);

        Ok(Some(unit_am.update(self.db).await?))
    }
}
