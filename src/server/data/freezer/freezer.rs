use sea_orm::{
    ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, QueryOrder,
};

pub struct FreezerRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> FreezerRepository<'a, C> {
    /// Creates a new instance of [`FreezerRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get_all(&self) -> Result<Vec<entity::freezer::Model>, DbErr> {
        entity::prelude::Freezer::find()
            .order_by_asc(entity::freezer::Column::Order)
            .order_by_asc(entity::freezer::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn get_by_id(
        &self,
        freezer_id: i32,
    ) -> Result<Option<entity::freezer::Model>, DbErr> {
        entity::prelude::Freezer::find_by_id(freezer_id)
            .one(self.db)
            .await
    }

    /// Appends a freezer after the current last one
    pub async fn create(&self, name: String) -> Result<entity::freezer::Model, DbErr> {
        let last = entity::prelude::Freezer::find()
            .order_by_desc(entity::freezer::Column::Order)
            .one(self.db)
            .await?;

        entity::freezer::ActiveModel {
            name: ActiveValue::Set(name),
            order: ActiveValue::Set(last.map_or(0, |freezer| freezer.order + 1)),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Renames and/or reorders a freezer
    ///
    /// Returns `Ok(None)` if the freezer does not exist.
    pub async fn update(
        &self,
        freezer_id: i32,
        name: Option<String>,
        order: Option<i32>,
    ) -> Result<Option<entity::freezer::Model>, DbErr> {
        let freezer = match self.get_by_id(freezer_id).await? {
            Some(freezer) => freezer,
            None => return Ok(None),
        };

        if name.is_none() && order.is_none() {
            return Ok(Some(freezer));
        }

        let mut freezer_am = freezer.into_active_model();
        if let Some(name) = name {
            freezer_am.name = ActiveValue::Set(name);
        }
        if let Some(order) = order {
            freezer_am.order = ActiveValue::Set(order);
        }

        Ok(Some(freezer_am.update(self.db).await?))
    }

    /// Deletes a freezer, its drawers and their items
    pub async fn delete(&self, freezer_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Freezer::delete_by_id(freezer_id)
            .exec(self.db)
            .await
    }
}
