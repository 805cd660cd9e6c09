use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

pub struct DrawerRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DrawerRepository<'a, C> {
    /// Creates a new instance of [`DrawerRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Every drawer, ordered by freezer then position
    pub async fn get_all(&self) -> Result<Vec<entity::drawer::Model>, DbErr> {
        entity::prelude::Drawer::find()
            .order_by_asc(entity::drawer::Column::FreezerId)
            .order_by_asc(entity::drawer::Column::Order)
            .order_by_asc(entity::drawer::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn get_by_freezer(
        &self,
        freezer_id: i32,
    ) -> Result<Vec<entity::drawer::Model>, DbErr> {
        entity::prelude::Drawer::find()
            .filter(entity::drawer::Column::FreezerId.eq(freezer_id))
            .order_by_asc(entity::drawer::Column::Order)
            .order_by_asc(entity::drawer::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn get_by_id(&self, drawer_id: i32) -> Result<Option<entity::drawer::Model>, DbErr> {
        entity::prelude::Drawer::find_by_id(drawer_id)
            .one(self.db)
            .await
    }

    /// Drawer with its freezer, `Ok(None)` if the drawer does not exist
    pub async fn get_with_freezer(
        &self,
        drawer_id: i32,
    ) -> Result<Option<(entity::drawer::Model, Option<entity::freezer::Model>)>, DbErr> {
        entity::prelude::Drawer::find_by_id(drawer_id)
            .find_also_related(entity::prelude::Freezer)
            .one(self.db)
            .await
    }

    /// Appends a drawer after the last drawer of the same freezer
    pub async fn create(
        &self,
        freezer_id: i32,
        name: String,
    ) -> Result<entity::drawer::Model, DbErr> {
        let last = entity::prelude::Drawer::find()
            .filter(entity::drawer::Column::FreezerId.eq(freezer_id))
            .order_by_desc(entity::drawer::Column::Order)
            .one(self.db)
            .await?;

        entity::drawer::ActiveModel {
            freezer_id: ActiveValue::Set(freezer_id),
            name: ActiveValue::Set(name),
            order: ActiveValue::Set(last.map_or(0, |drawer| drawer.order + 1)),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn update(
        &self,
        drawer: entity::drawer::Model,
        name: Option<String>,
        order: Option<i32>,
    ) -> Result<entity::drawer::Model, DbErr> {
        if name.is_none() && order.is_none() {
            return Ok(drawer);
        }

        let mut drawer_am = drawer.into_active_model();
        if let Some(name) = name {
            drawer_am.name = ActiveValue::Set(name);
        }
        if let Some(order) = order {
            drawer_am.order = ActiveValue::Set(order);
        }

        drawer_am.update(self.db).await
    }

    /// Deletes a drawer and its items
    pub async fn delete(&self, drawer_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Drawer::delete_by_id(drawer_id)
            .exec(self.db)
            .await
    }
}
