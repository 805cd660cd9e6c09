use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    QueryFilter, QueryOrder,
};

pub struct StoreRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> StoreRepository<'a, C> {
    /// Creates a new instance of [`StoreRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get_all(&self) -> Result<Vec<entity::store::Model>, DbErr> {
        entity::prelude::Store::find()
            .order_by_asc(entity::store::Column::Order)
            .order_by_asc(entity::store::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<entity::store::Model>, DbErr> {
        entity::prelude::Store::find()
            .filter(entity::store::Column::Name.eq(name))
            .one(self.db)
            .await
    }

    /// Appends a store after the current last one
    pub async fn create(&self, name: String) -> Result<entity::store::Model, DbErr> {
        let last = entity::prelude::Store::find()
            .order_by_desc(entity::store::Column::Order)
            .one(self.db)
            .await?;

        entity::store::ActiveModel {
            name: ActiveValue::Set(name),
            order: ActiveValue::Set(last.map_or(0, |store| store.order + 1)),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Deletes a store
    ///
    /// Returns OK regardless of the store existing, check [`DeleteResult::rows_affected`].
    pub async fn delete(&self, store_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Store::delete_by_id(store_id)
            .exec(self.db)
            .await
    }
}
