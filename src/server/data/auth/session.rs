use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    QueryFilter,
};

pub struct SessionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SessionRepository<'a, C> {
    /// Creates a new instance of [`SessionRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: i32,
        device_id: i32,
        token: String,
        expires_at: NaiveDateTime,
    ) -> Result<entity::session::Model, DbErr> {
        entity::session::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            device_id: ActiveValue::Set(device_id),
            token: ActiveValue::Set(token),
            expires_at: ActiveValue::Set(expires_at),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn find_by_token(&self, token: &str) -> Result<Option<entity::session::Model>, DbErr> {
        entity::prelude::Session::find()
            .filter(entity::session::Column::Token.eq(token))
            .one(self.db)
            .await
    }

    pub async fn delete(&self, session_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Session::delete_by_id(session_id)
            .exec(self.db)
            .await
    }

    pub async fn delete_by_token(&self, token: &str) -> Result<DeleteResult, DbErr> {
        entity::prelude::Session::delete_many()
            .filter(entity::session::Column::Token.eq(token))
            .exec(self.db)
            .await
    }

    pub async fn delete_by_device(&self, device_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Session::delete_many()
            .filter(entity::session::Column::DeviceId.eq(device_id))
            .exec(self.db)
            .await
    }
}
