use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter,
};

pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new instance of [`UserRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        username: String,
        password_hash: String,
    ) -> Result<entity::user::Model, DbErr> {
        entity::user::ActiveModel {
            username: ActiveValue::Set(username),
            password_hash: ActiveValue::Set(password_hash),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn get_by_id(&self, user_id: i32) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find_by_id(user_id).one(self.db).await
    }

    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Username.eq(username))
            .one(self.db)
            .await
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::User::find().count(self.db).await
    }

    pub async fn update_password_hash(
        &self,
        user: entity::user::Model,
        password_hash: String,
    ) -> Result<entity::user::Model, DbErr> {
        let mut user_am = user.into_active_model();
        user_am.password_hash = ActiveValue::Set(password_hash);

        user_am.update(self.db).await
    }
}
