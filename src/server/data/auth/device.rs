use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

pub struct DeviceRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DeviceRepository<'a, C> {
    /// Creates a new instance of [`DeviceRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: i32,
        fingerprint: String,
        device_name: String,
    ) -> Result<entity::device::Model, DbErr> {
        let now = Utc::now().naive_utc();

        entity::device::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            fingerprint: ActiveValue::Set(fingerprint),
            device_name: ActiveValue::Set(device_name),
            created_at: ActiveValue::Set(now),
            last_seen_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn get_by_id(&self, device_id: i32) -> Result<Option<entity::device::Model>, DbErr> {
        entity::prelude::Device::find_by_id(device_id)
            .one(self.db)
            .await
    }

    pub async fn find_by_fingerprint(
        &self,
        fingerprint: &str,
    ) -> Result<Option<entity::device::Model>, DbErr> {
        entity::prelude::Device::find()
            .filter(entity::device::Column::Fingerprint.eq(fingerprint))
            .one(self.db)
            .await
    }

    /// Devices of a user, most recently seen first
    pub async fn get_by_user(&self, user_id: i32) -> Result<Vec<entity::device::Model>, DbErr> {
        entity::prelude::Device::find()
            .filter(entity::device::Column::UserId.eq(user_id))
            .order_by_desc(entity::device::Column::LastSeenAt)
            .all(self.db)
            .await
    }

    /// Marks a device as seen now, assigning it to `user_id`
    pub async fn touch(
        &self,
        device: entity::device::Model,
        user_id: i32,
    ) -> Result<entity::device::Model, DbErr> {
        let mut device_am = device.into_active_model();
        device_am.user_id = ActiveValue::Set(user_id);
        device_am.last_seen_at = ActiveValue::Set(Utc::now().naive_utc());

        device_am.update(self.db).await
    }

    pub async fn delete(&self, device_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Device::delete_by_id(device_id)
            .exec(self.db)
            .await
    }
}
