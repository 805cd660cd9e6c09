use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestContext};

pub struct FreezerFixtures<'a> {
    pub(crate) test: &'a TestContext,
}

impl<'a> FreezerFixtures<'a> {
    pub async fn insert_freezer(
        &self,
        name: &str,
        order: i32,
    ) -> Result<entity::freezer::Model, TestError> {
        Ok(entity::prelude::Freezer::insert(entity::freezer::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            order: ActiveValue::Set(order),
            ..Default::default()
        })
        .exec_with_returning(&self.test.db)
        .await?)
    }

    pub async fn insert_drawer(
        &self,
        freezer_id: i32,
        name: &str,
        order: i32,
    ) -> Result<entity::drawer::Model, TestError> {
        Ok(entity::prelude::Drawer::insert(entity::drawer::ActiveModel {
            freezer_id: ActiveValue::Set(freezer_id),
            name: ActiveValue::Set(name.to_string()),
            order: ActiveValue::Set(order),
            ..Default::default()
        })
        .exec_with_returning(&self.test.db)
        .await?)
    }

    /// Insert a single item (quantity 1).
    pub async fn insert_item(
        &self,
        drawer_id: i32,
        title: &str,
        item_type: &str,
        expiration_date: NaiveDate,
    ) -> Result<entity::freezer_item::Model, TestError> {
        Ok(
            entity::prelude::FreezerItem::insert(entity::freezer_item::ActiveModel {
                drawer_id: ActiveValue::Set(drawer_id),
                title: ActiveValue::Set(title.to_string()),
                item_type: ActiveValue::Set(item_type.to_string()),
                quantity: ActiveValue::Set(1),
                expiration_date: ActiveValue::Set(expiration_date),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.test.db)
            .await?,
        )
    }
}
