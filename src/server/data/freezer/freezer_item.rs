use chrono::{NaiveDate, Utc};
use migration::{Expr, ExprTrait, Func};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::model::freezer::FreezerItemSort;

pub type ItemWithDrawer = (entity::freezer_item::Model, Option<entity::drawer::Model>);

/// Optional filters applied when listing freezer items
#[derive(Default)]
pub struct FreezerItemFilter {
    pub item_type: Option<String>,
    /// Case-insensitive substring of the title
    pub search: Option<String>,
    pub freezer_id: Option<i32>,
    pub sort: FreezerItemSort,
}

pub struct NewFreezerItem {
    pub drawer_id: i32,
    pub title: String,
    pub item_type: String,
    pub quantity: i32,
    pub expiration_date: NaiveDate,
}

#[derive(Default)]
pub struct FreezerItemChanges {
    pub drawer_id: Option<i32>,
    pub title: Option<String>,
    pub item_type: Option<String>,
    pub quantity: Option<i32>,
    pub expiration_date: Option<NaiveDate>,
}

impl FreezerItemChanges {
    pub fn is_empty(&self) -> bool {
        self.drawer_id.is_none()
            && self.title.is_none()
            && self.item_type.is_none()
            && self.quantity.is_none()
            && self.expiration_date.is_none()
    }
}

pub struct FreezerItemRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> FreezerItemRepository<'a, C> {
    /// Creates a new instance of [`FreezerItemRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get_by_id(
        &self,
        item_id: i32,
    ) -> Result<Option<entity::freezer_item::Model>, DbErr> {
        entity::prelude::FreezerItem::find_by_id(item_id)
            .one(self.db)
            .await
    }

    /// Items of the given drawers, soonest expiration first
    pub async fn get_by_drawers(
        &self,
        drawer_ids: Vec<i32>,
    ) -> Result<Vec<entity::freezer_item::Model>, DbErr> {
        if drawer_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::FreezerItem::find()
            .filter(entity::freezer_item::Column::DrawerId.is_in(drawer_ids))
            .order_by_asc(entity::freezer_item::Column::ExpirationDate)
            .order_by_asc(entity::freezer_item::Column::Id)
            .all(self.db)
            .await
    }

    /// Items matching `filter` along with their drawer
    pub async fn search(&self, filter: FreezerItemFilter) -> Result<Vec<ItemWithDrawer>, DbErr> {
        let mut select =
            entity::prelude::FreezerItem::find().find_also_related(entity::prelude::Drawer);

        if let Some(item_type) = filter.item_type {
            select = select.filter(entity::freezer_item::Column::ItemType.eq(item_type));
        }
        if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let pattern = format!("%{}%", search.to_lowercase());
            select = select.filter(
                Expr::expr(Func::lower(Expr::col((
                    entity::freezer_item::Entity,
                    entity::freezer_item::Column::Title,
                ))))
                .like(pattern),
            );
        }
        if let Some(freezer_id) = filter.freezer_id {
            select = select.filter(entity::drawer::Column::FreezerId.eq(freezer_id));
        }

        select = match filter.sort {
            FreezerItemSort::Expiration => {
                select.order_by_asc(entity::freezer_item::Column::ExpirationDate)
            }
            FreezerItemSort::Type => select
                .order_by_asc(entity::freezer_item::Column::ItemType)
                .order_by_asc(entity::freezer_item::Column::ExpirationDate),
            FreezerItemSort::Name => select.order_by_asc(entity::freezer_item::Column::Title),
        };

        select
            .order_by_asc(entity::freezer_item::Column::Id)
            .all(self.db)
            .await
    }

    /// Items expiring within `start..=end` along with their drawer, soonest first
    pub async fn expiring_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ItemWithDrawer>, DbErr> {
        entity::prelude::FreezerItem::find()
            .find_also_related(entity::prelude::Drawer)
            .filter(entity::freezer_item::Column::ExpirationDate.between(start, end))
            .order_by_asc(entity::freezer_item::Column::ExpirationDate)
            .order_by_asc(entity::freezer_item::Column::Id)
            .all(self.db)
            .await
    }

    /// Items whose expiration date is strictly before `date` along with their drawer
    pub async fn expired_before(&self, date: NaiveDate) -> Result<Vec<ItemWithDrawer>, DbErr> {
        entity::prelude::FreezerItem::find()
            .find_also_related(entity::prelude::Drawer)
            .filter(entity::freezer_item::Column::ExpirationDate.lt(date))
            .order_by_asc(entity::freezer_item::Column::ExpirationDate)
            .order_by_asc(entity::freezer_item::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn create(&self, item: NewFreezerItem) -> Result<entity::freezer_item::Model, DbErr> {
        entity::freezer_item::ActiveModel {
            drawer_id: ActiveValue::Set(item.drawer_id),
            title: ActiveValue::Set(item.title),
            item_type: ActiveValue::Set(item.item_type),
            quantity: ActiveValue::Set(item.quantity),
            expiration_date: ActiveValue::Set(item.expiration_date),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn update(
        &self,
        item: entity::freezer_item::Model,
        changes: FreezerItemChanges,
    ) -> Result<entity::freezer_item::Model, DbErr> {
        if changes.is_empty() {
            return Ok(item);
        }

        let mut item_am = item.into_active_model();

        if let Some(drawer_id) = changes.drawer_id {
            item_am.drawer_id = ActiveValue::Set(drawer_id);
        }
        if let Some(title) = changes.title {
            item_am.title = ActiveValue::Set(title);
        }
        if let Some(item_type) = changes.item_type {
            item_am.item_type = ActiveValue::Set(item_type);
        }
        if let Some(quantity) = changes.quantity {
            item_am.quantity = ActiveValue::Set(quantity);
        }
        if let Some(expiration_date) = changes.expiration_date {
            item_am.expiration_date = ActiveValue::Set(expiration_date);
        }

        item_am.update(self.db).await
    }

    pub async fn delete(&self, item_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::FreezerItem::delete_by_id(item_id)
            .exec(self.db)
            .await
    }
}
