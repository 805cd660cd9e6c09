use chrono::{NaiveDate, NaiveDateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

pub struct ShoppingListRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ShoppingListRepository<'a, C> {
    /// Creates a new instance of [`ShoppingListRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<entity::shopping_list::Model, DbErr> {
        entity::shopping_list::ActiveModel {
            start_date: ActiveValue::Set(start_date),
            end_date: ActiveValue::Set(end_date),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn get_by_id(
        &self,
        list_id: i32,
    ) -> Result<Option<entity::shopping_list::Model>, DbErr> {
        entity::prelude::ShoppingList::find_by_id(list_id)
            .one(self.db)
            .await
    }

    /// Most recently created list
    pub async fn get_latest(&self) -> Result<Option<entity::shopping_list::Model>, DbErr> {
        entity::prelude::ShoppingList::find()
            .order_by_desc(entity::shopping_list::Column::CreatedAt)
            .order_by_desc(entity::shopping_list::Column::Id)
            .one(self.db)
            .await
    }

    /// Deletes lists created before `cutoff` along with their items
    ///
    /// Returns the number of deleted lists.
    pub async fn delete_older_than(&self, cutoff: NaiveDateTime) -> Result<u64, DbErr> {
        let list_ids: Vec<i32> = entity::prelude::ShoppingList::find()
            .select_only()
            .column(entity::shopping_list::Column::Id)
            .filter(entity::shopping_list::Column::CreatedAt.lt(cutoff))
            .into_tuple()
            .all(self.db)
            .await?;

        if list_ids.is_empty() {
            return Ok(0);
        }

        entity::prelude::ShoppingListItem::delete_many()
            .filter(entity::shopping_list_item::Column::ShoppingListId.is_in(list_ids.clone()))
            .exec(self.db)
            .await?;

        let result = entity::prelude::ShoppingList::delete_many()
            .filter(entity::shopping_list::Column::Id.is_in(list_ids))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
