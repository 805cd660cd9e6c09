use entity::string_list::StringList;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter,
};

pub struct IngredientRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> IngredientRepository<'a, C> {
    /// Creates a new instance of [`IngredientRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_name(
        &self,
        name_normalized: &str,
    ) -> Result<Option<entity::ingredient::Model>, DbErr> {
        entity::prelude::Ingredient::find()
            .filter(entity::ingredient::Column::NameNormalized.eq(name_normalized))
            .one(self.db)
            .await
    }

    pub async fn create(
        &self,
        name_normalized: String,
        canonical_unit: String,
        store_section: String,
        store_name: Option<String>,
    ) -> Result<entity::ingredient::Model, DbErr> {
        entity::ingredient::ActiveModel {
            name_normalized: ActiveValue::Set(name_normalized),
            canonical_unit: ActiveValue::Set(canonical_unit),
            store_section: ActiveValue::Set(store_section),
            store_name: ActiveValue::Set(store_name),
            synonyms: ActiveValue::Set(StringList::default()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Overwrites the aisle and store of an ingredient where a new value is given
    ///
    /// Returns the model untouched when both values are `None`.
    pub async fn update_classification(
        &self,
        ingredient: entity::ingredient::Model,
        store_section: Option<String>,
        store_name: Option<String>,
    ) -> Result<entity::ingredient::Model, DbErr> {
        if store_section.is_none() && store_name.is_none() {
            return Ok(ingredient);
        }

        let mut ingredient_am = ingredient.into_active_model();
        if let Some(section) = store_section {
            ingredient_am.store_section = ActiveValue::Set(section);
        }
        if let Some(store) = store_name {
            ingredient_am.store_name = ActiveValue::Set(Some(store));
        }

        ingredient_am.update(self.db).await
    }

    pub async fn get_by_ids(&self, ids: Vec<i32>) -> Result<Vec<entity::ingredient::Model>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Ingredient::find()
            .filter(entity::ingredient::Column::Id.is_in(ids))
            .all(self.db)
            .await
    }
}
