use chrono::Utc;
use entity::string_list::StringList;
use migration::{Expr, ExprTrait, Func};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};

/// Column values shared by recipe creation and update
pub struct RecipeFields {
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub servings_default: i32,
    pub prep_min: Option<i32>,
    pub cook_min: Option<i32>,
    pub tags: Vec<String>,
}

pub struct RecipeRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RecipeRepository<'a, C> {
    /// Creates a new instance of [`RecipeRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, fields: RecipeFields) -> Result<entity::recipe::Model, DbErr> {
        let now = Utc::now().naive_utc();

        entity::recipe::ActiveModel {
            title: ActiveValue::Set(fields.title),
            slug: ActiveValue::Set(fields.slug),
            description: ActiveValue::Set(fields.description),
            servings_default: ActiveValue::Set(fields.servings_default),
            prep_min: ActiveValue::Set(fields.prep_min),
            cook_min: ActiveValue::Set(fields.cook_min),
            tags: ActiveValue::Set(StringList(fields.tags)),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Overwrites every column of the recipe and bumps `updated_at`
    ///
    /// Returns `Ok(None)` if the recipe does not exist.
    pub async fn update(
        &self,
        recipe_id: i32,
        fields: RecipeFields,
    ) -> Result<Option<entity::recipe::Model>, DbErr> {
        let recipe = match self.get_by_id(recipe_id).await? {
            Some(recipe) => recipe,
            None => return Ok(None),
        };

        let mut recipe_am = recipe.into_active_model();
        recipe_am.title = ActiveValue::Set(fields.title);
        recipe_am.slug = ActiveValue::Set(fields.slug);
        recipe_am.description = ActiveValue::Set(fields.description);
        recipe_am.servings_default = ActiveValue::Set(fields.servings_default);
        recipe_am.prep_min = ActiveValue::Set(fields.prep_min);
        recipe_am.cook_min = ActiveValue::Set(fields.cook_min);
        recipe_am.tags = ActiveValue::Set(StringList(fields.tags));
        recipe_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        Ok(Some(recipe_am.update(self.db).await?))
    }

    pub async fn get_by_id(&self, recipe_id: i32) -> Result<Option<entity::recipe::Model>, DbErr> {
        entity::prelude::Recipe::find_by_id(recipe_id)
            .one(self.db)
            .await
    }

    pub async fn get_by_ids(&self, ids: Vec<i32>) -> Result<Vec<entity::recipe::Model>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Recipe::find()
            .filter(entity::recipe::Column::Id.is_in(ids))
            .all(self.db)
            .await
    }

    /// Recipes ordered by title, optionally restricted to titles containing `query`
    ///
    /// The match is case-insensitive.
    pub async fn search(&self, query: Option<&str>) -> Result<Vec<entity::recipe::Model>, DbErr> {
        let mut select = entity::prelude::Recipe::find();

        if let Some(query) = query.map(str::trim).filter(|q| !q.is_empty()) {
            let pattern = format!("%{}%", query.to_lowercase());
            select = select.filter(
                Expr::expr(Func::lower(Expr::col((
                    entity::recipe::Entity,
                    entity::recipe::Column::Title,
                ))))
                .like(pattern),
            );
        }

        select
            .order_by_asc(entity::recipe::Column::Title)
            .all(self.db)
            .await
    }

    /// Whether another recipe than `exclude_id` already uses `slug`
    pub async fn slug_exists(&self, slug: &str, exclude_id: Option<i32>) -> Result<bool, DbErr> {
        let mut select =
            entity::prelude::Recipe::find().filter(entity::recipe::Column::Slug.eq(slug));

        if let Some(exclude_id) = exclude_id {
            select = select.filter(entity::recipe::Column::Id.ne(exclude_id));
        }

        Ok(select.count(self.db).await? > 0)
    }

    /// Deletes a recipe
    ///
    /// Steps and ingredient lines are removed by the database cascade. Returns OK regardless
    /// of the recipe existing, check [`DeleteResult::rows_affected`].
    pub async fn delete(&self, recipe_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Recipe::delete_by_id(recipe_id)
            .exec(self.db)
            .await
    }
}
