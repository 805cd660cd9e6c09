use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait, QueryFilter,
    QueryOrder,
};

/// An ingredient line ready to be stored against a recipe
pub struct NewIngredientLine {
    pub ingredient_id: i32,
    pub qty_per_serving: f64,
    pub unit_code: String,
}

pub type LineWithIngredient = (
    entity::recipe_ingredient::Model,
    Option<entity::ingredient::Model>,
);

pub struct RecipeIngredientRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RecipeIngredientRepository<'a, C> {
    /// Creates a new instance of [`RecipeIngredientRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Replaces every ingredient line of a recipe
    pub async fn replace_for_recipe(
        &self,
        recipe_id: i32,
        lines: Vec<NewIngredientLine>,
    ) -> Result<Vec<entity::recipe_ingredient::Model>, DbErr> {
        self.delete_by_recipe(recipe_id).await?;

        if lines.is_empty() {
            return Ok(Vec::new());
        }

        let lines = lines
            .into_iter()
            .map(|line| entity::recipe_ingredient::ActiveModel {
                recipe_id: ActiveValue::Set(recipe_id),
                ingredient_id: ActiveValue::Set(line.ingredient_id),
                qty_per_serving: ActiveValue::Set(line.qty_per_serving),
                unit_code: ActiveValue::Set(line.unit_code),
                ..Default::default()
            });

        entity::prelude::RecipeIngredient::insert_many(lines)
            .exec_with_returning(self.db)
            .await
    }

    /// Ingredient lines of a recipe with their ingredient, ordered by store section
    pub async fn get_by_recipe(&self, recipe_id: i32) -> Result<Vec<LineWithIngredient>, DbErr> {
        self.get_by_recipes(vec![recipe_id]).await
    }

    /// Ingredient lines of several recipes with their ingredient, ordered by store section
    pub async fn get_by_recipes(
        &self,
        recipe_ids: Vec<i32>,
    ) -> Result<Vec<LineWithIngredient>, DbErr> {
        if recipe_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::RecipeIngredient::find()
            .filter(entity::recipe_ingredient::Column::RecipeId.is_in(recipe_ids))
            .find_also_related(entity::prelude::Ingredient)
            .order_by_asc(entity::ingredient::Column::StoreSection)
            .order_by_asc(entity::recipe_ingredient::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn delete_by_recipe(&self, recipe_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::RecipeIngredient::delete_many()
            .filter(entity::recipe_ingredient::Column::RecipeId.eq(recipe_id))
            .exec(self.db)
            .await
    }
}
