use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait, QueryFilter,
    QueryOrder,
};

pub struct RecipeStepRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RecipeStepRepository<'a, C> {
    /// Creates a new instance of [`RecipeStepRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Replaces the steps of a recipe, numbering them from 1 in the given order
    pub async fn replace_for_recipe(
        &self,
        recipe_id: i32,
        steps: Vec<String>,
    ) -> Result<Vec<entity::recipe_step::Model>, DbErr> {
        self.delete_by_recipe(recipe_id).await?;

        if steps.is_empty() {
            return Ok(Vec::new());
        }

        let steps = steps
            .into_iter()
            .enumerate()
            .map(|(index, text)| entity::recipe_step::ActiveModel {
                recipe_id: ActiveValue::Set(recipe_id),
                order: ActiveValue::Set(index as i32 + 1),
                text: ActiveValue::Set(text),
                ..Default::default()
            });

        entity::prelude::RecipeStep::insert_many(steps)
            .exec_with_returning(self.db)
            .await
    }

    pub async fn get_by_recipe(
        &self,
        recipe_id: i32,
    ) -> Result<Vec<entity::recipe_step::Model>, DbErr> {
        entity::prelude::RecipeStep::find()
            .filter(entity::recipe_step::Column::RecipeId.eq(recipe_id))
            .order_by_asc(entity::recipe_step::Column::Order)
            .all(self.db)
            .await
    }

    pub async fn delete_by_recipe(&self, recipe_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::RecipeStep::delete_many()
            .filter(entity::recipe_step::Column::RecipeId.eq(recipe_id))
            .exec(self.db)
            .await
    }
}
