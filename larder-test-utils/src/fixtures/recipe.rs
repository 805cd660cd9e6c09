use chrono::Utc;
use entity::string_list::StringList;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestContext};

pub const DEFAULT_SECTION: &str = "épicerie salée";

pub struct RecipeFixtures<'a> {
    pub(crate) test: &'a TestContext,
}

impl<'a> RecipeFixtures<'a> {
    /// Insert an ingredient in the default section with no store.
    pub async fn insert_ingredient(
        &self,
        name: &str,
        canonical_unit: &str,
    ) -> Result<entity::ingredient::Model, TestError> {
        self.insert_ingredient_in(name, canonical_unit, DEFAULT_SECTION, None)
            .await
    }

    pub async fn insert_ingredient_in(
        &self,
        name: &str,
        canonical_unit: &str,
        store_section: &str,
        store_name: Option<&str>,
    ) -> Result<entity::ingredient::Model, TestError> {
        Ok(
            entity::prelude::Ingredient::insert(entity::ingredient::ActiveModel {
                name_normalized: ActiveValue::Set(name.to_string()),
                canonical_unit: ActiveValue::Set(canonical_unit.to_string()),
                store_section: ActiveValue::Set(store_section.to_string()),
                store_name: ActiveValue::Set(store_name.map(str::to_string)),
                synonyms: ActiveValue::Set(StringList::default()),
                ..Default::default()
            })
            .exec_with_returning(&self.test.db)
            .await?,
        )
    }

    /// Insert a recipe serving 2 with no steps or lines.
    ///
    /// The slug is the lowercased title with spaces replaced by `-`.
    pub async fn insert_recipe(&self, title: &str) -> Result<entity::recipe::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(entity::prelude::Recipe::insert(entity::recipe::ActiveModel {
            title: ActiveValue::Set(title.to_string()),
            slug: ActiveValue::Set(title.to_lowercase().replace(' ', "-")),
            description: ActiveValue::Set(None),
            servings_default: ActiveValue::Set(2),
            prep_min: ActiveValue::Set(None),
            cook_min: ActiveValue::Set(None),
            tags: ActiveValue::Set(StringList::default()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(&self.test.db)
        .await?)
    }

    pub async fn insert_step(
        &self,
        recipe_id: i32,
        order: i32,
        text: &str,
    ) -> Result<entity::recipe_step::Model, TestError> {
        Ok(
            entity::prelude::RecipeStep::insert(entity::recipe_step::ActiveModel {
                recipe_id: ActiveValue::Set(recipe_id),
                order: ActiveValue::Set(order),
                text: ActiveValue::Set(text.to_string()),
                ..Default::default()
            })
            .exec_with_returning(&self.test.db)
            .await?,
        )
    }

    pub async fn insert_line(
        &self,
        recipe_id: i32,
        ingredient_id: i32,
        qty_per_serving: f64,
        unit_code: &str,
    ) -> Result<entity::recipe_ingredient::Model, TestError> {
        Ok(
            entity::prelude::RecipeIngredient::insert(entity::recipe_ingredient::ActiveModel {
                recipe_id: ActiveValue::Set(recipe_id),
                ingredient_id: ActiveValue::Set(ingredient_id),
                qty_per_serving: ActiveValue::Set(qty_per_serving),
                unit_code: ActiveValue::Set(unit_code.to_string()),
                ..Default::default()
            })
            .exec_with_returning(&self.test.db)
            .await?,
        )
    }
}
