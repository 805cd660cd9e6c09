use larder::{
    model::{planning::MealSlot, recipe::RecipeInputDto},
    server::{
        error::Error,
        service::recipe::{RecipeDeletion, RecipeService},
    },
};
use larder_test_utils::prelude::*;

use crate::util::{line, october, recipe_input, TestResult};

mod create {
    use super::*;

    /// Expect the recipe with normalized ingredients, split steps and a slug
    #[tokio::test]
    async fn creates_recipe_with_lines_and_steps() -> TestResult {
        let test = TestBuilder::new()
            .with_recipe_tables()
            .with_units()
            .build()
            .await?;

        let input = RecipeInputDto {
            steps: vec!["Mélanger la farine\n\n  Cuire 2 minutes ".to_string()],
            tags: vec!["Dessert".to_string(), "dessert".to_string()],
            ..recipe_input(
                "Crêpes Sucrées",
                vec![line("  Farine ", 62.5, "g"), line("Lait", 125.0, "mL")],
            )
        };

        let recipe = RecipeService::new(&test.db).create(input).await?;

        assert_eq!(recipe.slug, "crepes-sucrees");
        assert_eq!(recipe.servings_default, 2);
        assert_eq!(recipe.tags, vec!["dessert".to_string()]);
        assert_eq!(recipe.steps.len(), 2);
        assert_eq!(recipe.steps[0].order, 1);
        assert_eq!(recipe.steps[1].text, "Cuire 2 minutes");
        assert_eq!(recipe.ingredients.len(), 2);

        let flour = recipe
            .ingredients
            .iter()
            .find(|ingredient| ingredient.name == "farine")
            .unwrap();
        assert_eq!(flour.quantity, 125.0);
        assert_eq!(flour.display, "125 g");
        assert_eq!(flour.store_section, "épicerie salée");

        Ok(())
    }

    /// Expect -2 then -3 suffixes for recipes sharing a title
    #[tokio::test]
    async fn suffixes_duplicate_slugs() -> TestResult {
        let test = TestBuilder::new()
            .with_recipe_tables()
            .with_units()
            .build()
            .await?;
        let service = RecipeService::new(&test.db);

        let first = service.create(recipe_input("Soupe", vec![])).await?;
        let second = service.create(recipe_input("Soupe", vec![])).await?;
        let third = service.create(recipe_input("soupe", vec![])).await?;

        assert_eq!(first.slug, "soupe");
        assert_eq!(second.slug, "soupe-2");
        assert_eq!(third.slug, "soupe-3");

        Ok(())
    }

    /// Expect a fallback slug when the title normalizes to nothing
    #[tokio::test]
    async fn falls_back_for_empty_slug() -> TestResult {
        let test = TestBuilder::new()
            .with_recipe_tables()
            .with_units()
            .build()
            .await?;

        let recipe = RecipeService::new(&test.db)
            .create(recipe_input("!!!", vec![]))
            .await?;

        assert_eq!(recipe.slug, "recette");

        Ok(())
    }

    /// Expect ValidationError for a blank title
    #[tokio::test]
    async fn rejects_blank_title() -> TestResult {
        let test = TestBuilder::new()
            .with_recipe_tables()
            .with_units()
            .build()
            .await?;

        let result = RecipeService::new(&test.db)
            .create(recipe_input("   ", vec![]))
            .await;

        assert!(matches!(result, Err(Error::ValidationError(_))));

        Ok(())
    }

    /// Expect ValidationError and nothing written for an unknown unit
    #[tokio::test]
    async fn rejects_unknown_unit() -> TestResult {
        let test = TestBuilder::new()
            .with_recipe_tables()
            .with_units()
            .build()
            .await?;
        let service = RecipeService::new(&test.db);

        let result = service
            .create(recipe_input("Pain", vec![line("farine", 100.0, "pinch")]))
            .await;

        assert!(matches!(result, Err(Error::ValidationError(_))));
        assert!(service.list(None, None).await?.is_empty());

        Ok(())
    }

    /// Expect ValidationError when a mass ingredient is given in a volume unit
    #[tokio::test]
    async fn rejects_unit_of_another_kind() -> TestResult {
        let test = TestBuilder::new()
            .with_recipe_tables()
            .with_units()
            .build()
            .await?;
        test.recipe().insert_ingredient("farine", "g").await?;

        let result = RecipeService::new(&test.db)
            .create(recipe_input("Pain", vec![line("Farine", 0.1, "L")]))
            .await;

        assert!(matches!(result, Err(Error::ValidationError(_))));

        Ok(())
    }

    /// Expect ValidationError for negative servings
    #[tokio::test]
    async fn rejects_negative_servings() -> TestResult {
        let test = TestBuilder::new()
            .with_recipe_tables()
            .with_units()
            .build()
            .await?;

        let input = RecipeInputDto {
            servings_default: Some(-1),
            ..recipe_input("Pain", vec![])
        };
        let result = RecipeService::new(&test.db).create(input).await;

        assert!(matches!(result, Err(Error::ValidationError(_))));

        Ok(())
    }
}

mod get {
    use super::*;

    /// Expect quantities scaled to the requested servings
    #[tokio::test]
    async fn scales_to_requested_servings() -> TestResult {
        let test = TestBuilder::new()
            .with_recipe_tables()
            .with_units()
            .build()
            .await?;
        let recipe = test.recipe().insert_recipe("Gratin").await?;
        let potato = test.recipe().insert_ingredient("pomme de terre", "g").await?;
        test.recipe()
            .insert_line(recipe.id, potato.id, 250.0, "g")
            .await?;

        let scaled = RecipeService::new(&test.db).get(recipe.id, Some(6)).await?;

        assert_eq!(scaled.servings, 6);
        assert_eq!(scaled.ingredients[0].quantity, 1500.0);

        Ok(())
    }

    /// Expect the default servings when the requested count is not positive
    #[tokio::test]
    async fn ignores_non_positive_servings() -> TestResult {
        let test = TestBuilder::new()
            .with_recipe_tables()
            .with_units()
            .build()
            .await?;
        let recipe = test.recipe().insert_recipe("Gratin").await?;

        let fetched = RecipeService::new(&test.db).get(recipe.id, Some(0)).await?;

        assert_eq!(fetched.servings, 2);

        Ok(())
    }

    /// Expect NotFound for an unknown recipe
    #[tokio::test]
    async fn fails_for_unknown_recipe() -> TestResult {
        let test = TestBuilder::new()
            .with_recipe_tables()
            .with_units()
            .build()
            .await?;

        let result = RecipeService::new(&test.db).get(42, None).await;

        assert!(matches!(result, Err(Error::NotFound(_))));

        Ok(())
    }
}

mod list {
    use super::*;

    /// Expect only recipes matching both the title query and the tag
    #[tokio::test]
    async fn filters_by_query_and_tag() -> TestResult {
        let test = TestBuilder::new()
            .with_recipe_tables()
            .with_units()
            .build()
            .await?;
        let service = RecipeService::new(&test.db);
        let tagged = |title: &str, tag: &str| RecipeInputDto {
            tags: vec![tag.to_string()],
            ..recipe_input(title, vec![])
        };
        service.create(tagged("Tarte aux pommes", "dessert")).await?;
        service.create(tagged("Tarte salée", "plat")).await?;
        service.create(tagged("Compote", "dessert")).await?;

        let recipes = service.list(Some("tarte"), Some("Dessert")).await?;

        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].title, "Tarte aux pommes");

        Ok(())
    }
}

mod update {
    use super::*;

    /// Expect lines replaced and the slug kept when the title is unchanged
    #[tokio::test]
    async fn replaces_lines() -> TestResult {
        let test = TestBuilder::new()
            .with_recipe_tables()
            .with_units()
            .build()
            .await?;
        let service = RecipeService::new(&test.db);
        let created = service
            .create(recipe_input("Pain", vec![line("farine", 250.0, "g")]))
            .await?;

        let updated = service
            .update(
                created.id,
                recipe_input("Pain", vec![line("levure", 5.0, "g"), line("eau", 0.2, "L")]),
            )
            .await?;

        assert_eq!(updated.slug, "pain");
        let names: Vec<&str> = updated
            .ingredients
            .iter()
            .map(|ingredient| ingredient.name.as_str())
            .collect();
        assert!(names.contains(&"levure"));
        assert!(names.contains(&"eau"));
        assert!(!names.contains(&"farine"));

        Ok(())
    }

    /// Expect NotFound for an unknown recipe
    #[tokio::test]
    async fn fails_for_unknown_recipe() -> TestResult {
        let test = TestBuilder::new()
            .with_recipe_tables()
            .with_units()
            .build()
            .await?;

        let result = RecipeService::new(&test.db)
            .update(7, recipe_input("Pain", vec![]))
            .await;

        assert!(matches!(result, Err(Error::NotFound(_))));

        Ok(())
    }
}

mod delete {
    use super::*;

    /// Expect the deletion to be blocked with every slot using the recipe
    #[tokio::test]
    async fn blocks_when_planned() -> TestResult {
        let test = TestBuilder::new().with_planning_tables().build().await?;
        let recipe = test.recipe().insert_recipe("Gratin").await?;
        test.planning()
            .insert_entry(october(19), "midday", 2, Some(recipe.id))
            .await?;
        test.planning()
            .insert_entry(october(20), "evening", 4, Some(recipe.id))
            .await?;

        let service = RecipeService::new(&test.db);
        let result = service.delete(recipe.id).await?;

        let RecipeDeletion::Blocked(affected) = result else {
            panic!("expected the deletion to be blocked");
        };
        assert_eq!(affected.len(), 2);
        assert!(affected
            .iter()
            .any(|slot| slot.date == october(20) && slot.slot == MealSlot::Evening));
        assert!(service.get(recipe.id, None).await.is_ok());

        Ok(())
    }

    /// Expect affected slots ordered by date with midday before evening
    #[tokio::test]
    async fn lists_affected_slots_in_day_order() -> TestResult {
        let test = TestBuilder::new().with_planning_tables().build().await?;
        let recipe = test.recipe().insert_recipe("Gratin").await?;
        for (date, slot) in [
            (october(20), "midday"),
            (october(19), "evening"),
            (october(19), "midday"),
        ] {
            test.planning()
                .insert_entry(date, slot, 2, Some(recipe.id))
                .await?;
        }

        let result = RecipeService::new(&test.db).delete(recipe.id).await?;

        let RecipeDeletion::Blocked(affected) = result else {
            panic!("expected the deletion to be blocked");
        };
        let order: Vec<_> = affected.iter().map(|slot| (slot.date, slot.slot)).collect();
        assert_eq!(
            order,
            vec![
                (october(19), MealSlot::Midday),
                (october(19), MealSlot::Evening),
                (october(20), MealSlot::Midday),
            ]
        );

        Ok(())
    }

    /// Expect Deleted for a recipe no meal plan entry uses
    #[tokio::test]
    async fn deletes_unplanned_recipe() -> TestResult {
        let test = TestBuilder::new().with_planning_tables().build().await?;
        let recipe = test.recipe().insert_recipe("Gratin").await?;
        let service = RecipeService::new(&test.db);

        let result = service.delete(recipe.id).await?;

        assert!(matches!(result, RecipeDeletion::Deleted));
        assert!(matches!(
            service.get(recipe.id, None).await,
            Err(Error::NotFound(_))
        ));

        Ok(())
    }
}

mod force_delete {
    use super::*;

    /// Expect the recipe and its meal plan entries removed
    #[tokio::test]
    async fn removes_recipe_and_entries() -> TestResult {
        let test = TestBuilder::new().with_planning_tables().build().await?;
        let recipe = test.recipe().insert_recipe("Gratin").await?;
        let other = test.recipe().insert_recipe("Salade").await?;
        test.planning()
            .insert_entry(october(19), "midday", 2, Some(recipe.id))
            .await?;
        test.planning()
            .insert_entry(october(19), "evening", 2, Some(other.id))
            .await?;

        let removed = RecipeService::new(&test.db)
            .force_delete(recipe.id)
            .await?;

        assert_eq!(removed, 1);
        let remaining = larder::server::service::planning::PlanningService::new(&test.db)
            .list(october(19), october(19))
            .await?;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].slot, MealSlot::Evening);

        Ok(())
    }

    /// Expect zero removed entries for a recipe that was never planned
    #[tokio::test]
    async fn removes_unplanned_recipe() -> TestResult {
        let test = TestBuilder::new().with_planning_tables().build().await?;
        let recipe = test.recipe().insert_recipe("Gratin").await?;
        let service = RecipeService::new(&test.db);

        let removed = service.force_delete(recipe.id).await?;

        assert_eq!(removed, 0);
        assert!(matches!(
            service.get(recipe.id, None).await,
            Err(Error::NotFound(_))
        ));

        Ok(())
    }
}
