use chrono::{Duration, Utc};
use larder::{
    model::{
        planning::{AssignSlotDto, MealSlot},
        shopping::ShoppingListDto,
    },
    server::{
        error::Error,
        service::{planning::PlanningService, shopping::ShoppingService},
    },
};
use larder_test_utils::prelude::*;
use sea_orm::{ActiveModelTrait, ActiveValue, EntityTrait, IntoActiveModel};

use crate::util::{october, TestResult};

/// Retention used when generating lists in tests
const RETENTION_DAYS: i64 = 28;

fn line_named<'a>(
    list: &'a ShoppingListDto,
    name: &str,
) -> Option<&'a larder::model::shopping::ShoppingLineDto> {
    list.stores
        .iter()
        .flat_map(|store| &store.sections)
        .flat_map(|section| &section.lines)
        .find(|line| line.name == name)
}

mod preview {
    use super::*;

    /// Expect an empty list for a range without planned meals
    #[tokio::test]
    async fn empty_range_has_no_items() -> TestResult {
        let test = TestBuilder::new()
            .with_shopping_tables()
            .with_units()
            .build()
            .await?;

        let list = ShoppingService::new(&test.db)
            .preview(october(19), october(25))
            .await?;

        assert_eq!(list.total_items, 0);
        assert!(list.stores.is_empty());
        assert!(list.id.is_none());

        Ok(())
    }

    /// Expect 25 g per serving for 4 diners merged with 0.05 kg for 2 diners into 200 g
    #[tokio::test]
    async fn scales_and_merges_in_canonical_unit() -> TestResult {
        let test = TestBuilder::new()
            .with_shopping_tables()
            .with_units()
            .build()
            .await?;
        let butter = test.recipe().insert_ingredient("beurre", "g").await?;
        let cake = test.recipe().insert_recipe("Gâteau").await?;
        let sauce = test.recipe().insert_recipe("Sauce").await?;
        test.recipe().insert_line(cake.id, butter.id, 25.0, "g").await?;
        test.recipe()
            .insert_line(sauce.id, butter.id, 0.05, "kg")
            .await?;
        test.planning()
            .insert_entry(october(19), "midday", 4, Some(cake.id))
            .await?;
        test.planning()
            .insert_entry(october(20), "evening", 2, Some(sauce.id))
            .await?;

        let list = ShoppingService::new(&test.db)
            .preview(october(19), october(20))
            .await?;

        assert_eq!(list.total_items, 1);
        let line = line_named(&list, "beurre").unwrap();
        assert_eq!(line.unit_code, "g");
        assert!((line.quantity - 200.0).abs() < 1e-9);
        assert_eq!(line.meals.len(), 2);

        Ok(())
    }

    /// Expect entries outside the range and entries without recipe to be ignored
    #[tokio::test]
    async fn ignores_entries_outside_range() -> TestResult {
        let test = TestBuilder::new()
            .with_shopping_tables()
            .with_units()
            .build()
            .await?;
        let flour = test.recipe().insert_ingredient("farine", "g").await?;
        let bread = test.recipe().insert_recipe("Pain").await?;
        test.recipe().insert_line(bread.id, flour.id, 100.0, "g").await?;
        test.planning()
            .insert_entry(october(18), "midday", 2, Some(bread.id))
            .await?;
        test.planning()
            .insert_entry(october(19), "midday", 2, None)
            .await?;

        let list = ShoppingService::new(&test.db)
            .preview(october(19), october(25))
            .await?;

        assert_eq!(list.total_items, 0);

        Ok(())
    }

    /// Expect stores in store order and ingredients without store under the default store
    #[tokio::test]
    async fn groups_by_store_and_section() -> TestResult {
        let test = TestBuilder::new()
            .with_shopping_tables()
            .with_units()
            .with_stores()
            .build()
            .await?;
        let rice = test
            .recipe()
            .insert_ingredient_in("riz", "g", "épicerie salée", Some("Auchan"))
            .await?;
        let salt = test
            .recipe()
            .insert_ingredient_in("sel", "g", "épicerie salée", Some("Placard"))
            .await?;
        let leek = test
            .recipe()
            .insert_ingredient_in("poireau", "piece", "fruits et légumes", None)
            .await?;
        let risotto = test.recipe().insert_recipe("Risotto").await?;
        for (ingredient, qty, unit) in [(rice.id, 80.0, "g"), (salt.id, 2.0, "g"), (leek.id, 0.5, "piece")] {
            test.recipe()
                .insert_line(risotto.id, ingredient, qty, unit)
                .await?;
        }
        test.planning()
            .insert_entry(october(19), "evening", 2, Some(risotto.id))
            .await?;

        let list = ShoppingService::new(&test.db)
            .preview(october(19), october(19))
            .await?;

        let stores: Vec<&str> = list
            .stores
            .iter()
            .map(|store| store.store_name.as_str())
            .collect();
        assert_eq!(stores, vec!["Placard", "Auchan", "Supermarché"]);
        assert_eq!(list.stores[2].sections[0].section, "fruits et légumes");
        assert_eq!(list.total_items, 3);

        Ok(())
    }

    /// Expect a zero-quantity line when the slot has no diners
    #[tokio::test]
    async fn keeps_line_for_zero_diners() -> TestResult {
        let test = TestBuilder::new()
            .with_shopping_tables()
            .with_units()
            .build()
            .await?;
        let flour = test.recipe().insert_ingredient("farine", "g").await?;
        let bread = test.recipe().insert_recipe("Pain").await?;
        test.recipe().insert_line(bread.id, flour.id, 100.0, "g").await?;
        test.planning()
            .insert_entry(october(19), "midday", 0, Some(bread.id))
            .await?;

        let list = ShoppingService::new(&test.db)
            .preview(october(19), october(19))
            .await?;

        assert_eq!(list.total_items, 1);
        let line = line_named(&list, "farine").unwrap();
        assert_eq!(line.quantity, 0.0);
        assert_eq!(line.meals.len(), 1);

        Ok(())
    }

    /// Expect ValidationError when start is after end
    #[tokio::test]
    async fn rejects_inverted_range() -> TestResult {
        let test = TestBuilder::new()
            .with_shopping_tables()
            .with_units()
            .build()
            .await?;

        let result = ShoppingService::new(&test.db)
            .preview(october(25), october(19))
            .await;

        assert!(matches!(result, Err(Error::ValidationError(_))));

        Ok(())
    }
}

mod generate {
    use super::*;

    /// Expect the persisted list to read back like the preview
    #[tokio::test]
    async fn persists_aggregated_list() -> TestResult {
        let test = TestBuilder::new()
            .with_shopping_tables()
            .with_units()
            .build()
            .await?;
        let butter = test.recipe().insert_ingredient("beurre", "g").await?;
        let cake = test.recipe().insert_recipe("Gâteau").await?;
        test.recipe().insert_line(cake.id, butter.id, 25.0, "g").await?;
        test.planning()
            .insert_entry(october(19), "midday", 4, Some(cake.id))
            .await?;
        test.planning()
            .insert_entry(october(21), "midday", 4, Some(cake.id))
            .await?;
        let service = ShoppingService::new(&test.db);

        let generated = service
            .generate(october(19), october(25), RETENTION_DAYS)
            .await?;
        let latest = service.latest().await?.unwrap();

        assert!(generated.id.is_some());
        assert_eq!(latest.id, generated.id);
        let line = line_named(&latest, "beurre").unwrap();
        assert_eq!(line.quantity, 200.0);
        assert_eq!(line.item_ids.len(), 2);
        assert!(!line.purchased);

        Ok(())
    }

    /// Expect saved items to stay credited to the recipe planned at generation time
    #[tokio::test]
    async fn keeps_recipe_after_slot_reassignment() -> TestResult {
        let test = TestBuilder::new()
            .with_shopping_tables()
            .with_units()
            .build()
            .await?;
        let butter = test.recipe().insert_ingredient("beurre", "g").await?;
        let leek = test.recipe().insert_ingredient("poireau", "piece").await?;
        let cake = test.recipe().insert_recipe("Gâteau").await?;
        let soup = test.recipe().insert_recipe("Soupe").await?;
        test.recipe().insert_line(cake.id, butter.id, 25.0, "g").await?;
        test.recipe().insert_line(soup.id, leek.id, 0.5, "piece").await?;
        test.planning()
            .insert_entry(october(19), "midday", 4, Some(cake.id))
            .await?;
        let service = ShoppingService::new(&test.db);
        let generated = service
            .generate(october(19), october(19), RETENTION_DAYS)
            .await?;

        PlanningService::new(&test.db)
            .assign(AssignSlotDto {
                date: october(19),
                slot: MealSlot::Midday,
                recipe_id: soup.id,
                diner_count: 4,
            })
            .await?;
        let saved = service.get(generated.id.unwrap()).await?;

        let line = line_named(&saved, "beurre").unwrap();
        let titles: Vec<&str> = line
            .meals
            .iter()
            .map(|meal| meal.recipe_title.as_str())
            .collect();
        assert_eq!(titles, vec!["Gâteau"]);
        assert!(line_named(&saved, "poireau").is_none());

        Ok(())
    }

    /// Expect lists older than the retention window to be deleted on generation
    #[tokio::test]
    async fn purges_lists_past_retention() -> TestResult {
        let test = TestBuilder::new()
            .with_shopping_tables()
            .with_units()
            .build()
            .await?;
        let service = ShoppingService::new(&test.db);
        let old = service
            .generate(october(19), october(25), RETENTION_DAYS)
            .await?;
        let old_id = old.id.unwrap();
        let recent = service
            .generate(october(19), october(25), RETENTION_DAYS)
            .await?;
        let recent_id = recent.id.unwrap();

        let stored = entity::prelude::ShoppingList::find_by_id(old_id)
            .one(&test.db)
            .await?
            .unwrap();
        let mut stored_am = stored.into_active_model();
        stored_am.created_at =
            ActiveValue::Set(Utc::now().naive_utc() - Duration::days(RETENTION_DAYS + 1));
        stored_am.update(&test.db).await?;

        let newest = service
            .generate(october(19), october(25), RETENTION_DAYS)
            .await?;

        assert!(matches!(service.get(old_id).await, Err(Error::NotFound(_))));
        assert!(service.get(recent_id).await.is_ok());
        assert!(service.get(newest.id.unwrap()).await.is_ok());

        Ok(())
    }

    /// Expect ValidationError instead of a panic for an unrepresentable retention
    #[tokio::test]
    async fn rejects_out_of_range_retention() -> TestResult {
        let test = TestBuilder::new()
            .with_shopping_tables()
            .with_units()
            .build()
            .await?;
        let service = ShoppingService::new(&test.db);

        let result = service
            .generate(october(19), october(25), 1_000_000_000)
            .await;

        assert!(matches!(result, Err(Error::ValidationError(_))));
        assert!(service.latest().await?.is_none());

        Ok(())
    }

    /// Expect None when no list was ever generated
    #[tokio::test]
    async fn latest_is_none_without_lists() -> TestResult {
        let test = TestBuilder::new()
            .with_shopping_tables()
            .with_units()
            .build()
            .await?;

        let latest = ShoppingService::new(&test.db).latest().await?;

        assert!(latest.is_none());

        Ok(())
    }
}

mod set_purchased {
    use super::*;

    /// Expect the line purchased only once every merged item is, and repeated calls to
    /// keep the first timestamp
    #[tokio::test]
    async fn purchased_when_all_items_are() -> TestResult {
        let test = TestBuilder::new()
            .with_shopping_tables()
            .with_units()
            .build()
            .await?;
        let butter = test.recipe().insert_ingredient("beurre", "g").await?;
        let cake = test.recipe().insert_recipe("Gâteau").await?;
        test.recipe().insert_line(cake.id, butter.id, 25.0, "g").await?;
        test.planning()
            .insert_entry(october(19), "midday", 4, Some(cake.id))
            .await?;
        test.planning()
            .insert_entry(october(20), "midday", 4, Some(cake.id))
            .await?;
        let service = ShoppingService::new(&test.db);
        let list = service
            .generate(october(19), october(20), RETENTION_DAYS)
            .await?;
        let list_id = list.id.unwrap();
        let item_ids = line_named(&list, "beurre").unwrap().item_ids.clone();

        let first = service.set_purchased(item_ids[0], true).await?;
        let partial = service.get(list_id).await?;
        let again = service.set_purchased(item_ids[0], true).await?;
        service.set_purchased(item_ids[1], true).await?;
        let complete = service.get(list_id).await?;

        assert!(first.purchased_at.is_some());
        assert_eq!(again.purchased_at, first.purchased_at);
        assert!(!line_named(&partial, "beurre").unwrap().purchased);
        assert!(line_named(&complete, "beurre").unwrap().purchased);

        Ok(())
    }

    /// Expect NotFound for an unknown item
    #[tokio::test]
    async fn fails_for_unknown_item() -> TestResult {
        let test = TestBuilder::new()
            .with_shopping_tables()
            .with_units()
            .build()
            .await?;

        let result = ShoppingService::new(&test.db).set_purchased(3, true).await;

        assert!(matches!(result, Err(Error::NotFound(_))));

        Ok(())
    }
}

mod delete_purchased {
    use super::*;

    /// Expect only purchased items bought at the given store to be deleted
    #[tokio::test]
    async fn deletes_purchased_items_of_store() -> TestResult {
        let test = TestBuilder::new()
            .with_shopping_tables()
            .with_units()
            .with_stores()
            .build()
            .await?;
        let rice = test
            .recipe()
            .insert_ingredient_in("riz", "g", "épicerie salée", Some("Auchan"))
            .await?;
        let salt = test
            .recipe()
            .insert_ingredient_in("sel", "g", "épicerie salée", Some("Placard"))
            .await?;
        let risotto = test.recipe().insert_recipe("Risotto").await?;
        test.recipe().insert_line(risotto.id, rice.id, 80.0, "g").await?;
        test.recipe().insert_line(risotto.id, salt.id, 2.0, "g").await?;
        test.planning()
            .insert_entry(october(19), "evening", 2, Some(risotto.id))
            .await?;
        let service = ShoppingService::new(&test.db);
        let list = service
            .generate(october(19), october(19), RETENTION_DAYS)
            .await?;
        let list_id = list.id.unwrap();
        for name in ["riz", "sel"] {
            for item_id in &line_named(&list, name).unwrap().item_ids {
                service.set_purchased(*item_id, true).await?;
            }
        }

        let deleted = service.delete_purchased(list_id, "Auchan").await?;

        assert_eq!(deleted, 1);
        let remaining = service.get(list_id).await?;
        assert!(line_named(&remaining, "riz").is_none());
        assert!(line_named(&remaining, "sel").is_some());

        Ok(())
    }
}
