use larder::{
    model::planning::{AssignSlotDto, MealSlot},
    server::{error::Error, service::planning::PlanningService},
};
use larder_test_utils::prelude::*;
use sea_orm::{EntityTrait, PaginatorTrait};

use crate::util::{october, TestResult};

mod list {
    use super::*;

    /// Expect entries of the range ordered by date then midday before evening
    #[tokio::test]
    async fn orders_by_date_and_slot() -> TestResult {
        let test = TestBuilder::new().with_planning_tables().build().await?;
        let recipe = test.recipe().insert_recipe("Gratin").await?;
        test.planning()
            .insert_entry(october(20), "evening", 2, Some(recipe.id))
            .await?;
        test.planning()
            .insert_entry(october(20), "midday", 2, None)
            .await?;
        test.planning()
            .insert_entry(october(19), "evening", 3, Some(recipe.id))
            .await?;
        test.planning()
            .insert_entry(october(25), "midday", 2, Some(recipe.id))
            .await?;

        let entries = PlanningService::new(&test.db)
            .list(october(19), october(20))
            .await?;

        let slots: Vec<_> = entries.iter().map(|entry| (entry.date, entry.slot)).collect();
        assert_eq!(
            slots,
            vec![
                (october(19), MealSlot::Evening),
                (october(20), MealSlot::Midday),
                (october(20), MealSlot::Evening),
            ]
        );
        assert!(entries[1].recipe.is_none());
        assert_eq!(entries[0].recipe.as_ref().unwrap().title, "Gratin");

        Ok(())
    }

    /// Expect ValidationError when start is after end
    #[tokio::test]
    async fn rejects_inverted_range() -> TestResult {
        let test = TestBuilder::new().with_planning_tables().build().await?;

        let result = PlanningService::new(&test.db)
            .list(october(20), october(19))
            .await;

        assert!(matches!(result, Err(Error::ValidationError(_))));

        Ok(())
    }
}

mod assign {
    use super::*;

    /// Expect a single entry and a single association after assigning the same slot twice
    #[tokio::test]
    async fn replaces_previous_assignment() -> TestResult {
        let test = TestBuilder::new().with_planning_tables().build().await?;
        let gratin = test.recipe().insert_recipe("Gratin").await?;
        let salad = test.recipe().insert_recipe("Salade").await?;
        let service = PlanningService::new(&test.db);

        service
            .assign(AssignSlotDto {
                date: october(19),
                slot: MealSlot::Midday,
                recipe_id: gratin.id,
                diner_count: 2,
            })
            .await?;
        let entry = service
            .assign(AssignSlotDto {
                date: october(19),
                slot: MealSlot::Midday,
                recipe_id: salad.id,
                diner_count: 5,
            })
            .await?;

        assert_eq!(entry.diner_count, 5);
        assert_eq!(entry.recipe.unwrap().id, salad.id);
        assert_eq!(entity::prelude::MealPlan::find().count(&test.db).await?, 1);
        assert_eq!(
            entity::prelude::MealPlanItem::find().count(&test.db).await?,
            1
        );

        Ok(())
    }

    /// Expect NotFound and no entry for an unknown recipe
    #[tokio::test]
    async fn fails_for_unknown_recipe() -> TestResult {
        let test = TestBuilder::new().with_planning_tables().build().await?;

        let result = PlanningService::new(&test.db)
            .assign(AssignSlotDto {
                date: october(19),
                slot: MealSlot::Evening,
                recipe_id: 99,
                diner_count: 2,
            })
            .await;

        assert!(matches!(result, Err(Error::NotFound(_))));
        assert_eq!(entity::prelude::MealPlan::find().count(&test.db).await?, 0);

        Ok(())
    }
}

mod clear {
    use super::*;

    /// Expect true and the slot emptied
    #[tokio::test]
    async fn removes_entry() -> TestResult {
        let test = TestBuilder::new().with_planning_tables().build().await?;
        let recipe = test.recipe().insert_recipe("Gratin").await?;
        test.planning()
            .insert_entry(october(19), "midday", 2, Some(recipe.id))
            .await?;
        let service = PlanningService::new(&test.db);

        let cleared = service.clear(october(19), MealSlot::Midday).await?;

        assert!(cleared);
        assert!(service.list(october(19), october(19)).await?.is_empty());

        Ok(())
    }

    /// Expect false for a slot with nothing planned
    #[tokio::test]
    async fn ignores_empty_slot() -> TestResult {
        let test = TestBuilder::new().with_planning_tables().build().await?;

        let cleared = PlanningService::new(&test.db)
            .clear(october(19), MealSlot::Evening)
            .await?;

        assert!(!cleared);

        Ok(())
    }
}

mod update_diner_count {
    use super::*;

    /// Expect the new diner count on the planned slot
    #[tokio::test]
    async fn updates_planned_slot() -> TestResult {
        let test = TestBuilder::new().with_planning_tables().build().await?;
        let recipe = test.recipe().insert_recipe("Gratin").await?;
        test.planning()
            .insert_entry(october(19), "evening", 2, Some(recipe.id))
            .await?;
        let service = PlanningService::new(&test.db);

        let updated = service
            .update_diner_count(october(19), MealSlot::Evening, 6)
            .await?;

        assert!(updated);
        let entries = service.list(october(19), october(19)).await?;
        assert_eq!(entries[0].diner_count, 6);

        Ok(())
    }

    /// Expect ValidationError for a negative count
    #[tokio::test]
    async fn rejects_negative_count() -> TestResult {
        let test = TestBuilder::new().with_planning_tables().build().await?;

        let result = PlanningService::new(&test.db)
            .update_diner_count(october(19), MealSlot::Evening, -1)
            .await;

        assert!(matches!(result, Err(Error::ValidationError(_))));

        Ok(())
    }
}
