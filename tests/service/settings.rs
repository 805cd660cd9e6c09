use larder::server::{error::Error, service::settings::SettingsService};
use larder_test_utils::prelude::*;

use crate::util::TestResult;

mod get {
    use super::*;

    /// Expect units, stores, the user's devices and the fixed store sections
    #[tokio::test]
    async fn collects_settings() -> TestResult {
        let test = TestBuilder::new()
            .with_catalog_tables()
            .with_auth_tables()
            .with_units()
            .with_stores()
            .build()
            .await?;
        let user = test.auth().insert_user("alice", "correct horse").await?;
        test.auth().insert_device(user.id, "fp", "Salon").await?;

        let settings = SettingsService::new(&test.db).get(user.id).await?;

        assert_eq!(settings.units.len(), 7);
        assert_eq!(settings.stores.len(), 2);
        assert_eq!(settings.devices.len(), 1);
        assert!(settings
            .store_sections
            .iter()
            .any(|section| section == "épicerie salée"));

        Ok(())
    }
}

mod update_unit {
    use super::*;

    /// Expect the new display forms
    #[tokio::test]
    async fn updates_forms() -> TestResult {
        let test = TestBuilder::new()
            .with_catalog_tables()
            .with_units()
            .build()
            .await?;

        let unit = SettingsService::new(&test.db)
            .update_unit("cas", "cuillère à soupe", "cuillères à soupe")
            .await?;

        assert_eq!(unit.plural_form, "cuillères à soupe");

        Ok(())
    }

    /// Expect NotFound for an unknown unit and ValidationError for blank forms
    #[tokio::test]
    async fn rejects_unknown_unit_and_blank_forms() -> TestResult {
        let test = TestBuilder::new()
            .with_catalog_tables()
            .with_units()
            .build()
            .await?;
        let service = SettingsService::new(&test.db);

        let unknown = service.update_unit("oz", "once", "onces").await;
        let blank = service.update_unit("g", " ", "grammes").await;

        assert!(matches!(unknown, Err(Error::NotFound(_))));
        assert!(matches!(blank, Err(Error::ValidationError(_))));

        Ok(())
    }
}

mod stores {
    use super::*;

    /// Expect a new store placed last and duplicates refused
    #[tokio::test]
    async fn adds_store_once() -> TestResult {
        let test = TestBuilder::new()
            .with_catalog_tables()
            .with_stores()
            .build()
            .await?;
        let service = SettingsService::new(&test.db);

        let store = service.add_store(" Marché ").await?;
        let duplicate = service.add_store("Marché").await;

        assert_eq!(store.name, "Marché");
        assert_eq!(store.order, 2);
        assert!(matches!(duplicate, Err(Error::ValidationError(_))));

        Ok(())
    }

    /// Expect NotFound when removing an unknown store
    #[tokio::test]
    async fn fails_to_remove_unknown_store() -> TestResult {
        let test = TestBuilder::new().with_catalog_tables().build().await?;

        let result = SettingsService::new(&test.db).remove_store(5).await;

        assert!(matches!(result, Err(Error::NotFound(_))));

        Ok(())
    }
}
