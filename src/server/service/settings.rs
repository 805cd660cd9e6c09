use sea_orm::DatabaseConnection;

use crate::{
    model::{
        settings::{SettingsDto, StoreDto},
        unit::UnitDto,
    },
    server::{
        data::catalog::{store::StoreRepository, unit::UnitRepository},
        error::Error,
        service::auth::AuthService,
    },
};

/// Store sections offered when classifying ingredients
pub const STORE_SECTIONS: &[&str] = &[
    "fruits et légumes",
    "boucherie",
    "poissonnerie",
    "crèmerie",
    "produits laitiers",
    "boulangerie",
    "épicerie salée",
    "épicerie sucrée",
    "surgelés",
    "boissons",
    "hygiène",
    "entretien",
    "autre",
];

pub struct SettingsService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SettingsService<'a> {
    /// Creates a new instance of [`SettingsService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Units, stores and the devices of `user_id`
    pub async fn get(&self, user_id: i32) -> Result<SettingsDto, Error> {
        let units = UnitRepository::new(self.db)
            .get_all()
            .await?
            .into_iter()
            .map(unit_dto)
            .collect::<Result<Vec<_>, Error>>()?;
        let stores = StoreRepository::new(self.db)
            .get_all()
            .await?
            .into_iter()
            .map(store_dto)
            .collect();
        let devices = AuthService::new(self.db).devices(user_id).await?;

        Ok(SettingsDto {
            units,
            stores,
            devices,
            store_sections: STORE_SECTIONS.iter().map(|s| s.to_string()).collect(),
        })
    }

    /// Changes the singular and plural display forms of a unit
    pub async fn update_unit(
        &self,
        code: &str,
        singular_form: &str,
        plural_form: &str,
    ) -> Result<UnitDto, Error> {
        let singular_form = singular_form.trim();
        let plural_form = plural_form.trim();
        if singular_form.is_empty() || plural_form.is_empty() {
            return Err(Error::ValidationError(
                "Singular and plural forms are required".to_string(),
            ));
        }

        let Some(unit) = UnitRepository::new(self.db)
            .update_forms(code, singular_form.to_string(), plural_form.to_string())
            .await?
        else {
            return Err(Error::NotFound(format!("Unit {} not found", code)));
        };

        unit_dto(unit)
    }

    pub async fn add_store(&self, name: &str) -> Result<StoreDto, Error> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::ValidationError("Store name is required".to_string()));
        }

        let repository = StoreRepository::new(self.db);
        if repository.find_by_name(name).await?.is_some() {
            return Err(Error::ValidationError(format!(
                "Store {} already exists",
                name
            )));
        }

        let store = repository.create(name.to_string()).await?;

        Ok(store_dto(store))
    }

    pub async fn remove_store(&self, store_id: i32) -> Result<(), Error> {
        let result = StoreRepository::new(self.db).delete(store_id).await?;
        if result.rows_affected == 0 {
            return Err(Error::NotFound(format!("Store {} not found", store_id)));
        }

        Ok(())
    }
}

fn unit_dto(unit: entity::unit::Model) -> Result<UnitDto, Error> {
    Ok(UnitDto {
        kind: unit.kind.parse().map_err(Error::ParseError)?,
        code: unit.code,
        ratio_to_base: unit.ratio_to_base,
        singular_form: unit.singular_form,
        plural_form: unit.plural_form,
    })
}

fn store_dto(store: entity::store::Model) -> StoreDto {
    StoreDto {
        id: store.id,
        name: store.name,
        order: store.order,
    }
}
