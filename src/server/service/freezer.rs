use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use sea_orm::DatabaseConnection;

use crate::{
    model::freezer::{
        CreateFreezerItemDto, DrawerDto, ExpiringItemsDto, FreezerDto, FreezerItemDto,
        LocatedFreezerItemDto, UpdateContainerDto, UpdateFreezerItemDto,
    },
    server::{
        data::freezer::{
            drawer::DrawerRepository,
            freezer::FreezerRepository,
            freezer_item::{
                FreezerItemChanges, FreezerItemFilter, FreezerItemRepository, ItemWithDrawer,
                NewFreezerItem,
            },
        },
        error::Error,
    },
};

pub const DEFAULT_ITEM_QUANTITY: i32 = 1;

pub struct FreezerService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> FreezerService<'a> {
    /// Creates a new instance of [`FreezerService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Every freezer with its drawers and their items
    ///
    /// Freezers and drawers follow their order, items are sorted by expiration.
    pub async fn list(&self) -> Result<Vec<FreezerDto>, Error> {
        let freezers = FreezerRepository::new(self.db).get_all().await?;
        let drawers = DrawerRepository::new(self.db).get_all().await?;
        let drawers = self.with_items(drawers).await?;

        let mut drawers_by_freezer: HashMap<i32, Vec<DrawerDto>> = HashMap::new();
        for drawer in drawers {
            drawers_by_freezer
                .entry(drawer.freezer_id)
                .or_default()
                .push(drawer);
        }

        Ok(freezers
            .into_iter()
            .map(|freezer| FreezerDto {
                drawers: drawers_by_freezer.remove(&freezer.id).unwrap_or_default(),
                id: freezer.id,
                name: freezer.name,
                order: freezer.order,
            })
            .collect())
    }

    pub async fn create_freezer(&self, name: &str) -> Result<FreezerDto, Error> {
        let name = required_name(name)?;
        let freezer = FreezerRepository::new(self.db).create(name).await?;

        Ok(FreezerDto {
            id: freezer.id,
            name: freezer.name,
            order: freezer.order,
            drawers: Vec::new(),
        })
    }

    pub async fn update_freezer(
        &self,
        freezer_id: i32,
        changes: UpdateContainerDto,
    ) -> Result<FreezerDto, Error> {
        let name = changes.name.as_deref().map(required_name).transpose()?;

        let Some(freezer) = FreezerRepository::new(self.db)
            .update(freezer_id, name, changes.order)
            .await?
        else {
            return Err(freezer_not_found(freezer_id));
        };

        let drawers = DrawerRepository::new(self.db)
            .get_by_freezer(freezer.id)
            .await?;

        Ok(FreezerDto {
            id: freezer.id,
            name: freezer.name,
            order: freezer.order,
            drawers: self.with_items(drawers).await?,
        })
    }

    /// Deletes a freezer along with its drawers and their items
    pub async fn delete_freezer(&self, freezer_id: i32) -> Result<(), Error> {
        let result = FreezerRepository::new(self.db).delete(freezer_id).await?;
        if result.rows_affected == 0 {
            return Err(freezer_not_found(freezer_id));
        }

        Ok(())
    }

    pub async fn list_drawers(&self, freezer_id: i32) -> Result<Vec<DrawerDto>, Error> {
        self.require_freezer(freezer_id).await?;

        let drawers = DrawerRepository::new(self.db)
            .get_by_freezer(freezer_id)
            .await?;

        self.with_items(drawers).await
    }

    pub async fn create_drawer(&self, freezer_id: i32, name: &str) -> Result<DrawerDto, Error> {
        let name = required_name(name)?;
        self.require_freezer(freezer_id).await?;

        let drawer = DrawerRepository::new(self.db)
            .create(freezer_id, name)
            .await?;

        Ok(DrawerDto {
            id: drawer.id,
            freezer_id: drawer.freezer_id,
            name: drawer.name,
            order: drawer.order,
            items: Vec::new(),
        })
    }

    pub async fn update_drawer(
        &self,
        freezer_id: i32,
        drawer_id: i32,
        changes: UpdateContainerDto,
    ) -> Result<DrawerDto, Error> {
        let name = changes.name.as_deref().map(required_name).transpose()?;
        let drawer = self.require_drawer_in(freezer_id, drawer_id).await?;

        let drawer = DrawerRepository::new(self.db)
            .update(drawer, name, changes.order)
            .await?;

        let mut drawers = self.with_items(vec![drawer]).await?;
        drawers
            .pop()
            .ok_or_else(|| Error::InternalError(format!("Drawer {} vanished", drawer_id)))
    }

    /// Deletes a drawer of a freezer along with its items
    pub async fn delete_drawer(&self, freezer_id: i32, drawer_id: i32) -> Result<(), Error> {
        let drawer = self.require_drawer_in(freezer_id, drawer_id).await?;

        DrawerRepository::new(self.db).delete(drawer.id).await?;

        Ok(())
    }

    /// Items matching `filter`, each with the drawer and freezer holding it
    pub async fn list_items(
        &self,
        filter: FreezerItemFilter,
    ) -> Result<Vec<LocatedFreezerItemDto>, Error> {
        let items = FreezerItemRepository::new(self.db).search(filter).await?;

        self.locate(items).await
    }

    /// Stores a new item in a drawer, quantity defaults to 1
    ///
    /// # Returns
    /// - `Ok(FreezerItemDto)`: the created item
    /// - `Err(Error::ValidationError)`: empty title or quantity below 1
    /// - `Err(Error::NotFound)`: no drawer with this ID
    pub async fn create_item(&self, item: CreateFreezerItemDto) -> Result<FreezerItemDto, Error> {
        let title = required_name(&item.title)?;
        let quantity = item.quantity.unwrap_or(DEFAULT_ITEM_QUANTITY);
        validate_quantity(quantity)?;
        self.require_drawer(item.drawer_id).await?;

        let created = FreezerItemRepository::new(self.db)
            .create(NewFreezerItem {
                drawer_id: item.drawer_id,
                title,
                item_type: item.item_type.to_string(),
                quantity,
                expiration_date: item.expiration_date,
            })
            .await?;

        to_item_dto(created)
    }

    pub async fn update_item(
        &self,
        item_id: i32,
        changes: UpdateFreezerItemDto,
    ) -> Result<FreezerItemDto, Error> {
        let title = changes.title.as_deref().map(required_name).transpose()?;
        if let Some(quantity) = changes.quantity {
            validate_quantity(quantity)?;
        }

        let item = self.require_item(item_id).await?;
        if let Some(drawer_id) = changes.drawer_id {
            self.require_drawer(drawer_id).await?;
        }

        let updated = FreezerItemRepository::new(self.db)
            .update(
                item,
                FreezerItemChanges {
                    drawer_id: changes.drawer_id,
                    title,
                    item_type: changes.item_type.map(|item_type| item_type.to_string()),
                    quantity: changes.quantity,
                    expiration_date: changes.expiration_date,
                },
            )
            .await?;

        to_item_dto(updated)
    }

    /// Moves an item to another drawer, possibly in another freezer
    pub async fn move_item(&self, item_id: i32, drawer_id: i32) -> Result<FreezerItemDto, Error> {
        let item = self.require_item(item_id).await?;
        self.require_drawer(drawer_id).await?;

        let moved = FreezerItemRepository::new(self.db)
            .update(
                item,
                FreezerItemChanges {
                    drawer_id: Some(drawer_id),
                    ..Default::default()
                },
            )
            .await?;

        to_item_dto(moved)
    }

    pub async fn delete_item(&self, item_id: i32) -> Result<(), Error> {
        let result = FreezerItemRepository::new(self.db).delete(item_id).await?;
        if result.rows_affected == 0 {
            return Err(item_not_found(item_id));
        }

        Ok(())
    }

    /// Items expiring within `window_days` of `today` (both inclusive) and items already
    /// expired
    ///
    /// Returns `Error::ValidationError` when the window end is not a representable date.
    pub async fn expiring(
        &self,
        today: NaiveDate,
        window_days: i64,
    ) -> Result<ExpiringItemsDto, Error> {
        let Some(window_end) = Duration::try_days(window_days)
            .and_then(|window| today.checked_add_signed(window))
        else {
            return Err(Error::ValidationError(format!(
                "Expiry window of {} days is out of range",
                window_days
            )));
        };

        let repository = FreezerItemRepository::new(self.db);

        let expiring = repository.expiring_between(today, window_end).await?;
        let expired = repository.expired_before(today).await?;

        let expiring = self.locate(expiring).await?;
        let expired = self.locate(expired).await?;

        Ok(ExpiringItemsDto {
            total_urgent: expiring.len() + expired.len(),
            expiring,
            expired,
        })
    }

    async fn with_items(&self, drawers: Vec<entity::drawer::Model>) -> Result<Vec<DrawerDto>, Error> {
        let items = FreezerItemRepository::new(self.db)
            .get_by_drawers(drawers.iter().map(|drawer| drawer.id).collect())
            .await?;

        let mut items_by_drawer: HashMap<i32, Vec<FreezerItemDto>> = HashMap::new();
        for item in items {
            items_by_drawer
                .entry(item.drawer_id)
                .or_default()
                .push(to_item_dto(item)?);
        }

        Ok(drawers
            .into_iter()
            .map(|drawer| DrawerDto {
                items: items_by_drawer.remove(&drawer.id).unwrap_or_default(),
                id: drawer.id,
                freezer_id: drawer.freezer_id,
                name: drawer.name,
                order: drawer.order,
            })
            .collect())
    }

    async fn locate(&self, items: Vec<ItemWithDrawer>) -> Result<Vec<LocatedFreezerItemDto>, Error> {
        let freezer_names: HashMap<i32, String> = FreezerRepository::new(self.db)
            .get_all()
            .await?
            .into_iter()
            .map(|freezer| (freezer.id, freezer.name))
            .collect();

        items
            .into_iter()
            .map(|(item, drawer)| -> Result<LocatedFreezerItemDto, Error> {
                let Some(drawer) = drawer else {
                    return Err(Error::InternalError(format!(
                        "Drawer {} of freezer item {} is missing",
                        item.drawer_id, item.id
                    )));
                };

                Ok(LocatedFreezerItemDto {
                    item: to_item_dto(item)?,
                    freezer_id: drawer.freezer_id,
                    freezer_name: freezer_names
                        .get(&drawer.freezer_id)
                        .cloned()
                        .unwrap_or_default(),
                    drawer_name: drawer.name,
                })
            })
            .collect()
    }

    async fn require_freezer(&self, freezer_id: i32) -> Result<entity::freezer::Model, Error> {
        FreezerRepository::new(self.db)
            .get_by_id(freezer_id)
            .await?
            .ok_or_else(|| freezer_not_found(freezer_id))
    }

    async fn require_drawer(&self, drawer_id: i32) -> Result<entity::drawer::Model, Error> {
        DrawerRepository::new(self.db)
            .get_by_id(drawer_id)
            .await?
            .ok_or_else(|| drawer_not_found(drawer_id))
    }

    async fn require_drawer_in(
        &self,
        freezer_id: i32,
        drawer_id: i32,
    ) -> Result<entity::drawer::Model, Error> {
        match DrawerRepository::new(self.db).get_by_id(drawer_id).await? {
            Some(drawer) if drawer.freezer_id == freezer_id => Ok(drawer),
            _ => Err(drawer_not_found(drawer_id)),
        }
    }

    async fn require_item(&self, item_id: i32) -> Result<entity::freezer_item::Model, Error> {
        FreezerItemRepository::new(self.db)
            .get_by_id(item_id)
            .await?
            .ok_or_else(|| item_not_found(item_id))
    }
}

fn required_name(name: &str) -> Result<String, Error> {
    match name.trim() {
        "" => Err(Error::ValidationError("Name is required".to_string())),
        name => Ok(name.to_string()),
    }
}

fn validate_quantity(quantity: i32) -> Result<(), Error> {
    if quantity < 1 {
        return Err(Error::ValidationError(
            "Quantity must be at least 1".to_string(),
        ));
    }

    Ok(())
}

fn to_item_dto(item: entity::freezer_item::Model) -> Result<FreezerItemDto, Error> {
    Ok(FreezerItemDto {
        item_type: item.item_type.parse().map_err(Error::ParseError)?,
        id: item.id,
        drawer_id: item.drawer_id,
        title: item.title,
        quantity: item.quantity,
        expiration_date: item.expiration_date,
        created_at: item.created_at,
    })
}

fn freezer_not_found(freezer_id: i32) -> Error {
    Error::NotFound(format!("Freezer {} not found", freezer_id))
}

fn drawer_not_found(drawer_id: i32) -> Error {
    Error::NotFound(format!("Drawer {} not found", drawer_id))
}

fn item_not_found(item_id: i32) -> Error {
    Error::NotFound(format!("Freezer item {} not found", item_id))
}
