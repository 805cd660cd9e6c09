pub use sea_orm_migration::prelude::*;

mod m20261017_000001_unit;
mod m20261017_000002_ingredient;
mod m20261017_000003_store;
mod m20261017_000004_recipe;
mod m20261017_000005_recipe_step;
mod m20261017_000006_recipe_ingredient;
mod m20261017_000007_meal_plan;
mod m20261017_000008_meal_plan_item;
mod m20261017_000009_shopping_list;
mod m20261017_000010_shopping_list_item;
mod m20261017_000011_freezer;
mod m20261017_000012_drawer;
mod m20261017_000013_freezer_item;
mod m20261017_000014_user;
mod m20261017_000015_device;
mod m20261017_000016_session;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261017_000001_unit::Migration),
            Box::new(m20261017_000002_ingredient::Migration),
            Box::new(m20261017_000003_store::Migration),
            Box::new(m20261017_000004_recipe::Migration),
            Box::new(m20261017_000005_recipe_step::Migration),
            Box::new(m20261017_000006_recipe_ingredient::Migration),
            Box::new(m20261017_000007_meal_plan::Migration),
            Box::new(m20261017_000008_meal_plan_item::Migration),
            Box::new(m20261017_000009_shopping_list::Migration),
            Box::new(m20261017_000010_shopping_list_item::Migration),
            Box::new(m20261017_000011_freezer::Migration),
            Box::new(m20261017_000012_drawer::Migration),
            Box::new(m20261017_000013_freezer_item::Migration),
            Box::new(m20261017_000014_user::Migration),
            Box::new(m20261017_000015_device::Migration),
            Box::new(m20261017_000016_session::Migration),
        ]
    }
}
