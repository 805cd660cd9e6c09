use sea_orm_migration::{prelude::*, schema::*};

/// (code, kind, ratio to base, singular form, plural form)
const SEED_UNITS: &[(&str, &str, f64, &str, &str)] = &[
    ("g", "mass", 1.0, "g", "g"),
    ("kg", "mass", 1000.0, "kg", "kg"),
    ("mL", "volume", 1.0, "mL", "mL"),
    ("L", "volume", 1000.0, "L", "L"),
    ("piece", "count", 1.0, "pièce", "pièces"),
    ("cac", "volume", 5.0, "c. à café", "c. à café"),
    ("cas", "volume", 15.0, "c. à soupe", "c. à soupe"),
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Unit::Table)
                    .if_not_exists()
                    .col(string(Unit::Code))
                    .col(string(Unit::Kind))
                    .col(double(Unit::RatioToBase))
                    .col(string(Unit::SingularForm))
                    .col(string(Unit::PluralForm))
                    .primary_key(Index::create().col(Unit::Code))
                    .to_owned(),
            )
            .await?;

        let mut insert = Query::insert();
        insert.into_table(Unit::Table).columns([
            Unit::Code,
            Unit::Kind,
            Unit::RatioToBase,
            Unit::SingularForm,
            Unit::PluralForm,
        ]);
        for (code, kind, ratio, singular, plural) in SEED_UNITS {
            insert
                .values([
                    (*code).into(),
                    (*kind).into(),
                    (*ratio).into(),
                    (*singular).into(),
                    (*plural).into(),
                ])
                .map_err(|e| DbErr::Migration(e.to_string()))?;
        }
        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Unit::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Unit {
    Table,
    Code,
    Kind,
    RatioToBase,
    SingularForm,
    PluralForm,
}
