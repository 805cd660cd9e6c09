use sea_orm_migration::{prelude::*, schema::*};

use crate::m20261017_000014_user::User;

static IDX_DEVICE_USER_ID: &str = "idx-device-user_id";
static FK_DEVICE_USER_ID: &str = "fk-device-user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Device::Table)
                    .if_not_exists()
                    .col(pk_auto(Device::Id))
                    .col(integer(Device::UserId))
                    .col(string_uniq(Device::Fingerprint))
                    .col(string(Device::DeviceName))
                    .col(timestamp(Device::CreatedAt))
                    .col(timestamp(Device::LastSeenAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_DEVICE_USER_ID)
                            .from(Device::Table, Device::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_DEVICE_USER_ID)
                    .table(Device::Table)
                    .col(Device::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_DEVICE_USER_ID)
                    .table(Device::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Device::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Device {
    Table,
    Id,
    UserId,
    Fingerprint,
    DeviceName,
    CreatedAt,
    LastSeenAt,
}
