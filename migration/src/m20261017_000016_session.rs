use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20261017_000014_user::User, m20261017_000015_device::Device};

static IDX_SESSION_USER_ID: &str = "idx-session-user_id";
static FK_SESSION_USER_ID: &str = "fk-session-user_id";
static FK_SESSION_DEVICE_ID: &str = "fk-session-device_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Session::Table)
                    .if_not_exists()
                    .col(pk_auto(Session::Id))
                    .col(integer(Session::UserId))
                    .col(integer(Session::DeviceId))
                    .col(string_uniq(Session::Token))
                    .col(timestamp(Session::ExpiresAt))
                    .col(timestamp(Session::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_SESSION_USER_ID)
                            .from(Session::Table, Session::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_SESSION_DEVICE_ID)
                            .from(Session::Table, Session::DeviceId)
                            .to(Device::Table, Device::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_SESSION_USER_ID)
                    .table(Session::Table)
                    .col(Session::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_SESSION_USER_ID)
                    .table(Session::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Session::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Session {
    Table,
    Id,
    UserId,
    DeviceId,
    Token,
    ExpiresAt,
    CreatedAt,
}
