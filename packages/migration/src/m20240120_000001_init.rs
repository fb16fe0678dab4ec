use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum WechatUsers {
    Table,
    Id,
    Openid,
    Unionid,
    Nickname,
    AvatarUrl,
    Gender,
    Country,
    Province,
    City,
    Language,
    SessionKey,
    LastLoginTime,
    LastLoginIp,
    UserAgent,
    Status,
    CreatedTime,
    UpdatedTime,
    Deleted,
}

#[derive(Iden)]
enum FavoriteCategories {
    Table,
    Id,
    Name,
    Description,
    Icon,
    SortOrder,
    IsSystem,
    CreatedTime,
    UpdatedTime,
    Deleted,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WechatUsers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(WechatUsers::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(WechatUsers::Openid).string_len(64).not_null())
                    .col(ColumnDef::new(WechatUsers::Unionid).string_len(64).null())
                    .col(ColumnDef::new(WechatUsers::Nickname).string_len(64).not_null())
                    .col(ColumnDef::new(WechatUsers::AvatarUrl).string_len(512).not_null().default(""))
                    .col(ColumnDef::new(WechatUsers::Gender).integer().null())
                    .col(ColumnDef::new(WechatUsers::Country).string_len(64).null())
                    .col(ColumnDef::new(WechatUsers::Province).string_len(64).null())
                    .col(ColumnDef::new(WechatUsers::City).string_len(64).null())
                    .col(ColumnDef::new(WechatUsers::Language).string_len(16).null())
                    .col(ColumnDef::new(WechatUsers::SessionKey).string_len(128).not_null())
                    .col(ColumnDef::new(WechatUsers::LastLoginTime).big_integer().null())
                    .col(ColumnDef::new(WechatUsers::LastLoginIp).string_len(64).null())
                    .col(ColumnDef::new(WechatUsers::UserAgent).string_len(512).null())
                    .col(ColumnDef::new(WechatUsers::Status).integer().not_null().default(1))
                    .col(ColumnDef::new(WechatUsers::CreatedTime).big_integer().not_null())
                    .col(ColumnDef::new(WechatUsers::UpdatedTime).big_integer().not_null())
                    .col(ColumnDef::new(WechatUsers::Deleted).integer().not_null().default(0))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_wechat_users_openid")
                    .table(WechatUsers::Table)
                    .col(WechatUsers::Openid)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FavoriteCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FavoriteCategories::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FavoriteCategories::Name).string_len(64).not_null())
                    .col(ColumnDef::new(FavoriteCategories::Description).string_len(255).null())
                    .col(ColumnDef::new(FavoriteCategories::Icon).string_len(64).null())
                    .col(ColumnDef::new(FavoriteCategories::SortOrder).integer().not_null().default(0))
                    .col(ColumnDef::new(FavoriteCategories::IsSystem).integer().not_null().default(0))
                    .col(ColumnDef::new(FavoriteCategories::CreatedTime).big_integer().not_null())
                    .col(ColumnDef::new(FavoriteCategories::UpdatedTime).big_integer().not_null())
                    .col(ColumnDef::new(FavoriteCategories::Deleted).integer().not_null().default(0))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_favorite_categories_name")
                    .table(FavoriteCategories::Table)
                    .col(FavoriteCategories::Name)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FavoriteCategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(WechatUsers::Table).to_owned())
            .await?;
        Ok(())
    }
}
