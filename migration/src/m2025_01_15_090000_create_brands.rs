//! Migration to create the brands table.
//!
//! The unique index on `name` is the authoritative guard for brand name
//! uniqueness; the service layer only pre-checks it.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Brands::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Brands::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Brands::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Brands::LogoUrl).string_len(500).null())
                    .col(ColumnDef::new(Brands::WebsiteLink).string_len(500).null())
                    .col(ColumnDef::new(Brands::CertificateUrls).text().null())
                    .col(ColumnDef::new(Brands::MobileNumber).string_len(21).null())
                    .col(ColumnDef::new(Brands::Address).text().null())
                    .col(
                        ColumnDef::new(Brands::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Brands::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_brands_name_unique")
                    .table(Brands::Table)
                    .col(Brands::Name)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_brands_mobile_number")
                    .table(Brands::Table)
                    .col(Brands::MobileNumber)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Brands::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Brands {
    Table,
    Id,
    Name,
    LogoUrl,
    WebsiteLink,
    CertificateUrls,
    MobileNumber,
    Address,
    CreatedAt,
    UpdatedAt,
}
