use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create cities table
        manager
            .create_table(
                Table::create()
                    .table(Cities::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Cities::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Cities::Name).string().not_null().unique_key())
                    .col(ColumnDef::new(Cities::Active).boolean().not_null().default(true))
                    .to_owned(),
            )
            .await?;

        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Users::Username).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::CityId).integer().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::IsActive).boolean().not_null().default(true))
                    .col(ColumnDef::new(Users::TelegramId).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_users_city_id")
                            .from(Users::Table, Users::CityId)
                            .to(Cities::Table, Cities::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Create products table
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Products::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Products::Name).string().not_null())
                    .col(ColumnDef::new(Products::Description).string().not_null())
                    .col(ColumnDef::new(Products::Price).double().not_null())
                    .col(ColumnDef::new(Products::ImageUrl).string())
                    .col(ColumnDef::new(Products::IsAvailable).boolean().not_null().default(true))
                    .col(ColumnDef::new(Products::CityId).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_city_id")
                            .from(Products::Table, Products::CityId)
                            .to(Cities::Table, Cities::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Create services table
        manager
            .create_table(
                Table::create()
                    .table(Services::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Services::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Services::Name).string().not_null())
                    .col(ColumnDef::new(Services::Description).string().not_null())
                    .col(ColumnDef::new(Services::Price).double().not_null())
                    .col(ColumnDef::new(Services::EstimatedTime).string().not_null())
                    .col(ColumnDef::new(Services::IsAvailable).boolean().not_null().default(true))
                    .col(ColumnDef::new(Services::CityId).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_services_city_id")
                            .from(Services::Table, Services::CityId)
                            .to(Cities::Table, Cities::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Create requests table
        manager
            .create_table(
                Table::create()
                    .table(Requests::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Requests::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Requests::Name).string().not_null())
                    .col(ColumnDef::new(Requests::Phone).string().not_null())
                    .col(ColumnDef::new(Requests::Email).string())
                    .col(ColumnDef::new(Requests::CityId).integer().not_null())
                    .col(ColumnDef::new(Requests::Message).string().not_null())
                    .col(ColumnDef::new(Requests::ServiceId).integer())
                    .col(ColumnDef::new(Requests::ProductId).integer())
                    .col(ColumnDef::new(Requests::Status).string().not_null().default("new"))
                    .col(ColumnDef::new(Requests::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Requests::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_requests_city_id")
                            .from(Requests::Table, Requests::CityId)
                            .to(Cities::Table, Cities::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_requests_service_id")
                            .from(Requests::Table, Requests::ServiceId)
                            .to(Services::Table, Services::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_requests_product_id")
                            .from(Requests::Table, Requests::ProductId)
                            .to(Products::Table, Products::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Create indexes for request listing filters
        manager
            .create_index(
                Index::create()
                    .name("idx_requests_city_id")
                    .table(Requests::Table)
                    .col(Requests::CityId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_requests_status")
                    .table(Requests::Table)
                    .col(Requests::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Requests::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Services::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Cities::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Cities {
    Table,
    Id,
    Name,
    Active,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    CityId,
    Role,
    IsActive,
    TelegramId,
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Name,
    Description,
    Price,
    ImageUrl,
    IsAvailable,
    CityId,
}

#[derive(DeriveIden)]
enum Services {
    Table,
    Id,
    Name,
    Description,
    Price,
    EstimatedTime,
    IsAvailable,
    CityId,
}

#[derive(DeriveIden)]
enum Requests {
    Table,
    Id,
    Name,
    Phone,
    Email,
    CityId,
    Message,
    ServiceId,
    ProductId,
    Status,
    CreatedAt,
    UpdatedAt,
}
