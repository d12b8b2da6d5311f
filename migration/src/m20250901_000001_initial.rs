use sea_orm_migration::prelude::extension::postgres::Type;
use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Customers {
    Table,
    Id,
    ExternalId,
    Name,
    LastName,
    Status,
    PhoneNumber,
    Email,
    PushToken,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Name,
    Codename,
    IsActive,
}

#[derive(DeriveIden)]
enum GasStations {
    Table,
    Id,
    Name,
    ExternalId,
    City,
    RegularPrice,
    PremiumPrice,
    DieselPrice,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum GasStationMargins {
    Table,
    Id,
    GasStationId,
    ProductId,
    MarginType,
    Margin,
    Points,
}

#[derive(DeriveIden)]
enum Accumulations {
    Table,
    Id,
    CustomerId,
    ProductId,
    GasStationId,
    Amount,
    GeneratedPoints,
    MarginType,
    MarginApplied,
    PointsApplied,
    GasPriceApplied,
    UsedPoints,
    IsActive,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Settings {
    Table,
    Id,
    Key,
    Value,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("margin_type"))
                    .values(vec![Alias::new("by_margin"), Alias::new("by_volume")])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Customers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Customers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Customers::ExternalId)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Customers::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Customers::LastName)
                            .string_len(255)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Customers::Status)
                            .string_len(64)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Customers::PhoneNumber)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Customers::Email)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Customers::PushToken)
                            .string_len(255)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Customers::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Customers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Products::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Products::Name).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Products::Codename)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Products::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GasStations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GasStations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GasStations::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(GasStations::ExternalId)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(GasStations::City)
                            .string_len(255)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(GasStations::RegularPrice)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(GasStations::PremiumPrice)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(GasStations::DieselPrice)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(GasStations::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .col(
                        ColumnDef::new(GasStations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GasStationMargins::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GasStationMargins::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(GasStationMargins::GasStationId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(GasStationMargins::ProductId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GasStationMargins::MarginType)
                            .custom(Alias::new("margin_type"))
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GasStationMargins::Margin)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(GasStationMargins::Points)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .to_owned(),
            )
            .await?;

        // one rule per (station, product)
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_gas_station_margins_station_product")
                    .table(GasStationMargins::Table)
                    .col(GasStationMargins::GasStationId)
                    .col(GasStationMargins::ProductId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Accumulations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Accumulations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Accumulations::CustomerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Accumulations::ProductId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Accumulations::GasStationId).big_integer().null())
                    .col(ColumnDef::new(Accumulations::Amount).double().not_null())
                    .col(
                        ColumnDef::new(Accumulations::GeneratedPoints)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Accumulations::MarginType)
                            .custom(Alias::new("margin_type"))
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Accumulations::MarginApplied)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Accumulations::PointsApplied)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Accumulations::GasPriceApplied)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Accumulations::UsedPoints)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Accumulations::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Accumulations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // lookback window sums filter on (customer_id, created_at)
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_accumulations_customer_created_at")
                    .table(Accumulations::Table)
                    .col(Accumulations::CustomerId)
                    .col(Accumulations::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Settings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Settings::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Settings::Key)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Settings::Value).string_len(255).not_null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Settings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Accumulations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GasStationMargins::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GasStations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Customers::Table).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(Alias::new("margin_type")).to_owned())
            .await?;
        Ok(())
    }
}
