use sea_orm_migration::prelude::extension::postgres::Type;
use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Levels {
    Table,
    Id,
    Name,
    MinPoints,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CustomerLevels {
    Table,
    Id,
    CustomerId,
    LevelId,
    StartDate,
    EndDate,
    IsActive,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Benefits {
    Table,
    Id,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum BenefitsGenerated {
    Table,
    Id,
    BenefitId,
    LevelId,
    StockUsed,
    StartDate,
    EndDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum BenefitTickets {
    Table,
    Id,
    CustomerId,
    BenefitGeneratedId,
    StartDate,
    EndDate,
    Redeemed,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum PeriodsCovered {
    Table,
    Id,
    StartDate,
    EndDate,
    IsActive,
    CreatedAt,
}

fn timestamp_now(col: impl IntoIden) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .default(Expr::cust("NOW()"))
        .null()
        .to_owned()
}

/// Benefit terms shared by templates and their generated snapshots.
fn benefit_term_columns(table: &mut TableCreateStatement) {
    table
        .col(ColumnDef::new(Alias::new("level_id")).big_integer().not_null())
        .col(ColumnDef::new(Alias::new("name")).string_len(100).not_null())
        .col(
            ColumnDef::new(Alias::new("benefit_type"))
                .custom(Alias::new("benefit_type"))
                .not_null(),
        )
        .col(
            ColumnDef::new(Alias::new("external_product_id"))
                .string_len(100)
                .not_null()
                .default(""),
        )
        .col(
            ColumnDef::new(Alias::new("frequency"))
                .custom(Alias::new("benefit_frequency"))
                .not_null(),
        )
        .col(
            ColumnDef::new(Alias::new("discount"))
                .double()
                .not_null()
                .default(0.0),
        )
        .col(
            ColumnDef::new(Alias::new("num_times"))
                .integer()
                .not_null()
                .default(0),
        )
        // -1 = unlimited
        .col(
            ColumnDef::new(Alias::new("stock"))
                .integer()
                .not_null()
                .default(-1),
        )
        .col(
            ColumnDef::new(Alias::new("dependency"))
                .boolean()
                .not_null()
                .default(false),
        )
        .col(
            ColumnDef::new(Alias::new("min_amount"))
                .double()
                .not_null()
                .default(0.0),
        )
        .col(
            ColumnDef::new(Alias::new("is_active"))
                .boolean()
                .not_null()
                .default(true),
        );
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("benefit_type"))
                    .values(vec![
                        Alias::new("physical"),
                        Alias::new("digital"),
                        Alias::new("gas"),
                        Alias::new("peripheral"),
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("benefit_frequency"))
                    .values(vec![
                        Alias::new("n_times"),
                        Alias::new("hourly"),
                        Alias::new("daily"),
                        Alias::new("weekly"),
                        Alias::new("monthly"),
                        Alias::new("always"),
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Levels::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Levels::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Levels::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Levels::MinPoints).double().not_null())
                    .col(
                        ColumnDef::new(Levels::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(&mut timestamp_now(Levels::CreatedAt))
                    .col(&mut timestamp_now(Levels::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CustomerLevels::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CustomerLevels::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CustomerLevels::CustomerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CustomerLevels::LevelId).big_integer().not_null())
                    .col(
                        ColumnDef::new(CustomerLevels::StartDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CustomerLevels::EndDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CustomerLevels::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(&mut timestamp_now(CustomerLevels::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_customer_levels_customer_window")
                    .table(CustomerLevels::Table)
                    .col(CustomerLevels::CustomerId)
                    .col(CustomerLevels::StartDate)
                    .col(CustomerLevels::EndDate)
                    .to_owned(),
            )
            .await?;

        let mut benefits = Table::create();
        benefits.table(Benefits::Table).if_not_exists().col(
            ColumnDef::new(Benefits::Id)
                .big_integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        );
        benefit_term_columns(&mut benefits);
        benefits
            .col(&mut timestamp_now(Benefits::CreatedAt))
            .col(&mut timestamp_now(Benefits::UpdatedAt));
        manager.create_table(benefits).await?;

        let mut generated = Table::create();
        generated
            .table(BenefitsGenerated::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(BenefitsGenerated::Id)
                    .big_integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(
                ColumnDef::new(BenefitsGenerated::BenefitId)
                    .big_integer()
                    .not_null(),
            );
        benefit_term_columns(&mut generated);
        generated
            .col(
                ColumnDef::new(BenefitsGenerated::StockUsed)
                    .integer()
                    .not_null()
                    .default(0),
            )
            .col(
                ColumnDef::new(BenefitsGenerated::StartDate)
                    .timestamp_with_time_zone()
                    .not_null(),
            )
            .col(
                ColumnDef::new(BenefitsGenerated::EndDate)
                    .timestamp_with_time_zone()
                    .not_null(),
            )
            .col(&mut timestamp_now(BenefitsGenerated::CreatedAt))
            .col(&mut timestamp_now(BenefitsGenerated::UpdatedAt));
        manager.create_table(generated).await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_benefits_generated_level_window")
                    .table(BenefitsGenerated::Table)
                    .col(BenefitsGenerated::LevelId)
                    .col(BenefitsGenerated::StartDate)
                    .col(BenefitsGenerated::EndDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_benefits_generated_benefit_id")
                    .table(BenefitsGenerated::Table)
                    .col(BenefitsGenerated::BenefitId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BenefitTickets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BenefitTickets::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BenefitTickets::CustomerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BenefitTickets::BenefitGeneratedId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BenefitTickets::StartDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BenefitTickets::EndDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BenefitTickets::Redeemed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(&mut timestamp_now(BenefitTickets::CreatedAt))
                    .col(&mut timestamp_now(BenefitTickets::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_benefit_tickets_customer_window")
                    .table(BenefitTickets::Table)
                    .col(BenefitTickets::CustomerId)
                    .col(BenefitTickets::StartDate)
                    .col(BenefitTickets::EndDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PeriodsCovered::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PeriodsCovered::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PeriodsCovered::StartDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PeriodsCovered::EndDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PeriodsCovered::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(&mut timestamp_now(PeriodsCovered::CreatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PeriodsCovered::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BenefitTickets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BenefitsGenerated::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Benefits::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CustomerLevels::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Levels::Table).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(Alias::new("benefit_frequency")).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(Alias::new("benefit_type")).to_owned())
            .await?;
        Ok(())
    }
}
