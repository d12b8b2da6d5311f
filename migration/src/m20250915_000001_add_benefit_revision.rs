use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Benefits {
    Table,
    Revision,
}

#[derive(DeriveIden)]
enum BenefitsGenerated {
    Table,
    SourceRevision,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Templates carry a revision bumped on every edit; snapshots record the
/// revision they were copied from.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Benefits::Table)
                    .add_column_if_not_exists(
                        ColumnDef::new(Benefits::Revision)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(BenefitsGenerated::Table)
                    .add_column_if_not_exists(
                        ColumnDef::new(BenefitsGenerated::SourceRevision)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(BenefitsGenerated::Table)
                    .drop_column(BenefitsGenerated::SourceRevision)
                    .to_owned(),
            )
            .await?;
        manager
            .alter_table(
                Table::alter()
                    .table(Benefits::Table)
                    .drop_column(Benefits::Revision)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}
