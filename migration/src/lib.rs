pub use sea_orm_migration::prelude::*;

mod m20250901_000001_initial;
mod m20250901_000002_levels_and_benefits;
mod m20250915_000001_add_benefit_revision;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250901_000001_initial::Migration),
            Box::new(m20250901_000002_levels_and_benefits::Migration),
            Box::new(m20250915_000001_add_benefit_revision::Migration),
        ]
    }
}
