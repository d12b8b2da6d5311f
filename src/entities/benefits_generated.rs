use super::benefits::{BenefitFrequency, BenefitType};
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Period-scoped copy of a benefit template.
/// - benefit_id / source_revision: the template row and revision it was copied from
/// - stock_used: only mutated by redemption
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "benefits_generated")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub benefit_id: i64,
    pub source_revision: i32,
    pub level_id: i64,
    pub name: String,
    pub benefit_type: BenefitType,
    pub external_product_id: String,
    pub frequency: BenefitFrequency,
    pub discount: f64,
    pub num_times: i32,
    pub stock: i32,
    pub stock_used: i32,
    pub dependency: bool,
    pub min_amount: f64,
    pub is_active: bool,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Model {
    /// Stock is bounded unless it is negative (-1 = unlimited).
    pub fn has_bounded_stock(&self) -> bool {
        self.stock > -1
    }

    pub fn covers(&self, now: DateTime<Utc>) -> bool {
        self.start_date <= now && now <= self.end_date
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
