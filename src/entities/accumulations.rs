use super::gas_station_margins::MarginType;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One purchase and the points it generated.
///
/// margin_type / margin_applied / points_applied / gas_price_applied are copied
/// from the pricing rule at purchase time so later rule edits leave history alone.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "accumulations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub customer_id: i64,
    pub product_id: i64,
    pub gas_station_id: Option<i64>,
    pub amount: f64,
    pub generated_points: f64,
    pub margin_type: MarginType,
    pub margin_applied: f64,
    pub points_applied: f64,
    pub gas_price_applied: f64,
    pub used_points: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
