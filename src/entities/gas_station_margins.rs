use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "margin_type")]
#[serde(rename_all = "snake_case")]
pub enum MarginType {
    #[sea_orm(string_value = "by_margin")]
    ByMargin,
    #[sea_orm(string_value = "by_volume")]
    ByVolume,
}

impl std::fmt::Display for MarginType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarginType::ByMargin => write!(f, "by_margin"),
            MarginType::ByVolume => write!(f, "by_volume"),
        }
    }
}

/// Pricing rule for a product, optionally scoped to one station.
/// - margin: percentage of the charged amount (ByMargin)
/// - points: points per unit (per margin currency unit, or per liter)
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "gas_station_margins")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub gas_station_id: Option<i64>,
    pub product_id: i64,
    pub margin_type: MarginType,
    pub margin: f64,
    pub points: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
