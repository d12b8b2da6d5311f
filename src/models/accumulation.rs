use super::benefit::BenefitTicketResponse;
use super::pricing::{PointsOutcome, PricingRule};
use crate::entities::{MarginType, accumulation_entity as accumulations};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccumulateRequest {
    pub product_codename: String,
    #[serde(default)]
    pub external_gas_station_id: Option<String>,
    pub amount: f64,
    pub customer_phone: String,
}

/// Accumulation row ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccumulation {
    pub customer_id: i64,
    pub product_id: i64,
    pub gas_station_id: Option<i64>,
    pub amount: f64,
    pub generated_points: f64,
    pub margin_type: MarginType,
    pub margin_applied: f64,
    pub points_applied: f64,
    pub gas_price_applied: f64,
    pub created_at: DateTime<Utc>,
}

impl NewAccumulation {
    /// Copies the rule fields onto the record so history survives rule edits.
    pub fn from_rule(
        rule: &PricingRule,
        outcome: PointsOutcome,
        customer_id: i64,
        amount: f64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            customer_id,
            product_id: rule.product_id,
            gas_station_id: rule.gas_station_id,
            amount,
            generated_points: outcome.points,
            margin_type: rule.margin_type,
            margin_applied: rule.margin_percent,
            points_applied: rule.points_per_unit,
            gas_price_applied: outcome.gas_price,
            created_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointsInWindow {
    pub total: f64,
    pub count: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AccumulationResponse {
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
    pub created_at: DateTime<Utc>,
}

impl From<accumulations::Model> for AccumulationResponse {
    fn from(m: accumulations::Model) -> Self {
        Self {
            id: m.id,
            customer_id: m.customer_id,
            product_id: m.product_id,
            gas_station_id: m.gas_station_id,
            amount: m.amount,
            generated_points: m.generated_points,
            margin_type: m.margin_type,
            margin_applied: m.margin_applied,
            points_applied: m.points_applied,
            gas_price_applied: m.gas_price_applied,
            created_at: m.created_at,
        }
    }
}

/// Recorded purchase plus the dependent benefits it unlocked.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AccumulationWithBenefits {
    pub accumulation: AccumulationResponse,
    pub benefits: Vec<BenefitTicketResponse>,
}
