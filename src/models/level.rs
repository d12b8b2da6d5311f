use crate::entities::{customer_level_entity as customer_levels, level_entity as levels};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

fn default_true() -> bool {
    true
}

/// Full level definition; also the create request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LevelTerms {
    pub name: String,
    pub min_points: f64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

pub type CreateLevelRequest = LevelTerms;

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateLevelRequest {
    pub name: Option<String>,
    pub min_points: Option<f64>,
    pub is_active: Option<bool>,
}

impl UpdateLevelRequest {
    pub fn apply_to(self, current: &levels::Model) -> LevelTerms {
        LevelTerms {
            name: self.name.unwrap_or_else(|| current.name.clone()),
            min_points: self.min_points.unwrap_or(current.min_points),
            is_active: self.is_active.unwrap_or(current.is_active),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomerLevel {
    pub customer_id: i64,
    pub level_id: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LevelResponse {
    pub id: i64,
    pub name: String,
    pub min_points: f64,
    pub is_active: bool,
}

impl From<levels::Model> for LevelResponse {
    fn from(m: levels::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            min_points: m.min_points,
            is_active: m.is_active,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CustomerLevelResponse {
    pub id: i64,
    pub customer_id: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub level: LevelResponse,
}

impl CustomerLevelResponse {
    pub fn new(row: customer_levels::Model, level: levels::Model) -> Self {
        Self {
            id: row.id,
            customer_id: row.customer_id,
            start_date: row.start_date,
            end_date: row.end_date,
            level: level.into(),
        }
    }
}

/// What the level assigner did for one customer.
#[derive(Debug, Clone, PartialEq)]
pub enum LevelAssignment {
    /// an active customer level already covers `now`
    AlreadyLeveled,
    NoSuitableLevel { points: f64 },
    /// the matched level has no generated benefit in the current window
    NoGeneratedBenefits { level_id: i64 },
    Assigned {
        customer_level: customer_levels::Model,
        tickets: usize,
    },
}

impl LevelAssignment {
    pub fn is_assigned(&self) -> bool {
        matches!(self, LevelAssignment::Assigned { .. })
    }
}
