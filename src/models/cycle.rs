use crate::entities::period_covered_entity as periods_covered;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Result of asking the period gate for a new cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodGate {
    AlreadyCovered(periods_covered::Model),
    Opened(periods_covered::Model),
}

impl PeriodGate {
    pub fn period(&self) -> &periods_covered::Model {
        match self {
            PeriodGate::AlreadyCovered(p) | PeriodGate::Opened(p) => p,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LevelingReport {
    pub scanned: usize,
    pub leveled: usize,
    pub skipped: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CycleStatus {
    AlreadyCovered,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CycleReport {
    pub status: CycleStatus,
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
    pub activated_benefits: usize,
    pub leveling: LevelingReport,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ActivationReport {
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
    pub activated_benefits: usize,
}
