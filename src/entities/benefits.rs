use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema, DeriveActiveEnum,
    EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "benefit_type")]
#[serde(rename_all = "snake_case")]
pub enum BenefitType {
    #[sea_orm(string_value = "physical")]
    Physical,
    #[sea_orm(string_value = "digital")]
    Digital,
    #[sea_orm(string_value = "gas")]
    Gas,
    #[sea_orm(string_value = "peripheral")]
    Peripheral,
}

impl BenefitType {
    /// Gas discounts and peripheral perks are always-on and never stock-limited.
    pub fn is_always_on(self) -> bool {
        matches!(self, BenefitType::Gas | BenefitType::Peripheral)
    }
}

impl std::fmt::Display for BenefitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BenefitType::Physical => write!(f, "physical"),
            BenefitType::Digital => write!(f, "digital"),
            BenefitType::Gas => write!(f, "gas"),
            BenefitType::Peripheral => write!(f, "peripheral"),
        }
    }
}

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema, DeriveActiveEnum,
    EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "benefit_frequency")]
#[serde(rename_all = "snake_case")]
pub enum BenefitFrequency {
    #[sea_orm(string_value = "n_times")]
    NTimes,
    #[sea_orm(string_value = "hourly")]
    Hourly,
    #[sea_orm(string_value = "daily")]
    Daily,
    #[sea_orm(string_value = "weekly")]
    Weekly,
    #[sea_orm(string_value = "monthly")]
    Monthly,
    #[sea_orm(string_value = "always")]
    Always,
}

impl std::fmt::Display for BenefitFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BenefitFrequency::NTimes => write!(f, "n_times"),
            BenefitFrequency::Hourly => write!(f, "hourly"),
            BenefitFrequency::Daily => write!(f, "daily"),
            BenefitFrequency::Weekly => write!(f, "weekly"),
            BenefitFrequency::Monthly => write!(f, "monthly"),
            BenefitFrequency::Always => write!(f, "always"),
        }
    }
}

/// Benefit template, edited by administrators.
///
/// Generated snapshots (`benefits_generated`) are copied from this row when a
/// cycle is activated; later edits only bump `revision` and never touch them.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "benefits")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub level_id: i64,
    pub name: String,
    pub benefit_type: BenefitType,
    pub external_product_id: String,
    pub frequency: BenefitFrequency,
    pub discount: f64,
    pub num_times: i32,
    /// -1 = unlimited
    pub stock: i32,
    pub dependency: bool,
    pub min_amount: f64,
    pub is_active: bool,
    pub revision: i32,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
