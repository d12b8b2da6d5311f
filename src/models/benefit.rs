use crate::entities::{
    BenefitFrequency, BenefitType, benefit_entity as benefits,
    benefit_generated_entity as benefits_generated, benefit_ticket_entity as benefit_tickets,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

fn default_stock() -> i32 {
    -1
}

fn default_true() -> bool {
    true
}

/// Terms shared by a benefit template and its generated snapshots.
/// Doubles as the create request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BenefitTerms {
    pub level_id: i64,
    pub name: String,
    pub benefit_type: BenefitType,
    #[serde(default)]
    pub external_product_id: String,
    pub frequency: BenefitFrequency,
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub num_times: i32,
    /// -1 = unlimited
    #[serde(default = "default_stock")]
    pub stock: i32,
    #[serde(default)]
    pub dependency: bool,
    #[serde(default)]
    pub min_amount: f64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

pub type CreateBenefitRequest = BenefitTerms;

impl From<&benefits::Model> for BenefitTerms {
    fn from(m: &benefits::Model) -> Self {
        Self {
            level_id: m.level_id,
            name: m.name.clone(),
            benefit_type: m.benefit_type,
            external_product_id: m.external_product_id.clone(),
            frequency: m.frequency,
            discount: m.discount,
            num_times: m.num_times,
            stock: m.stock,
            dependency: m.dependency,
            min_amount: m.min_amount,
            is_active: m.is_active,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateBenefitRequest {
    pub level_id: Option<i64>,
    pub name: Option<String>,
    pub benefit_type: Option<BenefitType>,
    pub external_product_id: Option<String>,
    pub frequency: Option<BenefitFrequency>,
    pub discount: Option<f64>,
    pub num_times: Option<i32>,
    pub stock: Option<i32>,
    pub dependency: Option<bool>,
    pub min_amount: Option<f64>,
    pub is_active: Option<bool>,
}

impl UpdateBenefitRequest {
    /// Overlays the provided fields on the current terms.
    pub fn apply_to(self, mut terms: BenefitTerms) -> BenefitTerms {
        if let Some(v) = self.level_id {
            terms.level_id = v;
        }
        if let Some(v) = self.name {
            terms.name = v;
        }
        if let Some(v) = self.benefit_type {
            terms.benefit_type = v;
        }
        if let Some(v) = self.external_product_id {
            terms.external_product_id = v;
        }
        if let Some(v) = self.frequency {
            terms.frequency = v;
        }
        if let Some(v) = self.discount {
            terms.discount = v;
        }
        if let Some(v) = self.num_times {
            terms.num_times = v;
        }
        if let Some(v) = self.stock {
            terms.stock = v;
        }
        if let Some(v) = self.dependency {
            terms.dependency = v;
        }
        if let Some(v) = self.min_amount {
            terms.min_amount = v;
        }
        if let Some(v) = self.is_active {
            terms.is_active = v;
        }
        terms
    }
}

/// Only stock and the active flag of a snapshot may change after activation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateGeneratedBenefitRequest {
    pub stock: Option<i32>,
    pub is_active: Option<bool>,
}

/// Snapshot row ready for insertion; `stock_used` starts at 0.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBenefitGenerated {
    pub benefit_id: i64,
    pub source_revision: i32,
    pub terms: BenefitTerms,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketDraft {
    pub customer_id: i64,
    pub benefit_generated_id: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TicketWithBenefit {
    pub ticket: benefit_tickets::Model,
    pub benefit: benefits_generated::Model,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BenefitResponse {
    pub id: i64,
    pub level_id: i64,
    pub name: String,
    pub benefit_type: BenefitType,
    pub external_product_id: String,
    pub frequency: BenefitFrequency,
    pub discount: f64,
    pub num_times: i32,
    pub stock: i32,
    pub dependency: bool,
    pub min_amount: f64,
    pub is_active: bool,
    pub revision: i32,
}

impl From<benefits::Model> for BenefitResponse {
    fn from(m: benefits::Model) -> Self {
        Self {
            id: m.id,
            level_id: m.level_id,
            name: m.name,
            benefit_type: m.benefit_type,
            external_product_id: m.external_product_id,
            frequency: m.frequency,
            discount: m.discount,
            num_times: m.num_times,
            stock: m.stock,
            dependency: m.dependency,
            min_amount: m.min_amount,
            is_active: m.is_active,
            revision: m.revision,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GeneratedBenefitResponse {
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
}

impl From<benefits_generated::Model> for GeneratedBenefitResponse {
    fn from(m: benefits_generated::Model) -> Self {
        Self {
            id: m.id,
            benefit_id: m.benefit_id,
            source_revision: m.source_revision,
            level_id: m.level_id,
            name: m.name,
            benefit_type: m.benefit_type,
            external_product_id: m.external_product_id,
            frequency: m.frequency,
            discount: m.discount,
            num_times: m.num_times,
            stock: m.stock,
            stock_used: m.stock_used,
            dependency: m.dependency,
            min_amount: m.min_amount,
            is_active: m.is_active,
            start_date: m.start_date,
            end_date: m.end_date,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BenefitTicketResponse {
    pub id: i64,
    pub customer_id: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub redeemed: bool,
    pub benefit: GeneratedBenefitResponse,
}

impl From<TicketWithBenefit> for BenefitTicketResponse {
    fn from(t: TicketWithBenefit) -> Self {
        Self {
            id: t.ticket.id,
            customer_id: t.ticket.customer_id,
            start_date: t.ticket.start_date,
            end_date: t.ticket.end_date,
            redeemed: t.ticket.redeemed,
            benefit: t.benefit.into(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RedeemBenefitRequest {
    pub customer_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct DependentBenefitsQuery {
    pub phone: String,
    pub charged_amount: f64,
}

#[derive(Debug, Deserialize)]
pub struct ActiveBenefitsQuery {
    pub phone: String,
    /// defaults to digital
    pub benefit_type: Option<BenefitType>,
}

#[derive(Debug, Deserialize)]
pub struct PhoneQuery {
    pub phone: String,
}
