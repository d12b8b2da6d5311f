//! Storage seams of the loyalty engine.
//!
//! Services only talk to these traits. `DbRepository` backs them with
//! Postgres through sea-orm; `MemoryRepository` keeps everything in process
//! and only exists in test builds.

use crate::engine::RedemptionPlan;
use crate::entities::{
    BenefitType, accumulation_entity as accumulations, benefit_entity as benefits,
    benefit_generated_entity as benefits_generated, customer_entity as customers,
    customer_level_entity as customer_levels, level_entity as levels,
    period_covered_entity as periods_covered,
};
use crate::error::AppResult;
use crate::models::{
    BenefitTerms, LevelTerms, NewAccumulation, NewBenefitGenerated, NewCustomerLevel, PeriodGate,
    PointsInWindow, PricingRule, RegisterCustomerRequest, TicketDraft, TicketWithBenefit,
    UpdateGeneratedBenefitRequest,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub mod db;
#[cfg(test)]
pub mod memory;

pub use db::DbRepository;
#[cfg(test)]
pub use memory::MemoryRepository;

#[async_trait]
pub trait CustomerDirectory: Send + Sync {
    async fn list_all_customers(&self) -> AppResult<Vec<customers::Model>>;

    async fn find_customer_by_id(&self, id: i64) -> AppResult<Option<customers::Model>>;

    /// Matches either the phone number or the external id.
    async fn find_customer_by_phone_or_external_id(
        &self,
        key: &str,
    ) -> AppResult<Option<customers::Model>>;

    /// Inserts or updates by external id. The flag is true when the row is new.
    async fn upsert_customer(
        &self,
        customer: &RegisterCustomerRequest,
    ) -> AppResult<(customers::Model, bool)>;
}

#[async_trait]
pub trait AccumulationStore: Send + Sync {
    async fn insert_accumulation(
        &self,
        accumulation: NewAccumulation,
    ) -> AppResult<accumulations::Model>;

    /// Sum and count of generated points with `created_at` in `[start, end]`.
    async fn sum_points_in_window(
        &self,
        customer_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<PointsInWindow>;
}

#[async_trait]
pub trait PricingStore: Send + Sync {
    /// Margin rule for the product at the given station. Without a station the
    /// rule with no station attached applies.
    async fn find_pricing_rule(
        &self,
        product_codename: &str,
        station_external_id: Option<&str>,
    ) -> AppResult<Option<PricingRule>>;
}

#[async_trait]
pub trait LevelStore: Send + Sync {
    async fn find_level(&self, id: i64) -> AppResult<Option<levels::Model>>;

    async fn insert_level(&self, level: LevelTerms) -> AppResult<levels::Model>;

    async fn update_level(&self, id: i64, level: LevelTerms) -> AppResult<levels::Model>;

    /// Active level with the highest `min_points <= points`.
    async fn find_suitable_level(&self, points: f64) -> AppResult<Option<levels::Model>>;

    async fn active_customer_level(
        &self,
        customer_id: i64,
        now: DateTime<Utc>,
    ) -> AppResult<Option<customer_levels::Model>>;

    async fn customer_level_by_phone(
        &self,
        phone: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<(customer_levels::Model, levels::Model)>>;

    async fn insert_customer_level(
        &self,
        level: NewCustomerLevel,
    ) -> AppResult<customer_levels::Model>;
}

#[async_trait]
pub trait BenefitStore: Send + Sync {
    async fn find_benefit(&self, id: i64) -> AppResult<Option<benefits::Model>>;

    async fn insert_benefit(&self, terms: BenefitTerms) -> AppResult<benefits::Model>;

    /// Replaces the terms and bumps `revision`.
    async fn update_benefit(&self, id: i64, terms: BenefitTerms) -> AppResult<benefits::Model>;

    async fn list_active_benefits(&self) -> AppResult<Vec<benefits::Model>>;

    /// Snapshots of the given templates whose window covers `now`.
    async fn generated_covering(
        &self,
        benefit_ids: &[i64],
        now: DateTime<Utc>,
    ) -> AppResult<Vec<benefits_generated::Model>>;

    /// Active snapshots for a level whose window covers `now`, oldest first.
    async fn generated_for_level(
        &self,
        level_id: i64,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<benefits_generated::Model>>;

    async fn insert_generated_many(&self, generated: Vec<NewBenefitGenerated>) -> AppResult<usize>;

    async fn update_generated_benefit(
        &self,
        id: i64,
        update: UpdateGeneratedBenefitRequest,
    ) -> AppResult<benefits_generated::Model>;

    async fn insert_tickets(&self, drafts: Vec<TicketDraft>) -> AppResult<usize>;

    /// Ticket of the customer with its snapshot, restricted to active snapshots
    /// of redeemable types (gas and peripheral tickets are never redeemed here).
    async fn find_redeemable_ticket(
        &self,
        ticket_id: i64,
        customer_id: i64,
    ) -> AppResult<Option<TicketWithBenefit>>;

    /// Applies a planned redemption atomically.
    ///
    /// The stock increment is conditional on remaining stock and the ticket
    /// flip is conditional on the ticket still being unredeemed, so a lost race
    /// reports `NoStockLeft` or `AlreadyRedeemed` and writes nothing.
    async fn commit_redemption(&self, plan: RedemptionPlan) -> AppResult<TicketWithBenefit>;

    async fn dependent_tickets_by_phone(
        &self,
        phone: &str,
        charged_amount: f64,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<TicketWithBenefit>>;

    async fn active_tickets_by_phone(
        &self,
        phone: &str,
        benefit_type: BenefitType,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<TicketWithBenefit>>;

    async fn gas_ticket_by_phone(
        &self,
        phone: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<TicketWithBenefit>>;
}

#[async_trait]
pub trait PeriodStore: Send + Sync {
    async fn find_active_period(
        &self,
        now: DateTime<Utc>,
    ) -> AppResult<Option<periods_covered::Model>>;

    /// Check-and-insert under a lock: returns the covering period if one
    /// appeared, otherwise persists `[start, end]`.
    async fn open_period(
        &self,
        now: DateTime<Utc>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<PeriodGate>;
}

#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get_setting(&self, key: &str) -> AppResult<Option<String>>;
}

/// Everything the services need from storage.
pub trait Repository:
    CustomerDirectory
    + AccumulationStore
    + PricingStore
    + LevelStore
    + BenefitStore
    + PeriodStore
    + SettingsStore
{
}

impl<T> Repository for T where
    T: CustomerDirectory
        + AccumulationStore
        + PricingStore
        + LevelStore
        + BenefitStore
        + PeriodStore
        + SettingsStore
{
}

pub type SharedRepository = Arc<dyn Repository>;
