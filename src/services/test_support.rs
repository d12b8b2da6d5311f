use super::*;
use crate::config::LoyaltyConfig;
use crate::entities::{
    BenefitFrequency, BenefitType, benefit_entity as benefits, customer_entity as customers,
    level_entity as levels,
};
use crate::models::{BenefitTerms, CreateLevelRequest, RegisterCustomerRequest};
use crate::repositories::{MemoryRepository, SharedRepository};
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;

pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

pub fn terms(level_id: i64, benefit_type: BenefitType, frequency: BenefitFrequency) -> BenefitTerms {
    BenefitTerms {
        level_id,
        name: format!("{benefit_type:?} {frequency:?}"),
        benefit_type,
        external_product_id: "SKU-1".to_string(),
        frequency,
        discount: 10.0,
        num_times: 0,
        stock: -1,
        dependency: false,
        min_amount: 0.0,
        is_active: true,
    }
}

pub fn customer_request(external_id: &str, phone: &str) -> RegisterCustomerRequest {
    RegisterCustomerRequest {
        external_id: external_id.to_string(),
        name: "Ana".to_string(),
        last_name: "López".to_string(),
        status: "active".to_string(),
        phone_number: phone.to_string(),
        email: format!("{}@example.com", external_id.trim().to_lowercase()),
        push_token: String::new(),
    }
}

/// Every service wired over one in-memory store.
pub struct Harness {
    pub repo: Arc<MemoryRepository>,
    pub periods: PeriodService,
    pub benefits: BenefitService,
    pub levels: LevelService,
    pub generation: GenerationService,
    pub accumulations: AccumulationService,
    pub customers: CustomerService,
}

impl Harness {
    pub fn new() -> Self {
        let repo = Arc::new(MemoryRepository::new());
        let shared: SharedRepository = repo.clone();
        let services = Services::new(shared, LoyaltyConfig::default());
        Self {
            repo,
            periods: services.periods,
            benefits: services.benefits,
            levels: services.levels,
            generation: services.generation,
            accumulations: services.accumulations,
            customers: services.customers,
        }
    }

    pub async fn level(&self, name: &str, min_points: f64) -> levels::Model {
        self.levels
            .add_level(CreateLevelRequest {
                name: name.to_string(),
                min_points,
                is_active: true,
            })
            .await
            .unwrap()
    }

    /// Digital benefit with the given frequency and stock.
    pub async fn benefit(
        &self,
        level_id: i64,
        frequency: BenefitFrequency,
        stock: i32,
    ) -> benefits::Model {
        let mut req = terms(level_id, BenefitType::Digital, frequency);
        req.stock = stock;
        self.benefits.create_benefit(req).await.unwrap()
    }

    /// Registered before any cycle runs, so the fast path finds nothing to assign.
    pub async fn customer(&self, external_id: &str, phone: &str) -> customers::Model {
        self.customers
            .register_customer(customer_request(external_id, phone), at(2025, 1, 1))
            .await
            .unwrap()
            .0
    }
}
