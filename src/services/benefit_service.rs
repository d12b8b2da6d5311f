use crate::engine::{expand_tickets, normalize_benefit, plan_redemption, snapshot_benefit};
use crate::entities::{
    BenefitType, benefit_entity as benefits, benefit_generated_entity as benefits_generated,
    period_covered_entity as periods_covered,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    BenefitTerms, CreateBenefitRequest, TicketWithBenefit, UpdateBenefitRequest,
    UpdateGeneratedBenefitRequest,
};
use crate::repositories::SharedRepository;
use crate::utils::normalize_phone;
use chrono::{DateTime, Utc};
use std::collections::HashSet;

#[derive(Clone)]
pub struct BenefitService {
    repo: SharedRepository,
}

impl BenefitService {
    pub fn new(repo: SharedRepository) -> Self {
        Self { repo }
    }

    async fn ensure_level(&self, level_id: i64) -> AppResult<()> {
        match self.repo.find_level(level_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(format!("Level {level_id} not found"))),
        }
    }

    pub async fn create_benefit(&self, req: CreateBenefitRequest) -> AppResult<benefits::Model> {
        let terms = normalize_benefit(req)?;
        self.ensure_level(terms.level_id).await?;
        let created = self.repo.insert_benefit(terms).await?;
        log::info!("Created benefit {} ({})", created.id, created.name);
        Ok(created)
    }

    /// Later edits never touch snapshots already generated from this template.
    pub async fn update_benefit(
        &self,
        id: i64,
        req: UpdateBenefitRequest,
    ) -> AppResult<benefits::Model> {
        let current = self
            .repo
            .find_benefit(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Benefit not found".to_string()))?;
        let terms = normalize_benefit(req.apply_to(BenefitTerms::from(&current)))?;
        if terms.level_id != current.level_id {
            self.ensure_level(terms.level_id).await?;
        }
        let updated = self.repo.update_benefit(id, terms).await?;
        log::info!("Updated benefit {} to revision {}", updated.id, updated.revision);
        Ok(updated)
    }

    pub async fn update_generated_benefit(
        &self,
        id: i64,
        req: UpdateGeneratedBenefitRequest,
    ) -> AppResult<benefits_generated::Model> {
        if req.stock.is_some_and(|s| s < -1) {
            return Err(AppError::ValidationError(
                "stock must be -1 (unlimited) or zero or positive".to_string(),
            ));
        }
        self.repo.update_generated_benefit(id, req).await
    }

    /// Snapshots every active template that has no generated instance covering
    /// `now` into `period`. Returns how many snapshots were created.
    pub async fn activate_benefits(
        &self,
        now: DateTime<Utc>,
        period: &periods_covered::Model,
    ) -> AppResult<usize> {
        let templates = self.repo.list_active_benefits().await?;
        let ids: Vec<i64> = templates.iter().map(|b| b.id).collect();
        let already: HashSet<i64> = self
            .repo
            .generated_covering(&ids, now)
            .await?
            .into_iter()
            .map(|g| g.benefit_id)
            .collect();

        let snapshots: Vec<_> = templates
            .iter()
            .filter(|b| !already.contains(&b.id))
            .map(|b| snapshot_benefit(b, period.start_date, period.end_date))
            .collect();
        if snapshots.is_empty() {
            log::info!("No benefits to activate for period {}", period.id);
            return Ok(0);
        }

        let inserted = self.repo.insert_generated_many(snapshots).await?;
        log::info!("Activated {inserted} benefits for period {}", period.id);
        Ok(inserted)
    }

    /// Expands each generated benefit for the customer and inserts all tickets
    /// in one batch.
    pub async fn issue_tickets(
        &self,
        customer_id: i64,
        generated: &[benefits_generated::Model],
    ) -> AppResult<usize> {
        let drafts: Vec<_> = generated
            .iter()
            .flat_map(|g| expand_tickets(g, customer_id))
            .collect();
        if drafts.is_empty() {
            return Ok(0);
        }
        self.repo.insert_tickets(drafts).await
    }

    pub async fn redeem_benefit(
        &self,
        ticket_id: i64,
        customer_id: i64,
        now: DateTime<Utc>,
    ) -> AppResult<TicketWithBenefit> {
        let found = self.repo.find_redeemable_ticket(ticket_id, customer_id).await?;
        let plan = plan_redemption(found.as_ref(), now)?;
        let redeemed = self.repo.commit_redemption(plan).await?;
        log::info!(
            "Customer {customer_id} redeemed ticket {ticket_id} (benefit {}, stock used {})",
            redeemed.benefit.id,
            redeemed.benefit.stock_used
        );
        Ok(redeemed)
    }

    /// Dependent benefits unlocked by a purchase of `charged_amount`. Read-only.
    pub async fn get_active_dependent_benefits(
        &self,
        phone: &str,
        charged_amount: f64,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<TicketWithBenefit>> {
        self.repo
            .dependent_tickets_by_phone(&normalize_phone(phone), charged_amount, now)
            .await
    }

    pub async fn get_active_benefits_by_phone(
        &self,
        phone: &str,
        benefit_type: Option<BenefitType>,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<TicketWithBenefit>> {
        self.repo
            .active_tickets_by_phone(
                &normalize_phone(phone),
                benefit_type.unwrap_or(BenefitType::Digital),
                now,
            )
            .await
    }

    pub async fn get_gas_discount_by_phone(
        &self,
        phone: &str,
        now: DateTime<Utc>,
    ) -> AppResult<TicketWithBenefit> {
        self.repo
            .gas_ticket_by_phone(&normalize_phone(phone), now)
            .await?
            .ok_or_else(|| AppError::NotFound("No gas discount available".to_string()))
    }
}
