use super::{BenefitService, SettingsService};
use crate::engine::validate_level;
use crate::entities::{customer_level_entity as customer_levels, level_entity as levels};
use crate::error::{AppError, AppResult};
use crate::models::{
    CreateLevelRequest, LevelAssignment, LevelingReport, NewCustomerLevel, UpdateLevelRequest,
};
use crate::repositories::SharedRepository;
use crate::utils::normalize_phone;
use chrono::{DateTime, TimeDelta, Utc};
use futures_util::{StreamExt, stream};

type Window = (DateTime<Utc>, DateTime<Utc>);

#[derive(Clone)]
pub struct LevelService {
    repo: SharedRepository,
    settings: SettingsService,
    benefits: BenefitService,
    concurrency: usize,
}

impl LevelService {
    pub fn new(
        repo: SharedRepository,
        settings: SettingsService,
        benefits: BenefitService,
        concurrency: usize,
    ) -> Self {
        Self {
            repo,
            settings,
            benefits,
            concurrency: concurrency.max(1),
        }
    }

    pub async fn add_level(&self, req: CreateLevelRequest) -> AppResult<levels::Model> {
        validate_level(&req.name, req.min_points)?;
        let level = self
            .repo
            .insert_level(CreateLevelRequest {
                name: req.name.trim().to_string(),
                ..req
            })
            .await?;
        log::info!("Created level {} ({}, min {})", level.id, level.name, level.min_points);
        Ok(level)
    }

    pub async fn update_level(&self, id: i64, req: UpdateLevelRequest) -> AppResult<levels::Model> {
        let current = self
            .repo
            .find_level(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Level not found".to_string()))?;
        let mut terms = req.apply_to(&current);
        validate_level(&terms.name, terms.min_points)?;
        terms.name = terms.name.trim().to_string();
        self.repo.update_level(id, terms).await
    }

    pub async fn get_customer_level_by_phone(
        &self,
        phone: &str,
        now: DateTime<Utc>,
    ) -> AppResult<(customer_levels::Model, levels::Model)> {
        self.repo
            .customer_level_by_phone(&normalize_phone(phone), now)
            .await?
            .ok_or_else(|| AppError::NotFound("Customer has no active level".to_string()))
    }

    async fn lookback_window(&self, now: DateTime<Utc>) -> AppResult<Window> {
        let days = self.settings.lookback_days().await?;
        let start = TimeDelta::try_days(days)
            .and_then(|span| now.checked_sub_signed(span))
            .ok_or_else(|| {
                AppError::ValidationError(format!("A {days} day lookback from {now} is out of range"))
            })?;
        Ok((start, now))
    }

    /// Levels a single customer. New customers skip the points lookup and
    /// start from zero.
    pub async fn generate_customer_level(
        &self,
        customer_id: i64,
        now: DateTime<Utc>,
        is_new: bool,
    ) -> AppResult<LevelAssignment> {
        let window = if is_new {
            None
        } else {
            Some(self.lookback_window(now).await?)
        };
        self.assign_level(customer_id, now, window).await
    }

    async fn assign_level(
        &self,
        customer_id: i64,
        now: DateTime<Utc>,
        window: Option<Window>,
    ) -> AppResult<LevelAssignment> {
        if self.repo.active_customer_level(customer_id, now).await?.is_some() {
            return Ok(LevelAssignment::AlreadyLeveled);
        }

        let points = match window {
            Some((start, end)) => {
                self.repo
                    .sum_points_in_window(customer_id, start, end)
                    .await?
                    .total
            }
            None => 0.0,
        };

        let Some(level) = self.repo.find_suitable_level(points).await? else {
            log::debug!("No level fits customer {customer_id} with {points} points");
            return Ok(LevelAssignment::NoSuitableLevel { points });
        };

        let generated = self.repo.generated_for_level(level.id, now).await?;
        let Some(first) = generated.first() else {
            log::debug!("Level {} has no generated benefits at {now}", level.id);
            return Ok(LevelAssignment::NoGeneratedBenefits { level_id: level.id });
        };

        let customer_level = self
            .repo
            .insert_customer_level(NewCustomerLevel {
                customer_id,
                level_id: level.id,
                start_date: first.start_date,
                end_date: first.end_date,
            })
            .await?;
        let tickets = self.benefits.issue_tickets(customer_id, &generated).await?;

        log::info!(
            "Customer {customer_id} assigned level {} ({points} points, {tickets} tickets)",
            level.name
        );
        Ok(LevelAssignment::Assigned {
            customer_level,
            tickets,
        })
    }

    /// Scans every customer with bounded concurrency. A failing customer is
    /// logged and counted; the rest of the batch continues.
    pub async fn generate_customers_level(&self, now: DateTime<Utc>) -> AppResult<LevelingReport> {
        let customers = self.repo.list_all_customers().await?;
        let window = self.lookback_window(now).await?;

        let outcomes: Vec<(i64, AppResult<LevelAssignment>)> = stream::iter(customers)
            .map(|customer| async move {
                let id = customer.id;
                (id, self.assign_level(id, now, Some(window)).await)
            })
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        let mut report = LevelingReport {
            scanned: outcomes.len(),
            ..Default::default()
        };
        for (customer_id, outcome) in outcomes {
            match outcome {
                Ok(assignment) if assignment.is_assigned() => report.leveled += 1,
                Ok(_) => report.skipped += 1,
                Err(e) => {
                    log::error!("Failed to level customer {customer_id}: {e}");
                    report.failed += 1;
                }
            }
        }

        log::info!(
            "Leveling finished: {} scanned, {} leveled, {} skipped, {} failed",
            report.scanned,
            report.leveled,
            report.skipped,
            report.failed
        );
        Ok(report)
    }
}
