use super::{BenefitService, LevelService, PeriodService};
use crate::error::{AppError, AppResult};
use crate::models::{ActivationReport, CycleReport, CycleStatus, LevelingReport, PeriodGate};
use chrono::{DateTime, Utc};

/// Drives one benefit generation cycle: period gate, activation, leveling.
#[derive(Clone)]
pub struct GenerationService {
    periods: PeriodService,
    benefits: BenefitService,
    levels: LevelService,
}

impl GenerationService {
    pub fn new(periods: PeriodService, benefits: BenefitService, levels: LevelService) -> Self {
        Self {
            periods,
            benefits,
            levels,
        }
    }

    /// Safe to call repeatedly: once a period covers `now`, further calls
    /// return `AlreadyCovered` without writing anything. A failure to persist
    /// the period or the activated snapshots aborts the cycle.
    pub async fn run_generation_cycle(&self, now: DateTime<Utc>) -> AppResult<CycleReport> {
        log::info!("Generation cycle started at {now}");

        let period = match self.periods.try_open_cycle(now).await? {
            PeriodGate::Opened(period) => period,
            PeriodGate::AlreadyCovered(period) => {
                log::info!("Generation cycle skipped, period {} is still open", period.id);
                return Ok(CycleReport {
                    status: CycleStatus::AlreadyCovered,
                    period_start: period.start_date,
                    period_end: period.end_date,
                    activated_benefits: 0,
                    leveling: LevelingReport::default(),
                });
            }
        };

        let activated_benefits = self.benefits.activate_benefits(now, &period).await?;
        let leveling = self.levels.generate_customers_level(now).await?;

        log::info!(
            "Generation cycle finished: period {} ({} ~ {}), {activated_benefits} benefits activated, {} customers leveled",
            period.id,
            period.start_date,
            period.end_date,
            leveling.leveled
        );
        Ok(CycleReport {
            status: CycleStatus::Completed,
            period_start: period.start_date,
            period_end: period.end_date,
            activated_benefits,
            leveling,
        })
    }

    /// Activates templates into the period that currently covers `now`.
    pub async fn run_activation(&self, now: DateTime<Utc>) -> AppResult<ActivationReport> {
        let period = self
            .periods
            .active_period(now)
            .await?
            .ok_or_else(|| AppError::NotFound("No active period covers now".to_string()))?;
        let activated_benefits = self.benefits.activate_benefits(now, &period).await?;
        Ok(ActivationReport {
            period_start: period.start_date,
            period_end: period.end_date,
            activated_benefits,
        })
    }
}
