use super::SettingsService;
use crate::entities::period_covered_entity as periods_covered;
use crate::error::{AppError, AppResult};
use crate::models::PeriodGate;
use crate::repositories::SharedRepository;
use chrono::{DateTime, TimeDelta, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Decides whether a generation cycle may run at `now`.
///
/// Triggers inside this process are serialized by `gate`; the store's
/// `open_period` re-checks under its own lock for other processes.
#[derive(Clone)]
pub struct PeriodService {
    repo: SharedRepository,
    settings: SettingsService,
    gate: Arc<Mutex<()>>,
}

impl PeriodService {
    pub fn new(repo: SharedRepository, settings: SettingsService) -> Self {
        Self {
            repo,
            settings,
            gate: Arc::new(Mutex::new(())),
        }
    }

    pub async fn active_period(&self, now: DateTime<Utc>) -> AppResult<Option<periods_covered::Model>> {
        self.repo.find_active_period(now).await
    }

    /// Returns `Opened` only when this call persisted a new `[now, now + duration]`
    /// period; an existing covering period is reported as `AlreadyCovered`.
    pub async fn try_open_cycle(&self, now: DateTime<Utc>) -> AppResult<PeriodGate> {
        let _guard = self.gate.lock().await;

        if let Some(period) = self.repo.find_active_period(now).await? {
            log::debug!(
                "Period {} ({} ~ {}) already covers {now}",
                period.id,
                period.start_date,
                period.end_date
            );
            return Ok(PeriodGate::AlreadyCovered(period));
        }

        let days = self.settings.cycle_duration_days().await?;
        let end = TimeDelta::try_days(days)
            .and_then(|span| now.checked_add_signed(span))
            .ok_or_else(|| {
                AppError::ValidationError(format!("A {days} day period starting {now} is out of range"))
            })?;
        let gate = self.repo.open_period(now, now, end).await?;
        if let PeriodGate::Opened(period) = &gate {
            log::info!(
                "Opened generation period {} ({} ~ {})",
                period.id,
                period.start_date,
                period.end_date
            );
        }
        Ok(gate)
    }
}
