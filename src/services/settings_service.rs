use crate::config::LoyaltyConfig;
use crate::error::AppResult;
use crate::repositories::SharedRepository;

pub const CYCLE_DURATION_KEY: &str = "levels_duration";
pub const LOOKBACK_DAYS_KEY: &str = "levels_last_n_days";

/// Upper bound for any stored day count, roughly a century.
pub const MAX_SETTING_DAYS: i64 = 36_500;

/// Runtime knobs stored in the `settings` table, with config fallbacks.
#[derive(Clone)]
pub struct SettingsService {
    repo: SharedRepository,
    defaults: LoyaltyConfig,
}

impl SettingsService {
    pub fn new(repo: SharedRepository, defaults: LoyaltyConfig) -> Self {
        Self { repo, defaults }
    }

    pub async fn cycle_duration_days(&self) -> AppResult<i64> {
        self.days(CYCLE_DURATION_KEY, self.defaults.default_cycle_duration_days)
            .await
    }

    pub async fn lookback_days(&self) -> AppResult<i64> {
        self.days(LOOKBACK_DAYS_KEY, self.defaults.default_lookback_days)
            .await
    }

    async fn days(&self, key: &str, default: i64) -> AppResult<i64> {
        let Some(raw) = self.repo.get_setting(key).await? else {
            return Ok(default);
        };
        match raw.trim().parse::<i64>() {
            Ok(days) if (1..=MAX_SETTING_DAYS).contains(&days) => Ok(days),
            _ => {
                log::warn!(
                    "Setting {key}={raw:?} is not a day count in 1..={MAX_SETTING_DAYS}, using {default}"
                );
                Ok(default)
            }
        }
    }
}
