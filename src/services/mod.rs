pub mod accumulation_service;
pub mod benefit_service;
pub mod customer_service;
pub mod generation_service;
pub mod level_service;
pub mod period_service;
pub mod settings_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use accumulation_service::*;
pub use benefit_service::*;
pub use customer_service::*;
pub use generation_service::*;
pub use level_service::*;
pub use period_service::*;
pub use settings_service::*;

use crate::config::LoyaltyConfig;
use crate::repositories::SharedRepository;

/// All services wired over one store.
#[derive(Clone)]
pub struct Services {
    pub settings: SettingsService,
    pub periods: PeriodService,
    pub benefits: BenefitService,
    pub levels: LevelService,
    pub generation: GenerationService,
    pub accumulations: AccumulationService,
    pub customers: CustomerService,
}

impl Services {
    pub fn new(repo: SharedRepository, loyalty: LoyaltyConfig) -> Self {
        let concurrency = loyalty.level_concurrency;
        let settings = SettingsService::new(repo.clone(), loyalty);
        let periods = PeriodService::new(repo.clone(), settings.clone());
        let benefits = BenefitService::new(repo.clone());
        let levels = LevelService::new(
            repo.clone(),
            settings.clone(),
            benefits.clone(),
            concurrency,
        );
        let generation = GenerationService::new(periods.clone(), benefits.clone(), levels.clone());
        let accumulations = AccumulationService::new(repo.clone(), benefits.clone());
        let customers = CustomerService::new(repo, levels.clone());
        Self {
            settings,
            periods,
            benefits,
            levels,
            generation,
            accumulations,
            customers,
        }
    }
}
