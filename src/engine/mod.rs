//! Pure accrual and benefit rules.
//!
//! Nothing in here touches storage or reads the clock: callers pass `now`
//! and persist whatever comes back.

pub mod benefit_rules;
pub mod levels;
pub mod points;
pub mod redemption;
pub mod snapshot;
pub mod tickets;

pub use benefit_rules::{normalize_benefit, validate_level};
pub use levels::select_suitable_level;
pub use points::{calculate_points, round2};
pub use redemption::{RedemptionPlan, plan_redemption};
pub use snapshot::snapshot_benefit;
pub use tickets::{add_one_month, expand_tickets};
