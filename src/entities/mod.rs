pub mod accumulations;
pub mod benefit_tickets;
pub mod benefits;
pub mod benefits_generated;
pub mod customer_levels;
pub mod customers;
pub mod gas_station_margins;
pub mod gas_stations;
pub mod levels;
pub mod periods_covered;
pub mod products;
pub mod settings;

pub use accumulations as accumulation_entity;
pub use benefit_tickets as benefit_ticket_entity;
pub use benefits as benefit_entity;
pub use benefits_generated as benefit_generated_entity;
pub use customer_levels as customer_level_entity;
pub use customers as customer_entity;
pub use gas_station_margins as gas_station_margin_entity;
pub use gas_stations as gas_station_entity;
pub use levels as level_entity;
pub use periods_covered as period_covered_entity;
pub use products as product_entity;
pub use settings as setting_entity;

pub use benefits::{BenefitFrequency, BenefitType};
pub use gas_station_margins::MarginType;
