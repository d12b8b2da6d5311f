pub mod accumulations;
pub mod admin;
pub mod benefits;
pub mod customers;

pub use accumulations::accumulations_config;
pub use admin::admin_config;
pub use benefits::benefits_config;
pub use customers::customers_config;
