pub mod accumulation;
pub mod benefit;
pub mod common;
pub mod customer;
pub mod cycle;
pub mod level;
pub mod pricing;

pub use accumulation::*;
pub use benefit::*;
pub use common::*;
pub use customer::*;
pub use cycle::*;
pub use level::*;
pub use pricing::*;
