pub mod plan_registry;
pub mod vesting_plan;
pub mod token_ledger;

pub use plan_registry::*;
pub use vesting_plan::*;
pub use token_ledger::*;
