pub mod initialize;
pub use initialize::*;

pub mod new_vesting;
pub use new_vesting::*;

pub mod deposit;
pub use deposit::*;

pub mod distribute_payment;
pub use distribute_payment::*;

pub mod withdraw_payment;
pub use withdraw_payment::*;

pub mod reclaim_unallocated;
pub use reclaim_unallocated::*;

pub mod query_plan;
pub use query_plan::*;
