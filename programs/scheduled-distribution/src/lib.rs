use anchor_lang::prelude::*;

declare_id!("Ev26fh1vMopezyJNUjaf2vTZ7gkBckpouc5ApT639Tdn");

pub mod instructions;
pub mod errors;
pub mod constants;
pub mod states;
pub mod events;
pub mod engine;
pub mod token_provider;

pub use instructions::*;
pub use events::*;
pub use states::VestingParams;

#[program]
pub mod scheduled_distribution {
    use super::*;

    pub fn initialize(ctx: Context<Initialize>, params: VestingParams) -> Result<()> {
        Initialize::handle(ctx, params)
    }

    pub fn new_vesting(ctx: Context<NewVesting>, params: VestingParams) -> Result<()> {
        NewVesting::handle(ctx, params)
    }

    pub fn deposit(ctx: Context<Deposit>, params: DepositParams) -> Result<()> {
        Deposit::handle(ctx, params)
    }

    pub fn distribute_payment(ctx: Context<DistributePayment>) -> Result<()> {
        DistributePayment::handle(ctx)
    }

    pub fn withdraw_payment(ctx: Context<WithdrawPayment>) -> Result<()> {
        WithdrawPayment::handle(ctx)
    }

    pub fn reclaim_unallocated(ctx: Context<ReclaimUnallocated>) -> Result<()> {
        ReclaimUnallocated::handle(ctx)
    }

    pub fn percentage_of(ctx: Context<QueryPlan>, beneficiary: Pubkey) -> Result<u8> {
        QueryPlan::percentage_of(ctx, beneficiary)
    }

    pub fn balances(ctx: Context<QueryBalance>, beneficiary: Pubkey) -> Result<u64> {
        QueryBalance::balances(ctx, beneficiary)
    }

    pub fn plan_info(ctx: Context<QueryPlan>) -> Result<PlanInfo> {
        QueryPlan::plan_info(ctx)
    }
}
