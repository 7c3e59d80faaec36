use anchor_lang::prelude::*;
use anchor_spl::token::Mint;
use crate::errors::ErrorCode;
use crate::constants::{PLAN_SEED, REGISTRY_SEED};
use crate::states::{PlanRegistry, VestingParams, VestingPlan};

/// Owner-only creation of an additional, independent plan
#[derive(Accounts)]
pub struct NewVesting<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [REGISTRY_SEED],
        bump = registry.bump,
        constraint = registry.owner == authority.key() @ ErrorCode::Unauthorized
    )]
    pub registry: Account<'info, PlanRegistry>,

    #[account(
        init,
        payer = authority,
        space = VestingPlan::DISCRIMINATOR.len() + VestingPlan::INIT_SPACE,
        seeds = [PLAN_SEED, registry.key().as_ref(), &registry.plan_count.to_le_bytes()],
        bump
    )]
    pub plan: Account<'info, VestingPlan>,

    /// Token the new plan distributes
    pub mint: Box<Account<'info, Mint>>,

    pub system_program: Program<'info, System>,
}

impl<'info> NewVesting<'info> {
    pub fn handle(ctx: Context<NewVesting>, params: VestingParams) -> Result<()> {
        msg!("Creating vesting plan, requested by: {}", ctx.accounts.authority.key());

        let now = Clock::get()?.unix_timestamp;
        let authority = ctx.accounts.authority.key();
        let registry_key = ctx.accounts.registry.key();
        let plan_key = ctx.accounts.plan.key();
        let mint = ctx.accounts.mint.key();

        let plan_id = ctx.accounts.registry.register_plan(&authority)?;
        let plan = VestingPlan::new(registry_key, plan_id, mint, params, now, ctx.bumps.plan)?;
        ctx.accounts.plan.set_inner(plan);

        emit_plan_created(plan_key, &ctx.accounts.plan);

        msg!("Plan {} created, {} plans in registry", plan_id, ctx.accounts.registry.plan_count);
        Ok(())
    }
}

pub(crate) fn emit_plan_created(plan_key: Pubkey, plan: &VestingPlan) {
    msg!("Plan account: {}", plan_key);
    msg!("Mint: {}", plan.mint);
    msg!("Beneficiaries: {}", plan.beneficiaries.len());
    msg!("Checkpoints: {}", plan.schedule.len());

    emit!(crate::events::PlanCreated {
        plan: plan_key,
        plan_id: plan.plan_id,
        mint: plan.mint,
        beneficiaries: plan.beneficiaries.clone(),
        percentages: plan.percentages.clone(),
        schedule: plan.schedule.clone(),
        created_at: plan.created_at,
    });
}
