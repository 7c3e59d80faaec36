use anchor_lang::prelude::*;
use anchor_spl::token::Mint;
use crate::constants::{DEFAULT_PLAN_ID, PLAN_SEED, REGISTRY_SEED};
use crate::states::{PlanRegistry, VestingParams, VestingPlan};
use super::new_vesting::emit_plan_created;

/// One-time setup: the registry owned by the signer plus the default plan
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Becomes the registry owner
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        init,
        payer = owner,
        space = PlanRegistry::DISCRIMINATOR.len() + PlanRegistry::INIT_SPACE,
        seeds = [REGISTRY_SEED],
        bump
    )]
    pub registry: Account<'info, PlanRegistry>,

    /// Default plan (id 0)
    #[account(
        init,
        payer = owner,
        space = VestingPlan::DISCRIMINATOR.len() + VestingPlan::INIT_SPACE,
        seeds = [PLAN_SEED, registry.key().as_ref(), &DEFAULT_PLAN_ID.to_le_bytes()],
        bump
    )]
    pub plan: Account<'info, VestingPlan>,

    /// Token the default plan distributes
    pub mint: Box<Account<'info, Mint>>,

    pub system_program: Program<'info, System>,
}

impl<'info> Initialize<'info> {
    pub fn handle(ctx: Context<Initialize>, params: VestingParams) -> Result<()> {
        msg!("Initializing registry for owner: {}", ctx.accounts.owner.key());

        let now = Clock::get()?.unix_timestamp;
        let owner = ctx.accounts.owner.key();
        let registry_key = ctx.accounts.registry.key();
        let plan_key = ctx.accounts.plan.key();
        let mint = ctx.accounts.mint.key();

        let registry = &mut ctx.accounts.registry;
        registry.set_inner(PlanRegistry::new(owner, ctx.bumps.registry));
        let plan_id = registry.register_plan(&owner)?;

        let plan = VestingPlan::new(registry_key, plan_id, mint, params, now, ctx.bumps.plan)?;
        ctx.accounts.plan.set_inner(plan);

        emit_plan_created(plan_key, &ctx.accounts.plan);

        msg!("Registry initialized with default plan {}", plan_id);
        Ok(())
    }
}
