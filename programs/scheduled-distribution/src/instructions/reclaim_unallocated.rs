use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::engine;
use crate::errors::ErrorCode;
use crate::constants::{LEDGER_SEED, PLAN_SEED, REGISTRY_SEED, VAULT_SEED};
use crate::states::{PlanRegistry, TokenLedger, VestingPlan};
use crate::token_provider::SplTokenProvider;

/// Owner sweep of whatever a completed plan holds beyond what it owes
#[derive(Accounts)]
pub struct ReclaimUnallocated<'info> {
    pub owner: Signer<'info>,

    #[account(
        seeds = [REGISTRY_SEED],
        bump = registry.bump
    )]
    pub registry: Account<'info, PlanRegistry>,

    #[account(
        seeds = [PLAN_SEED, registry.key().as_ref(), &plan.plan_id.to_le_bytes()],
        bump = plan.bump,
        has_one = mint @ ErrorCode::InvalidTokenMint
    )]
    pub plan: Account<'info, VestingPlan>,

    pub mint: Box<Account<'info, Mint>>,

    #[account(
        mut,
        seeds = [VAULT_SEED, plan.key().as_ref(), mint.key().as_ref()],
        bump,
        token::mint = mint,
        token::authority = plan
    )]
    pub vault: Box<Account<'info, TokenAccount>>,

    #[account(
        seeds = [LEDGER_SEED, plan.key().as_ref(), mint.key().as_ref()],
        bump = ledger.bump,
        has_one = plan @ ErrorCode::LedgerPlanMismatch,
        has_one = mint @ ErrorCode::LedgerPlanMismatch
    )]
    pub ledger: Account<'info, TokenLedger>,

    #[account(
        mut,
        token::mint = mint,
        token::authority = owner
    )]
    pub owner_token_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

impl<'info> ReclaimUnallocated<'info> {
    pub fn handle(ctx: Context<ReclaimUnallocated>) -> Result<()> {
        let owner = ctx.accounts.owner.key();
        let vault_key = ctx.accounts.vault.key();
        let destination = ctx.accounts.owner_token_account.key();
        msg!("Reclaiming unallocated funds of plan: {}", ctx.accounts.plan.key());

        let plan = &ctx.accounts.plan;
        let plan_id = plan.plan_id.to_le_bytes();
        let bump = [plan.bump];
        let seeds: &[&[u8]] = &[PLAN_SEED, plan.registry.as_ref(), &plan_id, &bump];
        let signer_seeds = &[seeds];

        let mut token = SplTokenProvider::with_destination(
            &ctx.accounts.vault,
            &ctx.accounts.owner_token_account,
            plan.to_account_info(),
            ctx.accounts.token_program.to_account_info(),
            signer_seeds,
        );
        let amount = engine::reclaim_unallocated(
            &ctx.accounts.registry,
            &owner,
            plan,
            &ctx.accounts.ledger,
            &mut token,
            &vault_key,
            &destination,
        )?;

        msg!("Reclaimed {} units to owner", amount);

        emit!(crate::events::UnallocatedReclaimed {
            plan: ctx.accounts.plan.key(),
            mint: ctx.accounts.mint.key(),
            owner,
            amount,
            timestamp: Clock::get()?.unix_timestamp,
        });

        Ok(())
    }
}
