use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::engine;
use crate::errors::ErrorCode;
use crate::constants::{LEDGER_SEED, PLAN_SEED, VAULT_SEED};
use crate::states::{TokenLedger, VestingPlan};
use crate::token_provider::SplTokenProvider;

/// Executes the next due checkpoint of a plan for one mint. Anyone may call it.
#[derive(Accounts)]
pub struct DistributePayment<'info> {
    #[account(
        mut,
        seeds = [PLAN_SEED, plan.registry.as_ref(), &plan.plan_id.to_le_bytes()],
        bump = plan.bump,
        has_one = mint @ ErrorCode::InvalidTokenMint
    )]
    pub plan: Account<'info, VestingPlan>,

    pub mint: Box<Account<'info, Mint>>,

    #[account(
        seeds = [VAULT_SEED, plan.key().as_ref(), mint.key().as_ref()],
        bump,
        token::mint = mint,
        token::authority = plan
    )]
    pub vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [LEDGER_SEED, plan.key().as_ref(), mint.key().as_ref()],
        bump = ledger.bump,
        has_one = plan @ ErrorCode::LedgerPlanMismatch,
        has_one = mint @ ErrorCode::LedgerPlanMismatch
    )]
    pub ledger: Account<'info, TokenLedger>,

    pub token_program: Program<'info, Token>,
}

impl<'info> DistributePayment<'info> {
    pub fn handle(ctx: Context<DistributePayment>) -> Result<()> {
        msg!("Distributing payment for plan: {}", ctx.accounts.plan.key());

        let now = Clock::get()?.unix_timestamp;
        let plan_key = ctx.accounts.plan.key();
        let mint_key = ctx.accounts.mint.key();
        let vault_key = ctx.accounts.vault.key();

        msg!("Checkpoint {} of {}", ctx.accounts.plan.next_index, ctx.accounts.plan.schedule.len());
        msg!("Vault balance: {} units", ctx.accounts.vault.amount);

        let token = SplTokenProvider::read_only(
            &ctx.accounts.vault,
            ctx.accounts.plan.to_account_info(),
            ctx.accounts.token_program.to_account_info(),
        );
        let distribution = engine::distribute_payment(
            &mut ctx.accounts.plan,
            &mut ctx.accounts.ledger,
            &token,
            &vault_key,
            now,
        )?;

        msg!("Available: {} units", distribution.available);
        msg!("Credited: {} units", distribution.credited);
        msg!("Dust carried: {} units", distribution.dust);

        emit!(crate::events::PaymentDistributed {
            plan: plan_key,
            mint: mint_key,
            checkpoint: distribution.checkpoint,
            remaining_periods: distribution.remaining_periods,
            available: distribution.available,
            credited: distribution.credited,
            amounts: distribution.amounts,
            dust: distribution.dust,
            timestamp: now,
        });

        Ok(())
    }
}
