use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::engine;
use crate::errors::ErrorCode;
use crate::constants::{LEDGER_SEED, PLAN_SEED, VAULT_SEED};
use crate::states::{TokenLedger, VestingPlan};
use crate::token_provider::SplTokenProvider;

/// Pays a beneficiary their whole owed balance for one mint
#[derive(Accounts)]
pub struct WithdrawPayment<'info> {
    pub beneficiary: Signer<'info>,

    #[account(
        seeds = [PLAN_SEED, plan.registry.as_ref(), &plan.plan_id.to_le_bytes()],
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
        mut,
        seeds = [LEDGER_SEED, plan.key().as_ref(), mint.key().as_ref()],
        bump = ledger.bump,
        has_one = plan @ ErrorCode::LedgerPlanMismatch,
        has_one = mint @ ErrorCode::LedgerPlanMismatch
    )]
    pub ledger: Account<'info, TokenLedger>,

    #[account(
        mut,
        token::mint = mint,
        token::authority = beneficiary
    )]
    pub beneficiary_token_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

impl<'info> WithdrawPayment<'info> {
    pub fn handle(ctx: Context<WithdrawPayment>) -> Result<()> {
        let beneficiary = ctx.accounts.beneficiary.key();
        let destination = ctx.accounts.beneficiary_token_account.key();
        msg!("Processing withdrawal for: {}", beneficiary);

        let plan = &ctx.accounts.plan;
        let plan_id = plan.plan_id.to_le_bytes();
        let bump = [plan.bump];
        let seeds: &[&[u8]] = &[PLAN_SEED, plan.registry.as_ref(), &plan_id, &bump];
        let signer_seeds = &[seeds];

        let mut token = SplTokenProvider::with_destination(
            &ctx.accounts.vault,
            &ctx.accounts.beneficiary_token_account,
            plan.to_account_info(),
            ctx.accounts.token_program.to_account_info(),
            signer_seeds,
        );
        let amount = engine::withdraw_payment(
            &mut ctx.accounts.ledger,
            &mut token,
            &beneficiary,
            &destination,
        )?;

        msg!("Withdrawal completed: {} units", amount);

        emit!(crate::events::PaymentWithdrawn {
            plan: ctx.accounts.plan.key(),
            mint: ctx.accounts.mint.key(),
            beneficiary,
            amount,
            timestamp: Clock::get()?.unix_timestamp,
        });

        Ok(())
    }
}
