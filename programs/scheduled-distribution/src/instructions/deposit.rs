use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::errors::ErrorCode;
use crate::constants::{LEDGER_SEED, PLAN_SEED, VAULT_SEED};
use crate::states::{TokenLedger, VestingPlan};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct DepositParams {
    pub amount: u64,
}

/// Funds a plan for one mint, opening its vault and ledger on first use
#[derive(Accounts)]
pub struct Deposit<'info> {
    #[account(mut)]
    pub depositor: Signer<'info>,

    #[account(
        seeds = [PLAN_SEED, plan.registry.as_ref(), &plan.plan_id.to_le_bytes()],
        bump = plan.bump,
        has_one = mint @ ErrorCode::InvalidTokenMint
    )]
    pub plan: Account<'info, VestingPlan>,

    pub mint: Box<Account<'info, Mint>>,

    #[account(
        init_if_needed,
        payer = depositor,
        seeds = [VAULT_SEED, plan.key().as_ref(), mint.key().as_ref()],
        bump,
        token::mint = mint,
        token::authority = plan
    )]
    pub vault: Box<Account<'info, TokenAccount>>,

    #[account(
        init_if_needed,
        payer = depositor,
        space = TokenLedger::DISCRIMINATOR.len() + TokenLedger::INIT_SPACE,
        seeds = [LEDGER_SEED, plan.key().as_ref(), mint.key().as_ref()],
        bump
    )]
    pub ledger: Account<'info, TokenLedger>,

    #[account(
        mut,
        token::mint = mint,
        token::authority = depositor
    )]
    pub depositor_token_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

impl<'info> Deposit<'info> {
    pub fn handle(ctx: Context<Deposit>, params: DepositParams) -> Result<()> {
        msg!("Processing deposit from: {}", ctx.accounts.depositor.key());
        msg!("Amount: {} units", params.amount);

        validate_deposit_amount(&params)?;

        open_ledger_if_needed(&mut ctx.accounts.ledger, &ctx.accounts.plan, ctx.accounts.mint.key(), ctx.bumps.ledger);

        anchor_spl::token::transfer(
            CpiContext::new(
                ctx.accounts.token_program.to_account_info(),
                anchor_spl::token::Transfer {
                    from: ctx.accounts.depositor_token_account.to_account_info(),
                    to: ctx.accounts.vault.to_account_info(),
                    authority: ctx.accounts.depositor.to_account_info(),
                },
            ),
            params.amount,
        )?;

        ctx.accounts.vault.reload()?;
        msg!("Vault balance: {} units", ctx.accounts.vault.amount);

        emit!(crate::events::DepositReceived {
            plan: ctx.accounts.plan.key(),
            mint: ctx.accounts.mint.key(),
            depositor: ctx.accounts.depositor.key(),
            amount: params.amount,
            vault_balance: ctx.accounts.vault.amount,
            timestamp: Clock::get()?.unix_timestamp,
        });

        Ok(())
    }
}

fn validate_deposit_amount(params: &DepositParams) -> Result<()> {
    require!(params.amount > 0, ErrorCode::InvalidDepositAmount);
    Ok(())
}

/// Binds a freshly allocated ledger to the plan, one zero entry per beneficiary
fn open_ledger_if_needed(
    ledger: &mut Account<TokenLedger>,
    plan: &Account<VestingPlan>,
    mint: Pubkey,
    bump: u8,
) {
    if ledger.is_uninitialized() {
        ledger.set_inner(TokenLedger::new(plan.key(), mint, &plan.beneficiaries, bump));
        msg!("Opened ledger for mint: {}", mint);
    }
}
