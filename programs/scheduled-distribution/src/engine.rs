//! Checkpoint distribution and withdrawal settlement.
//!
//! Nothing here touches account contexts: instruction handlers load the
//! accounts, build a [`TokenProvider`] and call into these functions, which
//! keeps the algorithm runnable against an in-memory token in tests.

use anchor_lang::prelude::*;
use crate::constants::PERCENT_DENOMINATOR;
use crate::errors::ErrorCode;
use crate::states::{PlanRegistry, TokenLedger, VestingPlan};
use crate::token_provider::TokenProvider;

/// Outcome of one executed checkpoint
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Distribution {
    /// Index of the checkpoint that was executed
    pub checkpoint: u32,
    /// Checkpoints that were left, including this one
    pub remaining_periods: u64,
    /// Held balance minus everything already owed
    pub available: u64,
    /// Credit per beneficiary, plan order
    pub amounts: Vec<u64>,
    /// Sum of `amounts`
    pub credited: u64,
    /// Truncation remainder of this checkpoint's budget, left in `available`
    pub dust: u64,
}

/// floor(available * percentage / 100 / remaining_periods)
pub fn calculate_period_share(
    available: u64,
    percentage: u8,
    remaining_periods: u64,
) -> Result<u64> {
    require!(remaining_periods > 0, ErrorCode::AllPeriodsComplete);

    let denominator = (PERCENT_DENOMINATOR as u128)
        .checked_mul(remaining_periods as u128)
        .ok_or(ErrorCode::MathOverflow)?;
    let share = (available as u128 * percentage as u128) / denominator;

    u64::try_from(share).map_err(|_| ErrorCode::MathOverflow.into())
}

/// Executes the next checkpoint of `plan` for the token held at `holder`.
///
/// Only the ledger and the cursor change; no tokens move.
pub fn distribute_payment<T: TokenProvider>(
    plan: &mut VestingPlan,
    ledger: &mut TokenLedger,
    token: &T,
    holder: &Pubkey,
    now: i64,
) -> Result<Distribution> {
    plan.ensure_release_due(now)?;
    ensure_ledger_matches(plan, ledger)?;

    let total_owed = ledger.total_owed()?;
    let balance = token.balance_of(holder)?;
    let available = balance
        .checked_sub(total_owed)
        .ok_or(ErrorCode::InsufficientVaultBalance)?;
    let remaining_periods = plan.remaining_periods();

    let amounts = plan
        .shares()
        .map(|(_, percentage)| calculate_period_share(available, percentage, remaining_periods))
        .collect::<Result<Vec<u64>>>()?;
    let credited = amounts.iter().try_fold(0u64, |acc, amount| {
        acc.checked_add(*amount).ok_or(ErrorCode::MathOverflow)
    })?;
    let period_budget = available / remaining_periods;
    let dust = period_budget.saturating_sub(credited);

    ledger.credit_all(&amounts)?;
    let checkpoint = plan.next_index;
    plan.advance()?;

    msg!(
        "Checkpoint {} executed: available {}, credited {}, dust {}",
        checkpoint,
        available,
        credited,
        dust
    );

    Ok(Distribution {
        checkpoint,
        remaining_periods,
        available,
        amounts,
        credited,
        dust,
    })
}

/// Pays a beneficiary everything they are owed, zeroing the entry first.
///
/// `take_owed` must run before `transfer`: the entry is already zero while
/// the token is being called, so no callback can pay the same amount twice.
pub fn withdraw_payment<T: TokenProvider>(
    ledger: &mut TokenLedger,
    token: &mut T,
    beneficiary: &Pubkey,
    destination: &Pubkey,
) -> Result<u64> {
    let amount = ledger.take_owed(beneficiary)?;
    token.transfer(destination, amount)?;

    msg!("Withdrew {} units for {}", amount, beneficiary);
    Ok(amount)
}

/// Sends the part of a completed plan's holding that nobody is owed to the owner.
///
/// That is the rounding dust of the final checkpoint plus anything deposited
/// after it. Owed balances are left alone.
pub fn reclaim_unallocated<T: TokenProvider>(
    registry: &PlanRegistry,
    caller: &Pubkey,
    plan: &VestingPlan,
    ledger: &TokenLedger,
    token: &mut T,
    holder: &Pubkey,
    destination: &Pubkey,
) -> Result<u64> {
    registry.ensure_owner(caller)?;
    require!(plan.is_completed(), ErrorCode::PlanNotCompleted);
    ensure_ledger_matches(plan, ledger)?;

    let unallocated = token
        .balance_of(holder)?
        .checked_sub(ledger.total_owed()?)
        .ok_or(ErrorCode::InsufficientVaultBalance)?;
    require!(unallocated > 0, ErrorCode::NothingToReclaim);

    token.transfer(destination, unallocated)?;

    msg!("Reclaimed {} unallocated units", unallocated);
    Ok(unallocated)
}

fn ensure_ledger_matches(plan: &VestingPlan, ledger: &TokenLedger) -> Result<()> {
    require!(ledger.mint == plan.mint, ErrorCode::InvalidTokenMint);
    require!(
        ledger
            .entries
            .iter()
            .map(|e| &e.beneficiary)
            .eq(plan.beneficiaries.iter()),
        ErrorCode::LedgerPlanMismatch
    );
    Ok(())
}
