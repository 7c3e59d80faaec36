use anchor_lang::prelude::*;
use anchor_spl::token::Mint;
use crate::errors::ErrorCode;
use crate::constants::{LEDGER_SEED, PLAN_SEED};
use crate::states::{TokenLedger, VestingPlan};

/// Read-only access to a plan
#[derive(Accounts)]
pub struct QueryPlan<'info> {
    #[account(
        seeds = [PLAN_SEED, plan.registry.as_ref(), &plan.plan_id.to_le_bytes()],
        bump = plan.bump
    )]
    pub plan: Account<'info, VestingPlan>,
}

/// Read-only access to a plan's ledger for one mint
#[derive(Accounts)]
pub struct QueryBalance<'info> {
    #[account(has_one = mint @ ErrorCode::InvalidTokenMint)]
    pub plan: Account<'info, VestingPlan>,

    pub mint: Box<Account<'info, Mint>>,

    #[account(
        seeds = [LEDGER_SEED, plan.key().as_ref(), mint.key().as_ref()],
        bump = ledger.bump,
        has_one = plan @ ErrorCode::LedgerPlanMismatch,
        has_one = mint @ ErrorCode::LedgerPlanMismatch
    )]
    pub ledger: Account<'info, TokenLedger>,
}

/// Response structure for plan query
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct PlanInfo {
    pub plan_id: u64,
    pub mint: Pubkey,
    pub beneficiaries: Vec<Pubkey>,
    pub percentages: Vec<u8>,
    pub schedule: Vec<i64>,
    pub created_at: i64,
    /// Checkpoints already executed
    pub next_index: u32,
    /// Absolute time of the next checkpoint, `None` once completed
    pub next_release_time: Option<i64>,
    pub completed: bool,
}

impl PlanInfo {
    pub fn from_plan(plan: &VestingPlan) -> Result<Self> {
        Ok(Self {
            plan_id: plan.plan_id,
            mint: plan.mint,
            beneficiaries: plan.beneficiaries.clone(),
            percentages: plan.percentages.clone(),
            schedule: plan.schedule.clone(),
            created_at: plan.created_at,
            next_index: plan.next_index,
            next_release_time: plan.next_release_time()?,
            completed: plan.is_completed(),
        })
    }
}

impl<'info> QueryPlan<'info> {
    pub fn percentage_of(ctx: Context<QueryPlan>, beneficiary: Pubkey) -> Result<u8> {
        let percentage = ctx
            .accounts
            .plan
            .percentage_of(&beneficiary)
            .ok_or(ErrorCode::BeneficiaryNotFound)?;

        msg!("Share of {}: {}%", beneficiary, percentage);
        Ok(percentage)
    }

    pub fn plan_info(ctx: Context<QueryPlan>) -> Result<PlanInfo> {
        let info = PlanInfo::from_plan(&ctx.accounts.plan)?;

        msg!("Plan {}: checkpoint {} of {}", info.plan_id, info.next_index, info.schedule.len());
        if let Some(at) = info.next_release_time {
            msg!("Next release at: {}", at);
        }

        Ok(info)
    }
}

impl<'info> QueryBalance<'info> {
    pub fn balances(ctx: Context<QueryBalance>, beneficiary: Pubkey) -> Result<u64> {
        let owed = ctx.accounts.ledger.owed(&beneficiary);
        msg!("Owed to {}: {} units", beneficiary, owed);
        Ok(owed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::states::VestingParams;

    #[test]
    fn test_plan_info_tracks_cursor() {
        let params = VestingParams {
            beneficiaries: vec![Pubkey::new_unique(), Pubkey::new_unique()],
            percentages: vec![40, 60],
            schedule: vec![100, 200],
        };
        let mint = Pubkey::new_unique();
        let mut plan = VestingPlan::new(Pubkey::new_unique(), 3, mint, params.clone(), 5_000, 250).unwrap();

        let info = PlanInfo::from_plan(&plan).unwrap();
        assert_eq!(info.plan_id, 3);
        assert_eq!(info.mint, mint);
        assert_eq!(info.beneficiaries, params.beneficiaries);
        assert_eq!(info.percentages, vec![40, 60]);
        assert_eq!(info.next_index, 0);
        assert_eq!(info.next_release_time, Some(5_100));
        assert!(!info.completed);

        plan.advance().unwrap();
        plan.advance().unwrap();
        let info = PlanInfo::from_plan(&plan).unwrap();
        assert_eq!(info.next_index, 2);
        assert_eq!(info.next_release_time, None);
        assert!(info.completed);
    }
}
