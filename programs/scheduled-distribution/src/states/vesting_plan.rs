use anchor_lang::prelude::*;
use crate::constants::{MAX_BENEFICIARIES, MAX_CHECKPOINTS, PERCENT_DENOMINATOR};
use crate::errors::ErrorCode;

/// Parameters shared by `initialize` (default plan) and `new_vesting`
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct VestingParams {
    /// Ordered, unique beneficiary wallets
    pub beneficiaries: Vec<Pubkey>,
    /// Whole-percent share per beneficiary, same order, summing to 100
    pub percentages: Vec<u8>,
    /// Release offsets in seconds from plan creation, strictly increasing
    pub schedule: Vec<i64>,
}

impl VestingParams {
    pub fn validate(&self) -> Result<()> {
        require!(
            self.beneficiaries.len() == self.percentages.len(),
            ErrorCode::BeneficiaryCountMismatch
        );
        require!(!self.beneficiaries.is_empty(), ErrorCode::NoBeneficiaries);
        require!(
            self.beneficiaries.len() <= MAX_BENEFICIARIES,
            ErrorCode::TooManyBeneficiaries
        );

        for (i, beneficiary) in self.beneficiaries.iter().enumerate() {
            require!(
                *beneficiary != Pubkey::default(),
                ErrorCode::InvalidBeneficiary
            );
            require!(
                !self.beneficiaries[..i].contains(beneficiary),
                ErrorCode::DuplicateBeneficiary
            );
        }

        require!(
            self.percentages.iter().all(|p| *p > 0),
            ErrorCode::ZeroPercentage
        );
        let total: u64 = self.percentages.iter().map(|p| *p as u64).sum();
        require!(
            total == PERCENT_DENOMINATOR,
            ErrorCode::PercentagesMustSumTo100
        );

        require!(!self.schedule.is_empty(), ErrorCode::EmptySchedule);
        require!(
            self.schedule.len() <= MAX_CHECKPOINTS,
            ErrorCode::TooManyCheckpoints
        );
        require!(self.schedule[0] >= 0, ErrorCode::NegativeScheduleOffset);
        require!(
            self.schedule.windows(2).all(|w| w[0] < w[1]),
            ErrorCode::ScheduleNotStrictlyIncreasing
        );

        Ok(())
    }
}

/// A fixed set of beneficiaries released to at scheduled checkpoints.
///
/// Everything but `next_index` is frozen at creation. `next_index` counts the
/// checkpoints already executed and only ever moves forward by one.
#[account]
#[derive(InitSpace)]
pub struct VestingPlan {
    /// Registry the plan was created under
    pub registry: Pubkey,
    /// Sequential id within the registry (0 is the default plan)
    pub plan_id: u64,
    /// The only token this plan distributes
    pub mint: Pubkey,
    /// Ordered beneficiaries; this order drives distribution
    #[max_len(MAX_BENEFICIARIES)]
    pub beneficiaries: Vec<Pubkey>,
    /// Percent share per beneficiary, parallel to `beneficiaries`
    #[max_len(MAX_BENEFICIARIES)]
    pub percentages: Vec<u8>,
    /// Release offsets in seconds from `created_at`
    #[max_len(MAX_CHECKPOINTS)]
    pub schedule: Vec<i64>,
    /// Unix timestamp of plan creation
    pub created_at: i64,
    /// Checkpoints already executed
    pub next_index: u32,
    /// Bump seed for the PDA
    pub bump: u8,
}

impl VestingPlan {
    pub fn new(
        registry: Pubkey,
        plan_id: u64,
        mint: Pubkey,
        params: VestingParams,
        created_at: i64,
        bump: u8,
    ) -> Result<Self> {
        params.validate()?;

        Ok(Self {
            registry,
            plan_id,
            mint,
            beneficiaries: params.beneficiaries,
            percentages: params.percentages,
            schedule: params.schedule,
            created_at,
            next_index: 0,
            bump,
        })
    }

    /// Share of `beneficiary`, or `None` when the address is not part of the plan
    pub fn percentage_of(&self, beneficiary: &Pubkey) -> Option<u8> {
        self.beneficiaries
            .iter()
            .position(|b| b == beneficiary)
            .map(|i| self.percentages[i])
    }

    /// Beneficiaries paired with their shares, in plan order
    pub fn shares(&self) -> impl Iterator<Item = (&Pubkey, u8)> + '_ {
        self.beneficiaries.iter().zip(self.percentages.iter().copied())
    }

    pub fn is_completed(&self) -> bool {
        self.next_index as usize >= self.schedule.len()
    }

    /// Checkpoints left, counting the next one
    pub fn remaining_periods(&self) -> u64 {
        self.schedule.len().saturating_sub(self.next_index as usize) as u64
    }

    /// Absolute time of the next checkpoint, `None` once completed
    pub fn next_release_time(&self) -> Result<Option<i64>> {
        match self.schedule.get(self.next_index as usize) {
            Some(offset) => {
                let at = self.created_at
                    .checked_add(*offset)
                    .ok_or(ErrorCode::MathOverflow)?;
                Ok(Some(at))
            }
            None => Ok(None),
        }
    }

    /// Checks, in order, that a checkpoint is left and that it is due at `now`
    pub fn ensure_release_due(&self, now: i64) -> Result<()> {
        let release_at = self
            .next_release_time()?
            .ok_or(ErrorCode::AllPeriodsComplete)?;
        require!(now >= release_at, ErrorCode::ReleaseTimeNotReached);
        Ok(())
    }

    /// Moves the cursor past the checkpoint just executed
    pub fn advance(&mut self) -> Result<()> {
        require!(!self.is_completed(), ErrorCode::AllPeriodsComplete);
        self.next_index = self.next_index
            .checked_add(1)
            .ok_or(ErrorCode::MathOverflow)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    fn params_template() -> VestingParams {
        VestingParams {
            beneficiaries: vec![
                Pubkey::new_unique(),
                Pubkey::new_unique(),
                Pubkey::new_unique(),
            ],
            percentages: vec![20, 30, 50],
            schedule: vec![120_000, 240_000, 360_000, 480_000],
        }
    }

    fn plan_template() -> VestingPlan {
        VestingPlan::new(Pubkey::new_unique(), 0, Pubkey::new_unique(), params_template(), 1_000, 255).unwrap()
    }

    fn assert_invalid(params: VestingParams, expected: ErrorCode) {
        assert_eq!(params.validate().unwrap_err(), expected.into());
    }

    #[test]
    fn test_valid_params() {
        assert!(params_template().validate().is_ok());
    }

    #[test]
    fn test_length_mismatch() {
        let mut params = params_template();
        params.percentages = vec![50, 50];
        assert_invalid(params, ErrorCode::BeneficiaryCountMismatch);
    }

    #[test]
    fn test_empty_beneficiaries() {
        let mut params = params_template();
        params.beneficiaries.clear();
        params.percentages.clear();
        assert_invalid(params, ErrorCode::NoBeneficiaries);
    }

    #[test]
    fn test_too_many_beneficiaries() {
        let mut params = params_template();
        params.beneficiaries = (0..17).map(|_| Pubkey::new_unique()).collect();
        params.percentages = vec![1; 17];
        assert_invalid(params, ErrorCode::TooManyBeneficiaries);
    }

    #[test]
    fn test_duplicate_beneficiary() {
        let mut params = params_template();
        params.beneficiaries[2] = params.beneficiaries[0];
        assert_invalid(params, ErrorCode::DuplicateBeneficiary);
    }

    #[test]
    fn test_default_key_beneficiary() {
        let mut params = params_template();
        params.beneficiaries[1] = Pubkey::default();
        assert_invalid(params, ErrorCode::InvalidBeneficiary);
    }

    #[test]
    fn test_zero_percentage() {
        let mut params = params_template();
        params.percentages = vec![0, 50, 50];
        assert_invalid(params, ErrorCode::ZeroPercentage);
    }

    #[test]
    fn test_percentages_must_sum_to_100() {
        let mut params = params_template();
        params.percentages = vec![20, 30, 49];
        assert_invalid(params, ErrorCode::PercentagesMustSumTo100);

        let mut params = params_template();
        params.percentages = vec![200, 200, 200];
        assert_invalid(params, ErrorCode::PercentagesMustSumTo100);
    }

    #[test]
    fn test_empty_schedule() {
        let mut params = params_template();
        params.schedule.clear();
        assert_invalid(params, ErrorCode::EmptySchedule);
    }

    #[test]
    fn test_too_many_checkpoints() {
        let mut params = params_template();
        params.schedule = (1..=33).collect();
        assert_invalid(params, ErrorCode::TooManyCheckpoints);
    }

    #[test]
    fn test_negative_offset() {
        let mut params = params_template();
        params.schedule = vec![-10, 10];
        assert_invalid(params, ErrorCode::NegativeScheduleOffset);
    }

    #[test]
    fn test_schedule_not_increasing() {
        let mut params = params_template();
        params.schedule = vec![100, 200, 200];
        assert_invalid(params, ErrorCode::ScheduleNotStrictlyIncreasing);

        let mut params = params_template();
        params.schedule = vec![300, 200];
        assert_invalid(params, ErrorCode::ScheduleNotStrictlyIncreasing);
    }

    #[test]
    fn test_zero_first_offset_is_allowed() {
        let mut params = params_template();
        params.schedule = vec![0, 10];
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_account_space_follows_limits() {
        let expected = 32 + 8 + 32
            + (4 + 32 * MAX_BENEFICIARIES)
            + (4 + MAX_BENEFICIARIES)
            + (4 + 8 * MAX_CHECKPOINTS)
            + 8 + 4 + 1;
        assert_eq!(VestingPlan::INIT_SPACE, expected);
    }

    #[test]
    fn test_percentage_of() {
        let params = params_template();
        let plan = VestingPlan::new(Pubkey::new_unique(), 0, Pubkey::new_unique(), params.clone(), 0, 255).unwrap();

        assert_eq!(plan.percentage_of(&params.beneficiaries[0]), Some(20));
        assert_eq!(plan.percentage_of(&params.beneficiaries[1]), Some(30));
        assert_eq!(plan.percentage_of(&params.beneficiaries[2]), Some(50));
        assert_eq!(plan.percentage_of(&Pubkey::new_unique()), None);
    }

    #[test]
    fn test_release_gating() {
        let plan = plan_template();

        let err = plan.ensure_release_due(1_000 + 119_999).unwrap_err();
        assert_eq!(err, ErrorCode::ReleaseTimeNotReached.into());
        assert!(plan.ensure_release_due(1_000 + 120_000).is_ok());
        assert_eq!(plan.next_release_time().unwrap(), Some(121_000));
    }

    #[test]
    fn test_cursor_runs_to_completion() {
        let mut plan = plan_template();
        assert_eq!(plan.remaining_periods(), 4);

        for expected_remaining in (0..4).rev() {
            plan.advance().unwrap();
            assert_eq!(plan.remaining_periods(), expected_remaining);
        }

        assert!(plan.is_completed());
        assert_eq!(plan.next_index, 4);
        assert_eq!(plan.next_release_time().unwrap(), None);

        let err = plan.ensure_release_due(i64::MAX).unwrap_err();
        assert_eq!(err, ErrorCode::AllPeriodsComplete.into());

        let err = plan.advance().unwrap_err();
        assert_eq!(err, ErrorCode::AllPeriodsComplete.into());
        assert_eq!(plan.next_index, 4);
    }

    #[test]
    fn test_exhaustion_checked_before_time() {
        let mut plan = plan_template();
        plan.next_index = 4;

        // Even far in the past, an exhausted plan reports completion first
        let err = plan.ensure_release_due(0).unwrap_err();
        assert_eq!(err, ErrorCode::AllPeriodsComplete.into());
    }
}
