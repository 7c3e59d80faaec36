use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Beneficiaries and percentages must have the same length")]
    BeneficiaryCountMismatch,
    #[msg("A plan needs at least one beneficiary")]
    NoBeneficiaries,
    #[msg("Too many beneficiaries for one plan")]
    TooManyBeneficiaries,
    #[msg("Beneficiary listed more than once")]
    DuplicateBeneficiary,
    #[msg("Beneficiary address is invalid")]
    InvalidBeneficiary,
    #[msg("Every percentage must be greater than zero")]
    ZeroPercentage,
    #[msg("Percentages must sum to 100")]
    PercentagesMustSumTo100,
    #[msg("Release schedule is empty")]
    EmptySchedule,
    #[msg("Too many checkpoints for one plan")]
    TooManyCheckpoints,
    #[msg("Schedule offsets cannot be negative")]
    NegativeScheduleOffset,
    #[msg("Schedule offsets must be strictly increasing")]
    ScheduleNotStrictlyIncreasing,
    #[msg("Only owner can do this")]
    Unauthorized,
    #[msg("Release time not reached")]
    ReleaseTimeNotReached,
    #[msg("All periods have been distributed")]
    AllPeriodsComplete,
    #[msg("Plan still has periods to distribute")]
    PlanNotCompleted,
    #[msg("No balance to withdraw")]
    NoBalanceToWithdraw,
    #[msg("Nothing left to reclaim")]
    NothingToReclaim,
    #[msg("Vault balance is lower than the amount owed")]
    InsufficientVaultBalance,
    #[msg("Deposit amount must be greater than zero")]
    InvalidDepositAmount,
    #[msg("Address is not a beneficiary of this plan")]
    BeneficiaryNotFound,
    #[msg("Ledger does not belong to this plan")]
    LedgerPlanMismatch,
    #[msg("Token mint does not match the plan")]
    InvalidTokenMint,
    #[msg("Balance requested for an account that is not the plan vault")]
    InvalidTokenHolder,
    #[msg("Transfer destination does not match the provided token account")]
    InvalidDestination,
    #[msg("Math overflow occurred during calculation")]
    MathOverflow,
}
