use anchor_lang::prelude::*;

/// Event emitted when a vesting plan is created (default plan included)
#[event]
pub struct PlanCreated {
    /// The plan account
    pub plan: Pubkey,
    /// Sequential plan id within the registry
    pub plan_id: u64,
    /// Token the plan distributes
    pub mint: Pubkey,
    /// Ordered beneficiaries
    pub beneficiaries: Vec<Pubkey>,
    /// Percent share per beneficiary, same order
    pub percentages: Vec<u8>,
    /// Release offsets in seconds from creation
    pub schedule: Vec<i64>,
    /// Creation timestamp
    pub created_at: i64,
}

/// Event emitted when tokens are deposited into a plan vault
#[event]
pub struct DepositReceived {
    pub plan: Pubkey,
    pub mint: Pubkey,
    pub depositor: Pubkey,
    pub amount: u64,
    /// Vault balance after the deposit
    pub vault_balance: u64,
    pub timestamp: i64,
}

/// Event emitted for every executed checkpoint
#[event]
pub struct PaymentDistributed {
    pub plan: Pubkey,
    pub mint: Pubkey,
    /// Index of the checkpoint that was executed
    pub checkpoint: u32,
    /// Checkpoints left including this one
    pub remaining_periods: u64,
    /// Vault balance not yet owed to anyone
    pub available: u64,
    /// Sum credited to beneficiaries
    pub credited: u64,
    /// Per-beneficiary credit, plan order
    pub amounts: Vec<u64>,
    /// Truncation remainder left for the next checkpoint
    pub dust: u64,
    pub timestamp: i64,
}

/// Event emitted when a beneficiary withdraws their owed balance
#[event]
pub struct PaymentWithdrawn {
    pub plan: Pubkey,
    pub mint: Pubkey,
    pub beneficiary: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

/// Event emitted when the owner reclaims the unallocated remainder of a completed plan
#[event]
pub struct UnallocatedReclaimed {
    pub plan: Pubkey,
    pub mint: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}
