// PDA Seeds
pub const REGISTRY_SEED: &[u8] = b"registry";
pub const PLAN_SEED: &[u8] = b"plan";
pub const LEDGER_SEED: &[u8] = b"ledger";
pub const VAULT_SEED: &[u8] = b"vault";

// Plan limits (bound the on-chain account sizes)
pub const MAX_BENEFICIARIES: usize = 16;
pub const MAX_CHECKPOINTS: usize = 32;

// Shares are whole percentages
pub const PERCENT_DENOMINATOR: u64 = 100;

// The plan created by `initialize`
pub const DEFAULT_PLAN_ID: u64 = 0;
