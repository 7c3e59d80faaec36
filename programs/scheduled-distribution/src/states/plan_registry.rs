use anchor_lang::prelude::*;
use crate::errors::ErrorCode;

/// Program-wide registry: the owner and the counter used to derive plan ids
#[account]
#[derive(InitSpace)]
pub struct PlanRegistry {
    /// Identity that initialized the program; the only one allowed to create plans
    pub owner: Pubkey,
    /// Number of plans created so far (also the id of the next plan)
    pub plan_count: u64,
    /// Bump seed for the PDA
    pub bump: u8,
}

impl PlanRegistry {
    pub fn new(owner: Pubkey, bump: u8) -> Self {
        Self {
            owner,
            plan_count: 0,
            bump,
        }
    }

    /// Fails with `Unauthorized` unless `caller` is the registry owner
    pub fn ensure_owner(&self, caller: &Pubkey) -> Result<()> {
        require!(*caller == self.owner, ErrorCode::Unauthorized);
        Ok(())
    }

    /// Reserves the id for the plan being created
    pub fn register_plan(&mut self, caller: &Pubkey) -> Result<u64> {
        self.ensure_owner(caller)?;

        let plan_id = self.plan_count;
        self.plan_count = self.plan_count
            .checked_add(1)
            .ok_or(ErrorCode::MathOverflow)?;

        Ok(plan_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn test_owner_registers_sequential_ids() {
        let owner = Pubkey::new_unique();
        let mut registry = PlanRegistry::new(owner, 254);

        assert_eq!(registry.register_plan(&owner).unwrap(), 0);
        assert_eq!(registry.register_plan(&owner).unwrap(), 1);
        assert_eq!(registry.register_plan(&owner).unwrap(), 2);
        assert_eq!(registry.plan_count, 3);
    }

    #[test]
    fn test_non_owner_is_rejected_without_state_change() {
        let owner = Pubkey::new_unique();
        let stranger = Pubkey::new_unique();
        let mut registry = PlanRegistry::new(owner, 254);
        registry.register_plan(&owner).unwrap();

        let err = registry.register_plan(&stranger).unwrap_err();
        assert_eq!(err, ErrorCode::Unauthorized.into());
        assert_eq!(registry.plan_count, 1);
    }

    #[test]
    fn test_counter_overflow() {
        let owner = Pubkey::new_unique();
        let mut registry = PlanRegistry::new(owner, 254);
        registry.plan_count = u64::MAX;

        let err = registry.register_plan(&owner).unwrap_err();
        assert_eq!(err, ErrorCode::MathOverflow.into());
        assert_eq!(registry.plan_count, u64::MAX);
    }
}
