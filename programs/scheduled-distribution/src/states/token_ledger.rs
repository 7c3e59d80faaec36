use anchor_lang::prelude::*;
use crate::constants::MAX_BENEFICIARIES;
use crate::errors::ErrorCode;

/// Amount currently withdrawable by one beneficiary for one token
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct LedgerEntry {
    pub beneficiary: Pubkey,
    pub owed: u64,
}

/// Owed balances of every beneficiary of a plan for a single mint.
///
/// The ledger is the only writer of its entries: distribution credits them
/// and a withdrawal resets one to zero. Entries start at zero when the ledger
/// is opened, so any address outside the plan simply reads as owing nothing.
#[account]
#[derive(InitSpace)]
pub struct TokenLedger {
    /// Plan the balances belong to
    pub plan: Pubkey,
    /// Token mint being accounted
    pub mint: Pubkey,
    /// One entry per plan beneficiary, in plan order
    #[max_len(MAX_BENEFICIARIES)]
    pub entries: Vec<LedgerEntry>,
    /// Bump seed for the PDA
    pub bump: u8,
}

impl TokenLedger {
    pub fn new(plan: Pubkey, mint: Pubkey, beneficiaries: &[Pubkey], bump: u8) -> Self {
        Self {
            plan,
            mint,
            entries: beneficiaries
                .iter()
                .map(|beneficiary| LedgerEntry {
                    beneficiary: *beneficiary,
                    owed: 0,
                })
                .collect(),
            bump,
        }
    }

    /// A ledger that was just allocated and has not been bound to a plan yet
    pub fn is_uninitialized(&self) -> bool {
        self.plan == Pubkey::default()
    }

    pub fn owed(&self, beneficiary: &Pubkey) -> u64 {
        self.entries
            .iter()
            .find(|e| e.beneficiary == *beneficiary)
            .map_or(0, |e| e.owed)
    }

    /// Sum of everything already earmarked for beneficiaries
    pub fn total_owed(&self) -> Result<u64> {
        self.entries.iter().try_fold(0u64, |acc, e| {
            acc.checked_add(e.owed).ok_or_else(|| ErrorCode::MathOverflow.into())
        })
    }

    /// Adds one credit per entry, in entry order.
    ///
    /// All new balances are computed before any is written, so an overflow
    /// leaves the ledger untouched.
    pub fn credit_all(&mut self, amounts: &[u64]) -> Result<()> {
        require!(
            amounts.len() == self.entries.len(),
            ErrorCode::LedgerPlanMismatch
        );

        let updated = self
            .entries
            .iter()
            .zip(amounts)
            .map(|(entry, amount)| {
                entry.owed.checked_add(*amount).ok_or(ErrorCode::MathOverflow)
            })
            .collect::<std::result::Result<Vec<u64>, ErrorCode>>()?;

        for (entry, owed) in self.entries.iter_mut().zip(updated) {
            entry.owed = owed;
        }
        Ok(())
    }

    /// Zeroes the caller's entry and returns what it held.
    ///
    /// This is the effect half of a withdrawal: the returned amount is the
    /// only value the transfer may be issued with, and the entry is already
    /// zero by the time anyone sees it.
    pub fn take_owed(&mut self, beneficiary: &Pubkey) -> Result<u64> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.beneficiary == *beneficiary && e.owed > 0)
            .ok_or(ErrorCode::NoBalanceToWithdraw)?;

        let amount = entry.owed;
        entry.owed = 0;
        Ok(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    fn ledger_template(count: usize) -> (TokenLedger, Vec<Pubkey>) {
        let beneficiaries: Vec<Pubkey> = (0..count).map(|_| Pubkey::new_unique()).collect();
        let ledger = TokenLedger::new(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            &beneficiaries,
            253,
        );
        (ledger, beneficiaries)
    }

    #[test]
    fn test_account_space_follows_limits() {
        assert_eq!(TokenLedger::INIT_SPACE, 32 + 32 + 4 + (32 + 8) * MAX_BENEFICIARIES + 1);
    }

    #[test]
    fn test_entries_start_at_zero() {
        let (ledger, beneficiaries) = ledger_template(3);
        for b in &beneficiaries {
            assert_eq!(ledger.owed(b), 0);
        }
        assert_eq!(ledger.owed(&Pubkey::new_unique()), 0);
        assert_eq!(ledger.total_owed().unwrap(), 0);
        assert!(!ledger.is_uninitialized());
    }

    #[test]
    fn test_credit_accumulates() {
        let (mut ledger, beneficiaries) = ledger_template(3);
        ledger.credit_all(&[500, 750, 1250]).unwrap();
        ledger.credit_all(&[500, 750, 1250]).unwrap();

        assert_eq!(ledger.owed(&beneficiaries[0]), 1000);
        assert_eq!(ledger.owed(&beneficiaries[1]), 1500);
        assert_eq!(ledger.owed(&beneficiaries[2]), 2500);
        assert_eq!(ledger.total_owed().unwrap(), 5000);
    }

    #[test]
    fn test_credit_overflow_is_all_or_nothing() {
        let (mut ledger, beneficiaries) = ledger_template(2);
        ledger.credit_all(&[10, u64::MAX]).unwrap();

        let err = ledger.credit_all(&[5, 1]).unwrap_err();
        assert_eq!(err, ErrorCode::MathOverflow.into());
        assert_eq!(ledger.owed(&beneficiaries[0]), 10);
        assert_eq!(ledger.owed(&beneficiaries[1]), u64::MAX);

        let err = ledger.total_owed().unwrap_err();
        assert_eq!(err, ErrorCode::MathOverflow.into());
    }

    #[test]
    fn test_credit_length_mismatch() {
        let (mut ledger, _) = ledger_template(3);
        let err = ledger.credit_all(&[1, 2]).unwrap_err();
        assert_eq!(err, ErrorCode::LedgerPlanMismatch.into());
        assert_eq!(ledger.total_owed().unwrap(), 0);
    }

    #[test]
    fn test_take_owed_zeroes_entry() {
        let (mut ledger, beneficiaries) = ledger_template(2);
        ledger.credit_all(&[700, 300]).unwrap();

        assert_eq!(ledger.take_owed(&beneficiaries[0]).unwrap(), 700);
        assert_eq!(ledger.owed(&beneficiaries[0]), 0);
        assert_eq!(ledger.owed(&beneficiaries[1]), 300);

        // Second attempt finds nothing: no double payment
        let err = ledger.take_owed(&beneficiaries[0]).unwrap_err();
        assert_eq!(err, ErrorCode::NoBalanceToWithdraw.into());
    }

    #[test]
    fn test_take_owed_rejects_strangers() {
        let (mut ledger, _) = ledger_template(2);
        ledger.credit_all(&[1, 1]).unwrap();

        let err = ledger.take_owed(&Pubkey::new_unique()).unwrap_err();
        assert_eq!(err, ErrorCode::NoBalanceToWithdraw.into());
        assert_eq!(ledger.total_owed().unwrap(), 2);
    }
}
