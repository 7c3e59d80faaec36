use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;
use crate::errors::ErrorCode;

/// The token capability the distribution engine depends on.
///
/// `holder` and `to` are token account addresses. `transfer` always moves
/// funds out of the engine's own holding.
pub trait TokenProvider {
    /// Current balance of `holder`; never mutates anything
    fn balance_of(&self, holder: &Pubkey) -> Result<u64>;

    /// Moves `amount` from the engine's holding to `to`
    fn transfer(&mut self, to: &Pubkey, amount: u64) -> Result<()>;
}

/// SPL Token backed provider for one plan vault, signing with the plan PDA
pub struct SplTokenProvider<'a, 'info> {
    vault: &'a Account<'info, TokenAccount>,
    destination: Option<&'a Account<'info, TokenAccount>>,
    authority: AccountInfo<'info>,
    token_program: AccountInfo<'info>,
    signer_seeds: &'a [&'a [&'a [u8]]],
}

impl<'a, 'info> SplTokenProvider<'a, 'info> {
    /// Provider that can only read the vault balance
    pub fn read_only(
        vault: &'a Account<'info, TokenAccount>,
        authority: AccountInfo<'info>,
        token_program: AccountInfo<'info>,
    ) -> Self {
        Self {
            vault,
            destination: None,
            authority,
            token_program,
            signer_seeds: &[],
        }
    }

    /// Provider that can pay out of the vault into `destination`
    pub fn with_destination(
        vault: &'a Account<'info, TokenAccount>,
        destination: &'a Account<'info, TokenAccount>,
        authority: AccountInfo<'info>,
        token_program: AccountInfo<'info>,
        signer_seeds: &'a [&'a [&'a [u8]]],
    ) -> Self {
        Self {
            vault,
            destination: Some(destination),
            authority,
            token_program,
            signer_seeds,
        }
    }
}

impl TokenProvider for SplTokenProvider<'_, '_> {
    fn balance_of(&self, holder: &Pubkey) -> Result<u64> {
        require_keys_eq!(*holder, self.vault.key(), ErrorCode::InvalidTokenHolder);
        Ok(self.vault.amount)
    }

    fn transfer(&mut self, to: &Pubkey, amount: u64) -> Result<()> {
        let destination = self.destination.ok_or(ErrorCode::InvalidDestination)?;
        require_keys_eq!(*to, destination.key(), ErrorCode::InvalidDestination);
        require!(
            self.vault.amount >= amount,
            ErrorCode::InsufficientVaultBalance
        );

        anchor_spl::token::transfer(
            CpiContext::new_with_signer(
                self.token_program.clone(),
                anchor_spl::token::Transfer {
                    from: self.vault.to_account_info(),
                    to: destination.to_account_info(),
                    authority: self.authority.clone(),
                },
                self.signer_seeds,
            ),
            amount,
        )
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;

    /// In-memory token: a balance table plus the holder that pays transfers
    pub struct MockToken {
        pub holder: Pubkey,
        pub balances: HashMap<Pubkey, u64>,
        pub transfers: Vec<(Pubkey, u64)>,
    }

    impl MockToken {
        pub fn new(holder: Pubkey) -> Self {
            Self {
                holder,
                balances: HashMap::new(),
                transfers: Vec::new(),
            }
        }

        /// Push-only credit from outside the engine
        pub fn deposit(&mut self, to: &Pubkey, amount: u64) {
            *self.balances.entry(*to).or_insert(0) += amount;
        }

        pub fn balance(&self, holder: &Pubkey) -> u64 {
            self.balances.get(holder).copied().unwrap_or(0)
        }
    }

    impl TokenProvider for MockToken {
        fn balance_of(&self, holder: &Pubkey) -> Result<u64> {
            Ok(self.balance(holder))
        }

        fn transfer(&mut self, to: &Pubkey, amount: u64) -> Result<()> {
            let from = self.balance(&self.holder);
            require!(from >= amount, ErrorCode::InsufficientVaultBalance);

            self.balances.insert(self.holder, from - amount);
            self.deposit(to, amount);
            self.transfers.push((*to, amount));
            Ok(())
        }
    }
}
