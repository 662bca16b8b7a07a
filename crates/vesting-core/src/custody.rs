//! Asset custody seam and in-memory implementation.
//!
//! The ledger treats asset movement as a black box behind [`AssetCustody`]:
//! a transfer either fully succeeds or fails with a [`CustodyError`] and
//! leaves no partial effect. [`MemoryCustody`] is a double-entry in-memory
//! bank suitable for tests and simulations; production deployments implement
//! the trait over their actual token layer.

use std::collections::HashMap;

use crate::error::CustodyError;
use crate::types::{AccountId, AssetId};

/// Asset-movement interface between the vesting ledger and the token layer.
///
/// `transfer_in` moves funds from an external account into the ledger's
/// custody; `transfer_out` pays out of custody to an external account.
/// `held` reports the balance currently in custody for an asset — this may
/// exceed the ledger's locked total when funds were transferred in directly
/// (the sweepable excess).
pub trait AssetCustody {
    /// Move `amount` of `asset` from `from` into the ledger's custody.
    ///
    /// # Errors
    ///
    /// Fails loudly (no partial effect) if the movement is rejected.
    fn transfer_in(
        &mut self,
        from: AccountId,
        asset: AssetId,
        amount: u64,
    ) -> Result<(), CustodyError>;

    /// Pay `amount` of `asset` out of custody to `to`.
    ///
    /// # Errors
    ///
    /// Fails loudly (no partial effect) if the movement is rejected.
    fn transfer_out(
        &mut self,
        to: AccountId,
        asset: AssetId,
        amount: u64,
    ) -> Result<(), CustodyError>;

    /// Balance of `asset` currently in the ledger's custody.
    fn held(&self, asset: AssetId) -> u64;
}

/// In-memory double-entry custody: external account balances plus a
/// per-asset vault. No persistence; suitable for tests and simulations.
#[derive(Clone, Debug, Default)]
pub struct MemoryCustody {
    /// External balances: (account, asset) → amount.
    balances: HashMap<(AccountId, AssetId), u64>,
    /// Amount of each asset held in the ledger's custody.
    vault: HashMap<AssetId, u64>,
}

impl MemoryCustody {
    /// Create an empty bank.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fund an external account (mints out of thin air).
    pub fn credit(&mut self, account: AccountId, asset: AssetId, amount: u64) {
        let entry = self.balances.entry((account, asset)).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    /// Drop `amount` of `asset` straight into the vault, bypassing the
    /// ledger's accounting. Simulates an accidental direct transfer — the
    /// excess the administrator can sweep.
    pub fn donate(&mut self, asset: AssetId, amount: u64) {
        let entry = self.vault.entry(asset).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    /// External balance of an account.
    pub fn balance_of(&self, account: AccountId, asset: AssetId) -> u64 {
        self.balances.get(&(account, asset)).copied().unwrap_or(0)
    }
}

impl AssetCustody for MemoryCustody {
    fn transfer_in(
        &mut self,
        from: AccountId,
        asset: AssetId,
        amount: u64,
    ) -> Result<(), CustodyError> {
        let have = self.balance_of(from, asset);
        if have < amount {
            return Err(CustodyError::InsufficientBalance { have, need: amount });
        }
        let new_vault = self
            .held(asset)
            .checked_add(amount)
            .ok_or(CustodyError::BalanceOverflow)?;
        // Both sides validated; commit together.
        self.vault.insert(asset, new_vault);
        self.balances.insert((from, asset), have - amount);
        Ok(())
    }

    fn transfer_out(
        &mut self,
        to: AccountId,
        asset: AssetId,
        amount: u64,
    ) -> Result<(), CustodyError> {
        let have = self.held(asset);
        if have < amount {
            return Err(CustodyError::VaultShortfall { have, need: amount });
        }
        let new_balance = self
            .balance_of(to, asset)
            .checked_add(amount)
            .ok_or(CustodyError::BalanceOverflow)?;
        // Both sides validated; commit together.
        self.balances.insert((to, asset), new_balance);
        self.vault.insert(asset, have - amount);
        Ok(())
    }

    fn held(&self, asset: AssetId) -> u64 {
        self.vault.get(&asset).copied().unwrap_or(0)
    }
}
