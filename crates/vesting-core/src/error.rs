//! Error types for vesting operations.
//!
//! Every operation fails fast with the first violated condition; the check
//! order in [`ledger`](crate::ledger) is part of the contract. No error
//! leaves a partially applied operation behind.
use thiserror::Error;

use crate::types::AssetId;

/// Asset-movement failures surfaced by the custody layer.
///
/// Custody calls either fully succeed or fail with one of these and leave
/// no partial effect.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CustodyError {
    #[error("insufficient balance: have {have}, need {need}")] InsufficientBalance { have: u64, need: u64 },
    #[error("vault shortfall: have {have}, need {need}")] VaultShortfall { have: u64, need: u64 },
    #[error("balance overflow")] BalanceOverflow,
}

/// Rejected vesting operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VestingError {
    #[error("unauthorized caller")] Unauthorized,
    #[error("null address")] InvalidAddress,
    #[error("amount must be positive")] InvalidAmount,
    #[error("duration must be positive")] InvalidDuration,
    #[error("cliff exceeds duration")] InvalidCliff,
    #[error("index out of range: {index} >= {len}")] InvalidIndex { index: u64, len: u64 },
    #[error("schedule fully claimed")] ScheduleClaimed,
    #[error("schedule was revoked")] ScheduleWasRevoked,
    #[error("nothing to claim")] NothingToClaim,
    #[error("no excess balance to withdraw")] InsufficientExcessBalance,
    #[error("locked total underflow for asset {asset}")] LockedUnderflow { asset: AssetId },
    #[error("custody: {0}")] Custody(#[from] CustodyError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_variants_display() {
        let errors: Vec<VestingError> = vec![
            VestingError::Unauthorized,
            VestingError::InvalidAddress,
            VestingError::InvalidAmount,
            VestingError::InvalidDuration,
            VestingError::InvalidCliff,
            VestingError::InvalidIndex { index: 9, len: 3 },
            VestingError::ScheduleClaimed,
            VestingError::ScheduleWasRevoked,
            VestingError::NothingToClaim,
            VestingError::InsufficientExcessBalance,
            VestingError::LockedUnderflow { asset: AssetId([1; 32]) },
            VestingError::Custody(CustodyError::BalanceOverflow),
        ];
        for e in &errors {
            assert!(!format!("{e}").is_empty());
        }
    }

    #[test]
    fn custody_error_converts() {
        let err: VestingError = CustodyError::InsufficientBalance { have: 1, need: 2 }.into();
        assert_eq!(
            err,
            VestingError::Custody(CustodyError::InsufficientBalance { have: 1, need: 2 }),
        );
    }

    #[test]
    fn error_eq() {
        assert_eq!(VestingError::NothingToClaim, VestingError::NothingToClaim);
        assert_ne!(
            VestingError::InvalidIndex { index: 0, len: 1 },
            VestingError::InvalidIndex { index: 0, len: 2 },
        );
    }
}
