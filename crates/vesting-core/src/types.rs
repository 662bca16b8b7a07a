//! Core vesting types: identities, schedule records, identifiers.
//!
//! All amounts are in the asset's smallest unit and all numeric fields use
//! u64. Timestamps and durations are in seconds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable positional identifier of a schedule in the store.
///
/// Assigned monotonically from 0 at creation, never reused or reordered —
/// the arena is append-only, so identifiers are externally visible forever.
pub type ScheduleId = u64;

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// A 32-byte account identity.
///
/// Used for the administrator, beneficiaries, and payout destinations.
/// The ledger compares identities by equality only; it attaches no meaning
/// to the bytes beyond "all zeroes is the null identity".
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
)]
pub struct AccountId(pub [u8; 32]);

impl AccountId {
    /// The null identity (32 zero bytes). Rejected wherever an identity is required.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Create an AccountId from a byte array.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Return the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Check if this is the null identity.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl From<[u8; 32]> for AccountId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for AccountId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// A 32-byte fungible-asset identifier.
///
/// Opaque to the ledger: schedules and locked totals are keyed by it, and
/// the custody layer resolves it to an actual token.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
)]
pub struct AssetId(pub [u8; 32]);

impl AssetId {
    /// The null asset (32 zero bytes). Rejected at schedule creation.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Create an AssetId from a byte array.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Return the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Check if this is the null asset.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl From<[u8; 32]> for AssetId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for AssetId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// One grant record: how a fixed total of one asset unlocks over time for
/// one beneficiary.
///
/// The first six fields are immutable after creation. `amount_claimed` is
/// monotone non-decreasing and never exceeds `total_amount`; `revoked` and
/// `closed` are monotone once set. A schedule is a permanent ledger entry —
/// it is never deleted, only settled.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct VestingSchedule {
    /// Identity authorized to claim this schedule's proceeds.
    pub beneficiary: AccountId,
    /// Asset this schedule pays out.
    pub asset: AssetId,
    /// Reference timestamp from which vesting time is measured.
    pub start: Timestamp,
    /// Duration after `start` during which nothing is releasable.
    /// Invariant: `cliff <= duration`.
    pub cliff: u64,
    /// Total vesting duration. Invariant: `duration > 0`.
    pub duration: u64,
    /// Total quantity allocated at creation. Invariant: `total_amount > 0`.
    pub total_amount: u64,
    /// Cumulative quantity already paid out (claims, plus the vested share
    /// and refund settled at revocation).
    pub amount_claimed: u64,
    /// Administrator terminated this schedule early. Permanent once set.
    pub revoked: bool,
    /// Fully claimed through normal claiming (`amount_claimed == total_amount`).
    /// Distinct from `revoked`, which freezes a smaller permanent ceiling.
    pub closed: bool,
}

impl VestingSchedule {
    /// Create a fresh, unclaimed schedule. Callers validate the parameters.
    pub fn new(
        beneficiary: AccountId,
        asset: AssetId,
        start: Timestamp,
        cliff: u64,
        duration: u64,
        total_amount: u64,
    ) -> Self {
        Self {
            beneficiary,
            asset,
            start,
            cliff,
            duration,
            total_amount,
            amount_claimed: 0,
            revoked: false,
            closed: false,
        }
    }

    /// First instant at which the linear branch applies.
    pub fn cliff_end(&self) -> Timestamp {
        self.start.saturating_add(self.cliff)
    }

    /// Instant at which the full total is vested.
    pub fn end(&self) -> Timestamp {
        self.start.saturating_add(self.duration)
    }

    /// Whether no further payouts can ever leave this schedule.
    pub fn is_settled(&self) -> bool {
        self.revoked || self.closed
    }

    /// Quantity still carried in the asset's locked total:
    /// `total_amount - amount_claimed` for a live schedule, 0 once settled.
    pub fn outstanding(&self) -> u64 {
        if self.revoked {
            return 0;
        }
        self.total_amount - self.amount_claimed
    }
}
