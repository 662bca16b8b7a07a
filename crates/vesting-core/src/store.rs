//! Schedule storage: append-only arena, beneficiary index, locked totals.
//!
//! Schedules live in an append-only `Vec`; a schedule's position is its
//! [`ScheduleId`] and is externally visible forever, so the arena is never
//! compacted or reordered. A secondary index maps each beneficiary to the
//! ordered list of its positions, and a per-asset running total tracks the
//! quantity the store is still obligated to pay out.
//!
//! Not thread-safe — the store is exclusively owned by
//! [`VestingLedger`](crate::ledger::VestingLedger), which callers wrap in
//! [`SharedLedger`](crate::shared::SharedLedger) for concurrent access.

use std::collections::HashMap;

use crate::error::VestingError;
use crate::types::{AccountId, AssetId, ScheduleId, VestingSchedule};

/// Arena of vesting schedules plus the two derived structures the
/// settlement operations need: the per-beneficiary position index and the
/// per-asset locked totals.
#[derive(Clone, Debug, Default)]
pub struct ScheduleStore {
    /// Append-only arena; index == ScheduleId.
    schedules: Vec<VestingSchedule>,
    /// Beneficiary → ordered positions, append-only per beneficiary.
    by_beneficiary: HashMap<AccountId, Vec<ScheduleId>>,
    /// Asset → sum of `total_amount - amount_claimed` over live schedules.
    locked: HashMap<AssetId, u64>,
}

impl ScheduleStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a schedule, index it under its beneficiary, and add its full
    /// `total_amount` to the asset's locked total.
    ///
    /// Returns the new schedule's stable positional identifier.
    pub fn push(&mut self, schedule: VestingSchedule) -> ScheduleId {
        let id = self.schedules.len() as ScheduleId;
        self.by_beneficiary
            .entry(schedule.beneficiary)
            .or_default()
            .push(id);
        let entry = self.locked.entry(schedule.asset).or_insert(0);
        *entry = entry.saturating_add(schedule.total_amount);
        self.schedules.push(schedule);
        id
    }

    /// Look up a schedule by identifier.
    ///
    /// # Errors
    ///
    /// [`VestingError::InvalidIndex`] if `id` is out of range.
    pub fn get(&self, id: ScheduleId) -> Result<&VestingSchedule, VestingError> {
        self.schedules.get(id as usize).ok_or(VestingError::InvalidIndex {
            index: id,
            len: self.schedules.len() as u64,
        })
    }

    /// Mutable lookup, same range check as [`get`](Self::get).
    pub fn get_mut(&mut self, id: ScheduleId) -> Result<&mut VestingSchedule, VestingError> {
        let len = self.schedules.len() as u64;
        self.schedules
            .get_mut(id as usize)
            .ok_or(VestingError::InvalidIndex { index: id, len })
    }

    /// Subtract `amount` from the asset's locked total.
    ///
    /// An underflow here means the schedule bookkeeping and the locked
    /// totals have diverged; it is surfaced rather than clamped.
    ///
    /// # Errors
    ///
    /// [`VestingError::LockedUnderflow`] if the total would go negative.
    pub fn release_locked(&mut self, asset: AssetId, amount: u64) -> Result<(), VestingError> {
        let entry = self
            .locked
            .get_mut(&asset)
            .ok_or(VestingError::LockedUnderflow { asset })?;
        *entry = entry
            .checked_sub(amount)
            .ok_or(VestingError::LockedUnderflow { asset })?;
        Ok(())
    }

    /// Add `amount` back to the asset's locked total.
    ///
    /// Only used when rolling back an operation whose custody interaction
    /// failed after the locked total was already reduced.
    pub fn restore_locked(&mut self, asset: AssetId, amount: u64) {
        let entry = self.locked.entry(asset).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    /// Current locked total for an asset. 0 for assets never seen.
    pub fn locked_total(&self, asset: AssetId) -> u64 {
        self.locked.get(&asset).copied().unwrap_or(0)
    }

    /// Number of schedules ever created.
    pub fn schedule_count(&self) -> u64 {
        self.schedules.len() as u64
    }

    /// Number of schedules belonging to a beneficiary.
    pub fn count_for(&self, beneficiary: AccountId) -> u64 {
        self.by_beneficiary
            .get(&beneficiary)
            .map(|ids| ids.len() as u64)
            .unwrap_or(0)
    }

    /// Global identifier of the beneficiary's `local_index`-th schedule.
    ///
    /// # Errors
    ///
    /// [`VestingError::InvalidIndex`] if `local_index` is out of range for
    /// that beneficiary (including beneficiaries with no schedules).
    pub fn id_for(
        &self,
        beneficiary: AccountId,
        local_index: u64,
    ) -> Result<ScheduleId, VestingError> {
        let ids = self.by_beneficiary.get(&beneficiary);
        let len = ids.map(|v| v.len() as u64).unwrap_or(0);
        ids.and_then(|v| v.get(local_index as usize))
            .copied()
            .ok_or(VestingError::InvalidIndex { index: local_index, len })
    }

    /// Recompute the asset's outstanding obligation from the schedules
    /// themselves. Equals [`locked_total`](Self::locked_total) at all times;
    /// invariant tests compare the two.
    pub fn outstanding(&self, asset: AssetId) -> u64 {
        self.schedules
            .iter()
            .filter(|s| s.asset == asset)
            .map(|s| s.outstanding())
            .sum()
    }

    /// Iterate over all schedules with their identifiers.
    pub fn iter(&self) -> impl Iterator<Item = (ScheduleId, &VestingSchedule)> {
        self.schedules
            .iter()
            .enumerate()
            .map(|(i, s)| (i as ScheduleId, s))
    }
}
