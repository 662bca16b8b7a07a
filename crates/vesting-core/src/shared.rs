//! Coarse-grained thread-safe wrapper around the ledger.
//!
//! Every operation is an atomic, serially-ordered request against shared
//! state: [`SharedLedger`] takes one mutex around the whole ledger so two
//! operations referencing the same schedule or asset can never interleave
//! their check, effect, and interaction phases. The store's expected
//! cardinality is small; a single global lock is deliberate.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::custody::AssetCustody;
use crate::error::VestingError;
use crate::events::EventSink;
use crate::ledger::{RevokeOutcome, VestingLedger};
use crate::types::{AccountId, AssetId, ScheduleId, Timestamp, VestingSchedule};

/// Cloneable handle to a mutex-guarded [`VestingLedger`].
pub struct SharedLedger<C: AssetCustody, E: EventSink> {
    inner: Arc<Mutex<VestingLedger<C, E>>>,
}

impl<C: AssetCustody, E: EventSink> Clone for SharedLedger<C, E> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<C: AssetCustody, E: EventSink> SharedLedger<C, E> {
    /// Wrap a ledger for shared use.
    pub fn new(ledger: VestingLedger<C, E>) -> Self {
        Self { inner: Arc::new(Mutex::new(ledger)) }
    }

    /// See [`VestingLedger::create_schedule`].
    #[allow(clippy::too_many_arguments)]
    pub fn create_schedule(
        &self,
        caller: AccountId,
        beneficiary: AccountId,
        asset: AssetId,
        amount: u64,
        start: Timestamp,
        cliff: u64,
        duration: u64,
    ) -> Result<ScheduleId, VestingError> {
        self.inner
            .lock()
            .create_schedule(caller, beneficiary, asset, amount, start, cliff, duration)
    }

    /// See [`VestingLedger::claim`].
    pub fn claim(
        &self,
        caller: AccountId,
        id: ScheduleId,
        now: Timestamp,
    ) -> Result<u64, VestingError> {
        self.inner.lock().claim(caller, id, now)
    }

    /// See [`VestingLedger::revoke`].
    pub fn revoke(
        &self,
        caller: AccountId,
        id: ScheduleId,
        now: Timestamp,
    ) -> Result<RevokeOutcome, VestingError> {
        self.inner.lock().revoke(caller, id, now)
    }

    /// See [`VestingLedger::withdraw_excess`].
    pub fn withdraw_excess(&self, caller: AccountId, asset: AssetId) -> Result<u64, VestingError> {
        self.inner.lock().withdraw_excess(caller, asset)
    }

    /// Snapshot of a schedule by identifier.
    pub fn schedule(&self, id: ScheduleId) -> Result<VestingSchedule, VestingError> {
        self.inner.lock().schedule(id).cloned()
    }

    /// See [`VestingLedger::releasable_amount`].
    pub fn releasable_amount(&self, id: ScheduleId, now: Timestamp) -> Result<u64, VestingError> {
        self.inner.lock().releasable_amount(id, now)
    }

    /// See [`VestingLedger::schedule_count`].
    pub fn schedule_count(&self) -> u64 {
        self.inner.lock().schedule_count()
    }

    /// See [`VestingLedger::schedule_count_for`].
    pub fn schedule_count_for(&self, beneficiary: AccountId) -> u64 {
        self.inner.lock().schedule_count_for(beneficiary)
    }

    /// See [`VestingLedger::schedule_id_at`].
    pub fn schedule_id_at(
        &self,
        beneficiary: AccountId,
        local_index: u64,
    ) -> Result<ScheduleId, VestingError> {
        self.inner.lock().schedule_id_at(beneficiary, local_index)
    }

    /// See [`VestingLedger::locked_total`].
    pub fn locked_total(&self, asset: AssetId) -> u64 {
        self.inner.lock().locked_total(asset)
    }

    /// Run several calls under one lock acquisition, e.g. a query and a
    /// mutation that must observe the same state.
    pub fn with<R>(&self, f: impl FnOnce(&mut VestingLedger<C, E>) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
