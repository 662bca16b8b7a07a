//! Settlement operations over the schedule store.
//!
//! [`VestingLedger`] layers the four state transitions (create, claim,
//! revoke, withdraw-excess) on the store and the release curve. Each
//! operation validates in a fixed order, applies its state effects, and only
//! then performs the custody interaction; a rejected transfer rolls the
//! effects back so no operation is ever partially applied. Events reach the
//! sink only after custody has succeeded.
//!
//! The caller identity and the current time are explicit arguments on every
//! call — the ledger holds no clock and no ambient authority beyond the
//! administrator identity fixed at construction.

use crate::curve;
use crate::custody::AssetCustody;
use crate::error::VestingError;
use crate::events::{EventSink, VestingEvent};
use crate::store::ScheduleStore;
use crate::types::{AccountId, AssetId, ScheduleId, Timestamp, VestingSchedule};

/// What a revocation settled: the vested share paid to the beneficiary and
/// the never-vesting remainder refunded to the administrator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevokeOutcome {
    /// Paid to the beneficiary at revocation time.
    pub vested: u64,
    /// Returned to the administrator.
    pub refund: u64,
}

/// The vesting accounting core: schedule store, release curve, and the four
/// settlement operations, wired to a custody layer and an event sink.
///
/// Not thread-safe — wrap in [`SharedLedger`](crate::shared::SharedLedger)
/// when operations may arrive from multiple threads.
pub struct VestingLedger<C: AssetCustody, E: EventSink> {
    admin: AccountId,
    store: ScheduleStore,
    custody: C,
    events: E,
}

impl<C: AssetCustody, E: EventSink> VestingLedger<C, E> {
    /// Create a ledger administered by `admin`.
    pub fn new(admin: AccountId, custody: C, events: E) -> Self {
        Self {
            admin,
            store: ScheduleStore::new(),
            custody,
            events,
        }
    }

    // ------------------------------------------------------------------
    // Settlement operations
    // ------------------------------------------------------------------

    /// Lock `amount` of `asset` for `beneficiary` under a linear schedule.
    ///
    /// Funds move from the administrator into custody before the schedule is
    /// recorded; a rejected transfer aborts with no state mutated.
    ///
    /// # Errors
    ///
    /// In check order: [`Unauthorized`](VestingError::Unauthorized) if the
    /// caller is not the administrator,
    /// [`InvalidAddress`](VestingError::InvalidAddress) for a null
    /// beneficiary or asset, [`InvalidAmount`](VestingError::InvalidAmount)
    /// for a zero amount, [`InvalidDuration`](VestingError::InvalidDuration)
    /// for a zero duration, [`InvalidCliff`](VestingError::InvalidCliff) if
    /// the cliff exceeds the duration, and any custody rejection.
    #[allow(clippy::too_many_arguments)]
    pub fn create_schedule(
        &mut self,
        caller: AccountId,
        beneficiary: AccountId,
        asset: AssetId,
        amount: u64,
        start: Timestamp,
        cliff: u64,
        duration: u64,
    ) -> Result<ScheduleId, VestingError> {
        if caller != self.admin {
            return Err(VestingError::Unauthorized);
        }
        if beneficiary.is_zero() {
            return Err(VestingError::InvalidAddress);
        }
        if asset.is_zero() {
            return Err(VestingError::InvalidAddress);
        }
        if amount == 0 {
            return Err(VestingError::InvalidAmount);
        }
        if duration == 0 {
            return Err(VestingError::InvalidDuration);
        }
        if cliff > duration {
            return Err(VestingError::InvalidCliff);
        }

        // Transfer first: a recorded schedule without funding would be worse
        // than a rejected transfer with no mutation.
        self.custody.transfer_in(self.admin, asset, amount)?;

        let schedule = VestingSchedule::new(beneficiary, asset, start, cliff, duration, amount);
        let id = self.store.push(schedule);

        self.events.emit(VestingEvent::ScheduleCreated {
            schedule_id: id,
            beneficiary,
            asset,
            amount,
            start,
            duration,
        });
        tracing::info!(schedule_id = id, %beneficiary, %asset, amount, "schedule created");
        Ok(id)
    }

    /// Pay the beneficiary everything the curve has released as of `now`.
    ///
    /// Returns the amount paid. An immediate second call fails with
    /// [`NothingToClaim`](VestingError::NothingToClaim) — the releasable
    /// amount is consumed, never paid twice.
    ///
    /// # Errors
    ///
    /// In check order: [`InvalidIndex`](VestingError::InvalidIndex),
    /// [`Unauthorized`](VestingError::Unauthorized) if the caller is not the
    /// schedule's beneficiary,
    /// [`ScheduleWasRevoked`](VestingError::ScheduleWasRevoked),
    /// [`ScheduleClaimed`](VestingError::ScheduleClaimed),
    /// [`NothingToClaim`](VestingError::NothingToClaim), and any custody
    /// rejection (which leaves the ledger unchanged).
    pub fn claim(
        &mut self,
        caller: AccountId,
        id: ScheduleId,
        now: Timestamp,
    ) -> Result<u64, VestingError> {
        let schedule = self.store.get(id)?;
        if caller != schedule.beneficiary {
            return Err(VestingError::Unauthorized);
        }
        if schedule.revoked {
            return Err(VestingError::ScheduleWasRevoked);
        }
        if schedule.closed {
            return Err(VestingError::ScheduleClaimed);
        }
        let amount = curve::releasable(schedule, now);
        if amount == 0 {
            return Err(VestingError::NothingToClaim);
        }
        let beneficiary = schedule.beneficiary;
        let asset = schedule.asset;

        // Effects strictly before the custody interaction.
        self.store.release_locked(asset, amount)?;
        let closed = {
            let s = self.store.get_mut(id)?;
            s.amount_claimed += amount;
            s.closed = s.amount_claimed == s.total_amount;
            s.closed
        };

        if let Err(err) = self.custody.transfer_out(beneficiary, asset, amount) {
            // Custody rejected the payout; undo the effects so the claim is
            // all-or-nothing.
            self.store.restore_locked(asset, amount);
            let s = self.store.get_mut(id)?;
            s.amount_claimed -= amount;
            s.closed = false;
            return Err(err.into());
        }

        if closed {
            self.events.emit(VestingEvent::ScheduleCompleted {
                schedule_id: id,
                beneficiary,
            });
        }
        self.events.emit(VestingEvent::TokensClaimed {
            beneficiary,
            schedule_id: id,
            amount,
        });
        tracing::debug!(schedule_id = id, %beneficiary, amount, closed, "claim settled");
        Ok(amount)
    }

    /// Terminate a schedule early: pay the beneficiary their vested-to-date
    /// share and refund the never-vesting remainder to the administrator.
    ///
    /// A second revoke of the same schedule fails — revocation is an
    /// idempotent-failure operation, not a silent no-op. Prior claims plus
    /// the vested payout plus the refund always equal `total_amount` exactly.
    ///
    /// # Errors
    ///
    /// In check order: [`Unauthorized`](VestingError::Unauthorized),
    /// [`InvalidIndex`](VestingError::InvalidIndex),
    /// [`ScheduleWasRevoked`](VestingError::ScheduleWasRevoked),
    /// [`ScheduleClaimed`](VestingError::ScheduleClaimed), and any custody
    /// rejection (which leaves the ledger unchanged).
    pub fn revoke(
        &mut self,
        caller: AccountId,
        id: ScheduleId,
        now: Timestamp,
    ) -> Result<RevokeOutcome, VestingError> {
        if caller != self.admin {
            return Err(VestingError::Unauthorized);
        }
        let schedule = self.store.get(id)?;
        if schedule.revoked {
            return Err(VestingError::ScheduleWasRevoked);
        }
        if schedule.closed {
            return Err(VestingError::ScheduleClaimed);
        }
        let vested = curve::releasable(schedule, now);
        // Everything never destined to vest. `amount_claimed + vested` is a
        // vested-at-`now` value, so the subtraction cannot underflow.
        let refund = schedule.total_amount - schedule.amount_claimed - vested;
        let beneficiary = schedule.beneficiary;
        let asset = schedule.asset;
        let prior_claimed = schedule.amount_claimed;

        // Effects: the schedule's entire remaining balance leaves the locked
        // accounting, whether paid out or refunded.
        self.store.release_locked(asset, vested + refund)?;
        {
            let s = self.store.get_mut(id)?;
            s.revoked = true;
            s.amount_claimed += vested;
        }

        if let Err(err) = self.settle_revoke_transfers(beneficiary, asset, vested, refund) {
            self.store.restore_locked(asset, vested + refund);
            let s = self.store.get_mut(id)?;
            s.revoked = false;
            s.amount_claimed = prior_claimed;
            return Err(err.into());
        }

        if vested > 0 {
            self.events.emit(VestingEvent::TokensClaimed {
                beneficiary,
                schedule_id: id,
                amount: vested,
            });
        }
        self.events.emit(VestingEvent::ScheduleRevoked {
            schedule_id: id,
            refund,
            vested,
        });
        tracing::info!(schedule_id = id, %beneficiary, vested, refund, "schedule revoked");
        Ok(RevokeOutcome { vested, refund })
    }

    /// Both revocation payouts, compensating the first if the second fails
    /// so custody is left exactly as found on error.
    fn settle_revoke_transfers(
        &mut self,
        beneficiary: AccountId,
        asset: AssetId,
        vested: u64,
        refund: u64,
    ) -> Result<(), crate::error::CustodyError> {
        if vested > 0 {
            self.custody.transfer_out(beneficiary, asset, vested)?;
        }
        if refund > 0 {
            if let Err(err) = self.custody.transfer_out(self.admin, asset, refund) {
                if vested > 0 {
                    // Pull the vested payout back. The beneficiary holds it
                    // (just paid), so this can only fail on a custody-layer
                    // fault, which we can merely report.
                    if let Err(comp) = self.custody.transfer_in(beneficiary, asset, vested) {
                        tracing::warn!(
                            %beneficiary, %asset, vested, error = %comp,
                            "failed to compensate vested payout after refund rejection"
                        );
                    }
                }
                return Err(err);
            }
        }
        Ok(())
    }

    /// Sweep custody balance in excess of the asset's locked total to the
    /// administrator. Touches no schedule and no locked total — the excess
    /// was never part of the accounting.
    ///
    /// # Errors
    ///
    /// [`Unauthorized`](VestingError::Unauthorized) for non-administrators,
    /// [`InsufficientExcessBalance`](VestingError::InsufficientExcessBalance)
    /// when nothing exceeds the locked total, and
    /// [`LockedUnderflow`](VestingError::LockedUnderflow) if custody holds
    /// less than the locked total (a custody-layer fault).
    pub fn withdraw_excess(
        &mut self,
        caller: AccountId,
        asset: AssetId,
    ) -> Result<u64, VestingError> {
        if caller != self.admin {
            return Err(VestingError::Unauthorized);
        }
        let held = self.custody.held(asset);
        let locked = self.store.locked_total(asset);
        if held < locked {
            return Err(VestingError::LockedUnderflow { asset });
        }
        let excess = held - locked;
        if excess == 0 {
            return Err(VestingError::InsufficientExcessBalance);
        }

        self.custody.transfer_out(self.admin, asset, excess)?;

        self.events.emit(VestingEvent::ExcessWithdrawn { asset, amount: excess });
        tracing::info!(%asset, amount = excess, "excess withdrawn");
        Ok(excess)
    }

    // ------------------------------------------------------------------
    // Read accessors
    // ------------------------------------------------------------------

    /// The administrator identity fixed at construction.
    pub fn admin(&self) -> AccountId {
        self.admin
    }

    /// Look up a schedule by its global identifier.
    ///
    /// # Errors
    ///
    /// [`VestingError::InvalidIndex`] if out of range.
    pub fn schedule(&self, id: ScheduleId) -> Result<&VestingSchedule, VestingError> {
        self.store.get(id)
    }

    /// What a claim on `id` would pay at `now`.
    ///
    /// # Errors
    ///
    /// [`VestingError::InvalidIndex`] if out of range.
    pub fn releasable_amount(&self, id: ScheduleId, now: Timestamp) -> Result<u64, VestingError> {
        Ok(curve::releasable(self.store.get(id)?, now))
    }

    /// Number of schedules ever created.
    pub fn schedule_count(&self) -> u64 {
        self.store.schedule_count()
    }

    /// Number of schedules belonging to `beneficiary`.
    pub fn schedule_count_for(&self, beneficiary: AccountId) -> u64 {
        self.store.count_for(beneficiary)
    }

    /// Global identifier of the beneficiary's `local_index`-th schedule.
    ///
    /// # Errors
    ///
    /// [`VestingError::InvalidIndex`] if `local_index` is out of range for
    /// that beneficiary.
    pub fn schedule_id_at(
        &self,
        beneficiary: AccountId,
        local_index: u64,
    ) -> Result<ScheduleId, VestingError> {
        self.store.id_for(beneficiary, local_index)
    }

    /// Current locked total for an asset.
    pub fn locked_total(&self, asset: AssetId) -> u64 {
        self.store.locked_total(asset)
    }

    /// Outstanding obligation recomputed from the schedules themselves.
    /// Equals [`locked_total`](Self::locked_total) at all times.
    pub fn outstanding(&self, asset: AssetId) -> u64 {
        self.store.outstanding(asset)
    }

    /// Borrow the custody layer (balances, held amounts).
    pub fn custody(&self) -> &C {
        &self.custody
    }

    /// Mutably borrow the custody layer. Intended for test fixtures that
    /// fund accounts or simulate direct transfers.
    pub fn custody_mut(&mut self) -> &mut C {
        &mut self.custody
    }

    /// Borrow the event sink.
    pub fn events(&self) -> &E {
        &self.events
    }

    /// Mutably borrow the event sink (e.g. to drain a recording sink).
    pub fn events_mut(&mut self) -> &mut E {
        &mut self.events
    }
}
