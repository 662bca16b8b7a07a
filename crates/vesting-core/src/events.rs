//! Ledger events and the sink they are delivered to.
//!
//! One event per state transition, carrying the fields an off-chain observer
//! or audit trail needs. Events are emitted only after an operation's custody
//! interaction has succeeded — a rolled-back operation leaves no trail.

use serde::{Deserialize, Serialize};

use crate::types::{AccountId, AssetId, ScheduleId, Timestamp};

/// A state transition the ledger announces to observers.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum VestingEvent {
    /// A schedule was created and funded.
    ScheduleCreated {
        schedule_id: ScheduleId,
        beneficiary: AccountId,
        asset: AssetId,
        amount: u64,
        start: Timestamp,
        duration: u64,
    },
    /// Vested tokens were paid to the beneficiary (by claim, or as the
    /// vested share settled at revocation).
    TokensClaimed {
        beneficiary: AccountId,
        schedule_id: ScheduleId,
        amount: u64,
    },
    /// A schedule reached `amount_claimed == total_amount` through normal
    /// claiming.
    ScheduleCompleted {
        schedule_id: ScheduleId,
        beneficiary: AccountId,
    },
    /// The administrator terminated a schedule early.
    ScheduleRevoked {
        schedule_id: ScheduleId,
        refund: u64,
        vested: u64,
    },
    /// The administrator swept balance in excess of the locked total.
    ExcessWithdrawn {
        asset: AssetId,
        amount: u64,
    },
}

/// Destination for ledger events.
pub trait EventSink {
    /// Deliver one event. Must not fail; sinks that can lose events decide
    /// their own policy.
    fn emit(&mut self, event: VestingEvent);
}

/// Sink that keeps every event in order. Backs tests and in-process audit.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    events: Vec<VestingEvent>,
}

impl RecordingSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All events emitted so far, in order.
    pub fn events(&self) -> &[VestingEvent] {
        &self.events
    }

    /// Drain the recorded events.
    pub fn take(&mut self) -> Vec<VestingEvent> {
        std::mem::take(&mut self.events)
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: VestingEvent) {
        self.events.push(event);
    }
}

/// Sink that forwards every event to `tracing` at info level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggingSink;

impl EventSink for LoggingSink {
    fn emit(&mut self, event: VestingEvent) {
        match event {
            VestingEvent::ScheduleCreated { schedule_id, beneficiary, amount, .. } => {
                tracing::info!(schedule_id, %beneficiary, amount, "schedule created");
            }
            VestingEvent::TokensClaimed { beneficiary, schedule_id, amount } => {
                tracing::info!(schedule_id, %beneficiary, amount, "tokens claimed");
            }
            VestingEvent::ScheduleCompleted { schedule_id, beneficiary } => {
                tracing::info!(schedule_id, %beneficiary, "schedule completed");
            }
            VestingEvent::ScheduleRevoked { schedule_id, refund, vested } => {
                tracing::info!(schedule_id, refund, vested, "schedule revoked");
            }
            VestingEvent::ExcessWithdrawn { asset, amount } => {
                tracing::info!(%asset, amount, "excess withdrawn");
            }
        }
    }
}

/// Sink that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: VestingEvent) {}
}
