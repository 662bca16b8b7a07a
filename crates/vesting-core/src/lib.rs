//! # vesting-core
//! Per-beneficiary, per-token linear vesting accounting.
//!
//! An administrator locks a quantity of a fungible asset for a beneficiary;
//! the beneficiary withdraws the portion the linear release curve has vested,
//! subject to an initial cliff. The administrator may revoke a schedule early
//! (paying out the vested share and reclaiming the rest) and sweep asset
//! balance that exceeds the ledger's outstanding obligations.
//!
//! The entry point is [`ledger::VestingLedger`]; wrap it in
//! [`shared::SharedLedger`] when operations may arrive from multiple threads.

pub mod curve;
pub mod custody;
pub mod error;
pub mod events;
pub mod ledger;
pub mod shared;
pub mod store;
pub mod types;
