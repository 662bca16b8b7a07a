//! Fixture builders shared by the lifecycle, accounting, and concurrency
//! test harnesses.

use vesting_core::custody::MemoryCustody;
use vesting_core::events::RecordingSink;
use vesting_core::ledger::VestingLedger;
use vesting_core::types::{AccountId, AssetId};

/// The administrator identity used by every fixture.
pub const ADMIN: AccountId = AccountId([0xAD; 32]);

/// Account identity from a seed byte.
pub fn acct(seed: u8) -> AccountId {
    AccountId([seed; 32])
}

/// Asset identity from a seed byte.
pub fn asset(seed: u8) -> AssetId {
    AssetId([seed; 32])
}

/// A recording ledger whose administrator holds `funding` of the given
/// assets.
pub fn funded_ledger(
    funding: u64,
    assets: &[AssetId],
) -> VestingLedger<MemoryCustody, RecordingSink> {
    let mut custody = MemoryCustody::new();
    for &a in assets {
        custody.credit(ADMIN, a, funding);
    }
    VestingLedger::new(ADMIN, custody, RecordingSink::new())
}
