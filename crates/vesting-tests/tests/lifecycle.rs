//! End-to-end schedule lifecycles: creation through claims, revocation, and
//! excess sweeps, across multiple beneficiaries and assets.

use vesting_core::custody::AssetCustody;
use vesting_core::error::VestingError;
use vesting_core::events::VestingEvent;
use vesting_core::ledger::RevokeOutcome;

use vesting_tests::helpers::{ADMIN, acct, asset, funded_ledger};

#[test]
fn full_grant_lifecycle_single_beneficiary() {
    let mut ledger = funded_ledger(10_000, &[asset(1)]);
    let start = 1_700_000_000;
    let id = ledger
        .create_schedule(ADMIN, acct(1), asset(1), 1000, start, 250, 1000)
        .unwrap();

    // Before the cliff nothing moves.
    assert_eq!(ledger.releasable_amount(id, start + 200).unwrap(), 0);
    assert_eq!(
        ledger.claim(acct(1), id, start + 200).unwrap_err(),
        VestingError::NothingToClaim,
    );

    // Cliff boundary releases the linear amount.
    assert_eq!(ledger.releasable_amount(id, start + 250).unwrap(), 250);
    assert_eq!(ledger.claim(acct(1), id, start + 250).unwrap(), 250);

    // Midway: 500 vested, 250 already paid.
    assert_eq!(ledger.claim(acct(1), id, start + 500).unwrap(), 250);

    // End: remainder pays out and the schedule closes.
    assert_eq!(ledger.claim(acct(1), id, start + 1000).unwrap(), 500);
    let s = ledger.schedule(id).unwrap();
    assert!(s.closed);
    assert_eq!(s.amount_claimed, 1000);
    assert_eq!(ledger.custody().balance_of(acct(1), asset(1)), 1000);
    assert_eq!(ledger.locked_total(asset(1)), 0);

    // Closed means closed.
    assert_eq!(
        ledger.claim(acct(1), id, start + 2000).unwrap_err(),
        VestingError::ScheduleClaimed,
    );
}

#[test]
fn many_schedules_many_assets_stay_independent() {
    let mut ledger = funded_ledger(100_000, &[asset(1), asset(2)]);
    let a1 = ledger.create_schedule(ADMIN, acct(1), asset(1), 5000, 0, 0, 100).unwrap();
    let a2 = ledger.create_schedule(ADMIN, acct(1), asset(2), 3000, 0, 0, 100).unwrap();
    let b1 = ledger.create_schedule(ADMIN, acct(2), asset(1), 2000, 0, 50, 100).unwrap();

    assert_eq!(ledger.locked_total(asset(1)), 7000);
    assert_eq!(ledger.locked_total(asset(2)), 3000);
    assert_eq!(ledger.schedule_count_for(acct(1)), 2);
    assert_eq!(ledger.schedule_id_at(acct(1), 0).unwrap(), a1);
    assert_eq!(ledger.schedule_id_at(acct(1), 1).unwrap(), a2);
    assert_eq!(ledger.schedule_id_at(acct(2), 0).unwrap(), b1);

    // Claims against one asset leave the other untouched.
    ledger.claim(acct(1), a1, 50).unwrap();
    assert_eq!(ledger.locked_total(asset(1)), 4500);
    assert_eq!(ledger.locked_total(asset(2)), 3000);
    assert_eq!(ledger.custody().held(asset(1)), 4500);
    assert_eq!(ledger.custody().held(asset(2)), 3000);
}

#[test]
fn revocation_settles_and_freezes() {
    let mut ledger = funded_ledger(10_000, &[asset(1)]);
    let id = ledger
        .create_schedule(ADMIN, acct(1), asset(1), 1000, 0, 0, 1000)
        .unwrap();
    ledger.claim(acct(1), id, 250).unwrap();

    let outcome = ledger.revoke(ADMIN, id, 750).unwrap();
    assert_eq!(outcome, RevokeOutcome { vested: 500, refund: 250 });

    // 250 claimed + 500 vested at revoke + 250 refund == 1000.
    assert_eq!(ledger.custody().balance_of(acct(1), asset(1)), 750);
    assert_eq!(ledger.custody().balance_of(ADMIN, asset(1)), 10_000 - 1000 + 250);
    assert_eq!(ledger.locked_total(asset(1)), 0);

    // Frozen: no claims, no second revoke, releasable pinned to zero.
    assert_eq!(
        ledger.claim(acct(1), id, 5000).unwrap_err(),
        VestingError::ScheduleWasRevoked,
    );
    assert_eq!(
        ledger.revoke(ADMIN, id, 5000).unwrap_err(),
        VestingError::ScheduleWasRevoked,
    );
    assert_eq!(ledger.releasable_amount(id, 5000).unwrap(), 0);
}

#[test]
fn sweep_recovers_stray_funds_without_touching_grants() {
    let mut ledger = funded_ledger(10_000, &[asset(1)]);
    let id = ledger
        .create_schedule(ADMIN, acct(1), asset(1), 1000, 0, 0, 1000)
        .unwrap();

    // Someone transfers 400 straight into custody by mistake.
    ledger.custody_mut().donate(asset(1), 400);
    assert_eq!(ledger.withdraw_excess(ADMIN, asset(1)).unwrap(), 400);

    // Grant accounting is untouched and the beneficiary still collects.
    assert_eq!(ledger.locked_total(asset(1)), 1000);
    assert_eq!(ledger.claim(acct(1), id, 1000).unwrap(), 1000);

    // Nothing further to sweep.
    assert_eq!(
        ledger.withdraw_excess(ADMIN, asset(1)).unwrap_err(),
        VestingError::InsufficientExcessBalance,
    );
}

#[test]
fn event_trail_for_a_full_lifecycle() {
    let mut ledger = funded_ledger(10_000, &[asset(1)]);
    let id = ledger
        .create_schedule(ADMIN, acct(1), asset(1), 1000, 0, 0, 1000)
        .unwrap();
    ledger.claim(acct(1), id, 400).unwrap();
    ledger.claim(acct(1), id, 1000).unwrap();

    assert_eq!(
        ledger.events().events(),
        &[
            VestingEvent::ScheduleCreated {
                schedule_id: id,
                beneficiary: acct(1),
                asset: asset(1),
                amount: 1000,
                start: 0,
                duration: 1000,
            },
            VestingEvent::TokensClaimed { beneficiary: acct(1), schedule_id: id, amount: 400 },
            VestingEvent::ScheduleCompleted { schedule_id: id, beneficiary: acct(1) },
            VestingEvent::TokensClaimed { beneficiary: acct(1), schedule_id: id, amount: 600 },
        ],
    );
}

#[test]
fn schedule_ids_survive_settlement() {
    // Settled schedules keep their positions; later grants extend the arena.
    let mut ledger = funded_ledger(10_000, &[asset(1)]);
    let a = ledger.create_schedule(ADMIN, acct(1), asset(1), 100, 0, 0, 10).unwrap();
    ledger.claim(acct(1), a, 10).unwrap();
    let b = ledger.create_schedule(ADMIN, acct(1), asset(1), 200, 0, 0, 10).unwrap();

    assert_eq!((a, b), (0, 1));
    assert_eq!(ledger.schedule(a).unwrap().total_amount, 100);
    assert!(ledger.schedule(a).unwrap().closed);
    assert_eq!(ledger.schedule(b).unwrap().total_amount, 200);
    assert_eq!(ledger.schedule_id_at(acct(1), 0).unwrap(), a);
    assert_eq!(ledger.schedule_id_at(acct(1), 1).unwrap(), b);
}
