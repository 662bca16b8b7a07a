//! Linear vesting curve with an initial cliff.
//!
//! All computation uses integer arithmetic only. The vested amount grows
//! linearly from `start` to `start + duration`, is forced to zero strictly
//! before `start + cliff`, and saturates at `total` afterwards. Division
//! truncates — partial units round down in favor of the grant pool, never up.
//!
//! The cliff boundary itself belongs to the linear branch: at exactly
//! `now == start + cliff` the linear amount is already releasable.

use crate::types::{Timestamp, VestingSchedule};

/// Cumulative quantity the curve has unlocked as of `now`, independent of
/// what has been paid out.
///
/// Returns 0 strictly before the cliff ends and `total` at or after
/// `start + duration`. In between, `floor(total * (now - start) / duration)`.
///
/// `duration` must be positive; schedule validation guarantees this before
/// anything reaches the curve.
pub fn vested_amount(
    total: u64,
    start: Timestamp,
    cliff: u64,
    duration: u64,
    now: Timestamp,
) -> u64 {
    if now < start.saturating_add(cliff) {
        return 0;
    }
    if now >= start.saturating_add(duration) {
        return total;
    }
    // Reached only when start <= start + cliff <= now, so the subtraction
    // cannot underflow.
    let elapsed = now - start;
    // Widen before multiplying: total and elapsed are both u64, so the
    // product can exceed u64 but always fits u128. The quotient is <= total.
    (total as u128 * elapsed as u128 / duration as u128) as u64
}

/// What a claim on `schedule` would pay at `now`: vested minus already paid.
///
/// Returns 0 for revoked or fully-claimed schedules. The subtraction is
/// non-negative by construction (`amount_claimed` only ever advances to a
/// previously vested value, and vesting is monotone in `now`); the
/// saturating form makes that guarantee structural.
pub fn releasable(schedule: &VestingSchedule, now: Timestamp) -> u64 {
    if schedule.revoked || schedule.closed {
        return 0;
    }
    let vested = vested_amount(
        schedule.total_amount,
        schedule.start,
        schedule.cliff,
        schedule.duration,
        now,
    );
    vested.saturating_sub(schedule.amount_claimed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AccountId, AssetId};
    use proptest::prelude::*;

    fn schedule(start: u64, cliff: u64, duration: u64, total: u64) -> VestingSchedule {
        VestingSchedule::new(AccountId([1; 32]), AssetId([2; 32]), start, cliff, duration, total)
    }

    // ------------------------------------------------------------------
    // Cliff and endpoints
    // ------------------------------------------------------------------

    #[test]
    fn zero_before_cliff() {
        // total=1000, duration=1000, cliff=250, start=T.
        assert_eq!(vested_amount(1000, 500, 250, 1000, 500), 0);
        assert_eq!(vested_amount(1000, 500, 250, 1000, 700), 0); // T+200
        assert_eq!(vested_amount(1000, 500, 250, 1000, 749), 0);
    }

    #[test]
    fn cliff_boundary_is_linear() {
        // At exactly T+250 the linear branch applies: 25% of 1000.
        assert_eq!(vested_amount(1000, 500, 250, 1000, 750), 250);
    }

    #[test]
    fn linear_midpoint() {
        assert_eq!(vested_amount(1000, 500, 250, 1000, 1000), 500); // T+500
    }

    #[test]
    fn full_at_and_after_end() {
        assert_eq!(vested_amount(1000, 500, 250, 1000, 1500), 1000); // T+1000
        assert_eq!(vested_amount(1000, 500, 250, 1000, 9999), 1000);
        assert_eq!(vested_amount(1000, 500, 250, 1000, u64::MAX), 1000);
    }

    #[test]
    fn before_start_with_zero_cliff() {
        assert_eq!(vested_amount(1000, 500, 0, 1000, 499), 0);
        assert_eq!(vested_amount(1000, 500, 0, 1000, 500), 0); // 0 elapsed
    }

    #[test]
    fn division_truncates_toward_pool() {
        // 3 units over duration 7: at t=2 vested = floor(6/7) = 0.
        assert_eq!(vested_amount(3, 0, 0, 7, 2), 0);
        assert_eq!(vested_amount(3, 0, 0, 7, 3), 1);
        assert_eq!(vested_amount(3, 0, 0, 7, 6), 2);
        assert_eq!(vested_amount(3, 0, 0, 7, 7), 3);
    }

    #[test]
    fn wide_multiplication_does_not_overflow() {
        // total * elapsed far exceeds u64::MAX; the u128 widening must hold it.
        let total = u64::MAX / 2;
        let duration = u64::MAX / 2;
        let now = duration - 1;
        let vested = vested_amount(total, 0, 0, duration, now);
        assert!(vested < total);
        assert_eq!(vested_amount(total, 0, 0, duration, duration), total);
    }

    #[test]
    fn saturating_cliff_near_u64_max() {
        // start + cliff saturates; anything below u64::MAX is before the cliff.
        assert_eq!(vested_amount(1000, u64::MAX - 5, 100, 200, u64::MAX - 1), 0);
    }

    // ------------------------------------------------------------------
    // Releasable
    // ------------------------------------------------------------------

    #[test]
    fn releasable_subtracts_claimed() {
        let mut s = schedule(0, 0, 1000, 1000);
        assert_eq!(releasable(&s, 500), 500);
        s.amount_claimed = 300;
        assert_eq!(releasable(&s, 500), 200);
        assert_eq!(releasable(&s, 1000), 700);
    }

    #[test]
    fn releasable_zero_when_revoked() {
        let mut s = schedule(0, 0, 1000, 1000);
        s.revoked = true;
        assert_eq!(releasable(&s, 500), 0);
        assert_eq!(releasable(&s, u64::MAX), 0);
    }

    #[test]
    fn releasable_zero_when_closed() {
        let mut s = schedule(0, 0, 1000, 1000);
        s.amount_claimed = 1000;
        s.closed = true;
        assert_eq!(releasable(&s, u64::MAX), 0);
    }

    #[test]
    fn releasable_zero_before_cliff() {
        let s = schedule(100, 250, 1000, 1000);
        assert_eq!(releasable(&s, 300), 0);
        assert_eq!(releasable(&s, 349), 0);
        assert_eq!(releasable(&s, 350), 250);
    }

    // ------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------

    proptest! {
        #[test]
        fn vested_within_bounds(
            total in 0u64..=1_000_000_000_000,
            start in 0u64..=1_000_000_000,
            duration in 1u64..=1_000_000_000,
            cliff_frac in 0u64..=1_000_000_000,
            now in 0u64..=4_000_000_000,
        ) {
            let cliff = cliff_frac % (duration + 1);
            let v = vested_amount(total, start, cliff, duration, now);
            prop_assert!(v <= total);
        }

        #[test]
        fn vested_monotone_in_now(
            total in 0u64..=1_000_000_000_000,
            start in 0u64..=1_000_000_000,
            duration in 1u64..=1_000_000_000,
            cliff_frac in 0u64..=1_000_000_000,
            a in 0u64..=4_000_000_000,
            b in 0u64..=4_000_000_000,
        ) {
            let cliff = cliff_frac % (duration + 1);
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(
                vested_amount(total, start, cliff, duration, lo)
                    <= vested_amount(total, start, cliff, duration, hi)
            );
        }

        #[test]
        fn vested_exact_at_endpoints(
            total in 1u64..=1_000_000_000_000,
            start in 0u64..=1_000_000_000,
            duration in 1u64..=1_000_000_000,
        ) {
            prop_assert_eq!(vested_amount(total, start, 0, duration, start), 0);
            prop_assert_eq!(
                vested_amount(total, start, 0, duration, start + duration),
                total
            );
        }
    }
}
