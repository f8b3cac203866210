//! Fee validation, minimum-rate enforcement and the 70/20/10 split.
//!
//! The split floors each share on its own, so totals that are not a multiple
//! of 100 leave a small unallocated residual. These tests pin that behavior.

use rand::{rngs::StdRng, Rng, SeedableRng};
use x402_admission_guard::universal::fees::{enforce_minimum_fee, split_fee, validate_fee, FeeError, FeePolicy};
use x402_admission_guard::FeeSplit;

#[test]
fn validate_fee_rejects_only_negative_values() {
    assert!(matches!(validate_fee(-1), Err(FeeError::Negative(-1))));
    assert!(matches!(validate_fee(i64::MIN), Err(FeeError::Negative(_))));
    assert!(validate_fee(0).is_ok());
    assert!(validate_fee(42).is_ok());
    assert!(validate_fee(i64::MAX).is_ok());
}

#[test]
fn minimum_fee_holds_at_exact_boundary() {
    // 75 * 10000 == 12500 * 60
    assert!(enforce_minimum_fee(12_500, 75, 60));
    assert!(!enforce_minimum_fee(12_500, 74, 60));
    assert!(enforce_minimum_fee(12_500, 76, 60));
}

#[test]
fn minimum_fee_edge_rates() {
    // zero bps requires nothing
    assert!(enforce_minimum_fee(u64::MAX, 0, 0));
    // 100% requires the full amount
    assert!(enforce_minimum_fee(1_000, 1_000, 10_000));
    assert!(!enforce_minimum_fee(1_000, 999, 10_000));
    // zero amount is always covered
    assert!(enforce_minimum_fee(0, 0, 10_000));
}

#[test]
fn minimum_fee_does_not_overflow_near_u64_max() {
    // amount * bps exceeds u64 here; a 64-bit comparison would wrap
    let amount = u64::MAX;
    let required = (amount as u128 * 9_999 / 10_000) as u64;
    assert!(enforce_minimum_fee(amount, required + 1, 9_999));
    assert!(!enforce_minimum_fee(amount, required - 1, 9_999));
    assert!(enforce_minimum_fee(amount, u64::MAX, 10_000));
    assert!(!enforce_minimum_fee(amount, u64::MAX - 1, 10_000));
}

#[test]
fn minimum_fee_matches_wide_reference_on_random_inputs() {
    let mut rng = StdRng::seed_from_u64(0x402);
    for _ in 0..10_000 {
        let amount: u64 = rng.gen();
        let paid: u64 = rng.gen();
        let bps: u64 = rng.gen_range(0..=10_000);
        let expected = paid as u128 * 10_000 >= amount as u128 * bps as u128;
        assert_eq!(enforce_minimum_fee(amount, paid, bps), expected);
    }
}

#[test]
fn split_fee_documented_examples() {
    let split = split_fee(100);
    assert_eq!(split, FeeSplit { facilitator: 70, insurance: 20, validator: 10 });
    assert_eq!(split.residual(100), 0);

    let split = split_fee(101);
    assert_eq!(split, FeeSplit { facilitator: 70, insurance: 20, validator: 10 });
    assert_eq!(split.residual(101), 1);

    let split = split_fee(99);
    assert_eq!(split, FeeSplit { facilitator: 69, insurance: 19, validator: 9 });
    assert_eq!(split.residual(99), 2);

    assert_eq!(split_fee(0), FeeSplit::default());
}

#[test]
fn split_fee_brute_force_small_totals() {
    for total in 0u64..=10_000 {
        let split = split_fee(total);
        assert_eq!(split.facilitator, total * 70 / 100);
        assert_eq!(split.insurance, total * 20 / 100);
        assert_eq!(split.validator, total * 10 / 100);
        assert!(split.allocated() <= total);
        assert!(split.residual(total) <= 2, "total={total}");
    }
}

#[test]
fn split_fee_never_over_allocates_on_large_totals() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut totals: Vec<u64> = (0..10_000).map(|_| rng.gen()).collect();
    totals.extend([u64::MAX, u64::MAX - 1, u64::MAX / 2]);

    for total in totals {
        let split = split_fee(total);
        assert_eq!(split.facilitator as u128, total as u128 * 70 / 100);
        assert_eq!(split.insurance as u128, total as u128 * 20 / 100);
        assert_eq!(split.validator as u128, total as u128 * 10 / 100);
        assert!(split.allocated() <= total);
        assert!(split.residual(total) <= 2);
    }
}

#[test]
fn fee_policy_handle_delegates() {
    let policy = FeePolicy;
    assert!(policy.validate_fee(-5).is_err());
    assert!(policy.enforce_minimum_fee(12_500, 75, 60));
    assert_eq!(policy.split_fee(1_000), split_fee(1_000));
}
