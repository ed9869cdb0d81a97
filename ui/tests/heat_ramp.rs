//! Property tests for the supplier-rate heat ramp.
//!
//! Verifies:
//! 1. Blue is always 0 for any in-range value.
//! 2. Endpoints map to pure green (min) and pure red (max).
//! 3. The midpoint is pure yellow.
//! 4. A degenerate range is yellow for any value.
//! 5. Red never falls and green never rises as the value climbs.

use proptest::prelude::*;
use ui::core::heatmap::{heat_color, Rgb};

// ── Strategy helpers ──────────────────────────────────────────────────

/// `(value, min, max)` with `min < max` and `min <= value <= max`.
fn arb_in_range() -> impl Strategy<Value = (f64, f64, f64)> {
    (-1.0e6f64..1.0e6, 1.0e-3f64..1.0e6, 0.0f64..=1.0)
        .prop_map(|(min, span, t)| (min + span * t, min, min + span))
}

fn arb_range() -> impl Strategy<Value = (f64, f64)> {
    (-1.0e6f64..1.0e6, 1.0e-3f64..1.0e6).prop_map(|(min, span)| (min, min + span))
}

proptest! {
    #[test]
    fn blue_channel_is_always_zero((value, min, max) in arb_in_range()) {
        prop_assert_eq!(heat_color(value, min, max).b, 0);
    }

    #[test]
    fn endpoints_are_green_and_red((min, max) in arb_range()) {
        prop_assert_eq!(heat_color(min, min, max), Rgb { r: 0, g: 255, b: 0 });
        prop_assert_eq!(heat_color(max, min, max), Rgb { r: 255, g: 0, b: 0 });
    }

    #[test]
    fn midpoint_is_yellow(min in -1.0e3f64..1.0e3, half in 1u32..10_000) {
        // Exact binary midpoint so the ratio is exactly one half.
        let half = f64::from(half) / 4.0;
        prop_assert_eq!(heat_color(min + half, min, min + 2.0 * half), Rgb::YELLOW);
    }

    #[test]
    fn degenerate_range_is_always_yellow(value in any::<f64>(), m in -1.0e9f64..1.0e9) {
        prop_assert_eq!(heat_color(value, m, m), Rgb::YELLOW);
    }

    #[test]
    fn ramp_is_monotonic((min, max) in arb_range(), a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let low = heat_color(min + (max - min) * lo, min, max);
        let high = heat_color(min + (max - min) * hi, min, max);
        prop_assert!(low.r <= high.r);
        prop_assert!(low.g >= high.g);
    }
}
