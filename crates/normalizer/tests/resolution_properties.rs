//! Property tests for header normalization and column resolution.
//!
//! 1. Normalizing and resolving twice gives the same result as once.
//! 2. Any PnL alias, however it is cased or padded, ends up bound.
//! 3. PnL is always bound when entry, exit price and quantity are present.

use core_types::{CanonicalField, CellValue, RawRecordSet};
use normalizer::{normalize_header, normalize_headers, process, resolve};
use proptest::prelude::*;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_header() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z .]{0,12}",
        Just("Entry Price".to_string()),
        Just(" P.L ".to_string()),
        Just("Take Profit".to_string()),
        Just("QTY".to_string()),
    ]
}

fn decorate(alias: &str, upper: bool, pad: usize) -> String {
    let cased = if upper {
        alias.to_uppercase()
    } else {
        alias.to_string()
    };
    format!("{}{}{}", " ".repeat(pad), cased, " ".repeat(pad))
}

fn arb_price() -> impl Strategy<Value = f64> {
    (1.0..500.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

// ── 1. Idempotence ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn normalize_and_resolve_are_idempotent(headers in prop::collection::vec(arb_header(), 0..8)) {
        let once = normalize_headers(&headers);
        let twice = normalize_headers(&once);
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(resolve(&once), resolve(&twice));
    }
}

// ── 2. Direct PnL aliases ────────────────────────────────────────────

proptest! {
    #[test]
    fn any_pnl_alias_is_recognized(
        idx in 0..CanonicalField::Pnl.aliases().len(),
        upper in any::<bool>(),
        pad in 0..3usize,
    ) {
        let alias = CanonicalField::Pnl.aliases()[idx];
        let header = decorate(alias, upper, pad);
        let columns = vec![normalize_header(&header)];
        let map = resolve(&columns);
        prop_assert_eq!(map.column(CanonicalField::Pnl), Some(alias));
    }
}

// ── 3. Derivable PnL ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn derivable_pnl_is_always_bound(
        entry in arb_price(),
        exit in arb_price(),
        qty in 1u32..100,
    ) {
        let raw = RawRecordSet::from_rows(
            vec!["Entry".into(), "Exit Price".into(), "Size".into()],
            vec![vec![
                CellValue::Text(entry.to_string()),
                CellValue::Text(exit.to_string()),
                CellValue::Text(qty.to_string()),
            ]],
        ).unwrap();
        let data = process(raw).unwrap();
        prop_assert!(data.resolution().contains(CanonicalField::Pnl));
        let pnl = data.trades()[0].pnl.unwrap();
        prop_assert!((pnl - (exit - entry) * qty as f64).abs() < 1e-9);
    }
}
