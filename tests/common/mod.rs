//! Test-only generator-family builders exercising the engine end to end.
//!
//! These mirror the LRX family (left rotation, right rotation, swap-first-two)
//! and a four-element top-spin-style fixture (rotations plus full reversal),
//! recovered from the original implementation's own test oracle. They are
//! deliberately not part of the public API — a real catalog is an external
//! collaborator (see `cayleybfs::collaborators`).

use cayleybfs::{CayleyGraphDef, CentralState};

/// Installs a tracing subscriber for the duration of the test binary, so
/// `RUST_LOG=cayleybfs=debug cargo test -- --nocapture` shows per-layer spans.
/// Safe to call from multiple tests; only the first call wins.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).try_init();
}

/// The LRX family on `n` elements: `L` (left cyclic shift), `R` (right
/// cyclic shift, `L`'s inverse), `X` (swap the first two positions).
pub fn lrx_def(n: usize, central: Option<&str>) -> CayleyGraphDef {
    let l: Vec<u32> = (0..n).map(|i| ((i + 1) % n) as u32).collect();
    let r: Vec<u32> = (0..n).map(|i| ((i + n - 1) % n) as u32).collect();
    let mut x: Vec<u32> = (0..n as u32).collect();
    x.swap(0, 1);

    let names = vec!["L".to_string(), "R".to_string(), "X".to_string()];
    let def = CayleyGraphDef::create(vec![l, r, x], Some(names)).unwrap();
    match central {
        Some(s) => def.with_central_state(CentralState::Digits(s.to_string())).unwrap(),
        None => def,
    }
}

/// A four-element top-spin-style fixture: `L`, `R` as above, plus a full
/// reversal generator.
pub fn top_spin4_def(central: &str) -> CayleyGraphDef {
    let n = 4;
    let l: Vec<u32> = (0..n).map(|i| ((i + 1) % n) as u32).collect();
    let r: Vec<u32> = (0..n).map(|i| ((i + n - 1) % n) as u32).collect();
    let flip: Vec<u32> = (0..n as u32).rev().collect();

    let names = vec!["L".to_string(), "R".to_string(), "Flip".to_string()];
    CayleyGraphDef::create(vec![l, r, flip], Some(names))
        .unwrap()
        .with_central_state(CentralState::Digits(central.to_string()))
        .unwrap()
}
