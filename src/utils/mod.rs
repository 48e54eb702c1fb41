//! The utilies module provides general capabilities, that may span the
//! input modeling, models, output analysis, and simulator modules.  The
//! utilities are centered around debugging/traceability and simulation
//! clock arithmetic.

pub mod errors;

/// Absolute tolerance used when comparing simulation times.
pub const TIME_EPSILON: f64 = 1e-9;

/// Two simulation times are equivalent when they differ by no more than
/// `TIME_EPSILON`.  Event times are built from sums of delays, so exact
/// floating point equality is too strict for imminence checks.
pub fn equivalent_f64(a: f64, b: f64) -> bool {
    (a - b).abs() <= TIME_EPSILON
}

/// When the `console_error_panic_hook` feature is enabled, we can call the
/// `set_panic_hook` function at least once during initialization, and then
/// we will get better error messages if our code ever panics.
///
/// For more details see
/// <https://github.com/rustwasm/console_error_panic_hook#readme>
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
