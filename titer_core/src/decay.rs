//! Single-exponential elimination kinetics.
//!
//! One pure function: the residual active amount of a single dose at a
//! query instant. Superposition across doses lives in [`crate::projection`].

use chrono::{DateTime, Utc};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Residual active amount (mg) of one dose at `at`.
///
/// Returns 0 before the dose is taken; at the dose instant the full dose
/// is active, and it halves every `half_life_days` thereafter. Elapsed
/// time is fractional, so sub-day query grids decay smoothly.
///
/// `half_life_days` must be strictly positive; catalog validation
/// guarantees this for every compound before call sites run.
pub fn level_at(
    dose_mg: f64,
    taken_at: DateTime<Utc>,
    half_life_days: f64,
    at: DateTime<Utc>,
) -> f64 {
    debug_assert!(half_life_days > 0.0);

    if at < taken_at {
        return 0.0;
    }

    let elapsed_days = (at - taken_at).num_milliseconds() as f64 / MILLIS_PER_DAY;
    dose_mg * 0.5_f64.powf(elapsed_days / half_life_days)
}
