//! Fixed two-decimal rounding applied everywhere money changes
//! representation. Balances are accumulated as floats and re-rounded at
//! every boundary; the per-item residue this leaves on non-divisible splits
//! is part of the numeric contract (see `balance`), so this must stay a
//! plain `round()` on cents and not be swapped for a decimal type.

/// Round to two decimal places, half away from zero.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
