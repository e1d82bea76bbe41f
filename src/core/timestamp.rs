//! Slack message timestamps.
//!
//! A `ts` such as `"1712345678.000200"` is a decimal number carried as a
//! string. Comparing those strings lexically gets `"99.5"` vs `"100"` wrong,
//! so ordering is done digit-wise on the integer and fractional parts.

use std::cmp::Ordering;

/// Checkpoint used when the orchestrator has never supplied a version.
pub const INITIAL_TS: &str = "0";

/// Splits a decimal string into its integer and fraction digits with the
/// insignificant zeros removed. Returns `None` for anything that is not a
/// plain non-negative decimal.
fn decimal_parts(ts: &str) -> Option<(&str, &str)> {
    let (int, frac) = ts.split_once('.').unwrap_or((ts, ""));
    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());

    if (int.is_empty() && frac.is_empty()) || !is_digits(int) || !is_digits(frac) {
        return None;
    }

    Some((int.trim_start_matches('0'), frac.trim_end_matches('0')))
}

/// Orders two Slack timestamps numerically.
///
/// Values that are not decimals fall back to plain string ordering.
#[must_use]
pub fn compare(a: &str, b: &str) -> Ordering {
    match (decimal_parts(a), decimal_parts(b)) {
        (Some((a_int, a_frac)), Some((b_int, b_frac))) => a_int
            .len()
            .cmp(&b_int.len())
            .then_with(|| a_int.cmp(b_int))
            .then_with(|| a_frac.cmp(b_frac)),
        _ => a.cmp(b),
    }
}

/// True when `ts` is strictly later than `checkpoint`.
#[must_use]
pub fn is_after(ts: &str, checkpoint: &str) -> bool {
    compare(ts, checkpoint) == Ordering::Greater
}
