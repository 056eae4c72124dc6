use std::fmt;

use tracing::{debug, info_span};

use crate::bignum::BigInt;
use crate::chudnovsky::{binary_split, Terms};
use crate::error::Result;

/// Each Chudnovsky term adds a little over 14 correct digits.
pub const DIGITS_PER_TERM: usize = 14;

/// Extra digits carried through the computation. The floored square root
/// and the truncating division each lose a fraction of a unit in the last
/// place, which would otherwise leak into the last requested digit.
pub const GUARD_DIGITS: usize = 9;

const SQRT_RADICAND: i64 = 10005;
const SCALE: i64 = 426880;

/// The phases of [`compute_pi_with_progress`], reported in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Splitting,
    SquareRoot,
    Dividing,
    Formatting,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Splitting => "summing the series",
            Stage::SquareRoot => "square root",
            Stage::Dividing => "dividing",
            Stage::Formatting => "formatting",
        };
        f.write_str(name)
    }
}

pub fn term_count(digits: usize) -> usize {
    digits / DIGITS_PER_TERM + 1
}

/// Pi as `"3."` followed by `digits` fractional digits (truncated, not rounded).
pub fn compute_pi(digits: usize) -> Result<String> {
    compute_pi_with_progress(digits, |_| {})
}

pub fn compute_pi_with_progress(digits: usize, mut progress: impl FnMut(Stage)) -> Result<String> {
    let working = digits + GUARD_DIGITS;
    let terms = term_count(working);
    debug!(digits, terms, "computing pi");

    progress(Stage::Splitting);
    let Terms { q, t, .. } = info_span!("split", terms).in_scope(|| binary_split(0, terms))?;
    debug!(q_blocks = q.len(), t_blocks = t.len(), "series summed");

    progress(Stage::SquareRoot);
    let root = info_span!("sqrt").in_scope(|| scaled_sqrt(working))?;
    debug!(blocks = root.len(), "square root done");

    progress(Stage::Dividing);
    let scaled_pi = info_span!("divide").in_scope(|| q.mul_scalar(SCALE)?.mul(&root)?.div(&t))?;

    progress(Stage::Formatting);
    Ok(format_fixed_point(&scaled_pi, digits))
}

/// `floor(sqrt(10005 * 10^(2 * digits)))`, which is `sqrt(10005) * 10^digits`.
fn scaled_sqrt(digits: usize) -> Result<BigInt> {
    BigInt::from(SQRT_RADICAND).mul_pow10(2 * digits)?.sqrt()
}

/// Reads `value` as `value / 10^digits` with a single integer digit.
fn format_fixed_point(value: &BigInt, digits: usize) -> String {
    let mut text = value.to_string();
    if text.len() > 1 {
        text.insert(1, '.');
    }
    text.truncate(digits + 2);
    text
}
