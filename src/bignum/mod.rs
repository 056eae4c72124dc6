//! Signed integers stored as base 10^9 blocks, least significant block first.
//!
//! A decimal base makes formatting a matter of zero-padding each block, and
//! keeps every block product (and a carry) inside a `u64`.

mod add;
mod div;
mod mul;
mod sqrt;
#[cfg(test)]
pub(crate) mod test_utils;

pub use mul::KARATSUBA_THRESHOLD;
pub use sqrt::newton_iteration_bound;

use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

use crate::error::{Error, Result};

pub const BASE: u32 = 1_000_000_000;
pub const BLOCK_DIGITS: usize = 9;

pub(crate) const BASE64: u64 = BASE as u64;

const POW10: [u32; BLOCK_DIGITS] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Minus,
    Plus,
}

impl Sign {
    fn of(value: i64) -> Self {
        if value < 0 {
            Sign::Minus
        } else {
            Sign::Plus
        }
    }

    pub fn flip(self) -> Self {
        match self {
            Sign::Minus => Sign::Plus,
            Sign::Plus => Sign::Minus,
        }
    }
}

impl std::ops::Mul for Sign {
    type Output = Sign;

    fn mul(self, rhs: Sign) -> Sign {
        if self == rhs {
            Sign::Plus
        } else {
            Sign::Minus
        }
    }
}

/// An arbitrary-precision signed integer.
///
/// `blocks` always holds at least one block and never ends in a zero block,
/// except for zero itself, which is `[0]` with [`Sign::Plus`]. Every block is
/// below [`BASE`]. The buffer grows by doubling and is never shrunk.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BigInt {
    blocks: Vec<u32>,
    sign: Sign,
}

/// A block buffer with room for `capacity` blocks, or [`Error::Allocation`].
pub(crate) fn with_room(capacity: usize) -> Result<Vec<u32>> {
    let mut blocks = Vec::new();
    blocks
        .try_reserve_exact(capacity)
        .map_err(|_| Error::Allocation { blocks: capacity })?;
    Ok(blocks)
}

/// `len` zero blocks.
pub(crate) fn zeroed(len: usize) -> Result<Vec<u32>> {
    let mut blocks = with_room(len)?;
    blocks.resize(len, 0);
    Ok(blocks)
}

/// `blocks` without its most significant zero blocks; empty for zero.
pub(crate) fn significant(blocks: &[u32]) -> &[u32] {
    let len = blocks.iter().rposition(|&b| b != 0).map_or(0, |top| top + 1);
    &blocks[..len]
}

pub(crate) fn cmp_blocks(a: &[u32], b: &[u32]) -> Ordering {
    let (a, b) = (significant(a), significant(b));
    a.len()
        .cmp(&b.len())
        .then_with(|| a.iter().rev().cmp(b.iter().rev()))
}

fn push_u64(blocks: &mut Vec<u32>, mut magnitude: u64) {
    loop {
        blocks.push((magnitude % BASE64) as u32);
        magnitude /= BASE64;
        if magnitude == 0 {
            break;
        }
    }
}

impl BigInt {
    pub fn new() -> Self {
        Self {
            blocks: vec![0],
            sign: Sign::Plus,
        }
    }

    /// Zero, with room for `capacity` blocks.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let mut blocks = with_room(capacity.max(1))?;
        blocks.push(0);
        Ok(Self {
            blocks,
            sign: Sign::Plus,
        })
    }

    /// Builds a value from raw little-endian blocks, restoring the invariants.
    pub(crate) fn from_blocks(blocks: Vec<u32>, sign: Sign) -> Self {
        debug_assert!(blocks.iter().all(|&b| b < BASE));
        let mut n = Self { blocks, sign };
        n.trim();
        n
    }

    pub(crate) fn trim(&mut self) {
        let len = significant(&self.blocks).len();
        self.blocks.truncate(len);
        if self.blocks.is_empty() {
            self.blocks.push(0);
        }
        if self.is_zero() {
            self.sign = Sign::Plus;
        }
    }

    /// Makes room for at least `blocks` blocks, at least doubling the buffer
    /// when it has to grow.
    pub fn ensure_capacity(&mut self, blocks: usize) -> Result<()> {
        let capacity = self.blocks.capacity();
        if capacity >= blocks {
            return Ok(());
        }
        let target = blocks.max(capacity * 2);
        self.blocks
            .try_reserve_exact(target - self.blocks.len())
            .map_err(|_| Error::Allocation { blocks: target })
    }

    pub fn capacity(&self) -> usize {
        self.blocks.capacity()
    }

    /// Number of significant blocks; 1 for zero.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn blocks(&self) -> &[u32] {
        &self.blocks
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    pub fn is_zero(&self) -> bool {
        self.blocks.len() == 1 && self.blocks[0] == 0
    }

    pub fn is_negative(&self) -> bool {
        self.sign == Sign::Minus
    }

    pub fn set_i64(&mut self, value: i64) -> Result<()> {
        self.ensure_capacity(3)?;
        self.blocks.clear();
        push_u64(&mut self.blocks, value.unsigned_abs());
        self.sign = Sign::of(value);
        self.trim();
        Ok(())
    }

    /// Deep copy of `other` into this value's buffer.
    pub fn copy_from(&mut self, other: &BigInt) -> Result<()> {
        self.ensure_capacity(other.blocks.len())?;
        self.blocks.clear();
        self.blocks.extend_from_slice(&other.blocks);
        self.sign = other.sign;
        Ok(())
    }

    pub fn set_from_decimal_str(&mut self, text: &str) -> Result<()> {
        let parsed: BigInt = text.parse()?;
        *self = parsed;
        Ok(())
    }

    pub fn to_i64(&self) -> Option<i64> {
        let magnitude = self.blocks.iter().rev().try_fold(0i128, |acc, &block| {
            let acc = acc * i128::from(BASE) + i128::from(block);
            (acc <= i128::from(i64::MAX) + 1).then_some(acc)
        })?;
        let value = match self.sign {
            Sign::Plus => magnitude,
            Sign::Minus => -magnitude,
        };
        i64::try_from(value).ok()
    }

    pub fn cmp_magnitude(&self, other: &BigInt) -> Ordering {
        cmp_blocks(&self.blocks, &other.blocks)
    }

    pub fn negate(&mut self) {
        if !self.is_zero() {
            self.sign = self.sign.flip();
        }
    }

    pub fn abs(&self) -> BigInt {
        Self {
            blocks: self.blocks.clone(),
            sign: Sign::Plus,
        }
    }

    /// Multiplies by `BASE^count` by moving every block up `count` places.
    pub fn shift_blocks(&mut self, count: usize) -> Result<()> {
        if count == 0 || self.is_zero() {
            return Ok(());
        }
        let len = self.blocks.len();
        self.ensure_capacity(len + count)?;
        self.blocks.resize(len + count, 0);
        self.blocks.copy_within(0..len, count);
        self.blocks[..count].fill(0);
        Ok(())
    }

    /// `self * 10^exponent`: one scalar multiply for the residual power, then
    /// a block shift for the rest.
    pub fn mul_pow10(&self, exponent: usize) -> Result<BigInt> {
        let residual = POW10[exponent % BLOCK_DIGITS];
        let mut scaled = self.mul_scalar(i64::from(residual))?;
        scaled.shift_blocks(exponent / BLOCK_DIGITS)?;
        Ok(scaled)
    }

    pub fn pow10(exponent: usize) -> Result<BigInt> {
        let mut blocks = zeroed(exponent / BLOCK_DIGITS + 1)?;
        if let Some(top) = blocks.last_mut() {
            *top = POW10[exponent % BLOCK_DIGITS];
        }
        Ok(Self::from_blocks(blocks, Sign::Plus))
    }
}

impl Default for BigInt {
    fn default() -> Self {
        Self::new()
    }
}

impl From<u64> for BigInt {
    fn from(value: u64) -> Self {
        let mut blocks = Vec::with_capacity(3);
        push_u64(&mut blocks, value);
        Self::from_blocks(blocks, Sign::Plus)
    }
}

impl From<i64> for BigInt {
    fn from(value: i64) -> Self {
        let mut n = Self::from(value.unsigned_abs());
        if value < 0 {
            n.negate();
        }
        n
    }
}

impl Neg for BigInt {
    type Output = BigInt;

    fn neg(mut self) -> BigInt {
        self.negate();
        self
    }
}

impl Neg for &BigInt {
    type Output = BigInt;

    fn neg(self) -> BigInt {
        -self.clone()
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.sign, other.sign) {
            (Sign::Plus, Sign::Minus) => Ordering::Greater,
            (Sign::Minus, Sign::Plus) => Ordering::Less,
            (Sign::Plus, Sign::Plus) => self.cmp_magnitude(other),
            (Sign::Minus, Sign::Minus) => other.cmp_magnitude(self),
        }
    }
}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for BigInt {
    type Err = Error;

    /// An optional `+` or `-` followed by one or more decimal digits.
    fn from_str(text: &str) -> Result<Self> {
        let (sign, digits) = match text.as_bytes().first() {
            Some(b'-') => (Sign::Minus, &text[1..]),
            Some(b'+') => (Sign::Plus, &text[1..]),
            _ => (Sign::Plus, text),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidDecimal {
                input: text.to_owned(),
            });
        }

        let mut blocks = with_room(digits.len().div_ceil(BLOCK_DIGITS))?;
        for chunk in digits.as_bytes().rchunks(BLOCK_DIGITS) {
            let block = chunk
                .iter()
                .fold(0, |acc, &digit| acc * 10 + u32::from(digit - b'0'));
            blocks.push(block);
        }
        Ok(Self::from_blocks(blocks, sign))
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-")?;
        }
        let mut blocks = self.blocks.iter().rev();
        if let Some(top) = blocks.next() {
            write!(f, "{top}")?;
        }
        for block in blocks {
            write!(f, "{block:09}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::test_utils::any_bigint;
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_is_canonical() {
        let zero = BigInt::new();
        assert!(zero.is_zero());
        assert_eq!(zero.len(), 1);
        assert_eq!(zero.sign(), Sign::Plus);
        assert_eq!(zero, BigInt::with_capacity(16).unwrap());
        assert_eq!(zero, "-0".parse::<BigInt>().unwrap());
        assert_eq!(zero.to_string(), "0");
    }

    #[test]
    fn capacity_grows_by_doubling() {
        let mut n = BigInt::with_capacity(4).unwrap();
        assert!(n.capacity() >= 4);
        n.ensure_capacity(5).unwrap();
        assert!(n.capacity() >= 8);
        n.ensure_capacity(100).unwrap();
        assert!(n.capacity() >= 100);
    }

    #[test]
    fn copy_never_shrinks_the_destination() {
        let mut dest = BigInt::with_capacity(64).unwrap();
        let src = BigInt::from(-12_345_678_901_234i64);
        dest.copy_from(&src).unwrap();
        assert_eq!(dest, src);
        assert!(dest.capacity() >= 64);
    }

    #[test]
    fn set_from_integers() {
        let mut n = BigInt::new();
        n.set_i64(-1_234_567_890_123).unwrap();
        assert_eq!(n.to_string(), "-1234567890123");
        assert_eq!(n.blocks(), &[567_890_123, 1_234]);

        n.set_i64(0).unwrap();
        assert!(n.is_zero());

        assert_eq!(BigInt::from(i64::MIN).to_string(), "-9223372036854775808");
        assert_eq!(BigInt::from(u64::MAX).to_string(), "18446744073709551615");
    }

    #[test]
    fn parse_decimal() {
        let n: BigInt = "1000000000000000001".parse().unwrap();
        assert_eq!(n.blocks(), &[1, 0, 1]);
        assert_eq!(n.to_string(), "1000000000000000001");

        assert_eq!("-000123".parse::<BigInt>().unwrap().to_string(), "-123");
        assert_eq!("+42".parse::<BigInt>().unwrap(), BigInt::from(42i64));

        let mut n = BigInt::new();
        n.set_from_decimal_str("987654321987654321").unwrap();
        assert_eq!(n.blocks(), &[987_654_321, 987_654_321]);
    }

    #[test]
    fn parse_rejects_garbage() {
        for text in ["", "-", "+", "12a", " 1", "1 ", "--1", "1_000"] {
            assert_eq!(
                text.parse::<BigInt>(),
                Err(Error::InvalidDecimal {
                    input: text.to_owned()
                }),
                "{text:?}"
            );
        }
    }

    #[test]
    fn ordering() {
        let values: Vec<BigInt> = ["-1000000000000", "-5", "-3", "0", "3", "999999999", "1000000000"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        for (i, a) in values.iter().enumerate() {
            for (j, b) in values.iter().enumerate() {
                assert_eq!(a.cmp(b), i.cmp(&j), "{a} vs {b}");
            }
        }
        assert_eq!(
            BigInt::from(-7i64).cmp_magnitude(&BigInt::from(7i64)),
            Ordering::Equal
        );
    }

    #[test]
    fn block_shift_and_powers_of_ten() {
        let mut n = BigInt::from(7i64);
        n.shift_blocks(2).unwrap();
        assert_eq!(n.to_string(), format!("7{}", "0".repeat(18)));

        let mut zero = BigInt::new();
        zero.shift_blocks(3).unwrap();
        assert!(zero.is_zero());

        let scaled = BigInt::from(10005i64).mul_pow10(11).unwrap();
        assert_eq!(scaled.to_string(), format!("10005{}", "0".repeat(11)));

        assert_eq!(BigInt::pow10(0).unwrap(), BigInt::from(1i64));
        assert_eq!(BigInt::pow10(9).unwrap().blocks(), &[0, 1]);
        assert_eq!(BigInt::pow10(20).unwrap().to_string(), format!("1{}", "0".repeat(20)));
    }

    #[test]
    fn negation() {
        let n = BigInt::from(5i64);
        assert_eq!(-&n, BigInt::from(-5i64));
        assert_eq!(n, BigInt::from(5i64));
        assert_eq!(-BigInt::new(), BigInt::new());
        assert_eq!(BigInt::from(-5i64).abs(), n);
    }

    #[test]
    fn small_values_convert_back() {
        for value in [0, 1, -1, 999_999_999, 1_000_000_000, i64::MAX, i64::MIN] {
            assert_eq!(BigInt::from(value).to_i64(), Some(value));
        }
        assert_eq!("9223372036854775808".parse::<BigInt>().unwrap().to_i64(), None);
    }

    proptest! {
        #[test]
        fn decimal_round_trip(a in any_bigint(0..12)) {
            let text = a.to_string();
            let parsed: BigInt = text.parse().unwrap();
            prop_assert_eq!(parsed.to_string(), text);
            prop_assert_eq!(parsed, a);
        }

        #[test]
        fn compare_is_antisymmetric(a in any_bigint(0..6), b in any_bigint(0..6)) {
            prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
            prop_assert_eq!(a.cmp(&a), Ordering::Equal);
        }
    }
}
