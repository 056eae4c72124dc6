use std::cmp::Ordering;

use super::{cmp_blocks, significant, zeroed, BigInt, Sign, BASE};
use crate::error::Result;

/// `a + b` over magnitudes. The result has one spare block for the final carry.
pub(crate) fn add_blocks(a: &[u32], b: &[u32]) -> Result<Vec<u32>> {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut sum = zeroed(long.len() + 1)?;
    let mut carry = 0;
    for (i, &block) in long.iter().enumerate() {
        let s = block + short.get(i).copied().unwrap_or(0) + carry;
        carry = u32::from(s >= BASE);
        sum[i] = s - carry * BASE;
    }
    sum[long.len()] = carry;
    Ok(sum)
}

/// `a - b` over magnitudes, for `a >= b`.
pub(crate) fn sub_blocks(a: &[u32], b: &[u32]) -> Result<Vec<u32>> {
    let mut diff = zeroed(a.len())?;
    diff.copy_from_slice(a);
    sub_assign_blocks(&mut diff, b);
    Ok(diff)
}

/// `acc -= b` in place, for `acc >= b`.
pub(crate) fn sub_assign_blocks(acc: &mut [u32], b: &[u32]) {
    debug_assert_ne!(cmp_blocks(acc, b), Ordering::Less);
    let b = significant(b);
    let mut borrow = 0;
    for (i, slot) in acc.iter_mut().enumerate() {
        if i >= b.len() && borrow == 0 {
            break;
        }
        let sub = b.get(i).copied().unwrap_or(0) + borrow;
        borrow = u32::from(*slot < sub);
        *slot = *slot + borrow * BASE - sub;
    }
    debug_assert_eq!(borrow, 0);
}

/// `acc += value * BASE^offset` in place, returning the carry out of the top
/// of `acc`. `value` must fit below the top of `acc` once trimmed.
pub(crate) fn add_assign_at(acc: &mut [u32], value: &[u32], offset: usize) -> u32 {
    let value = significant(value);
    let mut carry = 0;
    let mut i = offset;
    for &block in value {
        let s = acc[i] + block + carry;
        carry = u32::from(s >= BASE);
        acc[i] = s - carry * BASE;
        i += 1;
    }
    while carry != 0 && i < acc.len() {
        let s = acc[i] + carry;
        carry = u32::from(s >= BASE);
        acc[i] = s - carry * BASE;
        i += 1;
    }
    carry
}

impl BigInt {
    pub fn add(&self, other: &BigInt) -> Result<BigInt> {
        self.add_signed(other, other.sign)
    }

    /// `self - other`, i.e. `self + (-other)` without touching `other`.
    pub fn sub(&self, other: &BigInt) -> Result<BigInt> {
        self.add_signed(other, other.sign.flip())
    }

    /// `|self| + |other|`.
    pub fn add_magnitudes(&self, other: &BigInt) -> Result<BigInt> {
        Ok(BigInt::from_blocks(
            add_blocks(&self.blocks, &other.blocks)?,
            Sign::Plus,
        ))
    }

    /// `||self| - |other||`.
    pub fn abs_diff(&self, other: &BigInt) -> Result<BigInt> {
        let (big, small) = match self.cmp_magnitude(other) {
            Ordering::Less => (other, self),
            _ => (self, other),
        };
        Ok(BigInt::from_blocks(
            sub_blocks(&big.blocks, &small.blocks)?,
            Sign::Plus,
        ))
    }

    fn add_signed(&self, other: &BigInt, other_sign: Sign) -> Result<BigInt> {
        if self.sign == other_sign {
            let sum = add_blocks(&self.blocks, &other.blocks)?;
            return Ok(BigInt::from_blocks(sum, self.sign));
        }
        match self.cmp_magnitude(other) {
            Ordering::Less => Ok(BigInt::from_blocks(
                sub_blocks(&other.blocks, &self.blocks)?,
                other_sign,
            )),
            _ => Ok(BigInt::from_blocks(
                sub_blocks(&self.blocks, &other.blocks)?,
                self.sign,
            )),
        }
    }
}
