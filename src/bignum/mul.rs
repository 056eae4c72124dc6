//! Scalar, schoolbook and Karatsuba multiplication.
//!
//! Karatsuba splits both operands at `m` blocks, `x = x1·BASE^m + x0`, and
//! needs three half-size products instead of four:
//!
//! ```text
//! z0 = x0·y0
//! z2 = x1·y1
//! z1 = (x0 + x1)·(y0 + y1) - z0 - z2
//! x·y = z2·BASE^2m + z1·BASE^m + z0
//! ```

use super::add::{add_assign_at, add_blocks, sub_assign_blocks};
use super::{significant, zeroed, BigInt, Sign, BASE, BASE64};
use crate::error::Result;

/// Operands with at most this many blocks are multiplied by schoolbook.
pub const KARATSUBA_THRESHOLD: usize = 32;

/// `a * k` for `k <= BASE`. Two spare blocks hold the final carry.
pub(super) fn mul_block(a: &[u32], k: u32) -> Result<Vec<u32>> {
    debug_assert!(k <= BASE);
    let mut product = zeroed(a.len() + 2)?;
    let mut carry = 0u64;
    for (slot, &block) in product.iter_mut().zip(a) {
        let cur = u64::from(block) * u64::from(k) + carry;
        *slot = (cur % BASE64) as u32;
        carry = cur / BASE64;
    }
    product[a.len()] = (carry % BASE64) as u32;
    product[a.len() + 1] = (carry / BASE64) as u32;
    Ok(product)
}

pub(crate) fn schoolbook(a: &[u32], b: &[u32]) -> Result<Vec<u32>> {
    let mut product = zeroed(a.len() + b.len())?;
    for (i, &x) in a.iter().enumerate() {
        if x == 0 {
            continue;
        }
        let mut carry = 0u64;
        for (j, &y) in b.iter().enumerate() {
            let cur = u64::from(product[i + j]) + u64::from(x) * u64::from(y) + carry;
            product[i + j] = (cur % BASE64) as u32;
            carry = cur / BASE64;
        }
        product[i + b.len()] = carry as u32;
    }
    Ok(product)
}

/// Low `m` blocks and the rest.
fn split(blocks: &[u32], m: usize) -> (&[u32], &[u32]) {
    if blocks.len() <= m {
        (blocks, &[])
    } else {
        let (low, high) = blocks.split_at(m);
        (significant(low), high)
    }
}

pub(crate) fn karatsuba(a: &[u32], b: &[u32]) -> Result<Vec<u32>> {
    let (a, b) = (significant(a), significant(b));
    if a.is_empty() || b.is_empty() {
        return Ok(Vec::new());
    }
    if a.len() <= KARATSUBA_THRESHOLD || b.len() <= KARATSUBA_THRESHOLD {
        return schoolbook(a, b);
    }

    let m = a.len().max(b.len()) / 2;
    let (x0, x1) = split(a, m);
    let (y0, y1) = split(b, m);

    let z0 = karatsuba(x0, y0)?;
    let z2 = karatsuba(x1, y1)?;
    let mut z1 = karatsuba(&add_blocks(x0, x1)?, &add_blocks(y0, y1)?)?;
    sub_assign_blocks(&mut z1, &z0);
    sub_assign_blocks(&mut z1, &z2);

    let mut product = zeroed(a.len() + b.len())?;
    let mut carry = add_assign_at(&mut product, &z0, 0);
    carry += add_assign_at(&mut product, &z1, m);
    carry += add_assign_at(&mut product, &z2, 2 * m);
    debug_assert_eq!(carry, 0);
    Ok(product)
}

impl BigInt {
    /// Product of `self` and `other`, by Karatsuba above
    /// [`KARATSUBA_THRESHOLD`] blocks and schoolbook below it.
    pub fn mul(&self, other: &BigInt) -> Result<BigInt> {
        if self.is_zero() || other.is_zero() {
            return Ok(BigInt::new());
        }
        let product = karatsuba(&self.blocks, &other.blocks)?;
        Ok(BigInt::from_blocks(product, self.sign * other.sign))
    }

    pub fn mul_schoolbook(&self, other: &BigInt) -> Result<BigInt> {
        let product = schoolbook(&self.blocks, &other.blocks)?;
        Ok(BigInt::from_blocks(product, self.sign * other.sign))
    }

    /// Single-pass product with an integer. Factors larger than [`BASE`] in
    /// magnitude go through [`BigInt::mul`].
    pub fn mul_scalar(&self, k: i64) -> Result<BigInt> {
        if k == 0 || self.is_zero() {
            return Ok(BigInt::new());
        }
        match u32::try_from(k.unsigned_abs()) {
            Ok(block) if block <= BASE => Ok(BigInt::from_blocks(
                mul_block(&self.blocks, block)?,
                self.sign * Sign::of(k),
            )),
            _ => self.mul(&BigInt::from(k)),
        }
    }
}
