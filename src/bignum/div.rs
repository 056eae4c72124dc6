//! Truncating division: a single-pass scalar routine and Knuth's Algorithm D
//! (TAOCP vol. 2, 4.3.1) for multi-block divisors.

use std::cmp::Ordering;

use super::mul::mul_block;
use super::{zeroed, BigInt, Sign, BASE, BASE64};
use crate::error::{Error, Result};

const BASE_I64: i64 = BASE as i64;

/// Quotient and remainder of `a / k`, from the most significant block down.
/// `k` must not be zero.
fn div_block(a: &[u32], k: u32) -> Result<(Vec<u32>, u32)> {
    debug_assert_ne!(k, 0);
    let divisor = u64::from(k);
    let mut quotient = zeroed(a.len())?;
    let mut rem = 0u64;
    for (slot, &block) in quotient.iter_mut().zip(a).rev() {
        let cur = rem * BASE64 + u64::from(block);
        *slot = (cur / divisor) as u32;
        rem = cur % divisor;
    }
    Ok((quotient, rem as u32))
}

/// `blocks * factor`, keeping the low `len` blocks. The caller guarantees
/// nothing is lost.
fn scale(blocks: &[u32], factor: u32, len: usize) -> Result<Vec<u32>> {
    let mut scaled = mul_block(blocks, factor)?;
    debug_assert!(scaled[len..].iter().all(|&b| b == 0));
    scaled.truncate(len);
    Ok(scaled)
}

/// Algorithm D for `u >= v` where `v` has at least two significant blocks.
fn knuth_div_rem(u: &[u32], v: &[u32]) -> Result<(Vec<u32>, Vec<u32>)> {
    let n = v.len();
    let m = u.len() - n;
    debug_assert!(n >= 2 && v[n - 1] != 0);

    // D1: scale so the divisor's top block is at least BASE / 2.
    let d = BASE / (v[n - 1] + 1);
    let mut un = scale(u, d, u.len() + 1)?;
    let vn = scale(v, d, n)?;
    let v_top = u64::from(vn[n - 1]);
    let v_next = u64::from(vn[n - 2]);

    let mut quotient = zeroed(m + 1)?;
    for j in (0..=m).rev() {
        // D3: estimate from the top two blocks, then refine against the
        // divisor's second block. At most two decrements are ever needed.
        let top = u64::from(un[j + n]) * BASE64 + u64::from(un[j + n - 1]);
        let mut q_hat = top / v_top;
        let mut r_hat = top % v_top;
        for _ in 0..2 {
            if q_hat >= BASE64 || q_hat * v_next > r_hat * BASE64 + u64::from(un[j + n - 2]) {
                q_hat -= 1;
                r_hat += v_top;
                if r_hat < BASE64 {
                    continue;
                }
            }
            break;
        }

        // D4: un[j..=j + n] -= q_hat * vn
        let mut carry = 0u64;
        let mut borrow = 0i64;
        for (slot, &block) in un[j..j + n].iter_mut().zip(&vn) {
            let p = q_hat * u64::from(block) + carry;
            carry = p / BASE64;
            let t = i64::from(*slot) - (p % BASE64) as i64 - borrow;
            borrow = i64::from(t < 0);
            *slot = (t + borrow * BASE_I64) as u32;
        }
        let t = i64::from(un[j + n]) - carry as i64 - borrow;

        if t < 0 {
            // D6: q_hat was one too large; add the divisor back once.
            un[j + n] = (t + BASE_I64) as u32;
            q_hat -= 1;
            let mut carry = 0;
            for (slot, &block) in un[j..j + n].iter_mut().zip(&vn) {
                let s = *slot + block + carry;
                carry = u32::from(s >= BASE);
                *slot = s - carry * BASE;
            }
            un[j + n] = (un[j + n] + carry) % BASE;
        } else {
            un[j + n] = t as u32;
        }
        quotient[j] = q_hat as u32;
    }

    // D8: the remainder is the low n blocks, unscaled.
    let (remainder, _) = div_block(&un[..n], d)?;
    Ok((quotient, remainder))
}

impl BigInt {
    /// Quotient truncated toward zero.
    pub fn div(&self, divisor: &BigInt) -> Result<BigInt> {
        Ok(self.div_rem(divisor)?.0)
    }

    /// Quotient truncated toward zero and the remainder, which takes the
    /// sign of `self`.
    pub fn div_rem(&self, divisor: &BigInt) -> Result<(BigInt, BigInt)> {
        if divisor.is_zero() {
            return Err(Error::DivisionByZero);
        }
        let quotient_sign = self.sign * divisor.sign;
        match self.cmp_magnitude(divisor) {
            Ordering::Less => {
                let mut remainder = BigInt::new();
                remainder.copy_from(self)?;
                return Ok((BigInt::new(), remainder));
            }
            Ordering::Equal => {
                return Ok((BigInt::from_blocks(vec![1], quotient_sign), BigInt::new()));
            }
            Ordering::Greater => {}
        }

        let (quotient, remainder) = if divisor.blocks.len() == 1 {
            let (quotient, rem) = div_block(&self.blocks, divisor.blocks[0])?;
            (quotient, vec![rem])
        } else {
            knuth_div_rem(&self.blocks, &divisor.blocks)?
        };
        Ok((
            BigInt::from_blocks(quotient, quotient_sign),
            BigInt::from_blocks(remainder, self.sign),
        ))
    }

    pub fn div_scalar(&self, divisor: i64) -> Result<BigInt> {
        Ok(self.div_rem_scalar(divisor)?.0)
    }

    /// Single-pass division by an integer. Divisors larger than [`BASE`] in
    /// magnitude go through [`BigInt::div_rem`].
    pub fn div_rem_scalar(&self, divisor: i64) -> Result<(BigInt, i64)> {
        if divisor == 0 {
            return Err(Error::DivisionByZero);
        }
        match u32::try_from(divisor.unsigned_abs()) {
            Ok(k) if k <= BASE => {
                let (quotient, rem) = div_block(&self.blocks, k)?;
                let rem = match self.sign {
                    Sign::Plus => i64::from(rem),
                    Sign::Minus => -i64::from(rem),
                };
                Ok((
                    BigInt::from_blocks(quotient, self.sign * Sign::of(divisor)),
                    rem,
                ))
            }
            _ => {
                let (quotient, rem) = self.div_rem(&BigInt::from(divisor))?;
                // |rem| < |divisor|, so it fits.
                Ok((quotient, rem.to_i64().unwrap_or_default()))
            }
        }
    }
}
