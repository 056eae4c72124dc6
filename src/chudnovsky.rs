//! Binary splitting of the Chudnovsky series
//!
//! ```text
//!                 426880 * sqrt(10005) * Q(0, n)
//!         pi = -----------------------------------
//!                          T(0, n)
//! ```
//!
//! where for a single term `a > 0`
//!
//! ```text
//!   P(a, a+1) = -(6a - 5)(2a - 1)(6a - 1)
//!   Q(a, a+1) = a^3 * C^3 / 24
//!   T(a, a+1) = P(a, a+1) * (A + B*a)
//! ```
//!
//! and `P = Q = 1, T = A` for `a = 0`. Adjacent ranges merge as
//!
//! ```text
//!   P(a, b) = P(a, m) * P(m, b)
//!   Q(a, b) = Q(a, m) * Q(m, b)
//!   T(a, b) = T(a, m) * Q(m, b) + P(a, m) * T(m, b)
//! ```

use tracing::instrument;

use crate::bignum::BigInt;
use crate::error::Result;

const A: i64 = 13591409;
const B: i64 = 545140134;
/// C^3 / 24 for C = 640320.
const C3_OVER_24: u64 = 10939058860032000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Terms {
    pub p: BigInt,
    pub q: BigInt,
    pub t: BigInt,
}

impl Terms {
    /// Merging with this on either side changes nothing.
    fn identity() -> Self {
        Self {
            p: BigInt::from(1i64),
            q: BigInt::from(1i64),
            t: BigInt::new(),
        }
    }

    /// The closed form for the single term `a`.
    pub fn single(a: usize) -> Result<Self> {
        if a == 0 {
            return Ok(Self {
                p: BigInt::from(1i64),
                q: BigInt::from(1i64),
                t: BigInt::from(A),
            });
        }

        let k = a as i64;
        let mut p = BigInt::from(6 * k - 5)
            .mul_scalar(2 * k - 1)?
            .mul_scalar(6 * k - 1)?;
        p.negate();

        let q = BigInt::from(k)
            .mul_scalar(k)?
            .mul_scalar(k)?
            .mul(&BigInt::from(C3_OVER_24))?;

        let linear = BigInt::from(B).mul_scalar(k)?.add(&BigInt::from(A))?;
        let t = p.mul(&linear)?;

        Ok(Self { p, q, t })
    }

    /// Combines `[a, m)` (self) with `[m, b)` (right) into `[a, b)`.
    pub fn merge(&self, right: &Terms) -> Result<Terms> {
        Ok(Terms {
            p: self.p.mul(&right.p)?,
            q: self.q.mul(&right.q)?,
            t: self.t.mul(&right.q)?.add(&self.p.mul(&right.t)?)?,
        })
    }
}

/// P, Q and T over the terms `from..to`. An empty range gives the identity.
pub fn binary_split(from: usize, to: usize) -> Result<Terms> {
    if to <= from {
        return Ok(Terms::identity());
    }
    Splitter::new(split_depth(to - from)).binary_split(from, to)
}

/// Slots needed for a range of `terms` terms: one per level of recursion.
fn split_depth(terms: usize) -> usize {
    let mut depth = 0;
    while 1 << depth < terms {
        depth += 1;
    }
    depth + 1
}

/// Recursion scratch space: slot `top` holds the terms of the range being
/// built at that depth, so each level reuses buffers instead of allocating.
struct Splitter {
    p_stack: Vec<BigInt>,
    q_stack: Vec<BigInt>,
    t_stack: Vec<BigInt>,
}

impl Splitter {
    fn new(depth: usize) -> Self {
        Self {
            p_stack: vec![BigInt::new(); depth],
            q_stack: vec![BigInt::new(); depth],
            t_stack: vec![BigInt::new(); depth],
        }
    }

    fn binary_split(mut self, from: usize, to: usize) -> Result<Terms> {
        self.split(from, to, 0)?;
        let p = self.p_stack.swap_remove(0);
        let q = self.q_stack.swap_remove(0);
        let t = self.t_stack.swap_remove(0);

        Ok(Terms { p, q, t })
    }

    #[instrument(level = "trace", skip(self))]
    fn split(&mut self, a: usize, b: usize, top: usize) -> Result<()> {
        if b - a == 1 {
            let Terms { p, q, t } = Terms::single(a)?;
            self.p_stack[top] = p;
            self.q_stack[top] = q;
            self.t_stack[top] = t;
            return Ok(());
        }

        let m = a + (b - a) / 2;
        self.split(a, m, top)?;
        self.split(m, b, top + 1)?;

        #[rustfmt::skip]
        let [p_am, p_mb] = &mut self.p_stack[top..=top+1] else { unreachable!() };
        #[rustfmt::skip]
        let [q_am, q_mb] = &mut self.q_stack[top..=top+1] else { unreachable!() };
        #[rustfmt::skip]
        let [t_am, t_mb] = &mut self.t_stack[top..=top+1] else { unreachable!() };

        // T first: it needs P(a, m) before that is overwritten.
        *t_am = t_am.mul(q_mb)?.add(&p_am.mul(t_mb)?)?;
        *p_am = p_am.mul(p_mb)?;
        *q_am = q_am.mul(q_mb)?;

        // The right half is merged; drop its buffers.
        *p_mb = BigInt::new();
        *q_mb = BigInt::new();
        *t_mb = BigInt::new();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(text: &str) -> BigInt {
        text.parse().unwrap()
    }

    #[test]
    fn first_terms() {
        let zero = Terms::single(0).unwrap();
        assert_eq!((zero.p, zero.q, zero.t), (int("1"), int("1"), int("13591409")));

        let one = Terms::single(1).unwrap();
        assert_eq!(one.p, int("-5"));
        assert_eq!(one.q, int("10939058860032000"));
        assert_eq!(one.t, int("-2793657715"));

        // -(7)(3)(11), 8 * C^3 / 24
        let two = Terms::single(2).unwrap();
        assert_eq!(two.p, int("-231"));
        assert_eq!(two.q, int("87512470880256000"));
    }

    #[test]
    fn single_term_range() {
        assert_eq!(binary_split(0, 1).unwrap(), Terms::single(0).unwrap());
        assert_eq!(binary_split(5, 6).unwrap(), Terms::single(5).unwrap());
    }

    #[test]
    fn empty_range_is_identity() {
        let identity = binary_split(3, 3).unwrap();
        assert_eq!(identity.t, BigInt::new());
        let terms = Terms::single(4).unwrap();
        assert_eq!(terms.merge(&identity).unwrap(), terms);
        assert_eq!(identity.merge(&terms).unwrap(), terms);
    }

    #[test]
    fn splitting_matches_a_left_fold() {
        for n in 1..40 {
            let folded = (1..n).fold(Terms::single(0).unwrap(), |acc, k| {
                acc.merge(&Terms::single(k).unwrap()).unwrap()
            });
            assert_eq!(binary_split(0, n).unwrap(), folded, "{n} terms");
        }
    }

    #[test]
    fn offset_ranges() {
        let whole = binary_split(0, 23).unwrap();
        let left = binary_split(0, 9).unwrap();
        let right = binary_split(9, 23).unwrap();
        assert_eq!(left.merge(&right).unwrap(), whole);
    }

    #[test]
    fn depth_covers_the_recursion() {
        assert_eq!(split_depth(1), 1);
        assert_eq!(split_depth(2), 2);
        assert_eq!(split_depth(3), 3);
        assert_eq!(split_depth(8), 4);
        assert_eq!(split_depth(9), 5);
    }
}
