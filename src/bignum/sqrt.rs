use tracing::trace;

use super::{BigInt, BLOCK_DIGITS};
use crate::error::{Error, Result};

/// Iteration ceiling for [`BigInt::sqrt`] on a radicand of `blocks` blocks.
///
/// The first iterate overshoots the root by less than a factor of `BASE`,
/// which the iteration roughly halves each step (about 30 steps), after which
/// the number of correct bits doubles each step.
pub fn newton_iteration_bound(blocks: usize) -> usize {
    let bits = blocks.max(1) * 30;
    let log2 = (usize::BITS - bits.leading_zeros()) as usize;
    40 + 2 * log2
}

impl BigInt {
    /// `floor(sqrt(self))` by Newton-Raphson, `x <- (x + n / x) / 2`.
    pub fn sqrt(&self) -> Result<BigInt> {
        self.sqrt_with_limit(newton_iteration_bound(self.len()))
    }

    pub fn sqrt_with_limit(&self, max_iterations: usize) -> Result<BigInt> {
        if self.is_negative() {
            return Err(Error::NegativeSquareRoot);
        }
        if self.is_zero() {
            return Ok(BigInt::new());
        }

        // BASE^ceil(len / 2) is above the root, so the iterates descend.
        let mut x = BigInt::pow10(self.len().div_ceil(2) * BLOCK_DIGITS)?;
        for iteration in 1..=max_iterations {
            let next = x.add(&self.div(&x)?)?.div_scalar(2)?;
            let step = next.abs_diff(&x)?;
            x = next;
            // Integer Newton may settle into a 2-cycle one apart.
            if step.len() == 1 && step.blocks()[0] <= 1 {
                trace!(iteration, blocks = self.len(), "newton converged");
                return self.settle(x);
            }
        }
        Err(Error::SqrtDidNotConverge {
            iterations: max_iterations,
        })
    }

    /// Steps a converged iterate, at most one above the root, down to the floor.
    fn settle(&self, x: BigInt) -> Result<BigInt> {
        if x.mul(&x)? > *self {
            x.sub(&BigInt::from(1i64))
        } else {
            Ok(x)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::{any_magnitude, to_rug};
    use super::*;
    use proptest::prelude::*;

    fn int(text: &str) -> BigInt {
        text.parse().unwrap()
    }

    #[test]
    fn perfect_squares() {
        assert_eq!(int("10000").sqrt().unwrap(), int("100"));
        assert_eq!(int("1").sqrt().unwrap(), int("1"));
        let root = BigInt::pow10(50).unwrap().add(&int("3")).unwrap();
        assert_eq!(root.mul(&root).unwrap().sqrt().unwrap(), root);
    }

    #[test]
    fn rounds_down() {
        assert_eq!(int("2").sqrt().unwrap(), int("1"));
        assert_eq!(int("3").sqrt().unwrap(), int("1"));
        // one below a perfect square is where the iteration oscillates
        assert_eq!(int("99").sqrt().unwrap(), int("9"));
        assert_eq!(int("999999999999999999").sqrt().unwrap(), int("999999999"));

        let root = BigInt::pow10(50).unwrap().add(&int("3")).unwrap();
        let below = root.mul(&root).unwrap().sub(&int("1")).unwrap();
        assert_eq!(below.sqrt().unwrap(), root.sub(&int("1")).unwrap());
    }

    #[test]
    fn zero_and_negative() {
        assert_eq!(BigInt::new().sqrt().unwrap(), BigInt::new());
        assert_eq!(BigInt::new().sqrt_with_limit(0).unwrap(), BigInt::new());
        assert_eq!(int("-4").sqrt(), Err(Error::NegativeSquareRoot));
    }

    #[test]
    fn iteration_ceiling() {
        let n = BigInt::pow10(1000).unwrap();
        assert_eq!(
            n.sqrt_with_limit(3),
            Err(Error::SqrtDidNotConverge { iterations: 3 })
        );
        assert_eq!(n.sqrt().unwrap(), BigInt::pow10(500).unwrap());
    }

    #[test]
    fn bound_grows_logarithmically() {
        assert_eq!(newton_iteration_bound(0), newton_iteration_bound(1));
        assert!(newton_iteration_bound(1) < newton_iteration_bound(1_000));
        assert!(newton_iteration_bound(1_000_000) < 100);
    }

    proptest! {
        #[test]
        fn floor_of_root(n in any_magnitude(0..40)) {
            let root = n.sqrt().unwrap();
            let next = root.add(&BigInt::from(1i64)).unwrap();
            prop_assert!(root.mul(&root).unwrap() <= n);
            prop_assert!(next.mul(&next).unwrap() > n);
            prop_assert_eq!(root.to_string(), to_rug(&n).sqrt().to_string());
        }
    }
}
