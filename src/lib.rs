//! Arbitrary-precision integers in base 10^9 and a Chudnovsky pi calculator
//! built on top of them.

pub mod bignum;
pub mod chudnovsky;
mod error;
mod pi;

pub use bignum::{BigInt, Sign, BASE, BLOCK_DIGITS};
pub use error::{Error, Result};
pub use pi::{compute_pi, compute_pi_with_progress, term_count, Stage, DIGITS_PER_TERM, GUARD_DIGITS};
