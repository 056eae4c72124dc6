use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("failed to allocate a buffer of {blocks} blocks")]
    Allocation { blocks: usize },

    #[error("division by zero")]
    DivisionByZero,

    #[error("square root of a negative number")]
    NegativeSquareRoot,

    /// Newton-Raphson ran out of iterations before two iterates agreed.
    #[error("square root did not converge within {iterations} iterations")]
    SqrtDidNotConverge { iterations: usize },

    #[error("invalid decimal integer {input:?}")]
    InvalidDecimal { input: String },
}
