use std::ops::Range;

use proptest::prelude::*;

use super::{BigInt, Sign, BASE};

fn sign(negative: bool) -> Sign {
    if negative {
        Sign::Minus
    } else {
        Sign::Plus
    }
}

/// Random signed values of up to `blocks.end - 1` blocks, zero included.
pub(crate) fn any_bigint(blocks: Range<usize>) -> impl Strategy<Value = BigInt> {
    (proptest::collection::vec(0..BASE, blocks), any::<bool>())
        .prop_map(|(blocks, negative)| BigInt::from_blocks(blocks, sign(negative)))
}

/// Random non-negative values of up to `blocks.end - 1` blocks.
pub(crate) fn any_magnitude(blocks: Range<usize>) -> impl Strategy<Value = BigInt> {
    proptest::collection::vec(0..BASE, blocks)
        .prop_map(|blocks| BigInt::from_blocks(blocks, Sign::Plus))
}

/// Random non-zero values of exactly `len` significant blocks.
pub(crate) fn exact_blocks(len: usize) -> impl Strategy<Value = BigInt> {
    (
        proptest::collection::vec(0..BASE, len - 1),
        1..BASE,
        any::<bool>(),
    )
        .prop_map(|(mut blocks, top, negative)| {
            blocks.push(top);
            BigInt::from_blocks(blocks, sign(negative))
        })
}

pub(crate) fn to_rug(n: &BigInt) -> rug::Integer {
    n.to_string().parse().unwrap()
}
