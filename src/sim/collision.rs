//! Basket/object overlap test
//!
//! The vertical check is one-sided: an object counts as caught as soon as its
//! bottom edge reaches the basket's top edge, no matter how far past it the
//! object has travelled.

use super::state::{Basket, FallingObject};

/// Check whether a falling object is caught by the basket
///
/// All comparisons are inclusive, so touching edges count as a catch.
#[inline]
pub fn overlaps(basket: &Basket, object: &FallingObject) -> bool {
    object.pos.y + object.size >= basket.pos.y
        && object.pos.x + object.size >= basket.pos.x
        && object.pos.x <= basket.pos.x + basket.width
}
