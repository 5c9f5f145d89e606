//! Resolution of strided slicing intervals over the dimensions of N-dimensional arrays.
//!
//! An [`Interval`][`interval::Interval`] declares an inclusive or exclusive end and a stride.
//! Resolving it against the size of a dimension normalizes negative (end-relative) bounds and
//! derives the number of selected positions, producing the offset, end, length, and stride
//! needed to build a view without copying data.
//!
//! ```
//! use ndinterval::prelude::*;
//!
//! let shape = [4usize, 10];
//! let interval = Interval::new(false, 3).unwrap();
//! let resolved = interval.resolve_to_end(&shape, -8, 1).unwrap();
//! assert_eq!((resolved.offset(), resolved.end(), resolved.len()), (2, 10, 3));
//! ```
//!
//! The [`index`] module exposes the same resolution through the [`NdIndex`][`index::NdIndex`]
//! contract shared by all kinds of per-dimension indices.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(
    clippy::cast_lossless,
    clippy::checked_conversions,
    clippy::cloned_instead_of_copied,
    clippy::explicit_into_iter_loop,
    clippy::filter_map_next,
    clippy::flat_map_option,
    clippy::from_iter_instead_of_collect,
    clippy::if_not_else,
    clippy::manual_ok_or,
    clippy::map_unwrap_or,
    clippy::match_same_arms,
    clippy::redundant_closure_for_method_calls,
    clippy::redundant_else,
    clippy::unreadable_literal,
    clippy::unused_self
)]
#![no_std]

extern crate alloc;
#[cfg(test)]
extern crate std;

mod serde;

pub mod error;
pub mod index;
pub mod interval;

pub mod prelude {
    pub use crate::error::{IntervalError, StrideError};
    pub use crate::index::{IndexKind, IntervalIndex, NdIndex};
    pub use crate::interval::{Deferred, Interval, Resolved};
    pub use crate::Shaped;
}

use alloc::vec::Vec;

/// An array with a known shape.
///
/// Resolution only reads the size of one dimension. The whole shape is reported in errors.
pub trait Shaped {
    fn shape(&self) -> &[usize];

    /// Gets the size of `dimension` or `None` if the array has no such dimension.
    ///
    /// # Panics
    ///
    /// Panics if the size cannot be represented as an `i64`.
    fn size(&self, dimension: usize) -> Option<i64> {
        self.shape().get(dimension).map(|&size| {
            i64::try_from(size).unwrap_or_else(|_| self::panic_size_overflow())
        })
    }
}

impl Shaped for [usize] {
    fn shape(&self) -> &[usize] {
        self
    }
}

impl<const N: usize> Shaped for [usize; N] {
    fn shape(&self) -> &[usize] {
        self
    }
}

impl Shaped for Vec<usize> {
    fn shape(&self) -> &[usize] {
        self
    }
}

#[cold]
const fn panic_size_overflow() -> ! {
    panic!("overflow in dimension size")
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use rstest::rstest;

    use crate::Shaped;

    #[rstest]
    #[case::first(0, Some(2))]
    #[case::last(2, Some(7))]
    #[case::out_of_rank(3, None)]
    fn size_of_dimension_then_eq(#[case] dimension: usize, #[case] expected: Option<i64>) {
        let shape = vec![2usize, 4, 7];
        assert_eq!(shape.size(dimension), expected);
        assert_eq!(shape.as_slice().size(dimension), expected);
    }

    #[test]
    fn empty_shape_then_no_dimensions() {
        let shape: [usize; 0] = [];
        assert_eq!(shape.size(0), None);
    }
}
