//! Strided intervals along one dimension of an N-dimensional array.
//!
//! An [`Interval`] declares whether its end is inclusive and the stride between selected
//! positions. Resolving it against a dimension yields a [`Resolved`] interval, which is the only
//! form from which a view can be constructed. Bounds may be negative, in which case they count
//! from the end of the dimension. When a negative bound cannot be normalized because no size is
//! known yet, resolution yields a [`Deferred`] interval that can be retried once a size is
//! available.
//!
//! ```
//! use ndinterval::interval::Interval;
//!
//! let resolved = Interval::EXCLUSIVE.resolve_with_max(-3, -1, 10).unwrap();
//! assert_eq!((resolved.offset(), resolved.end(), resolved.len()), (7, 9, 2));
//! ```

#[cfg(feature = "arbitrary")]
use arbitrary::{Arbitrary, Unstructured};
#[cfg(feature = "serde")]
use ::serde_derive::{Deserialize, Serialize};
use core::error::Error;
use core::fmt::{self, Display, Formatter};
use core::hash::{Hash, Hasher};
use core::mem;

use crate::error::{IntervalError, StrideError};
#[cfg(feature = "serde")]
use crate::serde::{SerdeInterval, SerdeResolved};
use crate::Shaped;

#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "SerdeInterval", into = "SerdeInterval")
)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Interval {
    inclusive: bool,
    stride: i64,
}

impl Interval {
    pub const EXCLUSIVE: Self = Interval::unchecked(false, 1);
    pub const INCLUSIVE: Self = Interval::unchecked(true, 1);

    pub(crate) const fn unchecked(inclusive: bool, stride: i64) -> Self {
        Interval { inclusive, stride }
    }

    pub const fn new(inclusive: bool, stride: i64) -> Result<Self, StrideError> {
        if stride >= 1 {
            Ok(Interval::unchecked(inclusive, stride))
        }
        else {
            Err(StrideError(stride))
        }
    }

    pub const fn with_stride(self, stride: i64) -> Result<Self, StrideError> {
        Interval::new(self.inclusive, stride)
    }

    /// Resolves from `begin` to the end of `dimension` in `array`.
    ///
    /// A negative `begin` counts from the end of the dimension. The inclusive end of the
    /// resolved interval must lie strictly within the dimension, so this always fails for
    /// inclusive intervals.
    ///
    /// # Errors
    ///
    /// Returns [`IntervalError::Dimension`] if `dimension` is not in the shape of `array` and
    /// [`IntervalError::Invalid`] if the interval does not fit within the dimension.
    ///
    /// # Panics
    ///
    /// Panics if the size of the dimension cannot be represented as an `i64` or if the end of
    /// an inclusive interval overflows.
    pub fn resolve_to_end<A>(
        self,
        array: &A,
        begin: i64,
        dimension: usize,
    ) -> Result<Resolved, IntervalError>
    where
        A: Shaped + ?Sized,
    {
        let size = array
            .size(dimension)
            .ok_or_else(|| IntervalError::Dimension {
                dimension,
                shape: array.shape().to_vec(),
            })?;
        let begin = self::normalize(begin, size);
        let end = if self.inclusive {
            size.checked_add(1)
                .unwrap_or_else(|| self::panic_bound_overflow())
        }
        else {
            size
        };
        let end_inclusive = self.end_inclusive(size);
        let resolved = Resolved::unchecked(
            self,
            begin,
            end,
            begin,
            self::count(begin, end_inclusive, self.stride),
        );
        if begin >= 0 && end_inclusive < size {
            tracing::trace!(%resolved, dimension, size, "resolved interval to end of dimension");
            Ok(resolved)
        }
        else {
            Err(IntervalError::Invalid {
                interval: resolved,
                shape: array.shape().to_vec(),
            })
        }
    }

    /// Resolves over the whole of `dimension` in `array`.
    ///
    /// # Errors
    ///
    /// See [`Interval::resolve_to_end`].
    pub fn resolve_all<A>(self, array: &A, dimension: usize) -> Result<Resolved, IntervalError>
    where
        A: Shaped + ?Sized,
    {
        self.resolve_to_end(array, 0, dimension)
    }

    /// Resolves `begin` and `end` against a dimension of size `max`.
    ///
    /// Negative bounds are normalized independently. `end` is not checked against `max`.
    ///
    /// # Errors
    ///
    /// Returns [`Deferred`] if a bound remains negative after normalization.
    ///
    /// # Panics
    ///
    /// Panics if normalizing a bound overflows or if the length overflows. See
    /// [`Interval::resolve`].
    pub fn resolve_with_max(self, begin: i64, end: i64, max: i64) -> Result<Resolved, Deferred> {
        self.resolve(self::normalize(begin, max), self::normalize(end, max))
    }

    /// Resolves `begin` and `end` without a dimension size.
    ///
    /// # Errors
    ///
    /// Returns [`Deferred`] if either bound is negative, because such a bound cannot be
    /// normalized until the size of the dimension is known.
    ///
    /// # Panics
    ///
    /// Panics if the length overflows an `i64`, such as an inclusive interval from `0` to
    /// `i64::MAX`.
    pub fn resolve(self, begin: i64, end: i64) -> Result<Resolved, Deferred> {
        if begin < 0 || end < 0 {
            tracing::debug!(
                begin,
                end,
                "deferring interval resolution until the size of the dimension is known"
            );
            Err(Deferred {
                interval: self,
                begin,
                end,
            })
        }
        else {
            let resolved = Resolved::new(self, begin, end);
            tracing::trace!(%resolved, "resolved interval");
            Ok(resolved)
        }
    }

    pub(crate) fn end_inclusive(&self, end: i64) -> i64 {
        if self.inclusive {
            end
        }
        else {
            end.checked_sub(1)
                .unwrap_or_else(|| self::panic_bound_overflow())
        }
    }

    pub const fn is_inclusive(&self) -> bool {
        self.inclusive
    }

    pub const fn stride(&self) -> i64 {
        self.stride
    }
}

#[cfg(feature = "arbitrary")]
#[cfg_attr(docsrs, doc(cfg(feature = "arbitrary")))]
impl<'a> Arbitrary<'a> for Interval {
    fn arbitrary(unstructured: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let inclusive = bool::arbitrary(unstructured)?;
        let stride = unstructured.int_in_range(1..=i64::from(u32::MAX))?;
        Ok(Interval::unchecked(inclusive, stride))
    }

    fn size_hint(depth: usize) -> (usize, Option<usize>) {
        arbitrary::size_hint::and(bool::size_hint(depth), u32::size_hint(depth))
    }
}

impl Default for Interval {
    fn default() -> Self {
        Interval::EXCLUSIVE
    }
}

/// An interval with bounds that are known to be non-negative.
///
/// `len` is derived when the interval is resolved. It is not recomputed by
/// [`reverse`][`Resolved::reverse`] and does not participate in comparisons nor hashing.
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "SerdeResolved", into = "SerdeResolved")
)]
#[derive(Clone, Copy, Debug)]
pub struct Resolved {
    interval: Interval,
    begin: i64,
    end: i64,
    cursor: i64,
    len: i64,
}

impl Resolved {
    pub(crate) const fn unchecked(
        interval: Interval,
        begin: i64,
        end: i64,
        cursor: i64,
        len: i64,
    ) -> Self {
        Resolved {
            interval,
            begin,
            end,
            cursor,
            len,
        }
    }

    pub(crate) fn new(interval: Interval, begin: i64, end: i64) -> Self {
        let len = self::count(begin, interval.end_inclusive(end), interval.stride);
        Resolved::unchecked(interval, begin, end, begin, len)
    }

    /// Swaps the bounds of the interval.
    ///
    /// This reverses the direction of traversal only. The length, cursor, and stride are left
    /// as they are.
    pub fn reverse(&mut self) {
        mem::swap(&mut self.begin, &mut self.end);
    }

    pub fn reversed(mut self) -> Self {
        self.reverse();
        self
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn offset(&self) -> i64 {
        self.begin
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    pub fn bounds(&self) -> (i64, i64) {
        (self.begin, self.end)
    }

    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    pub fn len(&self) -> i64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn stride(&self) -> i64 {
        self.interval.stride
    }

    pub fn is_inclusive(&self) -> bool {
        self.interval.inclusive
    }
}

impl Display for Resolved {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        self::fmt_interval(formatter, self.interval, self.begin, self.end)
    }
}

impl Eq for Resolved {}

impl Hash for Resolved {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self::hash_interval(state, self.interval, self.begin, self.end, self.cursor);
    }
}

impl PartialEq for Resolved {
    fn eq(&self, other: &Self) -> bool {
        self.interval == other.interval
            && self.begin == other.begin
            && self.end == other.end
            && self.cursor == other.cursor
    }
}

/// An interval that could not be resolved, because a bound is negative and no size is known.
///
/// Retry with [`resolve_with_max`][`Deferred::resolve_with_max`] once the size of the dimension
/// is available.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Deferred {
    interval: Interval,
    begin: i64,
    end: i64,
}

impl Deferred {
    /// # Errors
    ///
    /// Returns another [`Deferred`] if a bound remains negative after normalizing against
    /// `max`.
    pub fn resolve_with_max(self, max: i64) -> Result<Resolved, Deferred> {
        self.interval.resolve_with_max(self.begin, self.end, max)
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn bounds(&self) -> (i64, i64) {
        (self.begin, self.end)
    }
}

impl Display for Deferred {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "unresolved ")?;
        self::fmt_interval(formatter, self.interval, self.begin, self.end)?;
        write!(formatter, ": negative bounds require the size of the dimension")
    }
}

impl Error for Deferred {}

pub(crate) fn normalize(bound: i64, size: i64) -> i64 {
    if bound < 0 {
        bound
            .checked_add(size)
            .unwrap_or_else(|| self::panic_bound_overflow())
    }
    else {
        bound
    }
}

// The count is clamped to zero when `begin` lies past `end_inclusive`, such as for an empty
// exclusive interval or bounds given in descending order.
pub(crate) fn count(begin: i64, end_inclusive: i64, stride: i64) -> i64 {
    let span = end_inclusive
        .checked_sub(begin)
        .unwrap_or_else(|| self::panic_len_overflow());
    span.div_euclid(stride)
        .checked_add(1)
        .unwrap_or_else(|| self::panic_len_overflow())
        .max(0)
}

pub(crate) fn fmt_interval(
    formatter: &mut Formatter<'_>,
    interval: Interval,
    begin: i64,
    end: i64,
) -> fmt::Result {
    write!(
        formatter,
        "Interval(b={},e={},s={}",
        begin, end, interval.stride
    )?;
    if interval.inclusive {
        write!(formatter, ",inclusive")?;
    }
    write!(formatter, ")")
}

pub(crate) fn hash_interval<H>(state: &mut H, interval: Interval, begin: i64, end: i64, cursor: i64)
where
    H: Hasher,
{
    begin.hash(state);
    end.hash(state);
    interval.inclusive.hash(state);
    interval.stride.hash(state);
    cursor.hash(state);
}

#[cold]
pub(crate) const fn panic_bound_overflow() -> ! {
    panic!("overflow in interval bound")
}

#[cold]
pub(crate) const fn panic_len_overflow() -> ! {
    panic!("overflow in interval length")
}
