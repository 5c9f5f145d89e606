//! Per-dimension indices consumed by view construction.
//!
//! Every kind of index (point, interval, all, new axis) exposes the same capabilities through
//! [`NdIndex`], so that the routine combining indices across dimensions can treat them
//! uniformly and dispatch on [`IndexKind`] rather than on concrete types. This module provides
//! the interval kind, [`IntervalIndex`].

use core::fmt::{self, Display, Formatter};
use core::hash::{Hash, Hasher};
use core::mem;

use crate::error::IntervalError;
use crate::interval::{self, Deferred, Interval, Resolved};
use crate::Shaped;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum IndexKind {
    Point,
    Interval,
    All,
    NewAxis,
}

pub trait NdIndex {
    /// The outcome of initialization when a bound cannot be resolved yet.
    type Deferred;

    /// Gets the kind of index, which determines how views are composed from it.
    fn kind(&self) -> IndexKind;

    fn is_interval(&self) -> bool {
        self.kind() == IndexKind::Interval
    }

    /// Gets the first position selected along the dimension.
    fn offset(&self) -> i64;

    /// Gets the bound at which selection along the dimension ends.
    ///
    /// Whether this position is itself selected depends on the kind of index.
    fn end(&self) -> i64;

    /// Gets the number of positions selected along the dimension.
    fn len(&self) -> i64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Gets the step between selected positions.
    fn stride(&self) -> i64;

    /// Swaps the offset and end, reversing the direction of traversal.
    ///
    /// The length is not recomputed.
    fn reverse(&mut self);

    /// Returns `true` if the index has been initialized and its bounds are non-negative.
    ///
    /// An index that is not initialized must not be used to construct a view.
    fn is_initialized(&self) -> bool;

    /// Initializes from `begin` to the end of `dimension` in `array`.
    ///
    /// # Errors
    ///
    /// Returns an error if the index does not fit within the dimension. Initialization is
    /// aborted and the index is left as it was.
    ///
    /// # Panics
    ///
    /// Panics if the length or a bound overflows an `i64`.
    fn init_from<A>(&mut self, array: &A, begin: i64, dimension: usize) -> Result<(), IntervalError>
    where
        A: Shaped + ?Sized;

    /// Initializes over the whole of `dimension` in `array`.
    ///
    /// # Errors
    ///
    /// See [`NdIndex::init_from`].
    fn init_all<A>(&mut self, array: &A, dimension: usize) -> Result<(), IntervalError>
    where
        A: Shaped + ?Sized,
    {
        self.init_from(array, 0, dimension)
    }

    /// Initializes from `begin` to `end` in a dimension of size `max`.
    ///
    /// Negative bounds count from `max`. The cursor and length are always derived from the
    /// normalized bounds.
    ///
    /// # Errors
    ///
    /// Returns [`NdIndex::Deferred`] if a bound remains negative after normalizing against
    /// `max`.
    ///
    /// # Panics
    ///
    /// Panics if the length or a bound overflows an `i64`.
    fn init_with_max(&mut self, begin: i64, end: i64, max: i64) -> Result<(), Self::Deferred>;

    /// Initializes from `begin` to `end` without the size of the dimension.
    ///
    /// # Errors
    ///
    /// Returns [`NdIndex::Deferred`] if a bound is negative. The bounds are retained and
    /// initialization should be attempted again once the size of the dimension is known.
    ///
    /// # Panics
    ///
    /// Panics if the length overflows an `i64`.
    fn init(&mut self, begin: i64, end: i64) -> Result<(), Self::Deferred>;

    /// Copies the index, including its state of initialization.
    fn dup(&self) -> Self
    where
        Self: Sized;
}

/// An interval over one dimension with a one-time transition from pending to initialized.
///
/// Prefer [`Interval`] and [`Resolved`] where the state of resolution can be tracked in types.
/// This form retains the bounds of a deferred initialization, so [`is_initialized`] is
/// conditioned on both the transition and non-negative bounds.
///
/// [`is_initialized`]: NdIndex::is_initialized
#[derive(Clone, Copy, Debug)]
pub struct IntervalIndex {
    interval: Interval,
    begin: i64,
    end: i64,
    cursor: i64,
    len: i64,
    initialized: bool,
}

impl IntervalIndex {
    pub const fn new(interval: Interval) -> Self {
        IntervalIndex {
            interval,
            begin: 0,
            end: 0,
            cursor: 0,
            len: 0,
            initialized: false,
        }
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn is_inclusive(&self) -> bool {
        self.interval.is_inclusive()
    }

    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    pub fn resolved(&self) -> Option<Resolved> {
        self.is_initialized().then(|| {
            Resolved::unchecked(self.interval, self.begin, self.end, self.cursor, self.len)
        })
    }

    fn assign(&mut self, resolved: Resolved) {
        (self.begin, self.end) = resolved.bounds();
        self.cursor = resolved.cursor();
        self.len = resolved.len();
        self.initialized = true;
    }

    fn retain(&mut self, deferred: Deferred) -> Deferred {
        (self.begin, self.end) = deferred.bounds();
        deferred
    }
}

impl Display for IntervalIndex {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        interval::fmt_interval(formatter, self.interval, self.begin, self.end)
    }
}

impl Eq for IntervalIndex {}

impl From<Interval> for IntervalIndex {
    fn from(interval: Interval) -> Self {
        IntervalIndex::new(interval)
    }
}

impl From<Resolved> for IntervalIndex {
    fn from(resolved: Resolved) -> Self {
        let mut index = IntervalIndex::new(resolved.interval());
        index.assign(resolved);
        index
    }
}

impl Hash for IntervalIndex {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        interval::hash_interval(state, self.interval, self.begin, self.end, self.cursor);
    }
}

impl NdIndex for IntervalIndex {
    type Deferred = Deferred;

    fn kind(&self) -> IndexKind {
        IndexKind::Interval
    }

    fn offset(&self) -> i64 {
        self.begin
    }

    fn end(&self) -> i64 {
        self.end
    }

    fn len(&self) -> i64 {
        self.len
    }

    fn stride(&self) -> i64 {
        self.interval.stride()
    }

    fn reverse(&mut self) {
        mem::swap(&mut self.begin, &mut self.end);
    }

    fn is_initialized(&self) -> bool {
        self.initialized && self.begin >= 0 && self.end >= 0
    }

    fn init_from<A>(&mut self, array: &A, begin: i64, dimension: usize) -> Result<(), IntervalError>
    where
        A: Shaped + ?Sized,
    {
        let resolved = self.interval.resolve_to_end(array, begin, dimension)?;
        self.assign(resolved);
        Ok(())
    }

    fn init_with_max(&mut self, begin: i64, end: i64, max: i64) -> Result<(), Deferred> {
        match self.interval.resolve_with_max(begin, end, max) {
            Ok(resolved) => {
                self.assign(resolved);
                Ok(())
            },
            Err(deferred) => {
                // Derived state follows the normalized bounds, negative or not.
                let (begin, end) = deferred.bounds();
                self.cursor = begin;
                self.len = interval::count(
                    begin,
                    self.interval.end_inclusive(end),
                    self.interval.stride(),
                );
                self.initialized = true;
                Err(self.retain(deferred))
            },
        }
    }

    fn init(&mut self, begin: i64, end: i64) -> Result<(), Deferred> {
        match self.interval.resolve(begin, end) {
            Ok(resolved) => {
                self.assign(resolved);
                Ok(())
            },
            Err(deferred) => Err(self.retain(deferred)),
        }
    }

    fn dup(&self) -> Self {
        *self
    }
}

impl PartialEq for IntervalIndex {
    fn eq(&self, other: &Self) -> bool {
        self.interval == other.interval
            && self.begin == other.begin
            && self.end == other.end
            && self.cursor == other.cursor
    }
}
