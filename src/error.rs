//! Errors raised while declaring or resolving intervals.

use alloc::vec::Vec;
use thiserror::Error;

use crate::interval::Resolved;

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum IntervalError {
    /// The inclusive end of the interval exceeds the size of the dimension.
    #[error("invalid interval: {interval} on array with shape {shape:?}")]
    Invalid { interval: Resolved, shape: Vec<usize> },
    #[error("dimension {dimension} is out of bounds for array with shape {shape:?}")]
    Dimension { dimension: usize, shape: Vec<usize> },
}

impl IntervalError {
    pub fn shape(&self) -> &[usize] {
        match self {
            IntervalError::Invalid { shape, .. } | IntervalError::Dimension { shape, .. } => shape,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, Hash, PartialEq)]
#[error("interval stride must be positive but is {0}")]
pub struct StrideError(pub i64);
