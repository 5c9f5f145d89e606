#![cfg(feature = "serde")]
#![cfg_attr(docsrs, doc(cfg(feature = "serde")))]

use serde_derive::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::StrideError;
use crate::interval::{Interval, Resolved};

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct SerdeInterval {
    pub inclusive: bool,
    pub stride: i64,
}

impl From<Interval> for SerdeInterval {
    fn from(interval: Interval) -> Self {
        SerdeInterval {
            inclusive: interval.is_inclusive(),
            stride: interval.stride(),
        }
    }
}

impl TryFrom<SerdeInterval> for Interval {
    type Error = StrideError;

    fn try_from(serde: SerdeInterval) -> Result<Self, Self::Error> {
        Interval::new(serde.inclusive, serde.stride)
    }
}

// The length is not serialized. It is derived from the bounds when deserializing, so a length
// left stale by reversal is not preserved.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct SerdeResolved {
    pub begin: i64,
    pub end: i64,
    pub stride: i64,
    pub inclusive: bool,
    pub cursor: i64,
}

impl From<Resolved> for SerdeResolved {
    fn from(resolved: Resolved) -> Self {
        SerdeResolved {
            begin: resolved.offset(),
            end: resolved.end(),
            stride: resolved.stride(),
            inclusive: resolved.is_inclusive(),
            cursor: resolved.cursor(),
        }
    }
}

impl TryFrom<SerdeResolved> for Resolved {
    type Error = ResolvedError;

    fn try_from(serde: SerdeResolved) -> Result<Self, Self::Error> {
        let SerdeResolved {
            begin,
            end,
            stride,
            inclusive,
            cursor,
        } = serde;
        let interval = Interval::new(inclusive, stride)?;
        let resolved = interval
            .resolve(begin, end)
            .map_err(|_| ResolvedError::NegativeBound(begin, end))?;
        Ok(Resolved::unchecked(
            interval,
            begin,
            end,
            cursor,
            resolved.len(),
        ))
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum ResolvedError {
    #[error(transparent)]
    Stride(#[from] StrideError),
    #[error("resolved interval has negative bounds: begins at {0} but ends at {1}")]
    NegativeBound(i64, i64),
}

#[cfg(test)]
mod tests {
    use serde_test::{assert_de_tokens_error, assert_tokens, Token};

    use crate::error::StrideError;
    use crate::interval::{Interval, Resolved};
    use crate::serde::{ResolvedError, SerdeResolved};

    #[test]
    fn interval_then_proxy_tokens() {
        let interval = Interval::new(true, 2).unwrap();
        assert_tokens(
            &interval,
            &[
                Token::Struct {
                    name: "SerdeInterval",
                    len: 2,
                },
                Token::Str("inclusive"),
                Token::Bool(true),
                Token::Str("stride"),
                Token::I64(2),
                Token::StructEnd,
            ],
        );
    }

    #[test]
    fn deserialize_interval_with_zero_stride_then_error() {
        assert_de_tokens_error::<Interval>(
            &[
                Token::Struct {
                    name: "SerdeInterval",
                    len: 2,
                },
                Token::Str("inclusive"),
                Token::Bool(false),
                Token::Str("stride"),
                Token::I64(0),
                Token::StructEnd,
            ],
            "interval stride must be positive but is 0",
        );
    }

    #[test]
    fn resolved_then_proxy_tokens() {
        let resolved = Interval::EXCLUSIVE.resolve(2, 8).unwrap();
        assert_tokens(
            &resolved,
            &[
                Token::Struct {
                    name: "SerdeResolved",
                    len: 5,
                },
                Token::Str("begin"),
                Token::I64(2),
                Token::Str("end"),
                Token::I64(8),
                Token::Str("stride"),
                Token::I64(1),
                Token::Str("inclusive"),
                Token::Bool(false),
                Token::Str("cursor"),
                Token::I64(2),
                Token::StructEnd,
            ],
        );
    }

    #[test]
    fn deserialize_resolved_then_len_derived() {
        let resolved = Resolved::try_from(SerdeResolved {
            begin: 1,
            end: 9,
            stride: 2,
            inclusive: false,
            cursor: 3,
        })
        .unwrap();
        assert_eq!(resolved.len(), 4);
        assert_eq!(resolved.cursor(), 3);
        assert_eq!(
            Resolved::try_from(SerdeResolved {
                stride: -1,
                ..SerdeResolved::from(resolved)
            }),
            Err(ResolvedError::Stride(StrideError(-1))),
        );
    }

    #[test]
    fn deserialize_resolved_with_negative_bound_then_error() {
        assert_de_tokens_error::<Resolved>(
            &[
                Token::Struct {
                    name: "SerdeResolved",
                    len: 5,
                },
                Token::Str("begin"),
                Token::I64(-1),
                Token::Str("end"),
                Token::I64(8),
                Token::Str("stride"),
                Token::I64(1),
                Token::Str("inclusive"),
                Token::Bool(false),
                Token::Str("cursor"),
                Token::I64(0),
                Token::StructEnd,
            ],
            "resolved interval has negative bounds: begins at -1 but ends at 8",
        );
    }
}
