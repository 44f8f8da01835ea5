//! Storage values carried by predicates.
//!
//! A [`Scalar`] is what a predicate compares a column against, and what an
//! accessor hands back when a predicate is evaluated against an in-memory row.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// An owned storage value.
///
/// `Integer` and `Decimal` compare with each other through `f64`. Any
/// comparison involving `Null`, or between unrelated kinds, has no ordering,
/// which evaluation reports as unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Integer(i64),
    Decimal(f64),
    Text(String),
}

impl Scalar {
    /// Returns `true` for `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    /// Extracts the text, if this is a `Text` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Compares two scalars the way a SQL engine would.
    ///
    /// Returns `None` when either side is `Null`, the kinds cannot be
    /// compared, or a decimal is NaN.
    pub fn compare(&self, other: &Scalar) -> Option<Ordering> {
        match (self, other) {
            (Scalar::Null, _) | (_, Scalar::Null) => None,
            (Scalar::Bool(a), Scalar::Bool(b)) => Some(a.cmp(b)),
            (Scalar::Integer(a), Scalar::Integer(b)) => Some(a.cmp(b)),
            (Scalar::Decimal(a), Scalar::Decimal(b)) => a.partial_cmp(b),
            (Scalar::Integer(a), Scalar::Decimal(b)) => (*a as f64).partial_cmp(b),
            (Scalar::Decimal(a), Scalar::Integer(b)) => a.partial_cmp(&(*b as f64)),
            (Scalar::Text(a), Scalar::Text(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

/// Conversion of a Rust value into the [`Scalar`] stored in a column.
pub trait ToScalar {
    fn to_scalar(&self) -> Scalar;
}

macro_rules! integer_scalar {
    ($($t:ty),*) => {
        $(
            impl ToScalar for $t {
                fn to_scalar(&self) -> Scalar {
                    Scalar::Integer(i64::from(*self))
                }
            }
        )*
    };
}

integer_scalar!(i8, i16, i32, i64, u8, u16, u32);

impl ToScalar for f32 {
    fn to_scalar(&self) -> Scalar {
        Scalar::Decimal(f64::from(*self))
    }
}

impl ToScalar for f64 {
    fn to_scalar(&self) -> Scalar {
        Scalar::Decimal(*self)
    }
}

impl ToScalar for bool {
    fn to_scalar(&self) -> Scalar {
        Scalar::Bool(*self)
    }
}

impl ToScalar for String {
    fn to_scalar(&self) -> Scalar {
        Scalar::Text(self.clone())
    }
}

impl ToScalar for &str {
    fn to_scalar(&self) -> Scalar {
        Scalar::Text((*self).to_string())
    }
}

impl<T: ToScalar> ToScalar for Option<T> {
    fn to_scalar(&self) -> Scalar {
        match self {
            Some(v) => v.to_scalar(),
            None => Scalar::Null,
        }
    }
}
