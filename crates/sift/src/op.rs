//! Comparison operators for column predicates.

use std::cmp::Ordering;

use crate::truth::Truth;

/// Comparison operator applied between a column and a bound value.
///
/// Only the comparisons the field catalog needs are modelled. Pattern
/// matching is a separate predicate node because its operand is a pattern,
/// not a storage value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Equal.
    Eq,
    /// Less than or equal.
    Lte,
    /// Greater than or equal.
    Gte,
}

impl Op {
    /// Evaluates the operator given the ordering of column against value.
    ///
    /// A missing ordering (null operand, incomparable kinds) is unknown.
    pub fn eval_ordering(self, ordering: Option<Ordering>) -> Truth {
        let Some(ordering) = ordering else {
            return Truth::Unknown;
        };
        Truth::from(match self {
            Op::Eq => ordering == Ordering::Equal,
            Op::Lte => ordering != Ordering::Greater,
            Op::Gte => ordering != Ordering::Less,
        })
    }

    /// The SQL spelling of this operator.
    pub fn sql(self) -> &'static str {
        match self {
            Op::Eq => "=",
            Op::Lte => "<=",
            Op::Gte => ">=",
        }
    }
}
