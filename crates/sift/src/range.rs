//! Inclusive ranges with optional bounds.

use serde::{Deserialize, Serialize};

use crate::column::ColumnExpression;
use crate::predicate::Predicate;
use crate::value::Scalar;

/// A pair of optional bounds over an ordered type.
///
/// Nothing requires `from <= to`. An inverted range produces a predicate no
/// row can satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FilterRange<T> {
    pub from: Option<T>,
    pub to: Option<T>,
}

impl<T> FilterRange<T> {
    pub fn new(from: Option<T>, to: Option<T>) -> Self {
        FilterRange { from, to }
    }

    /// A range with neither bound.
    pub fn unbounded() -> Self {
        FilterRange {
            from: None,
            to: None,
        }
    }

    /// `from..=to`
    pub fn between(from: T, to: T) -> Self {
        FilterRange::new(Some(from), Some(to))
    }

    /// `from..`
    pub fn at_least(from: T) -> Self {
        FilterRange::new(Some(from), None)
    }

    /// `..=to`
    pub fn at_most(to: T) -> Self {
        FilterRange::new(None, Some(to))
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Maps both bounds.
    pub fn map<U, F>(&self, f: F) -> FilterRange<U>
    where
        F: Fn(&T) -> U,
    {
        FilterRange {
            from: self.from.as_ref().map(&f),
            to: self.to.as_ref().map(&f),
        }
    }
}

/// Builds the range predicate over already-lifted bounds.
///
/// | from | to | predicate |
/// |------|----|-----------|
/// | some | some | `col >= from AND col <= to` |
/// | none | some | `col <= to` |
/// | some | none | `col >= from` |
/// | none | none | literal true |
pub fn range_predicate<A>(column: &dyn ColumnExpression<A>, range: FilterRange<Scalar>) -> Predicate {
    match (range.from, range.to) {
        (Some(from), Some(to)) => column
            .greater_or_equal(from)
            .and(column.less_or_equal(to)),
        (None, Some(to)) => column.less_or_equal(to),
        (Some(from), None) => column.greater_or_equal(from),
        (None, None) => Predicate::always(),
    }
}
