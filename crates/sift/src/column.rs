//! Column handles and storage-type descriptors.
//!
//! A field's predicate function talks to a column only through
//! [`ColumnExpression`], so callers can plug in their own column
//! representation. [`Column`] is the stock implementation: a named, optionally
//! qualified column that produces [`Predicate`] nodes.

use std::fmt;
use std::marker::PhantomData;

use crate::op::Op;
use crate::predicate::Predicate;
use crate::traits::FilterEnum;
use crate::value::{Scalar, ToScalar};

/// A queryable column holding values of type `A`.
///
/// Every operator returns a three-valued predicate. Comparing a nullable
/// column that holds null yields unknown.
pub trait ColumnExpression<A>: Send + Sync {
    /// `column = value`
    fn equals(&self, value: Scalar) -> Predicate;

    /// `column <= value`
    fn less_or_equal(&self, value: Scalar) -> Predicate;

    /// `column >= value`
    fn greater_or_equal(&self, value: Scalar) -> Predicate;

    /// Case-insensitive pattern match. `pattern` is already escaped.
    fn matches_pattern(&self, pattern: String) -> Predicate;
}

/// A reference to a storage column, as carried by predicate nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    pub qualifier: Option<String>,
    pub name: String,
}

impl ColumnRef {
    pub fn new(name: impl Into<String>) -> Self {
        ColumnRef {
            qualifier: None,
            name: name.into(),
        }
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.qualifier {
            Some(q) => write!(f, "{}.{}", q, self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// A typed handle to a named column.
///
/// `A` is the value type the column stores; use `Option<T>` for nullable
/// columns.
///
/// ```
/// use sift::Column;
///
/// let age: Column<Option<i64>> = Column::new("age").qualified("u");
/// assert_eq!(age.column_ref().to_string(), "u.age");
/// ```
pub struct Column<A> {
    column: ColumnRef,
    _marker: PhantomData<fn() -> A>,
}

impl<A> Column<A> {
    pub fn new(name: impl Into<String>) -> Self {
        Column {
            column: ColumnRef::new(name),
            _marker: PhantomData,
        }
    }

    /// Prefixes the column with a table name or alias.
    pub fn qualified(mut self, qualifier: impl Into<String>) -> Self {
        self.column.qualifier = Some(qualifier.into());
        self
    }

    pub fn column_ref(&self) -> &ColumnRef {
        &self.column
    }

    pub fn name(&self) -> &str {
        &self.column.name
    }
}

impl<A> Clone for Column<A> {
    fn clone(&self) -> Self {
        Column {
            column: self.column.clone(),
            _marker: PhantomData,
        }
    }
}

impl<A> fmt::Debug for Column<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Column").field(&self.column).finish()
    }
}

impl<A> ColumnExpression<A> for Column<A> {
    fn equals(&self, value: Scalar) -> Predicate {
        Predicate::compare(self.column.clone(), Op::Eq, value)
    }

    fn less_or_equal(&self, value: Scalar) -> Predicate {
        Predicate::compare(self.column.clone(), Op::Lte, value)
    }

    fn greater_or_equal(&self, value: Scalar) -> Predicate {
        Predicate::compare(self.column.clone(), Op::Gte, value)
    }

    fn matches_pattern(&self, pattern: String) -> Predicate {
        Predicate::like(self.column.clone(), pattern)
    }
}

/// Storage-type descriptor binding a column type `A` to a bound value type `T`.
///
/// This is the explicit evidence a field needs to compare a `T` against a
/// column of `A`: how a `T` is lifted into a [`Scalar`]. Only the pairings the
/// constructors allow can be built, which keeps `A` and `T` consistent at
/// compile time. Nullability lives in `A` (`Option<T>`).
///
/// ```
/// use sift::{ColumnType, Scalar};
///
/// let price = ColumnType::<Option<f64>, f64>::nullable();
/// assert_eq!(price.lift(&9.5), Scalar::Decimal(9.5));
/// ```
pub struct ColumnType<A, T> {
    lift: fn(&T) -> Scalar,
    _marker: PhantomData<fn() -> A>,
}

impl<T: ToScalar> ColumnType<T, T> {
    /// A non-null column storing `T`.
    pub fn required() -> Self {
        ColumnType {
            lift: T::to_scalar,
            _marker: PhantomData,
        }
    }
}

impl<T: ToScalar> ColumnType<Option<T>, T> {
    /// A nullable column storing `T`.
    pub fn nullable() -> Self {
        ColumnType {
            lift: T::to_scalar,
            _marker: PhantomData,
        }
    }
}

impl<E: FilterEnum> ColumnType<E, E> {
    /// A non-null column storing an enum through [`FilterEnum::stored`].
    pub fn enumeration() -> Self {
        ColumnType {
            lift: E::stored,
            _marker: PhantomData,
        }
    }
}

impl<E: FilterEnum> ColumnType<Option<E>, E> {
    /// A nullable column storing an enum through [`FilterEnum::stored`].
    pub fn nullable_enumeration() -> Self {
        ColumnType {
            lift: E::stored,
            _marker: PhantomData,
        }
    }
}

impl<A, T> ColumnType<A, T> {
    /// Lifts a bound value into the scalar compared against the column.
    pub fn lift(&self, value: &T) -> Scalar {
        (self.lift)(value)
    }
}

impl<A, T> Clone for ColumnType<A, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A, T> Copy for ColumnType<A, T> {}

impl<A, T> fmt::Debug for ColumnType<A, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnType")
            .field("column", &std::any::type_name::<A>())
            .field("value", &std::any::type_name::<T>())
            .finish()
    }
}
