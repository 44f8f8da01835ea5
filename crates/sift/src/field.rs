//! The field-filter abstraction.
//!
//! A [`FilterField<A, B>`] binds string-keyed input to a value of type `B`,
//! unbinds it again, and turns it into a predicate over a column of type `A`.
//! Fields carry no per-request state; build them once and share them.

use std::fmt;
use std::sync::Arc;

use crate::binding::{Binding, OptionalBinding};
use crate::column::ColumnExpression;
use crate::data::Data;
use crate::error::FieldError;
use crate::predicate::Predicate;

type PredicateFn<A, B> = dyn Fn(&dyn ColumnExpression<A>, &B) -> Predicate + Send + Sync;

/// A filter definition for one queryable attribute.
///
/// `A` is the column value type (`Option<T>` for nullable columns) and `B` is
/// the bound value type. Cloning is cheap.
///
/// # Example
///
/// ```
/// use sift::{catalog, data, Column, ColumnType, FilterRange, Predicate};
///
/// let age = catalog::range(sift::codec::number::<i64>(), ColumnType::<i64, i64>::required());
///
/// let input = data([("age.from", "18"), ("age.to", "65")]);
/// let bound = age.bind("age", &input).unwrap();
/// assert_eq!(bound, FilterRange::between(18, 65));
///
/// // Echo the state back for redisplay.
/// assert_eq!(age.unbind("age", &bound), input);
///
/// let predicate = age.filter_on_column(&Column::<i64>::new("age"), &bound);
/// assert!(matches!(predicate, Predicate::And(_)));
/// ```
pub struct FilterField<A, B> {
    binding: Arc<dyn Binding<B>>,
    predicate: Arc<PredicateFn<A, B>>,
}

impl<A, B> FilterField<A, B> {
    /// Builds a field from a binding rule and a predicate function.
    ///
    /// The catalog constructors cover the standard shapes; use this for
    /// custom ones.
    pub fn new<Bd, F>(binding: Bd, predicate: F) -> Self
    where
        Bd: Binding<B> + 'static,
        F: Fn(&dyn ColumnExpression<A>, &B) -> Predicate + Send + Sync + 'static,
    {
        FilterField {
            binding: Arc::new(binding),
            predicate: Arc::new(predicate),
        }
    }

    /// Parses the keys addressed by `name` into a bound value.
    ///
    /// Errors are collected, never thrown. An `Err` with an empty list means
    /// the field takes no part in filtering.
    pub fn bind(&self, name: &str, data: &Data) -> Result<B, Vec<FieldError>> {
        self.binding.bind(name, data)
    }

    /// Serializes a bound value back into the keys addressed by `name`.
    pub fn unbind(&self, name: &str, value: &B) -> Data {
        self.binding.unbind(name, value)
    }

    /// Builds the predicate for `value` against `column`. Total and pure.
    pub fn filter_on_column(&self, column: &dyn ColumnExpression<A>, value: &B) -> Predicate {
        (self.predicate)(column, value)
    }
}

impl<A: 'static, B: 'static> FilterField<A, B> {
    /// Makes the field optional.
    ///
    /// Binds `None` when none of the keys the field reads are present (a blank
    /// scalar key counts as absent); `None` unbinds to nothing and filters to
    /// literal true.
    pub fn optional(&self) -> FilterField<A, Option<B>> {
        let predicate = Arc::clone(&self.predicate);
        FilterField {
            binding: Arc::new(OptionalBinding::new(Arc::clone(&self.binding))),
            predicate: Arc::new(move |column: &dyn ColumnExpression<A>, value: &Option<B>| {
                match value {
                    Some(v) => predicate(column, v),
                    None => Predicate::always(),
                }
            }),
        }
    }
}

impl<A, B> Clone for FilterField<A, B> {
    fn clone(&self) -> Self {
        FilterField {
            binding: Arc::clone(&self.binding),
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<A, B> fmt::Debug for FilterField<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterField")
            .field("column", &std::any::type_name::<A>())
            .field("value", &std::any::type_name::<B>())
            .finish()
    }
}
