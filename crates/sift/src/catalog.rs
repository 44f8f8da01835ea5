//! The standard field catalog.
//!
//! Each constructor takes the codec and the [`ColumnType`] explicitly and
//! returns a ready [`FilterField`]. The column type's `A` parameter decides
//! whether the field targets a nullable column; the bound type stays the same
//! either way.
//!
//! | Constructor | Bound value | Predicate |
//! |-------------|-------------|-----------|
//! | [`equals`] | `T` | `col = v` |
//! | [`one_of`] | `Vec<T>` | `col = v1 OR col = v2 …` |
//! | [`text_contains`] | `String` | `col ILIKE '%v%'` |
//! | [`text_contains_any`] | `Vec<String>` | OR of the above |
//! | [`range`] | `FilterRange<T>` | `col >= from AND col <= to` |
//! | [`enum_equals`] / [`enum_one_of`] | `E` / `Vec<E>` | as `equals` / `one_of` |
//! | [`ignored`] | anything | literal true; never binds |

use crate::binding::{IgnoredBinding, RangeBinding, ScalarBinding, SeqBinding};
use crate::codec::{self, ScalarCodec};
use crate::column::{ColumnExpression, ColumnType};
use crate::field::FilterField;
use crate::pattern::contains_pattern;
use crate::predicate::Predicate;
use crate::range::{range_predicate, FilterRange};
use crate::sequence::any_of;
use crate::traits::FilterEnum;

/// Equality against a scalar value.
pub fn equals<A, T, C>(codec: C, column_type: ColumnType<A, T>) -> FilterField<A, T>
where
    A: 'static,
    T: 'static,
    C: ScalarCodec<T> + 'static,
{
    FilterField::new(
        ScalarBinding::new(codec),
        move |column: &dyn ColumnExpression<A>, value: &T| {
            column.equals(column_type.lift(value))
        },
    )
}

/// `equals` with the integer codec.
pub fn number_equals<A: 'static>(column_type: ColumnType<A, i64>) -> FilterField<A, i64> {
    equals(codec::number::<i64>(), column_type)
}

/// `equals` with the finite decimal codec.
pub fn decimal_equals<A: 'static>(column_type: ColumnType<A, f64>) -> FilterField<A, f64> {
    equals(codec::decimal(), column_type)
}

/// `equals` with the strict `true`/`false` codec.
pub fn boolean_equals<A: 'static>(column_type: ColumnType<A, bool>) -> FilterField<A, bool> {
    equals(codec::boolean(), column_type)
}

/// Exact text match. Use [`text_contains`] for substring search.
pub fn text_equals<A: 'static>(column_type: ColumnType<A, String>) -> FilterField<A, String> {
    equals(codec::text(), column_type)
}

/// Membership in a list of values, bound from `name[0]`, `name[1]`, …
///
/// An empty list matches every row.
pub fn one_of<A, T, C>(codec: C, column_type: ColumnType<A, T>) -> FilterField<A, Vec<T>>
where
    A: 'static,
    T: 'static,
    C: ScalarCodec<T> + 'static,
{
    FilterField::new(
        SeqBinding::new(codec),
        move |column: &dyn ColumnExpression<A>, values: &Vec<T>| {
            any_of(values, |v| column.equals(column_type.lift(v)))
        },
    )
}

/// Case-insensitive substring match.
///
/// The bound text is escaped before it is wrapped in `%…%`, so `%` and `_`
/// typed by a user match themselves.
///
/// The pattern is always text, so `column_type` is never lifted through; it
/// only pins the column type `A` to a text column.
pub fn text_contains<A: 'static>(
    _column_type: ColumnType<A, String>,
) -> FilterField<A, String> {
    FilterField::new(
        ScalarBinding::new(codec::text()),
        |column: &dyn ColumnExpression<A>, value: &String| {
            column.matches_pattern(contains_pattern(value))
        },
    )
}

/// Rows whose text contains any of the bound values.
///
/// As with [`text_contains`], `column_type` only pins `A` to a text column.
pub fn text_contains_any<A: 'static>(
    _column_type: ColumnType<A, String>,
) -> FilterField<A, Vec<String>> {
    FilterField::new(
        SeqBinding::new(codec::text()),
        |column: &dyn ColumnExpression<A>, values: &Vec<String>| {
            any_of(values, |v| column.matches_pattern(contains_pattern(v)))
        },
    )
}

/// Inclusive range bound from `name.from` and `name.to`.
///
/// ```
/// use sift::{catalog, codec, data, Column, ColumnType, Predicate};
///
/// let price = catalog::range(codec::decimal(), ColumnType::<Option<f64>, f64>::nullable());
/// let bound = price.bind("price", &data([("price.to", "9.5")])).unwrap();
/// let p = price.filter_on_column(&Column::<Option<f64>>::new("price"), &bound);
/// assert!(matches!(p, Predicate::Compare { .. }));
/// ```
pub fn range<A, T, C>(codec: C, column_type: ColumnType<A, T>) -> FilterField<A, FilterRange<T>>
where
    A: 'static,
    T: 'static,
    C: ScalarCodec<T> + 'static,
{
    FilterField::new(
        RangeBinding::new(codec),
        move |column: &dyn ColumnExpression<A>, range: &FilterRange<T>| {
            range_predicate(column, range.map(|v| column_type.lift(v)))
        },
    )
}

/// Equality on an enumerated column, parsed by variant name.
pub fn enum_equals<A, E>(column_type: ColumnType<A, E>) -> FilterField<A, E>
where
    A: 'static,
    E: FilterEnum,
{
    equals(codec::enumeration::<E>(), column_type)
}

/// Membership in a list of enum variants, bound from `name[0]`, `name[1]`, …
///
/// An empty list matches every row.
pub fn enum_one_of<A, E>(column_type: ColumnType<A, E>) -> FilterField<A, Vec<E>>
where
    A: 'static,
    E: FilterEnum,
{
    one_of(codec::enumeration::<E>(), column_type)
}

/// The placeholder field.
///
/// It never binds (the error list is empty, meaning "intentionally absent"),
/// never echoes anything, and filters nothing out. Forms skip it.
pub fn ignored<A: 'static, B: 'static>() -> FilterField<A, B> {
    FilterField::new(IgnoredBinding, |_: &dyn ColumnExpression<A>, _: &B| {
        Predicate::always()
    })
}
