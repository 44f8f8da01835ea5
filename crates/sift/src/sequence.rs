//! Sequence-membership predicate builder.
//!
//! Expands a list of candidates into `test(c1) OR test(c2) OR …`, using the
//! same per-candidate comparator the scalar field would use.
//!
//! An empty candidate list imposes no constraint and yields `Literal(true)`,
//! matching the range field's "no bounds, no constraint" rule. Every
//! sequence-based field in the catalog goes through [`any_of`], so the policy
//! is uniform.

use crate::predicate::Predicate;

/// Builds the disjunction of `test` over `candidates`.
///
/// A single candidate yields the bare comparison.
///
/// ```
/// use sift::{any_of, Column, ColumnExpression, Predicate, Scalar};
///
/// let status: Column<i64> = Column::new("status");
/// let p = any_of(&[1i64, 2], |v| status.equals(Scalar::Integer(*v)));
/// assert!(matches!(p, Predicate::Or(ref parts) if parts.len() == 2));
///
/// let none: [i64; 0] = [];
/// assert!(any_of(&none, |v| status.equals(Scalar::Integer(*v))).is_always());
/// ```
pub fn any_of<T, F>(candidates: &[T], test: F) -> Predicate
where
    F: Fn(&T) -> Predicate,
{
    if candidates.is_empty() {
        return Predicate::always();
    }
    Predicate::any(candidates.iter().map(test))
}
