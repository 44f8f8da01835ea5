//! Filter forms: named groups of fields bound together.
//!
//! A [`FilterForm`] pairs each field with the column it filters and the key
//! it binds from. Binding a form binds every entry, collects every error, and
//! combines the entry predicates with AND.

use tracing::debug;

use crate::column::Column;
use crate::data::Data;
use crate::error::{FieldError, Result, SiftError};
use crate::field::FilterField;
use crate::predicate::Predicate;

/// The result of binding a whole form.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundForm {
    /// The AND of every bound entry's predicate.
    pub predicate: Predicate,
    /// Canonical re-serialization of every bound entry.
    pub data: Data,
    /// Entries that took no part in filtering.
    pub skipped: Vec<String>,
}

enum Outcome {
    Bound { predicate: Predicate, data: Data },
    Skipped,
    Failed(Vec<FieldError>),
}

trait FormEntry: Send + Sync {
    fn name(&self) -> &str;

    fn bind(&self, data: &Data) -> Outcome;
}

struct Entry<A, B> {
    name: String,
    column: Column<A>,
    field: FilterField<A, B>,
}

impl<A, B> FormEntry for Entry<A, B> {
    fn name(&self) -> &str {
        &self.name
    }

    fn bind(&self, data: &Data) -> Outcome {
        match self.field.bind(&self.name, data) {
            Ok(value) => Outcome::Bound {
                predicate: self.field.filter_on_column(&self.column, &value),
                data: self.field.unbind(&self.name, &value),
            },
            Err(errors) if errors.is_empty() => Outcome::Skipped,
            Err(errors) => Outcome::Failed(errors),
        }
    }
}

/// A set of named fields with heterogeneous column and value types.
///
/// ```
/// use sift::{catalog, codec, data, Column, ColumnType, Dialect, FilterForm, SqlParams};
///
/// let form = FilterForm::new()
///     .field(
///         "q",
///         Column::<String>::new("title"),
///         catalog::text_contains(ColumnType::required()).optional(),
///     )
///     .field(
///         "priority",
///         Column::<i64>::new("priority"),
///         catalog::range(codec::number(), ColumnType::required()),
///     );
///
/// let bound = form.bind(&data([("q", "bug"), ("priority.from", "3")])).unwrap();
/// let mut params = SqlParams::new();
/// assert_eq!(
///     bound.predicate.to_sql(Dialect::Sqlite, &mut params),
///     "(LOWER(title) LIKE LOWER(?) ESCAPE '\\' AND priority >= ?)"
/// );
/// ```
#[derive(Default)]
pub struct FilterForm {
    entries: Vec<Box<dyn FormEntry>>,
}

impl FilterForm {
    pub fn new() -> Self {
        FilterForm::default()
    }

    /// Adds an entry. `name` is the key (or key prefix) the field binds from.
    pub fn field<A, B>(
        mut self,
        name: impl Into<String>,
        column: Column<A>,
        field: FilterField<A, B>,
    ) -> Self
    where
        A: 'static,
        B: 'static,
    {
        self.entries.push(Box::new(Entry {
            name: name.into(),
            column,
            field,
        }));
        self
    }

    /// Entry names in declaration order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Binds every entry.
    ///
    /// All entries are bound even after one fails, so the error list covers
    /// the whole input. Entries that fail with no errors are skipped.
    pub fn bind(&self, data: &Data) -> std::result::Result<BoundForm, Vec<FieldError>> {
        let mut predicates = Vec::new();
        let mut echoed = Data::new();
        let mut skipped = Vec::new();
        let mut errors = Vec::new();

        for entry in &self.entries {
            match entry.bind(data) {
                Outcome::Bound { predicate, data } => {
                    predicates.push(predicate);
                    echoed.extend(data);
                }
                Outcome::Skipped => {
                    debug!(field = entry.name(), "skipping placeholder field");
                    skipped.push(entry.name().to_string());
                }
                Outcome::Failed(field_errors) => errors.extend(field_errors),
            }
        }

        if !errors.is_empty() {
            debug!(errors = errors.len(), "form failed to bind");
            return Err(errors);
        }

        Ok(BoundForm {
            predicate: Predicate::all(predicates),
            data: echoed,
            skipped,
        })
    }

    /// Like [`FilterForm::bind`], with the errors wrapped in [`SiftError::Bind`].
    pub fn try_bind(&self, data: &Data) -> Result<BoundForm> {
        self.bind(data).map_err(SiftError::from)
    }
}

impl std::fmt::Debug for FilterForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterForm")
            .field("fields", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::codec;
    use crate::column::ColumnType;
    use crate::data::data;
    use crate::error;

    fn form() -> FilterForm {
        FilterForm::new()
            .field(
                "id",
                Column::<i64>::new("id"),
                catalog::number_equals(ColumnType::required()).optional(),
            )
            .field(
                "age",
                Column::<Option<i64>>::new("age"),
                catalog::range(codec::number::<i64>(), ColumnType::nullable()),
            )
            .field("page", Column::<i64>::new("page"), catalog::ignored::<i64, i64>())
    }

    #[test]
    fn names_in_declaration_order() {
        assert_eq!(form().names(), vec!["id", "age", "page"]);
        assert_eq!(form().len(), 3);
    }

    #[test]
    fn empty_input_matches_everything() {
        let bound = form().bind(&Data::new()).unwrap();
        assert!(bound.predicate.is_always());
        assert!(bound.data.is_empty());
        assert_eq!(bound.skipped, vec!["page"]);
    }

    #[test]
    fn echoes_canonical_data() {
        let bound = form()
            .bind(&data([("id", " 7 "), ("age.to", "40"), ("page", "2")]))
            .unwrap();
        assert_eq!(bound.data, data([("id", "7"), ("age.to", "40")]));
        assert!(matches!(bound.predicate, Predicate::And(ref parts) if parts.len() == 2));
    }

    #[test]
    fn aggregates_errors_across_entries() {
        let errors = form()
            .bind(&data([("id", "x"), ("age.from", "y"), ("age.to", "z")]))
            .unwrap_err();
        assert_eq!(
            errors,
            vec![
                FieldError::new("id", error::NUMBER),
                FieldError::new("age.from", error::NUMBER),
                FieldError::new("age.to", error::NUMBER),
            ]
        );
    }

    #[test]
    fn try_bind_wraps_errors() {
        let err = form().try_bind(&data([("id", "x")])).unwrap_err();
        assert!(matches!(err, SiftError::Bind(ref errors) if errors.len() == 1));
        assert_eq!(err.to_string(), "1 field(s) failed to bind: id: error.number");
    }
}
