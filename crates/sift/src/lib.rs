//! Sift - declarative field filters for search forms and query strings.
//!
//! A [`FilterField`] describes, once per queryable attribute, how a value
//! arriving as flat string keys is:
//!
//! - **bound**: parsed into a typed value, collecting every error
//! - **unbound**: serialized back into the same keys, for redisplay
//! - **filtered on a column**: turned into a three-valued [`Predicate`]
//!
//! Predicates render to parameterized SQL ([`Predicate::to_sql`]) or compile
//! into a [`Matcher`] that evaluates in-memory rows through an accessor
//! ([`Predicate::compile`]).
//!
//! # Quick Start
//!
//! ```rust
//! use sift::{catalog, codec, data, Column, ColumnType, FilterForm, Scalar};
//!
//! struct Task {
//!     title: String,
//!     priority: i64,
//!     due: Option<i64>,
//! }
//!
//! fn accessor(task: &Task, column: &str) -> Scalar {
//!     match column {
//!         "title" => Scalar::Text(task.title.clone()),
//!         "priority" => Scalar::Integer(task.priority),
//!         "due" => task.due.map_or(Scalar::Null, Scalar::Integer),
//!         _ => Scalar::Null,
//!     }
//! }
//!
//! let form = FilterForm::new()
//!     .field(
//!         "q",
//!         Column::<String>::new("title"),
//!         catalog::text_contains(ColumnType::required()).optional(),
//!     )
//!     .field(
//!         "priority",
//!         Column::<i64>::new("priority"),
//!         catalog::one_of(codec::number(), ColumnType::required()),
//!     )
//!     .field(
//!         "due",
//!         Column::<Option<i64>>::new("due"),
//!         catalog::range(codec::number(), ColumnType::nullable()),
//!     );
//!
//! let tasks = vec![
//!     Task { title: "Fix bug".into(), priority: 5, due: Some(3) },
//!     Task { title: "Bug triage".into(), priority: 3, due: None },
//!     Task { title: "Write docs".into(), priority: 5, due: Some(9) },
//! ];
//!
//! let input = data([("q", "bug"), ("priority[0]", "5"), ("due.to", "7")]);
//! let bound = form.bind(&input).unwrap();
//!
//! let hits = bound.predicate.filter(&tasks, accessor).unwrap();
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].title, "Fix bug");
//! ```
//!
//! # Key Conventions
//!
//! | Shape | Keys |
//! |-------|------|
//! | scalar | `name` |
//! | sequence | `name[0]`, `name[1]`, … |
//! | range | `name.from`, `name.to` |
//!
//! # Three-valued Logic
//!
//! Comparing against a null column yields [`Truth::Unknown`], which
//! propagates through AND, OR and NOT with Kleene semantics. Like a SQL WHERE
//! clause, [`Matcher::filter`] keeps only rows that are [`Truth::True`].
//!
//! # Empty Inputs
//!
//! - An empty sequence imposes no constraint (`Literal(true)`).
//! - A range with neither bound imposes no constraint.
//! - An inverted range (`from > to`) matches nothing.
//! - The placeholder field ([`catalog::ignored`]) never binds; forms skip it.

pub mod binding;
pub mod catalog;
pub mod codec;
mod column;
mod data;
pub mod error;
mod field;
mod form;
mod op;
mod pattern;
mod predicate;
mod range;
mod sequence;
mod sql;
mod traits;
mod truth;
mod value;

// Re-export public API
pub use binding::Binding;
pub use codec::ScalarCodec;
pub use column::{Column, ColumnExpression, ColumnRef, ColumnType};
pub use data::{data, indexed_key, sub_key, Data};
pub use error::{CodecError, FieldError, Result, SiftError};
pub use field::FilterField;
pub use form::{BoundForm, FilterForm};
pub use op::Op;
pub use pattern::{contains_pattern, escape_like, like_regex};
pub use predicate::{Matcher, Predicate};
pub use range::{range_predicate, FilterRange};
pub use sequence::any_of;
pub use sql::{Dialect, SqlParams};
pub use traits::FilterEnum;
pub use truth::Truth;
pub use value::{Scalar, ToScalar};
