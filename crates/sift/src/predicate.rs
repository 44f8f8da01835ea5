//! Three-valued predicate trees.
//!
//! A [`Predicate`] is what a field produces from a column and a bound value.
//! It can be rendered to SQL (see [`crate::sql`]) or evaluated against
//! in-memory rows with an accessor function.
//!
//! # Example
//!
//! ```
//! use sift::{Column, ColumnExpression, Predicate, Scalar, Truth};
//!
//! struct Row {
//!     age: Option<i64>,
//! }
//!
//! fn accessor(row: &Row, column: &str) -> Scalar {
//!     match column {
//!         "age" => row.age.map_or(Scalar::Null, Scalar::Integer),
//!         _ => Scalar::Null,
//!     }
//! }
//!
//! let age: Column<Option<i64>> = Column::new("age");
//! let adult = age.greater_or_equal(Scalar::Integer(18));
//!
//! let matcher = adult.compile().unwrap();
//! assert_eq!(matcher.evaluate(&Row { age: Some(30) }, accessor), Truth::True);
//! assert_eq!(matcher.evaluate(&Row { age: None }, accessor), Truth::Unknown);
//! ```

use regex::Regex;

use crate::column::ColumnRef;
use crate::error::Result;
use crate::op::Op;
use crate::pattern::like_regex;
use crate::truth::Truth;
use crate::value::Scalar;

/// A boolean expression over columns with SQL null semantics.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// A constant; `Literal(true)` imposes no constraint.
    Literal(bool),
    /// `column <op> value`
    Compare {
        column: ColumnRef,
        op: Op,
        value: Scalar,
    },
    /// Case-insensitive pattern match against an escaped LIKE pattern.
    Like { column: ColumnRef, pattern: String },
    /// Conjunction of all members.
    And(Vec<Predicate>),
    /// Disjunction of all members.
    Or(Vec<Predicate>),
    /// Negation.
    Not(Box<Predicate>),
}

impl Predicate {
    /// The predicate that matches every row.
    pub fn always() -> Self {
        Predicate::Literal(true)
    }

    /// The predicate that matches no row.
    pub fn never() -> Self {
        Predicate::Literal(false)
    }

    pub fn compare(column: ColumnRef, op: Op, value: Scalar) -> Self {
        Predicate::Compare { column, op, value }
    }

    pub fn like(column: ColumnRef, pattern: impl Into<String>) -> Self {
        Predicate::Like {
            column,
            pattern: pattern.into(),
        }
    }

    /// Conjunction of `self` and `other`.
    ///
    /// Nested conjunctions are flattened and literals folded:
    /// `true AND x = x` and `false AND x = false`, both of which also hold
    /// when `x` is unknown.
    pub fn and(self, other: Predicate) -> Predicate {
        Predicate::all([self, other])
    }

    /// Disjunction of `self` and `other`, folding `false OR x = x` and
    /// `true OR x = true`.
    pub fn or(self, other: Predicate) -> Predicate {
        Predicate::any([self, other])
    }

    /// Negation; literals are folded.
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Predicate {
        match self {
            Predicate::Literal(b) => Predicate::Literal(!b),
            Predicate::Not(inner) => *inner,
            other => Predicate::Not(Box::new(other)),
        }
    }

    /// Conjunction of every predicate in `parts`. An empty input is
    /// `Literal(true)`.
    pub fn all<I>(parts: I) -> Predicate
    where
        I: IntoIterator<Item = Predicate>,
    {
        let mut members = Vec::new();
        for part in parts {
            match part {
                Predicate::Literal(true) => {}
                Predicate::Literal(false) => return Predicate::never(),
                Predicate::And(inner) => members.extend(inner),
                other => members.push(other),
            }
        }
        match members.len() {
            0 => Predicate::always(),
            1 => members.remove(0),
            _ => Predicate::And(members),
        }
    }

    /// Disjunction of every predicate in `parts`. An empty input is
    /// `Literal(false)`.
    pub fn any<I>(parts: I) -> Predicate
    where
        I: IntoIterator<Item = Predicate>,
    {
        let mut members = Vec::new();
        for part in parts {
            match part {
                Predicate::Literal(false) => {}
                Predicate::Literal(true) => return Predicate::always(),
                Predicate::Or(inner) => members.extend(inner),
                other => members.push(other),
            }
        }
        match members.len() {
            0 => Predicate::never(),
            1 => members.remove(0),
            _ => Predicate::Or(members),
        }
    }

    /// Returns `true` if this is the literal that matches everything.
    pub fn is_always(&self) -> bool {
        matches!(self, Predicate::Literal(true))
    }

    /// Compiles every pattern in the tree once, for evaluating many rows.
    ///
    /// Fails with [`crate::SiftError::InvalidPattern`] if a pattern cannot be
    /// compiled.
    pub fn compile(&self) -> Result<Matcher<'_>> {
        Ok(Matcher {
            node: Node::build(self)?,
        })
    }

    /// Evaluates the predicate against one row.
    ///
    /// The accessor returns the value stored in a named column, `Scalar::Null`
    /// for a null or unknown column.
    pub fn evaluate<T, F>(&self, row: &T, accessor: F) -> Result<Truth>
    where
        F: Fn(&T, &str) -> Scalar,
    {
        Ok(self.compile()?.evaluate(row, accessor))
    }

    /// Returns `true` if the predicate is true for `row`. Unknown does not
    /// match, as in a WHERE clause.
    pub fn matches<T, F>(&self, row: &T, accessor: F) -> Result<bool>
    where
        F: Fn(&T, &str) -> Scalar,
    {
        Ok(self.compile()?.matches(row, accessor))
    }

    /// Filters a slice, returning references to the rows the predicate
    /// selects.
    pub fn filter<'a, T, F>(&self, rows: &'a [T], accessor: F) -> Result<Vec<&'a T>>
    where
        F: Fn(&T, &str) -> Scalar,
    {
        Ok(self.compile()?.filter(rows, accessor))
    }

    /// Counts the rows the predicate selects.
    pub fn count<T, F>(&self, rows: &[T], accessor: F) -> Result<usize>
    where
        F: Fn(&T, &str) -> Scalar,
    {
        Ok(self.compile()?.count(rows, accessor))
    }
}

/// A [`Predicate`] with its patterns compiled.
///
/// Built by [`Predicate::compile`]. Evaluation is infallible.
#[derive(Debug)]
pub struct Matcher<'p> {
    node: Node<'p>,
}

#[derive(Debug)]
enum Node<'p> {
    Literal(bool),
    Compare {
        column: &'p str,
        op: Op,
        value: &'p Scalar,
    },
    Like {
        column: &'p str,
        regex: Regex,
    },
    And(Vec<Node<'p>>),
    Or(Vec<Node<'p>>),
    Not(Box<Node<'p>>),
}

impl<'p> Node<'p> {
    fn build(predicate: &'p Predicate) -> Result<Self> {
        Ok(match predicate {
            Predicate::Literal(b) => Node::Literal(*b),
            Predicate::Compare { column, op, value } => Node::Compare {
                column: &column.name,
                op: *op,
                value,
            },
            Predicate::Like { column, pattern } => Node::Like {
                column: &column.name,
                regex: like_regex(pattern)?,
            },
            Predicate::And(parts) => Node::And(Node::build_all(parts)?),
            Predicate::Or(parts) => Node::Or(Node::build_all(parts)?),
            Predicate::Not(inner) => Node::Not(Box::new(Node::build(inner)?)),
        })
    }

    fn build_all(parts: &'p [Predicate]) -> Result<Vec<Self>> {
        parts.iter().map(Node::build).collect()
    }

    fn eval<T, F>(&self, row: &T, accessor: &F) -> Truth
    where
        F: Fn(&T, &str) -> Scalar,
    {
        match self {
            Node::Literal(b) => Truth::from(*b),
            Node::Compare { column, op, value } => {
                op.eval_ordering(accessor(row, *column).compare(*value))
            }
            Node::Like { column, regex } => match accessor(row, *column).as_str() {
                Some(text) => Truth::from(regex.is_match(text)),
                None => Truth::Unknown,
            },
            Node::And(parts) => parts
                .iter()
                .fold(Truth::True, |acc, p| acc.and(p.eval(row, accessor))),
            Node::Or(parts) => parts
                .iter()
                .fold(Truth::False, |acc, p| acc.or(p.eval(row, accessor))),
            Node::Not(inner) => inner.eval(row, accessor).not(),
        }
    }
}

impl Matcher<'_> {
    /// Evaluates one row.
    pub fn evaluate<T, F>(&self, row: &T, accessor: F) -> Truth
    where
        F: Fn(&T, &str) -> Scalar,
    {
        self.node.eval(row, &accessor)
    }

    pub fn matches<T, F>(&self, row: &T, accessor: F) -> bool
    where
        F: Fn(&T, &str) -> Scalar,
    {
        self.node.eval(row, &accessor).is_true()
    }

    pub fn filter<'a, T, F>(&self, rows: &'a [T], accessor: F) -> Vec<&'a T>
    where
        F: Fn(&T, &str) -> Scalar,
    {
        rows.iter()
            .filter(|row| self.node.eval(*row, &accessor).is_true())
            .collect()
    }

    pub fn count<T, F>(&self, rows: &[T], accessor: F) -> usize
    where
        F: Fn(&T, &str) -> Scalar,
    {
        rows.iter()
            .filter(|row| self.node.eval(*row, &accessor).is_true())
            .count()
    }
}
