//! Rendering predicates as SQL WHERE fragments with bound parameters.
//!
//! Values never appear in the SQL text. Each one is pushed onto a
//! [`SqlParams`] list and replaced by the dialect's placeholder.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::column::ColumnRef;
use crate::error::SiftError;
use crate::pattern::ESCAPE;
use crate::predicate::Predicate;
use crate::value::Scalar;

/// Supported SQL dialects.
///
/// - SQLite/DuckDB: `?` placeholders
/// - PostgreSQL: `$1`, `$2`, …
///
/// SQLite has no `ILIKE`, so pattern matches lower-case both sides instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Sqlite,
    Duckdb,
    Postgres,
}

impl Dialect {
    pub fn name(self) -> &'static str {
        match self {
            Dialect::Sqlite => "sqlite",
            Dialect::Duckdb => "duckdb",
            Dialect::Postgres => "postgres",
        }
    }

    /// Parameter placeholder for the given 1-based index.
    pub fn placeholder(self, index: usize) -> String {
        match self {
            Dialect::Sqlite | Dialect::Duckdb => "?".to_string(),
            Dialect::Postgres => format!("${}", index),
        }
    }

    fn pattern_match(self, column: &str, placeholder: &str) -> String {
        match self {
            Dialect::Sqlite => format!(
                "LOWER({}) LIKE LOWER({}) ESCAPE '{}'",
                column, placeholder, ESCAPE
            ),
            Dialect::Duckdb | Dialect::Postgres => {
                format!("{} ILIKE {} ESCAPE '{}'", column, placeholder, ESCAPE)
            }
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = SiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Dialect::Sqlite),
            "duckdb" => Ok(Dialect::Duckdb),
            "postgres" | "postgresql" => Ok(Dialect::Postgres),
            _ => Err(SiftError::UnknownDialect(s.to_string())),
        }
    }
}

/// Bound parameters collected while rendering, in placeholder order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlParams {
    pub values: Vec<Scalar>,
}

impl SqlParams {
    pub fn new() -> Self {
        SqlParams::default()
    }

    /// Adds a value and returns its 1-based index.
    pub fn push(&mut self, value: Scalar) -> usize {
        self.values.push(value);
        self.values.len()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Predicate {
    /// Renders the predicate as a WHERE fragment, appending its parameters to
    /// `params`.
    ///
    /// Several predicates can share one `params` list; PostgreSQL indices keep
    /// counting from where the list left off.
    ///
    /// ```
    /// use sift::{catalog, data, Column, ColumnType, Dialect, SqlParams};
    ///
    /// let field = catalog::number_equals(ColumnType::<i64, i64>::required());
    /// let age = field.bind("age", &data([("age", "30")])).unwrap();
    /// let predicate = field.filter_on_column(&Column::<i64>::new("age").qualified("u"), &age);
    ///
    /// let mut params = SqlParams::new();
    /// assert_eq!(predicate.to_sql(Dialect::Postgres, &mut params), "u.age = $1");
    /// assert_eq!(params.len(), 1);
    /// ```
    pub fn to_sql(&self, dialect: Dialect, params: &mut SqlParams) -> String {
        match self {
            Predicate::Literal(true) => "1=1".to_string(),
            Predicate::Literal(false) => "1=0".to_string(),
            Predicate::Compare { column, op, value } => {
                let index = params.push(value.clone());
                format!(
                    "{} {} {}",
                    column_sql(column),
                    op.sql(),
                    dialect.placeholder(index)
                )
            }
            Predicate::Like { column, pattern } => {
                let index = params.push(Scalar::Text(pattern.clone()));
                dialect.pattern_match(&column_sql(column), &dialect.placeholder(index))
            }
            Predicate::And(parts) => group(parts, " AND ", dialect, params),
            Predicate::Or(parts) => group(parts, " OR ", dialect, params),
            Predicate::Not(inner) => format!("NOT ({})", inner.to_sql(dialect, params)),
        }
    }
}

fn column_sql(column: &ColumnRef) -> String {
    column.to_string()
}

fn group(parts: &[Predicate], separator: &str, dialect: Dialect, params: &mut SqlParams) -> String {
    let rendered: Vec<String> = parts.iter().map(|p| p.to_sql(dialect, params)).collect();
    format!("({})", rendered.join(separator))
}
