//! Binding rules: string-keyed data to typed values and back.
//!
//! A [`Binding`] knows the key shape of one field. The catalog combines a
//! binding with a predicate function to make a [`crate::FilterField`].

use std::sync::Arc;

use tracing::trace;

use crate::codec::ScalarCodec;
use crate::data::{indexed_entries, indexed_key, sub_key, Data};
use crate::error::FieldError;
use crate::range::FilterRange;

/// Converts between the string-keyed form and a typed value.
pub trait Binding<T>: Send + Sync {
    /// Parses the keys addressed by `name`.
    ///
    /// Returns every error found rather than stopping at the first.
    fn bind(&self, name: &str, data: &Data) -> Result<T, Vec<FieldError>>;

    /// Serializes `value` into the keys addressed by `name`.
    fn unbind(&self, name: &str, value: &T) -> Data;

    /// Returns `true` if `data` holds any key this binding reads for `name`.
    ///
    /// Keys the binding never reads do not count, so a stray `name.extra`
    /// does not make a scalar field present.
    fn is_present(&self, name: &str, data: &Data) -> bool;
}

/// A single value under `name`. The key is required.
pub struct ScalarBinding<C> {
    codec: C,
}

impl<C> ScalarBinding<C> {
    pub fn new(codec: C) -> Self {
        ScalarBinding { codec }
    }
}

impl<T, C> Binding<T> for ScalarBinding<C>
where
    C: ScalarCodec<T>,
{
    fn bind(&self, name: &str, data: &Data) -> Result<T, Vec<FieldError>> {
        let raw = data
            .get(name)
            .ok_or_else(|| vec![FieldError::required(name)])?;
        trace!(key = name, raw = %raw, "binding scalar");
        self.codec.parse(raw).map_err(|e| vec![e.at(name)])
    }

    fn unbind(&self, name: &str, value: &T) -> Data {
        Data::from([(name.to_string(), self.codec.format(value))])
    }

    /// A blank `name` counts as absent, the way an empty form input does.
    fn is_present(&self, name: &str, data: &Data) -> bool {
        data.get(name).is_some_and(|raw| !raw.trim().is_empty())
    }
}

/// A list of values under `name[0]`, `name[1]`, …
///
/// An absent list binds as empty. Each malformed element contributes its
/// own error.
pub struct SeqBinding<C> {
    codec: C,
}

impl<C> SeqBinding<C> {
    pub fn new(codec: C) -> Self {
        SeqBinding { codec }
    }
}

impl<T, C> Binding<Vec<T>> for SeqBinding<C>
where
    C: ScalarCodec<T>,
{
    fn bind(&self, name: &str, data: &Data) -> Result<Vec<T>, Vec<FieldError>> {
        let mut values = Vec::new();
        let mut errors = Vec::new();
        for (_, key, raw) in indexed_entries(name, data) {
            match self.codec.parse(raw) {
                Ok(v) => values.push(v),
                Err(e) => errors.push(e.at(key)),
            }
        }
        trace!(key = name, bound = values.len(), errors = errors.len(), "binding sequence");
        if errors.is_empty() {
            Ok(values)
        } else {
            Err(errors)
        }
    }

    fn unbind(&self, name: &str, value: &Vec<T>) -> Data {
        value
            .iter()
            .enumerate()
            .map(|(i, v)| (indexed_key(name, i), self.codec.format(v)))
            .collect()
    }

    fn is_present(&self, name: &str, data: &Data) -> bool {
        !indexed_entries(name, data).is_empty()
    }
}

/// A pair of optional bounds under `name.from` and `name.to`.
///
/// Missing bounds bind as `None`. A malformed bound fails the whole field;
/// errors from both bounds are reported together.
pub struct RangeBinding<C> {
    codec: C,
}

impl<C> RangeBinding<C> {
    pub fn new(codec: C) -> Self {
        RangeBinding { codec }
    }

    fn bound<T>(&self, key: String, data: &Data, errors: &mut Vec<FieldError>) -> Option<T>
    where
        C: ScalarCodec<T>,
    {
        let raw = data.get(&key)?;
        match self.codec.parse(raw) {
            Ok(v) => Some(v),
            Err(e) => {
                errors.push(e.at(key));
                None
            }
        }
    }
}

impl<T, C> Binding<FilterRange<T>> for RangeBinding<C>
where
    C: ScalarCodec<T>,
{
    fn bind(&self, name: &str, data: &Data) -> Result<FilterRange<T>, Vec<FieldError>> {
        let mut errors = Vec::new();
        let from = self.bound(sub_key(name, "from"), data, &mut errors);
        let to = self.bound(sub_key(name, "to"), data, &mut errors);
        trace!(key = name, errors = errors.len(), "binding range");
        if errors.is_empty() {
            Ok(FilterRange::new(from, to))
        } else {
            Err(errors)
        }
    }

    fn unbind(&self, name: &str, value: &FilterRange<T>) -> Data {
        let mut out = Data::new();
        if let Some(from) = &value.from {
            out.insert(sub_key(name, "from"), self.codec.format(from));
        }
        if let Some(to) = &value.to {
            out.insert(sub_key(name, "to"), self.codec.format(to));
        }
        out
    }

    fn is_present(&self, name: &str, data: &Data) -> bool {
        ["from", "to"]
            .iter()
            .any(|suffix| data.contains_key(&sub_key(name, suffix)))
    }
}

/// The placeholder binding: never produces a value and never echoes one.
///
/// Bind fails with an empty error list, which signals "intentionally absent"
/// rather than "malformed".
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoredBinding;

impl<T> Binding<T> for IgnoredBinding {
    fn bind(&self, _name: &str, _data: &Data) -> Result<T, Vec<FieldError>> {
        Err(Vec::new())
    }

    fn unbind(&self, _name: &str, _value: &T) -> Data {
        Data::new()
    }

    fn is_present(&self, _name: &str, _data: &Data) -> bool {
        false
    }
}

/// Makes any binding optional.
///
/// Binds `None` when the inner binding finds none of its keys, so a bound
/// `Some` always unbinds to at least one key and binds back to itself.
pub struct OptionalBinding<T> {
    inner: Arc<dyn Binding<T>>,
}

impl<T> OptionalBinding<T> {
    pub fn new(inner: Arc<dyn Binding<T>>) -> Self {
        OptionalBinding { inner }
    }
}

impl<T> Binding<Option<T>> for OptionalBinding<T> {
    fn bind(&self, name: &str, data: &Data) -> Result<Option<T>, Vec<FieldError>> {
        if !self.inner.is_present(name, data) {
            return Ok(None);
        }
        self.inner.bind(name, data).map(Some)
    }

    fn unbind(&self, name: &str, value: &Option<T>) -> Data {
        match value {
            Some(v) => self.inner.unbind(name, v),
            None => Data::new(),
        }
    }

    fn is_present(&self, name: &str, data: &Data) -> bool {
        self.inner.is_present(name, data)
    }
}
