//! The flat string-keyed mapping fields bind from and unbind to.
//!
//! Key conventions under a field name `name`:
//!
//! | Shape | Keys |
//! |-------|------|
//! | scalar | `name` |
//! | sequence | `name[0]`, `name[1]`, … |
//! | range | `name.from`, `name.to` |

use std::collections::BTreeMap;

/// Input and output mapping. Ordered, so unbind output is deterministic.
pub type Data = BTreeMap<String, String>;

/// Builds a [`Data`] mapping from key/value pairs.
///
/// ```
/// let data = sift::data([("q", "bug"), ("age.from", "18")]);
/// assert_eq!(data["age.from"], "18");
/// ```
pub fn data<I, K, V>(pairs: I) -> Data
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// `name.suffix`
pub fn sub_key(name: &str, suffix: &str) -> String {
    format!("{}.{}", name, suffix)
}

/// `name[index]`
pub fn indexed_key(name: &str, index: usize) -> String {
    format!("{}[{}]", name, index)
}

/// Returns the `(index, key, value)` entries addressed as `name[i]`, sorted by
/// index. Keys whose index is not a number are ignored.
pub fn indexed_entries<'a>(name: &str, data: &'a Data) -> Vec<(usize, &'a str, &'a str)> {
    let mut entries: Vec<_> = data
        .range(format!("{}[", name)..)
        .take_while(|(key, _)| key.starts_with(name))
        .filter_map(|(key, value)| {
            let index = key
                .strip_prefix(name)?
                .strip_prefix('[')?
                .strip_suffix(']')?
                .parse::<usize>()
                .ok()?;
            Some((index, key.as_str(), value.as_str()))
        })
        .collect();
    entries.sort_by_key(|(index, _, _)| *index);
    entries
}
