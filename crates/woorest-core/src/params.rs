//! Caller-supplied query parameters.
//!
//! A [`ParameterSet`] is an insertion-ordered mapping whose values are either
//! scalars or one level of bracketed sub-keys (`filter[date]=2020`). Nested
//! values are flattened to `outer[inner]` keys before canonicalization.

use std::collections::BTreeMap;

/// A single parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// A plain string value.
    Scalar(String),
    /// Sub-keys rendered as `outer[inner]=value`.
    Nested(BTreeMap<String, String>),
}

impl ParamValue {
    /// Build a nested value from `(inner_key, value)` pairs.
    ///
    /// Later pairs overwrite earlier ones with the same inner key.
    pub fn nested<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::Nested(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_owned())
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        Self::Scalar(value.clone())
    }
}

impl From<BTreeMap<String, String>> for ParamValue {
    fn from(value: BTreeMap<String, String>) -> Self {
        Self::Nested(value)
    }
}

macro_rules! impl_scalar_from_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    Self::Scalar(value.to_string())
                }
            }
        )*
    };
}

impl_scalar_from_display!(bool, i32, i64, u8, u16, u32, u64, usize, f64);

/// An ordered set of query parameters with unique top-level keys.
///
/// # Examples
///
/// ```
/// use woorest_core::{ParamValue, ParameterSet};
///
/// let params = ParameterSet::new()
///     .with("per_page", 5)
///     .with("filter", ParamValue::nested([("date", "2020")]));
///
/// assert_eq!(
///     params.flatten(),
///     vec![
///         ("per_page".to_owned(), "5".to_owned()),
///         ("filter[date]".to_owned(), "2020".to_owned()),
///     ]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    entries: Vec<(String, ParamValue)>,
}

impl ParameterSet {
    /// Create an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parameter, replacing any existing value for `key` in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up the value stored under a top-level key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Number of top-level entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over top-level entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Flatten into `(key, value)` pairs, expanding nested values to
    /// `outer[inner]` keys. Order follows insertion order.
    #[must_use]
    pub fn flatten(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.entries.len());
        for (key, value) in &self.entries {
            match value {
                ParamValue::Scalar(v) => pairs.push((key.clone(), v.clone())),
                ParamValue::Nested(inner) => {
                    pairs.extend(inner.iter().map(|(k, v)| (format!("{key}[{k}]"), v.clone())));
                }
            }
        }
        pairs
    }
}

impl<K, V> FromIterator<(K, V)> for ParameterSet
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for ParameterSet
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}
