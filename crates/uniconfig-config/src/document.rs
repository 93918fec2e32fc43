//! Configuration documents and top-level key comparison.

use crate::error::{ConfigError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A parsed configuration file: string keys mapped to TOML values.
///
/// Equality is structural. Keys are kept in sorted order, so two documents
/// with the same entries compare equal regardless of how they were written.
/// Values compare as numbers across integers and floats (`8080 == 8080.0`),
/// and a NaN float equals another NaN.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigDocument(toml::Table);

/// Difference between two documents' top-level key sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyDrift {
    /// Keys of the baseline absent from the compared document.
    pub missing: Vec<String>,
    /// Keys of the compared document absent from the baseline.
    pub unexpected: Vec<String>,
}

impl KeyDrift {
    /// True when both key sets are equal.
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.unexpected.is_empty()
    }
}

impl ConfigDocument {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses TOML text into a document.
    pub fn from_toml_str(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text).map(Self)
    }

    /// Renders the document as TOML text.
    pub fn to_toml_string(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string(&self.0)
    }

    /// Builds a document from any value that serializes to a TOML table,
    /// such as a `#[derive(Serialize)]` settings struct.
    pub fn from_serializable<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        match toml::Value::try_from(value).map_err(ConfigError::Encode)? {
            toml::Value::Table(table) => Ok(Self(table)),
            other => Err(ConfigError::NotATable(other.type_str())),
        }
    }

    /// Converts the document into a typed value.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(toml::Value::Table(self.0.clone()).try_into()?)
    }

    /// Looks up a top-level value.
    pub fn get(&self, key: &str) -> Option<&toml::Value> {
        self.0.get(key)
    }

    /// Whether a top-level key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Inserts a top-level value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<toml::Value>) -> Option<toml::Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Number of top-level keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the document has no keys at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The first-level key names, sorted.
    pub fn top_level_keys(&self) -> BTreeSet<&str> {
        self.0.keys().map(String::as_str).collect()
    }

    /// Compares top-level keys against `baseline`. Nested tables are not
    /// inspected.
    pub fn key_drift(&self, baseline: &Self) -> KeyDrift {
        let ours = self.top_level_keys();
        let theirs = baseline.top_level_keys();

        KeyDrift {
            missing: theirs.difference(&ours).map(|k| (*k).to_string()).collect(),
            unexpected: ours.difference(&theirs).map(|k| (*k).to_string()).collect(),
        }
    }

    /// Borrows the underlying table.
    pub const fn as_table(&self) -> &toml::Table {
        &self.0
    }

    /// Unwraps the underlying table.
    pub fn into_table(self) -> toml::Table {
        self.0
    }
}

impl From<toml::Table> for ConfigDocument {
    fn from(table: toml::Table) -> Self {
        Self(table)
    }
}

impl From<ConfigDocument> for toml::Table {
    fn from(document: ConfigDocument) -> Self {
        document.0
    }
}

impl<K: Into<String>, V: Into<toml::Value>> FromIterator<(K, V)> for ConfigDocument {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

fn tables_equal(a: &toml::Table, b: &toml::Table) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .all(|(key, value)| b.get(key).is_some_and(|other| values_equal(value, other)))
}

// The float must be integral and convert back without rounding.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn int_equals_float(int: i64, float: f64) -> bool {
    float.fract() == 0.0 && float >= i64::MIN as f64 && float < i64::MAX as f64 && float as i64 == int
}

/// Structural equality of two TOML values.
pub fn values_equal(a: &toml::Value, b: &toml::Value) -> bool {
    use toml::Value;

    match (a, b) {
        (Value::Float(x), Value::Float(y)) => x == y || (x.is_nan() && y.is_nan()),
        (Value::Integer(i), Value::Float(f)) | (Value::Float(f), Value::Integer(i)) => {
            int_equals_float(*i, *f)
        }
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Table(x), Value::Table(y)) => tables_equal(x, y),
        _ => a == b,
    }
}

impl PartialEq for ConfigDocument {
    fn eq(&self, other: &Self) -> bool {
        tables_equal(&self.0, &other.0)
    }
}

impl fmt::Display for ConfigDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.to_toml_string().map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}
