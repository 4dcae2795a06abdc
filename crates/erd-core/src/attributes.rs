//! Ordered key-value metadata attached to titles, tables, columns and relations.

use indexmap::IndexMap;

/// Insertion-ordered attribute map.
///
/// Re-inserting an existing key replaces its value but keeps the position of
/// the first insertion, so `{a: 1, b: 2, a: 3}` iterates as `a = 3, b = 2`.
///
/// # Examples
///
/// ```
/// use erd_core::attributes::Attributes;
///
/// let mut attributes = Attributes::new();
/// attributes.insert("color", "blue");
/// attributes.insert("label", "Person");
///
/// assert_eq!(attributes.get("color"), Some("blue"));
/// assert_eq!(attributes.keys().collect::<Vec<_>>(), ["color", "label"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(IndexMap<String, String>);

impl Attributes {
    /// Create an empty attribute map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key-value pair, returning the replaced value if the key was present.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Look up the value of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Key-value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Self::new();
        for (key, value) in iter {
            attributes.insert(key, value);
        }
        attributes
    }
}
