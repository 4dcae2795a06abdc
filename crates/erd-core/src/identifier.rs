//! Identifier management using string interning for table, column and relation names
//!
//! This module provides the [`Id`] type backed by a process-wide string interner.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock, PoisonError},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Names seen by any parse in this process.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        // interning never leaves the table half-updated
        .unwrap_or_else(PoisonError::into_inner)
}

/// Interned name of a table, column or relation endpoint.
///
/// Two `Id`s compare equal exactly when their names are equal, so relation
/// endpoints can be matched against table names without string comparisons.
///
/// # Examples
///
/// ```
/// use erd_core::identifier::Id;
///
/// let person = Id::new("Person");
/// assert_eq!(person, "Person");
/// assert_eq!(person, Id::new("Person"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match interner().resolve(self.0) {
            Some(name) => f.write_str(name),
            None => Err(fmt::Error),
        }
    }
}

impl From<&str> for Id {
    /// Creates an `Id` from a string slice
    ///
    /// # Examples
    ///
    /// ```
    /// use erd_core::identifier::Id;
    ///
    /// let id: Id = "Car".into();
    /// assert_eq!(id, "Car");
    /// ```
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        interner().resolve(self.0) == Some(other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let id1 = Id::new("Person");
        let id2 = Id::new("Person");
        let id3 = Id::new("Car");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
        assert_eq!(id1, "Person");
    }

    #[test]
    fn test_display_trait() {
        let id = Id::new("user_account");
        assert_eq!(format!("{id}"), "user_account");
    }

    #[test]
    fn test_from_trait() {
        let id1: Id = "order_line".into();
        let id2 = Id::new("order_line");

        assert_eq!(id1, id2);
    }

    #[test]
    fn test_partial_eq_str() {
        let id = Id::new("Car");

        assert!(id == "Car");
        assert!(id != "car");

        let slice: &str = "Car";
        assert!(id == slice);
    }

    #[test]
    fn test_hash_and_eq() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(Id::new("key1"), "value1");
        map.insert(Id::new("key2"), "value2");

        assert_eq!(map.get(&Id::new("key1")), Some(&"value1"));
        assert_eq!(map.len(), 2);
    }
}
