//! Name registry
//!
//! Tag tokens refer to named quantities defined outside the formula. A
//! [`Registry`] resolves such a name to a number when the expression is built.
//!
//! # Example
//!
//! ```rust
//! use tally_core::{Registry, StaticRegistry};
//!
//! let mut registry = StaticRegistry::new();
//! registry.define("Revenue", 100.0);
//!
//! assert_eq!(registry.lookup("Revenue"), Some(100.0));
//! assert_eq!(registry.lookup("revenue"), None);
//! ```

use ahash::AHashMap;
use std::collections::HashMap;
use std::hash::BuildHasher;
use std::sync::Arc;

/// Name → number lookup
pub trait Registry {
    /// Resolve `name`, if defined
    fn lookup(&self, name: &str) -> Option<f64>;
}

impl<R: Registry + ?Sized> Registry for &R {
    fn lookup(&self, name: &str) -> Option<f64> {
        (**self).lookup(name)
    }
}

impl<R: Registry + ?Sized> Registry for Box<R> {
    fn lookup(&self, name: &str) -> Option<f64> {
        (**self).lookup(name)
    }
}

impl<R: Registry + ?Sized> Registry for Arc<R> {
    fn lookup(&self, name: &str) -> Option<f64> {
        (**self).lookup(name)
    }
}

impl<S: BuildHasher> Registry for HashMap<String, f64, S> {
    fn lookup(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

/// Registry backed by a closure
pub struct FnRegistry<F>(pub F);

impl<F> Registry for FnRegistry<F>
where
    F: Fn(&str) -> Option<f64>,
{
    fn lookup(&self, name: &str) -> Option<f64> {
        (self.0)(name)
    }
}

/// Registry that resolves nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyRegistry;

impl Registry for EmptyRegistry {
    fn lookup(&self, _name: &str) -> Option<f64> {
        None
    }
}

/// In-memory registry
///
/// Names are matched exactly (case-sensitive).
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StaticRegistry {
    values: AHashMap<String, f64>,
}

impl StaticRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Define or redefine a name
    ///
    /// Returns the previous value, if any.
    pub fn define(&mut self, name: impl Into<String>, value: f64) -> Option<f64> {
        self.values.insert(name.into(), value)
    }

    /// Remove a name
    pub fn remove(&mut self, name: &str) -> Option<f64> {
        self.values.remove(name)
    }

    /// Check if a name is defined
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Iterate over all definitions
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Get the number of definitions
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Registry for StaticRegistry {
    fn lookup(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for StaticRegistry {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl From<HashMap<String, f64>> for StaticRegistry {
    fn from(map: HashMap<String, f64>) -> Self {
        map.into_iter().collect()
    }
}
