//! `PropertySet` and related types for pass communication.
//!
//! Passes share data through a [`PropertySet`]: a type-keyed map threaded
//! through every pass of a [`PassManager`](crate::PassManager) run. A pass
//! may ignore it entirely; the rewrite passes use it to leave a
//! [`RewriteStats`] record behind.
//!
//! # Example
//!
//! ```
//! use qrew_compile::PropertySet;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct OptimizationStats {
//!     gates_removed: usize,
//! }
//!
//! let mut props = PropertySet::new();
//! props.insert(OptimizationStats { gates_removed: 15 });
//!
//! let stats = props.get::<OptimizationStats>().unwrap();
//! assert_eq!(stats.gates_removed, 15);
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::any::{Any, TypeId};

/// One rewrite rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteRecord {
    /// Name of the rule.
    pub rule: String,
    /// Number of operations replaced.
    pub replaced: usize,
}

/// Log of rewrite rule applications, in run order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteStats {
    /// Applications so far.
    pub entries: Vec<RewriteRecord>,
}

impl RewriteStats {
    /// Record one application.
    pub fn record(&mut self, rule: impl Into<String>, replaced: usize) {
        self.entries.push(RewriteRecord {
            rule: rule.into(),
            replaced,
        });
    }

    /// Total operations replaced by `rule` across all runs.
    pub fn replaced_by(&self, rule: &str) -> usize {
        self.entries
            .iter()
            .filter(|e| e.rule == rule)
            .map(|e| e.replaced)
            .sum()
    }

    /// Total operations replaced.
    pub fn total_replaced(&self) -> usize {
        self.entries.iter().map(|e| e.replaced).sum()
    }
}

/// Properties shared between passes.
#[derive(Default)]
pub struct PropertySet {
    /// Custom properties storage (type-erased).
    custom: FxHashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl PropertySet {
    /// Create a new empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a custom property, replacing any value of the same type.
    pub fn insert<T: Any + Send + Sync>(&mut self, value: T) {
        self.custom.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// Get a custom property.
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.custom
            .get(&TypeId::of::<T>())
            .and_then(|v| v.downcast_ref())
    }

    /// Get a mutable custom property.
    pub fn get_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.custom
            .get_mut(&TypeId::of::<T>())
            .and_then(|v| v.downcast_mut())
    }

    /// Remove a custom property.
    pub fn remove<T: Any>(&mut self) -> Option<T> {
        self.custom
            .remove(&TypeId::of::<T>())
            .and_then(|v| v.downcast().ok())
            .map(|v| *v)
    }

    /// Check if a custom property of type `T` is present.
    pub fn contains<T: Any>(&self) -> bool {
        self.custom.contains_key(&TypeId::of::<T>())
    }

    /// Number of stored properties.
    pub fn len(&self) -> usize {
        self.custom.len()
    }

    /// Check if no properties are stored.
    pub fn is_empty(&self) -> bool {
        self.custom.is_empty()
    }
}

impl std::fmt::Debug for PropertySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertySet")
            .field("len", &self.custom.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::items_after_statements)]
    fn test_property_set_custom() {
        let mut props = PropertySet::new();

        #[derive(Debug, PartialEq)]
        struct CustomData(i32);

        props.insert(CustomData(42));
        assert!(props.contains::<CustomData>());
        assert_eq!(props.get::<CustomData>(), Some(&CustomData(42)));

        props.get_mut::<CustomData>().unwrap().0 = 7;
        let removed = props.remove::<CustomData>();
        assert_eq!(removed, Some(CustomData(7)));
        assert_eq!(props.get::<CustomData>(), None);
        assert!(props.is_empty());
    }

    #[test]
    fn test_rewrite_stats() {
        let mut props = PropertySet::new();
        props.insert(RewriteStats::default());
        let stats = props.get_mut::<RewriteStats>().unwrap();
        stats.record("cz_to_cnot", 2);
        stats.record("swap_to_cnot", 1);
        stats.record("cz_to_cnot", 3);

        let stats = props.get::<RewriteStats>().unwrap();
        assert_eq!(stats.entries.len(), 3);
        assert_eq!(stats.replaced_by("cz_to_cnot"), 5);
        assert_eq!(stats.total_replaced(), 6);
        assert_eq!(props.len(), 1);
    }

    #[test]
    fn test_rewrite_stats_serde() {
        let mut stats = RewriteStats::default();
        stats.record("cz_to_cnot", 4);
        let json = serde_json::to_string(&stats).unwrap();
        assert_eq!(json, r#"{"entries":[{"rule":"cz_to_cnot","replaced":4}]}"#);
    }
}
