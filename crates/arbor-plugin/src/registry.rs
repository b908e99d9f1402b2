// SPDX-FileCopyrightText: 2026 Arbor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The finalized, priority-ordered collection of discovered plugins.
//!
//! The registry follows an append-then-freeze discipline: discovery builds a
//! candidate list, [`PluginRegistry::freeze`] sorts it once, and from then on
//! the registry only offers read-only iteration. Nothing can be inserted
//! after the freeze.

use std::sync::Arc;

use crate::module::LoadedModule;

/// One discovered extension package.
#[derive(Debug, Clone)]
pub struct Plugin {
    /// Unique identifier, from the manifest.
    pub id: String,
    /// Display name, from the manifest.
    pub name: String,
    /// Higher priorities load and start earlier.
    pub load_priority: i32,
    /// The plugin's loaded binary modules; empty for manifest-only plugins.
    pub modules: Vec<Arc<LoadedModule>>,
}

/// Read-only, priority-ordered plugin collection.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    plugins: Vec<Plugin>,
}

impl PluginRegistry {
    /// Sorts the discovered candidates into their final order and freezes
    /// the collection.
    ///
    /// Order is descending `load_priority`; equal priorities tie-break
    /// lexicographically by plugin id so the result never depends on
    /// directory enumeration order.
    pub(crate) fn freeze(mut candidates: Vec<Plugin>) -> Self {
        candidates.sort_by(|a, b| {
            b.load_priority
                .cmp(&a.load_priority)
                .then_with(|| a.id.cmp(&b.id))
        });
        Self {
            plugins: candidates,
        }
    }

    /// Iterates plugins in descending-priority order.
    pub fn iter(&self) -> impl Iterator<Item = &Plugin> {
        self.plugins.iter()
    }

    /// Looks up a plugin by id.
    pub fn get(&self, id: &str) -> Option<&Plugin> {
        self.plugins.iter().find(|p| p.id == id)
    }

    /// Number of registered plugins.
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// True when no plugins were discovered.
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl<'a> IntoIterator for &'a PluginRegistry {
    type Item = &'a Plugin;
    type IntoIter = std::slice::Iter<'a, Plugin>;

    fn into_iter(self) -> Self::IntoIter {
        self.plugins.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plugin(id: &str, load_priority: i32) -> Plugin {
        Plugin {
            id: id.to_string(),
            name: format!("Plugin {id}"),
            load_priority,
            modules: Vec::new(),
        }
    }

    fn ids(registry: &PluginRegistry) -> Vec<&str> {
        registry.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn freeze_orders_by_descending_priority() {
        let registry = PluginRegistry::freeze(vec![
            plugin("low", 1),
            plugin("high", 10),
            plugin("mid", 5),
        ]);
        assert_eq!(ids(&registry), vec!["high", "mid", "low"]);
    }

    #[test]
    fn freeze_order_is_independent_of_discovery_order() {
        let forward = PluginRegistry::freeze(vec![plugin("a", 3), plugin("b", 7)]);
        let reverse = PluginRegistry::freeze(vec![plugin("b", 7), plugin("a", 3)]);
        assert_eq!(ids(&forward), ids(&reverse));
    }

    #[test]
    fn equal_priorities_tie_break_by_id() {
        let registry = PluginRegistry::freeze(vec![
            plugin("zeta", 5),
            plugin("alpha", 5),
            plugin("mu", 5),
        ]);
        assert_eq!(ids(&registry), vec!["alpha", "mu", "zeta"]);
    }

    #[test]
    fn get_finds_plugin_by_id() {
        let registry = PluginRegistry::freeze(vec![plugin("crm", 2)]);
        assert_eq!(registry.get("crm").unwrap().name, "Plugin crm");
        assert!(registry.get("absent").is_none());
    }

    #[test]
    fn len_and_is_empty() {
        let empty = PluginRegistry::freeze(Vec::new());
        assert!(empty.is_empty());
        assert_eq!(empty.len(), 0);

        let one = PluginRegistry::freeze(vec![plugin("crm", 0)]);
        assert!(!one.is_empty());
        assert_eq!(one.len(), 1);
    }
}
