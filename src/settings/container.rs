//! Definition container with batch extension registration
//!
//! Stands in for the host's already-validated settings tree. Extensions
//! hand over a batch of schema-node descriptors; the whole batch is
//! validated up front and inserted together with its cache entries, so a
//! rejected batch leaves the container untouched.

use std::collections::HashMap;

use super::definition::SettingDescriptor;
use crate::error::{ArcWeldError, Result};

/// A settings-definition tree with a flat key lookup cache.
pub struct DefinitionContainer {
    id: String,
    categories: Vec<SettingDescriptor>,
    // key -> index path into `categories` / nested `children`
    cache: HashMap<String, Vec<usize>>,
}

impl DefinitionContainer {
    /// Create an empty container.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            categories: Vec::new(),
            cache: HashMap::new(),
        }
    }

    /// Container identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Top-level categories, in insertion order.
    pub fn categories(&self) -> &[SettingDescriptor] {
        &self.categories
    }

    /// Seed a top-level category, as the host does when loading its own
    /// definition files.
    pub fn add_category(&mut self, category: SettingDescriptor) -> Result<()> {
        self.ensure_unseen(&category, &mut Vec::new())?;

        let index = self.categories.len();
        Self::cache_subtree(&mut self.cache, &category, vec![index]);
        self.categories.push(category);
        Ok(())
    }

    /// Look up a definition by key anywhere in the tree.
    pub fn definition(&self, key: &str) -> Option<&SettingDescriptor> {
        let path = self.cache.get(key)?;
        let mut node = self.categories.get(*path.first()?)?;
        for &index in &path[1..] {
            node = node.children.get(index)?;
        }
        Some(node)
    }

    /// Whether a key exists anywhere in the tree.
    pub fn contains(&self, key: &str) -> bool {
        self.cache.contains_key(key)
    }

    /// Register a batch of extension settings under an existing parent.
    ///
    /// The batch is validated as a whole before anything is inserted:
    /// the parent must exist and no key in the batch may collide with the
    /// tree or with another batch key. On success the nodes and their
    /// cache entries are added in one pass and all newly registered keys
    /// are returned, depth first.
    pub fn register_extension(
        &mut self,
        parent_key: &str,
        batch: Vec<SettingDescriptor>,
    ) -> Result<Vec<String>> {
        let parent_path = self
            .cache
            .get(parent_key)
            .ok_or_else(|| ArcWeldError::UnknownParent {
                key: parent_key.to_string(),
            })?
            .clone();

        let mut batch_keys = Vec::new();
        for descriptor in &batch {
            self.ensure_unseen(descriptor, &mut batch_keys)?;
        }

        let base_index = self.parent_node(&parent_path).children.len();
        let mut registered = Vec::new();
        for (offset, descriptor) in batch.into_iter().enumerate() {
            let mut path = parent_path.clone();
            path.push(base_index + offset);

            registered.extend(descriptor.all_keys().iter().map(|k| k.to_string()));
            Self::cache_subtree(&mut self.cache, &descriptor, path);
            self.parent_node_mut(&parent_path).children.push(descriptor);
        }

        Ok(registered)
    }

    fn parent_node(&self, path: &[usize]) -> &SettingDescriptor {
        let mut node = &self.categories[path[0]];
        for &index in &path[1..] {
            node = &node.children[index];
        }
        node
    }

    fn parent_node_mut(&mut self, path: &[usize]) -> &mut SettingDescriptor {
        let mut node = &mut self.categories[path[0]];
        for &index in &path[1..] {
            node = &mut node.children[index];
        }
        node
    }

    // Reject any key already in the tree or seen earlier in this batch.
    fn ensure_unseen(&self, descriptor: &SettingDescriptor, seen: &mut Vec<String>) -> Result<()> {
        for key in descriptor.all_keys() {
            if self.cache.contains_key(key) || seen.iter().any(|s| s == key) {
                return Err(ArcWeldError::DuplicateSetting {
                    key: key.to_string(),
                });
            }
            seen.push(key.to_string());
        }
        Ok(())
    }

    fn cache_subtree(
        cache: &mut HashMap<String, Vec<usize>>,
        descriptor: &SettingDescriptor,
        path: Vec<usize>,
    ) {
        for (index, child) in descriptor.children.iter().enumerate() {
            let mut child_path = path.clone();
            child_path.push(index);
            Self::cache_subtree(cache, child, child_path);
        }
        cache.insert(descriptor.key.clone(), path);
    }
}

/// Append the keys of newly registered settings that should start out
/// expanded in setting views.
///
/// A setting starts expanded when it has children and its parent is
/// already in the expanded set. The accumulator is passed explicitly; no
/// state is kept between calls.
pub fn collect_expanded(
    parent_key: &str,
    batch: &[SettingDescriptor],
    expanded: &mut Vec<String>,
) {
    for descriptor in batch {
        if !descriptor.children.is_empty() && expanded.iter().any(|key| key == parent_key) {
            if !expanded.iter().any(|key| key == &descriptor.key) {
                expanded.push(descriptor.key.clone());
            }
        }
        collect_expanded(&descriptor.key, &descriptor.children, expanded);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::definition::{load_bundled_descriptors, SettingKind};

    fn category(key: &str) -> SettingDescriptor {
        SettingDescriptor {
            key: key.to_string(),
            label: key.to_string(),
            description: String::new(),
            kind: SettingKind::Bool,
            unit: None,
            default_value: serde_json::json!(false),
            children: Vec::new(),
        }
    }

    fn seeded_container() -> DefinitionContainer {
        let mut container = DefinitionContainer::new("fdmprinter");
        container.add_category(category("blackmagic")).unwrap();
        container
    }

    #[test]
    fn test_register_bundled_settings() {
        let mut container = seeded_container();
        let batch = load_bundled_descriptors().unwrap();

        let registered = container.register_extension("blackmagic", batch).unwrap();

        assert_eq!(registered.len(), 8);
        assert!(container.contains("arcwelder_enable"));
        // nested child is reachable through the cache
        let tolerance = container.definition("arcwelder_tolerance").unwrap();
        assert_eq!(tolerance.unit.as_deref(), Some("%"));
    }

    #[test]
    fn test_unknown_parent_rejected() {
        let mut container = seeded_container();
        let batch = load_bundled_descriptors().unwrap();

        let result = container.register_extension("no_such_category", batch);

        assert!(matches!(result, Err(ArcWeldError::UnknownParent { .. })));
        assert!(!container.contains("arcwelder_enable"));
    }

    #[test]
    fn test_duplicate_batch_leaves_container_untouched() {
        let mut container = seeded_container();
        container
            .register_extension("blackmagic", vec![category("arcwelder_enable")])
            .unwrap();

        let result = container.register_extension("blackmagic", load_bundled_descriptors().unwrap());

        assert!(matches!(result, Err(ArcWeldError::DuplicateSetting { .. })));
        // first registration still present, second fully rejected
        assert!(container.contains("arcwelder_enable"));
        assert!(!container.contains("arcwelder_tolerance"));
    }

    #[test]
    fn test_duplicate_within_batch_rejected() {
        let mut container = seeded_container();

        let result = container.register_extension(
            "blackmagic",
            vec![category("arcwelder_enable"), category("arcwelder_enable")],
        );

        assert!(matches!(result, Err(ArcWeldError::DuplicateSetting { .. })));
        assert!(!container.contains("arcwelder_enable"));
    }

    #[test]
    fn test_collect_expanded_under_expanded_parent() {
        let batch = load_bundled_descriptors().unwrap();
        let mut expanded = vec!["blackmagic".to_string()];

        collect_expanded("blackmagic", &batch, &mut expanded);

        assert!(expanded.contains(&"arcwelder_enable".to_string()));
        // leaf children are not expanded entries
        assert!(!expanded.contains(&"arcwelder_tolerance".to_string()));
    }

    #[test]
    fn test_collect_expanded_under_collapsed_parent() {
        let batch = load_bundled_descriptors().unwrap();
        let mut expanded = Vec::new();

        collect_expanded("blackmagic", &batch, &mut expanded);

        assert!(expanded.is_empty());
    }
}
