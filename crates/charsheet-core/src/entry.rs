//! Ordered, name-indexed collections of rule entries

use std::sync::Arc;

use crate::error::SheetError;

/// Anything that can be looked up by name
pub trait Named {
    fn name(&self) -> &str;
}

impl<T: Named + ?Sized> Named for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }
}

/// An ordered collection of named entries.
///
/// Lookup by name is case-insensitive and returns the first match. Duplicate
/// names are accepted, but only the first of them is reachable by name.
#[derive(Debug, Clone)]
pub struct EntryManager<T> {
    kind: &'static str,
    entries: Vec<T>,
}

impl<T: Named> EntryManager<T> {
    /// Create an empty manager; `kind` names the entries in lookup errors
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, entry: T) {
        self.entries.push(entry);
    }

    /// First entry whose name matches, ignoring case
    pub fn by_name(&self, name: &str) -> Result<&T, SheetError> {
        self.entries
            .iter()
            .find(|entry| entry.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| SheetError::not_found(self.kind, name))
    }

    pub fn by_name_mut(&mut self, name: &str) -> Result<&mut T, SheetError> {
        let kind = self.kind;
        self.entries
            .iter_mut()
            .find(|entry| entry.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| SheetError::not_found(kind, name))
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.name().eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Named + Clone> EntryManager<T> {
    /// Snapshot of every entry in insertion order
    pub fn all(&self) -> Vec<T> {
        self.entries.clone()
    }
}

impl<T: Named + ?Sized> EntryManager<Arc<T>> {
    /// Whether this exact entry (not merely one with the same name) is held
    pub fn contains(&self, entry: &Arc<T>) -> bool {
        self.entries.iter().any(|e| Arc::ptr_eq(e, entry))
    }

    /// Remove this exact entry, returning it if it was held
    pub fn remove(&mut self, entry: &Arc<T>) -> Option<Arc<T>> {
        let index = self.entries.iter().position(|e| Arc::ptr_eq(e, entry))?;
        Some(self.entries.remove(index))
    }
}

impl<'a, T> IntoIterator for &'a EntryManager<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Entry {
        name: String,
        tag: u32,
    }

    impl Named for Entry {
        fn name(&self) -> &str {
            &self.name
        }
    }

    fn entry(name: &str, tag: u32) -> Entry {
        Entry {
            name: name.to_string(),
            tag,
        }
    }

    #[test]
    fn test_by_name_ignores_case() {
        let mut manager = EntryManager::new("entry");
        manager.add(entry("Grit", 1));
        assert_eq!(manager.by_name("grit").unwrap().tag, 1);
        assert_eq!(manager.by_name("GRIT").unwrap().tag, 1);
    }

    #[test]
    fn test_by_name_missing() {
        let manager: EntryManager<Entry> = EntryManager::new("feature");
        let err = manager.by_name("flight").unwrap_err();
        assert!(matches!(err, SheetError::NotFound { kind: "feature", .. }));
    }

    #[test]
    fn test_duplicates_resolve_to_first() {
        let mut manager = EntryManager::new("entry");
        manager.add(entry("twin", 1));
        manager.add(entry("TWIN", 2));
        assert_eq!(manager.len(), 2);
        assert_eq!(manager.by_name("twin").unwrap().tag, 1);
    }

    #[test]
    fn test_all_is_a_snapshot() {
        let mut manager = EntryManager::new("entry");
        manager.add(entry("a", 1));
        let mut snapshot = manager.all();
        snapshot.push(entry("b", 2));
        snapshot[0].tag = 9;
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.by_name("a").unwrap().tag, 1);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut manager = EntryManager::new("entry");
        for (i, name) in ["c", "a", "b"].iter().enumerate() {
            manager.add(entry(name, i as u32));
        }
        assert_eq!(manager.names(), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_by_name_mut() {
        let mut manager = EntryManager::new("entry");
        manager.add(entry("a", 1));
        manager.by_name_mut("A").unwrap().tag = 5;
        assert_eq!(manager.by_name("a").unwrap().tag, 5);
    }

    #[test]
    fn test_shared_entries_use_identity() {
        let first = Arc::new(entry("same", 1));
        let lookalike = Arc::new(entry("same", 1));

        let mut manager = EntryManager::new("entry");
        manager.add(Arc::clone(&first));

        assert!(manager.contains(&first));
        assert!(!manager.contains(&lookalike));
        assert!(manager.remove(&lookalike).is_none());
        assert!(manager.remove(&first).is_some());
        assert!(manager.is_empty());
    }
}
