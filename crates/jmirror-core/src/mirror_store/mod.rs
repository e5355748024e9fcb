//! URL → mirror URL map that makes repeated runs incremental.
//!
//! The store is loaded once at start, mutated while the crawl mirrors
//! resources, and saved once at the end. A URL present in the store is never
//! fetched again. There is no invalidation: if the remote document changes,
//! the old mirror stays until the entry is removed from the cache file.
//!
//! Besides the persisted map, the store tracks which file name belongs to
//! which source URL so that two URLs deriving the same name do not silently
//! overwrite each other.

mod persist;

use std::collections::{BTreeMap, HashMap};

use crate::storage::OutputLayout;
use crate::url_model;

#[derive(Debug, Default, Clone)]
pub struct MirrorStore {
    entries: BTreeMap<String, String>,
    /// file name -> source URL
    owners: HashMap<String, String>,
}

impl MirrorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: BTreeMap<String, String>) -> Self {
        Self {
            entries,
            owners: HashMap::new(),
        }
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains_key(url)
    }

    pub fn get(&self, url: &str) -> Option<&str> {
        self.entries.get(url).map(String::as_str)
    }

    /// Inserts or overwrites the mirror URL for `url`.
    pub fn record(&mut self, url: &str, mirror_url: String) {
        self.entries.insert(url.to_string(), mirror_url);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in source-URL order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    /// Registers the files already published under `layout` as owned by their
    /// source URLs. Called after loading so names from earlier runs are honored.
    pub fn adopt_layout(&mut self, layout: &OutputLayout) {
        for (url, mirror) in &self.entries {
            if let Some(name) = layout.file_name_of(mirror) {
                self.owners
                    .entry(name.to_string())
                    .or_insert_with(|| url.clone());
            }
        }
    }

    /// Gives `name` to `owner` unconditionally. Used for the root document
    /// (owned by the root URL) and for the URL map file (owned by no URL).
    pub fn reserve_file_name(&mut self, name: &str, owner: &str) {
        self.owners.insert(name.to_string(), owner.to_string());
    }

    /// Drops every entry except `keep` that points at `mirror_url`.
    /// Returns the source URLs removed.
    pub fn remove_entries_for_mirror(&mut self, mirror_url: &str, keep: &str) -> Vec<String> {
        let stale: Vec<String> = self
            .entries
            .iter()
            .filter(|(url, mirror)| mirror.as_str() == mirror_url && url.as_str() != keep)
            .map(|(url, _)| url.clone())
            .collect();
        for url in &stale {
            self.entries.remove(url);
        }
        stale
    }

    /// Returns the file name `url` should be written to, without claiming it.
    ///
    /// `candidate` is used when it is free or already owned by `url`. If another
    /// owner holds it, a name tagged with a hash of `url` is returned instead.
    pub fn resolve_file_name(&self, url: &str, candidate: String) -> String {
        match self.owners.get(&candidate) {
            Some(owner) if owner != url => {
                let tagged = url_model::disambiguate(&candidate, url);
                tracing::warn!(
                    "file name {} already used by {:?}; writing {} as {}",
                    candidate,
                    owner,
                    url,
                    tagged
                );
                tagged
            }
            _ => candidate,
        }
    }

    /// Marks `name` as owned by `url`. Called once the file has been written.
    pub fn claim_file_name(&mut self, name: &str, url: &str) {
        self.owners.insert(name.to_string(), url.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_and_lookup() {
        let mut store = MirrorStore::new();
        assert!(store.is_empty());
        store.record("http://x/y", "http://mirror/y.json".to_string());
        assert!(store.contains("http://x/y"));
        assert_eq!(store.get("http://x/y"), Some("http://mirror/y.json"));
        assert!(!store.contains("http://x/z"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn record_overwrites() {
        let mut store = MirrorStore::new();
        store.record("http://x/y", "http://mirror/old.json".to_string());
        store.record("http://x/y", "http://mirror/new.json".to_string());
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("http://x/y"), Some("http://mirror/new.json"));
    }

    #[test]
    fn iter_is_sorted_by_source_url() {
        let mut store = MirrorStore::new();
        store.record("http://b", "m2".to_string());
        store.record("http://a", "m1".to_string());
        let keys: Vec<&str> = store.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["http://a", "http://b"]);
    }

    #[test]
    fn claim_same_url_twice_keeps_name() {
        let mut store = MirrorStore::new();
        let a = store.resolve_file_name("http://h/feed", "feed.json".to_string());
        store.claim_file_name(&a, "http://h/feed");
        let b = store.resolve_file_name("http://h/feed", "feed.json".to_string());
        assert_eq!(a, "feed.json");
        assert_eq!(b, "feed.json");
    }

    #[test]
    fn claim_collision_is_disambiguated() {
        let mut store = MirrorStore::new();
        let a = store.resolve_file_name("http://h/a/b", "a_b.json".to_string());
        store.claim_file_name(&a, "http://h/a/b");
        let b = store.resolve_file_name("http://h/a?b", "a_b.json".to_string());
        assert_eq!(a, "a_b.json");
        assert_ne!(b, a);
        assert!(b.starts_with("a_b-"));
    }

    #[test]
    fn adopt_layout_protects_names_from_previous_runs() {
        let layout = OutputLayout::new("out", "https://cdn/out");
        let mut entries = BTreeMap::new();
        entries.insert(
            "http://h/a/b".to_string(),
            "https://cdn/out/a_b.json".to_string(),
        );
        let mut store = MirrorStore::from_entries(entries);
        store.adopt_layout(&layout);

        let name = store.resolve_file_name("http://h/a_b", "a_b.json".to_string());
        assert_ne!(name, "a_b.json");
    }

    #[test]
    fn unclaimed_name_stays_free() {
        let mut store = MirrorStore::new();
        let _ = store.resolve_file_name("http://h/a/b", "a_b.json".to_string());
        let name = store.resolve_file_name("http://h/a?b", "a_b.json".to_string());
        assert_eq!(name, "a_b.json");
        store.claim_file_name(&name, "http://h/a?b");
        assert_ne!(
            store.resolve_file_name("http://h/a/b", "a_b.json".to_string()),
            "a_b.json"
        );
    }

    #[test]
    fn reserved_name_is_never_handed_out() {
        let mut store = MirrorStore::new();
        store.reserve_file_name("url_map.json", "");
        let name = store.resolve_file_name("http://h/url_map", "url_map.json".to_string());
        assert_ne!(name, "url_map.json");
    }

    #[test]
    fn remove_entries_for_mirror_keeps_current_owner() {
        let mut store = MirrorStore::new();
        store.record("http://old/root", "https://cdn/out/main.json".to_string());
        store.record("http://new/root", "https://cdn/out/main.json".to_string());
        store.record("http://x/a", "https://cdn/out/a.json".to_string());
        let removed = store.remove_entries_for_mirror("https://cdn/out/main.json", "http://new/root");
        assert_eq!(removed, vec!["http://old/root".to_string()]);
        assert!(store.contains("http://new/root"));
        assert!(store.contains("http://x/a"));
        assert_eq!(store.len(), 2);
    }
}
