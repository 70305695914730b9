//! Named cache generations.
//!
//! `CacheStorage` is the registry of every generation that exists for the
//! worker's origin. Opening a name creates the generation on first use;
//! deleting a name drops the whole generation at once. Generations are
//! independent: nothing written to one is visible through another.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use crate::cache::providers::MemoryCacheProvider;
use crate::cache::traits::Cache;

/// Builds the backing store for a newly opened generation.
pub type CacheFactory = Arc<dyn Fn(&str) -> Arc<dyn Cache> + Send + Sync>;

/// Registry of named cache generations.
pub struct CacheStorage {
    generations: DashMap<String, Arc<dyn Cache>>,
    factory: CacheFactory,
}

impl CacheStorage {
    /// Storage whose generations are in-memory moka stores.
    pub fn in_memory() -> Self {
        Self::with_factory(|_| Arc::new(MemoryCacheProvider::new()) as Arc<dyn Cache>)
    }

    /// Storage that builds each new generation with `factory`.
    pub fn with_factory<F>(factory: F) -> Self
    where
        F: Fn(&str) -> Arc<dyn Cache> + Send + Sync + 'static,
    {
        Self {
            generations: DashMap::new(),
            factory: Arc::new(factory),
        }
    }

    /// Open a generation, creating it if absent.
    pub fn open(&self, name: &str) -> Arc<dyn Cache> {
        if let Some(existing) = self.generations.get(name) {
            return Arc::clone(existing.value());
        }
        let entry = self.generations.entry(name.to_string()).or_insert_with(|| {
            debug!(cache = name, "Creating cache generation");
            (self.factory)(name)
        });
        Arc::clone(entry.value())
    }

    /// Look up a generation without creating it.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Cache>> {
        self.generations.get(name).map(|g| Arc::clone(g.value()))
    }

    pub fn has(&self, name: &str) -> bool {
        self.generations.contains_key(name)
    }

    /// Delete a generation and all of its entries.
    ///
    /// Returns `true` if the generation existed.
    pub fn delete(&self, name: &str) -> bool {
        self.generations.remove(name).is_some()
    }

    /// Names of all existing generations, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut names: Vec<String> = self.generations.iter().map(|g| g.key().clone()).collect();
        names.sort();
        names
    }
}

impl Default for CacheStorage {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl fmt::Debug for CacheStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheStorage")
            .field("generations", &self.keys())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_open_creates_once() {
        let created = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&created);
        let storage = CacheStorage::with_factory(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Arc::new(MemoryCacheProvider::new()) as Arc<dyn Cache>
        });

        let first = storage.open("app-v1");
        first.set("k", vec![1]).await.unwrap();
        let second = storage.open("app-v1");

        assert_eq!(created.load(Ordering::SeqCst), 1);
        assert_eq!(second.get("k").await.unwrap(), Some(vec![1]));
    }

    #[tokio::test]
    async fn test_generations_are_isolated() {
        let storage = CacheStorage::in_memory();

        storage.open("app-v1").set("k", vec![1]).await.unwrap();

        assert!(storage.open("app-v2").get("k").await.unwrap().is_none());
    }

    #[test]
    fn test_get_does_not_create() {
        let storage = CacheStorage::in_memory();
        assert!(storage.get("app-v1").is_none());
        assert!(!storage.has("app-v1"));
    }

    #[test]
    fn test_delete_and_keys() {
        let storage = CacheStorage::in_memory();
        storage.open("b");
        storage.open("a");

        assert_eq!(storage.keys(), vec!["a".to_string(), "b".to_string()]);
        assert!(storage.delete("a"));
        assert!(!storage.delete("a"));
        assert_eq!(storage.keys(), vec!["b".to_string()]);
    }
}
