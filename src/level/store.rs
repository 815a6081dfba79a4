//! Level template registry

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use super::{load_level, load_level_from_str, LevelDefinition, LevelError, DEFAULT_LEVEL_RON};

/// Named level templates.
///
/// `instantiate` hands out deep copies so a running level can never alias
/// the registered template (or another running level).
#[derive(Debug, Default)]
pub struct LevelStore {
    templates: HashMap<String, LevelDefinition>,
}

impl LevelStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the level embedded in the binary
    pub fn with_builtin() -> Result<Self, LevelError> {
        let mut store = Self::new();
        let level = load_level_from_str(DEFAULT_LEVEL_RON)?;
        let key = level.key.clone();
        store.register(&key, level);
        Ok(store)
    }

    /// Store a template under `key`, silently replacing any previous one
    pub fn register(&mut self, key: &str, definition: LevelDefinition) {
        debug!(key, placements = definition.placement_count(), "registered level");
        self.templates.insert(key.to_string(), definition);
    }

    /// Fresh, independent copy of the template registered under `key`
    pub fn instantiate(&self, key: &str) -> Result<LevelDefinition, LevelError> {
        self.templates
            .get(key)
            .cloned()
            .ok_or_else(|| LevelError::NotFound { key: key.to_string() })
    }

    /// All registered keys, in no particular order
    pub fn list_keys(&self) -> Vec<String> {
        self.templates.keys().cloned().collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.templates.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Register every `.ron` / `.ron.br` file in `dir`, keyed by each level's
    /// own `key`. Files that fail to load are logged and skipped.
    /// Returns how many levels were registered.
    pub fn load_dir<P: AsRef<Path>>(&mut self, dir: P) -> Result<usize, LevelError> {
        let dir = dir.as_ref();
        let mut paths: Vec<_> = fs::read_dir(dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                let name = p.file_name().and_then(|n| n.to_str()).unwrap_or("");
                name.ends_with(".ron") || name.ends_with(".ron.br")
            })
            .collect();
        paths.sort();

        let mut count = 0;
        for path in paths {
            match load_level(&path) {
                Ok(level) => {
                    let key = level.key.clone();
                    self.register(&key, level);
                    count += 1;
                }
                Err(e) => warn!(path = %path.display(), error = %e, "skipping level file"),
            }
        }

        info!(dir = %dir.display(), count, "loaded level directory");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{save_level, Platform, DEFAULT_LEVEL_KEY};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    #[test]
    fn test_instantiate_unknown_key() {
        let store = LevelStore::new();
        match store.instantiate("missing") {
            Err(LevelError::NotFound { key }) => assert_eq!(key, "missing"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_instances_are_independent() {
        let mut store = LevelStore::new();
        let mut def = LevelDefinition::empty("a", 1000.0, 500.0);
        def.platforms.push(Platform { x: 10.0, y: 20.0, width: 100.0 });
        store.register("a", def);

        let mut first = store.instantiate("a").unwrap();
        first.platforms[0].width = 1.0;
        first.coins.clear();
        first.goal_x = 1.0;

        let second = store.instantiate("a").unwrap();
        assert_eq!(second.platforms[0].width, 100.0);
        assert_eq!(second.goal_x, 1000.0);
    }

    #[test]
    fn test_register_overwrites() {
        let mut store = LevelStore::new();
        store.register("a", LevelDefinition::empty("a", 1000.0, 500.0));
        store.register("a", LevelDefinition::empty("a", 2000.0, 500.0));
        assert_eq!(store.len(), 1);
        assert_eq!(store.instantiate("a").unwrap().bounds.width, 2000.0);
    }

    #[test]
    fn test_list_keys() {
        let mut store = LevelStore::new();
        store.register("one", LevelDefinition::empty("one", 10.0, 10.0));
        store.register("two", LevelDefinition::empty("two", 10.0, 10.0));
        let mut keys = store.list_keys();
        keys.sort();
        assert_eq!(keys, vec!["one".to_string(), "two".to_string()]);
    }

    #[test]
    fn test_with_builtin() {
        let store = LevelStore::with_builtin().unwrap();
        assert!(store.contains(DEFAULT_LEVEL_KEY));
    }

    #[test]
    fn test_load_dir_skips_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        save_level(&LevelDefinition::empty("packed", 800.0, 400.0), dir.path().join("packed.ron.br")).unwrap();
        fs::write(dir.path().join("plain.ron"), "(key: \"plain\", bounds: (width: 10.0, height: 10.0), goal_x: 5.0)").unwrap();
        fs::write(dir.path().join("broken.ron"), "(key: ").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let mut store = LevelStore::new();
        let count = store.load_dir(dir.path()).unwrap();
        assert_eq!(count, 2);
        assert!(store.contains("packed"));
        assert!(store.contains("plain"));
    }

    /// Counts WARN events seen while installed
    struct WarnCounter(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for WarnCounter {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == tracing::Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[test]
    fn test_bad_file_warns_once() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.ron"), "(key: ").unwrap();

        let warnings = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(WarnCounter(warnings.clone()));
        let mut store = LevelStore::new();
        let count = tracing::subscriber::with_default(subscriber, || store.load_dir(dir.path()).unwrap());

        assert_eq!(count, 0);
        assert_eq!(warnings.load(Ordering::SeqCst), 1);
    }
}
