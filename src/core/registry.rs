//! Level registry
//!
//! A registry is an immutable snapshot: adding a level builds a new one.
//! The logger swaps snapshots atomically, so readers never observe a
//! half-built registry.

use super::dispatch::{self, LogFn};
use super::error::{LoggerError, Result};
use super::level::{default_levels, Level};
use std::collections::{HashMap, HashSet};
use std::fmt;

#[derive(Clone)]
pub struct Registry {
    /// Sorted by `(number, name)`
    levels: Vec<Level>,
    /// Lowercase name to position in `levels`
    index: HashMap<String, usize>,
    /// One dispatcher per level name
    functions: HashMap<String, LogFn>,
}

impl Registry {
    /// Build a registry from the full set of desired levels.
    ///
    /// Entries earlier in `levels` take precedence over later entries with
    /// the same (case-insensitive) name, so callers list newer definitions
    /// first. The result is sorted by `(number, name)`.
    pub fn register<I>(levels: I) -> Result<Self>
    where
        I: IntoIterator<Item = Level>,
    {
        let mut seen = HashSet::new();
        let mut levels: Vec<Level> = levels
            .into_iter()
            .filter(|level| seen.insert(level.name().to_string()))
            .collect();

        if levels.is_empty() {
            return Err(LoggerError::config(
                "levels",
                "a logger needs at least one level",
            ));
        }
        if let Some(level) = levels.iter().find(|level| level.name().trim().is_empty()) {
            return Err(LoggerError::config(
                "levels",
                format!("level {} has an empty name", level.number()),
            ));
        }

        levels.sort();
        let index = levels
            .iter()
            .enumerate()
            .map(|(i, level)| (level.name().to_string(), i))
            .collect();
        let functions = levels
            .iter()
            .map(|level| (level.name().to_string(), dispatch::dispatcher(level.name())))
            .collect();

        Ok(Self {
            levels,
            index,
            functions,
        })
    }

    /// Registry holding the seven default levels
    pub fn defaults() -> Self {
        Self::register(default_levels()).expect("default levels are non-empty with distinct names")
    }

    /// New registry with `level` added; it replaces any level of the same name
    pub fn add(&self, level: Level) -> Result<Self> {
        Self::register(std::iter::once(level).chain(self.levels.iter().cloned()))
    }

    /// Case-insensitive lookup
    pub fn lookup(&self, name: &str) -> Result<&Level> {
        self.get(name)
            .ok_or_else(|| LoggerError::unknown_level(name, self.names()))
    }

    pub fn get(&self, name: &str) -> Option<&Level> {
        self.index
            .get(&name.to_lowercase())
            .map(|&i| &self.levels[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(&name.to_lowercase())
    }

    /// Dispatcher for a level name
    pub fn function(&self, name: &str) -> Option<&LogFn> {
        self.functions.get(&name.to_lowercase())
    }

    /// Level names in severity order
    pub fn names(&self) -> Vec<String> {
        self.levels
            .iter()
            .map(|level| level.name().to_string())
            .collect()
    }

    /// Levels in severity order
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// The least severe level
    pub fn lowest(&self) -> &Level {
        &self.levels[0]
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::defaults()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("levels", &self.levels)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_sorted() {
        let registry = Registry::defaults();
        assert_eq!(registry.len(), 7);
        assert_eq!(
            registry.names(),
            ["trace", "debug", "info", "success", "warning", "error", "critical"]
        );
        assert_eq!(registry.lowest().name(), "trace");
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = Registry::defaults();
        assert_eq!(registry.lookup("WARNING").unwrap().number(), 30);
        assert_eq!(registry.lookup("Success").unwrap().number(), 25);
        assert!(registry.contains("CrItIcAl"));
        assert!(registry.function("INFO").is_some());
    }

    #[test]
    fn test_lookup_unknown_lists_names() {
        let registry = Registry::defaults();
        let err = registry.lookup("nonexistent").unwrap_err();
        match &err {
            LoggerError::UnknownLevel { name, known } => {
                assert_eq!(name, "nonexistent");
                assert_eq!(known, &registry.names());
            }
            other => panic!("unexpected error: {:?}", other),
        }
        for name in registry.names() {
            assert!(err.to_string().contains(&name));
        }
    }

    #[test]
    fn test_add_inserts_in_order() {
        let registry = Registry::defaults()
            .add(Level::new("time", 23, "[cyan]", "⏰"))
            .unwrap();
        let names = registry.names();
        let pos = names.iter().position(|n| n == "time").unwrap();
        assert_eq!(names[pos - 1], "info");
        assert_eq!(names[pos + 1], "success");
        assert!(registry.function("time").is_some());
    }

    #[test]
    fn test_add_does_not_touch_original() {
        let original = Registry::defaults();
        let extended = original.add(Level::new("notice", 22, "", "")).unwrap();
        assert!(!original.contains("notice"));
        assert!(extended.contains("notice"));
    }

    #[test]
    fn test_duplicate_name_keeps_newest() {
        let registry = Registry::defaults()
            .add(Level::new("time", 23, "[cyan]", "old"))
            .unwrap()
            .add(Level::new("TIME", 45, "[red]", "new"))
            .unwrap();

        assert_eq!(registry.len(), 8);
        let time = registry.lookup("time").unwrap();
        assert_eq!(time.number(), 45);
        assert_eq!(time.icon(), "new");
        let names = registry.names();
        assert_eq!(names.iter().filter(|n| *n == "time").count(), 1);
        assert_eq!(names[names.len() - 2], "time");
    }

    #[test]
    fn test_ties_break_by_name() {
        let registry = Registry::register(vec![
            Level::new("zeta", 10, "", ""),
            Level::new("alpha", 10, "", ""),
        ])
        .unwrap();
        assert_eq!(registry.names(), ["alpha", "zeta"]);
    }

    #[test]
    fn test_empty_registry_rejected() {
        let err = Registry::register(Vec::new()).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = Registry::register(vec![Level::new("  ", 1, "", "")]).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }
}
