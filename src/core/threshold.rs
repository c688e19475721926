//! Threshold filter

use super::error::Result;
use super::level::Level;
use super::logger::Logger;
use super::registry::Registry;

/// The current minimum level, stored by lowercase name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Threshold {
    level: String,
}

impl Threshold {
    /// Threshold at a registered level
    pub fn new(registry: &Registry, name: &str) -> Result<Self> {
        let level = registry.lookup(name)?;
        Ok(Self {
            level: level.name().to_string(),
        })
    }

    /// Current threshold level name, lowercase
    pub fn get(&self) -> &str {
        &self.level
    }

    /// Change the threshold; unknown names leave it untouched
    pub fn set(&mut self, registry: &Registry, name: &str) -> Result<()> {
        *self = Self::new(registry, name)?;
        Ok(())
    }

    /// Whether a line at `candidate` passes this threshold
    pub fn is_enabled(&self, registry: &Registry, candidate: &Level) -> bool {
        registry
            .get(&self.level)
            .map_or(true, |current| candidate.number() >= current.number())
    }
}

/// Restores a logger's threshold when dropped
///
/// Used for temporary overrides: whatever happens while the guard is alive,
/// including an early return through `?`, the previous threshold comes back.
#[must_use = "the previous threshold is restored as soon as the guard is dropped"]
pub struct ThresholdGuard<'a> {
    logger: &'a Logger,
    previous: Threshold,
}

impl<'a> ThresholdGuard<'a> {
    pub(crate) fn new(logger: &'a Logger, previous: Threshold) -> Self {
        Self { logger, previous }
    }

    /// The threshold that will be restored
    pub fn previous(&self) -> &str {
        self.previous.get()
    }
}

impl Drop for ThresholdGuard<'_> {
    fn drop(&mut self) {
        self.logger.restore_threshold(self.previous.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::LoggerError;

    #[test]
    fn test_set_is_case_insensitive() {
        let registry = Registry::defaults();
        let mut threshold = Threshold::new(&registry, "info").unwrap();
        threshold.set(&registry, "DeBUg").unwrap();
        assert_eq!(threshold.get(), "debug");
    }

    #[test]
    fn test_unknown_name_keeps_previous() {
        let registry = Registry::defaults();
        let mut threshold = Threshold::new(&registry, "warning").unwrap();
        let err = threshold.set(&registry, "nonexistent").unwrap_err();
        assert!(matches!(err, LoggerError::UnknownLevel { .. }));
        assert_eq!(threshold.get(), "warning");
    }

    #[test]
    fn test_is_enabled_compares_numbers() {
        let registry = Registry::defaults();
        let threshold = Threshold::new(&registry, "info").unwrap();

        for level in registry.levels() {
            assert_eq!(
                threshold.is_enabled(&registry, level),
                level.number() >= 20,
                "level {}",
                level.name()
            );
        }
    }
}
