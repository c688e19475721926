//! Log level definitions

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A named, numerically ranked severity with its display metadata.
///
/// Levels order by `number` first and `name` second, so iteration over a
/// level set is deterministic even when two levels share a number.
///
/// # Examples
///
/// ```
/// use logaroo::Level;
///
/// let level = Level::new("Notice", 22, "[magenta]", "📣");
/// assert_eq!(level.name(), "notice");
/// assert_eq!(level.to_string(), "NOTICE");
/// assert!(!level.escalates());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Level {
    number: i32,
    #[serde(deserialize_with = "deserialize_lowercase")]
    name: String,
    #[serde(default)]
    color: String,
    #[serde(default)]
    icon: String,
    #[serde(default)]
    escalates: bool,
}

fn deserialize_lowercase<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    String::deserialize(deserializer).map(|name| name.to_lowercase())
}

impl Level {
    #[must_use]
    pub fn new(
        name: impl AsRef<str>,
        number: i32,
        color: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            number,
            name: name.as_ref().to_lowercase(),
            color: color.into(),
            icon: icon.into(),
            escalates: false,
        }
    }

    /// Mark this level as escalating: emitting it also fails the call
    #[must_use]
    pub fn escalating(mut self) -> Self {
        self.escalates = true;
        self
    }

    #[must_use]
    pub fn with_escalation(mut self, escalates: bool) -> Self {
        self.escalates = escalates;
        self
    }

    #[inline]
    pub fn number(&self) -> i32 {
        self.number
    }

    /// Lowercase name, as stored in the registry
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Uppercase name, as shown in rendered lines
    pub fn display_name(&self) -> String {
        self.name.to_uppercase()
    }

    #[inline]
    pub fn color(&self) -> &str {
        &self.color
    }

    #[inline]
    pub fn icon(&self) -> &str {
        &self.icon
    }

    #[inline]
    pub fn escalates(&self) -> bool {
        self.escalates
    }
}

impl PartialOrd for Level {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Level {
    fn cmp(&self, other: &Self) -> Ordering {
        self.number
            .cmp(&other.number)
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.color.cmp(&other.color))
            .then_with(|| self.icon.cmp(&other.icon))
            .then_with(|| self.escalates.cmp(&other.escalates))
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

/// The seven levels every logger starts with
#[must_use]
pub fn default_levels() -> Vec<Level> {
    vec![
        Level::new("trace", 5, "[cyan]", "\u{270F}\u{FE0F}"),
        Level::new("debug", 10, "[blue]", "\u{1F41E}"),
        Level::new("info", 20, "[white]", "\u{2139}\u{FE0F}"),
        Level::new("success", 25, "[green]", "\u{2705}"),
        Level::new("warning", 30, "[yellow]", "\u{26A0}\u{FE0F}"),
        Level::new("error", 40, "[red]", "\u{274C}"),
        Level::new("critical", 50, "[white on red]", "\u{2620}\u{FE0F}").escalating(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_lowercased() {
        let level = Level::new("WaRnInG", 30, "[yellow]", "!");
        assert_eq!(level.name(), "warning");
        assert_eq!(level.display_name(), "WARNING");
        assert_eq!(format!("{}", level), "WARNING");
    }

    #[test]
    fn test_ordering_by_number_then_name() {
        let a = Level::new("alpha", 10, "", "");
        let b = Level::new("beta", 10, "", "");
        let c = Level::new("aardvark", 20, "", "");

        let mut levels = vec![c.clone(), b.clone(), a.clone()];
        levels.sort();
        assert_eq!(levels, vec![a, b, c]);
    }

    #[test]
    fn test_default_levels() {
        let levels = default_levels();
        let names: Vec<&str> = levels.iter().map(Level::name).collect();
        assert_eq!(
            names,
            ["trace", "debug", "info", "success", "warning", "error", "critical"]
        );

        let numbers: Vec<i32> = levels.iter().map(Level::number).collect();
        assert_eq!(numbers, [5, 10, 20, 25, 30, 40, 50]);

        let escalating: Vec<&str> = levels
            .iter()
            .filter(|level| level.escalates())
            .map(Level::name)
            .collect();
        assert_eq!(escalating, ["critical"]);
    }

    #[test]
    fn test_serialization() {
        let level = Level::new("notice", 22, "[magenta]", "*").escalating();
        let json = serde_json::to_string(&level).expect("serialize");
        assert!(json.contains("\"name\":\"notice\""));
        assert!(json.contains("\"escalates\":true"));
    }

    #[test]
    fn test_deserialization_lowercases_and_defaults() {
        let level: Level =
            serde_json::from_str(r#"{"number":23,"name":"TIME"}"#).expect("deserialize");
        assert_eq!(level.name(), "time");
        assert_eq!(level.number(), 23);
        assert_eq!(level.color(), "");
        assert!(!level.escalates());
    }
}
