//! Named arguments for message templates
//!
//! Values can be given eagerly, or as suppliers that are only invoked when
//! the line is actually emitted.

use std::collections::HashMap;
use std::fmt;

/// Value substituted into a template placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(fl) => f.write_str(&float_repr(*fl)),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Null => f.write_str("None"),
        }
    }
}

/// Shortest text for a float that still reads as a float (`1.0`, not `1`)
pub(crate) fn float_repr(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "inf" } else { "-inf" }.to_string()
    } else if value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Str(s.clone())
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Str(c.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<u64> for Value {
    fn from(i: u64) -> Self {
        i64::try_from(i).map_or(Value::Float(i as f64), Value::Int)
    }
}

impl From<usize> for Value {
    fn from(i: usize) -> Self {
        i64::try_from(i).map_or(Value::Float(i as f64), Value::Int)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f64::from(f))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// A named argument: either a value, or a supplier computing it on demand
pub enum Arg<'a> {
    Value(Value),
    Supplier(Box<dyn FnOnce() -> Value + 'a>),
}

impl Arg<'_> {
    fn resolve(self) -> Value {
        match self {
            Arg::Value(value) => value,
            Arg::Supplier(supplier) => supplier(),
        }
    }
}

impl fmt::Debug for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Arg::Supplier(_) => f.write_str("Supplier(..)"),
        }
    }
}

/// Named arguments for one log call
///
/// # Examples
///
/// ```
/// use logaroo::Args;
///
/// let args = Args::new()
///     .with("adjective", "fun")
///     .with("pi", 3.14159)
///     .lazy("expensive", || "computed only when emitted".into());
/// assert_eq!(args.len(), 3);
/// ```
#[derive(Debug, Default)]
pub struct Args<'a> {
    entries: Vec<(String, Arg<'a>)>,
}

impl<'a> Args<'a> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add an eagerly evaluated argument
    #[must_use]
    pub fn with<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.entries.push((key.into(), Arg::Value(value.into())));
        self
    }

    /// Add an argument computed only if the line passes the threshold
    #[must_use]
    pub fn lazy<K, F>(mut self, key: K, supplier: F) -> Self
    where
        K: Into<String>,
        F: FnOnce() -> Value + 'a,
    {
        self.entries
            .push((key.into(), Arg::Supplier(Box::new(supplier))));
        self
    }

    /// Add an argument (mutable version)
    pub fn insert<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.entries.push((key.into(), Arg::Value(value.into())));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Invoke every supplier once and collect the values by name.
    ///
    /// When a name appears more than once, the last entry wins.
    pub fn resolve(self) -> HashMap<String, Value> {
        self.entries
            .into_iter()
            .map(|(key, arg)| (key, arg.resolve()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_value_display() {
        assert_eq!(Value::from("fun").to_string(), "fun");
        assert_eq!(Value::from(42).to_string(), "42");
        assert_eq!(Value::from(3.5).to_string(), "3.5");
        assert_eq!(Value::from(1.0).to_string(), "1.0");
        assert_eq!(Value::from(true).to_string(), "True");
        assert_eq!(Value::from(false).to_string(), "False");
        assert_eq!(Value::from(None::<i32>).to_string(), "None");
        assert_eq!(Value::from(f64::INFINITY).to_string(), "inf");
    }

    #[test]
    fn test_large_unsigned_becomes_float() {
        assert_eq!(Value::from(7u64), Value::Int(7));
        assert!(matches!(Value::from(u64::MAX), Value::Float(_)));
    }

    #[test]
    fn test_suppliers_run_only_on_resolve() {
        let calls = Cell::new(0);
        let args = Args::new().lazy("n", || {
            calls.set(calls.get() + 1);
            Value::Int(7)
        });
        assert_eq!(calls.get(), 0);

        let resolved = args.resolve();
        assert_eq!(calls.get(), 1);
        assert_eq!(resolved.get("n"), Some(&Value::Int(7)));
    }

    #[test]
    fn test_dropped_args_never_run_suppliers() {
        let calls = Cell::new(0);
        let args = Args::new().lazy("n", || {
            calls.set(calls.get() + 1);
            Value::Null
        });
        drop(args);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_last_duplicate_wins() {
        let mut args = Args::new().with("x", 1);
        args.insert("x", 2);
        assert_eq!(args.len(), 2);
        assert_eq!(args.resolve().get("x"), Some(&Value::Int(2)));
    }
}
