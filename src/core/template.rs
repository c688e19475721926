//! Placeholder templates
//!
//! Both the per-call message and the outer line layout are templates of the
//! form `"This is a {adjective} test: {pi:.3f}"`. A placeholder names a value,
//! optionally converts it (`!s`, `!r`) and optionally formats it with a
//! [`FormatSpec`]. Literal braces are written `{{` and `}}`.

use super::args::Value;
use super::error::{LoggerError, Result};
use super::format_spec::FormatSpec;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// `!s`: the display text
    Str,
    /// `!r`, `!a`: a quoted representation
    Repr,
}

/// A `{name!conversion:spec}` placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub conversion: Option<Conversion>,
    pub spec: FormatSpec,
}

impl Field {
    fn parse(body: &str) -> std::result::Result<Self, String> {
        let name_end = body.find(['!', ':']).unwrap_or(body.len());
        let name = &body[..name_end];

        if name.is_empty() || name.chars().all(|c| c.is_ascii_digit()) {
            return Err("positional fields are not supported, name every placeholder".to_string());
        }
        if name.contains(['.', '[']) {
            return Err(format!(
                "attribute and index access are not supported in '{}'",
                name
            ));
        }

        let mut rest = &body[name_end..];
        let mut conversion = None;
        if let Some(after) = rest.strip_prefix('!') {
            let mut chars = after.chars();
            conversion = match chars.next() {
                Some('s') => Some(Conversion::Str),
                Some('r' | 'a') => Some(Conversion::Repr),
                Some(other) => return Err(format!("Unknown conversion specifier {}", other)),
                None => {
                    return Err("end of string while looking for conversion specifier".to_string())
                }
            };
            rest = chars.as_str();
            if !rest.is_empty() && !rest.starts_with(':') {
                return Err("expected ':' after conversion specifier".to_string());
            }
        }

        let spec = match rest.strip_prefix(':') {
            Some(spec) => FormatSpec::parse(spec)?,
            None => FormatSpec::default(),
        };

        Ok(Field {
            name: name.to_string(),
            conversion,
            spec,
        })
    }

    fn render(&self, value: Value) -> std::result::Result<String, String> {
        let value = match self.conversion {
            None => value,
            Some(Conversion::Str) => Value::Str(value.to_string()),
            Some(Conversion::Repr) => Value::Str(repr(&value)),
        };
        self.spec.apply(&value)
    }
}

fn repr(value: &Value) -> String {
    match value {
        Value::Str(s) => format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'")),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Field(Field),
}

/// A parsed template, ready to render many times
///
/// # Examples
///
/// ```
/// use logaroo::core::template::Template;
/// use logaroo::Args;
///
/// let template = Template::parse("This is a {adjective} test: {pi:.3f}").unwrap();
/// let values = Args::new().with("adjective", "fun").with("pi", 3.14159).resolve();
/// assert_eq!(template.render(&values).unwrap(), "This is a fun test: 3.142");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self> {
        let fail = |message: &str| LoggerError::message_format(source, message);
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '{' => {
                    let mut body = String::new();
                    let mut closed = false;
                    for c in chars.by_ref() {
                        match c {
                            '}' => {
                                closed = true;
                                break;
                            }
                            '{' => return Err(fail("nested replacement fields are not supported")),
                            _ => body.push(c),
                        }
                    }
                    if !closed {
                        return Err(fail("expected '}' before end of string"));
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Field(Field::parse(&body).map_err(|m| fail(&m))?));
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '}' => return Err(fail("Single '}' encountered in format string")),
                _ => literal.push(c),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Names referenced by placeholders, in order of appearance
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Field(field) => Some(field.name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    pub fn render(&self, values: &HashMap<String, Value>) -> Result<String> {
        self.render_with(|name| values.get(name).cloned(), str::to_string)
    }

    /// Render with a value lookup and a transform for literal text
    pub fn render_with<F, L>(&self, mut lookup: F, mut literal: L) -> Result<String>
    where
        F: FnMut(&str) -> Option<Value>,
        L: FnMut(&str) -> String,
    {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(&literal(text)),
                Segment::Field(field) => {
                    let value = lookup(&field.name).ok_or_else(|| {
                        LoggerError::message_format(
                            &self.source,
                            format!("no value for placeholder '{}'", field.name),
                        )
                    })?;
                    let rendered = field
                        .render(value)
                        .map_err(|m| LoggerError::message_format(&self.source, m))?;
                    out.push_str(&rendered);
                }
            }
        }
        Ok(out)
    }
}

/// Parse and render in one step
pub fn interpolate(source: &str, values: &HashMap<String, Value>) -> Result<String> {
    Template::parse(source)?.render(values)
}
