//! Format specifiers for template placeholders
//!
//! Supports the mini-language `[[fill]align][sign][#][0][width][,|_][.precision][type]`
//! with the types `s d b o x X e E f F g G %`.

use super::args::{float_repr, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// `<`
    Left,
    /// `>`
    Right,
    /// `^`
    Center,
    /// `=`, padding goes between the sign and the digits
    AfterSign,
}

impl Align {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '<' => Some(Align::Left),
            '>' => Some(Align::Right),
            '^' => Some(Align::Center),
            '=' => Some(Align::AfterSign),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// `-`: sign only negative numbers
    Minus,
    /// `+`: sign every number
    Plus,
    /// ` `: leading space for non-negative numbers
    Space,
}

/// A parsed format specifier
///
/// # Examples
///
/// ```
/// use logaroo::core::format_spec::FormatSpec;
/// use logaroo::Value;
///
/// let spec = FormatSpec::parse(".3f").unwrap();
/// assert_eq!(spec.apply(&Value::from(3.14159)).unwrap(), "3.142");
///
/// let spec = FormatSpec::parse("<8").unwrap();
/// assert_eq!(spec.apply(&Value::from("INFO")).unwrap(), "INFO    ");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatSpec {
    pub fill: Option<char>,
    pub align: Option<Align>,
    pub sign: Option<Sign>,
    pub alternate: bool,
    pub zero: bool,
    pub width: Option<usize>,
    pub grouping: Option<char>,
    pub precision: Option<usize>,
    pub kind: Option<char>,
}

impl FormatSpec {
    /// Parse a specifier (the text after `:` in a placeholder)
    pub fn parse(spec: &str) -> Result<Self, String> {
        let chars: Vec<char> = spec.chars().collect();
        let mut out = FormatSpec::default();
        let mut i = 0;

        if let Some(align) = chars.get(1).copied().and_then(Align::from_char) {
            out.fill = Some(chars[0]);
            out.align = Some(align);
            i = 2;
        } else if let Some(align) = chars.first().copied().and_then(Align::from_char) {
            out.align = Some(align);
            i = 1;
        }

        match chars.get(i) {
            Some('+') => out.sign = Some(Sign::Plus),
            Some('-') => out.sign = Some(Sign::Minus),
            Some(' ') => out.sign = Some(Sign::Space),
            _ => {}
        }
        if out.sign.is_some() {
            i += 1;
        }

        if chars.get(i) == Some(&'#') {
            out.alternate = true;
            i += 1;
        }

        if chars.get(i) == Some(&'0') {
            out.zero = true;
            i += 1;
        }

        out.width = read_number(&chars, &mut i)?;

        if let Some(&sep @ (',' | '_')) = chars.get(i) {
            out.grouping = Some(sep);
            i += 1;
        }

        if chars.get(i) == Some(&'.') {
            i += 1;
            out.precision = read_number(&chars, &mut i)?;
            if out.precision.is_none() {
                return Err("Format specifier missing precision".to_string());
            }
        }

        match &chars[i..] {
            [] => {}
            [kind] => out.kind = Some(*kind),
            _ => return Err(format!("Invalid format specifier '{}'", spec)),
        }

        Ok(out)
    }

    /// Whether this is the empty specifier, as in a bare `{name}`
    pub fn is_empty(&self) -> bool {
        *self == FormatSpec::default()
    }

    /// Format a value according to this specifier
    pub fn apply(&self, value: &Value) -> Result<String, String> {
        match value {
            Value::Str(s) => self.format_str(s, "str"),
            // an empty spec prints the name, anything else formats the number
            Value::Bool(_) if self.is_empty() => Ok(value.to_string()),
            Value::Bool(b) => self.format_int(i64::from(*b)),
            Value::Null if self.is_empty() => Ok(value.to_string()),
            Value::Null => Err("unsupported format string passed to None".to_string()),
            Value::Int(i) => self.format_int(*i),
            Value::Float(f) => self.format_float(*f),
        }
    }

    fn format_str(&self, text: &str, type_name: &str) -> Result<String, String> {
        if let Some(kind) = self.kind.filter(|kind| *kind != 's') {
            return Err(unknown_code(kind, type_name));
        }
        if self.sign.is_some() {
            return Err("Sign not allowed in string format specifier".to_string());
        }
        if self.alternate {
            return Err("Alternate form (#) not allowed in string format specifier".to_string());
        }
        if let Some(sep) = self.grouping {
            return Err(format!("Cannot specify '{}' with 's'.", sep));
        }
        if self.align == Some(Align::AfterSign) {
            return Err("'=' alignment not allowed in string format specifier".to_string());
        }

        let text: String = match self.precision {
            Some(max) => text.chars().take(max).collect(),
            None => text.to_string(),
        };
        let fill = self
            .fill
            .unwrap_or(if self.zero { '0' } else { ' ' });
        Ok(pad(text, self.width, fill, self.align.unwrap_or(Align::Left)))
    }

    fn format_int(&self, value: i64) -> Result<String, String> {
        let radix = match self.kind {
            None | Some('d') => 10,
            Some('b') => 2,
            Some('o') => 8,
            Some('x' | 'X') => 16,
            Some('e' | 'E' | 'f' | 'F' | 'g' | 'G' | '%') => {
                return self.format_float(value as f64);
            }
            Some(kind) => return Err(unknown_code(kind, "int")),
        };
        if self.precision.is_some() {
            return Err("Precision not allowed in integer format specifier".to_string());
        }

        let magnitude = value.unsigned_abs();
        let mut digits = match self.kind {
            Some('b') => format!("{:b}", magnitude),
            Some('o') => format!("{:o}", magnitude),
            Some('x') => format!("{:x}", magnitude),
            Some('X') => format!("{:X}", magnitude),
            _ => magnitude.to_string(),
        };
        match (self.grouping, radix) {
            (Some(','), 10) | (Some('_'), 10) => {
                digits = group(&digits, self.grouping.unwrap_or(','), 3);
            }
            (Some('_'), _) => digits = group(&digits, '_', 4),
            (Some(sep), _) => {
                return Err(format!(
                    "Cannot specify '{}' with '{}'.",
                    sep,
                    self.kind.unwrap_or('d')
                ))
            }
            (None, _) => {}
        }

        let prefix = match (self.alternate, self.kind) {
            (true, Some('b')) => "0b",
            (true, Some('o')) => "0o",
            (true, Some('x')) => "0x",
            (true, Some('X')) => "0X",
            _ => "",
        };

        Ok(self.finish_number(value < 0, prefix, digits))
    }

    fn format_float(&self, value: f64) -> Result<String, String> {
        let upper = matches!(self.kind, Some('E' | 'F' | 'G'));
        let body = if !value.is_finite() {
            let text = if value.is_nan() { "nan" } else { "inf" };
            let text = if upper {
                text.to_uppercase()
            } else {
                text.to_string()
            };
            if self.kind == Some('%') {
                format!("{}%", text)
            } else {
                text
            }
        } else {
            let magnitude = value.abs();
            match self.kind {
                None => match self.precision {
                    None => float_repr(magnitude),
                    Some(precision) => {
                        let text = general(magnitude, precision, self.alternate, false);
                        if text.contains(['.', 'e']) {
                            text
                        } else {
                            format!("{}.0", text)
                        }
                    }
                },
                Some('f' | 'F') => {
                    fixed(magnitude, self.precision.unwrap_or(6), self.alternate)
                }
                Some('e' | 'E') => {
                    scientific(magnitude, self.precision.unwrap_or(6), self.alternate, upper)
                }
                Some('g' | 'G') => {
                    general(magnitude, self.precision.unwrap_or(6), self.alternate, upper)
                }
                Some('%') => format!(
                    "{}%",
                    fixed(magnitude * 100.0, self.precision.unwrap_or(6), self.alternate)
                ),
                Some(kind) => return Err(unknown_code(kind, "float")),
            }
        };

        let body = match self.grouping {
            Some(sep) if value.is_finite() => {
                let split = body.find(['.', 'e', 'E', '%']).unwrap_or(body.len());
                let (int_part, rest) = body.split_at(split);
                format!("{}{}", group(int_part, sep, 3), rest)
            }
            _ => body,
        };

        let negative = value.is_sign_negative() && !value.is_nan();
        Ok(self.finish_number(negative, "", body))
    }

    /// Apply sign, prefix, and padding to a rendered number
    fn finish_number(&self, negative: bool, prefix: &str, body: String) -> String {
        let sign = if negative {
            "-"
        } else {
            match self.sign {
                Some(Sign::Plus) => "+",
                Some(Sign::Space) => " ",
                _ => "",
            }
        };
        let fill = self
            .fill
            .unwrap_or(if self.zero { '0' } else { ' ' });
        let align = self
            .align
            .unwrap_or(if self.zero { Align::AfterSign } else { Align::Right });

        if align == Align::AfterSign {
            let head = format!("{}{}", sign, prefix);
            let width = self
                .width
                .map(|width| width.saturating_sub(head.chars().count()));
            return format!("{}{}", head, pad(body, width, fill, Align::Right));
        }

        pad(format!("{}{}{}", sign, prefix, body), self.width, fill, align)
    }
}

fn read_number(chars: &[char], i: &mut usize) -> Result<Option<usize>, String> {
    let start = *i;
    while chars.get(*i).is_some_and(char::is_ascii_digit) {
        *i += 1;
    }
    if *i == start {
        return Ok(None);
    }
    let digits: String = chars[start..*i].iter().collect();
    digits
        .parse()
        .map(Some)
        .map_err(|_| "Too many decimal digits in format string".to_string())
}

fn unknown_code(kind: char, type_name: &str) -> String {
    format!(
        "Unknown format code '{}' for value of type '{}'",
        kind, type_name
    )
}

fn pad(text: String, width: Option<usize>, fill: char, align: Align) -> String {
    let len = text.chars().count();
    let Some(missing) = width.and_then(|width| width.checked_sub(len)) else {
        return text;
    };
    if missing == 0 {
        return text;
    }

    let fill_str = |n: usize| std::iter::repeat(fill).take(n).collect::<String>();
    match align {
        Align::Left => format!("{}{}", text, fill_str(missing)),
        Align::Center => {
            let left = missing / 2;
            format!("{}{}{}", fill_str(left), text, fill_str(missing - left))
        }
        Align::Right | Align::AfterSign => format!("{}{}", fill_str(missing), text),
    }
}

/// Insert `sep` every `size` digits, counting from the right
fn group(digits: &str, sep: char, size: usize) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let mut out = String::with_capacity(digits.len() + digits.len() / size);
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % size == 0 {
            out.push(sep);
        }
        out.push(*c);
    }
    out
}

fn fixed(value: f64, precision: usize, alternate: bool) -> String {
    let text = format!("{:.*}", precision, value);
    if alternate && precision == 0 {
        format!("{}.", text)
    } else {
        text
    }
}

/// Split Rust's `1.5e3` into mantissa and exponent
fn split_exponent(text: &str) -> (&str, i32) {
    match text.split_once('e') {
        Some((mantissa, exp)) => (mantissa, exp.parse().unwrap_or(0)),
        None => (text, 0),
    }
}

fn exponent_suffix(exp: i32, upper: bool) -> String {
    format!(
        "{}{}{:02}",
        if upper { 'E' } else { 'e' },
        if exp < 0 { '-' } else { '+' },
        exp.unsigned_abs()
    )
}

fn scientific(value: f64, precision: usize, alternate: bool, upper: bool) -> String {
    let text = format!("{:.*e}", precision, value);
    let (mantissa, exp) = split_exponent(&text);
    let dot = if alternate && precision == 0 { "." } else { "" };
    format!("{}{}{}", mantissa, dot, exponent_suffix(exp, upper))
}

fn general(value: f64, precision: usize, alternate: bool, upper: bool) -> String {
    let precision = precision.max(1);
    let text = format!("{:.*e}", precision - 1, value);
    let (mantissa, exp) = split_exponent(&text);

    let strip = |s: &str| -> String {
        if alternate || !s.contains('.') {
            s.to_string()
        } else {
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
    };

    if (-4..precision as i32).contains(&exp) {
        let decimals = (precision as i32 - 1 - exp).max(0) as usize;
        strip(&format!("{:.*}", decimals, value))
    } else {
        format!("{}{}", strip(mantissa), exponent_suffix(exp, upper))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(spec: &str, value: impl Into<Value>) -> String {
        FormatSpec::parse(spec)
            .and_then(|spec| spec.apply(&value.into()))
            .unwrap_or_else(|e| panic!("'{}' failed: {}", spec, e))
    }

    #[test]
    fn test_parse_full_spec() {
        let spec = FormatSpec::parse("*^+#012,.3f").unwrap();
        assert_eq!(spec.fill, Some('*'));
        assert_eq!(spec.align, Some(Align::Center));
        assert_eq!(spec.sign, Some(Sign::Plus));
        assert!(spec.alternate);
        assert!(spec.zero);
        assert_eq!(spec.width, Some(12));
        assert_eq!(spec.grouping, Some(','));
        assert_eq!(spec.precision, Some(3));
        assert_eq!(spec.kind, Some('f'));
    }

    #[test]
    fn test_parse_errors() {
        assert!(FormatSpec::parse(".f").is_err());
        assert!(FormatSpec::parse("10ff").is_err());
    }

    #[test]
    fn test_string_alignment() {
        assert_eq!(fmt("<8", "INFO"), "INFO    ");
        assert_eq!(fmt(">8", "INFO"), "    INFO");
        assert_eq!(fmt("^8", "INFO"), "  INFO  ");
        assert_eq!(fmt("-^9", "INFO"), "--INFO---");
        assert_eq!(fmt("8", "INFO"), "INFO    ");
        assert_eq!(fmt(".2", "INFO"), "IN");
        assert_eq!(fmt("<3", "CRITICAL"), "CRITICAL");
    }

    #[test]
    fn test_string_rejects_numeric_options() {
        let spec = FormatSpec::parse("+").unwrap();
        assert!(spec.apply(&Value::from("x")).is_err());
        let spec = FormatSpec::parse("d").unwrap();
        assert!(spec.apply(&Value::from("x")).is_err());
        let spec = FormatSpec::parse("=5").unwrap();
        assert!(spec.apply(&Value::from("x")).is_err());
    }

    #[test]
    fn test_integers() {
        assert_eq!(fmt("", 42), "42");
        assert_eq!(fmt("5", 42), "   42");
        assert_eq!(fmt("05", -42), "-0042");
        assert_eq!(fmt("+d", 42), "+42");
        assert_eq!(fmt(",", 1234567), "1,234,567");
        assert_eq!(fmt("_", 1234567), "1_234_567");
        assert_eq!(fmt("#x", 255), "0xff");
        assert_eq!(fmt("X", 255), "FF");
        assert_eq!(fmt("#010b", 5), "0b00000101");
        assert_eq!(fmt("o", 8), "10");
        assert_eq!(fmt(".2f", 3), "3.00");
    }

    #[test]
    fn test_integer_rejects_precision() {
        let spec = FormatSpec::parse(".2d").unwrap();
        assert!(spec.apply(&Value::from(3)).is_err());
        let spec = FormatSpec::parse(",x").unwrap();
        assert!(spec.apply(&Value::from(3)).is_err());
    }

    #[test]
    fn test_floats() {
        assert_eq!(fmt(".3f", 3.14159), "3.142");
        assert_eq!(fmt("f", 1.5), "1.500000");
        assert_eq!(fmt("8.2f", -1.5), "   -1.50");
        assert_eq!(fmt("08.2f", -1.5), "-0001.50");
        assert_eq!(fmt(".2e", 12345.678), "1.23e+04");
        assert_eq!(fmt("E", 0.00012), "1.200000E-04");
        assert_eq!(fmt(".1%", 0.256), "25.6%");
        assert_eq!(fmt(",.2f", 1234567.891), "1,234,567.89");
        assert_eq!(fmt("", 2.5), "2.5");
        assert_eq!(fmt("", 3.0), "3.0");
    }

    #[test]
    fn test_general_format() {
        assert_eq!(fmt("g", 3.14159), "3.14159");
        assert_eq!(fmt(".3g", 3.14159), "3.14");
        assert_eq!(fmt(".3", 3.14159), "3.14");
        assert_eq!(fmt(".3", 3.0), "3.0");
        assert_eq!(fmt("g", 0.00001), "1e-05");
        assert_eq!(fmt("g", 1234567.0), "1.23457e+06");
        assert_eq!(fmt("g", 0.0), "0");
        assert_eq!(fmt("G", 1e-10), "1E-10");
    }

    #[test]
    fn test_non_finite_floats() {
        assert_eq!(fmt("f", f64::INFINITY), "inf");
        assert_eq!(fmt("F", f64::NEG_INFINITY), "-INF");
        assert_eq!(fmt(".2f", f64::NAN), "nan");
    }

    #[test]
    fn test_float_rejects_integer_codes() {
        let spec = FormatSpec::parse("d").unwrap();
        let err = spec.apply(&Value::from(1.5)).unwrap_err();
        assert!(err.contains("'d'"));
        assert!(err.contains("float"));
    }

    #[test]
    fn test_bool_and_null() {
        assert_eq!(fmt("", true), "True");
        assert_eq!(fmt("", false), "False");
        assert_eq!(fmt(">6", true), "     1");
        assert_eq!(fmt("d", true), "1");
        assert_eq!(fmt("", Value::Null), "None");
        assert!(FormatSpec::parse(">6")
            .unwrap()
            .apply(&Value::Null)
            .is_err());
    }
}
