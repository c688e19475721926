//! Console markup tags
//!
//! Level colors and layout templates carry bracketed style tags such as
//! `[green]`, `[bold yellow]`, `[white on red]` and the closing `[/]`.
//! Text in brackets that is not a valid style stays literal, so messages
//! like `retrying [3/5]` pass through untouched.

/// How a line is rendered for its destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Keep markup tags for a console that interprets them
    Markup,
    /// Remove markup so the text is clean, e.g. for error payloads
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl Color {
    pub fn from_name(name: &str) -> Option<Self> {
        let color = match name.to_lowercase().as_str() {
            "black" => Color::Black,
            "red" => Color::Red,
            "green" => Color::Green,
            "yellow" => Color::Yellow,
            "blue" => Color::Blue,
            "magenta" | "purple" => Color::Magenta,
            "cyan" => Color::Cyan,
            "white" => Color::White,
            "bright_black" | "grey" | "gray" => Color::BrightBlack,
            "bright_red" => Color::BrightRed,
            "bright_green" => Color::BrightGreen,
            "bright_yellow" => Color::BrightYellow,
            "bright_blue" => Color::BrightBlue,
            "bright_magenta" => Color::BrightMagenta,
            "bright_cyan" => Color::BrightCyan,
            "bright_white" => Color::BrightWhite,
            _ => return None,
        };
        Some(color)
    }
}

/// Combined style of a span of text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
    pub dim: bool,
    pub italic: bool,
    pub underline: bool,
    pub reverse: bool,
    pub strikethrough: bool,
}

impl Style {
    /// Parse the inside of a tag, e.g. `bold white on red`.
    ///
    /// Returns `None` unless every word is a known attribute or color.
    pub fn parse(spec: &str) -> Option<Self> {
        let mut style = Style::default();
        let mut words = spec.split_whitespace().peekable();
        words.peek()?;

        while let Some(word) = words.next() {
            match word.to_lowercase().as_str() {
                "bold" => style.bold = true,
                "dim" => style.dim = true,
                "italic" => style.italic = true,
                "underline" => style.underline = true,
                "reverse" => style.reverse = true,
                "strike" => style.strikethrough = true,
                "on" => style.bg = Some(Color::from_name(words.next()?)?),
                other => style.fg = Some(Color::from_name(other)?),
            }
        }
        Some(style)
    }

    /// Layer `other` on top of this style
    #[must_use]
    pub fn merge(self, other: Style) -> Style {
        Style {
            fg: other.fg.or(self.fg),
            bg: other.bg.or(self.bg),
            bold: self.bold || other.bold,
            dim: self.dim || other.dim,
            italic: self.italic || other.italic,
            underline: self.underline || other.underline,
            reverse: self.reverse || other.reverse,
            strikethrough: self.strikethrough || other.strikethrough,
        }
    }

    pub fn is_plain(&self) -> bool {
        *self == Style::default()
    }
}

/// A run of text sharing one style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: Style,
}

enum Token<'a> {
    Open(&'a str, Style),
    Close(Option<&'a str>),
}

fn token(inner: &str) -> Option<Token<'_>> {
    if inner == "/" {
        return Some(Token::Close(None));
    }
    if let Some(name) = inner.strip_prefix('/') {
        return Style::parse(name).map(|_| Token::Close(Some(name.trim())));
    }
    Style::parse(inner).map(|style| Token::Open(inner.trim(), style))
}

fn combined(stack: &[(&str, Style)]) -> Style {
    stack
        .iter()
        .fold(Style::default(), |acc, (_, style)| acc.merge(*style))
}

/// Split marked-up text into styled spans
pub fn parse(input: &str) -> Vec<Span> {
    let mut spans: Vec<Span> = Vec::new();
    let mut stack: Vec<(&str, Style)> = Vec::new();
    let mut text = String::new();
    let mut rest = input;

    while let Some(pos) = rest.find(['[', '\\']) {
        text.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if let Some(escaped) = tail.strip_prefix("\\[") {
            text.push('[');
            rest = escaped;
            continue;
        }
        if tail.starts_with('\\') {
            text.push('\\');
            rest = &tail[1..];
            continue;
        }

        let parsed = tail[1..]
            .find(']')
            .and_then(|end| token(&tail[1..=end]).map(|tok| (tok, end + 2)));
        let Some((tok, consumed)) = parsed else {
            text.push('[');
            rest = &tail[1..];
            continue;
        };

        if !text.is_empty() {
            spans.push(Span {
                text: std::mem::take(&mut text),
                style: combined(&stack),
            });
        }
        match tok {
            Token::Open(name, style) => stack.push((name, style)),
            Token::Close(None) => {
                stack.pop();
            }
            Token::Close(Some(name)) => {
                if let Some(idx) = stack.iter().rposition(|(open, _)| *open == name) {
                    stack.truncate(idx);
                }
            }
        }
        rest = &tail[consumed..];
    }

    text.push_str(rest);
    if !text.is_empty() {
        spans.push(Span {
            text,
            style: combined(&stack),
        });
    }
    spans
}

/// Remove every recognised markup tag, keeping the text
pub fn strip(input: &str) -> String {
    parse(input).into_iter().map(|span| span.text).collect()
}
