//! Rich text and the serializers that flatten it into client strings.
//!
//! The engine never renders text itself. It only needs a serialized form to
//! measure against the line limits and to cut oversized lines into a prefix
//! and a suffix. All lengths here are counted in `char`s so a split can never
//! land inside a code point.

use crate::TeamColor;
use serde::{Deserialize, Serialize};

/// A run of text sharing one style
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub content: String,
    #[serde(default)]
    pub color: Option<TeamColor>,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
}

/// Styled text as an ordered list of spans
///
/// Equality is structural: two values are equal only if their spans are.
/// The engine relies on this to skip rebuilding unchanged sidebars.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Text {
    spans: Vec<Span>,
}

impl Text {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            spans: vec![Span {
                content: content.into(),
                ..Span::default()
            }],
        }
    }

    pub fn colored(content: impl Into<String>, color: TeamColor) -> Self {
        Self {
            spans: vec![Span {
                content: content.into(),
                color: Some(color),
                ..Span::default()
            }],
        }
    }

    /// Appends the spans of `other` after this text
    pub fn append(mut self, other: Text) -> Self {
        self.spans.extend(other.spans);
        self
    }

    pub fn push(&mut self, span: Span) {
        self.spans.push(span);
    }

    /// Marks every span bold
    pub fn bold(mut self) -> Self {
        self.spans.iter_mut().for_each(|span| span.bold = true);
        self
    }

    /// Marks every span italic
    pub fn italic(mut self) -> Self {
        self.spans.iter_mut().for_each(|span| span.italic = true);
        self
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn is_empty(&self) -> bool {
        self.spans.iter().all(|span| span.content.is_empty())
    }

    /// Concatenated content with all styling dropped
    pub fn to_plain(&self) -> String {
        self.spans.iter().map(|span| span.content.as_str()).collect()
    }
}

impl From<&str> for Text {
    fn from(content: &str) -> Self {
        Text::plain(content)
    }
}

impl From<String> for Text {
    fn from(content: String) -> Self {
        Text::plain(content)
    }
}

/// Number of `char`s in a serialized string
pub fn char_length(serialized: &str) -> usize {
    serialized.chars().count()
}

/// Flattens rich text into the string the client limits are measured against
///
/// `serialize` must be deterministic: equal texts serialize to equal strings.
pub trait TextSerializer {
    fn serialize(&self, text: &Text) -> String;

    /// Cuts a serialized line after `at` chars into prefix and suffix
    fn split(&self, serialized: &str, at: usize) -> (String, String) {
        match serialized.char_indices().nth(at) {
            Some((byte, _)) => (
                serialized[..byte].to_string(),
                serialized[byte..].to_string(),
            ),
            None => (serialized.to_string(), String::new()),
        }
    }
}

/// Tag markup: `<red><b>Gold</b></red>`
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupSerializer;

impl TextSerializer for MarkupSerializer {
    fn serialize(&self, text: &Text) -> String {
        let mut out = String::new();

        for span in text.spans() {
            if span.content.is_empty() {
                continue;
            }

            if let Some(color) = span.color {
                out.push('<');
                out.push_str(color.tag());
                out.push('>');
            }
            if span.bold {
                out.push_str("<b>");
            }
            if span.italic {
                out.push_str("<i>");
            }

            for c in span.content.chars() {
                if c == '<' || c == '\\' {
                    out.push('\\');
                }
                out.push(c);
            }

            if span.italic {
                out.push_str("</i>");
            }
            if span.bold {
                out.push_str("</b>");
            }
            if let Some(color) = span.color {
                out.push_str("</");
                out.push_str(color.tag());
                out.push('>');
            }
        }

        out
    }
}

/// Content only, styling dropped
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainSerializer;

impl TextSerializer for PlainSerializer {
    fn serialize(&self, text: &Text) -> String {
        text.to_plain()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Style {
    color: Option<TeamColor>,
    bold: bool,
    italic: bool,
}

impl Style {
    fn of(span: &Span) -> Self {
        Self {
            color: span.color,
            bold: span.bold,
            italic: span.italic,
        }
    }
}

/// Legacy format codes: `&cRed &lbold`
///
/// Splitting carries the active style over into the suffix, so the second
/// half of a long line keeps the color it started with.
#[derive(Debug, Clone, Copy)]
pub struct LegacySerializer {
    marker: char,
}

impl LegacySerializer {
    pub const AMPERSAND: char = '&';
    pub const SECTION: char = '\u{a7}';

    pub fn new(marker: char) -> Self {
        Self { marker }
    }

    pub fn marker(&self) -> char {
        self.marker
    }

    /// The color and format codes still active at the end of `input`
    pub fn last_style(&self, input: &str) -> String {
        let chars: Vec<char> = input.chars().collect();
        let mut codes = Vec::new();

        for index in (0..chars.len().saturating_sub(1)).rev() {
            if chars[index] != self.marker {
                continue;
            }

            let code = chars[index + 1].to_ascii_lowercase();
            if code == 'r' {
                break;
            }
            // a color code clears every format before it
            if code.is_ascii_hexdigit() {
                codes.push(code);
                break;
            }
            if matches!(code, 'k' | 'l' | 'm' | 'n' | 'o') {
                codes.push(code);
            }
        }

        codes
            .iter()
            .rev()
            .flat_map(|code| [self.marker, *code])
            .collect()
    }

    fn push_code(&self, out: &mut String, code: char) {
        out.push(self.marker);
        out.push(code);
    }
}

impl Default for LegacySerializer {
    fn default() -> Self {
        Self::new(Self::AMPERSAND)
    }
}

impl TextSerializer for LegacySerializer {
    fn serialize(&self, text: &Text) -> String {
        let mut out = String::new();
        let mut active = Style::default();

        for span in text.spans() {
            if span.content.is_empty() {
                continue;
            }

            let wanted = Style::of(span);
            if wanted != active {
                let drops = (active.bold && !wanted.bold)
                    || (active.italic && !wanted.italic)
                    || (active.color.is_some() && wanted.color.is_none());
                if drops {
                    self.push_code(&mut out, 'r');
                    active = Style::default();
                }

                if let Some(color) = wanted.color {
                    if active.color != Some(color) {
                        self.push_code(&mut out, color.code());
                        active = Style {
                            color: Some(color),
                            ..Style::default()
                        };
                    }
                }
                if wanted.bold && !active.bold {
                    self.push_code(&mut out, 'l');
                }
                if wanted.italic && !active.italic {
                    self.push_code(&mut out, 'o');
                }
                active = wanted;
            }

            out.push_str(&span.content);
        }

        out
    }

    fn split(&self, serialized: &str, at: usize) -> (String, String) {
        let chars: Vec<char> = serialized.chars().collect();
        if chars.len() <= at {
            return (serialized.to_string(), String::new());
        }

        let mut prefix: String = chars[..at].iter().collect();
        let mut carried = String::new();

        // never leave a marker dangling without its code
        if prefix.ends_with(self.marker) {
            prefix.pop();
            carried.push(self.marker);
        }

        let rest: String = chars[at..].iter().collect();
        let suffix: String = format!("{}{}{}", self.last_style(&prefix), carried, rest)
            .chars()
            .take(at)
            .collect();

        (prefix, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_equality_is_structural() {
        assert_eq!(Text::plain("Rank: Gold"), Text::from("Rank: Gold"));
        assert_ne!(
            Text::plain("Rank: Gold"),
            Text::colored("Rank: Gold", TeamColor::Gold)
        );
        assert_ne!(
            Text::plain("Rank: ").append(Text::plain("Gold")),
            Text::plain("Rank: Gold")
        );
    }

    #[test]
    fn test_text_is_empty() {
        assert!(Text::empty().is_empty());
        assert!(Text::plain("").is_empty());
        assert!(!Text::plain(" ").is_empty());
    }

    #[test]
    fn test_to_plain_concatenates_spans() {
        let text = Text::plain("Kills: ").append(Text::colored("12", TeamColor::Red).bold());
        assert_eq!(text.to_plain(), "Kills: 12");
    }

    #[test]
    fn test_markup_serialization() {
        let text = Text::plain("Rank: ").append(Text::colored("Gold", TeamColor::Gold).bold());
        assert_eq!(
            MarkupSerializer.serialize(&text),
            "Rank: <gold><b>Gold</b></gold>"
        );
    }

    #[test]
    fn test_markup_escapes_tag_openers() {
        let text = Text::plain("a<b\\c");
        assert_eq!(MarkupSerializer.serialize(&text), "a\\<b\\\\c");
    }

    #[test]
    fn test_plain_serialization_drops_style() {
        let text = Text::colored("Lobby", TeamColor::Aqua).italic();
        assert_eq!(PlainSerializer.serialize(&text), "Lobby");
    }

    #[test]
    fn test_legacy_serialization() {
        let text = Text::colored("Red ", TeamColor::Red)
            .append(Text::colored("bold", TeamColor::Red).bold())
            .append(Text::plain(" plain"));

        assert_eq!(
            LegacySerializer::default().serialize(&text),
            "&cRed &lbold&r plain"
        );
    }

    #[test]
    fn test_legacy_color_change_reapplies_format() {
        let text = Text::colored("a", TeamColor::Red)
            .bold()
            .append(Text::colored("b", TeamColor::Blue).bold());

        assert_eq!(LegacySerializer::default().serialize(&text), "&c&la&9&lb");
    }

    #[test]
    fn test_default_split_counts_chars() {
        let (prefix, suffix) = PlainSerializer.split("ééééé", 3);
        assert_eq!(prefix, "ééé");
        assert_eq!(suffix, "éé");

        let (prefix, suffix) = PlainSerializer.split("short", 64);
        assert_eq!(prefix, "short");
        assert_eq!(suffix, "");
    }

    #[test]
    fn test_last_style_stops_at_color() {
        let legacy = LegacySerializer::default();

        assert_eq!(legacy.last_style("&aold &cnew &lbold &ox"), "&c&l&o");
        assert_eq!(legacy.last_style("&cred&r reset"), "");
        assert_eq!(legacy.last_style("no codes"), "");
        assert_eq!(legacy.last_style("dangling&"), "");
    }

    #[test]
    fn test_legacy_split_carries_color() {
        let legacy = LegacySerializer::default();
        let line = format!("&c{}", "x".repeat(70));

        let (prefix, suffix) = legacy.split(&line, 64);
        assert_eq!(prefix.chars().count(), 64);
        assert_eq!(suffix, format!("&c{}", "x".repeat(8)));
    }

    #[test]
    fn test_legacy_split_moves_dangling_marker() {
        let legacy = LegacySerializer::default();
        let line = format!("{}&ltail", "x".repeat(63));

        let (prefix, suffix) = legacy.split(&line, 64);
        assert_eq!(prefix, "x".repeat(63));
        assert_eq!(suffix, "&ltail");
    }

    #[test]
    fn test_legacy_split_truncates_suffix() {
        let legacy = LegacySerializer::default();
        let line = format!("&a{}", "y".repeat(126));

        let (_, suffix) = legacy.split(&line, 64);
        assert_eq!(suffix.chars().count(), 64);
        assert!(suffix.starts_with("&a"));
    }
}
