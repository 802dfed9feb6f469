//! Common abstractions shared by reference finders.

use aho_corasick::AhoCorasick;
use serde::{Deserialize, Serialize};

use crate::core::errors::{ExtractError, Result};

/// Module references discovered in one source text, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleReferences {
    /// Static module names (string and substitution-free template literals)
    pub strings: Vec<String>,

    /// Source text of first arguments that are not static strings
    pub expressions: Vec<String>,
}

impl ModuleReferences {
    /// Create an empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a result holding only static module names
    pub fn from_strings<I, S>(strings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            strings: strings.into_iter().map(Into::into).collect(),
            expressions: Vec::new(),
        }
    }

    /// True when nothing was found
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty() && self.expressions.is_empty()
    }
}

/// Capability that extracts module references from source text.
///
/// Implementations must report references in a stable order for a given
/// input; callers never reorder or deduplicate what is returned.
pub trait ReferenceFinder {
    /// Find module references in a complete source text
    fn find_references(&mut self, source: &str) -> Result<ModuleReferences>;

    /// Language name used in diagnostics
    fn language_name(&self) -> &str;
}

impl<F: ReferenceFinder + ?Sized> ReferenceFinder for Box<F> {
    fn find_references(&mut self, source: &str) -> Result<ModuleReferences> {
        (**self).find_references(source)
    }

    fn language_name(&self) -> &str {
        (**self).language_name()
    }
}

/// Whole-word matcher for the identifier that names the require function.
#[derive(Debug, Clone)]
pub struct WordMatcher {
    word: String,
    automaton: AhoCorasick,
}

impl WordMatcher {
    /// Build a matcher for a single identifier
    pub fn new(word: &str) -> Result<Self> {
        if word.is_empty() {
            return Err(ExtractError::validation("word must not be empty", "word"));
        }
        // Single pattern; overlapping search so self-overlapping words are not skipped.
        let automaton = AhoCorasick::new([word]).map_err(|e| {
            ExtractError::config_field(format!("Failed to build word matcher: {e}"), "word")
        })?;
        Ok(Self {
            word: word.to_string(),
            automaton,
        })
    }

    /// The identifier being matched
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Whether the word appears between two regex-style `\b` boundaries.
    ///
    /// A boundary sits where a word byte (`[A-Za-z0-9_]`) meets a non-word
    /// byte or the edge of the text, so a word that starts with `$` only
    /// matches after a word byte.
    pub fn occurs_in(&self, haystack: &str) -> bool {
        let bytes = haystack.as_bytes();
        let word = self.word.as_bytes();
        let (Some(first), Some(last)) = (word.first(), word.last()) else {
            return false;
        };
        self.automaton.find_overlapping_iter(haystack).any(|m| {
            let before = m.start().checked_sub(1).and_then(|i| bytes.get(i));
            let after = bytes.get(m.end());
            is_boundary(before, *first) && is_boundary(after, *last)
        })
    }
}

fn is_boundary(outside: Option<&u8>, inside: u8) -> bool {
    outside.is_some_and(|b| is_word_byte(*b)) != is_word_byte(inside)
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Whether `name` is usable as a plain identifier for the require function.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || first == '$' || first.is_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c == '$' || c.is_alphanumeric())
}

/// Decode the escape sequences of a string literal body (quotes excluded).
///
/// Unknown escapes yield the escaped character itself and line continuations
/// vanish, as in the language's cooked string values.
pub fn cook_string_literal(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(escaped) = chars.next() else {
            out.push('\\');
            break;
        };
        match escaped {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            // line continuation
            '\n' | '\u{2028}' | '\u{2029}' => {}
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            'x' => {
                let hex: String = take_while_max(&mut chars, 2, |c| c.is_ascii_hexdigit());
                match decode_code_point(&hex, 16).filter(|_| hex.len() == 2) {
                    Some(ch) => out.push(ch),
                    None => {
                        out.push('x');
                        out.push_str(&hex);
                    }
                }
            }
            'u' => out.push_str(&cook_unicode_escape(&mut chars)),
            '0'..='7' => {
                let mut digits = String::from(escaped);
                let max_extra = if escaped <= '3' { 2 } else { 1 };
                digits.push_str(&take_while_max(&mut chars, max_extra, |c| {
                    ('0'..='7').contains(&c)
                }));
                match decode_code_point(&digits, 8) {
                    Some(ch) => out.push(ch),
                    None => out.push_str(&digits),
                }
            }
            other => out.push(other),
        }
    }

    out
}

fn cook_unicode_escape<I>(chars: &mut std::iter::Peekable<I>) -> String
where
    I: Iterator<Item = char> + Clone,
{
    if chars.peek() == Some(&'{') {
        chars.next();
        let hex = take_while_max(chars, 6, |c| c.is_ascii_hexdigit());
        if chars.peek() == Some(&'}') {
            chars.next();
            if let Some(ch) = decode_code_point(&hex, 16) {
                return ch.to_string();
            }
        }
        return format!("u{{{hex}");
    }

    let hex = take_while_max(chars, 4, |c| c.is_ascii_hexdigit());
    if hex.len() != 4 {
        return format!("u{hex}");
    }
    let Ok(unit) = u32::from_str_radix(&hex, 16) else {
        return format!("u{hex}");
    };

    // A high surrogate may be completed by a following `\uXXXX` low surrogate.
    if (0xD800..0xDC00).contains(&unit) {
        let mut lookahead = chars.clone();
        if lookahead.next() == Some('\\') && lookahead.next() == Some('u') {
            let low_hex = take_while_max(&mut lookahead, 4, |c| c.is_ascii_hexdigit());
            if let Ok(low) = u32::from_str_radix(&low_hex, 16) {
                if low_hex.len() == 4 && (0xDC00..0xE000).contains(&low) {
                    let combined = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                    if let Some(ch) = char::from_u32(combined) {
                        *chars = lookahead;
                        return ch.to_string();
                    }
                }
            }
        }
    }

    char::from_u32(unit)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
        .to_string()
}

fn take_while_max<I, P>(chars: &mut std::iter::Peekable<I>, max: usize, pred: P) -> String
where
    I: Iterator<Item = char>,
    P: Fn(char) -> bool,
{
    let mut taken = String::new();
    while taken.len() < max {
        match chars.peek() {
            Some(&c) if pred(c) => {
                taken.push(c);
                chars.next();
            }
            _ => break,
        }
    }
    taken
}

fn decode_code_point(digits: &str, radix: u32) -> Option<char> {
    if digits.is_empty() {
        return None;
    }
    u32::from_str_radix(digits, radix)
        .ok()
        .and_then(char::from_u32)
}
