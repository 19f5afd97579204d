use std::borrow::Cow;

use tapestry_value::{Replacer, Value, canonical_text};

/// One tokenization behavior for the shared edit-graph search.
///
/// A strategy decides how input text becomes tokens, when two tokens are
/// equal, and how a token run is joined back into a renderable unit. Custom
/// equality is a custom implementation of this trait.
pub trait Strategy {
    /// Pre-processing hook applied to both inputs before tokenization.
    fn cast_input<'a>(&self, input: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(input)
    }

    /// Split the input into comparison tokens.
    fn tokenize(&self, input: &str) -> Vec<String>;

    /// Token equality. The left operand comes from the new sequence, the
    /// right from the old.
    fn equals(&self, left: &str, right: &str) -> bool {
        left == right
    }

    /// Reassemble a token run into a renderable unit.
    fn join(&self, tokens: &[String]) -> String {
        tokens.concat()
    }

    /// When true, unchanged runs pick the longer of the two sides' tokens per
    /// position instead of the new side's token.
    fn use_longest_token(&self) -> bool {
        false
    }
}

pub(crate) fn remove_empty(tokens: Vec<String>) -> Vec<String> {
    tokens.into_iter().filter(|token| !token.is_empty()).collect()
}

/// One token per character.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharacterStrategy {
    pub ignore_case: bool,
}

impl Strategy for CharacterStrategy {
    fn tokenize(&self, input: &str) -> Vec<String> {
        input.chars().map(|ch| ch.to_string()).collect()
    }

    fn equals(&self, left: &str, right: &str) -> bool {
        left == right || (self.ignore_case && left.to_lowercase() == right.to_lowercase())
    }
}

/// Word-level tokens: whitespace runs, single bracket/quote characters, and
/// text split at word/non-word transitions with accented words kept whole.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordStrategy {
    pub ignore_case: bool,
    pub ignore_whitespace: bool,
}

impl Strategy for WordStrategy {
    fn tokenize(&self, input: &str) -> Vec<String> {
        tokenize_words(input)
    }

    fn equals(&self, left: &str, right: &str) -> bool {
        if self.ignore_whitespace && is_blank(left) && is_blank(right) {
            return true;
        }
        if self.ignore_case {
            left.to_lowercase() == right.to_lowercase()
        } else {
            left == right
        }
    }
}

fn is_blank(token: &str) -> bool {
    token.chars().all(char::is_whitespace)
}

fn is_bracket_or_quote(ch: char) -> bool {
    matches!(ch, '(' | ')' | '[' | ']' | '{' | '}' | '\'' | '"')
}

fn is_ascii_word(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

// A-Za-z plus the extended Latin ranges (supplement, extended A/B, IPA,
// spacing modifiers minus the standalone diacritics, extended additional).
fn is_extended_word_char(ch: char) -> bool {
    ch.is_ascii_alphabetic()
        || matches!(
            ch as u32,
            0xC0..=0x2C6 | 0x2C8..=0x2D7 | 0x2DE..=0x2FF | 0x1E00..=0x1EFF
        )
}

fn is_extended_word(token: &str) -> bool {
    !token.is_empty() && token.chars().all(is_extended_word_char)
}

fn tokenize_words(input: &str) -> Vec<String> {
    let chars = input.chars().collect::<Vec<_>>();
    let mut tokens = Vec::new();
    let mut idx = 0;

    while idx < chars.len() {
        let ch = chars[idx];
        if ch.is_whitespace() {
            let start = idx;
            while idx < chars.len() && chars[idx].is_whitespace() {
                idx += 1;
            }
            tokens.push(chars[start..idx].iter().collect());
        } else if is_bracket_or_quote(ch) {
            tokens.push(ch.to_string());
            idx += 1;
        } else {
            let start = idx;
            while idx < chars.len()
                && !chars[idx].is_whitespace()
                && !is_bracket_or_quote(chars[idx])
            {
                idx += 1;
            }
            split_at_word_boundaries(&chars[start..idx], &mut tokens);
        }
    }

    merge_extended_latin(tokens)
}

fn split_at_word_boundaries(run: &[char], tokens: &mut Vec<String>) {
    let mut segment_start = 0;
    for pos in 1..run.len() {
        if is_ascii_word(run[pos]) != is_ascii_word(run[pos - 1]) {
            tokens.push(run[segment_start..pos].iter().collect());
            segment_start = pos;
        }
    }
    tokens.push(run[segment_start..].iter().collect());
}

// The boundary split fragments accented words ("fianc", "é", "e"); rejoin
// adjacent tokens that are entirely extended Latin letters.
fn merge_extended_latin(tokens: Vec<String>) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(tokens.len());
    for token in tokens {
        match merged.last_mut() {
            Some(last) if is_extended_word(last) && is_extended_word(&token) => {
                last.push_str(&token);
            }
            _ => merged.push(token),
        }
    }
    merged
}

/// Line tokens split on `\n`/`\r\n`; the separator stays attached to the
/// preceding line unless `newline_is_token`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineStrategy {
    pub ignore_whitespace: bool,
    pub newline_is_token: bool,
}

impl Strategy for LineStrategy {
    fn tokenize(&self, input: &str) -> Vec<String> {
        let mut parts: Vec<&str> = Vec::new();
        let bytes = input.as_bytes();
        let mut start = 0usize;

        for (idx, byte) in bytes.iter().enumerate() {
            if *byte == b'\n' {
                if idx > start && bytes[idx - 1] == b'\r' {
                    parts.push(&input[start..idx - 1]);
                    parts.push(&input[idx - 1..=idx]);
                } else {
                    parts.push(&input[start..idx]);
                    parts.push(&input[idx..=idx]);
                }
                start = idx + 1;
            }
        }
        parts.push(&input[start..]);

        // A trailing newline would otherwise produce a final empty token.
        if parts.last().is_some_and(|part| part.is_empty()) {
            parts.pop();
        }

        let mut tokens: Vec<String> = Vec::with_capacity(parts.len());
        for (idx, part) in parts.iter().enumerate() {
            if idx % 2 == 1 && !self.newline_is_token {
                if let Some(last) = tokens.last_mut() {
                    last.push_str(part);
                }
            } else if self.ignore_whitespace {
                tokens.push(part.trim().to_string());
            } else {
                tokens.push((*part).to_string());
            }
        }
        tokens
    }
}

/// Sentence tokens: a non-space character, at least one more non-newline
/// character, then `.`/`!`/`?` followed by whitespace or end of input.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceStrategy;

impl Strategy for SentenceStrategy {
    fn tokenize(&self, input: &str) -> Vec<String> {
        let chars = input.chars().collect::<Vec<_>>();
        let mut tokens = Vec::new();
        let mut segment_start = 0usize;
        let mut pos = 0usize;

        while pos < chars.len() {
            if let Some(end) = sentence_end(&chars, pos) {
                tokens.push(chars[segment_start..pos].iter().collect());
                tokens.push(chars[pos..=end].iter().collect());
                segment_start = end + 1;
                pos = end + 1;
            } else {
                pos += 1;
            }
        }
        tokens.push(chars[segment_start..].iter().collect());
        tokens
    }
}

fn sentence_end(chars: &[char], start: usize) -> Option<usize> {
    let len = chars.len();
    if chars[start].is_whitespace() {
        return None;
    }

    let mut end = start + 2;
    while end < len {
        // The span between the opener and the terminator cannot cross a line break.
        if matches!(chars[end - 1], '\n' | '\r') {
            return None;
        }
        if matches!(chars[end], '.' | '!' | '?')
            && (end + 1 == len || chars[end + 1].is_whitespace())
        {
            return Some(end);
        }
        end += 1;
    }
    None
}

/// CSS lexemes: each of `{}:;,` alone, whitespace runs, and the text between.
#[derive(Debug, Clone, Copy, Default)]
pub struct CssStrategy;

impl Strategy for CssStrategy {
    fn tokenize(&self, input: &str) -> Vec<String> {
        let chars = input.chars().collect::<Vec<_>>();
        let mut tokens = Vec::new();
        let mut idx = 0;

        while idx < chars.len() {
            let ch = chars[idx];
            if is_css_separator(ch) {
                tokens.push(ch.to_string());
                idx += 1;
            } else if ch.is_whitespace() {
                let start = idx;
                while idx < chars.len() && chars[idx].is_whitespace() {
                    idx += 1;
                }
                tokens.push(chars[start..idx].iter().collect());
            } else {
                let start = idx;
                while idx < chars.len()
                    && !chars[idx].is_whitespace()
                    && !is_css_separator(chars[idx])
                {
                    idx += 1;
                }
                tokens.push(chars[start..idx].iter().collect());
            }
        }
        tokens
    }
}

fn is_css_separator(ch: char) -> bool {
    matches!(ch, '{' | '}' | ':' | ';' | ',')
}

/// Structured-value strategy: inputs are canonicalized and serialized, then
/// diffed line by line with dangling-comma insensitivity.
#[derive(Debug, Clone, Default)]
pub struct JsonStrategy {
    /// Substituted for `Value::Undefined` during serialization.
    pub undefined_replacement: Option<Value>,
    /// Per-node substitution hook applied during canonicalization.
    pub replacer: Option<Replacer>,
}

impl JsonStrategy {
    /// The cast step for structured inputs: canonicalize, then serialize with
    /// the stable 2-space indent.
    pub fn cast_value(&self, value: &Value) -> String {
        canonical_text(value, self.replacer, self.undefined_replacement.as_ref())
    }
}

impl Strategy for JsonStrategy {
    fn tokenize(&self, input: &str) -> Vec<String> {
        LineStrategy::default().tokenize(input)
    }

    fn equals(&self, left: &str, right: &str) -> bool {
        strip_dangling_commas(left) == strip_dangling_commas(right)
    }

    fn use_longest_token(&self) -> bool {
        true
    }
}

// A comma immediately before a line break is formatting, not content.
fn strip_dangling_commas(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == ',' && matches!(chars.peek(), Some('\n' | '\r')) {
            continue;
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{
        CharacterStrategy, CssStrategy, JsonStrategy, LineStrategy, SentenceStrategy, Strategy,
        WordStrategy,
    };

    #[test]
    fn character_tokens_are_single_chars() {
        let tokens = CharacterStrategy::default().tokenize("héllo");
        assert_eq!(tokens, vec!["h", "é", "l", "l", "o"]);
    }

    #[test]
    fn word_tokens_keep_accented_words_whole() {
        let tokens = WordStrategy::default().tokenize("fiancée tests");
        assert_eq!(tokens, vec!["fiancée", " ", "tests"]);
    }

    #[test]
    fn word_tokens_split_brackets_and_punctuation() {
        let tokens = WordStrategy::default().tokenize("foo(bar, baz)");
        assert_eq!(tokens, vec!["foo", "(", "bar", ",", " ", "baz", ")"]);
    }

    #[test]
    fn word_equality_can_ignore_whitespace_and_case() {
        let strategy = WordStrategy {
            ignore_case: true,
            ignore_whitespace: true,
        };
        assert!(strategy.equals("  ", "\t"));
        assert!(strategy.equals("", " "));
        assert!(strategy.equals("Foo", "foo"));
        assert!(!strategy.equals("foo", "bar"));
    }

    #[test]
    fn line_tokens_attach_separators() {
        let tokens = LineStrategy::default().tokenize("foo\nbar\r\nbaz");
        assert_eq!(tokens, vec!["foo\n", "bar\r\n", "baz"]);
    }

    #[test]
    fn line_tokens_drop_final_empty_token() {
        let tokens = LineStrategy::default().tokenize("foo\nbar\n");
        assert_eq!(tokens, vec!["foo\n", "bar\n"]);
    }

    #[test]
    fn newline_is_token_keeps_separators_standalone() {
        let strategy = LineStrategy {
            newline_is_token: true,
            ..LineStrategy::default()
        };
        assert_eq!(strategy.tokenize("a\nb"), vec!["a", "\n", "b"]);
    }

    #[test]
    fn whitespace_insensitive_lines_are_trimmed() {
        let strategy = LineStrategy {
            ignore_whitespace: true,
            ..LineStrategy::default()
        };
        assert_eq!(strategy.tokenize("  a  \nb"), vec!["a\n", "b"]);
    }

    #[test]
    fn sentences_split_on_terminators_before_whitespace() {
        // The empty leading segment is dropped later, with every empty token.
        let tokens = SentenceStrategy.tokenize("One two. Three! Done");
        assert_eq!(tokens, vec!["", "One two.", " ", "Three!", " Done"]);
    }

    #[test]
    fn css_separators_stand_alone() {
        let tokens = CssStrategy.tokenize("a{color:red;}");
        assert_eq!(tokens, vec!["a", "{", "color", ":", "red", ";", "}"]);
    }

    #[test]
    fn json_equality_ignores_dangling_commas() {
        let strategy = JsonStrategy::default();
        assert!(strategy.equals("  \"a\": 1,\n", "  \"a\": 1\n"));
        assert!(!strategy.equals("  \"a\": 1,\n", "  \"a\": 2\n"));
    }
}
