//! Sequence-diff engine with pluggable tokenization strategies.
//!
//! This crate computes minimal edit scripts (inserted/removed/unchanged runs)
//! between two token sequences with the classic O((N+M)·D) edit-graph search,
//! and exposes it through several tokenizations:
//! - [`diff_chars`], [`diff_words`], [`diff_lines`], [`diff_sentences`],
//!   [`diff_css`] for text
//! - [`diff_json`] for structured values (canonicalized, then line-diffed)
//! - [`diff_slices`] / [`diff_slices_by`] for already-tokenized sequences
//!
//! Custom behavior plugs in through the [`Strategy`] trait and
//! [`diff_with`]. The render adapter ([`expand_records`], [`render_lines`])
//! turns components into per-line records styled through injected callbacks;
//! the engine itself never emits escape codes.
//!
//! # Example
//!
//! ```rust
//! use tapestry_diff::diff_lines;
//!
//! let diff = diff_lines("foo\nbar\n", "foo\nbaz\n");
//! assert_eq!(diff.len(), 3);
//! assert!(diff[0].is_unchanged());
//! assert!(diff[1].removed);
//! assert!(diff[2].added);
//! ```

use tapestry_value::Value;

mod engine;
mod model;
mod render;
mod slices;
mod strategy;

pub use model::{DiffRecord, EditComponent, SliceComponent};
pub use render::{
    RenderStyle, count_padding, expand_records, render_added_line, render_lines,
    render_removed_line,
};
pub use slices::{diff_slices, diff_slices_by};
pub use strategy::{
    CharacterStrategy, CssStrategy, JsonStrategy, LineStrategy, SentenceStrategy, Strategy,
    WordStrategy,
};

/// Diff two inputs with an explicit strategy.
pub fn diff_with<S>(strategy: &S, old: &str, new: &str) -> Vec<EditComponent>
where
    S: Strategy + ?Sized,
{
    let old = strategy.cast_input(old);
    let new = strategy.cast_input(new);
    let old_tokens = strategy::remove_empty(strategy.tokenize(&old));
    let new_tokens = strategy::remove_empty(strategy.tokenize(&new));

    let raw = engine::shortest_edit(&old_tokens, &new_tokens, |left, right| {
        strategy.equals(left, right)
    });
    engine::build_values(strategy, raw, &new_tokens, &old_tokens)
}

/// Character-level diff.
pub fn diff_chars(old: &str, new: &str) -> Vec<EditComponent> {
    diff_with(&CharacterStrategy::default(), old, new)
}

/// Word-level diff (whitespace runs and bracket/quote characters are tokens).
pub fn diff_words(old: &str, new: &str) -> Vec<EditComponent> {
    diff_with(&WordStrategy::default(), old, new)
}

/// Line-level diff; separators stay attached to the preceding line.
pub fn diff_lines(old: &str, new: &str) -> Vec<EditComponent> {
    diff_with(&LineStrategy::default(), old, new)
}

/// Sentence-level diff.
pub fn diff_sentences(old: &str, new: &str) -> Vec<EditComponent> {
    diff_with(&SentenceStrategy, old, new)
}

/// CSS-token diff.
pub fn diff_css(old: &str, new: &str) -> Vec<EditComponent> {
    diff_with(&CssStrategy, old, new)
}

/// Structured-value diff: canonicalize both sides, serialize with the stable
/// 2-space indent, and diff line by line. Lines differing only by a dangling
/// comma compare equal, and unchanged runs keep the longer variant.
pub fn diff_json(old: &Value, new: &Value, strategy: &JsonStrategy) -> Vec<EditComponent> {
    let old_text = strategy.cast_value(old);
    let new_text = strategy.cast_value(new);
    diff_with(strategy, &old_text, &new_text)
}

#[cfg(test)]
mod tests {
    use super::{JsonStrategy, diff_chars, diff_json, diff_lines};
    use tapestry_value::Value;

    fn object(entries: Vec<(&str, Value)>) -> Value {
        Value::Object(
            entries
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect(),
        )
    }

    #[test]
    fn char_diff_reports_single_trailing_insertion() {
        let diff = diff_chars("fiancée test", "fiancée tests");
        assert_eq!(diff.len(), 2);
        assert!(diff[0].is_unchanged());
        assert_eq!(diff[0].value, "fiancée test");
        assert!(diff[1].added);
        assert_eq!(diff[1].value, "s");
        assert_eq!(diff[1].count, 1);
    }

    #[test]
    fn line_diff_presents_removal_before_insertion() {
        let diff = diff_lines("foo\nbar\n", "foo\nbaz\n");
        assert_eq!(diff.len(), 3);
        assert_eq!(diff[0].value, "foo\n");
        assert!(diff[1].removed);
        assert_eq!(diff[1].value, "bar\n");
        assert!(diff[2].added);
        assert_eq!(diff[2].value, "baz\n");
    }

    #[test]
    fn json_diff_ignores_key_order() {
        let old = object(vec![("a", Value::from(1i64)), ("b", Value::from(2i64))]);
        let new = object(vec![("b", Value::from(2i64)), ("a", Value::from(1i64))]);

        let diff = diff_json(&old, &new, &JsonStrategy::default());
        assert_eq!(diff.len(), 1);
        assert!(diff[0].is_unchanged());
    }

    #[test]
    fn json_diff_keeps_dangling_comma_lines_unchanged() {
        let old = object(vec![("a", Value::from(1i64))]);
        let new = object(vec![("a", Value::from(1i64)), ("b", Value::from(2i64))]);

        let diff = diff_json(&old, &new, &JsonStrategy::default());
        // "a" keeps its comma variant inside an unchanged run; only "b" is new.
        assert!(diff.iter().all(|component| !component.removed));
        let added: Vec<_> = diff.iter().filter(|component| component.added).collect();
        assert_eq!(added.len(), 1);
        assert!(added[0].value.contains("\"b\": 2"));
        let unchanged = diff
            .iter()
            .filter(|component| component.is_unchanged())
            .map(|component| component.value.as_str())
            .collect::<String>();
        assert!(unchanged.contains("\"a\": 1,"));
    }
}
