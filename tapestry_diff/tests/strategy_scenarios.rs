use tapestry_diff::{
    JsonStrategy, LineStrategy, SentenceStrategy, WordStrategy, diff_json, diff_sentences,
    diff_slices, diff_with, diff_words,
};
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
fn accented_words_stay_whole_across_a_word_diff() {
    let diff = diff_words("fiancée test", "fiancée tests");

    assert_eq!(diff.len(), 3);
    assert!(diff[0].is_unchanged());
    assert_eq!(diff[0].value, "fiancée ");
    assert!(diff[1].removed);
    assert_eq!(diff[1].value, "test");
    assert!(diff[2].added);
    assert_eq!(diff[2].value, "tests");
}

#[test]
fn case_insensitive_words_compare_equal() {
    let strategy = WordStrategy {
        ignore_case: true,
        ..WordStrategy::default()
    };
    let diff = diff_with(&strategy, "Foo bar", "foo bar");

    assert_eq!(diff.len(), 1);
    assert!(diff[0].is_unchanged());
}

#[test]
fn ignored_trailing_whitespace_folds_into_the_change() {
    let strategy = WordStrategy {
        ignore_whitespace: true,
        ..WordStrategy::default()
    };
    let diff = diff_with(&strategy, "foo bar", "foo baz ");

    assert_eq!(diff.len(), 3);
    assert!(diff[1].removed);
    assert_eq!(diff[1].value, "bar");
    assert!(diff[2].added);
    assert_eq!(diff[2].value, "baz ");
}

#[test]
fn sentence_diff_isolates_the_changed_sentence() {
    let diff = diff_sentences("One fish. Two fish.", "One fish. Red fish.");

    let removed: Vec<_> = diff.iter().filter(|component| component.removed).collect();
    let added: Vec<_> = diff.iter().filter(|component| component.added).collect();
    assert_eq!(removed.len(), 1);
    assert_eq!(removed[0].value, "Two fish.");
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].value, "Red fish.");
}

#[test]
fn sentence_tokens_survive_roundtrip() {
    let text = "First. Second! Third?";
    let diff = diff_with(&SentenceStrategy, text, text);

    assert_eq!(diff.len(), 1);
    assert_eq!(diff[0].value, text);
}

#[test]
fn newline_tokens_report_separator_changes() {
    let strategy = LineStrategy {
        newline_is_token: true,
        ..LineStrategy::default()
    };
    let diff = diff_with(&strategy, "a\nb", "a\nc");

    assert!(diff.iter().any(|component| component.removed && component.value == "b"));
    assert!(diff.iter().any(|component| component.added && component.value == "c"));
}

#[test]
fn structured_diff_of_reordered_objects_is_identity() {
    let old = object(vec![("a", Value::from(1i64)), ("b", Value::from(2i64))]);
    let new = object(vec![("b", Value::from(2i64)), ("a", Value::from(1i64))]);

    let diff = diff_json(&old, &new, &JsonStrategy::default());
    assert_eq!(diff.len(), 1);
    assert!(diff[0].is_unchanged());
}

#[test]
fn structured_diff_pairs_removed_then_added_lines() {
    let old = object(vec![("a", Value::from(1i64))]);
    let new = object(vec![("a", Value::from(2i64))]);

    let diff = diff_json(&old, &new, &JsonStrategy::default());

    let removed_at = diff
        .iter()
        .position(|component| component.removed)
        .expect("a removed line");
    let added_at = diff
        .iter()
        .position(|component| component.added)
        .expect("an added line");
    assert!(removed_at < added_at);
    assert!(diff[removed_at].value.contains("\"a\": 1"));
    assert!(diff[added_at].value.contains("\"a\": 2"));
}

#[test]
fn structured_diff_substitutes_undefined_replacement() {
    let old = object(vec![("a", Value::Undefined)]);
    let new = object(vec![("a", Value::from(1i64))]);
    let strategy = JsonStrategy {
        undefined_replacement: Some(Value::Null),
        ..JsonStrategy::default()
    };

    let diff = diff_json(&old, &new, &strategy);
    assert!(
        diff.iter()
            .any(|component| component.removed && component.value.contains("\"a\": null"))
    );
}

#[test]
fn structured_diff_of_cyclic_values_terminates() {
    let node = Value::shared(Value::Object(Vec::new()));
    if let Value::Shared(cell) = &node {
        *cell.borrow_mut() = object(vec![("next", node.clone())]);
    }
    let plain = object(vec![("next", Value::Object(Vec::new()))]);

    let diff = diff_json(&node, &plain, &JsonStrategy::default());
    assert_eq!(diff.len(), 1);
    assert!(diff[0].is_unchanged());
}

#[test]
fn slice_diff_keeps_element_values() {
    let old = vec!["alpha".to_string(), "beta".to_string()];
    let new = vec!["alpha".to_string(), "gamma".to_string()];

    let diff = diff_slices(&old, &new);
    assert_eq!(diff.len(), 3);
    assert!(diff[1].removed);
    assert_eq!(diff[1].value, &["beta".to_string()]);
    assert!(diff[2].added);
    assert_eq!(diff[2].value, &["gamma".to_string()]);
}
