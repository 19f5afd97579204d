use std::io::{self, Write};

use serde_json::Value as JsonValue;
use tapestry_diff::{
    JsonStrategy, RenderStyle, diff_chars, diff_json, expand_records, render_added_line,
    render_lines, render_removed_line,
};
use tapestry_value::{Value, ValueKind};

use crate::message::AssertionResult;
use crate::output::Output;
use crate::theme::Theme;

/// Render the diagnostic block for a failed assertion.
///
/// Unknown operators are not an error; they get a generic diagnostic.
pub fn report_assertion<W: Write>(
    assertion: &AssertionResult,
    out: &mut Output<W>,
    theme: &dyn Theme,
) -> io::Result<()> {
    match assertion.operator.as_deref() {
        Some("ok") => truthy(assertion, out, theme),
        Some("notOk") => falsy(assertion, out, theme),
        Some("notEqual") => not_equal(out, theme),
        Some("is") => same_reference(out, theme),
        Some("isNot") => different_references(out, theme),
        Some("equal") => equivalence(assertion, out, theme),
        Some("doesNotThrow") => thrown_error(assertion, out),
        other => unknown_operator(other.unwrap_or("none"), out),
    }
}

fn truthy<W: Write>(
    assertion: &AssertionResult,
    out: &mut Output<W>,
    theme: &dyn Theme,
) -> io::Result<()> {
    let value = match &assertion.actual {
        None => "undefined".to_string(),
        Some(JsonValue::String(text)) if text.is_empty() => "\"\"".to_string(),
        Some(JsonValue::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    };
    out.write_block(
        &format!(
            "expected a {} value but got {}",
            theme.operator("TRUTHY"),
            theme.error(&value)
        ),
        4,
    )
}

fn falsy<W: Write>(
    assertion: &AssertionResult,
    out: &mut Output<W>,
    theme: &dyn Theme,
) -> io::Result<()> {
    let value = assertion
        .actual
        .as_ref()
        .map_or_else(|| "undefined".to_string(), JsonValue::to_string);
    out.write_block(
        &format!(
            "expected a {} value but got {}",
            theme.operator("FALSY"),
            theme.error(&value)
        ),
        4,
    )
}

fn not_equal<W: Write>(out: &mut Output<W>, theme: &dyn Theme) -> io::Result<()> {
    out.write_block(
        &format!(
            "expected values {} but they are",
            theme.operator("NOT TO BE EQUIVALENT")
        ),
        4,
    )
}

fn same_reference<W: Write>(out: &mut Output<W>, theme: &dyn Theme) -> io::Result<()> {
    out.write_block(
        &format!(
            "expected values to point the {} but they don't",
            theme.operator("SAME REFERENCE")
        ),
        4,
    )
}

fn different_references<W: Write>(out: &mut Output<W>, theme: &dyn Theme) -> io::Result<()> {
    out.write_block(
        &format!(
            "expected values to point {} but they point the same",
            theme.operator("DIFFERENT REFERENCES")
        ),
        4,
    )
}

fn thrown_error<W: Write>(assertion: &AssertionResult, out: &mut Output<W>) -> io::Result<()> {
    let stack = match &assertion.actual {
        Some(JsonValue::Object(fields)) => fields
            .get("stack")
            .and_then(JsonValue::as_str)
            .map_or_else(|| JsonValue::Object(fields.clone()).to_string(), str::to_string),
        Some(JsonValue::String(text)) => text.clone(),
        Some(other) => other.to_string(),
        None => "undefined".to_string(),
    };
    let indented = stack
        .lines()
        .map(|line| format!("    {line}"))
        .collect::<Vec<_>>()
        .join("\n");
    out.write_block(&indented, 0)
}

fn unknown_operator<W: Write>(operator: &str, out: &mut Output<W>) -> io::Result<()> {
    out.write_block(&format!("(unknown operator: {operator})"), 4)
}

fn equivalence<W: Write>(
    assertion: &AssertionResult,
    out: &mut Output<W>,
    theme: &dyn Theme,
) -> io::Result<()> {
    let actual_kind = json_kind(assertion.actual.as_ref());
    let expected_kind = json_kind(assertion.expected.as_ref());

    if actual_kind != expected_kind {
        return out.write_block(
            &format!(
                "expected {} but got {}",
                theme.operator(&format!(
                    "{expected_kind} ({})",
                    raw_label(assertion.expected.as_ref())
                )),
                theme.error(&actual_kind.to_string())
            ),
            4,
        );
    }

    match (expected_kind, &assertion.actual, &assertion.expected) {
        (ValueKind::Number | ValueKind::Boolean, Some(actual), Some(expected)) => out.write_block(
            &format!(
                "expected {} to be {} but got {}",
                theme.emphasis(&expected_kind.to_string()),
                theme.operator(&raw_label(Some(expected))),
                theme.error(&raw_label(Some(actual)))
            ),
            4,
        ),
        (ValueKind::String, Some(JsonValue::String(actual)), Some(JsonValue::String(expected))) => {
            string_difference(actual, expected, out, theme)
        }
        (ValueKind::Object, Some(actual), Some(expected)) => {
            structured_difference("objects", actual, expected, out, theme)
        }
        (ValueKind::Array, Some(actual), Some(expected)) => {
            structured_difference("arrays", actual, expected, out, theme)
        }
        (kind, _, _) => out.write_block(
            &format!(
                "expected {} to be {} but they are not",
                theme.emphasis(&kind.to_string()),
                theme.operator("EQUIVALENT")
            ),
            4,
        ),
    }
}

fn string_difference<W: Write>(
    actual: &str,
    expected: &str,
    out: &mut Output<W>,
    theme: &dyn Theme,
) -> io::Result<()> {
    let diff = diff_chars(actual, expected);
    let same = |text: &str| theme.diff_same(text);
    let removed = |text: &str| theme.diff_remove(text);
    let added = |text: &str| theme.diff_add(text);

    let old_side = render_removed_line(&diff, &same, &removed);
    let new_side = render_added_line(&diff, &same, &added);

    out.write_block(
        &format!(
            "expected {} to be {} but got the following differences:",
            theme.emphasis("string"),
            theme.operator(expected)
        ),
        4,
    )?;
    out.write_block(&format!("{} {}", theme.error("-"), old_side), 4)?;
    out.write_line(&format!("{} {}", theme.success("+"), new_side), 4)
}

fn structured_difference<W: Write>(
    type_label: &str,
    actual: &JsonValue,
    expected: &JsonValue,
    out: &mut Output<W>,
    theme: &dyn Theme,
) -> io::Result<()> {
    let diff = diff_json(
        &Value::from(actual.clone()),
        &Value::from(expected.clone()),
        &JsonStrategy::default(),
    );
    let records = expand_records(&diff);

    let same = |text: &str| theme.diff_same(text);
    let added = |text: &str| theme.diff_add(text);
    let removed = |text: &str| theme.diff_remove(text);
    let added_marker = |text: &str| theme.success(text);
    let removed_marker = |text: &str| theme.error(text);
    let style = RenderStyle {
        same: &same,
        added: &added,
        removed: &removed,
        added_marker: &added_marker,
        removed_marker: &removed_marker,
    };
    let lines = render_lines(&records, &style);

    out.write_block(
        &format!(
            "expected {} to be {} but got the following differences:",
            theme.emphasis(type_label),
            theme.operator("EQUIVALENT")
        ),
        4,
    )?;
    out.write_line("", 0)?;
    for line in lines {
        out.write_line(&line, 2)?;
    }
    Ok(())
}

fn json_kind(value: Option<&JsonValue>) -> ValueKind {
    match value {
        None => ValueKind::Undefined,
        Some(JsonValue::Null) => ValueKind::Null,
        Some(JsonValue::Bool(_)) => ValueKind::Boolean,
        Some(JsonValue::Number(_)) => ValueKind::Number,
        Some(JsonValue::String(_)) => ValueKind::String,
        Some(JsonValue::Array(_)) => ValueKind::Array,
        Some(JsonValue::Object(_)) => ValueKind::Object,
    }
}

// Interpolated the way a template would render the value: strings bare,
// everything else as JSON.
fn raw_label(value: Option<&JsonValue>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(JsonValue::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}
