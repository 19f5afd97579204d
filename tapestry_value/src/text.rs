use crate::Value;
use crate::canonical::{Replacer, canonicalize_with};

/// Canonicalize, then serialize with the stable 2-space indent.
///
/// This is the text form structured values are line-diffed in.
pub fn canonical_text(
    value: &Value,
    replacer: Option<Replacer>,
    undefined_replacement: Option<&Value>,
) -> String {
    to_text(&canonicalize_with(value, replacer, undefined_replacement))
}

/// Serialize a tree-shaped value with a 2-space indent.
///
/// Matches JSON text conventions: object entries holding `Undefined` are
/// dropped, `Undefined` array elements render as `null`, empty containers
/// render as `[]`/`{}` with no inner newline. Callers pass canonical (acyclic)
/// values; shared nodes are rendered through.
pub fn to_text(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value, 0);
    out
}

const INDENT: &str = "  ";

fn write_value(out: &mut String, value: &Value, depth: usize) {
    match value {
        Value::Undefined | Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => write_escaped(out, s),
        Value::Array(items) => {
            if items.is_empty() {
                out.push_str("[]");
                return;
            }
            out.push('[');
            for (idx, item) in items.iter().enumerate() {
                if idx > 0 {
                    out.push(',');
                }
                out.push('\n');
                push_indent(out, depth + 1);
                write_value(out, item, depth + 1);
            }
            out.push('\n');
            push_indent(out, depth);
            out.push(']');
        }
        Value::Object(entries) => {
            let visible = entries
                .iter()
                .filter(|(_, value)| !matches!(value, Value::Undefined))
                .collect::<Vec<_>>();
            if visible.is_empty() {
                out.push_str("{}");
                return;
            }
            out.push('{');
            for (idx, (key, value)) in visible.iter().enumerate() {
                if idx > 0 {
                    out.push(',');
                }
                out.push('\n');
                push_indent(out, depth + 1);
                write_escaped(out, key);
                out.push_str(": ");
                write_value(out, value, depth + 1);
            }
            out.push('\n');
            push_indent(out, depth);
            out.push('}');
        }
        Value::Shared(cell) => write_value(out, &cell.borrow(), depth),
        Value::External(ext) => write_value(out, &ext.to_canonical(), depth),
    }
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn write_escaped(out: &mut String, text: &str) {
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch if (ch as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", ch as u32));
            }
            ch => out.push(ch),
        }
    }
    out.push('"');
}
