use crate::model::{DiffRecord, EditComponent};

/// Count the leading space characters of a rendered line.
///
/// Empty input counts zero.
pub fn count_padding(text: &str) -> usize {
    text.chars().take_while(|ch| *ch == ' ').count()
}

/// Expand multi-line component values into one record per physical line.
///
/// Empty lines are dropped; each kept line is trimmed and its leading-space
/// width recorded as `padding`.
pub fn expand_records(components: &[EditComponent]) -> Vec<DiffRecord> {
    let mut records = Vec::new();
    for component in components {
        for line in component.value.split('\n').filter(|line| !line.is_empty()) {
            records.push(DiffRecord {
                added: component.added,
                removed: component.removed,
                padding: count_padding(line),
                value: line.trim().to_string(),
            });
        }
    }
    records
}

/// Style callbacks injected by the presentation layer.
///
/// The engine emits no escape codes of its own; every decoration arrives
/// through these hooks.
pub struct RenderStyle<'a> {
    pub same: &'a dyn Fn(&str) -> String,
    pub added: &'a dyn Fn(&str) -> String,
    pub removed: &'a dyn Fn(&str) -> String,
    /// Decoration for the `+` marker in front of added lines.
    pub added_marker: &'a dyn Fn(&str) -> String,
    /// Decoration for the `-` marker in front of removed lines.
    pub removed_marker: &'a dyn Fn(&str) -> String,
}

/// Map expanded records to display lines: marker, preserved padding, styled
/// value.
pub fn render_lines(records: &[DiffRecord], style: &RenderStyle<'_>) -> Vec<String> {
    records
        .iter()
        .map(|record| {
            let pad = " ".repeat(record.padding);
            if record.added {
                format!(
                    "{} {}{}",
                    (style.added_marker)("+"),
                    pad,
                    (style.added)(&record.value)
                )
            } else if record.removed {
                format!(
                    "{} {}{}",
                    (style.removed_marker)("-"),
                    pad,
                    (style.removed)(&record.value)
                )
            } else {
                format!("  {}{}", pad, (style.same)(&record.value))
            }
        })
        .collect()
}

/// Render the old side of an inline diff: unchanged and removed runs only.
pub fn render_removed_line(
    components: &[EditComponent],
    same: &dyn Fn(&str) -> String,
    removed: &dyn Fn(&str) -> String,
) -> String {
    components
        .iter()
        .filter(|component| !component.added)
        .map(|component| {
            if component.removed {
                removed(&component.value)
            } else {
                same(&component.value)
            }
        })
        .collect()
}

/// Render the new side of an inline diff: unchanged and added runs only.
pub fn render_added_line(
    components: &[EditComponent],
    same: &dyn Fn(&str) -> String,
    added: &dyn Fn(&str) -> String,
) -> String {
    components
        .iter()
        .filter(|component| !component.removed)
        .map(|component| {
            if component.added {
                added(&component.value)
            } else {
                same(&component.value)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{RenderStyle, count_padding, expand_records, render_lines};
    use crate::diff_chars;
    use crate::model::EditComponent;

    #[test]
    fn padding_counts_leading_spaces_only() {
        assert_eq!(count_padding(""), 0);
        assert_eq!(count_padding("x"), 0);
        assert_eq!(count_padding("   x"), 3);
        assert_eq!(count_padding("  "), 2);
    }

    #[test]
    fn multi_line_values_expand_per_line() {
        let components = vec![EditComponent {
            count: 2,
            added: true,
            removed: false,
            value: "  \"a\": 1,\n  \"b\": 2\n".to_string(),
        }];

        let records = expand_records(&components);
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|record| record.added));
        assert_eq!(records[0].padding, 2);
        assert_eq!(records[0].value, "\"a\": 1,");
        assert_eq!(records[1].value, "\"b\": 2");
    }

    #[test]
    fn rendered_lines_keep_markers_and_padding() {
        let components = vec![
            EditComponent {
                count: 1,
                added: false,
                removed: true,
                value: "  old\n".to_string(),
            },
            EditComponent {
                count: 1,
                added: true,
                removed: false,
                value: "  new\n".to_string(),
            },
        ];
        let plain = |text: &str| text.to_string();
        let style = RenderStyle {
            same: &plain,
            added: &plain,
            removed: &plain,
            added_marker: &plain,
            removed_marker: &plain,
        };

        let lines = render_lines(&expand_records(&components), &style);
        assert_eq!(lines, vec!["-   old", "+   new"]);
    }

    #[test]
    fn inline_sides_reassemble_each_input() {
        let diff = diff_chars("abc", "abd");
        let plain = |text: &str| text.to_string();

        let old = super::render_removed_line(&diff, &plain, &plain);
        let new = super::render_added_line(&diff, &plain, &plain);
        assert_eq!(old, "abc");
        assert_eq!(new, "abd");
    }
}
