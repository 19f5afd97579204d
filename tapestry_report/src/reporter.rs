use std::io::{self, Write};

use serde::Serialize;
use tracing::debug;

use crate::ReportError;
use crate::diagnostic::report_assertion;
use crate::message::StreamMessage;
use crate::output::Output;
use crate::tally::{Failure, FileTally};
use crate::theme::Theme;

/// Aggregate totals for one report run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub pass: bool,
    pub success: usize,
    pub failure: usize,
    pub skip: usize,
}

/// Consume a test-event stream and render the full report.
///
/// Messages are processed strictly in order by a single consumer. A bail-out
/// abandons aggregation immediately and surfaces its payload unmodified; no
/// further messages are drained.
pub fn run_report<I, W>(
    messages: I,
    out: &mut Output<W>,
    theme: &dyn Theme,
) -> Result<Summary, ReportError>
where
    I: IntoIterator<Item = StreamMessage>,
    W: Write,
{
    let mut files: Vec<FileTally> = Vec::new();

    print_header("tests files", out, theme)?;
    out.write_line("", 0)?;

    for message in messages {
        match message {
            StreamMessage::BailOut { data, .. } => {
                tracing::error!(payload = %data, "stream bailed out");
                return Err(ReportError::BailOut(data));
            }
            StreamMessage::TestStart { offset, data } => {
                if offset == 0 {
                    // The previous file's section of the stream is complete.
                    if let Some(done) = files.last() {
                        write_status_line(done, out, theme)?;
                    }
                    debug!(file = %data.description, "test file started");
                    files.push(FileTally::new(data.description));
                } else if let Some(current) = files.last_mut() {
                    current.go_in(data.description);
                }
            }
            StreamMessage::TestEnd { offset, .. } => {
                if offset > 0
                    && let Some(current) = files.last_mut()
                {
                    current.go_out();
                }
            }
            StreamMessage::Assertion { data, .. } => {
                if (data.is_assertion() || data.skip)
                    && let Some(current) = files.last_mut()
                {
                    current.record(data);
                }
            }
        }
    }
    if let Some(done) = files.last() {
        write_status_line(done, out, theme)?;
    }

    print_header("failures", out, theme)?;
    print_failures(&files, out, theme)?;
    print_header("summary", out, theme)?;
    out.write_line("", 0)?;
    print_footer(&files, out, theme)
}

fn print_header<W: Write>(message: &str, out: &mut Output<W>, theme: &dyn Theme) -> io::Result<()> {
    out.write_block(&theme.emphasis(&message.to_uppercase()), 1)
}

fn write_status_line<W: Write>(
    tally: &FileTally,
    out: &mut Output<W>,
    theme: &dyn Theme,
) -> io::Result<()> {
    let symbol = if tally.failure() > 0 {
        " ✖"
    } else if tally.skip() > 0 {
        " ⚠"
    } else {
        " ✔"
    };
    let counts = format!("{}/{} ", tally.success(), tally.total());
    let badge_text = format!("{symbol}{counts:>8}");
    let badge = if tally.failure() > 0 {
        theme.failure_badge(&badge_text)
    } else if tally.skip() > 0 {
        theme.skip_badge(&badge_text)
    } else {
        theme.success_badge(&badge_text)
    };

    out.write_line(&format!("{} {}", badge, theme.path(tally.file())), 1)
}

fn print_failures<W: Write>(
    files: &[FileTally],
    out: &mut Output<W>,
    theme: &dyn Theme,
) -> io::Result<()> {
    let failing = files
        .iter()
        .filter(|tally| tally.failure() > 0)
        .flat_map(FileTally::failures)
        .collect::<Vec<&Failure>>();

    if failing.is_empty() {
        return out.write_line("N/A", 2);
    }

    for (index, failure) in failing.iter().enumerate() {
        let assertion = &failure.assertion;

        // The file itself leads the path; the header shows the nested part.
        let separator = theme.adornment(" > ");
        let mut parts = failure.path.iter().skip(1).cloned().collect::<Vec<_>>();
        parts.push(theme.emphasis(&assertion.description));
        let header = parts.join(&separator);

        out.write_block(&format!(
            "{} {} {} {}",
            theme.adornment(&format!("{}.", index + 1)),
            header,
            theme.adornment("<--"),
            theme.operator(assertion.operator.as_deref().unwrap_or("none")),
        ), 0)?;
        out.write_line(
            &format!(
                "{} {}",
                theme.adornment("at"),
                theme.stack_trace(assertion.at.as_deref().unwrap_or("unknown location")),
            ),
            4,
        )?;
        report_assertion(assertion, out, theme)?;
        out.write_line(&theme.adornment(&"_".repeat(out.width)), 0)?;
    }
    Ok(())
}

fn print_footer<W: Write>(
    files: &[FileTally],
    out: &mut Output<W>,
    theme: &dyn Theme,
) -> Result<Summary, ReportError> {
    let success = files.iter().map(FileTally::success).sum();
    let failure = files.iter().map(FileTally::failure).sum();
    let skip = files.iter().map(FileTally::skip).sum();

    out.write_line(&theme.summary_pass(success), 1)?;
    out.write_line(&theme.summary_skip(skip), 1)?;
    out.write_line(&theme.summary_fail(failure), 1)?;
    out.write_line("", 0)?;

    Ok(Summary {
        pass: failure == 0,
        success,
        failure,
        skip,
    })
}
