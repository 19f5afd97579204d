//! Test-event stream aggregation and diff-backed failure reporting.
//!
//! This crate consumes a typed stream of test-runner messages and renders a
//! three-section report: per-file status lines, failure diagnostics (backed
//! by the `tapestry_diff` engine for strings and structured values), and a
//! pass/skip/fail summary.
//!
//! Primary entrypoints:
//! - [`run_report`]
//! - [`StreamMessage`] (the wire protocol)
//! - [`Theme`] / [`default_theme`] (style injection)
//!
//! # Example
//!
//! ```rust
//! use tapestry_report::{Output, PlainTheme, StreamMessage, TestPoint, run_report};
//!
//! let messages = vec![StreamMessage::TestStart {
//!     offset: 0,
//!     data: TestPoint { description: "spec/math.js".to_string() },
//! }];
//! let mut out = Output::new(Vec::new());
//! let summary = run_report(messages, &mut out, &PlainTheme).unwrap();
//! assert!(summary.pass);
//! ```

use thiserror::Error;

mod diagnostic;
mod message;
mod output;
mod reporter;
mod tally;
mod theme;

pub use diagnostic::report_assertion;
pub use message::{AssertionResult, StreamMessage, TestPoint};
pub use output::Output;
pub use reporter::{Summary, run_report};
pub use tally::{Failure, FileTally};
pub use theme::{ColorTheme, PlainTheme, Theme, colors_enabled, default_theme};

/// Fatal conditions for a report run.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The stream signalled an unrecoverable failure; aggregation stops and
    /// the payload is surfaced unmodified.
    #[error("bail out: {0}")]
    BailOut(serde_json::Value),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
