use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tapestry_report::{
    Output, PlainTheme, ReportError, StreamMessage, Theme, default_theme, run_report,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "test-report")]
#[command(about = "Replay a recorded test-event stream and print the report")]
struct Cli {
    /// JSON-lines stream file, or `-` for stdin.
    stream: PathBuf,

    /// Disable ANSI styling regardless of the environment.
    #[arg(long)]
    no_color: bool,

    /// Print the aggregate summary as JSON after the report.
    #[arg(long)]
    summary_json: bool,

    /// Report width used for horizontal rules.
    #[arg(long, default_value_t = 80)]
    width: usize,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let text = read_stream(&cli.stream)?;
    let messages = parse_messages(&text)?;
    debug!(count = messages.len(), "stream decoded");

    let theme: Box<dyn Theme> = if cli.no_color {
        Box::new(PlainTheme)
    } else {
        default_theme()
    };
    let stdout = io::stdout().lock();
    let mut out = Output::new(stdout).with_width(cli.width);

    let summary = match run_report(messages, &mut out, theme.as_ref()) {
        Ok(summary) => summary,
        Err(ReportError::BailOut(payload)) => {
            return Err(anyhow::anyhow!("stream bailed out: {payload}"));
        }
        Err(error) => return Err(error.into()),
    };
    drop(out);

    if cli.summary_json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(if summary.pass {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn read_stream(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("read stream from stdin")?;
        return Ok(text);
    }
    fs::read_to_string(path).with_context(|| format!("read stream file {}", path.display()))
}

fn parse_messages(text: &str) -> anyhow::Result<Vec<StreamMessage>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(number, line)| {
            serde_json::from_str(line)
                .with_context(|| format!("malformed stream message on line {}", number + 1))
        })
        .collect()
}
