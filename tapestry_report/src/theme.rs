use owo_colors::OwoColorize;

/// Styling seams injected into report and diff rendering.
///
/// Neither the diff engine nor the report templates emit escape codes; every
/// decoration goes through one of these methods.
pub trait Theme {
    /// Highlight for descriptions and type names.
    fn emphasis(&self, text: &str) -> String;
    fn success_badge(&self, text: &str) -> String;
    fn failure_badge(&self, text: &str) -> String;
    fn skip_badge(&self, text: &str) -> String;
    /// File path decoration in status lines.
    fn path(&self, text: &str) -> String;
    /// Bracketed operator label.
    fn operator(&self, text: &str) -> String;
    /// Low-contrast punctuation and connectors.
    fn adornment(&self, text: &str) -> String;
    fn stack_trace(&self, text: &str) -> String;
    fn summary_pass(&self, count: usize) -> String;
    fn summary_skip(&self, count: usize) -> String;
    fn summary_fail(&self, count: usize) -> String;
    fn error(&self, text: &str) -> String;
    fn success(&self, text: &str) -> String;
    fn diff_same(&self, text: &str) -> String;
    fn diff_add(&self, text: &str) -> String;
    fn diff_remove(&self, text: &str) -> String;
}

/// ANSI theme.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorTheme;

impl Theme for ColorTheme {
    fn emphasis(&self, text: &str) -> String {
        text.bold().underline().to_string()
    }

    fn success_badge(&self, text: &str) -> String {
        text.black().on_green().bold().to_string()
    }

    fn failure_badge(&self, text: &str) -> String {
        text.black().on_red().bold().to_string()
    }

    fn skip_badge(&self, text: &str) -> String {
        text.black().on_yellow().bold().to_string()
    }

    fn path(&self, text: &str) -> String {
        match text.rsplit_once('/') {
            Some((directory, file)) => {
                let full = format!("{}/{}", directory.bright_black(), file);
                full.underline().to_string()
            }
            None => text.underline().to_string(),
        }
    }

    fn operator(&self, text: &str) -> String {
        format!(
            "{} {} {}",
            "[".bright_black(),
            text.yellow(),
            "]".bright_black()
        )
    }

    fn adornment(&self, text: &str) -> String {
        text.bright_black().to_string()
    }

    fn stack_trace(&self, text: &str) -> String {
        text.trim().cyan().underline().to_string()
    }

    fn summary_pass(&self, count: usize) -> String {
        format!("{}: {}", "✔ PASS".bold(), count).green().to_string()
    }

    fn summary_skip(&self, count: usize) -> String {
        format!("{}: {}", "⚠ SKIP".bold(), count).yellow().to_string()
    }

    fn summary_fail(&self, count: usize) -> String {
        format!("{}: {}", "✖ FAIL".bold(), count).red().to_string()
    }

    fn error(&self, text: &str) -> String {
        text.red().to_string()
    }

    fn success(&self, text: &str) -> String {
        text.green().to_string()
    }

    fn diff_same(&self, text: &str) -> String {
        text.bright_black().to_string()
    }

    fn diff_add(&self, text: &str) -> String {
        text.black().on_green().to_string()
    }

    fn diff_remove(&self, text: &str) -> String {
        text.black().on_red().to_string()
    }
}

/// Passthrough theme for dumb terminals, piped output, and byte-stable tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTheme;

impl Theme for PlainTheme {
    fn emphasis(&self, text: &str) -> String {
        text.to_string()
    }

    fn success_badge(&self, text: &str) -> String {
        text.to_string()
    }

    fn failure_badge(&self, text: &str) -> String {
        text.to_string()
    }

    fn skip_badge(&self, text: &str) -> String {
        text.to_string()
    }

    fn path(&self, text: &str) -> String {
        text.to_string()
    }

    fn operator(&self, text: &str) -> String {
        format!("[ {text} ]")
    }

    fn adornment(&self, text: &str) -> String {
        text.to_string()
    }

    fn stack_trace(&self, text: &str) -> String {
        text.trim().to_string()
    }

    fn summary_pass(&self, count: usize) -> String {
        format!("✔ PASS: {count}")
    }

    fn summary_skip(&self, count: usize) -> String {
        format!("⚠ SKIP: {count}")
    }

    fn summary_fail(&self, count: usize) -> String {
        format!("✖ FAIL: {count}")
    }

    fn error(&self, text: &str) -> String {
        text.to_string()
    }

    fn success(&self, text: &str) -> String {
        text.to_string()
    }

    fn diff_same(&self, text: &str) -> String {
        text.to_string()
    }

    fn diff_add(&self, text: &str) -> String {
        text.to_string()
    }

    fn diff_remove(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Color toggle honoring the conventional environment variables: `NO_COLOR`
/// set, `TERM=dumb`, or `FORCE_COLOR=0` disable color.
pub fn colors_enabled() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var("TERM").is_ok_and(|term| term == "dumb") {
        return false;
    }
    if std::env::var("FORCE_COLOR").is_ok_and(|force| force == "0") {
        return false;
    }
    true
}

/// Pick the ANSI theme or the passthrough theme from the environment.
pub fn default_theme() -> Box<dyn Theme> {
    if colors_enabled() {
        Box::new(ColorTheme)
    } else {
        Box::new(PlainTheme)
    }
}

#[cfg(test)]
mod tests {
    use super::{PlainTheme, Theme};

    #[test]
    fn plain_theme_keeps_text_verbatim() {
        let theme = PlainTheme;
        assert_eq!(theme.emphasis("x"), "x");
        assert_eq!(theme.operator("EQUAL"), "[ EQUAL ]");
        assert_eq!(theme.summary_fail(2), "✖ FAIL: 2");
        assert_eq!(theme.stack_trace("  file.js:1:1  "), "file.js:1:1");
    }
}
