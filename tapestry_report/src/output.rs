use std::io::{self, Write};

/// Line-oriented writer for report text.
///
/// `width` is the column count used for horizontal rules.
pub struct Output<W: Write> {
    writer: W,
    pub width: usize,
}

impl<W: Write> Output<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, width: 80 }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Write one line with `padding` leading spaces.
    pub fn write_line(&mut self, message: &str, padding: usize) -> io::Result<()> {
        writeln!(self.writer, "{}{}", " ".repeat(padding), message)
    }

    /// Write a blank line, then the message.
    pub fn write_block(&mut self, message: &str, padding: usize) -> io::Result<()> {
        self.write_line("", 0)?;
        self.write_line(message, padding)
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::Output;

    #[test]
    fn lines_carry_their_padding() {
        let mut out = Output::new(Vec::new());
        out.write_line("plain", 0).expect("write");
        out.write_line("padded", 4).expect("write");
        out.write_block("block", 2).expect("write");

        let text = String::from_utf8(out.into_inner()).expect("utf8");
        assert_eq!(text, "plain\n    padded\n\n  block\n");
    }
}
