use std::fmt::Display;
use std::io::{self, BufRead, Write};

/// Line-oriented terminal I/O, generic so whole sessions can run against scripted input.
#[derive(Debug)]
pub(crate) struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub(crate) fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `question` and read one line. `None` once input is exhausted.
    ///
    /// Bytes that are not UTF-8 become replacement characters, so a garbled line is just an
    /// invalid answer.
    pub(crate) fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            log::debug!("Input closed");
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&line);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
    }

    pub(crate) fn say(&mut self, line: impl Display) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    pub(crate) fn show(&mut self, block: &str) -> io::Result<()> {
        self.output.write_all(block.as_bytes())?;
        self.output.flush()
    }

    #[cfg(test)]
    pub(crate) fn into_output(self) -> W {
        self.output
    }
}
