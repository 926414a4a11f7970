use anyhow::{Context, Result, bail};
use std::io::{BufRead, Write};
use std::str::FromStr;

/// Line-oriented question/answer reader
///
/// Generic over the input and output streams so that the interactive flow
/// can be driven from a buffer in tests.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print a line without waiting for an answer
    pub fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{}", line).context("Failed to write to output")
    }

    /// Print `question` and return the trimmed answer
    pub fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{}", question).context("Failed to write prompt")?;
        self.output.flush().context("Failed to flush prompt")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read answer")?;
        if read == 0 {
            bail!("Entrada finalizada antes de completar los datos");
        }
        Ok(line.trim().to_string())
    }

    /// Ask a yes/no question; only "s" (any case) counts as yes
    pub fn ask_yes_no(&mut self, question: &str) -> Result<bool> {
        Ok(is_yes(&self.ask(question)?))
    }

    /// Ask a question and parse the answer, naming `field` on failure
    pub fn ask_parsed<T>(&mut self, question: &str, field: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        let answer = self.ask(question)?;
        answer
            .parse::<T>()
            .with_context(|| format!("Valor inválido para {}: '{}'", field, answer))
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

pub fn is_yes(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("s")
}

/// Parse a comma-separated list of years such as "2024, 2025"
pub fn parse_years(input: &str) -> Result<Vec<i32>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(Vec::new());
    }

    input
        .split(',')
        .map(str::trim)
        .map(|year| {
            year.parse::<i32>()
                .with_context(|| format!("Año inválido: '{}'", year))
        })
        .collect()
}
