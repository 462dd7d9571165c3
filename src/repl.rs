use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

const PROMPT: &str = "> ";

/// Prompting line reader over stdin.
///
/// Reading is async so local tasks (the timer's ticker) keep running while
/// the prompt waits for input.
pub struct LineReader {
    lines: Lines<BufReader<Stdin>>,
}

impl LineReader {
    pub fn stdin() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Print the prompt and wait for the next line; `None` at end of input
    pub async fn readline(&mut self) -> Result<Option<String>, String> {
        write!(std::io::stdout(), "{PROMPT}").map_err(|e| e.to_string())?;
        std::io::stdout().flush().map_err(|e| e.to_string())?;
        self.lines.next_line().await.map_err(|e| e.to_string())
    }
}
