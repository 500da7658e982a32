use std::io::{self, BufRead, Write};

use async_trait::async_trait;

/// Asks the person at the keyboard a question.
#[async_trait]
pub trait UserPrompt: Send + Sync {
    /// The answer, or `None` when input is closed.
    async fn ask(&self, question: &str) -> io::Result<Option<String>>;
}

/// Prompts on stdout and reads the answer from stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsolePrompt;

#[async_trait]
impl UserPrompt for ConsolePrompt {
    async fn ask(&self, question: &str) -> io::Result<Option<String>> {
        println!("Agent needs clarification: {question}");
        read_line("Your response: ").await
    }
}

/// Print `prompt` and read one line from stdin on the blocking pool.
///
/// Returns `None` at end of input. The trailing line break is stripped.
pub async fn read_line(prompt: &str) -> io::Result<Option<String>> {
    let prompt = prompt.to_string();
    tokio::task::spawn_blocking(move || {
        let mut stdout = io::stdout().lock();
        stdout.write_all(prompt.as_bytes())?;
        stdout.flush()?;
        drop(stdout);

        read_line_from(&mut io::stdin().lock())
    })
    .await
    .map_err(io::Error::other)?
}

fn read_line_from(reader: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    let trimmed = line.strip_suffix('\n').unwrap_or(&line);
    let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
    Ok(Some(trimmed.to_string()))
}
