//! Interactive terminal loop for the memory agent
//!
//! Reads one line at a time, hands non-blank input to a [`Responder`], and
//! prints its answer. Generic over the input/output streams and the interrupt
//! signal so the loop runs the same against a terminal or in-memory buffers.
//!
//! The interrupt ends the session both while waiting for input and while a
//! reply is being generated; an interrupted reply is dropped unfinished.

use crate::agent::MemoryAgent;
use crate::error::Result;
use async_trait::async_trait;
use std::future::Future;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

/// First line printed when the session starts
pub const BANNER: &str = "Codex Memory Agent (Running in offline Ollama mode)";

/// Printed before every line of user input
pub const PROMPT: &str = "You: ";

const GOODBYE: &[u8] = b"\nGoodbye!\n";

/// Anything that can answer a line of user input
#[async_trait]
pub trait Responder: Send {
    async fn respond(&mut self, input: &str) -> Result<String>;
}

#[async_trait]
impl Responder for MemoryAgent {
    async fn respond(&mut self, input: &str) -> Result<String> {
        MemoryAgent::respond(self, input).await
    }
}

/// Result of waiting for one line of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    Line(String),
    EndOfInput,
    Interrupted,
}

/// Read the next line, or report that input ended or was interrupted
pub async fn next_line<R, I>(input: &mut R, interrupt: &mut I) -> Result<LineEvent>
where
    R: AsyncBufRead + Unpin,
    I: Future + Unpin,
{
    let mut line = String::new();
    tokio::select! {
        read = input.read_line(&mut line) => {
            if read? == 0 {
                Ok(LineEvent::EndOfInput)
            } else {
                Ok(LineEvent::Line(line))
            }
        }
        _ = &mut *interrupt => Ok(LineEvent::Interrupted),
    }
}

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The user typed `exit` or `quit`
    Quit,
    /// Input stream closed
    EndOfInput,
    /// Interrupt signal while waiting for input or for a reply
    Interrupted,
}

fn is_exit_command(input: &str) -> bool {
    input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit")
}

/// Run the chat loop until the user quits, input ends, or `interrupt` fires
pub async fn run<A, R, W, I>(
    agent: &mut A,
    mut input: R,
    output: &mut W,
    mut interrupt: I,
) -> Result<ExitReason>
where
    A: Responder + ?Sized,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    I: Future + Unpin,
{
    output
        .write_all(format!("{}\nType 'exit' or 'quit' to stop.\n\n", BANNER).as_bytes())
        .await?;

    loop {
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;

        let line = match next_line(&mut input, &mut interrupt).await? {
            LineEvent::Line(line) => line,
            event => {
                output.write_all(GOODBYE).await?;
                output.flush().await?;
                return Ok(match event {
                    LineEvent::Interrupted => ExitReason::Interrupted,
                    _ => ExitReason::EndOfInput,
                });
            }
        };

        let user_input = line.trim();
        if user_input.is_empty() {
            continue;
        }

        if is_exit_command(user_input) {
            output.write_all(b"Session ended.\n").await?;
            output.flush().await?;
            return Ok(ExitReason::Quit);
        }

        let reply = tokio::select! {
            reply = agent.respond(user_input) => reply,
            _ = &mut interrupt => {
                output.write_all(GOODBYE).await?;
                output.flush().await?;
                return Ok(ExitReason::Interrupted);
            }
        };

        match reply {
            Ok(reply) => {
                output
                    .write_all(format!("Assistant: {}\n\n", reply).as_bytes())
                    .await?;
            }
            Err(e) => {
                warn!("Turn failed: {}", e);
                output
                    .write_all(format!("Assistant error: {}\n", e).as_bytes())
                    .await?;
            }
        }
        debug!("Turn complete");
    }
}
