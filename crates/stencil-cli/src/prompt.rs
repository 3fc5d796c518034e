//! Terminal implementation of the core `Prompt` port.

use std::io::{self, BufRead, IsTerminal, Write};

use stencil_core::{
    application::{ApplicationError, Prompt},
    error::StencilResult,
};

/// Reads answers from the terminal, or from plain stdin when piped.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl TerminalPrompt {
    pub fn new() -> Self {
        Self
    }
}

impl Prompt for TerminalPrompt {
    fn ask(&self, question: &str) -> StencilResult<String> {
        if io::stdin().is_terminal() && io::stderr().is_terminal() {
            return ask_interactive(question);
        }
        ask_line(question, &mut io::stdin().lock(), &mut io::stderr())
    }
}

#[cfg(feature = "interactive")]
fn ask_interactive(question: &str) -> StencilResult<String> {
    dialoguer::Input::<String>::new()
        .with_prompt(question)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| prompt_failed(e.to_string()))
}

#[cfg(not(feature = "interactive"))]
fn ask_interactive(question: &str) -> StencilResult<String> {
    let term = console::Term::stderr();
    term.write_str(&format!("{question} "))
        .and_then(|()| term.read_line())
        .map_err(|e| prompt_failed(e.to_string()))
}

/// Print `question` to `out` and read one line from `input`.
///
/// End of input is an error so a closed stdin cannot loop forever.
fn ask_line(question: &str, input: &mut impl BufRead, out: &mut impl Write) -> StencilResult<String> {
    write!(out, "{question} ")
        .and_then(|()| out.flush())
        .map_err(|e| prompt_failed(e.to_string()))?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .map_err(|e| prompt_failed(e.to_string()))?;
    if read == 0 {
        return Err(prompt_failed(format!("no answer to '{question}': end of input")));
    }

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn prompt_failed(reason: String) -> stencil_core::error::StencilError {
    ApplicationError::PromptFailed { reason }.into()
}
