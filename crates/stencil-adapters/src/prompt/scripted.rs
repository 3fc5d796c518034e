//! Prompt adapter that answers from a fixed script.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use stencil_core::{
    application::{ApplicationError, ports::Prompt},
    error::StencilResult,
};
use tracing::debug;

/// Canned answers, consumed in order.
///
/// Every question asked is recorded. Running out of answers is a
/// [`ApplicationError::PromptFailed`], which is what a non-interactive run
/// should see. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompt {
    inner: Arc<Mutex<ScriptedPromptInner>>,
}

#[derive(Debug, Default)]
struct ScriptedPromptInner {
    answers: VecDeque<String>,
    asked: Vec<String>,
}

impl ScriptedPrompt {
    /// A prompt with no answers: any question fails.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_answers<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let prompt = Self::new();
        if let Ok(mut inner) = prompt.inner.lock() {
            inner.answers = answers.into_iter().map(Into::into).collect();
        }
        prompt
    }

    /// Questions asked so far, oldest first.
    pub fn asked(&self) -> Vec<String> {
        self.inner
            .lock()
            .map(|inner| inner.asked.clone())
            .unwrap_or_default()
    }

    pub fn remaining(&self) -> usize {
        self.inner.lock().map(|inner| inner.answers.len()).unwrap_or(0)
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&self, question: &str) -> StencilResult<String> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner.asked.push(question.to_string());
        let answer = inner.answers.pop_front().ok_or_else(|| ApplicationError::PromptFailed {
            reason: format!("no scripted answer for \"{question}\""),
        })?;

        debug!(question, answer = %answer, "scripted answer");
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_in_order_and_records_questions() {
        let prompt = ScriptedPrompt::with_answers(["y", "n"]);

        assert_eq!(prompt.ask("first?").unwrap(), "y");
        assert_eq!(prompt.ask("second?").unwrap(), "n");
        assert_eq!(prompt.asked(), vec!["first?", "second?"]);
        assert_eq!(prompt.remaining(), 0);
    }

    #[test]
    fn exhausted_script_fails() {
        let prompt = ScriptedPrompt::new();
        let err = prompt.ask("anyone?").unwrap_err();
        assert!(err.to_string().contains("no scripted answer"));
        assert_eq!(prompt.asked().len(), 1);
    }
}
