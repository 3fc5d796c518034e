//! Prompt adapters.

mod scripted;

pub use scripted::ScriptedPrompt;
