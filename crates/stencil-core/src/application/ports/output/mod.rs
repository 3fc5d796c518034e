//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `stencil-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::RenderContext;
use crate::error::StencilResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `stencil_adapters::filesystem::LocalFilesystem` (production)
/// - `stencil_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> StencilResult<()>;

    /// Write UTF-8 content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> StencilResult<()>;

    /// Read a UTF-8 file.
    fn read_to_string(&self, path: &Path) -> StencilResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> StencilResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> StencilResult<()>;
}

/// Port for the rendering engine.
///
/// The engine owns its placeholder syntax; the core only guarantees that
/// every resolved argument is present in `context`.
///
/// Implemented by:
/// - `stencil_adapters::renderer::SimpleRenderer` (variable substitution)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, body: &str, context: &RenderContext) -> StencilResult<String>;
}

/// Port for interactive input: ask one question, get one line back.
///
/// Blocks until the user answers. There is no timeout.
///
/// Implemented by:
/// - `stencil_cli::prompt::TerminalPrompt` (console)
/// - `stencil_adapters::prompt::ScriptedPrompt` (testing, canned answers)
#[cfg_attr(test, mockall::automock)]
pub trait Prompt: Send + Sync {
    fn ask(&self, question: &str) -> StencilResult<String>;
}
