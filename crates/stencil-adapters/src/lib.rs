//! Infrastructure adapters for Stencil.
//!
//! This crate implements the ports defined in `stencil-core::application::ports`
//! and loads templates from `template.toml` manifests. It contains all
//! external dependencies and I/O operations.

pub mod discovery;
pub mod filesystem;
pub mod prompt;
pub mod renderer;
pub mod template_loader;

// Re-export commonly used adapters
pub use discovery::{Discovered, all_templates};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use prompt::ScriptedPrompt;
pub use renderer::SimpleRenderer;
pub use template_loader::{FilesystemTemplateLoader, ManifestHooks};
