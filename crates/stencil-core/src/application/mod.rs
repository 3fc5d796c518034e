//! Application layer for Stencil.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ArgumentParser, RenderService, TemplateCommand)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer. Argument and
//! template rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    ArgumentParser, ParseMode, RenderService, TemplateCommand,
    TemplateInfo, // DTO for template metadata
};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, Prompt, TemplateRenderer};

pub use error::ApplicationError;
