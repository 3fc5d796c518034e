// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Stencil.
//!
//! This module contains pure logic with no I/O. Prompting, rendering and
//! filesystem access are handled via ports (traits) defined in the
//! application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or console calls
//! - **No external crates**: Only std library + thiserror + serde derives
//! - **Immutable entities**: Templates are never mutated after `build()`
//!
// Public API - what the world sees
pub mod entities;
pub mod error;

// Re-exports for convenience
pub use entities::{
    argument::{Argument, ArgumentKind, ArgumentResult},
    command_result::{CommandResult, FileOutcome, FileReport},
    render_context::{ContextValue, RenderContext},
    template::{Capability, NoHooks, Template, TemplateBuilder, TemplateFile, TemplateHooks},
};

pub use error::{DomainError, ErrorCategory};
