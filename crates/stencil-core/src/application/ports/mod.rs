//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `stencil-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `TemplateRenderer`: Template body rendering
//!   - `Prompt`: Blocking line input from the user
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - `TemplateCommand::process` (create / delete)

pub mod output;

pub use output::{Filesystem, Prompt, TemplateRenderer};

#[cfg(test)]
pub use output::{MockFilesystem, MockPrompt, MockTemplateRenderer};
