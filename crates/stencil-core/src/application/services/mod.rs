//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "create files from a template".

pub mod argument_parser;
pub mod command_service;
pub mod render_service;

pub use argument_parser::{ArgumentParser, PLACEHOLDER, ParseMode};
pub use command_service::{TemplateCommand, TemplateInfo};
pub use render_service::RenderService;
