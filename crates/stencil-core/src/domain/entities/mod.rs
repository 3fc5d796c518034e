pub mod argument;
pub mod command_result;
pub mod render_context;
pub mod template;

pub use crate::domain::DomainError;
pub use argument::{Argument, ArgumentKind, ArgumentResult};
pub use command_result::{CommandResult, FileOutcome, FileReport};
pub use render_context::{ContextValue, RenderContext};
pub use template::{Capability, NoHooks, Template, TemplateBuilder, TemplateFile, TemplateHooks};
