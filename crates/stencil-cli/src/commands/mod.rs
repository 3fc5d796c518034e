//! Command handlers, one module per subcommand.

pub mod completions;
pub mod config;
pub mod init;
pub mod list;
pub mod run;

use stencil_adapters::{Discovered, all_templates};

use crate::{cli::GlobalArgs, config::AppConfig, error::CliResult};

/// Discover templates, preferring `--templates-dir` over `templates.dir`.
pub(crate) fn discover(global: &GlobalArgs, config: &AppConfig) -> CliResult<Discovered> {
    let explicit = global
        .templates_dir
        .as_deref()
        .or(config.templates.dir.as_deref());
    Ok(all_templates(explicit)?)
}
