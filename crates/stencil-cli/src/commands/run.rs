//! Implementation of `stencil create` and `stencil delete`.
//!
//! Responsibility: find the named template, wire the adapters into a
//! `TemplateCommand`, and display the result. No business logic lives here.

use tracing::{info, instrument};

use stencil_adapters::{LocalFilesystem, SimpleRenderer};
use stencil_core::{
    application::{RenderService, TemplateCommand},
    domain::{Capability, CommandResult, FileOutcome, Template},
};

use crate::{
    cli::{GlobalArgs, OutputFormat, RunArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    prompt::TerminalPrompt,
};

/// Execute `operation` against the template named in `args`.
#[instrument(skip_all, fields(operation = %operation, template = %args.template))]
pub fn execute(
    operation: Capability,
    args: RunArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let template = find_template(&args.template, &global, &config)?;

    let mut service = RenderService::new(
        Box::new(SimpleRenderer::new()),
        Box::new(LocalFilesystem::new()),
        Box::new(TerminalPrompt::new()),
    )
    .with_output_root(&args.output);
    if let Some(cache_dir) = &config.render.cache_dir {
        service = service.with_cache_dir(cache_dir);
    }

    let command = TemplateCommand::new(template, service);
    let result = command.process(operation.as_str(), &args.args)?;
    info!(files = result.files.len(), "run finished");

    report(&result, &output)?;

    let failed = result.failed().count();
    if failed > 0 {
        return Err(CliError::PartialFailure { failed });
    }
    Ok(())
}

fn find_template(name: &str, global: &GlobalArgs, config: &AppConfig) -> CliResult<Template> {
    let discovered = super::discover(global, config)?;
    if discovered.templates.is_empty() {
        return Err(CliError::NoTemplates);
    }

    let available: Vec<String> = discovered.templates.iter().map(|t| t.name.clone()).collect();
    discovered
        .templates
        .into_iter()
        .find(|t| t.name == name)
        .ok_or_else(|| CliError::TemplateNotFound {
            name: name.to_string(),
            available,
        })
}

fn report(result: &CommandResult, output: &OutputManager) -> CliResult<()> {
    if output.format() == OutputFormat::Json {
        output.json(result)?;
        return Ok(());
    }

    output.print(&result.message)?;
    let summary = format!(
        "{}: {} written, {} deleted, {} declined",
        result.template,
        result.written().count(),
        result.deleted().count(),
        result
            .files
            .iter()
            .filter(|f| f.outcome == FileOutcome::Declined)
            .count(),
    );
    if result.has_failures() {
        output.warning(&summary)?;
    } else {
        output.success(&summary)?;
    }
    Ok(())
}
