//! Template Command - the driving entry point for one template.
//!
//! Binds a template to a render service and turns an operation verb plus
//! raw tokens into a [`CommandResult`].

use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    application::{
        ApplicationError,
        services::{ArgumentParser, RenderService},
    },
    domain::{Capability, CommandResult, Template},
    error::StencilResult,
};

/// A template wired to the adapters that execute it.
pub struct TemplateCommand {
    template: Template,
    service: RenderService,
}

impl TemplateCommand {
    pub fn new(template: Template, service: RenderService) -> Self {
        Self { template, service }
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Run `operation` ("create" or "delete") with the raw argument tokens.
    ///
    /// The capability check happens before any argument is parsed, and a
    /// parse failure stops the run before any file is touched.
    ///
    /// # Errors
    ///
    /// - [`ApplicationError::UnsupportedOperation`] for an unknown verb or a
    ///   capability the template does not declare
    /// - [`crate::domain::DomainError::ParseFailures`] when any argument fails
    #[instrument(skip_all, fields(template = %self.template.name, operation))]
    pub fn process(&self, operation: &str, raw: &[String]) -> StencilResult<CommandResult> {
        let capability = Capability::parse(operation)
            .filter(|c| self.template.supports(*c))
            .ok_or_else(|| ApplicationError::UnsupportedOperation {
                operation: operation.to_string(),
                template: self.template.name.clone(),
            })?;

        let resolved =
            ArgumentParser::new(self.service.prompt()).parse(raw, &self.template.arguments)?;
        info!(capability = %capability, resolved = resolved.len(), "Arguments resolved");

        match capability {
            Capability::Create => self.service.render(&self.template, &resolved),
            Capability::Delete => self.service.delete_files(&self.template, &resolved),
        }
    }
}

/// Template metadata for display (DTO).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateInfo {
    pub name: String,
    pub description: String,
    pub arguments: Vec<String>,
    pub capabilities: Vec<String>,
    pub dependencies: Vec<String>,
    pub file_count: usize,
}

impl From<&Template> for TemplateInfo {
    fn from(template: &Template) -> Self {
        Self {
            name: template.name.clone(),
            description: template.description.clone(),
            arguments: template
                .arguments
                .iter()
                .map(|a| format!("{} ({})", a.name(), a.kind()))
                .collect(),
            capabilities: template
                .capabilities
                .iter()
                .map(|c| c.as_str().to_string())
                .collect(),
            dependencies: template.dependencies.iter().map(|d| d.name.clone()).collect(),
            file_count: template.all_files().len(),
        }
    }
}
