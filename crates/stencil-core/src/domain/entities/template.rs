//! Template descriptor and file-set composition.
//!
//! A [`Template`] is the static shape of something that can be scaffolded:
//! the arguments it declares, the files it renders, the templates it pulls
//! files from, and values the author binds up front.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Template Descriptor                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Template (Aggregate Root)                                  │
//! │  ├── Vec<Argument>        - what the user supplies          │
//! │  ├── Vec<TemplateFile>    - source → destination pattern    │
//! │  ├── Vec<Template>        - dependencies (one level used)   │
//! │  ├── Vec<ArgumentResult>  - fixed values                    │
//! │  ├── BTreeSet<Capability> - create / delete                 │
//! │  └── Arc<dyn TemplateHooks> - notice, pre/post render       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Templates are read-only once built. Parsing and rendering never mutate
//! them, so a single instance can serve any number of invocations.

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::{
    entities::argument::{Argument, ArgumentResult},
    error::DomainError,
};

/// An operation a template can take part in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    Create,
    Delete,
}

impl Capability {
    pub const ALL: [Capability; 2] = [Capability::Create, Capability::Delete];

    /// Parse an operation verb, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "create" => Some(Self::Create),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One file a template renders.
///
/// `destination` is a pattern: `{name}` placeholders are replaced with
/// argument bindings at render time. Duplicate detection compares the raw
/// pattern, before any substitution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateFile {
    pub source: PathBuf,
    pub destination: String,
}

impl TemplateFile {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }
}

/// Lifecycle hooks a template author can attach.
///
/// All methods default to no-ops.
pub trait TemplateHooks: Send + Sync + fmt::Debug {
    /// Message appended to the run summary.
    fn notice(&self, _args: &[ArgumentResult]) -> Option<String> {
        None
    }

    /// Runs before any file is rendered.
    fn pre_render(&self, _args: &[ArgumentResult]) {}

    /// Runs after every file has been processed.
    fn post_render(&self, _args: &[ArgumentResult]) {}
}

/// Hooks that do nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl TemplateHooks for NoHooks {}

/// A scaffolding template.
#[derive(Debug, Clone)]
pub struct Template {
    pub name: String,
    pub description: String,
    pub arguments: Vec<Argument>,
    pub files: Vec<TemplateFile>,
    pub dependencies: Vec<Template>,
    pub fixed_values: Vec<ArgumentResult>,
    pub capabilities: BTreeSet<Capability>,
    pub hooks: Arc<dyn TemplateHooks>,
}

impl Template {
    pub fn builder() -> TemplateBuilder {
        TemplateBuilder::new()
    }

    /// Own files followed by each direct dependency's files, first
    /// destination pattern wins.
    ///
    /// Only direct dependencies contribute; their own dependencies are not
    /// visited. Later duplicates are dropped silently, which is how a
    /// template overrides a file it would otherwise inherit.
    pub fn all_files(&self) -> Vec<TemplateFile> {
        let mut seen = HashSet::new();

        self.files
            .iter()
            .chain(self.dependencies.iter().flat_map(|dep| dep.files.iter()))
            .filter(|file| seen.insert(file.destination.as_str()))
            .cloned()
            .collect()
    }

    /// Capability query used by operation dispatch.
    pub fn supports(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    pub fn argument(&self, name: &str) -> Option<&Argument> {
        self.arguments.iter().find(|a| a.name() == name)
    }

    /// Validate structural invariants.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidTemplate(
                "template name cannot be empty".into(),
            ));
        }

        let mut names = HashSet::new();
        for arg in &self.arguments {
            if arg.name().is_empty() {
                return Err(DomainError::InvalidTemplate(format!(
                    "template '{}' declares an argument with an empty name",
                    self.name
                )));
            }
            if !names.insert(arg.name()) {
                return Err(DomainError::DuplicateArgument {
                    template: self.name.clone(),
                    name: arg.name().to_string(),
                });
            }
        }

        for file in &self.files {
            if Path::new(&file.destination).is_absolute() {
                return Err(DomainError::AbsolutePathNotAllowed {
                    path: file.destination.clone(),
                });
            }
        }

        Ok(())
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Builder for [`Template`].
///
/// Capabilities default to every [`Capability`] unless set explicitly.
#[derive(Debug, Default)]
pub struct TemplateBuilder {
    name: Option<String>,
    description: String,
    arguments: Vec<Argument>,
    files: Vec<TemplateFile>,
    dependencies: Vec<Template>,
    fixed_values: Vec<ArgumentResult>,
    capabilities: Option<BTreeSet<Capability>>,
    hooks: Option<Arc<dyn TemplateHooks>>,
}

impl TemplateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn argument(mut self, argument: Argument) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn arguments(mut self, arguments: impl IntoIterator<Item = Argument>) -> Self {
        self.arguments.extend(arguments);
        self
    }

    pub fn file(mut self, source: impl Into<PathBuf>, destination: impl Into<String>) -> Self {
        self.files.push(TemplateFile::new(source, destination));
        self
    }

    pub fn files(mut self, files: impl IntoIterator<Item = TemplateFile>) -> Self {
        self.files.extend(files);
        self
    }

    pub fn dependency(mut self, template: Template) -> Self {
        self.dependencies.push(template);
        self
    }

    pub fn fixed_value(mut self, result: ArgumentResult) -> Self {
        self.fixed_values.push(result);
        self
    }

    pub fn capabilities(mut self, capabilities: impl IntoIterator<Item = Capability>) -> Self {
        self.capabilities = Some(capabilities.into_iter().collect());
        self
    }

    pub fn hooks(mut self, hooks: Arc<dyn TemplateHooks>) -> Self {
        self.hooks = Some(hooks);
        self
    }

    /// Build and validate the template.
    pub fn build(self) -> Result<Template, DomainError> {
        let template = Template {
            name: self.name.ok_or_else(|| {
                DomainError::InvalidTemplate("template name is required".into())
            })?,
            description: self.description,
            arguments: self.arguments,
            files: self.files,
            dependencies: self.dependencies,
            fixed_values: self.fixed_values,
            capabilities: self
                .capabilities
                .unwrap_or_else(|| Capability::ALL.into_iter().collect()),
            hooks: self.hooks.unwrap_or_else(|| Arc::new(NoHooks)),
        };

        template.validate()?;
        Ok(template)
    }
}
