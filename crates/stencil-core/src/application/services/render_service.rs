//! Render Service - main application orchestrator.
//!
//! This service coordinates the create and delete workflows:
//! 1. Collapse resolved arguments into a render context
//! 2. Render each composed file and write it, asking before overwriting
//! 3. Run the post-render hook and clean the renderer's cache
//!
//! Failures are recovered per file: one bad file never aborts the batch.

use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, Prompt, TemplateRenderer},
    },
    domain::{
        ArgumentResult, CommandResult, DomainError, FileOutcome, FileReport, RenderContext,
        Template, TemplateFile,
    },
    error::StencilResult,
};

/// Main render orchestrator.
pub struct RenderService {
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
    prompt: Box<dyn Prompt>,
    output_root: PathBuf,
    cache_dir: Option<PathBuf>,
}

impl RenderService {
    /// Create a new render service with the given adapters.
    ///
    /// Destinations resolve against the current directory until
    /// [`Self::with_output_root`] says otherwise.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use stencil_core::application::RenderService;
    ///
    /// let service = RenderService::new(
    ///     renderer,   // impl TemplateRenderer
    ///     filesystem, // impl Filesystem
    ///     prompt,     // impl Prompt
    /// )
    /// .with_output_root("./out")
    /// .with_cache_dir(".stencil-cache");
    /// ```
    pub fn new(
        renderer: Box<dyn TemplateRenderer>,
        filesystem: Box<dyn Filesystem>,
        prompt: Box<dyn Prompt>,
    ) -> Self {
        Self {
            renderer,
            filesystem,
            prompt,
            output_root: PathBuf::new(),
            cache_dir: None,
        }
    }

    /// Directory every destination path is joined onto.
    pub fn with_output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.output_root = root.into();
        self
    }

    /// Rendering-engine working directory removed after each create run.
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    pub fn prompt(&self) -> &dyn Prompt {
        self.prompt.as_ref()
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Render every composed file of `template` and write it to disk.
    #[instrument(skip_all, fields(template = %template.name, args = resolved.len()))]
    pub fn render(
        &self,
        template: &Template,
        resolved: &[ArgumentResult],
    ) -> StencilResult<CommandResult> {
        info!("Rendering template");

        template.hooks.pre_render(resolved);

        let context = RenderContext::from_results(resolved, &template.fixed_values);
        let files = template.all_files();
        debug!(files = files.len(), bindings = context.len(), "Context built");

        let reports: Vec<FileReport> = files
            .iter()
            .map(|file| self.render_file(file, &context))
            .collect();

        template.hooks.post_render(resolved);
        self.clean_cache();

        let result = CommandResult::new(
            template.name.as_str(),
            context,
            reports,
            template.hooks.notice(resolved),
        );
        info!(
            written = result.written().count(),
            failed = result.failed().count(),
            "Render completed"
        );
        Ok(result)
    }

    /// Remove every composed file of `template`.
    ///
    /// No confirmation is asked for.
    #[instrument(skip_all, fields(template = %template.name, args = resolved.len()))]
    pub fn delete_files(
        &self,
        template: &Template,
        resolved: &[ArgumentResult],
    ) -> StencilResult<CommandResult> {
        info!("Deleting template files");

        let context = RenderContext::from_results(resolved, &template.fixed_values);

        let reports = template
            .all_files()
            .iter()
            .map(|file| {
                let relative = PathBuf::from(context.substitute(&file.destination));
                let outcome = match self
                    .destination_path(&relative)
                    .and_then(|path| self.filesystem.remove_file(&path))
                {
                    Ok(()) => FileOutcome::Deleted,
                    Err(e) => {
                        warn!(path = %relative.display(), error = %e, "Delete failed");
                        FileOutcome::Failed(e.to_string())
                    }
                };
                FileReport::new(relative, outcome)
            })
            .collect();

        Ok(CommandResult::new(
            template.name.as_str(),
            context,
            reports,
            None,
        ))
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn render_file(&self, file: &TemplateFile, context: &RenderContext) -> FileReport {
        let relative = PathBuf::from(context.substitute(&file.destination));

        match self.write_rendered(file, &relative, context) {
            Ok(outcome) => {
                debug!(path = %relative.display(), ?outcome, "File processed");
                FileReport::new(relative, outcome)
            }
            Err(e) => {
                let failure = ApplicationError::RenderFailure {
                    file: relative.clone(),
                    reason: e.to_string(),
                };
                warn!(error = %failure, source = %file.source.display(), "Skipping file");
                FileReport::new(relative, FileOutcome::Failed(e.to_string()))
            }
        }
    }

    fn write_rendered(
        &self,
        file: &TemplateFile,
        relative: &Path,
        context: &RenderContext,
    ) -> StencilResult<FileOutcome> {
        let target = self.destination_path(relative)?;

        let body = self.filesystem.read_to_string(&file.source)?;
        let rendered = self.renderer.render(&body, context)?;

        if self.filesystem.exists(&target) && !self.confirm_overwrite(relative)? {
            info!(path = %relative.display(), "Overwrite declined");
            return Ok(FileOutcome::Declined);
        }

        if let Some(parent) = target.parent() {
            if !parent.as_os_str().is_empty() {
                self.filesystem.create_dir_all(parent)?;
            }
        }

        self.filesystem.write_file(&target, &rendered)?;
        Ok(FileOutcome::Written)
    }

    /// Join `relative` onto the output root; it must stay beneath it.
    fn destination_path(&self, relative: &Path) -> StencilResult<PathBuf> {
        if relative.is_absolute() || relative.has_root() {
            return Err(DomainError::AbsolutePathNotAllowed {
                path: relative.display().to_string(),
            }
            .into());
        }
        if relative
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            return Err(DomainError::PathEscapesRoot {
                path: relative.display().to_string(),
            }
            .into());
        }
        Ok(self.output_root.join(relative))
    }

    /// Ask until the answer is `y` or `n`.
    fn confirm_overwrite(&self, path: &Path) -> StencilResult<bool> {
        let question = format!("{} already exists. Overwrite? [y/n]", path.display());
        loop {
            let answer = self.prompt.ask(&question)?;
            match answer.trim().to_ascii_lowercase().as_str() {
                "y" => return Ok(true),
                "n" => return Ok(false),
                other => debug!(answer = other, "Expected y or n, asking again"),
            }
        }
    }

    /// Best-effort removal of the renderer's working directory.
    fn clean_cache(&self) {
        let Some(dir) = &self.cache_dir else {
            return;
        };
        if !self.filesystem.exists(dir) {
            return;
        }

        if let Err(e) = self.filesystem.remove_dir_all(dir) {
            warn!(
                error = %e,
                path = %dir.display(),
                "Cache cleanup failed"
            );
        } else {
            debug!(path = %dir.display(), "Cache cleaned");
        }
    }
}
