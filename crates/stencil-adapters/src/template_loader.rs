//! Filesystem-based template loader.
//!
//! Discovers and parses `template.toml` manifests from a directory tree,
//! converting them into domain [`Template`] objects with their dependencies
//! linked.
//!
//! # Directory layout expected
//!
//! ```text
//! templates/
//! ├── maven-app/
//! │   ├── template.toml        ← manifest (required)
//! │   └── pom.xml.tpl          ← file body
//! └── gitignore/
//!     ├── template.toml
//!     └── .gitignore.tpl
//! ```
//!
//! # `template.toml` format
//!
//! ```toml
//! [template]
//! name         = "maven-app"               # unique name
//! description  = "Maven application"       # optional
//! capabilities = ["create", "delete"]      # optional, default both
//! dependencies = ["gitignore"]             # optional, by template name
//! notice       = "cd {name} && mvn package" # optional, {arg} placeholders
//!
//! [[arguments]]
//! name = "name"
//! kind = "required"                        # required | default | optional | repeatable
//!
//! [[arguments]]
//! name    = "version"
//! kind    = "default"
//! default = "1.0"                          # omitted: asked for when left empty
//!
//! # Optional. Without it every file in the directory is picked up and its
//! # destination is the relative path minus a trailing `.tpl`.
//! [[files]]
//! source      = "pom.xml.tpl"
//! destination = "{name}/pom.xml"
//!
//! [fixed]
//! java    = "17"                           # scalar
//! modules = ["core", "api"]                # list
//! ```

use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::Deserialize;
use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

use stencil_core::domain::{
    Argument, ArgumentResult, Capability, DomainError, RenderContext, Template, TemplateFile,
    TemplateHooks,
};

const MANIFEST_FILE: &str = "template.toml";
const TEMPLATE_SUFFIX: &str = ".tpl";

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised representation of a `template.toml` file.
#[derive(Debug, Deserialize, Clone)]
pub struct TemplateManifest {
    pub template: TemplateSection,
    #[serde(default)]
    pub arguments: Vec<ArgumentEntry>,
    /// Explicit file list. `None` means auto-discovery.
    pub files: Option<Vec<FileEntry>>,
    #[serde(default)]
    pub fixed: BTreeMap<String, FixedValue>,
}

/// `[template]` section.
#[derive(Debug, Deserialize, Clone)]
pub struct TemplateSection {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Operation names; `None` means every capability.
    pub capabilities: Option<Vec<String>>,
    #[serde(default)]
    pub dependencies: Vec<String>,
    pub notice: Option<String>,
}

/// One entry under `[[arguments]]`.
#[derive(Debug, Deserialize, Clone)]
pub struct ArgumentEntry {
    pub name: String,
    #[serde(default)]
    pub kind: ArgumentKindEntry,
    /// Only meaningful for `kind = "default"`.
    pub default: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ArgumentKindEntry {
    #[default]
    Required,
    Default,
    Optional,
    Repeatable,
}

/// One entry under `[[files]]`.
#[derive(Debug, Deserialize, Clone)]
pub struct FileEntry {
    /// Path relative to the template directory.
    pub source: String,
    /// Destination pattern, `{arg}` placeholders allowed.
    pub destination: String,
}

/// A `[fixed]` value: a scalar or a list.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum FixedValue {
    One(String),
    Many(Vec<String>),
}

impl ArgumentEntry {
    fn to_argument(&self) -> Argument {
        match self.kind {
            ArgumentKindEntry::Required => Argument::required(&self.name),
            ArgumentKindEntry::Default => match &self.default {
                Some(default) => Argument::with_default(&self.name, default),
                None => Argument::ask_default(&self.name),
            },
            ArgumentKindEntry::Optional => Argument::optional(&self.name),
            ArgumentKindEntry::Repeatable => Argument::repeatable(&self.name),
        }
    }
}

impl FixedValue {
    fn to_results(&self, name: &str) -> Vec<ArgumentResult> {
        match self {
            Self::One(value) => vec![Argument::optional(name).bind(value.as_str())],
            Self::Many(values) if values.is_empty() => vec![Argument::repeatable(name).bind("")],
            Self::Many(values) => {
                let arg = Argument::repeatable(name);
                values.iter().map(|v| arg.bind(v.as_str())).collect()
            }
        }
    }
}

// ── Hooks ─────────────────────────────────────────────────────────────────────

/// Hooks attached to manifest-defined templates.
#[derive(Debug, Clone, Default)]
pub struct ManifestHooks {
    template: String,
    notice: Option<String>,
}

impl ManifestHooks {
    pub fn new(template: impl Into<String>, notice: Option<String>) -> Self {
        Self {
            template: template.into(),
            notice,
        }
    }
}

impl TemplateHooks for ManifestHooks {
    fn notice(&self, args: &[ArgumentResult]) -> Option<String> {
        self.notice
            .as_deref()
            .map(|pattern| RenderContext::from_results(args, &[]).substitute(pattern))
    }

    fn pre_render(&self, args: &[ArgumentResult]) {
        debug!(template = %self.template, args = args.len(), "pre-render hook");
    }

    fn post_render(&self, args: &[ArgumentResult]) {
        debug!(template = %self.template, args = args.len(), "post-render hook");
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Loads [`Template`] objects from a directory tree of `template.toml` manifests.
///
/// Each immediate subdirectory of `templates_dir` that contains a valid
/// `template.toml` is treated as one template. Subdirectories that are missing
/// `template.toml`, or whose manifest is invalid, emit a `WARN` log and are
/// skipped. Problems between templates (duplicate names, unknown or cyclic
/// dependencies) fail the whole load.
///
/// # Example
///
/// ```no_run
/// use stencil_adapters::template_loader::FilesystemTemplateLoader;
///
/// let loader = FilesystemTemplateLoader::new("./templates");
/// let templates = loader.load_all()?;
/// println!("Loaded {} templates", templates.len());
/// # Ok::<(), stencil_core::domain::DomainError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FilesystemTemplateLoader {
    templates_dir: PathBuf,
}

/// A manifest paired with the directory it was read from.
#[derive(Debug)]
struct Located {
    dir: PathBuf,
    manifest: TemplateManifest,
}

impl FilesystemTemplateLoader {
    /// Create a loader pointed at `templates_dir`.
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
        }
    }

    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    /// Load every valid template, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidTemplate`] if:
    /// - `templates_dir` does not exist or cannot be read.
    /// - two manifests declare the same name.
    /// - a dependency is unknown or part of a cycle.
    #[instrument(skip(self), fields(dir = %self.templates_dir.display()))]
    pub fn load_all(&self) -> Result<Vec<Template>, DomainError> {
        let manifests = self.read_manifests()?;

        let mut built: HashMap<String, Template> = HashMap::new();
        for name in manifests.keys() {
            let mut chain = Vec::new();
            link(name, &manifests, &mut built, &mut chain)?;
        }

        let mut templates: Vec<Template> = built.into_values().collect();
        templates.sort_by(|a, b| a.name.cmp(&b.name));

        info!(count = templates.len(), "Templates loaded");
        Ok(templates)
    }

    /// Load one template (with its dependencies) by name.
    pub fn load(&self, name: &str) -> Result<Option<Template>, DomainError> {
        Ok(self.load_all()?.into_iter().find(|t| t.name == name))
    }

    fn read_manifests(&self) -> Result<BTreeMap<String, Located>, DomainError> {
        if !self.templates_dir.exists() {
            return Err(DomainError::InvalidTemplate(format!(
                "templates directory not found: {}",
                self.templates_dir.display()
            )));
        }

        let read_dir = fs::read_dir(&self.templates_dir).map_err(|e| {
            DomainError::InvalidTemplate(format!(
                "failed to read templates directory '{}': {e}",
                self.templates_dir.display()
            ))
        })?;

        let mut dirs: Vec<PathBuf> = read_dir
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        dirs.sort();

        let mut manifests: BTreeMap<String, Located> = BTreeMap::new();
        for dir in dirs {
            let manifest = match read_manifest(&dir) {
                Ok(manifest) => manifest,
                Err(e) => {
                    // One bad template must not block all others.
                    warn!(
                        dir   = %dir.display(),
                        error = %e,
                        "skipping template directory due to load error"
                    );
                    continue;
                }
            };

            let name = manifest.template.name.clone();
            if let Some(existing) = manifests.get(&name) {
                return Err(DomainError::InvalidTemplate(format!(
                    "template '{name}' is defined in both '{}' and '{}'",
                    existing.dir.display(),
                    dir.display()
                )));
            }
            debug!(template = %name, dir = %dir.display(), "manifest parsed");
            manifests.insert(name, Located { dir, manifest });
        }

        Ok(manifests)
    }
}

/// Parse `template.toml` in `dir`.
pub fn read_manifest(dir: &Path) -> Result<TemplateManifest, DomainError> {
    let manifest_path = dir.join(MANIFEST_FILE);
    if !manifest_path.exists() {
        return Err(DomainError::InvalidTemplate(format!(
            "missing {MANIFEST_FILE} in '{}'",
            dir.display()
        )));
    }

    let raw = fs::read_to_string(&manifest_path).map_err(|e| {
        DomainError::InvalidTemplate(format!(
            "failed to read '{}': {e}",
            manifest_path.display()
        ))
    })?;

    toml::from_str(&raw).map_err(|e| {
        DomainError::InvalidTemplate(format!(
            "failed to parse '{}': {e}",
            manifest_path.display()
        ))
    })
}

/// Build `name` after its dependencies, memoised in `built`.
///
/// `chain` holds the names currently being built; meeting one of them again
/// means a cycle.
fn link(
    name: &str,
    manifests: &BTreeMap<String, Located>,
    built: &mut HashMap<String, Template>,
    chain: &mut Vec<String>,
) -> Result<Template, DomainError> {
    if let Some(template) = built.get(name) {
        return Ok(template.clone());
    }

    if chain.iter().any(|n| n == name) {
        chain.push(name.to_string());
        return Err(DomainError::InvalidTemplate(format!(
            "dependency cycle: {}",
            chain.join(" -> ")
        )));
    }

    let Some(located) = manifests.get(name) else {
        let parent = chain.last().map(String::as_str).unwrap_or("<root>");
        return Err(DomainError::InvalidTemplate(format!(
            "template '{parent}' depends on unknown template '{name}'"
        )));
    };

    chain.push(name.to_string());
    let dependencies = located
        .manifest
        .template
        .dependencies
        .iter()
        .map(|dep| link(dep, manifests, built, chain))
        .collect::<Result<Vec<_>, _>>()?;
    chain.pop();

    let template = build_template(located, dependencies)?;
    built.insert(name.to_string(), template.clone());
    Ok(template)
}

fn build_template(located: &Located, dependencies: Vec<Template>) -> Result<Template, DomainError> {
    let Located { dir, manifest } = located;
    let section = &manifest.template;

    let files = match &manifest.files {
        Some(entries) => entries
            .iter()
            .map(|f| TemplateFile::new(dir.join(&f.source), normalize_path(&f.destination)))
            .collect(),
        None => discover_files(dir)?,
    };

    let capabilities = match &section.capabilities {
        Some(names) => names
            .iter()
            .map(|s| {
                Capability::parse(s).ok_or_else(|| {
                    DomainError::InvalidTemplate(format!(
                        "template '{}': unknown capability '{s}'; expected create or delete",
                        section.name
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?,
        None => Capability::ALL.to_vec(),
    };

    let mut builder = Template::builder()
        .name(&section.name)
        .description(&section.description)
        .arguments(manifest.arguments.iter().map(ArgumentEntry::to_argument))
        .files(files)
        .capabilities(capabilities)
        .hooks(Arc::new(ManifestHooks::new(
            &section.name,
            section.notice.clone(),
        )));

    for (name, value) in &manifest.fixed {
        for result in value.to_results(name) {
            builder = builder.fixed_value(result);
        }
    }
    for dependency in dependencies {
        builder = builder.dependency(dependency);
    }

    builder.build()
}

/// Every file under `dir` except the manifest, in path order.
fn discover_files(dir: &Path) -> Result<Vec<TemplateFile>, DomainError> {
    let mut files = Vec::new();

    for walk_entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
        let walk_entry = walk_entry
            .map_err(|e| DomainError::InvalidTemplate(format!("directory walk error: {e}")))?;
        if !walk_entry.file_type().is_file() {
            continue;
        }

        let abs_path = walk_entry.path();
        let rel_raw = abs_path.strip_prefix(dir).map_err(|_| {
            DomainError::InvalidTemplate(format!(
                "failed to relativise '{}' against '{}'",
                abs_path.display(),
                dir.display()
            ))
        })?;

        if rel_raw == Path::new(MANIFEST_FILE) {
            continue;
        }

        let relative = normalize_path(&rel_raw.to_string_lossy());
        let destination = relative
            .strip_suffix(TEMPLATE_SUFFIX)
            .unwrap_or(&relative)
            .to_string();
        files.push(TemplateFile::new(abs_path, destination));
    }

    Ok(files)
}

/// Normalise a filesystem path to forward slashes.
fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
