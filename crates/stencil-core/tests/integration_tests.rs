//! Integration tests for stencil-core.
//!
//! Runs the public API end to end against small in-memory port
//! implementations.

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use stencil_core::{
    application::ApplicationError,
    domain::DomainError,
    prelude::*,
};

#[derive(Default)]
struct FakeFs {
    files: Mutex<HashMap<PathBuf, String>>,
}

impl FakeFs {
    fn with_file(self, path: &str, content: &str) -> Self {
        self.files
            .lock()
            .unwrap()
            .insert(PathBuf::from(path), content.to_string());
        self
    }
}

impl Filesystem for &'static FakeFs {
    fn create_dir_all(&self, _path: &Path) -> StencilResult<()> {
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> StencilResult<()> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> StencilResult<String> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| {
                ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "not found".into(),
                }
                .into()
            })
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }

    fn remove_file(&self, path: &Path) -> StencilResult<()> {
        self.files
            .lock()
            .unwrap()
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| {
                ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "not found".into(),
                }
                .into()
            })
    }

    fn remove_dir_all(&self, _path: &Path) -> StencilResult<()> {
        Ok(())
    }
}

/// Replaces `{{key}}` with the bound value.
struct BraceRenderer;

impl TemplateRenderer for BraceRenderer {
    fn render(&self, body: &str, context: &RenderContext) -> StencilResult<String> {
        Ok(context.iter().fold(body.to_string(), |acc, (key, value)| {
            acc.replace(&format!("{{{{{key}}}}}"), &value.as_path_segment())
        }))
    }
}

#[derive(Default)]
struct Answers {
    queue: Mutex<VecDeque<String>>,
    asked: Mutex<Vec<String>>,
}

impl Prompt for &'static Answers {
    fn ask(&self, question: &str) -> StencilResult<String> {
        self.asked.lock().unwrap().push(question.to_string());
        self.queue.lock().unwrap().pop_front().ok_or_else(|| {
            ApplicationError::PromptFailed {
                reason: "no more answers".into(),
            }
            .into()
        })
    }
}

fn leak<T>(value: T) -> &'static T {
    Box::leak(Box::new(value))
}

fn maven_app() -> Template {
    Template::builder()
        .name("maven-app")
        .argument(Argument::required("name"))
        .argument(Argument::with_default("version", "1.0"))
        .file("src/pom.xml.tpl", "{name}/pom.xml")
        .build()
        .unwrap()
}

fn tokens(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

#[test]
fn create_then_delete_round_trip() {
    let fs = leak(FakeFs::default().with_file("src/pom.xml.tpl", "<v>{{version}}</v>"));
    let answers = leak(Answers::default());

    let command = TemplateCommand::new(
        maven_app(),
        RenderService::new(Box::new(BraceRenderer), Box::new(fs), Box::new(answers)),
    );

    let created = command.process("create", &tokens(&["myapp", "_"])).unwrap();
    assert_eq!(created.written().count(), 1);
    assert_eq!(
        fs.read_to_string(Path::new("myapp/pom.xml")).unwrap(),
        "<v>1.0</v>"
    );
    assert!(answers.asked.lock().unwrap().is_empty());

    let deleted = command.process("delete", &tokens(&["name=myapp"])).unwrap();
    assert_eq!(deleted.deleted().count(), 1);
    assert!(!fs.exists(Path::new("myapp/pom.xml")));
}

#[test]
fn declined_overwrite_keeps_existing_content() {
    let fs = leak(
        FakeFs::default()
            .with_file("src/pom.xml.tpl", "new")
            .with_file("myapp/pom.xml", "old"),
    );
    let answers = leak(Answers::default());
    answers.queue.lock().unwrap().push_back("n".into());

    let command = TemplateCommand::new(
        maven_app(),
        RenderService::new(Box::new(BraceRenderer), Box::new(fs), Box::new(answers)),
    );

    let result = command.process("create", &tokens(&["myapp"])).unwrap();

    assert_eq!(result.files[0].outcome, FileOutcome::Declined);
    assert_eq!(fs.read_to_string(Path::new("myapp/pom.xml")).unwrap(), "old");
    assert_eq!(answers.asked.lock().unwrap().len(), 1);
}

#[test]
fn named_arguments_in_any_order() {
    for raw in [["name=myapp", "version=2.0"], ["version=2.0", "name=myapp"]] {
        let fs = leak(FakeFs::default().with_file("src/pom.xml.tpl", "{{name}}:{{version}}"));
        let command = TemplateCommand::new(
            maven_app(),
            RenderService::new(
                Box::new(BraceRenderer),
                Box::new(fs),
                Box::new(leak(Answers::default())),
            ),
        );

        command.process("create", &tokens(&raw)).unwrap();

        assert_eq!(
            fs.read_to_string(Path::new("myapp/pom.xml")).unwrap(),
            "myapp:2.0"
        );
    }
}

#[test]
fn every_failure_is_reported_together() {
    let template = Template::builder()
        .name("multi")
        .argument(Argument::required("group"))
        .argument(Argument::required("artifact"))
        .build()
        .unwrap();
    let command = TemplateCommand::new(
        template,
        RenderService::new(
            Box::new(BraceRenderer),
            Box::new(leak(FakeFs::default())),
            Box::new(leak(Answers::default())),
        ),
    );

    let err = command.process("create", &[]).unwrap_err();

    let StencilError::Domain(aggregate) = err else {
        panic!("expected a domain error");
    };
    assert_eq!(
        aggregate.failures(),
        vec![
            &DomainError::MissingArgument { name: "group".into() },
            &DomainError::MissingArgument { name: "artifact".into() },
        ]
    );
}

#[test]
fn dependency_file_is_overridden_by_own_file() {
    let base = Template::builder()
        .name("base")
        .file("base/readme.tpl", "README.md")
        .file("base/license.tpl", "LICENSE")
        .build()
        .unwrap();
    let child = Template::builder()
        .name("child")
        .file("child/readme.tpl", "README.md")
        .dependency(base)
        .build()
        .unwrap();

    let fs = leak(
        FakeFs::default()
            .with_file("base/readme.tpl", "base readme")
            .with_file("base/license.tpl", "MIT")
            .with_file("child/readme.tpl", "child readme"),
    );
    let command = TemplateCommand::new(
        child,
        RenderService::new(
            Box::new(BraceRenderer),
            Box::new(fs),
            Box::new(leak(Answers::default())),
        ),
    );

    let result = command.process("create", &[]).unwrap();

    assert_eq!(result.written().count(), 2);
    assert_eq!(
        fs.read_to_string(Path::new("README.md")).unwrap(),
        "child readme"
    );
    assert_eq!(fs.read_to_string(Path::new("LICENSE")).unwrap(), "MIT");
}

#[test]
fn repeatable_values_render_as_list() {
    let template = Template::builder()
        .name("modules")
        .argument(Argument::repeatable("modules"))
        .file("mods.tpl", "modules.txt")
        .build()
        .unwrap();
    let fs = leak(FakeFs::default().with_file("mods.tpl", "{{modules}}"));
    let command = TemplateCommand::new(
        template,
        RenderService::new(
            Box::new(BraceRenderer),
            Box::new(fs),
            Box::new(leak(Answers::default())),
        ),
    );

    let result = command
        .process("create", &tokens(&["modules=core", "modules=web"]))
        .unwrap();

    assert_eq!(
        result.bindings.get("modules"),
        Some(&ContextValue::List(vec!["core".into(), "web".into()]))
    );
    assert_eq!(
        fs.read_to_string(Path::new("modules.txt")).unwrap(),
        "core,web"
    );
}
