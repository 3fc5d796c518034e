//! Integration tests for stencil-cli.

use std::fs;
use std::path::Path;

use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

const MAVEN: &str = r#"
[template]
name = "maven-app"
description = "Maven application"
dependencies = ["gitignore"]
notice = "Next: cd {name}"

[[arguments]]
name = "name"
kind = "required"

[[arguments]]
name = "version"
kind = "default"
default = "1.0"

[[arguments]]
name = "modules"
kind = "repeatable"

[[files]]
source = "pom.xml.tpl"
destination = "{name}/pom.xml"
"#;

const POM: &str = "<artifactId>{{name}}</artifactId>\n<version>{{version}}</version>\n{{#modules}}<module>{{.}}</module>\n{{/modules}}";

const GITIGNORE: &str = r#"
[template]
name = "gitignore"
capabilities = ["create"]

[[arguments]]
name = "name"
kind = "required"

[[files]]
source = "gitignore.tpl"
destination = "{name}/.gitignore"
"#;

/// A template tree plus an empty working directory.
struct Workspace {
    templates: TempDir,
    work: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let templates = TempDir::new().unwrap();
        write(templates.path(), "maven-app/template.toml", MAVEN);
        write(templates.path(), "maven-app/pom.xml.tpl", POM);
        write(templates.path(), "gitignore/template.toml", GITIGNORE);
        write(templates.path(), "gitignore/gitignore.tpl", "target/\n");

        Self {
            templates,
            work: TempDir::new().unwrap(),
        }
    }

    fn stencil(&self) -> assert_cmd::Command {
        let mut cmd = cargo::cargo_bin_cmd!("stencil");
        cmd.current_dir(self.work.path())
            .env_remove("STENCIL_TEMPLATES_DIR")
            .arg("--templates-dir")
            .arg(self.templates.path());
        cmd
    }

    fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.work.path().join(relative)).unwrap()
    }
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn test_help_flag() {
    cargo::cargo_bin_cmd!("stencil")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("delete"));
}

#[test]
fn test_version_flag() {
    cargo::cargo_bin_cmd!("stencil")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_create_positional_writes_own_and_dependency_files() {
    let ws = Workspace::new();

    ws.stencil()
        .args(["create", "maven-app", "myapp", "_", "core,web"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Next: cd myapp"));

    assert_eq!(
        ws.read("myapp/pom.xml"),
        "<artifactId>myapp</artifactId>\n<version>1.0</version>\n<module>core</module>\n<module>web</module>\n"
    );
    assert_eq!(ws.read("myapp/.gitignore"), "target/\n");
}

#[test]
fn test_create_named_into_output_dir() {
    let ws = Workspace::new();

    ws.stencil()
        .args(["create", "--output", "out", "maven-app", "version=2.0", "name=svc"])
        .assert()
        .success();

    assert!(ws.read("out/svc/pom.xml").contains("<version>2.0</version>"));
}

#[test]
fn test_declined_overwrite_keeps_file() {
    let ws = Workspace::new();
    write(ws.work.path(), "myapp/pom.xml", "hand edited");
    write(ws.work.path(), "myapp/.gitignore", "mine");

    ws.stencil()
        .args(["create", "maven-app", "myapp"])
        .write_stdin("maybe\nn\nn\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("already exists. Overwrite? [y/n]"));

    assert_eq!(ws.read("myapp/pom.xml"), "hand edited");
    assert_eq!(ws.read("myapp/.gitignore"), "mine");
}

#[test]
fn test_delete_removes_created_files() {
    let ws = Workspace::new();
    ws.stencil()
        .args(["create", "maven-app", "myapp"])
        .assert()
        .success();

    ws.stencil()
        .args(["delete", "maven-app", "name=myapp"])
        .assert()
        .success();

    assert!(!ws.work.path().join("myapp/pom.xml").exists());
    assert!(!ws.work.path().join("myapp/.gitignore").exists());
}

#[test]
fn test_list_json() {
    let ws = Workspace::new();

    let out = ws.stencil().args(["list", "--format", "json"]).output().unwrap();
    assert!(out.status.success());

    let listed: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let names: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["gitignore", "maven-app"]);
    assert_eq!(listed[1]["dependencies"][0], "gitignore");
}

#[test]
fn test_list_plain_names() {
    let ws = Workspace::new();

    ws.stencil()
        .args(["list", "--format", "list"])
        .assert()
        .success()
        .stdout("gitignore\nmaven-app\n");
}

#[test]
fn test_config_path_prints_a_path() {
    cargo::cargo_bin_cmd!("stencil")
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("toml"));
}

#[test]
fn test_init_local_writes_config_once() {
    let ws = Workspace::new();

    ws.stencil().args(["init", "--local"]).assert().success();
    let written = ws.read(".stencil.toml");
    assert!(written.contains("[output]"));

    ws.stencil()
        .args(["init", "--local"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--force"));
}

#[test]
fn test_local_config_supplies_templates_dir() {
    let ws = Workspace::new();
    write(
        ws.work.path(),
        ".stencil.toml",
        &format!(
            "[templates]\ndir = {:?}\n",
            ws.templates.path().display().to_string()
        ),
    );

    cargo::cargo_bin_cmd!("stencil")
        .current_dir(ws.work.path())
        .env_remove("STENCIL_TEMPLATES_DIR")
        .args(["list", "--format", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("maven-app"));
}
