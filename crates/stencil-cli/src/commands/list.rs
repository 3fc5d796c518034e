//! Implementation of the `stencil list` command.

use stencil_core::application::TemplateInfo;

use crate::{
    cli::{GlobalArgs, ListArgs, ListFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(
    args: ListArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let discovered = super::discover(&global, &config)?;
    let templates: Vec<TemplateInfo> = discovered.templates.iter().map(TemplateInfo::from).collect();

    match args.format {
        ListFormat::Json => output.json(&templates)?,

        ListFormat::List => {
            for t in &templates {
                output.print(&t.name)?;
            }
        }

        ListFormat::Table => {
            if templates.is_empty() {
                return Err(CliError::NoTemplates);
            }
            match &discovered.root {
                Some(root) => output.header(&format!("Templates in {}:", root.display()))?,
                None => output.header("Available Templates:")?,
            }
            for line in table_lines(&templates) {
                output.print(&line)?;
            }
        }
    }

    Ok(())
}

fn table_lines(templates: &[TemplateInfo]) -> Vec<String> {
    let width = templates.iter().map(|t| t.name.len()).max().unwrap_or(0);
    let mut lines = Vec::new();

    for t in templates {
        let description = if t.description.is_empty() {
            "-"
        } else {
            t.description.as_str()
        };
        lines.push(format!("  {:<width$}  {}", t.name, description));
        lines.push(format!("  {:<width$}    ops: {}", "", t.capabilities.join(", ")));
        if !t.arguments.is_empty() {
            lines.push(format!("  {:<width$}    args: {}", "", t.arguments.join(", ")));
        }
        if !t.dependencies.is_empty() {
            lines.push(format!(
                "  {:<width$}    uses: {}",
                "",
                t.dependencies.join(", ")
            ));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(name: &str, dependencies: &[&str]) -> TemplateInfo {
        TemplateInfo {
            name: name.into(),
            description: String::new(),
            arguments: vec!["name (required)".into()],
            capabilities: vec!["create".into(), "delete".into()],
            dependencies: dependencies.iter().map(|d| d.to_string()).collect(),
            file_count: 1,
        }
    }

    #[test]
    fn table_aligns_names_and_lists_details() {
        let lines = table_lines(&[info("maven-app", &["gitignore"]), info("gi", &[])]);

        assert_eq!(lines[0], "  maven-app  -");
        assert!(lines[1].ends_with("ops: create, delete"));
        assert!(lines[3].ends_with("uses: gitignore"));
        assert_eq!(lines[4], "  gi         -");
        assert_eq!(lines.len(), 7);
    }
}
