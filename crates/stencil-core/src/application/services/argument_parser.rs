//! Argument Parser - raw tokens to resolved argument values.
//!
//! Two strategies:
//!
//! - **Named**: every token is `key=value` → each declared argument picks
//!   its own entries out of the list.
//! - **Positional**: anything else → tokens line up with declared
//!   arguments in declaration order. `_` (or an empty token) means "no
//!   value given".
//!
//! Both strategies report every failure at once as
//! [`DomainError::ParseFailures`].

use tracing::{debug, instrument, warn};

use crate::{
    application::ports::Prompt,
    domain::{Argument, ArgumentKind, ArgumentResult, DomainError},
};

/// Placeholder for "no value" in positional mode.
pub const PLACEHOLDER: &str = "_";

/// Which strategy a token list selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    Positional,
    Named,
}

impl ParseMode {
    /// Named mode needs a non-empty list where every token is `key=value`.
    pub fn detect(raw: &[String]) -> Self {
        if !raw.is_empty() && raw.iter().all(|t| split_named(t).is_some()) {
            Self::Named
        } else {
            Self::Positional
        }
    }
}

/// Split a `key=value` token.
///
/// `key` is ASCII alphanumerics or `_`; `value` is non-empty with no `=` or
/// whitespace.
fn split_named(token: &str) -> Option<(&str, &str)> {
    let (key, value) = token.split_once('=')?;
    let key_ok = !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    let value_ok =
        !value.is_empty() && !value.chars().any(|c| c == '=' || c.is_whitespace());
    (key_ok && value_ok).then_some((key, value))
}

/// Resolves raw tokens against a template's declared arguments.
pub struct ArgumentParser<'a> {
    prompt: &'a dyn Prompt,
}

impl<'a> ArgumentParser<'a> {
    /// `prompt` is only consulted for a `WithDefault(None)` argument left
    /// empty in positional mode.
    pub fn new(prompt: &'a dyn Prompt) -> Self {
        Self { prompt }
    }

    /// Parse `raw` against `declared`.
    ///
    /// Results come back in declaration order.
    #[instrument(skip_all, fields(tokens = raw.len(), declared = declared.len()))]
    pub fn parse(
        &self,
        raw: &[String],
        declared: &[Argument],
    ) -> Result<Vec<ArgumentResult>, DomainError> {
        let mode = ParseMode::detect(raw);
        debug!(?mode, "Parsing arguments");

        match mode {
            ParseMode::Named => self.parse_named(raw, declared),
            ParseMode::Positional => self.parse_positional(raw, declared),
        }
    }

    /// Positional strategy.
    pub fn parse_positional(
        &self,
        raw: &[String],
        declared: &[Argument],
    ) -> Result<Vec<ArgumentResult>, DomainError> {
        let mut tokens: Vec<&str> = raw
            .iter()
            .map(|t| if t.is_empty() { PLACEHOLDER } else { t.as_str() })
            .collect();

        let mut outcomes: Vec<Result<Vec<ArgumentResult>, DomainError>> = Vec::new();

        if tokens.len() > declared.len() {
            for extra in &tokens[declared.len()..] {
                outcomes.push(Err(DomainError::InvalidArgument {
                    name: (*extra).to_string(),
                    reason: format!(
                        "unexpected positional value, the template declares {} argument(s)",
                        declared.len()
                    ),
                }));
            }
            tokens.truncate(declared.len());
        }
        tokens.resize(declared.len(), PLACEHOLDER);

        // Argument failures come first, in declaration order.
        let mut resolved: Vec<_> = declared
            .iter()
            .zip(tokens)
            .map(|(arg, token)| self.resolve_positional(arg, token))
            .collect();
        resolved.append(&mut outcomes);

        collect_outcomes(resolved)
    }

    fn resolve_positional(
        &self,
        arg: &Argument,
        token: &str,
    ) -> Result<Vec<ArgumentResult>, DomainError> {
        if token == PLACEHOLDER {
            return match arg.kind() {
                ArgumentKind::WithDefault(Some(default)) => Ok(vec![arg.bind(default.as_str())]),
                ArgumentKind::WithDefault(None) => self.ask_for(arg).map(|v| vec![arg.bind(v)]),
                ArgumentKind::Optional | ArgumentKind::Repeatable => Ok(vec![arg.bind("")]),
                ArgumentKind::Required => Err(DomainError::MissingArgument {
                    name: arg.name().to_string(),
                }),
            };
        }

        if arg.is_repeatable() && token.contains(',') {
            return split_list(arg, token);
        }

        Ok(vec![arg.bind(token)])
    }

    fn ask_for(&self, arg: &Argument) -> Result<String, DomainError> {
        self.prompt
            .ask(&format!("Value for '{}'", arg.name()))
            .map(|answer| answer.trim().to_string())
            .map_err(|e| DomainError::InvalidArgument {
                name: arg.name().to_string(),
                reason: e.to_string(),
            })
    }

    /// Named strategy.
    pub fn parse_named(
        &self,
        raw: &[String],
        declared: &[Argument],
    ) -> Result<Vec<ArgumentResult>, DomainError> {
        let entries: Vec<(&str, &str)> = raw.iter().filter_map(|t| split_named(t)).collect();

        for (key, _) in &entries {
            if !declared.iter().any(|a| a.name() == *key) {
                warn!(key = %key, "Ignoring value for undeclared argument");
            }
        }

        let outcomes = declared
            .iter()
            .map(|arg| resolve_named(arg, &entries))
            .collect();

        collect_outcomes(outcomes)
    }
}

fn resolve_named(
    arg: &Argument,
    entries: &[(&str, &str)],
) -> Result<Vec<ArgumentResult>, DomainError> {
    let values: Vec<&str> = entries
        .iter()
        .filter(|(key, _)| *key == arg.name())
        .map(|(_, value)| *value)
        .collect();

    match (arg.kind(), values.as_slice()) {
        (ArgumentKind::Repeatable, []) => Ok(vec![arg.bind("")]),
        (ArgumentKind::Repeatable, many) => Ok(many.iter().map(|v| arg.bind(*v)).collect()),
        (_, [single]) => Ok(vec![arg.bind(*single)]),
        (ArgumentKind::Required | ArgumentKind::WithDefault(None), []) => {
            Err(DomainError::MissingArgument {
                name: arg.name().to_string(),
            })
        }
        (ArgumentKind::WithDefault(Some(default)), []) => Ok(vec![arg.bind(default.as_str())]),
        (ArgumentKind::Optional, []) => Ok(vec![arg.bind("")]),
        (_, many) => Err(DomainError::InvalidArgument {
            name: arg.name().to_string(),
            reason: format!("supplied {} times but takes a single value", many.len()),
        }),
    }
}

fn split_list(arg: &Argument, token: &str) -> Result<Vec<ArgumentResult>, DomainError> {
    token
        .split(',')
        .map(str::trim)
        .map(|piece| {
            if piece.is_empty() {
                Err(DomainError::InvalidArgument {
                    name: arg.name().to_string(),
                    reason: format!("empty value in list '{token}'"),
                })
            } else {
                Ok(arg.bind(piece))
            }
        })
        .collect()
}

/// Concatenate successes, or aggregate every failure.
fn collect_outcomes(
    outcomes: Vec<Result<Vec<ArgumentResult>, DomainError>>,
) -> Result<Vec<ArgumentResult>, DomainError> {
    let mut results = Vec::new();
    let mut failures = Vec::new();

    for outcome in outcomes {
        match outcome {
            Ok(mut values) => results.append(&mut values),
            Err(e) => failures.push(e),
        }
    }

    if failures.is_empty() {
        Ok(results)
    } else {
        Err(DomainError::ParseFailures(failures))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockPrompt;
    use crate::application::ApplicationError;

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn values(results: &[ArgumentResult]) -> Vec<(&str, &str)> {
        results.iter().map(|r| (r.name(), r.value.as_str())).collect()
    }

    fn silent_prompt() -> MockPrompt {
        let mut prompt = MockPrompt::new();
        prompt.expect_ask().never();
        prompt
    }

    fn maven_args() -> Vec<Argument> {
        vec![
            Argument::required("name"),
            Argument::with_default("version", "1.0"),
        ]
    }

    // ========================================================================
    // Mode Detection
    // ========================================================================

    #[test]
    fn all_key_value_tokens_select_named_mode() {
        assert_eq!(
            ParseMode::detect(&tokens(&["name=app", "version=2.0"])),
            ParseMode::Named
        );
    }

    #[test]
    fn one_plain_token_forces_positional_mode() {
        assert_eq!(
            ParseMode::detect(&tokens(&["name=app", "2.0"])),
            ParseMode::Positional
        );
    }

    #[test]
    fn empty_list_is_positional() {
        assert_eq!(ParseMode::detect(&[]), ParseMode::Positional);
    }

    #[test]
    fn malformed_pairs_are_not_named() {
        assert!(split_named("=x").is_none());
        assert!(split_named("x=").is_none());
        assert!(split_named("a-b=x").is_none());
        assert!(split_named("a=b=c").is_none());
        assert!(split_named("a=b c").is_none());
        assert_eq!(split_named("tags=a,b"), Some(("tags", "a,b")));
    }

    // ========================================================================
    // Positional Mode
    // ========================================================================

    #[test]
    fn positional_values_follow_declaration_order() {
        let prompt = silent_prompt();
        let declared = vec![
            Argument::required("group"),
            Argument::required("artifact"),
            Argument::optional("description"),
        ];

        let results = ArgumentParser::new(&prompt)
            .parse(&tokens(&["com.acme", "app", "demo"]), &declared)
            .unwrap();

        assert_eq!(
            values(&results),
            vec![
                ("group", "com.acme"),
                ("artifact", "app"),
                ("description", "demo")
            ]
        );
    }

    #[test]
    fn placeholder_applies_declared_default() {
        let prompt = silent_prompt();
        let results = ArgumentParser::new(&prompt)
            .parse(&tokens(&["myapp", "_"]), &maven_args())
            .unwrap();

        assert_eq!(values(&results), vec![("name", "myapp"), ("version", "1.0")]);
    }

    #[test]
    fn short_list_is_padded_with_placeholders() {
        let prompt = silent_prompt();
        let results = ArgumentParser::new(&prompt)
            .parse(&tokens(&["myapp"]), &maven_args())
            .unwrap();

        assert_eq!(values(&results), vec![("name", "myapp"), ("version", "1.0")]);
    }

    #[test]
    fn empty_token_counts_as_placeholder() {
        let prompt = silent_prompt();
        let result = ArgumentParser::new(&prompt).parse(&tokens(&[""]), &maven_args());

        let err = result.unwrap_err();
        assert_eq!(
            err.failures(),
            vec![&DomainError::MissingArgument { name: "name".into() }]
        );
    }

    #[test]
    fn optional_placeholder_resolves_to_empty_string() {
        let prompt = silent_prompt();
        let results = ArgumentParser::new(&prompt)
            .parse(&tokens(&["_"]), &[Argument::optional("description")])
            .unwrap();

        assert_eq!(values(&results), vec![("description", "")]);
    }

    #[test]
    fn repeatable_value_is_split_on_commas() {
        let prompt = silent_prompt();
        let tags = Argument::repeatable("tags");
        let results = ArgumentParser::new(&prompt)
            .parse(&tokens(&["a,b,c"]), std::slice::from_ref(&tags))
            .unwrap();

        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.argument == tags));
        assert_eq!(values(&results), vec![("tags", "a"), ("tags", "b"), ("tags", "c")]);
    }

    #[test]
    fn repeatable_empty_piece_is_invalid() {
        let prompt = silent_prompt();
        let err = ArgumentParser::new(&prompt)
            .parse(&tokens(&["a,,b"]), &[Argument::repeatable("tags")])
            .unwrap_err();

        assert!(matches!(
            err.failures()[0],
            DomainError::InvalidArgument { name, .. } if name == "tags"
        ));
    }

    #[test]
    fn comma_in_non_repeatable_value_is_kept() {
        let prompt = silent_prompt();
        let results = ArgumentParser::new(&prompt)
            .parse(&tokens(&["a,b"]), &[Argument::required("title")])
            .unwrap();

        assert_eq!(values(&results), vec![("title", "a,b")]);
    }

    #[test]
    fn missing_default_is_asked_for() {
        let mut prompt = MockPrompt::new();
        prompt
            .expect_ask()
            .withf(|q| q.contains("license"))
            .times(1)
            .returning(|_| Ok(" MIT \n".to_string()));

        let results = ArgumentParser::new(&prompt)
            .parse(&tokens(&["_"]), &[Argument::ask_default("license")])
            .unwrap();

        assert_eq!(values(&results), vec![("license", "MIT")]);
    }

    #[test]
    fn prompt_failure_is_reported_as_invalid_argument() {
        let mut prompt = MockPrompt::new();
        prompt.expect_ask().returning(|_| {
            Err(ApplicationError::PromptFailed {
                reason: "stdin closed".into(),
            }
            .into())
        });

        let err = ArgumentParser::new(&prompt)
            .parse(&tokens(&["_"]), &[Argument::ask_default("license")])
            .unwrap_err();

        assert!(matches!(
            err.failures()[0],
            DomainError::InvalidArgument { name, reason } if name == "license" && reason.contains("stdin closed")
        ));
    }

    #[test]
    fn all_failures_are_reported_together() {
        let prompt = silent_prompt();
        let declared = vec![
            Argument::required("a"),
            Argument::optional("b"),
            Argument::required("c"),
        ];

        let err = ArgumentParser::new(&prompt)
            .parse(&tokens(&["_", "_", "_"]), &declared)
            .unwrap_err();

        assert_eq!(
            err.failures(),
            vec![
                &DomainError::MissingArgument { name: "a".into() },
                &DomainError::MissingArgument { name: "c".into() },
            ]
        );
        assert_eq!(err.to_string().lines().count(), 2);
    }

    #[test]
    fn extra_positional_tokens_are_rejected() {
        let prompt = silent_prompt();
        let err = ArgumentParser::new(&prompt)
            .parse(&tokens(&["myapp", "2.0", "surplus"]), &maven_args())
            .unwrap_err();

        assert!(matches!(
            err.failures().as_slice(),
            [DomainError::InvalidArgument { name, .. }] if name == "surplus"
        ));
    }

    // ========================================================================
    // Named Mode
    // ========================================================================

    #[test]
    fn named_bindings_ignore_input_order() {
        let prompt = silent_prompt();
        let parser = ArgumentParser::new(&prompt);

        let forward = parser
            .parse(&tokens(&["name=myapp", "version=2.0"]), &maven_args())
            .unwrap();
        let reversed = parser
            .parse(&tokens(&["version=2.0", "name=myapp"]), &maven_args())
            .unwrap();

        assert_eq!(forward, reversed);
        assert_eq!(values(&forward), vec![("name", "myapp"), ("version", "2.0")]);
    }

    #[test]
    fn named_missing_required_fails() {
        let prompt = silent_prompt();
        let err = ArgumentParser::new(&prompt)
            .parse(&tokens(&["version=2.0"]), &maven_args())
            .unwrap_err();

        assert_eq!(
            err.failures(),
            vec![&DomainError::MissingArgument { name: "name".into() }]
        );
    }

    #[test]
    fn named_applies_default_and_optional() {
        let prompt = silent_prompt();
        let declared = vec![
            Argument::required("name"),
            Argument::with_default("version", "1.0"),
            Argument::optional("description"),
        ];

        let results = ArgumentParser::new(&prompt)
            .parse(&tokens(&["name=app"]), &declared)
            .unwrap();

        assert_eq!(
            values(&results),
            vec![("name", "app"), ("version", "1.0"), ("description", "")]
        );
    }

    #[test]
    fn named_missing_ask_default_fails_without_prompting() {
        let prompt = silent_prompt();
        let err = ArgumentParser::new(&prompt)
            .parse(&tokens(&["name=app"]), &[
                Argument::required("name"),
                Argument::ask_default("license"),
            ])
            .unwrap_err();

        assert_eq!(
            err.failures(),
            vec![&DomainError::MissingArgument { name: "license".into() }]
        );
    }

    #[test]
    fn named_repeatable_collects_every_entry() {
        let prompt = silent_prompt();
        let declared = vec![Argument::required("name"), Argument::repeatable("module")];

        let results = ArgumentParser::new(&prompt)
            .parse(
                &tokens(&["module=core", "name=app", "module=api"]),
                &declared,
            )
            .unwrap();

        assert_eq!(
            values(&results),
            vec![("name", "app"), ("module", "core"), ("module", "api")]
        );
    }

    #[test]
    fn named_repeatable_without_entries_is_empty_not_failure() {
        let prompt = silent_prompt();
        let declared = vec![Argument::required("name"), Argument::repeatable("module")];

        let results = ArgumentParser::new(&prompt)
            .parse(&tokens(&["name=app"]), &declared)
            .unwrap();

        assert_eq!(values(&results), vec![("name", "app"), ("module", "")]);
    }

    #[test]
    fn named_duplicate_single_value_is_invalid() {
        let prompt = silent_prompt();
        let err = ArgumentParser::new(&prompt)
            .parse(&tokens(&["name=a", "name=b"]), &maven_args())
            .unwrap_err();

        assert!(matches!(
            err.failures()[0],
            DomainError::InvalidArgument { name, .. } if name == "name"
        ));
    }

    #[test]
    fn named_unknown_keys_are_ignored() {
        let prompt = silent_prompt();
        let results = ArgumentParser::new(&prompt)
            .parse(&tokens(&["name=app", "colour=blue"]), &maven_args())
            .unwrap();

        assert_eq!(values(&results), vec![("name", "app"), ("version", "1.0")]);
    }
}
