//! Declared template arguments and their resolved values.
//!
//! An [`Argument`] is fixed when a template is authored. Parsing an
//! invocation produces [`ArgumentResult`]s, one per value: a repeatable
//! argument may yield several results sharing the same argument.

use std::fmt;

/// How an argument behaves when the user gives no value for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArgumentKind {
    /// A value must be supplied.
    Required,
    /// Falls back to the default. With no declared default the user is
    /// asked for one (positional mode only).
    WithDefault(Option<String>),
    /// Resolves to an empty string when absent.
    Optional,
    /// Zero, one or many values.
    Repeatable,
}

impl fmt::Display for ArgumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "required"),
            Self::WithDefault(Some(default)) => write!(f, "default: {default}"),
            Self::WithDefault(None) => write!(f, "default: <ask>"),
            Self::Optional => write!(f, "optional"),
            Self::Repeatable => write!(f, "repeatable"),
        }
    }
}

/// A parameter declared by a template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Argument {
    name: String,
    kind: ArgumentKind,
}

impl Argument {
    pub fn new(name: impl Into<String>, kind: ArgumentKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn required(name: impl Into<String>) -> Self {
        Self::new(name, ArgumentKind::Required)
    }

    pub fn with_default(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self::new(name, ArgumentKind::WithDefault(Some(default.into())))
    }

    /// A default slot with no value: the user is asked when it is left empty.
    pub fn ask_default(name: impl Into<String>) -> Self {
        Self::new(name, ArgumentKind::WithDefault(None))
    }

    pub fn optional(name: impl Into<String>) -> Self {
        Self::new(name, ArgumentKind::Optional)
    }

    pub fn repeatable(name: impl Into<String>) -> Self {
        Self::new(name, ArgumentKind::Repeatable)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ArgumentKind {
        &self.kind
    }

    pub fn is_repeatable(&self) -> bool {
        matches!(self.kind, ArgumentKind::Repeatable)
    }

    /// Bind a value to this argument.
    pub fn bind(&self, value: impl Into<String>) -> ArgumentResult {
        ArgumentResult::new(self.clone(), value)
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}

/// One concrete value for an argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentResult {
    pub argument: Argument,
    pub value: String,
}

impl ArgumentResult {
    pub fn new(argument: Argument, value: impl Into<String>) -> Self {
        Self {
            argument,
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        self.argument.name()
    }
}

impl fmt::Display for ArgumentResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.argument.name(), self.value)
    }
}
