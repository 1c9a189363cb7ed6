// src/exec/template.rs

use std::fmt;

/// Marker replaced by the current input line in every argument token.
pub const PLACEHOLDER: &str = "{}";

/// Executable plus argument tokens, shared read-only by all workers.
///
/// Only the arguments are substituted; the executable name is used as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    program: String,
    args: Vec<String>,
}

impl CommandTemplate {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Render the template for one line.
    ///
    /// Every occurrence of [`PLACEHOLDER`] in every argument is replaced with
    /// `line` verbatim. No quoting or escaping is applied.
    pub fn render(&self, line: &str) -> Invocation {
        Invocation {
            program: self.program.clone(),
            args: self
                .args
                .iter()
                .map(|arg| arg.replace(PLACEHOLDER, line))
                .collect(),
        }
    }
}

/// A concrete command for one line, owned by the worker that rendered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    /// Executable followed by its arguments, as one vector.
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.argv().join(" "))
    }
}
