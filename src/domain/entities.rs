//! Domain entities: core data structures

use crate::domain::template::{highest_placeholder, substitute};

/// Declaration of one positional input slot of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentSpec {
    /// Display label used when prompting
    pub name: String,
    /// Literal value used when nothing is supplied
    pub default: Option<String>,
    /// Closed set of accepted values for interactive selection
    pub choices: Option<Vec<String>>,
}

/// How a command is emitted into the alias artifact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CommandType {
    #[default]
    Alias,
    Function,
}

impl CommandType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "alias" => Some(Self::Alias),
            "function" => Some(Self::Function),
            _ => None,
        }
    }
}

/// One executable entry: template, metadata and argument declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: String,
    /// Template with `$1`, `$2`, ... placeholders
    pub cmd: String,
    pub desc: String,
    pub kind: CommandType,
    /// The Nth entry fills `$N`
    pub args: Vec<ArgumentSpec>,
}

impl CommandSpec {
    /// Menu label: `name - desc`, or just the name without description.
    pub fn label(&self) -> String {
        if self.desc.is_empty() {
            self.name.clone()
        } else {
            format!("{} - {}", self.name, self.desc)
        }
    }
}

/// A named, ordered group of commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub commands: Vec<CommandSpec>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commands: Vec::new(),
        }
    }

    /// Insert a command, replacing an existing one with the same name in place.
    pub(crate) fn upsert(&mut self, command: CommandSpec) {
        match self.commands.iter_mut().find(|c| c.name == command.name) {
            Some(existing) => *existing = command,
            None => self.commands.push(command),
        }
    }
}

/// Resolution state of one declared argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgStatus {
    Supplied(String),
    Defaulted(String),
    /// Needs prompting
    Required,
}

impl ArgStatus {
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Supplied(v) | Self::Defaulted(v) => Some(v),
            Self::Required => None,
        }
    }
}

/// A command with every argument bound, ready to run once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInvocation {
    pub command: CommandSpec,
    /// One value per declared argument, in positional order
    pub values: Vec<String>,
    /// Supplied values beyond the declared arguments
    pub extra: Vec<String>,
}

impl ResolvedInvocation {
    /// Literal shell command line.
    ///
    /// Placeholders are substituted; a template without any placeholder gets
    /// the bound values appended instead. Extra values always go last.
    pub fn command_line(&self) -> String {
        let mut line = substitute(&self.command.cmd, &self.values);

        let mut tail: Vec<&str> = Vec::new();
        if highest_placeholder(&self.command.cmd) == 0 {
            tail.extend(self.values.iter().map(String::as_str));
        }
        tail.extend(self.extra.iter().map(String::as_str));

        if !tail.is_empty() {
            line.push(' ');
            line.push_str(&tail.join(" "));
        }
        line
    }
}
