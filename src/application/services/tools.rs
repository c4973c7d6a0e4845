//! Report external programs referenced by command templates
//!
//! Missing programs are looked up in an optional package index
//! (`packages.yaml`) naming the package that provides them. Nothing is
//! installed.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use itertools::Itertools;
use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::Catalog;
use crate::infrastructure::traits::FileSystem;

/// Words that may precede the actual program.
const PREFIXES: &[&str] = &["sudo", "env", "time", "exec", "nohup", "command"];

/// Shell builtins and keywords never looked up on PATH.
const BUILTINS: &[&str] = &[
    "cd", "echo", "export", "source", ".", "alias", "unalias", "set", "unset", "read", "eval",
    "exit", "return", "shift", "test", "[", "[[", "true", "false", "if", "then", "else", "elif",
    "fi", "for", "while", "until", "do", "done", "case", "esac", "in", "function", "local",
    "printf", "pwd", "type", "trap", "wait", "{", "}", "(", ")", "!",
];

fn separator_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\|\||&&|[|;&\n]|\$\(|`").expect("valid separator regex"))
}

/// Where a program comes from, as recorded in the package index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PackageHint {
    pub package: Option<String>,
    /// Install method, e.g. `apt`, `custom`, `manual`
    pub method: Option<String>,
    pub url: Option<String>,
    pub notes: Option<String>,
}

/// Package index document: `commands:` maps program names to hints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PackageIndex {
    #[serde(default)]
    commands: Option<HashMap<String, PackageHint>>,
}

impl PackageIndex {
    /// Parse an index document; an empty document is an empty index.
    pub fn parse(content: &str) -> Result<Self, serde_yaml_ng::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let parsed: Option<Self> = serde_yaml_ng::from_str(content)?;
        Ok(parsed.unwrap_or_default())
    }

    pub fn hint(&self, program: &str) -> Option<&PackageHint> {
        self.commands.as_ref().and_then(|c| c.get(program))
    }
}

/// Availability of one referenced program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolStatus {
    pub program: String,
    /// Resolved location on PATH, None when missing
    pub location: Option<PathBuf>,
    /// Providing package for a missing program, when the index knows it
    pub hint: Option<PackageHint>,
}

/// Program names used by a single template, in order of appearance.
pub fn programs_in(template: &str) -> Vec<String> {
    separator_re()
        .split(template)
        .filter_map(|segment| {
            segment
                .split_whitespace()
                .map(|w| w.trim_start_matches(['(', '{']))
                .skip_while(|w| w.is_empty() || is_assignment(w) || PREFIXES.contains(w))
                .next()
                .filter(|w| !w.contains('$') && !BUILTINS.contains(w))
                .filter(|w| !w.starts_with(['\'', '"', '-', ')', '}']))
                .map(str::to_string)
        })
        .collect()
}

fn is_assignment(word: &str) -> bool {
    word.split_once('=')
        .map(|(name, _)| {
            !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
        .unwrap_or(false)
}

/// Distinct programs referenced by all commands, first-seen order.
pub fn referenced_programs(catalog: &Catalog) -> Vec<String> {
    catalog
        .commands()
        .flat_map(|c| programs_in(&c.cmd))
        .unique()
        .collect()
}

/// Look every referenced program up on PATH.
pub fn check_tools(catalog: &Catalog, index: &PackageIndex) -> Vec<ToolStatus> {
    referenced_programs(catalog)
        .into_iter()
        .map(|program| {
            let location = which::which(&program).ok();
            debug!("check_tools: {} -> {:?}", program, location);
            let hint = match location {
                Some(_) => None,
                None => index.hint(&program).cloned(),
            };
            ToolStatus {
                program,
                location,
                hint,
            }
        })
        .collect()
}

/// Service reading the package index and checking referenced programs.
pub struct ToolService {
    fs: Arc<dyn FileSystem>,
}

impl ToolService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Load the package index; a missing or unconfigured file is an empty index.
    pub fn load_index(&self, path: Option<&Path>) -> ApplicationResult<PackageIndex> {
        let Some(path) = path.filter(|p| self.fs.exists(p)) else {
            debug!("load_index: no package index");
            return Ok(PackageIndex::default());
        };

        let content = self
            .fs
            .read_to_string(path)
            .map_err(|e| ApplicationError::Config {
                message: format!("read {}: {}", path.display(), e),
            })?;
        PackageIndex::parse(&content).map_err(|e| ApplicationError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn check(
        &self,
        catalog: &Catalog,
        packages: Option<&Path>,
    ) -> ApplicationResult<Vec<ToolStatus>> {
        let index = self.load_index(packages)?;
        Ok(check_tools(catalog, &index))
    }
}
