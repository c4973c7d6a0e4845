//! Command resolution: lookup plus per-argument status

use crate::domain::{ArgStatus, Catalog, CommandSpec, DomainError, DomainResult};

/// Outcome of matching supplied values against a command's arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution<'a> {
    pub command: &'a CommandSpec,
    /// One status per declared argument, in positional order
    pub statuses: Vec<ArgStatus>,
    /// Supplied values beyond the declared arguments
    pub extra: Vec<String>,
}

impl Resolution<'_> {
    /// Positions (0-based) still needing a value, lowest first.
    pub fn required(&self) -> impl Iterator<Item = usize> + '_ {
        self.statuses
            .iter()
            .enumerate()
            .filter(|(_, s)| matches!(s, ArgStatus::Required))
            .map(|(i, _)| i)
    }
}

/// Look a command up by name (first match in catalog order) and resolve it.
pub fn resolve<'a>(
    catalog: &'a Catalog,
    command_name: &str,
    supplied: &[String],
) -> DomainResult<Resolution<'a>> {
    let command = catalog
        .find(command_name)
        .ok_or_else(|| DomainError::NotFound(command_name.to_string()))?;
    Ok(resolve_command(command, supplied))
}

/// Resolve an already selected command.
///
/// Supplied values are taken as is; `choices` only gate interactive prompting.
pub fn resolve_command<'a>(command: &'a CommandSpec, supplied: &[String]) -> Resolution<'a> {
    let statuses = command
        .args
        .iter()
        .enumerate()
        .map(|(i, spec)| match (supplied.get(i), &spec.default) {
            (Some(value), _) => ArgStatus::Supplied(value.clone()),
            (None, Some(default)) => ArgStatus::Defaulted(default.clone()),
            (None, None) => ArgStatus::Required,
        })
        .collect();

    let extra = supplied.iter().skip(command.args.len()).cloned().collect();

    Resolution {
        command,
        statuses,
        extra,
    }
}
