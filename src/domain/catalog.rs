//! Command catalog: validation of raw records and merging of sources

use std::collections::HashSet;

use itertools::Itertools;

use crate::domain::source::{RawArgument, RawCommand, RawSource};
use crate::domain::template::highest_placeholder;
use crate::domain::{
    ArgumentSpec, Category, CommandSpec, CommandType, DomainError, DomainResult,
};

/// The merged, immutable command set for one run.
///
/// Only constructible through [`Catalog::merge`], so every command it holds
/// has passed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    /// Merge a primary and an optional secondary source.
    ///
    /// Categories keep first-seen order. Commands of a category present in
    /// both sources are appended after the primary's; a command whose name
    /// already exists in its category replaces the earlier one in place.
    /// Any invalid record fails the whole merge.
    pub fn merge(primary: &RawSource, secondary: Option<&RawSource>) -> DomainResult<Self> {
        let mut categories: Vec<Category> = Vec::new();

        for source in std::iter::once(primary).chain(secondary) {
            for (category_name, raw_commands) in &source.categories {
                let idx = match categories.iter().position(|c| &c.name == category_name) {
                    Some(idx) => idx,
                    None => {
                        categories.push(Category::new(category_name.clone()));
                        categories.len() - 1
                    }
                };
                for (pos, raw) in raw_commands.iter().flatten().enumerate() {
                    let command = validate_command(category_name, pos + 1, raw)?;
                    categories[idx].upsert(command);
                }
            }
        }

        Ok(Self { categories })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.iter().all(|c| c.commands.is_empty())
    }

    /// All commands in catalog iteration order.
    pub fn commands(&self) -> impl Iterator<Item = &CommandSpec> {
        self.categories.iter().flat_map(|c| c.commands.iter())
    }

    /// First command with this name in catalog order.
    pub fn find(&self, name: &str) -> Option<&CommandSpec> {
        self.commands().find(|c| c.name == name)
    }

    /// Distinct command names, first-seen order.
    pub fn command_names(&self) -> Vec<&str> {
        self.commands().map(|c| c.name.as_str()).unique().collect()
    }
}

fn validate_command(category: &str, pos: usize, raw: &RawCommand) -> DomainResult<CommandSpec> {
    let name = raw
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| DomainError::invalid(category, format!("#{pos}"), "missing 'name'"))?;

    let cmd = raw
        .cmd
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| DomainError::invalid(category, name, "missing 'cmd'"))?;

    let kind = match raw.kind.as_deref() {
        None => CommandType::default(),
        Some(s) => CommandType::parse(s.trim()).ok_or_else(|| {
            DomainError::invalid(
                category,
                name,
                format!("unknown type '{s}' (expected 'alias' or 'function')"),
            )
        })?,
    };

    let args = raw
        .args
        .iter()
        .flatten()
        .enumerate()
        .map(|(i, a)| validate_argument(category, name, i + 1, a))
        .collect::<DomainResult<Vec<_>>>()?;

    let highest = highest_placeholder(cmd);
    if highest > args.len() {
        return Err(DomainError::invalid(
            category,
            name,
            format!(
                "'cmd' references ${highest} but only {} argument(s) are declared",
                args.len()
            ),
        ));
    }

    Ok(CommandSpec {
        name: name.to_string(),
        cmd: cmd.to_string(),
        desc: raw.desc.clone().unwrap_or_default(),
        kind,
        args,
    })
}

fn validate_argument(
    category: &str,
    command: &str,
    pos: usize,
    raw: &RawArgument,
) -> DomainResult<ArgumentSpec> {
    let name = raw
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| {
            DomainError::invalid(category, command, format!("argument #{pos} is missing 'name'"))
        })?;

    let default = raw.default.as_ref().map(|d| d.to_string());

    let choices = match &raw.choices {
        None => None,
        Some(list) => {
            let choices: Vec<String> = list.iter().map(|c| c.to_string()).collect();
            if choices.is_empty() {
                return Err(DomainError::invalid(
                    category,
                    command,
                    format!("argument '{name}' declares an empty 'choices' list"),
                ));
            }
            let mut seen = HashSet::new();
            if let Some(dup) = choices.iter().find(|c| !seen.insert(c.as_str())) {
                return Err(DomainError::invalid(
                    category,
                    command,
                    format!("argument '{name}' lists choice '{dup}' more than once"),
                ));
            }
            if let Some(d) = &default {
                if !choices.contains(d) {
                    return Err(DomainError::invalid(
                        category,
                        command,
                        format!("argument '{name}' default '{d}' is not one of its choices"),
                    ));
                }
            }
            Some(choices)
        }
    };

    Ok(ArgumentSpec {
        name: name.to_string(),
        default,
        choices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn src(yaml: &str) -> RawSource {
        RawSource::parse(yaml).expect("valid yaml")
    }

    #[test]
    fn given_secondary_with_new_category_when_merging_then_adds_category() {
        let a = src("Networking:\n  - {name: ping_host, cmd: ping}\n");
        let b = src("Personal:\n  - {name: myserver, cmd: ssh me@host}\n");

        let catalog = Catalog::merge(&a, Some(&b)).unwrap();

        let personal = catalog.category("Personal").unwrap();
        assert_eq!(personal.commands.len(), 1);
        assert_eq!(personal.commands[0].name, "myserver");
        let order: Vec<&str> = catalog.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(order, vec!["Networking", "Personal"]);
    }

    #[test]
    fn given_shared_category_when_merging_then_concatenates_commands() {
        let a = src("Network Stuff:\n  - {name: x, cmd: echo x}\n");
        let b = src("Network Stuff:\n  - {name: ping_home, cmd: ping home}\n");

        let catalog = Catalog::merge(&a, Some(&b)).unwrap();

        let names: Vec<&str> = catalog
            .category("Network Stuff")
            .unwrap()
            .commands
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["x", "ping_home"]);
    }

    #[test]
    fn given_override_when_merging_then_replaces_in_place() {
        let a = src("Net:\n  - {name: a, cmd: one}\n  - {name: b, cmd: two}\n");
        let b = src("Net:\n  - {name: a, cmd: override}\n");

        let catalog = Catalog::merge(&a, Some(&b)).unwrap();

        let cmds = &catalog.category("Net").unwrap().commands;
        assert_eq!(cmds.len(), 2);
        assert_eq!(cmds[0].name, "a");
        assert_eq!(cmds[0].cmd, "override");
        assert_eq!(cmds[1].name, "b");
    }

    #[test]
    fn given_source_merged_with_itself_then_equals_single_merge() {
        let a = src(
            r#"
Net:
  - name: a
    cmd: echo $1
    args: [{name: X, default: "1"}]
  - {name: a, cmd: dup}
Other:
  - {name: c, cmd: three, type: function}
"#,
        );

        let once = Catalog::merge(&a, None).unwrap();
        let twice = Catalog::merge(&a, Some(&a)).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn given_placeholder_beyond_args_when_merging_then_configuration_error() {
        let a = src("Misc:\n  - name: bad\n    cmd: echo $2\n    args: [{name: One}]\n");

        let err = Catalog::merge(&a, None).unwrap_err();
        match err {
            DomainError::InvalidCommand { category, command, reason } => {
                assert_eq!(category, "Misc");
                assert_eq!(command, "bad");
                assert!(reason.contains("$2"), "{reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn given_missing_name_when_merging_then_reports_position() {
        let a = src("Misc:\n  - {name: ok, cmd: ls}\n  - {cmd: ls}\n");
        let err = Catalog::merge(&a, None).unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidCommand {
                category: "Misc".into(),
                command: "#2".into(),
                reason: "missing 'name'".into(),
            }
        );
    }

    #[test]
    fn given_invalid_secondary_when_merging_then_whole_merge_fails() {
        let a = src("Misc:\n  - {name: ok, cmd: ls}\n");
        let b = src("Misc:\n  - {name: broken}\n");
        assert!(Catalog::merge(&a, Some(&b)).is_err());
    }

    #[test]
    fn given_default_outside_choices_when_merging_then_configuration_error() {
        let a = src(
            "Misc:\n  - name: m\n    cmd: echo $1\n    args: [{name: Env, default: prod, choices: [dev, test]}]\n",
        );
        let err = Catalog::merge(&a, None).unwrap_err();
        assert!(err.to_string().contains("not one of its choices"), "{err}");
    }

    #[test]
    fn given_empty_choices_when_merging_then_configuration_error() {
        let a = src("Misc:\n  - name: m\n    cmd: echo $1\n    args: [{name: Env, choices: []}]\n");
        assert!(Catalog::merge(&a, None).is_err());
    }

    #[test]
    fn given_duplicate_choices_when_merging_then_configuration_error() {
        let a = src("Misc:\n  - name: m\n    cmd: echo $1\n    args: [{name: Env, choices: [a, a]}]\n");
        assert!(Catalog::merge(&a, None).is_err());
    }

    #[test]
    fn given_unknown_type_when_merging_then_configuration_error() {
        let a = src("Misc:\n  - {name: m, cmd: ls, type: script}\n");
        let err = Catalog::merge(&a, None).unwrap_err();
        assert!(err.to_string().contains("unknown type 'script'"), "{err}");
    }

    #[test]
    fn given_duplicate_names_across_categories_when_listing_names_then_collapsed() {
        let a = src("A:\n  - {name: x, cmd: one}\nB:\n  - {name: x, cmd: two}\n  - {name: y, cmd: three}\n");
        let catalog = Catalog::merge(&a, None).unwrap();

        assert_eq!(catalog.command_names(), vec!["x", "y"]);
        assert_eq!(catalog.find("x").unwrap().cmd, "one");
    }
}
