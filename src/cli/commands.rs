//! CLI command dispatch

use clap_complete::Shell;
use termtree::Tree;
use tracing::{debug, instrument};

use crate::application::services::tools::{PackageHint, ToolStatus};
use crate::application::services::CompletionShell;
use crate::cli::args::Cli;
use crate::cli::error::{CliError, CliResult};
use crate::cli::menu::{MenuNavigator, MenuState};
use crate::cli::output;
use crate::config::Settings;
use crate::domain::Catalog;
use crate::exitcode;
use crate::infrastructure::di::ServiceContainer;

const PROGRAM: &str = "cmdeck";

/// Load settings, apply flag overrides and run the requested action.
///
/// Returns the process exit status.
pub fn execute_command(cli: &Cli) -> CliResult<i32> {
    if cli.config_template {
        output::info(&Settings::template());
        return Ok(exitcode::OK);
    }

    let settings = apply_flags(Settings::load()?, cli);
    debug!("execute_command: settings={:?}", settings);

    if cli.show_config {
        output::info(&settings.to_toml()?);
        return Ok(exitcode::OK);
    }

    let container = ServiceContainer::new(settings);
    run(cli, &container)
}

/// Command line flags win over every other settings layer.
pub fn apply_flags(mut settings: Settings, cli: &Cli) -> Settings {
    if let Some(path) = &cli.commands {
        settings.commands_file = path.clone();
    }
    if let Some(path) = &cli.custom {
        settings.custom_file = Some(path.clone());
    }
    if let Some(path) = &cli.packages {
        settings.packages_file = Some(path.clone());
    }
    if cli.no_custom {
        settings.custom_file = None;
    }
    settings.continuous |= cli.continuous;
    settings
}

/// Run against an already wired container.
pub fn run(cli: &Cli, container: &ServiceContainer) -> CliResult<i32> {
    let completion_shell = if cli.generate_completion || cli.generate_all {
        Some(completion_dialect(cli.completion_shell)?)
    } else {
        None
    };

    let settings = &container.settings;
    let catalog = container
        .catalog_service()
        .load(&settings.commands_file, settings.custom_file.as_deref())?;

    if cli.generates() {
        return generate(cli, container, &catalog, completion_shell);
    }
    if cli.list {
        return list(&catalog);
    }
    if cli.check_tools {
        return check_tools(container, &catalog);
    }
    navigate(cli, container, &catalog)
}

fn completion_dialect(shell: Shell) -> CliResult<CompletionShell> {
    match shell {
        Shell::Bash => Ok(CompletionShell::Bash),
        Shell::Zsh => Ok(CompletionShell::Zsh),
        other => Err(CliError::Usage(format!(
            "completion scripts for {other} are not supported (use bash or zsh)"
        ))),
    }
}

/// Files a generated artifact tells its reader to edit instead.
fn source_label(settings: &Settings) -> String {
    match &settings.custom_file {
        Some(custom) => format!(
            "{} or {}",
            settings.commands_file.display(),
            custom.display()
        ),
        None => settings.commands_file.display().to_string(),
    }
}

#[instrument(skip_all)]
fn generate(
    cli: &Cli,
    container: &ServiceContainer,
    catalog: &Catalog,
    completion_shell: Option<CompletionShell>,
) -> CliResult<i32> {
    let settings = &container.settings;
    let artifacts = container.artifact_service();

    if cli.generate_aliases || cli.generate_all {
        let path = settings.aliases_path();
        artifacts.write_aliases(catalog, &path, &source_label(settings))?;
        output::action("Generated", &path.display());
    }
    if let Some(shell) = completion_shell {
        let path = settings.completion_path();
        artifacts.write_completion(catalog, &path, PROGRAM, shell)?;
        output::action("Generated", &path.display());
    }
    Ok(exitcode::OK)
}

/// Build the display tree: categories below the root, commands below those.
pub fn catalog_tree(catalog: &Catalog) -> Tree<String> {
    catalog
        .categories()
        .iter()
        .fold(Tree::new("commands".to_string()), |root, category| {
            let leaves = category.commands.iter().map(|c| Tree::new(c.label()));
            root.with_leaves([Tree::new(category.name.clone()).with_leaves(leaves)])
        })
}

#[instrument(skip_all)]
fn list(catalog: &Catalog) -> CliResult<i32> {
    output::info(&catalog_tree(catalog));
    Ok(exitcode::OK)
}

/// One report line for a missing program, naming its package when known.
pub fn describe_missing(tool: &ToolStatus) -> String {
    match &tool.hint {
        Some(PackageHint {
            package: Some(package),
            method,
            ..
        }) => match method {
            Some(method) => format!("{} -> {} ({})", tool.program, package, method),
            None => format!("{} -> {}", tool.program, package),
        },
        _ => tool.program.clone(),
    }
}

#[instrument(skip_all)]
fn check_tools(container: &ServiceContainer, catalog: &Catalog) -> CliResult<i32> {
    let status = container
        .tool_service()
        .check(catalog, container.settings.packages_file.as_deref())?;
    let missing = status.iter().filter(|s| s.location.is_none()).count();

    output::header("Programs referenced by commands:");
    for tool in &status {
        match &tool.location {
            Some(path) => output::success_detail(&format!("{} ({})", tool.program, path.display())),
            None => {
                output::failure(&describe_missing(tool));
                if let Some(hint) = &tool.hint {
                    if let Some(url) = &hint.url {
                        output::info(&format!("      URL: {url}"));
                    }
                    if let Some(notes) = &hint.notes {
                        output::info(&format!("      Note: {notes}"));
                    }
                }
            }
        }
    }

    if missing > 0 {
        output::warning(&format!("{missing} program(s) not found on PATH"));
        Ok(exitcode::FAILURE)
    } else {
        Ok(exitcode::OK)
    }
}

#[instrument(skip_all)]
fn navigate(cli: &Cli, container: &ServiceContainer, catalog: &Catalog) -> CliResult<i32> {
    let invocations = container.invocation_service();
    let navigator = MenuNavigator::new(
        catalog,
        &invocations,
        container.selector.clone(),
        container.input.clone(),
        container.settings.continuous,
    )
    .with_dry_run(cli.dry_run);

    let start = match cli.command() {
        Some(name) => MenuState::direct(name, cli.args()),
        None => MenuState::CategoryList,
    };
    navigator.run(start)
}
