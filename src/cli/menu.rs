//! Interactive menu navigation
//!
//! A small state machine: category list, command list, execution. Direct
//! invocations start in the execution state.

use std::sync::Arc;

use tracing::debug;

use crate::application::services::InvocationService;
use crate::application::ApplicationError;
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::domain::{Catalog, ResolvedInvocation};
use crate::exitcode;
use crate::infrastructure::traits::{SelectionItem, Selector, TextInput};

/// What an execution state runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Picked from a command list (category index, command index)
    Selected { category: usize, command: usize },
    /// Named on the command line, with supplied values
    Named { name: String, args: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuState {
    CategoryList,
    CommandList { category: usize },
    Executing(Target),
    Terminated(i32),
}

impl MenuState {
    pub fn direct(name: impl Into<String>, args: &[String]) -> Self {
        Self::Executing(Target::Named {
            name: name.into(),
            args: args.to_vec(),
        })
    }
}

pub struct MenuNavigator<'a> {
    catalog: &'a Catalog,
    invocations: &'a InvocationService,
    selector: Arc<dyn Selector>,
    input: Arc<dyn TextInput>,
    continuous: bool,
    dry_run: bool,
}

impl<'a> MenuNavigator<'a> {
    pub fn new(
        catalog: &'a Catalog,
        invocations: &'a InvocationService,
        selector: Arc<dyn Selector>,
        input: Arc<dyn TextInput>,
        continuous: bool,
    ) -> Self {
        Self {
            catalog,
            invocations,
            selector,
            input,
            continuous,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Drive the state machine until it terminates; returns the exit status.
    pub fn run(&self, start: MenuState) -> CliResult<i32> {
        let mut state = start;
        loop {
            debug!("run: state={:?}", state);
            state = match state {
                MenuState::Terminated(code) => return Ok(code),
                other => self.step(other)?,
            };
        }
    }

    /// Perform one transition.
    pub fn step(&self, state: MenuState) -> CliResult<MenuState> {
        match state {
            MenuState::CategoryList => self.pick_category(),
            MenuState::CommandList { category } => self.pick_command(category),
            MenuState::Executing(target) => self.execute(target),
            MenuState::Terminated(code) => Ok(MenuState::Terminated(code)),
        }
    }

    fn pick_category(&self) -> CliResult<MenuState> {
        if self.catalog.is_empty() {
            output::warning("no commands defined");
            return Ok(MenuState::Terminated(exitcode::OK));
        }

        let items: Vec<SelectionItem> = self
            .catalog
            .categories()
            .iter()
            .map(|c| SelectionItem::new(c.name.as_str()))
            .collect();

        Ok(match self.select(&items, "Select Category: ")? {
            Some(category) => MenuState::CommandList { category },
            None => MenuState::Terminated(exitcode::OK),
        })
    }

    fn pick_command(&self, category: usize) -> CliResult<MenuState> {
        let Some(cat) = self.catalog.categories().get(category) else {
            return Ok(MenuState::CategoryList);
        };
        if cat.commands.is_empty() {
            output::warning(&format!("category '{}' has no commands", cat.name));
            return Ok(MenuState::CategoryList);
        }

        let items: Vec<SelectionItem> = cat
            .commands
            .iter()
            .map(|c| SelectionItem::new(c.label()))
            .collect();

        Ok(
            match self.select(&items, &format!("Category: {} > ", cat.name))? {
                Some(command) => MenuState::Executing(Target::Selected { category, command }),
                None => MenuState::CategoryList,
            },
        )
    }

    fn execute(&self, target: Target) -> CliResult<MenuState> {
        let prepared = match &target {
            Target::Selected { category, command } => {
                match self
                    .catalog
                    .categories()
                    .get(*category)
                    .and_then(|c| c.commands.get(*command))
                {
                    Some(spec) => self.invocations.prepare(spec, &[]),
                    None => return Ok(MenuState::CategoryList),
                }
            }
            Target::Named { name, args } => {
                self.invocations.prepare_named(self.catalog, name, args)
            }
        };

        match prepared {
            Ok(invocation) => {
                let code = self.run_invocation(&invocation)?;
                if self.continuous {
                    Ok(self.pause(code)?)
                } else {
                    Ok(MenuState::Terminated(code))
                }
            }
            Err(e) if e.is_cancelled() => {
                debug!("execute: cancelled");
                Ok(self.back_from(&target))
            }
            Err(e) if e.is_not_found() && self.continuous => {
                output::error(&e);
                Ok(MenuState::CategoryList)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Where a cancelled invocation returns to.
    fn back_from(&self, target: &Target) -> MenuState {
        match target {
            Target::Selected { category, .. } => MenuState::CommandList {
                category: *category,
            },
            Target::Named { .. } if self.continuous => MenuState::CategoryList,
            Target::Named { .. } => MenuState::Terminated(exitcode::OK),
        }
    }

    fn run_invocation(&self, invocation: &ResolvedInvocation) -> CliResult<i32> {
        let line = invocation.command_line();
        if self.dry_run {
            output::info(&line);
            return Ok(exitcode::OK);
        }

        output::executing(&line);
        let code = self.invocations.execute(invocation)?;
        if code != exitcode::OK {
            output::warning(&format!("command exited with status {code}"));
        }
        Ok(code)
    }

    /// Wait for Enter before showing the menu again; end of input terminates.
    fn pause(&self, code: i32) -> CliResult<MenuState> {
        let line = self
            .input
            .read_line("Press Enter to return to menu...")
            .map_err(|e| ApplicationError::OperationFailed {
                context: "read confirmation".into(),
                source: Box::new(e),
            })?;
        Ok(match line {
            Some(_) => MenuState::CategoryList,
            None => MenuState::Terminated(code),
        })
    }

    fn select(&self, items: &[SelectionItem], prompt: &str) -> CliResult<Option<usize>> {
        let selected = self
            .selector
            .select_index(items, prompt)
            .map_err(|message| ApplicationError::OperationFailed {
                context: "show menu".into(),
                source: message.into(),
            })?;
        Ok(selected.filter(|&idx| idx < items.len()))
    }
}
