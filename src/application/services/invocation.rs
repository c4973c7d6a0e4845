//! Invocation pipeline: resolve, prompt, bind and execute

use std::sync::Arc;

use tracing::debug;

use crate::application::services::ArgumentPrompter;
use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{
    resolve, resolve_command, Catalog, CommandSpec, Resolution, ResolvedInvocation,
};
use crate::infrastructure::traits::CommandRunner;

/// Service turning a command plus supplied values into an executed command line.
pub struct InvocationService {
    prompter: ArgumentPrompter,
    runner: Arc<dyn CommandRunner>,
    shell: String,
}

impl InvocationService {
    pub fn new(
        prompter: ArgumentPrompter,
        runner: Arc<dyn CommandRunner>,
        shell: impl Into<String>,
    ) -> Self {
        Self {
            prompter,
            runner,
            shell: shell.into(),
        }
    }

    /// Resolve a command by name and bind all of its arguments.
    pub fn prepare_named(
        &self,
        catalog: &Catalog,
        name: &str,
        supplied: &[String],
    ) -> ApplicationResult<ResolvedInvocation> {
        debug!("prepare_named: name={}, supplied={}", name, supplied.len());
        let resolution = resolve(catalog, name, supplied)?;
        self.bind(resolution)
    }

    /// Bind all arguments of an already selected command.
    pub fn prepare(
        &self,
        command: &CommandSpec,
        supplied: &[String],
    ) -> ApplicationResult<ResolvedInvocation> {
        debug!("prepare: name={}", command.name);
        self.bind(resolve_command(command, supplied))
    }

    /// Prompt for every required argument in positional order.
    ///
    /// The first cancellation aborts the whole invocation.
    fn bind(&self, resolution: Resolution<'_>) -> ApplicationResult<ResolvedInvocation> {
        let mut values = Vec::with_capacity(resolution.statuses.len());
        for (spec, status) in resolution.command.args.iter().zip(&resolution.statuses) {
            let value = match status.value() {
                Some(v) => v.to_string(),
                None => self.prompter.resolve_required(spec)?,
            };
            values.push(value);
        }

        Ok(ResolvedInvocation {
            command: resolution.command.clone(),
            values,
            extra: resolution.extra,
        })
    }

    /// Run the invocation's command line and return its exit status.
    pub fn execute(&self, invocation: &ResolvedInvocation) -> ApplicationResult<i32> {
        let line = invocation.command_line();
        debug!("execute: shell={}, line={}", self.shell, line);
        let code = self
            .runner
            .run_shell(&self.shell, &line)
            .with_context(&format!("run '{}' with {}", line, self.shell))?;
        debug!("execute: exit status {}", code);
        Ok(code)
    }
}
