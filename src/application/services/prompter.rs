//! Interactive argument prompting

use std::sync::Arc;

use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{ArgumentSpec, DomainError};
use crate::infrastructure::traits::{SelectionItem, Selector, TextInput};

/// Obtains values for arguments that are neither supplied nor defaulted.
pub struct ArgumentPrompter {
    selector: Arc<dyn Selector>,
    input: Arc<dyn TextInput>,
}

impl ArgumentPrompter {
    pub fn new(selector: Arc<dyn Selector>, input: Arc<dyn TextInput>) -> Self {
        Self { selector, input }
    }

    /// Ask the user for one argument value.
    ///
    /// With `choices` the user picks exactly one of them; otherwise any line,
    /// including an empty one, is accepted. Aborting either prompt yields
    /// [`DomainError::Cancelled`].
    pub fn resolve_required(&self, spec: &ArgumentSpec) -> ApplicationResult<String> {
        debug!("resolve_required: arg={}", spec.name);
        match &spec.choices {
            Some(choices) => self.select_choice(spec, choices),
            None => self
                .input
                .read_line(&format!("  Enter {}: ", spec.name))
                .with_context("read argument input")?
                .ok_or(ApplicationError::Domain(DomainError::Cancelled)),
        }
    }

    fn select_choice(&self, spec: &ArgumentSpec, choices: &[String]) -> ApplicationResult<String> {
        let items: Vec<SelectionItem> = choices.iter().map(SelectionItem::new).collect();

        let selected = self
            .selector
            .select_index(&items, &format!("Select {}: ", spec.name))
            .map_err(|message| ApplicationError::OperationFailed {
                context: format!("select value for {}", spec.name),
                source: message.into(),
            })?;

        selected
            .and_then(|idx| choices.get(idx))
            .cloned()
            .ok_or(ApplicationError::Domain(DomainError::Cancelled))
    }
}
