//! Note-formatting prompts
//!
//! Prompts are plain functions of their arguments and the current local time.
//! They never call the API; the rendered text asks the model to save the
//! result with one of the tools.

mod daily_summary;
mod meeting_notes;
mod research_note;

pub use daily_summary::DailySummaryPrompt;
pub use meeting_notes::MeetingNotesPrompt;
pub use research_note::ResearchNotePrompt;

use crate::error::{CapacitiesError, Result};
use chrono::NaiveDateTime;
use rmcp::model::{Prompt, PromptArgument};
use std::collections::HashMap;

/// Arguments passed to a prompt, already converted to strings
pub type PromptArguments = HashMap<String, String>;

/// Description of a single prompt argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgumentSpec {
    /// Argument name
    pub name: &'static str,
    /// What the argument should contain
    pub description: &'static str,
    /// Whether the prompt refuses to render without it
    pub required: bool,
}

impl ArgumentSpec {
    /// A required argument
    pub const fn required(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            required: true,
        }
    }

    /// An optional argument
    pub const fn optional(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            required: false,
        }
    }
}

/// A prompt template served over MCP
pub trait PromptTemplate: Send + Sync {
    /// Prompt name
    fn name(&self) -> &'static str;

    /// Prompt description
    fn description(&self) -> &'static str;

    /// Arguments in display order
    fn arguments(&self) -> &'static [ArgumentSpec];

    /// Render the prompt text. Required arguments are present and non-empty.
    fn render(&self, args: &PromptArguments, now: NaiveDateTime) -> String;
}

/// Value of an argument, treating empty strings as absent
pub(crate) fn argument<'a>(args: &'a PromptArguments, name: &str) -> Option<&'a str> {
    args.get(name).map(String::as_str).filter(|v| !v.is_empty())
}

/// `M/D/YYYY`
pub(crate) fn format_date(now: NaiveDateTime) -> String {
    now.format("%-m/%-d/%Y").to_string()
}

/// `h:mm:ss AM|PM`
pub(crate) fn format_time(now: NaiveDateTime) -> String {
    now.format("%-I:%M:%S %p").to_string()
}

/// Registry for managing prompt templates
#[derive(Default)]
pub struct PromptRegistry {
    prompts: Vec<Box<dyn PromptTemplate>>,
}

impl PromptRegistry {
    /// Create a new empty prompt registry
    pub fn new() -> Self {
        Self {
            prompts: Vec::new(),
        }
    }

    /// Register a prompt; a prompt with the same name is replaced
    pub fn register<T: PromptTemplate + 'static>(&mut self, prompt: T) {
        self.prompts.retain(|p| p.name() != prompt.name());
        self.prompts.push(Box::new(prompt));
    }

    /// Get a prompt by name
    pub fn get(&self, name: &str) -> Option<&dyn PromptTemplate> {
        self.prompts
            .iter()
            .find(|p| p.name() == name)
            .map(|p| p.as_ref())
    }

    /// All prompts as MCP `Prompt` entries, in registration order
    pub fn list_prompts(&self) -> Vec<Prompt> {
        self.prompts
            .iter()
            .map(|p| Prompt {
                name: p.name().to_string(),
                description: Some(p.description().to_string()),
                arguments: Some(
                    p.arguments()
                        .iter()
                        .map(|arg| PromptArgument {
                            name: arg.name.to_string(),
                            description: Some(arg.description.to_string()),
                            required: Some(arg.required),
                        })
                        .collect(),
                ),
            })
            .collect()
    }

    /// Check required arguments and render
    ///
    /// # Errors
    ///
    /// [`CapacitiesError::MissingArgument`] for the first required argument
    /// that is missing or empty.
    pub fn render(
        prompt: &dyn PromptTemplate,
        args: &PromptArguments,
        now: NaiveDateTime,
    ) -> Result<String> {
        if let Some(missing) = prompt
            .arguments()
            .iter()
            .find(|spec| spec.required && argument(args, spec.name).is_none())
        {
            return Err(CapacitiesError::MissingArgument {
                name: missing.name.to_string(),
            });
        }
        Ok(prompt.render(args, now))
    }

    /// Get the number of registered prompts
    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }
}

/// Register all Capacities prompts with the registry
pub fn register_capacities_prompts(registry: &mut PromptRegistry) {
    registry.register(DailySummaryPrompt);
    registry.register(ResearchNotePrompt);
    registry.register(MeetingNotesPrompt);
}

#[cfg(test)]
pub(crate) fn fixed_time() -> NaiveDateTime {
    use chrono::NaiveDate;
    NaiveDate::from_ymd_opt(2024, 1, 15)
        .and_then(|d| d.and_hms_opt(14, 30, 0))
        .expect("valid date")
}

#[cfg(test)]
pub(crate) fn args(pairs: &[(&str, &str)]) -> PromptArguments {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
