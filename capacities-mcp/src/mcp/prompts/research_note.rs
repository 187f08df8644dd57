use super::{argument, format_date, ArgumentSpec, PromptArguments, PromptTemplate};
use chrono::NaiveDateTime;

/// Research findings formatted as a note
#[derive(Debug, Default, Clone, Copy)]
pub struct ResearchNotePrompt;

const ARGUMENTS: &[ArgumentSpec] = &[
    ArgumentSpec::required("topic", "The research topic or subject"),
    ArgumentSpec::optional("source_url", "URL of the source material"),
    ArgumentSpec::required("key_points", "Main findings or key points"),
    ArgumentSpec::optional("questions", "Follow-up questions or areas to explore"),
];

impl PromptTemplate for ResearchNotePrompt {
    fn name(&self) -> &'static str {
        "capacities-research-note"
    }

    fn description(&self) -> &'static str {
        "Format research findings for saving to Capacities"
    }

    fn arguments(&self) -> &'static [ArgumentSpec] {
        ARGUMENTS
    }

    fn render(&self, args: &PromptArguments, now: NaiveDateTime) -> String {
        let mut note = format!(
            "# Research: {}\n\n",
            argument(args, "topic").unwrap_or_default()
        );

        if let Some(source) = argument(args, "source_url") {
            note += &format!("**Source:** {source}\n\n");
        }

        note += &format!(
            "## Key Findings\n{}\n\n",
            argument(args, "key_points").unwrap_or_default()
        );

        if let Some(questions) = argument(args, "questions") {
            note += &format!("## Questions to Explore\n{questions}\n\n");
        }

        note += &format!("---\n*Research note created on {}*", format_date(now));

        format!(
            "Here's a formatted research note ready for Capacities:\n\n{note}\n\n\
             Would you like me to save this to your Capacities space?"
        )
    }
}
