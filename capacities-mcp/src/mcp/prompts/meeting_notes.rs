use super::{argument, format_date, ArgumentSpec, PromptArguments, PromptTemplate};
use chrono::NaiveDateTime;

/// Meeting notes laid out for a daily note
#[derive(Debug, Default, Clone, Copy)]
pub struct MeetingNotesPrompt;

const ARGUMENTS: &[ArgumentSpec] = &[
    ArgumentSpec::required("meeting_title", "Title or topic of the meeting"),
    ArgumentSpec::optional("attendees", "Who attended the meeting"),
    ArgumentSpec::optional("key_decisions", "Important decisions made"),
    ArgumentSpec::optional("action_items", "Action items and next steps"),
    ArgumentSpec::optional("notes", "Additional notes or discussion points"),
];

/// Optional sections in output order
const SECTIONS: &[(&str, &str)] = &[
    ("key_decisions", "Decisions"),
    ("action_items", "Action Items"),
    ("notes", "Notes"),
];

impl PromptTemplate for MeetingNotesPrompt {
    fn name(&self) -> &'static str {
        "capacities-meeting-notes"
    }

    fn description(&self) -> &'static str {
        "Structure meeting notes for Capacities daily note"
    }

    fn arguments(&self) -> &'static [ArgumentSpec] {
        ARGUMENTS
    }

    fn render(&self, args: &PromptArguments, now: NaiveDateTime) -> String {
        let mut meeting = format!(
            "## Meeting: {}\n",
            argument(args, "meeting_title").unwrap_or_default()
        );
        meeting += &format!("**Date:** {}\n", format_date(now));

        if let Some(attendees) = argument(args, "attendees") {
            meeting += &format!("**Attendees:** {attendees}\n");
        }
        meeting.push('\n');

        for (key, heading) in SECTIONS {
            if let Some(text) = argument(args, key) {
                meeting += &format!("### {heading}\n{text}\n\n");
            }
        }

        format!(
            "Here are your structured meeting notes:\n\n{meeting}\
             Ready to add to your Capacities daily note?"
        )
    }
}
