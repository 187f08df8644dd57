use super::{argument, format_date, format_time, ArgumentSpec, PromptArguments, PromptTemplate};
use chrono::NaiveDateTime;

/// Structured end-of-day summary for a daily note
#[derive(Debug, Default, Clone, Copy)]
pub struct DailySummaryPrompt;

const ARGUMENTS: &[ArgumentSpec] = &[
    ArgumentSpec::required("key_activities", "Main activities or events from today"),
    ArgumentSpec::optional("insights", "Key insights, learnings, or realizations"),
    ArgumentSpec::optional("tomorrow_focus", "What you want to focus on tomorrow"),
];

impl PromptTemplate for DailySummaryPrompt {
    fn name(&self) -> &'static str {
        "capacities-daily-summary"
    }

    fn description(&self) -> &'static str {
        "Create a structured daily summary for your Capacities daily note"
    }

    fn arguments(&self) -> &'static [ArgumentSpec] {
        ARGUMENTS
    }

    fn render(&self, args: &PromptArguments, now: NaiveDateTime) -> String {
        let mut summary = format!("## Daily Summary - {}\n\n", format_date(now));
        summary += &format!(
            "### Key Activities\n{}\n\n",
            argument(args, "key_activities").unwrap_or_default()
        );

        if let Some(insights) = argument(args, "insights") {
            summary += &format!("### Insights & Learnings\n{insights}\n\n");
        }

        if let Some(focus) = argument(args, "tomorrow_focus") {
            summary += &format!("### Tomorrow's Focus\n{focus}\n\n");
        }

        summary += &format!("---\n*Generated at {}*", format_time(now));

        format!("Use this formatted summary for a Capacities daily note:\n\n{summary}")
    }
}

#[cfg(test)]
mod tests {
    use super::super::{args, fixed_time};
    use super::*;

    #[test]
    fn test_metadata() {
        let prompt = DailySummaryPrompt;
        assert_eq!(prompt.name(), "capacities-daily-summary");
        assert!(prompt.description().contains("daily summary"));
        assert_eq!(prompt.arguments().len(), 3);
        assert!(prompt.arguments()[0].required);
        assert!(!prompt.arguments()[1].required);
    }

    #[test]
    fn test_required_fields_only() {
        let result = DailySummaryPrompt.render(
            &args(&[(
                "key_activities",
                "- Completed project proposal\n- Team meeting",
            )]),
            fixed_time(),
        );

        assert_eq!(
            result,
            "Use this formatted summary for a Capacities daily note:\n\n\
             ## Daily Summary - 1/15/2024\n\n\
             ### Key Activities\n- Completed project proposal\n- Team meeting\n\n\
             ---\n*Generated at 2:30:00 PM*"
        );
    }

    #[test]
    fn test_all_fields() {
        let result = DailySummaryPrompt.render(
            &args(&[
                ("key_activities", "- Launched new feature"),
                ("insights", "User feedback was overwhelmingly positive"),
                ("tomorrow_focus", "- Fix reported bugs\n- Plan next sprint"),
            ]),
            fixed_time(),
        );

        assert!(result.contains("### Key Activities\n- Launched new feature\n\n"));
        assert!(result.contains(
            "### Insights & Learnings\nUser feedback was overwhelmingly positive\n\n"
        ));
        assert!(result.contains("### Tomorrow's Focus\n- Fix reported bugs\n- Plan next sprint\n\n---"));
    }

    #[test]
    fn test_empty_optional_is_omitted() {
        let result = DailySummaryPrompt.render(
            &args(&[("key_activities", "Test"), ("insights", "")]),
            fixed_time(),
        );
        assert!(!result.contains("### Insights"));
        assert!(!result.contains("### Tomorrow's Focus"));
    }
}
