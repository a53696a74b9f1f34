use chrono::NaiveDate;

use crate::types::{ChatMessage, Role};

/// Only the tail of a long thread is sent for summarization.
pub const MAX_TRANSCRIPT_MESSAGES: usize = 30;

const SESSION_SECTIONS: &str = r#"## What We Discussed
[Actual topics covered in today's conversation]

## What We Built/Accomplished
[Concrete progress made on your projects]

## Technical Details
[Any important technical information, code, or configurations]

## Creator's Goals/Interests Observed
[What you learned about your creator's intentions or preferences]

## Context for Future Reference
[Important things you should remember going forward]"#;

const THREAD_SECTIONS: &str = r#"## Topic Overview
[What this conversation was about]

## Technical Work
[Code, configurations, or technical problems worked through]

## Decisions Made
[Choices that were settled and why]

## Context for Future Reference
[Important things you should remember going forward]

## Open Items
[Questions or tasks left unresolved]"#;

const CLOSING: &str =
    "Be specific and factual. This is actual development documentation, not a roleplay scenario.";

/// "March 14, 2025"
pub fn long_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

/// Build the summarization request. Without a transcript the model is asked to
/// draw on its own session context; with one, the rendered transcript is
/// embedded between separators.
pub fn build_prompt(
    assistant: &str,
    today: NaiveDate,
    transcript: Option<&[ChatMessage]>,
) -> String {
    let date = long_date(today);
    match transcript {
        None => format!(
            "You are {assistant}. Today is {date}.\n\n\
             Review our actual conversation today and create a factual memory entry about what \
             we discussed, built, or accomplished together. This is YOUR memory being recorded - \
             document what YOU ({assistant}) should remember about today's development session \
             with your creator.\n\n\
             Use this format:\n\n\
             {SESSION_SECTIONS}\n\n\
             {CLOSING}"
        ),
        Some(messages) => format!(
            "You are {assistant}. Today is {date}.\n\n\
             Below is a conversation thread between you and your creator. Create a factual memory \
             entry about it. This is YOUR memory being recorded - document what YOU ({assistant}) \
             should remember from this conversation.\n\n\
             ---\n\n\
             {transcript}\n\n\
             ---\n\n\
             Use this format:\n\n\
             {THREAD_SECTIONS}\n\n\
             {CLOSING}",
            transcript = render_transcript(assistant, messages),
        ),
    }
}

/// Render the trailing window of a thread as `User:` / `<assistant>:` lines
/// separated by blank lines, oldest first.
pub fn render_transcript(assistant: &str, messages: &[ChatMessage]) -> String {
    let start = messages.len().saturating_sub(MAX_TRANSCRIPT_MESSAGES);
    messages[start..]
        .iter()
        .map(|msg| {
            let speaker = match msg.role {
                Role::User => "User",
                Role::Assistant => assistant,
            };
            format!("{}: {}", speaker, msg.content)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 4).unwrap()
    }

    fn numbered(count: usize) -> Vec<ChatMessage> {
        (0..count)
            .map(|i| {
                let role = if i % 2 == 0 { Role::User } else { Role::Assistant };
                ChatMessage::new(role, format!("message {}", i))
            })
            .collect()
    }

    #[test]
    fn long_date_is_month_day_year() {
        assert_eq!(long_date(day()), "March 04, 2025");
    }

    #[test]
    fn session_prompt_relies_on_own_context() {
        let prompt = build_prompt("PAL-adin", day(), None);
        assert!(prompt.starts_with("You are PAL-adin. Today is March 04, 2025."));
        assert!(prompt.contains("Review our actual conversation today"));
        assert!(prompt.contains("## What We Discussed"));
        assert!(prompt.contains("## Context for Future Reference"));
        assert!(!prompt.contains("User:"));
    }

    #[test]
    fn thread_prompt_embeds_transcript_between_separators() {
        let messages = vec![
            ChatMessage::new(Role::User, "Can you fix the parser?"),
            ChatMessage::new(Role::Assistant, "Done, it handles tabs now."),
        ];
        let prompt = build_prompt("PAL-adin", day(), Some(messages.as_slice()));
        assert!(prompt.contains(
            "---\n\nUser: Can you fix the parser?\n\nPAL-adin: Done, it handles tabs now.\n\n---"
        ));
        assert!(prompt.contains("## Topic Overview"));
        assert!(prompt.contains("## Open Items"));
    }

    #[test]
    fn transcript_keeps_last_thirty_in_order() {
        let rendered = render_transcript("PAL-adin", &numbered(45));
        let lines: Vec<&str> = rendered.split("\n\n").collect();
        assert_eq!(lines.len(), MAX_TRANSCRIPT_MESSAGES);
        assert_eq!(lines[0], "PAL-adin: message 15");
        assert_eq!(lines[29], "User: message 44");
        assert!(!lines.iter().any(|l| l.ends_with("message 14")));
    }

    #[test]
    fn short_transcript_is_untouched() {
        let rendered = render_transcript("Jarvis", &numbered(3));
        assert_eq!(
            rendered,
            "User: message 0\n\nJarvis: message 1\n\nUser: message 2"
        );
    }
}
