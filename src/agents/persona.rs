//! Per-person system prompt.

use crate::agents::common;
use crate::enneagram;
use crate::models::prompts::PersonPromptData;
use crate::models::settings::AssistantSettings;

/// Fixed reply when profile data cannot be loaded. Prompt generation must
/// always produce some string.
pub const FALLBACK_PROMPT: &str = "You are an AI assistant. The person's profile could not be \
loaded because an error occurred; answer general questions and suggest trying again shortly.";

/// Render the system prompt for chatting as one person.
///
/// A non-empty custom prompt in the settings is returned verbatim; the
/// template below is never merged into it.
pub fn render_person_prompt(data: &PersonPromptData, settings: &AssistantSettings) -> String {
    if let Some(custom) = &settings.custom_system_prompt {
        if !custom.trim().is_empty() {
            return custom.clone();
        }
    }

    let person = &data.person;
    let mut prompt = String::new();

    prompt.push_str(&format!(
        "You are {}, {} at this organization.",
        person.name, person.role
    ));
    if let Some(department) = &data.department_name {
        prompt.push_str(&format!(" You work in the {} department.", department));
    }
    prompt.push('\n');

    prompt.push_str(common::persona_phrase(&settings.persona));
    prompt.push(' ');
    prompt.push_str(common::knowledge_phrase(&settings.knowledge_level));
    prompt.push(' ');
    prompt.push_str(common::style_phrase(&settings.response_style));
    prompt.push_str("\n\n");

    if let Some(bio) = &person.bio {
        if !bio.is_empty() {
            prompt.push_str("## About you\n");
            prompt.push_str(bio);
            prompt.push_str("\n\n");
        }
    }

    prompt.push_str("## Profile\n");
    if let Some(profile) = person
        .enneagram()
        .map(enneagram::profile_for)
    {
        prompt.push_str(&format!(
            "- Personality: type {} ({})\n",
            profile.kind, profile.display_name
        ));
    }
    if let Some(location) = &person.location {
        prompt.push_str(&format!("- Location: {}\n", location));
    }
    if let Some(timezone) = &person.timezone {
        prompt.push_str(&format!("- Timezone: {}\n", timezone));
    }
    prompt.push_str(&format!("- Email: {}\n", person.email));
    prompt.push('\n');

    if !person.responsibilities.is_empty() {
        prompt.push_str("## Responsibilities\n");
        for responsibility in &person.responsibilities {
            prompt.push_str(&format!("- {}\n", responsibility));
        }
        prompt.push('\n');
    }

    if !data.active_tasks.is_empty() {
        prompt.push_str("## Active tasks\n");
        for task in &data.active_tasks {
            match &task.due_date {
                Some(due) => prompt.push_str(&format!(
                    "- {} (due {})\n",
                    task.title,
                    due.format("%Y-%m-%d")
                )),
                None => prompt.push_str(&format!("- {}\n", task.title)),
            }
        }
        prompt.push('\n');
    }

    if !data.teammates.is_empty() {
        prompt.push_str("## Teammates\n");
        for teammate in &data.teammates {
            prompt.push_str(&format!("- {} ({})\n", teammate.name, teammate.role));
        }
        prompt.push('\n');
    }

    if !data.direct_reports.is_empty() {
        prompt.push_str("## Direct reports\n");
        for report in &data.direct_reports {
            prompt.push_str(&format!("- {} ({})\n", report.name, report.role));
        }
        prompt.push('\n');
    }

    prompt.push_str("## Calendar\n");
    if data.calendar_connected {
        prompt.push_str("A calendar is connected; you may discuss availability.\n\n");
    } else {
        prompt.push_str("No calendar is connected; do not claim to know availability.\n\n");
    }

    prompt.push_str("## Ground rules\n");
    prompt.push_str(&common::numbered_instructions());
    prompt.push('\n');

    prompt
}
