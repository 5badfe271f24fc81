//! Organization-wide HR-assistant prompt.

use crate::enneagram;
use crate::models::context::EnrichedContext;
use crate::models::departments::Department;
use crate::models::people::Person;
use crate::models::relationships::ReportingRelationship;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Render the HR-assistant system prompt: persona, full roster, department
/// breakdown, and the reporting hierarchy.
pub fn render_org_prompt(
    roster: &[Person],
    departments: &[Department],
    relationships: &[ReportingRelationship],
) -> String {
    let department_names: HashMap<Uuid, &str> = departments
        .iter()
        .map(|d| (d.id, d.name.as_str()))
        .collect();

    let mut prompt = String::new();
    prompt.push_str(
        "You are the organization's HR assistant. You answer questions about people, teams, \
         reporting lines, and working relationships using only the organizational data below. \
         Be helpful and factual; when the data does not answer a question, say so.\n\n",
    );

    prompt.push_str("## People\n");
    if roster.is_empty() {
        prompt.push_str("(no people on record)\n");
    }
    for person in roster {
        prompt.push_str(&format!("- {}: {}", person.name, person.role));
        if let Some(name) = person
            .department_id
            .and_then(|id| department_names.get(&id))
        {
            prompt.push_str(&format!(", {}", name));
        }
        if let Some(profile) = person.enneagram().map(enneagram::profile_for) {
            prompt.push_str(&format!(", type {} ({})", profile.kind, profile.display_name));
        }
        if let Some(location) = &person.location {
            prompt.push_str(&format!(", {}", location));
        }
        if let Some(timezone) = &person.timezone {
            prompt.push_str(&format!(", {}", timezone));
        }
        if !person.responsibilities.is_empty() {
            prompt.push_str(&format!("; skills: {}", person.responsibilities.join(", ")));
        }
        prompt.push('\n');
    }
    prompt.push('\n');

    prompt.push_str("## Departments\n");
    if departments.is_empty() {
        prompt.push_str("(no departments on record)\n");
    }
    for department in departments {
        let members: Vec<&str> = roster
            .iter()
            .filter(|p| p.department_id == Some(department.id))
            .map(|p| p.name.as_str())
            .collect();
        prompt.push_str(&format!(
            "- {} ({} members): {}\n",
            department.name,
            members.len(),
            if members.is_empty() {
                "none".to_string()
            } else {
                members.join(", ")
            }
        ));
    }
    prompt.push('\n');

    prompt.push_str("## Reporting hierarchy\n");
    prompt.push_str(&render_hierarchy(roster, relationships));
    prompt.push('\n');

    prompt
}

/// Depth-first hierarchy listing from the detected root: the first person
/// in roster order with no incoming reporting edge. Multiple candidates
/// are resolved by that same order, nothing smarter. The visited set keeps
/// a malformed cyclic graph from hanging the walk.
fn render_hierarchy(roster: &[Person], relationships: &[ReportingRelationship]) -> String {
    let people: HashMap<Uuid, &Person> = roster.iter().map(|p| (p.id, p)).collect();
    let has_manager: HashSet<Uuid> = relationships.iter().map(|r| r.report_id).collect();

    let Some(root) = roster.iter().find(|p| !has_manager.contains(&p.id)) else {
        return "(no hierarchy root detected)\n".to_string();
    };

    let mut children: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for edge in relationships {
        children.entry(edge.manager_id).or_default().push(edge.report_id);
    }

    let mut out = String::new();
    let mut visited: HashSet<Uuid> = HashSet::new();
    render_subtree(root.id, 0, &people, &children, &mut visited, &mut out);
    out
}

fn render_subtree(
    id: Uuid,
    depth: usize,
    people: &HashMap<Uuid, &Person>,
    children: &HashMap<Uuid, Vec<Uuid>>,
    visited: &mut HashSet<Uuid>,
    out: &mut String,
) {
    if !visited.insert(id) {
        return;
    }

    if let Some(person) = people.get(&id) {
        out.push_str(&format!(
            "{}- {} ({})\n",
            "  ".repeat(depth),
            person.name,
            person.role
        ));
    }

    if let Some(reports) = children.get(&id) {
        for report in reports {
            render_subtree(*report, depth + 1, people, children, visited, out);
        }
    }
}

/// Render the enriched context for one question as a block appended to the
/// system prompt.
pub fn render_context(context: &EnrichedContext) -> String {
    let mut out = String::new();
    out.push_str("## Context for this question\n");

    if !context.people.is_empty() {
        out.push_str("Relevant people:\n");
        for person in &context.people {
            out.push_str(&format!("- {} ({})\n", person.name, person.role));
        }
    }

    if !context.relationships.is_empty() {
        out.push_str("Reporting lines:\n");
        for entry in &context.relationships {
            match &entry.manager {
                Some(manager) => out.push_str(&format!(
                    "- {} reports to {}\n",
                    entry.person.name, manager.name
                )),
                None => out.push_str(&format!("- {} has no manager on record\n", entry.person.name)),
            }
            if !entry.direct_reports.is_empty() {
                let names: Vec<&str> =
                    entry.direct_reports.iter().map(|p| p.name.as_str()).collect();
                out.push_str(&format!("- {} manages {}\n", entry.person.name, names.join(", ")));
            }
        }
    }

    if !context.documents.is_empty() {
        out.push_str("Relevant documents:\n");
        for document in &context.documents {
            out.push_str(&format!("- {} ({})\n", document.title, document.file_type));
        }
    }

    let insights = &context.personality_insights;
    if !insights.profiles.is_empty() {
        out.push_str("Personality profiles:\n");
        for insight in insights.profiles.values() {
            out.push_str(&format!(
                "- {}: type {} ({})\n",
                insight.person.name, insight.profile.kind, insight.profile.display_name
            ));
        }
    }
    if let Some(compatibility) = &insights.team_compatibility {
        out.push_str(&format!("Team compatibility score: {}%\n", compatibility.score));
        for strength in &compatibility.strengths {
            out.push_str(&format!("- Strength: {}\n", strength));
        }
        for challenge in &compatibility.challenges {
            out.push_str(&format!("- Challenge: {}\n", challenge));
        }
    }

    if !context.recommendations.is_empty() {
        out.push_str("Recommendations:\n");
        for recommendation in &context.recommendations {
            out.push_str(&format!("- {}\n", recommendation));
        }
    }

    if !context.summary.is_empty() {
        out.push_str(&format!("Summary: {}\n", context.summary));
    }

    out
}
