mod common;

use common::{MemoryStore, department, document, edge, org_id, person};
use orgpulse::services::context::ContextBuilder;
use orgpulse::services::directory::DirectoryService;
use std::sync::Arc;
use uuid::Uuid;

fn builder(store: Arc<MemoryStore>) -> ContextBuilder {
    ContextBuilder::new(Arc::new(DirectoryService::new(store, org_id(), 300)))
}

#[tokio::test]
async fn test_build_context_is_idempotent() {
    let sarah = person("Sarah Johnson", Some("2"));
    let marcus = person("Marcus Chen", Some("8"));
    let store = Arc::new(MemoryStore::new().with_people(vec![sarah, marcus]));
    let builder = builder(store);

    let prompt = "Who should lead a technical project with Sarah Johnson and Marcus Chen?";
    let first = builder.build_context(prompt).await;
    let second = builder.build_context(prompt).await;

    let ids = |ctx: &orgpulse::models::context::EnrichedContext| -> Vec<Uuid> {
        ctx.people.iter().map(|p| p.id).collect()
    };
    assert_eq!(ids(&first), ids(&second));
    assert_eq!(first.summary, second.summary);
    assert_eq!(first.recommendations, second.recommendations);
    assert_eq!(
        first.personality_insights.team_compatibility.as_ref().map(|c| c.score),
        second.personality_insights.team_compatibility.as_ref().map(|c| c.score),
    );
}

#[tokio::test]
async fn test_people_are_deduplicated_by_id() {
    let mut sarah = person("Sarah Johnson", Some("2"));
    sarah.responsibilities = vec!["leadership".to_string()];
    let store = Arc::new(MemoryStore::new().with_people(vec![sarah]));
    let builder = builder(store);

    // Sarah resolves both by name and through the leadership skill.
    let context = builder
        .build_context("Does Sarah Johnson have leadership experience for the team?")
        .await;

    assert_eq!(context.people.len(), 1);
}

#[tokio::test]
async fn test_conflict_recommendations_use_first_two_people_only() {
    let alice = person("Alice Smith", Some("1"));
    let bob = person("Bob Jones", Some("8"));
    let carl = person("Carl Young", Some("9"));
    let store = Arc::new(MemoryStore::new().with_people(vec![
        alice.clone(),
        bob.clone(),
        carl.clone(),
    ]));
    let builder = builder(store);

    let context = builder
        .build_context(
            "There is a disagreement and tension between Alice Smith and Bob Jones and Carl Young",
        )
        .await;

    assert_eq!(context.people.len(), 3, "all three resolve as people");
    assert!(
        !context.recommendations.is_empty(),
        "two typed people produce conflict guidance"
    );
    assert!(
        context.recommendations.iter().any(|r| r.contains("Alice Smith")),
        "guidance covers the first person"
    );
    assert!(
        context.recommendations.iter().any(|r| r.contains("Bob Jones")),
        "guidance covers the second person"
    );
    assert!(
        !context.recommendations.iter().any(|r| r.contains("Carl Young")),
        "the third resolved person is ignored by conflict guidance"
    );
}

#[tokio::test]
async fn test_conflict_intent_injects_supplementary_document_searches() {
    let alice = person("Alice Smith", Some("1"));
    let bob = person("Bob Jones", Some("8"));
    let store = Arc::new(
        MemoryStore::new()
            .with_people(vec![alice.clone(), bob.clone()])
            .with_documents(vec![
                document(&alice, "Conflict Resolution Playbook", "guide", 60),
                document(&alice, "Communication Guidelines", "guide", 30),
                document(&bob, "Expense Policy", "policy", 10),
            ]),
    );
    let builder = builder(store);

    let context = builder
        .build_context(
            "There is friction, tension and disagreement between Alice Smith and Bob Jones; \
             can you find a policy document to help?",
        )
        .await;

    let titles: Vec<&str> = context.documents.iter().map(|d| d.title.as_str()).collect();
    assert!(titles.contains(&"Expense Policy"), "extracted type search ran");
    assert!(
        titles.contains(&"Conflict Resolution Playbook"),
        "supplementary conflict search ran without being asked for"
    );
    assert!(
        titles.contains(&"Communication Guidelines"),
        "supplementary communication search ran without being asked for"
    );
}

#[tokio::test]
async fn test_delegation_intent_injects_delegation_search_and_recommends_reports() {
    let sarah = person("Sarah Johnson", Some("3"));
    let mut tim = person("Tim Woo", Some("6"));
    tim.responsibilities = vec!["budgeting".to_string()];

    let store = Arc::new(
        MemoryStore::new()
            .with_people(vec![sarah.clone(), tim.clone()])
            .with_relationships(vec![edge(&sarah, &tim)])
            .with_documents(vec![document(&sarah, "Delegation Checklist", "guide", 15)]),
    );
    let builder = builder(store);

    let context = builder
        .build_context("Can Sarah Johnson delegate or hand off this file review?")
        .await;

    let titles: Vec<&str> = context.documents.iter().map(|d| d.title.as_str()).collect();
    assert!(titles.contains(&"Delegation Checklist"));
    assert!(
        context
            .recommendations
            .iter()
            .any(|r| r.contains("Tim Woo") && r.contains("budgeting")),
        "direct reports surface as delegation candidates: {:?}",
        context.recommendations
    );
}

#[tokio::test]
async fn test_enneagram_stage_attaches_profiles_and_team_score() {
    let alice = person("Alice Smith", Some("1"));
    let bob = person("Bob Jones", Some("8"));
    let store = Arc::new(MemoryStore::new().with_people(vec![alice.clone(), bob.clone()]));
    let builder = builder(store);

    let context = builder
        .build_context("How compatible are Alice Smith and Bob Jones?")
        .await;

    assert_eq!(context.personality_insights.profiles.len(), 2);
    let compatibility = context
        .personality_insights
        .team_compatibility
        .as_ref()
        .expect("two resolved people trigger a team score");
    assert!(compatibility.score < 50);

    // Summary fragments and their separator are contract.
    assert_eq!(
        context.summary,
        format!(
            "Found 2 relevant people | Team compatibility: {}%",
            compatibility.score
        )
    );
}

#[tokio::test]
async fn test_single_person_gets_profile_but_no_team_score() {
    let alice = person("Alice Smith", Some("1"));
    let store = Arc::new(MemoryStore::new().with_people(vec![alice]));
    let builder = builder(store);

    let context = builder
        .build_context("What is Alice Smith's personality type?")
        .await;

    assert_eq!(context.personality_insights.profiles.len(), 1);
    assert!(context.personality_insights.team_compatibility.is_none());
}

#[tokio::test]
async fn test_department_overview() {
    let engineering = department("Engineering");
    let mut nina = person("Nina Park", Some("5"));
    nina.department_id = Some(engineering.id);
    let mut omar = person("Omar Diaz", Some("9"));
    omar.department_id = Some(engineering.id);

    let store = Arc::new(
        MemoryStore::new()
            .with_people(vec![nina.clone(), omar.clone()])
            .with_departments(vec![engineering.clone()])
            .with_relationships(vec![edge(&nina, &omar)]),
    );
    let builder = builder(store);

    let context = builder
        .build_context("How many people are in the engineering department?")
        .await;

    assert_eq!(context.people.len(), 2);
    assert_eq!(context.departments.len(), 1);
    assert_eq!(context.relationships.len(), 2);
    assert!(
        context
            .recommendations
            .iter()
            .any(|r| r.contains("Engineering") && r.contains("2 people")),
        "department generator describes the roster: {:?}",
        context.recommendations
    );
    assert!(context.summary.contains("Mapped 2 reporting relationships"));
}

#[tokio::test]
async fn test_unresolvable_question_yields_empty_context() {
    let store = Arc::new(MemoryStore::new());
    let builder = builder(store);

    let context = builder.build_context("hello there").await;

    assert!(context.people.is_empty());
    assert!(context.documents.is_empty());
    assert!(context.relationships.is_empty());
    assert!(context.recommendations.is_empty());
    assert_eq!(context.summary, "");
}
