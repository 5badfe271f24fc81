//! Rule-based intent detection and entity extraction.
//!
//! Classification is keyword counting over a fixed table; extraction is a
//! battery of pattern matchers. The whole module is pure and synchronous:
//! no input can make it fail, an unmatched question simply comes back as
//! [`PrimaryIntent::Mixed`] with confidence 0 and empty entity lists.

use crate::models::intent::{DataNeeds, IntentResult, PrimaryIntent, QueryEntities, Timeframe};
use indexmap::IndexSet;
use regex::Regex;
use std::sync::LazyLock;

use PrimaryIntent::*;

/// Scored intent categories and their keyword phrases.
///
/// Table order is load-bearing: ties resolve to the earlier entry because
/// scoring keeps the first strictly-greater score. `Mixed` is deliberately
/// absent; it is only the no-match fallback.
const INTENT_KEYWORDS: &[(PrimaryIntent, &[&str])] = &[
    (
        TeamComposition,
        &[
            "team",
            "who should",
            "lead",
            "work together",
            "best fit",
            "staff",
            "assign people",
            "project team",
        ],
    ),
    (
        DocumentSearch,
        &[
            "document",
            "file",
            "find documents",
            "policy",
            "report",
            "presentation",
            "contract",
            "spreadsheet",
        ],
    ),
    (
        ConflictResolution,
        &[
            "conflict",
            "disagreement",
            "tension",
            "dispute",
            "not getting along",
            "friction",
            "mediate",
            "clash",
        ],
    ),
    (
        Delegation,
        &[
            "delegate",
            "delegation",
            "hand off",
            "reassign",
            "take over",
            "cover for",
            "offload",
        ],
    ),
    (
        EmployeeLookup,
        &[
            "who is",
            "contact info",
            "email for",
            "phone number",
            "look up",
            "reach",
            "profile",
        ],
    ),
    (
        DepartmentOverview,
        &[
            "department",
            "org chart",
            "organization",
            "team structure",
            "headcount",
            "how many people",
            "reports to",
        ],
    ),
];

// Keyword sets that force a data category on regardless of the scored
// intent. Scanned with plain substring containment over the lowered text.
const RELATIONSHIP_OVERRIDES: &[&str] = &[
    "manager",
    "hierarchy",
    "reports to",
    "org chart",
    "supervisor",
    "chain of command",
];
const ENNEAGRAM_OVERRIDES: &[&str] =
    &["personality", "enneagram", "compatib", "work style", "temperament"];
const DOCUMENT_OVERRIDES: &[&str] = &["document", "file", "policy", "handbook"];
const PEOPLE_OVERRIDES: &[&str] = &["who", "employee", "colleague", "teammate", "person"];

const CURRENT_HINTS: &[&str] = &[
    "current",
    "right now",
    "today",
    "this week",
    "this month",
    "at the moment",
];
const HISTORICAL_HINTS: &[&str] = &[
    "last year",
    "last quarter",
    "last month",
    "previous",
    "ago",
    "former",
    "used to",
    "history",
    "historical",
];

const PROJECT_TYPES: &[(&str, &[&str])] = &[
    (
        "technical",
        &["technical", "engineering", "software", "development", "infrastructure"],
    ),
    ("creative", &["creative", "design", "branding", "campaign"]),
    ("strategic", &["strategic", "strategy", "roadmap", "planning"]),
];

// Name candidates that are really sentence furniture. Without this filter
// the possessive and who-is heuristics would mint a person out of every
// question word.
const NAME_STOP_WORDS: &[&str] = &[
    "who", "what", "where", "when", "why", "how", "the", "our", "my", "their", "this", "that",
    "someone", "anyone", "everyone", "please", "thanks", "hello",
];

// Sentence-initial auxiliaries and question words that the capitalized-run
// heuristic sweeps up ("Can Sarah Johnson..." matches as a three-word run).
// They are stripped from the front of a candidate before it counts as a
// name.
const LEADING_STOP_WORDS: &[&str] = &[
    "can", "could", "does", "did", "will", "would", "should", "is", "are", "was", "were", "has",
    "have", "who", "what", "where", "when", "why", "how", "show", "find", "tell", "please", "the",
    "our", "my", "their", "hello", "hi", "hey", "thanks",
];

static QUOTED_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]+)""#).expect("valid quoted-name regex"));
static WHO_IS_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:[Ww]ho\s+is|[Ww]ho's)\s+([A-Z][A-Za-z]+(?:\s+[A-Z][A-Za-z]+)*)")
        .expect("valid who-is regex")
});
static POSSESSIVE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Z][A-Za-z]+(?:\s+[A-Z][A-Za-z]+)*)'s\b").expect("valid possessive regex")
});
static CAPITALIZED_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z][a-z]+(?:\s+[A-Z][a-z]+)+)\b").expect("valid capitalized-run regex")
});
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid email regex")
});

static DEPARTMENT_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> =
    LazyLock::new(|| word_patterns(&[
        ("engineering", r"engineering"),
        ("marketing", r"marketing"),
        ("sales", r"sales"),
        ("human resources", r"human\s+resources|hr"),
        ("finance", r"finance"),
        ("design", r"design"),
        ("product", r"product"),
        ("operations", r"operations"),
        ("legal", r"legal"),
        ("support", r"support|customer\s+success"),
    ]));

static DOCUMENT_TYPE_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> =
    LazyLock::new(|| word_patterns(&[
        ("report", r"reports?"),
        ("policy", r"polic(?:y|ies)"),
        ("contract", r"contracts?"),
        ("presentation", r"presentations?"),
        ("proposal", r"proposals?"),
        ("spreadsheet", r"spreadsheets?"),
        ("memo", r"memos?"),
        ("handbook", r"handbooks?"),
        ("guide", r"guides?"),
        ("invoice", r"invoices?"),
        ("resume", r"resumes?"),
    ]));

static SKILL_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    word_patterns(&[
        ("leadership", r"leadership"),
        ("communication", r"communication"),
        ("programming", r"programming|coding"),
        ("data analysis", r"data\s+analysis|analytics"),
        ("design", r"design"),
        ("marketing", r"marketing"),
        ("sales", r"sales"),
        ("project management", r"project\s+management"),
        ("writing", r"writing"),
        ("negotiation", r"negotiation"),
        ("budgeting", r"budgeting"),
        ("recruiting", r"recruiting|hiring"),
    ])
});

static LOCATION_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    word_patterns(&[
        ("remote", r"remote"),
        ("new york", r"new\s+york"),
        ("london", r"london"),
        ("san francisco", r"san\s+francisco"),
        ("berlin", r"berlin"),
        ("tokyo", r"tokyo"),
        ("chicago", r"chicago"),
        ("austin", r"austin"),
        ("toronto", r"toronto"),
        ("singapore", r"singapore"),
    ])
});

fn word_patterns(entries: &[(&'static str, &str)]) -> Vec<(&'static str, Regex)> {
    entries
        .iter()
        .map(|(canonical, pattern)| {
            let regex = Regex::new(&format!(r"(?i)\b(?:{pattern})\b"))
                .expect("valid vocabulary regex");
            (*canonical, regex)
        })
        .collect()
}

/// Classify a free-text question and extract its structured entities.
///
/// Deterministic for a given input; never fails.
pub fn detect_intent(text: &str) -> IntentResult {
    let lowered = text.to_lowercase();

    let (primary_intent, confidence) = score_intents(&lowered);
    let entities = extract_entities(text, &lowered);
    let data_needs = derive_data_needs(primary_intent, &lowered);

    IntentResult {
        primary_intent,
        confidence,
        entities,
        data_needs,
    }
}

/// Count keyword hits per category; highest wins, first-seen wins on ties.
fn score_intents(lowered: &str) -> (PrimaryIntent, f64) {
    let mut best_intent = Mixed;
    let mut best_score = 0usize;
    let mut total = 0usize;

    for (intent, keywords) in INTENT_KEYWORDS {
        let score = keywords
            .iter()
            .filter(|keyword| lowered.contains(**keyword))
            .count();
        total += score;
        // Strictly greater: an equal later score never displaces an
        // earlier winner. This tie-break is contract, see the tests.
        if score > best_score {
            best_score = score;
            best_intent = *intent;
        }
    }

    if best_score == 0 {
        (Mixed, 0.0)
    } else {
        (best_intent, best_score as f64 / total as f64)
    }
}

fn extract_entities(original: &str, lowered: &str) -> QueryEntities {
    QueryEntities {
        people: extract_people(original),
        departments: extract_vocabulary(&DEPARTMENT_PATTERNS, original),
        document_types: extract_vocabulary(&DOCUMENT_TYPE_PATTERNS, original),
        skills: extract_vocabulary(&SKILL_PATTERNS, original),
        locations: extract_vocabulary(&LOCATION_PATTERNS, original),
        timeframe: extract_timeframe(lowered),
        project_type: extract_project_type(lowered),
    }
}

/// Four overlapping heuristics over the ORIGINAL text (capitalization
/// matters for names), unioned and deduplicated in first-seen order, with
/// emails appended to the same list.
///
/// Known precision limitation: a capitalized place like "New York" is
/// indistinguishable from a name here and will be extracted as one.
fn extract_people(original: &str) -> Vec<String> {
    let mut names: IndexSet<String> = IndexSet::new();

    for captures in QUOTED_NAME.captures_iter(original) {
        push_name(&mut names, &captures[1]);
    }
    for captures in WHO_IS_NAME.captures_iter(original) {
        push_name(&mut names, &captures[1]);
    }
    for captures in POSSESSIVE_NAME.captures_iter(original) {
        push_name(&mut names, &captures[1]);
    }
    for captures in CAPITALIZED_RUN.captures_iter(original) {
        push_name(&mut names, strip_leading_stop_words(&captures[1]));
    }

    // Emails share the people list; consumers route on the '@'.
    for m in EMAIL.find_iter(original) {
        names.insert(m.as_str().to_string());
    }

    names.into_iter().collect()
}

/// Drop sentence-initial auxiliaries and question words from the front of
/// a capitalized run, one word at a time.
fn strip_leading_stop_words(candidate: &str) -> &str {
    let mut rest = candidate;
    while let Some((first, tail)) = rest.split_once(char::is_whitespace) {
        if LEADING_STOP_WORDS.contains(&first.to_lowercase().as_str()) {
            rest = tail.trim_start();
        } else {
            break;
        }
    }
    rest
}

fn push_name(names: &mut IndexSet<String>, candidate: &str) {
    let trimmed = candidate.trim();
    if trimmed.is_empty() {
        return;
    }
    if NAME_STOP_WORDS.contains(&trimmed.to_lowercase().as_str()) {
        return;
    }
    names.insert(trimmed.to_string());
}

fn extract_vocabulary(patterns: &[(&'static str, Regex)], text: &str) -> Vec<String> {
    patterns
        .iter()
        .filter(|(_, regex)| regex.is_match(text))
        .map(|(canonical, _)| canonical.to_string())
        .collect()
}

fn extract_timeframe(lowered: &str) -> Option<Timeframe> {
    if CURRENT_HINTS.iter().any(|hint| lowered.contains(hint)) {
        Some(Timeframe::Current)
    } else if HISTORICAL_HINTS.iter().any(|hint| lowered.contains(hint)) {
        Some(Timeframe::Historical)
    } else {
        None
    }
}

fn extract_project_type(lowered: &str) -> Option<String> {
    PROJECT_TYPES
        .iter()
        .find(|(_, hints)| hints.iter().any(|hint| lowered.contains(hint)))
        .map(|(kind, _)| kind.to_string())
}

/// Fixed per-intent mapping OR'd with keyword-triggered overrides.
fn derive_data_needs(intent: PrimaryIntent, lowered: &str) -> DataNeeds {
    let mut needs = match intent {
        TeamComposition => DataNeeds {
            needs_people_data: true,
            needs_relationship_data: true,
            needs_enneagram_data: true,
            ..Default::default()
        },
        DocumentSearch => DataNeeds {
            needs_document_data: true,
            ..Default::default()
        },
        ConflictResolution => DataNeeds {
            needs_people_data: true,
            needs_enneagram_data: true,
            ..Default::default()
        },
        Delegation => DataNeeds {
            needs_people_data: true,
            needs_relationship_data: true,
            ..Default::default()
        },
        EmployeeLookup => DataNeeds {
            needs_people_data: true,
            ..Default::default()
        },
        DepartmentOverview => DataNeeds {
            needs_people_data: true,
            needs_relationship_data: true,
            ..Default::default()
        },
        // Unclassified questions still resolve people; everything else
        // stays off unless a keyword forces it.
        Mixed => DataNeeds {
            needs_people_data: true,
            ..Default::default()
        },
    };

    if contains_any(lowered, RELATIONSHIP_OVERRIDES) {
        needs.needs_relationship_data = true;
    }
    if contains_any(lowered, ENNEAGRAM_OVERRIDES) {
        needs.needs_enneagram_data = true;
    }
    if contains_any(lowered, DOCUMENT_OVERRIDES) {
        needs.needs_document_data = true;
    }
    if contains_any(lowered, PEOPLE_OVERRIDES) {
        needs.needs_people_data = true;
    }

    needs
}

fn contains_any(lowered: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| lowered.contains(keyword))
}
