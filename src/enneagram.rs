//! Static enneagram compatibility model.
//!
//! Nine fixed profiles keyed by the canonical type codes `"1"`–`"9"` as
//! stored on people records. Lookups are pure; an unknown code is simply
//! absent, never an error.
//!
//! The `works_best_with`/`challenges_with` lists are NOT symmetric (type 1
//! lists 2 as a good pairing while type 2 lists 1 as a challenge). That
//! asymmetry is carried over from the product's compatibility content as-is
//! rather than being symmetrized here; pair classification reads the first
//! member's profile only.

use serde::Serialize;

/// A canonical enneagram type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EnneagramType {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
}

impl EnneagramType {
    /// All nine types in code order.
    pub const ALL: [EnneagramType; 9] = [
        EnneagramType::One,
        EnneagramType::Two,
        EnneagramType::Three,
        EnneagramType::Four,
        EnneagramType::Five,
        EnneagramType::Six,
        EnneagramType::Seven,
        EnneagramType::Eight,
        EnneagramType::Nine,
    ];

    /// Parse a stored code string. Unknown or malformed codes yield `None`.
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim() {
            "1" => Some(EnneagramType::One),
            "2" => Some(EnneagramType::Two),
            "3" => Some(EnneagramType::Three),
            "4" => Some(EnneagramType::Four),
            "5" => Some(EnneagramType::Five),
            "6" => Some(EnneagramType::Six),
            "7" => Some(EnneagramType::Seven),
            "8" => Some(EnneagramType::Eight),
            "9" => Some(EnneagramType::Nine),
            _ => None,
        }
    }

    /// The canonical code string as stored on people records.
    pub fn code(&self) -> &'static str {
        match self {
            EnneagramType::One => "1",
            EnneagramType::Two => "2",
            EnneagramType::Three => "3",
            EnneagramType::Four => "4",
            EnneagramType::Five => "5",
            EnneagramType::Six => "6",
            EnneagramType::Seven => "7",
            EnneagramType::Eight => "8",
            EnneagramType::Nine => "9",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for EnneagramType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// How a pair of types is classified when scoring a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairAffinity {
    Compatible,
    Conflicting,
    Neutral,
}

/// A static personality profile. Derived content, never persisted.
#[derive(Debug, Serialize)]
pub struct EnneagramProfile {
    pub kind: EnneagramType,
    pub display_name: &'static str,
    pub strengths: &'static [&'static str],
    pub challenges: &'static [&'static str],
    pub motivations: &'static [&'static str],
    pub communication: &'static str,
    pub works_best_with: &'static [EnneagramType],
    pub challenges_with: &'static [EnneagramType],
}

impl EnneagramProfile {
    /// Classify the pairing with `other`, reading only this profile's lists.
    pub fn affinity_with(&self, other: EnneagramType) -> PairAffinity {
        if self.works_best_with.contains(&other) {
            PairAffinity::Compatible
        } else if self.challenges_with.contains(&other) {
            PairAffinity::Conflicting
        } else {
            PairAffinity::Neutral
        }
    }
}

/// Look up the profile for a type. Total over all nine types.
pub fn profile_for(kind: EnneagramType) -> &'static EnneagramProfile {
    &PROFILES[kind.index()]
}

/// Look up a profile by stored code string. Unknown codes yield `None`.
pub fn profile_for_code(code: &str) -> Option<&'static EnneagramProfile> {
    EnneagramType::parse(code).map(profile_for)
}

use EnneagramType::*;

static PROFILES: [EnneagramProfile; 9] = [
    EnneagramProfile {
        kind: One,
        display_name: "The Reformer",
        strengths: &[
            "Principled and thorough",
            "Holds work to a high quality bar",
            "Reliable with process and detail",
        ],
        challenges: &[
            "Can be overly critical of loose work",
            "Struggles to delegate imperfect-but-done tasks",
        ],
        motivations: &["Doing things correctly", "Clear standards", "Integrity"],
        communication: "Be precise and structured; lead with the standard being met, not the shortcut taken.",
        works_best_with: &[Nine, Two],
        challenges_with: &[Four, Eight],
    },
    EnneagramProfile {
        kind: Two,
        display_name: "The Helper",
        strengths: &[
            "Builds strong working relationships",
            "Notices when teammates are overloaded",
            "Generous with time and support",
        ],
        challenges: &[
            "Overcommits to others' priorities",
            "Avoids voicing their own needs",
        ],
        motivations: &["Being needed", "Appreciation", "Team harmony"],
        communication: "Acknowledge their contributions explicitly before discussing gaps.",
        works_best_with: &[Eight, Four],
        challenges_with: &[Five, One],
    },
    EnneagramProfile {
        kind: Three,
        display_name: "The Achiever",
        strengths: &[
            "Goal-driven and energetic",
            "Adapts quickly to what success requires",
            "Comfortable presenting and selling work",
        ],
        challenges: &[
            "May cut corners under deadline pressure",
            "Ties self-worth to visible wins",
        ],
        motivations: &["Recognition", "Measurable results", "Advancement"],
        communication: "Frame feedback around outcomes and goals; keep meetings moving.",
        works_best_with: &[Six, One],
        challenges_with: &[Nine, Seven],
    },
    EnneagramProfile {
        kind: Four,
        display_name: "The Individualist",
        strengths: &[
            "Brings original, creative perspectives",
            "Deep emotional insight into users and colleagues",
            "Comfortable with ambiguity",
        ],
        challenges: &[
            "Disengages from routine work",
            "Sensitive to impersonal criticism",
        ],
        motivations: &["Authentic self-expression", "Meaningful work"],
        communication: "Connect the work to its meaning; avoid boilerplate praise.",
        works_best_with: &[Five, Nine],
        challenges_with: &[Three, One],
    },
    EnneagramProfile {
        kind: Five,
        display_name: "The Investigator",
        strengths: &[
            "Analytical depth and independent research",
            "Calm under technical pressure",
            "Strong at systems thinking",
        ],
        challenges: &[
            "Withdraws from high-contact collaboration",
            "Shares conclusions late",
        ],
        motivations: &["Competence", "Autonomy", "Understanding how things work"],
        communication: "Send material ahead of time; leave room for written follow-up.",
        works_best_with: &[One, Eight],
        challenges_with: &[Two, Seven],
    },
    EnneagramProfile {
        kind: Six,
        display_name: "The Loyalist",
        strengths: &[
            "Anticipates risks others miss",
            "Committed to the team through rough patches",
            "Thorough contingency planning",
        ],
        challenges: &[
            "Second-guesses decisions under uncertainty",
            "Needs explicit reassurance from leadership",
        ],
        motivations: &["Security", "Trustworthy guidance", "Preparedness"],
        communication: "Be consistent and explicit about plans; surprises erode trust.",
        works_best_with: &[Nine, Three],
        challenges_with: &[Eight, Four],
    },
    EnneagramProfile {
        kind: Seven,
        display_name: "The Enthusiast",
        strengths: &[
            "Generates options and momentum",
            "Lifts team energy in downturns",
            "Quick to connect ideas across domains",
        ],
        challenges: &[
            "Leaves follow-through to others",
            "Avoids hard conversations",
        ],
        motivations: &["Variety", "Possibility", "Freedom from constraint"],
        communication: "Keep it brisk and forward-looking; pin down commitments in writing.",
        works_best_with: &[Five, Three],
        challenges_with: &[One, Six],
    },
    EnneagramProfile {
        kind: Eight,
        display_name: "The Challenger",
        strengths: &[
            "Decisive under pressure",
            "Protects the team from external churn",
            "Comfortable owning hard calls",
        ],
        challenges: &[
            "Steamrolls quieter voices",
            "Reads hedging as weakness",
        ],
        motivations: &["Control of their own work", "Directness", "Impact"],
        communication: "Be direct and stand your ground; they respect pushback with substance.",
        works_best_with: &[Two, Nine],
        challenges_with: &[Five, One],
    },
    EnneagramProfile {
        kind: Nine,
        display_name: "The Peacemaker",
        strengths: &[
            "Mediates naturally between factions",
            "Steady, non-reactive presence",
            "Sees every side of a dispute",
        ],
        challenges: &[
            "Defers decisions to keep the peace",
            "Buries disagreement until it festers",
        ],
        motivations: &["Stability", "Inclusion", "Avoiding conflict"],
        communication: "Ask for their position directly; silence is not agreement.",
        works_best_with: &[One, Three],
        challenges_with: &[Six, Eight],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_code_resolves() {
        for kind in EnneagramType::ALL {
            let profile = profile_for_code(kind.code()).expect("profile for canonical code");
            assert_eq!(profile.kind, kind);
        }
    }

    #[test]
    fn test_unknown_codes_are_none() {
        assert!(profile_for_code("0").is_none());
        assert!(profile_for_code("10").is_none());
        assert!(profile_for_code("w3").is_none());
        assert!(profile_for_code("").is_none());
    }

    #[test]
    fn test_affinity_lists_never_contain_self() {
        for kind in EnneagramType::ALL {
            let profile = profile_for(kind);
            assert!(
                !profile.works_best_with.contains(&kind),
                "type {} lists itself as compatible",
                kind
            );
            assert!(
                !profile.challenges_with.contains(&kind),
                "type {} lists itself as a challenge",
                kind
            );
        }
    }

    #[test]
    fn test_affinity_lists_are_disjoint() {
        for kind in EnneagramType::ALL {
            let profile = profile_for(kind);
            for other in profile.works_best_with {
                assert!(
                    !profile.challenges_with.contains(other),
                    "type {} lists {} on both sides",
                    kind,
                    other
                );
            }
        }
    }

    #[test]
    fn test_asymmetry_is_preserved() {
        // Type 1 pairs well with 2, but 2 lists 1 as a challenge. This is
        // carried-over content; if it ever gets symmetrized the change must
        // be a deliberate product decision.
        assert_eq!(
            profile_for(EnneagramType::One).affinity_with(EnneagramType::Two),
            PairAffinity::Compatible
        );
        assert_eq!(
            profile_for(EnneagramType::Two).affinity_with(EnneagramType::One),
            PairAffinity::Conflicting
        );
    }

    #[test]
    fn test_pair_classification() {
        let one = profile_for(EnneagramType::One);
        assert_eq!(one.affinity_with(EnneagramType::Nine), PairAffinity::Compatible);
        assert_eq!(one.affinity_with(EnneagramType::Eight), PairAffinity::Conflicting);
        assert_eq!(one.affinity_with(EnneagramType::Six), PairAffinity::Neutral);
    }
}
