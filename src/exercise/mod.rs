//! Exercise domain types — verb, tense, per-pronoun assignments.

pub mod selector;

use serde::{Deserialize, Serialize};

pub use selector::select_daily_exercise;

/// The fixed pronoun set, in exercise order.
pub const PRONOUNS: [&str; 5] = [
    "yo",
    "tú",
    "él / ella",
    "nosotros / nosotras",
    "ellos / ellas",
];

/// Tenses the trainer drills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tense {
    Present,
    Preterite,
    Imperfect,
    Future,
}

/// All drilled tenses, in selection order.
pub const TENSES: [Tense; 4] = [
    Tense::Present,
    Tense::Preterite,
    Tense::Imperfect,
    Tense::Future,
];

impl std::fmt::Display for Tense {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Present => "Present",
            Self::Preterite => "Preterite",
            Self::Imperfect => "Imperfect",
            Self::Future => "Future",
        };
        write!(f, "{s}")
    }
}

/// One pronoun+tense slot of the daily exercise. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub pronoun: String,
    pub tense: Tense,
}

/// A selected daily exercise: one verb, five pronoun+tense assignments.
#[derive(Debug, Clone)]
pub struct Exercise {
    pub verb: String,
    pub assignments: Vec<Assignment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tense_display_matches_wire_names() {
        assert_eq!(Tense::Present.to_string(), "Present");
        assert_eq!(Tense::Preterite.to_string(), "Preterite");
        assert_eq!(Tense::Imperfect.to_string(), "Imperfect");
        assert_eq!(Tense::Future.to_string(), "Future");
    }

    #[test]
    fn tense_serde_roundtrip() {
        let json = serde_json::to_string(&Tense::Imperfect).unwrap();
        assert_eq!(json, "\"Imperfect\"");
        let parsed: Tense = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Tense::Imperfect);
    }

    #[test]
    fn assignment_serde_roundtrip() {
        let a = Assignment {
            pronoun: "él / ella".to_string(),
            tense: Tense::Future,
        };
        let json = serde_json::to_string(&a).unwrap();
        let parsed: Assignment = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, a);
    }
}
