//! Heuristic emotion tagger for agent replies.
//!
//! Scans the user's utterance for affective keywords and maps it to one of
//! four labels. The label rides on the agent message that answers the
//! utterance, so renderers can color or voice the reply accordingly.
//!
//! Matching is a fixed-priority scan: the first keyword set with a hit wins
//! outright. There is no scoring and no partial credit, which keeps the
//! tagger trivially predictable for the response rules layered on top of it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Affective label attached to an agent reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    /// De-escalating tone for an angry or frustrated user.
    Calm,
    /// Neutral-positive default.
    Friendly,
    /// Energizing tone for a tired or stressed user.
    Motivating,
    /// Supportive tone for a sad or worried user.
    Empathetic,
}

impl Emotion {
    /// Lowercase wire name, matching the serialized form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Calm => "calm",
            Self::Friendly => "friendly",
            Self::Motivating => "motivating",
            Self::Empathetic => "empathetic",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// (label, keywords) pairs, checked in order. First hit wins.
const EMOTION_TABLE: &[(Emotion, &[&str])] = &[
    (Emotion::Motivating, &["tired", "exhausted", "stressed"]),
    (Emotion::Calm, &["angry", "frustrated", "annoyed"]),
    (Emotion::Empathetic, &["sad", "upset", "worried"]),
];

/// Classify the emotional tone of a user utterance.
///
/// Case-insensitive substring matching against [`EMOTION_TABLE`], in table
/// order. Total: every input resolves to a label, and anything without a
/// keyword hit (including the empty string) is [`Emotion::Friendly`].
#[must_use]
pub fn classify(text: &str) -> Emotion {
    let lower = text.to_lowercase();
    for &(label, keywords) in EMOTION_TABLE {
        if keywords.iter().any(|kw| lower.contains(kw)) {
            return label;
        }
    }
    Emotion::Friendly
}
