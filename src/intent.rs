//! Keyword intent matching and canned response selection.
//!
//! Responses come from an explicit ordered rule list rather than a branch
//! cascade, so the priority order is data, not control flow. Each rule pairs
//! a set of case-insensitive substrings (logical OR) with a fixed template.
//! Evaluation order is fixed and meaningful:
//!
//! 1. the six task intents, most specific first,
//! 2. an emotion-keyed fallback for supportive labels,
//! 3. the help intent,
//! 4. a default reply.
//!
//! The first match wins and later rules are never evaluated. Templates are
//! static text with no slot-filling: the agent describes what it would do,
//! it never claims to have done it.

use crate::emotion::Emotion;

/// One intent rule: any keyword hit selects the response.
struct IntentRule {
    keywords: &'static [&'static str],
    response: &'static str,
}

impl IntentRule {
    fn matches(&self, lower: &str) -> bool {
        self.keywords.iter().any(|kw| lower.contains(kw))
    }
}

/// Task intents, checked before any emotional fallback.
const TASK_RULES: &[IntentRule] = &[
    IntentRule {
        keywords: &["send file", "share file"],
        response: "I'd open your file manager, identify the file you want to share, and prepare it for sending via WhatsApp, Email, or your preferred method. Which file would you like to send?",
    },
    IntentRule {
        keywords: &["whatsapp"],
        response: "I can help you with WhatsApp! I'd open WhatsApp, select your contact, and send your message or file. Just tell me who to send it to and what to say.",
    },
    IntentRule {
        keywords: &["email", "mail"],
        response: "I'll help you with email. I can compose, send, or manage your emails. Who should I send this to, and what's the message?",
    },
    IntentRule {
        keywords: &["search", "google", "browse"],
        response: "Opening your browser and searching for that now. I'll find the most relevant information for you.",
    },
    IntentRule {
        keywords: &["organize", "folder", "files"],
        response: "I can organize your files! Tell me which folders or files you want me to work with, and I'll sort, rename, or move them as needed.",
    },
    IntentRule {
        keywords: &["remind", "schedule", "meeting"],
        response: "I'll set that up for you. When would you like the reminder, and what should I remind you about?",
    },
];

/// Help intent, checked after the emotional fallback on purpose: a tired
/// "please help" gets encouragement, not the feature list.
const HELP_RULE: IntentRule = IntentRule {
    keywords: &["help", "what can you do"],
    response: "I can help you with: sending files & messages, managing emails, organizing folders, web searches, setting reminders, opening apps, and automating daily tasks. I understand natural language, so just tell me what you need!",
};

const MOTIVATING_RESPONSE: &str = "I can see you're tired. Let me handle this for you - you focus on taking a break. I've got this covered!";
const CALM_RESPONSE: &str = "I understand you're frustrated. Take a deep breath - I'm here to help make things easier. Let me handle the technical stuff.";
const EMPATHETIC_RESPONSE: &str = "I'm here for you. Whatever you need, we'll work through it together. What can I do to help right now?";

const DEFAULT_RESPONSE: &str = "I'm ready to help! I can send files, manage messages, organize your work, browse the web, and handle daily digital tasks. What would you like me to do?";

/// Select the reply for a user utterance.
///
/// Deterministic and total: always returns non-empty text. There is no
/// "unrecognized command" outcome, only the default reply.
#[must_use]
pub fn generate_response(text: &str, emotion: Emotion) -> &'static str {
    let lower = text.to_lowercase();

    for rule in TASK_RULES {
        if rule.matches(&lower) {
            return rule.response;
        }
    }

    if let Some(response) = emotion_response(emotion) {
        return response;
    }

    if HELP_RULE.matches(&lower) {
        return HELP_RULE.response;
    }

    DEFAULT_RESPONSE
}

/// Fixed template for the supportive emotion labels. `Friendly` has no
/// dedicated template and falls through to the later rules.
fn emotion_response(emotion: Emotion) -> Option<&'static str> {
    match emotion {
        Emotion::Motivating => Some(MOTIVATING_RESPONSE),
        Emotion::Calm => Some(CALM_RESPONSE),
        Emotion::Empathetic => Some(EMPATHETIC_RESPONSE),
        Emotion::Friendly => None,
    }
}
