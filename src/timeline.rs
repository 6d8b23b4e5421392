//! Append-only conversation timeline.
//!
//! Insertion order is display order. Messages are never mutated or removed
//! after they are appended. Writes come from a single task (the dialogue
//! coordinator); any number of readers may take ordered snapshots.

use crate::emotion::Emotion;
use crate::message::{Message, Role};
use chrono::Utc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Ordered, append-only store of conversation messages.
#[derive(Debug)]
pub struct Timeline {
    next_id: AtomicU64,
    messages: Mutex<Vec<Message>>,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline {
    /// Create an empty timeline. Ids start at 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            messages: Mutex::new(Vec::new()),
        }
    }

    /// Append a user message and return the stored copy.
    pub fn append_user(&self, content: &str) -> Message {
        self.append(Role::User, content, None)
    }

    /// Append an agent message carrying its emotion label.
    pub fn append_agent(&self, content: &str, emotion: Emotion) -> Message {
        self.append(Role::Agent, content, Some(emotion))
    }

    fn append(&self, role: Role, content: &str, emotion: Option<Emotion>) -> Message {
        let msg = Message {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            role,
            content: content.to_owned(),
            timestamp: Utc::now(),
            emotion,
        };
        self.messages
            .lock()
            .expect("timeline mutex poisoned")
            .push(msg.clone());
        msg
    }

    /// Ordered clone of all messages, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages
            .lock()
            .expect("timeline mutex poisoned")
            .clone()
    }

    /// Number of messages appended so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.lock().expect("timeline mutex poisoned").len()
    }

    /// Returns `true` when nothing has been appended yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn ids_are_monotonic() {
        let timeline = Timeline::new();
        let a = timeline.append_user("one");
        let b = timeline.append_agent("two", Emotion::Friendly);
        let c = timeline.append_user("three");
        assert!(a.id < b.id);
        assert!(b.id < c.id);
    }

    #[test]
    fn snapshot_preserves_insertion_order() {
        let timeline = Timeline::new();
        timeline.append_user("question");
        timeline.append_agent("answer", Emotion::Friendly);

        let snapshot = timeline.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].role, Role::User);
        assert_eq!(snapshot[1].role, Role::Agent);
        assert_eq!(snapshot[0].content, "question");
    }

    #[test]
    fn snapshot_is_a_copy() {
        let timeline = Timeline::new();
        timeline.append_user("hello");
        let before = timeline.snapshot();
        timeline.append_agent("hi", Emotion::Friendly);
        assert_eq!(before.len(), 1);
        assert_eq!(timeline.len(), 2);
    }

    #[test]
    fn emotion_only_on_agent_messages() {
        let timeline = Timeline::new();
        let user = timeline.append_user("hey");
        let agent = timeline.append_agent("hello", Emotion::Calm);
        assert!(user.emotion.is_none());
        assert_eq!(agent.emotion, Some(Emotion::Calm));
    }

    #[test]
    fn empty_timeline() {
        let timeline = Timeline::new();
        assert!(timeline.is_empty());
        assert_eq!(timeline.len(), 0);
        assert!(timeline.snapshot().is_empty());
    }
}
