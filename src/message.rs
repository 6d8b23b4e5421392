//! Conversation message types.

use crate::emotion::Emotion;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Typed or spoken by the user.
    User,
    /// Generated by the agent.
    Agent,
}

/// One turn entry in the conversation timeline.
///
/// Messages are immutable once appended: content and timestamp never change,
/// and the id stays stable for the message's lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique, monotonically assigned by the timeline.
    pub id: u64,
    /// Message author.
    pub role: Role,
    /// Text payload, non-empty for committed messages.
    pub content: String,
    /// Creation time.
    pub timestamp: DateTime<Utc>,
    /// Affective label, set only on agent messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion: Option<Emotion>,
}
