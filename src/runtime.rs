//! Runtime events emitted by the engine for renderers and observability.
//!
//! Intentionally lightweight: renderers consume these over a broadcast
//! channel and must never be able to stall a turn.

use crate::message::Message;
use crate::status::ActivityStatus;
use serde::Serialize;

/// Events describing what the engine is doing "right now".
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RuntimeEvent {
    /// The activity status changed.
    Status {
        /// New status value.
        status: ActivityStatus,
    },
    /// A message was appended to the conversation timeline.
    Message {
        /// The appended message.
        message: Message,
    },
    /// Voice capture extracted a pending command draft. Renderers typically
    /// place this in the input field; it is not submitted automatically.
    PendingCommand {
        /// Extracted command text.
        text: String,
    },
    /// The recognition stream failed. Non-fatal; capture is already stopped.
    CaptureError {
        /// Error code reported by the backend.
        code: String,
    },
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn events_serialize_with_tag() {
        let json = serde_json::to_string(&RuntimeEvent::Status {
            status: ActivityStatus::Thinking,
        })
        .unwrap();
        assert_eq!(json, "{\"event\":\"status\",\"status\":\"thinking\"}");
    }

    #[test]
    fn capture_error_carries_code() {
        let json = serde_json::to_string(&RuntimeEvent::CaptureError {
            code: "not-allowed".to_owned(),
        })
        .unwrap();
        assert!(json.contains("\"code\":\"not-allowed\""));
    }
}
