//! Message types passed between the capture controller and the coordinator.

/// Commands sent to the capture controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureCommand {
    /// Open the recognition stream and mark capture active.
    Start,
    /// Close the recognition stream and mark capture inactive.
    Stop,
}

/// Events emitted by the capture controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureEvent {
    /// The recognition stream opened and capture is active.
    Started,
    /// A wake phrase was heard in the running transcript.
    WakeDetected,
    /// A discrete command was extracted from the stream. This is a pending
    /// draft only; submission is a separate, explicit action.
    CommandReady {
        /// Extracted command text. May be empty when the utterance was just
        /// the wake phrase.
        text: String,
    },
    /// Capture was stopped on request.
    Stopped,
    /// The stream failed; capture is inactive.
    Failed {
        /// Error code reported by the recognition backend.
        code: String,
    },
}
