//! Seam to the platform speech-recognition engine.
//!
//! The engine itself lives outside this crate. What the capture controller
//! depends on is only this shape: a continuous, interim-result stream that
//! can be started and stopped, and that reports three kinds of events:
//! results, errors, and end-of-stream. Host integrations probe for a platform engine
//! once at startup and hand the controller either a [`SpeechSourceHandle`]
//! or nothing; absence is a capability flag, not an error.

use crate::error::Result;
use tokio::sync::mpsc;

/// One recognition result segment.
#[derive(Debug, Clone)]
pub struct ResultSegment {
    /// Best transcript for this segment.
    pub transcript: String,
    /// Whether the segment is final (end of a spoken phrase) rather than an
    /// interim hypothesis that may still change.
    pub is_final: bool,
}

/// Events delivered by the recognition stream.
#[derive(Debug, Clone)]
pub enum StreamEvent {
    /// All currently known result segments, in spoken order.
    Result { segments: Vec<ResultSegment> },
    /// Backend failure, carrying the engine's error code.
    Error { code: String },
    /// Stream closed, no payload. The platform stream has a maximum
    /// continuous duration and ends on its own.
    End,
}

/// Control surface of the platform recognition stream.
///
/// Implementations are expected to run in continuous mode with interim
/// results enabled, delivering [`StreamEvent`]s on the channel paired with
/// the source at construction time.
pub trait SpeechSource: Send {
    /// Open the recognition stream.
    ///
    /// # Errors
    ///
    /// Returns an error when the stream cannot be opened; capture state is
    /// left inactive in that case.
    fn start(&mut self) -> Result<()>;

    /// Request closure of the stream. The engine acknowledges with a
    /// [`StreamEvent::End`].
    fn stop(&mut self);
}

/// A probed platform engine: the control surface plus its event stream.
pub struct SpeechSourceHandle {
    /// Start/stop control of the stream.
    pub source: Box<dyn SpeechSource>,
    /// Events emitted by the stream.
    pub events: mpsc::UnboundedReceiver<StreamEvent>,
}
