//! Jonny: deterministic conversational command engine.
//!
//! Free-text or voice commands go in; a pre-authored reply chosen by keyword
//! matching comes out, tagged with a coarse emotion label and narrated by a
//! visible activity status. There is no model and no network: all "AI"
//! behavior is deterministic rule matching.
//!
//! # Architecture
//!
//! Independent pieces connected by async channels:
//! - **Emotion tagger**: utterance → affect label (pure keyword scan)
//! - **Intent rules**: utterance + label → canned reply (ordered rule list)
//! - **Status machine**: `idle → listening → thinking → working → done`
//! - **Capture controller**: continuous recognition stream → discrete
//!   pending commands, with wake-phrase extraction and auto-restart
//! - **Dialogue coordinator**: single writer of the timeline and status,
//!   sequencing one paced turn per submission

pub mod capture;
pub mod config;
pub mod emotion;
pub mod error;
pub mod intent;
pub mod message;
pub mod persona;
pub mod pipeline;
pub mod recognizer;
pub mod runtime;
pub mod status;
pub mod timeline;
pub mod wake;

pub use capture::{CaptureController, CaptureHandle};
pub use config::AgentConfig;
pub use emotion::Emotion;
pub use error::{AgentError, Result};
pub use message::{Message, Role};
pub use pipeline::coordinator::{DialogueCoordinator, DialogueHandle};
pub use pipeline::messages::{CaptureCommand, CaptureEvent};
pub use recognizer::{ResultSegment, SpeechSource, SpeechSourceHandle, StreamEvent};
pub use runtime::RuntimeEvent;
pub use status::ActivityStatus;
pub use timeline::Timeline;
