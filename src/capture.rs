//! Voice capture lifecycle controller.
//!
//! Turns the continuous, possibly-interim transcript stream of the platform
//! recognition engine into discrete pending commands. The controller owns
//! the capture state (active flag plus the interim transcript buffer) and
//! reacts to two inputs, both delivered as messages: [`CaptureCommand`]s
//! from the host and [`StreamEvent`]s from the engine. It never submits
//! commands itself; extracted text is emitted as
//! [`CaptureEvent::CommandReady`] for an explicit submission action.
//!
//! Restart-on-end is deliberate policy: the platform stream has a maximum
//! continuous duration, and renewing it transparently keeps the
//! always-listening illusion up.

use crate::config::CaptureConfig;
use crate::pipeline::messages::{CaptureCommand, CaptureEvent};
use crate::recognizer::{ResultSegment, SpeechSource, SpeechSourceHandle, StreamEvent};
use crate::wake;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Handle for driving a running [`CaptureController`].
#[derive(Debug, Clone)]
pub struct CaptureHandle {
    cmd_tx: mpsc::UnboundedSender<CaptureCommand>,
    supported: bool,
}

impl CaptureHandle {
    /// Request that capture starts. No-op when voice is unsupported.
    pub fn start(&self) {
        let _ = self.cmd_tx.send(CaptureCommand::Start);
    }

    /// Request that capture stops. Idempotent.
    pub fn stop(&self) {
        let _ = self.cmd_tx.send(CaptureCommand::Stop);
    }

    /// Whether a platform recognition engine was available at startup.
    #[must_use]
    pub fn is_supported(&self) -> bool {
        self.supported
    }
}

/// Event-driven wrapper around the platform recognition stream.
pub struct CaptureController {
    config: CaptureConfig,
    source: Option<Box<dyn SpeechSource>>,
    stream_rx: Option<mpsc::UnboundedReceiver<StreamEvent>>,
    cmd_rx: Option<mpsc::UnboundedReceiver<CaptureCommand>>,
    events_tx: mpsc::UnboundedSender<CaptureEvent>,
    cancel: CancellationToken,
    /// Whether the microphone stream is currently open.
    active: bool,
    /// Session id for log correlation, fresh per `start()`.
    session: Option<Uuid>,
    /// Interim transcript buffer, discarded on each committed utterance.
    pending: String,
}

impl CaptureController {
    /// Create a controller around a probed engine, or around nothing when
    /// the capability is absent (voice affordances become no-ops).
    ///
    /// Returns the controller, the command handle, and the event stream the
    /// host (typically the dialogue coordinator) should consume.
    #[must_use]
    pub fn new(
        config: CaptureConfig,
        engine: Option<SpeechSourceHandle>,
    ) -> (Self, CaptureHandle, mpsc::UnboundedReceiver<CaptureEvent>) {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let (source, stream_rx) = match engine {
            Some(handle) => (Some(handle.source), Some(handle.events)),
            None => (None, None),
        };
        let supported = source.is_some();

        let controller = Self {
            config,
            source,
            stream_rx,
            cmd_rx: Some(cmd_rx),
            events_tx,
            cancel: CancellationToken::new(),
            active: false,
            session: None,
            pending: String::new(),
        };
        let handle = CaptureHandle { cmd_tx, supported };
        (controller, handle, events_rx)
    }

    /// Get a clone of the cancellation token for external shutdown.
    #[must_use]
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Run the controller until cancelled or all inputs close.
    pub async fn run(mut self) {
        let Some(mut cmd_rx) = self.cmd_rx.take() else {
            return;
        };
        let mut stream_rx = self.stream_rx.take();
        let cancel = self.cancel.clone();

        info!(
            "voice capture controller started (supported: {})",
            self.source.is_some()
        );

        loop {
            // Resolve to pending-forever when no engine is attached, so the
            // select below only ever fires on real stream events.
            let stream_fut = async {
                match &mut stream_rx {
                    Some(rx) => rx.recv().await,
                    None => std::future::pending().await,
                }
            };

            tokio::select! {
                () = cancel.cancelled() => break,
                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(CaptureCommand::Start) => self.handle_start(),
                        Some(CaptureCommand::Stop) => self.handle_stop(),
                        None => break,
                    }
                }
                // A closed stream channel disables this branch; commands are
                // still served so stop stays a no-op rather than a hang.
                Some(event) = stream_fut => self.handle_stream_event(event),
            }
        }

        info!("voice capture controller stopped");
    }

    fn handle_start(&mut self) {
        let Some(source) = self.source.as_mut() else {
            debug!("voice capture unsupported, ignoring start");
            return;
        };
        if self.active {
            return;
        }

        match source.start() {
            Ok(()) => {
                let session = Uuid::new_v4();
                self.active = true;
                self.session = Some(session);
                self.pending.clear();
                info!(%session, "recognition stream opened");
                let _ = self.events_tx.send(CaptureEvent::Started);
            }
            Err(e) => {
                warn!("failed to open recognition stream: {e}");
                let _ = self.events_tx.send(CaptureEvent::Failed {
                    code: e.to_string(),
                });
            }
        }
    }

    fn handle_stop(&mut self) {
        if !self.active {
            // Stopping twice is a no-op, not an error.
            return;
        }
        if let Some(source) = self.source.as_mut() {
            source.stop();
        }
        self.discard_pending();
        self.active = false;
        if let Some(session) = self.session.take() {
            info!(%session, "voice capture stopped");
        }
        let _ = self.events_tx.send(CaptureEvent::Stopped);
    }

    fn handle_stream_event(&mut self, event: StreamEvent) {
        match event {
            StreamEvent::Result { segments } => self.handle_result(&segments),
            StreamEvent::End => self.handle_end(),
            StreamEvent::Error { code } => self.handle_error(code),
        }
    }

    /// Fold the segment list into one running transcript and decide whether
    /// it commits a command.
    fn handle_result(&mut self, segments: &[ResultSegment]) {
        if !self.active {
            return;
        }

        let transcript: String = segments.iter().map(|s| s.transcript.as_str()).collect();

        if let Some(command) = wake::strip_wake_phrase(&transcript) {
            debug!("wake phrase heard in running transcript");
            self.pending.clear();
            let _ = self.events_tx.send(CaptureEvent::WakeDetected);
            let _ = self.events_tx.send(CaptureEvent::CommandReady { text: command });
        } else if segments.last().is_some_and(|s| s.is_final) {
            let command = transcript.trim().to_owned();
            self.pending.clear();
            let _ = self.events_tx.send(CaptureEvent::CommandReady { text: command });
        } else {
            // Interim update without a wake phrase commits nothing.
            self.pending = transcript;
        }
    }

    /// The platform stream closed on its own. While capture is still wanted,
    /// reopen it so the listening illusion survives the engine's duration
    /// limit.
    fn handle_end(&mut self) {
        if !self.active {
            return;
        }
        if !self.config.auto_restart {
            self.discard_pending();
            self.active = false;
            if let Some(session) = self.session.take() {
                info!(%session, "recognition stream ended, auto-restart disabled");
            }
            let _ = self.events_tx.send(CaptureEvent::Stopped);
            return;
        }

        let Some(source) = self.source.as_mut() else {
            return;
        };
        match source.start() {
            Ok(()) => debug!("recognition stream renewed"),
            Err(e) => {
                warn!("failed to renew recognition stream: {e}");
                self.discard_pending();
                self.active = false;
                self.session = None;
                let _ = self.events_tx.send(CaptureEvent::Failed {
                    code: e.to_string(),
                });
            }
        }
    }

    /// Backend failure. Non-fatal: capture deactivates and the error is
    /// surfaced for observability only.
    fn handle_error(&mut self, code: String) {
        if !self.active {
            debug!(%code, "recognition stream error while inactive");
            return;
        }
        warn!(%code, "recognition stream error");
        self.discard_pending();
        self.active = false;
        if let Some(session) = self.session.take() {
            debug!(%session, "capture session ended by stream error");
        }
        let _ = self.events_tx.send(CaptureEvent::Failed { code });
    }

    fn discard_pending(&mut self) {
        if !self.pending.is_empty() {
            debug!(
                "discarding {} chars of interim transcript",
                self.pending.len()
            );
            self.pending.clear();
        }
    }
}
