//! Dialogue orchestrator that sequences each conversation turn.
//!
//! The coordinator is the single writer of both the conversation timeline
//! and the activity status. Submissions arrive on an unbounded queue and are
//! processed one at a time inside a select loop, so racing submissions
//! serialize: a turn runs to completion before the next is dequeued and the
//! timeline never interleaves one turn's user/agent pair with another's.
//!
//! Each turn follows a fixed paced sweep: append the user message, hold
//! `Thinking`, hold `Working`, classify and reply, hold `Done`, return to
//! `Idle`. The holds are part of the contract, not incidental: classification
//! is near-instant, and the pacing is what renderers animate against.

use crate::config::AgentConfig;
use crate::emotion::{self, Emotion};
use crate::intent;
use crate::message::Message;
use crate::persona;
use crate::pipeline::messages::CaptureEvent;
use crate::runtime::RuntimeEvent;
use crate::status::ActivityStatus;
use crate::timeline::Timeline;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Cheap, cloneable front door to a running coordinator.
#[derive(Debug, Clone)]
pub struct DialogueHandle {
    submit_tx: mpsc::UnboundedSender<String>,
    status_rx: watch::Receiver<ActivityStatus>,
    timeline: Arc<Timeline>,
}

impl DialogueHandle {
    /// Submit an utterance for a full turn. Empty or whitespace-only text is
    /// silently ignored by the coordinator; this is not an error.
    pub fn submit(&self, text: impl Into<String>) {
        let _ = self.submit_tx.send(text.into());
    }

    /// Current activity status.
    #[must_use]
    pub fn status(&self) -> ActivityStatus {
        *self.status_rx.borrow()
    }

    /// A watch receiver that observes every status transition.
    #[must_use]
    pub fn status_stream(&self) -> watch::Receiver<ActivityStatus> {
        self.status_rx.clone()
    }

    /// Ordered snapshot of the conversation timeline.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Message> {
        self.timeline.snapshot()
    }
}

/// Orchestrates turns over the timeline, status, and capture events.
pub struct DialogueCoordinator {
    config: AgentConfig,
    cancel: CancellationToken,
    timeline: Arc<Timeline>,
    status_tx: watch::Sender<ActivityStatus>,
    submit_tx: mpsc::UnboundedSender<String>,
    submit_rx: Option<mpsc::UnboundedReceiver<String>>,
    runtime_tx: Option<broadcast::Sender<RuntimeEvent>>,
    capture_rx: Option<mpsc::UnboundedReceiver<CaptureEvent>>,
}

impl DialogueCoordinator {
    /// Create a coordinator with the given configuration.
    #[must_use]
    pub fn new(config: AgentConfig) -> Self {
        let (submit_tx, submit_rx) = mpsc::unbounded_channel();
        let (status_tx, _status_rx) = watch::channel(ActivityStatus::Idle);

        Self {
            config,
            cancel: CancellationToken::new(),
            timeline: Arc::new(Timeline::new()),
            status_tx,
            submit_tx,
            submit_rx: Some(submit_rx),
            runtime_tx: None,
            capture_rx: None,
        }
    }

    /// Attach a runtime event broadcaster for renderers/observability.
    #[must_use]
    pub fn with_runtime_events(mut self, tx: broadcast::Sender<RuntimeEvent>) -> Self {
        self.runtime_tx = Some(tx);
        self
    }

    /// Attach the capture controller's event stream. Capture events drive
    /// the `Listening` transitions and surface pending commands.
    #[must_use]
    pub fn with_capture_events(mut self, rx: mpsc::UnboundedReceiver<CaptureEvent>) -> Self {
        self.capture_rx = Some(rx);
        self
    }

    /// Get a handle for submitting text and reading state.
    #[must_use]
    pub fn handle(&self) -> DialogueHandle {
        DialogueHandle {
            submit_tx: self.submit_tx.clone(),
            status_rx: self.status_tx.subscribe(),
            timeline: Arc::clone(&self.timeline),
        }
    }

    /// Request graceful shutdown.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Get a clone of the cancellation token for external use.
    #[must_use]
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Run until cancelled or all input channels close.
    ///
    /// # Errors
    ///
    /// Currently infallible; the `Result` keeps the run surface uniform with
    /// fallible start-up work in host integrations.
    pub async fn run(mut self) -> crate::error::Result<()> {
        info!("dialogue coordinator started");

        // Seed the greeting exactly once, before any input is served.
        if self.timeline.is_empty() {
            let greeting = self.timeline.append_agent(persona::GREETING, Emotion::Friendly);
            self.emit(RuntimeEvent::Message { message: greeting });
        }

        let Some(mut submit_rx) = self.submit_rx.take() else {
            return Ok(());
        };
        let mut capture_rx = self.capture_rx.take();
        let cancel = self.cancel.clone();

        loop {
            // Resolve to pending-forever when capture is not wired in.
            let capture_fut = async {
                match &mut capture_rx {
                    Some(rx) => rx.recv().await,
                    None => std::future::pending().await,
                }
            };

            tokio::select! {
                () = cancel.cancelled() => break,
                submission = submit_rx.recv() => {
                    match submission {
                        Some(text) => self.run_turn(&text).await,
                        None => break,
                    }
                }
                // A closed capture channel disables this branch; text input
                // keeps being served.
                Some(event) = capture_fut => self.handle_capture_event(event),
            }
        }

        info!("dialogue coordinator stopped");
        Ok(())
    }

    /// One full turn. Always completes to `Idle` once started.
    async fn run_turn(&self, text: &str) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return;
        }

        let user = self.timeline.append_user(trimmed);
        debug!(id = user.id, "user message appended");
        self.emit(RuntimeEvent::Message { message: user });

        self.set_status(ActivityStatus::Thinking);
        self.pace(self.config.dialogue.thinking_ms).await;

        self.set_status(ActivityStatus::Working);
        self.pace(self.config.dialogue.working_ms).await;

        let emotion = emotion::classify(trimmed);
        let response = intent::generate_response(trimmed, emotion);
        let reply = self.timeline.append_agent(response, emotion);
        debug!(id = reply.id, %emotion, "agent message appended");
        self.emit(RuntimeEvent::Message { message: reply });

        self.set_status(ActivityStatus::Done);
        self.pace(self.config.dialogue.done_hold_ms).await;

        self.set_status(ActivityStatus::Idle);
    }

    /// Map capture events onto status transitions. Only the at-rest states
    /// react; a turn in flight is never preempted (capture events queue
    /// behind it and are applied afterwards).
    fn handle_capture_event(&self, event: CaptureEvent) {
        match event {
            CaptureEvent::Started | CaptureEvent::WakeDetected => {
                if self.status().can_arm_listening() {
                    self.set_status(ActivityStatus::Listening);
                }
            }
            CaptureEvent::CommandReady { text } => {
                debug!("pending command ready ({} chars)", text.len());
                self.emit(RuntimeEvent::PendingCommand { text });
            }
            CaptureEvent::Stopped => {
                if self.status() == ActivityStatus::Listening {
                    self.set_status(ActivityStatus::Idle);
                }
            }
            CaptureEvent::Failed { code } => {
                self.emit(RuntimeEvent::CaptureError { code });
                if self.status() != ActivityStatus::Idle {
                    self.set_status(ActivityStatus::Idle);
                }
            }
        }
    }

    fn status(&self) -> ActivityStatus {
        *self.status_tx.borrow()
    }

    fn set_status(&self, status: ActivityStatus) {
        let prev = self.status();
        if prev == status {
            return;
        }
        debug!("status {prev:?} -> {status:?}");
        self.status_tx.send_replace(status);
        self.emit(RuntimeEvent::Status { status });
    }

    async fn pace(&self, ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    fn emit(&self, event: RuntimeEvent) {
        if let Some(tx) = &self.runtime_tx {
            // Lagging or absent receivers never stall a turn.
            let _ = tx.send(event);
        }
    }
}
