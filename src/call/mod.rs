//! Test-call control for assistants
//!
//! Media and signalling live inside the telephony provider's SDK. This module
//! only owns the lifecycle around it:
//!
//! ```text
//! Idle -> Connecting -> Connected -> Ended -> Idle
//!              \_______________________/
//!                  (error or hang-up)
//! ```
//!
//! A [`CallTransport`] implementation wraps the SDK. [`CallController`]
//! drives it and rejects actions that make no sense in the current state.

use std::fmt;

use async_trait::async_trait;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tokio::sync::mpsc;

/// Events pushed by the transport for the lifetime of one call
pub type CallEventStream = mpsc::Receiver<CallEvent>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallState {
    #[default]
    Idle,
    Connecting,
    Connected,
    Ended,
}

impl fmt::Display for CallState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CallState::Idle => "idle",
            CallState::Connecting => "connecting",
            CallState::Connected => "connected",
            CallState::Ended => "ended",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallEvent {
    CallStart,
    CallEnd,
    Error(String),
}

/// Speech-to-text settings sent with a call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriberOverride {
    pub provider: String,
    pub language: String,
}

impl Default for TranscriberOverride {
    fn default() -> Self {
        Self {
            provider: "deepgram".to_string(),
            language: "en-US".to_string(),
        }
    }
}

/// Per-call overrides layered on top of the stored assistant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallOverrides {
    pub transcriber: TranscriberOverride,
    pub recording_enabled: bool,
    /// Values substituted into `{{placeholders}}` in prompts and messages
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub variable_values: Map<String, Value>,
}

impl Default for CallOverrides {
    fn default() -> Self {
        Self {
            transcriber: TranscriberOverride::default(),
            recording_enabled: false,
            variable_values: Map::new(),
        }
    }
}

impl CallOverrides {
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variable_values.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CallError {
    #[error("Cannot {action} while the call is {state}")]
    InvalidState {
        action: &'static str,
        state: CallState,
    },

    #[error("Call transport error: {0}")]
    Transport(String),
}

/// Wrapper around a telephony SDK
#[async_trait]
pub trait CallTransport: Send + Sync {
    /// Place a call to `assistant_id`; events arrive on the returned stream
    async fn start(
        &self,
        assistant_id: &str,
        overrides: &CallOverrides,
    ) -> Result<CallEventStream, CallError>;

    /// Hang up. Must be safe to call when no call is active.
    async fn stop(&self) -> Result<(), CallError>;

    async fn set_muted(&self, muted: bool) -> Result<(), CallError>;

    async fn set_speaker(&self, enabled: bool) -> Result<(), CallError>;
}

/// Drives one [`CallTransport`] through the call lifecycle
pub struct CallController<T: CallTransport> {
    transport: T,
    state: CallState,
    events: Option<CallEventStream>,
    muted: bool,
    speaker: bool,
    last_error: Option<String>,
}

impl<T: CallTransport> CallController<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: CallState::Idle,
            events: None,
            muted: false,
            speaker: true,
            last_error: None,
        }
    }

    pub fn state(&self) -> CallState {
        self.state
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_speaker_on(&self) -> bool {
        self.speaker
    }

    /// Message from the last `Error` event or failed start
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Start a call. Allowed from `Idle` or `Ended`.
    pub async fn start(
        &mut self,
        assistant_id: &str,
        overrides: &CallOverrides,
    ) -> Result<(), CallError> {
        if !matches!(self.state, CallState::Idle | CallState::Ended) {
            return Err(CallError::InvalidState {
                action: "start a call",
                state: self.state,
            });
        }

        self.state = CallState::Connecting;
        self.muted = false;
        self.speaker = true;
        self.last_error = None;
        debug!("Starting call with assistant {}", assistant_id);

        match self.transport.start(assistant_id, overrides).await {
            Ok(events) => {
                self.events = Some(events);
                Ok(())
            }
            Err(e) => {
                warn!("Call failed to start: {}", e);
                self.state = CallState::Ended;
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Apply one transport event and return the resulting state
    pub fn handle_event(&mut self, event: CallEvent) -> CallState {
        match event {
            CallEvent::CallStart if self.state == CallState::Connecting => {
                self.state = CallState::Connected;
            }
            CallEvent::CallStart => {
                debug!("Ignoring call-start while {}", self.state);
            }
            CallEvent::CallEnd => {
                self.finish();
            }
            CallEvent::Error(message) => {
                warn!("Call error: {}", message);
                self.last_error = Some(message);
                self.finish();
            }
        }
        self.state
    }

    /// Wait for the next transport event and apply it.
    ///
    /// Returns `None` once no call is running. A stream that closes without
    /// a `CallEnd` still ends the call.
    pub async fn pump(&mut self) -> Option<CallState> {
        let events = self.events.as_mut()?;
        match events.recv().await {
            Some(event) => Some(self.handle_event(event)),
            None => {
                self.finish();
                Some(self.state)
            }
        }
    }

    /// Hang up; the call is `Ended` afterwards even if the transport errors
    pub async fn end(&mut self) -> Result<(), CallError> {
        let result = self.transport.stop().await;
        self.finish();
        result
    }

    /// Return to `Idle` after a call has ended
    pub fn reset(&mut self) -> Result<(), CallError> {
        match self.state {
            CallState::Idle | CallState::Ended => {
                self.state = CallState::Idle;
                self.last_error = None;
                Ok(())
            }
            state => Err(CallError::InvalidState {
                action: "reset",
                state,
            }),
        }
    }

    pub async fn toggle_mute(&mut self) -> Result<bool, CallError> {
        self.require_connected("toggle mute")?;
        let muted = !self.muted;
        self.transport.set_muted(muted).await?;
        self.muted = muted;
        Ok(muted)
    }

    pub async fn toggle_speaker(&mut self) -> Result<bool, CallError> {
        self.require_connected("toggle the speaker")?;
        let speaker = !self.speaker;
        self.transport.set_speaker(speaker).await?;
        self.speaker = speaker;
        Ok(speaker)
    }

    fn require_connected(&self, action: &'static str) -> Result<(), CallError> {
        if self.state == CallState::Connected {
            Ok(())
        } else {
            Err(CallError::InvalidState {
                action,
                state: self.state,
            })
        }
    }

    fn finish(&mut self) {
        self.state = CallState::Ended;
        self.events = None;
        self.muted = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::Mutex;

    /// Transport whose event sender is handed back to the test
    #[derive(Default, Clone)]
    struct FakeTransport {
        sender: Arc<Mutex<Option<mpsc::Sender<CallEvent>>>>,
        started_with: Arc<Mutex<Option<(String, CallOverrides)>>>,
        stops: Arc<Mutex<usize>>,
        fail_start: bool,
    }

    impl FakeTransport {
        fn sender(&self) -> mpsc::Sender<CallEvent> {
            self.sender.lock().unwrap().clone().unwrap()
        }
    }

    #[async_trait]
    impl CallTransport for FakeTransport {
        async fn start(
            &self,
            assistant_id: &str,
            overrides: &CallOverrides,
        ) -> Result<CallEventStream, CallError> {
            if self.fail_start {
                return Err(CallError::Transport("microphone unavailable".to_string()));
            }
            let (tx, rx) = mpsc::channel(8);
            *self.sender.lock().unwrap() = Some(tx);
            *self.started_with.lock().unwrap() =
                Some((assistant_id.to_string(), overrides.clone()));
            Ok(rx)
        }

        async fn stop(&self) -> Result<(), CallError> {
            *self.stops.lock().unwrap() += 1;
            self.sender.lock().unwrap().take();
            Ok(())
        }

        async fn set_muted(&self, _muted: bool) -> Result<(), CallError> {
            Ok(())
        }

        async fn set_speaker(&self, _enabled: bool) -> Result<(), CallError> {
            Ok(())
        }
    }

    #[test]
    fn test_overrides_wire_shape() {
        let overrides = CallOverrides::default().with_variable("customerName", "Sam");
        let json = serde_json::to_value(&overrides).unwrap();

        assert_eq!(json["recordingEnabled"], false);
        assert_eq!(json["transcriber"]["language"], "en-US");
        assert_eq!(json["variableValues"]["customerName"], "Sam");
    }

    #[tokio::test]
    async fn test_full_lifecycle() {
        let transport = FakeTransport::default();
        let mut call = CallController::new(transport.clone());
        assert_eq!(call.state(), CallState::Idle);

        call.start("asst-1", &CallOverrides::default())
            .await
            .unwrap();
        assert_eq!(call.state(), CallState::Connecting);
        assert_eq!(
            transport.started_with.lock().unwrap().as_ref().unwrap().0,
            "asst-1"
        );

        transport.sender().send(CallEvent::CallStart).await.unwrap();
        assert_eq!(call.pump().await, Some(CallState::Connected));

        transport.sender().send(CallEvent::CallEnd).await.unwrap();
        assert_eq!(call.pump().await, Some(CallState::Ended));
        assert_eq!(call.pump().await, None);

        call.reset().unwrap();
        assert_eq!(call.state(), CallState::Idle);
    }

    #[tokio::test]
    async fn test_cannot_start_twice() {
        let mut call = CallController::new(FakeTransport::default());
        call.start("asst-1", &CallOverrides::default())
            .await
            .unwrap();

        let err = call
            .start("asst-1", &CallOverrides::default())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            CallError::InvalidState {
                action: "start a call",
                state: CallState::Connecting
            }
        );
    }

    #[tokio::test]
    async fn test_failed_start_ends_call() {
        let transport = FakeTransport {
            fail_start: true,
            ..Default::default()
        };
        let mut call = CallController::new(transport);

        assert!(call.start("asst-1", &CallOverrides::default()).await.is_err());
        assert_eq!(call.state(), CallState::Ended);
        assert_eq!(
            call.last_error(),
            Some("Call transport error: microphone unavailable")
        );
    }

    #[tokio::test]
    async fn test_error_event_ends_call() {
        let mut call = CallController::new(FakeTransport::default());
        call.start("asst-1", &CallOverrides::default())
            .await
            .unwrap();

        let state = call.handle_event(CallEvent::Error("ice failed".to_string()));
        assert_eq!(state, CallState::Ended);
        assert_eq!(call.last_error(), Some("ice failed"));
    }

    #[tokio::test]
    async fn test_toggles_only_while_connected() {
        let mut call = CallController::new(FakeTransport::default());
        assert!(call.toggle_mute().await.is_err());

        call.start("asst-1", &CallOverrides::default())
            .await
            .unwrap();
        assert!(call.toggle_speaker().await.is_err());

        call.handle_event(CallEvent::CallStart);
        assert!(call.toggle_mute().await.unwrap());
        assert!(!call.toggle_speaker().await.unwrap());
        assert!(call.is_muted());
        assert!(!call.is_speaker_on());
    }

    #[tokio::test]
    async fn test_end_stops_transport() {
        let transport = FakeTransport::default();
        let mut call = CallController::new(transport.clone());
        call.start("asst-1", &CallOverrides::default())
            .await
            .unwrap();
        call.handle_event(CallEvent::CallStart);

        call.end().await.unwrap();
        assert_eq!(call.state(), CallState::Ended);
        assert_eq!(*transport.stops.lock().unwrap(), 1);
        assert!(!call.is_muted());
    }

    #[tokio::test]
    async fn test_closed_stream_ends_call() {
        let transport = FakeTransport::default();
        let mut call = CallController::new(transport.clone());
        call.start("asst-1", &CallOverrides::default())
            .await
            .unwrap();

        transport.sender.lock().unwrap().take();
        assert_eq!(call.pump().await, Some(CallState::Ended));
    }

    #[test]
    fn test_reset_rejected_mid_call() {
        let mut call = CallController::new(FakeTransport::default());
        call.state = CallState::Connected;
        assert!(call.reset().is_err());
    }
}
