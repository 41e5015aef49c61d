//! Chat events emitted by the session controller for the display.
//!
//! The controller publishes to a [`ChatEventBus`]; displays subscribe with a
//! [`ChatEventSink`]. Sinks are called synchronously in subscription order.
//! [`ChannelEventSink`] forwards events into a typed `mpsc` channel for
//! consumers that live on another task.
//!
//! ```text
//! ChatSessionController ──publish──▶ ChatEventBus
//!                                         │
//!                      ┌──────────────────┴──────────────────┐
//!                      ▼                                     ▼
//!              ConsoleChatView                        ChannelEventSink
//!              (prints bubbles)                       → mpsc::UnboundedReceiver
//! ```

use lingua_domain::{AnalysisReport, ChatMessage};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use tokio::sync::mpsc;

/// Events published during a session
#[derive(Debug, Clone, PartialEq)]
pub enum ChatEvent {
    /// A chat line or a system notice
    Message(ChatMessage),
    /// Word breakdown of the latest tutor reply
    Analysis(AnalysisReport),
    /// Speech for the latest reply was written to disk
    AudioSaved(PathBuf),
}

/// Receives chat events
pub trait ChatEventSink: Send + Sync {
    fn on_event(&self, event: &ChatEvent);
}

/// Observer list fanning events out to every subscribed sink
#[derive(Default)]
pub struct ChatEventBus {
    sinks: RwLock<Vec<Arc<dyn ChatEventSink>>>,
}

impl ChatEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, sink: Arc<dyn ChatEventSink>) {
        if let Ok(mut sinks) = self.sinks.write() {
            sinks.push(sink);
        }
    }

    pub fn publish(&self, event: &ChatEvent) {
        // Snapshot so a sink may subscribe from inside a callback.
        let sinks: Vec<Arc<dyn ChatEventSink>> = match self.sinks.read() {
            Ok(sinks) => sinks.clone(),
            Err(_) => return,
        };
        for sink in sinks {
            sink.on_event(event);
        }
    }

    pub fn publish_message(&self, message: ChatMessage) {
        self.publish(&ChatEvent::Message(message));
    }

    pub fn notice(&self, text: impl Into<String>) {
        self.publish_message(ChatMessage::notice(text));
    }

    pub fn subscriber_count(&self) -> usize {
        self.sinks.read().map(|s| s.len()).unwrap_or(0)
    }
}

/// Sink that forwards every event into an unbounded channel
pub struct ChannelEventSink {
    tx: mpsc::UnboundedSender<ChatEvent>,
}

impl ChannelEventSink {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ChatEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl ChatEventSink for ChannelEventSink {
    fn on_event(&self, event: &ChatEvent) {
        // Receiver gone means the display was closed; nothing left to do.
        let _ = self.tx.send(event.clone());
    }
}
