//! Text-to-speech adapters

mod elevenlabs;

pub use elevenlabs::{ElevenLabsSettings, ElevenLabsSynthesizer, VoiceSettings};
