//! Conversation transcript as JSON Lines.
//!
//! One file per chat session, one record per line: the event fields, its
//! `type` tag and a UTC `timestamp`.

use lingua_application::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

const SESSION_SUFFIX: &str = "conversation.jsonl";

#[derive(Serialize)]
struct TranscriptLine<'a> {
    timestamp: String,
    #[serde(flatten)]
    event: &'a ConversationEvent,
}

/// Transcript writer shared by every turn of a session.
pub struct JsonlConversationLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlConversationLogger {
    /// Open a transcript at `path`, truncating any previous content.
    ///
    /// Returns `None`, after a warning, when the file cannot be created.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        match Self::open(path) {
            Ok(logger) => Some(logger),
            Err(e) => {
                warn!("Could not open transcript {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Open a new transcript in `dir` named after the local start time,
    /// e.g. `logs/20240102_030405.conversation.jsonl`.
    pub fn for_session(dir: impl AsRef<Path>) -> Option<Self> {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        Self::new(dir.as_ref().join(format!("{}.{}", stamp, SESSION_SUFFIX)))
    }

    fn open(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, event: &ConversationEvent) -> io::Result<()> {
        let line = TranscriptLine {
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            event,
        };
        let Ok(mut writer) = self.writer.lock() else {
            return Ok(());
        };
        serde_json::to_writer(&mut *writer, &line)?;
        writer.write_all(b"\n")?;
        // Flush per record so a crash keeps the finished turns
        writer.flush()
    }
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        if let Err(e) = self.append(&event) {
            warn!(
                "Dropped {} record from {}: {}",
                event.event_type(),
                self.path.display(),
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingua_domain::RoleCode;

    fn read_records(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_record_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.conversation.jsonl");
        let logger = JsonlConversationLogger::new(&path).unwrap();

        logger.log(ConversationEvent::prompt(
            RoleCode::Pro,
            "Ana",
            "Be kind. the user named Ana, says: 'hi'",
        ));
        logger.log(ConversationEvent::reply(
            "Hello Ana!",
            Some(Path::new("audios/2024_01_02_03_04_05.mp3")),
        ));
        logger.log(ConversationEvent::failure("timeout", "Model request timed out"));

        let records = read_records(&path);
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r["timestamp"].is_string()));

        assert_eq!(records[0]["type"], "prompt");
        assert_eq!(records[0]["role"], "pro");
        assert_eq!(records[0]["user"], "Ana");

        assert_eq!(records[1]["type"], "reply");
        assert_eq!(records[1]["chars"], 10);
        assert_eq!(records[1]["audio"], "audios/2024_01_02_03_04_05.mp3");

        assert_eq!(records[2]["type"], "turn_failed");
        assert_eq!(records[2]["kind"], "timeout");
    }

    #[test]
    fn test_records_are_readable_before_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("live.conversation.jsonl");
        let logger = JsonlConversationLogger::new(&path).unwrap();

        logger.log(ConversationEvent::reply("Hi", None));

        let records = read_records(&path);
        assert_eq!(records.len(), 1);
        assert!(records[0]["audio"].is_null());
        drop(logger);
    }

    #[test]
    fn test_for_session_creates_timestamped_file() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");

        let logger = JsonlConversationLogger::for_session(&logs).unwrap();

        let name = logger.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(logger.path().starts_with(&logs));
        assert!(name.ends_with(".conversation.jsonl"));
        // YYYYmmdd_HHMMSS
        assert_eq!(name.split('.').next().unwrap().len(), 15);
        assert!(logger.path().exists());
    }

    #[test]
    fn test_returns_none_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        assert!(JsonlConversationLogger::new(blocker.join("log.jsonl")).is_none());
        assert!(JsonlConversationLogger::for_session(&blocker).is_none());
    }
}
