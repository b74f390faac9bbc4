//! JSONL transcript writer for conversation events.
//!
//! Each [`ConversationEvent`] becomes one JSON line carrying the event
//! payload plus `type`, `run` and `timestamp` fields. The file is opened in
//! append mode so a chat session accumulates every run in one transcript.

use chorus_application::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use serde_json::Value;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::warn;

/// JSONL conversation logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
pub struct JsonlConversationLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
    /// Incremented on every `classification` event, which opens a run
    run: AtomicU64,
}

impl JsonlConversationLogger {
    /// Open (or create) the transcript at `path`.
    ///
    /// Creates parent directories as needed. Returns `None` if the file
    /// cannot be opened; a missing transcript never stops a run.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create conversation log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!(
                    "Could not open conversation log file {}: {}",
                    path.display(),
                    e
                );
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
            run: AtomicU64::new(0),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(&self, event: ConversationEvent) -> Value {
        let run = if event.event_type == "classification" {
            self.run.fetch_add(1, Ordering::Relaxed) + 1
        } else {
            self.run.load(Ordering::Relaxed)
        };
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        match event.payload {
            Value::Object(mut map) => {
                map.insert("type".to_string(), Value::from(event.event_type));
                map.insert("run".to_string(), Value::from(run));
                map.insert("timestamp".to_string(), Value::from(timestamp));
                Value::Object(map)
            }
            other => serde_json::json!({
                "type": event.event_type,
                "run": run,
                "timestamp": timestamp,
                "data": other,
            }),
        }
    }
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let Ok(line) = serde_json::to_string(&self.record(event)) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlConversationLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chorus_domain::{AgentRole, Classification, CollaborationMode, Turn, TurnKind};

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_record_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("chorus.jsonl");
        let logger = JsonlConversationLogger::new(&path).unwrap();

        logger.log(ConversationEvent::classification(
            "Compare tea and coffee",
            &Classification::classified(CollaborationMode::Independent),
        ));
        logger.log(ConversationEvent::turn(&Turn::new(
            TurnKind::Answer,
            AgentRole::Agent1,
            CollaborationMode::Independent,
            "Tea is calmer.",
        )));
        logger.log(ConversationEvent::synthesis("Both are fine.", 1));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0]["type"], "classification");
        assert_eq!(records[0]["mode"], "independent");
        assert_eq!(records[1]["type"], "turn");
        assert_eq!(records[1]["speaker"], "Agent 1");
        assert_eq!(records[2]["final_answer"], "Both are fine.");
        assert!(records.iter().all(|r| r["run"] == 1));
        assert!(records.iter().all(|r| r.get("timestamp").is_some()));
    }

    #[test]
    fn test_appends_across_loggers_and_counts_runs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chorus.jsonl");
        let classification = Classification::overridden(CollaborationMode::Support);

        let logger = JsonlConversationLogger::new(&path).unwrap();
        logger.log(ConversationEvent::classification("a", &classification));
        logger.log(ConversationEvent::classification("b", &classification));
        drop(logger);

        let logger = JsonlConversationLogger::new(&path).unwrap();
        logger.log(ConversationEvent::new("note", serde_json::json!("plain")));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records.len(), 3);
        assert_eq!(records[1]["run"], 2);
        assert_eq!(records[2]["data"], "plain");
        assert_eq!(records[2]["run"], 0);
    }
}
