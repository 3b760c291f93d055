//! Append-only JSONL audit logger.
//!
//! Uses JSON Lines format (.jsonl):
//! - Each line is a complete JSON object
//! - Partial file corruption only affects individual lines
//! - The trail can be read while the agent is still writing
//!
//! The file is opened in append mode and never truncated; records are never
//! rewritten or deleted here.

use crate::error::AuditResult;
use crate::payload::AuditPayload;
use chrono::{SecondsFormat, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Default location of the audit trail.
pub const DEFAULT_AUDIT_PATH: &str = "logs/trade_audit.jsonl";

/// A single persisted audit record.
///
/// Fields are declared in alphabetical order so the serialized keys come out
/// sorted, same as the payload's own keys; sorted records diff and grep
/// cleanly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Lifecycle event name (see [`crate::events`]).
    pub event: String,
    /// Structured event payload.
    pub payload: Map<String, Value>,
    /// ISO-8601 UTC timestamp captured when `log` was called.
    pub ts: String,
}

/// Append-only JSONL sink for trade lifecycle events.
///
/// One blocking append per `log` call. The file handle lives behind a mutex
/// so concurrent callers cannot interleave partial lines; the append itself
/// is the only I/O this type ever performs.
pub struct TradeAuditLogger {
    path: PathBuf,
    file: Mutex<File>,
}

impl TradeAuditLogger {
    /// Open (or create) the audit log at `path` for appending.
    ///
    /// Missing parent directories are created, so setup is idempotent.
    pub fn new(path: impl AsRef<Path>) -> AuditResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        // Append mode - won't truncate existing records.
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        info!(path = %path.display(), "Opened trade audit log (append mode)");

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    /// Open the audit log at [`DEFAULT_AUDIT_PATH`].
    pub fn open_default() -> AuditResult<Self> {
        Self::new(DEFAULT_AUDIT_PATH)
    }

    /// Where the trail lives.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one event record and flush it.
    ///
    /// The timestamp is captured here, at call time. Any I/O or encoding
    /// failure propagates: a record that could not be persisted must never
    /// look persisted.
    pub fn log(&self, event: &str, payload: Map<String, Value>) -> AuditResult<()> {
        let record = AuditRecord {
            event: event.to_string(),
            payload,
            ts: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        };

        let mut line = serde_json::to_string(&record)?;
        line.push('\n');

        let mut file = self.file.lock();
        file.write_all(line.as_bytes())?;
        file.flush()?;
        Ok(())
    }

    /// Normalize `value` via [`AuditPayload`] and append it.
    pub fn log_event(&self, event: &str, value: &impl AuditPayload) -> AuditResult<()> {
        self.log(event, value.to_payload())
    }
}
