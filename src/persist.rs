//! Persistence collaborators: the session store and the round log sink.
//!
//! Both are traits so the UI shell can swap implementations; the
//! provided ones write JSON documents to disk. Timestamps serialize as
//! ISO-8601 strings and decode back to date values on load.
//!
//! From the engine's point of view these are fire-and-forget side
//! channels: a failed save or log append is reported to the caller and
//! logged, but it never rolls back or blocks the in-memory session.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::session::{RoundResult, Session};
use crate::validate::{repair, validate};

/// A persistence failure.
///
/// `Malformed` covers unparseable stored JSON: a hard failure the caller
/// may answer by discarding the document and reinitializing.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed session document: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Saves and loads the single active session.
pub trait SessionStore {
    /// Persist a snapshot, replacing any previous one.
    fn save(&self, session: &Session) -> Result<(), StoreError>;

    /// Load the persisted snapshot, or `None` if nothing was saved yet.
    fn load(&self) -> Result<Option<Session>, StoreError>;
}

/// Round-scoped append-only log, keyed by session id.
pub trait RoundLogSink {
    /// Append one round's result to the session's log.
    fn append(&self, session_id: &str, result: &RoundResult) -> Result<(), StoreError>;
}

/// `SessionStore` over a single JSON file.
///
/// Loaded snapshots are validated and structurally repaired before they
/// are returned, so drift in a stored document self-heals.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for JsonFileStore {
    fn save(&self, session: &Session) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(session)?;
        if let Err(err) = fs::write(&self.path, json) {
            log::warn!("session save to {} failed: {err}", self.path.display());
            return Err(err.into());
        }
        Ok(())
    }

    fn load(&self) -> Result<Option<Session>, StoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let session: Session = serde_json::from_str(&json)?;
        let issues = validate(&session);
        if issues.is_empty() {
            return Ok(Some(session));
        }

        for issue in &issues {
            log::warn!("loaded session has structural drift: {issue}");
        }
        Ok(Some(repair(session)))
    }
}

/// `RoundLogSink` writing one JSON line per round to
/// `<dir>/<session_id>.jsonl`.
#[derive(Clone, Debug)]
pub struct JsonlRoundLog {
    dir: PathBuf,
}

impl JsonlRoundLog {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl RoundLogSink for JsonlRoundLog {
    fn append(&self, session_id: &str, result: &RoundResult) -> Result<(), StoreError> {
        let line = serde_json::to_string(result)?;
        let path = self.dir.join(format!("{session_id}.jsonl"));
        let appended = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .and_then(|mut file| writeln!(file, "{line}"));
        if let Err(err) = appended {
            log::warn!("round log append to {} failed: {err}", path.display());
            return Err(err.into());
        }
        Ok(())
    }
}
