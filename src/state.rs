//! Exercise lifecycle state — one persisted record, Pending → Processed.
//!
//! The record moves through three states: Absent (nothing recorded, or the
//! backing record is unreadable), Pending (recorded, awaiting a reply), and
//! Processed (feedback for this exact exercise has been sent). `save`
//! overwrites unconditionally; `mark_processed` is the only other mutation.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::StateError;
use crate::exercise::{Assignment, PRONOUNS, Tense};

/// Raw persistence for the single exercise record.
///
/// The record is read and written wholesale; backends do not interpret it.
#[async_trait]
pub trait StateBackend: Send + Sync {
    /// Read the stored record, `None` if absent.
    async fn read(&self) -> Result<Option<String>, StateError>;

    /// Replace the stored record.
    async fn write(&self, contents: &str) -> Result<(), StateError>;
}

/// File-backed store: JSON at a well-known path.
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl StateBackend for FileBackend {
    async fn read(&self) -> Result<Option<String>, StateError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, contents: &str) -> Result<(), StateError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, contents).await?;
        Ok(())
    }
}

/// In-memory store, for tests.
#[derive(Default)]
pub struct MemoryBackend {
    contents: Mutex<Option<String>>,
}

#[async_trait]
impl StateBackend for MemoryBackend {
    async fn read(&self) -> Result<Option<String>, StateError> {
        Ok(self.contents.lock().unwrap().clone())
    }

    async fn write(&self, contents: &str) -> Result<(), StateError> {
        *self.contents.lock().unwrap() = Some(contents.to_string());
        Ok(())
    }
}

/// The persisted exercise record, current shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseRecord {
    pub date: String,
    pub verb: String,
    pub assignments: Vec<Assignment>,
    #[serde(default)]
    pub reply_processed_at: Option<String>,
}

/// Legacy shape: a single shared tense instead of per-pronoun assignments.
#[derive(Debug, Clone, Deserialize)]
struct LegacyRecord {
    #[serde(default)]
    date: Option<String>,
    verb: String,
    tense: Tense,
    #[serde(default)]
    reply_processed_at: Option<String>,
}

/// Versioned union over the shapes the state file has carried.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredRecord {
    Current(ExerciseRecord),
    Legacy(LegacyRecord),
}

impl StoredRecord {
    /// Normalize to the current shape, synthesizing one assignment per
    /// pronoun (fixed order, shared tense) for legacy records.
    fn into_current(self) -> ExerciseRecord {
        match self {
            Self::Current(record) => record,
            Self::Legacy(legacy) => ExerciseRecord {
                date: legacy.date.unwrap_or_default(),
                verb: legacy.verb,
                assignments: PRONOUNS
                    .iter()
                    .map(|pronoun| Assignment {
                        pronoun: (*pronoun).to_string(),
                        tense: legacy.tense,
                    })
                    .collect(),
                reply_processed_at: legacy.reply_processed_at,
            },
        }
    }
}

/// Owns the single current-exercise record and its lifecycle transitions.
#[derive(Clone)]
pub struct ExerciseTracker {
    backend: Arc<dyn StateBackend>,
}

impl ExerciseTracker {
    pub fn new(backend: Arc<dyn StateBackend>) -> Self {
        Self { backend }
    }

    /// Load the record. Unreadable or malformed records degrade to `None`.
    async fn load(&self) -> Option<ExerciseRecord> {
        let raw = match self.backend.read().await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Unreadable exercise record, treating as absent: {e}");
                return None;
            }
        };
        match serde_json::from_str::<StoredRecord>(&raw) {
            Ok(stored) => Some(stored.into_current()),
            Err(e) => {
                warn!("Malformed exercise record, treating as absent: {e}");
                None
            }
        }
    }

    /// Record a new exercise, unconditionally replacing any prior one and
    /// clearing the processed marker. Date defaults to the current UTC day.
    pub async fn save(
        &self,
        verb: &str,
        assignments: &[Assignment],
        date: Option<String>,
    ) -> Result<(), StateError> {
        let record = ExerciseRecord {
            date: date.unwrap_or_else(|| Utc::now().format("%Y-%m-%d").to_string()),
            verb: verb.to_string(),
            assignments: assignments.to_vec(),
            reply_processed_at: None,
        };
        let json = serde_json::to_string_pretty(&record)?;
        self.backend.write(&json).await
    }

    /// The (verb, assignments) pair awaiting a reply, if any.
    pub async fn get_pending(&self) -> Option<(String, Vec<Assignment>)> {
        let record = self.load().await?;
        if record.reply_processed_at.is_some() {
            return None;
        }
        Some((record.verb, record.assignments))
    }

    /// Stamp the current exercise as processed. No-op when no record exists.
    pub async fn mark_processed(&self) -> Result<(), StateError> {
        let Some(mut record) = self.load().await else {
            return Ok(());
        };
        record.reply_processed_at =
            Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        let json = serde_json::to_string_pretty(&record)?;
        self.backend.write(&json).await
    }

    /// True iff a reply for the current exercise has already been processed.
    pub async fn is_processed(&self) -> bool {
        self.load()
            .await
            .is_some_and(|record| record.reply_processed_at.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> ExerciseTracker {
        ExerciseTracker::new(Arc::new(MemoryBackend::default()))
    }

    fn assignments() -> Vec<Assignment> {
        PRONOUNS
            .iter()
            .map(|p| Assignment {
                pronoun: (*p).to_string(),
                tense: Tense::Preterite,
            })
            .collect()
    }

    #[tokio::test]
    async fn save_then_get_pending_returns_exercise() {
        let tracker = tracker();
        tracker.save("llevar", &assignments(), None).await.unwrap();

        let (verb, got) = tracker.get_pending().await.unwrap();
        assert_eq!(verb, "llevar");
        assert_eq!(got, assignments());
        assert!(!tracker.is_processed().await);
    }

    #[tokio::test]
    async fn mark_processed_transitions_to_processed() {
        let tracker = tracker();
        tracker.save("comer", &assignments(), None).await.unwrap();
        tracker.mark_processed().await.unwrap();

        assert!(tracker.get_pending().await.is_none());
        assert!(tracker.is_processed().await);
    }

    #[tokio::test]
    async fn mark_processed_on_absent_state_is_a_noop() {
        let tracker = tracker();
        tracker.mark_processed().await.unwrap();

        assert!(tracker.get_pending().await.is_none());
        assert!(!tracker.is_processed().await);
    }

    #[tokio::test]
    async fn save_overwrites_and_resets_processed_marker() {
        let tracker = tracker();
        tracker.save("hablar", &assignments(), None).await.unwrap();
        tracker.mark_processed().await.unwrap();

        tracker.save("vivir", &assignments(), None).await.unwrap();
        let (verb, _) = tracker.get_pending().await.unwrap();
        assert_eq!(verb, "vivir");
        assert!(!tracker.is_processed().await);
    }

    #[tokio::test]
    async fn save_honors_explicit_date() {
        let backend = Arc::new(MemoryBackend::default());
        let tracker = ExerciseTracker::new(Arc::clone(&backend) as Arc<dyn StateBackend>);
        tracker
            .save("leer", &assignments(), Some("2026-03-01".to_string()))
            .await
            .unwrap();

        let raw = backend.read().await.unwrap().unwrap();
        let record: ExerciseRecord = serde_json::from_str(&raw).unwrap();
        assert_eq!(record.date, "2026-03-01");
    }

    #[tokio::test]
    async fn legacy_record_migrates_to_five_assignments() {
        let backend = Arc::new(MemoryBackend::default());
        backend
            .write(r#"{"date":"2026-01-05","verb":"llevar","tense":"Imperfect","reply_processed_at":null}"#)
            .await
            .unwrap();
        let tracker = ExerciseTracker::new(backend);

        let (verb, got) = tracker.get_pending().await.unwrap();
        assert_eq!(verb, "llevar");
        assert_eq!(got.len(), 5);
        for (assignment, pronoun) in got.iter().zip(PRONOUNS) {
            assert_eq!(assignment.pronoun, pronoun);
            assert_eq!(assignment.tense, Tense::Imperfect);
        }
    }

    #[tokio::test]
    async fn legacy_record_without_reply_marker_still_parses() {
        let backend = Arc::new(MemoryBackend::default());
        backend
            .write(r#"{"verb":"comer","tense":"Future"}"#)
            .await
            .unwrap();
        let tracker = ExerciseTracker::new(backend);

        let (verb, got) = tracker.get_pending().await.unwrap();
        assert_eq!(verb, "comer");
        assert!(got.iter().all(|a| a.tense == Tense::Future));
    }

    #[tokio::test]
    async fn corrupt_record_degrades_to_absent() {
        let backend = Arc::new(MemoryBackend::default());
        backend.write("{not json").await.unwrap();
        let tracker = ExerciseTracker::new(backend);

        assert!(tracker.get_pending().await.is_none());
        assert!(!tracker.is_processed().await);
        // A no-op: marking processed on a corrupt record must not fail.
        tracker.mark_processed().await.unwrap();
    }

    #[tokio::test]
    async fn record_missing_verb_degrades_to_absent() {
        let backend = Arc::new(MemoryBackend::default());
        backend
            .write(r#"{"date":"2026-01-05","tense":"Present"}"#)
            .await
            .unwrap();
        let tracker = ExerciseTracker::new(backend);

        assert!(tracker.get_pending().await.is_none());
    }

    #[tokio::test]
    async fn file_backend_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let tracker = ExerciseTracker::new(Arc::new(FileBackend::new(&path)));

        tracker.save("escribir", &assignments(), None).await.unwrap();
        assert!(path.exists());

        let (verb, _) = tracker.get_pending().await.unwrap();
        assert_eq!(verb, "escribir");

        tracker.mark_processed().await.unwrap();
        assert!(tracker.is_processed().await);
    }

    #[tokio::test]
    async fn file_backend_missing_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let tracker =
            ExerciseTracker::new(Arc::new(FileBackend::new(dir.path().join("missing.json"))));
        assert!(tracker.get_pending().await.is_none());
    }
}
