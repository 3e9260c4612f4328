//! Topic collection persisted under the `news` key.
//!
//! The persisted form is a JSON array of `{id, title, content}` objects,
//! byte-compatible with what the web client keeps in browser local
//! storage, so the two can share a store document. The collection is
//! ordered: insertion order is display order, and edits mutate in place.

use crate::store::{KeyValueStore, StoreError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Store key holding the serialized topic array.
pub const NEWS_KEY: &str = "news";

/// A forum topic.
///
/// `id` is the creation timestamp in milliseconds and is immutable once
/// assigned; edits overwrite `title` and `content` only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: i64,
    pub title: String,
    pub content: String,
}

/// Pick the id for a newly created topic.
///
/// Ids are creation timestamps, but two topics created within the same
/// millisecond must still differ, and a clock stepping backwards must not
/// produce an id below an existing one. Strictly greater than `last_id`
/// wins over wall-clock accuracy.
pub fn next_topic_id(now_ms: i64, last_id: Option<i64>) -> i64 {
    match last_id {
        Some(last) if now_ms <= last => last + 1,
        _ => now_ms,
    }
}

// ============================================================================
// TopicStore
// ============================================================================

/// Durable topic collection over the key-value port.
///
/// Persistence is total: `save` rewrites the full sequence after every
/// mutation, there is no incremental diffing. The in-memory working copy
/// is owned by the view; this type only moves it across the port.
#[derive(Clone)]
pub struct TopicStore {
    kv: Arc<dyn KeyValueStore>,
}

impl TopicStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Load the persisted collection.
    ///
    /// An absent key is an empty collection. Text that no longer parses as
    /// a topic array also loads as empty — there is no other authority to
    /// repair it from — with a warning; the stored text is left untouched
    /// until the next `save` overwrites it.
    pub fn load(&self) -> Result<Vec<Topic>, StoreError> {
        let raw = match self.kv.get(NEWS_KEY)? {
            Some(raw) => raw,
            None => return Ok(Vec::new()),
        };

        match serde_json::from_str::<Vec<Topic>>(&raw) {
            Ok(topics) => Ok(topics),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    stored_len = raw.len(),
                    "Persisted topics are malformed, resetting to an empty collection"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Serialize the full ordered sequence, overwriting prior content.
    pub fn save(&self, topics: &[Topic]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(topics)?;
        self.kv.set(NEWS_KEY, &raw)?;
        tracing::debug!(count = topics.len(), "Persisted topic collection");
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
