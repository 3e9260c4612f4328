mod kv;
mod topics;

pub use kv::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use topics::{next_topic_id, Topic, TopicStore, NEWS_KEY};
