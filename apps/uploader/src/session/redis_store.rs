use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client};
use tracing::{debug, info};

use super::SessionStore;
use crate::errors::UploadError;

/// Redis-backed session. Keys live under `session:{id}:` and expire with the
/// session TTL, which is refreshed on every write.
#[derive(Clone)]
pub struct RedisSessionStore {
    client: Client,
    session_id: String,
    ttl: Duration,
}

impl RedisSessionStore {
    pub fn new(redis_url: &str, session_id: impl Into<String>, ttl: Duration) -> Result<Self, UploadError> {
        let client = Client::open(redis_url)?;
        let session_id = session_id.into();
        info!("Redis session store initialized (session: {session_id})");
        Ok(Self {
            client,
            session_id,
            ttl,
        })
    }

    fn namespaced(&self, key: &str) -> String {
        session_key(&self.session_id, key)
    }

    async fn connection(&self) -> Result<MultiplexedConnection, UploadError> {
        Ok(self.client.get_multiplexed_async_connection().await?)
    }
}

fn session_key(session_id: &str, key: &str) -> String {
    format!("session:{session_id}:{key}")
}

/// SCAN pattern matching every key of one session and nothing else.
fn session_pattern(session_id: &str) -> String {
    session_key(&escape_glob(session_id), "*")
}

fn escape_glob(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, UploadError> {
        let mut conn = self.connection().await?;
        let value: Option<String> = redis::cmd("GET")
            .arg(self.namespaced(key))
            .query_async(&mut conn)
            .await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), UploadError> {
        let mut conn = self.connection().await?;
        let ttl_secs = self.ttl.as_secs().max(1);
        redis::cmd("SET")
            .arg(self.namespaced(key))
            .arg(value)
            .arg("EX")
            .arg(ttl_secs)
            .query_async::<_, ()>(&mut conn)
            .await?;
        debug!("Stored '{key}' for session {} (ttl {ttl_secs}s)", self.session_id);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), UploadError> {
        let mut conn = self.connection().await?;
        redis::cmd("DEL")
            .arg(self.namespaced(key))
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), UploadError> {
        let mut conn = self.connection().await?;
        let keys: Vec<String> = {
            let mut iter = conn
                .scan_match::<_, String>(session_pattern(&self.session_id))
                .await?;
            let mut keys = Vec::new();
            while let Some(key) = iter.next_item().await {
                keys.push(key);
            }
            keys
        };
        if !keys.is_empty() {
            redis::cmd("DEL")
                .arg(&keys)
                .query_async::<_, ()>(&mut conn)
                .await?;
        }
        info!("Cleared {} key(s) for session {}", keys.len(), self.session_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::RESULTS_KEY;

    #[test]
    fn test_keys_are_namespaced_by_session() {
        assert_eq!(session_key("abc", "resumeResults"), "session:abc:resumeResults");
        assert_ne!(session_key("a", "k"), session_key("b", "k"));
    }

    #[test]
    fn test_pattern_escapes_glob_characters() {
        assert_eq!(session_pattern("abc"), "session:abc:*");
        assert_eq!(session_pattern("a*"), r"session:a\*:*");
        assert_eq!(session_pattern(r"x?[1]\"), r"session:x\?\[1\]\\:*");
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let result = RedisSessionStore::new("not a url", "s", Duration::from_secs(60));
        assert!(matches!(result, Err(UploadError::Storage(_))));
    }

    fn live_store(session_id: &str) -> Option<RedisSessionStore> {
        let url = std::env::var("REDIS_URL").ok().filter(|u| !u.is_empty())?;
        Some(RedisSessionStore::new(&url, session_id, Duration::from_secs(60)).unwrap())
    }

    #[tokio::test]
    async fn test_live_store_round_trip_and_clear() {
        let id = format!("uploader-test-{}", std::process::id());
        let Some(store) = live_store(&id) else {
            eprintln!("REDIS_URL not set; skipping");
            return;
        };

        assert_eq!(store.get(RESULTS_KEY).await.unwrap(), None);
        store.set(RESULTS_KEY, "{}").await.unwrap();
        store.set("other", "x").await.unwrap();
        assert_eq!(store.get(RESULTS_KEY).await.unwrap().as_deref(), Some("{}"));

        store.remove("other").await.unwrap();
        assert_eq!(store.get("other").await.unwrap(), None);

        store.clear().await.unwrap();
        assert_eq!(store.get(RESULTS_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_live_clear_leaves_other_sessions() {
        let pid = std::process::id();
        let wildcard = format!("glob{pid}*");
        let neighbour = format!("glob{pid}abc");
        let (Some(wild), Some(other)) = (live_store(&wildcard), live_store(&neighbour)) else {
            eprintln!("REDIS_URL not set; skipping");
            return;
        };

        wild.set(RESULTS_KEY, "mine").await.unwrap();
        other.set(RESULTS_KEY, "theirs").await.unwrap();

        wild.clear().await.unwrap();

        assert_eq!(wild.get(RESULTS_KEY).await.unwrap(), None);
        assert_eq!(other.get(RESULTS_KEY).await.unwrap().as_deref(), Some("theirs"));
        other.clear().await.unwrap();
    }
}
