//! In-memory implementation of link repository.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::Link;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Link storage in a process-local map.
///
/// Used when no database is configured, and by the HTTP integration tests.
/// Contents are lost on restart.
#[derive(Default)]
pub struct MemoryLinkRepository {
    links: RwLock<HashMap<String, Link>>,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn exists(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.links.read().await.contains_key(code))
    }

    async fn create(&self, link: Link) -> Result<bool, AppError> {
        let previous = self.links.write().await.insert(link.short.clone(), link);
        Ok(previous.is_some())
    }

    async fn get(&self, code: &str) -> Result<Option<Link>, AppError> {
        Ok(self.links.read().await.get(code).cloned())
    }

    async fn delete(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.links.write().await.remove(code).is_some())
    }

    async fn list_by_owner(&self, user_id: &str) -> Result<Vec<Link>, AppError> {
        let mut links: Vec<Link> = self
            .links
            .read()
            .await
            .values()
            .filter(|link| link.is_owned_by(user_id))
            .cloned()
            .collect();

        links.sort_by(|a, b| a.short.cmp(&b.short));
        Ok(links)
    }

    async fn health_check(&self) -> bool {
        true
    }
}
