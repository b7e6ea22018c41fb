//! Repository trait for short link data access.

use crate::domain::entities::Link;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the short code → link mapping.
///
/// Implementations must be safe to call from concurrent request handlers.
/// [`LinkRepository::create`] is an upsert: it never fails because a code is
/// taken, and callers decide beforehand whether overwriting is allowed.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - in-process map
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Returns true if a link with this code exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn exists(&self, code: &str) -> Result<bool, AppError>;

    /// Inserts or replaces a link.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if an entry with the same code was replaced
    /// - `Ok(false)` if the code was new
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create(&self, link: Link) -> Result<bool, AppError>;

    /// Finds a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn get(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Removes a link.
    ///
    /// Returns `Ok(true)` if a link was removed, `Ok(false)` if none existed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn delete(&self, code: &str) -> Result<bool, AppError>;

    /// Lists all links owned by `user_id`, ordered by short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list_by_owner(&self, user_id: &str) -> Result<Vec<Link>, AppError>;

    /// Checks whether the storage backend is reachable.
    async fn health_check(&self) -> bool;
}
