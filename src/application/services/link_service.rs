//! Link creation, resolution and deletion with ownership rules.

use std::sync::Arc;

use crate::domain::entities::{Link, LinkRequest, Role, User};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{CodeGenerator, validate_code};
use crate::utils::target_url::validate_target_url;
use serde_json::json;

/// Result of a successful create.
#[derive(Debug, Clone)]
pub struct CreatedLink {
    pub link: Link,
    /// True if an existing link with the same code was replaced.
    pub existed: bool,
}

/// Service for creating, resolving and deleting short links.
///
/// Authorization is two-tiered: callers may always manage their own links,
/// and global roles on `role_resource` are required to overwrite or delete
/// links owned by someone else.
pub struct LinkService {
    link_repository: Arc<dyn LinkRepository>,
    code_generator: CodeGenerator,
    role_resource: String,
}

impl LinkService {
    /// Creates a new link service.
    ///
    /// # Arguments
    ///
    /// - `link_repository` - storage backend
    /// - `code_generator` - random source for generated codes, owned by this service
    /// - `role_resource` - token resource whose roles grant elevated permissions
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        code_generator: CodeGenerator,
        role_resource: impl Into<String>,
    ) -> Self {
        Self {
            link_repository,
            code_generator,
            role_resource: role_resource.into(),
        }
    }

    pub fn role_resource(&self) -> &str {
        &self.role_resource
    }

    /// Creates or overwrites a link on behalf of `caller`.
    ///
    /// # Flow
    ///
    /// 1. A requested code that already exists may only be replaced by its
    ///    owner or by a holder of [`Role::Overwrite`]
    /// 2. An empty code is replaced by a generated one
    /// 3. The code and the target URL are validated
    /// 4. The link is upserted with `caller` as owner
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] if the code belongs to another user and
    /// the caller lacks the overwrite role.
    /// Returns [`AppError::Validation`] for an invalid code or target URL.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn create_link(
        &self,
        request: LinkRequest,
        caller: &User,
    ) -> Result<CreatedLink, AppError> {
        let LinkRequest { short, long } = request;

        let short = if short.is_empty() {
            self.code_generator
                .generate_unique(self.link_repository.as_ref())
                .await?
        } else {
            if let Some(existing) = self.link_repository.get(&short).await?
                && !self.can_overwrite(&existing, caller)
            {
                tracing::info!(
                    code = %short,
                    user = %caller.id,
                    owner = %existing.user_id,
                    "Overwrite of foreign link denied"
                );
                return Err(AppError::forbidden(
                    "Short link already exists and belongs to another user",
                    json!({ "code": short }),
                ));
            }
            short
        };

        validate_code(&short)?;

        let long = validate_target_url(&long).map_err(|e| {
            AppError::bad_request("Invalid target URL", json!({ "reason": e.to_string() }))
        })?;

        let link = Link::new(short, long, caller.id.as_str(), caller.display_name());
        let existed = self.link_repository.create(link.clone()).await?;

        if existed {
            metrics::counter!("links_overwritten_total").increment(1);
        } else {
            metrics::counter!("links_created_total").increment(1);
        }
        tracing::info!(code = %link.short, user = %caller.id, existed, "Link saved");

        Ok(CreatedLink { link, existed })
    }

    /// Deletes a link on behalf of `caller`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is unknown.
    /// Returns [`AppError::Forbidden`] unless the caller owns the link or holds
    /// [`Role::Delete`].
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn delete_link(&self, code: &str, caller: &User) -> Result<(), AppError> {
        let link = self.resolve(code).await?;

        if !link.is_owned_by(&caller.id) && !caller.has_role(&self.role_resource, Role::Delete) {
            tracing::info!(code, user = %caller.id, owner = %link.user_id, "Delete of foreign link denied");
            return Err(AppError::forbidden(
                "Not allowed to delete this link",
                json!({ "code": code }),
            ));
        }

        // A concurrent delete may have removed it already; that is still a success.
        let removed = self.link_repository.delete(code).await?;
        if removed {
            metrics::counter!("links_deleted_total").increment(1);
        }
        tracing::info!(code, user = %caller.id, removed, "Link deleted");

        Ok(())
    }

    /// Retrieves a link for redirection.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is unknown.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn resolve(&self, code: &str) -> Result<Link, AppError> {
        self.link_repository
            .get(code)
            .await?
            .ok_or_else(|| AppError::not_found("Unknown link", json!({ "code": code })))
    }

    /// Looks up a link without treating absence as an error.
    pub async fn find(&self, code: &str) -> Result<Option<Link>, AppError> {
        self.link_repository.get(code).await
    }

    /// Lists every link owned by `caller`.
    pub async fn list_owned(&self, caller: &User) -> Result<Vec<Link>, AppError> {
        self.link_repository.list_by_owner(&caller.id).await
    }

    /// Reports whether the link store is reachable.
    pub async fn health_check(&self) -> bool {
        self.link_repository.health_check().await
    }

    fn can_overwrite(&self, existing: &Link, caller: &User) -> bool {
        existing.is_owned_by(&caller.id) || caller.has_role(&self.role_resource, Role::Overwrite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use crate::utils::code_generator::SHORT_CODE_REGEX;
    use std::collections::{HashMap, HashSet};

    const RESOURCE: &str = "short";

    fn user(id: &str, roles: &[Role]) -> User {
        let mut role_map = HashMap::new();
        role_map.insert(
            RESOURCE.to_string(),
            roles.iter().map(|r| r.as_str().to_string()).collect(),
        );

        User {
            id: id.to_string(),
            name: String::new(),
            given_name: String::new(),
            family_name: String::new(),
            username: id.to_string(),
            email: String::new(),
            scopes: HashSet::new(),
            roles: role_map,
        }
    }

    fn service(repo: MockLinkRepository) -> LinkService {
        LinkService::new(Arc::new(repo), CodeGenerator::from_seed(1), RESOURCE)
    }

    fn request(short: &str, long: &str) -> LinkRequest {
        LinkRequest {
            short: short.to_string(),
            long: long.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_with_generated_code() {
        let mut repo = MockLinkRepository::new();
        repo.expect_exists().times(1).returning(|_| Ok(false));
        repo.expect_create()
            .withf(|link| link.long == "https://example.com" && link.user_id == "alice")
            .times(1)
            .returning(|_| Ok(false));

        let created = service(repo)
            .create_link(request("", "https://example.com"), &user("alice", &[]))
            .await
            .unwrap();

        assert!(!created.existed);
        assert_eq!(created.link.short.len(), 6);
        assert!(SHORT_CODE_REGEX.is_match(&created.link.short));
        assert_eq!(created.link.user_name, "alice");
    }

    #[tokio::test]
    async fn test_create_with_custom_code() {
        let mut repo = MockLinkRepository::new();
        repo.expect_get()
            .withf(|code| code == "abc")
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_create()
            .withf(|link| link.short == "abc")
            .times(1)
            .returning(|_| Ok(false));

        let created = service(repo)
            .create_link(request("abc", "https://x.com"), &user("alice", &[]))
            .await
            .unwrap();

        assert_eq!(created.link.short, "abc");
        assert!(!created.existed);
    }

    #[tokio::test]
    async fn test_overwrite_by_owner() {
        let mut repo = MockLinkRepository::new();
        repo.expect_get()
            .returning(|_| Ok(Some(Link::new("abc", "https://x.com", "alice", "alice"))));
        repo.expect_create().times(1).returning(|_| Ok(true));

        let created = service(repo)
            .create_link(request("abc", "https://y.com"), &user("alice", &[]))
            .await
            .unwrap();

        assert!(created.existed);
        assert_eq!(created.link.long, "https://y.com");
    }

    #[tokio::test]
    async fn test_overwrite_by_other_user_is_forbidden() {
        let mut repo = MockLinkRepository::new();
        repo.expect_get()
            .returning(|_| Ok(Some(Link::new("abc", "https://x.com", "alice", "alice"))));
        repo.expect_create().times(0);

        let result = service(repo)
            .create_link(request("abc", "https://y.com"), &user("bob", &[Role::Create]))
            .await;

        assert!(matches!(result, Err(AppError::Forbidden { .. })));
    }

    #[tokio::test]
    async fn test_overwrite_with_role() {
        let mut repo = MockLinkRepository::new();
        repo.expect_get()
            .returning(|_| Ok(Some(Link::new("abc", "https://x.com", "alice", "alice"))));
        repo.expect_create()
            .withf(|link| link.user_id == "bob")
            .times(1)
            .returning(|_| Ok(true));

        let created = service(repo)
            .create_link(
                request("abc", "https://y.com"),
                &user("bob", &[Role::Overwrite]),
            )
            .await
            .unwrap();

        assert!(created.existed);
        assert_eq!(created.link.user_id, "bob");
    }

    #[tokio::test]
    async fn test_overwrite_role_on_other_resource_does_not_count() {
        let mut repo = MockLinkRepository::new();
        repo.expect_get()
            .returning(|_| Ok(Some(Link::new("abc", "https://x.com", "alice", "alice"))));

        let mut bob = user("bob", &[]);
        bob.roles.insert(
            "other".to_string(),
            [Role::Overwrite.as_str().to_string()].into_iter().collect(),
        );

        let result = service(repo)
            .create_link(request("abc", "https://y.com"), &bob)
            .await;

        assert!(matches!(result, Err(AppError::Forbidden { .. })));
    }

    #[tokio::test]
    async fn test_create_invalid_code() {
        let mut repo = MockLinkRepository::new();
        repo.expect_get().returning(|_| Ok(None));
        repo.expect_create().times(0);

        let result = service(repo)
            .create_link(request("-bad-", "https://x.com"), &user("alice", &[]))
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_create_invalid_url() {
        let mut repo = MockLinkRepository::new();
        repo.expect_get().returning(|_| Ok(None));
        repo.expect_create().times(0);

        let svc = service(repo);
        let alice = user("alice", &[]);

        for long in ["", "   ", "not a url"] {
            let result = svc.create_link(request("abc", long), &alice).await;
            assert!(
                matches!(result, Err(AppError::Validation { .. })),
                "{long:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_create_stores_trimmed_url() {
        let mut repo = MockLinkRepository::new();
        repo.expect_get().returning(|_| Ok(None));
        repo.expect_create()
            .withf(|link| link.long == "https://x.com/a")
            .times(1)
            .returning(|_| Ok(false));

        let created = service(repo)
            .create_link(request("abc", "  https://x.com/a  "), &user("alice", &[]))
            .await
            .unwrap();

        assert_eq!(created.link.long, "https://x.com/a");
    }

    #[tokio::test]
    async fn test_delete_unknown_code() {
        let mut repo = MockLinkRepository::new();
        repo.expect_get().returning(|_| Ok(None));
        repo.expect_delete().times(0);

        let result = service(repo)
            .delete_link("nope", &user("alice", &[Role::Delete]))
            .await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_by_owner() {
        let mut repo = MockLinkRepository::new();
        repo.expect_get()
            .returning(|_| Ok(Some(Link::new("abc", "https://x.com", "alice", "alice"))));
        repo.expect_delete()
            .withf(|code| code == "abc")
            .times(1)
            .returning(|_| Ok(true));

        let result = service(repo).delete_link("abc", &user("alice", &[])).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_delete_by_other_user_is_forbidden() {
        let mut repo = MockLinkRepository::new();
        repo.expect_get()
            .returning(|_| Ok(Some(Link::new("abc", "https://x.com", "alice", "alice"))));
        repo.expect_delete().times(0);

        let result = service(repo)
            .delete_link("abc", &user("bob", &[Role::Create, Role::Overwrite]))
            .await;

        assert!(matches!(result, Err(AppError::Forbidden { .. })));
    }

    #[tokio::test]
    async fn test_delete_with_role() {
        let mut repo = MockLinkRepository::new();
        repo.expect_get()
            .returning(|_| Ok(Some(Link::new("abc", "https://x.com", "alice", "alice"))));
        repo.expect_delete().times(1).returning(|_| Ok(true));

        let result = service(repo)
            .delete_link("abc", &user("bob", &[Role::Delete]))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_delete_race_is_idempotent() {
        let mut repo = MockLinkRepository::new();
        repo.expect_get()
            .returning(|_| Ok(Some(Link::new("abc", "https://x.com", "alice", "alice"))));
        repo.expect_delete().times(1).returning(|_| Ok(false));

        let result = service(repo).delete_link("abc", &user("alice", &[])).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_resolve() {
        let mut repo = MockLinkRepository::new();
        repo.expect_get().returning(|code| {
            Ok((code == "abc").then(|| Link::new("abc", "https://x.com", "alice", "alice")))
        });

        let svc = service(repo);

        assert_eq!(svc.resolve("abc").await.unwrap().long, "https://x.com");
        assert!(matches!(
            svc.resolve("zzz").await,
            Err(AppError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_list_owned_uses_caller_id() {
        let mut repo = MockLinkRepository::new();
        repo.expect_list_by_owner()
            .withf(|owner| owner == "alice")
            .times(1)
            .returning(|_| Ok(vec![Link::new("abc", "https://x.com", "alice", "alice")]));

        let links = service(repo)
            .list_owned(&user("alice", &[]))
            .await
            .unwrap();

        assert_eq!(links.len(), 1);
    }
}
