//! Authenticated user derived from a verified identity token.

use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Elevated permissions granted per resource by the identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Create,
    Delete,
    Overwrite,
    ClearBackground,
}

impl Role {
    /// Role name as it appears in the token's `resource_access` claim.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Create => "PegNu-Short.CREATE",
            Role::Delete => "PegNu-Short.DELETE",
            Role::Overwrite => "PegNu-Short.OVERWRITE",
            Role::ClearBackground => "PegNu-Short.CLEAR-BACKGROUND",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Roles granted on a single resource (`resource_access.<name>`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceRoles {
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Claim set of a verified access token.
///
/// Only `sub` is mandatory; profile claims default to empty strings.
#[derive(Debug, Clone, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub given_name: String,
    #[serde(default)]
    pub family_name: String,
    #[serde(default)]
    pub preferred_username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub resource_access: HashMap<String, ResourceRoles>,
}

/// A typed user, built once per request at the trust boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub given_name: String,
    pub family_name: String,
    pub username: String,
    pub email: String,
    pub scopes: HashSet<String>,
    pub roles: HashMap<String, HashSet<String>>,
}

impl User {
    /// Returns true if the user holds `role` on `resource`.
    pub fn has_role(&self, resource: &str, role: Role) -> bool {
        self.has_roles(resource, &[role])
    }

    /// Returns true if the user holds every one of `roles` on `resource`.
    pub fn has_roles(&self, resource: &str, roles: &[Role]) -> bool {
        match self.roles.get(resource) {
            Some(granted) => roles.iter().all(|role| granted.contains(role.as_str())),
            None => roles.is_empty(),
        }
    }

    /// Name recorded as the owner's display name on links.
    pub fn display_name(&self) -> &str {
        if self.username.is_empty() {
            &self.name
        } else {
            &self.username
        }
    }
}

impl From<Claims> for User {
    fn from(claims: Claims) -> Self {
        let scopes = claims
            .scope
            .split_whitespace()
            .map(str::to_string)
            .collect();

        let roles = claims
            .resource_access
            .into_iter()
            .map(|(resource, access)| (resource, access.roles.into_iter().collect()))
            .collect();

        Self {
            id: claims.sub,
            name: claims.name,
            given_name: claims.given_name,
            family_name: claims.family_name,
            username: claims.preferred_username,
            email: claims.email,
            scopes,
            roles,
        }
    }
}
