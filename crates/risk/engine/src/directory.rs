//! User directory seam
//!
//! The workflow stores user identifiers only. Before any identifier is
//! written it must resolve here; an unknown id is a validation failure.

use crate::error::DirectoryResult;
use async_trait::async_trait;
use risk_types::UserId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A user known to the directory
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryUser {
    pub id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl DirectoryUser {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: UserId::new(id),
            display_name: None,
            email: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Resolves user identifiers
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// `Ok(None)` when the id is unknown
    async fn resolve(&self, user_id: &UserId) -> DirectoryResult<Option<DirectoryUser>>;
}

/// Fixed set of users, seeded from configuration or tests
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    users: Arc<RwLock<HashMap<UserId, DirectoryUser>>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = DirectoryUser>) -> Self {
        let map = users.into_iter().map(|u| (u.id.clone(), u)).collect();
        Self {
            users: Arc::new(RwLock::new(map)),
        }
    }

    pub async fn add_user(&self, user: DirectoryUser) {
        self.users.write().await.insert(user.id.clone(), user);
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn resolve(&self, user_id: &UserId) -> DirectoryResult<Option<DirectoryUser>> {
        Ok(self.users.read().await.get(user_id).cloned())
    }
}

/// Accepts every non-blank identifier. For deployments where identity is
/// enforced upstream.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenDirectory;

#[async_trait]
impl UserDirectory for OpenDirectory {
    async fn resolve(&self, user_id: &UserId) -> DirectoryResult<Option<DirectoryUser>> {
        if user_id.is_blank() {
            return Ok(None);
        }
        Ok(Some(DirectoryUser {
            id: user_id.clone(),
            display_name: None,
            email: None,
        }))
    }
}
