//! Acting user, instance-wide role and per-network access.
//!
//! The instance role comes from the identity provider. Access to a single network comes
//! from owning it or from a grant recorded in the directory. The layout core never looks
//! at any of this; sessions and CLI commands do.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User permission level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Full access, including user management
    Owner,
    /// Can view and modify the network map
    #[serde(rename = "readwrite")]
    ReadWrite,
    /// Can only view the network map
    #[serde(rename = "readonly")]
    ReadOnly,
}

impl UserRole {
    pub fn label(&self) -> &'static str {
        match self {
            UserRole::Owner => "Owner",
            UserRole::ReadWrite => "Read/Write",
            UserRole::ReadOnly => "Read Only",
        }
    }
}

/// The user on whose behalf an operation runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: String,
    pub role: UserRole,
}

impl Actor {
    pub fn new(user_id: impl Into<String>, role: UserRole) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }

    pub fn can_write(&self) -> bool {
        matches!(self.role, UserRole::Owner | UserRole::ReadWrite)
    }

    pub fn can_manage_users(&self) -> bool {
        self.role == UserRole::Owner
    }

    /// Verify that the actor may modify networks and layouts
    pub fn verify_write(&self) -> Result<(), ApiError> {
        if !self.can_write() {
            return Err(ApiError::Unauthorized(format!(
                "User {} (role: {}) cannot modify the network map",
                self.user_id,
                self.role.label()
            )));
        }
        Ok(())
    }
}

/// Role granted to a user on one network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkRole {
    Viewer,
    Editor,
}

impl fmt::Display for NetworkRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkRole::Viewer => write!(f, "viewer"),
            NetworkRole::Editor => write!(f, "editor"),
        }
    }
}

impl FromStr for NetworkRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "viewer" => Ok(NetworkRole::Viewer),
            "editor" => Ok(NetworkRole::Editor),
            other => Err(format!(
                "Invalid network role: {} (must be 'viewer' or 'editor')",
                other
            )),
        }
    }
}

/// Effective level on one network, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    Viewer,
    Editor,
    /// Network owner or instance owner: edit, delete, share
    Admin,
}

impl From<NetworkRole> for AccessLevel {
    fn from(role: NetworkRole) -> Self {
        match role {
            NetworkRole::Viewer => AccessLevel::Viewer,
            NetworkRole::Editor => AccessLevel::Editor,
        }
    }
}

/// What one actor may do with one network
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkAccess {
    #[serde(skip)]
    pub network_id: String,
    #[serde(skip)]
    pub user_id: String,
    pub is_owner: bool,
    /// `None` when the actor cannot see the network at all
    pub permission: Option<AccessLevel>,
}

impl NetworkAccess {
    /// Combine ownership, the instance role and any grant into one level.
    ///
    /// Network owners and instance owners get `Admin`. Everyone else gets what their grant
    /// says. A read-only instance role caps the result at `Viewer`.
    pub fn resolve(
        network_id: &str,
        actor: &Actor,
        owner_id: Option<&str>,
        grant: Option<NetworkRole>,
    ) -> Self {
        let is_owner = owner_id == Some(actor.user_id.as_str());
        let level = if is_owner || actor.can_manage_users() {
            Some(AccessLevel::Admin)
        } else {
            grant.map(AccessLevel::from)
        };
        let permission = if actor.can_write() {
            level
        } else {
            level.map(|level| level.min(AccessLevel::Viewer))
        };
        Self {
            network_id: network_id.to_string(),
            user_id: actor.user_id.clone(),
            is_owner,
            permission,
        }
    }

    pub fn can_view(&self) -> bool {
        self.permission.is_some()
    }

    pub fn can_edit(&self) -> bool {
        self.permission >= Some(AccessLevel::Editor)
    }

    pub fn can_manage(&self) -> bool {
        self.permission == Some(AccessLevel::Admin)
    }

    pub fn verify_view(&self) -> Result<(), ApiError> {
        self.require(self.can_view(), "view")
    }

    /// Required to rename a network or save its layout
    pub fn verify_edit(&self) -> Result<(), ApiError> {
        self.require(self.can_edit(), "edit")
    }

    /// Required to delete a network or change who it is shared with
    pub fn verify_manage(&self) -> Result<(), ApiError> {
        self.require(self.can_manage(), "manage")
    }

    fn require(&self, allowed: bool, action: &str) -> Result<(), ApiError> {
        if allowed {
            return Ok(());
        }
        Err(ApiError::Unauthorized(format!(
            "User {} cannot {} network {}",
            self.user_id, action, self.network_id
        )))
    }
}
