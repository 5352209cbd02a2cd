//! Network Directory
//!
//! The service that owns networks and their saved layouts. The layout core only consumes
//! and produces plain values; a directory is where those values are kept between
//! sessions. Two implementations: in-memory and sled-backed.

pub mod memory;
pub mod persistence;

use crate::access::{Actor, NetworkAccess, NetworkRole};
use crate::error::ApiError;
use crate::layout::LayoutDocument;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use memory::MemoryDirectory;
pub use persistence::SledDirectory;

/// A mapped network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub owner_id: Option<String>,
}

/// Saved layout of a network; `layout_data` is `None` until a layout is first saved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkLayout {
    pub id: String,
    pub name: String,
    pub layout_data: Option<LayoutDocument>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNetwork {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateNetwork {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A user's grant on one network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkPermission {
    pub network_id: String,
    pub user_id: String,
    pub role: NetworkRole,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNetworkPermission {
    pub user_id: String,
    pub role: NetworkRole,
}

/// A network as seen by one actor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkEntry {
    #[serde(flatten)]
    pub network: Network,
    #[serde(flatten)]
    pub access: NetworkAccess,
}

/// Request body for saving a layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveLayoutRequest {
    pub layout_data: LayoutDocument,
}

/// Directory service interface
pub trait NetworkDirectory: Send + Sync {
    fn create_network(&self, owner: &Actor, request: CreateNetwork) -> Result<Network, ApiError>;
    /// All networks, oldest first
    fn list_networks(&self) -> Result<Vec<Network>, ApiError>;
    fn get_network(&self, id: &str) -> Result<Network, ApiError>;
    fn update_network(&self, id: &str, request: UpdateNetwork) -> Result<Network, ApiError>;
    /// Remove a network together with its saved layout and grants
    fn delete_network(&self, id: &str) -> Result<(), ApiError>;
    fn get_layout(&self, id: &str) -> Result<NetworkLayout, ApiError>;
    fn save_layout(&self, id: &str, layout: LayoutDocument) -> Result<NetworkLayout, ApiError>;

    /// Grants on a network, ordered by user id
    fn list_permissions(&self, network_id: &str) -> Result<Vec<NetworkPermission>, ApiError>;
    /// Grant a role, or change the role of an existing grant
    fn add_permission(
        &self,
        network_id: &str,
        request: CreateNetworkPermission,
    ) -> Result<NetworkPermission, ApiError>;
    fn remove_permission(&self, network_id: &str, user_id: &str) -> Result<(), ApiError>;

    /// Resolve what `actor` may do with a network
    fn access_for(&self, network_id: &str, actor: &Actor) -> Result<NetworkAccess, ApiError> {
        let network = self.get_network(network_id)?;
        let grant = self
            .list_permissions(network_id)?
            .into_iter()
            .find(|permission| permission.user_id == actor.user_id)
            .map(|permission| permission.role);
        Ok(NetworkAccess::resolve(
            network_id,
            actor,
            network.owner_id.as_deref(),
            grant,
        ))
    }

    /// Networks `actor` can see, oldest first, with the actor's access on each
    fn visible_networks(&self, actor: &Actor) -> Result<Vec<NetworkEntry>, ApiError> {
        let mut entries = Vec::new();
        for network in self.list_networks()? {
            let access = self.access_for(&network.id, actor)?;
            if access.can_view() {
                entries.push(NetworkEntry { network, access });
            }
        }
        Ok(entries)
    }
}

impl NetworkPermission {
    /// Build the grant for `request`, keeping the original grant time on a role change
    pub(crate) fn from_request(
        network: &Network,
        request: CreateNetworkPermission,
        existing: Option<&NetworkPermission>,
    ) -> Result<Self, ApiError> {
        let user_id = request.user_id.trim();
        if user_id.is_empty() {
            return Err(ApiError::InvalidRequest(
                "Permission user id cannot be empty".to_string(),
            ));
        }
        if network.owner_id.as_deref() == Some(user_id) {
            return Err(ApiError::InvalidRequest(format!(
                "User {} owns network {} and needs no grant",
                user_id, network.id
            )));
        }
        Ok(NetworkPermission {
            network_id: network.id.clone(),
            user_id: user_id.to_string(),
            role: request.role,
            created_at: existing.map(|p| p.created_at).unwrap_or_else(Utc::now),
        })
    }
}

impl Network {
    /// Build a new network record owned by `owner`
    pub(crate) fn from_request(owner: &Actor, request: CreateNetwork) -> Result<Self, ApiError> {
        let name = validated_name(&request.name)?;
        let now = Utc::now();
        Ok(Network {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            description: request.description,
            is_active: true,
            created_at: now,
            updated_at: now,
            owner_id: Some(owner.user_id.clone()),
        })
    }

    pub(crate) fn apply_update(&mut self, request: UpdateNetwork) -> Result<(), ApiError> {
        if let Some(name) = request.name {
            self.name = validated_name(&name)?;
        }
        if let Some(description) = request.description {
            self.description = Some(description);
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    pub(crate) fn layout(&self, layout_data: Option<LayoutDocument>) -> NetworkLayout {
        NetworkLayout {
            id: self.id.clone(),
            name: self.name.clone(),
            layout_data,
            updated_at: self.updated_at,
        }
    }
}

fn validated_name(name: &str) -> Result<String, ApiError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidRequest(
            "Network name cannot be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn sort_networks(networks: &mut [Network]) {
    networks.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}
