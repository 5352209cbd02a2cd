//! Sled-backed network directory.
//!
//! Networks and layouts live in sled trees keyed by network id. Grants are keyed by
//! network id and user id joined with a NUL byte, so one network's grants form a
//! contiguous, user-ordered range. Values are JSON.

use crate::access::Actor;
use crate::codec;
use crate::directory::{
    sort_networks, CreateNetwork, CreateNetworkPermission, Network, NetworkDirectory,
    NetworkLayout, NetworkPermission, UpdateNetwork,
};
use crate::error::{ApiError, StorageError};
use crate::layout::LayoutDocument;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

const NETWORKS_TREE: &str = "networks";
const LAYOUTS_TREE: &str = "layouts";
const PERMISSIONS_TREE: &str = "permissions";

pub struct SledDirectory {
    db: sled::Db,
    networks: sled::Tree,
    layouts: sled::Tree,
    permissions: sled::Tree,
}

impl SledDirectory {
    /// Open (or create) the directory database at `path`
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        std::fs::create_dir_all(path)?;
        let db = sled::open(path)?;
        Self::from_db(db)
    }

    pub fn from_db(db: sled::Db) -> Result<Self, StorageError> {
        let networks = db.open_tree(NETWORKS_TREE)?;
        let layouts = db.open_tree(LAYOUTS_TREE)?;
        let permissions = db.open_tree(PERMISSIONS_TREE)?;
        Ok(Self {
            db,
            networks,
            layouts,
            permissions,
        })
    }

    fn load_network(&self, id: &str) -> Result<Network, ApiError> {
        match self.networks.get(id.as_bytes()).map_err(StorageError::from)? {
            Some(bytes) => Ok(decode(&bytes)?),
            None => Err(ApiError::NetworkNotFound(id.to_string())),
        }
    }

    fn load_layout(&self, id: &str) -> Result<Option<LayoutDocument>, ApiError> {
        match self.layouts.get(id.as_bytes()).map_err(StorageError::from)? {
            Some(bytes) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }

    fn store_network(&self, network: &Network) -> Result<(), StorageError> {
        self.networks
            .insert(network.id.as_bytes(), encode(network)?)?;
        Ok(())
    }

    fn load_permission(
        &self,
        network_id: &str,
        user_id: &str,
    ) -> Result<Option<NetworkPermission>, StorageError> {
        match self.permissions.get(permission_key(network_id, user_id))? {
            Some(bytes) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }

    fn flush(&self) -> Result<(), StorageError> {
        self.db.flush()?;
        Ok(())
    }
}

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, StorageError> {
    Ok(serde_json::to_vec(value)?)
}

fn permission_prefix(network_id: &str) -> Vec<u8> {
    let mut key = network_id.as_bytes().to_vec();
    key.push(0);
    key
}

fn permission_key(network_id: &str, user_id: &str) -> Vec<u8> {
    let mut key = permission_prefix(network_id);
    key.extend_from_slice(user_id.as_bytes());
    key
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, StorageError> {
    Ok(codec::from_slice(bytes)?)
}

impl NetworkDirectory for SledDirectory {
    fn create_network(&self, owner: &Actor, request: CreateNetwork) -> Result<Network, ApiError> {
        let network = Network::from_request(owner, request)?;
        self.store_network(&network)?;
        self.flush()?;
        tracing::info!(network_id = %network.id, name = %network.name, "Created network");
        Ok(network)
    }

    fn list_networks(&self) -> Result<Vec<Network>, ApiError> {
        let mut networks = Vec::new();
        for item in self.networks.iter() {
            let (key, bytes) = item.map_err(StorageError::from)?;
            match decode::<Network>(&bytes) {
                Ok(network) => networks.push(network),
                Err(e) => {
                    tracing::warn!(
                        "Skipping unreadable network record {}: {}",
                        String::from_utf8_lossy(&key),
                        e
                    );
                }
            }
        }
        sort_networks(&mut networks);
        Ok(networks)
    }

    fn get_network(&self, id: &str) -> Result<Network, ApiError> {
        self.load_network(id)
    }

    fn update_network(&self, id: &str, request: UpdateNetwork) -> Result<Network, ApiError> {
        let mut network = self.load_network(id)?;
        network.apply_update(request)?;
        self.store_network(&network)?;
        self.flush()?;
        Ok(network)
    }

    fn delete_network(&self, id: &str) -> Result<(), ApiError> {
        let removed = self
            .networks
            .remove(id.as_bytes())
            .map_err(StorageError::from)?;
        if removed.is_none() {
            return Err(ApiError::NetworkNotFound(id.to_string()));
        }
        self.layouts
            .remove(id.as_bytes())
            .map_err(StorageError::from)?;
        for item in self.permissions.scan_prefix(permission_prefix(id)) {
            let (key, _) = item.map_err(StorageError::from)?;
            self.permissions.remove(key).map_err(StorageError::from)?;
        }
        self.flush()?;
        tracing::info!(network_id = %id, "Deleted network");
        Ok(())
    }

    fn get_layout(&self, id: &str) -> Result<NetworkLayout, ApiError> {
        let network = self.load_network(id)?;
        let layout = self.load_layout(id)?;
        Ok(network.layout(layout))
    }

    fn save_layout(&self, id: &str, layout: LayoutDocument) -> Result<NetworkLayout, ApiError> {
        let mut network = self.load_network(id)?;
        network.updated_at = chrono::Utc::now();
        self.layouts
            .insert(id.as_bytes(), encode(&layout)?)
            .map_err(StorageError::from)?;
        self.store_network(&network)?;
        self.flush()?;
        tracing::debug!(
            network_id = %id,
            positions = layout.positions.len(),
            "Saved layout"
        );
        Ok(network.layout(Some(layout)))
    }

    fn list_permissions(&self, network_id: &str) -> Result<Vec<NetworkPermission>, ApiError> {
        self.load_network(network_id)?;
        let mut permissions = Vec::new();
        for item in self.permissions.scan_prefix(permission_prefix(network_id)) {
            let (_, bytes) = item.map_err(StorageError::from)?;
            permissions.push(decode(&bytes)?);
        }
        Ok(permissions)
    }

    fn add_permission(
        &self,
        network_id: &str,
        request: CreateNetworkPermission,
    ) -> Result<NetworkPermission, ApiError> {
        let network = self.load_network(network_id)?;
        let existing = self.load_permission(network_id, request.user_id.trim())?;
        let permission = NetworkPermission::from_request(&network, request, existing.as_ref())?;
        self.permissions
            .insert(
                permission_key(network_id, &permission.user_id),
                encode(&permission)?,
            )
            .map_err(StorageError::from)?;
        self.flush()?;
        tracing::info!(
            network_id = %network_id,
            user_id = %permission.user_id,
            role = %permission.role,
            "Granted network permission"
        );
        Ok(permission)
    }

    fn remove_permission(&self, network_id: &str, user_id: &str) -> Result<(), ApiError> {
        self.load_network(network_id)?;
        let removed = self
            .permissions
            .remove(permission_key(network_id, user_id))
            .map_err(StorageError::from)?;
        if removed.is_none() {
            return Err(ApiError::PermissionNotFound {
                network_id: network_id.to_string(),
                user_id: user_id.to_string(),
            });
        }
        self.flush()?;
        tracing::info!(network_id = %network_id, user_id = %user_id, "Revoked network permission");
        Ok(())
    }
}
