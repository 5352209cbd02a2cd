//! In-memory network directory.

use crate::access::Actor;
use crate::directory::{
    sort_networks, CreateNetwork, CreateNetworkPermission, Network, NetworkDirectory,
    NetworkLayout, NetworkPermission, UpdateNetwork,
};
use crate::error::ApiError;
use crate::layout::LayoutDocument;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};

struct Entry {
    network: Network,
    layout: Option<LayoutDocument>,
    /// Grants by user id
    permissions: BTreeMap<String, NetworkPermission>,
}

/// Directory held entirely in process memory
#[derive(Default)]
pub struct MemoryDirectory {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl NetworkDirectory for MemoryDirectory {
    fn create_network(&self, owner: &Actor, request: CreateNetwork) -> Result<Network, ApiError> {
        let network = Network::from_request(owner, request)?;
        self.entries.write().insert(
            network.id.clone(),
            Entry {
                network: network.clone(),
                layout: None,
                permissions: BTreeMap::new(),
            },
        );
        Ok(network)
    }

    fn list_networks(&self) -> Result<Vec<Network>, ApiError> {
        let mut networks: Vec<Network> = self
            .entries
            .read()
            .values()
            .map(|entry| entry.network.clone())
            .collect();
        sort_networks(&mut networks);
        Ok(networks)
    }

    fn get_network(&self, id: &str) -> Result<Network, ApiError> {
        self.entries
            .read()
            .get(id)
            .map(|entry| entry.network.clone())
            .ok_or_else(|| ApiError::NetworkNotFound(id.to_string()))
    }

    fn update_network(&self, id: &str, request: UpdateNetwork) -> Result<Network, ApiError> {
        let mut entries = self.entries.write();
        let entry = entries
            .get_mut(id)
            .ok_or_else(|| ApiError::NetworkNotFound(id.to_string()))?;
        entry.network.apply_update(request)?;
        Ok(entry.network.clone())
    }

    fn delete_network(&self, id: &str) -> Result<(), ApiError> {
        self.entries
            .write()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| ApiError::NetworkNotFound(id.to_string()))
    }

    fn get_layout(&self, id: &str) -> Result<NetworkLayout, ApiError> {
        let entries = self.entries.read();
        let entry = entries
            .get(id)
            .ok_or_else(|| ApiError::NetworkNotFound(id.to_string()))?;
        Ok(entry.network.layout(entry.layout.clone()))
    }

    fn save_layout(&self, id: &str, layout: LayoutDocument) -> Result<NetworkLayout, ApiError> {
        let mut entries = self.entries.write();
        let entry = entries
            .get_mut(id)
            .ok_or_else(|| ApiError::NetworkNotFound(id.to_string()))?;
        entry.network.updated_at = chrono::Utc::now();
        entry.layout = Some(layout);
        Ok(entry.network.layout(entry.layout.clone()))
    }

    fn list_permissions(&self, network_id: &str) -> Result<Vec<NetworkPermission>, ApiError> {
        let entries = self.entries.read();
        let entry = entries
            .get(network_id)
            .ok_or_else(|| ApiError::NetworkNotFound(network_id.to_string()))?;
        Ok(entry.permissions.values().cloned().collect())
    }

    fn add_permission(
        &self,
        network_id: &str,
        request: CreateNetworkPermission,
    ) -> Result<NetworkPermission, ApiError> {
        let mut entries = self.entries.write();
        let entry = entries
            .get_mut(network_id)
            .ok_or_else(|| ApiError::NetworkNotFound(network_id.to_string()))?;
        let existing = entry.permissions.get(request.user_id.trim());
        let permission = NetworkPermission::from_request(&entry.network, request, existing)?;
        entry
            .permissions
            .insert(permission.user_id.clone(), permission.clone());
        Ok(permission)
    }

    fn remove_permission(&self, network_id: &str, user_id: &str) -> Result<(), ApiError> {
        let mut entries = self.entries.write();
        let entry = entries
            .get_mut(network_id)
            .ok_or_else(|| ApiError::NetworkNotFound(network_id.to_string()))?;
        entry
            .permissions
            .remove(user_id)
            .map(|_| ())
            .ok_or_else(|| ApiError::PermissionNotFound {
                network_id: network_id.to_string(),
                user_id: user_id.to_string(),
            })
    }
}
