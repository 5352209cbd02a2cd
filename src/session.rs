//! Layout Session
//!
//! One editing session over one network's map: the tree being edited, the live position
//! store, and the user doing the editing. Opening a session hydrates the tree from the
//! saved layout; saving exports the current state back to the directory.

use crate::access::Actor;
use crate::directory::{NetworkDirectory, NetworkLayout};
use crate::error::ApiError;
use crate::layout::{apply, export, ApplyReport, LayoutDocument, PositionStore};
use crate::tree::{ensure_unique_ids, TopologyNode};
use tracing::{debug, info};

pub struct LayoutSession {
    network_id: String,
    actor: Actor,
    root: TopologyNode,
    store: PositionStore,
}

impl LayoutSession {
    /// Open a session on `network_id` for a freshly discovered `root`.
    ///
    /// Fails on duplicate node ids before anything is applied, and when `actor` cannot
    /// view the network. A network without a saved layout leaves the tree as it came in.
    pub fn open(
        directory: &dyn NetworkDirectory,
        network_id: &str,
        mut root: TopologyNode,
        actor: Actor,
    ) -> Result<(Self, ApplyReport), ApiError> {
        ensure_unique_ids(&root)?;
        directory.access_for(network_id, &actor)?.verify_view()?;
        let saved = directory.get_layout(network_id)?;
        let mut store = PositionStore::new();
        let report = apply(&mut root, saved.layout_data.as_ref(), &mut store);
        if !report.unmatched.is_empty() {
            debug!(
                network_id,
                unmatched = ?report.unmatched,
                "Saved layout has positions for nodes no longer in the tree"
            );
        }
        Ok((
            Self {
                network_id: network_id.to_string(),
                actor,
                root,
                store,
            },
            report,
        ))
    }

    pub fn network_id(&self) -> &str {
        &self.network_id
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn root(&self) -> &TopologyNode {
        &self.root
    }

    pub fn store(&self) -> &PositionStore {
        &self.store
    }

    /// Record a live position from user interaction
    pub fn move_node(&mut self, id: &str, x: f64, y: f64) {
        self.store.set(id, x, y);
    }

    /// Forget live positions; fixed coordinates already on the tree stay
    pub fn reset(&mut self) {
        self.store.clear();
    }

    pub fn export(&self) -> LayoutDocument {
        export(&self.root, &self.store)
    }

    /// Export the current layout and persist it; needs edit access to the network
    pub fn save(&self, directory: &dyn NetworkDirectory) -> Result<NetworkLayout, ApiError> {
        directory
            .access_for(&self.network_id, &self.actor)?
            .verify_edit()?;
        let document = self.export();
        let positions = document.positions.len();
        let saved = directory.save_layout(&self.network_id, document)?;
        info!(
            network_id = %self.network_id,
            user_id = %self.actor.user_id,
            positions,
            "Layout saved"
        );
        Ok(saved)
    }

    pub fn into_root(self) -> TopologyNode {
        self.root
    }
}
