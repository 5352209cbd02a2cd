//! CLI Tooling
//!
//! Command-line interface over the network directory and map layouts.

use crate::access::{Actor, NetworkRole};
use crate::codec;
use crate::config::CartographerConfig;
use crate::directory::{
    CreateNetwork, CreateNetworkPermission, NetworkDirectory, SledDirectory, UpdateNetwork,
};
use crate::error::ApiError;
use crate::layout::LayoutDocument;
use crate::session::LayoutSession;
use crate::tooling::format::{
    format_layout_summary, format_network_list_text, format_network_text,
    format_permission_list_text,
};
use crate::tree::TopologyNode;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Cartographer CLI - network map layout management
#[derive(Parser)]
#[command(name = "cartographer")]
#[command(about = "Manage networks and their saved map layouts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory database path (overrides storage.path)
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Fold command-line overrides into the loaded configuration
    pub fn apply_overrides(&self, config: &mut CartographerConfig) {
        if let Some(store) = &self.store {
            config.storage.path = Some(store.clone());
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.logging.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            config.logging.file = Some(file.clone());
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage networks
    Network {
        #[command(subcommand)]
        command: NetworkCommands,
    },
    /// Inspect, import and export map layouts
    Layout {
        #[command(subcommand)]
        command: LayoutCommands,
    },
    /// Share networks with other users
    Permission {
        #[command(subcommand)]
        command: PermissionCommands,
    },
}

#[derive(Subcommand)]
pub enum NetworkCommands {
    /// Create a network
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// List networks
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show one network
    Show { id: String },
    /// Rename a network
    Rename { id: String, name: String },
    /// Delete a network and its saved layout
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum LayoutCommands {
    /// Print the saved layout document
    Show { id: String },
    /// Save a layout document file as the network's layout
    Import { id: String, file: PathBuf },
    /// Apply the saved layout to a topology tree and print the resulting layout
    Export {
        id: String,
        /// Topology tree JSON file
        #[arg(long)]
        tree: PathBuf,
        /// Move a node before exporting: <id>=<x>,<y> (repeatable)
        #[arg(long = "set", value_parser = parse_node_move)]
        moves: Vec<NodeMove>,
        /// Save the exported layout back to the network
        #[arg(long)]
        save: bool,
    },
}

#[derive(Subcommand)]
pub enum PermissionCommands {
    /// List who a network is shared with
    List { id: String },
    /// Grant a user a role on a network, or change their role
    Add {
        id: String,
        user_id: String,
        /// viewer or editor
        #[arg(long, default_value = "viewer")]
        role: NetworkRole,
    },
    /// Revoke a user's access to a network
    Remove { id: String, user_id: String },
}

/// A `--set` argument
#[derive(Debug, Clone, PartialEq)]
pub struct NodeMove {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

/// Parse `<id>=<x>,<y>`; the id may itself contain `=`.
pub fn parse_node_move(raw: &str) -> Result<NodeMove, String> {
    let (id, coords) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected <id>=<x>,<y>, got '{}'", raw))?;
    if id.is_empty() {
        return Err(format!("missing node id in '{}'", raw));
    }
    let (x, y) = coords
        .split_once(',')
        .ok_or_else(|| format!("expected <x>,<y> after '=', got '{}'", coords))?;
    let x: f64 = x
        .trim()
        .parse()
        .map_err(|e| format!("invalid x coordinate '{}': {}", x, e))?;
    let y: f64 = y
        .trim()
        .parse()
        .map_err(|e| format!("invalid y coordinate '{}': {}", y, e))?;
    Ok(NodeMove {
        id: id.to_string(),
        x,
        y,
    })
}

/// Execution context: the directory in use and the acting user
pub struct CliContext {
    directory: Arc<dyn NetworkDirectory>,
    actor: Actor,
}

impl CliContext {
    /// Open the sled directory named by `config`
    pub fn new(config: &CartographerConfig) -> Result<Self, ApiError> {
        let store_path = config.storage.resolve_path()?;
        let directory = SledDirectory::open(&store_path)?;
        info!(store = %store_path.display(), "Opened network directory");
        Ok(Self::with_directory(
            Arc::new(directory),
            config.identity.actor(),
        ))
    }

    pub fn with_directory(directory: Arc<dyn NetworkDirectory>, actor: Actor) -> Self {
        Self { directory, actor }
    }

    pub fn directory(&self) -> &dyn NetworkDirectory {
        self.directory.as_ref()
    }

    /// Execute a command and return its printable output
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Network { command } => self.execute_network(command),
            Commands::Layout { command } => self.execute_layout(command),
            Commands::Permission { command } => self.execute_permission(command),
        }
    }

    fn execute_network(&self, command: &NetworkCommands) -> Result<String, ApiError> {
        match command {
            NetworkCommands::Create { name, description } => {
                self.actor.verify_write()?;
                let network = self.directory.create_network(
                    &self.actor,
                    CreateNetwork {
                        name: name.clone(),
                        description: description.clone(),
                    },
                )?;
                Ok(format!("Created network {} ({})", network.name, network.id))
            }
            NetworkCommands::List { format } => {
                let networks = self.directory.visible_networks(&self.actor)?;
                match format.as_str() {
                    "json" => Ok(serde_json::to_string_pretty(&networks)?),
                    "text" => Ok(format_network_list_text(&networks)),
                    other => Err(ApiError::InvalidRequest(format!(
                        "Invalid format: {} (must be 'text' or 'json')",
                        other
                    ))),
                }
            }
            NetworkCommands::Show { id } => {
                let access = self.directory.access_for(id, &self.actor)?;
                access.verify_view()?;
                let network = self.directory.get_network(id)?;
                Ok(format_network_text(&network, &access))
            }
            NetworkCommands::Rename { id, name } => {
                self.directory.access_for(id, &self.actor)?.verify_edit()?;
                let network = self.directory.update_network(
                    id,
                    UpdateNetwork {
                        name: Some(name.clone()),
                        description: None,
                    },
                )?;
                Ok(format!("Renamed network {} to {}", network.id, network.name))
            }
            NetworkCommands::Delete { id } => {
                self.directory.access_for(id, &self.actor)?.verify_manage()?;
                self.directory.delete_network(id)?;
                Ok(format!("Deleted network {}", id))
            }
        }
    }

    fn execute_layout(&self, command: &LayoutCommands) -> Result<String, ApiError> {
        match command {
            LayoutCommands::Show { id } => {
                self.directory.access_for(id, &self.actor)?.verify_view()?;
                let layout = self.directory.get_layout(id)?;
                match &layout.layout_data {
                    Some(doc) => Ok(doc.to_json_pretty()?),
                    None => Ok(format_layout_summary(&layout)),
                }
            }
            LayoutCommands::Import { id, file } => {
                self.directory.access_for(id, &self.actor)?.verify_edit()?;
                let text = read_file(file)?;
                let document = LayoutDocument::parse(&text)?;
                let saved = self.directory.save_layout(id, document)?;
                Ok(format_layout_summary(&saved))
            }
            LayoutCommands::Export {
                id,
                tree,
                moves,
                save,
            } => {
                let text = read_file(tree)?;
                let root: TopologyNode = codec::from_str(&text).map_err(|e| {
                    ApiError::InvalidRequest(format!(
                        "Failed to parse topology tree {}: {}",
                        tree.display(),
                        e
                    ))
                })?;
                let (mut session, report) = LayoutSession::open(
                    self.directory.as_ref(),
                    id,
                    root,
                    self.actor.clone(),
                )?;
                info!(
                    network_id = %id,
                    applied = report.applied,
                    unmatched = report.unmatched.len(),
                    "Applied saved layout to tree"
                );
                for node_move in moves {
                    session.move_node(&node_move.id, node_move.x, node_move.y);
                }
                if *save {
                    let saved = session.save(self.directory.as_ref())?;
                    let doc = saved.layout_data.ok_or_else(|| {
                        ApiError::InvalidRequest(format!("Layout for {} was not stored", id))
                    })?;
                    return Ok(doc.to_json_pretty()?);
                }
                Ok(session.export().to_json_pretty()?)
            }
        }
    }

    fn execute_permission(&self, command: &PermissionCommands) -> Result<String, ApiError> {
        match command {
            PermissionCommands::List { id } => {
                self.directory.access_for(id, &self.actor)?.verify_manage()?;
                let permissions = self.directory.list_permissions(id)?;
                Ok(format_permission_list_text(&permissions))
            }
            PermissionCommands::Add { id, user_id, role } => {
                self.directory.access_for(id, &self.actor)?.verify_manage()?;
                let permission = self.directory.add_permission(
                    id,
                    CreateNetworkPermission {
                        user_id: user_id.clone(),
                        role: *role,
                    },
                )?;
                Ok(format!(
                    "Granted {} {} access to network {}",
                    permission.user_id, permission.role, id
                ))
            }
            PermissionCommands::Remove { id, user_id } => {
                self.directory.access_for(id, &self.actor)?.verify_manage()?;
                self.directory.remove_permission(id, user_id)?;
                Ok(format!("Revoked {} access to network {}", user_id, id))
            }
        }
    }
}

fn read_file(path: &Path) -> Result<String, ApiError> {
    std::fs::read_to_string(path).map_err(|e| {
        ApiError::InvalidRequest(format!("Failed to read {}: {}", path.display(), e))
    })
}
