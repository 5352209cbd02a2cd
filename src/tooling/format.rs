//! Human-readable formatting for CLI output.

use crate::access::{AccessLevel, NetworkAccess};
use crate::directory::{Network, NetworkEntry, NetworkLayout, NetworkPermission};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

fn access_label(access: &NetworkAccess) -> &'static str {
    if access.is_owner {
        return "owner";
    }
    match access.permission {
        Some(AccessLevel::Admin) => "admin",
        Some(AccessLevel::Editor) => "editor",
        Some(AccessLevel::Viewer) => "viewer",
        None => "-",
    }
}

pub fn format_network_list_text(entries: &[NetworkEntry]) -> String {
    if entries.is_empty() {
        return "No networks. Create one with `cartographer network create <name>`.".to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["ID", "Name", "Description", "Access", "Updated"]);
    for entry in entries {
        let network = &entry.network;
        table.add_row(vec![
            network.id.clone(),
            network.name.clone(),
            network.description.clone().unwrap_or_else(|| "-".to_string()),
            access_label(&entry.access).to_string(),
            network.updated_at.format("%Y-%m-%d %H:%M").to_string(),
        ]);
    }
    format!("{}\n\n{}", format_section_heading("Networks"), table)
}

pub fn format_network_text(network: &Network, access: &NetworkAccess) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", format_section_heading(&network.name)));
    out.push_str(&format!("  ID: {}\n", network.id));
    if let Some(description) = &network.description {
        out.push_str(&format!("  Description: {}\n", description));
    }
    out.push_str(&format!(
        "  Owner: {}\n",
        network.owner_id.as_deref().unwrap_or("-")
    ));
    out.push_str(&format!("  Your access: {}\n", access_label(access)));
    out.push_str(&format!(
        "  Active: {}\n",
        if network.is_active { "yes" } else { "no" }
    ));
    out.push_str(&format!("  Created: {}\n", network.created_at.to_rfc3339()));
    out.push_str(&format!("  Updated: {}", network.updated_at.to_rfc3339()));
    out
}

/// One-line summary of a saved layout
pub fn format_layout_summary(layout: &NetworkLayout) -> String {
    match &layout.layout_data {
        Some(doc) => format!(
            "Saved layout for network {} ({} positions, {})",
            layout.name,
            doc.positions.len(),
            doc.timestamp
        ),
        None => format!("No saved layout for network {}", layout.name),
    }
}

pub fn format_permission_list_text(permissions: &[NetworkPermission]) -> String {
    if permissions.is_empty() {
        return "Not shared with anyone.".to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["User", "Role", "Granted"]);
    for permission in permissions {
        table.add_row(vec![
            permission.user_id.clone(),
            permission.role.to_string(),
            permission.created_at.format("%Y-%m-%d %H:%M").to_string(),
        ]);
    }
    format!("{}\n\n{}", format_section_heading("Shared with"), table)
}
