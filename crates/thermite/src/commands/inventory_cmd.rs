//! Inventory listing and starter-file generation.

use tabled::Tabled;

use thermite_config::{DeviceEntry, Inventory};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Platform")]
    platform: String,
    #[tabled(rename = "Address")]
    ip_address: String,
    #[tabled(rename = "Candidate")]
    candidate: String,
}

impl From<&DeviceEntry> for DeviceRow {
    fn from(entry: &DeviceEntry) -> Self {
        Self {
            name: entry.name.clone(),
            platform: entry.platform.clone(),
            ip_address: entry.ip_address.clone(),
            candidate: entry
                .candidate_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        }
    }
}

// ── Handlers ────────────────────────────────────────────────────────

pub fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let inventory = util::load(global)?;

    let out = output::render_list(
        &global.output,
        &inventory.devices,
        |entry| DeviceRow::from(entry),
        |entry| entry.name.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

pub fn init(global: &GlobalOpts) -> Result<(), CliError> {
    let path = global
        .inventory
        .clone()
        .unwrap_or_else(thermite_config::inventory_path);

    if path.exists() {
        return Err(CliError::Validation {
            field: "inventory".into(),
            reason: format!("{} already exists", path.display()),
        });
    }

    thermite_config::save_inventory(&Inventory::sample(), &path)?;
    if !global.quiet {
        eprintln!("Wrote starter inventory to {}", path.display());
    }
    Ok(())
}
