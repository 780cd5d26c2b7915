//! Shared helpers for command handlers.

use std::sync::Arc;

use owo_colors::OwoColorize;

use thermite_config::Inventory;
use thermite_core::{Automator, BatchReport, DriverRegistry};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// Load the inventory from the global flag or the default path.
pub fn load(global: &GlobalOpts) -> Result<Inventory, CliError> {
    thermite_config::load_inventory(global.inventory.as_deref()).map_err(CliError::from)
}

/// An automator over the built-in driver registry.
pub fn automator() -> Automator {
    Automator::new(Arc::new(DriverRegistry::builtin()))
}

/// Print per-device outcomes to stderr (structured output stays clean on
/// stdout), then turn any failure into a batch error for the exit code.
pub fn finish(report: &BatchReport, global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(&global.color);

    if !global.quiet {
        for outcome in report.outcomes() {
            match &outcome.result {
                Ok(()) => {
                    let mark = if color { "ok".green().to_string() } else { "ok".into() };
                    eprintln!("{mark:>6}  {}", outcome.device);
                }
                Err(err) => {
                    let mark = if color { "failed".red().to_string() } else { "failed".into() };
                    eprintln!("{mark:>6}  {}: {err}", outcome.device);
                }
            }
        }
    }

    if report.is_all_ok() {
        Ok(())
    } else {
        Err(CliError::BatchFailed {
            failed: report.failed(),
            total: report.outcomes().len(),
        })
    }
}
