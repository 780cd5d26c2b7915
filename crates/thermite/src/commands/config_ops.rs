//! `thermite config`: the candidate configuration lifecycle.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use thermite_core::{Automator, BatchReport, Credentials, DeviceRecord};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

/// Which lifecycle entry point to drive.
#[derive(Clone, Copy)]
enum Lifecycle {
    Commit,
    Discard,
    Rollback,
    LoadMerge { commit: bool },
    LoadReplace { commit: bool },
}

pub async fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Commit(t) => run(global, &t.devices, None, Lifecycle::Commit).await,
        ConfigCommand::Discard(t) => run(global, &t.devices, None, Lifecycle::Discard).await,
        ConfigCommand::Rollback(t) => run(global, &t.devices, None, Lifecycle::Rollback).await,
        ConfigCommand::LoadMerge(l) => {
            run(
                global,
                &l.devices,
                l.candidate,
                Lifecycle::LoadMerge { commit: l.commit },
            )
            .await
        }
        ConfigCommand::LoadReplace(l) => {
            run(
                global,
                &l.devices,
                l.candidate,
                Lifecycle::LoadReplace { commit: l.commit },
            )
            .await
        }
    }
}

async fn run(
    global: &GlobalOpts,
    names: &[String],
    candidate_override: Option<PathBuf>,
    lifecycle: Lifecycle,
) -> Result<(), CliError> {
    let inventory = util::load(global)?;
    let entries: Vec<_> = inventory.select(names)?.into_iter().cloned().collect();
    let automator = util::automator();

    let mut report = BatchReport::default();
    let mut records: Vec<DeviceRecord> = Vec::with_capacity(entries.len());

    for entry in &entries {
        let credentials =
            thermite_config::resolve_credentials(&inventory.credentials, &entry.ip_address)?;
        let mut record = entry.to_record();

        // Stage the candidate template before any load operation.
        let candidate_path = candidate_override.as_deref().or(entry.candidate_file.as_deref());
        if let Some(path) = candidate_path {
            record.set_candidate(read_candidate(path)?);
        }

        let sub = dispatch(&automator, &credentials, &mut record, lifecycle).await;
        report.merge(sub);
        records.push(record);
    }

    let rendered = output::render_single(
        &global.output,
        &records,
        |records| diff_view(records),
        |records| {
            records
                .iter()
                .map(|r| r.name.clone())
                .collect::<Vec<_>>()
                .join("\n")
        },
    );
    output::print_output(&rendered, global.quiet);

    util::finish(&report, global)
}

async fn dispatch(
    automator: &Automator,
    credentials: &Credentials,
    record: &mut DeviceRecord,
    lifecycle: Lifecycle,
) -> BatchReport {
    let devices = std::slice::from_mut(record);
    match lifecycle {
        Lifecycle::Commit => automator.commit(credentials, devices).await,
        Lifecycle::Discard => automator.discard(credentials, devices).await,
        Lifecycle::Rollback => automator.rollback(credentials, devices).await,
        Lifecycle::LoadMerge { commit: false } => automator.load_merge(credentials, devices).await,
        Lifecycle::LoadMerge { commit: true } => {
            automator.load_merge_commit(credentials, devices).await
        }
        Lifecycle::LoadReplace { commit: false } => {
            automator.load_replace(credentials, devices).await
        }
        Lifecycle::LoadReplace { commit: true } => {
            automator.load_replace_commit(credentials, devices).await
        }
    }
}

fn read_candidate(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(CliError::from)
}

/// Human-readable view: the refreshed pending diff per device.
fn diff_view(records: &[DeviceRecord]) -> String {
    let mut out = String::new();

    for record in records {
        let compare = record
            .operational_data
            .configuration
            .compare
            .as_deref()
            .unwrap_or_default();

        let _ = writeln!(out, "=== {} ===", record.name);
        if compare.is_empty() {
            let _ = writeln!(out, "(no pending changes)");
        } else {
            let _ = writeln!(out, "{compare}");
        }
    }

    out.trim_end().to_owned()
}
