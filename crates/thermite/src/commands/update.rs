//! `thermite update`: pull operational data across the batch.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use thermite_core::{Action, BatchReport, DeviceRecord, pretty_print};

use crate::cli::{GlobalOpts, UpdateArgs};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(args: UpdateArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let inventory = util::load(global)?;
    let entries: Vec<_> = inventory.select(&args.devices)?.into_iter().cloned().collect();

    let requested: BTreeSet<Action> = match &args.actions {
        Some(list) => Action::parse_list(list).map_err(CliError::from)?,
        None => Action::CATALOG.into_iter().collect(),
    };

    let automator = util::automator();
    let mut report = BatchReport::default();
    let mut records: Vec<DeviceRecord> = Vec::with_capacity(entries.len());

    for entry in &entries {
        let credentials =
            thermite_config::resolve_credentials(&inventory.credentials, &entry.ip_address)?;
        let mut record = entry.to_record();
        let sub = automator
            .update(&credentials, &requested, std::slice::from_mut(&mut record))
            .await;
        report.merge(sub);
        records.push(record);
    }

    let rendered = output::render_single(
        &global.output,
        &records,
        |records| text_view(records),
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

/// Human-readable view: one block per device, one indented tree per
/// fetched action.
fn text_view(records: &[DeviceRecord]) -> String {
    let mut out = String::new();

    for record in records {
        let _ = writeln!(out, "=== {} ({}) ===", record.name, record.operating_system);

        for (action, value) in record.operational_data.entries() {
            let _ = writeln!(out, "{action}:{}", pretty_print(value, 1));
        }

        if let Some(compare) = &record.operational_data.configuration.compare {
            if !compare.is_empty() {
                let _ = writeln!(out, "Pending diff:\n{compare}");
            }
        }

        if let Some(cli) = &record.operational_data.cli {
            let _ = writeln!(out, "Logging:{}", pretty_print(cli, 1));
        }
    }

    out.trim_end().to_owned()
}
