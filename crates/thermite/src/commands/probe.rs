//! `thermite ping` / `thermite traceroute`: single-device diagnostics.

use thermite_core::{ProbeOptions, pretty_print};

use crate::cli::{GlobalOpts, ProbeArgs};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn ping(args: ProbeArgs, global: &GlobalOpts) -> Result<(), CliError> {
    probe(args, global, false).await
}

pub async fn traceroute(args: ProbeArgs, global: &GlobalOpts) -> Result<(), CliError> {
    probe(args, global, true).await
}

async fn probe(args: ProbeArgs, global: &GlobalOpts, trace: bool) -> Result<(), CliError> {
    let inventory = util::load(global)?;
    let entry = inventory
        .device(&args.device)
        .ok_or_else(|| CliError::UnknownDevice {
            name: args.device.clone(),
        })?;

    let credentials =
        thermite_config::resolve_credentials(&inventory.credentials, &entry.ip_address)?;
    let record = entry.to_record();

    let options = ProbeOptions {
        destination: args.destination,
        source: args.source,
        ttl: args.ttl,
        timeout_secs: args.timeout_secs,
        size: args.size,
        count: args.count,
        vrf: args.vrf,
    };

    let automator = util::automator();
    let result = if trace {
        automator.traceroute(&credentials, &record, &options).await?
    } else {
        automator.ping(&credentials, &record, &options).await?
    };

    let rendered = output::render_single(
        &global.output,
        &result,
        |value| pretty_print(value, 0).trim_start().to_owned(),
        ToString::to_string,
    );
    output::print_output(&rendered, global.quiet);
    Ok(())
}
