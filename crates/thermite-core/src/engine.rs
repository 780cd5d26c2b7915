// ── Session update engine ──
//
// Runs the requested subset of catalog actions against a live session
// and stores the results on the device record. `NotSupported` is the
// only driver error recovered here: the action gets an empty object and
// iteration continues. Any other error aborts this device's pass,
// leaving results from earlier actions intact -- partial failure stays
// visible, never silently swallowed.

use std::collections::BTreeSet;

use chrono::Utc;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use thermite_driver::{DriverError, Session};

use crate::catalog::Action;
use crate::error::CoreError;
use crate::model::DeviceRecord;

/// The fixed command behind the Logging composite.
const LOGGING_COMMAND: &str = "show logging";

/// Fetch every requested catalog action in catalog order, then run the
/// Configuration-compare and Logging composites if requested.
pub async fn update(
    session: &mut dyn Session,
    device: &mut DeviceRecord,
    requested: &BTreeSet<Action>,
) -> Result<(), CoreError> {
    for action in Action::CATALOG {
        if !requested.contains(&action) {
            continue;
        }

        debug!(device = %device.name, action = %action, "fetching");
        match fetch(session, action).await {
            Ok(value) => {
                if action == Action::Configuration {
                    mirror_running(device, &value);
                }
                device.operational_data.insert(action, value);
            }
            Err(err) if err.is_not_supported() => {
                debug!(
                    device = %device.name,
                    action = %action,
                    "not implemented by driver, storing empty data"
                );
                device.operational_data.insert(action, Value::Object(Map::new()));
            }
            Err(err) => {
                warn!(device = %device.name, action = %action, error = %err, "getter failed");
                return Err(CoreError::from(err));
            }
        }
    }

    // Composites run against the session directly; no dependency on the
    // primary getter having been stored in the same pass.
    if requested.contains(&Action::Configuration) {
        let diff = session.compare_config().await?;
        device.operational_data.configuration.compare = Some(diff);
    }

    if requested.contains(&Action::Logging) {
        let output = session.cli(&[LOGGING_COMMAND.to_owned()]).await?;
        device.operational_data.cli = Some(output);
    }

    device.operational_data.refreshed_at = Some(Utc::now());
    Ok(())
}

/// Dispatch a catalog action to its session getter.
async fn fetch(session: &mut dyn Session, action: Action) -> Result<Value, DriverError> {
    match action {
        Action::ArpTable => session.get_arp_table().await,
        Action::InterfacesCounters => session.get_interfaces_counters().await,
        Action::Facts => session.get_facts().await,
        Action::Environment => session.get_environment().await,
        Action::Configuration => session.get_config().await,
        Action::Interfaces => session.get_interfaces().await,
        Action::InterfaceIp => session.get_interfaces_ip().await,
        Action::LldpNeighbors => session.get_lldp_neighbors().await,
        Action::LldpNeighborsDetail => session.get_lldp_neighbors_detail().await,
        Action::MacAddress => session.get_mac_address_table().await,
        Action::NtpServers => session.get_ntp_servers().await,
        Action::NtpStatistics => session.get_ntp_stats().await,
        Action::Transceivers => session.get_optics().await,
        Action::Snmp => session.get_snmp_information().await,
        Action::Users => session.get_users().await,
        Action::NetworkInstances => session.get_network_instances().await,
        Action::NtpPeers => session.get_ntp_peers().await,
        Action::BgpConfiguration => session.get_bgp_config().await,
        Action::Logging => unreachable!("Logging is a composite, not a catalog getter"),
    }
}

/// Mirror the `running` text out of a Configuration payload into the
/// typed config sub-record.
fn mirror_running(device: &mut DeviceRecord, value: &Value) {
    if let Some(running) = value.get("running").and_then(Value::as_str) {
        if !running.is_empty() {
            device.operational_data.configuration.running = Some(running.to_owned());
        }
    }
}
