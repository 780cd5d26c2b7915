// ── Session capability set ──
//
// The uniform interface every vendor driver implements. One getter per
// catalog action, the candidate-config lifecycle, raw command execution,
// and the two argument-bearing probes. Getters default to `NotSupported`
// so a driver only implements what its platform can answer -- the update
// engine treats that signal as empty data, not a failure.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DriverError;

/// Parameters for the ping/traceroute probes.
///
/// These take call-time arguments, which is why they are diagnostics
/// rather than catalog getters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProbeOptions {
    /// Target address of the probe.
    pub destination: String,
    /// Source address to emit from, if the platform supports it.
    pub source: Option<String>,
    pub ttl: Option<u32>,
    pub timeout_secs: Option<u64>,
    /// Payload size in bytes.
    pub size: Option<u32>,
    /// Number of probes to send.
    pub count: Option<u32>,
    /// VRF to probe within.
    pub vrf: Option<String>,
}

impl ProbeOptions {
    pub fn to_destination(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            ..Self::default()
        }
    }
}

fn not_supported(capability: &'static str) -> DriverError {
    DriverError::NotSupported { capability }
}

/// A live authenticated connection to one device for one batch call.
///
/// Opened by a [`Driver`](crate::Driver), used for one or more actions,
/// then closed exactly once by the caller -- the batch layer guarantees
/// the close even when an intermediate step fails. Sessions are never
/// shared between devices or between concurrent calls.
#[async_trait]
pub trait Session: Send {
    // ── Catalog getters ─────────────────────────────────────────────

    async fn get_arp_table(&mut self) -> Result<Value, DriverError> {
        Err(not_supported("get_arp_table"))
    }

    async fn get_interfaces_counters(&mut self) -> Result<Value, DriverError> {
        Err(not_supported("get_interfaces_counters"))
    }

    async fn get_facts(&mut self) -> Result<Value, DriverError> {
        Err(not_supported("get_facts"))
    }

    async fn get_environment(&mut self) -> Result<Value, DriverError> {
        Err(not_supported("get_environment"))
    }

    /// Running/startup/candidate configuration texts, keyed by name.
    async fn get_config(&mut self) -> Result<Value, DriverError> {
        Err(not_supported("get_config"))
    }

    async fn get_interfaces(&mut self) -> Result<Value, DriverError> {
        Err(not_supported("get_interfaces"))
    }

    async fn get_interfaces_ip(&mut self) -> Result<Value, DriverError> {
        Err(not_supported("get_interfaces_ip"))
    }

    async fn get_lldp_neighbors(&mut self) -> Result<Value, DriverError> {
        Err(not_supported("get_lldp_neighbors"))
    }

    async fn get_lldp_neighbors_detail(&mut self) -> Result<Value, DriverError> {
        Err(not_supported("get_lldp_neighbors_detail"))
    }

    async fn get_mac_address_table(&mut self) -> Result<Value, DriverError> {
        Err(not_supported("get_mac_address_table"))
    }

    async fn get_ntp_servers(&mut self) -> Result<Value, DriverError> {
        Err(not_supported("get_ntp_servers"))
    }

    async fn get_ntp_stats(&mut self) -> Result<Value, DriverError> {
        Err(not_supported("get_ntp_stats"))
    }

    async fn get_optics(&mut self) -> Result<Value, DriverError> {
        Err(not_supported("get_optics"))
    }

    async fn get_snmp_information(&mut self) -> Result<Value, DriverError> {
        Err(not_supported("get_snmp_information"))
    }

    async fn get_users(&mut self) -> Result<Value, DriverError> {
        Err(not_supported("get_users"))
    }

    async fn get_network_instances(&mut self) -> Result<Value, DriverError> {
        Err(not_supported("get_network_instances"))
    }

    async fn get_ntp_peers(&mut self) -> Result<Value, DriverError> {
        Err(not_supported("get_ntp_peers"))
    }

    async fn get_bgp_config(&mut self) -> Result<Value, DriverError> {
        Err(not_supported("get_bgp_config"))
    }

    // ── Candidate configuration lifecycle ───────────────────────────

    /// Diff between the running configuration and the loaded candidate.
    async fn compare_config(&mut self) -> Result<String, DriverError> {
        Err(not_supported("compare_config"))
    }

    /// Commit the loaded candidate to the running configuration.
    async fn commit_config(&mut self) -> Result<(), DriverError> {
        Err(not_supported("commit_config"))
    }

    /// Drop the loaded candidate without applying it.
    async fn discard_config(&mut self) -> Result<(), DriverError> {
        Err(not_supported("discard_config"))
    }

    /// Stage `config` as a candidate, merged into the running config.
    async fn load_merge_candidate(&mut self, config: &str) -> Result<(), DriverError> {
        let _ = config;
        Err(not_supported("load_merge_candidate"))
    }

    /// Stage `config` as a candidate replacing the running config.
    async fn load_replace_candidate(&mut self, config: &str) -> Result<(), DriverError> {
        let _ = config;
        Err(not_supported("load_replace_candidate"))
    }

    /// Revert the running configuration to the previous commit.
    async fn rollback(&mut self) -> Result<(), DriverError> {
        Err(not_supported("rollback"))
    }

    // ── Raw commands and probes ─────────────────────────────────────

    /// Execute raw CLI commands, returning per-command output keyed by
    /// the command text.
    async fn cli(&mut self, commands: &[String]) -> Result<Value, DriverError> {
        let _ = commands;
        Err(not_supported("cli"))
    }

    /// Reachability probe with caller-supplied parameters.
    async fn ping(&mut self, options: &ProbeOptions) -> Result<Value, DriverError> {
        let _ = options;
        Err(not_supported("ping"))
    }

    /// Path-trace probe with caller-supplied parameters.
    async fn traceroute(&mut self, options: &ProbeOptions) -> Result<Value, DriverError> {
        let _ = options;
        Err(not_supported("traceroute"))
    }

    // ── Lifecycle ───────────────────────────────────────────────────

    /// Tear down the transport. Must be called exactly once.
    async fn close(&mut self) -> Result<(), DriverError>;
}
