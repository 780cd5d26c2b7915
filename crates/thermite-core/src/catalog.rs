// ── Action catalog ──
//
// The fixed set of read-only data-retrieval capabilities exposed
// uniformly across drivers. Declaration order is the catalog order:
// presentation-significant, never correctness-significant. `Logging` is
// requestable but deliberately outside the catalog -- it drives the
// `show logging` composite in the update engine rather than a getter.
//
// Traceroute, BGP neighbors, and route lookups are excluded: they take
// call-time arguments (or misbehave on absent data) and are exposed as
// separate diagnostics instead.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::{Display, EnumString};

use crate::error::CoreError;

/// One named capability, displayed under its catalog name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Action {
    #[strum(serialize = "ARP table")]
    ArpTable,
    #[strum(serialize = "Interfaces counters")]
    InterfacesCounters,
    #[strum(serialize = "Facts")]
    Facts,
    #[strum(serialize = "Environment")]
    Environment,
    #[strum(serialize = "Configuration")]
    Configuration,
    #[strum(serialize = "Interfaces")]
    Interfaces,
    #[strum(serialize = "Interface IP")]
    InterfaceIp,
    #[strum(serialize = "LLDP neighbors")]
    LldpNeighbors,
    #[strum(serialize = "LLDP neighbors detail")]
    LldpNeighborsDetail,
    #[strum(serialize = "MAC address")]
    MacAddress,
    #[strum(serialize = "NTP servers")]
    NtpServers,
    #[strum(serialize = "NTP statistics")]
    NtpStatistics,
    #[strum(serialize = "Transceivers")]
    Transceivers,
    #[strum(serialize = "SNMP")]
    Snmp,
    #[strum(serialize = "Users")]
    Users,
    #[strum(serialize = "Network instances (VRF)")]
    NetworkInstances,
    #[strum(serialize = "NTP peers")]
    NtpPeers,
    #[strum(serialize = "BGP configuration")]
    BgpConfiguration,
    /// Composite-only request flag: runs `show logging` through the raw
    /// CLI capability. Not a catalog getter.
    #[strum(serialize = "Logging")]
    Logging,
}

impl Action {
    /// The catalog, in presentation order. Excludes [`Action::Logging`].
    pub const CATALOG: [Action; 18] = [
        Action::ArpTable,
        Action::InterfacesCounters,
        Action::Facts,
        Action::Environment,
        Action::Configuration,
        Action::Interfaces,
        Action::InterfaceIp,
        Action::LldpNeighbors,
        Action::LldpNeighborsDetail,
        Action::MacAddress,
        Action::NtpServers,
        Action::NtpStatistics,
        Action::Transceivers,
        Action::Snmp,
        Action::Users,
        Action::NetworkInstances,
        Action::NtpPeers,
        Action::BgpConfiguration,
    ];

    /// The driver capability identifier backing this action.
    pub fn capability(self) -> &'static str {
        match self {
            Action::ArpTable => "get_arp_table",
            Action::InterfacesCounters => "get_interfaces_counters",
            Action::Facts => "get_facts",
            Action::Environment => "get_environment",
            Action::Configuration => "get_config",
            Action::Interfaces => "get_interfaces",
            Action::InterfaceIp => "get_interfaces_ip",
            Action::LldpNeighbors => "get_lldp_neighbors",
            Action::LldpNeighborsDetail => "get_lldp_neighbors_detail",
            Action::MacAddress => "get_mac_address_table",
            Action::NtpServers => "get_ntp_servers",
            Action::NtpStatistics => "get_ntp_stats",
            Action::Transceivers => "get_optics",
            Action::Snmp => "get_snmp_information",
            Action::Users => "get_users",
            Action::NetworkInstances => "get_network_instances",
            Action::NtpPeers => "get_ntp_peers",
            Action::BgpConfiguration => "get_bgp_config",
            Action::Logging => "cli",
        }
    }

    /// Whether mainstream drivers commonly lack this getter.
    pub fn commonly_unimplemented(self) -> bool {
        matches!(
            self,
            Action::Users | Action::NetworkInstances | Action::NtpPeers | Action::BgpConfiguration
        )
    }

    /// Every requestable action: the catalog plus `Logging`.
    pub fn all() -> BTreeSet<Action> {
        let mut actions: BTreeSet<Action> = Self::CATALOG.into_iter().collect();
        actions.insert(Action::Logging);
        actions
    }

    /// Parse a comma-separated list of display names, case-insensitively.
    pub fn parse_list(input: &str) -> Result<BTreeSet<Action>, CoreError> {
        input
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| {
                Action::from_str(name).map_err(|_| CoreError::UnknownAction {
                    name: name.to_owned(),
                })
            })
            .collect()
    }
}

// Serialize under the display name so operational data carries catalog
// keys, not Rust identifiers.
impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Action::from_str(&name).map_err(|_| D::Error::custom(format!("unknown action '{name}'")))
    }
}
