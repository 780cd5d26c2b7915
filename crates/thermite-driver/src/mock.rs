// ── Mock driver ──
//
// In-memory driver for tests, demos, and dry-runs: canned payloads per
// getter, injectable unsupported/failing capabilities, and a shared
// ledger recording opens, closes, and every capability invocation.
// Plays the role an in-process fake server plays for an HTTP client.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::credentials::Credentials;
use crate::error::{ConnectionKind, DriverError};
use crate::registry::Driver;
use crate::session::{ProbeOptions, Session};

/// How a candidate was staged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    Merge,
    Replace,
}

/// Everything the mock observed, for post-hoc assertions.
#[derive(Debug, Default)]
pub struct MockLedger {
    /// Sessions opened.
    pub opened: u32,
    /// Sessions closed.
    pub closed: u32,
    /// Capability identifiers in invocation order, across sessions.
    pub calls: Vec<String>,
    pub commits: u32,
    pub discards: u32,
    pub rollbacks: u32,
    /// Candidate texts as pushed, with their load mode.
    pub loaded: Vec<(LoadMode, String)>,
}

/// Configurable in-memory driver. Cloning shares the ledger.
#[derive(Clone, Default)]
pub struct MockDriver {
    responses: HashMap<&'static str, Value>,
    unsupported: HashSet<&'static str>,
    failing: HashMap<&'static str, String>,
    refuse_open: Option<(ConnectionKind, String)>,
    ledger: Arc<Mutex<MockLedger>>,
}

impl MockDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canned payload for a capability (getter, probe, or `cli`).
    pub fn with_response(mut self, capability: &'static str, value: Value) -> Self {
        self.responses.insert(capability, value);
        self
    }

    /// Make a capability signal `NotSupported`.
    pub fn with_unsupported(mut self, capability: &'static str) -> Self {
        self.unsupported.insert(capability);
        self
    }

    /// Make a capability fail with an operation error.
    pub fn with_failure(mut self, capability: &'static str, reason: impl Into<String>) -> Self {
        self.failing.insert(capability, reason.into());
        self
    }

    /// Refuse every `open` with the given connection failure.
    pub fn refusing_connections(mut self, kind: ConnectionKind, reason: impl Into<String>) -> Self {
        self.refuse_open = Some((kind, reason.into()));
        self
    }

    /// Handle to the shared ledger.
    pub fn ledger(&self) -> Arc<Mutex<MockLedger>> {
        Arc::clone(&self.ledger)
    }

    fn lock(&self) -> MutexGuard<'_, MockLedger> {
        self.ledger.lock().expect("mock ledger poisoned")
    }
}

#[async_trait]
impl Driver for MockDriver {
    async fn open(&self, credentials: &Credentials) -> Result<Box<dyn Session>, DriverError> {
        if let Some((kind, reason)) = &self.refuse_open {
            return Err(DriverError::Connection {
                kind: *kind,
                ip_address: credentials.ip_address.clone(),
                reason: reason.clone(),
            });
        }

        self.lock().opened += 1;
        Ok(Box::new(MockSession {
            driver: self.clone(),
            staged: None,
        }))
    }
}

struct MockSession {
    driver: MockDriver,
    staged: Option<(LoadMode, String)>,
}

impl MockSession {
    /// Record the call, then apply unsupported/failure injection.
    fn check(&self, capability: &'static str) -> Result<(), DriverError> {
        self.driver.lock().calls.push(capability.to_owned());

        if self.driver.unsupported.contains(capability) {
            return Err(DriverError::NotSupported { capability });
        }
        if let Some(reason) = self.driver.failing.get(capability) {
            return Err(DriverError::Operation {
                operation: capability,
                reason: reason.clone(),
            });
        }
        Ok(())
    }

    fn canned(&self, capability: &'static str) -> Result<Value, DriverError> {
        self.check(capability)?;
        Ok(self
            .driver
            .responses
            .get(capability)
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new())))
    }
}

#[async_trait]
impl Session for MockSession {
    async fn get_arp_table(&mut self) -> Result<Value, DriverError> {
        self.canned("get_arp_table")
    }

    async fn get_interfaces_counters(&mut self) -> Result<Value, DriverError> {
        self.canned("get_interfaces_counters")
    }

    async fn get_facts(&mut self) -> Result<Value, DriverError> {
        self.canned("get_facts")
    }

    async fn get_environment(&mut self) -> Result<Value, DriverError> {
        self.canned("get_environment")
    }

    async fn get_config(&mut self) -> Result<Value, DriverError> {
        self.canned("get_config")
    }

    async fn get_interfaces(&mut self) -> Result<Value, DriverError> {
        self.canned("get_interfaces")
    }

    async fn get_interfaces_ip(&mut self) -> Result<Value, DriverError> {
        self.canned("get_interfaces_ip")
    }

    async fn get_lldp_neighbors(&mut self) -> Result<Value, DriverError> {
        self.canned("get_lldp_neighbors")
    }

    async fn get_lldp_neighbors_detail(&mut self) -> Result<Value, DriverError> {
        self.canned("get_lldp_neighbors_detail")
    }

    async fn get_mac_address_table(&mut self) -> Result<Value, DriverError> {
        self.canned("get_mac_address_table")
    }

    async fn get_ntp_servers(&mut self) -> Result<Value, DriverError> {
        self.canned("get_ntp_servers")
    }

    async fn get_ntp_stats(&mut self) -> Result<Value, DriverError> {
        self.canned("get_ntp_stats")
    }

    async fn get_optics(&mut self) -> Result<Value, DriverError> {
        self.canned("get_optics")
    }

    async fn get_snmp_information(&mut self) -> Result<Value, DriverError> {
        self.canned("get_snmp_information")
    }

    async fn get_users(&mut self) -> Result<Value, DriverError> {
        self.canned("get_users")
    }

    async fn get_network_instances(&mut self) -> Result<Value, DriverError> {
        self.canned("get_network_instances")
    }

    async fn get_ntp_peers(&mut self) -> Result<Value, DriverError> {
        self.canned("get_ntp_peers")
    }

    async fn get_bgp_config(&mut self) -> Result<Value, DriverError> {
        self.canned("get_bgp_config")
    }

    async fn compare_config(&mut self) -> Result<String, DriverError> {
        self.check("compare_config")?;

        if let Some(diff) = self.driver.responses.get("compare_config") {
            return Ok(diff.as_str().unwrap_or_default().to_owned());
        }

        // Derived diff: every staged line shows as an addition.
        Ok(self
            .staged
            .as_ref()
            .map(|(_, text)| {
                text.lines()
                    .map(|line| format!("+{line}"))
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .unwrap_or_default())
    }

    async fn commit_config(&mut self) -> Result<(), DriverError> {
        self.check("commit_config")?;
        self.staged = None;
        self.driver.lock().commits += 1;
        Ok(())
    }

    async fn discard_config(&mut self) -> Result<(), DriverError> {
        self.check("discard_config")?;
        self.staged = None;
        self.driver.lock().discards += 1;
        Ok(())
    }

    async fn load_merge_candidate(&mut self, config: &str) -> Result<(), DriverError> {
        self.check("load_merge_candidate")?;
        self.staged = Some((LoadMode::Merge, config.to_owned()));
        self.driver
            .lock()
            .loaded
            .push((LoadMode::Merge, config.to_owned()));
        Ok(())
    }

    async fn load_replace_candidate(&mut self, config: &str) -> Result<(), DriverError> {
        self.check("load_replace_candidate")?;
        self.staged = Some((LoadMode::Replace, config.to_owned()));
        self.driver
            .lock()
            .loaded
            .push((LoadMode::Replace, config.to_owned()));
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), DriverError> {
        self.check("rollback")?;
        self.driver.lock().rollbacks += 1;
        Ok(())
    }

    async fn cli(&mut self, commands: &[String]) -> Result<Value, DriverError> {
        self.check("cli")?;

        if let Some(canned) = self.driver.responses.get("cli") {
            return Ok(canned.clone());
        }

        // Default: empty output per command, keyed by the command text.
        let outputs: Map<String, Value> = commands
            .iter()
            .map(|command| (command.clone(), Value::String(String::new())))
            .collect();
        Ok(Value::Object(outputs))
    }

    async fn ping(&mut self, _options: &ProbeOptions) -> Result<Value, DriverError> {
        self.canned("ping")
    }

    async fn traceroute(&mut self, _options: &ProbeOptions) -> Result<Value, DriverError> {
        self.canned("traceroute")
    }

    async fn close(&mut self) -> Result<(), DriverError> {
        self.driver.lock().closed += 1;
        Ok(())
    }
}
