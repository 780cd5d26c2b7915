// ── Device record ──
//
// One managed network element: its declared platform, the free-form
// attribute bag used for template interpolation, and the operational
// data pulled from it. The operational-data store is written only by
// the update engine and the candidate write-back -- it grows
// monotonically and is never pruned automatically.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::catalog::Action;

/// Candidate/running/compare configuration texts for one device.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigData {
    /// Pending configuration text staged for push. Caller/editor-supplied,
    /// possibly a template over the device's attributes.
    pub candidate: Option<String>,
    /// Driver-reported running configuration, when the Configuration
    /// getter surfaced one.
    pub running: Option<String>,
    /// Driver-reported diff between running and candidate.
    pub compare: Option<String>,
}

/// Operational state pulled from a device, keyed by catalog action in
/// catalog order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OperationalData {
    /// Getter results, serialized flat under their catalog names.
    #[serde(flatten)]
    entries: IndexMap<Action, Value>,
    pub configuration: ConfigData,
    /// Raw `show logging` output from the Logging composite.
    pub cli: Option<Value>,
    /// When the last engine pass over this device finished.
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl OperationalData {
    /// The stored result for `action`, if an engine pass fetched it.
    /// An empty object means the device's driver lacks the capability.
    pub fn get(&self, action: Action) -> Option<&Value> {
        self.entries.get(&action)
    }

    /// Actions with stored results, in the order they were fetched.
    pub fn actions(&self) -> impl Iterator<Item = Action> + '_ {
        self.entries.keys().copied()
    }

    /// Stored (action, result) pairs in fetch order.
    pub fn entries(&self) -> impl Iterator<Item = (Action, &Value)> + '_ {
        self.entries.iter().map(|(action, value)| (*action, value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn insert(&mut self, action: Action, value: Value) {
        self.entries.insert(action, value);
    }
}

/// One managed network element.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceRecord {
    /// Display name, unique within a batch.
    pub name: String,
    /// Platform identifier used (case-insensitively) to resolve a driver.
    pub operating_system: String,
    /// Free-form attributes (addressing, naming, site data). The full
    /// set is exposed to candidate templates.
    pub attributes: BTreeMap<String, String>,
    pub operational_data: OperationalData,
}

impl DeviceRecord {
    pub fn new(name: impl Into<String>, operating_system: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            operating_system: operating_system.into(),
            attributes: BTreeMap::new(),
            operational_data: OperationalData::default(),
        }
    }

    /// Builder-style attribute insertion.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Stage candidate configuration text for the next load operation.
    /// This is the write-back seam config editors use.
    pub fn set_candidate(&mut self, text: impl Into<String>) {
        self.operational_data.configuration.candidate = Some(text.into());
    }

    pub fn candidate(&self) -> Option<&str> {
        self.operational_data.configuration.candidate.as_deref()
    }

    /// The closed substitution set for template rendering: every entry
    /// of `attributes` plus `name` and `operating_system` (record fields
    /// win on collision).
    pub fn template_vars(&self) -> BTreeMap<&str, &str> {
        let mut vars: BTreeMap<&str, &str> = self
            .attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect();
        vars.insert("name", &self.name);
        vars.insert("operating_system", &self.operating_system);
        vars
    }
}
