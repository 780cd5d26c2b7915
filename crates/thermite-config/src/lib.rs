//! Shared configuration for the thermite CLI.
//!
//! TOML inventories (device list + credential settings), credential
//! resolution (named env var, well-known env var, plaintext), and
//! translation into `thermite_core` device records and credentials.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use thermite_core::{Credentials, DeviceRecord};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no {field} configured -- set it in the inventory or via THERMITE_{env_hint}")]
    NoCredentials { field: String, env_hint: String },

    #[error("device '{name}' not found in the inventory")]
    UnknownDevice { name: String },

    #[error("failed to serialize inventory: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("inventory loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML inventory structs ──────────────────────────────────────────

/// Top-level TOML inventory: one credential block, many devices.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Inventory {
    /// Shared management account for the inventory's devices.
    #[serde(default)]
    pub credentials: CredentialSettings,

    /// Managed devices.
    #[serde(default)]
    pub devices: Vec<DeviceEntry>,
}

/// Credential settings. Secrets may be inline (discouraged) or named
/// environment variables.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CredentialSettings {
    pub username: Option<String>,

    /// Plaintext password -- prefer `password_env`.
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// Plaintext enable/privileged-exec secret -- prefer the env form.
    pub enable_password: Option<String>,

    /// Environment variable name containing the enable secret.
    pub enable_password_env: Option<String>,
}

/// One device in the inventory.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeviceEntry {
    /// Display name, unique within the inventory.
    pub name: String,

    /// Platform identifier used to resolve a driver (e.g. "ios", "mock").
    pub platform: String,

    /// Management address.
    pub ip_address: String,

    /// Candidate configuration template, staged before load operations.
    pub candidate_file: Option<PathBuf>,

    /// Free-form attributes exposed to candidate templates.
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

impl DeviceEntry {
    /// Build the core device record. The management address joins the
    /// attribute set so templates can interpolate `{{ ip_address }}`.
    pub fn to_record(&self) -> DeviceRecord {
        let mut record = DeviceRecord::new(&self.name, &self.platform)
            .with_attribute("ip_address", &self.ip_address);
        for (key, value) in &self.attributes {
            record = record.with_attribute(key, value);
        }
        record
    }
}

impl Inventory {
    pub fn device(&self, name: &str) -> Option<&DeviceEntry> {
        self.devices.iter().find(|d| d.name == name)
    }

    /// Select devices by name, or every device when `names` is empty.
    pub fn select(&self, names: &[String]) -> Result<Vec<&DeviceEntry>, ConfigError> {
        if names.is_empty() {
            return Ok(self.devices.iter().collect());
        }
        names
            .iter()
            .map(|name| {
                self.device(name).ok_or_else(|| ConfigError::UnknownDevice {
                    name: name.clone(),
                })
            })
            .collect()
    }

    /// A starter inventory for `thermite init`.
    pub fn sample() -> Self {
        Self {
            credentials: CredentialSettings {
                username: Some("admin".into()),
                password_env: Some("THERMITE_PASSWORD".into()),
                ..CredentialSettings::default()
            },
            devices: vec![DeviceEntry {
                name: "lab-router".into(),
                platform: "mock".into(),
                ip_address: "192.0.2.1".into(),
                candidate_file: None,
                attributes: HashMap::from([("site".into(), "lab".into())]),
            }],
        }
    }
}

// ── Inventory file path ─────────────────────────────────────────────

/// Resolve the default inventory path via XDG / platform conventions.
pub fn inventory_path() -> PathBuf {
    ProjectDirs::from("net", "thermite", "thermite").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("inventory.toml");
            p
        },
        |dirs| dirs.config_dir().join("inventory.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("thermite");
    p
}

// ── Inventory loading / saving ──────────────────────────────────────

/// Load an inventory from `path` (or the default path) plus environment
/// overrides (`THERMITE_CREDENTIALS__USERNAME` and friends).
pub fn load_inventory(path: Option<&Path>) -> Result<Inventory, ConfigError> {
    let path = path.map_or_else(inventory_path, Path::to_path_buf);

    let figment = Figment::new()
        .merge(Serialized::defaults(Inventory::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("THERMITE_").split("__"));

    let inventory: Inventory = figment.extract()?;
    Ok(inventory)
}

/// Serialize an inventory to TOML and write it to `path`.
pub fn save_inventory(inventory: &Inventory, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(inventory)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the shared account into per-device [`Credentials`].
///
/// Password chain: configured env var name, then `THERMITE_PASSWORD`,
/// then plaintext. The enable secret follows the same chain with
/// `THERMITE_ENABLE_PASSWORD` and is optional.
pub fn resolve_credentials(
    settings: &CredentialSettings,
    ip_address: &str,
) -> Result<Credentials, ConfigError> {
    let username = settings
        .username
        .clone()
        .or_else(|| std::env::var("THERMITE_USERNAME").ok())
        .ok_or_else(|| ConfigError::NoCredentials {
            field: "username".into(),
            env_hint: "USERNAME".into(),
        })?;

    let password = resolve_secret(
        settings.password_env.as_deref(),
        "THERMITE_PASSWORD",
        settings.password.as_deref(),
    )
    .ok_or_else(|| ConfigError::NoCredentials {
        field: "password".into(),
        env_hint: "PASSWORD".into(),
    })?;

    let mut credentials = Credentials::new(ip_address, username, password);

    if let Some(secret) = resolve_secret(
        settings.enable_password_env.as_deref(),
        "THERMITE_ENABLE_PASSWORD",
        settings.enable_password.as_deref(),
    ) {
        credentials = credentials.with_enable_password(secret);
    }

    Ok(credentials)
}

fn resolve_secret(
    env_name: Option<&str>,
    well_known_env: &str,
    plaintext: Option<&str>,
) -> Option<SecretString> {
    if let Some(name) = env_name {
        if let Ok(value) = std::env::var(name) {
            return Some(SecretString::from(value));
        }
    }
    if let Ok(value) = std::env::var(well_known_env) {
        return Some(SecretString::from(value));
    }
    plaintext.map(|value| SecretString::from(value.to_owned()))
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use std::io::Write as _;

    use super::*;

    const SAMPLE: &str = r#"
[credentials]
username = "admin"
password = "plaintext-pw"

[[devices]]
name = "edge1"
platform = "ios"
ip_address = "10.0.0.1"

[devices.attributes]
site = "fra1"

[[devices]]
name = "edge2"
platform = "mock"
ip_address = "10.0.0.2"
"#;

    fn write_sample() -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("tempfile");
        file.write_all(SAMPLE.as_bytes()).expect("write");
        file
    }

    #[test]
    fn parses_inventory_toml() {
        let file = write_sample();
        let inventory = load_inventory(Some(file.path())).expect("load");

        assert_eq!(inventory.devices.len(), 2);
        assert_eq!(inventory.devices[0].name, "edge1");
        assert_eq!(inventory.devices[0].attributes.get("site"), Some(&"fra1".to_owned()));
        assert_eq!(inventory.credentials.username.as_deref(), Some("admin"));
    }

    #[test]
    fn select_by_name_and_select_all() {
        let file = write_sample();
        let inventory = load_inventory(Some(file.path())).expect("load");

        let all = inventory.select(&[]).expect("all");
        assert_eq!(all.len(), 2);

        let one = inventory.select(&["edge2".to_owned()]).expect("one");
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].platform, "mock");

        let err = inventory.select(&["edge9".to_owned()]).expect_err("unknown");
        assert!(matches!(err, ConfigError::UnknownDevice { ref name } if name == "edge9"));
    }

    #[test]
    fn device_entry_to_record_includes_ip_attribute() {
        let file = write_sample();
        let inventory = load_inventory(Some(file.path())).expect("load");

        let record = inventory.devices[0].to_record();
        assert_eq!(record.operating_system, "ios");
        assert_eq!(record.attribute("ip_address"), Some("10.0.0.1"));
        assert_eq!(record.attribute("site"), Some("fra1"));
    }

    #[test]
    fn plaintext_password_resolves_when_env_unset() {
        let settings = CredentialSettings {
            username: Some("admin".into()),
            password: Some("plaintext-pw".into()),
            // Point the env chain at a name that is never set.
            password_env: Some("THERMITE_TEST_UNSET_PASSWORD_VAR".into()),
            ..CredentialSettings::default()
        };

        let credentials = resolve_credentials(&settings, "10.0.0.1").expect("resolve");
        assert_eq!(credentials.ip_address, "10.0.0.1");
        assert_eq!(credentials.username, "admin");
        assert_eq!(credentials.password(), "plaintext-pw");
        assert!(credentials.enable_password().is_none());
    }

    #[test]
    fn named_env_var_wins_over_plaintext() {
        figment::Jail::expect_with(|jail| {
            // Unique variable name keeps this test independent of others.
            jail.set_env("THERMITE_TEST_PW_OVERRIDE", "from-env");

            let settings = CredentialSettings {
                username: Some("admin".into()),
                password: Some("plaintext-pw".into()),
                password_env: Some("THERMITE_TEST_PW_OVERRIDE".into()),
                ..CredentialSettings::default()
            };

            let credentials =
                resolve_credentials(&settings, "10.0.0.1").expect("resolve");
            assert_eq!(credentials.password(), "from-env");
            Ok(())
        });
    }

    #[test]
    fn missing_password_is_an_error() {
        let settings = CredentialSettings {
            username: Some("admin".into()),
            password_env: Some("THERMITE_TEST_UNSET_PASSWORD_VAR".into()),
            ..CredentialSettings::default()
        };

        let err = resolve_credentials(&settings, "10.0.0.1").expect_err("should fail");
        assert!(matches!(err, ConfigError::NoCredentials { ref field, .. } if field == "password"));
    }
}
