//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use thermite_config::ConfigError;
use thermite_core::CoreError;

/// Exit codes, stable for scripting.
#[allow(dead_code)]
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const UNSUPPORTED: i32 = 5;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to {ip_address}")]
    #[diagnostic(
        code(thermite::connection_failed),
        help("Check that the device is reachable and its management plane is up.\nReason: {reason}")
    )]
    ConnectionFailed { ip_address: String, reason: String },

    #[error("Authentication failed for {ip_address}")]
    #[diagnostic(
        code(thermite::auth_failed),
        help("Verify the inventory credentials.\nSet THERMITE_PASSWORD (and THERMITE_ENABLE_PASSWORD if required).")
    )]
    AuthFailed { ip_address: String },

    #[error("Operation timed out after {seconds}s")]
    #[diagnostic(code(thermite::timeout))]
    Timeout { seconds: u64 },

    // ── Platforms / drivers ──────────────────────────────────────────

    #[error("No driver registered for platform '{platform}'")]
    #[diagnostic(
        code(thermite::unsupported_platform),
        help("Check the device's `platform` field in the inventory.\nThe built-in registry ships the 'mock' platform; vendor drivers register their own.")
    )]
    UnsupportedPlatform { platform: String },

    #[error("Operation '{operation}' is not supported by this driver")]
    #[diagnostic(code(thermite::unsupported))]
    Unsupported { operation: String },

    #[error("Device operation '{operation}' failed: {reason}")]
    #[diagnostic(code(thermite::operation_failed))]
    OperationFailed { operation: String, reason: String },

    // ── Candidates / templates ───────────────────────────────────────

    #[error("Template rendering failed for device '{device}'")]
    #[diagnostic(
        code(thermite::template),
        help("Every placeholder must match a device attribute.\nReason: {reason}")
    )]
    Template { device: String, reason: String },

    #[error("Device '{device}' has no candidate configuration staged")]
    #[diagnostic(
        code(thermite::no_candidate),
        help("Stage one with --candidate <file> or a candidate_file entry in the inventory.")
    )]
    NoCandidate { device: String },

    // ── Batch summary ────────────────────────────────────────────────

    #[error("{failed} of {total} devices failed")]
    #[diagnostic(
        code(thermite::batch_failed),
        help("Per-device outcomes are listed above.")
    )]
    BatchFailed { failed: usize, total: usize },

    // ── Inventory / validation ───────────────────────────────────────

    #[error("Device '{name}' not found in the inventory")]
    #[diagnostic(
        code(thermite::unknown_device),
        help("Run: thermite inventory to list configured devices")
    )]
    UnknownDevice { name: String },

    #[error("Unknown action '{name}'")]
    #[diagnostic(
        code(thermite::unknown_action),
        help("Run: thermite actions to list the catalog")
    )]
    UnknownAction { name: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(thermite::validation))]
    Validation { field: String, reason: String },

    #[error("No credentials configured: missing {field}")]
    #[diagnostic(
        code(thermite::no_credentials),
        help("Set it in the inventory's [credentials] block or via THERMITE_{env_hint}.")
    )]
    NoCredentials { field: String, env_hint: String },

    #[error("Inventory file problem")]
    #[diagnostic(
        code(thermite::inventory),
        help("Create one with: thermite init\nExpected at: {path}")
    )]
    InventoryLoad {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ── IO ───────────────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::UnknownDevice { .. } => exit_code::NOT_FOUND,
            Self::UnsupportedPlatform { .. } | Self::Unsupported { .. } => exit_code::UNSUPPORTED,
            Self::UnknownAction { .. } | Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnsupportedPlatform { platform } => {
                CliError::UnsupportedPlatform { platform }
            }

            CoreError::ConnectionFailed { ip_address, reason } => {
                CliError::ConnectionFailed { ip_address, reason }
            }

            CoreError::AuthenticationFailed { ip_address, .. } => {
                CliError::AuthFailed { ip_address }
            }

            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },

            CoreError::Template { device, reason } => CliError::Template { device, reason },

            CoreError::NoCandidate { device } => CliError::NoCandidate { device },

            CoreError::UnknownAction { name } => CliError::UnknownAction { name },

            CoreError::Unsupported { operation } => CliError::Unsupported { operation },

            CoreError::DriverOperation { operation, reason } => {
                CliError::OperationFailed { operation, reason }
            }

            CoreError::PostOpRefresh { operation, source } => CliError::OperationFailed {
                operation: operation.to_owned(),
                reason: format!("succeeded, but the follow-up refresh failed: {source}"),
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },

            ConfigError::NoCredentials { field, env_hint } => {
                CliError::NoCredentials { field, env_hint }
            }

            ConfigError::UnknownDevice { name } => CliError::UnknownDevice { name },

            other => CliError::InventoryLoad {
                path: thermite_config::inventory_path().display().to_string(),
                source: Box::new(other),
            },
        }
    }
}
