// ── Core error types ──
//
// User-facing errors from thermite-core. Consumers never see raw driver
// errors: the `From<DriverError>` impl translates them into
// domain-appropriate variants. `NotSupported` never reaches this type
// from the update engine's getter pass -- it is recovered there as empty
// data; it only surfaces (as `Unsupported`) when a lifecycle step such
// as commit hits a driver without that capability.

use thiserror::Error;

use thermite_driver::{ConnectionKind, DriverError};

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Resolution / connection ──────────────────────────────────────
    #[error("no driver registered for platform '{platform}'")]
    UnsupportedPlatform { platform: String },

    #[error("cannot connect to {ip_address}: {reason}")]
    ConnectionFailed { ip_address: String, reason: String },

    #[error("authentication failed for {ip_address}: {reason}")]
    AuthenticationFailed { ip_address: String, reason: String },

    #[error("operation timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Templates / candidates ───────────────────────────────────────
    #[error("template rendering failed for device '{device}': {reason}")]
    Template { device: String, reason: String },

    #[error("device '{device}' has no candidate configuration staged")]
    NoCandidate { device: String },

    // ── Actions / operations ─────────────────────────────────────────
    #[error("unknown action '{name}'")]
    UnknownAction { name: String },

    #[error("operation '{operation}' is not supported by this driver")]
    Unsupported { operation: String },

    #[error("driver operation '{operation}' failed: {reason}")]
    DriverOperation { operation: String, reason: String },

    /// The mutating step succeeded but the follow-up configuration
    /// refresh failed. Distinguished so callers can decide whether a
    /// committed-but-unread device counts as success.
    #[error("'{operation}' succeeded but the follow-up refresh failed")]
    PostOpRefresh {
        operation: &'static str,
        #[source]
        source: Box<CoreError>,
    },
}

// ── Conversion from driver-layer errors ──────────────────────────────

impl From<DriverError> for CoreError {
    fn from(err: DriverError) -> Self {
        match err {
            DriverError::UnsupportedPlatform { platform } => {
                CoreError::UnsupportedPlatform { platform }
            }
            DriverError::Connection {
                kind: ConnectionKind::AuthenticationFailed,
                ip_address,
                reason,
            } => CoreError::AuthenticationFailed { ip_address, reason },
            DriverError::Connection {
                kind,
                ip_address,
                reason,
            } => CoreError::ConnectionFailed {
                ip_address,
                reason: format!("{kind}: {reason}"),
            },
            DriverError::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            DriverError::NotSupported { capability } => CoreError::Unsupported {
                operation: capability.to_owned(),
            },
            DriverError::Operation { operation, reason } => CoreError::DriverOperation {
                operation: operation.to_owned(),
                reason,
            },
        }
    }
}
