use std::fmt;

use thiserror::Error;

/// What went wrong while opening a transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionKind {
    AuthenticationFailed,
    Unreachable,
    Timeout,
}

impl fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::AuthenticationFailed => "authentication failure",
            Self::Unreachable => "device unreachable",
            Self::Timeout => "connection timeout",
        };
        f.write_str(label)
    }
}

/// Top-level error type for the `thermite-driver` crate.
///
/// Covers every failure mode a driver can surface: platform resolution,
/// transport setup, and per-capability device operations.
/// `thermite-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum DriverError {
    // ── Resolution ──────────────────────────────────────────────────
    /// No driver registered for the device's declared operating system.
    #[error("no driver registered for platform '{platform}'")]
    UnsupportedPlatform { platform: String },

    // ── Transport ───────────────────────────────────────────────────
    /// Opening the transport failed (auth, unreachable, timeout).
    #[error("{kind} while connecting to {ip_address}: {reason}")]
    Connection {
        kind: ConnectionKind,
        ip_address: String,
        reason: String,
    },

    /// A device operation exceeded its deadline.
    #[error("operation timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Capabilities ────────────────────────────────────────────────
    /// The driver does not implement this capability. An expected,
    /// recoverable outcome -- the update engine records empty data.
    #[error("capability '{capability}' is not implemented by this driver")]
    NotSupported { capability: &'static str },

    /// The device rejected or failed an operation mid-session.
    #[error("'{operation}' failed on the device: {reason}")]
    Operation {
        operation: &'static str,
        reason: String,
    },
}

impl DriverError {
    /// Returns `true` for the recoverable missing-capability signal.
    pub fn is_not_supported(&self) -> bool {
        matches!(self, Self::NotSupported { .. })
    }

    /// Returns `true` if this error means the credentials were rejected.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Self::Connection {
                kind: ConnectionKind::AuthenticationFailed,
                ..
            }
        )
    }

    /// Returns `true` if this is a transient error worth retrying
    /// (retry policy is a caller concern -- drivers never retry).
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Connection {
                kind: ConnectionKind::Unreachable | ConnectionKind::Timeout,
                ..
            } | Self::Timeout { .. }
        )
    }
}
