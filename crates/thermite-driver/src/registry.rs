// ── Driver registry ──
//
// Maps a device's declared operating-system identifier to a vendor
// driver. Vendor drivers live in their own crates and register here;
// this crate ships only the built-in `mock` platform.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::credentials::Credentials;
use crate::error::DriverError;
use crate::mock::MockDriver;
use crate::session::Session;

/// A vendor-specific adapter for one device platform.
///
/// `open` connects and authenticates using the supplied credentials and
/// returns a live [`Session`]. No retry happens at this layer -- retry
/// policy is a caller concern.
#[async_trait]
pub trait Driver: Send + Sync {
    async fn open(&self, credentials: &Credentials) -> Result<Box<dyn Session>, DriverError>;
}

/// Registry of platform identifier -> driver factory.
///
/// Platform keys are matched case-insensitively: both registration and
/// resolution lowercase the identifier.
pub struct DriverRegistry {
    drivers: HashMap<String, Arc<dyn Driver>>,
}

impl DriverRegistry {
    /// An empty registry. Vendor driver crates register onto this.
    pub fn new() -> Self {
        Self {
            drivers: HashMap::new(),
        }
    }

    /// A registry with the built-in platforms: `mock`.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("mock", Arc::new(MockDriver::new()));
        registry
    }

    /// Register `driver` for `platform`, replacing any previous entry.
    pub fn register(&mut self, platform: impl Into<String>, driver: Arc<dyn Driver>) {
        let platform = platform.into().to_lowercase();
        debug!(%platform, "registering driver");
        self.drivers.insert(platform, driver);
    }

    /// Whether a driver is registered for `platform`.
    pub fn contains(&self, platform: &str) -> bool {
        self.drivers.contains_key(&platform.to_lowercase())
    }

    /// Registered platform identifiers, sorted for stable display.
    pub fn platforms(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.drivers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Resolve a driver for `platform` and open an authenticated session
    /// to `credentials.ip_address`.
    ///
    /// Fails with [`DriverError::UnsupportedPlatform`] before any
    /// transport is opened if no driver is registered for the key.
    pub async fn resolve(
        &self,
        credentials: &Credentials,
        platform: &str,
    ) -> Result<Box<dyn Session>, DriverError> {
        let key = platform.to_lowercase();
        let driver = self
            .drivers
            .get(&key)
            .ok_or_else(|| DriverError::UnsupportedPlatform {
                platform: platform.to_owned(),
            })?;

        debug!(platform = %key, ip = %credentials.ip_address, "opening session");
        driver.open(credentials).await
    }
}

impl Default for DriverRegistry {
    fn default() -> Self {
        Self::new()
    }
}
