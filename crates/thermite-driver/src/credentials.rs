// ── Device credentials ──
//
// Ephemeral, caller-supplied per batch call. Secrets live in
// `SecretString` so they never appear in Debug output or logs; drivers
// expose them only at the moment a transport is opened.

use std::fmt;

use secrecy::{ExposeSecret as _, SecretString};

/// Credentials for opening a management session to one device.
#[derive(Clone)]
pub struct Credentials {
    /// Management address the transport connects to.
    pub ip_address: String,
    /// Login username.
    pub username: String,
    password: SecretString,
    /// Enable/privileged-exec secret, where the platform needs one.
    enable_password: Option<SecretString>,
}

impl Credentials {
    pub fn new(
        ip_address: impl Into<String>,
        username: impl Into<String>,
        password: SecretString,
    ) -> Self {
        Self {
            ip_address: ip_address.into(),
            username: username.into(),
            password,
            enable_password: None,
        }
    }

    /// Attach an enable/privileged-exec secret.
    pub fn with_enable_password(mut self, secret: SecretString) -> Self {
        self.enable_password = Some(secret);
        self
    }

    /// The login password. Only drivers should call this, at open time.
    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }

    /// The enable secret, if configured.
    pub fn enable_password(&self) -> Option<&str> {
        self.enable_password.as_ref().map(|secret| secret.expose_secret())
    }

    /// The same account credentials, re-targeted at another address.
    ///
    /// Batch callers whose devices live at different management addresses
    /// use this to derive a per-device `Credentials` from a shared account.
    pub fn for_host(&self, ip_address: impl Into<String>) -> Self {
        Self {
            ip_address: ip_address.into(),
            ..self.clone()
        }
    }
}

// Manual impl: secrets stay out of Debug output.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("ip_address", &self.ip_address)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field(
                "enable_password",
                &self.enable_password.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}
