// ── Batch lifecycle operations ──
//
// The entry point consumers drive. Each operation walks a batch of
// devices sequentially and independently: resolve a session, perform
// the steps, refresh the relevant state, close the session. One
// device's failure never aborts its siblings, and the session is closed
// on every path. Callers get a per-device outcome, never a single
// aggregate boolean.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use thermite_driver::{Credentials, DriverRegistry, ProbeOptions, Session};

use crate::catalog::Action;
use crate::engine;
use crate::error::CoreError;
use crate::model::DeviceRecord;
use crate::render;

// ── Reports ──────────────────────────────────────────────────────────

/// Outcome of one device within a batch.
#[derive(Debug)]
pub struct DeviceOutcome {
    pub device: String,
    pub result: Result<(), CoreError>,
}

/// Per-device outcomes of one batch operation, in batch order.
#[derive(Debug, Default)]
pub struct BatchReport {
    outcomes: Vec<DeviceOutcome>,
}

impl BatchReport {
    pub fn outcomes(&self) -> &[DeviceOutcome] {
        &self.outcomes
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn is_all_ok(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }

    /// Fold another report's outcomes into this one, preserving order.
    /// Lets callers shard a batch (e.g. per-host credentials) and still
    /// hand consumers a single report.
    pub fn merge(&mut self, other: BatchReport) {
        self.outcomes.extend(other.outcomes);
    }
}

// ── Operations ───────────────────────────────────────────────────────

/// What to do with a resolved session, per device.
enum LifecycleOp<'a> {
    Update(&'a BTreeSet<Action>),
    Commit,
    Discard,
    Load { replace: bool, commit: bool },
    Rollback,
}

impl LifecycleOp<'_> {
    fn name(&self) -> &'static str {
        match self {
            LifecycleOp::Update(_) => "update",
            LifecycleOp::Commit => "commit",
            LifecycleOp::Discard => "discard",
            LifecycleOp::Load { replace: false, commit: false } => "load_merge",
            LifecycleOp::Load { replace: false, commit: true } => "load_merge_commit",
            LifecycleOp::Load { replace: true, commit: false } => "load_replace",
            LifecycleOp::Load { replace: true, commit: true } => "load_replace_commit",
            LifecycleOp::Rollback => "rollback",
        }
    }
}

/// Batch automation over a driver registry.
///
/// Cheaply cloneable; holds no per-device state. Sessions are resolved
/// per device per call and never reused.
#[derive(Clone)]
pub struct Automator {
    registry: Arc<DriverRegistry>,
}

impl Automator {
    pub fn new(registry: Arc<DriverRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<DriverRegistry> {
        &self.registry
    }

    // ── Lifecycle entry points ───────────────────────────────────────

    /// Pull the requested catalog actions from every device.
    pub async fn update(
        &self,
        credentials: &Credentials,
        requested: &BTreeSet<Action>,
        devices: &mut [DeviceRecord],
    ) -> BatchReport {
        self.run_batch(credentials, devices, &LifecycleOp::Update(requested))
            .await
    }

    /// Commit the pending candidate on every device.
    pub async fn commit(
        &self,
        credentials: &Credentials,
        devices: &mut [DeviceRecord],
    ) -> BatchReport {
        self.run_batch(credentials, devices, &LifecycleOp::Commit).await
    }

    /// Discard the pending candidate on every device.
    pub async fn discard(
        &self,
        credentials: &Credentials,
        devices: &mut [DeviceRecord],
    ) -> BatchReport {
        self.run_batch(credentials, devices, &LifecycleOp::Discard).await
    }

    /// Render each device's candidate and stage it as a merge.
    pub async fn load_merge(
        &self,
        credentials: &Credentials,
        devices: &mut [DeviceRecord],
    ) -> BatchReport {
        self.run_batch(
            credentials,
            devices,
            &LifecycleOp::Load { replace: false, commit: false },
        )
        .await
    }

    /// As [`load_merge`](Self::load_merge), then commit.
    pub async fn load_merge_commit(
        &self,
        credentials: &Credentials,
        devices: &mut [DeviceRecord],
    ) -> BatchReport {
        self.run_batch(
            credentials,
            devices,
            &LifecycleOp::Load { replace: false, commit: true },
        )
        .await
    }

    /// Render each device's candidate and stage it as a full replacement.
    pub async fn load_replace(
        &self,
        credentials: &Credentials,
        devices: &mut [DeviceRecord],
    ) -> BatchReport {
        self.run_batch(
            credentials,
            devices,
            &LifecycleOp::Load { replace: true, commit: false },
        )
        .await
    }

    /// As [`load_replace`](Self::load_replace), then commit.
    pub async fn load_replace_commit(
        &self,
        credentials: &Credentials,
        devices: &mut [DeviceRecord],
    ) -> BatchReport {
        self.run_batch(
            credentials,
            devices,
            &LifecycleOp::Load { replace: true, commit: true },
        )
        .await
    }

    /// Revert every device to its previous committed configuration.
    pub async fn rollback(
        &self,
        credentials: &Credentials,
        devices: &mut [DeviceRecord],
    ) -> BatchReport {
        self.run_batch(credentials, devices, &LifecycleOp::Rollback).await
    }

    // ── Diagnostics ──────────────────────────────────────────────────

    /// Reachability probe from a single device.
    pub async fn ping(
        &self,
        credentials: &Credentials,
        device: &DeviceRecord,
        options: &ProbeOptions,
    ) -> Result<Value, CoreError> {
        self.probe(credentials, device, options, false).await
    }

    /// Path-trace probe from a single device.
    pub async fn traceroute(
        &self,
        credentials: &Credentials,
        device: &DeviceRecord,
        options: &ProbeOptions,
    ) -> Result<Value, CoreError> {
        self.probe(credentials, device, options, true).await
    }

    // ── Internals ────────────────────────────────────────────────────

    async fn run_batch(
        &self,
        credentials: &Credentials,
        devices: &mut [DeviceRecord],
        op: &LifecycleOp<'_>,
    ) -> BatchReport {
        let mut report = BatchReport::default();

        for device in devices.iter_mut() {
            let result = self.run_device(credentials, device, op).await;
            match &result {
                Ok(()) => debug!(device = %device.name, op = op.name(), "device done"),
                Err(err) => warn!(device = %device.name, op = op.name(), error = %err, "device failed"),
            }
            report.outcomes.push(DeviceOutcome {
                device: device.name.clone(),
                result,
            });
        }

        info!(
            op = op.name(),
            ok = report.succeeded(),
            failed = report.failed(),
            "batch complete"
        );
        report
    }

    /// Resolve, run, and always close -- exactly once, on every path.
    async fn run_device(
        &self,
        credentials: &Credentials,
        device: &mut DeviceRecord,
        op: &LifecycleOp<'_>,
    ) -> Result<(), CoreError> {
        let mut session = self
            .registry
            .resolve(credentials, &device.operating_system)
            .await?;

        let result = device_steps(session.as_mut(), device, op).await;

        if let Err(err) = session.close().await {
            warn!(device = %device.name, error = %err, "session close failed (non-fatal)");
        }
        result
    }

    async fn probe(
        &self,
        credentials: &Credentials,
        device: &DeviceRecord,
        options: &ProbeOptions,
        trace: bool,
    ) -> Result<Value, CoreError> {
        let mut session = self
            .registry
            .resolve(credentials, &device.operating_system)
            .await?;

        let result = if trace {
            session.traceroute(options).await
        } else {
            session.ping(options).await
        };

        if let Err(err) = session.close().await {
            warn!(device = %device.name, error = %err, "session close failed (non-fatal)");
        }
        result.map_err(CoreError::from)
    }
}

/// The per-device step sequence for each lifecycle operation.
async fn device_steps(
    session: &mut dyn Session,
    device: &mut DeviceRecord,
    op: &LifecycleOp<'_>,
) -> Result<(), CoreError> {
    match op {
        LifecycleOp::Update(requested) => engine::update(session, device, requested).await,

        LifecycleOp::Commit => {
            session.commit_config().await?;
            refresh_configuration(session, device, op.name()).await
        }

        LifecycleOp::Discard => {
            session.discard_config().await?;
            refresh_configuration(session, device, op.name()).await
        }

        LifecycleOp::Load { replace, commit } => {
            // Rendered fresh from this device's current attributes --
            // never cached across devices.
            let rendered = render::render_candidate(device)?;
            if *replace {
                session.load_replace_candidate(&rendered).await?;
            } else {
                session.load_merge_candidate(&rendered).await?;
            }
            if *commit {
                session.commit_config().await?;
            }
            refresh_configuration(session, device, op.name()).await
        }

        LifecycleOp::Rollback => {
            session.rollback().await?;
            refresh_configuration(session, device, op.name()).await
        }
    }
}

/// Post-operation refresh of the Configuration state. A failure here is
/// reported as the distinguished `PostOpRefresh` outcome: the mutating
/// step already succeeded on the device.
async fn refresh_configuration(
    session: &mut dyn Session,
    device: &mut DeviceRecord,
    operation: &'static str,
) -> Result<(), CoreError> {
    let configuration_only: BTreeSet<Action> = [Action::Configuration].into_iter().collect();
    engine::update(session, device, &configuration_only)
        .await
        .map_err(|source| CoreError::PostOpRefresh {
            operation,
            source: Box::new(source),
        })
}
