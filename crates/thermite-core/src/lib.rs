// thermite-core: Device automation domain layer between thermite-driver and consumers.

pub mod batch;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod model;
pub mod pretty;
pub mod render;

// ── Primary re-exports ──────────────────────────────────────────────
pub use batch::{Automator, BatchReport, DeviceOutcome};
pub use catalog::Action;
pub use error::CoreError;
pub use model::{ConfigData, DeviceRecord, OperationalData};
pub use pretty::pretty_print;
pub use render::render_candidate;

// Re-export the driver-facing types consumers need to assemble a batch.
pub use thermite_driver::{Credentials, DriverRegistry, ProbeOptions};
