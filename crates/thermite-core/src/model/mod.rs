// ── Domain model ──

pub mod device;

pub use device::{ConfigData, DeviceRecord, OperationalData};
