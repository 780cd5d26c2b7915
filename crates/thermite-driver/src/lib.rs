// thermite-driver: Vendor driver abstraction for network device sessions.

pub mod credentials;
pub mod error;
pub mod mock;
pub mod registry;
pub mod session;

pub use credentials::Credentials;
pub use error::{ConnectionKind, DriverError};
pub use registry::{Driver, DriverRegistry};
pub use session::{ProbeOptions, Session};
