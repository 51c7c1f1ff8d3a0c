//! Telemetry for the finance data gateway.
//!
//! Two halves:
//! - local structured logging via `tracing` (JSON in production, pretty in
//!   development), and
//! - a best-effort relay client that forwards log lines and resource-access
//!   records to the external logging service.

pub mod error;
pub mod logging;
pub mod relay;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::init_logging;
pub use relay::{LogRelay, RelayConfig, Severity};
