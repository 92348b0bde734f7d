//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields (load source, counts, paths)
//!
//! logging.rs installs the subscriber:
//!     → stderr, pretty or JSON
//!     → filter from RUST_LOG, else settings.observability.log_level
//! ```
//!
//! # Design Decisions
//! - Logs go to stderr so stdout stays clean for XML output
//! - Password values never appear in events, only counts and element paths

pub mod logging;

pub use logging::init_logging;
