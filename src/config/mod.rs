//! Settings management subsystem.
//!
//! # Data Flow
//! ```text
//! settings file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → Settings (validated, immutable)
//!     → handed to the form session and the transformer
//! ```
//!
//! # Design Decisions
//! - Settings are immutable once loaded
//! - All fields have defaults so no settings file is required
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_settings, load_settings_or_default, ConfigError};
pub use schema::{DebugConfig, LogFormat, ObservabilityConfig, Settings, TransformConfig};
