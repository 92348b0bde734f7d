//! Connector Configuration Form Library
//!
//! Seeds a configuration editor from stored or template XML with passwords
//! decoded, and turns the edited document back into a clean persistable copy.

pub mod codec;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod observability;
pub mod transform;
pub mod xml;

pub use codec::{Base64Codec, PasswordCodec};
pub use config::Settings;
pub use lifecycle::{FormSession, HostContext};
pub use model::{ConfigurationModel, InMemoryModel};
pub use transform::ConfigTransformer;
pub use xml::Element;
