//! Configuration document transformer.
//!
//! # Data Flow
//! ```text
//! Load (load.rs):
//!     raw XML or nothing
//!     → locate configuration[server] (template on miss)
//!     → detach as standalone document
//!     → decode every password
//!     → model.put_data + model.refresh_all_views
//!
//! Save (save.rs):
//!     model.get_data (none → success, nothing appended)
//!     → deep clone
//!     → encode every password
//!     → strip bookkeeping attributes
//!     → append to destination
//! ```
//!
//! # Design Decisions
//! - The transformer holds rules and the template only; documents live in the model
//! - The editable document is never mutated by a save
//! - Codec failures are typed errors naming the element; nothing is published or appended

pub mod load;
pub mod save;
pub mod template;

use thiserror::Error;

use crate::codec::{CodecError, PasswordCodec};
use crate::config::loader::ConfigError;
use crate::config::schema::TransformConfig;
use crate::xml::Element;

pub use load::{LoadOutcome, SeedSource};
pub use template::builtin_template;

/// Which codec direction failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecDirection {
    Decode,
    Encode,
}

impl std::fmt::Display for CodecDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodecDirection::Decode => f.write_str("decode"),
            CodecDirection::Encode => f.write_str("encode"),
        }
    }
}

/// Errors raised by the load and save paths.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The password codec rejected the text of an element.
    #[error("failed to {direction} password at {path}: {source}")]
    Codec {
        direction: CodecDirection,
        path: String,
        #[source]
        source: CodecError,
    },
}

/// Applies the load and save transformations.
#[derive(Debug, Clone)]
pub struct ConfigTransformer {
    rules: TransformConfig,
    template: Element,
}

impl ConfigTransformer {
    /// Create a transformer with explicit rules and template.
    pub fn new(rules: TransformConfig, template: Element) -> Self {
        Self { rules, template }
    }

    /// Create a transformer from settings, resolving the template they name.
    pub fn from_config(rules: &TransformConfig) -> Result<Self, ConfigError> {
        let template = template::resolve_template(rules)?;
        Ok(Self::new(rules.clone(), template))
    }

    pub fn rules(&self) -> &TransformConfig {
        &self.rules
    }

    pub fn template(&self) -> &Element {
        &self.template
    }
}

impl Default for ConfigTransformer {
    fn default() -> Self {
        Self::new(TransformConfig::default(), builtin_template())
    }
}

/// Run every password element's text through the codec in the given direction.
///
/// Returns the number of elements rewritten. The first failure stops the walk;
/// callers discard the partially rewritten document.
fn rewrite_passwords(
    document: &mut Element,
    element_name: &str,
    direction: CodecDirection,
    codec: &dyn PasswordCodec,
) -> Result<usize, TransformError> {
    document.try_for_each_named_mut(element_name, |path, element| {
        let text = element.text();
        let rewritten = match direction {
            CodecDirection::Decode => codec.decode(&text),
            CodecDirection::Encode => codec.encode(&text),
        }
        .map_err(|source| TransformError::Codec {
            direction,
            path: path.to_string(),
            source,
        })?;
        element.set_text(rewritten);
        Ok(())
    })
}
