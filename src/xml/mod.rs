//! XML document model.
//!
//! # Data Flow
//! ```text
//! raw XML text
//!     → parser.rs (quick-xml events → owned Element tree)
//!     → tree.rs (Element / Node / Attribute, mutation helpers)
//!     → query.rs (descendants by name, configuration lookup, detach)
//!     → writer.rs (Element → XML text)
//! ```
//!
//! # Design Decisions
//! - Owned tree, `Clone` is a deep copy
//! - Names are kept as written (qualified); lookups match on local name
//! - Namespace declarations stay ordinary attributes; scope is resolved on demand
//! - Serialization is deterministic so documents can be compared as text

pub mod parser;
pub mod query;
pub mod tree;
pub mod writer;

use thiserror::Error;

pub use query::{find_configuration, Located, NamespaceScope};
pub use tree::{Attribute, Element, Node};

/// Errors produced while reading an XML document.
#[derive(Debug, Error)]
pub enum XmlError {
    #[error("xml parse: {0}")]
    Parse(#[from] quick_xml::Error),

    #[error("xml attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("utf-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("utf-8: {0}")]
    FromUtf8(#[from] std::string::FromUtf8Error),

    #[error("document has no root element")]
    Empty,

    #[error("document has more than one root element (second is <{0}>)")]
    MultipleRoots(String),

    #[error("element <{0}> is never closed")]
    Unclosed(String),

    #[error("closing tag without a matching opening tag")]
    UnexpectedEnd,

    #[error("text content outside the root element")]
    TextOutsideRoot,
}
