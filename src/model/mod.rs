//! Configuration model subsystem.
//!
//! # Data Flow
//! ```text
//! transform (load path)
//!     → put_data(document) → refresh_all_views() → registered views
//! editor UI
//!     → edit(...) replaces the stored document
//! transform (save path)
//!     → get_data() → deep clone → persisted copy
//! ```
//!
//! # Design Decisions
//! - The model is the durable owner of the editable document
//! - Readers get an `Arc` snapshot; replacing the document never disturbs a reader
//! - "No document" is a normal state, not an error

pub mod store;

use std::sync::Arc;

use crate::xml::Element;

pub use store::{InMemoryModel, ModelView};

/// Storage and broadcast contract for the editable configuration document.
pub trait ConfigurationModel: Send + Sync {
    /// Current document, if any has been published.
    fn get_data(&self) -> Option<Arc<Element>>;

    /// Replace the current document.
    fn put_data(&self, document: Element);

    /// Tell every dependent view to re-read the document.
    fn refresh_all_views(&self);
}
