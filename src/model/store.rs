//! In-memory configuration model.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::model::ConfigurationModel;
use crate::xml::Element;

/// Observer notified when the model asks its views to refresh.
pub trait ModelView: Send + Sync {
    fn refresh(&self, document: Option<&Element>);
}

/// Model backed by an atomically swapped document snapshot.
pub struct InMemoryModel {
    data: ArcSwapOption<Element>,
    views: Vec<Arc<dyn ModelView>>,
    refreshes: AtomicU64,
}

impl InMemoryModel {
    /// Create an empty model with no views.
    pub fn new() -> Self {
        Self {
            data: ArcSwapOption::empty(),
            views: Vec::new(),
            refreshes: AtomicU64::new(0),
        }
    }

    /// Register a view to be notified on refresh.
    pub fn with_view(mut self, view: Arc<dyn ModelView>) -> Self {
        self.views.push(view);
        self
    }

    /// Apply an edit to the current document, the way the editor UI would.
    ///
    /// Returns false when there is no document to edit.
    pub fn edit<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut Element),
    {
        let Some(current) = self.data.load_full() else {
            return false;
        };
        let mut next = Element::clone(&current);
        f(&mut next);
        self.data.store(Some(Arc::new(next)));
        true
    }

    /// Drop the current document.
    pub fn clear(&self) {
        self.data.store(None);
    }

    /// Number of refresh broadcasts issued so far.
    pub fn refresh_count(&self) -> u64 {
        self.refreshes.load(Ordering::Relaxed)
    }
}

impl Default for InMemoryModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigurationModel for InMemoryModel {
    fn get_data(&self) -> Option<Arc<Element>> {
        self.data.load_full()
    }

    fn put_data(&self, document: Element) {
        tracing::debug!(root = %document.name(), "Configuration document published to model");
        self.data.store(Some(Arc::new(document)));
    }

    fn refresh_all_views(&self) {
        self.refreshes.fetch_add(1, Ordering::Relaxed);
        let snapshot = self.data.load_full();
        for view in &self.views {
            view.refresh(snapshot.as_deref());
        }
        tracing::debug!(views = self.views.len(), "Views refreshed");
    }
}
