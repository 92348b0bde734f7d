//! Values exchanged with the host on lifecycle events.

use crate::transform::LoadOutcome;

/// What the host hands over on the initialization event.
#[derive(Debug, Clone, Default)]
pub struct HostContext {
    /// Stored configuration XML of an existing connector.
    pub configuration_xml: Option<String>,

    /// Identity of the user editing the form.
    pub user: Option<String>,

    /// Whether the form runs inside the connector host. A form opened on its own
    /// (preview) always starts from the template.
    pub embedded: bool,
}

impl HostContext {
    /// Context for a connector whose configuration is already stored.
    pub fn embedded(configuration_xml: impl Into<String>) -> Self {
        Self {
            configuration_xml: Some(configuration_xml.into()),
            user: None,
            embedded: true,
        }
    }

    /// Context for a standalone preview.
    pub fn preview() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// XML the load path should use, if any.
    pub(crate) fn seed_xml(&self) -> Option<&str> {
        if self.embedded {
            self.configuration_xml.as_deref()
        } else {
            None
        }
    }
}

/// Result of handling the initialization event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitOutcome {
    pub load: LoadOutcome,

    /// Whether the test-save control should be shown.
    pub test_save_visible: bool,
}
