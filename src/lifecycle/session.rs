//! Form session: the handlers the host calls, bound to one editor instance.

use std::sync::Arc;

use thiserror::Error;

use crate::codec::PasswordCodec;
use crate::config::loader::ConfigError;
use crate::config::schema::Settings;
use crate::lifecycle::context::{HostContext, InitOutcome};
use crate::lifecycle::lease::CodecLease;
use crate::model::ConfigurationModel;
use crate::transform::{ConfigTransformer, TransformError};
use crate::xml::Element;

/// Root element of the scratch destination used by test-save.
const TEST_SAVE_ROOT: &str = "config";

/// Errors raised by session handlers.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("form session is closed")]
    Closed,

    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// One open configuration form.
pub struct FormSession {
    settings: Settings,
    transformer: ConfigTransformer,
    model: Arc<dyn ConfigurationModel>,
    lease: Option<CodecLease>,
    initialized: bool,
    debug_user: bool,
}

impl FormSession {
    /// Open a session: resolve the template and acquire the codec.
    pub fn open(
        settings: Settings,
        codec: Arc<dyn PasswordCodec>,
        model: Arc<dyn ConfigurationModel>,
    ) -> Result<Self, ConfigError> {
        let transformer = ConfigTransformer::from_config(&settings.transform)?;
        Ok(Self {
            settings,
            transformer,
            model,
            lease: Some(CodecLease::acquire(codec)),
            initialized: false,
            debug_user: false,
        })
    }

    /// Handle the host's initialization event.
    pub fn on_init(&mut self, context: &HostContext) -> Result<InitOutcome, SessionError> {
        let codec = self.lease.as_ref().ok_or(SessionError::Closed)?.codec();

        self.debug_user = context
            .user
            .as_deref()
            .is_some_and(|user| self.settings.debug.is_debug_user(user));
        if self.debug_user {
            tracing::debug!(
                user = context.user.as_deref().unwrap_or_default(),
                embedded = context.embedded,
                has_configuration = context.configuration_xml.is_some(),
                "Debug user opened configuration form"
            );
        }

        let load = self
            .transformer
            .load(context.seed_xml(), codec, self.model.as_ref())?;
        self.initialized = true;

        Ok(InitOutcome {
            load,
            test_save_visible: self.debug_user,
        })
    }

    /// Handle the host's save event: append the persistable configuration to `destination`.
    pub fn save(&self, destination: &mut Element) -> Result<bool, SessionError> {
        let codec = self.lease.as_ref().ok_or(SessionError::Closed)?.codec();
        if self.debug_user {
            tracing::debug!(destination = %destination.name(), "Debug user saving configuration");
        }
        Ok(self.transformer.save(self.model.as_ref(), codec, destination)?)
    }

    /// Save into a fresh `<config/>` element and return its XML.
    pub fn test_save(&self) -> Result<String, SessionError> {
        let mut scratch = Element::new(TEST_SAVE_ROOT);
        self.save(&mut scratch)?;
        Ok(scratch.to_xml_string())
    }

    /// Handle the host's close event. Safe to call more than once.
    pub fn close(&mut self) {
        if self.lease.take().is_some() {
            tracing::info!("Configuration form closed");
        }
        self.initialized = false;
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_open(&self) -> bool {
        self.lease.is_some()
    }

    pub fn model(&self) -> &Arc<dyn ConfigurationModel> {
        &self.model
    }

    pub fn transformer(&self) -> &ConfigTransformer {
        &self.transformer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Base64Codec;
    use crate::model::InMemoryModel;

    fn open_session(settings: Settings) -> (FormSession, Arc<InMemoryModel>, Arc<dyn PasswordCodec>) {
        let model = Arc::new(InMemoryModel::new());
        let codec: Arc<dyn PasswordCodec> = Arc::new(Base64Codec);
        let session = FormSession::open(settings, codec.clone(), model.clone()).unwrap();
        (session, model, codec)
    }

    #[test]
    fn test_close_releases_codec_once() {
        let (mut session, _model, codec) = open_session(Settings::default());
        assert_eq!(Arc::strong_count(&codec), 2);

        session.close();
        assert_eq!(Arc::strong_count(&codec), 1);
        assert!(!session.is_open());

        session.close();
        assert!(matches!(
            session.on_init(&HostContext::preview()),
            Err(SessionError::Closed)
        ));
        assert!(matches!(session.test_save(), Err(SessionError::Closed)));
    }

    #[test]
    fn test_drop_releases_codec() {
        let (session, _model, codec) = open_session(Settings::default());
        drop(session);
        assert_eq!(Arc::strong_count(&codec), 1);
    }

    #[test]
    fn test_save_before_init() {
        let (session, model, _codec) = open_session(Settings::default());

        let mut destination = Element::new("config");
        assert!(session.save(&mut destination).unwrap());
        assert!(destination.children().is_empty());

        // Model seeded by another view before the init event
        model.put_data(Element::parse("<configuration><server/><password>foo</password></configuration>").unwrap());
        assert!(session.save(&mut destination).unwrap());
        assert_eq!(
            destination.to_xml_string(),
            "<config><configuration><server/><password>Zm9v</password></configuration></config>"
        );
        assert!(!session.is_initialized());
    }

    #[test]
    fn test_debug_gate() {
        let mut settings = Settings::default();
        settings.debug.users = vec!["dev".to_string()];

        let (mut session, _model, _codec) = open_session(settings.clone());
        let outcome = session
            .on_init(&HostContext::preview().with_user("dev"))
            .unwrap();
        assert!(outcome.test_save_visible);

        let (mut session, _model, _codec) = open_session(settings);
        let outcome = session
            .on_init(&HostContext::preview().with_user("someone"))
            .unwrap();
        assert!(!outcome.test_save_visible);
    }

    #[test]
    fn test_preview_ignores_supplied_xml() {
        let (mut session, model, _codec) = open_session(Settings::default());
        let context = HostContext {
            configuration_xml: Some(
                "<configuration><server>ldap</server></configuration>".to_string(),
            ),
            user: None,
            embedded: false,
        };

        let outcome = session.on_init(&context).unwrap();
        assert!(outcome.load.used_template());
        assert_eq!(
            model.get_data().unwrap().to_xml_string(),
            session.transformer().template().to_xml_string()
        );
    }

    #[test]
    fn test_embedded_round_trip() {
        let (mut session, model, _codec) = open_session(Settings::default());
        session
            .on_init(&HostContext::embedded(
                "<configuration><server><password>Zm9v</password></server></configuration>",
            ))
            .unwrap();
        assert!(session.is_initialized());

        model.edit(|doc| {
            doc.for_each_element_mut(|el| el.set_attribute("inserted", "true"));
        });

        assert_eq!(
            session.test_save().unwrap(),
            "<config><configuration><server><password>Zm9v</password></server></configuration></config>"
        );
    }
}
