//! Load path: raw configuration XML → editable document.

use crate::codec::PasswordCodec;
use crate::model::ConfigurationModel;
use crate::transform::{rewrite_passwords, CodecDirection, ConfigTransformer, TransformError};
use crate::xml::{find_configuration, Element};

/// Where the editable document was seeded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedSource {
    /// A `configuration` element found in the supplied XML.
    Supplied,
    /// The template, because nothing usable was supplied.
    Template,
}

/// Result of a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOutcome {
    pub source: SeedSource,
    pub passwords_decoded: usize,
}

impl LoadOutcome {
    pub fn used_template(&self) -> bool {
        self.source == SeedSource::Template
    }
}

impl ConfigTransformer {
    /// Build the editable document and publish it to the model.
    ///
    /// On a codec failure the model is left as it was.
    pub fn load(
        &self,
        raw: Option<&str>,
        codec: &dyn PasswordCodec,
        model: &dyn ConfigurationModel,
    ) -> Result<LoadOutcome, TransformError> {
        let (document, outcome) = self.prepare_editable(raw, codec)?;

        model.put_data(document);
        model.refresh_all_views();

        tracing::info!(
            source = ?outcome.source,
            passwords_decoded = outcome.passwords_decoded,
            codec = codec.name(),
            "Configuration loaded into model"
        );
        Ok(outcome)
    }

    /// Build the editable document without publishing it.
    pub fn prepare_editable(
        &self,
        raw: Option<&str>,
        codec: &dyn PasswordCodec,
    ) -> Result<(Element, LoadOutcome), TransformError> {
        let (mut document, source) = self.locate(raw);
        let passwords_decoded = rewrite_passwords(
            &mut document,
            &self.rules().password_element,
            CodecDirection::Decode,
            codec,
        )?;
        Ok((
            document,
            LoadOutcome {
                source,
                passwords_decoded,
            },
        ))
    }

    /// Find the authoritative configuration node, detached, or fall back to the template.
    fn locate(&self, raw: Option<&str>) -> (Element, SeedSource) {
        let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
            tracing::debug!("No configuration supplied, seeding from template");
            return (self.template().clone(), SeedSource::Template);
        };

        let root = match Element::parse(raw) {
            Ok(root) => root,
            Err(e) => {
                tracing::warn!(error = %e, "Configuration XML is not well-formed, seeding from template");
                return (self.template().clone(), SeedSource::Template);
            }
        };

        match find_configuration(&root, self.rules().required_namespace()) {
            Some(located) => (located.detach(), SeedSource::Supplied),
            None => {
                tracing::warn!(
                    root = %root.name(),
                    "No configuration element with a server child, seeding from template"
                );
                (self.template().clone(), SeedSource::Template)
            }
        }
    }
}
