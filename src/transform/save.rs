//! Save path: editable document → persistable copy appended to a destination.

use crate::codec::PasswordCodec;
use crate::model::ConfigurationModel;
use crate::transform::{rewrite_passwords, CodecDirection, ConfigTransformer, TransformError};
use crate::xml::tree::split_qname;
use crate::xml::Element;

impl ConfigTransformer {
    /// Append a cleaned, encoded copy of the model's document to `destination`.
    ///
    /// An empty model is a successful no-op. The model's document is never mutated,
    /// and on a codec failure nothing is appended.
    pub fn save(
        &self,
        model: &dyn ConfigurationModel,
        codec: &dyn PasswordCodec,
        destination: &mut Element,
    ) -> Result<bool, TransformError> {
        let Some(current) = model.get_data() else {
            tracing::debug!("Model holds no document, nothing to save");
            return Ok(true);
        };

        let persistable = self.prepare_persistable(&current, codec)?;
        destination.append_child(persistable);

        tracing::info!(
            destination = %destination.name(),
            codec = codec.name(),
            "Configuration appended for persistence"
        );
        Ok(true)
    }

    /// Deep-clone `document`, encode its passwords and strip bookkeeping attributes.
    pub fn prepare_persistable(
        &self,
        document: &Element,
        codec: &dyn PasswordCodec,
    ) -> Result<Element, TransformError> {
        let mut copy = document.clone();
        let encoded = rewrite_passwords(
            &mut copy,
            &self.rules().password_element,
            CodecDirection::Encode,
            codec,
        )?;
        let stripped = self.strip_bookkeeping(&mut copy);

        tracing::debug!(
            passwords_encoded = encoded,
            attributes_stripped = stripped,
            "Prepared persistable configuration"
        );
        Ok(copy)
    }

    /// Remove bookkeeping attributes from every element. Returns how many were removed.
    ///
    /// Declarations of a bookkeeping prefix (`xmlns:clientattr`) that nothing in
    /// their subtree uses afterwards are removed too, and counted.
    pub fn strip_bookkeeping(&self, document: &mut Element) -> usize {
        let names = &self.rules().bookkeeping_attributes;
        let prefixes: Vec<&str> = names.iter().filter_map(|n| split_qname(n).0).collect();
        let mut removed = 0;

        document.for_each_element_mut(|element| {
            for name in names {
                if element.remove_attribute(name) {
                    removed += 1;
                }
            }
        });

        if !prefixes.is_empty() {
            document.for_each_element_mut(|element| {
                for &prefix in &prefixes {
                    if element.declared_namespace(Some(prefix)).is_some()
                        && !element.uses_prefix(Some(prefix))
                        && element.remove_attribute(&format!("xmlns:{}", prefix))
                    {
                        removed += 1;
                    }
                }
            });
        }
        removed
    }
}
