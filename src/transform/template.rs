//! Seed document used when no configuration is supplied.

use std::fs;
use std::path::Path;

use crate::config::loader::ConfigError;
use crate::config::schema::{TransformConfig, CONFIGURATION_NAMESPACE};
use crate::xml::{find_configuration, Element};

/// Empty connector configuration.
///
/// Field defaults match what the connector assumes when an element is absent:
/// port 389, plain connection, anonymous bind, 50 search results, five pooled
/// connections. The connection type is read case-sensitively by the connector.
pub fn builtin_template() -> Element {
    Element::new("configuration")
        .with_attribute("xmlns", CONFIGURATION_NAMESPACE)
        .with_child(Element::new("server"))
        .with_child(Element::new("port").with_text("389"))
        .with_child(Element::new("connectiontype").with_text("PLAIN"))
        .with_child(Element::new("user"))
        .with_child(Element::new("password"))
        .with_child(Element::new("searchroot"))
        .with_child(Element::new("anonymousbind").with_text("true"))
        .with_child(Element::new("securityprovider"))
        .with_child(Element::new("keystore"))
        .with_child(Element::new("maximunnoofseachresult").with_text("50"))
        .with_child(Element::new("nrofconnections").with_text("5"))
}

/// Template selected by the settings: a file when `template_path` is set,
/// the built-in one otherwise.
pub fn resolve_template(config: &TransformConfig) -> Result<Element, ConfigError> {
    match &config.template_path {
        Some(path) => load_template_file(path, config),
        None => Ok(builtin_template()),
    }
}

fn load_template_file(path: &Path, config: &TransformConfig) -> Result<Element, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
    let root = Element::parse(&content).map_err(|e| ConfigError::Template(path.to_path_buf(), e))?;

    let template = find_configuration(&root, config.required_namespace())
        .map(|located| located.detach())
        .ok_or_else(|| ConfigError::TemplateShape(path.to_path_buf()))?;

    tracing::info!(path = %path.display(), "Using template from file");
    Ok(template)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_template_is_locatable() {
        let template = builtin_template();
        let config = TransformConfig {
            strict_namespace: true,
            ..TransformConfig::default()
        };
        let located = find_configuration(&template, config.required_namespace()).unwrap();
        assert_eq!(located.element, &template);
        assert_eq!(template.descendants_named("password").len(), 1);
    }

    #[test]
    fn test_builtin_template_field_values() {
        let template = builtin_template();
        let fields: Vec<(&str, String)> = template
            .child_elements()
            .map(|e| (e.name(), e.text()))
            .collect();

        assert_eq!(
            fields,
            vec![
                ("server", String::new()),
                ("port", "389".to_string()),
                ("connectiontype", "PLAIN".to_string()),
                ("user", String::new()),
                ("password", String::new()),
                ("searchroot", String::new()),
                ("anonymousbind", "true".to_string()),
                ("securityprovider", String::new()),
                ("keystore", String::new()),
                ("maximunnoofseachresult", "50".to_string()),
                ("nrofconnections", "5".to_string()),
            ]
        );
    }

    #[test]
    fn test_template_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("template.xml");
        fs::write(
            &path,
            "<wrapper><configuration><server>ldap.example.com</server></configuration></wrapper>",
        )
        .unwrap();

        let config = TransformConfig {
            template_path: Some(path.clone()),
            ..TransformConfig::default()
        };
        let template = resolve_template(&config).unwrap();
        assert_eq!(
            template.to_xml_string(),
            "<configuration><server>ldap.example.com</server></configuration>"
        );

        fs::write(&path, "<configuration/>").unwrap();
        assert!(matches!(
            resolve_template(&config),
            Err(ConfigError::TemplateShape(_))
        ));

        fs::write(&path, "<configuration>").unwrap();
        assert!(matches!(
            resolve_template(&config),
            Err(ConfigError::Template(..))
        ));
    }
}
