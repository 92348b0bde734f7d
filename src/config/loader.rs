//! Settings and template loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::Settings;
use crate::config::validation::{validate_settings, ValidationError};
use crate::xml::XmlError;

/// Error type for settings loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
    Template(PathBuf, XmlError),
    TemplateShape(PathBuf),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "IO error reading {}: {}", path.display(), e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
            ConfigError::Template(path, e) => {
                write!(f, "Template {} is not well-formed: {}", path.display(), e)
            }
            ConfigError::TemplateShape(path) => write!(
                f,
                "Template {} has no configuration element with a server child",
                path.display()
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(_, e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Template(_, e) => Some(e),
            _ => None,
        }
    }
}

/// Load and validate settings from a TOML file.
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
    let settings: Settings = toml::from_str(&content).map_err(ConfigError::Parse)?;

    validate_settings(&settings).map_err(ConfigError::Validation)?;

    tracing::debug!(path = %path.display(), "Settings loaded");
    Ok(settings)
}

/// Load settings from `path` when given, otherwise use defaults.
pub fn load_settings_or_default(path: Option<&Path>) -> Result<Settings, ConfigError> {
    match path {
        Some(path) => load_settings(path),
        None => Ok(Settings::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[transform]\nbookkeeping_attributes = [\"inserted\"]\n\n[debug]\nusers = [\"dev\"]"
        )
        .unwrap();

        let settings = load_settings(file.path()).unwrap();
        assert_eq!(settings.transform.bookkeeping_attributes, vec!["inserted"]);
        assert!(settings.debug.is_debug_user("dev"));
    }

    #[test]
    fn test_load_reports_validation_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[observability]\nlog_level = \"chatty\"").unwrap();

        match load_settings(file.path()) {
            Err(ConfigError::Validation(errors)) => assert_eq!(errors.len(), 1),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_and_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(matches!(load_settings(&missing), Err(ConfigError::Io(..))));

        let bad = dir.path().join("bad.toml");
        fs::write(&bad, "[transform\n").unwrap();
        assert!(matches!(load_settings(&bad), Err(ConfigError::Parse(_))));

        assert!(load_settings_or_default(None).is_ok());
    }
}
