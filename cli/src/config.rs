use std::path::{Path, PathBuf};

use renderer::{AssemblyMode, DataMap, PageOptions};
use serde::Deserialize;
use thiserror::Error;

/// Settings file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "pagebuilder.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Root that `template_path` is resolved against. Relative roots are
    /// taken relative to the settings file.
    pub document_root: PathBuf,
    /// Template directory under the document root; also the default prefix
    /// for rewritten asset references.
    pub template_path: String,
    /// Asset prefix, when it differs from `template_path`.
    pub asset_base: Option<String>,
    /// Printed in place of the page when a template is structurally broken.
    pub error_message: String,
    pub assembly: AssemblyMode,
    pub rewrite_assets: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            document_root: PathBuf::from("."),
            template_path: "/templates".to_string(),
            asset_base: None,
            error_message: "Error: the page template is invalid.".to_string(),
            assembly: AssemblyMode::default(),
            rewrite_assets: true,
        }
    }
}

impl Settings {
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = read(path)?;
        let mut settings: Settings = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if settings.document_root.is_relative() {
            if let Some(dir) = path.parent() {
                settings.document_root = dir.join(&settings.document_root);
            }
        }
        Ok(settings)
    }

    /// Load the given file, or `pagebuilder.toml` if present, or defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::load_from_path(default)
                } else {
                    tracing::debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                    Ok(Settings::default())
                }
            }
        }
    }

    /// Directory holding `<page>.html` files.
    pub fn template_dir(&self) -> PathBuf {
        self.document_root
            .join(self.template_path.trim_start_matches('/'))
    }

    pub fn page_options(&self) -> PageOptions {
        let asset_base = if self.rewrite_assets {
            Some(
                self.asset_base
                    .clone()
                    .unwrap_or_else(|| self.template_path.clone()),
            )
        } else {
            None
        };
        PageOptions {
            asset_base,
            assembly: self.assembly,
        }
    }
}

/// Read a TOML table of label → value pairs.
pub fn load_data(path: &Path) -> Result<DataMap, ConfigError> {
    let content = read(path)?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn read(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use renderer::DataValue;
    use tempfile::TempDir;

    use super::*;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn defaults_rewrite_assets_under_template_path() {
        let options = Settings::default().page_options();
        assert_eq!(options.asset_base.as_deref(), Some("/templates"));
        assert_eq!(options.assembly, AssemblyMode::Slotted);
    }

    #[test]
    fn loads_settings_relative_to_the_file() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "pagebuilder.toml",
            r#"
document_root = "site"
template_path = "/tpl/blue"
asset_base = "/static"
error_message = "Oops"
assembly = "legacy"
"#,
        );
        let settings = Settings::load(Some(path.as_path())).unwrap();
        assert_eq!(settings.document_root, dir.path().join("site"));
        assert_eq!(settings.template_dir(), dir.path().join("site").join("tpl/blue"));
        assert_eq!(settings.error_message, "Oops");
        let options = settings.page_options();
        assert_eq!(options.asset_base.as_deref(), Some("/static"));
        assert_eq!(options.assembly, AssemblyMode::Legacy);
    }

    #[test]
    fn asset_rewriting_can_be_disabled() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "c.toml", "rewrite_assets = false\n");
        let settings = Settings::load_from_path(&path).unwrap();
        assert_eq!(settings.page_options().asset_base, None);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "c.toml", "templates = \"x\"\n");
        assert!(matches!(
            Settings::load_from_path(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let err = Settings::load_from_path(&dir.path().join("none.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn loads_data_tables() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "data.toml", "title = \"Home\"\nvisits = 10\n");
        let data = load_data(&path).unwrap();
        assert_eq!(data.get("title"), Some(&DataValue::Text("Home".into())));
        assert_eq!(data.get("visits"), Some(&DataValue::Integer(10)));
    }
}
