use std::path::{Component, Path, PathBuf};

use thiserror::Error;

use crate::config::Settings;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("invalid page name `{0}`")]
    InvalidName(String),

    #[error("no template for page `{page}` (looked for {})", path.display())]
    NotFound { page: String, path: PathBuf },

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Finds page templates by logical name inside one directory.
pub struct TemplateLoader {
    dir: PathBuf,
}

impl TemplateLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        TemplateLoader { dir: dir.into() }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.template_dir())
    }

    /// `blog/post` → `<dir>/blog/post.html`. Names may not leave the directory.
    pub fn resolve(&self, page: &str) -> Result<PathBuf, LoadError> {
        let name = Path::new(page);
        let valid = !page.is_empty()
            && name
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !valid {
            return Err(LoadError::InvalidName(page.to_string()));
        }
        Ok(self.dir.join(format!("{}.html", page)))
    }

    pub fn load(&self, page: &str) -> Result<(PathBuf, String), LoadError> {
        let path = self.resolve(page)?;
        tracing::debug!(page, path = %path.display(), "loading template");
        match std::fs::read_to_string(&path) {
            Ok(source) => Ok((path, source)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(LoadError::NotFound {
                page: page.to_string(),
                path,
            }),
            Err(source) => Err(LoadError::Io { path, source }),
        }
    }
}
