mod decompose;
pub mod error;
mod scanner;
mod validate;

pub use error::{MarkerKind, ValidationError, ValidationErrorKind};

use crate::Template;

/// Parser entry point.
pub struct Parser {
    source: String,
    file_id: usize,
}

impl Parser {
    pub fn new(source: String, file_id: usize) -> Self {
        Parser { source, file_id }
    }

    /// Check marker balance and label uniqueness without building a tree.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let tokens = scanner::scan(&self.source, self.file_id)?;
        validate::check_markers(&tokens, self.source.len(), self.file_id)
    }

    /// Validate the markup and decompose it into a block tree.
    pub fn parse(&self) -> Result<Template, Vec<ValidationError>> {
        let tokens = scanner::scan(&self.source, self.file_id)?;
        validate::check_markers(&tokens, self.source.len(), self.file_id)?;
        let (blocks, warnings) = decompose::decompose(&tokens, &self.source, self.file_id)?;
        Ok(Template {
            blocks,
            source_id: self.file_id,
            warnings,
        })
    }
}
