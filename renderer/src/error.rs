use pagebuilder::parser::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    /// The template's markers are unbalanced, duplicated or badly nested.
    /// Rendering is abandoned as a whole; there is no partial view.
    #[error("template failed structural validation: {}", summarize(.0))]
    Validation(Vec<ValidationError>),
}

impl RenderError {
    /// The individual structural findings, for diagnostic output.
    pub fn diagnostics(&self) -> &[ValidationError] {
        match self {
            RenderError::Validation(errors) => errors,
        }
    }
}

impl From<Vec<ValidationError>> for RenderError {
    fn from(errors: Vec<ValidationError>) -> Self {
        RenderError::Validation(errors)
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    match errors {
        [] => "no details".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{} (and {} more)", first, rest.len()),
    }
}
