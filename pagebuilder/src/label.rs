use std::borrow::Borrow;
use std::fmt;

use thiserror::Error;

/// Why a raw marker label was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelError {
    #[error("label is empty")]
    Empty,
    #[error("label spans more than one line")]
    Multiline,
    #[error("label contains comment syntax")]
    MarkerSyntax,
}

/// The identifier inside a `begin-`/`end-` marker.
///
/// Labels are compared exactly (case-sensitive) after trimming surrounding
/// whitespace. They are unique across one template.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Label(String);

impl Label {
    pub fn parse(raw: &str) -> Result<Self, LabelError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(LabelError::Empty);
        }
        if trimmed.contains(['\n', '\r']) {
            return Err(LabelError::Multiline);
        }
        if trimmed.contains("<!--") || trimmed.contains("-->") {
            return Err(LabelError::MarkerSyntax);
        }
        Ok(Label(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Label {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Label {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Label {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Label {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
