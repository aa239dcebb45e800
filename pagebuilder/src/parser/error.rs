use std::fmt;
use std::ops::Range;

use codespan_reporting::diagnostic::{Diagnostic, Label, Severity};
use thiserror::Error;

use crate::label::LabelError;

/// Which half of a marker pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Begin,
    End,
}

impl MarkerKind {
    pub fn opposite(self) -> MarkerKind {
        match self {
            MarkerKind::Begin => MarkerKind::End,
            MarkerKind::End => MarkerKind::Begin,
        }
    }
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerKind::Begin => f.write_str("begin"),
            MarkerKind::End => f.write_str("end"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationErrorKind {
    #[error("unbalanced markers: {begins} begin marker(s) but {ends} end marker(s)")]
    UnbalancedMarkers { begins: usize, ends: usize },

    #[error("label `{label}` is used by more than one {marker} marker")]
    DuplicateLabel { label: String, marker: MarkerKind },

    #[error("`{marker}-{label}` has no matching `{}-{label}`", .marker.opposite())]
    UnmatchedLabel { label: String, marker: MarkerKind },

    #[error("`end-{found}` closes a region opened by `begin-{open}`")]
    CrossedMarkers { open: String, found: String },

    #[error("`end-{label}` appears before its `begin-{label}`")]
    UnopenedEnd { label: String },

    #[error("`begin-{label}` is never closed")]
    UnclosedBlock { label: String },

    #[error("marker is missing its closing `-->`")]
    UnterminatedMarker,

    #[error("invalid label `{raw}`: {reason}")]
    InvalidLabel { raw: String, reason: LabelError },

    #[error("text outside every block is not rendered")]
    StrayText,
}

/// A structural problem in a template's markers, with source location.
#[derive(Debug, Clone, Error)]
#[error("{kind}")]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    pub span: Range<usize>,
    pub file_id: usize,
    pub severity: Severity,
    /// Other places in the source involved in the problem.
    pub related: Vec<Range<usize>>,
    pub notes: Vec<String>,
}

impl ValidationError {
    pub fn error(kind: ValidationErrorKind, span: Range<usize>, file_id: usize) -> Self {
        ValidationError {
            kind,
            span,
            file_id,
            severity: Severity::Error,
            related: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn warning(kind: ValidationErrorKind, span: Range<usize>, file_id: usize) -> Self {
        ValidationError {
            kind,
            span,
            file_id,
            severity: Severity::Warning,
            related: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn with_related(mut self, span: Range<usize>) -> Self {
        self.related.push(span);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }

    /// Convert to a codespan-reporting Diagnostic for display.
    pub fn to_diagnostic(&self) -> Diagnostic<usize> {
        let mut labels = vec![Label::primary(self.file_id, self.span.clone())];
        labels.extend(
            self.related
                .iter()
                .map(|span| Label::secondary(self.file_id, span.clone())),
        );
        Diagnostic::new(self.severity)
            .with_message(self.kind.to_string())
            .with_labels(labels)
            .with_notes(self.notes.clone())
    }
}
