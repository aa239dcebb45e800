use std::collections::HashMap;
use std::ops::Range;

use crate::label::Label;
use crate::parser::error::{MarkerKind, ValidationError, ValidationErrorKind};
use crate::parser::scanner::Token;

/// Check marker counts and label uniqueness across the whole template.
///
/// Nesting is not looked at here: every marker counts, whatever its depth.
pub(crate) fn check_markers(
    tokens: &[Token],
    source_len: usize,
    file_id: usize,
) -> Result<(), Vec<ValidationError>> {
    let mut begins: Vec<(&Label, &Range<usize>)> = Vec::new();
    let mut ends: Vec<(&Label, &Range<usize>)> = Vec::new();
    for (kind, label, span) in tokens.iter().filter_map(Token::marker) {
        match kind {
            MarkerKind::Begin => begins.push((label, span)),
            MarkerKind::End => ends.push((label, span)),
        }
    }

    let mut errors = Vec::new();

    if begins.len() != ends.len() {
        errors.push(ValidationError::error(
            ValidationErrorKind::UnbalancedMarkers {
                begins: begins.len(),
                ends: ends.len(),
            },
            0..source_len,
            file_id,
        ));
    }

    let begin_index = index_labels(&begins, MarkerKind::Begin, file_id, &mut errors);
    let end_index = index_labels(&ends, MarkerKind::End, file_id, &mut errors);

    for (label, span) in &begins {
        if !end_index.contains_key(label) {
            errors.push(unmatched(label, span, MarkerKind::Begin, file_id));
        }
    }
    for (label, span) in &ends {
        if !begin_index.contains_key(label) {
            errors.push(unmatched(label, span, MarkerKind::End, file_id));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        tracing::debug!(errors = errors.len(), "template failed marker validation");
        Err(errors)
    }
}

/// Map each label to its first marker, reporting repeats.
fn index_labels<'a>(
    markers: &[(&'a Label, &'a Range<usize>)],
    kind: MarkerKind,
    file_id: usize,
    errors: &mut Vec<ValidationError>,
) -> HashMap<&'a Label, &'a Range<usize>> {
    let mut seen: HashMap<&Label, &Range<usize>> = HashMap::new();
    for &(label, span) in markers {
        if let Some(first) = seen.get(label) {
            errors.push(
                ValidationError::error(
                    ValidationErrorKind::DuplicateLabel {
                        label: label.to_string(),
                        marker: kind,
                    },
                    span.clone(),
                    file_id,
                )
                .with_related((*first).clone())
                .with_note("labels must be unique across the whole template"),
            );
        } else {
            seen.insert(label, span);
        }
    }
    seen
}

fn unmatched(label: &Label, span: &Range<usize>, kind: MarkerKind, file_id: usize) -> ValidationError {
    ValidationError::error(
        ValidationErrorKind::UnmatchedLabel {
            label: label.to_string(),
            marker: kind,
        },
        span.clone(),
        file_id,
    )
}
