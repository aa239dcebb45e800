use std::ops::Range;

use crate::label::Label;
use crate::parser::error::{MarkerKind, ValidationError, ValidationErrorKind};

const COMMENT_OPEN: &str = "<!--";
const COMMENT_CLOSE: &str = "-->";

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    /// Markup between markers, including ordinary comments.
    Text(Range<usize>),
    Begin { label: Label, span: Range<usize> },
    End { label: Label, span: Range<usize> },
}

impl Token {
    pub(crate) fn marker(&self) -> Option<(MarkerKind, &Label, &Range<usize>)> {
        match self {
            Token::Text(_) => None,
            Token::Begin { label, span } => Some((MarkerKind::Begin, label, span)),
            Token::End { label, span } => Some((MarkerKind::End, label, span)),
        }
    }
}

/// Split markup into text runs and `<!-- begin-X -->` / `<!-- end-X -->` markers.
pub(crate) fn scan(source: &str, file_id: usize) -> Result<Vec<Token>, Vec<ValidationError>> {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    let mut text_start = 0;
    let mut cursor = 0;

    while let Some(found) = source[cursor..].find(COMMENT_OPEN) {
        let open = cursor + found;
        let body_start = open + COMMENT_OPEN.len();
        let body = &source[body_start..];
        let body = body.trim_start();
        let keyword_start = source.len() - body.len();

        let (kind, keyword_len) = if body.starts_with("begin-") {
            (MarkerKind::Begin, "begin-".len())
        } else if body.starts_with("end-") {
            (MarkerKind::End, "end-".len())
        } else {
            // Ordinary comment, stays part of the text.
            cursor = body_start;
            continue;
        };

        let label_start = keyword_start + keyword_len;
        let Some(close) = source[label_start..].find(COMMENT_CLOSE) else {
            errors.push(ValidationError::error(
                ValidationErrorKind::UnterminatedMarker,
                open..label_start,
                file_id,
            ));
            break;
        };
        let label_end = label_start + close;
        let span = open..label_end + COMMENT_CLOSE.len();

        if text_start < open {
            tokens.push(Token::Text(text_start..open));
        }
        text_start = span.end;
        cursor = span.end;

        let raw = &source[label_start..label_end];
        match Label::parse(raw) {
            Ok(label) => tokens.push(match kind {
                MarkerKind::Begin => Token::Begin { label, span },
                MarkerKind::End => Token::End { label, span },
            }),
            Err(reason) => errors.push(ValidationError::error(
                ValidationErrorKind::InvalidLabel {
                    raw: raw.to_string(),
                    reason,
                },
                span,
                file_id,
            )),
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }
    if text_start < source.len() {
        tokens.push(Token::Text(text_start..source.len()));
    }
    Ok(tokens)
}
