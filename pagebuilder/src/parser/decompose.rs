use std::ops::Range;

use crate::block::tree::BlockTree;
use crate::block::{Block, Segment};
use crate::label::Label;
use crate::parser::error::{ValidationError, ValidationErrorKind};
use crate::parser::scanner::Token;

/// Build the block tree from a validated token stream.
///
/// Returns the top-level blocks together with any warnings.
pub(crate) fn decompose(
    tokens: &[Token],
    source: &str,
    file_id: usize,
) -> Result<(BlockTree, Vec<ValidationError>), Vec<ValidationError>> {
    let mut state = DecomposeState::new(source, file_id);
    for token in tokens {
        state.process(token)?;
    }
    state.finalize()
}

struct DecomposeState<'a> {
    source: &'a str,
    file_id: usize,
    /// Open blocks, innermost last.
    stack: Vec<BlockBuilder>,
    top_blocks: BlockTree,
    warnings: Vec<ValidationError>,
}

struct BlockBuilder {
    label: Label,
    segments: Vec<Segment>,
    children: BlockTree,
    span_start: usize,
}

impl BlockBuilder {
    fn push_text(&mut self, text: &str) {
        if let Some(Segment::Text(prev)) = self.segments.last_mut() {
            prev.push_str(text);
        } else {
            self.segments.push(Segment::Text(text.to_string()));
        }
    }

    fn into_block(self, span_end: usize) -> Block {
        Block {
            label: self.label,
            segments: self.segments,
            children: self.children,
            span: self.span_start..span_end,
        }
    }
}

impl<'a> DecomposeState<'a> {
    fn new(source: &'a str, file_id: usize) -> Self {
        DecomposeState {
            source,
            file_id,
            stack: Vec::new(),
            top_blocks: BlockTree::empty(),
            warnings: Vec::new(),
        }
    }

    fn process(&mut self, token: &Token) -> Result<(), Vec<ValidationError>> {
        match token {
            Token::Text(range) => self.text(range),
            Token::Begin { label, span } => {
                if let Some(parent) = self.stack.last_mut() {
                    parent.segments.push(Segment::Slot(label.clone()));
                }
                self.stack.push(BlockBuilder {
                    label: label.clone(),
                    segments: Vec::new(),
                    children: BlockTree::empty(),
                    span_start: span.start,
                });
            }
            Token::End { label, span } => self.close(label, span)?,
        }
        Ok(())
    }

    fn text(&mut self, range: &Range<usize>) {
        let text = &self.source[range.clone()];
        if let Some(builder) = self.stack.last_mut() {
            builder.push_text(text);
        } else if !text.trim().is_empty() {
            tracing::warn!(start = range.start, end = range.end, "text outside every block");
            self.warnings.push(
                ValidationError::warning(ValidationErrorKind::StrayText, range.clone(), self.file_id)
                    .with_note("wrap it in a `<!-- begin-LABEL -->` block to render it"),
            );
        }
    }

    fn close(&mut self, label: &Label, span: &Range<usize>) -> Result<(), Vec<ValidationError>> {
        let builder = match self.stack.pop() {
            Some(builder) if builder.label == *label => builder,
            Some(open) => {
                return Err(vec![
                    ValidationError::error(
                        ValidationErrorKind::CrossedMarkers {
                            open: open.label.to_string(),
                            found: label.to_string(),
                        },
                        span.clone(),
                        self.file_id,
                    )
                    .with_related(open.span_start..span.start)
                    .with_note("regions must nest; close the inner region first"),
                ]);
            }
            None => {
                return Err(vec![ValidationError::error(
                    ValidationErrorKind::UnopenedEnd {
                        label: label.to_string(),
                    },
                    span.clone(),
                    self.file_id,
                )]);
            }
        };

        let block = builder.into_block(span.end);
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(block);
        } else {
            self.top_blocks.push(block);
        }
        Ok(())
    }

    fn finalize(self) -> Result<(BlockTree, Vec<ValidationError>), Vec<ValidationError>> {
        if !self.stack.is_empty() {
            let errors = self
                .stack
                .iter()
                .map(|open| {
                    ValidationError::error(
                        ValidationErrorKind::UnclosedBlock {
                            label: open.label.to_string(),
                        },
                        open.span_start..self.source.len(),
                        self.file_id,
                    )
                })
                .collect();
            return Err(errors);
        }

        tracing::debug!(
            top_level = self.top_blocks.len(),
            total = self.top_blocks.labels().len(),
            depth = self.top_blocks.depth(),
            "decomposed template"
        );
        Ok((self.top_blocks, self.warnings))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::parser::scanner::scan;

    fn tree(src: &str) -> BlockTree {
        let tokens = scan(src, 0).unwrap();
        decompose(&tokens, src, 0).unwrap().0
    }

    fn kinds(src: &str) -> Vec<ValidationErrorKind> {
        let tokens = scan(src, 0).unwrap();
        decompose(&tokens, src, 0)
            .unwrap_err()
            .into_iter()
            .map(|e| e.kind)
            .collect()
    }

    #[test]
    fn single_block_keeps_its_body() {
        let t = tree("<!-- begin-page --><h1>Hi</h1><!-- end-page -->");
        let page = t.get("page").unwrap();
        assert_eq!(page.own_text(), "<h1>Hi</h1>");
        assert!(page.children.is_empty());
    }

    #[test]
    fn nested_block_becomes_a_slot() {
        let src = "<!-- begin-a -->[<!-- begin-b -->X<!-- end-b -->]<!-- end-a -->";
        let t = tree(src);
        let a = t.get("a").unwrap();
        assert_eq!(
            a.segments,
            vec![
                Segment::Text("[".into()),
                Segment::Slot(Label::parse("b").unwrap()),
                Segment::Text("]".into()),
            ]
        );
        assert_eq!(a.own_text(), "[%place_child%]");
        assert_eq!(a.children.get("b").unwrap().own_text(), "X");
        assert_eq!(a.span, 0..src.len());
    }

    #[test]
    fn siblings_keep_document_order() {
        let t = tree("<!-- begin-z -->1<!-- end-z --><!-- begin-a -->2<!-- end-a -->");
        let labels: Vec<&str> = t.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, ["z", "a"]);
    }

    #[test]
    fn ordinary_comments_stay_in_the_text() {
        let t = tree("<!-- begin-a --><!-- keep me -->x<!-- end-a -->");
        assert_eq!(t.get("a").unwrap().own_text(), "<!-- keep me -->x");
    }

    #[test]
    fn stray_text_is_a_warning() {
        let src = "<html><!-- begin-a -->x<!-- end-a -->\n";
        let tokens = scan(src, 0).unwrap();
        let (t, warnings) = decompose(&tokens, src, 0).unwrap();
        assert_eq!(t.len(), 1);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].is_warning());
        assert_eq!(warnings[0].span, 0..6);
    }

    #[test]
    fn crossed_markers_are_rejected() {
        let src = "<!-- begin-a --><!-- begin-b --><!-- end-a --><!-- end-b -->";
        assert_eq!(
            kinds(src),
            vec![ValidationErrorKind::CrossedMarkers {
                open: "b".into(),
                found: "a".into(),
            }]
        );
    }

    #[test]
    fn end_before_begin_is_rejected() {
        assert_eq!(
            kinds("<!-- end-a --><!-- begin-a -->"),
            vec![ValidationErrorKind::UnopenedEnd { label: "a".into() }]
        );
    }

    #[test]
    fn unclosed_block_is_rejected() {
        assert_eq!(
            kinds("<!-- begin-a -->x"),
            vec![ValidationErrorKind::UnclosedBlock { label: "a".into() }]
        );
    }
}
