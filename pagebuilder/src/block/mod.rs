pub mod tree;

use std::ops::Range;

use crate::PLACEHOLDER;
use crate::block::tree::BlockTree;
use crate::label::Label;

/// One piece of a block's own text, in document order.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal markup copied from the template (or supplied by data).
    Text(String),
    /// Where the directly nested block with this label was cut out.
    Slot(Label),
}

/// A labeled region of the template.
#[derive(Debug, Clone)]
pub struct Block {
    pub label: Label,
    /// The region's body with each directly nested region collapsed to a slot.
    pub segments: Vec<Segment>,
    /// Blocks nested exactly one level inside this one.
    pub children: BlockTree,
    /// Byte span of the whole region in source, markers included.
    pub span: Range<usize>,
}

impl Block {
    /// The block's own text with every slot written as [`PLACEHOLDER`].
    pub fn own_text(&self) -> String {
        let mut text = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(s) => text.push_str(s),
                Segment::Slot(_) => text.push_str(PLACEHOLDER),
            }
        }
        text
    }

    /// Labels of the slots left in this block's own text.
    pub fn slots(&self) -> impl Iterator<Item = &Label> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Slot(label) => Some(label),
            Segment::Text(_) => None,
        })
    }

    /// Discard the template text (slots included) and use `text` instead.
    /// Children stay in the tree but no longer have a slot to render into.
    pub fn replace_content(&mut self, text: impl Into<String>) {
        self.segments = vec![Segment::Text(text.into())];
    }
}
