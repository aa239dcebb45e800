pub mod block;
pub mod label;
pub mod parser;

use crate::block::tree::BlockTree;
use crate::parser::ValidationError;

/// Fixed token standing in for a nested block inside its parent's own text.
/// Only used by the string form of a block (see [`block::Block::own_text`]).
pub const PLACEHOLDER: &str = "%place_child%";

/// A validated, decomposed page template.
#[derive(Debug, Clone)]
pub struct Template {
    /// Top-level blocks in document order.
    pub blocks: BlockTree,
    /// The source file ID (for error reporting with codespan-reporting).
    pub source_id: usize,
    /// Non-fatal findings, e.g. text outside every block.
    pub warnings: Vec<ValidationError>,
}
