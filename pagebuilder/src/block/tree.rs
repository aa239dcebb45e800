use crate::block::Block;
use crate::label::Label;

/// Blocks found at one nesting level, in document order.
#[derive(Debug, Clone, Default)]
pub struct BlockTree {
    blocks: Vec<Block>,
}

impl BlockTree {
    pub fn empty() -> Self {
        BlockTree { blocks: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Number of blocks at this level only.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    pub fn as_slice(&self) -> &[Block] {
        &self.blocks
    }

    pub(crate) fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Look up a block at this level.
    pub fn get(&self, label: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.label == label)
    }

    /// Look up a block at any depth.
    pub fn find(&self, label: &str) -> Option<&Block> {
        for block in &self.blocks {
            if block.label == label {
                return Some(block);
            }
            if let Some(found) = block.children.find(label) {
                return Some(found);
            }
        }
        None
    }

    /// Every label in the tree, depth-first in document order.
    pub fn labels(&self) -> Vec<&Label> {
        let mut out = Vec::new();
        collect_labels(self, &mut out);
        out
    }

    /// Nesting depth: 0 for an empty tree, 1 for a flat one.
    pub fn depth(&self) -> usize {
        self.blocks
            .iter()
            .map(|b| 1 + b.children.depth())
            .max()
            .unwrap_or(0)
    }

    /// Replace the content of every block labeled `label`, at any depth.
    /// Returns how many blocks were replaced.
    pub fn replace_content(&mut self, label: &str, text: &str) -> usize {
        let mut replaced = 0;
        for block in &mut self.blocks {
            if block.label == label {
                block.replace_content(text);
                replaced += 1;
            }
            replaced += block.children.replace_content(label, text);
        }
        replaced
    }
}

impl<'a> IntoIterator for &'a BlockTree {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

fn collect_labels<'a>(tree: &'a BlockTree, out: &mut Vec<&'a Label>) {
    for block in tree {
        out.push(&block.label);
        collect_labels(&block.children, out);
    }
}
