use pagebuilder::PLACEHOLDER;
use pagebuilder::block::tree::BlockTree;
use pagebuilder::block::{Block, Segment};
use serde::Deserialize;

/// How nested blocks are put back into their parents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssemblyMode {
    /// Every slot is filled exactly once, by its own child, in document order.
    #[default]
    Slotted,
    /// Placeholder-string reassembly: each child's render replaces every
    /// placeholder accumulated so far at its level. A block with several
    /// children shows the first child in every slot and drops the rest.
    Legacy,
}

/// Reassemble a block tree into markup.
pub fn assemble(tree: &BlockTree, mode: AssemblyMode) -> String {
    match mode {
        AssemblyMode::Slotted => {
            let mut out = String::new();
            for block in tree {
                render_block(block, &mut out);
            }
            out
        }
        AssemblyMode::Legacy => legacy_level(tree.as_slice()),
    }
}

fn render_block(block: &Block, out: &mut String) {
    for segment in &block.segments {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Slot(label) => match block.children.get(label.as_str()) {
                Some(child) => render_block(child, out),
                None => tracing::debug!(%label, "slot has no child block"),
            },
        }
    }
}

fn legacy_level(blocks: &[Block]) -> String {
    let mut view = String::new();
    for block in blocks {
        view.push_str(&block.own_text());
        for child in &block.children {
            let child_view = legacy_level(std::slice::from_ref(child));
            view = view.replace(PLACEHOLDER, &child_view);
        }
    }
    view
}
