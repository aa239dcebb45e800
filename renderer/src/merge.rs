use pagebuilder::block::tree::BlockTree;

use crate::data::DataMap;

/// Overwrite the content of every block named in `data`, at any depth.
///
/// A substituted block becomes exactly the supplied value; whatever nested
/// blocks it had no longer have a slot to render into. Returns the number of
/// blocks replaced.
pub fn merge(tree: &mut BlockTree, data: &DataMap) -> usize {
    let mut replaced = 0;
    for (label, value) in data.iter() {
        let hits = tree.replace_content(label, &value.to_string());
        if hits == 0 {
            tracing::debug!(label, "data key matches no block");
        } else {
            tracing::debug!(label, kind = value.type_name(), "substituted block");
        }
        replaced += hits;
    }
    replaced
}
