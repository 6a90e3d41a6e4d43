//! Dependency view over pages and trees.
//!
//! The writer uses this to skip tables no component reads. A tree only
//! reports its cover's dependencies; nested trees are written separately
//! into their own directories and are queried on their own.

use std::collections::BTreeSet;

use folio_common::Label;

use crate::tree::ReportNode;

/// Labels referenced by the components of `node`'s own page.
pub fn dependencies(node: &ReportNode) -> BTreeSet<Label> {
    match node {
        ReportNode::Page(page) => page.dependencies(),
        ReportNode::Tree(tree) => tree.dependencies(),
    }
}

/// Namespace labels of `node`'s own page that no component references.
pub fn unused_labels(node: &ReportNode) -> Vec<Label> {
    let used = dependencies(node);
    node.page()
        .namespace()
        .keys()
        .filter(|label| !used.contains(*label))
        .cloned()
        .collect()
}
