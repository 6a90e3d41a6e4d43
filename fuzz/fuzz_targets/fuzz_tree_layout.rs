//! Fuzz target for tree construction and layout.
//!
//! Builds trees of arbitrary shape and checks that every navigation link on
//! every cover points at a planned page.

#![no_main]

use arbitrary::Arbitrary;
use folio_report::{plan, Page, ReportNode, ReportTree, TreeOptions};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Shape {
    Leaf(String),
    Tree(String, Vec<Shape>),
}

fn build(shape: &Shape, depth: usize) -> Option<ReportNode> {
    match shape {
        Shape::Leaf(title) => Page::builder(title.as_str()).build().ok().map(Into::into),
        Shape::Tree(title, children) => {
            if depth > 4 {
                return None;
            }
            let children = children
                .iter()
                .take(8)
                .filter_map(|child| build(child, depth + 1))
                .collect();
            ReportTree::with_navigation(title.as_str(), Vec::new(), children, TreeOptions::default())
                .ok()
                .map(Into::into)
        }
    }
}

fn check(tree: &ReportTree, dir: &str, paths: &[String]) {
    for link in tree.links() {
        let target = format!("{dir}{}", link.url);
        assert!(paths.contains(&target), "dangling link {target}");
    }
    for child in tree.children() {
        if let ReportNode::Tree(subtree) = child {
            let token = folio_report::sanitize(subtree.cover().title());
            check(subtree, &format!("{dir}{token}/"), paths);
        }
    }
}

fuzz_target!(|shape: Shape| {
    if let Some(ReportNode::Tree(tree)) = build(&shape, 0) {
        let paths: Vec<String> = plan(&tree).into_iter().map(|p| p.path).collect();
        assert_eq!(paths.len(), tree.page_count());
        check(&tree, "", &paths);
    }
});
