//! Navigation link derivation.
//!
//! Links follow the output path convention shared with the writer:
//! - a leaf page titled `t` lives at `<sanitize(t)>.html`
//! - a sub-report whose cover is titled `t` lives at
//!   `<sanitize(t)>/<sanitize(t)>.html`

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use folio_common::sanitize;

use crate::tree::ReportNode;

/// One navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    /// Link text.
    pub title: String,
    /// Relative URL of the target page.
    pub url: String,
    /// Short description shown under the link.
    pub blurb: Option<String>,
}

impl NavLink {
    pub fn new(title: impl Into<String>, url: impl Into<String>, blurb: Option<String>) -> Self {
        NavLink {
            title: title.into(),
            url: url.into(),
            blurb,
        }
    }
}

/// Relative URL of a leaf page.
pub fn page_url(title: &str) -> String {
    format!("{}.html", sanitize(title))
}

/// Relative URL of a sub-report's cover page.
pub fn tree_url(title: &str) -> String {
    let token = sanitize(title);
    format!("{token}/{token}.html")
}

/// Link to a single node.
pub fn link_for(node: &ReportNode) -> NavLink {
    match node {
        ReportNode::Page(page) => {
            NavLink::new(page.title(), page_url(page.title()), page.notes().map(str::to_string))
        }
        ReportNode::Tree(tree) => {
            let cover = tree.cover();
            NavLink::new(
                cover.title(),
                tree_url(cover.title()),
                cover.notes().map(str::to_string),
            )
        }
    }
}

/// Links to `nodes`, in order.
pub fn build_links(nodes: &[ReportNode]) -> Vec<NavLink> {
    nodes.iter().map(link_for).collect()
}

/// Links to each group of nodes, keeping heading order.
pub fn build_grouped_links(
    groups: &IndexMap<String, Vec<ReportNode>>,
) -> IndexMap<String, Vec<NavLink>> {
    groups
        .iter()
        .map(|(heading, nodes)| (heading.clone(), build_links(nodes)))
        .collect()
}

/// Concatenate groups in heading order.
pub fn flatten_groups<T: Clone>(groups: &IndexMap<String, Vec<T>>) -> Vec<T> {
    groups.values().flatten().cloned().collect()
}

/// Navigation derived for a tree's cover page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "layout", content = "links", rename_all = "snake_case")]
pub enum NavigationIndex {
    /// A single list of links.
    Flat(Vec<NavLink>),
    /// Links grouped under headings.
    Grouped(IndexMap<String, Vec<NavLink>>),
}

impl NavigationIndex {
    /// All links in display order.
    pub fn links(&self) -> Vec<NavLink> {
        match self {
            NavigationIndex::Flat(links) => links.clone(),
            NavigationIndex::Grouped(groups) => flatten_groups(groups),
        }
    }

    /// Number of links across all groups.
    pub fn len(&self) -> usize {
        match self {
            NavigationIndex::Flat(links) => links.len(),
            NavigationIndex::Grouped(groups) => groups.values().map(Vec::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
