//! Report trees.
//!
//! A tree is a cover page plus ordered children, each a page or another tree.
//! Trees are assembled bottom-up from finished values, so they are acyclic
//! by construction.
//!
//! The tree's storage format is resolved once: an explicit override wins,
//! otherwise the cover page's format is inherited. Nested trees keep their
//! own format.

use std::collections::BTreeSet;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use folio_common::{Error, Label, Result, StorageFormat};

use crate::component::ComponentRef;
use crate::components::{GroupedNavigation, Navigation};
use crate::config::ReportConfig;
use crate::navigation::{build_grouped_links, build_links, NavLink, NavigationIndex};
use crate::page::Page;

/// A node of a report: a leaf page or a nested tree.
#[derive(Debug, Clone)]
pub enum ReportNode {
    Page(Page),
    Tree(ReportTree),
}

impl ReportNode {
    /// The node's own page: the page itself, or a tree's cover.
    pub fn page(&self) -> &Page {
        match self {
            ReportNode::Page(page) => page,
            ReportNode::Tree(tree) => tree.cover(),
        }
    }

    pub fn title(&self) -> &str {
        self.page().title()
    }

    pub fn is_tree(&self) -> bool {
        matches!(self, ReportNode::Tree(_))
    }
}

impl From<Page> for ReportNode {
    fn from(page: Page) -> Self {
        ReportNode::Page(page)
    }
}

impl From<ReportTree> for ReportNode {
    fn from(tree: ReportTree) -> Self {
        ReportNode::Tree(tree)
    }
}

/// Cover page settings for the navigation constructors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeOptions {
    /// Storage format token for the cover and the tree.
    #[serde(default = "default_storage_format")]
    pub storage_format: String,
    /// Text shown under the cover title.
    #[serde(default)]
    pub header_text: Option<String>,
    /// Blurb used when this tree is linked from a parent.
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_storage_format() -> String {
    StorageFormat::default().to_string()
}

impl Default for TreeOptions {
    fn default() -> Self {
        TreeOptions {
            storage_format: default_storage_format(),
            header_text: None,
            notes: None,
        }
    }
}

impl TreeOptions {
    /// Options seeded from a report configuration.
    pub fn from_config(config: &ReportConfig) -> Self {
        TreeOptions {
            storage_format: config.default_storage_format.clone(),
            ..TreeOptions::default()
        }
    }

    pub fn with_storage_format(mut self, token: impl Into<String>) -> Self {
        self.storage_format = token.into();
        self
    }

    pub fn with_header_text(mut self, text: impl Into<String>) -> Self {
        self.header_text = Some(text.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    fn cover(&self, title: String, components: Vec<ComponentRef>) -> Result<Page> {
        let mut builder = Page::builder(title)
            .components(components)
            .storage_format(self.storage_format.clone());
        if let Some(text) = &self.header_text {
            builder = builder.header_text(text.clone());
        }
        if let Some(notes) = &self.notes {
            builder = builder.notes(notes.clone());
        }
        builder.build()
    }
}

/// A cover page with ordered children.
#[derive(Debug, Clone)]
pub struct ReportTree {
    cover: Page,
    children: Vec<ReportNode>,
    storage_format: StorageFormat,
    navigation: Option<NavigationIndex>,
}

impl ReportTree {
    /// Combine an existing cover page with children.
    ///
    /// `storage_format`, when given, overrides the cover's format.
    pub fn new(
        cover: Page,
        children: Vec<ReportNode>,
        storage_format: Option<&str>,
    ) -> Result<Self> {
        let storage_format = match storage_format {
            Some(token) => token.parse::<StorageFormat>()?,
            None => cover.storage_format(),
        };
        Ok(Self::seal(cover, children, storage_format, None))
    }

    /// Build a tree whose cover lists links to `children`.
    ///
    /// The cover has no data of its own; its components are `body` followed
    /// by a [`Navigation`] over the children.
    pub fn with_navigation(
        title: impl Into<String>,
        body: Vec<ComponentRef>,
        children: Vec<ReportNode>,
        options: TreeOptions,
    ) -> Result<Self> {
        let links = build_links(&children);
        let mut components = body;
        components.push(Arc::new(Navigation::new(links.clone())));

        let cover = options.cover(title.into(), components)?;
        let storage_format = cover.storage_format();
        Ok(Self::seal(
            cover,
            children,
            storage_format,
            Some(NavigationIndex::Flat(links)),
        ))
    }

    /// Build a tree whose cover lists links to children grouped by heading.
    ///
    /// The tree's children are the groups concatenated in heading order.
    /// Fails with [`Error::EmptyTree`] when there are no child nodes.
    pub fn with_grouped_navigation(
        title: impl Into<String>,
        body: Vec<ComponentRef>,
        groups: IndexMap<String, Vec<ReportNode>>,
        options: TreeOptions,
    ) -> Result<Self> {
        if groups.values().all(Vec::is_empty) {
            return Err(Error::EmptyTree {
                constructor: "ReportTree::with_grouped_navigation",
            });
        }

        let grouped = build_grouped_links(&groups);
        let mut components = body;
        components.push(Arc::new(GroupedNavigation::new(grouped.clone())));

        let cover = options.cover(title.into(), components)?;
        let storage_format = cover.storage_format();
        let children: Vec<ReportNode> = groups.into_values().flatten().collect();
        Ok(Self::seal(
            cover,
            children,
            storage_format,
            Some(NavigationIndex::Grouped(grouped)),
        ))
    }

    fn seal(
        cover: Page,
        children: Vec<ReportNode>,
        storage_format: StorageFormat,
        navigation: Option<NavigationIndex>,
    ) -> Self {
        info!(
            title = %cover.title(),
            children = children.len(),
            format = %storage_format,
            "Report tree built"
        );
        ReportTree {
            cover,
            children,
            storage_format,
            navigation,
        }
    }

    pub fn cover(&self) -> &Page {
        &self.cover
    }

    /// Child nodes in order.
    pub fn children(&self) -> &[ReportNode] {
        &self.children
    }

    /// Resolved storage format of this tree.
    pub fn storage_format(&self) -> StorageFormat {
        self.storage_format
    }

    /// Navigation synthesized by the navigation constructors.
    pub fn navigation(&self) -> Option<&NavigationIndex> {
        self.navigation.as_ref()
    }

    /// Links to the children, whether or not the cover was synthesized.
    pub fn links(&self) -> Vec<NavLink> {
        match &self.navigation {
            Some(index) => index.links(),
            None => build_links(&self.children),
        }
    }

    /// Labels referenced by the cover's components.
    pub fn dependencies(&self) -> BTreeSet<Label> {
        self.cover.dependencies()
    }

    /// Number of pages in the tree, covers included.
    pub fn page_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|child| match child {
                ReportNode::Page(_) => 1,
                ReportNode::Tree(tree) => tree.page_count(),
            })
            .sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Text;

    fn page(title: &str) -> ReportNode {
        Page::builder(title)
            .notes(format!("notes {title}"))
            .build()
            .unwrap()
            .into()
    }

    #[test]
    fn test_override_wins() {
        let cover = Page::builder("Cover")
            .storage_format("json_embedded")
            .build()
            .unwrap();
        let tree = ReportTree::new(cover, vec![page("A")], Some("parquet")).unwrap();
        assert_eq!(tree.storage_format(), StorageFormat::Parquet);
        assert_eq!(tree.cover().storage_format(), StorageFormat::JsonEmbedded);
    }

    #[test]
    fn test_inherits_cover_format() {
        let cover = Page::builder("Cover")
            .storage_format("csv_external")
            .build()
            .unwrap();
        let tree = ReportTree::new(cover, Vec::new(), None).unwrap();
        assert_eq!(tree.storage_format(), StorageFormat::CsvExternal);
        assert!(tree.navigation().is_none());
    }

    #[test]
    fn test_bad_override_fails() {
        let cover = Page::builder("Cover").build().unwrap();
        assert!(matches!(
            ReportTree::new(cover, Vec::new(), Some("zip")),
            Err(Error::InvalidStorageFormat { .. })
        ));
    }

    #[test]
    fn test_nested_tree_keeps_own_format() {
        let inner_cover = Page::builder("Inner")
            .storage_format("json_external")
            .build()
            .unwrap();
        let inner = ReportTree::new(inner_cover, vec![page("Leaf")], None).unwrap();
        let outer = ReportTree::with_navigation(
            "Outer",
            Vec::new(),
            vec![inner.into()],
            TreeOptions::default().with_storage_format("parquet"),
        )
        .unwrap();

        assert_eq!(outer.storage_format(), StorageFormat::Parquet);
        match &outer.children()[0] {
            ReportNode::Tree(inner) => {
                assert_eq!(inner.storage_format(), StorageFormat::JsonExternal)
            }
            ReportNode::Page(_) => panic!("expected a nested tree"),
        }
    }

    #[test]
    fn test_navigation_cover() {
        let body: Vec<ComponentRef> = vec![Arc::new(Text::new("Welcome"))];
        let tree = ReportTree::with_navigation(
            "Home",
            body,
            vec![page("A"), page("B")],
            TreeOptions::default().with_notes("home notes"),
        )
        .unwrap();

        let cover = tree.cover();
        assert!(cover.namespace().is_empty());
        let kinds: Vec<&str> = cover.components().iter().map(|c| c.kind()).collect();
        assert_eq!(kinds, vec!["text", "navigation"]);
        assert_eq!(cover.notes(), Some("home notes"));
        assert_eq!(tree.links().len(), 2);
    }

    #[test]
    fn test_navigation_cover_rejects_bad_format() {
        let result = ReportTree::with_navigation(
            "Home",
            Vec::new(),
            vec![page("A")],
            TreeOptions::default().with_storage_format("CSV"),
        );
        assert!(matches!(result, Err(Error::InvalidStorageFormat { .. })));
    }

    #[test]
    fn test_grouped_requires_nodes() {
        let empty: IndexMap<String, Vec<ReportNode>> = IndexMap::new();
        assert!(matches!(
            ReportTree::with_grouped_navigation("G", Vec::new(), empty, TreeOptions::default()),
            Err(Error::EmptyTree { .. })
        ));

        let mut hollow = IndexMap::new();
        hollow.insert("Nothing".to_string(), Vec::new());
        assert!(matches!(
            ReportTree::with_grouped_navigation("G", Vec::new(), hollow, TreeOptions::default()),
            Err(Error::EmptyTree { .. })
        ));
    }

    #[test]
    fn test_page_count() {
        let inner = ReportTree::with_navigation(
            "Inner",
            Vec::new(),
            vec![page("X"), page("Y")],
            TreeOptions::default(),
        )
        .unwrap();
        let outer = ReportTree::with_navigation(
            "Outer",
            Vec::new(),
            vec![page("A"), inner.into()],
            TreeOptions::default(),
        )
        .unwrap();
        assert_eq!(outer.page_count(), 5);
    }
}
