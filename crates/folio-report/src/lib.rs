//! Composable multi-page static reports.
//!
//! A report is a tree of pages. Each [`Page`] owns a namespace of labelled
//! tables plus an ordered list of visual components. A [`ReportTree`] pairs a
//! cover page with child pages or sub-trees and can synthesize the cover's
//! navigation from its children.
//!
//! # Modules
//!
//! - `extract`: pulls tables out of composite records ([`TableFields`])
//! - `page`: sealed pages and their builder
//! - `component`: the component capability and built-in components
//! - `navigation`: link derivation from sibling nodes
//! - `tree`: report trees and their constructors
//! - `dependencies`: which labels each page's components reference
//! - `layout`: output paths for every page in a tree
//! - `render`: standalone HTML documents for pages
//! - `config`: JSON report configuration
//!
//! # Example
//!
//! ```no_run
//! use folio_report::components::Text;
//! use folio_report::{Page, ReportNode, ReportTree, TreeOptions};
//!
//! let costs = Page::builder("Cost Analysis")
//!     .component(Text::new("Costs by desk"))
//!     .build()
//!     .unwrap();
//! let revenue = Page::builder("Revenue Report").build().unwrap();
//!
//! let report = ReportTree::with_navigation(
//!     "Quarterly Review",
//!     Vec::new(),
//!     vec![ReportNode::from(costs), ReportNode::from(revenue)],
//!     TreeOptions::default(),
//! )
//! .unwrap();
//! assert_eq!(report.children().len(), 2);
//! ```

pub mod component;
pub mod components;
pub mod config;
pub mod dependencies;
pub mod extract;
pub mod layout;
pub mod navigation;
pub mod page;
pub mod render;
pub mod tree;

pub use component::{Component, ComponentRef, Markup};
pub use config::{ReportConfig, ReportTheme, RuntimeScript};
pub use dependencies::dependencies;
pub use extract::{extract, has_table_fields, DataInput, Namespace, TableField, TableFields};
pub use folio_common::{sanitize, Error, Label, Result, StorageFormat, Table};
pub use layout::{plan, PagePlan};
pub use navigation::{build_grouped_links, build_links, NavLink, NavigationIndex};
pub use page::{Page, PageBuilder};
pub use render::{render_page, PageRenderer, RenderedPage};
pub use tree::{ReportNode, ReportTree, TreeOptions};
