//! Output layout for a report tree.
//!
//! Paths follow the same convention as navigation links, so every link on a
//! cover page resolves to the file planned for its target:
//! - the root cover is written to `<t>.html`
//! - a leaf page sits beside its tree's cover as `<t>.html`
//! - a nested tree gets its own directory `<t>/` holding `<t>.html`
//! - each tree directory has its own `data/` directory for external formats
//!
//! Two pages whose titles sanitize to the same token in one directory share
//! a path. [`plan`] reports them with a warning; [`checked_pages`] rejects
//! them.

use std::collections::HashMap;

use serde::Serialize;
use tracing::warn;

use folio_common::{sanitize, Error, Label, Result, StorageFormat};

use crate::page::Page;
use crate::tree::{ReportNode, ReportTree};

/// Where and how one page is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PagePlan {
    /// Page title.
    pub title: String,
    /// HTML file path relative to the output root, `/`-separated.
    pub path: String,
    /// Directory for external data files, absent for embedded formats.
    pub data_dir: Option<String>,
    /// Format governing this page's tables.
    pub storage_format: StorageFormat,
    /// Labels that must be serialized for this page.
    pub tables: Vec<Label>,
    /// Nesting depth of the page's directory, 0 for the root directory.
    pub depth: usize,
    /// Whether the page is a tree's cover.
    pub is_cover: bool,
}

/// Plan every page in `tree`, covers first, children in order.
pub fn plan(tree: &ReportTree) -> Vec<PagePlan> {
    pages(tree).into_iter().map(|(plan, _)| plan).collect()
}

/// Plan every page in `tree` together with the page itself.
///
/// Pages sharing an output path are kept and logged.
pub fn pages(tree: &ReportTree) -> Vec<(PagePlan, &Page)> {
    let mut out = Vec::new();
    collect(tree, "", 0, &mut out);

    for (path, first, second) in collisions(&out) {
        warn!(%path, %first, %second, "two pages share an output path");
    }

    out
}

/// Like [`pages`], but fails with [`Error::PathCollision`] when two pages
/// share an output path.
pub fn checked_pages(tree: &ReportTree) -> Result<Vec<(PagePlan, &Page)>> {
    let mut out = Vec::new();
    collect(tree, "", 0, &mut out);

    if let Some((path, first, second)) = collisions(&out).into_iter().next() {
        return Err(Error::PathCollision {
            path: path.to_string(),
            first: first.to_string(),
            second: second.to_string(),
        });
    }

    Ok(out)
}

/// `(path, earlier title, later title)` for every repeated path.
fn collisions<'p>(planned: &'p [(PagePlan, &Page)]) -> Vec<(&'p str, &'p str, &'p str)> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    let mut repeated = Vec::new();
    for (plan, _) in planned {
        match seen.get(plan.path.as_str()) {
            Some(first) => repeated.push((plan.path.as_str(), *first, plan.title.as_str())),
            None => {
                seen.insert(plan.path.as_str(), plan.title.as_str());
            }
        }
    }
    repeated
}

fn collect<'a>(tree: &'a ReportTree, dir: &str, depth: usize, out: &mut Vec<(PagePlan, &'a Page)>) {
    let format = tree.storage_format();
    out.push((page_plan(tree.cover(), dir, depth, format, true), tree.cover()));

    for child in tree.children() {
        match child {
            ReportNode::Page(page) => {
                out.push((page_plan(page, dir, depth, format, false), page));
            }
            ReportNode::Tree(subtree) => {
                let subdir = format!("{dir}{}/", sanitize(subtree.cover().title()));
                collect(subtree, &subdir, depth + 1, out);
            }
        }
    }
}

fn page_plan(
    page: &Page,
    dir: &str,
    depth: usize,
    storage_format: StorageFormat,
    is_cover: bool,
) -> PagePlan {
    PagePlan {
        title: page.title().to_string(),
        path: format!("{dir}{}.html", sanitize(page.title())),
        data_dir: (!storage_format.is_embedded()).then(|| format!("{dir}data")),
        storage_format,
        tables: page.referenced_tables().into_keys().collect(),
        depth,
        is_cover,
    }
}
