//! Navigation components placed on cover pages.

use indexmap::IndexMap;

use folio_common::Label;

use crate::component::{Component, Markup};
use crate::navigation::NavLink;
use crate::render::html_escape;

/// A flat list of links to child pages.
#[derive(Debug, Clone)]
pub struct Navigation {
    links: Vec<NavLink>,
}

impl Navigation {
    pub fn new(links: Vec<NavLink>) -> Self {
        Navigation { links }
    }

    pub fn links(&self) -> &[NavLink] {
        &self.links
    }
}

impl Component for Navigation {
    fn render(&self) -> Markup {
        Markup::html(format!(
            r#"<nav class="report-nav"><ul class="nav-list">{}</ul></nav>"#,
            render_items(&self.links)
        ))
    }

    fn dependencies(&self) -> Vec<Label> {
        Vec::new()
    }

    fn kind(&self) -> &'static str {
        "navigation"
    }
}

/// Links to child pages grouped under section headings.
#[derive(Debug, Clone)]
pub struct GroupedNavigation {
    groups: IndexMap<String, Vec<NavLink>>,
}

impl GroupedNavigation {
    pub fn new(groups: IndexMap<String, Vec<NavLink>>) -> Self {
        GroupedNavigation { groups }
    }

    pub fn groups(&self) -> &IndexMap<String, Vec<NavLink>> {
        &self.groups
    }
}

impl Component for GroupedNavigation {
    fn render(&self) -> Markup {
        let sections: String = self
            .groups
            .iter()
            .map(|(heading, links)| {
                format!(
                    r#"<section class="nav-group"><h2 class="nav-heading">{}</h2><ul class="nav-list">{}</ul></section>"#,
                    html_escape(heading),
                    render_items(links)
                )
            })
            .collect();

        Markup::html(format!(r#"<nav class="report-nav">{sections}</nav>"#))
    }

    fn dependencies(&self) -> Vec<Label> {
        Vec::new()
    }

    fn kind(&self) -> &'static str {
        "grouped_navigation"
    }
}

fn render_items(links: &[NavLink]) -> String {
    links
        .iter()
        .map(|link| {
            let blurb = link
                .blurb
                .as_deref()
                .filter(|b| !b.is_empty())
                .map(|b| format!(r#"<p class="nav-blurb">{}</p>"#, html_escape(b)))
                .unwrap_or_default();
            format!(
                r#"<li class="nav-item"><a href="{url}">{title}</a>{blurb}</li>"#,
                url = html_escape(&link.url),
                title = html_escape(&link.title),
                blurb = blurb,
            )
        })
        .collect()
}
