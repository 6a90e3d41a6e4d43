//! The visual component capability.
//!
//! Pages treat components as opaque: they store them in order, ask them for
//! markup when rendering, and ask them which labels they read.

use std::fmt;
use std::sync::Arc;

use folio_common::Label;

/// Markup produced by a component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup {
    /// Behavior fragment, placed inside the page's trailing `<script>`.
    pub script: String,
    /// Appearance fragment, placed in the page body.
    pub html: String,
}

impl Markup {
    /// Markup with only an HTML fragment.
    pub fn html(html: impl Into<String>) -> Self {
        Markup {
            script: String::new(),
            html: html.into(),
        }
    }

    /// Attach a script fragment.
    pub fn with_script(mut self, script: impl Into<String>) -> Self {
        self.script = script.into();
        self
    }
}

/// A visual element of a page.
pub trait Component: fmt::Debug + Send + Sync {
    /// Render script and HTML fragments.
    fn render(&self) -> Markup;

    /// Labels of the datasets this component reads.
    fn dependencies(&self) -> Vec<Label>;

    /// Short name used in logs.
    fn kind(&self) -> &'static str {
        "component"
    }
}

/// Shared handle to a component.
pub type ComponentRef = Arc<dyn Component>;
