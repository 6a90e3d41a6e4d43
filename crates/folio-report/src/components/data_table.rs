//! Sortable table bound to one dataset.

use folio_common::{sanitize, Label};

use crate::component::{Component, Markup};
use crate::render::{html_escape, js_string};

/// Default number of rows shown per page of the table.
pub const DEFAULT_PAGE_SIZE: usize = 25;

/// An interactive table over one labelled dataset.
///
/// The table body is filled in the browser from the data the writer emits
/// for `label`.
#[derive(Debug, Clone)]
pub struct DataTable {
    label: Label,
    caption: Option<String>,
    page_size: usize,
}

impl DataTable {
    pub fn new(label: impl Into<Label>) -> Self {
        DataTable {
            label: label.into(),
            caption: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Set a caption shown above the table.
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Set the number of rows per page.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Element id derived from the label.
    pub fn element_id(&self) -> String {
        format!("table-{}", sanitize(self.label.as_str()))
    }
}

impl Component for DataTable {
    fn render(&self) -> Markup {
        let id = self.element_id();
        let caption = self
            .caption
            .as_deref()
            .map(|c| format!(r#"<h3 class="table-caption">{}</h3>"#, html_escape(c)))
            .unwrap_or_default();

        Markup::html(format!(
            r#"<div class="card">{caption}<div id="{id}" class="data-table" data-label="{label}"></div></div>"#,
            caption = caption,
            id = id,
            label = html_escape(self.label.as_str()),
        ))
        .with_script(format!(
            "folio.table({}, {}, {{ pageSize: {} }});",
            js_string(&id),
            js_string(self.label.as_str()),
            self.page_size
        ))
    }

    fn dependencies(&self) -> Vec<Label> {
        vec![self.label.clone()]
    }

    fn kind(&self) -> &'static str {
        "data_table"
    }
}
