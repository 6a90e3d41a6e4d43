//! Free-form content blocks.

use folio_common::Label;

use crate::component::{Component, Markup};
use crate::render::html_escape;

/// Raw HTML supplied by the caller, inserted without escaping.
#[derive(Debug, Clone)]
pub struct Html {
    html: String,
}

impl Html {
    pub fn new(html: impl Into<String>) -> Self {
        Html { html: html.into() }
    }
}

impl Component for Html {
    fn render(&self) -> Markup {
        Markup::html(self.html.clone())
    }

    fn dependencies(&self) -> Vec<Label> {
        Vec::new()
    }

    fn kind(&self) -> &'static str {
        "html"
    }
}

/// A paragraph of plain text.
#[derive(Debug, Clone)]
pub struct Text {
    text: String,
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Text { text: text.into() }
    }
}

impl Component for Text {
    fn render(&self) -> Markup {
        Markup::html(format!(
            r#"<p class="text-block">{}</p>"#,
            html_escape(&self.text)
        ))
    }

    fn dependencies(&self) -> Vec<Label> {
        Vec::new()
    }

    fn kind(&self) -> &'static str {
        "text"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_escaped() {
        let markup = Text::new("a < b & c").render();
        assert_eq!(markup.html, r#"<p class="text-block">a &lt; b &amp; c</p>"#);
        assert!(markup.script.is_empty());
    }

    #[test]
    fn test_html_passes_through() {
        let markup = Html::new("<hr>").render();
        assert_eq!(markup.html, "<hr>");
        assert!(Html::new("<hr>").dependencies().is_empty());
    }
}
