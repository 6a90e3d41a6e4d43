//! Standalone HTML documents for pages.

use serde::Serialize;
use tracing::{debug, info};

use folio_common::Result;

use crate::config::ReportConfig;
use crate::layout;
use crate::page::Page;
use crate::tree::ReportTree;

/// One rendered page and where it belongs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedPage {
    /// Output path relative to the report root.
    pub path: String,
    pub html: String,
}

/// Page renderer.
#[derive(Debug, Clone)]
pub struct PageRenderer {
    config: ReportConfig,
}

impl PageRenderer {
    /// Create a new renderer with configuration.
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Create a renderer with default configuration.
    pub fn default_config() -> Self {
        Self::new(ReportConfig::default())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Render one page as a standalone document.
    pub fn render(&self, page: &Page) -> Result<String> {
        self.config.validate()?;
        let html = self.generate_html(page);

        let output = if self.config.minify {
            let cfg = minify_html::Cfg {
                minify_js: true,
                minify_css: true,
                ..Default::default()
            };
            String::from_utf8(minify_html::minify(html.as_bytes(), &cfg)).unwrap_or(html)
        } else {
            html
        };

        info!(
            bytes = output.len(),
            title = %page.title(),
            components = page.components().len(),
            "Page rendered"
        );

        Ok(output)
    }

    /// Render every page of `tree` at its planned path.
    ///
    /// Fails with [`folio_common::Error::PathCollision`] when two pages would
    /// be written to the same file.
    pub fn render_tree(&self, tree: &ReportTree) -> Result<Vec<RenderedPage>> {
        layout::checked_pages(tree)?
            .into_iter()
            .map(|(plan, page)| {
                debug!(path = %plan.path, "rendering page");
                Ok(RenderedPage {
                    html: self.render(page)?,
                    path: plan.path,
                })
            })
            .collect()
    }

    fn generate_html(&self, page: &Page) -> String {
        let title = html_escape(page.title());
        let theme_class = self.config.theme.css_class();
        let generator = html_escape(&self.config.generator);

        let mut body = String::new();
        let mut scripts = String::new();
        for component in page.components() {
            let markup = component.render();
            body.push_str(&markup.html);
            body.push('\n');
            if !markup.script.is_empty() {
                scripts.push_str(&markup.script);
                scripts.push('\n');
            }
        }

        let header_text = page
            .header_text()
            .map(|text| format!(r#"<p class="page-header-text">{}</p>"#, html_escape(text)))
            .unwrap_or_default();
        let notes = page
            .notes()
            .map(|text| format!(r#"<p class="page-notes">{}</p>"#, html_escape(text)))
            .unwrap_or_default();

        let script_block = if scripts.is_empty() {
            String::new()
        } else {
            let runtime = self
                .config
                .runtime
                .as_ref()
                .map(|runtime| {
                    format!(
                        "<script src=\"{}\" integrity=\"{}\" crossorigin=\"anonymous\"></script>\n",
                        html_escape(&runtime.url),
                        html_escape(&runtime.sri)
                    )
                })
                .unwrap_or_default();
            format!("{runtime}<script>\n{scripts}</script>")
        };

        format!(
            r##"<!DOCTYPE html>
<html lang="en" class="{theme_class}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <meta name="generator" content="{generator}">
    <meta name="robots" content="noindex, nofollow">
    <style>
        :root {{
            --bg-primary: #ffffff;
            --text-primary: #111827;
            --text-secondary: #6b7280;
            --accent-color: #3b82f6;
        }}
        .dark {{
            --bg-primary: #111827;
            --text-primary: #f9fafb;
            --text-secondary: #9ca3af;
        }}
        body {{
            font-family: system-ui, -apple-system, sans-serif;
            background: var(--bg-primary);
            color: var(--text-primary);
            margin: 0 auto;
            max-width: 72rem;
            padding: 1.5rem;
        }}
        .page-header-text, .page-notes, .nav-blurb {{ color: var(--text-secondary); }}
        a {{ color: var(--accent-color); }}
    </style>
</head>
<body>
<header class="page-header">
<h1>{title}</h1>
{header_text}
{notes}
</header>
<main class="page-body">
{body}</main>
{script_block}
</body>
</html>
"##
        )
    }
}

/// Render one page with `config`.
pub fn render_page(page: &Page, config: &ReportConfig) -> Result<String> {
    PageRenderer::new(config.clone()).render(page)
}

/// Escape HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Quote `s` as a JavaScript string literal safe to place in a `<script>`.
pub fn js_string(s: &str) -> String {
    serde_json::Value::from(s).to_string().replace("</", "<\\/")
}
