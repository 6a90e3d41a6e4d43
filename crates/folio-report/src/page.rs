//! Pages: one data namespace plus an ordered list of components.
//!
//! Pages are built once through [`PageBuilder::build`] and cannot be changed
//! afterwards. Building validates the storage format and every input label,
//! then normalizes every input into the namespace:
//! - tables are stored under their label unchanged
//! - composite records are extracted into `"<label>.<field>"` entries
//! - anything else fails with [`Error::UnsupportedInputShape`]
//!
//! When two inputs produce the same label the later one replaces the earlier
//! one.

use std::collections::BTreeSet;
use std::sync::Arc;

use folio_common::{Error, Label, Result, StorageFormat, Table};
use tracing::{debug, info, warn};

use crate::component::{Component, ComponentRef};
use crate::extract::{extract, has_table_fields, DataInput, Namespace, TableFields};

/// A sealed report page.
#[derive(Debug, Clone)]
pub struct Page {
    title: String,
    header_text: Option<String>,
    notes: Option<String>,
    namespace: Namespace,
    components: Vec<ComponentRef>,
    storage_format: StorageFormat,
}

impl Page {
    /// Start building a page with the given title.
    pub fn builder(title: impl Into<String>) -> PageBuilder {
        PageBuilder::new(title)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Text shown under the page title.
    pub fn header_text(&self) -> Option<&str> {
        self.header_text.as_deref()
    }

    /// Short description, used as the navigation blurb.
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Label to table mapping.
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Look up one dataset.
    pub fn table(&self, label: &str) -> Option<&Table> {
        self.namespace.get(label)
    }

    /// Components in display order.
    pub fn components(&self) -> &[ComponentRef] {
        &self.components
    }

    pub fn storage_format(&self) -> StorageFormat {
        self.storage_format
    }

    /// Union of the labels declared by this page's components.
    pub fn dependencies(&self) -> BTreeSet<Label> {
        self.components
            .iter()
            .flat_map(|component| component.dependencies())
            .collect()
    }

    /// Namespace entries referenced by at least one component.
    pub fn referenced_tables(&self) -> Namespace {
        let dependencies = self.dependencies();
        self.namespace
            .iter()
            .filter(|(label, _)| dependencies.contains(*label))
            .map(|(label, table)| (label.clone(), table.clone()))
            .collect()
    }
}

/// Builder for [`Page`].
#[derive(Debug)]
pub struct PageBuilder {
    title: String,
    header_text: Option<String>,
    notes: Option<String>,
    inputs: Vec<(Label, DataInput)>,
    components: Vec<ComponentRef>,
    storage_format: Option<String>,
}

impl PageBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        PageBuilder {
            title: title.into(),
            header_text: None,
            notes: None,
            inputs: Vec::new(),
            components: Vec::new(),
            storage_format: None,
        }
    }

    pub fn header_text(mut self, text: impl Into<String>) -> Self {
        self.header_text = Some(text.into());
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Storage format token, validated by [`PageBuilder::build`].
    ///
    /// Defaults to `csv_embedded`.
    pub fn storage_format(mut self, token: impl Into<String>) -> Self {
        self.storage_format = Some(token.into());
        self
    }

    /// Add a raw input under `label`.
    pub fn input(mut self, label: impl Into<Label>, value: impl Into<DataInput>) -> Self {
        self.inputs.push((label.into(), value.into()));
        self
    }

    /// Add several raw inputs, in order.
    pub fn inputs<L, V>(mut self, inputs: impl IntoIterator<Item = (L, V)>) -> Self
    where
        L: Into<Label>,
        V: Into<DataInput>,
    {
        self.inputs
            .extend(inputs.into_iter().map(|(l, v)| (l.into(), v.into())));
        self
    }

    /// Add a table under `label`.
    pub fn table(self, label: impl Into<Label>, table: Table) -> Self {
        self.input(label, DataInput::Table(table))
    }

    /// Add a composite record whose table fields are extracted under `label`.
    pub fn record(
        self,
        label: impl Into<Label>,
        record: impl TableFields + Send + Sync + 'static,
    ) -> Self {
        self.input(label, DataInput::record(record))
    }

    /// Append a component.
    pub fn component(mut self, component: impl Component + 'static) -> Self {
        self.components.push(Arc::new(component));
        self
    }

    /// Append already shared components, in order.
    pub fn components(mut self, components: impl IntoIterator<Item = ComponentRef>) -> Self {
        self.components.extend(components);
        self
    }

    /// Validate and seal the page.
    pub fn build(self) -> Result<Page> {
        let storage_format = match self.storage_format.as_deref() {
            Some(token) => token.parse::<StorageFormat>()?,
            None => StorageFormat::default(),
        };

        let mut namespace = Namespace::new();
        for (label, input) in self.inputs {
            label.validate()?;
            let composite = has_table_fields(&input);
            match input {
                DataInput::Table(table) => {
                    debug!(%label, rows = table.row_count(), "adding table");
                    insert_table(&mut namespace, label, table);
                }
                DataInput::Record(record) if composite => {
                    let extracted = extract(&*record, &label)?;
                    debug!(
                        %label,
                        kind = record.kind(),
                        tables = extracted.len(),
                        "extracted record"
                    );
                    for (key, table) in extracted {
                        insert_table(&mut namespace, key, table);
                    }
                }
                other => {
                    return Err(Error::UnsupportedInputShape {
                        label: label.to_string(),
                        kind: other.kind(),
                    });
                }
            }
        }

        info!(
            title = %self.title,
            tables = namespace.len(),
            components = self.components.len(),
            format = %storage_format,
            "Page built"
        );

        Ok(Page {
            title: self.title,
            header_text: self.header_text,
            notes: self.notes,
            namespace,
            components: self.components,
            storage_format,
        })
    }
}

fn insert_table(namespace: &mut Namespace, label: Label, table: Table) {
    if let Some(previous) = namespace.insert(label.clone(), table) {
        warn!(
            %label,
            replaced_rows = previous.row_count(),
            "label already present, replacing earlier table"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{DataTable, Text};
    use arrow::array::{Int64Array, RecordBatch};
    use arrow::datatypes::{DataType, Field, Schema};

    fn table(rows: usize) -> Table {
        let schema = Arc::new(Schema::new(vec![Field::new("n", DataType::Int64, false)]));
        let values: Vec<i64> = (0..rows as i64).collect();
        RecordBatch::try_new(schema, vec![Arc::new(Int64Array::from(values))])
            .unwrap()
            .into()
    }

    struct Pair {
        left: Table,
        right: Option<Table>,
    }

    crate::table_fields!(Pair { left, right });

    struct Settings {
        #[allow(dead_code)]
        verbose: bool,
    }

    crate::table_fields!(Settings {});

    fn labels(page: &Page) -> Vec<&str> {
        page.namespace().keys().map(Label::as_str).collect()
    }

    #[test]
    fn test_defaults() {
        let page = Page::builder("Summary").build().unwrap();
        assert_eq!(page.title(), "Summary");
        assert_eq!(page.storage_format(), StorageFormat::CsvEmbedded);
        assert!(page.namespace().is_empty());
        assert!(page.components().is_empty());
        assert_eq!(page.notes(), None);
    }

    #[test]
    fn test_tables_and_records_share_namespace() {
        let page = Page::builder("Mixed")
            .table("a", table(2))
            .record(
                "b",
                Pair {
                    left: table(1),
                    right: Some(table(4)),
                },
            )
            .build()
            .unwrap();
        assert_eq!(labels(&page), vec!["a", "b.left", "b.right"]);
        assert_eq!(page.table("b.right").unwrap().row_count(), 4);
    }

    #[test]
    fn test_direct_tables_are_kept_even_when_empty() {
        let page = Page::builder("Empty").table("none", table(0)).build().unwrap();
        assert_eq!(labels(&page), vec!["none"]);
    }

    #[test]
    fn test_invalid_storage_format() {
        let err = Page::builder("Bad")
            .storage_format("xml")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidStorageFormat { ref token } if token == "xml"));
    }

    #[test]
    fn test_unsupported_input_names_label() {
        let err = Page::builder("Bad")
            .table("ok", table(1))
            .input("threshold", serde_json::json!(0.5))
            .build()
            .unwrap_err();
        match err {
            Error::UnsupportedInputShape { label, kind } => {
                assert_eq!(label, "threshold");
                assert_eq!(kind, "scalar");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_record_without_table_fields_is_unsupported() {
        let err = Page::builder("Bad")
            .record("settings", Settings { verbose: true })
            .build()
            .unwrap_err();
        match err {
            Error::UnsupportedInputShape { label, kind } => {
                assert_eq!(label, "settings");
                assert!(kind.starts_with("record "));
                assert!(kind.ends_with("Settings"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_blank_label_rejected() {
        let err = Page::builder("Blank")
            .table("  ", table(1))
            .build()
            .unwrap_err();
        assert_eq!(err.code(), 21);
        assert!(matches!(err, Error::InvalidLabel(ref text) if text == "  "));

        let err = Page::builder("Blank record")
            .record(
                "",
                Pair {
                    left: table(1),
                    right: None,
                },
            )
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidLabel(_)));
    }

    #[test]
    fn test_later_input_replaces_earlier() {
        let page = Page::builder("Collide")
            .record(
                "x",
                Pair {
                    left: table(1),
                    right: None,
                },
            )
            .table("x.left", table(7))
            .build()
            .unwrap();
        assert_eq!(labels(&page), vec!["x.left"]);
        assert_eq!(page.table("x.left").unwrap().row_count(), 7);
    }

    #[test]
    fn test_components_keep_order_and_dependencies() {
        let page = Page::builder("Deps")
            .table("used", table(1))
            .table("unused", table(1))
            .component(Text::new("intro"))
            .component(DataTable::new("used"))
            .component(DataTable::new("missing"))
            .build()
            .unwrap();

        let kinds: Vec<&str> = page.components().iter().map(|c| c.kind()).collect();
        assert_eq!(kinds, vec!["text", "data_table", "data_table"]);

        let deps = page.dependencies();
        let deps: Vec<&str> = deps.iter().map(Label::as_str).collect();
        assert_eq!(deps, vec!["missing", "used"]);

        let referenced = page.referenced_tables();
        assert_eq!(referenced.len(), 1);
        assert!(referenced.contains_key("used"));
    }
}
