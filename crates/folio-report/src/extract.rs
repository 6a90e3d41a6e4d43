//! Composite record extraction.
//!
//! A composite record is any caller type that declares its table-typed
//! fields through [`TableFields`]. When a record is handed to a page, each
//! declared field holding a non-empty table becomes its own dataset under
//! `"<label>.<field>"`.
//!
//! ```
//! use folio_report::{table_fields, Table};
//!
//! struct Book {
//!     trades: Table,
//!     quotes: Option<Table>,
//!     owner: String,
//! }
//!
//! // `owner` is not a table and is left out.
//! table_fields!(Book { trades, quotes });
//! ```

use std::collections::BTreeMap;
use std::fmt;

use folio_common::{Label, Result, Table};
use tracing::debug;

/// Label to table mapping owned by a page.
pub type Namespace = BTreeMap<Label, Table>;

/// One declared table-typed field of a composite record.
#[derive(Debug, Clone, Copy)]
pub struct TableField<'a> {
    name: &'static str,
    table: Option<&'a Table>,
}

impl<'a> TableField<'a> {
    /// Describe a `Table` or `Option<Table>` field.
    ///
    /// `name` must be non-empty and free of [`Label::SEPARATOR`];
    /// [`extract`] fails on any other name.
    pub fn new(name: &'static str, value: &'a impl FieldValue) -> Self {
        debug_assert!(
            Label::is_field_name(name),
            "table field name {name:?} cannot be composed into a label"
        );
        TableField {
            name,
            table: value.as_table(),
        }
    }

    /// Field name, used as the composed label suffix.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Runtime value; `None` when an optional field is absent.
    pub fn table(&self) -> Option<&'a Table> {
        self.table
    }
}

/// Field types that may be declared as table fields.
pub trait FieldValue {
    fn as_table(&self) -> Option<&Table>;
}

impl FieldValue for Table {
    fn as_table(&self) -> Option<&Table> {
        Some(self)
    }
}

impl FieldValue for Option<Table> {
    fn as_table(&self) -> Option<&Table> {
        self.as_ref()
    }
}

/// Capability of a record type to list its table-typed fields.
///
/// Only fields whose declared type is `Table` or `Option<Table>` belong in
/// the list. Use [`table_fields!`](crate::table_fields) to derive it.
pub trait TableFields {
    /// Declared table fields in declaration order.
    fn table_fields(&self) -> Vec<TableField<'_>>;

    /// Type name reported in diagnostics.
    fn kind(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Implement [`TableFields`] for a struct by naming its table fields.
///
/// Every named field must be a `Table` or an `Option<Table>`.
#[macro_export]
macro_rules! table_fields {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::extract::TableFields for $ty {
            fn table_fields(&self) -> ::std::vec::Vec<$crate::extract::TableField<'_>> {
                ::std::vec![
                    $($crate::extract::TableField::new(stringify!($field), &self.$field)),*
                ]
            }
        }
    };
}

/// A raw value supplied as a page input.
pub enum DataInput {
    /// A table, stored under its label unchanged.
    Table(Table),
    /// A composite record, routed through extraction.
    Record(Box<dyn TableFields + Send + Sync>),
    /// Maps, arrays and scalars.
    Value(serde_json::Value),
    /// A value whose shape cannot be inspected, described by its type name.
    Opaque(String),
}

impl DataInput {
    /// Wrap a composite record.
    pub fn record(record: impl TableFields + Send + Sync + 'static) -> Self {
        DataInput::Record(Box::new(record))
    }

    /// Describe an uninspectable value of type `T`.
    pub fn opaque<T: ?Sized>() -> Self {
        DataInput::Opaque(std::any::type_name::<T>().to_string())
    }

    /// Human-readable kind used in input-shape errors.
    pub fn kind(&self) -> String {
        match self {
            DataInput::Table(_) => "table".to_string(),
            DataInput::Record(record) => format!("record {}", record.kind()),
            DataInput::Value(serde_json::Value::Object(_)) => "map".to_string(),
            DataInput::Value(serde_json::Value::Array(_)) => "array".to_string(),
            DataInput::Value(_) => "scalar".to_string(),
            DataInput::Opaque(type_name) => format!("opaque value {type_name}"),
        }
    }
}

impl fmt::Debug for DataInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataInput::Table(table) => f
                .debug_struct("Table")
                .field("rows", &table.row_count())
                .finish(),
            DataInput::Record(record) => f.debug_tuple("Record").field(&record.kind()).finish(),
            DataInput::Value(value) => f.debug_tuple("Value").field(value).finish(),
            DataInput::Opaque(type_name) => f.debug_tuple("Opaque").field(type_name).finish(),
        }
    }
}

impl From<Table> for DataInput {
    fn from(table: Table) -> Self {
        DataInput::Table(table)
    }
}

impl From<serde_json::Value> for DataInput {
    fn from(value: serde_json::Value) -> Self {
        DataInput::Value(value)
    }
}

/// Whether an input is a composite record declaring at least one table field.
///
/// Tables, maps, arrays, scalars and opaque values all return false.
pub fn has_table_fields(input: &DataInput) -> bool {
    match input {
        DataInput::Record(record) => !record.table_fields().is_empty(),
        DataInput::Table(_) | DataInput::Value(_) | DataInput::Opaque(_) => false,
    }
}

/// Pull every present, non-empty table field out of `record`.
///
/// Fails with [`folio_common::Error::InvalidLabel`] when a declared field name cannot be
/// composed onto `label`.
pub fn extract(record: &dyn TableFields, label: &Label) -> Result<Namespace> {
    let mut namespace = Namespace::new();

    for field in record.table_fields() {
        let key = Label::compose(label, field.name())?;
        match field.table() {
            Some(table) if !table.is_empty() => {
                debug!(label = %key, rows = table.row_count(), "extracted table field");
                namespace.insert(key, table.clone());
            }
            Some(_) => {
                debug!(%label, field = field.name(), "skipping empty table field");
            }
            None => {
                debug!(%label, field = field.name(), "skipping absent table field");
            }
        }
    }

    Ok(namespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Int64Array, RecordBatch};
    use arrow::datatypes::{DataType, Field, Schema};
    use folio_common::Error;
    use std::sync::Arc;

    fn table(rows: usize) -> Table {
        let schema = Arc::new(Schema::new(vec![Field::new("qty", DataType::Int64, false)]));
        let values: Vec<i64> = (0..rows as i64).collect();
        RecordBatch::try_new(schema, vec![Arc::new(Int64Array::from(values))])
            .unwrap()
            .into()
    }

    struct Book {
        trades: Table,
        quotes: Table,
        #[allow(dead_code)]
        name: String,
    }

    crate::table_fields!(Book { trades, quotes });

    struct Desk {
        fills: Option<Table>,
        orders: Option<Table>,
    }

    crate::table_fields!(Desk { fills, orders });

    struct Settings {
        #[allow(dead_code)]
        verbose: bool,
    }

    crate::table_fields!(Settings {});

    #[test]
    fn test_extract_drops_empty_and_non_table_fields() {
        let book = Book {
            trades: table(3),
            quotes: table(0),
            name: "main".to_string(),
        };
        let namespace = extract(&book, &Label::new("book")).unwrap();

        assert_eq!(namespace.len(), 1);
        assert_eq!(namespace[&Label::new("book.trades")].row_count(), 3);
    }

    #[test]
    fn test_extract_skips_absent_optionals() {
        let desk = Desk {
            fills: Some(table(2)),
            orders: None,
        };
        let namespace = extract(&desk, &Label::new("desk")).unwrap();
        let keys: Vec<&str> = namespace.keys().map(Label::as_str).collect();
        assert_eq!(keys, vec!["desk.fills"]);
    }

    #[test]
    fn test_record_without_table_fields() {
        let settings = Settings { verbose: true };
        assert!(extract(&settings, &Label::new("settings")).unwrap().is_empty());
        assert!(!has_table_fields(&DataInput::record(settings)));
    }

    #[test]
    fn test_has_table_fields_ignores_runtime_absence() {
        let desk = Desk {
            fills: None,
            orders: None,
        };
        assert!(has_table_fields(&DataInput::record(desk)));
    }

    struct Dotted {
        inner: Table,
    }

    impl TableFields for Dotted {
        fn table_fields(&self) -> Vec<TableField<'_>> {
            vec![TableField {
                name: "x.y",
                table: Some(&self.inner),
            }]
        }
    }

    struct Unnamed {
        inner: Table,
    }

    impl TableFields for Unnamed {
        fn table_fields(&self) -> Vec<TableField<'_>> {
            vec![TableField {
                name: "",
                table: Some(&self.inner),
            }]
        }
    }

    #[test]
    fn test_extract_rejects_unsplittable_field_names() {
        let book = Label::new("book");
        let dotted = Dotted { inner: table(2) };
        assert!(matches!(
            extract(&dotted, &book),
            Err(Error::InvalidLabel(ref text)) if text == "book.x.y"
        ));

        let unnamed = Unnamed { inner: table(2) };
        assert!(matches!(
            extract(&unnamed, &book),
            Err(Error::InvalidLabel(ref text)) if text == "book."
        ));
    }

    #[test]
    fn test_extracted_labels_split_back() {
        let desk = Desk {
            fills: Some(table(1)),
            orders: Some(table(2)),
        };
        let parent = Label::new("floor.desk");
        for (label, _) in extract(&desk, &parent).unwrap() {
            let (head, field) = label.split_last().unwrap();
            assert_eq!(head, "floor.desk");
            assert!(field == "fills" || field == "orders");
        }
    }

    #[test]
    fn test_leaf_kinds_have_no_table_fields() {
        assert!(!has_table_fields(&DataInput::from(table(1))));
        assert!(!has_table_fields(&DataInput::from(serde_json::json!({"a": 1}))));
        assert!(!has_table_fields(&DataInput::from(serde_json::json!([1, 2]))));
        assert!(!has_table_fields(&DataInput::from(serde_json::json!(4.2))));
        assert!(!has_table_fields(&DataInput::opaque::<dyn std::any::Any>()));
    }

    #[test]
    fn test_input_kinds() {
        assert_eq!(DataInput::from(serde_json::json!({})).kind(), "map");
        assert_eq!(DataInput::from(serde_json::json!([])).kind(), "array");
        assert_eq!(DataInput::from(serde_json::json!("x")).kind(), "scalar");
        assert!(DataInput::record(Settings { verbose: false })
            .kind()
            .ends_with("Settings"));
    }
}
