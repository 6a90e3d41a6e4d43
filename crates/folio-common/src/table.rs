//! Immutable tabular datasets.
//!
//! Tables wrap an Arrow [`RecordBatch`]. Clones share column buffers, and a
//! table is never mutated once it has been handed to a page.

use arrow::array::RecordBatch;
use arrow::datatypes::SchemaRef;

/// A materialized dataset of rows and named columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    batch: RecordBatch,
}

impl Table {
    /// Wrap an existing record batch.
    pub fn new(batch: RecordBatch) -> Self {
        Table { batch }
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.batch.num_rows()
    }

    /// Whether the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.batch.num_columns()
    }

    /// Column names in schema order.
    pub fn column_names(&self) -> Vec<&str> {
        self.batch
            .schema_ref()
            .fields()
            .iter()
            .map(|field| field.name().as_str())
            .collect()
    }

    /// Arrow schema of the table.
    pub fn schema(&self) -> SchemaRef {
        self.batch.schema()
    }

    /// Borrow the underlying record batch.
    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }
}

impl From<RecordBatch> for Table {
    fn from(batch: RecordBatch) -> Self {
        Table::new(batch)
    }
}
