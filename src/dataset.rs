use crate::coerce::{self, Mismatch};
use crate::dataset_error::{CoercionError, DataSetError, TargetType};
use crate::row::Row;
use crate::source::RowSource;
use crate::types::{SqlNumber, SqlValue, ToSqlValue};
use chrono::{DateTime, Utc};
use log::{debug, trace, warn};
use std::collections::HashMap;
use std::ops::Index;

/// An immutable, fully materialised copy of a query result.
///
/// Rows are addressed by zero-based position or, when a key column was chosen
/// at construction, by the value in that column. Columns are addressed by
/// position or by name.
#[derive(Debug, Clone)]
pub struct DataSet {
    rows: Vec<Row>,
    column_names: Vec<String>,
    column_index: HashMap<String, usize>,
    row_index: HashMap<SqlValue, usize>,
    key_column: Option<usize>,
}
impl DataSet {
    /// Reads `source` to exhaustion and builds a snapshot of it.
    ///
    /// If `key_column` is given, every row is indexed by its value in that
    /// column. A later row with the same key replaces the earlier one in the
    /// index; a later column with the same name replaces the earlier one in
    /// the column index. Both cases are logged as warnings.
    ///
    /// # Errors
    ///
    /// Any failure of the source is returned as `DataSetError::Source` and no
    /// snapshot is built. `InvalidKeyColumn` is returned when `key_column` is
    /// not a valid position and `RowWidth` when a row does not have exactly
    /// one cell per column.
    pub fn create<S: RowSource>(
        mut source: S,
        key_column: Option<usize>,
    ) -> Result<DataSet, DataSetError> {
        let column_names = source.column_names().map_err(source_error)?;
        let column_count = column_names.len();
        debug!(
            "Building data set over {} columns, key column {:?}",
            column_count, key_column
        );
        if let Some(column) = key_column {
            if column >= column_count {
                return Err(DataSetError::InvalidKeyColumn {
                    column,
                    column_count,
                });
            }
        }
        let column_index = build_column_index(&column_names);

        let mut rows = Vec::new();
        let mut row_index = HashMap::new();
        while let Some(row) = source.next_row().map_err(source_error)? {
            let position = rows.len();
            if row.len() != column_count {
                return Err(DataSetError::RowWidth {
                    row: position,
                    expected: column_count,
                    found: row.len(),
                });
            }
            if let Some(column) = key_column {
                if let Some(previous) = row_index.insert(row[column].clone(), position) {
                    warn!(
                        "Key {} of row {} replaces row {} in the index",
                        describe_key(&row[column]),
                        position,
                        previous
                    );
                }
            }
            trace!("Materialised row {}", position);
            rows.push(row);
        }
        debug!("Data set holds {} rows", rows.len());

        Ok(DataSet {
            rows,
            column_names,
            column_index,
            row_index,
            key_column,
        })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// `true` if the query returned no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.column_names.len()
    }

    /// Column names in the order the source reported them.
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Position of the column called `name`. Names are case-sensitive.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.column_index.get(name).cloned()
    }

    /// The column rows are indexed by, if any.
    pub fn key_column(&self) -> Option<usize> {
        self.key_column
    }

    /// All rows, in source order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// The row at `index`, if there is one.
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Position of the row indexed under `key`.
    pub fn find_row<K: ToSqlValue + ?Sized>(&self, key: &K) -> Option<usize> {
        self.row_index.get(&key.to_sql_value()).cloned()
    }

    /// `true` if a row is indexed under `key`.
    pub fn contains_key<K: ToSqlValue + ?Sized>(&self, key: &K) -> bool {
        self.find_row(key).is_some()
    }

    /// The raw value at `(row, column)`.
    ///
    /// # Errors
    ///
    /// `OutOfBounds` if either index is past the end.
    pub fn value_at(&self, row: usize, column: usize) -> Result<&SqlValue, DataSetError> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .ok_or_else(|| DataSetError::OutOfBounds {
                row,
                column,
                row_count: self.rows.len(),
                column_count: self.column_names.len(),
            })
    }

    /// The raw value in column `column` of the row indexed under `key`.
    ///
    /// # Errors
    ///
    /// `UnknownColumn` if there is no such column, otherwise `KeyNotFound` if
    /// no row has that key.
    pub fn value_by_key<K: ToSqlValue + ?Sized>(
        &self,
        key: &K,
        column: &str,
    ) -> Result<&SqlValue, DataSetError> {
        let (row, column) = self.locate(key, column)?;
        self.value_at(row, column)
    }

    /// The value at `(row, column)` as a number.
    ///
    /// Numeric cells pass through. Text is trimmed and must look like an
    /// integer (`-12`, `+7`) or a plain decimal (`3.14`); integer text is read
    /// as a 32-bit integer. `NULL` gives `None`.
    ///
    /// # Errors
    ///
    /// `OutOfBounds` as for `value_at`, `Coercion` for anything else.
    pub fn number_at(&self, row: usize, column: usize) -> Result<Option<SqlNumber>, DataSetError> {
        let value = self.value_at(row, column)?;
        coerce::to_number(value)
            .map_err(|mismatch| coercion_error(row, column, value, TargetType::Number, mismatch))
    }

    /// Keyed form of `number_at`.
    pub fn number_by_key<K: ToSqlValue + ?Sized>(
        &self,
        key: &K,
        column: &str,
    ) -> Result<Option<SqlNumber>, DataSetError> {
        let (row, column) = self.locate(key, column)?;
        self.number_at(row, column)
    }

    /// The text form of the value at `(row, column)`, `None` for `NULL`.
    pub fn text_at(&self, row: usize, column: usize) -> Result<Option<String>, DataSetError> {
        Ok(coerce::to_text(self.value_at(row, column)?))
    }

    /// Keyed form of `text_at`.
    pub fn text_by_key<K: ToSqlValue + ?Sized>(
        &self,
        key: &K,
        column: &str,
    ) -> Result<Option<String>, DataSetError> {
        let (row, column) = self.locate(key, column)?;
        self.text_at(row, column)
    }

    /// The value at `(row, column)` as a UTC timestamp.
    ///
    /// Timestamp cells pass through, numbers are milliseconds since the UNIX
    /// epoch and text must be exactly `yyyy-MM-ddTHH:mm:ssZ`, e.g.
    /// `2024-01-15T10:30:00+0000`. `NULL` gives `None`.
    ///
    /// # Errors
    ///
    /// `OutOfBounds` as for `value_at`, `Coercion` for anything else.
    pub fn timestamp_at(
        &self,
        row: usize,
        column: usize,
    ) -> Result<Option<DateTime<Utc>>, DataSetError> {
        let value = self.value_at(row, column)?;
        coerce::to_timestamp(value)
            .map_err(|mismatch| coercion_error(row, column, value, TargetType::Timestamp, mismatch))
    }

    /// Keyed form of `timestamp_at`.
    pub fn timestamp_by_key<K: ToSqlValue + ?Sized>(
        &self,
        key: &K,
        column: &str,
    ) -> Result<Option<DateTime<Utc>>, DataSetError> {
        let (row, column) = self.locate(key, column)?;
        self.timestamp_at(row, column)
    }

    /// Resolves a column name and then a key to a position.
    fn locate<K: ToSqlValue + ?Sized>(
        &self,
        key: &K,
        column: &str,
    ) -> Result<(usize, usize), DataSetError> {
        let column = self
            .column_index(column)
            .ok_or_else(|| DataSetError::UnknownColumn(column.to_string()))?;
        let key = key.to_sql_value();
        match self.row_index.get(&key) {
            Some(&row) => Ok((row, column)),
            None => Err(DataSetError::KeyNotFound(describe_key(&key))),
        }
    }
}
impl Index<usize> for DataSet {
    type Output = Row;

    fn index(&self, index: usize) -> &Row {
        &self.rows[index]
    }
}

fn build_column_index(column_names: &[String]) -> HashMap<String, usize> {
    let mut column_index = HashMap::with_capacity(column_names.len());
    for (position, name) in column_names.iter().enumerate() {
        if let Some(previous) = column_index.insert(name.clone(), position) {
            warn!(
                "Column '{}' at {} shadows the column of the same name at {}",
                name, position, previous
            );
        }
    }
    column_index
}

fn source_error<E>(err: E) -> DataSetError
where
    E: std::error::Error + Send + Sync + 'static,
{
    DataSetError::Source(Box::new(err))
}

fn coercion_error(
    row: usize,
    column: usize,
    value: &SqlValue,
    target: TargetType,
    mismatch: Mismatch,
) -> DataSetError {
    let text = match *value {
        SqlValue::Binary(ref bytes) => format!("<{} bytes>", bytes.len()),
        _ => value.to_string(),
    };
    DataSetError::Coercion(CoercionError::new(row, column, text, target, mismatch.0))
}

fn describe_key(key: &SqlValue) -> String {
    match *key {
        SqlValue::Null => "NULL".to_string(),
        ref other => format!("{} ({})", other, other.type_name()),
    }
}
