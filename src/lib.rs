#![warn(missing_docs)]
//! This crate provides an immutable, randomly addressable, in-memory snapshot of the result of a
//! SQL query.
//!
//! # Overview
//!
//! Most database drivers hand out query results through a forward-only cursor: you get one row at
//! a time, in order, and once a row has gone past it is gone. That is the right default for large
//! results but awkward for the small lookup tables, configuration tables and reference data that
//! a program wants to consult over and over again.
//!
//! A [`DataSet`][1] reads such a cursor to the end and keeps every row in memory. Rows can then be
//! reached by their zero-based position or, when a key column is chosen at construction, by the
//! value held in that column. Columns can be reached by position or by name.
//!
//! Every cell is a [`SqlValue`][2]. Values can be read raw, or coerced on a best-effort basis
//! into a number, a string or a timestamp:
//!
//! | Accessor       | Accepts                                                         |
//! |----------------|-----------------------------------------------------------------|
//! | `number_at`    | integers, floats, text such as `42`, `-7`, `+3.14`              |
//! | `text_at`      | anything                                                        |
//! | `timestamp_at` | timestamps, milliseconds since the epoch, `2024-01-15T10:30:00+0000` |
//!
//! `NULL` is returned as `None` by all of the coercing accessors. Anything they cannot convert is
//! reported as a [`DataSetError::Coercion`][3] rather than silently defaulted.
//!
//! The source of the rows is anything that implements [`RowSource`][4]. An iterator of
//! `Result<Row, E>`, the shape most drivers use for lazily fetched results, can be wrapped in an
//! [`IterSource`][5].
//!
//! # Examples
//!
//! ```rust
//! use dataset::dataset::DataSet;
//! use dataset::source::IterSource;
//! use dataset::types::{SqlNumber, SqlValue};
//!
//! let source = IterSource::from_rows(
//!     vec!["Code", "Name", "Rate"],
//!     vec![
//!         vec![SqlValue::Text("EUR".to_string()),
//!              SqlValue::Text("Euro".to_string()),
//!              SqlValue::Text("1.08".to_string())],
//!         vec![SqlValue::Text("JPY".to_string()),
//!              SqlValue::Text("Yen".to_string()),
//!              SqlValue::Null],
//!     ],
//! );
//!
//! // Index the rows by the first column
//! let rates = DataSet::create(source, Some(0)).unwrap();
//! assert_eq!(rates.len(), 2);
//!
//! // By position
//! assert_eq!(rates.text_at(1, 1).unwrap(), Some("Yen".to_string()));
//!
//! // By key and column name, with the text coerced into a number
//! assert_eq!(rates.number_by_key("EUR", "Rate").unwrap(), Some(SqlNumber::Float(1.08)));
//! assert_eq!(rates.number_by_key("JPY", "Rate").unwrap(), None);
//!
//! // Unknown keys are errors
//! assert!(rates.text_by_key("GBP", "Name").is_err());
//! ```
//!
//! [1]: dataset/struct.DataSet.html
//! [2]: types/enum.SqlValue.html
//! [3]: dataset_error/enum.DataSetError.html
//! [4]: source/trait.RowSource.html
//! [5]: source/struct.IterSource.html
//!

extern crate chrono;
extern crate log;
extern crate regex;

/// The snapshot itself.
///
/// A `DataSet` is built once by `DataSet::create` from a `RowSource` and never changes
/// afterwards. Construction reads the source to the end; if the source fails part way through
/// the error is returned and nothing is kept.
///
/// Rows are indexed twice: by position, and, optionally, by the value in a key column. Keys are
/// expected to be unique. When they are not, the last row with a given key wins and a warning is
/// logged. Duplicate column names are treated the same way.
///
/// Every keyed accessor fails with `DataSetError::KeyNotFound` when no row has the key. Use
/// `find_row` or `contains_key` to test for a key first.
///
/// # Examples
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use dataset::dataset::DataSet;
/// use dataset::source::IterSource;
/// use dataset::types::SqlValue;
///
/// let source = IterSource::from_rows(
///     vec!["Id", "Created"],
///     vec![
///         vec![SqlValue::Integer(1), SqlValue::Text("2024-01-15T10:30:00+0000".to_string())],
///         vec![SqlValue::Integer(2), SqlValue::Integer(1_700_000_000_000)],
///     ],
/// );
/// let data_set = DataSet::create(source, Some(0)).unwrap();
///
/// let created = data_set.timestamp_by_key(&1, "Created").unwrap();
/// assert_eq!(created, Some(Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()));
///
/// let created = data_set.timestamp_at(1, 1).unwrap().unwrap();
/// assert_eq!(created.timestamp_millis(), 1_700_000_000_000);
/// ```
pub mod dataset;

/// Errors.
///
/// Every failure is reported as a `DataSetError`. Construction can fail because the source
/// failed (`Source`) or because what it returned was inconsistent (`RowWidth`,
/// `InvalidKeyColumn`). The accessors fail on bad positions (`OutOfBounds`), names
/// (`UnknownColumn`) or keys (`KeyNotFound`), and on values that cannot be coerced
/// (`Coercion`). A `CoercionError` records the cell, the offending value and, when a parser was
/// involved, the parser's own error as its `source()`.
///
/// ```rust
/// use dataset::dataset::DataSet;
/// use dataset::dataset_error::{DataSetError, TargetType};
/// use dataset::source::IterSource;
/// use dataset::types::SqlValue;
///
/// let source = IterSource::from_rows(vec!["Name"], vec![vec![SqlValue::Text("abc".to_string())]]);
/// let data_set = DataSet::create(source, None).unwrap();
///
/// match data_set.number_at(0, 0) {
///     Err(DataSetError::Coercion(err)) => {
///         assert_eq!(err.target(), TargetType::Number);
///         assert_eq!(err.to_string(), "Can't cast value at @(0,0):'abc' to number");
///     }
///     other => panic!("unexpected {:?}", other),
/// }
/// ```
pub mod dataset_error;

/// Types used for the values held in a `DataSet`.
///
/// This module provides a type `SqlValue` and two traits `ToSqlValue` and `FromSqlValue`. Each
/// cell is one `SqlValue` variant: `Null`, `Integer`, `Float`, `Text`, `Timestamp` or `Binary`.
/// Drivers map their native types onto these; all integers become `i64`, all floating point
/// numbers `f64` and all timestamps are normalised to `DateTime<Utc>`.
///
/// `ToSqlValue` turns Rust values into `SqlValue`s and is what the keyed accessors accept as a
/// key. `FromSqlValue` does the reverse. Numbers and timestamps must come from the matching
/// variant; `String` accepts any non-null value and takes its text form:
///
/// ```rust
/// use dataset::types::SqlValue;
///
/// let value = SqlValue::Integer(12);
/// assert_eq!(value.value::<i64>(), Some(12));
/// assert_eq!(value.value::<f64>(), None);
/// assert_eq!(value.value::<String>(), Some("12".to_string()));
/// ```
///
/// Floats compare by bit pattern so that any value can be used as a key; `Integer(1)` and
/// `Float(1.0)` are different keys.
pub mod types;

/// Rows of data.
///
/// A `Row` holds one `SqlValue` per column. It implements the `Index` trait and so cells can be
/// accessed via a column number.
///
pub mod row;

/// Where rows come from.
///
/// `RowSource` is the contract a database cursor has to meet to be turned into a `DataSet`.
/// `IterSource` adapts any iterator of `Result<Row, E>`.
pub mod source;

mod coerce;
