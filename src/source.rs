use crate::row::Row;
use std::convert::Infallible;
use std::error;
use std::fmt;
use std::vec;

/// A forward-only cursor over the result of a query.
///
/// `column_names` is called once, before the first call to `next_row`. Rows
/// are then pulled until `next_row` returns `Ok(None)` or an error. Column
/// positions are zero-based; a source whose native API counts from one must
/// shift them itself.
pub trait RowSource {
    /// Whatever the underlying driver fails with.
    type Error: error::Error + Send + Sync + 'static;

    /// The column names, in column order.
    fn column_names(&mut self) -> Result<Vec<String>, Self::Error>;

    /// The next row, or `None` once the cursor is exhausted.
    fn next_row(&mut self) -> Result<Option<Row>, Self::Error>;
}

impl<'a, S: RowSource + ?Sized> RowSource for &'a mut S {
    type Error = S::Error;

    fn column_names(&mut self) -> Result<Vec<String>, Self::Error> {
        (**self).column_names()
    }

    fn next_row(&mut self) -> Result<Option<Row>, Self::Error> {
        (**self).next_row()
    }
}

/// Adapts an iterator of row results into a `RowSource`.
///
/// This is the shape most drivers hand out, a lazily fetched iterator of
/// `Result<Row, E>`, so wrapping one is usually all that is needed.
pub struct IterSource<I> {
    columns: Vec<String>,
    rows: I,
}
impl<I> IterSource<I> {
    /// Creates a source from column names and a row iterator.
    pub fn new<C, S>(columns: C, rows: I) -> Self
    where
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        IterSource {
            columns: columns.into_iter().map(Into::into).collect(),
            rows,
        }
    }
}
impl IterSource<InfallibleRows> {
    /// Creates a source that can never fail from rows already in memory.
    ///
    /// ```rust
    /// use dataset::source::IterSource;
    /// use dataset::types::SqlValue;
    ///
    /// let source = IterSource::from_rows(vec!["id"], vec![vec![SqlValue::Integer(1)]]);
    /// # drop(source);
    /// ```
    pub fn from_rows<C, S, R>(columns: C, rows: Vec<R>) -> Self
    where
        C: IntoIterator<Item = S>,
        S: Into<String>,
        R: Into<Row>,
    {
        let rows: Vec<Row> = rows.into_iter().map(Into::into).collect();
        IterSource::new(
            columns,
            InfallibleRows {
                rows: rows.into_iter(),
            },
        )
    }
}

impl<I, E> RowSource for IterSource<I>
where
    I: Iterator<Item = Result<Row, E>>,
    E: error::Error + Send + Sync + 'static,
{
    type Error = E;

    fn column_names(&mut self) -> Result<Vec<String>, E> {
        Ok(self.columns.clone())
    }

    fn next_row(&mut self) -> Result<Option<Row>, E> {
        self.rows.next().transpose()
    }
}

impl<I> fmt::Debug for IterSource<I> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("IterSource")
            .field("columns", &self.columns)
            .finish()
    }
}

/// The row iterator behind `IterSource::from_rows`.
#[derive(Debug)]
pub struct InfallibleRows {
    rows: vec::IntoIter<Row>,
}
impl Iterator for InfallibleRows {
    type Item = Result<Row, Infallible>;

    fn next(&mut self) -> Option<Self::Item> {
        self.rows.next().map(Ok)
    }
}
