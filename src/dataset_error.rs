use std::error;
use std::fmt;

/// The various errors that might result when building or reading a `DataSet`.
///
#[derive(Debug)]
pub enum DataSetError {
    /// The row source failed while its metadata or rows were being read.
    /// No snapshot is produced.
    Source(Box<dyn error::Error + Send + Sync>),
    /// The source produced a row whose width differs from its column count.
    RowWidth {
        /// Zero-based position of the offending row.
        row: usize,
        /// Number of columns reported by the source.
        expected: usize,
        /// Number of cells in the row.
        found: usize,
    },
    /// The key column passed to `DataSet::create` does not exist.
    InvalidKeyColumn {
        /// The requested key column.
        column: usize,
        /// Number of columns reported by the source.
        column_count: usize,
    },
    /// A positional accessor was given a row or column outside the snapshot.
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        column: usize,
        /// Number of rows in the snapshot.
        row_count: usize,
        /// Number of columns in the snapshot.
        column_count: usize,
    },
    /// No column with this name exists.
    UnknownColumn(String),
    /// No row is indexed under this key. Holds the key's text form.
    KeyNotFound(String),
    /// A value could not be converted to the requested type.
    Coercion(CoercionError),
}

impl fmt::Display for DataSetError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            DataSetError::Source(ref err) => write!(f, "Reading row source: {}", err),
            DataSetError::RowWidth {
                row,
                expected,
                found,
            } => write!(
                f,
                "Row {} has {} cells but the source reported {} columns",
                row, found, expected
            ),
            DataSetError::InvalidKeyColumn {
                column,
                column_count,
            } => write!(
                f,
                "Key column {} is out of range for {} columns",
                column, column_count
            ),
            DataSetError::OutOfBounds {
                row,
                column,
                row_count,
                column_count,
            } => write!(
                f,
                "Position @({},{}) is outside {} rows x {} columns",
                row, column, row_count, column_count
            ),
            DataSetError::UnknownColumn(ref name) => write!(f, "Unknown column '{}'", name),
            DataSetError::KeyNotFound(ref key) => write!(f, "No row with key '{}'", key),
            DataSetError::Coercion(ref err) => write!(f, "{}", err),
        }
    }
}

impl error::Error for DataSetError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            DataSetError::Source(ref err) => Some(err.as_ref()),
            DataSetError::Coercion(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<CoercionError> for DataSetError {
    fn from(err: CoercionError) -> Self {
        DataSetError::Coercion(err)
    }
}

/// The type a coercion was aiming for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetType {
    /// `DataSet::number_at` and friends.
    Number,
    /// `DataSet::timestamp_at` and friends.
    Timestamp,
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            TargetType::Number => write!(f, "number"),
            TargetType::Timestamp => write!(f, "timestamp"),
        }
    }
}

/// Captures where a coercion failed and on which value.
#[derive(Debug)]
pub struct CoercionError {
    row: usize,
    column: usize,
    value: String,
    target: TargetType,
    cause: Option<Box<dyn error::Error + Send + Sync>>,
}
impl CoercionError {
    pub(crate) fn new(
        row: usize,
        column: usize,
        value: String,
        target: TargetType,
        cause: Option<Box<dyn error::Error + Send + Sync>>,
    ) -> CoercionError {
        CoercionError {
            row,
            column,
            value,
            target,
            cause,
        }
    }

    /// Zero-based row of the offending cell.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Zero-based column of the offending cell.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Text form of the offending value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// What the value was being converted to.
    pub fn target(&self) -> TargetType {
        self.target
    }
}

impl fmt::Display for CoercionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Can't cast value at @({},{}):'{}' to {}",
            self.row, self.column, self.value, self.target
        )?;
        if let Some(ref cause) = self.cause {
            write!(f, ": {}", cause)?;
        }
        Ok(())
    }
}

impl error::Error for CoercionError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self.cause {
            Some(ref cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}
