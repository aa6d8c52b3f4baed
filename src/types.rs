use chrono::{DateTime, Utc};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A single cell value.
///
/// Every cell of a `DataSet` holds one of these. `Null` stands for a SQL `NULL`.
#[derive(Debug, Clone)]
pub enum SqlValue {
    /// SQL `NULL`.
    Null,
    /// Any integer type.
    Integer(i64),
    /// Any floating point type.
    Float(f64),
    /// `CHAR`, `VARCHAR`, `TEXT` and friends.
    Text(String),
    /// A point in time, normalised to UTC.
    Timestamp(DateTime<Utc>),
    /// Anything else the source could only hand over as raw bytes.
    Binary(Vec<u8>),
}
impl SqlValue {
    /// Converts the value into a Rust type. Returns `None` when the variant does
    /// not match the requested type; `String` takes the text form of any
    /// non-null value.
    pub fn value<T: FromSqlValue>(&self) -> Option<T> {
        T::from_sql_value(self)
    }

    /// `true` if this is `SqlValue::Null`.
    pub fn is_null(&self) -> bool {
        match *self {
            SqlValue::Null => true,
            _ => false,
        }
    }

    pub(crate) fn type_name(&self) -> &'static str {
        match *self {
            SqlValue::Null => "null",
            SqlValue::Integer(..) => "integer",
            SqlValue::Float(..) => "float",
            SqlValue::Text(..) => "text",
            SqlValue::Timestamp(..) => "timestamp",
            SqlValue::Binary(..) => "binary",
        }
    }
}

/// Floats compare by bit pattern so that values can be used as hash keys.
impl PartialEq for SqlValue {
    fn eq(&self, other: &SqlValue) -> bool {
        match (self, other) {
            (SqlValue::Null, SqlValue::Null) => true,
            (SqlValue::Integer(a), SqlValue::Integer(b)) => a == b,
            (SqlValue::Float(a), SqlValue::Float(b)) => a.to_bits() == b.to_bits(),
            (SqlValue::Text(a), SqlValue::Text(b)) => a == b,
            (SqlValue::Timestamp(a), SqlValue::Timestamp(b)) => a == b,
            (SqlValue::Binary(a), SqlValue::Binary(b)) => a == b,
            _ => false,
        }
    }
}
impl Eq for SqlValue {}

impl Hash for SqlValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_name().hash(state);
        match *self {
            SqlValue::Null => (),
            SqlValue::Integer(i) => i.hash(state),
            SqlValue::Float(f) => f.to_bits().hash(state),
            SqlValue::Text(ref s) => s.hash(state),
            SqlValue::Timestamp(ref t) => t.hash(state),
            SqlValue::Binary(ref b) => b.hash(state),
        }
    }
}

/// The canonical text form, as returned by `DataSet::text_at`. `Null` renders
/// as an empty string here; the accessors turn it into `None` instead.
impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SqlValue::Null => Ok(()),
            SqlValue::Integer(i) => write!(f, "{}", i),
            SqlValue::Float(x) => write!(f, "{}", x),
            SqlValue::Text(ref s) => write!(f, "{}", s),
            SqlValue::Timestamp(ref t) => write!(f, "{}", t),
            SqlValue::Binary(ref bytes) => {
                for byte in bytes {
                    write!(f, "{:02x}", byte)?;
                }
                Ok(())
            }
        }
    }
}

/// The result of a numeric coercion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SqlNumber {
    /// Came from an integer cell or from text matching the integer pattern.
    Integer(i64),
    /// Came from a float cell or from text matching the decimal pattern.
    Float(f64),
}
impl SqlNumber {
    /// The value as an `f64`. Large integers may lose precision.
    pub fn as_f64(&self) -> f64 {
        match *self {
            SqlNumber::Integer(i) => i as f64,
            SqlNumber::Float(f) => f,
        }
    }

    /// The value as an `i64`, truncating any fraction towards zero.
    pub fn as_i64(&self) -> i64 {
        match *self {
            SqlNumber::Integer(i) => i,
            SqlNumber::Float(f) => f as i64,
        }
    }
}

impl fmt::Display for SqlNumber {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SqlNumber::Integer(i) => write!(f, "{}", i),
            SqlNumber::Float(x) => write!(f, "{}", x),
        }
    }
}

/// Turns a Rust value into a `SqlValue`. Used for row keys.
pub trait ToSqlValue {
    /// Performs the conversion.
    fn to_sql_value(&self) -> SqlValue;
}

impl ToSqlValue for SqlValue {
    fn to_sql_value(&self) -> SqlValue {
        self.clone()
    }
}

impl ToSqlValue for str {
    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Text(self.to_string())
    }
}

impl ToSqlValue for String {
    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Text(self.clone())
    }
}

impl ToSqlValue for i64 {
    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Integer(*self)
    }
}

impl ToSqlValue for i32 {
    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Integer(i64::from(*self))
    }
}

impl ToSqlValue for f64 {
    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Float(*self)
    }
}

impl ToSqlValue for DateTime<Utc> {
    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Timestamp(*self)
    }
}

impl<'a, T: ToSqlValue + ?Sized> ToSqlValue for &'a T {
    fn to_sql_value(&self) -> SqlValue {
        (**self).to_sql_value()
    }
}

/// Pulls a Rust value out of a `SqlValue` of the matching variant.
pub trait FromSqlValue {
    /// Performs the conversion, `None` on a variant mismatch.
    fn from_sql_value(sql_value: &SqlValue) -> Option<Self>
    where
        Self: Sized;
}

impl FromSqlValue for String {
    fn from_sql_value(sql_value: &SqlValue) -> Option<Self> {
        match *sql_value {
            SqlValue::Null => None,
            SqlValue::Text(ref s) => Some(s.clone()),
            ref other => Some(other.to_string()),
        }
    }
}

impl FromSqlValue for i64 {
    fn from_sql_value(sql_value: &SqlValue) -> Option<Self> {
        match *sql_value {
            SqlValue::Integer(i) => Some(i),
            _ => None,
        }
    }
}

impl FromSqlValue for f64 {
    fn from_sql_value(sql_value: &SqlValue) -> Option<Self> {
        match *sql_value {
            SqlValue::Float(f) => Some(f),
            _ => None,
        }
    }
}

impl FromSqlValue for DateTime<Utc> {
    fn from_sql_value(sql_value: &SqlValue) -> Option<Self> {
        match *sql_value {
            SqlValue::Timestamp(t) => Some(t),
            _ => None,
        }
    }
}
