use crate::types::{SqlNumber, SqlValue};
use chrono::{DateTime, TimeZone, Utc};
use regex::Regex;
use std::error;
use std::sync::OnceLock;

/// `yyyy-MM-ddTHH:mm:ssZ`, e.g. `2024-01-15T10:30:00+0000`.
pub(crate) const ISO8601_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

const INTEGER_PATTERN: &str = r"^(\+|-)?[0-9]+$";
const DECIMAL_PATTERN: &str = r"^(\+|-)?[0-9]+\.[0-9]+$";

struct Patterns {
    integer: Regex,
    decimal: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        integer: Regex::new(INTEGER_PATTERN).expect("valid integer pattern"),
        decimal: Regex::new(DECIMAL_PATTERN).expect("valid decimal pattern"),
    })
}

/// A value that could not be coerced, with the underlying parse error if any.
#[derive(Debug)]
pub(crate) struct Mismatch(pub(crate) Option<Box<dyn error::Error + Send + Sync>>);

impl Mismatch {
    fn plain() -> Mismatch {
        Mismatch(None)
    }

    fn caused_by<E: error::Error + Send + Sync + 'static>(err: E) -> Mismatch {
        Mismatch(Some(Box::new(err)))
    }
}

/// Numbers pass through, text is matched against the integer pattern and then
/// the decimal pattern. Integer text is parsed as `i32`.
pub(crate) fn to_number(value: &SqlValue) -> Result<Option<SqlNumber>, Mismatch> {
    match *value {
        SqlValue::Null => Ok(None),
        SqlValue::Integer(i) => Ok(Some(SqlNumber::Integer(i))),
        SqlValue::Float(f) => Ok(Some(SqlNumber::Float(f))),
        SqlValue::Text(ref s) => {
            let text = s.trim();
            let patterns = patterns();
            if patterns.integer.is_match(text) {
                let i = text.parse::<i32>().map_err(Mismatch::caused_by)?;
                return Ok(Some(SqlNumber::Integer(i64::from(i))));
            }
            if patterns.decimal.is_match(text) {
                let f = text.parse::<f64>().map_err(Mismatch::caused_by)?;
                return Ok(Some(SqlNumber::Float(f)));
            }
            Err(Mismatch::plain())
        }
        SqlValue::Timestamp(..) | SqlValue::Binary(..) => Err(Mismatch::plain()),
    }
}

pub(crate) fn to_text(value: &SqlValue) -> Option<String> {
    match *value {
        SqlValue::Null => None,
        ref other => Some(other.to_string()),
    }
}

/// Numbers are milliseconds since the UNIX epoch, text must match
/// `ISO8601_FORMAT` in full.
pub(crate) fn to_timestamp(value: &SqlValue) -> Result<Option<DateTime<Utc>>, Mismatch> {
    match *value {
        SqlValue::Null => Ok(None),
        SqlValue::Timestamp(t) => Ok(Some(t)),
        SqlValue::Integer(millis) => from_millis(millis).map(Some),
        SqlValue::Float(f) if !f.is_finite() => Err(Mismatch::plain()),
        SqlValue::Float(f) => from_millis(f as i64).map(Some),
        SqlValue::Text(ref s) => DateTime::parse_from_str(s, ISO8601_FORMAT)
            .map(|t| Some(t.with_timezone(&Utc)))
            .map_err(Mismatch::caused_by),
        SqlValue::Binary(..) => Err(Mismatch::plain()),
    }
}

fn from_millis(millis: i64) -> Result<DateTime<Utc>, Mismatch> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or_else(Mismatch::plain)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> SqlValue {
        SqlValue::Text(s.to_string())
    }

    #[test]
    fn patterns_compile() {
        let patterns = patterns();
        assert!(patterns.integer.is_match("-12"));
        assert!(patterns.decimal.is_match("+0.5"));
        assert!(!patterns.integer.is_match("0.5"));
    }

    #[test]
    fn number_from_text() {
        assert_eq!(to_number(&text("42")).unwrap(), Some(SqlNumber::Integer(42)));
        assert_eq!(to_number(&text("+7")).unwrap(), Some(SqlNumber::Integer(7)));
        assert_eq!(to_number(&text(" 12 ")).unwrap(), Some(SqlNumber::Integer(12)));
        assert_eq!(to_number(&text("-3.14")).unwrap(), Some(SqlNumber::Float(-3.14)));
    }

    #[test]
    fn number_rejects_other_shapes() {
        for bad in &["abc", "1.", ".5", "1.5e3", "1,000", "", "٣"] {
            match to_number(&text(bad)) {
                Err(Mismatch(None)) => (),
                other => panic!("{:?} should not coerce, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn integer_text_overflowing_i32_keeps_cause() {
        match to_number(&text("99999999999")) {
            Err(Mismatch(Some(_))) => (),
            other => panic!("expected a parse failure, got {:?}", other),
        }
    }

    #[test]
    fn number_passes_numbers_through() {
        assert_eq!(to_number(&SqlValue::Null).unwrap(), None);
        assert_eq!(
            to_number(&SqlValue::Integer(1 << 40)).unwrap(),
            Some(SqlNumber::Integer(1 << 40))
        );
        assert_eq!(to_number(&SqlValue::Float(0.25)).unwrap(), Some(SqlNumber::Float(0.25)));
        assert!(to_number(&SqlValue::Binary(vec![1])).is_err());
    }

    #[test]
    fn text_forms() {
        assert_eq!(to_text(&SqlValue::Null), None);
        assert_eq!(to_text(&SqlValue::Integer(-5)), Some("-5".to_string()));
        assert_eq!(to_text(&SqlValue::Float(2.5)), Some("2.5".to_string()));
        assert_eq!(to_text(&SqlValue::Binary(vec![0xde, 0xad, 0x01])), Some("dead01".to_string()));
        let t = Utc.timestamp_millis_opt(0).single().unwrap();
        assert_eq!(to_text(&SqlValue::Timestamp(t)), Some("1970-01-01 00:00:00 UTC".to_string()));
    }

    #[test]
    fn timestamp_from_text() {
        let parsed = to_timestamp(&text("2024-01-15T10:30:00+0000")).unwrap().unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap());
        let shifted = to_timestamp(&text("2024-01-15T12:30:00+0200")).unwrap().unwrap();
        assert_eq!(shifted, parsed);
    }

    #[test]
    fn timestamp_rejects_loose_text() {
        for bad in &["2024-01-15", "2024-01-15 10:30:00+0000", "2024-01-15T10:30:00+0000 extra"] {
            match to_timestamp(&text(bad)) {
                Err(Mismatch(Some(_))) => (),
                other => panic!("{:?} should not parse, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn timestamp_from_millis() {
        let t = to_timestamp(&SqlValue::Integer(1_700_000_000_000)).unwrap().unwrap();
        assert_eq!(t.timestamp_millis(), 1_700_000_000_000);
        let f = to_timestamp(&SqlValue::Float(1_500.9)).unwrap().unwrap();
        assert_eq!(f.timestamp_millis(), 1_500);
        assert!(to_timestamp(&SqlValue::Integer(i64::MAX)).is_err());
        for &bad in &[f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            match to_timestamp(&SqlValue::Float(bad)) {
                Err(Mismatch(None)) => (),
                other => panic!("{} should not be a timestamp, got {:?}", bad, other),
            }
        }
        assert!(to_timestamp(&SqlValue::Binary(Vec::new())).is_err());
        assert_eq!(to_timestamp(&SqlValue::Null).unwrap(), None);
    }
}
