use chrono::NaiveDateTime;
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

/// A single scalar value as it appears in a trade log.
///
/// Input files are untyped, so every cell starts life as `Text` (or `Empty`).
/// Type coercion later rewrites cells of resolved columns into `Number` or
/// `Timestamp`; a cell that cannot be coerced becomes `Empty`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Timestamp(NaiveDateTime),
}

impl CellValue {
    /// Builds a cell from raw text. Whitespace-only input is treated as missing.
    pub fn from_text(raw: &str) -> Self {
        if raw.trim().is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(raw.to_string())
        }
    }

    /// `true` for `Empty` and for text that is only whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) | CellValue::Timestamp(_) => false,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            CellValue::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    /// The cell rendered as text, or `None` when blank.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) if s.trim().is_empty() => None,
            CellValue::Text(s) => Some(Cow::Borrowed(s.as_str())),
            other => Some(Cow::Owned(other.to_string())),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<Option<f64>> for CellValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(CellValue::Empty, CellValue::Number)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::from_text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn whitespace_text_is_blank() {
        assert_eq!(CellValue::from_text("   "), CellValue::Empty);
        assert!(CellValue::Text(" \t".into()).is_blank());
        assert!(!CellValue::Number(0.0).is_blank());
    }

    #[test]
    fn as_text_renders_typed_cells() {
        let ts = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        assert_eq!(
            CellValue::Timestamp(ts).as_text().as_deref(),
            Some("2024-03-01 09:30:00")
        );
        assert_eq!(CellValue::Number(1.5).as_text().as_deref(), Some("1.5"));
        assert_eq!(CellValue::Empty.as_text(), None);
    }
}
