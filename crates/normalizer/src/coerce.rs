use crate::error::NormalizeError;
use crate::resolution::ResolutionMap;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use core_types::{CanonicalField, CellValue, RawRecordSet};
use serde::Serialize;
use std::collections::BTreeMap;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Month-first before day-first; the day-first layouts only match when the
/// first number cannot be a month.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%m.%d.%Y",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
];

/// Number of non-blank cells per field that could not be coerced and were nulled.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CoercionReport {
    pub nulled: BTreeMap<CanonicalField, usize>,
}

impl CoercionReport {
    pub fn total_nulled(&self) -> usize {
        self.nulled.values().sum()
    }
}

/// Parses a numeric cell. Accepts surrounding whitespace, a leading `+`, a `$`
/// sign, comma thousands separators and accounting-style `(x)` negatives.
/// Non-finite results are rejected.
pub fn parse_number(raw: &str) -> Option<f64> {
    let mut text = raw.trim();
    let mut negate = false;
    if text.len() > 2 && text.starts_with('(') && text.ends_with(')') {
        text = &text[1..text.len() - 1];
        negate = true;
    }
    let cleaned: String = text.chars().filter(|c| *c != '$').collect();
    let cleaned = cleaned.trim();
    let cleaned = cleaned.strip_prefix('+').unwrap_or(cleaned);
    if cleaned.is_empty() {
        return None;
    }
    let cleaned = if cleaned.contains(',') {
        strip_thousands_separators(cleaned)?
    } else {
        cleaned.to_string()
    };
    let value: f64 = cleaned.parse().ok()?;
    let value = if negate { -value } else { value };
    value.is_finite().then_some(value)
}

fn strip_thousands_separators(text: &str) -> Option<String> {
    let int_part = text.split(['.', 'e', 'E']).next().unwrap_or(text);
    let digits = int_part.trim_start_matches('-');
    let mut groups = digits.split(',');
    let head = groups.next()?;
    if head.is_empty() || head.len() > 3 {
        return None;
    }
    if !groups.all(|g| g.len() == 3 && g.chars().all(|c| c.is_ascii_digit())) {
        return None;
    }
    if text[int_part.len()..].contains(',') {
        return None;
    }
    Some(text.replace(',', ""))
}

/// Parses a timestamp cell. Zoned inputs are converted to UTC and stored naive;
/// date-only inputs land at midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%z") {
        return Some(dt.naive_utc());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(text, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

fn coerce_numeric_cell(cell: &CellValue) -> CellValue {
    match cell {
        CellValue::Number(n) if n.is_finite() => CellValue::Number(*n),
        CellValue::Text(s) => parse_number(s).into(),
        _ => CellValue::Empty,
    }
}

fn coerce_timestamp_cell(cell: &CellValue) -> CellValue {
    match cell {
        CellValue::Timestamp(ts) => CellValue::Timestamp(*ts),
        CellValue::Text(s) => parse_timestamp(s).map_or(CellValue::Empty, CellValue::Timestamp),
        _ => CellValue::Empty,
    }
}

/// Coerces every resolved date and numeric column in place.
///
/// Unparseable values become `Empty`; nothing here fails on bad data.
pub fn coerce_types(
    records: &mut RawRecordSet,
    map: &ResolutionMap,
) -> Result<CoercionReport, NormalizeError> {
    let mut report = CoercionReport::default();

    let targets = std::iter::once(CanonicalField::Date).chain(CanonicalField::NUMERIC);
    for field in targets {
        let Some(column) = map.column(field) else {
            continue;
        };
        let mut nulled = 0usize;
        records.map_column(column, |cell| {
            let coerced = if field.is_numeric() {
                coerce_numeric_cell(cell)
            } else {
                coerce_timestamp_cell(cell)
            };
            if coerced.is_blank() && !cell.is_blank() {
                nulled += 1;
            }
            coerced
        })?;
        if nulled > 0 {
            tracing::debug!(field = %field, column, nulled, "Unparseable values coerced to null");
            report.nulled.insert(field, nulled);
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolution::resolve;

    #[test]
    fn plain_and_decorated_numbers_parse() {
        assert_eq!(parse_number(" 42.5 "), Some(42.5));
        assert_eq!(parse_number("+3"), Some(3.0));
        assert_eq!(parse_number("$1,250.75"), Some(1250.75));
        assert_eq!(parse_number("(12.5)"), Some(-12.5));
        assert_eq!(parse_number("-$7"), Some(-7.0));
        assert_eq!(parse_number("1e3"), Some(1000.0));
    }

    #[test]
    fn garbage_and_non_finite_numbers_are_null() {
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("1,5"), None);
        assert_eq!(parse_number("12,34,567"), None);
    }

    #[test]
    fn timestamps_in_common_layouts_parse() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parse_timestamp("2024-01-15"), Some(expected));
        assert_eq!(parse_timestamp("01/15/2024"), Some(expected));
        assert_eq!(parse_timestamp("2024/01/15"), Some(expected));
        assert_eq!(
            parse_timestamp("2024-01-15 09:30:00").map(|t| t.format("%H:%M").to_string()),
            Some("09:30".to_string())
        );
        assert_eq!(
            parse_timestamp("2024-01-15T10:00:00+02:00").map(|t| t.format("%H").to_string()),
            Some("08".to_string())
        );
        assert_eq!(parse_timestamp("not a date"), None);
    }

    #[test]
    fn ambiguous_day_month_dates_are_month_first() {
        let date = |s: &str| parse_timestamp(s).map(|t| t.date());
        assert_eq!(date("03-04-2024"), NaiveDate::from_ymd_opt(2024, 3, 4));
        assert_eq!(date("03.04.2024"), NaiveDate::from_ymd_opt(2024, 3, 4));
        assert_eq!(date("25-12-2024"), NaiveDate::from_ymd_opt(2024, 12, 25));
        assert_eq!(date("25/12/2024"), NaiveDate::from_ymd_opt(2024, 12, 25));
    }

    #[test]
    fn coercion_only_touches_resolved_columns() {
        let mut set = RawRecordSet::from_rows(
            vec!["date".into(), "pnl".into(), "market".into(), "free".into()],
            vec![
                vec!["2024-01-02".into(), "10".into(), "ES".into(), "7".into()],
                vec!["garbage".into(), "oops".into(), "NQ".into(), "8".into()],
            ],
        )
        .unwrap();
        let map = resolve(set.columns());
        let report = coerce_types(&mut set, &map).unwrap();

        assert!(matches!(set.cell(0, "date"), Some(CellValue::Timestamp(_))));
        assert_eq!(set.cell(0, "pnl"), Some(&CellValue::Number(10.0)));
        assert_eq!(set.cell(1, "date"), Some(&CellValue::Empty));
        assert_eq!(set.cell(1, "pnl"), Some(&CellValue::Empty));
        assert_eq!(set.cell(0, "market"), Some(&CellValue::Text("ES".into())));
        assert_eq!(set.cell(0, "free"), Some(&CellValue::Text("7".into())));
        assert_eq!(report.nulled.get(&CanonicalField::Pnl), Some(&1));
        assert_eq!(report.total_nulled(), 2);
    }
}
