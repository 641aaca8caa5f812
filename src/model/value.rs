//! Cell values - the tagged variant behind every table cell
//!
//! Values are resolved once, when a dataset is loaded, into one of
//! `Text`, `Number`, `Date` or `Empty`. Display, search and comparison
//! dispatch on that tag instead of sniffing strings at render time.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::cmp::Ordering;
use std::fmt;

/// en-US short date style: month/day/year without zero padding
pub const DISPLAY_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// A single cell value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Date(NaiveDateTime),
    #[default]
    Empty,
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    /// Build a date value from a calendar date at midnight
    pub fn date(year: i32, month: u32, day: u32) -> Self {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(CellValue::Date)
            .unwrap_or(CellValue::Empty)
    }

    /// Resolve a raw scalar (CSV field, YAML string) into a typed value
    ///
    /// Empty strings become `Empty`, numeric strings `Number`, ISO-8601
    /// dates `Date`; everything else stays `Text`.
    pub fn infer(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CellValue::Empty;
        }
        if let Ok(n) = trimmed.parse::<f64>() {
            // only when the number prints back as written: "02134", "1.50",
            // long codes, "inf" and "nan" stay text
            if format_number(n) == trimmed {
                return CellValue::Number(n);
            }
        }
        if let Some(dt) = parse_iso_date(trimmed) {
            return CellValue::Date(dt);
        }
        CellValue::text(raw)
    }

    /// Resolve a JSON value into a typed cell
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => CellValue::Empty,
            serde_json::Value::Number(n) => match n.as_f64() {
                // integers past 2^53 would lose digits
                Some(f) if n.is_f64() || format_number(f) == n.to_string() => CellValue::Number(f),
                _ => CellValue::text(n.to_string()),
            },
            serde_json::Value::String(s) => match parse_iso_date(s.trim()) {
                Some(dt) => CellValue::Date(dt),
                None => CellValue::Text(s.clone()),
            },
            other => CellValue::Text(other.to_string()),
        }
    }

    pub fn is_date(&self) -> bool {
        matches!(self, CellValue::Date(_))
    }

    /// The value as shown in a cell and matched by the search box
    pub fn display(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Date(dt) => dt.format(DISPLAY_DATE_FORMAT).to_string(),
            CellValue::Empty => String::new(),
        }
    }

    /// Milliseconds since the Unix epoch via a generic date parse
    ///
    /// Returns `None` for values that do not describe a point in time.
    pub fn timestamp_millis(&self) -> Option<i64> {
        match self {
            CellValue::Date(dt) => Some(dt.and_utc().timestamp_millis()),
            CellValue::Number(n) if n.is_finite() => Some(n.trunc() as i64),
            CellValue::Number(_) => None,
            CellValue::Text(s) => parse_date_text(s).map(|dt| dt.and_utc().timestamp_millis()),
            CellValue::Empty => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(dt: NaiveDateTime) -> Self {
        CellValue::Date(dt)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        d.and_hms_opt(0, 0, 0)
            .map(CellValue::Date)
            .unwrap_or(CellValue::Empty)
    }
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let label = if n > 0.0 { "Infinity" } else { "-Infinity" };
        label.to_string()
    } else if n == 0.0 {
        // covers -0.0
        "0".to_string()
    } else {
        n.to_string()
    }
}

/// Strict ISO-8601 forms accepted when resolving types at load time
fn parse_iso_date(s: &str) -> Option<NaiveDateTime> {
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

/// Lenient date parse used when a text cell is compared against a date
pub fn parse_date_text(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Some(dt) = parse_iso_date(s) {
        return Some(dt);
    }
    ["%m/%d/%Y", "%Y/%m/%d"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Locale-aware String Comparison
// ═══════════════════════════════════════════════════════════════════════════════

/// Compare two strings the way a root-locale collator orders them
///
/// Levels, each consulted only on a tie of the previous one:
/// 1. character class (spaces/punctuation < digits < letters) and folded letter
/// 2. unaccented before accented
/// 3. lowercase before uppercase
/// 4. code point order, so the result is a total order
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    a.chars()
        .map(primary_key)
        .cmp(b.chars().map(primary_key))
        .then_with(|| a.chars().map(is_accented).cmp(b.chars().map(is_accented)))
        .then_with(|| a.chars().map(char::is_uppercase).cmp(b.chars().map(char::is_uppercase)))
        .then_with(|| a.cmp(b))
}

fn primary_key(c: char) -> (u8, char) {
    let class = if c.is_whitespace() {
        0
    } else if c.is_ascii_punctuation() || (!c.is_alphanumeric() && !c.is_control()) {
        1
    } else if c.is_numeric() {
        2
    } else if c.is_alphabetic() {
        3
    } else {
        4
    };
    let folded = fold_diacritic(c).to_lowercase().next().unwrap_or(c);
    (class, folded)
}

fn is_accented(c: char) -> bool {
    fold_diacritic(c) != c
}

/// Strip the diacritic from Latin-1 and common Latin Extended-A letters
fn fold_diacritic(c: char) -> char {
    match c {
        'À'..='Å' => 'A',
        'à'..='å' => 'a',
        'Ç' => 'C',
        'ç' => 'c',
        'È'..='Ë' => 'E',
        'è'..='ë' => 'e',
        'Ì'..='Ï' => 'I',
        'ì'..='ï' => 'i',
        'Ñ' => 'N',
        'ñ' => 'n',
        'Ò'..='Ö' | 'Ø' => 'O',
        'ò'..='ö' | 'ø' => 'o',
        'Ù'..='Ü' => 'U',
        'ù'..='ü' => 'u',
        'Ý' => 'Y',
        'ý' | 'ÿ' => 'y',
        'Ā' | 'Ă' | 'Ą' => 'A',
        'ā' | 'ă' | 'ą' => 'a',
        'Ć' | 'Ĉ' | 'Ċ' | 'Č' => 'C',
        'ć' | 'ĉ' | 'ċ' | 'č' => 'c',
        'Ď' => 'D',
        'ď' => 'd',
        'Ē' | 'Ĕ' | 'Ė' | 'Ę' | 'Ě' => 'E',
        'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'Ł' => 'L',
        'ł' => 'l',
        'Ń' | 'Ň' => 'N',
        'ń' | 'ň' => 'n',
        'Ř' => 'R',
        'ř' => 'r',
        'Ś' | 'Š' | 'Ş' => 'S',
        'ś' | 'š' | 'ş' => 's',
        'Ť' | 'Ţ' => 'T',
        'ť' | 'ţ' => 't',
        'Ů' | 'Ű' => 'U',
        'ů' | 'ű' => 'u',
        'Ź' | 'Ż' | 'Ž' => 'Z',
        'ź' | 'ż' | 'ž' => 'z',
        _ => c,
    }
}
