use std::fmt::Display;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

static ARRAY_TYPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i:ARRAY)\s*<\s*(?P<inner>.+?)\s*>$").expect("valid array type pattern")
});

/// Declared type of a catalog column.
///
/// The catalog snapshot stores types as free-form strings; they are mapped to
/// this closed set while the document is ingested. Aliases (`INT64`, `BOOL`,
/// `STRUCT`, ...) collapse onto one variant and anything unrecognized is kept
/// verbatim in `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnType {
    String,
    Bytes,
    Integer,
    Float,
    Numeric,
    BigNumeric,
    Boolean,
    Timestamp,
    Date,
    Time,
    DateTime,
    Geography,
    Json,
    Interval,
    /// Structured column (`RECORD` / `STRUCT`), its fields appear as dotted names
    Record,
    /// `ARRAY<inner>`
    Array(Box<ColumnType>),
    /// Type name not known to the catalog, kept as written
    Unknown(String),
}

impl ColumnType {
    /// Parse a declared type name. Never fails: unknown names end up in
    /// `ColumnType::Unknown`.
    pub fn parse(raw: &str) -> ColumnType {
        let trimmed = raw.trim();

        if let Some(caps) = ARRAY_TYPE.captures(trimmed) {
            return ColumnType::Array(Box::new(ColumnType::parse(&caps["inner"])));
        }

        match trimmed.to_ascii_uppercase().as_str() {
            "STRING" => ColumnType::String,
            "BYTES" => ColumnType::Bytes,
            "INTEGER" | "INT64" => ColumnType::Integer,
            "FLOAT" | "FLOAT64" => ColumnType::Float,
            "NUMERIC" => ColumnType::Numeric,
            "BIGNUMERIC" => ColumnType::BigNumeric,
            "BOOLEAN" | "BOOL" => ColumnType::Boolean,
            "TIMESTAMP" => ColumnType::Timestamp,
            "DATE" => ColumnType::Date,
            "TIME" => ColumnType::Time,
            "DATETIME" => ColumnType::DateTime,
            "GEOGRAPHY" => ColumnType::Geography,
            "JSON" => ColumnType::Json,
            "INTERVAL" => ColumnType::Interval,
            "RECORD" | "STRUCT" => ColumnType::Record,
            _ => ColumnType::Unknown(trimmed.to_string()),
        }
    }

    /// Whether the type, or the element type of an array, was not recognized.
    pub fn is_unknown(&self) -> bool {
        match self {
            ColumnType::Unknown(_) => true,
            ColumnType::Array(inner) => inner.is_unknown(),
            _ => false,
        }
    }
}

impl Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ColumnType::String => "STRING",
            ColumnType::Bytes => "BYTES",
            ColumnType::Integer => "INTEGER",
            ColumnType::Float => "FLOAT",
            ColumnType::Numeric => "NUMERIC",
            ColumnType::BigNumeric => "BIGNUMERIC",
            ColumnType::Boolean => "BOOLEAN",
            ColumnType::Timestamp => "TIMESTAMP",
            ColumnType::Date => "DATE",
            ColumnType::Time => "TIME",
            ColumnType::DateTime => "DATETIME",
            ColumnType::Geography => "GEOGRAPHY",
            ColumnType::Json => "JSON",
            ColumnType::Interval => "INTERVAL",
            ColumnType::Record => "RECORD",
            ColumnType::Array(inner) => return write!(f, "ARRAY<{inner}>"),
            ColumnType::Unknown(raw) => raw.as_str(),
        };
        f.write_str(name)
    }
}

impl From<&str> for ColumnType {
    fn from(value: &str) -> Self {
        ColumnType::parse(value)
    }
}

impl Serialize for ColumnType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ColumnType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(ColumnType::parse(&raw))
    }
}
