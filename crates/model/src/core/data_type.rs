use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt};
use thiserror::Error;

/// Declared type of a column or of an expression node.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DataType {
    Null,
    Boolean,
    TinyInt,
    Short,
    Int,
    Long,
    LargeInt,
    Float,
    Double,
    Decimal,
    Date,
    Timestamp,
    Time,
    Char,
    VarChar,
    String,
    Hll,
    Binary,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DataTypeError {
    #[error("Unknown column type: {0}")]
    UnknownType(String),
}

lazy_static! {
    static ref TYPE_MAP: HashMap<&'static str, DataType> = build_type_map();
}

impl DataType {
    /// Character types. Fixed and variable length variants are interchangeable
    /// when comparing values against each other.
    pub fn is_string_type(&self) -> bool {
        matches!(
            self,
            DataType::Char | DataType::VarChar | DataType::String | DataType::Hll
        )
    }

    pub fn is_integer_type(&self) -> bool {
        matches!(
            self,
            DataType::TinyInt
                | DataType::Short
                | DataType::Int
                | DataType::Long
                | DataType::LargeInt
        )
    }

    /// Whether a value declared as `other` can stand next to a value of this
    /// type in a membership list without a conversion.
    pub fn is_compatible(&self, other: &DataType) -> bool {
        if self.is_string_type() {
            other.is_string_type()
        } else {
            self == other
        }
    }

    pub fn sql_name(&self) -> &'static str {
        match self {
            DataType::Null => "NULL",
            DataType::Boolean => "BOOLEAN",
            DataType::TinyInt => "TINYINT",
            DataType::Short => "SMALLINT",
            DataType::Int => "INT",
            DataType::Long => "BIGINT",
            DataType::LargeInt => "LARGEINT",
            DataType::Float => "FLOAT",
            DataType::Double => "DOUBLE",
            DataType::Decimal => "DECIMAL",
            DataType::Date => "DATE",
            DataType::Timestamp => "DATETIME",
            DataType::Time => "TIME",
            DataType::Char => "CHAR",
            DataType::VarChar => "VARCHAR",
            DataType::String => "STRING",
            DataType::Hll => "HLL",
            DataType::Binary => "BINARY",
        }
    }

    fn normalize_type_name(type_name: &str) -> String {
        let trimmed = type_name.trim();
        // VARCHAR(64), DECIMAL(10, 2)
        let base = match trimmed.find('(') {
            Some(idx) => &trimmed[..idx],
            None => trimmed,
        };
        base.trim().to_uppercase()
    }
}

impl TryFrom<&str> for DataType {
    type Error = DataTypeError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let normalized = Self::normalize_type_name(s);
        TYPE_MAP
            .get(normalized.as_str())
            .copied()
            .ok_or_else(|| DataTypeError::UnknownType(s.to_string()))
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.sql_name())
    }
}

fn build_type_map() -> HashMap<&'static str, DataType> {
    use DataType::*;

    let entries = [
        ("NULL", Null),
        ("BOOLEAN", Boolean),
        ("BOOL", Boolean),
        ("TINYINT", TinyInt),
        ("SMALLINT", Short),
        ("INT", Int),
        ("INTEGER", Int),
        ("BIGINT", Long),
        ("LARGEINT", LargeInt),
        ("FLOAT", Float),
        ("DOUBLE", Double),
        ("DOUBLE PRECISION", Double),
        ("DECIMAL", Decimal),
        ("DECIMALV2", Decimal),
        ("NUMERIC", Decimal),
        ("DATE", Date),
        ("DATETIME", Timestamp),
        ("TIMESTAMP", Timestamp),
        ("TIME", Time),
        ("CHAR", Char),
        ("CHARACTER", Char),
        ("VARCHAR", VarChar),
        ("CHARACTER VARYING", VarChar),
        ("STRING", String),
        ("TEXT", String),
        ("HLL", Hll),
        ("BINARY", Binary),
    ];

    let mut map = HashMap::new();
    for (name, data_type) in entries {
        map.insert(name, data_type);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_family_is_compatible_across_subtypes() {
        assert!(DataType::VarChar.is_compatible(&DataType::Char));
        assert!(DataType::Char.is_compatible(&DataType::String));
        assert!(DataType::String.is_compatible(&DataType::VarChar));
        assert!(!DataType::VarChar.is_compatible(&DataType::Int));
    }

    #[test]
    fn test_non_string_types_need_exact_match() {
        assert!(DataType::Int.is_compatible(&DataType::Int));
        assert!(!DataType::Int.is_compatible(&DataType::Long));
        assert!(!DataType::Date.is_compatible(&DataType::Timestamp));
        assert!(!DataType::Int.is_compatible(&DataType::VarChar));
    }

    #[test]
    fn test_parse_type_names() {
        assert_eq!(DataType::try_from("varchar(64)"), Ok(DataType::VarChar));
        assert_eq!(DataType::try_from(" bigint "), Ok(DataType::Long));
        assert_eq!(DataType::try_from("DECIMAL(10, 2)"), Ok(DataType::Decimal));
        assert_eq!(DataType::try_from("datetime"), Ok(DataType::Timestamp));
        assert_eq!(
            DataType::try_from("geometry"),
            Err(DataTypeError::UnknownType("geometry".to_string()))
        );
    }

    #[test]
    fn test_display_uses_sql_name() {
        assert_eq!(DataType::Short.to_string(), "SMALLINT");
        assert_eq!(DataType::Timestamp.to_string(), "DATETIME");
    }
}
