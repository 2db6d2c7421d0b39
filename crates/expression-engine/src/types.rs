use crate::error::{ExpressionError, Result};
use bigdecimal::{BigDecimal, FromPrimitive, ToPrimitive};
use chrono::{NaiveDate, NaiveDateTime};
use model::core::{
    data_type::DataType,
    value::{Value, float_to_i64},
};
use std::str::FromStr;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Convert a Value to its unquoted textual form
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Decimal(d) => d.to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Date(d) => d.format(DATE_FORMAT).to_string(),
        Value::Timestamp(t) => t.format(DATETIME_FORMAT).to_string(),
        Value::Null => String::new(),
    }
}

/// Convert a constant to the target column type, the way a CAST node does.
/// NULL casts to NULL of any type.
pub fn cast_value(value: Value, target: DataType) -> Result<Value> {
    if value.is_null() {
        return Ok(Value::Null);
    }

    let invalid = |value: &Value| ExpressionError::InvalidCast {
        value: value.to_string(),
        target,
    };

    match target {
        DataType::Null => Ok(Value::Null),

        DataType::Boolean => value.as_bool().map(Value::Boolean).ok_or_else(|| invalid(&value)),

        DataType::TinyInt
        | DataType::Short
        | DataType::Int
        | DataType::Long
        | DataType::LargeInt => {
            let int = match &value {
                Value::String(s) => s.trim().parse::<i64>().ok(),
                Value::Float(f) => float_to_i64(*f),
                Value::Decimal(d) => d.to_i64(),
                other => other.as_i64(),
            };

            int.filter(|i| fits_width(*i, target))
                .map(Value::Int)
                .ok_or_else(|| invalid(&value))
        }

        DataType::Float | DataType::Double => match &value {
            Value::String(s) => s.trim().parse::<f64>().map(Value::Float).map_err(|_| invalid(&value)),
            other => other.as_f64().map(Value::Float).ok_or_else(|| invalid(&value)),
        },

        DataType::Decimal => match value {
            Value::Decimal(d) => Ok(Value::Decimal(d)),
            Value::Int(i) => Ok(Value::Decimal(BigDecimal::from(i))),
            Value::Float(f) => BigDecimal::from_f64(f)
                .map(Value::Decimal)
                .ok_or_else(|| invalid(&Value::Float(f))),
            Value::String(ref s) => BigDecimal::from_str(s.trim())
                .map(Value::Decimal)
                .map_err(|_| invalid(&value)),
            other => Err(invalid(&other)),
        },

        DataType::Char | DataType::VarChar | DataType::String | DataType::Hll => {
            Ok(Value::String(value_to_string(&value)))
        }

        DataType::Date => match value {
            Value::Date(d) => Ok(Value::Date(d)),
            Value::Timestamp(t) => Ok(Value::Date(t.date())),
            Value::String(ref s) => parse_date(s).map(Value::Date).ok_or_else(|| invalid(&value)),
            other => Err(invalid(&other)),
        },

        DataType::Timestamp => match value {
            Value::Timestamp(t) => Ok(Value::Timestamp(t)),
            Value::Date(d) => d
                .and_hms_opt(0, 0, 0)
                .map(Value::Timestamp)
                .ok_or_else(|| invalid(&Value::Date(d))),
            Value::String(ref s) => parse_datetime(s)
                .map(Value::Timestamp)
                .ok_or_else(|| invalid(&value)),
            other => Err(invalid(&other)),
        },

        DataType::Time | DataType::Binary => match value {
            Value::String(s) => Ok(Value::String(s)),
            other => Err(invalid(&other)),
        },
    }
}

fn fits_width(i: i64, target: DataType) -> bool {
    match target {
        DataType::TinyInt => i8::try_from(i).is_ok(),
        DataType::Short => i16::try_from(i).is_ok(),
        DataType::Int => i32::try_from(i).is_ok(),
        _ => true,
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .or_else(|| parse_datetime(s).map(|t| t.date()))
}

fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, DATETIME_FORMAT)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, DATE_FORMAT)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
