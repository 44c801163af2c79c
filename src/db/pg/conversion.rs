//! Type conversion utilities for the PostgreSQL backend.
//!
//! Handles conversion between:
//! - `Value` → a boxed `ToSql` of the Rust type the prepared parameter expects
//! - result cells → `Value`, chosen by the column's reported type
//!
//! Date/time, UUID and JSON cells are rendered as text, NUMERIC as an
//! integer when it has no fractional digits and a float otherwise. Any
//! other type falls back to its raw wire bytes: UTF-8 text as-is, anything
//! else hex-encoded.
//!
//! PostgreSQL is strict about parameter types (an `i64` can't be bound to an
//! `int4` parameter), so values are narrowed to whatever the server inferred
//! for each placeholder after `prepare`.

use std::error::Error;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use postgres::types::{FromSql, ToSql, Type};
use postgres::Row;

use crate::db::{AccessError, Value};

type Param = Box<dyn ToSql + Sync>;

fn is_text(ty: &Type) -> bool {
    *ty == Type::TEXT
        || *ty == Type::VARCHAR
        || *ty == Type::BPCHAR
        || *ty == Type::NAME
        || *ty == Type::UNKNOWN
}

fn out_of_range(value: &Value, ty: &Type) -> AccessError {
    AccessError::Conversion {
        column: format!("parameter of type {}", ty.name()),
        message: format!("{} is out of range", value),
    }
}

/// A typed NULL the driver will accept for a parameter of type `ty`.
fn typed_null(ty: &Type) -> Param {
    if *ty == Type::BOOL {
        Box::new(None::<bool>)
    } else if *ty == Type::INT2 {
        Box::new(None::<i16>)
    } else if *ty == Type::INT4 {
        Box::new(None::<i32>)
    } else if *ty == Type::INT8 {
        Box::new(None::<i64>)
    } else if *ty == Type::FLOAT4 {
        Box::new(None::<f32>)
    } else if *ty == Type::FLOAT8 {
        Box::new(None::<f64>)
    } else {
        Box::new(None::<String>)
    }
}

/// Convert one bound value to the Rust type matching parameter type `ty`.
///
/// Pairings not listed here are passed through in their natural Rust type;
/// if the server rejects them that surfaces as a query failure.
pub fn to_param(value: &Value, ty: &Type) -> Result<Param, AccessError> {
    let param: Param = match value {
        Value::Null => typed_null(ty),
        Value::Bool(b) if is_text(ty) => Box::new(b.to_string()),
        Value::Bool(b) => Box::new(*b),
        Value::Int(i) if *ty == Type::INT2 => {
            Box::new(i16::try_from(*i).map_err(|_| out_of_range(value, ty))?)
        }
        Value::Int(i) if *ty == Type::INT4 => {
            Box::new(i32::try_from(*i).map_err(|_| out_of_range(value, ty))?)
        }
        Value::Int(i) if *ty == Type::OID => {
            Box::new(u32::try_from(*i).map_err(|_| out_of_range(value, ty))?)
        }
        Value::Int(i) if *ty == Type::FLOAT4 => Box::new(*i as f32),
        Value::Int(i) if *ty == Type::FLOAT8 => Box::new(*i as f64),
        Value::Int(i) if is_text(ty) => Box::new(i.to_string()),
        Value::Int(i) => Box::new(*i),
        Value::Real(f) if *ty == Type::FLOAT4 => Box::new(*f as f32),
        Value::Real(f) if is_text(ty) => Box::new(f.to_string()),
        Value::Real(f) => Box::new(*f),
        Value::Text(s) => Box::new(s.clone()),
    };
    Ok(param)
}

/// Convert every value against the parameter types of a prepared statement.
pub fn to_params(values: &[Value], types: &[Type]) -> Result<Vec<Param>, AccessError> {
    if values.len() != types.len() {
        return Err(AccessError::QueryFailed {
            message: format!(
                "statement expects {} parameter(s) but {} were bound",
                types.len(),
                values.len()
            ),
        });
    }
    values
        .iter()
        .zip(types)
        .map(|(value, ty)| to_param(value, ty))
        .collect()
}

fn cell<'a, T>(row: &'a Row, idx: usize, column: &str) -> Result<Option<T>, AccessError>
where
    T: FromSql<'a>,
{
    row.try_get::<_, Option<T>>(idx)
        .map_err(|e| AccessError::Conversion {
            column: column.to_string(),
            message: e.to_string(),
        })
}

type FromSqlError = Box<dyn Error + Sync + Send>;

/// A NUMERIC cell in its decimal text form.
struct Numeric(String);

impl<'a> FromSql<'a> for Numeric {
    fn from_sql(_: &Type, raw: &'a [u8]) -> Result<Self, FromSqlError> {
        decode_numeric(raw).map(Numeric)
    }

    fn accepts(ty: &Type) -> bool {
        *ty == Type::NUMERIC
    }
}

const NUMERIC_NEG: u16 = 0x4000;
const NUMERIC_NAN: u16 = 0xC000;
const NUMERIC_PINF: u16 = 0xD000;
const NUMERIC_NINF: u16 = 0xF000;

/// Decode the binary NUMERIC format: digit count, weight, sign and display
/// scale, followed by base-10000 digits.
fn decode_numeric(raw: &[u8]) -> Result<String, FromSqlError> {
    let word = |i: usize| -> Result<u16, FromSqlError> {
        raw.get(i * 2..i * 2 + 2)
            .map(|b| u16::from_be_bytes([b[0], b[1]]))
            .ok_or_else(|| "truncated numeric value".into())
    };
    let ndigits = usize::from(word(0)?);
    let weight = i32::from(word(1)? as i16);
    let sign = word(2)?;
    let dscale = usize::from(word(3)?);
    match sign {
        NUMERIC_NAN => return Ok("NaN".to_string()),
        NUMERIC_PINF => return Ok("Infinity".to_string()),
        NUMERIC_NINF => return Ok("-Infinity".to_string()),
        _ => {}
    }
    let digits = (0..ndigits)
        .map(|i| word(4 + i))
        .collect::<Result<Vec<_>, _>>()?;
    let digit = |i: i32| -> u16 {
        usize::try_from(i)
            .ok()
            .and_then(|i| digits.get(i).copied())
            .unwrap_or(0)
    };

    let mut out = String::new();
    if sign == NUMERIC_NEG {
        out.push('-');
    }
    if weight < 0 {
        out.push('0');
    } else {
        out.push_str(&digit(0).to_string());
        for i in 1..=weight {
            out.push_str(&format!("{:04}", digit(i)));
        }
    }
    if dscale > 0 {
        let mut fraction = String::new();
        let mut i = weight + 1;
        while fraction.len() < dscale {
            fraction.push_str(&format!("{:04}", digit(i)));
            i += 1;
        }
        fraction.truncate(dscale);
        out.push('.');
        out.push_str(&fraction);
    }
    Ok(out)
}

/// NUMERIC text as the narrowest value that holds it.
fn numeric_value(text: String) -> Value {
    if !text.contains('.') {
        if let Ok(i) = text.parse::<i64>() {
            return Value::Int(i);
        }
    }
    match text.parse::<f64>() {
        Ok(f) if f.is_finite() => Value::Real(f),
        _ => Value::Text(text),
    }
}

/// Any cell, as the bytes the server sent.
struct Raw(Vec<u8>);

impl<'a> FromSql<'a> for Raw {
    fn from_sql(_: &Type, raw: &'a [u8]) -> Result<Self, FromSqlError> {
        Ok(Raw(raw.to_vec()))
    }

    fn accepts(_: &Type) -> bool {
        true
    }
}

fn raw_value(bytes: Vec<u8>) -> Value {
    match String::from_utf8(bytes) {
        Ok(text) => Value::Text(text),
        Err(e) => Value::Text(hex::encode(e.into_bytes())),
    }
}

fn text<T: ToString>(cell: Option<T>) -> Value {
    cell.map(|v| v.to_string()).into()
}

/// Convert one result row to values, in column order.
pub fn row_values(row: &Row) -> Result<Vec<Value>, AccessError> {
    row.columns()
        .iter()
        .enumerate()
        .map(|(idx, col)| {
            let ty = col.type_();
            let name = col.name();
            let value: Value = if *ty == Type::BOOL {
                cell::<bool>(row, idx, name)?.into()
            } else if *ty == Type::INT2 {
                cell::<i16>(row, idx, name)?.map(i64::from).into()
            } else if *ty == Type::INT4 {
                cell::<i32>(row, idx, name)?.into()
            } else if *ty == Type::INT8 {
                cell::<i64>(row, idx, name)?.into()
            } else if *ty == Type::OID {
                cell::<u32>(row, idx, name)?.into()
            } else if *ty == Type::FLOAT4 {
                cell::<f32>(row, idx, name)?.map(f64::from).into()
            } else if *ty == Type::FLOAT8 {
                cell::<f64>(row, idx, name)?.into()
            } else if *ty == Type::NUMERIC {
                cell::<Numeric>(row, idx, name)?
                    .map_or(Value::Null, |n| numeric_value(n.0))
            } else if *ty == Type::DATE {
                text(cell::<NaiveDate>(row, idx, name)?)
            } else if *ty == Type::TIME {
                text(cell::<NaiveTime>(row, idx, name)?)
            } else if *ty == Type::TIMESTAMP {
                text(cell::<NaiveDateTime>(row, idx, name)?)
            } else if *ty == Type::TIMESTAMPTZ {
                cell::<DateTime<Utc>>(row, idx, name)?
                    .map(|t| t.to_rfc3339())
                    .into()
            } else if *ty == Type::UUID {
                text(cell::<uuid::Uuid>(row, idx, name)?)
            } else if *ty == Type::JSON || *ty == Type::JSONB {
                text(cell::<serde_json::Value>(row, idx, name)?)
            } else if *ty == Type::BYTEA {
                cell::<Vec<u8>>(row, idx, name)?.map(hex::encode).into()
            } else if <String as FromSql>::accepts(ty) {
                cell::<String>(row, idx, name)?.into()
            } else {
                cell::<Raw>(row, idx, name)?.map_or(Value::Null, |r| raw_value(r.0))
            };
            Ok(value)
        })
        .collect()
}
