//! Core value types for dx
//!
//! The backend speaks loosely typed JSON primitives. Everything above the
//! wire works with `Datum` and `DefaultValue`, whose tag always agrees with
//! the `FieldType` of the column they are bound to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{DxError, Result};

/// Column field type as offered by the schema editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    #[serde(rename = "int64")]
    Int64,
    #[serde(rename = "float64")]
    Float64,
    #[serde(rename = "bool")]
    Bool,
    #[serde(rename = "datetime")]
    Datetime,
    #[serde(rename = "varchar(255)")]
    Varchar255,
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "int64 Auto Increment")]
    Int64AutoIncrement,
    /// Draft-only placeholder, never allowed in a finalized request
    #[serde(rename = "Not Defined")]
    NotDefined,
}

impl FieldType {
    /// Every field type, in the order the type picker lists them
    pub const ALL: [FieldType; 8] = [
        FieldType::Int64,
        FieldType::Float64,
        FieldType::Bool,
        FieldType::Datetime,
        FieldType::Varchar255,
        FieldType::Text,
        FieldType::Int64AutoIncrement,
        FieldType::NotDefined,
    ];

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            FieldType::Int64 => "int64",
            FieldType::Float64 => "float64",
            FieldType::Bool => "bool",
            FieldType::Datetime => "datetime",
            FieldType::Varchar255 => "varchar(255)",
            FieldType::Text => "text",
            FieldType::Int64AutoIncrement => "int64 Auto Increment",
            FieldType::NotDefined => "Not Defined",
        }
    }

    /// Tag used by the data-plane DDL API
    pub fn wire_name(&self) -> Result<&'static str> {
        match self {
            FieldType::Int64AutoIncrement => Ok("int64Identity"),
            FieldType::NotDefined => Err(DxError::FieldTypeNotDefined),
            other => Ok(other.label()),
        }
    }

    pub fn is_defined(&self) -> bool {
        !matches!(self, FieldType::NotDefined)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FieldType {
    type Err = DxError;

    fn from_str(s: &str) -> Result<Self> {
        FieldType::ALL
            .into_iter()
            .find(|t| t.label() == s)
            .ok_or_else(|| DxError::UnsupportedType(s.to_string()))
    }
}

/// A loosely typed backend value: `number | string | boolean | null`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Primitive {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl Primitive {
    pub fn is_null(&self) -> bool {
        matches!(self, Primitive::Null)
    }

    fn kind(&self) -> &'static str {
        match self {
            Primitive::Null => "null",
            Primitive::Bool(_) => "boolean",
            Primitive::Int(_) | Primitive::Float(_) => "number",
            Primitive::String(_) => "string",
        }
    }

    fn as_i64(&self) -> Option<i64> {
        match self {
            Primitive::Int(v) => Some(*v),
            // `as` would saturate anything outside the i64 range
            Primitive::Float(v)
                if v.fract() == 0.0 && (i64::MIN as f64..i64::MAX as f64).contains(v) =>
            {
                Some(*v as i64)
            }
            Primitive::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Primitive::Int(v) => Some(*v as f64),
            Primitive::Float(v) => Some(*v),
            Primitive::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    // MySQL stores bool as tinyint, so 0/1 arrive as numbers or strings
    fn as_bool(&self) -> Option<bool> {
        match self {
            Primitive::Bool(v) => Some(*v),
            Primitive::Int(0) => Some(false),
            Primitive::Int(1) => Some(true),
            Primitive::String(s) => parse_bool(s),
            _ => None,
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::Null => write!(f, "null"),
            Primitive::Bool(v) => write!(f, "{}", v),
            Primitive::Int(v) => write!(f, "{}", v),
            Primitive::Float(v) => write!(f, "{}", v),
            Primitive::String(v) => write!(f, "{}", v),
        }
    }
}

/// A nullable value with a known type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "typ", content = "value")]
pub enum Datum {
    #[serde(rename = "NULL")]
    Null,
    #[serde(rename = "int64")]
    Int64(i64),
    #[serde(rename = "float64")]
    Float64(f64),
    #[serde(rename = "bool")]
    Bool(bool),
    /// ISO-ish date-time string, passed through untouched
    #[serde(rename = "datetime")]
    Datetime(String),
    #[serde(rename = "varchar(255)")]
    Varchar(String),
    #[serde(rename = "text")]
    Text(String),
    #[serde(rename = "int64AutoIncrement")]
    Int64AutoIncrement(i64),
}

impl Datum {
    pub fn is_null(&self) -> bool {
        matches!(self, Datum::Null)
    }

    /// The field type this datum was built for; `None` for NULL
    pub fn field_type(&self) -> Option<FieldType> {
        match self {
            Datum::Null => None,
            Datum::Int64(_) => Some(FieldType::Int64),
            Datum::Float64(_) => Some(FieldType::Float64),
            Datum::Bool(_) => Some(FieldType::Bool),
            Datum::Datetime(_) => Some(FieldType::Datetime),
            Datum::Varchar(_) => Some(FieldType::Varchar255),
            Datum::Text(_) => Some(FieldType::Text),
            Datum::Int64AutoIncrement(_) => Some(FieldType::Int64AutoIncrement),
        }
    }

    /// Whether this datum may be stored in a column of `field_type`.
    ///
    /// NULL matches every type; nullability is the column's concern.
    pub fn matches(&self, field_type: FieldType) -> bool {
        match (self, field_type) {
            (Datum::Null, _) => true,
            (Datum::Int64(_) | Datum::Int64AutoIncrement(_), FieldType::Int64)
            | (Datum::Int64(_) | Datum::Int64AutoIncrement(_), FieldType::Int64AutoIncrement) => {
                true
            }
            (Datum::Float64(_), FieldType::Float64)
            | (Datum::Bool(_), FieldType::Bool)
            | (Datum::Datetime(_), FieldType::Datetime)
            | (Datum::Varchar(_), FieldType::Varchar255)
            | (Datum::Text(_), FieldType::Text) => true,
            _ => false,
        }
    }

    /// Integer payload, for id lookups
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Datum::Int64(v) | Datum::Int64AutoIncrement(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Datum::Datetime(v) | Datum::Varchar(v) | Datum::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datum::Null => write!(f, "NULL"),
            Datum::Int64(v) | Datum::Int64AutoIncrement(v) => write!(f, "{}", v),
            Datum::Float64(v) => write!(f, "{}", v),
            Datum::Bool(v) => write!(f, "{}", v),
            Datum::Datetime(v) | Datum::Varchar(v) | Datum::Text(v) => write!(f, "{}", v),
        }
    }
}

/// A column's configured default
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "typ", content = "value")]
pub enum DefaultValue {
    #[serde(rename = "int64")]
    Int64(i64),
    #[serde(rename = "float64")]
    Float64(f64),
    #[serde(rename = "bool")]
    Bool(bool),
    #[serde(rename = "datetime")]
    Datetime(String),
    #[serde(rename = "varchar(255)")]
    Varchar(String),
    #[serde(rename = "text")]
    Text(String),
    #[serde(rename = "NULL")]
    Null,
    /// Evaluated by the backend, e.g. `CURRENT_TIMESTAMP(3)`
    #[serde(rename = "expr")]
    Expr(String),
    /// No default configured
    #[serde(rename = "Not Defined")]
    NotDefined,
}

impl DefaultValue {
    pub fn is_defined(&self) -> bool {
        !matches!(self, DefaultValue::NotDefined)
    }

    /// True for the typed literal variants (not NULL, expr or undefined)
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            DefaultValue::Int64(_)
                | DefaultValue::Float64(_)
                | DefaultValue::Bool(_)
                | DefaultValue::Datetime(_)
                | DefaultValue::Varchar(_)
                | DefaultValue::Text(_)
        )
    }

    /// Tag used by the data-plane DDL API
    pub fn wire_tag(&self) -> &'static str {
        match self {
            DefaultValue::Int64(_) => "int64",
            DefaultValue::Float64(_) => "float64",
            DefaultValue::Bool(_) => "bool",
            DefaultValue::Datetime(_) => "datetime",
            DefaultValue::Varchar(_) => "varchar(255)",
            DefaultValue::Text(_) => "text",
            DefaultValue::Null => "NULL",
            DefaultValue::Expr(_) => "expr",
            DefaultValue::NotDefined => "NotDefined",
        }
    }

    /// Stringified payload for the DDL API; empty for NULL and NotDefined
    pub fn wire_value(&self) -> String {
        match self {
            DefaultValue::Null | DefaultValue::NotDefined => String::new(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Int64(v) => write!(f, "{}", v),
            DefaultValue::Float64(v) => write!(f, "{}", v),
            DefaultValue::Bool(v) => write!(f, "{}", v),
            DefaultValue::Datetime(v)
            | DefaultValue::Varchar(v)
            | DefaultValue::Text(v)
            | DefaultValue::Expr(v) => write!(f, "{}", v),
            DefaultValue::Null => write!(f, "NULL"),
            DefaultValue::NotDefined => write!(f, "Not Defined"),
        }
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

fn is_timestamp_expr(s: &str) -> bool {
    let upper = s.to_ascii_uppercase();
    upper.contains("CURRENT_TIMESTAMP") || upper.contains("NOW")
}

fn mismatch(expected: FieldType, v: &Primitive) -> DxError {
    DxError::TypeMismatch {
        expected,
        actual: v.kind().to_string(),
    }
}

/// Convert a backend primitive into a datum of the column's type.
///
/// Auto-increment is a creation-time property, so an `int64 Auto Increment`
/// column yields a plain `Int64` datum.
pub fn primitive_to_datum(v: &Primitive, field_type: FieldType) -> Result<Datum> {
    if field_type == FieldType::NotDefined {
        return Err(DxError::FieldTypeNotDefined);
    }
    if v.is_null() {
        return Ok(Datum::Null);
    }

    let datum = match field_type {
        FieldType::NotDefined => return Err(DxError::FieldTypeNotDefined),
        FieldType::Int64 | FieldType::Int64AutoIncrement => {
            Datum::Int64(v.as_i64().ok_or_else(|| mismatch(field_type, v))?)
        }
        FieldType::Float64 => Datum::Float64(v.as_f64().ok_or_else(|| mismatch(field_type, v))?),
        FieldType::Bool => Datum::Bool(v.as_bool().ok_or_else(|| mismatch(field_type, v))?),
        FieldType::Datetime | FieldType::Varchar255 | FieldType::Text => {
            let Primitive::String(s) = v else {
                return Err(mismatch(field_type, v));
            };
            match field_type {
                FieldType::Datetime => Datum::Datetime(s.clone()),
                FieldType::Varchar255 => Datum::Varchar(s.clone()),
                _ => Datum::Text(s.clone()),
            }
        }
    };
    Ok(datum)
}

/// Convert a datum back into a backend primitive
pub fn datum_to_primitive(datum: &Datum) -> Primitive {
    match datum {
        Datum::Null => Primitive::Null,
        Datum::Int64(v) | Datum::Int64AutoIncrement(v) => Primitive::Int(*v),
        Datum::Float64(v) => Primitive::Float(*v),
        Datum::Bool(v) => Primitive::Bool(*v),
        Datum::Datetime(v) | Datum::Varchar(v) | Datum::Text(v) => Primitive::String(v.clone()),
    }
}

/// Classify a default reported by the backend.
///
/// - `datetime` defaults mentioning `CURRENT_TIMESTAMP` or `NOW` are
///   expressions, anything else is a literal.
/// - `text` defaults are always expressions; the backend only accepts
///   expression defaults on text columns.
/// - Auto-increment columns never carry a default.
pub fn primitive_to_default_value(v: &Primitive, field_type: FieldType) -> Result<DefaultValue> {
    let invalid = || DxError::InvalidValue {
        field_type,
        value: v.to_string(),
    };

    match field_type {
        FieldType::NotDefined => return Err(DxError::FieldTypeNotDefined),
        FieldType::Int64AutoIncrement => return Ok(DefaultValue::NotDefined),
        _ if v.is_null() => return Ok(DefaultValue::Null),
        _ => {}
    }

    let value = match field_type {
        FieldType::Int64 => DefaultValue::Int64(v.as_i64().ok_or_else(invalid)?),
        FieldType::Float64 => DefaultValue::Float64(v.as_f64().ok_or_else(invalid)?),
        FieldType::Bool => DefaultValue::Bool(v.as_bool().ok_or_else(invalid)?),
        FieldType::Datetime => {
            let Primitive::String(s) = v else {
                return Err(mismatch(field_type, v));
            };
            if is_timestamp_expr(s) {
                DefaultValue::Expr(s.clone())
            } else {
                DefaultValue::Datetime(s.clone())
            }
        }
        FieldType::Varchar255 => DefaultValue::Varchar(v.to_string()),
        FieldType::Text => DefaultValue::Expr(v.to_string()),
        FieldType::Int64AutoIncrement => DefaultValue::NotDefined,
        FieldType::NotDefined => return Err(DxError::FieldTypeNotDefined),
    };
    Ok(value)
}

/// Parse a default typed by the user into the editor.
///
/// Blank input means the default was cleared. `datetime` and `text` input
/// is classified the same way `primitive_to_default_value` classifies
/// backend defaults.
pub fn string_to_default_value(field_type: FieldType, raw: &str) -> Result<DefaultValue> {
    if field_type == FieldType::NotDefined {
        return Err(DxError::FieldTypeNotDefined);
    }
    if raw.trim().is_empty() {
        return Ok(DefaultValue::NotDefined);
    }

    let invalid = || DxError::InvalidValue {
        field_type,
        value: raw.to_string(),
    };

    let value = match field_type {
        FieldType::NotDefined => return Err(DxError::FieldTypeNotDefined),
        FieldType::Int64 | FieldType::Int64AutoIncrement => {
            DefaultValue::Int64(raw.trim().parse().map_err(|_| invalid())?)
        }
        FieldType::Float64 => DefaultValue::Float64(raw.trim().parse().map_err(|_| invalid())?),
        FieldType::Bool => DefaultValue::Bool(parse_bool(raw).ok_or_else(invalid)?),
        FieldType::Datetime if is_timestamp_expr(raw) => DefaultValue::Expr(raw.trim().to_string()),
        FieldType::Datetime => DefaultValue::Datetime(raw.trim().to_string()),
        FieldType::Varchar255 => DefaultValue::Varchar(raw.to_string()),
        FieldType::Text => DefaultValue::Expr(raw.to_string()),
    };
    Ok(value)
}
