use std::fmt;

use serde::Deserialize;

/// A value substituted into a block. Rendered as-is, without escaping.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DataValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl DataValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            DataValue::Boolean(_) => "Boolean",
            DataValue::Integer(_) => "Integer",
            DataValue::Float(_) => "Float",
            DataValue::Text(_) => "Text",
        }
    }

    /// Parse a command-line style value: numbers and booleans are typed,
    /// everything else is text.
    pub fn infer(s: &str) -> DataValue {
        if let Ok(n) = s.parse::<i64>() {
            return DataValue::Integer(n);
        }
        if let Ok(n) = s.parse::<f64>() {
            return DataValue::Float(n);
        }
        match s {
            "true" => DataValue::Boolean(true),
            "false" => DataValue::Boolean(false),
            _ => DataValue::Text(s.to_string()),
        }
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::Boolean(b) => write!(f, "{}", b),
            DataValue::Integer(n) => write!(f, "{}", n),
            DataValue::Float(n) => {
                if n.is_finite() && *n == n.floor() && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            DataValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for DataValue {
    fn from(s: &str) -> Self {
        DataValue::Text(s.to_string())
    }
}

impl From<String> for DataValue {
    fn from(s: String) -> Self {
        DataValue::Text(s)
    }
}

impl From<i64> for DataValue {
    fn from(n: i64) -> Self {
        DataValue::Integer(n)
    }
}

impl From<f64> for DataValue {
    fn from(n: f64) -> Self {
        DataValue::Float(n)
    }
}

impl From<bool> for DataValue {
    fn from(b: bool) -> Self {
        DataValue::Boolean(b)
    }
}
