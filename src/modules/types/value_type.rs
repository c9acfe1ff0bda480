//! Declared value types for value-taking arguments

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type of the value an argument takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// Free-form string
    String,
    /// Integer
    Int,
    /// Floating point number
    Float,
    /// Boolean
    Bool,
    /// Filesystem path
    Path,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::String => write!(f, "string"),
            ValueType::Int => write!(f, "int"),
            ValueType::Float => write!(f, "float"),
            ValueType::Bool => write!(f, "bool"),
            ValueType::Path => write!(f, "path"),
        }
    }
}

impl FromStr for ValueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "string" | "str" => Ok(ValueType::String),
            "int" | "integer" => Ok(ValueType::Int),
            "float" | "double" => Ok(ValueType::Float),
            "bool" | "boolean" => Ok(ValueType::Bool),
            "path" | "file" => Ok(ValueType::Path),
            _ => Err(format!("Unknown value type: {}", s)),
        }
    }
}

impl ValueType {
    /// Metavar derived from the type, if the type implies one
    pub fn metavar(&self) -> Option<&'static str> {
        match self {
            ValueType::String => None,
            ValueType::Int => Some("INT"),
            ValueType::Float => Some("FLOAT"),
            ValueType::Bool => Some("BOOL"),
            ValueType::Path => Some("PATH"),
        }
    }

    /// Values of this type are not files; they default to no completion
    pub fn is_fixed_format(&self) -> bool {
        matches!(self, ValueType::Int | ValueType::Float | ValueType::Bool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_type_from_str() {
        assert_eq!(ValueType::from_str("integer").unwrap(), ValueType::Int);
        assert_eq!(ValueType::from_str("boolean").unwrap(), ValueType::Bool);
        assert_eq!(ValueType::from_str("str").unwrap(), ValueType::String);
        assert!(ValueType::from_str("uuid").is_err());
    }

    #[test]
    fn test_value_type_metavar() {
        assert_eq!(ValueType::Int.metavar(), Some("INT"));
        assert_eq!(ValueType::Float.metavar(), Some("FLOAT"));
        assert_eq!(ValueType::String.metavar(), None);
    }

    #[test]
    fn test_value_type_fixed_format() {
        assert!(ValueType::Int.is_fixed_format());
        assert!(!ValueType::Path.is_fixed_format());
        assert!(!ValueType::String.is_fixed_format());
    }
}
