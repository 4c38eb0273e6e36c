use std::fmt::Display;

use crate::utils::prelude::Error;

pub const TRUE: Value = Value::Boolean { value: true };
pub const FALSE: Value = Value::Boolean { value: false };
pub const ZERO: Value = Value::Integer { value: 0 };

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Value {
    Integer {
        value: i32
    },
    Boolean {
        value: bool
    },
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer { value } => write!(f, "{value}"),
            Value::Boolean { value } => write!(f, "{value}")
        }
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer { value }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean { value }
    }
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Integer { .. } => ValueType::Integer,
            Self::Boolean { .. } => ValueType::Boolean
        }
    }

    pub fn as_integer(&self) -> Result<i32, Error> {
        match self {
            Self::Integer { value } => Ok(*value),
            other => Err(Error::OperandType {
                expected: ValueType::Integer,
                found: other.value_type()
            })
        }
    }

    pub fn as_boolean(&self) -> Result<bool, Error> {
        match self {
            Self::Boolean { value } => Ok(*value),
            other => Err(Error::OperandType {
                expected: ValueType::Boolean,
                found: other.value_type()
            })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Integer,
    Boolean
}

impl Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueType::Integer => write!(f, "Integer"),
            ValueType::Boolean => write!(f, "Boolean")
        }
    }
}
