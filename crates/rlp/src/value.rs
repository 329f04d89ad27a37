//! Owned object tree for nested strings and lists.

/// An owned RLP value.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Value {
    /// A byte string.
    String(Vec<u8>),

    /// A list of values.
    List(Vec<Value>),
}

impl Value {
    /// Gets the bytes, if this is a string.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::String(data) => Some(data),
            Self::List(_) => None,
        }
    }

    /// Gets the children, if this is a list.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::String(_) => None,
            Self::List(items) => Some(items),
        }
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Self::String(value)
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Self::String(value.to_vec())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.as_bytes().to_vec())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::List(value)
    }
}
