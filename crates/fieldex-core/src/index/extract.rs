use crate::value::Value;

///
/// Extracted
///
/// Outcome of reading one attribute from a cataloged object.
///
/// `Absent` means the attribute could not be resolved at all; it unindexes
/// the document. `Value(Value::Null)` means it resolved to "no value"; that
/// is rejected.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Extracted {
    Value(Value),
    Absent,
}

impl Extracted {
    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Absent => None,
        }
    }
}

impl<T: Into<Value>> From<Option<T>> for Extracted {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, |v| Self::Value(v.into()))
    }
}

impl From<Value> for Extracted {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

///
/// AttributeSource
///
/// Capability implemented by cataloged objects (or adapters over them) so
/// the index never depends on a concrete object shape.
///

pub trait AttributeSource {
    fn extract(&self, attribute: &str) -> Extracted;
}
