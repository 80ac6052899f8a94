mod compare;
mod float;
mod rank;
mod wire;


use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};

// re-exports
pub use compare::{canonical_cmp, numeric_cmp};
pub use float::Float64;
pub use rank::canonical_rank;

///
/// Value
///
/// A single indexable datum extracted from a cataloged object.
///
/// Null → the attribute resolved but carried no value; never indexable.
///
/// Values of every variant share one total order (see `canonical_cmp`), so
/// one index may hold mixed kinds without relying on incidental comparisons.
/// Equality follows that order: numerically equal numbers are equal whatever
/// their variant.
///

#[derive(Clone, Debug)]
pub enum Value {
    Blob(Vec<u8>),
    Bool(bool),
    Float64(Float64),
    Int(i64),
    Null,
    Text(String),
    Uint(u64),
}

impl Value {
    /// Build a float value; non-finite input yields `None`.
    #[must_use]
    pub fn float(v: f64) -> Option<Self> {
        Float64::try_new(v).map(Self::Float64)
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

}

// Ord is the canonical order; indexes rely on it for key placement.
impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        canonical_cmp(self, other)
    }
}

impl Eq for Value {}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        canonical_cmp(self, other) == Ordering::Equal
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        compare::canonical_hash(self, state);
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blob(bytes) => write!(f, "blob({} bytes)", bytes.len()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Float64(x) => write!(f, "{x}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Null => f.write_str("null"),
            Self::Text(s) => write!(f, "'{s}'"),
            Self::Uint(u) => write!(f, "{u}"),
        }
    }
}

#[macro_export]
macro_rules! impl_value_from {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$type> for $crate::value::Value {
                fn from(v: $type) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

impl_value_from! {
    bool    => Bool,
    Float64 => Float64,
    i8      => Int,
    i16     => Int,
    i32     => Int,
    i64     => Int,
    &str    => Text,
    String  => Text,
    u8      => Int,
    u16     => Int,
    u32     => Int,
    u64     => Uint,
    Vec<u8> => Blob,
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::Null
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
