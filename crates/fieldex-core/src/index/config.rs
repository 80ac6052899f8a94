use serde::{Deserialize, Serialize};

///
/// IndexConfig
///
/// Construction-time configuration for a field index.
///
/// `id` is the attribute name requests use and the name reported back in
/// results. `indexed_attrs` lists the attributes read from documents; when
/// empty the index reads `id` itself.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct IndexConfig {
    pub id: String,

    #[serde(default)]
    pub indexed_attrs: Vec<String>,
}

impl IndexConfig {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            indexed_attrs: Vec::new(),
        }
    }

    /// Read documents through these attributes instead of `id`.
    #[must_use]
    pub fn with_indexed_attrs<I, S>(mut self, attrs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.indexed_attrs = attrs.into_iter().map(Into::into).collect();
        self
    }

    /// Attribute names consulted during extraction, in priority order.
    #[must_use]
    pub fn source_names(&self) -> Vec<&str> {
        if self.indexed_attrs.is_empty() {
            vec![self.id.as_str()]
        } else {
            self.indexed_attrs.iter().map(String::as_str).collect()
        }
    }
}
