use crate::index::DocId;
use std::fmt;
use thiserror::Error as ThisError;

///
/// InternalError
///
/// Structured runtime error with a stable internal classification.
/// Callers branch on `class`; `message` is for humans.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,

    /// Optional structured error detail.
    pub detail: Option<ErrorDetail>,
}

impl InternalError {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
            detail: None,
        }
    }

    // Build from an index detail, using the detail's rendering as the message.
    fn from_index_detail(class: ErrorClass, origin: ErrorOrigin, err: IndexError) -> Self {
        Self {
            class,
            origin,
            message: err.to_string(),
            detail: Some(ErrorDetail::Index(err)),
        }
    }

    /// A null value reached the mutation path.
    pub(crate) fn null_not_indexable() -> Self {
        Self::from_index_detail(
            ErrorClass::InvalidValue,
            ErrorOrigin::Index,
            IndexError::NullNotIndexable,
        )
    }

    /// A null value reached the query path.
    pub(crate) fn null_not_queryable() -> Self {
        Self::from_index_detail(
            ErrorClass::InvalidValue,
            ErrorOrigin::Query,
            IndexError::NullNotQueryable,
        )
    }

    pub(crate) fn document_not_found(docid: DocId) -> Self {
        Self::from_index_detail(
            ErrorClass::NotFound,
            ErrorOrigin::Index,
            IndexError::DocumentNotFound { docid },
        )
    }

    pub(crate) fn unknown_range(range: impl Into<String>) -> Self {
        Self::from_index_detail(
            ErrorClass::Unsupported,
            ErrorOrigin::Query,
            IndexError::UnknownRange {
                range: range.into(),
            },
        )
    }

    pub(crate) fn unknown_operator(operator: impl Into<String>) -> Self {
        Self::from_index_detail(
            ErrorClass::Unsupported,
            ErrorOrigin::Query,
            IndexError::UnknownOperator {
                operator: operator.into(),
            },
        )
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.class, ErrorClass::NotFound)
    }

    #[must_use]
    pub const fn is_invalid_value(&self) -> bool {
        matches!(self.class, ErrorClass::InvalidValue)
    }

    #[must_use]
    pub const fn index_error(&self) -> Option<&IndexError> {
        match &self.detail {
            Some(ErrorDetail::Index(err)) => Some(err),
            None => None,
        }
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

///
/// ErrorDetail
///
/// Structured, origin-specific error detail carried by [`InternalError`].
///

#[derive(Debug, ThisError)]
pub enum ErrorDetail {
    #[error("{0}")]
    Index(IndexError),
}

///
/// IndexError
///
/// Field-index failure detail.
/// Never returned directly; always wrapped in [`ErrorDetail::Index`].
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum IndexError {
    #[error("null cannot be indexed")]
    NullNotIndexable,

    #[error("null cannot be in an index")]
    NullNotQueryable,

    #[error("document not indexed: {docid}")]
    DocumentNotFound { docid: DocId },

    #[error("unknown range kind: '{range}'")]
    UnknownRange { range: String },

    #[error("unknown query operator: '{operator}'")]
    UnknownOperator { operator: String },
}

///
/// ErrorClass
/// Internal error taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    InvalidValue,
    NotFound,
    Unsupported,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InvalidValue => "invalid_value",
            Self::NotFound => "not_found",
            Self::Unsupported => "unsupported",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Internal origin taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Index,
    Query,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Index => "index",
            Self::Query => "query",
        };
        write!(f, "{label}")
    }
}
