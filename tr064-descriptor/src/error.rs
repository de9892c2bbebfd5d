//! Error types for descriptor parsing.

use std::fmt;

/// Error type for descriptor parsing.
///
/// Any of these aborts the parse that raised it; no partial catalog or
/// registry is ever returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptorError {
    /// The document is not well-formed XML or has an unexpected shape
    ParseError(String),
    /// A required child element is absent
    MissingField {
        /// Element that should have carried the field (e.g. "service")
        element: &'static str,
        /// Tag name of the missing child (e.g. "SCPDURL")
        field: &'static str,
    },
    /// A service type without a `<Type>:<version>` tail
    InvalidServiceType(String),
}

impl fmt::Display for DescriptorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DescriptorError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            DescriptorError::MissingField { element, field } => {
                write!(f, "Missing <{}> in <{}> element", field, element)
            }
            DescriptorError::InvalidServiceType(service_type) => {
                write!(f, "Invalid service type: '{}'", service_type)
            }
        }
    }
}

impl std::error::Error for DescriptorError {}

/// Convenience Result type alias for descriptor parsing.
///
/// Equivalent to `std::result::Result<T, DescriptorError>`.
pub type Result<T> = std::result::Result<T, DescriptorError>;
