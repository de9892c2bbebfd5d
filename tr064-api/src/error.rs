use soap_client::SoapError;
use thiserror::Error;
use tr064_descriptor::DescriptorError;

/// High-level API errors for TR-064 operations
///
/// Every failure reaches the caller with enough structure to act on: a fault
/// carries the device's numeric code, an unknown name carries the name.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Root descriptor or SCPD document could not be parsed
    #[error("Descriptor error: {0}")]
    Descriptor(#[from] DescriptorError),

    /// No service with this friendly name in the catalog
    #[error("Unknown service '{0}'")]
    UnknownService(String),

    /// No action with this friendly name in the service's registry
    #[error("Unknown action '{action}' on service '{service}'")]
    UnknownAction { service: String, action: String },

    /// UPnP fault returned by the device (HTTP status >= 500)
    ///
    /// Callers may branch on `code`, e.g. 401 "Invalid Args" or
    /// 714 "NoSuchEntryInArray".
    #[error("UPnPError({code}): {description}")]
    Fault { code: u16, description: String },

    /// Non-fault HTTP error status, e.g. 401 after failed authentication
    #[error("HTTP status {0}")]
    HttpStatus(u16),

    /// Network communication error
    ///
    /// Connection refused, timeout, TLS handshake failure.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Response parsing error
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The action returned a result that does not fit the requested type
    #[error("Unexpected result: {0}")]
    UnexpectedResult(String),
}

impl ApiError {
    pub fn is_fault(&self) -> bool {
        matches!(self, ApiError::Fault { .. })
    }

    /// UPnP error code of a fault
    pub fn fault_code(&self) -> Option<u16> {
        match self {
            ApiError::Fault { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Whether the error happened below the SOAP layer
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::NetworkError(_) | ApiError::HttpStatus(_))
    }
}

/// Type alias for results that can return an ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

/// Convert from SoapError to ApiError
impl From<SoapError> for ApiError {
    fn from(error: SoapError) -> Self {
        match error {
            SoapError::Network(msg) => ApiError::NetworkError(msg),
            SoapError::Parse(msg) => ApiError::ParseError(msg),
            SoapError::Status(code) => ApiError::HttpStatus(code),
            SoapError::Tls(msg) => ApiError::ConfigError(msg),
        }
    }
}
