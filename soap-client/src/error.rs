//! Error types for the SOAP client

use thiserror::Error;

/// Errors that can occur during SOAP communication
#[derive(Debug, Error)]
pub enum SoapError {
    /// Network or HTTP communication error (timeout, refused connection, TLS handshake)
    #[error("Network/HTTP error: {0}")]
    Network(String),

    /// XML parsing error
    #[error("XML parsing error: {0}")]
    Parse(String),

    /// Non-success HTTP status on a plain download
    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    /// Certificate material could not be loaded into the TLS connector
    #[error("TLS configuration error: {0}")]
    Tls(String),
}
