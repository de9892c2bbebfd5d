//! Private SOAP client for TR-064 device communication
//!
//! This crate provides a minimal SOAP client for home gateways speaking
//! TR-064. It builds request envelopes, posts them with digest
//! authentication over one shared HTTP agent, and decodes the responses.
//! Deciding whether a response is a fault is left to the caller, which gets
//! the raw status code back from [`SoapClient::call`].

mod auth;
mod error;
pub mod envelope;

pub use auth::Credentials;
pub use envelope::{ActionResult, Arguments, Fault, Value};
pub use error::SoapError;

use std::sync::Arc;
use std::time::Duration;

use auth::{is_digest_challenge, DigestState, Method};

/// Request timeout applied to every exchange
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(31);

const CONTENT_TYPE: &str = "text/xml; charset=\"utf-8\"";

/// Raw outcome of one HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapResponse {
    pub status: u16,
    pub body: String,
}

impl SoapResponse {
    fn read(response: ureq::Response) -> Result<Self, SoapError> {
        let status = response.status();
        let body = response
            .into_string()
            .map_err(|e| SoapError::Network(e.to_string()))?;
        Ok(Self { status, body })
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Configures and builds a [`SoapClient`]
#[derive(Debug, Clone)]
pub struct SoapClientBuilder {
    timeout: Duration,
    credentials: Option<Credentials>,
    certificate_pem: Option<Vec<u8>>,
}

impl SoapClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::new(username, password));
        self
    }

    /// Trust an additional root certificate, e.g. the device's self-signed one
    pub fn certificate_pem(mut self, pem: impl Into<Vec<u8>>) -> Self {
        self.certificate_pem = Some(pem.into());
        self
    }

    pub fn build(self) -> Result<SoapClient, SoapError> {
        let mut builder = ureq::AgentBuilder::new().timeout(self.timeout);

        if let Some(pem) = &self.certificate_pem {
            let certificate = native_tls::Certificate::from_pem(pem)
                .map_err(|e| SoapError::Tls(e.to_string()))?;
            let connector = native_tls::TlsConnector::builder()
                .add_root_certificate(certificate)
                .build()
                .map_err(|e| SoapError::Tls(e.to_string()))?;
            builder = builder.tls_connector(Arc::new(connector));
        }

        Ok(SoapClient {
            agent: builder.build(),
            credentials: self.credentials,
            digest: Arc::new(DigestState::default()),
        })
    }
}

impl Default for SoapClientBuilder {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            credentials: None,
            certificate_pem: None,
        }
    }
}

/// A minimal SOAP client for TR-064 device communication
///
/// Cloning is cheap: clones share the connection pool and the cached digest
/// challenge.
#[derive(Debug, Clone)]
pub struct SoapClient {
    agent: ureq::Agent,
    credentials: Option<Credentials>,
    digest: Arc<DigestState>,
}

impl SoapClient {
    /// Create a client without credentials and the default timeout
    pub fn new() -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(DEFAULT_TIMEOUT).build(),
            credentials: None,
            digest: Arc::new(DigestState::default()),
        }
    }

    pub fn builder() -> SoapClientBuilder {
        SoapClientBuilder::default()
    }

    /// Post one SOAP action and return the raw status and body
    ///
    /// # Arguments
    /// * `control_url` - Absolute URL of the service's control endpoint
    /// * `service_type` - Service type URN the action belongs to
    /// * `action` - Wire name of the action
    /// * `arguments` - Input arguments in the order they should be sent
    ///
    /// Any HTTP status is returned as a [`SoapResponse`]; only transport
    /// failures are errors.
    pub fn call(
        &self,
        control_url: &str,
        service_type: &str,
        action: &str,
        arguments: &Arguments,
    ) -> Result<SoapResponse, SoapError> {
        let body = envelope::encode(action, service_type, arguments);
        let soap_action = format!("{}#{}", service_type, action);

        tracing::debug!(url = control_url, action = %soap_action, "Sending SOAP request");

        let response = self.send(
            Method::Post,
            control_url,
            &[("Content-Type", CONTENT_TYPE), ("SOAPACTION", soap_action.as_str())],
            Some(body.as_slice()),
        )?;

        tracing::debug!(status = response.status, action = %soap_action, "Received SOAP response");
        Ok(response)
    }

    /// Download a document, failing on any non-2xx status
    pub fn get(&self, url: &str) -> Result<String, SoapError> {
        tracing::debug!(url, "Fetching document");

        let response = self.send(Method::Get, url, &[], None)?;
        if !response.is_success() {
            return Err(SoapError::Status(response.status));
        }
        Ok(response.body)
    }

    fn send(
        &self,
        method: Method,
        url: &str,
        headers: &[(&str, &str)],
        body: Option<&[u8]>,
    ) -> Result<SoapResponse, SoapError> {
        let uri = request_uri(url)?;
        let mut challenged = false;

        loop {
            let mut request = self.agent.request(method.as_str(), url);
            for (name, value) in headers {
                request = request.set(name, value);
            }
            if let Some(credentials) = &self.credentials {
                if let Some(authorization) =
                    self.digest.authorization(credentials, method, &uri, body)
                {
                    request = request.set("Authorization", &authorization);
                }
            }

            let result = match body {
                Some(bytes) => request.send_bytes(bytes),
                None => request.call(),
            };

            match result {
                Ok(response) => return SoapResponse::read(response),
                Err(ureq::Error::Status(401, response))
                    if !challenged && self.credentials.is_some() =>
                {
                    let challenge = response
                        .header("WWW-Authenticate")
                        .filter(|value| is_digest_challenge(value))
                        .map(str::to_string);
                    match challenge {
                        Some(challenge) => {
                            tracing::debug!(url, "Answering digest challenge");
                            self.digest.update(&challenge)?;
                            challenged = true;
                        }
                        None => return SoapResponse::read(response),
                    }
                }
                Err(ureq::Error::Status(_, response)) => return SoapResponse::read(response),
                Err(ureq::Error::Transport(transport)) => {
                    return Err(SoapError::Network(transport.to_string()))
                }
            }
        }
    }
}

impl Default for SoapClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Path and query of a URL, as used in the digest `uri` field
fn request_uri(url: &str) -> Result<String, SoapError> {
    let parsed = url::Url::parse(url)
        .map_err(|e| SoapError::Network(format!("Invalid request URL '{}': {}", url, e)))?;
    Ok(match parsed.query() {
        Some(query) => format!("{}?{}", parsed.path(), query),
        None => parsed.path().to_string(),
    })
}
