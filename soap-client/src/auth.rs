//! HTTP digest authentication state shared by all requests of one client

use std::fmt;

use digest_auth::{AuthContext, HttpMethod, WwwAuthenticateHeader};
use parking_lot::Mutex;

use crate::SoapError;

/// Username and password used to answer digest challenges
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Method {
    Get,
    Post,
}

impl Method {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }

    fn digest_method(self) -> HttpMethod<'static> {
        match self {
            Method::Get => HttpMethod::GET,
            Method::Post => HttpMethod::POST,
        }
    }
}

/// Last digest challenge received from the device.
///
/// Once a challenge is known every request answers it preemptively, which
/// saves the 401 round-trip until the device rotates its nonce.
#[derive(Default)]
pub(crate) struct DigestState {
    challenge: Mutex<Option<WwwAuthenticateHeader>>,
}

impl DigestState {
    /// `Authorization` header value for a request, if a challenge is cached
    pub(crate) fn authorization(
        &self,
        credentials: &Credentials,
        method: Method,
        uri: &str,
        body: Option<&[u8]>,
    ) -> Option<String> {
        let mut guard = self.challenge.lock();
        let challenge = guard.as_mut()?;

        let context = AuthContext::new_with_method(
            credentials.username.as_str(),
            credentials.password.as_str(),
            uri,
            body,
            method.digest_method(),
        );

        match challenge.respond(&context) {
            Ok(header) => Some(header.to_header_string()),
            Err(e) => {
                tracing::warn!("Failed to answer digest challenge: {}", e);
                None
            }
        }
    }

    /// Replace the cached challenge with a fresh `WWW-Authenticate` value
    pub(crate) fn update(&self, www_authenticate: &str) -> Result<(), SoapError> {
        if !is_digest_challenge(www_authenticate) {
            return Err(SoapError::Network(format!(
                "Unsupported authentication scheme: {}",
                www_authenticate
            )));
        }
        let challenge = digest_auth::parse(www_authenticate)
            .map_err(|e| SoapError::Network(format!("Invalid digest challenge: {}", e)))?;
        *self.challenge.lock() = Some(challenge);
        Ok(())
    }

    pub(crate) fn has_challenge(&self) -> bool {
        self.challenge.lock().is_some()
    }
}

pub(crate) fn is_digest_challenge(www_authenticate: &str) -> bool {
    www_authenticate
        .trim_start()
        .get(..6)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("digest"))
}

impl fmt::Debug for DigestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigestState")
            .field("has_challenge", &self.has_challenge())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHALLENGE: &str =
        r#"Digest realm="HTTPS Access", nonce="3A4DF8A2B1C9E0F1", algorithm=MD5, qop="auth""#;

    #[test]
    fn test_credentials_debug_hides_password() {
        let credentials = Credentials::new("admin", "secret");
        let debug = format!("{:?}", credentials);
        assert!(debug.contains("admin"));
        assert!(!debug.contains("secret"));
    }

    #[test]
    fn test_no_authorization_without_challenge() {
        let state = DigestState::default();
        let credentials = Credentials::new("admin", "secret");
        assert!(state
            .authorization(&credentials, Method::Post, "/upnp/control/hosts", None)
            .is_none());
    }

    #[test]
    fn test_authorization_after_challenge() {
        let state = DigestState::default();
        state.update(CHALLENGE).unwrap();
        assert!(state.has_challenge());

        let credentials = Credentials::new("admin", "secret");
        let header = state
            .authorization(&credentials, Method::Post, "/upnp/control/hosts", Some(b"<x/>"))
            .unwrap();

        assert!(header.starts_with("Digest "));
        assert!(header.contains(r#"username="admin""#));
        assert!(header.contains(r#"uri="/upnp/control/hosts""#));
        assert!(!header.contains("secret"));
    }

    #[test]
    fn test_invalid_challenge_is_rejected() {
        let state = DigestState::default();
        assert!(state.update("Basic realm=\"x\"").is_err());
        assert!(!state.has_challenge());
    }
}
