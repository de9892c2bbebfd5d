//! Client configuration
//!
//! This module defines the settings a [`Tr064Client`](crate::Tr064Client) is
//! built from: where the device lives, how to authenticate, and how long to
//! wait for it.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::{ApiError, Result};

/// Default device address
pub const DEFAULT_BASE_URL: &str = "https://fritz.box";

/// Path prefix under which all TR-064 resources are served
pub const TR064_PREFIX: &str = "/tr064";

/// Root descriptor location below [`TR064_PREFIX`]
pub const DEFAULT_DESCRIPTOR_PATH: &str = "/tr64desc.xml";

/// Configuration for a [`Tr064Client`](crate::Tr064Client)
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme, host and optional port of the device
    /// Default: "https://fritz.box"
    pub base_url: String,

    /// Default: empty
    pub username: String,

    /// Default: empty
    pub password: String,

    /// PEM file with the device certificate to trust
    /// Default: None (system roots only)
    pub certificate: Option<PathBuf>,

    /// Timeout of every HTTP exchange
    /// Default: 31 seconds
    pub timeout: Duration,

    /// Root descriptor path below the TR-064 prefix
    /// Default: "/tr64desc.xml"
    pub descriptor_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            username: String::new(),
            password: String::new(),
            certificate: None,
            timeout: soap_client::DEFAULT_TIMEOUT,
            descriptor_path: DEFAULT_DESCRIPTOR_PATH.to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a new ClientConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the configuration from `TR064_URL`, `TR064_USER`,
    /// `TR064_PASSWORD` and `TR064_CERTIFICATE`.
    ///
    /// Only the password is required.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let password = lookup("TR064_PASSWORD")
            .ok_or_else(|| ApiError::ConfigError("TR064_PASSWORD is not set".to_string()))?;

        let mut config = Self::new().with_credentials(lookup("TR064_USER").unwrap_or_default(), password);
        if let Some(url) = lookup("TR064_URL") {
            config = config.with_base_url(url);
        }
        if let Some(certificate) = lookup("TR064_CERTIFICATE") {
            config = config.with_certificate(certificate);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    pub fn with_certificate(mut self, path: impl Into<PathBuf>) -> Self {
        self.certificate = Some(path.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_descriptor_path(mut self, path: impl Into<String>) -> Self {
        self.descriptor_path = path.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.base_url)
            .map_err(|e| ApiError::ConfigError(format!("Invalid base URL '{}': {}", self.base_url, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ApiError::ConfigError(format!(
                "Unsupported URL scheme '{}'",
                url.scheme()
            )));
        }

        if self.timeout.is_zero() {
            return Err(ApiError::ConfigError("timeout must be greater than zero".to_string()));
        }

        if !self.descriptor_path.starts_with('/') {
            return Err(ApiError::ConfigError(format!(
                "descriptor path '{}' must start with '/'",
                self.descriptor_path
            )));
        }

        Ok(())
    }

    /// Whether requests should answer digest challenges
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() || !self.password.is_empty()
    }

    /// Absolute URL of a resource below the TR-064 prefix
    pub fn tr064_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url.trim_end_matches('/'), TR064_PREFIX, path)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("certificate", &self.certificate)
            .field("timeout", &self.timeout)
            .field("descriptor_path", &self.descriptor_path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://fritz.box");
        assert_eq!(config.timeout, Duration::from_secs(31));
        assert_eq!(config.descriptor_path, "/tr64desc.xml");
        assert!(config.certificate.is_none());
        assert!(!config.has_credentials());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_tr064_url() {
        let config = ClientConfig::new().with_base_url("http://192.168.178.1:49000/");
        assert_eq!(
            config.tr064_url("/upnp/control/hosts"),
            "http://192.168.178.1:49000/tr064/upnp/control/hosts"
        );
        assert_eq!(
            ClientConfig::default().tr064_url("/tr64desc.xml"),
            "https://fritz.box/tr064/tr64desc.xml"
        );
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(ClientConfig::new().with_base_url("fritz.box").validate().is_err());
        assert!(ClientConfig::new().with_base_url("ftp://fritz.box").validate().is_err());
        assert!(ClientConfig::new().with_timeout(Duration::ZERO).validate().is_err());
        assert!(ClientConfig::new().with_descriptor_path("tr64desc.xml").validate().is_err());
    }

    #[test]
    fn test_from_lookup() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("TR064_URL", "https://192.168.178.1:49443"),
            ("TR064_USER", "admin"),
            ("TR064_PASSWORD", "secret"),
            ("TR064_CERTIFICATE", "/etc/fritzbox.pem"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "https://192.168.178.1:49443");
        assert_eq!(config.username, "admin");
        assert_eq!(config.password, "secret");
        assert_eq!(config.certificate, Some(PathBuf::from("/etc/fritzbox.pem")));
    }

    #[test]
    fn test_from_lookup_requires_password() {
        let result = ClientConfig::from_lookup(lookup(&[("TR064_USER", "admin")]));
        assert!(matches!(result, Err(ApiError::ConfigError(_))));
    }

    proptest::proptest! {
        #[test]
        fn prop_tr064_url_joins_without_double_slash(
            host in "[a-z]{1,12}(\\.[a-z]{2,5})?",
            trailing in proptest::bool::ANY,
            path in "(/[A-Za-z0-9_.]{1,10}){1,3}",
        ) {
            let base = format!("http://{}{}", host, if trailing { "/" } else { "" });
            let url = ClientConfig::new().with_base_url(base).tr064_url(&path);

            proptest::prop_assert_eq!(url, format!("http://{}/tr064{}", host, path));
        }
    }

    #[test]
    fn test_debug_hides_password() {
        let config = ClientConfig::new().with_credentials("admin", "secret");
        let debug = format!("{:?}", config);
        assert!(debug.contains("admin"));
        assert!(!debug.contains("secret"));
    }
}
