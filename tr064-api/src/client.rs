use std::sync::Arc;

use indexmap::IndexMap;
use soap_client::SoapClient;
use tr064_descriptor::{Catalog, DeviceInfo};

use crate::cache::{ActionRegistryCache, DescriptorSource, HttpDescriptorSource};
use crate::operations::hosts::get_host_list_path;
use crate::{ApiError, ClientConfig, Result, ServiceProxy, Tr064Action};

/// Client for a single TR-064 device
///
/// Connecting downloads and parses the root descriptor. SCPD documents are
/// fetched the first time a service is used and cached for the lifetime of
/// the client. The client is `Send + Sync`; share it by reference or wrap it
/// in an `Arc`.
pub struct Tr064Client {
    config: ClientConfig,
    soap: SoapClient,
    descriptor: String,
    catalog: Catalog,
    actions: ActionRegistryCache,
}

impl Tr064Client {
    /// Connect to the device described by `config`
    ///
    /// # Errors
    ///
    /// - [`ApiError::ConfigError`] for an invalid configuration or an
    ///   unreadable certificate
    /// - [`ApiError::NetworkError`] / [`ApiError::HttpStatus`] if the root
    ///   descriptor cannot be downloaded
    /// - [`ApiError::Descriptor`] if it cannot be parsed
    pub fn connect(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = SoapClient::builder().timeout(config.timeout);
        if config.has_credentials() {
            builder = builder.credentials(config.username.clone(), config.password.clone());
        }
        if let Some(path) = &config.certificate {
            let pem = std::fs::read(path).map_err(|e| {
                ApiError::ConfigError(format!("Failed to read certificate {}: {}", path.display(), e))
            })?;
            builder = builder.certificate_pem(pem);
        }
        let soap = builder.build()?;

        let source = Arc::new(HttpDescriptorSource::new(soap.clone(), config.base_url.clone()));
        Self::with_source(config, soap, source)
    }

    /// Connect using an explicit SOAP client and descriptor source
    ///
    /// Descriptors, the root descriptor included, are read from `source`
    /// while actions and list downloads go through `soap`.
    pub fn with_source(
        config: ClientConfig,
        soap: SoapClient,
        source: Arc<dyn DescriptorSource>,
    ) -> Result<Self> {
        config.validate()?;

        let descriptor = source.fetch(&config.descriptor_path)?;
        let catalog = Catalog::from_xml(&descriptor)?;

        tracing::info!(
            base_url = %config.base_url,
            services = catalog.len(),
            "Connected to TR-064 device"
        );

        Ok(Self {
            config,
            soap,
            descriptor,
            catalog,
            actions: ActionRegistryCache::new(source),
        })
    }

    /// Proxy for a service by friendly name, loading its actions on first use
    pub fn service(&self, name: &str) -> Result<ServiceProxy<'_>> {
        let entry = self
            .catalog
            .get(name)
            .ok_or_else(|| ApiError::UnknownService(name.to_string()))?;
        let actions = self.actions.get_actions(entry)?;

        Ok(ServiceProxy::new(self, entry, actions))
    }

    /// Friendly service names in descriptor order
    pub fn list_services(&self) -> Vec<String> {
        self.catalog.names().map(str::to_string).collect()
    }

    /// Text block describing a service's type, id and URLs
    pub fn service_info(&self, name: &str) -> Result<String> {
        self.catalog
            .get(name)
            .map(|entry| entry.to_string())
            .ok_or_else(|| ApiError::UnknownService(name.to_string()))
    }

    /// Device identity from the root descriptor
    pub fn device_info(&self) -> Result<DeviceInfo> {
        Ok(DeviceInfo::from_xml(&self.descriptor)?)
    }

    /// Run a typed action
    ///
    /// ```rust,ignore
    /// use tr064_api::operations::hosts::get_specific_host_entry;
    ///
    /// let host = client.execute(&get_specific_host_entry("AA:BB:CC:DD:EE:FF".into()))?;
    /// println!("{} is {}", host.host_name, if host.active { "online" } else { "offline" });
    /// ```
    pub fn execute<A: Tr064Action>(&self, action: &A) -> Result<A::Output> {
        let result = self.service(A::SERVICE)?.invoke(A::ACTION, action.arguments())?;
        <A::Output as crate::FromActionResult>::from_action_result(result)
    }

    /// All hosts known to the device, one map per host
    pub fn host_list(&self) -> Result<Vec<IndexMap<String, String>>> {
        let path = self.execute(&get_host_list_path())?;
        self.service("Hosts")?.get_list(&path)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn soap(&self) -> &SoapClient {
        &self.soap
    }
}

impl std::fmt::Debug for Tr064Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tr064Client")
            .field("config", &self.config)
            .field("services", &self.catalog.len())
            .field("actions", &self.actions)
            .finish()
    }
}
