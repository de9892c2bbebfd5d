//! Descriptor sources and the per-service action registry cache
//!
//! SCPD documents are only fetched when a service is first used. The cache
//! keeps one slot per service so that concurrent first calls for the same
//! service share a single download while different services load in
//! parallel.

use std::path::PathBuf;
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use soap_client::SoapClient;
use tr064_descriptor::{ActionRegistry, ServiceEntry};

use crate::config::TR064_PREFIX;
use crate::{ApiError, Result};

/// Where descriptor documents come from
///
/// `path` is the path below the TR-064 prefix as it appears in the root
/// descriptor, e.g. `/hostsSCPD.xml`.
pub trait DescriptorSource: Send + Sync {
    fn fetch(&self, path: &str) -> Result<String>;
}

/// Downloads descriptors from the device
#[derive(Debug, Clone)]
pub struct HttpDescriptorSource {
    client: SoapClient,
    base_url: String,
}

impl HttpDescriptorSource {
    pub fn new(client: SoapClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl DescriptorSource for HttpDescriptorSource {
    fn fetch(&self, path: &str) -> Result<String> {
        let url = format!("{}{}{}", self.base_url, TR064_PREFIX, path);
        Ok(self.client.get(&url)?)
    }
}

/// Reads descriptors saved to a local directory
///
/// The directory mirrors the device layout below the TR-064 prefix, so
/// `/hostsSCPD.xml` is read from `<root>/hostsSCPD.xml`.
#[derive(Debug, Clone)]
pub struct FileDescriptorSource {
    root: PathBuf,
}

impl FileDescriptorSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl DescriptorSource for FileDescriptorSource {
    fn fetch(&self, path: &str) -> Result<String> {
        let file = self.root.join(path.trim_start_matches('/'));
        tracing::debug!(path = %file.display(), "Reading descriptor from disk");

        std::fs::read_to_string(&file)
            .map_err(|e| ApiError::NetworkError(format!("Failed to read {}: {}", file.display(), e)))
    }
}

type Slot = Arc<Mutex<Option<Arc<ActionRegistry>>>>;

/// Lazily loaded action registries keyed by friendly service name
pub struct ActionRegistryCache {
    source: Arc<dyn DescriptorSource>,
    slots: DashMap<String, Slot>,
}

impl ActionRegistryCache {
    pub fn new(source: Arc<dyn DescriptorSource>) -> Self {
        Self {
            source,
            slots: DashMap::new(),
        }
    }

    /// Registry of a service, fetching and parsing its SCPD on first use
    ///
    /// A failed load leaves the service unloaded; the next call retries.
    pub fn get_actions(&self, service: &ServiceEntry) -> Result<Arc<ActionRegistry>> {
        // Clone the slot out so the map shard is not locked during I/O
        let slot = self
            .slots
            .entry(service.friendly_name.clone())
            .or_default()
            .value()
            .clone();

        let mut guard = slot.lock();
        if let Some(registry) = guard.as_ref() {
            return Ok(Arc::clone(registry));
        }

        tracing::debug!(service = %service.friendly_name, scpd = %service.scpd_url, "Loading action registry");
        let xml = self.source.fetch(&service.scpd_url)?;
        let registry = Arc::new(ActionRegistry::from_xml(&xml)?);
        *guard = Some(Arc::clone(&registry));

        Ok(registry)
    }

    /// Whether the service's registry is available without I/O
    ///
    /// A service that is still being fetched counts as not loaded.
    pub fn is_loaded(&self, friendly_name: &str) -> bool {
        let slot = self.slots.get(friendly_name).map(|slot| Arc::clone(slot.value()));
        slot.map_or(false, |slot| is_filled(&slot))
    }

    /// Number of loaded services
    pub fn len(&self) -> usize {
        let slots: Vec<Slot> = self.slots.iter().map(|slot| Arc::clone(slot.value())).collect();
        slots.iter().filter(|slot| is_filled(slot)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// Never waits on a slot held by a load in progress
fn is_filled(slot: &Slot) -> bool {
    slot.try_lock().map_or(false, |registry| registry.is_some())
}

impl std::fmt::Debug for ActionRegistryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRegistryCache")
            .field("loaded", &self.len())
            .finish()
    }
}
