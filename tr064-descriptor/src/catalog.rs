//! Root descriptor parsing.
//!
//! The root descriptor (`tr64desc.xml`) lists every service of the device and
//! its embedded devices. Each `<service>` element becomes a [`ServiceEntry`]
//! keyed by a friendly name derived from its service type.

use std::fmt;

use indexmap::IndexMap;
use xmltree::Element;

use crate::error::{DescriptorError, Result};
use crate::{strip_vendor_prefix, xml};

/// One service listed in the root descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEntry {
    /// Vendor-prefix-free alias, e.g. "Homeauto"
    pub friendly_name: String,
    /// e.g. "urn:dslforum-org:service:X_AVM-DE_Homeauto:1"
    pub service_type: String,
    pub service_id: String,
    /// Control endpoint, relative to the TR-064 base URL
    pub control_url: String,
    /// Event subscription endpoint. Recorded only, eventing is not supported.
    pub event_sub_url: String,
    /// Location of the SCPD document, relative to the TR-064 base URL
    pub scpd_url: String,
    /// Any other child element, tag name to trimmed text
    pub extra: IndexMap<String, String>,
}

impl ServiceEntry {
    /// Build an entry from a `<service>` element.
    ///
    /// # Errors
    ///
    /// Returns `DescriptorError::MissingField` if any of the five standard
    /// children is absent, or `DescriptorError::InvalidServiceType` if the
    /// friendly name cannot be derived.
    pub fn from_element(element: &Element) -> Result<Self> {
        let mut fields: IndexMap<String, String> = xml::child_elements(element)
            .map(|child| (child.name.clone(), xml::text(child)))
            .collect();

        let mut take = |field: &'static str| {
            fields
                .shift_remove(field)
                .ok_or(DescriptorError::MissingField { element: "service", field })
        };

        let service_type = take("serviceType")?;
        let service_id = take("serviceId")?;
        let control_url = take("controlURL")?;
        let event_sub_url = take("eventSubURL")?;
        let scpd_url = take("SCPDURL")?;

        Ok(Self {
            friendly_name: friendly_service_name(&service_type)?,
            service_type,
            service_id,
            control_url,
            event_sub_url,
            scpd_url,
            extra: fields,
        })
    }
}

impl fmt::Display for ServiceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Service: {}", self.friendly_name)?;
        writeln!(f, "    service type:   '{}'", self.service_type)?;
        writeln!(f, "    service id:     '{}'", self.service_id)?;
        writeln!(f, "    control url:    '{}'", self.control_url)?;
        writeln!(f, "    event sub url:  '{}'", self.event_sub_url)?;
        writeln!(f, "    scpd url:       '{}'", self.scpd_url)
    }
}

/// Derive the friendly name of a service from its type URN.
///
/// Takes the segment before the version number and strips the vendor
/// prefix: `urn:dslforum-org:service:X_AVM-DE_Homeauto:1` gives `Homeauto`.
pub fn friendly_service_name(service_type: &str) -> Result<String> {
    let segments: Vec<&str> = service_type.split(':').collect();
    if segments.len() < 2 {
        return Err(DescriptorError::InvalidServiceType(service_type.to_string()));
    }
    let raw_name = segments[segments.len() - 2];
    Ok(strip_vendor_prefix(raw_name).to_string())
}

/// All services of a device, keyed by friendly name in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    services: IndexMap<String, ServiceEntry>,
}

impl Catalog {
    /// Parse a root descriptor document.
    ///
    /// Services of embedded devices are included. When two services share a
    /// friendly name the later one replaces the earlier one, which keeps its
    /// listing position.
    ///
    /// # Errors
    ///
    /// Returns `DescriptorError::ParseError` for malformed XML and the
    /// errors of [`ServiceEntry::from_element`] for incomplete services.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let root = xml::parse(xml)?;

        let mut services = IndexMap::new();
        for element in xml::descendants(&root, "service") {
            let entry = ServiceEntry::from_element(element)?;
            if let Some(previous) = services.insert(entry.friendly_name.clone(), entry) {
                tracing::warn!(
                    friendly_name = %previous.friendly_name,
                    replaced = %previous.service_type,
                    "Duplicate friendly service name, keeping the later service"
                );
            }
        }

        Ok(Self { services })
    }

    pub fn get(&self, friendly_name: &str) -> Option<&ServiceEntry> {
        self.services.get(friendly_name)
    }

    pub fn contains(&self, friendly_name: &str) -> bool {
        self.services.contains_key(friendly_name)
    }

    /// Friendly names in document order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.services.keys().map(String::as_str)
    }

    pub fn services(&self) -> impl Iterator<Item = &ServiceEntry> {
        self.services.values()
    }

    /// Look a service up by its full type URN
    pub fn find_by_type(&self, service_type: &str) -> Option<&ServiceEntry> {
        self.services.values().find(|s| s.service_type == service_type)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
