//! Device metadata from the root descriptor.

use serde::Deserialize;

use crate::error::{DescriptorError, Result};

/// Root descriptor root element.
#[derive(Debug, Deserialize)]
struct Root {
    #[serde(rename = "systemVersion")]
    system_version: Option<SystemVersion>,
    device: DeviceDescription,
}

#[derive(Debug, Deserialize)]
struct SystemVersion {
    #[serde(rename = "Display")]
    display: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeviceDescription {
    device_type: String,
    friendly_name: String,
    manufacturer: String,
    #[serde(rename = "manufacturerURL")]
    manufacturer_url: Option<String>,
    model_description: Option<String>,
    model_name: String,
    model_number: Option<String>,
    #[serde(rename = "UDN")]
    udn: String,
    #[serde(rename = "presentationURL")]
    presentation_url: Option<String>,
}

/// Identity of the gateway, taken from the top-level `<device>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub device_type: String,
    /// e.g. "FRITZ!Box 7590"
    pub friendly_name: String,
    pub manufacturer: String,
    pub manufacturer_url: Option<String>,
    pub model_description: Option<String>,
    pub model_name: String,
    pub model_number: Option<String>,
    /// Unique device name, e.g. "uuid:739f2409-bccb-40e7-8e6c-3431C4AB2D1E"
    pub udn: String,
    pub presentation_url: Option<String>,
    /// Firmware version as displayed by the device, e.g. "154.07.57"
    pub software_version: Option<String>,
}

impl DeviceInfo {
    /// Parse device metadata from a root descriptor.
    ///
    /// # Errors
    ///
    /// Returns `DescriptorError::ParseError` if the XML is malformed or the
    /// top-level device lacks a required field.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let root: Root = quick_xml::de::from_str(xml).map_err(|e| {
            DescriptorError::ParseError(format!("Failed to parse device description: {}", e))
        })?;

        let device = root.device;
        Ok(Self {
            device_type: device.device_type,
            friendly_name: device.friendly_name,
            manufacturer: device.manufacturer,
            manufacturer_url: device.manufacturer_url,
            model_description: device.model_description,
            model_name: device.model_name,
            model_number: device.model_number,
            udn: device.udn,
            presentation_url: device.presentation_url,
            software_version: root.system_version.and_then(|v| v.display),
        })
    }
}
