//! TR-064 descriptor parsing library
//!
//! A TR-064 device describes its API at runtime: a root descriptor lists the
//! services, and one SCPD document per service lists its actions. This crate
//! turns both into lookup tables keyed by friendly names.
//!
//! # Quick Start
//!
//! ```
//! use tr064_descriptor::Catalog;
//!
//! let xml = r#"<root><device><serviceList><service>
//!   <serviceType>urn:dslforum-org:service:X_AVM-DE_Homeauto:1</serviceType>
//!   <serviceId>urn:X_AVM-DE_Homeauto-com:serviceId:X_AVM-DE_Homeauto1</serviceId>
//!   <controlURL>/upnp/control/x_homeauto</controlURL>
//!   <eventSubURL>/upnp/control/x_homeauto</eventSubURL>
//!   <SCPDURL>/x_homeautoSCPD.xml</SCPDURL>
//! </service></serviceList></device></root>"#;
//!
//! let catalog = Catalog::from_xml(xml)?;
//! let homeauto = catalog.get("Homeauto").expect("listed");
//! assert_eq!(homeauto.scpd_url, "/x_homeautoSCPD.xml");
//! # Ok::<(), tr064_descriptor::DescriptorError>(())
//! ```

mod error;
mod xml;
pub mod catalog;
pub mod device;
pub mod scpd;

pub use catalog::{friendly_service_name, Catalog, ServiceEntry};
pub use device::DeviceInfo;
pub use error::{DescriptorError, Result};
pub use scpd::{ActionEntry, ActionRegistry, Direction};

/// Vendor prefix dropped from friendly service and action names
pub const VENDOR_PREFIX: &str = "X_AVM-DE_";

/// Remove the vendor prefix from a protocol name, if present.
///
/// ```
/// use tr064_descriptor::strip_vendor_prefix;
///
/// assert_eq!(strip_vendor_prefix("X_AVM-DE_GetHostListPath"), "GetHostListPath");
/// assert_eq!(strip_vendor_prefix("GetInfo"), "GetInfo");
/// ```
pub fn strip_vendor_prefix(name: &str) -> &str {
    name.strip_prefix(VENDOR_PREFIX).unwrap_or(name)
}
