//! TR-064 client for home gateways
//!
//! Services and actions are not hard-coded: the client reads the device's
//! root descriptor on connect and each service's SCPD on first use, then
//! invokes actions by their friendly names.
//!
//! # Example
//!
//! ```rust,no_run
//! use tr064_api::{Arguments, ClientConfig, Tr064Client};
//!
//! # fn main() -> tr064_api::Result<()> {
//! let config = ClientConfig::new().with_credentials("admin", "secret");
//! let client = Tr064Client::connect(config)?;
//!
//! let homeauto = client.service("Homeauto")?;
//! println!("{}", homeauto.describe_action("GetGenericDeviceInfos")?);
//!
//! let device = homeauto.invoke("GetGenericDeviceInfos", Arguments::new().with("NewIndex", 0))?;
//! println!("{:?}", device.get("NewDeviceName"));
//! # Ok(())
//! # }
//! ```
//!
//! Device faults surface as [`ApiError::Fault`] with the UPnP error code, so
//! iterating an indexed list until the device reports 713
//! ("SpecifiedArrayIndexInvalid") is a plain `match`.

pub mod cache;
pub mod config;
pub mod error;
pub mod logging;
pub mod operation;
pub mod operations;

mod client;
mod macros;
mod service;

pub use cache::{ActionRegistryCache, DescriptorSource, FileDescriptorSource, HttpDescriptorSource};
pub use client::Tr064Client;
pub use config::ClientConfig;
pub use error::{ApiError, Result};
pub use operation::{FromActionResult, Tr064Action};
pub use service::ServiceProxy;

pub use soap_client::{ActionResult, Arguments, Value};
pub use tr064_descriptor::{ActionEntry, DeviceInfo, ServiceEntry};

#[doc(hidden)]
pub use paste;
