//! Hosts service actions
//!
//! The Hosts service lists the devices the gateway has seen on the LAN.

use soap_client::ActionResult;

use crate::define_action;
use crate::operation::{integer_value, text_value, FromActionResult};
use crate::Result;

/// One known host as reported by `GetSpecificHostEntry`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEntry {
    pub ip_address: String,
    pub address_source: String,
    pub lease_time_remaining: u64,
    pub interface_type: String,
    pub active: bool,
    pub host_name: String,
}

impl FromActionResult for HostEntry {
    fn from_action_result(result: ActionResult) -> Result<Self> {
        Ok(Self {
            ip_address: text_value(&result, "NewIPAddress")?,
            address_source: text_value(&result, "NewAddressSource")?,
            lease_time_remaining: integer_value(&result, "NewLeaseTimeRemaining")?,
            interface_type: text_value(&result, "NewInterfaceType")?,
            active: integer_value(&result, "NewActive")? == 1,
            host_name: text_value(&result, "NewHostName")?,
        })
    }
}

define_action! {
    action: GetHostNumberOfEntries,
    service: "Hosts",
    name: "GetHostNumberOfEntries",
    request: {},
    response: u64,
}

define_action! {
    action: GetSpecificHostEntry,
    service: "Hosts",
    name: "GetSpecificHostEntry",
    request: {
        mac_address: String => "NewMACAddress",
    },
    response: HostEntry,
}

define_action! {
    action: GetHostListPath,
    service: "Hosts",
    name: "GetHostListPath",
    request: {},
    response: String,
}

define_action! {
    action: WakeOnLanByMacAddress,
    service: "Hosts",
    name: "WakeOnLANByMACAddress",
    request: {
        mac_address: String => "NewMACAddress",
    },
    response: (),
}
