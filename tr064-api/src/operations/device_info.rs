//! DeviceInfo service actions

use soap_client::ActionResult;

use crate::define_action;
use crate::operation::{integer_value, text_value, FromActionResult};
use crate::Result;

/// Result of `DeviceInfo.GetInfo`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetInfoResponse {
    pub manufacturer_name: String,
    pub model_name: String,
    pub software_version: String,
    /// Seconds since boot
    pub up_time: u64,
}

impl FromActionResult for GetInfoResponse {
    fn from_action_result(result: ActionResult) -> Result<Self> {
        Ok(Self {
            manufacturer_name: text_value(&result, "NewManufacturerName")?,
            model_name: text_value(&result, "NewModelName")?,
            software_version: text_value(&result, "NewSoftwareVersion")?,
            up_time: integer_value(&result, "NewUpTime")?,
        })
    }
}

define_action! {
    action: GetInfo,
    service: "DeviceInfo",
    name: "GetInfo",
    request: {},
    response: GetInfoResponse,
}

define_action! {
    action: GetDeviceLog,
    service: "DeviceInfo",
    name: "GetDeviceLog",
    request: {},
    response: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use soap_client::Value;

    #[test]
    fn test_get_info_response() {
        let result = ActionResult::from_values(
            [
                ("NewManufacturerName", "AVM"),
                ("NewModelName", "FRITZ!Box 7590"),
                ("NewSoftwareVersion", "154.07.57"),
                ("NewUpTime", "1234"),
            ]
            .iter()
            .map(|(k, v)| (k.to_string(), Value::from_text(v)))
            .collect(),
        );

        let info = GetInfoResponse::from_action_result(result).unwrap();
        assert_eq!(info.model_name, "FRITZ!Box 7590");
        assert_eq!(info.up_time, 1234);
    }

    #[test]
    fn test_missing_output_is_unexpected() {
        let result = ActionResult::Values(Default::default());
        assert!(GetInfoResponse::from_action_result(result).is_err());
    }
}
