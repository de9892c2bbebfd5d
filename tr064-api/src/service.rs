//! Per-service handle for invoking actions by name

use std::sync::Arc;

use indexmap::IndexMap;
use soap_client::{envelope, ActionResult, Arguments};
use tr064_descriptor::{ActionEntry, ActionRegistry, ServiceEntry};
use xmltree::{Element, XMLNode};

use crate::{ApiError, Result, Tr064Client};

/// A service bound to its client and its action registry
///
/// Obtained from [`Tr064Client::service`]. The registry is loaded when the
/// proxy is created, so listing and describing actions never touch the
/// network.
#[derive(Debug, Clone)]
pub struct ServiceProxy<'a> {
    client: &'a Tr064Client,
    entry: &'a ServiceEntry,
    actions: Arc<ActionRegistry>,
}

impl<'a> ServiceProxy<'a> {
    pub(crate) fn new(client: &'a Tr064Client, entry: &'a ServiceEntry, actions: Arc<ActionRegistry>) -> Self {
        Self { client, entry, actions }
    }

    /// Friendly name of the service
    pub fn name(&self) -> &str {
        &self.entry.friendly_name
    }

    /// Catalog entry of the service
    pub fn entry(&self) -> &ServiceEntry {
        self.entry
    }

    /// Invoke an action by friendly name
    ///
    /// Argument names are passed through as given; names the SCPD does not
    /// declare are logged and sent anyway.
    ///
    /// # Errors
    ///
    /// - [`ApiError::UnknownAction`] if the service has no such action; no
    ///   request is sent in that case
    /// - [`ApiError::Fault`] for a UPnP fault (HTTP status >= 500)
    /// - [`ApiError::HttpStatus`] for any other error status, and for a 5xx
    ///   whose body is not a SOAP fault
    /// - [`ApiError::NetworkError`] / [`ApiError::ParseError`] from the
    ///   transport and the response decoder
    pub fn invoke(&self, action: &str, arguments: Arguments) -> Result<ActionResult> {
        let entry = self.lookup(action)?;

        for name in arguments.names() {
            if !entry.arguments.iter().any(|declared| declared == name) {
                tracing::debug!(service = %self.entry.friendly_name, action, argument = name, "Argument not declared by SCPD");
            }
        }

        let control_url = self.client.config().tr064_url(&self.entry.control_url);
        let response = self.client.soap().call(
            &control_url,
            &self.entry.service_type,
            &entry.name,
            &arguments,
        )?;

        if response.status >= 500 {
            // Without a SOAP fault body only the status is left to report
            let fault = match envelope::decode_fault(response.body.as_bytes()) {
                Ok(fault) => fault,
                Err(e) => {
                    tracing::debug!(status = response.status, error = %e, action = %entry.name, "Error status without SOAP fault");
                    return Err(ApiError::HttpStatus(response.status));
                }
            };
            tracing::debug!(code = fault.code, description = %fault.description, action = %entry.name, "UPnP fault");
            return Err(ApiError::Fault {
                code: fault.code,
                description: fault.description,
            });
        }
        if response.status >= 400 {
            return Err(ApiError::HttpStatus(response.status));
        }

        Ok(envelope::decode(response.body.as_bytes(), &entry.name)?)
    }

    /// Friendly action names in descriptor order
    pub fn list_actions(&self) -> Vec<String> {
        self.actions.names().map(str::to_string).collect()
    }

    /// Signature text of an action: its name, one `:param` line per input
    /// and a `:return` line with the outputs.
    pub fn describe_action(&self, action: &str) -> Result<String> {
        Ok(self.lookup(action)?.help(action))
    }

    pub fn action(&self, action: &str) -> Option<&ActionEntry> {
        self.actions.get(action)
    }

    /// Download an XML list document such as the host list and return each
    /// `Item` as an ordered tag to text map.
    ///
    /// `path` is relative to the TR-064 prefix, as returned by actions like
    /// `GetHostListPath`.
    pub fn get_list(&self, path: &str) -> Result<Vec<IndexMap<String, String>>> {
        let url = self.client.config().tr064_url(path);
        let body = self.client.soap().get(&url)?;
        parse_list(&body)
    }

    fn lookup(&self, action: &str) -> Result<&ActionEntry> {
        self.actions.get(action).ok_or_else(|| ApiError::UnknownAction {
            service: self.entry.friendly_name.clone(),
            action: action.to_string(),
        })
    }
}

pub(crate) fn parse_list(xml: &str) -> Result<Vec<IndexMap<String, String>>> {
    let root = Element::parse(xml.as_bytes())
        .map_err(|e| ApiError::ParseError(format!("Failed to parse list: {}", e)))?;

    let items = root
        .children
        .iter()
        .filter_map(XMLNode::as_element)
        .filter(|element| element.name == "Item")
        .map(|item| {
            item.children
                .iter()
                .filter_map(XMLNode::as_element)
                .map(|field| {
                    let text = field.get_text().map(|t| t.trim().to_string()).unwrap_or_default();
                    (field.name.clone(), text)
                })
                .collect()
        })
        .collect();

    Ok(items)
}
