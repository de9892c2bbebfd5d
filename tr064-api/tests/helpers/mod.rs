//! Shared helpers for client integration tests

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use mockito::{Mock, ServerGuard};
use tr064_api::{DescriptorSource, FileDescriptorSource};

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Load a descriptor fixture from the fixtures directory
pub fn load_fixture(filename: &str) -> String {
    let path = fixtures_dir().join(filename);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", filename, e))
}

/// Serve a fixture below the TR-064 prefix
pub fn serve_fixture(server: &mut ServerGuard, path: &str, filename: &str) -> Mock {
    server
        .mock("GET", format!("/tr064{}", path).as_str())
        .with_status(200)
        .with_header("content-type", "text/xml")
        .with_body(load_fixture(filename))
        .create()
}

/// SOAP response envelope with the given outputs
pub fn action_response(service_type: &str, action: &str, outputs: &[(&str, &str)]) -> String {
    let values: String = outputs
        .iter()
        .map(|(name, value)| format!("<{name}>{value}</{name}>"))
        .collect();

    format!(
        r#"<?xml version="1.0"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/" s:encodingStyle="http://schemas.xmlsoap.org/soap/encoding/">
<s:Body>
<u:{action}Response xmlns:u="{service_type}">{values}</u:{action}Response>
</s:Body>
</s:Envelope>"#
    )
}

/// SOAP fault envelope carrying a UPnP error
pub fn fault_response(code: u16, description: &str) -> String {
    format!(
        r#"<?xml version="1.0"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/" s:encodingStyle="http://schemas.xmlsoap.org/soap/encoding/">
<s:Body>
<s:Fault>
<faultcode>s:Client</faultcode>
<faultstring>UPnPError</faultstring>
<detail>
<UPnPError xmlns="urn:dslforum-org:control-1-0">
<errorCode>{code}</errorCode>
<errorDescription>{description}</errorDescription>
</UPnPError>
</detail>
</s:Fault>
</s:Body>
</s:Envelope>"#
    )
}

/// Descriptor source reading fixtures and counting fetches per path
pub struct CountingSource {
    inner: FileDescriptorSource,
    fetches: parking_lot::Mutex<Vec<String>>,
    total: AtomicUsize,
}

impl CountingSource {
    pub fn new() -> Self {
        Self {
            inner: FileDescriptorSource::new(fixtures_dir()),
            fetches: parking_lot::Mutex::new(Vec::new()),
            total: AtomicUsize::new(0),
        }
    }

    pub fn fetch_count(&self, path: &str) -> usize {
        self.fetches.lock().iter().filter(|p| p.as_str() == path).count()
    }

    pub fn total(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }
}

impl DescriptorSource for CountingSource {
    fn fetch(&self, path: &str) -> tr064_api::Result<String> {
        self.total.fetch_add(1, Ordering::SeqCst);
        self.fetches.lock().push(path.to_string());
        self.inner.fetch(path)
    }
}
