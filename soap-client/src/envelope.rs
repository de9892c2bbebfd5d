//! SOAP envelope construction and response decoding
//!
//! Requests are built as text with the arguments interpolated verbatim, the
//! same way the device firmware expects them. Responses are parsed with
//! `xmltree` and flattened into [`ActionResult`] values.

use std::borrow::Cow;
use std::fmt::{self, Write as _};

use indexmap::IndexMap;
use xmltree::{Element, XMLNode};

use crate::SoapError;

/// SOAP 1.1 envelope namespace
pub const ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// SOAP 1.1 encoding style
pub const ENCODING_STYLE: &str = "http://schemas.xmlsoap.org/soap/encoding/";

/// Ordered set of named action arguments.
///
/// Values are rendered to text when inserted. They are written into the
/// envelope without escaping, so callers must not pass `<`, `>` or `&`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    values: IndexMap<String, String>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl fmt::Display) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace an argument, keeping its first position
    pub fn insert(&mut self, name: impl Into<String>, value: impl fmt::Display) {
        self.values.insert(name.into(), value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(name, value)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: fmt::Display, const N: usize> From<[(K, V); N]> for Arguments {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K: Into<String>, V: fmt::Display> FromIterator<(K, V)> for Arguments {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut arguments = Arguments::new();
        for (name, value) in iter {
            arguments.insert(name, value);
        }
        arguments
    }
}

/// A single value returned by an action
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// Text made only of ASCII digits that fits in a `u64`
    Integer(u64),
    /// Anything else, trimmed
    Text(String),
}

impl Value {
    /// Coerce response text: all-digit text becomes an integer, everything
    /// else stays trimmed text. Empty text is text.
    pub fn from_text(text: &str) -> Self {
        let trimmed = text.trim();
        if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(number) = trimmed.parse::<u64>() {
                return Value::Integer(number);
            }
        }
        Value::Text(trimmed.to_string())
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Integer(n) => Some(*n),
            Value::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            Value::Integer(_) => None,
        }
    }

    /// Text form of the value, integers included
    pub fn into_string(self) -> String {
        match self {
            Value::Integer(n) => n.to_string(),
            Value::Text(s) => s,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
        }
    }
}

/// Decoded output of one action invocation.
///
/// A response carrying exactly one output collapses to [`ActionResult::Single`];
/// every other arity, zero included, is returned as [`ActionResult::Values`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    Single(Value),
    Values(IndexMap<String, Value>),
}

impl ActionResult {
    /// Build a result from decoded outputs, collapsing a lone entry
    pub fn from_values(mut values: IndexMap<String, Value>) -> Self {
        if values.len() == 1 {
            if let Some((_, value)) = values.pop() {
                return ActionResult::Single(value);
            }
        }
        ActionResult::Values(values)
    }

    pub fn as_single(&self) -> Option<&Value> {
        match self {
            ActionResult::Single(value) => Some(value),
            ActionResult::Values(_) => None,
        }
    }

    /// Look up a named output. Always `None` for a collapsed result.
    pub fn get(&self, name: &str) -> Option<&Value> {
        match self {
            ActionResult::Values(values) => values.get(name),
            ActionResult::Single(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ActionResult::Single(_) => 1,
            ActionResult::Values(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// UPnP error details carried by a SOAP fault body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    pub code: u16,
    pub description: String,
}

/// Build the SOAP request body for `action` on `service_type`.
pub fn encode(action: &str, service_type: &str, arguments: &Arguments) -> Vec<u8> {
    let mut argument_tags = String::new();
    for (name, value) in arguments.iter() {
        // Writing into a String cannot fail
        let _ = write!(argument_tags, "\n<{name}>{value}</{name}>");
    }

    format!(
        r#"<?xml version="1.0"?>
<s:Envelope xmlns:s="{envelope_ns}"
s:encodingStyle="{encoding_style}">
<s:Body>
<u:{action} xmlns:u="{service_type}">{argument_tags}
</u:{action}>
</s:Body>
</s:Envelope>"#,
        envelope_ns = ENVELOPE_NS,
        encoding_style = ENCODING_STYLE,
        action = action,
        service_type = service_type,
        argument_tags = argument_tags,
    )
    .into_bytes()
}

/// Decode the `<action>Response` element of a SOAP response body.
///
/// The body must be well-formed namespaced XML: a `u:` prefix that is not
/// bound by an `xmlns:u` declaration is a parse error. Devices always send
/// the binding on the response element.
pub fn decode(body: &[u8], action: &str) -> Result<ActionResult, SoapError> {
    let document = parse_document(body)?;

    let response_name = format!("{}Response", action);
    let response = find_element(&document, &response_name)
        .ok_or_else(|| SoapError::Parse(format!("Missing {} element", response_name)))?;

    let values = child_elements(response)
        .map(|child| (child.name.clone(), Value::from_text(&element_text(child))))
        .collect::<IndexMap<_, _>>();

    Ok(ActionResult::from_values(values))
}

/// Decode the UPnP error carried by a fault response.
///
/// Without an `errorCode` element the fault falls back to code 500 and the
/// SOAP `faultstring` as description.
pub fn decode_fault(body: &[u8]) -> Result<Fault, SoapError> {
    let document = parse_document(body)?;

    match find_element(&document, "errorCode") {
        Some(code) => {
            let text = element_text(code);
            let code = text
                .trim()
                .parse::<u16>()
                .map_err(|_| SoapError::Parse(format!("Invalid UPnP error code '{}'", text.trim())))?;
            let description = find_element(&document, "errorDescription")
                .map(|d| element_text(d).trim().to_string())
                .unwrap_or_default();
            Ok(Fault { code, description })
        }
        None => Ok(Fault {
            code: 500,
            description: find_element(&document, "faultstring")
                .map(|d| element_text(d).trim().to_string())
                .unwrap_or_default(),
        }),
    }
}

fn parse_document(body: &[u8]) -> Result<Element, SoapError> {
    Element::parse(body).map_err(|e| SoapError::Parse(e.to_string()))
}

/// Depth-first search by local name, document order
fn find_element<'a>(element: &'a Element, name: &str) -> Option<&'a Element> {
    if element.name == name {
        return Some(element);
    }
    child_elements(element).find_map(|child| find_element(child, name))
}

fn child_elements(element: &Element) -> impl Iterator<Item = &Element> {
    element.children.iter().filter_map(|node| match node {
        XMLNode::Element(child) => Some(child),
        _ => None,
    })
}

fn element_text(element: &Element) -> Cow<'_, str> {
    element.get_text().unwrap_or(Cow::Borrowed(""))
}
