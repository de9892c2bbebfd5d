//! SCPD (Service Control Protocol Description) parsing.
//!
//! An SCPD document lists the actions of one service. Only what is needed to
//! call an action is kept: its wire name and the names of its input and
//! output arguments, in document order.

use indexmap::IndexMap;
use xmltree::Element;

use crate::error::{DescriptorError, Result};
use crate::{strip_vendor_prefix, xml};

/// Direction of an action argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    In,
    Out,
}

impl Direction {
    /// Only an exact `out` marks an output. Anything else, a missing
    /// direction included, is an input.
    pub fn from_text(text: Option<&str>) -> Self {
        match text.map(str::trim) {
            Some("out") => Direction::Out,
            _ => Direction::In,
        }
    }
}

/// One callable action of a service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionEntry {
    /// Wire name used in the envelope and `SOAPACTION` header
    pub name: String,
    /// Input argument names, in document order
    pub arguments: Vec<String>,
    /// Output argument names, in document order
    pub return_values: Vec<String>,
}

impl ActionEntry {
    /// Build an entry from an `<action>` element.
    pub fn from_element(element: &Element) -> Result<Self> {
        let name = xml::child_text(element, "name").ok_or(DescriptorError::MissingField {
            element: "action",
            field: "name",
        })?;

        let mut arguments = Vec::new();
        let mut return_values = Vec::new();
        for argument in xml::descendants(element, "argument") {
            let argument_name =
                xml::child_text(argument, "name").ok_or(DescriptorError::MissingField {
                    element: "argument",
                    field: "name",
                })?;
            let direction = xml::child_text(argument, "direction");

            match Direction::from_text(direction.as_deref()) {
                Direction::Out => return_values.push(argument_name),
                Direction::In => arguments.push(argument_name),
            }
        }

        Ok(Self {
            name,
            arguments,
            return_values,
        })
    }

    /// Human-readable signature: one `:param` line per input and a
    /// `:return` line listing the outputs.
    pub fn help(&self, friendly_name: &str) -> String {
        let mut help = format!("{}\n\n", friendly_name);
        for argument in &self.arguments {
            help.push_str(&format!(":param {}\n", argument));
        }
        help.push_str(&format!(":return {{{}}}", self.return_values.join(", ")));
        help
    }
}

/// The actions of one service, keyed by friendly name in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionRegistry {
    actions: IndexMap<String, ActionEntry>,
}

impl ActionRegistry {
    /// Parse an SCPD document.
    ///
    /// # Errors
    ///
    /// Returns `DescriptorError::ParseError` for malformed XML and
    /// `DescriptorError::MissingField` for an action or argument without a
    /// name.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let root = xml::parse(xml)?;

        let mut actions = IndexMap::new();
        for element in xml::descendants(&root, "action") {
            let entry = ActionEntry::from_element(element)?;
            let friendly_name = strip_vendor_prefix(&entry.name).to_string();
            if actions.insert(friendly_name.clone(), entry).is_some() {
                tracing::warn!(%friendly_name, "Duplicate friendly action name, keeping the later action");
            }
        }

        Ok(Self { actions })
    }

    pub fn get(&self, friendly_name: &str) -> Option<&ActionEntry> {
        self.actions.get(friendly_name)
    }

    pub fn contains(&self, friendly_name: &str) -> bool {
        self.actions.contains_key(friendly_name)
    }

    /// Friendly action names in document order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ActionEntry)> {
        self.actions.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
