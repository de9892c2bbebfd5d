//! Small helpers over `xmltree` elements

use xmltree::{Element, XMLNode};

use crate::error::{DescriptorError, Result};

pub(crate) fn parse(xml: &str) -> Result<Element> {
    Element::parse(xml.as_bytes()).map_err(|e| DescriptorError::ParseError(e.to_string()))
}

pub(crate) fn child_elements(element: &Element) -> impl Iterator<Item = &Element> {
    element.children.iter().filter_map(|node| match node {
        XMLNode::Element(child) => Some(child),
        _ => None,
    })
}

/// Every element named `name` below `root`, in document order
pub(crate) fn descendants<'a>(root: &'a Element, name: &str) -> Vec<&'a Element> {
    let mut found = Vec::new();
    collect(root, name, &mut found);
    found
}

fn collect<'a>(element: &'a Element, name: &str, found: &mut Vec<&'a Element>) {
    for child in child_elements(element) {
        if child.name == name {
            found.push(child);
        }
        collect(child, name, found);
    }
}

/// Trimmed text content of an element
pub(crate) fn text(element: &Element) -> String {
    element
        .get_text()
        .map(|t| t.trim().to_string())
        .unwrap_or_default()
}

/// Trimmed text of the first direct child named `name`
pub(crate) fn child_text(element: &Element, name: &str) -> Option<String> {
    child_elements(element)
        .find(|child| child.name == name)
        .map(text)
}
