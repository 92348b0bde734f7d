//! Owned element tree.

use std::fmt;

/// A single attribute, stored under its qualified name (`prefix:local` or `local`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Returns the declared prefix if this attribute is a namespace declaration.
    ///
    /// `xmlns="..."` yields `Some(None)`, `xmlns:p="..."` yields `Some(Some("p"))`.
    pub fn namespace_declaration(&self) -> Option<Option<&str>> {
        if self.name == "xmlns" {
            Some(None)
        } else {
            self.name.strip_prefix("xmlns:").map(Some)
        }
    }
}

/// Child content of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    CData(String),
    Comment(String),
}

/// An XML element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<Attribute>,
    children: Vec<Node>,
}

impl Element {
    /// Create an empty element with the given qualified name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder form of [`Element::set_attribute`].
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Builder form of [`Element::append_child`].
    pub fn with_child(mut self, child: Element) -> Self {
        self.append_child(child);
        self
    }

    /// Builder form of [`Element::set_text`].
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    /// Qualified name as written in the source document.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name without its namespace prefix.
    pub fn local_name(&self) -> &str {
        split_qname(&self.name).1
    }

    /// Namespace prefix, if any.
    pub fn prefix(&self) -> Option<&str> {
        split_qname(&self.name).0
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Look up an attribute value by qualified name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Set an attribute, replacing the value in place when it already exists.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value,
            None => self.attributes.push(Attribute { name, value }),
        }
    }

    /// Remove an attribute by qualified name. Returns whether it was present.
    pub fn remove_attribute(&mut self, name: &str) -> bool {
        let before = self.attributes.len();
        self.attributes.retain(|a| a.name != name);
        self.attributes.len() != before
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }

    pub fn push_node(&mut self, node: Node) {
        self.children.push(node);
    }

    pub fn append_child(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    /// Iterate over direct child elements, skipping text and comments.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// First direct child element with the given local name.
    pub fn child(&self, local_name: &str) -> Option<&Element> {
        self.child_elements().find(|e| e.local_name() == local_name)
    }

    /// Concatenated text and CDATA content of this element and its descendants.
    pub fn text(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// Replace all children with a single text node.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.children.clear();
        if !text.is_empty() {
            self.children.push(Node::Text(text));
        }
    }

    /// Namespace URI this element declares for `prefix` (`None` = default namespace).
    pub fn declared_namespace(&self, prefix: Option<&str>) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.namespace_declaration() == Some(prefix))
            .map(|a| a.value.as_str())
    }

    /// Serialize this element (and its subtree) to XML text.
    pub fn to_xml_string(&self) -> String {
        let mut out = String::new();
        crate::xml::writer::write_element(self, &mut out);
        out
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_xml_string())
    }
}

fn collect_text(element: &Element, out: &mut String) {
    for child in &element.children {
        match child {
            Node::Text(t) | Node::CData(t) => out.push_str(t),
            Node::Element(e) => collect_text(e, out),
            Node::Comment(_) => {}
        }
    }
}

/// Split `prefix:local` into its parts.
pub fn split_qname(name: &str) -> (Option<&str>, &str) {
    match name.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_names() {
        let el = Element::new("ns:configuration");
        assert_eq!(el.local_name(), "configuration");
        assert_eq!(el.prefix(), Some("ns"));

        let plain = Element::new("server");
        assert_eq!(plain.local_name(), "server");
        assert_eq!(plain.prefix(), None);
    }

    #[test]
    fn test_attribute_set_and_remove() {
        let mut el = Element::new("user")
            .with_attribute("inserted", "true")
            .with_attribute("clientattr:sync_id", "7");

        el.set_attribute("inserted", "false");
        assert_eq!(el.attribute("inserted"), Some("false"));
        assert_eq!(el.attributes().len(), 2);

        assert!(el.remove_attribute("clientattr:sync_id"));
        assert!(!el.remove_attribute("clientattr:sync_id"));
        // Local name alone does not match a prefixed attribute
        el.set_attribute("clientattr:sync_id", "8");
        assert!(!el.remove_attribute("sync_id"));
        assert_eq!(el.attribute("clientattr:sync_id"), Some("8"));
    }

    #[test]
    fn test_text_replacement() {
        let mut el = Element::new("password");
        el.push_node(Node::Text("ab".into()));
        el.push_node(Node::CData("cd".into()));
        el.push_node(Node::Comment("ignored".into()));
        assert_eq!(el.text(), "abcd");

        el.set_text("secret");
        assert_eq!(el.children(), &[Node::Text("secret".into())]);

        el.set_text("");
        assert!(el.children().is_empty());
    }

    #[test]
    fn test_namespace_declarations() {
        let el = Element::new("configuration")
            .with_attribute("xmlns", "urn:a")
            .with_attribute("xmlns:clientattr", "urn:b");

        assert_eq!(el.declared_namespace(None), Some("urn:a"));
        assert_eq!(el.declared_namespace(Some("clientattr")), Some("urn:b"));
        assert_eq!(el.declared_namespace(Some("other")), None);
    }
}
