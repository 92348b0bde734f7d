//! Tree → XML text.
//!
//! Output is compact and deterministic: attributes in stored order, childless
//! elements self-closed, text escaped with `&`, `<`, `>` only, attribute values
//! with quotes escaped as well.

use quick_xml::escape::{escape, partial_escape};

use crate::xml::tree::{Element, Node};

/// Append the serialized form of `element` to `out`.
pub fn write_element(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(element.name());
    for attr in element.attributes() {
        out.push(' ');
        out.push_str(&attr.name);
        out.push_str("=\"");
        out.push_str(&escape(attr.value.as_str()));
        out.push('"');
    }

    if element.children().is_empty() {
        out.push_str("/>");
        return;
    }
    out.push('>');

    for child in element.children() {
        match child {
            Node::Element(e) => write_element(e, out),
            Node::Text(t) => out.push_str(&partial_escape(t.as_str())),
            Node::CData(t) => {
                out.push_str("<![CDATA[");
                out.push_str(t);
                out.push_str("]]>");
            }
            Node::Comment(t) => {
                out.push_str("<!--");
                out.push_str(t);
                out.push_str("-->");
            }
        }
    }

    out.push_str("</");
    out.push_str(element.name());
    out.push('>');
}
