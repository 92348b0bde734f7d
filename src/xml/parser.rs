//! quick-xml event stream → owned tree.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::xml::tree::{Element, Node};
use crate::xml::XmlError;

impl Element {
    /// Parse a complete document and return its root element.
    pub fn parse(xml: &str) -> Result<Element, XmlError> {
        parse_document(xml)
    }
}

/// Parse a complete document and return its root element.
///
/// The XML declaration, processing instructions, the doctype and comments outside
/// the root are dropped. Whitespace inside the root is preserved as written.
pub fn parse_document(xml: &str) -> Result<Element, XmlError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(element_from_start(&start)?),
            Event::Empty(start) => {
                let element = element_from_start(&start)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack.pop().ok_or(XmlError::UnexpectedEnd)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                let text = text.unescape()?;
                match stack.last_mut() {
                    Some(parent) => parent.push_node(Node::Text(text.into_owned())),
                    None if text.trim().is_empty() => {}
                    None => return Err(XmlError::TextOutsideRoot),
                }
            }
            Event::CData(data) => {
                let text = String::from_utf8(data.into_inner().into_owned())?;
                match stack.last_mut() {
                    Some(parent) => parent.push_node(Node::CData(text)),
                    None => return Err(XmlError::TextOutsideRoot),
                }
            }
            Event::Comment(comment) => {
                if let Some(parent) = stack.last_mut() {
                    let text = String::from_utf8(comment.into_inner().into_owned())?;
                    parent.push_node(Node::Comment(text));
                }
            }
            Event::Eof => break,
            // Declaration, processing instructions, doctype
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(XmlError::Unclosed(open.name().to_string()));
    }
    root.ok_or(XmlError::Empty)
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element, XmlError> {
    let qname = start.name();
    let name = std::str::from_utf8(qname.as_ref())?;
    let mut element = Element::new(name);
    for attr in start.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = attr.unescape_value()?;
        element.set_attribute(key, value.into_owned());
    }
    Ok(element)
}

/// Hand a finished element to its parent, or make it the root.
fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(parent) => {
            parent.append_child(element);
            Ok(())
        }
        None if root.is_some() => Err(XmlError::MultipleRoots(element.name().to_string())),
        None => {
            *root = Some(element);
            Ok(())
        }
    }
}
