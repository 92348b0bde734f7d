//! Tree queries.
//!
//! # Responsibilities
//! - Find every element with a given local name (pre-order, including the start node)
//! - Locate the authoritative `configuration` element (one that has a `server` child)
//! - Detach a located element as a self-contained document
//!
//! # Design Decisions
//! - Name matching is on local name; the prefix is ignored unless a namespace is required
//! - Namespace scope is tracked during the walk instead of stored on every node
//! - Mutable visits carry a slash-separated path so failures can name the element

use crate::xml::tree::{split_qname, Element};

const CONFIGURATION: &str = "configuration";
const SERVER: &str = "server";

/// In-scope namespace bindings, innermost last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceScope {
    bindings: Vec<(Option<String>, String)>,
}

impl NamespaceScope {
    /// Scope extended with the declarations made on `element`.
    pub fn enter(&self, element: &Element) -> Self {
        let mut next = self.clone();
        for attr in element.attributes() {
            if let Some(prefix) = attr.namespace_declaration() {
                next.bindings
                    .push((prefix.map(str::to_string), attr.value.clone()));
            }
        }
        next
    }

    /// Resolve a prefix (`None` = default namespace). An empty URI undeclares.
    pub fn resolve(&self, prefix: Option<&str>) -> Option<&str> {
        self.bindings
            .iter()
            .rev()
            .find(|(p, _)| p.as_deref() == prefix)
            .map(|(_, uri)| uri.as_str())
            .filter(|uri| !uri.is_empty())
    }

    /// Namespace the element's own name belongs to, evaluated in this scope.
    pub fn element_namespace(&self, element: &Element) -> Option<&str> {
        self.resolve(element.prefix())
    }

    /// Effective bindings, one per prefix, innermost wins.
    fn effective(&self) -> Vec<(Option<&str>, &str)> {
        let mut out: Vec<(Option<&str>, &str)> = Vec::new();
        for (prefix, uri) in self.bindings.iter().rev() {
            if !out.iter().any(|(p, _)| *p == prefix.as_deref()) {
                out.push((prefix.as_deref(), uri.as_str()));
            }
        }
        out.reverse();
        out
    }
}

/// An element found by [`find_configuration`] together with the namespace scope
/// inherited from its ancestors.
#[derive(Debug, Clone)]
pub struct Located<'a> {
    pub element: &'a Element,
    pub inherited: NamespaceScope,
}

impl Located<'_> {
    /// Copy the element out as a standalone document.
    ///
    /// Inherited namespace declarations that the subtree relies on, and does not
    /// declare itself, are added to the detached root.
    pub fn detach(&self) -> Element {
        let mut detached = self.element.clone();
        for (prefix, uri) in self.inherited.effective() {
            if detached.declared_namespace(prefix).is_some() {
                continue;
            }
            if uri.is_empty() || !uses_prefix(self.element, prefix) {
                continue;
            }
            let name = match prefix {
                Some(p) => format!("xmlns:{}", p),
                None => "xmlns".to_string(),
            };
            detached.set_attribute(name, uri);
        }
        detached
    }
}

/// Find the first `configuration` element (document order) that has a `server` child.
///
/// With `namespace` set, both elements must resolve to that namespace URI.
pub fn find_configuration<'a>(root: &'a Element, namespace: Option<&str>) -> Option<Located<'a>> {
    find_in(root, &NamespaceScope::default(), namespace)
}

fn find_in<'a>(
    element: &'a Element,
    inherited: &NamespaceScope,
    namespace: Option<&str>,
) -> Option<Located<'a>> {
    let scope = inherited.enter(element);

    if element.local_name() == CONFIGURATION && in_namespace(&scope, element, namespace) {
        let child_scope_has_server = element.child_elements().any(|child| {
            child.local_name() == SERVER && in_namespace(&scope.enter(child), child, namespace)
        });
        if child_scope_has_server {
            return Some(Located {
                element,
                inherited: inherited.clone(),
            });
        }
    }

    element
        .child_elements()
        .find_map(|child| find_in(child, &scope, namespace))
}

fn in_namespace(scope: &NamespaceScope, element: &Element, namespace: Option<&str>) -> bool {
    match namespace {
        Some(required) => scope.element_namespace(element) == Some(required),
        None => true,
    }
}

/// Whether any element or attribute in the subtree is written with `prefix`
/// (`None` = an unprefixed element name, which picks up the default namespace).
fn uses_prefix(element: &Element, prefix: Option<&str>) -> bool {
    if element.prefix() == prefix {
        return true;
    }
    if let Some(p) = prefix {
        let attr_uses = element.attributes().iter().any(|a| {
            a.namespace_declaration().is_none() && split_qname(&a.name).0 == Some(p)
        });
        if attr_uses {
            return true;
        }
    }
    element.child_elements().any(|child| uses_prefix(child, prefix))
}

impl Element {
    /// All elements with the given local name, pre-order, including `self`.
    pub fn descendants_named<'a>(&'a self, local_name: &str) -> Vec<&'a Element> {
        let mut out = Vec::new();
        collect_named(self, local_name, &mut out);
        out
    }

    /// Visit every element with the given local name, pre-order, including `self`.
    ///
    /// The callback receives the element's slash-separated path from `self`.
    /// The first error stops the walk.
    pub fn try_for_each_named_mut<E, F>(&mut self, local_name: &str, mut f: F) -> Result<usize, E>
    where
        F: FnMut(&str, &mut Element) -> Result<(), E>,
    {
        let mut path = String::new();
        let mut visited = 0;
        visit_named_mut(self, local_name, &mut path, &mut visited, &mut f)?;
        Ok(visited)
    }

    /// Whether any element or attribute in the subtree is written with `prefix`.
    pub fn uses_prefix(&self, prefix: Option<&str>) -> bool {
        uses_prefix(self, prefix)
    }

    /// Visit every element in the subtree, pre-order, including `self`.
    pub fn for_each_element_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Element),
    {
        visit_all_mut(self, &mut f);
    }
}

fn collect_named<'a>(element: &'a Element, local_name: &str, out: &mut Vec<&'a Element>) {
    if element.local_name() == local_name {
        out.push(element);
    }
    for child in element.child_elements() {
        collect_named(child, local_name, out);
    }
}

fn visit_named_mut<E, F>(
    element: &mut Element,
    local_name: &str,
    path: &mut String,
    visited: &mut usize,
    f: &mut F,
) -> Result<(), E>
where
    F: FnMut(&str, &mut Element) -> Result<(), E>,
{
    let mark = path.len();
    path.push('/');
    path.push_str(element.name());

    if element.local_name() == local_name {
        *visited += 1;
        f(path.as_str(), element)?;
    }
    for child in element.child_elements_mut() {
        visit_named_mut(child, local_name, path, visited, f)?;
    }

    path.truncate(mark);
    Ok(())
}

fn visit_all_mut<F>(element: &mut Element, f: &mut F)
where
    F: FnMut(&mut Element),
{
    f(element);
    for child in element.child_elements_mut() {
        visit_all_mut(child, f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NS: &str = "http://genldap.coe.cordys.com/1.2/configuration";

    #[test]
    fn test_descendants_named_in_document_order() {
        let root = Element::parse(
            "<configuration><server><password>a</password></server><ns:password xmlns:ns=\"urn:x\">b</ns:password></configuration>",
        )
        .unwrap();

        let found: Vec<String> = root
            .descendants_named("password")
            .iter()
            .map(|e| e.text())
            .collect();
        assert_eq!(found, vec!["a", "b"]);
    }

    #[test]
    fn test_find_configuration_requires_server_child() {
        let root = Element::parse(
            "<wrapper><configuration><port/></configuration><configuration id=\"2\"><server/></configuration></wrapper>",
        )
        .unwrap();

        let located = find_configuration(&root, None).unwrap();
        assert_eq!(located.element.attribute("id"), Some("2"));

        let none = Element::parse("<configuration><port/></configuration>").unwrap();
        assert!(find_configuration(&none, None).is_none());
    }

    #[test]
    fn test_find_configuration_with_namespace() {
        let xml = format!(
            "<root xmlns:ns=\"{NS}\"><configuration><server/></configuration><ns:configuration><ns:server/></ns:configuration></root>"
        );
        let root = Element::parse(&xml).unwrap();

        let located = find_configuration(&root, Some(NS)).unwrap();
        assert_eq!(located.element.name(), "ns:configuration");

        let loose = find_configuration(&root, None).unwrap();
        assert_eq!(loose.element.name(), "configuration");
    }

    #[test]
    fn test_detach_carries_inherited_namespaces() {
        let xml = format!(
            "<root xmlns=\"{NS}\" xmlns:unused=\"urn:u\" xmlns:clientattr=\"urn:c\"><configuration><server clientattr:sync_id=\"1\"/></configuration></root>"
        );
        let root = Element::parse(&xml).unwrap();
        let detached = find_configuration(&root, Some(NS)).unwrap().detach();

        assert_eq!(detached.declared_namespace(None), Some(NS));
        assert_eq!(detached.declared_namespace(Some("clientattr")), Some("urn:c"));
        assert_eq!(detached.declared_namespace(Some("unused")), None);
    }

    #[test]
    fn test_detach_keeps_own_declaration() {
        let root = Element::parse(
            "<root xmlns=\"urn:outer\"><configuration xmlns=\"urn:inner\"><server/></configuration></root>",
        )
        .unwrap();
        let detached = find_configuration(&root, None).unwrap().detach();
        assert_eq!(
            detached.to_xml_string(),
            "<configuration xmlns=\"urn:inner\"><server/></configuration>"
        );
    }

    #[test]
    fn test_try_for_each_named_mut_reports_paths() {
        let mut root =
            Element::parse("<configuration><server><password>x</password></server></configuration>")
                .unwrap();

        let mut paths = Vec::new();
        let visited = root
            .try_for_each_named_mut("password", |path, el| {
                paths.push(path.to_string());
                el.set_text("y");
                Ok::<(), ()>(())
            })
            .unwrap();

        assert_eq!(visited, 1);
        assert_eq!(paths, vec!["/configuration/server/password"]);
        assert_eq!(root.descendants_named("password")[0].text(), "y");

        let err = root.try_for_each_named_mut("password", |path, _| Err(path.to_string()));
        assert_eq!(err, Err("/configuration/server/password".to_string()));
    }
}
