//! Namespace-aware element tree and a small path query language over it.
//!
//! The tree keeps only what metadata checks need: resolved element names,
//! attributes, children in document order and concatenated character data.
//! Comments, processing instructions and the prolog are dropped. Text and
//! attribute values are decoded with the encoding the prolog declares.
//!
//! Paths look like `//ddi:codeBook/ddi:stdyDscr/ddi:IDNo`. A leading `//`
//! matches the first step anywhere (root included); every following step
//! selects children. Prefixes resolve through a fixed table, never through
//! the document's own declarations.

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum XmlError {
    #[error("xml syntax error at byte {position}: {message}")]
    Syntax { position: u64, message: String },
    #[error("undeclared namespace prefix on <{0}>")]
    UnboundPrefix(String),
    #[error("document has no root element")]
    NoRoot,
    #[error("document has more than one root element")]
    MultipleRoots,
    #[error("unclosed element <{0}> at end of input")]
    Unclosed(String),
    #[error("unknown namespace prefix '{0}' in path")]
    UnknownPathPrefix(String),
    #[error("invalid path: {0}")]
    InvalidPath(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub namespace: Option<String>,
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub namespace: Option<String>,
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Element>,
    pub text: String,
}

impl Element {
    /// Parse a complete document and return its root element.
    pub fn parse(bytes: &[u8]) -> Result<Element, XmlError> {
        let mut reader = NsReader::from_reader(bytes);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut open: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|e| syntax(&reader, e))?;
            match event {
                Event::Start(start) => {
                    let el = open_element(&reader, &start)?;
                    open.push(el);
                }
                Event::Empty(start) => {
                    let el = open_element(&reader, &start)?;
                    attach(&mut open, &mut root, el)?;
                }
                Event::End(_) => {
                    // quick-xml already rejects mismatched end tags.
                    let el = open.pop().ok_or_else(|| XmlError::Syntax {
                        position: reader.buffer_position() as u64,
                        message: "unexpected end tag".to_string(),
                    })?;
                    attach(&mut open, &mut root, el)?;
                }
                Event::Text(t) => {
                    if let Some(top) = open.last_mut() {
                        let text = t.unescape().map_err(|e| syntax(&reader, e))?;
                        top.text.push_str(&text);
                    }
                }
                Event::CData(c) => {
                    if let Some(top) = open.last_mut() {
                        let text = reader.decoder().decode(&c).map_err(|e| syntax(&reader, e))?;
                        top.text.push_str(&text);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if let Some(el) = open.pop() {
            return Err(XmlError::Unclosed(el.name));
        }
        root.ok_or(XmlError::NoRoot)
    }

    pub fn is(&self, namespace: Option<&str>, name: &str) -> bool {
        self.name == name && self.namespace.as_deref() == namespace
    }

    /// Value of an attribute with no namespace.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.namespace.is_none() && a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Detach the first element (document order, self included) with the given name.
    pub fn into_first_descendant(self, namespace: Option<&str>, name: &str) -> Option<Element> {
        if self.is(namespace, name) {
            return Some(self);
        }
        self.children
            .into_iter()
            .find_map(|c| c.into_first_descendant(namespace, name))
    }

    fn collect_descendants<'a>(&'a self, step: &Step, out: &mut Vec<&'a Element>) {
        if step.matches(self) {
            out.push(self);
        }
        for c in &self.children {
            c.collect_descendants(step, out);
        }
    }
}

fn syntax<B>(reader: &NsReader<B>, e: impl std::fmt::Display) -> XmlError {
    XmlError::Syntax {
        position: reader.buffer_position() as u64,
        message: e.to_string(),
    }
}

fn open_element<B>(reader: &NsReader<B>, start: &BytesStart<'_>) -> Result<Element, XmlError> {
    let (ns, local) = reader.resolve_element(start.name());
    let name = String::from_utf8_lossy(local.as_ref()).into_owned();
    let namespace = match ns {
        ResolveResult::Bound(ns) => Some(String::from_utf8_lossy(ns.as_ref()).into_owned()),
        ResolveResult::Unbound => None,
        ResolveResult::Unknown(_) => {
            return Err(XmlError::UnboundPrefix(
                String::from_utf8_lossy(start.name().as_ref()).into_owned(),
            ))
        }
    };

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| syntax(reader, e))?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let (ans, alocal) = reader.resolve_attribute(attr.key);
        let namespace = match ans {
            ResolveResult::Bound(ns) => Some(String::from_utf8_lossy(ns.as_ref()).into_owned()),
            ResolveResult::Unbound => None,
            ResolveResult::Unknown(_) => {
                return Err(XmlError::UnboundPrefix(
                    String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
                ))
            }
        };
        let value = attr
            .decode_and_unescape_value(reader.decoder())
            .map_err(|e| syntax(reader, e))?
            .into_owned();
        attributes.push(Attribute {
            namespace,
            name: String::from_utf8_lossy(alocal.as_ref()).into_owned(),
            value,
        });
    }

    Ok(Element {
        namespace,
        name,
        attributes,
        children: Vec::new(),
        text: String::new(),
    })
}

fn attach(open: &mut [Element], root: &mut Option<Element>, el: Element) -> Result<(), XmlError> {
    match open.last_mut() {
        Some(parent) => parent.children.push(el),
        None if root.is_some() => return Err(XmlError::MultipleRoots),
        None => *root = Some(el),
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    namespace: Option<String>,
    name: String,
}

impl Step {
    fn matches(&self, el: &Element) -> bool {
        el.is(self.namespace.as_deref(), &self.name)
    }
}

/// Compiled path with prefixes already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespacePath {
    anywhere: bool,
    steps: Vec<Step>,
}

impl NamespacePath {
    pub fn parse(path: &str, namespaces: &[(&str, &str)]) -> Result<Self, XmlError> {
        let (anywhere, rest) = match path.strip_prefix("//") {
            Some(rest) => (true, rest),
            None => (false, path.strip_prefix('/').unwrap_or(path)),
        };
        if rest.is_empty() {
            return Err(XmlError::InvalidPath(path.to_string()));
        }

        let mut steps = Vec::new();
        for raw in rest.split('/') {
            if raw.is_empty() {
                return Err(XmlError::InvalidPath(path.to_string()));
            }
            let step = match raw.split_once(':') {
                Some((prefix, name)) => {
                    let uri = namespaces
                        .iter()
                        .find(|(p, _)| *p == prefix)
                        .map(|(_, uri)| uri.to_string())
                        .ok_or_else(|| XmlError::UnknownPathPrefix(prefix.to_string()))?;
                    if name.is_empty() {
                        return Err(XmlError::InvalidPath(path.to_string()));
                    }
                    Step {
                        namespace: Some(uri),
                        name: name.to_string(),
                    }
                }
                None => Step {
                    namespace: None,
                    name: raw.to_string(),
                },
            };
            steps.push(step);
        }
        Ok(Self { anywhere, steps })
    }

    /// All matches in document order.
    pub fn select<'a>(&self, root: &'a Element) -> Vec<&'a Element> {
        let Some((first, rest)) = self.steps.split_first() else {
            return Vec::new();
        };

        let mut current = Vec::new();
        if self.anywhere {
            root.collect_descendants(first, &mut current);
        } else if first.matches(root) {
            current.push(root);
        }

        for step in rest {
            current = current
                .into_iter()
                .flat_map(|el| el.children.iter().filter(|c| step.matches(c)))
                .collect();
        }
        current
    }
}
