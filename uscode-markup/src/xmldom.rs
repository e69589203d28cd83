//! A minimal generic XML DOM, used as the common substrate for both parsing
//! modes (C2). Namespace prefixes are stripped from tag and attribute names
//! at parse time so callers match on local names only — this is how the
//! parser tolerates both the prefixed (`uslm:section`) and unprefixed
//! (`section`) forms emitted across release-point eras (spec.md §4.2).

use crate::error::ParseError;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct XmlNode {
    pub tag: String,
    pub attrs: HashMap<String, String>,
    pub children: Vec<XmlChild>,
}

#[derive(Debug, Clone)]
pub enum XmlChild {
    Element(XmlNode),
    Text(String),
}

impl XmlNode {
    /// Flattens all descendant text nodes into one plain-text string,
    /// separated by single spaces and collapsed — the basis for
    /// `text_content`.
    pub fn flatten_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                XmlChild::Text(t) => {
                    out.push_str(t);
                    out.push(' ');
                }
                XmlChild::Element(e) => e.collect_text(out),
            }
        }
    }

    /// Returns the first direct child element with the given local tag
    /// name.
    pub fn child(&self, tag: &str) -> Option<&XmlNode> {
        self.children.iter().find_map(|c| match c {
            XmlChild::Element(e) if e.tag == tag => Some(e),
            _ => None,
        })
    }

    /// Returns all direct child elements with the given local tag name.
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a XmlNode> {
        self.children.iter().filter_map(move |c| match c {
            XmlChild::Element(e) if e.tag == tag => Some(e),
            _ => None,
        })
    }

    /// Returns all direct child elements, regardless of tag.
    pub fn elements(&self) -> impl Iterator<Item = &XmlNode> {
        self.children.iter().filter_map(|c| match c {
            XmlChild::Element(e) => Some(e),
            _ => None,
        })
    }
}

fn local_name(qname: &[u8]) -> String {
    let s = String::from_utf8_lossy(qname);
    match s.find(':') {
        Some(idx) => s[idx + 1..].to_string(),
        None => s.into_owned(),
    }
}

fn local_attr_name(qname: &[u8]) -> Option<String> {
    let s = String::from_utf8_lossy(qname);
    if s.as_ref() == "xmlns" || s.starts_with("xmlns:") {
        return None;
    }
    Some(match s.find(':') {
        Some(idx) => s[idx + 1..].to_string(),
        None => s.into_owned(),
    })
}

/// Parses a complete XML document into a single root [`XmlNode`].
pub fn parse_xml(bytes: &[u8]) -> Result<XmlNode, ParseError> {
    let mut reader = Reader::from_reader(bytes);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Err(e) => return Err(ParseError::Malformed(e.to_string())),
            Ok(Event::Eof) => break,
            Ok(Event::Start(e)) => {
                let tag = local_name(e.name().as_ref());
                let mut attrs = HashMap::new();
                for attr in e.attributes().flatten() {
                    if let Some(name) = local_attr_name(attr.key.as_ref()) {
                        let value = attr
                            .decode_and_unescape_value(reader.decoder())
                            .unwrap_or_default()
                            .into_owned();
                        attrs.insert(name, value);
                    }
                }
                stack.push(XmlNode {
                    tag,
                    attrs,
                    children: Vec::new(),
                });
            }
            Ok(Event::Empty(e)) => {
                let tag = local_name(e.name().as_ref());
                let mut attrs = HashMap::new();
                for attr in e.attributes().flatten() {
                    if let Some(name) = local_attr_name(attr.key.as_ref()) {
                        let value = attr
                            .decode_and_unescape_value(reader.decoder())
                            .unwrap_or_default()
                            .into_owned();
                        attrs.insert(name, value);
                    }
                }
                let node = XmlNode {
                    tag,
                    attrs,
                    children: Vec::new(),
                };
                push_child(&mut stack, &mut root, XmlChild::Element(node));
            }
            Ok(Event::End(_)) => {
                if let Some(finished) = stack.pop() {
                    push_child(&mut stack, &mut root, XmlChild::Element(finished));
                }
            }
            Ok(Event::Text(t)) => {
                let text = t.unescape().unwrap_or_default().into_owned();
                if !text.trim().is_empty() {
                    push_child(&mut stack, &mut root, XmlChild::Text(text));
                }
            }
            Ok(Event::CData(t)) => {
                let text = String::from_utf8_lossy(t.as_ref()).into_owned();
                push_child(&mut stack, &mut root, XmlChild::Text(text));
            }
            _ => {}
        }
    }

    root.ok_or_else(|| ParseError::Malformed("document has no root element".into()))
}

fn push_child(stack: &mut Vec<XmlNode>, root: &mut Option<XmlNode>, child: XmlChild) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(child);
    } else if let XmlChild::Element(e) = child {
        *root = Some(e);
    }
}
