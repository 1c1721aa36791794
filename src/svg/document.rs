//! In-memory SVG element tree.
//!
//! The whole document is read with `quick-xml` into owned `Element`s before
//! any pipeline phase runs; the reader is dropped as soon as the tree is
//! complete.

use std::fs;
use std::path::Path;

use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, BytesStart, Event};
use quick_xml::Reader;

use crate::error::MapError;
use crate::geometry::Point;

/// Attribute holding an element's Inkscape label.
pub const LABEL_ATTR: &str = "inkscape:label";

/// One XML element with its attributes, children and direct text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    /// Local tag name, without namespace prefix (`path`, `g`, `tspan`, ...).
    pub name: String,
    /// Attributes keyed by their qualified name (`id`, `inkscape:label`, ...).
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
    pub text: String,
}

impl Element {
    /// Returns the value of attribute `key`, if present.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// Returns the Inkscape label, trimmed; None if absent or blank.
    pub fn label(&self) -> Option<&str> {
        self.attr(LABEL_ATTR)
            .map(str::trim)
            .filter(|l| !l.is_empty())
    }

    /// Parses a numeric attribute. Missing or malformed values yield None.
    pub fn number_attr(&self, key: &str) -> Option<f64> {
        self.attr(key)?.trim().parse().ok()
    }

    /// Returns this element's own `translate(..)` offset.
    pub fn translation(&self) -> Result<Point, MapError> {
        match self.attr("transform") {
            Some(t) => parse_translate(t),
            None => Ok(Point::ORIGIN),
        }
    }

    /// Returns the fill color from the `fill` attribute or the `fill:`
    /// entry of the `style` attribute, lower-cased.
    pub fn fill_color(&self) -> Option<String> {
        if let Some(style) = self.attr("style") {
            for decl in style.split(';') {
                if let Some((key, value)) = decl.split_once(':') {
                    if key.trim() == "fill" {
                        return Some(value.trim().to_ascii_lowercase());
                    }
                }
            }
        }
        self.attr("fill").map(|f| f.trim().to_ascii_lowercase())
    }

    /// Depth-first search for the first descendant with tag `name`.
    /// Returns it together with the translation accumulated below `self`
    /// (the descendant's own transform included, `self`'s excluded).
    pub fn find_descendant(&self, name: &str) -> Result<Option<(&Element, Point)>, MapError> {
        for child in &self.children {
            let offset = child.translation()?;
            if child.name == name {
                return Ok(Some((child, offset)));
            }
            if let Some((found, inner)) = child.find_descendant(name)? {
                return Ok(Some((found, offset + inner)));
            }
        }
        Ok(None)
    }

    /// Collects every descendant with tag `name`, in document order.
    pub fn descendants_named<'a>(&'a self, name: &str, out: &mut Vec<&'a Element>) {
        for child in &self.children {
            if child.name == name {
                out.push(child);
            }
            child.descendants_named(name, out);
        }
    }

    /// Concatenated text of this element and all of its descendants.
    pub fn text_content(&self) -> String {
        let mut text = self.text.clone();
        for child in &self.children {
            text.push_str(&child.text_content());
        }
        text
    }
}

/// A layer element found by id, with the translation of all its ancestors
/// and its own transform already summed.
#[derive(Debug, Clone, Copy)]
pub struct Layer<'a> {
    pub id: &'a str,
    pub element: &'a Element,
    pub offset: Point,
}

impl<'a> Layer<'a> {
    /// Iterates the layer's direct children with their absolute offset
    /// (layer offset plus the child's own transform).
    pub fn children(&self) -> impl Iterator<Item = Result<(&'a Element, Point), MapError>> + 'a {
        let base = self.offset;
        self.element
            .children
            .iter()
            .map(move |child| Ok((child, base + child.translation()?)))
    }
}

/// A fully parsed SVG document.
#[derive(Debug, Clone)]
pub struct Document {
    pub root: Element,
}

impl Document {
    /// Reads and parses the document at `path`.
    pub fn load(path: &Path) -> Result<Document, MapError> {
        let text = fs::read_to_string(path)?;
        Document::parse(&text)
    }

    /// Parses SVG text into an element tree.
    pub fn parse(xml: &str) -> Result<Document, MapError> {
        let mut reader = Reader::from_str(xml);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => stack.push(element_from_start(e)?),
                Ok(Event::Empty(ref e)) => {
                    let element = element_from_start(e)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::End(_)) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| MapError::Xml("unbalanced closing tag".to_string()))?;
                    attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::Text(e)) => {
                    let text = e.xml_content().map_err(xml_error)?;
                    if let Some(top) = stack.last_mut() {
                        top.text.push_str(&text);
                    }
                }
                Ok(Event::GeneralRef(e)) => {
                    let text = resolve_reference(&e)?;
                    if let Some(top) = stack.last_mut() {
                        top.text.push_str(&text);
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(MapError::Xml(format!(
                        "at byte {}: {}",
                        reader.error_position(),
                        e
                    )))
                }
            }
        }

        if !stack.is_empty() {
            return Err(MapError::Xml(format!(
                "unclosed element '{}'",
                stack.last().map(|e| e.name.as_str()).unwrap_or_default()
            )));
        }
        let root = root.ok_or_else(|| MapError::Xml("document has no root element".to_string()))?;
        Ok(Document { root })
    }

    /// Finds the element with the given `id` and the translation accumulated
    /// from the root down to and including that element.
    pub fn layer<'a>(&'a self, id: &'a str) -> Result<Layer<'a>, MapError> {
        let root_offset = self.root.translation()?;
        if self.root.id() == Some(id) {
            return Ok(Layer {
                id,
                element: &self.root,
                offset: root_offset,
            });
        }
        match find_by_id(&self.root, id, root_offset)? {
            Some((element, offset)) => Ok(Layer {
                id,
                element,
                offset,
            }),
            None => Err(MapError::MissingLayer(id.to_string())),
        }
    }
}

fn find_by_id<'a>(
    parent: &'a Element,
    id: &str,
    offset: Point,
) -> Result<Option<(&'a Element, Point)>, MapError> {
    for child in &parent.children {
        let child_offset = offset + child.translation()?;
        if child.id() == Some(id) {
            return Ok(Some((child, child_offset)));
        }
        if let Some(found) = find_by_id(child, id, child_offset)? {
            return Ok(Some(found));
        }
    }
    Ok(None)
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<(), MapError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(MapError::Xml("multiple root elements".to_string())),
    }
    Ok(())
}

fn element_from_start(start: &BytesStart) -> Result<Element, MapError> {
    let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attr in start.attributes().with_checks(false) {
        let attr = attr.map_err(xml_error)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().map_err(xml_error)?.into_owned();
        attributes.push((key, value));
    }
    Ok(Element {
        name,
        attributes,
        children: Vec::new(),
        text: String::new(),
    })
}

/// Expands a character reference (`&#39;`) or a predefined entity (`&amp;`).
fn resolve_reference(r: &BytesRef) -> Result<String, MapError> {
    if let Some(c) = r.resolve_char_ref().map_err(xml_error)? {
        return Ok(c.to_string());
    }
    let name = r.decode().map_err(xml_error)?;
    resolve_predefined_entity(&name)
        .map(str::to_string)
        .ok_or_else(|| MapError::Xml(format!("unknown entity '&{};'", name)))
}

fn xml_error(e: impl std::fmt::Display) -> MapError {
    MapError::Xml(e.to_string())
}

/// Parses `translate(tx,ty)`, `translate(tx ty)` or `translate(tx)`.
pub fn parse_translate(transform: &str) -> Result<Point, MapError> {
    let unsupported = || MapError::UnsupportedTransform(transform.to_string());
    let t = transform.trim();
    if t.is_empty() {
        return Ok(Point::ORIGIN);
    }
    let args = t
        .strip_prefix("translate")
        .map(str::trim_start)
        .and_then(|rest| rest.strip_prefix('('))
        .and_then(|rest| rest.trim_end().strip_suffix(')'))
        .ok_or_else(unsupported)?;

    let values = args
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f64>().map_err(|_| unsupported()))
        .collect::<Result<Vec<f64>, MapError>>()?;

    match values.as_slice() {
        [tx] => Ok(Point::new(*tx, 0.0)),
        [tx, ty] => Ok(Point::new(*tx, *ty)),
        _ => Err(unsupported()),
    }
}
