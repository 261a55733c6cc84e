//! Generic XML to loosely-typed tree conversion.
//!
//! The tree is a `serde_json::Value` laid out the way generic XML-to-object
//! mappers lay it out:
//!
//! * attributes become string entries keyed `@_<name>`,
//! * text content becomes a `#text` entry (trimmed, CDATA included),
//! * an element with neither attributes nor children collapses to its text,
//!   which is `""` for an empty element,
//! * a child element that appears once is stored as a single value, one that
//!   repeats is stored as an array.
//!
//! The last two rules are what the schema validator normalizes away.

use crate::error::XmlError;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde_json::{Map, Value};

pub const ATTRIBUTE_PREFIX: &str = "@_";
pub const TEXT_KEY: &str = "#text";

struct OpenElement {
    name: String,
    fields: Map<String, Value>,
    text: String,
}

/// Parse `xml` into a map from root element name to its tree.
///
/// Elements nested deeper than `max_depth` are rejected as malformed.
pub fn parse_document(xml: &str, max_depth: usize) -> Result<Map<String, Value>, XmlError> {
    let mut reader = Reader::from_str(xml);
    let mut document = Map::new();
    let mut stack: Vec<OpenElement> = Vec::new();

    loop {
        let position = reader.buffer_position() as u64;
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                if stack.len() >= max_depth {
                    return Err(XmlError::Syntax {
                        position,
                        message: format!("elements nested deeper than {max_depth} levels"),
                    });
                }
                stack.push(open_element(&start, position)?);
            }
            Ok(Event::Empty(start)) => {
                let element = open_element(&start, position)?;
                close_element(element, &mut stack, &mut document);
            }
            Ok(Event::End(_)) => {
                let element = stack.pop().ok_or_else(|| XmlError::Syntax {
                    position,
                    message: "closing tag without matching opening tag".to_string(),
                })?;
                close_element(element, &mut stack, &mut document);
            }
            Ok(Event::Text(text)) => {
                if let Some(open) = stack.last_mut() {
                    let text = text.unescape().map_err(|err| syntax(position, err))?;
                    open.text.push_str(&text);
                }
            }
            Ok(Event::CData(cdata)) => {
                if let Some(open) = stack.last_mut() {
                    let text = std::str::from_utf8(&cdata).map_err(|err| syntax(position, err))?;
                    open.text.push_str(text);
                }
            }
            Ok(Event::Eof) => break,
            // declarations, comments, processing instructions, doctype
            Ok(_) => {}
            Err(err) => return Err(syntax(reader.error_position() as u64, err)),
        }
    }

    if let Some(open) = stack.last() {
        return Err(XmlError::Syntax {
            position: reader.buffer_position() as u64,
            message: format!("element <{}> is never closed", open.name),
        });
    }
    Ok(document)
}

fn syntax(position: u64, err: impl std::fmt::Display) -> XmlError {
    XmlError::Syntax {
        position,
        message: err.to_string(),
    }
}

fn open_element(start: &BytesStart<'_>, position: u64) -> Result<OpenElement, XmlError> {
    let name = std::str::from_utf8(start.name().as_ref())
        .map_err(|err| syntax(position, err))?
        .to_string();

    let mut fields = Map::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|err| syntax(position, err))?;
        let key = std::str::from_utf8(attribute.key.as_ref()).map_err(|err| syntax(position, err))?;
        let value = attribute
            .unescape_value()
            .map_err(|err| syntax(position, err))?;
        fields.insert(
            format!("{ATTRIBUTE_PREFIX}{key}"),
            Value::String(value.into_owned()),
        );
    }

    Ok(OpenElement {
        name,
        fields,
        text: String::new(),
    })
}

fn close_element(
    element: OpenElement,
    stack: &mut [OpenElement],
    document: &mut Map<String, Value>,
) {
    let OpenElement {
        name,
        mut fields,
        text,
    } = element;
    let text = text.trim();

    let value = if fields.is_empty() {
        Value::String(text.to_string())
    } else {
        if !text.is_empty() {
            fields.insert(TEXT_KEY.to_string(), Value::String(text.to_string()));
        }
        Value::Object(fields)
    };

    match stack.last_mut() {
        Some(parent) => insert_child(&mut parent.fields, name, value),
        None => insert_child(document, name, value),
    }
}

fn insert_child(fields: &mut Map<String, Value>, name: String, value: Value) {
    match fields.get_mut(&name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            fields.insert(name, value);
        }
    }
}
