//! XML-RPC wire codec.
//!
//! Encodes `methodCall` documents and decodes `methodResponse` documents,
//! including faults. Decoding builds a small element tree with quick-xml and
//! then reads values out of it; text inside `<string>` and untyped `<value>`
//! elements is kept exactly, whitespace included.

use base64::{engine::general_purpose, Engine as _};
use quick_xml::events::{BytesStart, Event};
use quick_xml::escape::escape;
use quick_xml::Reader;

use pypinfo_core::error::PypiError;
use pypinfo_core::types::{Record, Value};

use crate::RegistryResult;

/// Encode a `methodCall` document
pub fn encode_call(method: &str, params: &[Value]) -> String {
    let mut xml = String::with_capacity(128);
    xml.push_str("<?xml version=\"1.0\"?>\n<methodCall><methodName>");
    xml.push_str(&escape(method));
    xml.push_str("</methodName><params>");
    for param in params {
        xml.push_str("<param>");
        write_value(&mut xml, param);
        xml.push_str("</param>");
    }
    xml.push_str("</params></methodCall>\n");
    xml
}

/// Encode a successful `methodResponse` carrying one value
pub fn encode_response(value: &Value) -> String {
    let mut xml = String::from("<?xml version=\"1.0\"?>\n<methodResponse><params><param>");
    write_value(&mut xml, value);
    xml.push_str("</param></params></methodResponse>\n");
    xml
}

/// Encode a fault `methodResponse`
pub fn encode_fault(code: i64, message: &str) -> String {
    let mut record = Record::new();
    record.insert("faultCode".to_string(), Value::Int(code));
    record.insert("faultString".to_string(), Value::from(message));

    let mut xml = String::from("<?xml version=\"1.0\"?>\n<methodResponse><fault>");
    write_value(&mut xml, &Value::Struct(record));
    xml.push_str("</fault></methodResponse>\n");
    xml
}

fn write_value(xml: &mut String, value: &Value) {
    xml.push_str("<value>");
    match value {
        Value::Int(i) => {
            // <int> is 32-bit; wider values need the i8 extension
            let tag = if i32::try_from(*i).is_ok() { "int" } else { "i8" };
            push_element(xml, tag, &i.to_string());
        },
        Value::Bool(b) => push_element(xml, "boolean", if *b { "1" } else { "0" }),
        Value::String(s) => push_element(xml, "string", &escape(s)),
        Value::Double(d) => push_element(xml, "double", &d.to_string()),
        Value::DateTime(s) => push_element(xml, "dateTime.iso8601", &escape(s)),
        Value::Base64(bytes) => {
            push_element(xml, "base64", &general_purpose::STANDARD.encode(bytes))
        },
        Value::Struct(record) => {
            xml.push_str("<struct>");
            for (name, member) in record {
                xml.push_str("<member><name>");
                xml.push_str(&escape(name));
                xml.push_str("</name>");
                write_value(xml, member);
                xml.push_str("</member>");
            }
            xml.push_str("</struct>");
        },
        Value::Array(items) => {
            xml.push_str("<array><data>");
            for item in items {
                write_value(xml, item);
            }
            xml.push_str("</data></array>");
        },
        Value::Nil => xml.push_str("<nil/>"),
    }
    xml.push_str("</value>");
}

fn push_element(xml: &mut String, tag: &str, text: &str) {
    xml.push('<');
    xml.push_str(tag);
    xml.push('>');
    xml.push_str(text);
    xml.push_str("</");
    xml.push_str(tag);
    xml.push('>');
}

/// Decode a `methodResponse` body.
///
/// A `<fault>` response becomes `PypiError::Fault`.
pub fn decode_response(body: &str) -> RegistryResult<Value> {
    let root = parse_document(body)?;
    if root.name != "methodResponse" {
        return Err(invalid(format!("expected methodResponse, found <{}>", root.name)));
    }

    let outcome = root
        .children
        .first()
        .ok_or_else(|| invalid("empty methodResponse".to_string()))?;

    match outcome.name.as_str() {
        "params" => {
            let param = outcome.child("param")?;
            parse_value(param.child("value")?)
        },
        "fault" => Err(fault_from(parse_value(outcome.child("value")?)?)),
        other => Err(invalid(format!("unexpected <{}> in methodResponse", other))),
    }
}

fn fault_from(value: Value) -> PypiError {
    let record = match value {
        Value::Struct(record) => record,
        other => return invalid(format!("fault is a {}, not a struct", other.type_name())),
    };
    match (
        record.get("faultCode").and_then(Value::as_i64),
        record.get("faultString").and_then(Value::as_str),
    ) {
        (Some(code), Some(message)) => PypiError::Fault {
            code,
            message: message.to_string(),
        },
        _ => invalid("fault struct lacks faultCode or faultString".to_string()),
    }
}

fn invalid(message: String) -> PypiError {
    PypiError::Xml {
        message,
        source: None,
    }
}

/// Element tree node; namespace prefixes are dropped from names
#[derive(Debug)]
struct Element {
    name: String,
    children: Vec<Element>,
    text: String,
}

impl Element {
    fn new(start: &BytesStart<'_>) -> Self {
        Self {
            name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
            children: Vec::new(),
            text: String::new(),
        }
    }

    fn child(&self, name: &str) -> RegistryResult<&Element> {
        self.children
            .iter()
            .find(|child| child.name == name)
            .ok_or_else(|| invalid(format!("<{}> has no <{}>", self.name, name)))
    }
}

fn parse_document(body: &str) -> RegistryResult<Element> {
    let mut reader = Reader::from_str(body);
    let mut stack: Vec<Element> = Vec::new();
    let mut root = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            PypiError::xml(format!("parse failed at byte {}: {}", reader.buffer_position(), e), e)
        })?;

        match event {
            Event::Start(start) => stack.push(Element::new(&start)),
            Event::Empty(start) => attach(&mut stack, &mut root, Element::new(&start))?,
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| invalid("unbalanced end tag".to_string()))?;
                attach(&mut stack, &mut root, element)?;
            },
            Event::Text(text) => {
                if let Some(open) = stack.last_mut() {
                    let text = text
                        .unescape()
                        .map_err(|e| PypiError::xml(format!("bad text: {}", e), e))?;
                    open.text.push_str(&text);
                }
            },
            Event::CData(data) => {
                if let Some(open) = stack.last_mut() {
                    open.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            },
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctypes
            _ => {},
        }
    }

    if let Some(open) = stack.last() {
        return Err(invalid(format!("unclosed <{}>", open.name)));
    }
    root.ok_or_else(|| invalid("empty document".to_string()))
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> RegistryResult<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(invalid(format!("second root element <{}>", element.name))),
    }
    Ok(())
}

fn parse_value(element: &Element) -> RegistryResult<Value> {
    // A <value> with no type element is a string
    let Some(typed) = element.children.first() else {
        return Ok(Value::String(element.text.clone()));
    };
    let text = typed.text.as_str();

    match typed.name.as_str() {
        "int" | "i4" | "i8" => text
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|e| PypiError::xml(format!("bad <{}> '{}'", typed.name, text), e)),
        "boolean" => match text.trim() {
            "1" => Ok(Value::Bool(true)),
            "0" => Ok(Value::Bool(false)),
            other => Err(invalid(format!("bad <boolean> '{}'", other))),
        },
        "string" => Ok(Value::String(text.to_string())),
        "double" => text
            .trim()
            .parse::<f64>()
            .map(Value::Double)
            .map_err(|e| PypiError::xml(format!("bad <double> '{}'", text), e)),
        "dateTime.iso8601" => Ok(Value::DateTime(text.trim().to_string())),
        "base64" => {
            let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
            general_purpose::STANDARD
                .decode(compact)
                .map(Value::Base64)
                .map_err(|e| PypiError::xml("bad <base64> payload".to_string(), e))
        },
        "struct" => {
            let mut record = Record::new();
            for member in typed.children.iter().filter(|c| c.name == "member") {
                let name = member.child("name")?.text.clone();
                record.insert(name, parse_value(member.child("value")?)?);
            }
            Ok(Value::Struct(record))
        },
        "array" => {
            // Some servers omit <data> for empty arrays
            let Some(data) = typed.children.iter().find(|c| c.name == "data") else {
                return Ok(Value::Array(Vec::new()));
            };
            data.children
                .iter()
                .filter(|c| c.name == "value")
                .map(parse_value)
                .collect::<RegistryResult<Vec<_>>>()
                .map(Value::Array)
        },
        "nil" => Ok(Value::Nil),
        other => Err(invalid(format!("unknown value type <{}>", other))),
    }
}
