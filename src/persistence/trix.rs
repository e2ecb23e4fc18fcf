//! TriX (XML) reader and writer
//!
//! ```xml
//! <TriX xmlns="http://www.w3.org/2004/03/trix/trix-1/">
//!   <graph>
//!     <uri>http://example.org/graph</uri>
//!     <triple>
//!       <uri>http://example.org/alice</uri>
//!       <uri>http://xmlns.com/foaf/0.1/name</uri>
//!       <plainLiteral xml:lang="en">Alice</plainLiteral>
//!     </triple>
//!   </graph>
//! </TriX>
//! ```
//!
//! Blank nodes are written as `<id>`. A graph without a name element lands
//! in the default context.

use crate::model::{BlankNode, Literal, NamedNode, Quadruple, Resource, Term};
use crate::store::{StoreError, StoreResult};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::io::{BufRead, Write};

pub const TRIX_NAMESPACE: &str = "http://www.w3.org/2004/03/trix/trix-1/";

/// Term element being read
#[derive(Debug)]
enum TermElement {
    Uri,
    Id,
    PlainLiteral { language: Option<String> },
    TypedLiteral { datatype: String },
}

impl TermElement {
    fn open(element: &BytesStart<'_>) -> StoreResult<Option<Self>> {
        Ok(match element.local_name().as_ref() {
            b"uri" => Some(TermElement::Uri),
            b"id" => Some(TermElement::Id),
            b"plainLiteral" => Some(TermElement::PlainLiteral {
                language: attribute(element, b"xml:lang")?,
            }),
            b"typedLiteral" => {
                let datatype = attribute(element, b"datatype")?
                    .ok_or_else(|| xml_error("typedLiteral without datatype attribute"))?;
                Some(TermElement::TypedLiteral { datatype })
            }
            _ => None,
        })
    }

    fn close(self, text: String) -> StoreResult<Term> {
        Ok(match self {
            TermElement::Uri => Term::from(NamedNode::new(text.trim())?),
            TermElement::Id => Term::from(BlankNode::from_id(text.trim())?),
            TermElement::PlainLiteral { language: Some(language) } => {
                Term::from(Literal::new_language_tagged_literal(text, language)?)
            }
            TermElement::PlainLiteral { language: None } => Term::from(Literal::new_simple_literal(text)),
            TermElement::TypedLiteral { datatype } => {
                Term::from(Literal::new_typed_literal(text, NamedNode::new(datatype.trim())?))
            }
        })
    }
}

/// Parse a TriX document, handing each quadruple to `sink`
pub fn read_trix<R: BufRead>(
    reader: R,
    default_context: &Resource,
    mut sink: impl FnMut(Quadruple),
) -> StoreResult<()> {
    let mut reader = Reader::from_reader(reader);
    let mut buf = Vec::new();

    let mut in_graph = false;
    let mut graph_name: Option<Resource> = None;
    let mut triple: Option<Vec<Term>> = None;
    let mut element: Option<TermElement> = None;
    let mut text = String::new();

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| xml_error(format!("at position {}: {}", reader.buffer_position(), e)))?;
        match event {
            Event::Start(ref e) => match e.local_name().as_ref() {
                b"graph" => {
                    in_graph = true;
                    graph_name = None;
                }
                b"triple" => triple = Some(Vec::with_capacity(3)),
                _ => {
                    element = TermElement::open(e)?;
                    text.clear();
                }
            },
            Event::Empty(ref e) => {
                if let Some(empty) = TermElement::open(e)? {
                    let term = empty.close(String::new())?;
                    place_term(term, in_graph, &mut graph_name, &mut triple)?;
                }
            }
            Event::Text(ref e) => {
                if element.is_some() {
                    let unescaped = e.unescape().map_err(|e| xml_error(e.to_string()))?;
                    text.push_str(&unescaped);
                }
            }
            Event::CData(e) => {
                if element.is_some() {
                    let raw = String::from_utf8(e.into_inner().into_owned())
                        .map_err(|e| xml_error(e.to_string()))?;
                    text.push_str(&raw);
                }
            }
            Event::End(ref e) => match e.local_name().as_ref() {
                b"graph" => {
                    in_graph = false;
                    graph_name = None;
                }
                b"triple" => {
                    let terms = triple.take().unwrap_or_default();
                    let context = graph_name.clone().unwrap_or_else(|| default_context.clone());
                    sink(build_quadruple(context, terms)?);
                }
                _ => {
                    if let Some(open) = element.take() {
                        let term = open.close(std::mem::take(&mut text))?;
                        place_term(term, in_graph, &mut graph_name, &mut triple)?;
                    }
                }
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(())
}

/// A term is either part of the current triple or, before any triple, the graph name
fn place_term(
    term: Term,
    in_graph: bool,
    graph_name: &mut Option<Resource>,
    triple: &mut Option<Vec<Term>>,
) -> StoreResult<()> {
    match triple {
        Some(terms) => terms.push(term),
        None if in_graph && graph_name.is_none() => match term {
            Term::Resource(resource) => *graph_name = Some(resource),
            Term::Literal(l) => return Err(xml_error(format!("literal graph name {}", l))),
        },
        None => return Err(xml_error(format!("unexpected term {}", term))),
    }
    Ok(())
}

fn build_quadruple(context: Resource, terms: Vec<Term>) -> StoreResult<Quadruple> {
    let [subject, predicate, object]: [Term; 3] = terms
        .try_into()
        .map_err(|terms: Vec<Term>| xml_error(format!("triple with {} terms", terms.len())))?;
    let subject = match subject {
        Term::Resource(resource) => resource,
        Term::Literal(l) => return Err(xml_error(format!("literal subject {}", l))),
    };
    let predicate = match predicate {
        Term::Resource(Resource::NamedNode(node)) => node,
        other => return Err(xml_error(format!("predicate {} is not an IRI", other))),
    };
    Ok(Quadruple::new(context, subject, predicate, object))
}

/// Write quadruples as TriX; consecutive quadruples of one context share a `<graph>`
pub fn write_trix<'a, W: Write>(
    quadruples: impl IntoIterator<Item = &'a Quadruple>,
    writer: W,
) -> StoreResult<W> {
    let mut writer = Writer::new_with_indent(writer, b' ', 2);
    write(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    let mut root = BytesStart::new("TriX");
    root.push_attribute(("xmlns", TRIX_NAMESPACE));
    write(&mut writer, Event::Start(root))?;

    let mut current: Option<&Resource> = None;
    for quadruple in quadruples {
        if current != Some(quadruple.context()) {
            if current.is_some() {
                write(&mut writer, Event::End(BytesEnd::new("graph")))?;
            }
            write(&mut writer, Event::Start(BytesStart::new("graph")))?;
            write_resource(&mut writer, quadruple.context())?;
            current = Some(quadruple.context());
        }
        write(&mut writer, Event::Start(BytesStart::new("triple")))?;
        write_resource(&mut writer, quadruple.subject())?;
        write_element(&mut writer, BytesStart::new("uri"), quadruple.predicate().as_str())?;
        match quadruple.object() {
            Term::Resource(resource) => write_resource(&mut writer, resource)?,
            Term::Literal(literal) => write_literal(&mut writer, literal)?,
        }
        write(&mut writer, Event::End(BytesEnd::new("triple")))?;
    }
    if current.is_some() {
        write(&mut writer, Event::End(BytesEnd::new("graph")))?;
    }
    write(&mut writer, Event::End(BytesEnd::new("TriX")))?;

    let mut inner = writer.into_inner();
    inner.write_all(b"\n")?;
    Ok(inner)
}

fn write_resource<W: Write>(writer: &mut Writer<W>, resource: &Resource) -> StoreResult<()> {
    match resource {
        Resource::NamedNode(node) => write_element(writer, BytesStart::new("uri"), node.as_str()),
        Resource::BlankNode(node) => write_element(writer, BytesStart::new("id"), node.as_str()),
    }
}

fn write_literal<W: Write>(writer: &mut Writer<W>, literal: &Literal) -> StoreResult<()> {
    if literal.is_plain() {
        let mut start = BytesStart::new("plainLiteral");
        if let Some(language) = literal.language() {
            start.push_attribute(("xml:lang", language));
        }
        write_element(writer, start, literal.value())
    } else {
        let mut start = BytesStart::new("typedLiteral");
        start.push_attribute(("datatype", literal.inner().datatype().as_str()));
        write_element(writer, start, literal.value())
    }
}

fn write_element<W: Write>(writer: &mut Writer<W>, start: BytesStart<'_>, text: &str) -> StoreResult<()> {
    let end = BytesEnd::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());
    write(writer, Event::Start(start))?;
    write(writer, Event::Text(BytesText::new(text)))?;
    write(writer, Event::End(end))
}

fn write<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> StoreResult<()> {
    writer
        .write_event(event)
        .map_err(|e| StoreError::Xml(e.to_string()))
}

fn attribute(element: &BytesStart<'_>, name: &[u8]) -> StoreResult<Option<String>> {
    for attr in element.attributes() {
        let attr = attr.map_err(|e| xml_error(e.to_string()))?;
        if attr.key.as_ref() == name {
            let value = attr.unescape_value().map_err(|e| xml_error(e.to_string()))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn xml_error(reason: impl Into<String>) -> StoreError {
    StoreError::Xml(reason.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_context() -> Resource {
        Resource::parse("urn:test:default").unwrap()
    }

    fn read(document: &str) -> StoreResult<Vec<Quadruple>> {
        let mut quads = Vec::new();
        read_trix(document.as_bytes(), &default_context(), |q| quads.push(q))?;
        Ok(quads)
    }

    #[test]
    fn test_read_graphs() {
        let document = r#"<?xml version="1.0"?>
<TriX xmlns="http://www.w3.org/2004/03/trix/trix-1/">
  <graph>
    <uri>http://example.org/g</uri>
    <triple>
      <uri>http://example.org/alice</uri>
      <uri>http://xmlns.com/foaf/0.1/name</uri>
      <plainLiteral xml:lang="en">Alice &amp; co</plainLiteral>
    </triple>
    <triple>
      <id>b0</id>
      <uri>http://example.org/age</uri>
      <typedLiteral datatype="http://www.w3.org/2001/XMLSchema#integer">42</typedLiteral>
    </triple>
  </graph>
  <graph>
    <triple>
      <uri>http://example.org/s</uri>
      <uri>http://example.org/p</uri>
      <plainLiteral/>
    </triple>
  </graph>
</TriX>"#;
        let quads = read(document).unwrap();
        assert_eq!(quads.len(), 3);

        assert_eq!(quads[0].context().to_string(), "<http://example.org/g>");
        assert_eq!(quads[0].literal().map(|l| l.value()), Some("Alice & co"));
        assert!(quads[1].subject().is_blank_node());
        assert!(quads[1].literal().map_or(false, |l| l.is_typed()));
        assert_eq!(quads[2].context(), &default_context());
        assert_eq!(quads[2].literal().map(|l| l.value()), Some(""));
    }

    #[test]
    fn test_malformed_triple() {
        let document = "<TriX><graph><triple><uri>http://example.org/s</uri></triple></graph></TriX>";
        assert!(matches!(read(document), Err(StoreError::Xml(_))));

        let document = "<TriX><graph><triple><plainLiteral>x</plainLiteral>\
                        <uri>http://example.org/p</uri><uri>http://example.org/o</uri></triple></graph></TriX>";
        assert!(matches!(read(document), Err(StoreError::Xml(_))));
    }

    #[test]
    fn test_write_then_read() {
        let quads = vec![
            Quadruple::new(
                NamedNode::new("http://example.org/g").unwrap(),
                NamedNode::new("http://example.org/s").unwrap(),
                NamedNode::new("http://example.org/p").unwrap(),
                Literal::new_simple_literal("<tag> & \"quotes\""),
            ),
            Quadruple::new(
                NamedNode::new("http://example.org/g").unwrap(),
                BlankNode::from_id("x1").unwrap(),
                NamedNode::new("http://example.org/p").unwrap(),
                Literal::new_language_tagged_literal("chat", "fr").unwrap(),
            ),
        ];
        let output = String::from_utf8(write_trix(&quads, Vec::new()).unwrap()).unwrap();
        assert_eq!(output.matches("<graph>").count(), 1);

        assert_eq!(read(&output).unwrap(), quads);
    }
}
