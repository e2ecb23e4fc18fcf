//! N-Quads and TriG through rio

use super::invalid_source;
use crate::model::{BlankNode, Literal, NamedNode, Quadruple, Resource, Term};
use crate::store::{StoreError, StoreResult};
use oxiri::Iri;
use rio_api::formatter::QuadsFormatter;
use rio_api::model as rio;
use rio_api::parser::QuadsParser;
use rio_turtle::{NQuadsFormatter, NQuadsParser, TriGFormatter, TriGParser};
use std::io::{BufRead, Write};

/// Parse N-Quads, handing each quadruple to `sink`
pub fn read_nquads<R: BufRead>(
    reader: R,
    default_context: &Resource,
    mut sink: impl FnMut(Quadruple),
) -> StoreResult<()> {
    let mut parser = NQuadsParser::new(reader);
    parser.parse_all(&mut |quad| -> StoreResult<()> {
        sink(convert_quad(&quad, default_context)?);
        Ok(())
    })
}

/// Parse TriG, handing each quadruple to `sink`
pub fn read_trig<R: BufRead>(
    reader: R,
    base_iri: Option<&str>,
    default_context: &Resource,
    mut sink: impl FnMut(Quadruple),
) -> StoreResult<()> {
    let base_iri = base_iri
        .map(|iri| {
            Iri::parse(iri.to_string()).map_err(|e| StoreError::InvalidSource {
                location: iri.to_string(),
                reason: format!("invalid base IRI: {}", e),
            })
        })
        .transpose()?;
    let mut parser = TriGParser::new(reader, base_iri);
    parser.parse_all(&mut |quad| -> StoreResult<()> {
        sink(convert_quad(&quad, default_context)?);
        Ok(())
    })
}

/// Write quadruples as N-Quads
pub fn write_nquads<'a, W: Write>(
    quadruples: impl IntoIterator<Item = &'a Quadruple>,
    writer: W,
) -> StoreResult<W> {
    let mut formatter = NQuadsFormatter::new(writer);
    for quadruple in quadruples {
        formatter.format(&rio_quad(quadruple))?;
    }
    Ok(formatter.finish()?)
}

/// Write quadruples as TriG; consecutive quadruples of one context share a graph block
pub fn write_trig<'a, W: Write>(
    quadruples: impl IntoIterator<Item = &'a Quadruple>,
    writer: W,
) -> StoreResult<W> {
    let mut formatter = TriGFormatter::new(writer);
    for quadruple in quadruples {
        formatter.format(&rio_quad(quadruple))?;
    }
    Ok(formatter.finish()?)
}

// Conversion from rio

fn convert_quad(quad: &rio::Quad<'_>, default_context: &Resource) -> StoreResult<Quadruple> {
    let context = match quad.graph_name {
        Some(rio::GraphName::NamedNode(n)) => Resource::from(NamedNode::new(n.iri)?),
        Some(rio::GraphName::BlankNode(b)) => Resource::from(BlankNode::from_id(b.id)?),
        None => default_context.clone(),
    };
    let subject = match quad.subject {
        rio::Subject::NamedNode(n) => Resource::from(NamedNode::new(n.iri)?),
        rio::Subject::BlankNode(b) => Resource::from(BlankNode::from_id(b.id)?),
        _ => return Err(unsupported(quad, "quoted triple subject")),
    };
    let predicate = NamedNode::new(quad.predicate.iri)?;
    let object = match quad.object {
        rio::Term::NamedNode(n) => Term::from(NamedNode::new(n.iri)?),
        rio::Term::BlankNode(b) => Term::from(BlankNode::from_id(b.id)?),
        rio::Term::Literal(l) => Term::from(convert_literal(l)?),
        _ => return Err(unsupported(quad, "quoted triple object")),
    };
    Ok(Quadruple::new(context, subject, predicate, object))
}

fn convert_literal(literal: rio::Literal<'_>) -> StoreResult<Literal> {
    Ok(match literal {
        rio::Literal::Simple { value } => Literal::new_simple_literal(value),
        rio::Literal::LanguageTaggedString { value, language } => {
            Literal::new_language_tagged_literal(value, language)?
        }
        rio::Literal::Typed { value, datatype } => {
            Literal::new_typed_literal(value, NamedNode::new(datatype.iri)?)
        }
    })
}

fn unsupported(quad: &rio::Quad<'_>, what: &str) -> StoreError {
    invalid_source(quad, format!("unsupported {}", what))
}

// Conversion to rio

fn rio_quad(quadruple: &Quadruple) -> rio::Quad<'_> {
    let subject = match quadruple.subject() {
        Resource::NamedNode(n) => rio::Subject::NamedNode(rio::NamedNode { iri: n.as_str() }),
        Resource::BlankNode(b) => rio::Subject::BlankNode(rio::BlankNode { id: b.as_str() }),
    };
    let graph_name = match quadruple.context() {
        Resource::NamedNode(n) => rio::GraphName::NamedNode(rio::NamedNode { iri: n.as_str() }),
        Resource::BlankNode(b) => rio::GraphName::BlankNode(rio::BlankNode { id: b.as_str() }),
    };
    rio::Quad {
        subject,
        predicate: rio::NamedNode {
            iri: quadruple.predicate().as_str(),
        },
        object: rio_term(quadruple.object()),
        graph_name: Some(graph_name),
    }
}

fn rio_term(term: &Term) -> rio::Term<'_> {
    match term {
        Term::Resource(Resource::NamedNode(n)) => rio::Term::NamedNode(rio::NamedNode { iri: n.as_str() }),
        Term::Resource(Resource::BlankNode(b)) => rio::Term::BlankNode(rio::BlankNode { id: b.as_str() }),
        Term::Literal(l) => {
            let literal = match l.language() {
                Some(language) => rio::Literal::LanguageTaggedString {
                    value: l.value(),
                    language,
                },
                None if l.is_plain() => rio::Literal::Simple { value: l.value() },
                None => rio::Literal::Typed {
                    value: l.value(),
                    datatype: rio::NamedNode {
                        iri: l.inner().datatype().as_str(),
                    },
                },
            };
            rio::Term::Literal(literal)
        }
    }
}
