//! Tabular form of a store
//!
//! A [`QuadTable`] has exactly four columns, in this order:
//! `?CONTEXT`, `?SUBJECT`, `?PREDICATE`, `?OBJECT`. Cells hold the plain
//! string form of a term:
//!
//! | term                | cell                                  |
//! |---------------------|---------------------------------------|
//! | IRI                 | `http://example.org/alice`            |
//! | blank node          | `_:b0`                                |
//! | simple literal      | `Alice`                               |
//! | language-tagged     | `Alice@en`                            |
//! | typed literal       | `42^^<http://www.w3.org/2001/XMLSchema#integer>` |
//!
//! Resource cells are trimmed. An object cell is read as a resource when its
//! trimmed text is one; otherwise the literal keeps its surrounding
//! whitespace. A plain literal whose text looks like an IRI, a blank node or
//! a tagged literal does not survive the trip through a table, and neither
//! does an empty or blank-only literal.

use crate::model::{BlankNode, Literal, NamedNode, Quadruple, Resource, Term};
use crate::registry::NamespaceRegistry;
use crate::store::{MemoryStore, StoreError, StoreResult};
use serde::{Deserialize, Serialize};

pub const CONTEXT_COLUMN: &str = "?CONTEXT";
pub const SUBJECT_COLUMN: &str = "?SUBJECT";
pub const PREDICATE_COLUMN: &str = "?PREDICATE";
pub const OBJECT_COLUMN: &str = "?OBJECT";

/// Required column names, in order
pub const TABLE_COLUMNS: [&str; 4] = [CONTEXT_COLUMN, SUBJECT_COLUMN, PREDICATE_COLUMN, OBJECT_COLUMN];

/// One row of a quad table; `None` is an absent cell
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuadRow {
    #[serde(rename = "?CONTEXT", default)]
    pub context: Option<String>,
    #[serde(rename = "?SUBJECT", default)]
    pub subject: Option<String>,
    #[serde(rename = "?PREDICATE", default)]
    pub predicate: Option<String>,
    #[serde(rename = "?OBJECT", default)]
    pub object: Option<String>,
}

impl QuadRow {
    pub fn new(context: &str, subject: &str, predicate: &str, object: &str) -> Self {
        Self {
            context: Some(context.to_string()),
            subject: Some(subject.to_string()),
            predicate: Some(predicate.to_string()),
            object: Some(object.to_string()),
        }
    }

    fn from_quadruple(quadruple: &Quadruple) -> Self {
        Self {
            context: Some(resource_cell(quadruple.context())),
            subject: Some(resource_cell(quadruple.subject())),
            predicate: Some(quadruple.predicate().as_str().to_string()),
            object: Some(term_cell(quadruple.object())),
        }
    }
}

/// Four-column table of quadruples
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuadTable {
    pub columns: Vec<String>,
    pub rows: Vec<QuadRow>,
}

impl QuadTable {
    /// Empty table with the required columns
    pub fn new() -> Self {
        Self {
            columns: TABLE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Export a store, one row per quadruple, in context/subject/predicate/object order
    pub fn from_store(store: &MemoryStore) -> Self {
        let mut table = Self::new();
        table.rows = super::sorted(store).into_iter().map(QuadRow::from_quadruple).collect();
        table
    }

    pub fn push(&mut self, row: QuadRow) -> &mut Self {
        self.rows.push(row);
        self
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Check the column schema
    pub fn validate_schema(&self) -> StoreResult<()> {
        if self.columns.iter().map(String::as_str).eq(TABLE_COLUMNS) {
            Ok(())
        } else {
            Err(StoreError::InvalidTableSchema {
                expected: TABLE_COLUMNS.iter().map(|c| c.to_string()).collect(),
                found: self.columns.clone(),
            })
        }
    }

    /// Build a store from the rows
    ///
    /// Rows are numbered from zero in errors. Empty or absent contexts map
    /// to `default_context`.
    pub fn to_store(&self, namespaces: &NamespaceRegistry, default_context: &Resource) -> StoreResult<MemoryStore> {
        self.validate_schema()?;
        let mut store = MemoryStore::new();
        for (index, row) in self.rows.iter().enumerate() {
            let quadruple = read_row(row, namespaces, default_context).map_err(|e| match e {
                StoreError::InvalidRow { reason, .. } => StoreError::InvalidRow { row: index, reason },
                other => other,
            })?;
            store.add_quadruple(quadruple);
        }
        Ok(store)
    }
}

impl Default for QuadTable {
    fn default() -> Self {
        Self::new()
    }
}

// Cell writing

fn resource_cell(resource: &Resource) -> String {
    match resource {
        Resource::NamedNode(node) => node.as_str().to_string(),
        Resource::BlankNode(node) => format!("_:{}", node.as_str()),
    }
}

fn term_cell(term: &Term) -> String {
    match term {
        Term::Resource(resource) => resource_cell(resource),
        Term::Literal(literal) => match literal.language() {
            Some(language) => format!("{}@{}", literal.value(), language),
            None if literal.is_plain() => literal.value().to_string(),
            None => format!("{}^^<{}>", literal.value(), literal.inner().datatype().as_str()),
        },
    }
}

// Cell reading

fn read_row(row: &QuadRow, namespaces: &NamespaceRegistry, default_context: &Resource) -> StoreResult<Quadruple> {
    let context = match non_empty(&row.context) {
        None => default_context.clone(),
        Some(cell) => match parse_cell(cell, namespaces) {
            Term::Resource(resource) => resource,
            Term::Literal(_) => return Err(invalid(format!("context {:?} is a literal", cell))),
        },
    };

    let subject = non_empty(&row.subject).ok_or_else(|| invalid("missing subject"))?;
    let subject = match parse_cell(subject, namespaces) {
        Term::Resource(resource) => resource,
        Term::Literal(_) => return Err(invalid(format!("subject {:?} is a literal", subject))),
    };

    let predicate = non_empty(&row.predicate).ok_or_else(|| invalid("missing predicate"))?;
    let predicate = match parse_cell(predicate, namespaces) {
        Term::Resource(Resource::NamedNode(node)) => node,
        Term::Resource(Resource::BlankNode(_)) => {
            return Err(invalid(format!("predicate {:?} is a blank node", predicate)))
        }
        Term::Literal(_) => return Err(invalid(format!("predicate {:?} is a literal", predicate))),
    };

    let object = row
        .object
        .as_deref()
        .filter(|cell| !cell.trim().is_empty())
        .ok_or_else(|| invalid("missing object"))?;
    let object = match parse_cell(object.trim(), namespaces) {
        Term::Resource(resource) => Term::Resource(resource),
        Term::Literal(_) => parse_cell(object, namespaces),
    };

    Ok(Quadruple::new(context, subject, predicate, object))
}

/// Discriminate a cell: blank marker, then absolute IRI (after prefix
/// expansion), then `^^` typed literal, then `@` language tag, else a
/// plain literal
fn parse_cell(cell: &str, namespaces: &NamespaceRegistry) -> Term {
    if let Some(id) = cell.strip_prefix("_:") {
        if let Ok(node) = BlankNode::from_id(id) {
            return Term::from(node);
        }
    }
    if let Some(node) = parse_iri(cell, namespaces) {
        return Term::from(node);
    }
    if let Some((value, datatype)) = cell.rsplit_once("^^") {
        if let Some(datatype) = parse_iri(datatype, namespaces) {
            return Term::from(Literal::new_typed_literal(value, datatype));
        }
    }
    if let Some((value, language)) = cell.rsplit_once('@') {
        if let Ok(literal) = Literal::new_language_tagged_literal(value, language) {
            return Term::from(literal);
        }
    }
    Term::from(Literal::new_simple_literal(cell))
}

fn parse_iri(cell: &str, namespaces: &NamespaceRegistry) -> Option<NamedNode> {
    let cell = cell
        .strip_prefix('<')
        .and_then(|c| c.strip_suffix('>'))
        .unwrap_or(cell);
    if cell.chars().any(char::is_whitespace) {
        return None;
    }
    match namespaces.try_expand(cell) {
        Some(expanded) => NamedNode::new(&expanded).ok(),
        None => NamedNode::new(cell).ok(),
    }
}

fn non_empty(cell: &Option<String>) -> Option<&str> {
    cell.as_deref().map(str::trim).filter(|c| !c.is_empty())
}

fn invalid(reason: impl Into<String>) -> StoreError {
    StoreError::InvalidRow {
        row: 0,
        reason: reason.into(),
    }
}
