//! Datatype registry: built-in XSD lexical spaces plus derived datatypes
//!
//! Derived datatypes follow the OWL 2 restriction shape:
//!
//! ```text
//! ex:age rdf:type rdfs:Datatype ;
//!        owl:onDatatype xsd:integer ;
//!        owl:withRestrictions ( [ xsd:minInclusive 0 ] [ xsd:maxInclusive 150 ] ) .
//! ```
//!
//! They are found in a store by [`DatatypeRegistry::discover`], after which
//! typed literals can be checked with [`DatatypeRegistry::validate`].

use crate::index::QuadPattern;
use crate::model::vocab::{self, owl, rdf, rdfs, xsd};
use crate::model::{Literal, NamedNode, Resource, Term, TermError, TermResult};
use crate::store::MemoryStore;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Derivation chains longer than this are treated as cyclic
const MAX_DERIVATION_DEPTH: usize = 16;

/// Upper bound on `rdf:rest` hops when reading a restriction list
const MAX_LIST_LENGTH: usize = 256;

static DATE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^-?\d{4,}-\d{2}-\d{2}(Z|[+-]\d{2}:\d{2})?$"));

static DATE_TIME: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| {
    Regex::new(r"^-?\d{4,}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d+)?(Z|[+-]\d{2}:\d{2})?$")
});

/// Lexical space of a built-in datatype
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexicalSpace {
    /// Any string
    Any,
    Boolean,
    /// Integer within optional bounds
    Integer { min: Option<i128>, max: Option<i128> },
    Decimal,
    /// xsd:double and xsd:float
    Floating,
    Date,
    DateTime,
}

impl LexicalSpace {
    fn check(&self, value: &str) -> Result<(), String> {
        match self {
            LexicalSpace::Any => Ok(()),
            LexicalSpace::Boolean => match value {
                "true" | "false" | "1" | "0" => Ok(()),
                _ => Err("not a boolean".to_string()),
            },
            LexicalSpace::Integer { min, max } => {
                let number: i128 = value
                    .strip_prefix('+')
                    .unwrap_or(value)
                    .parse()
                    .map_err(|_| "not an integer".to_string())?;
                if min.map_or(false, |min| number < min) || max.map_or(false, |max| number > max) {
                    return Err("integer out of range".to_string());
                }
                Ok(())
            }
            LexicalSpace::Decimal => {
                let digits = value.strip_prefix(['+', '-']).unwrap_or(value);
                let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
                let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
                if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
                    return Err("not a decimal".to_string());
                }
                Ok(())
            }
            LexicalSpace::Floating => {
                if matches!(value, "INF" | "-INF" | "+INF" | "NaN") {
                    return Ok(());
                }
                let numeric = value
                    .chars()
                    .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
                if numeric && value.parse::<f64>().is_ok() {
                    Ok(())
                } else {
                    Err("not a floating-point number".to_string())
                }
            }
            LexicalSpace::Date => Self::check_regex(&DATE, value, "not a date"),
            LexicalSpace::DateTime => Self::check_regex(&DATE_TIME, value, "not a dateTime"),
        }
    }

    fn check_regex(regex: &Result<Regex, regex::Error>, value: &str, reason: &str) -> Result<(), String> {
        match regex {
            Ok(regex) if regex.is_match(value) => Ok(()),
            Ok(_) => Err(reason.to_string()),
            Err(e) => Err(e.to_string()),
        }
    }
}

/// Constraining facet of a derived datatype
#[derive(Debug, Clone)]
pub enum DatatypeFacet {
    Length(usize),
    MinLength(usize),
    MaxLength(usize),
    MinInclusive(String),
    MaxInclusive(String),
    MinExclusive(String),
    MaxExclusive(String),
    /// XSD patterns match the whole lexical value
    Pattern(Regex),
}

impl DatatypeFacet {
    /// Build a facet from its XSD facet IRI and value literal
    pub fn parse(facet: &str, value: &Literal) -> TermResult<Self> {
        let bound = || value.value().to_string();
        let length = || {
            value.value().parse::<usize>().map_err(|_| TermError::InvalidLiteral {
                value: value.value().to_string(),
                datatype: facet.to_string(),
                reason: "facet length is not a non-negative integer".to_string(),
            })
        };
        Ok(match facet {
            xsd::LENGTH => DatatypeFacet::Length(length()?),
            xsd::MIN_LENGTH => DatatypeFacet::MinLength(length()?),
            xsd::MAX_LENGTH => DatatypeFacet::MaxLength(length()?),
            xsd::MIN_INCLUSIVE => DatatypeFacet::MinInclusive(bound()),
            xsd::MAX_INCLUSIVE => DatatypeFacet::MaxInclusive(bound()),
            xsd::MIN_EXCLUSIVE => DatatypeFacet::MinExclusive(bound()),
            xsd::MAX_EXCLUSIVE => DatatypeFacet::MaxExclusive(bound()),
            xsd::PATTERN => DatatypeFacet::pattern(value.value())?,
            other => {
                return Err(TermError::InvalidLiteral {
                    value: value.value().to_string(),
                    datatype: other.to_string(),
                    reason: "unsupported facet".to_string(),
                })
            }
        })
    }

    /// Anchored pattern facet
    pub fn pattern(pattern: &str) -> TermResult<Self> {
        Regex::new(&format!("^(?:{})$", pattern))
            .map(DatatypeFacet::Pattern)
            .map_err(|e| TermError::InvalidLiteral {
                value: pattern.to_string(),
                datatype: xsd::PATTERN.to_string(),
                reason: e.to_string(),
            })
    }

    fn check(&self, value: &str) -> Result<(), String> {
        let length = value.chars().count();
        let ok = match self {
            DatatypeFacet::Length(n) => length == *n,
            DatatypeFacet::MinLength(n) => length >= *n,
            DatatypeFacet::MaxLength(n) => length <= *n,
            DatatypeFacet::MinInclusive(b) => compare(value, b).is_ge(),
            DatatypeFacet::MaxInclusive(b) => compare(value, b).is_le(),
            DatatypeFacet::MinExclusive(b) => compare(value, b).is_gt(),
            DatatypeFacet::MaxExclusive(b) => compare(value, b).is_lt(),
            DatatypeFacet::Pattern(regex) => regex.is_match(value),
        };
        if ok {
            Ok(())
        } else {
            Err(format!("violates facet {:?}", self))
        }
    }
}

/// Numeric comparison when both sides parse as numbers, lexical otherwise
fn compare(value: &str, bound: &str) -> std::cmp::Ordering {
    match (value.parse::<f64>(), bound.parse::<f64>()) {
        (Ok(v), Ok(b)) => v.partial_cmp(&b).unwrap_or(std::cmp::Ordering::Equal),
        _ => value.cmp(bound),
    }
}

/// A registered datatype
#[derive(Debug, Clone)]
pub struct DatatypeDefinition {
    pub iri: NamedNode,
    /// Datatype this one restricts
    pub base: Option<NamedNode>,
    pub lexical_space: LexicalSpace,
    pub facets: Vec<DatatypeFacet>,
}

impl DatatypeDefinition {
    /// Built-in datatype with its own lexical space
    pub fn builtin(iri: &'static str, lexical_space: LexicalSpace) -> Self {
        Self {
            iri: vocab::term(iri),
            base: None,
            lexical_space,
            facets: Vec::new(),
        }
    }

    /// Datatype derived from `base` by restriction
    pub fn derived(iri: NamedNode, base: NamedNode, facets: Vec<DatatypeFacet>) -> Self {
        Self {
            iri,
            base: Some(base),
            lexical_space: LexicalSpace::Any,
            facets,
        }
    }
}

/// Registered datatypes, keyed by IRI
#[derive(Debug, Clone)]
pub struct DatatypeRegistry {
    definitions: HashMap<String, DatatypeDefinition>,
}

impl DatatypeRegistry {
    /// Create a registry without any datatype
    pub fn empty() -> Self {
        Self {
            definitions: HashMap::new(),
        }
    }

    /// Create a registry with the XSD built-ins
    pub fn new() -> Self {
        let mut registry = Self::empty();
        let integer = |min: Option<i128>, max: Option<i128>| LexicalSpace::Integer { min, max };

        for definition in [
            DatatypeDefinition::builtin(xsd::STRING, LexicalSpace::Any),
            DatatypeDefinition::builtin(xsd::ANY_URI, LexicalSpace::Any),
            DatatypeDefinition::builtin(xsd::BOOLEAN, LexicalSpace::Boolean),
            DatatypeDefinition::builtin(xsd::DECIMAL, LexicalSpace::Decimal),
            DatatypeDefinition::builtin(xsd::INTEGER, integer(None, None)),
            DatatypeDefinition::builtin(xsd::LONG, integer(Some(i64::MIN.into()), Some(i64::MAX.into()))),
            DatatypeDefinition::builtin(xsd::INT, integer(Some(i32::MIN.into()), Some(i32::MAX.into()))),
            DatatypeDefinition::builtin(xsd::SHORT, integer(Some(i16::MIN.into()), Some(i16::MAX.into()))),
            DatatypeDefinition::builtin(xsd::BYTE, integer(Some(i8::MIN.into()), Some(i8::MAX.into()))),
            DatatypeDefinition::builtin(xsd::NON_NEGATIVE_INTEGER, integer(Some(0), None)),
            DatatypeDefinition::builtin(xsd::POSITIVE_INTEGER, integer(Some(1), None)),
            DatatypeDefinition::builtin(xsd::DOUBLE, LexicalSpace::Floating),
            DatatypeDefinition::builtin(xsd::FLOAT, LexicalSpace::Floating),
            DatatypeDefinition::builtin(xsd::DATE, LexicalSpace::Date),
            DatatypeDefinition::builtin(xsd::DATE_TIME, LexicalSpace::DateTime),
        ] {
            registry.register(definition);
        }

        registry
    }

    /// Register (or replace) a datatype
    pub fn register(&mut self, definition: DatatypeDefinition) -> &mut Self {
        self.definitions
            .insert(definition.iri.as_str().to_string(), definition);
        self
    }

    pub fn get(&self, iri: &str) -> Option<&DatatypeDefinition> {
        self.definitions.get(iri)
    }

    pub fn contains(&self, iri: &str) -> bool {
        self.definitions.contains_key(iri)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Check a literal against its datatype
    ///
    /// Plain literals and literals of unregistered datatypes are accepted.
    pub fn validate(&self, literal: &Literal) -> TermResult<()> {
        if literal.is_plain() {
            return Ok(());
        }
        let datatype = literal.datatype();
        self.check(datatype.as_str(), literal.value(), 0)
            .map_err(|reason| TermError::InvalidLiteral {
                value: literal.value().to_string(),
                datatype: datatype.as_str().to_string(),
                reason,
            })
    }

    /// Check every typed literal of a store
    pub fn validate_store(&self, store: &MemoryStore) -> TermResult<()> {
        store
            .iter()
            .filter_map(|q| q.literal())
            .try_for_each(|literal| self.validate(literal))
    }

    /// Register the derived datatypes defined in a store
    ///
    /// Malformed definitions are skipped with a warning. Returns the number
    /// of datatypes registered.
    pub fn discover(&mut self, store: &MemoryStore) -> usize {
        let rdf_type = vocab::term(rdf::TYPE);
        let datatype_class = Resource::from(vocab::term(rdfs::DATATYPE));
        let declarations = store.materialize_pattern(
            &QuadPattern::any()
                .with_predicate(&rdf_type)
                .with_object(&datatype_class),
        );

        let mut discovered = 0;
        for declaration in declarations.iter() {
            let Some(iri) = declaration.subject().as_named_node() else {
                continue;
            };
            match Self::read_definition(store, iri) {
                Ok(Some(definition)) => {
                    debug!(
                        "Discovered datatype {} ({} facets)",
                        iri,
                        definition.facets.len()
                    );
                    self.register(definition);
                    discovered += 1;
                }
                Ok(None) => {}
                Err(e) => warn!("Skipping datatype definition {}: {}", iri, e),
            }
        }
        discovered
    }

    // Private helper methods

    fn check(&self, datatype: &str, value: &str, depth: usize) -> Result<(), String> {
        if depth > MAX_DERIVATION_DEPTH {
            return Err("datatype derivation is cyclic".to_string());
        }
        let Some(definition) = self.definitions.get(datatype) else {
            return Ok(());
        };
        if let Some(base) = &definition.base {
            self.check(base.as_str(), value, depth + 1)?;
        }
        definition.lexical_space.check(value)?;
        definition
            .facets
            .iter()
            .try_for_each(|facet| facet.check(value))
    }

    /// `Ok(None)` when the resource carries no `owl:onDatatype`
    fn read_definition(store: &MemoryStore, iri: &NamedNode) -> TermResult<Option<DatatypeDefinition>> {
        let subject = Resource::from(iri.clone());
        let Some(base) = objects(store, &subject, owl::ON_DATATYPE).into_iter().next() else {
            return Ok(None);
        };
        let base = match base {
            Term::Resource(Resource::NamedNode(base)) => base,
            other => return Err(TermError::InvalidIri(format!("owl:onDatatype {}", other))),
        };

        let mut facets = Vec::new();
        if let Some(list) = objects(store, &subject, owl::WITH_RESTRICTIONS).into_iter().next() {
            for restriction in read_list(store, list)? {
                let Term::Resource(restriction) = restriction else {
                    return Err(TermError::InvalidBlankNode(format!("restriction {}", restriction)));
                };
                for quadruple in store.select_by_subject(&restriction).iter() {
                    if let Some(value) = quadruple.literal() {
                        facets.push(DatatypeFacet::parse(quadruple.predicate().as_str(), value)?);
                    }
                }
            }
        }
        Ok(Some(DatatypeDefinition::derived(iri.clone(), base, facets)))
    }
}

impl Default for DatatypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn objects(store: &MemoryStore, subject: &Resource, predicate: &'static str) -> Vec<Term> {
    let predicate = vocab::term(predicate);
    store
        .materialize_pattern(&QuadPattern::any().with_subject(subject).with_predicate(&predicate))
        .iter()
        .map(|q| q.object().clone())
        .collect()
}

/// Members of an RDF collection
fn read_list(store: &MemoryStore, head: Term) -> TermResult<Vec<Term>> {
    let nil = Term::from(vocab::term(rdf::NIL));
    let mut members = Vec::new();
    let mut node = head;
    while node != nil {
        if members.len() > MAX_LIST_LENGTH {
            return Err(TermError::InvalidBlankNode("restriction list too long".to_string()));
        }
        let Term::Resource(cell) = &node else {
            return Err(TermError::InvalidBlankNode(format!("list node {}", node)));
        };
        let first = objects(store, cell, rdf::FIRST).into_iter().next();
        let rest = objects(store, cell, rdf::REST).into_iter().next();
        match (first, rest) {
            (Some(first), Some(rest)) => {
                members.push(first);
                node = rest;
            }
            _ => return Err(TermError::InvalidBlankNode(format!("broken list at {}", node))),
        }
    }
    Ok(members)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BlankNode, Quadruple};

    fn typed(value: &str, datatype: &str) -> Literal {
        Literal::new_typed_literal(value, NamedNode::new(datatype).unwrap())
    }

    #[test]
    fn test_builtin_lexical_spaces() {
        let registry = DatatypeRegistry::new();

        assert!(registry.validate(&typed("42", xsd::INTEGER)).is_ok());
        assert!(registry.validate(&typed("forty-two", xsd::INTEGER)).is_err());
        assert!(registry.validate(&typed("300", xsd::BYTE)).is_err());
        assert!(registry.validate(&typed("-1", xsd::NON_NEGATIVE_INTEGER)).is_err());
        assert!(registry.validate(&typed("true", xsd::BOOLEAN)).is_ok());
        assert!(registry.validate(&typed("yes", xsd::BOOLEAN)).is_err());
        assert!(registry.validate(&typed("3.14", xsd::DECIMAL)).is_ok());
        assert!(registry.validate(&typed("1e3", xsd::DECIMAL)).is_err());
        assert!(registry.validate(&typed("1.5E-3", xsd::DOUBLE)).is_ok());
        assert!(registry.validate(&typed("infinity", xsd::DOUBLE)).is_err());
        assert!(registry.validate(&typed("2024-02-29", xsd::DATE)).is_ok());
        assert!(registry.validate(&typed("2024-02-29T10:00:00Z", xsd::DATE_TIME)).is_ok());
        assert!(registry.validate(&typed("yesterday", xsd::DATE)).is_err());
    }

    #[test]
    fn test_unknown_datatype_accepted() {
        let registry = DatatypeRegistry::new();
        assert!(registry
            .validate(&typed("anything", "http://example.org/unknown"))
            .is_ok());
        assert!(registry.validate(&Literal::new_simple_literal("x")).is_ok());
    }

    #[test]
    fn test_derived_datatype_facets() {
        let mut registry = DatatypeRegistry::new();
        registry.register(DatatypeDefinition::derived(
            NamedNode::new("http://example.org/percent").unwrap(),
            vocab::term(xsd::INTEGER),
            vec![
                DatatypeFacet::MinInclusive("0".to_string()),
                DatatypeFacet::MaxInclusive("100".to_string()),
            ],
        ));

        assert!(registry.validate(&typed("55", "http://example.org/percent")).is_ok());
        assert!(registry.validate(&typed("101", "http://example.org/percent")).is_err());
        assert!(registry.validate(&typed("5.5", "http://example.org/percent")).is_err());
    }

    #[test]
    fn test_pattern_is_anchored() {
        let facet = DatatypeFacet::pattern("[A-Z]{2}").unwrap();
        assert!(facet.check("FR").is_ok());
        assert!(facet.check("xFRx").is_err());
    }

    #[test]
    fn test_discover_from_store() {
        let ctx = NamedNode::new("http://example.org/schema").unwrap();
        let code = NamedNode::new("http://example.org/countryCode").unwrap();
        let list = BlankNode::from_id("l0").unwrap();
        let restriction = BlankNode::from_id("r0").unwrap();

        let store = MemoryStore::from_quadruples(vec![
            Quadruple::new(ctx.clone(), code.clone(), vocab::term(rdf::TYPE), vocab::term(rdfs::DATATYPE)),
            Quadruple::new(ctx.clone(), code.clone(), vocab::term(owl::ON_DATATYPE), vocab::term(xsd::STRING)),
            Quadruple::new(ctx.clone(), code.clone(), vocab::term(owl::WITH_RESTRICTIONS), list.clone()),
            Quadruple::new(ctx.clone(), list.clone(), vocab::term(rdf::FIRST), restriction.clone()),
            Quadruple::new(ctx.clone(), list, vocab::term(rdf::REST), vocab::term(rdf::NIL)),
            Quadruple::new(
                ctx.clone(),
                restriction,
                vocab::term(xsd::LENGTH),
                typed("2", xsd::INTEGER),
            ),
        ]);

        let mut registry = DatatypeRegistry::new();
        assert_eq!(registry.discover(&store), 1);
        assert!(registry.contains(code.as_str()));
        assert!(registry.validate(&typed("FR", code.as_str())).is_ok());
        assert!(matches!(
            registry.validate(&typed("FRA", code.as_str())),
            Err(TermError::InvalidLiteral { .. })
        ));
    }

    #[test]
    fn test_discover_skips_malformed() {
        let ctx = NamedNode::new("http://example.org/schema").unwrap();
        let broken = NamedNode::new("http://example.org/broken").unwrap();
        let store = MemoryStore::from_quadruples(vec![
            Quadruple::new(ctx.clone(), broken.clone(), vocab::term(rdf::TYPE), vocab::term(rdfs::DATATYPE)),
            Quadruple::new(
                ctx,
                broken.clone(),
                vocab::term(owl::ON_DATATYPE),
                Literal::new_simple_literal("not a datatype"),
            ),
        ]);

        let mut registry = DatatypeRegistry::new();
        assert_eq!(registry.discover(&store), 0);
        assert!(!registry.contains(broken.as_str()));
    }
}
