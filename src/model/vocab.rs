//! Vocabulary constants used by the store core
//!
//! Only the terms the core itself reads or writes live here: reification,
//! RDF collections and the datatype-definition vocabulary.

use super::term::NamedNode;

pub mod rdf {
    pub const NAMESPACE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    pub const STATEMENT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Statement";
    pub const SUBJECT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#subject";
    pub const PREDICATE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#predicate";
    pub const OBJECT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#object";
    pub const FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";
    pub const REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";
    pub const NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";
}

pub mod rdfs {
    pub const NAMESPACE: &str = "http://www.w3.org/2000/01/rdf-schema#";
    pub const DATATYPE: &str = "http://www.w3.org/2000/01/rdf-schema#Datatype";
}

pub mod owl {
    pub const NAMESPACE: &str = "http://www.w3.org/2002/07/owl#";
    pub const ON_DATATYPE: &str = "http://www.w3.org/2002/07/owl#onDatatype";
    pub const WITH_RESTRICTIONS: &str = "http://www.w3.org/2002/07/owl#withRestrictions";
}

pub mod xsd {
    pub const NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema#";
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
    pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
    pub const LONG: &str = "http://www.w3.org/2001/XMLSchema#long";
    pub const INT: &str = "http://www.w3.org/2001/XMLSchema#int";
    pub const SHORT: &str = "http://www.w3.org/2001/XMLSchema#short";
    pub const BYTE: &str = "http://www.w3.org/2001/XMLSchema#byte";
    pub const NON_NEGATIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#nonNegativeInteger";
    pub const POSITIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#positiveInteger";
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
    pub const FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";
    pub const DATE: &str = "http://www.w3.org/2001/XMLSchema#date";
    pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
    pub const ANY_URI: &str = "http://www.w3.org/2001/XMLSchema#anyURI";

    // Constraining facets
    pub const LENGTH: &str = "http://www.w3.org/2001/XMLSchema#length";
    pub const MIN_LENGTH: &str = "http://www.w3.org/2001/XMLSchema#minLength";
    pub const MAX_LENGTH: &str = "http://www.w3.org/2001/XMLSchema#maxLength";
    pub const MIN_INCLUSIVE: &str = "http://www.w3.org/2001/XMLSchema#minInclusive";
    pub const MAX_INCLUSIVE: &str = "http://www.w3.org/2001/XMLSchema#maxInclusive";
    pub const MIN_EXCLUSIVE: &str = "http://www.w3.org/2001/XMLSchema#minExclusive";
    pub const MAX_EXCLUSIVE: &str = "http://www.w3.org/2001/XMLSchema#maxExclusive";
    pub const PATTERN: &str = "http://www.w3.org/2001/XMLSchema#pattern";
}

/// Named node for a vocabulary constant
pub fn term(iri: &'static str) -> NamedNode {
    NamedNode::from_static(iri)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_terms_are_valid_iris() {
        for iri in [rdf::TYPE, rdf::STATEMENT, rdfs::DATATYPE, owl::ON_DATATYPE, xsd::PATTERN] {
            assert!(NamedNode::new(iri).is_ok());
            assert_eq!(term(iri).as_str(), iri);
        }
    }
}
