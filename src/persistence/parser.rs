//! Store import

use super::format::RdfFormat;
use super::table::QuadTable;
use super::{invalid_source, rio, trix};
use crate::config::{StoreConfig, DEFAULT_CONTEXT};
use crate::model::{vocab, Quadruple, Resource};
use crate::registry::Registry;
use crate::store::{MemoryStore, StoreResult};
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Reads stores from wire formats and tables
///
/// Owns the [`Registry`] used for prefix expansion and datatype validation.
/// With `discover_datatypes` enabled, derived datatypes found in each
/// imported dataset are registered and every typed literal is validated.
#[derive(Debug, Clone)]
pub struct QuadParser {
    config: StoreConfig,
    registry: Registry,
    default_context: Resource,
}

impl QuadParser {
    /// Parser with the default configuration and registry
    pub fn new() -> Self {
        Self {
            config: StoreConfig::default(),
            registry: Registry::default(),
            default_context: Resource::from(vocab::term(DEFAULT_CONTEXT)),
        }
    }

    /// Parser for a configuration; fails when its default context is not a resource
    pub fn with_config(config: StoreConfig) -> StoreResult<Self> {
        let default_context = config.default_context()?;
        let mut registry = Registry::default();
        for (prefix, iri) in &config.prefixes {
            registry.namespaces.add_prefix(prefix.clone(), iri.clone());
        }
        Ok(Self {
            config,
            registry,
            default_context,
        })
    }

    /// Replace the registry
    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Context given to quadruples without a graph name
    pub fn default_context(&self) -> &Resource {
        &self.default_context
    }

    /// Parse a store from any buffered reader
    pub fn parse<R: BufRead>(&mut self, reader: R, format: RdfFormat) -> StoreResult<MemoryStore> {
        let mut store = MemoryStore::new();
        {
            let sink = |quadruple: Quadruple| {
                store.add_quadruple(quadruple);
            };
            match format {
                RdfFormat::NQuads => rio::read_nquads(reader, &self.default_context, sink)?,
                RdfFormat::TriG => rio::read_trig(
                    reader,
                    self.config.base_iri.as_deref(),
                    &self.default_context,
                    sink,
                )?,
                RdfFormat::TriX => trix::read_trix(reader, &self.default_context, sink)?,
            }
        }
        self.finish(store, format)
    }

    pub fn parse_str(&mut self, data: &str, format: RdfFormat) -> StoreResult<MemoryStore> {
        self.parse(data.as_bytes(), format)
    }

    /// Parse a file, picking the format from its extension
    pub fn parse_file(&mut self, path: impl AsRef<Path>) -> StoreResult<MemoryStore> {
        let path = path.as_ref();
        let format = RdfFormat::from_path(path)
            .ok_or_else(|| invalid_source(path.display(), "unknown file extension"))?;
        self.parse_file_as(path, format)
    }

    pub fn parse_file_as(&mut self, path: impl AsRef<Path>, format: RdfFormat) -> StoreResult<MemoryStore> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| invalid_source(path.display(), e))?;
        let store = self.parse(BufReader::new(file), format)?;
        info!("Imported {} quadruples from {}", store.len(), path.display());
        Ok(store)
    }

    /// Parse a file without blocking the runtime on the file system
    pub async fn parse_file_async(&mut self, path: impl AsRef<Path>) -> StoreResult<MemoryStore> {
        let path = path.as_ref();
        let format = RdfFormat::from_path(path)
            .ok_or_else(|| invalid_source(path.display(), "unknown file extension"))?;
        let data = tokio::fs::read(path)
            .await
            .map_err(|e| invalid_source(path.display(), e))?;
        let store = self.parse(data.as_slice(), format)?;
        info!("Imported {} quadruples from {}", store.len(), path.display());
        Ok(store)
    }

    /// Fetch and parse a dataset over HTTP(S)
    ///
    /// Without an explicit format, the response media type decides, then
    /// the extension of the URL path.
    pub async fn parse_uri(&mut self, uri: &str, format: Option<RdfFormat>) -> StoreResult<MemoryStore> {
        let url = reqwest::Url::parse(uri).map_err(|e| invalid_source(uri, e))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid_source(uri, format!("unsupported scheme {}", url.scheme())));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.config.http_timeout_secs))
            .build()
            .map_err(|e| invalid_source(uri, e))?;
        debug!("Fetching {}", url);
        let response = client
            .get(url.clone())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| invalid_source(uri, e))?;

        let format = format
            .or_else(|| {
                response
                    .headers()
                    .get(reqwest::header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .and_then(RdfFormat::from_media_type)
            })
            .or_else(|| RdfFormat::from_path(url.path()))
            .ok_or_else(|| invalid_source(uri, "cannot determine RDF format"))?;
        let body = response.bytes().await.map_err(|e| invalid_source(uri, e))?;

        let store = self.parse(body.as_ref(), format)?;
        info!("Imported {} quadruples from {}", store.len(), uri);
        Ok(store)
    }

    /// Build a store from a quad table
    pub fn parse_table(&mut self, table: &QuadTable) -> StoreResult<MemoryStore> {
        let store = table.to_store(&self.registry.namespaces, &self.default_context)?;
        self.finish(store, "table")
    }

    // Private helper methods

    /// Datatype discovery and validation, when enabled
    ///
    /// Discovered datatypes are kept only when the whole store validates.
    fn finish(&mut self, store: MemoryStore, origin: impl std::fmt::Display) -> StoreResult<MemoryStore> {
        debug!("Parsed {} quadruples ({})", store.len(), origin);
        if self.config.discover_datatypes {
            let mut datatypes = self.registry.datatypes.clone();
            let discovered = datatypes.discover(&store);
            datatypes.validate_store(&store)?;
            if discovered > 0 {
                info!("Registered {} datatypes", discovered);
            }
            self.registry.datatypes = datatypes;
        }
        Ok(store)
    }
}

impl Default for QuadParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;
    use crate::model::TermError;

    const SCHEMA: &str = r#"
<http://example.org/percent> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.w3.org/2000/01/rdf-schema#Datatype> <http://example.org/schema> .
<http://example.org/percent> <http://www.w3.org/2002/07/owl#onDatatype> <http://www.w3.org/2001/XMLSchema#integer> <http://example.org/schema> .
<http://example.org/percent> <http://www.w3.org/2002/07/owl#withRestrictions> _:l0 <http://example.org/schema> .
_:l0 <http://www.w3.org/1999/02/22-rdf-syntax-ns#first> _:r0 <http://example.org/schema> .
_:l0 <http://www.w3.org/1999/02/22-rdf-syntax-ns#rest> <http://www.w3.org/1999/02/22-rdf-syntax-ns#nil> <http://example.org/schema> .
_:r0 <http://www.w3.org/2001/XMLSchema#maxInclusive> "100"^^<http://www.w3.org/2001/XMLSchema#integer> <http://example.org/schema> .
"#;

    #[test]
    fn test_default_context_applies() {
        let mut parser = QuadParser::new();
        let store = parser
            .parse_str("<http://example.org/s> <http://example.org/p> \"v\" .\n", RdfFormat::NQuads)
            .unwrap();
        assert_eq!(store.extract_contexts(), vec![parser.default_context().clone()]);
    }

    #[test]
    fn test_missing_file() {
        let mut parser = QuadParser::new();
        assert!(matches!(
            parser.parse_file("/definitely/not/here.nq"),
            Err(StoreError::InvalidSource { .. })
        ));
        assert!(matches!(
            parser.parse_file("/definitely/not/here.unknown"),
            Err(StoreError::InvalidSource { .. })
        ));
    }

    #[tokio::test]
    async fn test_invalid_uri() {
        let mut parser = QuadParser::new();
        assert!(matches!(
            parser.parse_uri("not a uri", None).await,
            Err(StoreError::InvalidSource { .. })
        ));
        assert!(matches!(
            parser.parse_uri("ftp://example.org/data.nq", None).await,
            Err(StoreError::InvalidSource { .. })
        ));
    }

    #[test]
    fn test_discovery_is_off_by_default() {
        let mut parser = QuadParser::new();
        let data = format!(
            "{}<http://example.org/s> <http://example.org/p> \"150\"^^<http://example.org/percent> .\n",
            SCHEMA
        );
        assert!(parser.parse_str(&data, RdfFormat::NQuads).is_ok());
        assert!(!parser.registry().datatypes.contains("http://example.org/percent"));
    }

    #[test]
    fn test_discovery_validates_literals() {
        let config = StoreConfig {
            discover_datatypes: true,
            ..StoreConfig::default()
        };
        let mut parser = QuadParser::with_config(config).unwrap();

        let valid = format!(
            "{}<http://example.org/s> <http://example.org/p> \"42\"^^<http://example.org/percent> .\n",
            SCHEMA
        );
        assert_eq!(parser.parse_str(&valid, RdfFormat::NQuads).unwrap().len(), 7);

        let invalid = format!(
            "{}<http://example.org/s> <http://example.org/p> \"150\"^^<http://example.org/percent> .\n",
            SCHEMA
        );
        assert!(matches!(
            parser.parse_str(&invalid, RdfFormat::NQuads),
            Err(StoreError::Term(TermError::InvalidLiteral { .. }))
        ));
    }

    #[test]
    fn test_rejected_import_registers_nothing() {
        let config = StoreConfig {
            discover_datatypes: true,
            ..StoreConfig::default()
        };
        let mut parser = QuadParser::with_config(config).unwrap();
        let before = parser.registry().datatypes.len();

        let invalid = format!(
            "{}<http://example.org/s> <http://example.org/p> \"150\"^^<http://example.org/percent> .\n",
            SCHEMA
        );
        assert!(parser.parse_str(&invalid, RdfFormat::NQuads).is_err());
        assert!(!parser.registry().datatypes.contains("http://example.org/percent"));
        assert_eq!(parser.registry().datatypes.len(), before);

        // a later literal of the refused datatype is not checked against it
        let later = "<http://example.org/s> <http://example.org/p> \"150\"^^<http://example.org/percent> .\n";
        assert!(parser.parse_str(later, RdfFormat::NQuads).is_ok());
    }

    #[test]
    fn test_config_prefixes_reach_tables() {
        let mut config = StoreConfig::default();
        config
            .prefixes
            .insert("ex".to_string(), "http://example.org/".to_string());
        let mut parser = QuadParser::with_config(config).unwrap();

        let mut table = QuadTable::new();
        table.push(crate::persistence::QuadRow::new("ex:g", "ex:alice", "foaf:name", "Alice"));
        let store = parser.parse_table(&table).unwrap();

        let quadruple = store.iter().next().unwrap();
        assert_eq!(quadruple.subject().to_string(), "<http://example.org/alice>");
        assert_eq!(quadruple.predicate().as_str(), "http://xmlns.com/foaf/0.1/name");
    }
}
