//! Store export

use super::format::RdfFormat;
use super::{invalid_source, rio, sorted, trix};
use crate::store::{MemoryStore, StoreError, StoreResult};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Writes stores in one wire format
#[derive(Debug, Clone, Copy)]
pub struct QuadSerializer {
    format: RdfFormat,
}

impl QuadSerializer {
    pub fn new(format: RdfFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> RdfFormat {
        self.format
    }

    /// Write a store to any writer, handing the writer back
    pub fn write<W: Write>(&self, store: &MemoryStore, writer: W) -> StoreResult<W> {
        let quadruples = sorted(store);
        match self.format {
            RdfFormat::NQuads => rio::write_nquads(quadruples, writer),
            RdfFormat::TriG => rio::write_trig(quadruples, writer),
            RdfFormat::TriX => trix::write_trix(quadruples, writer),
        }
    }

    /// Serialize a store into a string
    pub fn serialize_to_string(&self, store: &MemoryStore) -> StoreResult<String> {
        let bytes = self.write(store, Vec::new())?;
        String::from_utf8(bytes).map_err(|e| StoreError::Serialize(e.to_string()))
    }

    /// Write a store to a file, replacing it
    pub fn write_file(&self, store: &MemoryStore, path: impl AsRef<Path>) -> StoreResult<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|e| invalid_source(path.display(), e))?;
        let mut writer = self.write(store, std::io::BufWriter::new(file))?;
        writer.flush()?;
        info!(
            "Exported {} quadruples to {} ({})",
            store.len(),
            path.display(),
            self.format
        );
        Ok(())
    }

    /// Write a store to a file without blocking the runtime on the file system
    pub async fn write_file_async(&self, store: &MemoryStore, path: impl AsRef<Path>) -> StoreResult<()> {
        let path = path.as_ref();
        let bytes = self.write(store, Vec::new())?;
        tokio::fs::write(path, bytes)
            .await
            .map_err(|e| invalid_source(path.display(), e))?;
        info!(
            "Exported {} quadruples to {} ({})",
            store.len(),
            path.display(),
            self.format
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Literal, NamedNode, Quadruple};

    fn quad(context: &str, subject: &str) -> Quadruple {
        Quadruple::new(
            NamedNode::new(context).unwrap(),
            NamedNode::new(subject).unwrap(),
            NamedNode::new("http://example.org/p").unwrap(),
            Literal::new_simple_literal("v"),
        )
    }

    #[test]
    fn test_nquads_export_is_ordered() {
        let store = MemoryStore::from_quadruples(vec![
            quad("http://example.org/g2", "http://example.org/a"),
            quad("http://example.org/g1", "http://example.org/b"),
            quad("http://example.org/g1", "http://example.org/a"),
        ]);
        let output = QuadSerializer::new(RdfFormat::NQuads)
            .serialize_to_string(&store)
            .unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("<http://example.org/a>") && lines[0].ends_with("<http://example.org/g1> ."));
        assert!(lines[1].starts_with("<http://example.org/b>"));
        assert!(lines[2].ends_with("<http://example.org/g2> ."));
    }

    #[test]
    fn test_empty_store() {
        let empty = MemoryStore::new();
        assert_eq!(
            QuadSerializer::new(RdfFormat::NQuads)
                .serialize_to_string(&empty)
                .unwrap(),
            ""
        );
        let trix = QuadSerializer::new(RdfFormat::TriX)
            .serialize_to_string(&empty)
            .unwrap();
        assert!(trix.contains("TriX"));
    }
}
