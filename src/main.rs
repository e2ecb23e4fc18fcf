//! quadstore CLI: load an RDF dataset and write it back out in another format

use anyhow::{Context, Result};
use clap::Parser;
use quadstore::{MemoryStore, NamespaceRegistry, QuadParser, QuadSerializer, RdfFormat, StoreConfig};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "quadstore", version, about = "Load an RDF dataset and write it back out")]
struct Args {
    /// Input file or http(s) URI
    input: String,

    /// Output format
    #[arg(value_enum, default_value = "nquads")]
    format: OutputFormat,

    /// YAML configuration file
    #[arg(long, env = "QUADSTORE_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Nquads,
    Trix,
    Trig,
}

impl From<OutputFormat> for RdfFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Nquads => RdfFormat::NQuads,
            OutputFormat::Trix => RdfFormat::TriX,
            OutputFormat::Trig => RdfFormat::TriG,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = match &args.config {
        Some(path) => StoreConfig::from_file(path).with_context(|| format!("loading {}", path.display()))?,
        None => StoreConfig::default(),
    };

    // Initialize tracing; RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("quadstore v{}", quadstore::version());
    let mut parser = QuadParser::with_config(config)?;
    for namespace in parser.registry().namespaces.prefixes() {
        debug!("Prefix {}: <{}>", namespace.prefix, namespace.iri);
    }

    let store = if args.input.starts_with("http://") || args.input.starts_with("https://") {
        parser.parse_uri(&args.input, None).await?
    } else {
        parser.parse_file_async(&args.input).await?
    };

    summarize(&store, &parser.registry().namespaces);

    let serializer = QuadSerializer::new(args.format.into());
    let stdout = std::io::stdout();
    let mut out = serializer.write(&store, stdout.lock())?;
    out.flush()?;
    Ok(())
}

fn summarize(store: &MemoryStore, namespaces: &NamespaceRegistry) {
    info!("Loaded {} quadruples", store.quadruples_count());
    let mut contexts = store.extract_contexts();
    contexts.sort_by_key(|c| c.to_string());
    for context in contexts {
        let label = context
            .as_named_node()
            .and_then(|node| namespaces.compact(node.as_str()))
            .unwrap_or_else(|| context.to_string());
        info!("  {} : {} quadruples", label, store.select_by_context(&context).len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_format_defaults_to_nquads() {
        let args = Args::try_parse_from(["quadstore", "data.trig"]).unwrap();
        assert_eq!(args.input, "data.trig");
        assert_eq!(RdfFormat::from(args.format), RdfFormat::NQuads);
    }

    #[test]
    fn test_explicit_format_and_config() {
        let args =
            Args::try_parse_from(["quadstore", "data.nq", "trix", "--config", "store.yaml"]).unwrap();
        assert_eq!(RdfFormat::from(args.format), RdfFormat::TriX);
        assert_eq!(args.config, Some(PathBuf::from("store.yaml")));
    }

    #[test]
    fn test_help_and_bad_format() {
        let help = Args::try_parse_from(["quadstore", "--help"]).unwrap_err();
        assert_eq!(help.kind(), clap::error::ErrorKind::DisplayHelp);

        let version = Args::try_parse_from(["quadstore", "--version"]).unwrap_err();
        assert_eq!(version.kind(), clap::error::ErrorKind::DisplayVersion);

        let bad = Args::try_parse_from(["quadstore", "data.nq", "turtle"]).unwrap_err();
        assert_eq!(bad.kind(), clap::error::ErrorKind::InvalidValue);
    }
}
