//! Wire formats

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Quad-capable RDF serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RdfFormat {
    /// N-Quads (line-based)
    NQuads,
    /// TriX (XML)
    TriX,
    /// TriG (Turtle with graph blocks)
    TriG,
}

impl RdfFormat {
    pub const ALL: [RdfFormat; 3] = [RdfFormat::NQuads, RdfFormat::TriX, RdfFormat::TriG];

    /// Canonical file extension
    pub fn extension(&self) -> &'static str {
        match self {
            RdfFormat::NQuads => "nq",
            RdfFormat::TriX => "trix",
            RdfFormat::TriG => "trig",
        }
    }

    pub fn media_type(&self) -> &'static str {
        match self {
            RdfFormat::NQuads => "application/n-quads",
            RdfFormat::TriX => "application/trix",
            RdfFormat::TriG => "application/trig",
        }
    }

    /// Look up a format by file extension (case-insensitive, without the dot)
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "nq" | "nquads" => Some(RdfFormat::NQuads),
            "trix" | "xml" => Some(RdfFormat::TriX),
            "trig" => Some(RdfFormat::TriG),
            _ => None,
        }
    }

    /// Look up a format by the extension of a path
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Look up a format by media type, ignoring parameters such as `charset`
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        let essence = media_type.split(';').next().unwrap_or_default().trim();
        Self::ALL
            .into_iter()
            .find(|format| format.media_type().eq_ignore_ascii_case(essence))
    }
}

impl fmt::Display for RdfFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RdfFormat::NQuads => "N-Quads",
            RdfFormat::TriX => "TriX",
            RdfFormat::TriG => "TriG",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for RdfFormat {
    type Err = String;

    /// Accepts format names (`nquads`, `N-Quads`, `trix`, `trig`) and extensions
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase().replace('-', "");
        Self::from_extension(&name).ok_or_else(|| format!("Unknown RDF format: {}", s))
    }
}
