//! Discovery manifests and bulk loading
//!
//! A manifest is UTF-8 text with one codec identifier per line. Lines are
//! trimmed; blank lines and `#` comments are skipped. Loading never aborts:
//! unreadable sources, unknown identifiers and failing factories become
//! warnings in the `LoadReport`.

use crate::catalog::CodecCatalog;
use crate::registry::CodecRegistry;
use bean2map_model::PropertyResolver;
use log::{debug, warn};
use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Where a manifest comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestSource {
    File(PathBuf),
    Inline { name: String, contents: String },
}

impl ManifestSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    pub fn inline(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self::Inline {
            name: name.into(),
            contents: contents.into(),
        }
    }

    fn read(&self) -> std::io::Result<Cow<'_, str>> {
        match self {
            Self::File(path) => std::fs::read_to_string(path).map(Cow::Owned),
            Self::Inline { contents, .. } => Ok(Cow::Borrowed(contents)),
        }
    }
}

impl fmt::Display for ManifestSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Inline { name, .. } => write!(f, "{}", name),
        }
    }
}

/// Non-fatal bulk load problems
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManifestWarning {
    #[error("[PRELOAD] cannot read manifest {source_name}: {reason}")]
    SourceUnreadable { source_name: String, reason: String },

    #[error("[PRELOAD] unknown codec '{identifier}' in {source_name}")]
    UnknownCodec {
        identifier: String,
        source_name: String,
    },

    #[error("[PRELOAD] cannot instantiate codec '{identifier}' from {source_name}: {reason}")]
    Instantiation {
        identifier: String,
        source_name: String,
        reason: String,
    },
}

/// Outcome of a bulk load
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Identifiers registered, in load order
    pub registered: Vec<String>,
    pub warnings: Vec<ManifestWarning>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    fn warn(&mut self, warning: ManifestWarning) {
        warn!("{}", warning);
        self.warnings.push(warning);
    }
}

/// Identifiers listed in a manifest
pub fn parse_manifest(contents: &str) -> impl Iterator<Item = &str> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

/// Instantiate and register every codec the sources list
pub fn bulk_load(
    registry: &CodecRegistry,
    catalog: &CodecCatalog,
    resolver: &PropertyResolver,
    sources: &[ManifestSource],
) -> LoadReport {
    let mut report = LoadReport::default();

    for source in sources {
        let contents = match source.read() {
            Ok(contents) => contents,
            Err(e) => {
                report.warn(ManifestWarning::SourceUnreadable {
                    source_name: source.to_string(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        for identifier in parse_manifest(&contents) {
            match catalog.instantiate(identifier, resolver) {
                Some(Ok(codec)) => {
                    debug!("[PRELOAD] {} -> {}", identifier, codec.type_name());
                    registry.register_erased(codec);
                    report.registered.push(identifier.to_string());
                }
                Some(Err(e)) => report.warn(ManifestWarning::Instantiation {
                    identifier: identifier.to_string(),
                    source_name: source.to_string(),
                    reason: e.to_string(),
                }),
                None => report.warn(ManifestWarning::UnknownCodec {
                    identifier: identifier.to_string(),
                    source_name: source.to_string(),
                }),
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", &[])]
    #[case("com.example.ACodec", &["com.example.ACodec"])]
    #[case("\tcom.example.ACodec \r\n", &["com.example.ACodec"])]
    #[case("#com.example.ACodec\n  # indented comment", &[])]
    #[case("a\na\n", &["a", "a"])]
    fn test_parse_manifest_lines(#[case] contents: &str, #[case] expected: &[&str]) {
        assert_eq!(parse_manifest(contents).collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_parse_manifest_skips_blank_and_comments() {
        let contents = "# generated\r\ncom.example.ACodec\r\n\r\n  com.example.BCodec  \n#x\n";
        assert_eq!(
            parse_manifest(contents).collect::<Vec<_>>(),
            vec!["com.example.ACodec", "com.example.BCodec"]
        );
    }

    #[test]
    fn test_source_display() {
        assert_eq!(ManifestSource::inline("builtin", "").to_string(), "builtin");
        assert_eq!(
            ManifestSource::file("/tmp/codecs.txt").to_string(),
            "/tmp/codecs.txt"
        );
    }
}
