use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::domain::DomainError;

/// Per-pass context handed to resolver factories and resolvers.
///
/// Owned by the render pass; factories only borrow it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolverContext {
    document: Option<PathBuf>,
    properties: BTreeMap<String, String>,
}

impl ResolverContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path of the document being rendered, if it came from a file.
    pub fn with_document(mut self, path: impl Into<PathBuf>) -> Self {
        self.document = Some(path.into());
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Merge `key=value` pairs, later entries win.
    pub fn with_properties<I, K, V>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.properties
            .extend(properties.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn document(&self) -> Option<&Path> {
        self.document.as_deref()
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }
}

/// Parse a `key=value` pair as given on the command line.
pub fn parse_property(raw: &str) -> Result<(String, String), DomainError> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(DomainError::InvalidProperty {
            raw: raw.to_string(),
        }),
    }
}
