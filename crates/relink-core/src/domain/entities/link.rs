use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// How a link was written in the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkKind {
    /// `[text](dest)`
    Link,
    /// `![alt](src)`
    Image,
    /// `[[Target]]` or `[[Target|text]]`
    WikiLink,
    /// `<https://example.org>`
    Autolink,
    /// `<user@example.org>`
    Email,
    /// `[text][ref]`, `[ref][]` or `[ref]`
    Reference,
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Link => write!(f, "link"),
            Self::Image => write!(f, "image"),
            Self::WikiLink => write!(f, "wiki-link"),
            Self::Autolink => write!(f, "autolink"),
            Self::Email => write!(f, "email"),
            Self::Reference => write!(f, "reference"),
        }
    }
}

/// A link as it appears in the source document, before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkNode {
    pub kind: LinkKind,
    /// Destination exactly as written (after reference lookup).
    pub destination: String,
    pub title: String,
    /// Reference label for reference-style links, empty otherwise.
    pub reference: String,
    /// Visible text (alt text for images).
    pub text: String,
}

impl LinkNode {
    pub fn new(kind: LinkKind, destination: impl Into<String>) -> Self {
        Self {
            kind,
            destination: destination.into(),
            title: String::new(),
            reference: String::new(),
            text: String::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Split the destination into path and `#fragment` (fragment without `#`).
    pub fn split_fragment(&self) -> (&str, Option<&str>) {
        match self.destination.split_once('#') {
            Some((path, fragment)) => (path, Some(fragment)),
            None => (self.destination.as_str(), None),
        }
    }
}

/// Resolution state of a link.
///
/// Anything other than [`LinkStatus::Unknown`] ends the resolver chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStatus {
    #[default]
    Unknown,
    Valid,
    Invalid,
    Unchecked,
}

impl LinkStatus {
    pub fn is_final(self) -> bool {
        self != Self::Unknown
    }
}

/// Outcome of link resolution: what the renderer will emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    pub kind: LinkKind,
    pub url: String,
    pub title: String,
    pub status: LinkStatus,
    /// Extra HTML attributes, emitted in key order.
    pub attributes: BTreeMap<String, String>,
}

impl ResolvedLink {
    pub fn new(kind: LinkKind, url: impl Into<String>) -> Self {
        Self {
            kind,
            url: url.into(),
            title: String::new(),
            status: LinkStatus::Unknown,
            attributes: BTreeMap::new(),
        }
    }

    /// Starting point of the chain: the node's own destination and title.
    pub fn unresolved(node: &LinkNode) -> Self {
        Self::new(node.kind, node.destination.clone()).with_title(node.title.clone())
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_status(mut self, status: LinkStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn is_final(&self) -> bool {
        self.status.is_final()
    }
}
