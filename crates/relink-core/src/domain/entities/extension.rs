use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Opaque identity token for a resolver extension.
///
/// Extensions name each other through these ids when declaring ordering
/// constraints, so no extension needs to know the concrete type of another.
/// Ids of built-in extensions are `'static` and never allocate.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtensionId(Cow<'static, str>);

impl ExtensionId {
    /// Create an id from a static string without validation.
    pub const fn from_static(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    /// Fallible constructor for ids coming from user input.
    pub fn try_new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.is_empty() {
            return Err(DomainError::InvalidExtensionId {
                id,
                reason: "id cannot be empty".into(),
            });
        }
        if let Some(bad) = id
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':')))
        {
            return Err(DomainError::InvalidExtensionId {
                reason: format!("character {bad:?} is not allowed"),
                id,
            });
        }
        Ok(Self(Cow::Owned(id)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ExtensionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for ExtensionId {
    fn from(id: &'static str) -> Self {
        Self::from_static(id)
    }
}

impl From<String> for ExtensionId {
    fn from(id: String) -> Self {
        Self(Cow::Owned(id))
    }
}

impl fmt::Display for ExtensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_and_owned_ids_compare_equal() {
        assert_eq!(
            ExtensionId::from_static("base-url"),
            ExtensionId::from(String::from("base-url"))
        );
    }

    #[test]
    fn try_new_rejects_empty_and_whitespace() {
        assert!(ExtensionId::try_new("").is_err());
        assert!(ExtensionId::try_new("wiki links").is_err());
        assert!(ExtensionId::try_new("docs:api.v2").is_ok());
    }

    #[test]
    fn displays_as_plain_string() {
        let id = ExtensionId::from_static("wiki-links");
        assert_eq!(id.to_string(), "wiki-links");
        assert_eq!(id.as_str(), "wiki-links");
    }
}
