//! Joins relative link destinations onto a base URL.

use relink_core::{
    application::ports::LinkResolver,
    domain::{DomainError, LinkKind, LinkNode, LinkStatus, ResolvedLink, ResolverContext},
};
use url::Url;

/// Resolves relative destinations against a base URL.
///
/// Absolute URLs, fragment-only links and e-mail links pass through
/// untouched. Without a base the resolver passes every link through.
#[derive(Debug, Clone, Default)]
pub struct BaseUrlResolver {
    base: Option<Url>,
}

impl BaseUrlResolver {
    pub fn new(base: &str) -> Result<Self, DomainError> {
        let url = Url::parse(base).map_err(|e| DomainError::InvalidBaseUrl {
            url: base.to_string(),
            reason: e.to_string(),
        })?;
        if url.cannot_be_a_base() {
            return Err(DomainError::InvalidBaseUrl {
                url: base.to_string(),
                reason: "URL cannot be used as a base".into(),
            });
        }
        Ok(Self { base: Some(url) })
    }

    /// A resolver that leaves every link alone.
    pub fn passthrough() -> Self {
        Self::default()
    }
}

impl LinkResolver for BaseUrlResolver {
    fn resolve_link(
        &self,
        _node: &LinkNode,
        _ctx: &ResolverContext,
        link: ResolvedLink,
    ) -> ResolvedLink {
        let Some(base) = &self.base else {
            return link;
        };
        if link.kind == LinkKind::Email || link.url.is_empty() || link.url.starts_with('#') {
            return link;
        }
        if Url::parse(&link.url).is_ok() {
            return link;
        }
        match base.join(&link.url) {
            Ok(joined) => link.with_url(joined).with_status(LinkStatus::Valid),
            Err(_) => link.with_status(LinkStatus::Invalid),
        }
    }
}
