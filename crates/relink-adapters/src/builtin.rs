//! Built-in resolver extensions.
//!
//! Registered in this order, which satisfies their declared constraints:
//!
//! | Id               | Scope    | Ordering             |
//! |------------------|----------|----------------------|
//! | `markdown-links` | global   | before `base-url`    |
//! | `wiki-links`     | document | before `base-url`    |
//! | `base-url`       | document | after both of above  |
//!
//! The per-document extensions read overrides from the pass context
//! (`base_url`, `wiki_prefix`), so one service can render documents for
//! different sites.

use std::sync::Arc;

use relink_core::{
    application::ports::LinkResolverFactory,
    domain::{ExtensionId, ResolverContext},
    error::RelinkResult,
};
use serde::{Deserialize, Serialize};

use crate::{
    factory::FnResolverFactory,
    resolvers::{BaseUrlResolver, MarkdownLinkResolver, WikiLinkResolver},
};

pub const MARKDOWN_LINKS: ExtensionId = ExtensionId::from_static("markdown-links");
pub const WIKI_LINKS: ExtensionId = ExtensionId::from_static("wiki-links");
pub const BASE_URL: ExtensionId = ExtensionId::from_static("base-url");

/// Context property that overrides [`ResolverSettings::base_url`].
pub const BASE_URL_PROPERTY: &str = "base_url";
/// Context property that overrides [`ResolverSettings::wiki_prefix`].
pub const WIKI_PREFIX_PROPERTY: &str = "wiki_prefix";

/// Settings for the built-in resolvers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverSettings {
    /// Base URL relative links are joined onto. `None` leaves them relative.
    pub base_url: Option<String>,
    /// Prepended to wiki link slugs.
    pub wiki_prefix: String,
    /// Rewrite `*.md` links to `*.html`.
    pub rewrite_markdown: bool,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            wiki_prefix: String::new(),
            rewrite_markdown: true,
        }
    }
}

/// Build the built-in factories in registration order.
pub fn factories(settings: &ResolverSettings) -> Vec<Arc<dyn LinkResolverFactory>> {
    let mut factories = Vec::with_capacity(3);

    if settings.rewrite_markdown {
        factories.push(
            FnResolverFactory::new(MARKDOWN_LINKS, |_| Ok(MarkdownLinkResolver::new()))
                .before(BASE_URL)
                .global_scope(true)
                .into_shared(),
        );
    }

    let wiki_prefix = settings.wiki_prefix.clone();
    factories.push(
        FnResolverFactory::new(WIKI_LINKS, move |ctx: &ResolverContext| {
            let prefix = ctx.property(WIKI_PREFIX_PROPERTY).unwrap_or(&wiki_prefix);
            Ok(WikiLinkResolver::new(prefix))
        })
        .before(BASE_URL)
        .into_shared(),
    );

    let base_url = settings.base_url.clone();
    factories.push(
        FnResolverFactory::new(BASE_URL, move |ctx: &ResolverContext| {
            base_url_resolver(ctx, base_url.as_deref())
        })
        .after(MARKDOWN_LINKS)
        .after(WIKI_LINKS)
        .into_shared(),
    );

    factories
}

fn base_url_resolver(
    ctx: &ResolverContext,
    configured: Option<&str>,
) -> RelinkResult<BaseUrlResolver> {
    match ctx.property(BASE_URL_PROPERTY).or(configured) {
        Some(base) => Ok(BaseUrlResolver::new(base)?),
        None => Ok(BaseUrlResolver::passthrough()),
    }
}
