//! Rewrites links between Markdown documents to their rendered HTML names.

use relink_core::{
    application::ports::LinkResolver,
    domain::{LinkKind, LinkNode, ResolvedLink, ResolverContext},
};
use url::Url;

const MARKDOWN_EXTENSIONS: &[&str] = &[".md", ".markdown"];

/// `guide.md#setup` becomes `guide.html#setup`.
///
/// The link stays unresolved so later resolvers (a base URL, typically) still
/// see it.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownLinkResolver;

impl MarkdownLinkResolver {
    pub fn new() -> Self {
        Self
    }
}

impl LinkResolver for MarkdownLinkResolver {
    fn resolve_link(
        &self,
        _node: &LinkNode,
        _ctx: &ResolverContext,
        link: ResolvedLink,
    ) -> ResolvedLink {
        if !matches!(link.kind, LinkKind::Link | LinkKind::Reference) {
            return link;
        }
        if Url::parse(&link.url).is_ok() {
            return link;
        }
        match rewrite(&link.url) {
            Some(url) => link.with_url(url),
            None => link,
        }
    }
}

fn rewrite(url: &str) -> Option<String> {
    let (rest, fragment) = match url.find(['?', '#']) {
        Some(pos) => url.split_at(pos),
        None => (url, ""),
    };
    let lower = rest.to_ascii_lowercase();
    MARKDOWN_EXTENSIONS
        .iter()
        .find(|ext| lower.ends_with(*ext))
        .map(|ext| format!("{}.html{}", &rest[..rest.len() - ext.len()], fragment))
}
