//! Resolves `[[Page]]` and `[[Page#Section]]` wiki links to page URLs.

use relink_core::{
    application::ports::LinkResolver,
    domain::{LinkKind, LinkNode, LinkStatus, ResolvedLink, ResolverContext},
};

/// Turns wiki link targets into `<prefix><slug>.html` URLs.
///
/// The target is taken as written in the document. Targets that slugify to
/// nothing are marked invalid.
#[derive(Debug, Clone, Default)]
pub struct WikiLinkResolver {
    prefix: String,
}

impl WikiLinkResolver {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl LinkResolver for WikiLinkResolver {
    fn resolve_link(
        &self,
        node: &LinkNode,
        _ctx: &ResolverContext,
        link: ResolvedLink,
    ) -> ResolvedLink {
        if link.kind != LinkKind::WikiLink {
            return link;
        }
        let (page, section) = node.split_fragment();
        let page = slugify(page);
        if page.is_empty() {
            return link.with_status(LinkStatus::Invalid);
        }
        let mut url = format!("{}{}.html", self.prefix, page);
        if let Some(section) = section.map(slugify).filter(|s| !s.is_empty()) {
            url.push('#');
            url.push_str(&section);
        }
        link.with_url(url)
    }
}

/// Lowercase, collapse whitespace into `-`, drop anything that is not a
/// letter, digit, `-`, `_` or `.`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.trim().chars() {
        if c.is_whitespace() || c == '-' {
            pending_dash = !slug.is_empty();
        } else if c.is_alphanumeric() || c == '_' || c == '.' {
            if pending_dash {
                slug.push('-');
                pending_dash = false;
            }
            slug.extend(c.to_lowercase());
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(resolver: &WikiLinkResolver, kind: LinkKind, target: &str) -> ResolvedLink {
        let node = LinkNode::new(kind, target);
        resolver.resolve_link(&node, &ResolverContext::new(), ResolvedLink::unresolved(&node))
    }

    #[test]
    fn slugify_cases() {
        assert_eq!(slugify("Getting Started"), "getting-started");
        assert_eq!(slugify("  API   Reference  "), "api-reference");
        assert_eq!(slugify("C++ & Rust"), "c-rust");
        assert_eq!(slugify("v1.2_notes"), "v1.2_notes");
        assert_eq!(slugify("Über uns"), "über-uns");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn resolves_pages_and_sections() {
        let r = WikiLinkResolver::new("wiki/");
        let link = resolve(&r, LinkKind::WikiLink, "Getting Started#First Steps");
        assert_eq!(link.url, "wiki/getting-started.html#first-steps");
        assert_eq!(link.status, LinkStatus::Unknown);
    }

    #[test]
    fn empty_pages_are_invalid() {
        let link = resolve(&WikiLinkResolver::default(), LinkKind::WikiLink, "#only");
        assert_eq!(link.status, LinkStatus::Invalid);
    }

    #[test]
    fn resolves_from_the_written_target() {
        let node = LinkNode::new(LinkKind::WikiLink, "Home Page#Intro");
        let earlier = ResolvedLink::unresolved(&node).with_url("rewritten");
        let link = WikiLinkResolver::new("wiki/").resolve_link(&node, &ResolverContext::new(), earlier);
        assert_eq!(link.url, "wiki/home-page.html#intro");
    }

    #[test]
    fn ignores_regular_links() {
        let link = resolve(&WikiLinkResolver::new("wiki/"), LinkKind::Link, "Some Page");
        assert_eq!(link.url, "Some Page");
    }
}
