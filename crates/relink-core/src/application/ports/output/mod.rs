//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `relink-adapters` crate provides implementations.

use std::collections::BTreeSet;
use std::fmt;

use crate::domain::{ExtensionId, LinkNode, ResolvedLink, ResolverContext};
use crate::error::RelinkResult;

/// Port for deciding the final form of a single link.
///
/// Implemented by:
/// - `relink_adapters::resolvers::BaseUrlResolver`
/// - `relink_adapters::resolvers::MarkdownLinkResolver`
/// - `relink_adapters::resolvers::WikiLinkResolver`
/// - any `Fn(&LinkNode, &ResolverContext, ResolvedLink) -> ResolvedLink`
///
/// `link` is the result of the previous resolver in the chain (or the
/// unresolved link for the first one). Returning a link whose status is not
/// `Unknown` ends the chain.
#[cfg_attr(test, mockall::automock)]
pub trait LinkResolver: Send + Sync {
    fn resolve_link(
        &self,
        node: &LinkNode,
        ctx: &ResolverContext,
        link: ResolvedLink,
    ) -> ResolvedLink;
}

impl fmt::Debug for dyn LinkResolver + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<dyn LinkResolver>")
    }
}

impl<F> LinkResolver for F
where
    F: Fn(&LinkNode, &ResolverContext, ResolvedLink) -> ResolvedLink + Send + Sync,
{
    fn resolve_link(
        &self,
        node: &LinkNode,
        ctx: &ResolverContext,
        link: ResolvedLink,
    ) -> ResolvedLink {
        self(node, ctx, link)
    }
}

/// Port for resolver extensions.
///
/// Implemented by:
/// - `relink_adapters::factory::FnResolverFactory` (stored callable)
///
/// ## Design Notes
///
/// - Ordering constraints name other extensions by id only
/// - `create` is called once per render pass, or once per service for
///   global-scope extensions
/// - Errors from `create` reach the caller of the render pass unchanged
#[cfg_attr(test, mockall::automock)]
pub trait LinkResolverFactory: Send + Sync {
    /// Identity other extensions use to refer to this one.
    fn id(&self) -> &ExtensionId;

    /// Extensions that must be ordered before this one.
    fn after_dependents(&self) -> &BTreeSet<ExtensionId>;

    /// Extensions that must be ordered after this one.
    fn before_dependents(&self) -> &BTreeSet<ExtensionId>;

    /// Whether the produced resolver outlives a single document.
    fn affects_global_scope(&self) -> bool;

    /// Produce the resolver for a render pass.
    fn create(&self, ctx: &ResolverContext) -> RelinkResult<Box<dyn LinkResolver>>;
}

/// Port for Markdown to HTML rendering.
///
/// Implemented by:
/// - `relink_adapters::renderer::PulldownRenderer` (pulldown-cmark)
pub trait MarkdownRenderer: Send + Sync {
    /// Render `markdown` to HTML, asking `resolve` for every link and image.
    ///
    /// # Arguments
    ///
    /// * `markdown` - Source document
    /// * `resolve` - Called once per link, in document order
    fn render(
        &self,
        markdown: &str,
        resolve: &mut dyn FnMut(&LinkNode) -> ResolvedLink,
    ) -> RelinkResult<String>;
}
