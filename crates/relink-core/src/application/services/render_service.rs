//! Render Service - main application orchestrator.
//!
//! This service coordinates a render pass:
//! 1. Check the declared ordering constraints of the registered extensions
//! 2. Ask every factory for its resolver (the resolver chain)
//! 3. Render the document, routing every link through the chain
//!
//! Extensions run in registration order. Constraints are checked against that
//! order, never used to reorder.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;
use tracing::{debug, info, instrument, trace};

use crate::{
    application::{
        ApplicationError,
        ports::{LinkResolver, LinkResolverFactory, MarkdownRenderer},
    },
    domain::{ExtensionId, LinkNode, ResolvedLink, ResolverContext},
    error::RelinkResult,
};

/// Information about a registered extension for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionInfo {
    pub id: ExtensionId,
    pub after: BTreeSet<ExtensionId>,
    pub before: BTreeSet<ExtensionId>,
    pub global_scope: bool,
}

/// Resolvers for one render pass, in registration order.
pub struct ResolverChain {
    resolvers: Vec<(ExtensionId, Arc<dyn LinkResolver>)>,
}

impl ResolverChain {
    /// Run `node` through the chain until a resolver settles it.
    pub fn resolve(&self, node: &LinkNode, ctx: &ResolverContext) -> ResolvedLink {
        let mut link = ResolvedLink::unresolved(node);
        for (id, resolver) in &self.resolvers {
            link = resolver.resolve_link(node, ctx, link);
            if link.is_final() {
                trace!(extension = %id, url = %link.url, status = ?link.status, "Link settled");
                break;
            }
        }
        link
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

/// Main render service.
///
/// Owns the renderer and the registered resolver factories.
pub struct RenderService {
    renderer: Box<dyn MarkdownRenderer>,
    factories: Vec<Arc<dyn LinkResolverFactory>>,
    global: RwLock<HashMap<ExtensionId, Arc<dyn LinkResolver>>>,
}

impl RenderService {
    /// Create a render service with no extensions.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use relink_core::application::RenderService;
    ///
    /// let service = RenderService::new(
    ///     renderer, // impl MarkdownRenderer
    /// );
    /// ```
    pub fn new(renderer: Box<dyn MarkdownRenderer>) -> Self {
        Self {
            renderer,
            factories: Vec::new(),
            global: RwLock::new(HashMap::new()),
        }
    }

    /// Create a render service and register `factories` in order.
    pub fn with_extensions<I>(renderer: Box<dyn MarkdownRenderer>, factories: I) -> RelinkResult<Self>
    where
        I: IntoIterator<Item = Arc<dyn LinkResolverFactory>>,
    {
        let mut service = Self::new(renderer);
        for factory in factories {
            service.register(factory)?;
        }
        Ok(service)
    }

    /// Append a factory to the chain.
    pub fn register(&mut self, factory: Arc<dyn LinkResolverFactory>) -> RelinkResult<()> {
        if self.factories.iter().any(|f| f.id() == factory.id()) {
            return Err(ApplicationError::DuplicateExtension {
                id: factory.id().to_string(),
            }
            .into());
        }
        debug!(
            extension = %factory.id(),
            global_scope = factory.affects_global_scope(),
            "Extension registered"
        );
        self.factories.push(factory);
        Ok(())
    }

    /// List registered extensions.
    pub fn extensions(&self) -> Vec<ExtensionInfo> {
        self.factories
            .iter()
            .map(|f| ExtensionInfo {
                id: f.id().clone(),
                after: f.after_dependents().clone(),
                before: f.before_dependents().clone(),
                global_scope: f.affects_global_scope(),
            })
            .collect()
    }

    /// Verify the registration order against every declared constraint.
    ///
    /// Ids that are not registered are ignored.
    pub fn check_ordering(&self) -> RelinkResult<()> {
        let positions: HashMap<&ExtensionId, usize> = self
            .factories
            .iter()
            .enumerate()
            .map(|(i, f)| (f.id(), i))
            .collect();

        for (index, factory) in self.factories.iter().enumerate() {
            for other in factory.after_dependents() {
                if positions.get(other).is_some_and(|&pos| pos > index) {
                    return Err(ApplicationError::OrderingViolation {
                        extension: factory.id().to_string(),
                        other: other.to_string(),
                        constraint: "after",
                    }
                    .into());
                }
            }
            for other in factory.before_dependents() {
                if positions.get(other).is_some_and(|&pos| pos < index) {
                    return Err(ApplicationError::OrderingViolation {
                        extension: factory.id().to_string(),
                        other: other.to_string(),
                        constraint: "before",
                    }
                    .into());
                }
            }
        }
        Ok(())
    }

    /// Build the resolver chain for one pass.
    ///
    /// Global-scope resolvers are created on first use and reused afterwards.
    pub fn resolver_chain(&self, ctx: &ResolverContext) -> RelinkResult<ResolverChain> {
        let mut resolvers = Vec::with_capacity(self.factories.len());
        for factory in &self.factories {
            let resolver = if factory.affects_global_scope() {
                self.global_resolver(factory.as_ref(), ctx)?
            } else {
                Arc::from(factory.create(ctx)?)
            };
            resolvers.push((factory.id().clone(), resolver));
        }
        Ok(ResolverChain { resolvers })
    }

    /// Cached resolver for a global-scope factory.
    ///
    /// The factory runs outside the cache lock. Threads racing on the first
    /// pass may each create a resolver; the first one stored wins. The cache
    /// only holds finished resolvers, so a poisoned lock is recovered.
    fn global_resolver(
        &self,
        factory: &dyn LinkResolverFactory,
        ctx: &ResolverContext,
    ) -> RelinkResult<Arc<dyn LinkResolver>> {
        if let Some(resolver) = self
            .global
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(factory.id())
        {
            return Ok(Arc::clone(resolver));
        }

        debug!(extension = %factory.id(), "Creating global-scope resolver");
        let created: Arc<dyn LinkResolver> = Arc::from(factory.create(ctx)?);

        let mut cache = self.global.write().unwrap_or_else(PoisonError::into_inner);
        let resolver = cache.entry(factory.id().clone()).or_insert(created);
        Ok(Arc::clone(resolver))
    }

    /// Render one document.
    #[instrument(
        skip_all,
        fields(
            document = ?ctx.document(),
            extensions = self.factories.len()
        )
    )]
    pub fn render(&self, markdown: &str, ctx: &ResolverContext) -> RelinkResult<String> {
        self.check_ordering()?;
        let chain = self.resolver_chain(ctx)?;

        let mut links = 0usize;
        let html = self.renderer.render(markdown, &mut |node: &LinkNode| {
            links += 1;
            chain.resolve(node, ctx)
        })?;

        info!(links, bytes = html.len(), "Document rendered");
        Ok(html)
    }
}
