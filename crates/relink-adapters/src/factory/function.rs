//! Resolver factory backed by a stored callable.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use relink_core::{
    application::ports::{LinkResolver, LinkResolverFactory},
    domain::{ExtensionId, ResolverContext},
    error::RelinkResult,
};
use tracing::trace;

type ResolverFn = dyn Fn(&ResolverContext) -> RelinkResult<Box<dyn LinkResolver>> + Send + Sync;

/// Adapts a caller-supplied function into a [`LinkResolverFactory`].
///
/// The factory only carries ordering metadata and the function. Every call to
/// [`create`](LinkResolverFactory::create) invokes the function once with the
/// pass context and returns whatever it produced, errors included.
///
/// Metadata is fixed once the factory is shared with a render service; the
/// builder methods consume `self` and are meant for construction only.
#[derive(Clone)]
pub struct FnResolverFactory {
    id: ExtensionId,
    after: BTreeSet<ExtensionId>,
    before: BTreeSet<ExtensionId>,
    global_scope: bool,
    resolver_fn: Arc<ResolverFn>,
}

impl FnResolverFactory {
    /// Create a factory with no ordering constraints and document scope.
    pub fn new<F, R>(id: impl Into<ExtensionId>, resolver_fn: F) -> Self
    where
        F: Fn(&ResolverContext) -> RelinkResult<R> + Send + Sync + 'static,
        R: LinkResolver + 'static,
    {
        Self {
            id: id.into(),
            after: BTreeSet::new(),
            before: BTreeSet::new(),
            global_scope: false,
            resolver_fn: Arc::new(move |ctx: &ResolverContext| {
                resolver_fn(ctx).map(|resolver| Box::new(resolver) as Box<dyn LinkResolver>)
            }),
        }
    }

    /// Create a factory with all metadata given up front.
    pub fn with_dependents<F, R>(
        id: impl Into<ExtensionId>,
        after: impl IntoIterator<Item = ExtensionId>,
        before: impl IntoIterator<Item = ExtensionId>,
        global_scope: bool,
        resolver_fn: F,
    ) -> Self
    where
        F: Fn(&ResolverContext) -> RelinkResult<R> + Send + Sync + 'static,
        R: LinkResolver + 'static,
    {
        Self {
            after: after.into_iter().collect(),
            before: before.into_iter().collect(),
            global_scope,
            ..Self::new(id, resolver_fn)
        }
    }

    /// Require `id` to be ordered before this extension.
    pub fn after(mut self, id: impl Into<ExtensionId>) -> Self {
        self.after.insert(id.into());
        self
    }

    /// Require `id` to be ordered after this extension.
    pub fn before(mut self, id: impl Into<ExtensionId>) -> Self {
        self.before.insert(id.into());
        self
    }

    pub fn global_scope(mut self, global_scope: bool) -> Self {
        self.global_scope = global_scope;
        self
    }

    /// Share as a trait object, the form a render service registers.
    pub fn into_shared(self) -> Arc<dyn LinkResolverFactory> {
        Arc::new(self)
    }
}

impl LinkResolverFactory for FnResolverFactory {
    fn id(&self) -> &ExtensionId {
        &self.id
    }

    fn after_dependents(&self) -> &BTreeSet<ExtensionId> {
        &self.after
    }

    fn before_dependents(&self) -> &BTreeSet<ExtensionId> {
        &self.before
    }

    fn affects_global_scope(&self) -> bool {
        self.global_scope
    }

    fn create(&self, ctx: &ResolverContext) -> RelinkResult<Box<dyn LinkResolver>> {
        trace!(extension = %self.id, document = ?ctx.document(), "Creating resolver");
        (self.resolver_fn)(ctx)
    }
}

impl fmt::Debug for FnResolverFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnResolverFactory")
            .field("id", &self.id)
            .field("after", &self.after)
            .field("before", &self.before)
            .field("global_scope", &self.global_scope)
            .finish_non_exhaustive()
    }
}
