//! Infrastructure adapters for relink.
//!
//! This crate implements the ports defined in `relink-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod builtin;
pub mod documents;
pub mod factory;
pub mod renderer;
pub mod resolvers;

// Re-export commonly used adapters
pub use builtin::ResolverSettings;
pub use factory::FnResolverFactory;
pub use renderer::PulldownRenderer;
pub use resolvers::{BaseUrlResolver, MarkdownLinkResolver, WikiLinkResolver};
