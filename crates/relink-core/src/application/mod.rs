//! Application layer for relink.
//!
//! This layer contains:
//! - **Services**: Render pass orchestration (RenderService)
//! - **Ports**: Interface definitions (traits) for resolvers and renderers
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates extensions but decides nothing about
//! individual links itself. That is the job of the registered resolvers.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    ExtensionInfo, // DTO for extension metadata
    RenderService,
};

// Re-export port traits (for adapter implementation)
pub use ports::{LinkResolver, LinkResolverFactory, MarkdownRenderer};

pub use error::ApplicationError;
