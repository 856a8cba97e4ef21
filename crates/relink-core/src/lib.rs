//! Relink Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for relink, a
//! Markdown to HTML renderer whose link handling is delegated to pluggable
//! resolver factories.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           relink-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │            (RenderService)              │
//! │   Builds resolver chains per document   │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (LinkResolverFactory, LinkResolver,     │
//! │           MarkdownRenderer)             │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    relink-adapters (Infrastructure)     │
//! │ (FnResolverFactory, PulldownRenderer)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (ExtensionId, LinkNode, ResolvedLink,   │
//! │           ResolverContext)              │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use relink_core::{application::RenderService, domain::ResolverContext};
//!
//! // `renderer` and `factory` come from relink-adapters.
//! let mut service = RenderService::new(renderer);
//! service.register(factory).unwrap();
//!
//! let ctx = ResolverContext::new().with_document("docs/intro.md");
//! let html = service.render("[intro](intro.md)", &ctx).unwrap();
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ExtensionInfo, RenderService,
        ports::{LinkResolver, LinkResolverFactory, MarkdownRenderer},
    };
    pub use crate::domain::{
        ExtensionId, LinkKind, LinkNode, LinkStatus, ResolvedLink, ResolverContext,
    };
    pub use crate::error::{RelinkError, RelinkResult};
}

