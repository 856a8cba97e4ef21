//! Core domain layer for relink.
//!
//! This module contains the link model with ZERO I/O. Parsing, HTML output and
//! the resolver strategies themselves are reached through ports defined in
//! the application layer.
//!
//! - **No async**: resolution is synchronous
//! - **No I/O**: no filesystem, network, or external calls
//! - **Value types**: links and contexts are `Clone + PartialEq`
pub mod entities;
pub mod error;

pub use entities::{
    context::parse_property, ExtensionId, LinkKind, LinkNode, LinkStatus, ResolvedLink,
    ResolverContext,
};

pub use error::{DomainError, ErrorCategory};
