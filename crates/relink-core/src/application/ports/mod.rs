//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `relink-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `LinkResolverFactory`: Extension registration unit, produces resolvers
//!   - `LinkResolver`: Decides the final URL and attributes of one link
//!   - `MarkdownRenderer`: Markdown to HTML
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{LinkResolver, LinkResolverFactory, MarkdownRenderer};
