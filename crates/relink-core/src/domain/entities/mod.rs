pub mod context;
pub mod extension;
pub mod link;

pub use context::ResolverContext;
pub use extension::ExtensionId;
pub use link::{LinkKind, LinkNode, LinkStatus, ResolvedLink};
