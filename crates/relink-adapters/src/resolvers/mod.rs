//! Built-in link resolvers.

pub mod base_url;
pub mod markdown_links;
pub mod wiki_links;

pub use base_url::BaseUrlResolver;
pub use markdown_links::MarkdownLinkResolver;
pub use wiki_links::{WikiLinkResolver, slugify};
