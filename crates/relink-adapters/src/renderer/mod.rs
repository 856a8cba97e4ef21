//! Markdown renderers.

pub mod pulldown;

pub use pulldown::PulldownRenderer;
