//! Resolver factory adapters.

pub mod function;

pub use function::FnResolverFactory;
