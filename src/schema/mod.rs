//! Schema catalog for the supported object classes.
//!
//! Each entity processor contributes the attribute definitions of its object
//! class to a [`SchemaBuilder`]; the resulting [`SchemaDescription`] is kept
//! in a [`SchemaCache`] for the lifetime of the connector instance.
//!
//! # Key Types
//!
//! - [`SchemaDescription`] - Immutable catalog, kind → attributes
//! - [`AttributeInfo`] - Name, type, cardinality and mutability of one attribute
//! - [`SchemaCache`] - Build-once, concurrency-safe holder of the catalog

pub mod builder;
pub mod cache;
pub mod types;

#[cfg(test)]
mod tests;

pub use builder::SchemaBuilder;
pub use cache::SchemaCache;
pub use types::{
    AttributeDataType, AttributeInfo, Cardinality, Mutability, ObjectClassInfo, SchemaDescription,
};
