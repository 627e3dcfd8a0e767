//! Entity processor implementations.
//!
//! * [`InMemoryDirectory`] - Thread-safe in-memory directory handing out
//!   [`InMemoryUsers`] and [`InMemoryGroups`] processor views, for tests and
//!   embedded use
//! * [`catalog`] - Attribute catalogs of directory users and groups
//!
//! Processors talking to a remote directory implement the same
//! [`EntityProcessor`](crate::processor::EntityProcessor) and
//! [`GroupProcessor`](crate::processor::GroupProcessor) traits.

pub mod catalog;
pub mod error;
pub mod in_memory;

pub use error::{ProviderError, ProviderResult};
pub use in_memory::{InMemoryDirectory, InMemoryGroups, InMemoryUsers};
