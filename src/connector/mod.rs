//! The connector's host-facing operation surface.
//!
//! # Module Organization
//!
//! * [`core`] - GraphConnector struct, initialization, reinitialization and disposal
//! * [`operations`] - Create, delete, query, update, update-delta and attribute value operations
//! * [`schema_management`] - Schema retrieval and attribute cardinality lookups
//! * `tests` - Recording test processors and dispatcher tests

pub mod core;
pub mod operations;
pub mod schema_management;


pub use core::GraphConnector;
