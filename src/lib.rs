//! Identity-provisioning connector for directory users and groups.
//!
//! Exposes the uniform create/delete/query/update/schema contract an
//! identity-management host expects and routes every call to the entity
//! processor responsible for the object class.
//!
//! # Core Components
//!
//! - [`GraphConnector`] - Validates host calls and dispatches them to processors
//! - [`EntityProcessor`] / [`GroupProcessor`] - Provider-facing work per object class
//! - [`partition_deltas`] - Splits incremental changes into replace and add/remove groups
//! - [`SchemaCache`](schema::SchemaCache) - Build-once schema catalog
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use graph_connector::{GraphConfiguration, GraphConnector};
//! use graph_connector::model::{AttributeDelta, ObjectClass, OperationOptions};
//! use graph_connector::providers::InMemoryDirectory;
//!
//! # async fn example(uid: graph_connector::model::Uid) -> Result<(), Box<dyn std::error::Error>> {
//! let directory = InMemoryDirectory::new();
//! let connector = GraphConnector::init(
//!     GraphConfiguration::new("contoso", "app-id", "secret"),
//!     directory.users(),
//!     directory.groups(),
//! )?;
//!
//! connector
//!     .update_delta(
//!         Some(&ObjectClass::account()),
//!         &uid,
//!         Some(vec![
//!             AttributeDelta::replace("jobTitle", ["Engineer"]),
//!             AttributeDelta::add("otherMails", ["ada@lovelace.org"]),
//!         ]),
//!         Some(&OperationOptions::default()),
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod connector;
pub mod error;
pub mod model;
pub mod partition;
pub mod processor;
pub mod providers;
pub mod schema;

// Re-export commonly used types for convenience
pub use config::GraphConfiguration;
pub use connector::GraphConnector;
pub use error::{ConfigError, ConnectorError, ConnectorResult};
pub use partition::{PartitionedDeltas, partition_deltas};
pub use processor::{EntityProcessor, GroupProcessor};
pub use schema::{SchemaCache, SchemaDescription};
