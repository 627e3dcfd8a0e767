//! Entity processor traits.
//!
//! An entity processor performs the provider-facing work for one object
//! class kind: building request payloads, talking to the remote directory,
//! and parsing its responses. The connector only validates arguments,
//! picks the processor, and sequences the calls.
//!
//! Every provider call is awaited to completion before the connector issues
//! the next one. Processors report their own failures as
//! [`ConnectorError::Provider`](crate::error::ConnectorError::Provider); the
//! connector returns those errors to the host unchanged.
//!
//! # Example Implementation
//!
//! ```rust
//! use graph_connector::error::ConnectorResult;
//! use graph_connector::model::{
//!     AttributeDelta, AttributeSet, Filter, ObjectClassKind, OperationOptions, ResultsHandler, Uid,
//! };
//! use graph_connector::processor::EntityProcessor;
//! use graph_connector::schema::{AttributeInfo, ObjectClassInfo, SchemaBuilder};
//!
//! struct ReadOnlyUsers;
//!
//! impl EntityProcessor for ReadOnlyUsers {
//!     async fn create(&self, _existing: Option<&Uid>, _attributes: AttributeSet) -> ConnectorResult<Uid> {
//!         Ok(Uid::new("generated"))
//!     }
//!
//!     async fn delete(&self, _uid: &Uid) -> ConnectorResult<()> {
//!         Ok(())
//!     }
//!
//!     async fn query(
//!         &self,
//!         _filter: Option<&Filter>,
//!         _handler: &mut (dyn ResultsHandler + Send),
//!         _options: &OperationOptions,
//!     ) -> ConnectorResult<()> {
//!         Ok(())
//!     }
//!
//!     async fn update_replace(&self, _uid: &Uid, _attributes: AttributeSet) -> ConnectorResult<()> {
//!         Ok(())
//!     }
//!
//!     async fn update_multi_value_delta(
//!         &self,
//!         _uid: &Uid,
//!         _deltas: Vec<AttributeDelta>,
//!         _options: &OperationOptions,
//!     ) -> ConnectorResult<()> {
//!         Ok(())
//!     }
//!
//!     fn contribute_schema(&self, builder: &mut SchemaBuilder) -> ConnectorResult<()> {
//!         builder.define_object_class(
//!             ObjectClassInfo::new(ObjectClassKind::Account)
//!                 .with_attribute(AttributeInfo::string("userPrincipalName").required()),
//!         )
//!     }
//!
//!     async fn test_connection(&self) -> ConnectorResult<()> {
//!         Ok(())
//!     }
//! }
//! ```

use crate::error::ConnectorResult;
use crate::model::{AttributeDelta, AttributeSet, Filter, OperationOptions, ResultsHandler, Uid};
use crate::schema::SchemaBuilder;
use std::future::Future;

/// Provider-facing operations for one object class kind.
pub trait EntityProcessor: Send + Sync {
    /// Create an object, or update it when `existing` names one.
    ///
    /// Returns the identifier assigned by the directory.
    fn create(
        &self,
        existing: Option<&Uid>,
        attributes: AttributeSet,
    ) -> impl Future<Output = ConnectorResult<Uid>> + Send;

    fn delete(&self, uid: &Uid) -> impl Future<Output = ConnectorResult<()>> + Send;

    /// Stream matching objects through `handler`.
    ///
    /// Implementations must stop fetching as soon as the handler returns
    /// `false`.
    fn query(
        &self,
        filter: Option<&Filter>,
        handler: &mut (dyn ResultsHandler + Send),
        options: &OperationOptions,
    ) -> impl Future<Output = ConnectorResult<()>> + Send;

    /// Replace the listed attributes wholesale. An attribute with no values
    /// is cleared.
    fn update_replace(
        &self,
        uid: &Uid,
        attributes: AttributeSet,
    ) -> impl Future<Output = ConnectorResult<()>> + Send;

    /// Apply add/remove changes to multi-valued attributes.
    fn update_multi_value_delta(
        &self,
        uid: &Uid,
        deltas: Vec<AttributeDelta>,
        options: &OperationOptions,
    ) -> impl Future<Output = ConnectorResult<()>> + Send;

    /// Define this processor's object class in the schema catalog.
    fn contribute_schema(&self, builder: &mut SchemaBuilder) -> ConnectorResult<()>;

    fn test_connection(&self) -> impl Future<Output = ConnectorResult<()>> + Send;
}

/// Group processors additionally manage membership-style attribute values.
pub trait GroupProcessor: EntityProcessor {
    /// Add the given values (members, owners) to the group.
    fn add_members(
        &self,
        uid: &Uid,
        attributes: AttributeSet,
    ) -> impl Future<Output = ConnectorResult<()>> + Send;

    /// Remove the given values (members, owners) from the group.
    fn remove_members(
        &self,
        uid: &Uid,
        attributes: AttributeSet,
    ) -> impl Future<Output = ConnectorResult<()>> + Send;
}
