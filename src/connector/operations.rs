//! Host-facing object operations.
//!
//! Every operation validates its arguments before touching a processor, so a
//! rejected call never reaches the directory. Object classes resolve to
//! [`ObjectClassKind`] and every dispatch site matches it exhaustively.

use super::core::{GraphConnector, require, require_object_class, require_uid, unsupported};
use crate::error::{ConnectorError, ConnectorResult};
use crate::model::{
    AttributeDelta, AttributeSet, Filter, ObjectClass, ObjectClassKind, OperationOptions,
    ResultsHandler, Uid,
};
use crate::partition::partition_deltas;
use crate::processor::{EntityProcessor, GroupProcessor};
use log::{debug, error, info};

impl<U: EntityProcessor, G: GroupProcessor> GraphConnector<U, G> {
    /// Create a user or group.
    ///
    /// An empty attribute set is accepted; `None` is not. Options are
    /// optional.
    pub async fn create(
        &self,
        object_class: Option<&ObjectClass>,
        attributes: Option<AttributeSet>,
        _options: Option<&OperationOptions>,
    ) -> ConnectorResult<Uid> {
        let (object_class, kind) = require_object_class(object_class)?;
        let attributes = attributes.ok_or_else(|| {
            error!("Parameter of type Set<Attribute> not provided.");
            ConnectorError::invalid_argument("Parameter of type Set<Attribute> not provided.")
        })?;

        info!("Create {} with {} attribute(s)", object_class, attributes.len());
        match kind {
            Some(ObjectClassKind::Account) => self.users.create(None, attributes).await,
            Some(ObjectClassKind::Group) => self.groups.create(None, attributes).await,
            None => Err(unsupported(object_class)),
        }
    }

    /// Delete a user or group.
    ///
    /// Unsupported object classes are accepted and nothing is deleted.
    pub async fn delete(
        &self,
        object_class: Option<&ObjectClass>,
        uid: &Uid,
        _options: Option<&OperationOptions>,
    ) -> ConnectorResult<()> {
        require_uid(uid)?;
        let (object_class, kind) = require_object_class(object_class)?;

        info!("Delete {} {}", object_class, uid);
        match kind {
            Some(ObjectClassKind::Account) => self.users.delete(uid).await,
            Some(ObjectClassKind::Group) => self.groups.delete(uid).await,
            None => {
                debug!("Delete ignored for object class {}", object_class);
                Ok(())
            }
        }
    }

    /// Stream objects matching `filter` through `handler`.
    ///
    /// A `None` filter matches every object of the class. The handler may
    /// stop the stream by returning `false`.
    pub async fn execute_query(
        &self,
        object_class: Option<&ObjectClass>,
        filter: Option<&Filter>,
        handler: Option<&mut (dyn ResultsHandler + Send)>,
        options: Option<&OperationOptions>,
    ) -> ConnectorResult<()> {
        let (object_class, kind) = require_object_class(object_class)?;
        let Some(handler) = handler else {
            error!("Parameter of type ResultsHandler not provided.");
            return Err(ConnectorError::invalid_argument(
                "Parameter of type ResultsHandler not provided.",
            ));
        };
        let options = require(options, "OperationOptions")?;

        info!("Query {} with filter {:?}", object_class, filter);
        match kind {
            Some(ObjectClassKind::Account) => self.users.query(filter, handler, options).await,
            Some(ObjectClassKind::Group) => self.groups.query(filter, handler, options).await,
            None => Err(unsupported(object_class)),
        }
    }

    /// Replace the given attributes of an existing object.
    ///
    /// Returns `uid` unchanged. Groups go through the processor's
    /// create-or-update path with the existing identifier. Unsupported object
    /// classes are accepted and nothing is updated.
    pub async fn update(
        &self,
        object_class: Option<&ObjectClass>,
        uid: &Uid,
        attributes: AttributeSet,
        options: Option<&OperationOptions>,
    ) -> ConnectorResult<Uid> {
        let (object_class, kind) = require_object_class(object_class)?;
        require_uid(uid)?;
        require(options, "OperationOptions")?;

        info!("Update {} {}", object_class, uid);
        match kind {
            Some(ObjectClassKind::Account) => {
                self.users.update_replace(uid, attributes).await?;
            }
            Some(ObjectClassKind::Group) => {
                self.groups.create(Some(uid), attributes).await?;
            }
            None => debug!("Update ignored for object class {}", object_class),
        }
        Ok(uid.clone())
    }

    /// Apply incremental attribute changes to an existing object.
    ///
    /// Whole-value replacements are sent in one replace-style update first;
    /// add/remove changes follow in one multi-value update. Either every
    /// change is applied or the first failure is returned, so the returned
    /// list of unapplied deltas is always empty on success.
    pub async fn update_delta(
        &self,
        object_class: Option<&ObjectClass>,
        uid: &Uid,
        deltas: Option<Vec<AttributeDelta>>,
        options: Option<&OperationOptions>,
    ) -> ConnectorResult<Vec<AttributeDelta>> {
        let (object_class, kind) = require_object_class(object_class)?;
        require_uid(uid)?;
        let deltas = deltas.ok_or_else(|| {
            error!("Parameter of type Set<AttributeDelta> not provided.");
            ConnectorError::invalid_argument("Parameter of type Set<AttributeDelta> not provided.")
        })?;
        let options = require(options, "OperationOptions")?;
        let Some(kind) = kind else {
            return Err(unsupported(object_class));
        };

        info!("Update delta {} {} with {} delta(s)", object_class, uid, deltas.len());
        let partitioned = partition_deltas(deltas);

        if !partitioned.replace.is_empty() {
            match kind {
                ObjectClassKind::Account => {
                    self.users.update_replace(uid, partitioned.replace).await?;
                }
                ObjectClassKind::Group => {
                    self.groups.create(Some(uid), partitioned.replace).await?;
                }
            }
        }

        if !partitioned.multi_value.is_empty() {
            match kind {
                ObjectClassKind::Account => {
                    self.users
                        .update_multi_value_delta(uid, partitioned.multi_value, options)
                        .await?;
                }
                ObjectClassKind::Group => {
                    self.groups
                        .update_multi_value_delta(uid, partitioned.multi_value, options)
                        .await?;
                }
            }
        }

        Ok(Vec::new())
    }

    /// Add values to multi-valued group attributes such as `members`.
    ///
    /// Only groups are affected; other object classes return `uid` without
    /// any processor call. Missing options are logged and tolerated.
    pub async fn add_attribute_values(
        &self,
        object_class: Option<&ObjectClass>,
        uid: &Uid,
        attributes: AttributeSet,
        options: Option<&OperationOptions>,
    ) -> ConnectorResult<Uid> {
        let (object_class, kind) = require_object_class(object_class)?;
        require_uid(uid)?;
        if options.is_none() {
            error!("Parameter of type OperationOptions not provided.");
        }

        match kind {
            Some(ObjectClassKind::Group) => {
                info!("Add attribute values to {} {}", object_class, uid);
                self.groups.add_members(uid, attributes).await?;
            }
            Some(ObjectClassKind::Account) | None => {
                debug!("Add attribute values ignored for object class {}", object_class);
            }
        }
        Ok(uid.clone())
    }

    /// Remove values from multi-valued group attributes such as `members`.
    ///
    /// Mirrors [`add_attribute_values`](Self::add_attribute_values).
    pub async fn remove_attribute_values(
        &self,
        object_class: Option<&ObjectClass>,
        uid: &Uid,
        attributes: AttributeSet,
        options: Option<&OperationOptions>,
    ) -> ConnectorResult<Uid> {
        let (object_class, kind) = require_object_class(object_class)?;
        require_uid(uid)?;
        if options.is_none() {
            error!("Parameter of type OperationOptions not provided.");
        }

        match kind {
            Some(ObjectClassKind::Group) => {
                info!("Remove attribute values from {} {}", object_class, uid);
                self.groups.remove_members(uid, attributes).await?;
            }
            Some(ObjectClassKind::Account) | None => {
                debug!("Remove attribute values ignored for object class {}", object_class);
            }
        }
        Ok(uid.clone())
    }
}
