//! Schema retrieval for the connector.

use super::core::GraphConnector;
use crate::error::{ConnectorError, ConnectorResult};
use crate::processor::{EntityProcessor, GroupProcessor};
use crate::schema::SchemaDescription;
use log::error;
use std::sync::Arc;

impl<U: EntityProcessor, G: GroupProcessor> GraphConnector<U, G> {
    /// Schema for both object classes.
    ///
    /// The first call asks the user and group processors to contribute their
    /// definitions; later calls return the cached description. Concurrent
    /// first callers wait for the same build.
    pub async fn schema(&self) -> ConnectorResult<Arc<SchemaDescription>> {
        self.schema_cache
            .get_or_build(|builder| {
                self.users.contribute_schema(builder)?;
                self.groups.contribute_schema(builder)
            })
            .await
    }

    /// Whether `attribute_name` is multi-valued in `object_class_name`.
    ///
    /// Unknown attributes are single-valued. An unknown object class is an
    /// error.
    pub async fn is_attribute_multi_valued(
        &self,
        object_class_name: &str,
        attribute_name: &str,
    ) -> ConnectorResult<bool> {
        let schema = self.schema().await?;
        let Some(info) = schema.find_object_class_info(object_class_name) else {
            error!(
                "The value of the ObjectClass parameter is unsupported: {}",
                object_class_name
            );
            return Err(ConnectorError::unsupported_object_class(object_class_name));
        };
        Ok(info.is_multi_valued(attribute_name))
    }
}
