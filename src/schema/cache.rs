//! Build-once cache for the schema catalog.

use super::builder::SchemaBuilder;
use super::types::SchemaDescription;
use crate::error::{ConnectorError, ConnectorResult};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Lazily built, shared schema catalog.
///
/// Concurrent first callers wait on a single build; once a build succeeds
/// every later caller gets the same `Arc`. A failed build caches nothing, so
/// the next call starts over.
#[derive(Debug, Default)]
pub struct SchemaCache {
    cell: OnceCell<Arc<SchemaDescription>>,
}

impl SchemaCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached catalog, building it with `contribute` on first use.
    ///
    /// `contribute` receives an empty builder and must define every object
    /// class; any error it returns aborts the build.
    pub async fn get_or_build<F>(&self, contribute: F) -> ConnectorResult<Arc<SchemaDescription>>
    where
        F: FnOnce(&mut SchemaBuilder) -> ConnectorResult<()>,
    {
        self.cell
            .get_or_try_init(|| async move {
                log::info!("Building schema catalog");
                let mut builder = SchemaBuilder::new();
                contribute(&mut builder)?;
                let schema = builder.build()?;
                Ok::<_, ConnectorError>(Arc::new(schema))
            })
            .await
            .cloned()
    }

    /// The cached catalog, without triggering a build.
    pub fn cached(&self) -> Option<Arc<SchemaDescription>> {
        self.cell.get().cloned()
    }

    /// Drop the cached catalog so the next request rebuilds it.
    pub fn invalidate(&mut self) {
        if self.cell.take().is_some() {
            log::debug!("Schema catalog invalidated");
        }
    }
}
