//! Shared fixtures for the integration tests.

use graph_connector::GraphConnector;
use graph_connector::config::GraphConfiguration;
use graph_connector::error::ConnectorResult;
use graph_connector::model::{
    Attribute, AttributeDelta, AttributeSet, Filter, ObjectClassKind, OperationOptions,
    ResultsHandler, Uid,
};
use graph_connector::processor::{EntityProcessor, GroupProcessor};
use graph_connector::providers::{InMemoryDirectory, InMemoryGroups, InMemoryUsers};
use graph_connector::schema::{AttributeInfo, ObjectClassInfo, SchemaBuilder};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub type InMemoryConnector = GraphConnector<InMemoryUsers, InMemoryGroups>;

/// Install a logger once; `RUST_LOG` controls the output.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn configuration() -> GraphConfiguration {
    GraphConfiguration::new("contoso.onmicrosoft.com", "00000000-app", "s3cr3t")
}

/// Connector over a fresh in-memory directory, plus the directory itself.
pub fn in_memory_connector() -> (InMemoryConnector, InMemoryDirectory) {
    init_logging();
    let directory = InMemoryDirectory::new();
    let connector = GraphConnector::init(configuration(), directory.users(), directory.groups())
        .expect("valid configuration");
    (connector, directory)
}

pub fn user(upn: &str, display_name: &str) -> AttributeSet {
    AttributeSet::new()
        .with(Attribute::single("userPrincipalName", upn))
        .with(Attribute::single("displayName", display_name))
        .with(Attribute::single("accountEnabled", true))
}

pub fn group(display_name: &str) -> AttributeSet {
    AttributeSet::new()
        .with(Attribute::single("displayName", display_name))
        .with(Attribute::single("securityEnabled", true))
}

/// Processor that only counts schema contributions.
///
/// Each contribution sleeps on the calling thread so that concurrent first
/// callers overlap with the build.
#[derive(Clone)]
pub struct CountingProcessor {
    kind: ObjectClassKind,
    contributions: Arc<AtomicUsize>,
    delay: Duration,
}

impl CountingProcessor {
    pub fn new(kind: ObjectClassKind, delay: Duration) -> Self {
        Self {
            kind,
            contributions: Arc::new(AtomicUsize::new(0)),
            delay,
        }
    }

    pub fn contributions(&self) -> usize {
        self.contributions.load(Ordering::SeqCst)
    }
}

impl EntityProcessor for CountingProcessor {
    async fn create(&self, _existing: Option<&Uid>, _attributes: AttributeSet) -> ConnectorResult<Uid> {
        Ok(Uid::new("counted"))
    }

    async fn delete(&self, _uid: &Uid) -> ConnectorResult<()> {
        Ok(())
    }

    async fn query(
        &self,
        _filter: Option<&Filter>,
        _handler: &mut (dyn ResultsHandler + Send),
        _options: &OperationOptions,
    ) -> ConnectorResult<()> {
        Ok(())
    }

    async fn update_replace(&self, _uid: &Uid, _attributes: AttributeSet) -> ConnectorResult<()> {
        Ok(())
    }

    async fn update_multi_value_delta(
        &self,
        _uid: &Uid,
        _deltas: Vec<AttributeDelta>,
        _options: &OperationOptions,
    ) -> ConnectorResult<()> {
        Ok(())
    }

    fn contribute_schema(&self, builder: &mut SchemaBuilder) -> ConnectorResult<()> {
        self.contributions.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(self.delay);
        builder.define_object_class(
            ObjectClassInfo::new(self.kind)
                .with_attribute(AttributeInfo::string("name").required())
                .with_attribute(AttributeInfo::string("aliases").multi_valued()),
        )
    }

    async fn test_connection(&self) -> ConnectorResult<()> {
        Ok(())
    }
}

impl GroupProcessor for CountingProcessor {
    async fn add_members(&self, _uid: &Uid, _attributes: AttributeSet) -> ConnectorResult<()> {
        Ok(())
    }

    async fn remove_members(&self, _uid: &Uid, _attributes: AttributeSet) -> ConnectorResult<()> {
        Ok(())
    }
}
