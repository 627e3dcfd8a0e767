//! Schema catalog build-once behavior under concurrent first access.

use crate::common::{CountingProcessor, configuration, init_logging};
use futures::future::join_all;
use graph_connector::GraphConnector;
use graph_connector::model::ObjectClassKind;
use std::sync::Arc;
use std::time::Duration;

fn counting_connector(
    delay: Duration,
) -> (
    Arc<GraphConnector<CountingProcessor, CountingProcessor>>,
    CountingProcessor,
    CountingProcessor,
) {
    init_logging();
    let users = CountingProcessor::new(ObjectClassKind::Account, delay);
    let groups = CountingProcessor::new(ObjectClassKind::Group, delay);
    let connector = GraphConnector::init(configuration(), users.clone(), groups.clone())
        .expect("valid configuration");
    (Arc::new(connector), users, groups)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_first_access_builds_once() {
    let (connector, users, groups) = counting_connector(Duration::from_millis(50));

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let connector = Arc::clone(&connector);
            tokio::spawn(async move { connector.schema().await })
        })
        .collect();

    let schemas: Vec<_> = join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.expect("task completed").expect("schema built"))
        .collect();

    assert_eq!(users.contributions(), 1);
    assert_eq!(groups.contributions(), 1);
    let first = &schemas[0];
    assert!(schemas.iter().all(|schema| Arc::ptr_eq(schema, first)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_cardinality_lookups_share_one_build() {
    let (connector, users, _groups) = counting_connector(Duration::from_millis(20));

    let lookups = (0..8).map(|i| {
        let connector = Arc::clone(&connector);
        async move {
            let attribute = if i % 2 == 0 { "aliases" } else { "name" };
            connector
                .is_attribute_multi_valued("__GROUP__", attribute)
                .await
                .map(|multi| (attribute, multi))
        }
    });

    for result in join_all(lookups).await {
        let (attribute, multi) = result.unwrap();
        assert_eq!(multi, attribute == "aliases");
    }
    assert_eq!(users.contributions(), 1);
}

#[tokio::test]
async fn test_later_calls_never_rebuild() {
    let (connector, users, _groups) = counting_connector(Duration::ZERO);

    for _ in 0..5 {
        connector.schema().await.unwrap();
    }
    assert_eq!(users.contributions(), 1);
}
