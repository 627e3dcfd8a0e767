//! Tests for the schema catalog, builder and cache.

use super::*;
use crate::error::ConnectorError;
use crate::model::{AttrValue, ObjectClassKind};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn account_info() -> ObjectClassInfo {
    ObjectClassInfo::new(ObjectClassKind::Account)
        .with_attribute(AttributeInfo::string("userPrincipalName").required())
        .with_attribute(AttributeInfo::string("businessPhones").multi_valued())
        .with_attribute(
            AttributeInfo::new("createdDateTime", AttributeDataType::DateTime)
                .mutability(Mutability::ReadOnly),
        )
}

fn group_info() -> ObjectClassInfo {
    ObjectClassInfo::new(ObjectClassKind::Group)
        .with_attribute(AttributeInfo::string("displayName").required())
        .with_attribute(AttributeInfo::string("members").multi_valued())
}

fn contribute_both(builder: &mut SchemaBuilder) -> crate::error::ConnectorResult<()> {
    builder.define_object_class(account_info())?;
    builder.define_object_class(group_info())
}

#[test]
fn test_builder_produces_catalog_for_every_kind() {
    let mut builder = SchemaBuilder::new();
    contribute_both(&mut builder).unwrap();
    let schema = builder.build().unwrap();

    assert_eq!(schema.object_classes().count(), 2);
    let account = schema.find_object_class_info("__ACCOUNT__").unwrap();
    assert_eq!(account.kind, ObjectClassKind::Account);
    assert!(account.is_multi_valued("businessPhones"));
    assert!(!account.is_multi_valued("userPrincipalName"));
    assert!(schema.find_object_class_info("__PRINTER__").is_none());
}

#[test]
fn test_unknown_attribute_is_not_multi_valued() {
    let mut builder = SchemaBuilder::new();
    contribute_both(&mut builder).unwrap();
    let schema = builder.build().unwrap();

    assert!(!schema.is_multi_valued(ObjectClassKind::Group, "noSuchAttribute"));
    assert!(schema.is_multi_valued(ObjectClassKind::Group, "members"));
}

#[test]
fn test_builder_rejects_duplicates() {
    let mut builder = SchemaBuilder::new();
    builder.define_object_class(account_info()).unwrap();
    let error = builder.define_object_class(account_info()).unwrap_err();
    assert!(matches!(error, ConnectorError::Schema { .. }));

    let duplicated = ObjectClassInfo::new(ObjectClassKind::Group)
        .with_attribute(AttributeInfo::string("displayName"))
        .with_attribute(AttributeInfo::string("displayName"));
    let error = builder.define_object_class(duplicated).unwrap_err();
    assert!(error.to_string().contains("displayName"));
    assert!(!builder.is_defined(ObjectClassKind::Group));
}

#[test]
fn test_builder_requires_every_kind() {
    let mut builder = SchemaBuilder::new();
    builder.define_object_class(account_info()).unwrap();
    let error = builder.build().unwrap_err();
    assert!(error.to_string().contains("__GROUP__"));
}

#[test]
fn test_data_type_acceptance() {
    assert!(AttributeDataType::String.accepts(&AttrValue::from("x")));
    assert!(!AttributeDataType::String.accepts(&AttrValue::from(1i64)));
    assert!(AttributeDataType::Boolean.accepts(&AttrValue::from(true)));
    assert!(AttributeDataType::DateTime.accepts(&AttrValue::from("2024-05-01T10:00:00Z")));
    assert!(!AttributeDataType::DateTime.accepts(&AttrValue::from("yesterday")));
    assert!(AttributeDataType::Binary.accepts(&AttrValue::from(vec![1u8, 2, 3])));
}

#[test]
fn test_mutability_flags() {
    let read_only = AttributeInfo::string("proxyAddresses").mutability(Mutability::ReadOnly);
    assert!(!read_only.is_creatable());
    assert!(!read_only.is_updatable());
    assert!(read_only.is_readable());

    let immutable = AttributeInfo::string("onPremisesImmutableId").mutability(Mutability::Immutable);
    assert!(immutable.is_creatable());
    assert!(!immutable.is_updatable());
}

#[test]
fn test_schema_serializes_cardinality() {
    let mut builder = SchemaBuilder::new();
    contribute_both(&mut builder).unwrap();
    let schema = builder.build().unwrap();

    let json = serde_json::to_value(&schema).unwrap();
    let attributes = &json["objectClasses"]["Group"]["attributes"];
    assert_eq!(attributes[1]["name"], "members");
    assert_eq!(attributes[1]["cardinality"], "multi");
}

#[tokio::test]
async fn test_cache_builds_once() {
    let cache = SchemaCache::new();
    let builds = AtomicUsize::new(0);

    let first = cache
        .get_or_build(|builder| {
            builds.fetch_add(1, Ordering::SeqCst);
            contribute_both(builder)
        })
        .await
        .unwrap();
    let second = cache
        .get_or_build(|builder| {
            builds.fetch_add(1, Ordering::SeqCst);
            contribute_both(builder)
        })
        .await
        .unwrap();

    assert_eq!(builds.load(Ordering::SeqCst), 1);
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_failed_build_caches_nothing() {
    let cache = SchemaCache::new();

    let result = tokio_test::block_on(cache.get_or_build(|builder| {
        builder.define_object_class(account_info())?;
        Err(ConnectorError::schema("group contribution failed"))
    }));
    assert!(result.is_err());
    assert!(cache.cached().is_none());

    let schema = tokio_test::block_on(cache.get_or_build(contribute_both)).unwrap();
    assert!(cache.cached().is_some_and(|cached| Arc::ptr_eq(&cached, &schema)));
}

#[tokio::test]
async fn test_invalidate_forces_rebuild() {
    let mut cache = SchemaCache::new();
    let first = cache.get_or_build(contribute_both).await.unwrap();

    cache.invalidate();
    assert!(cache.cached().is_none());

    let second = cache.get_or_build(contribute_both).await.unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(*first, *second);
}
