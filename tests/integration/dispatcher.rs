//! Host operations end to end over the in-memory directory.

use crate::common::{group, in_memory_connector, user};
use graph_connector::error::ConnectorError;
use graph_connector::model::{
    AttrValue, Attribute, AttributeDelta, AttributeSet, ConnectorObject, Filter, ObjectClass,
    ObjectClassKind, OperationOptions, ResultsHandler, Uid,
};
use graph_connector::providers::ProviderError;

fn provider_error(error: &ConnectorError) -> &ProviderError {
    error
        .provider_source()
        .and_then(|source| source.downcast_ref::<ProviderError>())
        .expect("error raised by the in-memory directory")
}

fn options() -> OperationOptions {
    OperationOptions::default()
}

#[tokio::test]
async fn test_user_lifecycle() {
    let (connector, directory) = in_memory_connector();
    let account = ObjectClass::account();

    let uid = connector
        .create(Some(&account), Some(user("ada@contoso.com", "Ada")), None)
        .await
        .unwrap();

    let unapplied = connector
        .update_delta(
            Some(&account),
            &uid,
            Some(vec![
                AttributeDelta::add("businessPhones", ["+44 20 1234"]),
                AttributeDelta::replace("jobTitle", ["Analyst"]),
                AttributeDelta::clear("displayName"),
            ]),
            Some(&options()),
        )
        .await
        .unwrap();
    assert!(unapplied.is_empty());

    let stored = directory.get(ObjectClassKind::Account, &uid).await.unwrap();
    assert_eq!(stored.get_str("jobTitle"), Some("Analyst"));
    assert!(!stored.contains("displayName"));
    assert_eq!(
        stored.get("businessPhones").unwrap().values(),
        &[AttrValue::from("+44 20 1234")]
    );

    let returned = connector
        .update(
            Some(&account),
            &uid,
            AttributeSet::new().with(Attribute::single("department", "Analytical Engines")),
            Some(&options()),
        )
        .await
        .unwrap();
    assert_eq!(returned, uid);

    connector.delete(Some(&account), &uid, None).await.unwrap();
    assert_eq!(directory.user_count().await, 0);
}

#[tokio::test]
async fn test_group_membership_through_attribute_values() {
    let (connector, directory) = in_memory_connector();
    let ada = connector
        .create(Some(&ObjectClass::account()), Some(user("ada@contoso.com", "Ada")), None)
        .await
        .unwrap();
    let grace = connector
        .create(Some(&ObjectClass::account()), Some(user("grace@contoso.com", "Grace")), None)
        .await
        .unwrap();
    let engineering = connector
        .create(Some(&ObjectClass::group()), Some(group("Engineering")), None)
        .await
        .unwrap();

    let members = AttributeSet::new().with(Attribute::new("members", [ada.value(), grace.value()]));
    connector
        .add_attribute_values(Some(&ObjectClass::group()), &engineering, members, None)
        .await
        .unwrap();
    connector
        .remove_attribute_values(
            Some(&ObjectClass::group()),
            &engineering,
            AttributeSet::new().with(Attribute::single("members", ada.value())),
            Some(&options()),
        )
        .await
        .unwrap();

    let stored = directory.get(ObjectClassKind::Group, &engineering).await.unwrap();
    assert_eq!(
        stored.get("members").unwrap().values(),
        &[AttrValue::from(grace.value())]
    );

    // Account attribute values are never touched.
    let returned = connector
        .add_attribute_values(
            Some(&ObjectClass::account()),
            &ada,
            AttributeSet::new().with(Attribute::single("otherMails", "ada@lovelace.org")),
            None,
        )
        .await
        .unwrap();
    assert_eq!(returned, ada);
    let stored = directory.get(ObjectClassKind::Account, &ada).await.unwrap();
    assert!(!stored.contains("otherMails"));
}

#[tokio::test]
async fn test_group_update_keeps_identifier() {
    let (connector, directory) = in_memory_connector();
    let uid = connector
        .create(Some(&ObjectClass::group()), Some(group("Engineering")), None)
        .await
        .unwrap();

    connector
        .update_delta(
            Some(&ObjectClass::group()),
            &uid,
            Some(vec![
                AttributeDelta::replace("description", ["Builds things"]),
                AttributeDelta::add("groupTypes", ["Unified"]),
            ]),
            Some(&options()),
        )
        .await
        .unwrap();

    assert_eq!(directory.group_count().await, 1);
    let stored = directory.get(ObjectClassKind::Group, &uid).await.unwrap();
    assert_eq!(stored.get_str("description"), Some("Builds things"));
    assert_eq!(stored.get_str("groupTypes"), Some("Unified"));
}

#[tokio::test]
async fn test_query_with_filter_and_early_stop() {
    let (connector, _directory) = in_memory_connector();
    for (upn, name) in [
        ("ada@contoso.com", "Ada Lovelace"),
        ("alan@contoso.com", "Alan Turing"),
        ("grace@fabrikam.com", "Grace Hopper"),
    ] {
        connector
            .create(Some(&ObjectClass::account()), Some(user(upn, name)), None)
            .await
            .unwrap();
    }

    let mut names = Vec::new();
    let mut collect = |object: ConnectorObject| {
        names.push(object.name().to_string());
        true
    };
    connector
        .execute_query(
            Some(&ObjectClass::account()),
            Some(&Filter::ends_with("userPrincipalName", "@CONTOSO.COM")),
            Some(&mut collect as &mut (dyn ResultsHandler + Send)),
            Some(&options()),
        )
        .await
        .unwrap();
    names.sort();
    assert_eq!(names, vec!["ada@contoso.com", "alan@contoso.com"]);

    let mut seen = 0;
    let mut first_only = |_: ConnectorObject| {
        seen += 1;
        false
    };
    connector
        .execute_query(
            Some(&ObjectClass::account()),
            None,
            Some(&mut first_only as &mut (dyn ResultsHandler + Send)),
            Some(&options()),
        )
        .await
        .unwrap();
    assert_eq!(seen, 1);
}

#[tokio::test]
async fn test_provider_errors_pass_through_unchanged() {
    let (connector, _directory) = in_memory_connector();
    connector
        .create(Some(&ObjectClass::account()), Some(user("ada@contoso.com", "Ada")), None)
        .await
        .unwrap();

    let duplicate = connector
        .create(Some(&ObjectClass::account()), Some(user("ada@contoso.com", "Ada")), None)
        .await
        .unwrap_err();
    assert!(matches!(provider_error(&duplicate), ProviderError::Duplicate { .. }));

    let missing = connector
        .delete(Some(&ObjectClass::group()), &Uid::new("no-such-group"), None)
        .await
        .unwrap_err();
    assert!(matches!(provider_error(&missing), ProviderError::NotFound { .. }));
}

#[tokio::test]
async fn test_empty_attribute_set_reaches_the_directory() {
    let (connector, _directory) = in_memory_connector();

    let error = connector
        .create(Some(&ObjectClass::account()), Some(AttributeSet::new()), None)
        .await
        .unwrap_err();

    // Accepted by the connector, rejected by the directory.
    assert!(!error.is_invalid_argument());
    assert!(matches!(
        provider_error(&error),
        ProviderError::MissingAttribute { .. }
    ));
}

#[tokio::test]
async fn test_rejected_calls_leave_directory_untouched() {
    let (connector, directory) = in_memory_connector();

    let rejected = [
        connector
            .create(None, Some(user("ada@contoso.com", "Ada")), None)
            .await
            .unwrap_err(),
        connector
            .create(Some(&ObjectClass::new("__PRINTER__")), Some(AttributeSet::new()), None)
            .await
            .unwrap_err(),
        connector
            .update_delta(Some(&ObjectClass::account()), &Uid::new(""), Some(Vec::new()), Some(&options()))
            .await
            .unwrap_err(),
    ];

    assert!(rejected[0].is_invalid_argument());
    assert!(rejected[1].is_unsupported_object_class());
    assert!(rejected[2].is_invalid_argument());
    assert_eq!(directory.user_count().await, 0);
}

#[tokio::test]
async fn test_schema_reflects_directory_catalogs() {
    let (connector, _directory) = in_memory_connector();

    let schema = connector.schema().await.unwrap();
    assert_eq!(schema.object_classes().count(), 2);
    assert!(connector
        .is_attribute_multi_valued("__ACCOUNT__", "proxyAddresses")
        .await
        .unwrap());
    assert!(!connector
        .is_attribute_multi_valued("__ACCOUNT__", "userPrincipalName")
        .await
        .unwrap());
    assert!(!connector
        .is_attribute_multi_valued("__GROUP__", "manager")
        .await
        .unwrap());

    let json = serde_json::to_value(schema.as_ref()).unwrap();
    let group_attributes = json["objectClasses"]["Group"]["attributes"].as_array().unwrap();
    let members = group_attributes
        .iter()
        .find(|attribute| attribute["name"] == "members")
        .unwrap();
    assert_eq!(members["cardinality"], "multi");
}

#[tokio::test]
async fn test_connection_and_dispose() {
    let (connector, _directory) = in_memory_connector();
    connector.test().await.unwrap();
    connector.dispose();
}
