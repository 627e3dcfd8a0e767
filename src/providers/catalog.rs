//! Attribute catalogs of directory users and groups.

use crate::model::ObjectClassKind;
use crate::schema::{AttributeDataType, AttributeInfo, Mutability, ObjectClassInfo};

pub const USER_PRINCIPAL_NAME: &str = "userPrincipalName";
pub const DISPLAY_NAME: &str = "displayName";
pub const CREATED_DATE_TIME: &str = "createdDateTime";
pub const MEMBERS: &str = "members";
pub const OWNERS: &str = "owners";

/// Attributes of a directory user.
pub fn user_object_class() -> ObjectClassInfo {
    ObjectClassInfo::new(ObjectClassKind::Account)
        .with_attribute(AttributeInfo::string(USER_PRINCIPAL_NAME).required())
        .with_attribute(AttributeInfo::string(DISPLAY_NAME))
        .with_attribute(AttributeInfo::string("givenName"))
        .with_attribute(AttributeInfo::string("surname"))
        .with_attribute(AttributeInfo::string("mail"))
        .with_attribute(AttributeInfo::string("mailNickname"))
        .with_attribute(AttributeInfo::string("jobTitle"))
        .with_attribute(AttributeInfo::string("department"))
        .with_attribute(AttributeInfo::string("mobilePhone"))
        .with_attribute(AttributeInfo::string("officeLocation"))
        .with_attribute(AttributeInfo::string("usageLocation"))
        .with_attribute(AttributeInfo::new("accountEnabled", AttributeDataType::Boolean))
        .with_attribute(AttributeInfo::string("businessPhones").multi_valued())
        .with_attribute(AttributeInfo::string("otherMails").multi_valued())
        .with_attribute(
            AttributeInfo::string("proxyAddresses")
                .multi_valued()
                .mutability(Mutability::ReadOnly),
        )
        .with_attribute(created_date_time())
}

/// Attributes of a directory group.
pub fn group_object_class() -> ObjectClassInfo {
    ObjectClassInfo::new(ObjectClassKind::Group)
        .with_attribute(AttributeInfo::string(DISPLAY_NAME).required())
        .with_attribute(AttributeInfo::string("description"))
        .with_attribute(AttributeInfo::string("mailNickname"))
        .with_attribute(AttributeInfo::new("mailEnabled", AttributeDataType::Boolean))
        .with_attribute(AttributeInfo::new("securityEnabled", AttributeDataType::Boolean))
        .with_attribute(AttributeInfo::string("groupTypes").multi_valued())
        .with_attribute(AttributeInfo::string(MEMBERS).multi_valued())
        .with_attribute(AttributeInfo::string(OWNERS).multi_valued())
        .with_attribute(created_date_time())
}

fn created_date_time() -> AttributeInfo {
    AttributeInfo::new(CREATED_DATE_TIME, AttributeDataType::DateTime)
        .mutability(Mutability::ReadOnly)
}
