//! In-memory directory backing both entity processors.
//!
//! [`InMemoryDirectory`] keeps users and groups behind one async `RwLock` and
//! hands out two processor views over the same state: [`InMemoryUsers`] for
//! `__ACCOUNT__` and [`InMemoryGroups`] for `__GROUP__`. Group membership
//! refers to user identifiers, so both views must share one directory.
//!
//! # Features
//!
//! * Attribute validation against the user and group catalogs
//! * Generated UUID identifiers and `createdDateTime` stamps
//! * Unique `userPrincipalName` across users, compared case-insensitively
//! * Deterministic query order by identifier
//! * Incremental changes are applied all-or-nothing per call
//!
//! # Example Usage
//!
//! ```rust
//! use graph_connector::model::{Attribute, AttributeSet};
//! use graph_connector::processor::{EntityProcessor, GroupProcessor};
//! use graph_connector::providers::InMemoryDirectory;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let directory = InMemoryDirectory::new();
//! let users = directory.users();
//! let groups = directory.groups();
//!
//! let ada = users
//!     .create(None, AttributeSet::new().with(Attribute::single("userPrincipalName", "ada@contoso.com")))
//!     .await?;
//! let engineering = groups
//!     .create(None, AttributeSet::new().with(Attribute::single("displayName", "Engineering")))
//!     .await?;
//!
//! groups
//!     .add_members(&engineering, AttributeSet::new().with(Attribute::single("members", ada.value())))
//!     .await?;
//! assert_eq!(directory.group_count().await, 1);
//! # Ok(())
//! # }
//! ```

use super::catalog::{self, CREATED_DATE_TIME, DISPLAY_NAME, MEMBERS, OWNERS, USER_PRINCIPAL_NAME};
use super::error::{ProviderError, ProviderResult};
use crate::error::ConnectorResult;
use crate::model::{
    AttrValue, Attribute, AttributeDelta, AttributeSet, ConnectorObject, Filter, ObjectClassKind,
    OperationOptions, ResultsHandler, Uid,
};
use crate::processor::{EntityProcessor, GroupProcessor};
use crate::schema::{AttributeInfo, ObjectClassInfo, SchemaBuilder};
use chrono::{SecondsFormat, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Default)]
struct DirectoryState {
    users: BTreeMap<Uid, AttributeSet>,
    groups: BTreeMap<Uid, AttributeSet>,
}

impl DirectoryState {
    fn entries(&self, kind: ObjectClassKind) -> &BTreeMap<Uid, AttributeSet> {
        match kind {
            ObjectClassKind::Account => &self.users,
            ObjectClassKind::Group => &self.groups,
        }
    }

    fn entries_mut(&mut self, kind: ObjectClassKind) -> &mut BTreeMap<Uid, AttributeSet> {
        match kind {
            ObjectClassKind::Account => &mut self.users,
            ObjectClassKind::Group => &mut self.groups,
        }
    }
}

/// Thread-safe in-memory user and group directory.
#[derive(Clone, Default)]
pub struct InMemoryDirectory {
    state: Arc<RwLock<DirectoryState>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Processor view for `__ACCOUNT__` objects.
    pub fn users(&self) -> InMemoryUsers {
        InMemoryUsers {
            store: Store::new(self.state.clone(), catalog::user_object_class()),
        }
    }

    /// Processor view for `__GROUP__` objects.
    pub fn groups(&self) -> InMemoryGroups {
        InMemoryGroups {
            store: Store::new(self.state.clone(), catalog::group_object_class()),
        }
    }

    pub async fn user_count(&self) -> usize {
        self.state.read().await.users.len()
    }

    pub async fn group_count(&self) -> usize {
        self.state.read().await.groups.len()
    }

    /// Stored attributes of one object, if it exists.
    pub async fn get(&self, kind: ObjectClassKind, uid: &Uid) -> Option<AttributeSet> {
        self.state.read().await.entries(kind).get(uid).cloned()
    }

    /// Remove every user and group.
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        state.users.clear();
        state.groups.clear();
    }
}

/// Shared storage logic for one object class kind.
#[derive(Clone)]
struct Store {
    state: Arc<RwLock<DirectoryState>>,
    info: Arc<ObjectClassInfo>,
}

impl Store {
    fn new(state: Arc<RwLock<DirectoryState>>, info: ObjectClassInfo) -> Self {
        Self {
            state,
            info: Arc::new(info),
        }
    }

    fn kind(&self) -> ObjectClassKind {
        self.info.kind
    }

    fn name_attribute(&self) -> &'static str {
        match self.kind() {
            ObjectClassKind::Account => USER_PRINCIPAL_NAME,
            ObjectClassKind::Group => DISPLAY_NAME,
        }
    }

    fn attribute(&self, name: &str) -> ProviderResult<&AttributeInfo> {
        self.info
            .find_attribute(name)
            .ok_or_else(|| ProviderError::UnknownAttribute {
                kind: self.kind(),
                attribute: name.to_string(),
            })
    }

    fn check_types(info: &AttributeInfo, values: &[AttrValue]) -> ProviderResult<()> {
        match values.iter().find(|value| !info.data_type.accepts(value)) {
            Some(value) => Err(ProviderError::InvalidValue {
                attribute: info.name.clone(),
                message: format!("expected {:?}, got {} '{}'", info.data_type, value.type_name(), value),
            }),
            None => Ok(()),
        }
    }

    fn check_values(info: &AttributeInfo, values: &[AttrValue]) -> ProviderResult<()> {
        if !info.is_multi_valued() && values.len() > 1 {
            return Err(ProviderError::NotMultiValued {
                attribute: info.name.clone(),
            });
        }
        Self::check_types(info, values)
    }

    fn validate_create(&self, attributes: &AttributeSet) -> ProviderResult<()> {
        for attribute in attributes.iter() {
            let info = self.attribute(attribute.name())?;
            if !info.is_creatable() {
                return Err(ProviderError::ReadOnlyAttribute {
                    attribute: info.name.clone(),
                });
            }
            Self::check_values(info, attribute.values())?;
        }

        for required in self.info.required_attributes() {
            if attributes.get(&required.name).is_none_or(Attribute::is_empty) {
                return Err(ProviderError::MissingAttribute {
                    attribute: required.name.clone(),
                });
            }
        }
        Ok(())
    }

    fn validate_replace(&self, attributes: &AttributeSet) -> ProviderResult<()> {
        for attribute in attributes.iter() {
            let info = self.attribute(attribute.name())?;
            if !info.is_updatable() {
                return Err(ProviderError::ReadOnlyAttribute {
                    attribute: info.name.clone(),
                });
            }
            if info.required && attribute.is_empty() {
                return Err(ProviderError::MissingAttribute {
                    attribute: info.name.clone(),
                });
            }
            Self::check_values(info, attribute.values())?;
        }
        Ok(())
    }

    fn check_unique(
        &self,
        state: &DirectoryState,
        attributes: &AttributeSet,
        this: Option<&Uid>,
    ) -> ProviderResult<()> {
        if self.kind() != ObjectClassKind::Account {
            return Ok(());
        }
        let Some(upn) = attributes.get_str(USER_PRINCIPAL_NAME) else {
            return Ok(());
        };

        let taken = state.users.iter().any(|(uid, existing)| {
            Some(uid) != this
                && existing
                    .get_str(USER_PRINCIPAL_NAME)
                    .is_some_and(|other| other.eq_ignore_ascii_case(upn))
        });
        if taken {
            return Err(ProviderError::Duplicate {
                attribute: USER_PRINCIPAL_NAME.to_string(),
                value: upn.to_string(),
            });
        }
        Ok(())
    }

    /// Group members and owners must name existing users.
    fn check_references(
        &self,
        state: &DirectoryState,
        attribute: &str,
        values: &[AttrValue],
    ) -> ProviderResult<()> {
        if self.kind() != ObjectClassKind::Group || (attribute != MEMBERS && attribute != OWNERS) {
            return Ok(());
        }
        for value in values {
            let exists = value
                .as_str()
                .is_some_and(|id| state.users.contains_key(&Uid::new(id)));
            if !exists {
                return Err(ProviderError::InvalidValue {
                    attribute: attribute.to_string(),
                    message: format!("no user with id '{}'", value),
                });
            }
        }
        Ok(())
    }

    fn check_all_references(
        &self,
        state: &DirectoryState,
        attributes: &AttributeSet,
    ) -> ProviderResult<()> {
        for attribute in attributes.iter() {
            self.check_references(state, attribute.name(), attribute.values())?;
        }
        Ok(())
    }

    async fn insert(&self, attributes: AttributeSet) -> ProviderResult<Uid> {
        self.validate_create(&attributes)?;

        let mut state = self.state.write().await;
        self.check_unique(&state, &attributes, None)?;
        self.check_all_references(&state, &attributes)?;

        let uid = Uid::new(Uuid::new_v4().to_string());
        let mut stored: AttributeSet = attributes
            .into_iter()
            .filter(|attribute| !attribute.is_empty())
            .collect();
        stored.insert(Attribute::single(
            CREATED_DATE_TIME,
            Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        ));

        log::debug!("Created {} {}", self.kind(), uid);
        state.entries_mut(self.kind()).insert(uid.clone(), stored);
        Ok(uid)
    }

    async fn replace(&self, uid: &Uid, attributes: AttributeSet) -> ProviderResult<()> {
        self.validate_replace(&attributes)?;

        let mut state = self.state.write().await;
        if !state.entries(self.kind()).contains_key(uid) {
            return Err(ProviderError::not_found(self.kind(), uid.value()));
        }
        self.check_unique(&state, &attributes, Some(uid))?;
        self.check_all_references(&state, &attributes)?;

        let entry = state
            .entries_mut(self.kind())
            .get_mut(uid)
            .ok_or_else(|| ProviderError::not_found(self.kind(), uid.value()))?;
        for attribute in attributes {
            if attribute.is_empty() {
                entry.remove(attribute.name());
            } else {
                entry.insert(attribute);
            }
        }
        log::debug!("Replaced attributes of {} {}", self.kind(), uid);
        Ok(())
    }

    /// Apply add/remove deltas to a copy and store it only if every delta
    /// succeeds.
    async fn apply_deltas(&self, uid: &Uid, deltas: &[AttributeDelta]) -> ProviderResult<()> {
        let mut state = self.state.write().await;
        let mut updated = state
            .entries(self.kind())
            .get(uid)
            .cloned()
            .ok_or_else(|| ProviderError::not_found(self.kind(), uid.value()))?;

        for delta in deltas {
            let info = self.attribute(delta.name())?;
            let (Some(add), Some(remove)) = (delta.values_to_add(), delta.values_to_remove()) else {
                return Err(ProviderError::invalid_change(format!(
                    "replace of '{}' cannot be applied as an add/remove change",
                    delta.name()
                )));
            };
            if !info.is_multi_valued() {
                return Err(ProviderError::NotMultiValued {
                    attribute: info.name.clone(),
                });
            }
            if !info.is_updatable() {
                return Err(ProviderError::ReadOnlyAttribute {
                    attribute: info.name.clone(),
                });
            }
            Self::check_types(info, add)?;
            Self::check_types(info, remove)?;
            self.check_references(&state, delta.name(), add)?;

            let mut values = updated
                .get(delta.name())
                .map(|attribute| attribute.values().to_vec())
                .unwrap_or_default();
            values.retain(|value| !remove.contains(value));
            for value in add {
                if !values.contains(value) {
                    values.push(value.clone());
                }
            }

            if values.is_empty() {
                updated.remove(delta.name());
            } else {
                updated.insert(Attribute::new(delta.name(), values));
            }
        }

        log::debug!("Applied {} delta(s) to {} {}", deltas.len(), self.kind(), uid);
        state.entries_mut(self.kind()).insert(uid.clone(), updated);
        Ok(())
    }

    async fn remove(&self, uid: &Uid) -> ProviderResult<()> {
        let mut state = self.state.write().await;
        if state.entries_mut(self.kind()).remove(uid).is_none() {
            return Err(ProviderError::not_found(self.kind(), uid.value()));
        }

        if self.kind() == ObjectClassKind::Account {
            let reference = AttrValue::from(uid.value());
            for group in state.groups.values_mut() {
                for name in [MEMBERS, OWNERS] {
                    let Some(attribute) = group.get(name) else {
                        continue;
                    };
                    let remaining: Vec<AttrValue> = attribute
                        .values()
                        .iter()
                        .filter(|value| **value != reference)
                        .cloned()
                        .collect();
                    if remaining.is_empty() {
                        group.remove(name);
                    } else {
                        group.insert(Attribute::new(name, remaining));
                    }
                }
            }
        }

        log::debug!("Deleted {} {}", self.kind(), uid);
        Ok(())
    }

    async fn query(
        &self,
        filter: Option<&Filter>,
        handler: &mut (dyn ResultsHandler + Send),
        options: &OperationOptions,
    ) -> ProviderResult<()> {
        let state = self.state.read().await;
        let offset = options.paged_results_offset.unwrap_or(0);
        let limit = options.page_size.unwrap_or(usize::MAX);

        let matching = state
            .entries(self.kind())
            .iter()
            .map(|(uid, attributes)| self.to_object(uid, attributes))
            .filter(|object| filter.is_none_or(|filter| filter.matches(object)))
            .skip(offset)
            .take(limit);

        for object in matching {
            let object = match &options.attributes_to_get {
                Some(names) => {
                    let mut projected = object.attributes().clone();
                    projected.retain_names(names);
                    ConnectorObject::new(self.kind(), object.uid().clone(), object.name(), projected)
                }
                None => object,
            };
            if !handler.handle(object) {
                log::debug!("Query of {} stopped by handler", self.kind());
                break;
            }
        }
        Ok(())
    }

    fn to_object(&self, uid: &Uid, attributes: &AttributeSet) -> ConnectorObject {
        let mut readable = attributes.clone();
        for info in self.info.attributes.iter().filter(|info| !info.is_readable()) {
            readable.remove(&info.name);
        }
        let name = attributes.get_str(self.name_attribute()).unwrap_or_default();
        ConnectorObject::new(self.kind(), uid.clone(), name, readable)
    }

    fn contribute_schema(&self, builder: &mut SchemaBuilder) -> ConnectorResult<()> {
        builder.define_object_class(self.info.as_ref().clone())
    }
}

/// `__ACCOUNT__` processor over an [`InMemoryDirectory`].
#[derive(Clone)]
pub struct InMemoryUsers {
    store: Store,
}

impl EntityProcessor for InMemoryUsers {
    async fn create(&self, existing: Option<&Uid>, attributes: AttributeSet) -> ConnectorResult<Uid> {
        match existing {
            Some(uid) => {
                self.store.replace(uid, attributes).await?;
                Ok(uid.clone())
            }
            None => Ok(self.store.insert(attributes).await?),
        }
    }

    async fn delete(&self, uid: &Uid) -> ConnectorResult<()> {
        Ok(self.store.remove(uid).await?)
    }

    async fn query(
        &self,
        filter: Option<&Filter>,
        handler: &mut (dyn ResultsHandler + Send),
        options: &OperationOptions,
    ) -> ConnectorResult<()> {
        Ok(self.store.query(filter, handler, options).await?)
    }

    async fn update_replace(&self, uid: &Uid, attributes: AttributeSet) -> ConnectorResult<()> {
        Ok(self.store.replace(uid, attributes).await?)
    }

    async fn update_multi_value_delta(
        &self,
        uid: &Uid,
        deltas: Vec<AttributeDelta>,
        _options: &OperationOptions,
    ) -> ConnectorResult<()> {
        Ok(self.store.apply_deltas(uid, &deltas).await?)
    }

    fn contribute_schema(&self, builder: &mut SchemaBuilder) -> ConnectorResult<()> {
        self.store.contribute_schema(builder)
    }

    async fn test_connection(&self) -> ConnectorResult<()> {
        log::debug!("In-memory user directory reachable");
        Ok(())
    }
}

/// `__GROUP__` processor over an [`InMemoryDirectory`].
#[derive(Clone)]
pub struct InMemoryGroups {
    store: Store,
}

impl InMemoryGroups {
    /// Turn `members`/`owners` attributes into add or remove deltas.
    fn membership_deltas(
        attributes: AttributeSet,
        adding: bool,
    ) -> ProviderResult<Vec<AttributeDelta>> {
        attributes
            .into_iter()
            .map(|attribute| {
                if attribute.name() != MEMBERS && attribute.name() != OWNERS {
                    return Err(ProviderError::invalid_change(format!(
                        "'{}' is not a membership attribute",
                        attribute.name()
                    )));
                }
                let name = attribute.name().to_string();
                let values = attribute.into_values();
                Ok(if adding {
                    AttributeDelta::add(name, values)
                } else {
                    AttributeDelta::remove(name, values)
                })
            })
            .collect()
    }
}

impl EntityProcessor for InMemoryGroups {
    async fn create(&self, existing: Option<&Uid>, attributes: AttributeSet) -> ConnectorResult<Uid> {
        match existing {
            Some(uid) => {
                self.store.replace(uid, attributes).await?;
                Ok(uid.clone())
            }
            None => Ok(self.store.insert(attributes).await?),
        }
    }

    async fn delete(&self, uid: &Uid) -> ConnectorResult<()> {
        Ok(self.store.remove(uid).await?)
    }

    async fn query(
        &self,
        filter: Option<&Filter>,
        handler: &mut (dyn ResultsHandler + Send),
        options: &OperationOptions,
    ) -> ConnectorResult<()> {
        Ok(self.store.query(filter, handler, options).await?)
    }

    async fn update_replace(&self, uid: &Uid, attributes: AttributeSet) -> ConnectorResult<()> {
        Ok(self.store.replace(uid, attributes).await?)
    }

    async fn update_multi_value_delta(
        &self,
        uid: &Uid,
        deltas: Vec<AttributeDelta>,
        _options: &OperationOptions,
    ) -> ConnectorResult<()> {
        Ok(self.store.apply_deltas(uid, &deltas).await?)
    }

    fn contribute_schema(&self, builder: &mut SchemaBuilder) -> ConnectorResult<()> {
        self.store.contribute_schema(builder)
    }

    async fn test_connection(&self) -> ConnectorResult<()> {
        log::debug!("In-memory group directory reachable");
        Ok(())
    }
}

impl GroupProcessor for InMemoryGroups {
    async fn add_members(&self, uid: &Uid, attributes: AttributeSet) -> ConnectorResult<()> {
        let deltas = Self::membership_deltas(attributes, true)?;
        Ok(self.store.apply_deltas(uid, &deltas).await?)
    }

    async fn remove_members(&self, uid: &Uid, attributes: AttributeSet) -> ConnectorResult<()> {
        let deltas = Self::membership_deltas(attributes, false)?;
        Ok(self.store.apply_deltas(uid, &deltas).await?)
    }
}
