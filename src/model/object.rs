//! Query results and the handler they are streamed through.

use super::attribute::AttributeSet;
use super::object_class::ObjectClassKind;
use super::uid::Uid;
use serde::{Deserialize, Serialize};

/// A directory object returned from a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorObject {
    object_class: ObjectClassKind,
    uid: Uid,
    name: String,
    attributes: AttributeSet,
}

impl ConnectorObject {
    pub fn new(
        object_class: ObjectClassKind,
        uid: Uid,
        name: impl Into<String>,
        attributes: AttributeSet,
    ) -> Self {
        Self {
            object_class,
            uid,
            name: name.into(),
            attributes,
        }
    }

    pub fn object_class(&self) -> ObjectClassKind {
        self.object_class
    }

    pub fn uid(&self) -> &Uid {
        &self.uid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    pub fn into_attributes(self) -> AttributeSet {
        self.attributes
    }
}

/// Receives query results one at a time.
///
/// Returning `false` asks the processor to stop; it must not fetch or push
/// further results after that.
pub trait ResultsHandler {
    fn handle(&mut self, object: ConnectorObject) -> bool;
}

impl<F> ResultsHandler for F
where
    F: FnMut(ConnectorObject) -> bool,
{
    fn handle(&mut self, object: ConnectorObject) -> bool {
        self(object)
    }
}
