//! Operation option bag.

use serde::{Deserialize, Serialize};

/// Options the host attaches to an operation.
///
/// Whether the bag is present at all is a separate question; see the
/// individual connector operations for which ones require it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationOptions {
    /// Restrict returned attributes to these names
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes_to_get: Option<Vec<String>>,
    /// Maximum number of results to return
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
    /// Number of matching results to skip
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paged_results_offset: Option<usize>,
}

impl OperationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attributes_to_get<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes_to_get = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.paged_results_offset = Some(offset);
        self
    }
}
