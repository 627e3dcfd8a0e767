//! Splitting incremental deltas by the kind of provider call they need.
//!
//! Whole-value replacements become one attribute set for a single
//! replace-style update. Add/remove changes stay as deltas for the
//! multi-value update. The two never mix in one provider request.

use crate::model::{Attribute, AttributeDelta, AttributeSet};
use log::{debug, warn};

/// Result of [`partition_deltas`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionedDeltas {
    /// Attributes to replace wholesale; an empty value list clears
    pub replace: AttributeSet,
    /// Add/remove changes of multi-valued attributes, in input order
    pub multi_value: Vec<AttributeDelta>,
}

impl PartitionedDeltas {
    pub fn is_empty(&self) -> bool {
        self.replace.is_empty() && self.multi_value.is_empty()
    }
}

/// Partition deltas into replace and multi-value groups.
///
/// A delta carrying replace values, including an empty list, goes to the
/// replace set; any other delta goes unchanged to the multi-value list. A
/// delta that adds nothing and removes nothing is dropped.
pub fn partition_deltas<I>(deltas: I) -> PartitionedDeltas
where
    I: IntoIterator<Item = AttributeDelta>,
{
    let mut partitioned = PartitionedDeltas::default();

    for delta in deltas {
        if !delta.has_payload() {
            warn!("Dropping delta without payload for attribute '{}'", delta.name());
            continue;
        }

        match delta.values_to_replace() {
            Some(values) => {
                debug!("Replace set gets {}", delta);
                partitioned
                    .replace
                    .insert(Attribute::new(delta.name(), values.to_vec()));
            }
            None => {
                debug!("Multi-value set gets {}", delta);
                partitioned.multi_value.push(delta);
            }
        }
    }

    partitioned
}
