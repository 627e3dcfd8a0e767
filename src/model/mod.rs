//! Host-facing value types.
//!
//! These types describe what the identity-management host hands to the
//! connector: object classes, attribute sets, incremental deltas, unique
//! identifiers, option bags, search filters and the objects streamed back
//! from a query.

pub mod attribute;
pub mod delta;
pub mod filter;
pub mod object;
pub mod object_class;
pub mod options;
pub mod uid;

pub use attribute::{AttrValue, Attribute, AttributeSet};
pub use delta::{AttributeDelta, DeltaChange};
pub use filter::Filter;
pub use object::{ConnectorObject, ResultsHandler};
pub use object_class::{ObjectClass, ObjectClassKind};
pub use options::OperationOptions;
pub use uid::Uid;
