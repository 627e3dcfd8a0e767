//! Integration tests through the public connector surface.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test lib integration::dispatcher
//! cargo test --test lib integration::schema_cache
//! cargo test --test lib integration::partition_properties
//! ```

pub mod dispatcher;
pub mod partition_properties;
pub mod schema_cache;
