//! Change normalization pipeline.
//!
//! This module turns parsed what-if changes into typed resource records
//! and per-resource outcomes: materialize the before/after documents,
//! translate ARM types to canonical registry types, and consult the
//! registry to produce a priceable (or explicitly skipped) unit.

mod builder;
mod normalizer;
mod outcome;
mod record;

pub use builder::build_partial_resource;
pub use normalizer::{NormalizedChange, Normalizer};
pub use outcome::{
    CoreResource, PartialResource, Resource, SKIP_FREE_RESOURCE, SKIP_NOT_SUPPORTED,
};
pub use record::ResourceRecord;
