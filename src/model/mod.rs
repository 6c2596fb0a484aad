//! What-if result data model.
//!
//! This module holds the wire-format types for a what-if operation result
//! and the lazy materialization layer for its nested sub-documents.

mod delta;
mod document;
mod whatif;

pub use delta::{PropertyChangeType, PropertyDelta};
pub use document::LazyDocument;
pub use whatif::{ChangeType, ResourceChange, SUCCESS_STATUS, WhatIfErrorDetail, WhatIfResult};
