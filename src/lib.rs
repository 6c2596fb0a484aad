// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(warnings)]                    // All warnings are treated as errors
#![deny(unsafe_code)]                 // Unsafe code is forbidden
#![deny(missing_docs)]                // All public items must be documented
#![deny(dead_code)]                   // Unused code is forbidden
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_imports)]              // Unused imports are forbidden
#![deny(unused_variables)]            // Unused variables are forbidden
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden
#![forbid(unsafe_op_in_unsafe_fn)]    // Unsafe ops in unsafe fns are forbidden

// Clippy lints (warnings only)
#![warn(clippy::all)]                 // All standard Clippy lints
#![warn(clippy::pedantic)]            // Very strict Clippy lints
#![warn(clippy::nursery)]             // Experimental lints
#![warn(clippy::unwrap_used)]         // unwrap() warning
#![warn(clippy::expect_used)]         // expect() warning
#![warn(clippy::panic)]               // panic!() warning
#![warn(clippy::print_stdout)]        // println!() warning
#![warn(clippy::todo)]                // TODO warning
#![warn(clippy::unimplemented)]       // unimplemented!() warning
#![warn(clippy::missing_const_for_fn)] // Force const when possible
#![warn(clippy::unwrap_in_result)]    // unwrap() in Result warning
#![warn(clippy::module_inception)]    // Module with same name as crate warning
#![warn(clippy::redundant_clone)]     // Useless clones warning
#![warn(clippy::shadow_unrelated)]    // Shadowing unrelated variables warning
#![warn(clippy::too_many_arguments)]  // Limit function arguments
#![warn(clippy::cognitive_complexity)] // Limit cognitive complexity

// Safety and robustness lints
#![deny(overflowing_literals)]        // Overflowing literals are forbidden
#![deny(arithmetic_overflow)]         // Arithmetic overflow is forbidden

// ============================================================================
// Crate Documentation
// ============================================================================

//! # Armcost
//!
//! Normalizes Azure Resource Manager what-if deployment plans into a
//! provider-agnostic change model for cost estimation.
//!
//! ## Overview
//!
//! A what-if plan is a dry-run report describing the resources a
//! deployment would create, delete, modify, or leave unchanged. Armcost
//! turns that report into two ordered sequences of priceable (or
//! explicitly skipped) resource records:
//!
//! - Lazily materialize the deeply nested before/after sub-documents
//! - Classify each change and translate ARM types to canonical types
//! - Preserve the recursive property-delta tree for impact reporting
//! - Consult an immutable pricing registry per normalized record
//!
//! ## Modules
//!
//! - [`model`]: What-if wire model and lazy document materialization
//! - [`translate`]: ARM type to canonical type translation
//! - [`normalize`]: Change normalization and resource building
//! - [`registry`]: Pricing registry contract and stock registrations
//! - [`provider`]: Plan acquisition (what-if JSON, ARM templates)
//! - [`config`]: Project configuration parsing
//! - [`cli`]: Command-line interface
//!
//! ## Example
//!
//! ```no_run
//! use armcost::normalize::Normalizer;
//! use armcost::registry::default_registry;
//! use armcost::usage::UsageMap;
//!
//! let registry = default_registry();
//! let normalizer = Normalizer::new(&registry);
//! let payload = std::fs::read("what_if.json").unwrap();
//! let changes = normalizer.parse(&payload, &UsageMap::new()).unwrap();
//! for change in &changes {
//!     println!("{}: {}", change.change_type, change.resource_id);
//! }
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod project;
pub mod provider;
pub mod registry;
pub mod translate;
pub mod usage;

// ============================================================================
// Re-exports
// ============================================================================

pub use cli::{Cli, Commands, OutputFormatter};
pub use config::{ConfigFile, ConfigParser, DeploymentMode, DeploymentScope, ProjectConfig};
pub use error::{ArmCostError, Result};
pub use model::{ChangeType, LazyDocument, PropertyChangeType, PropertyDelta, WhatIfResult};
pub use normalize::{NormalizedChange, Normalizer, PartialResource, ResourceRecord};
pub use project::{Project, ProjectMetadata};
pub use provider::{ArmTemplateProvider, Provider, WhatIfJsonProvider};
pub use registry::{default_registry, Registration, Registry, RegistryBuilder};
pub use usage::{UsageMap, UsageRecord};
