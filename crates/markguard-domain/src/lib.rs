//! Markguard Domain Layer
//!
//! Core types and trait interfaces shared by every other Markguard crate.
//! The only external dependency is `serde`, so records can cross the
//! presentation and persistence boundaries as field-keyed maps.
//!
//! ## Key Concepts
//!
//! - **Field**: one of the nine columns of the trademark report layout
//! - **Record**: one reconstructed trademark entry, each field optional
//! - **Target trademark**: the fixed application every record is compared against
//! - **Endpoint route**: one of two reasoning-service destinations
//! - **Conflict assessment**: the verdict (or inline error) for one record
//!
//! ## Architecture
//!
//! - Pure data and trait definitions only
//! - Infrastructure implementations live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod assessment;
pub mod field;
pub mod record;
pub mod route;
pub mod target;
pub mod traits;

// Re-exports for convenience
pub use assessment::{AssessmentError, AssessmentOutcome, ConflictAssessment};
pub use field::Field;
pub use record::Record;
pub use route::{EndpointRoute, RouteId};
pub use target::{TargetTrademark, SHIELD_TARGET};
