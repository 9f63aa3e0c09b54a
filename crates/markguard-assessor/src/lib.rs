//! Markguard Assessor
//!
//! Grades every extracted trademark record for conflict with a target
//! application by asking a reasoning service to apply a fixed rule taxonomy.
//!
//! # Architecture
//!
//! ```text
//! Record → route_for → PromptBuilder → RequestPipeline → ConflictAssessment
//! ```
//!
//! Records are assessed concurrently up to a configurable cap. A failed
//! request never aborts the batch; its error text stands in for the verdict.
//!
//! # Example Usage
//!
//! ```
//! use markguard_assessor::{AssessorConfig, ConflictAssessor};
//! use markguard_domain::{EndpointRoute, Field, Record, RouteId};
//! use markguard_llm::{MockTransport, ServiceConfig};
//!
//! # tokio_test::block_on(async {
//! let route = |id| EndpointRoute {
//!     id,
//!     base_url: "http://localhost".to_string(),
//!     deployment: "gpt".to_string(),
//!     api_key: "key".to_string(),
//!     api_version: "2024-02-01".to_string(),
//! };
//! let service = ServiceConfig { route_a: route(RouteId::A), route_b: route(RouteId::B) };
//! let assessor = ConflictAssessor::new(
//!     MockTransport::new("Conflict Level: High"),
//!     service,
//!     &AssessorConfig::default(),
//! )
//! .unwrap();
//!
//! let records = vec![Record::default().with(Field::ApplicationNumber, "123").with(Field::Class, "9")];
//! let report = assessor.assess_all(&records).await;
//!
//! assert_eq!(report.verdict_for("123"), "Conflict Level: High");
//! assert_eq!(report.assessments()[0].route, RouteId::B);
//! # });
//! ```

#![warn(missing_docs)]

mod assessor;
mod config;
mod error;
mod prompt;
mod report;
mod routing;


pub use assessor::ConflictAssessor;
pub use config::AssessorConfig;
pub use error::AssessorError;
pub use prompt::{PromptBuilder, MISSING_VALUE};
pub use report::{AssessmentReport, NO_RESULT};
pub use routing::{route_for, TARGET_CLASS_MARKER};
