//! Domain model and post-processing pipeline for generated task plans.
//!
//! - **Domain**: tasks, plan requests and responses
//! - **Timeline**: backfilling missing start and due dates across a horizon
//! - **Validation**: dependency graph checks and timeline conflict detection

pub mod domain;
pub mod error;
pub mod timeline;
pub mod validation;

pub use domain::plan::{PlanMetadata, PlanRequest, PlanResponse, TimelineConflict};
pub use domain::task::Task;
pub use error::{PlanError, Result};
pub use timeline::backfill_dates;
pub use validation::{detect_timeline_conflicts, validate_dependencies};
