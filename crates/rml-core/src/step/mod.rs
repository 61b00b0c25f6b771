//! Wizard steps: partitioning a role into the eight field groups and
//! grouping import warnings by step.

mod classify;
mod model;
mod partition;

pub use classify::{FALLBACK_STEP, classify_warning, classify_warnings};
pub use model::{StepBucket, StepFields, StepId};
pub use partition::{partition_import, partition_role, step_has_data};
