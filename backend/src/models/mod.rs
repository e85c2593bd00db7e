//! Domain models for workflow analysis
//!
//! - **role**: Personnel roles and their hourly rates
//! - **step**: Activity steps with per-role allocations
//! - **scenario**: Named alternatives grouping steps by stage
//! - **infrastructure**: Non-personnel cost items
//! - **roi**: Impact parameters
//! - **assumption**: Free-text analyst assumptions
//! - **workflow**: The record store snapshot tying them together

pub mod assumption;
pub mod infrastructure;
pub mod role;
pub mod roi;
pub mod scenario;
pub mod step;
pub mod workflow;

// Re-exports
pub use assumption::Assumption;
pub use infrastructure::{InfrastructureCostItem, DEFAULT_CATEGORIES};
pub use role::PersonnelRole;
pub use roi::RoiParameters;
pub use scenario::Scenario;
pub use step::{ActivityStep, PLACEHOLDER_STEP};
pub use workflow::{Workflow, WorkflowError, DEFAULT_SCENARIOS};
