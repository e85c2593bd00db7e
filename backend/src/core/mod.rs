//! Core vocabulary shared by every engine component
//!
//! - **stage**: The fixed, ordered workflow stage list
//! - **units**: Unit conversion constants (hours per week, projection horizon)
//! - **identity**: Record identity and content fingerprints

pub mod identity;
pub mod stage;
pub mod units;

pub use identity::{content_hash, new_record_id};
pub use stage::{Stage, UnknownStage};
