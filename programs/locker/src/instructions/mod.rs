//! Locked-account operations, grouped by lifecycle stage

pub mod configure;
pub mod initialize;
pub mod lock;
pub mod migrate;
pub mod outcome;
pub mod reclaim;
pub mod unlock;

pub use reclaim::ReclaimTarget;
